use postboard::{
    AppState, app,
    config::Config,
    seed::HttpSeedSource,
    services::PostService,
    store::PostStore,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    // The pool is opened once here and shared by every request
    let store = PostStore::connect(&config.database_url).await?;
    let seed = HttpSeedSource::new(config.seed_source_url.clone());
    info!("Seed source: {}", seed.url());

    let state = AppState::new(PostService::new(store, Arc::new(seed)), config.api_key);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    info!("Server running on http://{}", config.bind_addr);
    info!("API Endpoints:");
    info!("  GET    /health           - Health check");
    info!("  GET    /posts            - List posts (key, paginated, seeds when empty)");
    info!("  POST   /posts            - Create post (key)");
    info!("  GET    /posts/{{id}}       - Get specific post (key)");
    info!("  PATCH  /posts/{{id}}       - Update post (key)");
    info!("  DELETE /posts/{{id}}       - Delete post (key)");
    info!("  GET    /                 - Posts UI");

    axum::serve(listener, app(state)).await?;

    Ok(())
}
