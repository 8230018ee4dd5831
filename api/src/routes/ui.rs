use crate::{errors::ApiError, routes::post::parse_post_id};
use askama::Template;
use axum::{
    extract::Path,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// Rows fetched per "Load more" click on the list page.
pub const UI_PAGE_SIZE: u32 = 20;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexPage {
    page_size: u32,
}

#[derive(Template)]
#[template(path = "post.html")]
struct PostView {
    id: i64,
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPage<'a> {
    status: u16,
    message: &'a str,
}

fn render(template: &impl Template) -> Result<Html<String>, ApiError> {
    template
        .render()
        .map(Html)
        .map_err(|e| ApiError::InternalError(format!("Template rendering failed: {}", e)))
}

fn error_page(status: StatusCode, message: &str) -> Result<Response, ApiError> {
    let page = ErrorPage {
        status: status.as_u16(),
        message,
    };
    Ok((status, render(&page)?).into_response())
}

/// GET /
pub async fn index_page() -> Result<Html<String>, ApiError> {
    render(&IndexPage {
        page_size: UI_PAGE_SIZE,
    })
}

/// GET /post/{id}
///
/// Renders the shell only; the post itself is fetched through `GET /posts/{id}`.
pub async fn post_page(Path(id): Path<String>) -> Result<Response, ApiError> {
    let Ok(id) = parse_post_id(&id) else {
        return error_page(StatusCode::BAD_REQUEST, "Invalid post id.");
    };

    Ok(render(&PostView { id })?.into_response())
}
