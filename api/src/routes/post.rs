use crate::{
    AppState,
    dto::{CreatePostRequest, ListParams, PostListResponse, UpdatePostRequest},
    errors::ApiError,
    models::Post,
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use validator::Validate;

/// Parse the `{id}` path segment; anything that isn't an integer is a 400.
pub fn parse_post_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::ValidationError("Invalid post id".into()))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| ApiError::ValidationError(e.body_text()))
}

/// GET /posts?skip=0&take=100
/// Headers: x-api-key: <key>
pub async fn list_posts(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<PostListResponse>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::ValidationError(e.body_text()))?;

    let page = state.posts.list(params.skip(), params.take()).await?;

    Ok(Json(page.into()))
}

/// POST /posts
/// Headers: x-api-key: <key>
/// Body: { "title": "...", "body": "..." }
pub async fn create_post(
    State(state): State<AppState>,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let payload = json_body(payload)?;
    payload
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;

    let (Some(title), Some(body)) = (payload.title, payload.body) else {
        return Err(ApiError::ValidationError(
            "Title and body are required".into(),
        ));
    };

    let post = state.posts.create(&title, &body).await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /posts/{id}
/// Headers: x-api-key: <key>
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    let id = parse_post_id(&id)?;
    let post = state.posts.get(id).await?;

    Ok(Json(post))
}

/// PATCH|PUT /posts/{id}
/// Headers: x-api-key: <key>
/// Body: { "title"?: "...", "body"?: "..." }
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> Result<Json<Post>, ApiError> {
    let id = parse_post_id(&id)?;
    let payload = json_body(payload)?;
    payload
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;

    let post = state.posts.update(id, payload.into()).await?;

    Ok(Json(post))
}

/// DELETE /posts/{id}
/// Headers: x-api-key: <key>
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_post_id(&id)?;
    state.posts.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_post_id_rejects_non_numeric() {
        assert_eq!(parse_post_id("42").unwrap(), 42);
        assert!(matches!(
            parse_post_id("abc"),
            Err(ApiError::ValidationError(_))
        ));
        assert!(matches!(parse_post_id("4.2"), Err(ApiError::ValidationError(_))));
    }
}
