use crate::models::PostChanges;
use serde::Deserialize;
use validator::Validate;

/// POST /posts body. Fields are optional at the serde level so a missing
/// field surfaces as a 400 validation error rather than a rejection.
#[derive(Debug, Validate, Deserialize)]
pub struct CreatePostRequest {
    #[validate(
        required(message = "Title and body are required"),
        length(min = 1, message = "Title and body are required")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "Title and body are required"),
        length(min = 1, message = "Title and body are required")
    )]
    pub body: Option<String>,
}

/// PATCH/PUT /posts/{id} body. Absent fields are left unchanged.
#[derive(Debug, Default, Validate, Deserialize)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Body must not be empty"))]
    pub body: Option<String>,
}

impl From<UpdatePostRequest> for PostChanges {
    fn from(req: UpdatePostRequest) -> Self {
        Self {
            title: req.title,
            body: req.body,
        }
    }
}

const DEFAULT_TAKE: u32 = 100;

/// Pagination query parameters
///
/// Kept as raw strings: empty, malformed or zero values fall back to the
/// defaults (`skip=0`, `take=100`) instead of failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: Option<String>,
    #[serde(default)]
    pub take: Option<String>,
}

impl ListParams {
    pub fn skip(&self) -> u32 {
        parse_count(self.skip.as_deref()).unwrap_or(0)
    }

    pub fn take(&self) -> u32 {
        parse_count(self.take.as_deref())
            .filter(|&take| take > 0)
            .unwrap_or(DEFAULT_TAKE)
    }
}

fn parse_count(raw: Option<&str>) -> Option<u32> {
    raw?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_requires_both_fields() {
        let missing: CreatePostRequest = serde_json::from_str(r#"{"title":"A"}"#).unwrap();
        assert!(missing.validate().is_err());

        let empty: CreatePostRequest =
            serde_json::from_str(r#"{"title":"","body":"B"}"#).unwrap();
        assert!(empty.validate().is_err());

        let ok: CreatePostRequest = serde_json::from_str(r#"{"title":"A","body":"B"}"#).unwrap();
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn update_request_allows_partial_fields() {
        let partial: UpdatePostRequest = serde_json::from_str(r#"{"body":"new"}"#).unwrap();
        assert!(partial.validate().is_ok());

        let changes = PostChanges::from(partial);
        assert_eq!(changes.title, None);
        assert_eq!(changes.body.as_deref(), Some("new"));

        let empty: UpdatePostRequest = serde_json::from_str(r#"{"title":""}"#).unwrap();
        assert!(empty.validate().is_err());
    }

    #[test]
    fn list_params_fall_back_to_defaults() {
        let absent: ListParams = serde_json::from_str("{}").unwrap();
        assert_eq!((absent.skip(), absent.take()), (0, 100));

        let empty: ListParams = serde_json::from_str(r#"{"skip":"","take":""}"#).unwrap();
        assert_eq!((empty.skip(), empty.take()), (0, 100));

        let junk: ListParams = serde_json::from_str(r#"{"skip":"abc","take":"-1"}"#).unwrap();
        assert_eq!((junk.skip(), junk.take()), (0, 100));

        let zero: ListParams = serde_json::from_str(r#"{"take":"0"}"#).unwrap();
        assert_eq!(zero.take(), 100);

        let given: ListParams = serde_json::from_str(r#"{"skip":"40","take":"20"}"#).unwrap();
        assert_eq!((given.skip(), given.take()), (40, 20));
    }
}
