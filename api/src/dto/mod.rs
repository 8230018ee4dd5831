pub mod requests;
pub mod responses;

pub use requests::{CreatePostRequest, ListParams, UpdatePostRequest};
pub use responses::PostListResponse;
