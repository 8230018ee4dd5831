pub mod post;

pub use post::{PostError, PostPage, PostService};
