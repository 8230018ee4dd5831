pub mod health;
pub mod post;
pub mod ui;
