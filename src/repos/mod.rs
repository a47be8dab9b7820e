pub mod blog_repo;
pub mod error;
pub mod user_repo;
