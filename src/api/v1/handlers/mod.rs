pub mod blogs;
pub mod health;
pub mod stats;
pub mod users;
