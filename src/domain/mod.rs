/*
 * Responsibility
 * - records the core reads and derives from (BlogRecord / UserRecord)
 * - validated write inputs (NewBlog / NewUser)
 * - validation at the construction boundary (ValidationError)
 * - no HTTP / sqlx dependency here
 */
pub mod blog;
pub mod error;
pub mod user;

pub use blog::{BlogRecord, NewBlog, parse_likes};
pub use error::ValidationError;
pub use user::{MIN_PASSWORD_LEN, NewUser, UserRecord};
