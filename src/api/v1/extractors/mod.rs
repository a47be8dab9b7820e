/*!
 * Request extractors shared by the v1 handlers.
 *
 * - AuthHeader: raw `Authorization` value, handed to the auth pipeline as-is
 * - JsonBody<T>: JSON request body, rejected as AppError (400)
 * - PublicId<T>: public id in the path, decoded to the internal id
 */
mod auth_header;
mod json_body;
pub mod public_id;

pub use auth_header::AuthHeader;
pub use json_body::JsonBody;
pub use public_id::PublicBlogId;
