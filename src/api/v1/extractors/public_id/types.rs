/*
 * Responsibility
 *  - resource-specific public id types (tag + alias)
 *  - no decode logic here; see core.rs
 */
use super::core::PublicId;

// blogs
pub enum BlogTag {}
pub type PublicBlogId = PublicId<BlogTag>;
