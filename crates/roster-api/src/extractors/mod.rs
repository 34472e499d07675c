//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, pagination and path ids.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::AuthUser;
pub use pagination::{Pagination, PaginationParams};
pub use path::GuildIdPath;
pub use validated::ValidatedJson;
