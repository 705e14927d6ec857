//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, paths and listing queries.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::AuthUser;
pub use pagination::TaskListing;
pub use path::TaskIdPath;
pub use validated::ValidatedJson;
