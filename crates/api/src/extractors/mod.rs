//! Request extractors.

pub mod user_auth;

pub use crate::middleware::auth::UserAuth;
