//! REST client module for the auth backend.
//!
//! This module provides the `ApiClient` for logging in, signing up and
//! calling protected endpoints with the session's bearer token, plus the
//! `ApiError` classification every call resolves to.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::{ApiError, ErrorKind};
