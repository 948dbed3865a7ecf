//! Client cores for remote-entity.
//!
//! Two independent cores live here:
//!
//! - [`auth`] + [`api`]: the bearer-token session lifecycle and the REST
//!   auth gateway (login, signup, protected data).
//! - [`soap`]: envelope construction and response parsing for the SOAP todo
//!   service.
//!
//! The cores share no state. The only cross-call state in the crate is the
//! single token slot owned by [`auth::Session`].

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod soap;
pub mod utils;

pub use api::{ApiClient, ApiError, ErrorKind};
pub use auth::{Session, SessionState, TokenStore};
pub use config::Config;
pub use models::{SecureGreeting, Todo};
pub use soap::{SoapError, TodoClient};
