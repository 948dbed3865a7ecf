//! Authentication module for the bearer-token session.
//!
//! This module provides:
//! - `Session`: the single token slot and the Authenticated/Anonymous state
//! - `TokenStore`: durable backends for that slot (file, keychain, memory)
//! - `LoginCredentials` / `SignupCredentials`: transient request payloads
//!
//! A token has no expiry on the client side; it stays until logout or until
//! the server rejects it.

pub mod credentials;
pub mod session;
pub mod store;

pub use credentials::{LoginCredentials, SignupCredentials};
pub use session::{Session, SessionState};
pub use store::{FileTokenStore, KeyringTokenStore, MemoryTokenStore, TokenStore};
