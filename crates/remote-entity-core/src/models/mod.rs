//! Data models shared with the view layer.
//!
//! - `Todo`: one item of the SOAP todo list
//! - `SecureGreeting`: the protected endpoint's message and derived username

pub mod greeting;
pub mod todo;

pub use greeting::{extract_username, SecureGreeting};
pub use todo::Todo;
