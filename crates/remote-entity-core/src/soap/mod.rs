//! SOAP client module for the todo service.
//!
//! - `envelope`: request documents for each operation
//! - `parse`: lenient extraction of todos from response documents
//! - `TodoClient`: issues the calls and re-fetches after every write
//!
//! The service is unauthenticated; nothing here touches the auth session.

pub mod client;
pub mod envelope;
pub mod error;
pub mod parse;

pub use client::TodoClient;
pub use envelope::Operation;
pub use error::{Activity, SoapError};
pub use parse::parse_todos;
