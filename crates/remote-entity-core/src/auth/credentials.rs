//! Transient login/signup payloads. Passwords stay wrapped in
//! [`SecretString`] until serialized into the outgoing request body.

use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, Serializer};

fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

/// Body of `POST /auth/login`
#[derive(Debug, Serialize)]
pub struct LoginCredentials {
    pub username: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

impl LoginCredentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: SecretString::from(password.to_string()),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.expose_secret().is_empty()
    }
}

/// Body of `POST /auth/signup`
#[derive(Debug, Serialize)]
pub struct SignupCredentials {
    pub username: String,
    pub email: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

impl SignupCredentials {
    pub fn new(username: &str, email: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            email: email.to_string(),
            password: SecretString::from(password.to_string()),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.username.is_empty()
            && !self.email.is_empty()
            && !self.password.expose_secret().is_empty()
    }
}
