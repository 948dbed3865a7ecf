use std::fmt;

use thiserror::Error;

/// What the client was doing when a SOAP exchange failed. Named in the
/// message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Loading,
    Saving,
    Deleting,
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activity::Loading => write!(f, "loading todos"),
            Activity::Saving => write!(f, "saving the todo"),
            Activity::Deleting => write!(f, "deleting the todo"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SoapError {
    /// No response was obtained. Any response at all, whatever its status,
    /// counts as a completed exchange.
    #[error("Error while {activity}: {source}")]
    Network {
        activity: Activity,
        #[source]
        source: reqwest::Error,
    },

    /// Rejected locally before any request was sent
    #[error("{0}")]
    Validation(String),
}

impl SoapError {
    pub fn is_network(&self) -> bool {
        matches!(self, SoapError::Network { .. })
    }

    pub fn activity(&self) -> Option<Activity> {
        match self {
            SoapError::Network { activity, .. } => Some(*activity),
            SoapError::Validation(_) => None,
        }
    }
}
