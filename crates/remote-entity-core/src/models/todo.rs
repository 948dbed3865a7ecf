use serde::{Deserialize, Serialize};

use crate::utils::completion_mark;

/// A todo item as returned by the SOAP service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

impl Todo {
    pub fn status_display(&self) -> &'static str {
        completion_mark(self.completed)
    }
}
