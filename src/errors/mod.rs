//! Error and warning catalog.
//!
//! Every problem found while generating commands is a value with a stable
//! `kind` code, a human-readable message and a structured payload. Callers
//! surface them upstream as [`IssueRecord`]s.

mod error;
mod warning;

pub use error::{Action, CommandCreatorError};
pub use warning::CommandCreatorWarning;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wire form of an error or warning: `{kind, message, payload}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueRecord {
    pub kind: String,
    pub message: String,
    pub payload: Value,
}

impl IssueRecord {
    fn build<T: Serialize>(kind: &str, message: String, issue: &T) -> Self {
        let payload = match serde_json::to_value(issue) {
            Ok(Value::Object(mut fields)) => {
                fields.remove("kind");
                Value::Object(fields)
            }
            _ => Value::Object(Map::new()),
        };

        Self {
            kind: kind.to_string(),
            message,
            payload,
        }
    }
}

impl CommandCreatorError {
    pub fn to_record(&self) -> IssueRecord {
        IssueRecord::from(self)
    }
}

impl CommandCreatorWarning {
    pub fn to_record(&self) -> IssueRecord {
        IssueRecord::from(self)
    }
}

impl From<&CommandCreatorError> for IssueRecord {
    fn from(error: &CommandCreatorError) -> Self {
        Self::build(error.kind(), error.to_string(), error)
    }
}

impl From<&CommandCreatorWarning> for IssueRecord {
    fn from(warning: &CommandCreatorWarning) -> Self {
        Self::build(warning.kind(), warning.to_string(), warning)
    }
}
