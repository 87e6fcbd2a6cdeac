//! Shared response body types for API handlers.

use serde::{Deserialize, Serialize};

/// `{ "message": ... }` body used for confirmations and for every error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
