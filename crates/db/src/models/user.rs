//! User entity model and DTOs.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use users_core::error::CoreError;
use users_core::types::{DbId, Timestamp};
use users_core::validation::first_violation;
use validator::{Validate, ValidationError};

const INVALID_EMAIL: &str = "\"email\" must be a valid email";

/// Full user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating or replacing a user.
///
/// Every field is `Option` so that a missing field surfaces as a validation
/// violation rather than a deserialization failure. Create and update share
/// this schema: all three fields are required on every write.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UserPayload {
    #[validate(
        required(message = "\"name\" is required"),
        length(
            min = 3,
            max = 30,
            message = "\"name\" length must be between 3 and 30 characters"
        )
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "\"email\" is required"),
        email(message = "\"email\" must be a valid email"),
        custom(
            function = require_dotted_domain,
            message = "\"email\" must be a valid email"
        )
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "\"role\" is required"),
        length(
            min = 3,
            max = 30,
            message = "\"role\" length must be between 3 and 30 characters"
        )
    )]
    pub role: Option<String>,
}

impl UserPayload {
    /// Schema order used to pick the violation reported to the client.
    pub const FIELD_ORDER: [&'static str; 3] = ["name", "email", "role"];

    /// Validate the payload and unwrap it into repository input.
    ///
    /// On failure the error carries the first violation in
    /// [`Self::FIELD_ORDER`].
    pub fn into_input(self) -> Result<UserInput, CoreError> {
        self.validate().map_err(|errors| {
            CoreError::Validation(
                first_violation(&errors, &Self::FIELD_ORDER)
                    .unwrap_or_else(|| "Invalid user payload".to_string()),
            )
        })?;

        match (self.name, self.email, self.role) {
            (Some(name), Some(email), Some(role)) => Ok(UserInput { name, email, role }),
            _ => Err(CoreError::Validation("Invalid user payload".to_string())),
        }
    }
}

/// Rejects addresses the `email` rule lets through without a real domain:
/// the domain needs at least two labels and a TLD of two or more letters.
fn require_dotted_domain(email: &str) -> Result<(), ValidationError> {
    let domain = email.rsplit_once('@').map_or("", |(_, domain)| domain);
    let mut labels = domain.split('.');
    let tld = labels.next_back().unwrap_or_default();

    let has_host = labels.next().is_some();
    let labels_ok = domain.split('.').all(|label| !label.is_empty());
    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());

    if has_host && labels_ok && tld_ok {
        Ok(())
    } else {
        Err(ValidationError::new("email").with_message(Cow::Borrowed(INVALID_EMAIL)))
    }
}

/// Validated column values for an insert or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub role: String,
}
