use crate::types::DbId;

/// Domain-level failures that are independent of storage and transport.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No row matches the requested identifier. Distinct from a storage failure.
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A write payload failed schema validation. Carries the first violation.
    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_omits_the_id() {
        let err = CoreError::NotFound {
            entity: "User",
            id: 42,
        };
        assert_eq!(err.to_string(), "User not found");
    }

    #[test]
    fn validation_message_is_passed_through_verbatim() {
        let err = CoreError::Validation("\"name\" is required".into());
        assert_eq!(err.to_string(), "\"name\" is required");
    }
}
