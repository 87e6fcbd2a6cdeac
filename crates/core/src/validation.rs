//! Helpers for turning `validator` results into client-facing messages.
//!
//! The `validator` crate reports field errors in a hash map, so the order in
//! which violations come back is arbitrary. Payload types pass their schema's
//! declared field order so that the reported violation is stable.

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Pick the message of the first violation, walking fields in `field_order`.
///
/// Fields absent from `field_order` are considered afterwards in
/// alphabetical order. Returns `None` when `errors` holds no field errors.
pub fn first_violation(errors: &ValidationErrors, field_order: &[&str]) -> Option<String> {
    let by_field = errors.errors();

    for field in field_order {
        if let Some(ValidationErrorsKind::Field(list)) = by_field.get(*field) {
            if let Some(first) = list.first() {
                return Some(describe(field, first));
            }
        }
    }

    let mut rest: Vec<(&str, &Vec<ValidationError>)> = by_field
        .iter()
        .filter_map(|(name, kind)| match kind {
            ValidationErrorsKind::Field(list) => Some((&**name, list)),
            _ => None,
        })
        .filter(|(name, _)| !field_order.contains(name))
        .collect();
    rest.sort_by(|a, b| a.0.cmp(b.0));

    rest.into_iter()
        .find_map(|(name, list)| list.first().map(|first| describe(name, first)))
}

/// Render a single violation, falling back to the error code when the rule
/// carries no custom message.
fn describe(field: &str, error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => default_message(field, &error.code),
    }
}

fn default_message(field: &str, code: &Cow<'static, str>) -> String {
    format!("\"{field}\" failed {code} validation")
}
