//! Required-field checks for incoming requests.
//!
//! Request DTOs keep every field optional so that a missing value produces a
//! descriptive `400` instead of a deserialization failure. Handlers call
//! [`require`] before touching storage.

use crate::error::CoreError;

/// Unwrap a required request field or fail with `message`.
///
/// ```
/// use allotment_core::validation::require;
///
/// assert_eq!(require(Some(3), "x is required.").unwrap(), 3);
/// assert!(require::<i64>(None, "x is required.").is_err());
/// ```
pub fn require<T>(value: Option<T>, message: &str) -> Result<T, CoreError> {
    value.ok_or_else(|| CoreError::Validation(message.to_string()))
}

/// Unwrap two required fields that share a single error message.
pub fn require_both<A, B>(a: Option<A>, b: Option<B>, message: &str) -> Result<(A, B), CoreError> {
    match (a, b) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(CoreError::Validation(message.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn require_passes_value_through() {
        assert_eq!(require(Some("Bed"), "name").unwrap(), "Bed");
    }

    #[test]
    fn require_reports_message() {
        let err = require::<String>(None, "Plant name is required.").unwrap_err();
        assert_matches!(err, CoreError::Validation(ref msg) if msg == "Plant name is required.");
    }

    #[test]
    fn require_both_needs_both() {
        assert_eq!(require_both(Some(1), Some(2), "m").unwrap(), (1, 2));
        assert_matches!(require_both(Some(1), None::<i64>, "m"), Err(CoreError::Validation(_)));
        assert_matches!(require_both(None::<i64>, Some(2), "m"), Err(CoreError::Validation(_)));
    }
}
