//! # Error Types
//!
//! Error types for bistro-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bistro-core errors (this file)                                        │
//! │  ├── CoreError        - General errors from pure logic                 │
//! │  ├── RouteError       - Route parameter missing / malformed            │
//! │  └── FieldErrors      - Per-field request validation messages          │
//! │                                                                         │
//! │  bistro-client errors (separate crate)                                 │
//! │  └── ClientError      - Network, API, decode, config failures          │
//! │                                                                         │
//! │  Flow: ValidationErrors → FieldErrors → ClientError::Validation → Page │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by the pure logic in this crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A route parameter could not be turned into a typed identifier.
    #[error("Route error: {0}")]
    Route(#[from] RouteError),

    /// A request body failed validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] FieldErrors),

    /// A response payload could not be decoded into the expected record.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

// =============================================================================
// Route Error
// =============================================================================

/// Failures when deriving identifiers from the current URL.
///
/// ## Why Two Variants?
/// A page visited without a branch segment (`/pos`) should render the
/// global view, while `/branch/abc/pos` is a broken link. Callers branch
/// on the variant to decide between the two.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The parameter is not present in the current route.
    #[error("route parameter '{name}' is missing")]
    MissingParam { name: String },

    /// The parameter is present but not a valid identifier.
    #[error("route parameter '{name}' has invalid value '{value}'")]
    InvalidParam { name: String, value: String },
}

// =============================================================================
// Field Errors
// =============================================================================

/// Field-level validation messages, keyed by field name.
///
/// This is what a form renders next to each input. Keys are sorted so the
/// output is stable across runs.
///
/// ```json
/// { "name": ["name is required"], "cnic": ["cnic must have 13 digits"] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message for a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Returns true if no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages for one field, empty when it passed.
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Names of every field that failed.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Converts into a result: `Ok(())` when empty.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl From<validator::ValidationErrors> for FieldErrors {
    /// Flattens `validator` output into one message list per field.
    ///
    /// Nested structs and lists are prefixed with the parent field
    /// (`options.name`, `items[2].quantity`).
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        collect_validator_errors(&mut out, None, &errors);
        out
    }
}

fn collect_validator_errors(
    out: &mut FieldErrors,
    prefix: Option<&str>,
    errors: &validator::ValidationErrors,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let name = match prefix {
            Some(p) => format!("{}.{}", p, field),
            None => field.to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for err in list {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid ({})", name, err.code));
                    out.add(name.clone(), message);
                }
            }
            ValidationErrorsKind::Struct(inner) => {
                collect_validator_errors(out, Some(&name), inner);
            }
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    let item_name = format!("{}[{}]", name, index);
                    collect_validator_errors(out, Some(&item_name), inner);
                }
            }
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_error_messages() {
        let err = RouteError::MissingParam {
            name: "branchId".to_string(),
        };
        assert_eq!(err.to_string(), "route parameter 'branchId' is missing");

        let err = RouteError::InvalidParam {
            name: "branchId".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "route parameter 'branchId' has invalid value 'abc'"
        );
    }

    #[test]
    fn test_validator_errors_become_field_errors() {
        let mut errors = validator::ValidationErrors::new();
        errors.add(
            "cnic",
            validator::ValidationError::new("cnic").with_message("cnic must have 13 digits".into()),
        );
        errors.add("salary", validator::ValidationError::new("range"));

        let fields = FieldErrors::from(errors);
        assert_eq!(fields.messages("cnic"), ["cnic must have 13 digits".to_string()]);
        assert_eq!(fields.messages("salary"), ["salary is invalid (range)".to_string()]);
    }

    #[test]
    fn test_field_errors_display_is_sorted() {
        let mut errors = FieldErrors::new();
        errors.add("phone", "phone is required");
        errors.add("cnic", "cnic must have 13 digits");
        assert_eq!(
            errors.to_string(),
            "cnic: cnic must have 13 digits; phone: phone is required"
        );
    }

    #[test]
    fn test_field_errors_into_result() {
        assert!(FieldErrors::new().into_result().is_ok());

        let mut errors = FieldErrors::new();
        errors.add("name", "name is required");
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_route_error_converts_to_core_error() {
        let err = RouteError::MissingParam {
            name: "customerId".to_string(),
        };
        let core: CoreError = err.into();
        assert!(matches!(core, CoreError::Route(_)));
    }
}
