//! Pre-flight validation error types.

/// Kinds of validation errors.
///
/// Validation runs before submission starts; a validation failure never
/// issues a network call.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum ValidationErrorKind {
    /// A required text field is empty or missing
    #[display("Required field is empty: {}", _0)]
    MissingField(String),
    /// The module requires at least one staged asset
    #[display("At least one asset is required")]
    NoAssets,
    /// A numeric field is outside its declared bounds
    #[display("Field {} out of bounds: {} not in [{}, {}]", _0, _1, _2, _3)]
    OutOfBounds(String, f64, f64, f64),
    /// A required category or foreign-key selection is absent
    #[display("Required selection is missing: {}", _0)]
    MissingSelection(String),
    /// A numeric field holds a non-numeric value
    #[display("Field {} is not numeric", _0)]
    NotNumeric(String),
}

/// Validation error with location tracking.
///
/// # Examples
///
/// ```
/// use atelier_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::MissingField("title".to_string()));
/// assert!(format!("{}", err).contains("title"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The kind of error that occurred
    pub kind: ValidationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new validation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
