//! Top-level error wrapper types.

use crate::{CommitError, ConfigError, GatewayError, StagingError, ValidationError};

/// The foundation error enum for the Atelier workspace.
///
/// # Examples
///
/// ```
/// use atelier_error::{AtelierError, CommitError, CommitErrorKind};
///
/// let commit_err = CommitError::new(CommitErrorKind::Create("timeout".to_string()));
/// let err: AtelierError = commit_err.into();
/// assert!(format!("{}", err).contains("Commit Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum AtelierErrorKind {
    /// Pre-flight validation error
    #[from(ValidationError)]
    Validation(ValidationError),
    /// File staging error
    #[from(StagingError)]
    Staging(StagingError),
    /// Object store gateway error
    #[from(GatewayError)]
    Gateway(GatewayError),
    /// Entity commit error
    #[from(CommitError)]
    Commit(CommitError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Atelier error with kind discrimination.
///
/// # Examples
///
/// ```
/// use atelier_error::{AtelierResult, ValidationError, ValidationErrorKind};
///
/// fn might_fail() -> AtelierResult<()> {
///     Err(ValidationError::new(ValidationErrorKind::NoAssets))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Atelier Error: {}", _0)]
pub struct AtelierError(Box<AtelierErrorKind>);

impl AtelierError {
    /// Create a new error from a kind.
    pub fn new(kind: AtelierErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AtelierErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to AtelierErrorKind
impl<T> From<T> for AtelierError
where
    T: Into<AtelierErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Atelier operations.
///
/// # Examples
///
/// ```
/// use atelier_error::{AtelierResult, GatewayError, GatewayErrorKind};
///
/// fn upload() -> AtelierResult<String> {
///     Err(GatewayError::new(GatewayErrorKind::Upload("connection reset".to_string())))?
/// }
/// ```
pub type AtelierResult<T> = std::result::Result<T, AtelierError>;
