//! Object store gateway error types.

/// Kinds of gateway errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GatewayErrorKind {
    /// Upload to the object store failed
    #[display("Upload failed: {}", _0)]
    Upload(String),
    /// Key-to-URL resolution failed
    #[display("Failed to resolve key: {}", _0)]
    Resolve(String),
    /// Fetching content from a resolved URL failed
    #[display("Content fetch failed: {}", _0)]
    Fetch(String),
    /// Deletion by key failed
    #[display("Failed to delete key: {}", _0)]
    Delete(String),
    /// Object not found in the store
    #[display("Object not found: {}", _0)]
    NotFound(String),
    /// Failed to create storage directory
    #[display("Failed to create storage directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write object data
    #[display("Failed to write object: {}", _0)]
    FileWrite(String),
    /// Failed to read object data
    #[display("Failed to read object: {}", _0)]
    FileRead(String),
    /// Gateway backend is unavailable
    #[display("Gateway unavailable: {}", _0)]
    Unavailable(String),
}

/// Gateway error with location tracking.
///
/// # Examples
///
/// ```
/// use atelier_error::{GatewayError, GatewayErrorKind};
///
/// let err = GatewayError::new(GatewayErrorKind::NotFound("img/a".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Gateway Error: {} at line {} in {}", kind, line, file)]
pub struct GatewayError {
    /// The kind of error that occurred
    pub kind: GatewayErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GatewayError {
    /// Create a new gateway error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GatewayErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
