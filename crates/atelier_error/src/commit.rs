//! Entity commit error types.

/// Kinds of commit errors.
///
/// Raised by the final create/update call of a submission. Staged state is
/// preserved so the user can retry without re-selecting files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CommitErrorKind {
    /// The create call failed
    #[display("Create failed: {}", _0)]
    Create(String),
    /// The update call failed
    #[display("Update failed: {}", _0)]
    Update(String),
    /// The API rejected the assembled payload
    #[display("Payload rejected: {}", _0)]
    Rejected(String),
}

/// Commit error with location tracking.
///
/// # Examples
///
/// ```
/// use atelier_error::{CommitError, CommitErrorKind};
///
/// let err = CommitError::new(CommitErrorKind::Create("503".to_string()));
/// assert!(format!("{}", err).contains("Create failed"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Commit Error: {} at line {} in {}", kind, line, file)]
pub struct CommitError {
    /// The kind of error that occurred
    pub kind: CommitErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CommitError {
    /// Create a new commit error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CommitErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
