//! Staging error types.

/// Kinds of staging errors.
///
/// Staging errors are raised at file-selection time, before any network
/// call, and a rejected batch never enters staged state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StagingErrorKind {
    /// Accepting the batch would exceed the configured asset maximum
    #[display("Too many assets: staging {} more would exceed the maximum of {}", _0, _1)]
    TooManyAssets(usize, usize),
    /// A selected file exceeds the configured size limit
    #[display("File too large: {} is {} bytes, maximum is {}", _0, _1, _2)]
    FileTooLarge(String, usize, usize),
    /// A selected file's content type is not accepted
    #[display("Unsupported file type: {} ({})", _0, _1)]
    UnsupportedType(String, String),
    /// A preview URL was released that this allocator never minted
    #[display("Unknown preview URL: {}", _0)]
    UnknownPreview(String),
    /// Index outside the staged asset list
    #[display("No staged asset at index {}", _0)]
    IndexOutOfRange(usize),
}

/// Staging error with location tracking.
///
/// # Examples
///
/// ```
/// use atelier_error::{StagingError, StagingErrorKind};
///
/// let err = StagingError::new(StagingErrorKind::TooManyAssets(3, 10));
/// assert!(format!("{}", err).contains("Too many assets"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Staging Error: {} at line {} in {}", kind, line, file)]
pub struct StagingError {
    /// The kind of error that occurred
    pub kind: StagingErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StagingError {
    /// Create a new staging error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StagingErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
