//! In-memory representation of a locally selected file.

use derive_getters::Getters;

/// A file the user selected in a form, held in memory until submission.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct LocalFile {
    /// Original filename as selected
    name: String,
    /// MIME content type (e.g. "image/png")
    content_type: String,
    /// Raw file bytes
    bytes: Vec<u8>,
}

impl LocalFile {
    /// Create a new in-memory file.
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Size of the file in bytes.
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// The filename extension, if any.
    pub fn extension(&self) -> Option<&str> {
        let (_, ext) = self.name.rsplit_once('.')?;
        (!ext.is_empty()).then_some(ext)
    }
}
