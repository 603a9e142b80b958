use std::path::{Path, PathBuf};

use crate::persist::{AtomicFileWriter, PersistError};

pub const DOCUMENT_HEADING: &str = "# Codebase Genius\n\n";
pub const DOCUMENT_FILENAME: &str = "output.md";

/// In-memory Markdown document offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownBlob {
    pub filename: String,
    pub content: String,
}

impl MarkdownBlob {
    /// Heading followed by the input, with no trimming or escaping.
    pub fn from_input(input: &str) -> Self {
        Self {
            filename: DOCUMENT_FILENAME.to_string(),
            content: format!("{DOCUMENT_HEADING}{input}"),
        }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Saves the blob into `dir`, replacing any previous download of the same name.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, PersistError> {
        AtomicFileWriter::new(dir.to_path_buf()).write(&self.filename, &self.content)
    }
}
