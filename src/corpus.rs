//! Source corpus: every source file concatenated into one searchable string

use crate::error::{CheckError, Result};
use std::path::PathBuf;

/// Concatenated source text, each file followed by a newline.
///
/// File boundaries are not kept. Only the newline separates the end of one
/// file from the start of the next, so a reference containing a line break
/// can match across that seam.
#[derive(Debug, Default, Clone)]
pub struct SourceCorpus {
    text: String,
    files: usize,
}

impl SourceCorpus {
    /// Read `files` in order. Any unreadable or non-UTF-8 file aborts the build.
    pub async fn build(files: &[PathBuf]) -> Result<Self> {
        let mut corpus = Self::default();
        for path in files {
            let content = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| CheckError::Read {
                    path: path.clone(),
                    source,
                })?;
            corpus.push(&content);
        }

        tracing::debug!(files = corpus.files, bytes = corpus.text.len(), "built source corpus");
        Ok(corpus)
    }

    fn push(&mut self, content: &str) {
        self.text.push_str(content);
        self.text.push('\n');
        self.files += 1;
    }

    /// Exact, case-sensitive substring test
    pub fn contains(&self, reference: &str) -> bool {
        self.text.contains(reference)
    }

    pub fn file_count(&self) -> usize {
        self.files
    }

    #[cfg(test)]
    fn as_str(&self) -> &str {
        &self.text
    }
}
