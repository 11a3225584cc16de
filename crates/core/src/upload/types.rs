//! Upload batch types and per-file outcomes.

use bytes::Bytes;

use crate::imaging::ImageDimensions;

/// One file part of a multipart upload, held in memory for the request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// File name supplied by the client.
    pub file_name: String,
    /// Content type supplied by the client. Not verified.
    pub content_type: String,
    /// File contents.
    pub content: Bytes,
}

impl UploadedFile {
    /// Create an uploaded file.
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            content: content.into(),
        }
    }

    /// Length of the contents in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Whether the file has no contents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Why a file was not sent to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Content type or extension not accepted.
    NotAnImage,
    /// Zero-length file.
    Empty,
    /// Larger than the configured bounds.
    TooLarge(ImageDimensions),
}

/// What happened to one file of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Written to storage.
    Uploaded,
    /// Not written, batch continued.
    Skipped(SkipReason),
    /// Processing failed and the batch stopped here.
    Failed,
}

impl FileOutcome {
    /// Short label for logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Uploaded => "uploaded",
            Self::Skipped(SkipReason::NotAnImage) => "skipped_not_an_image",
            Self::Skipped(SkipReason::Empty) => "skipped_empty",
            Self::Skipped(SkipReason::TooLarge(_)) => "skipped_too_large",
            Self::Failed => "failed",
        }
    }
}

/// Outcome of one file, by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// File name supplied by the client.
    pub file_name: String,
    /// What happened.
    pub outcome: FileOutcome,
}

/// Result of processing one batch: caller-facing messages in detection
/// order, plus the outcome of every file that was reached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    /// Warnings and errors, in the order they were detected.
    pub messages: Vec<String>,
    /// Per-file outcomes, in batch order. Files after a failure are absent.
    pub files: Vec<FileReport>,
}

impl UploadReport {
    /// True when nothing was reported.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages joined with newlines, as returned to HTTP callers.
    #[must_use]
    pub fn message_text(&self) -> String {
        self.messages.join("\n")
    }

    /// Number of files written to storage.
    #[must_use]
    pub fn uploaded_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.outcome == FileOutcome::Uploaded)
            .count()
    }

    pub(crate) fn push_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub(crate) fn record(&mut self, file_name: &str, outcome: FileOutcome) {
        self.files.push(FileReport {
            file_name: file_name.to_string(),
            outcome,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uploaded_file_len() {
        let file = UploadedFile::new("a.png", "image/png", Bytes::from_static(b"abc"));
        assert_eq!(file.len(), 3);
        assert!(!file.is_empty());
        assert!(UploadedFile::new("b.png", "image/png", Bytes::new()).is_empty());
    }

    #[test]
    fn test_report_message_text() {
        let mut report = UploadReport::default();
        assert!(report.is_success());
        assert_eq!(report.message_text(), "");

        report.push_message("No authentication provided");
        report.push_message("No image container provided");
        assert!(!report.is_success());
        assert_eq!(
            report.message_text(),
            "No authentication provided\nNo image container provided"
        );
    }

    #[test]
    fn test_uploaded_count() {
        let mut report = UploadReport::default();
        report.record("a.png", FileOutcome::Uploaded);
        report.record("b.txt", FileOutcome::Skipped(SkipReason::NotAnImage));
        report.record("c.png", FileOutcome::Uploaded);
        report.record("d.png", FileOutcome::Failed);
        assert_eq!(report.uploaded_count(), 2);
        assert_eq!(report.files[3].outcome.as_str(), "failed");
    }
}
