//! Error type shared by the report formatters.

use thiserror::Error;

/// Failures that can occur while configuring or writing a report.
///
/// Gating a report away is not an error; formatters signal it through
/// [`crate::render_html::ReportOutcome::Skipped`].
#[derive(Debug, Error)]
pub enum ReportError {
    /// A custom logo or favicon was supplied without a usable MIME type or
    /// with no image bytes. Raised at configuration time, not render time.
    #[error("invalid embedded image: {reason}")]
    InvalidImage { reason: &'static str },

    /// Serialized result data could not be parsed.
    #[error("failed to parse result data")]
    Json(#[from] serde_json::Error),

    /// The output sink failed while the document was being written.
    #[error("failed to write report")]
    Io(#[from] std::io::Error),
}
