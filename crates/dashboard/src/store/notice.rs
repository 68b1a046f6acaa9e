//! One-shot operator notices.

use super::GenerationReport;

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A message for the operator, shown once on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Acknowledgment for a finished generation run.
    ///
    /// Refetch failures do not turn this into a failure notice.
    #[must_use]
    pub fn generation_succeeded(report: &GenerationReport) -> Self {
        let detail = report
            .summary
            .as_ref()
            .and_then(recdash_core::GenerationSummary::describe);
        match detail {
            Some(detail) => Self::success(format!(
                "Sample data generated successfully ({detail})."
            )),
            None => Self::success("Sample data generated successfully."),
        }
    }

    /// Acknowledgment for a failed generation run.
    #[must_use]
    pub fn generation_failed() -> Self {
        Self::error("Error generating data. The catalog was not regenerated.")
    }

    /// CSS classes for the notice banner.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self.level {
            NoticeLevel::Success => "notice notice-success",
            NoticeLevel::Warning => "notice notice-warning",
            NoticeLevel::Error => "notice notice-error",
        }
    }
}
