//! Parse issue types for recoverable parsing problems
//!
//! Issues never abort a parse. They record where a heading was degraded or
//! a scene-heading paragraph was skipped so a host can surface them next to
//! the scene table.

use core::fmt;

/// Parse issue severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IssueSeverity {
    /// Information that may be useful but doesn't affect the scene list
    Info,

    /// A heading was kept in degraded form, or input was dropped
    Warning,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// Issue categories for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IssueCategory {
    /// Heading recognized but its location could not be isolated
    Heading,

    /// Document structure (e.g. an FDX scene-heading paragraph with no
    /// recognizable heading text)
    Structure,

    /// Source decoding (BOM, invalid UTF-8)
    Encoding,
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heading => write!(f, "heading"),
            Self::Structure => write!(f, "structure"),
            Self::Encoding => write!(f, "encoding"),
        }
    }
}

/// Parse issue for recoverable problems and warnings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseIssue {
    pub severity: IssueSeverity,

    pub category: IssueCategory,

    /// Human-readable message
    pub message: String,

    /// Line (Fountain) or heading paragraph ordinal (FDX), 1-based; 0 for
    /// document-wide issues
    pub line: usize,
}

impl ParseIssue {
    /// Create new parse issue
    #[must_use]
    pub const fn new(
        severity: IssueSeverity,
        category: IssueCategory,
        message: String,
        line: usize,
    ) -> Self {
        Self {
            severity,
            category,
            message,
            line,
        }
    }

    /// Create info-level issue
    #[must_use]
    pub const fn info(category: IssueCategory, message: String, line: usize) -> Self {
        Self::new(IssueSeverity::Info, category, message, line)
    }

    /// Create warning-level issue
    #[must_use]
    pub const fn warning(category: IssueCategory, message: String, line: usize) -> Self {
        Self::new(IssueSeverity::Warning, category, message, line)
    }

    /// Format issue for display in a host UI or console
    #[must_use]
    pub fn format_for_display(&self) -> String {
        format!(
            "[{}:{}] {}: {}",
            self.line, self.category, self.severity, self.message
        )
    }
}
