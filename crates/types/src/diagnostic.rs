//! Diagnostics reported by codemods.

use crate::OffsetRange;

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Informational message, e.g. a construct that was left untouched
    Info,
    /// A potential problem the user should look at
    Warning,
    /// The file could not be transformed
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A message attached to a location in a source file.
///
/// Locations are byte offsets; use a [`LineIndex`](crate::LineIndex) to turn
/// them into line/column positions when reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub offset_range: OffsetRange,
}

impl Diagnostic {
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>, offset_range: OffsetRange) -> Self {
        Self {
            severity,
            message: message.into(),
            offset_range,
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>, offset_range: OffsetRange) -> Self {
        Self::new(Severity::Info, message, offset_range)
    }

    #[must_use]
    pub fn warning(message: impl Into<String>, offset_range: OffsetRange) -> Self {
        Self::new(Severity::Warning, message, offset_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(format!("{}", Severity::Error), "error");
        assert_eq!(format!("{}", Severity::Warning), "warning");
        assert_eq!(format!("{}", Severity::Info), "info");
    }

    #[test]
    fn test_diagnostic_constructors() {
        let range = OffsetRange::new(3, 9);
        let warning = Diagnostic::warning("field already exists", range);
        assert_eq!(warning.severity, Severity::Warning);
        assert_eq!(warning.message, "field already exists");
        assert_eq!(warning.offset_range, range);
        assert_eq!(Diagnostic::info("x", range).severity, Severity::Info);
    }
}
