//! Exit codes for the codemod CLI.
//!
//! Distinct codes let scripts tell a run where some files could not be
//! transformed apart from a run that never started.

/// Exit codes used by the CLI.
///
/// These follow standard Unix conventions where 0 indicates success
/// and non-zero values indicate different types of failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Every file was transformed or left unchanged
    Success = 0,
    /// At least one file failed to transform and was left untouched
    TransformError = 1,
    /// Configuration error (invalid config file, bad ignore pattern)
    ConfigError = 2,
    /// Schema load error (file not found, invalid SDL)
    SchemaError = 3,
    /// I/O error (no input files could be collected)
    IoError = 4,
}

impl ExitCode {
    /// Exit the process with this exit code.
    pub fn exit(self) -> ! {
        std::process::exit(self as i32)
    }

    /// Get the numeric value of this exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::TransformError => write!(f, "transform error"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::SchemaError => write!(f, "schema load error"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let codes = [
            ExitCode::Success,
            ExitCode::TransformError,
            ExitCode::ConfigError,
            ExitCode::SchemaError,
            ExitCode::IoError,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a.code(), b.code());
            }
        }
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::SchemaError.to_string(), "schema load error");
    }
}
