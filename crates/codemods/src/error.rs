use graphql_extract::ExtractError;
use graphql_schema_def::LocateError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodemodError>;

/// Errors that abort the transform of a single file.
///
/// A file that fails is left untouched; soft problems are reported as
/// diagnostics instead.
#[derive(Debug, Error)]
pub enum CodemodError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Locate(#[from] LocateError),

    #[error("Invalid GraphQL document (byte {offset}): {message}")]
    GraphQLSyntax { message: String, offset: usize },

    #[error("Unexpected param type `{kind}` (byte {offset})")]
    UnexpectedParam { kind: &'static str, offset: usize },

    #[error("Unexpected enum value type `{kind}` (byte {offset})")]
    UnexpectedEnumValue { kind: &'static str, offset: usize },

    #[error("Expected an options object as first argument of `{callee}` (byte {offset})")]
    ExpectedOptionsObject { callee: String, offset: usize },

    #[error("Missing `{property}` property in `{callee}` options (byte {offset})")]
    MissingOption {
        property: &'static str,
        callee: String,
        offset: usize,
    },

    #[error("`{name}` is not a valid GraphQL name (byte {offset})")]
    InvalidName { name: String, offset: usize },

    #[error("The `{codemod}` codemod needs a schema")]
    MissingSchema { codemod: &'static str },
}

impl CodemodError {
    /// Byte offset of the offending node, if the error points at one.
    #[must_use]
    pub const fn offset(&self) -> Option<usize> {
        match self {
            Self::Extract(error) => Some(error.offset()),
            Self::Locate(error) => Some(error.offset()),
            Self::GraphQLSyntax { offset, .. }
            | Self::UnexpectedParam { offset, .. }
            | Self::UnexpectedEnumValue { offset, .. }
            | Self::ExpectedOptionsObject { offset, .. }
            | Self::MissingOption { offset, .. }
            | Self::InvalidName { offset, .. } => Some(*offset),
            Self::MissingSchema { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset() {
        let error = CodemodError::UnexpectedParam {
            kind: "array pattern",
            offset: 42,
        };
        assert_eq!(error.offset(), Some(42));
        assert_eq!(
            error.to_string(),
            "Unexpected param type `array pattern` (byte 42)"
        );

        let error = CodemodError::MissingSchema {
            codemod: "migrate-ids",
        };
        assert_eq!(error.offset(), None);
    }

    #[test]
    fn test_wraps_locate_error() {
        let error: CodemodError = LocateError::UnknownPropertyKind {
            kind: "getter",
            offset: 7,
        }
        .into();
        assert_eq!(error.offset(), Some(7));
        assert!(error.to_string().contains("getter"));
    }
}
