use thiserror::Error;

pub type Result<T> = std::result::Result<T, LocateError>;

/// Source shapes the locator refuses to guess about.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocateError {
    #[error("Expected a config object as first argument of `{callee}` (byte {offset})")]
    ExpectedConfigObject { callee: String, offset: usize },

    #[error("Missing `{property}` property in `{callee}` config (byte {offset})")]
    MissingProperty {
        property: &'static str,
        callee: String,
        offset: usize,
    },

    #[error("Unknown property type `{kind}` (byte {offset})")]
    UnknownPropertyKind { kind: &'static str, offset: usize },
}

impl LocateError {
    /// Byte offset of the offending node.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::ExpectedConfigObject { offset, .. }
            | Self::MissingProperty { offset, .. }
            | Self::UnknownPropertyKind { offset, .. } => *offset,
        }
    }
}
