use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Syntax error at byte {offset}: {message}")]
    Syntax { message: String, offset: usize },
}

impl ExtractError {
    /// Byte offset of the offending token.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::Syntax { offset, .. } => *offset,
        }
    }
}
