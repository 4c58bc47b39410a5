//! Source location information for extracted GraphQL.

use graphql_codemod_types::{LineIndex, OffsetRange, Position};

/// Source location information for extracted GraphQL.
///
/// Contains both byte offsets (for text manipulation) and the line/column
/// start position (for display to users).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Byte offset in the original source file
    pub offset: usize,
    /// Length in bytes
    pub length: usize,
    /// Start position in the original source file (line/column)
    pub start: Position,
}

impl SourceLocation {
    /// Create a new source location.
    #[must_use]
    pub const fn new(offset: usize, length: usize, start: Position) -> Self {
        Self {
            offset,
            length,
            start,
        }
    }

    /// Build a location for a byte range, resolving its start position.
    #[must_use]
    pub fn from_range(range: OffsetRange, line_index: &LineIndex) -> Self {
        Self::new(range.start, range.len(), line_index.position(range.start))
    }

    /// The byte range this location covers.
    #[must_use]
    pub const fn offset_range(&self) -> OffsetRange {
        OffsetRange::new(self.offset, self.offset + self.length)
    }
}
