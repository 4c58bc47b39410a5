use crate::{CodemodContext, Result, SourceFile};
use graphql_codemod_types::Diagnostic;

/// A source-to-source transform applied to one file at a time.
pub trait Codemod: Send + Sync {
    /// Unique identifier, used as the CLI subcommand (e.g., `"prune-deprecated"`)
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Whether the codemod needs [`CodemodContext::schema`]
    fn requires_schema(&self) -> bool {
        false
    }

    /// Transform a single file.
    ///
    /// Returning an error means the file must be left untouched. Soft problems
    /// are returned as diagnostics in the output.
    fn transform(&self, file: &SourceFile, context: &CodemodContext<'_>)
        -> Result<TransformOutput>;
}

/// Result of transforming one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    /// The rewritten source text
    pub source: String,
    /// Warnings and notes about constructs that were skipped
    pub diagnostics: Vec<Diagnostic>,
    /// Whether `source` differs from the input
    pub changed: bool,
}

impl TransformOutput {
    /// Output for a file the codemod has nothing to do with.
    #[must_use]
    pub fn unchanged(source: &str) -> Self {
        Self {
            source: source.to_string(),
            diagnostics: Vec::new(),
            changed: false,
        }
    }
}
