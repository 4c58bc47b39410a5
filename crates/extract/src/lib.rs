//! Parsing of TypeScript/JavaScript sources for codemods.
//!
//! [`parse_source`] turns source text into a [`ParsedSource`]: the swc module
//! plus helpers that translate swc spans into byte offsets of the original
//! text. Codemods inspect the module and emit text edits against those
//! offsets, so formatting outside the edited ranges is preserved.
//!
//! [`extract_from_source`] finds tagged GraphQL templates (`graphql\`...\``).

mod error;
mod extractor;
mod source;
mod source_location;

pub use error::{ExtractError, Result};
pub use extractor::{extract_from_source, is_graphql_tag, ExtractConfig, ExtractedGraphQL};
pub use source::{parse_source, ParsedSource};
pub use source_location::SourceLocation;

// Re-export the swc AST so downstream crates share one version of it
pub use swc_core::common::{Span, Spanned};
pub use swc_core::ecma::ast;
pub use swc_core::ecma::visit::{Visit, VisitWith};

// Re-export types from graphql-codemod-types for convenience
pub use graphql_codemod_types::{Language, OffsetRange, Position};
