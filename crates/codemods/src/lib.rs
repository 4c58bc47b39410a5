//! Codemods migrating GraphQL schema definitions and client documents.
//!
//! Every codemod implements [`Codemod`]: it takes one [`SourceFile`] and a
//! shared [`CodemodContext`] and returns the rewritten text along with
//! diagnostics for the constructs it had to skip. Rewrites are byte-range
//! edits against the original text, so code a codemod does not touch keeps
//! its formatting.
//!
//! # Codemods
//!
//! - [`RenameDefinitions`]: camelize field, argument and input field names in
//!   `graphql-js` schema definitions, keeping resolvers working
//! - [`RenameClientFields`]: camelize fields and arguments in client
//!   documents, aliasing fields to their old names
//! - [`PruneDeprecated`]: remove deprecated fields and enum values
//! - [`UnifyPagination`]: replace paginated list fields with connections
//! - [`MigrateIds`]: rename Relay-era identity fields using the schema
//! - [`RelayRawResponse`]: type relay test fixtures with raw response types
//!
//! Use [`all_codemods`] or [`find_codemod`] to look codemods up by name.

mod codemod;
mod context;
mod definitions;
mod error;
mod graphql;
mod migrate_ids;
mod prune_deprecated;
mod registry;
mod relay_raw_response;
mod rename_client_fields;
mod rename_definitions;
mod rewrite;
mod unify_pagination;

pub use codemod::{Codemod, TransformOutput};
pub use context::{CodemodContext, SourceFile};
pub use error::{CodemodError, Result};
pub use migrate_ids::{IdPolicy, IdRule, MigrateIds};
pub use prune_deprecated::PruneDeprecated;
pub use registry::{all_codemod_names, all_codemods, find_codemod};
pub use relay_raw_response::RelayRawResponse;
pub use rename_client_fields::RenameClientFields;
pub use rename_definitions::RenameDefinitions;
pub use unify_pagination::UnifyPagination;

// Re-export types from graphql-codemod-types for convenience
pub use graphql_codemod_types::{Diagnostic, Language, OffsetRange, Severity};
