//! Configuration for `graphql-codemod`.
//!
//! A project may carry a `.graphql-codemodrc.yml` (or `.yaml`/`.json`, or
//! `graphql-codemod.config.yml`) naming the target schema, the GraphQL
//! template tags, the schema-definition vocabulary, the ID migration policy
//! and which files to process.

mod config;
mod error;
mod loader;

pub use config::{CodemodConfig, DEFAULT_SCHEMA_PATH, SCHEMA_PATH_ENV};
pub use error::{ConfigError, Result};
pub use loader::{find_config, load_config, load_config_from_str};
