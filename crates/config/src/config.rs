use graphql_codemods::{CodemodContext, IdPolicy};
use graphql_extract::ExtractConfig;
use graphql_schema_def::Vocabulary;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Schema location used when neither the config, `SCHEMA_PATH` nor the
/// command line names one.
pub const DEFAULT_SCHEMA_PATH: &str = "data/schema.graphql";

/// Environment variable overriding the configured schema location.
pub const SCHEMA_PATH_ENV: &str = "SCHEMA_PATH";

/// Top-level codemod configuration.
///
/// Every key is optional; a missing config file is the same as an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct CodemodConfig {
    /// Path to the target schema SDL, relative to the config file
    pub schema: Option<PathBuf>,
    /// Template tags marking embedded GraphQL documents
    pub tags: Vec<String>,
    /// Names the schema-definition locator recognises
    pub vocabulary: Vocabulary,
    /// How bare `id` selections are migrated
    pub ids: IdPolicy,
    /// File extensions to process, without the leading dot
    pub extensions: Vec<String>,
    /// Glob patterns of files to skip
    pub ignore: Vec<String>,
}

impl Default for CodemodConfig {
    fn default() -> Self {
        Self {
            schema: None,
            tags: ExtractConfig::default().tag_identifiers,
            vocabulary: Vocabulary::default(),
            ids: IdPolicy::default(),
            extensions: ["ts", "tsx", "js", "jsx"]
                .into_iter()
                .map(String::from)
                .collect(),
            ignore: Vec::new(),
        }
    }
}

impl CodemodConfig {
    /// Resolve the schema location.
    ///
    /// The command-line path wins over `SCHEMA_PATH`, which wins over the
    /// config's `schema` key, which wins over [`DEFAULT_SCHEMA_PATH`]. A
    /// relative config path is taken relative to `base_dir`, the directory
    /// holding the config file.
    #[must_use]
    pub fn schema_path(&self, base_dir: &Path, env: Option<&str>, cli: Option<&Path>) -> PathBuf {
        if let Some(path) = cli {
            return path.to_path_buf();
        }
        if let Some(path) = env.filter(|path| !path.trim().is_empty()) {
            return PathBuf::from(path);
        }
        match &self.schema {
            Some(path) => base_dir.join(path),
            None => base_dir.join(DEFAULT_SCHEMA_PATH),
        }
    }

    /// Whether a file should be handed to the codemods, judging by its
    /// extension.
    #[must_use]
    pub fn has_supported_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| allowed == ext))
    }

    /// Whether a file matches one of the `ignore` patterns.
    ///
    /// Patterns are validated on load, so invalid ones never get here; they
    /// are skipped rather than matched.
    #[must_use]
    pub fn is_ignored(&self, path: &Path) -> bool {
        let options = glob::MatchOptions {
            require_literal_separator: false,
            ..glob::MatchOptions::default()
        };
        self.ignore.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .is_ok_and(|pattern| pattern.matches_path_with(path, options))
        })
    }

    /// Build the settings shared by codemods. The schema is attached
    /// separately once loaded.
    #[must_use]
    pub fn codemod_context<'s>(&self) -> CodemodContext<'s> {
        CodemodContext {
            vocabulary: self.vocabulary.clone(),
            extract: ExtractConfig {
                tag_identifiers: self.tags.clone(),
            },
            ids: self.ids.clone(),
            schema: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CodemodConfig::default();
        assert_eq!(config.tags, vec!["graphql".to_string()]);
        assert_eq!(config.extensions.len(), 4);
        assert!(config.schema.is_none());
        assert!(config.ignore.is_empty());
    }

    #[test]
    fn test_schema_path_precedence() {
        let base = Path::new("/repo");
        let mut config = CodemodConfig::default();
        assert_eq!(
            config.schema_path(base, None, None),
            PathBuf::from("/repo/data/schema.graphql")
        );

        config.schema = Some(PathBuf::from("_schema.graphql"));
        assert_eq!(
            config.schema_path(base, None, None),
            PathBuf::from("/repo/_schema.graphql")
        );
        assert_eq!(
            config.schema_path(base, Some("/tmp/env.graphql"), None),
            PathBuf::from("/tmp/env.graphql")
        );
        assert_eq!(
            config.schema_path(base, Some(""), None),
            PathBuf::from("/repo/_schema.graphql")
        );
        assert_eq!(
            config.schema_path(
                base,
                Some("/tmp/env.graphql"),
                Some(Path::new("cli.graphql"))
            ),
            PathBuf::from("cli.graphql")
        );
    }

    #[test]
    fn test_file_filters() {
        let config = CodemodConfig {
            ignore: vec!["**/__generated__/**".to_string(), "*.d.ts".to_string()],
            ..CodemodConfig::default()
        };
        assert!(config.has_supported_extension(Path::new("src/Artist.tsx")));
        assert!(!config.has_supported_extension(Path::new("src/schema.graphql")));
        assert!(!config.has_supported_extension(Path::new("Makefile")));

        assert!(config.is_ignored(Path::new("src/__generated__/ArtistQuery.graphql.ts")));
        assert!(config.is_ignored(Path::new("types/globals.d.ts")));
        assert!(!config.is_ignored(Path::new("src/schema/artist.ts")));
    }

    #[test]
    fn test_codemod_context() {
        let config = CodemodConfig {
            tags: vec!["gql".to_string()],
            ..CodemodConfig::default()
        };
        let context = config.codemod_context();
        assert_eq!(context.extract.tag_identifiers, vec!["gql".to_string()]);
        assert_eq!(context.ids, IdPolicy::default());
        assert!(context.schema.is_none());
    }
}
