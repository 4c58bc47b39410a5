use crate::migrate_ids::IdPolicy;
use apollo_compiler::Schema;
use graphql_codemod_types::Language;
use graphql_extract::ExtractConfig;
use graphql_schema_def::Vocabulary;
use std::path::{Path, PathBuf};

/// A source file handed to a codemod.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
    pub language: Language,
}

impl SourceFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>, language: Language) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
            language,
        }
    }

    /// Build a source file, detecting the language from the path's extension.
    ///
    /// Returns `None` for files that are not TypeScript or JavaScript.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>, text: impl Into<String>) -> Option<Self> {
        let path = path.into();
        let language = Language::from_path(&path)?;
        Some(Self::new(path, text, language))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Settings shared by every codemod run.
///
/// The schema is loaded once before any file is transformed and passed in
/// here; codemods never load it themselves.
#[derive(Debug, Clone, Default)]
pub struct CodemodContext<'s> {
    /// Names the schema-definition locator recognises
    pub vocabulary: Vocabulary,
    /// Tags marking embedded GraphQL documents
    pub extract: ExtractConfig,
    /// How bare `id` fields are migrated
    pub ids: IdPolicy,
    /// Target schema for type-aware codemods
    pub schema: Option<&'s Schema>,
}

impl<'s> CodemodContext<'s> {
    #[must_use]
    pub fn with_schema(mut self, schema: &'s Schema) -> Self {
        self.schema = Some(schema);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_file_from_path() {
        let file = SourceFile::from_path("src/schema/artist.ts", "").unwrap();
        assert_eq!(file.language, Language::TypeScript);
        assert_eq!(file.path(), Path::new("src/schema/artist.ts"));

        assert!(SourceFile::from_path("schema.graphql", "").is_none());
    }

    #[test]
    fn test_default_context() {
        let context = CodemodContext::default();
        assert!(context.schema.is_none());
        assert_eq!(context.extract.tag_identifiers, vec!["graphql".to_string()]);
        assert!(context.vocabulary.is_object_type("GraphQLObjectType"));
    }
}
