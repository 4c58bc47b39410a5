//! Migrates Relay-era identity fields in client documents to the schema's
//! current names.

use crate::graphql::{
    definition_type, graphql_name, parse_document, rename_arguments, rename_directive_arguments,
    template_text, walk_fields, UNPRINTABLE_TEMPLATE,
};
use crate::rewrite::Rewriter;
use crate::{Codemod, CodemodContext, CodemodError, Result, SourceFile, TransformOutput};
use apollo_compiler::ast::Definition;
use apollo_compiler::Schema;
use graphql_codemod_types::OffsetRange;
use graphql_extract::{extract_from_source, parse_source};
use serde::{Deserialize, Serialize};

/// One candidate replacement for a bare `id` selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdRule {
    /// Field name to select instead of `id`
    pub rename: String,
    /// Fields the parent type must define for this rule to apply
    pub requires: Vec<String>,
}

/// How bare `id` selections are renamed, tried in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdPolicy {
    pub rules: Vec<IdRule>,
    /// Selected when no rule applies, so the document fails validation until
    /// someone picks the right field by hand
    pub placeholder: String,
}

impl Default for IdPolicy {
    fn default() -> Self {
        Self {
            rules: vec![
                IdRule {
                    rename: "slug".to_string(),
                    requires: vec!["slug".to_string(), "internalID".to_string()],
                },
                IdRule {
                    rename: "internalID".to_string(),
                    requires: vec!["internalID".to_string()],
                },
            ],
            placeholder: "slugORinternalID".to_string(),
        }
    }
}

impl IdPolicy {
    /// The first rule whose required fields all exist on the parent type.
    #[must_use]
    pub fn resolve(&self, has_field: impl Fn(&str) -> bool) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.requires.iter().all(|field| has_field(field)))
            .map(|rule| rule.rename.as_str())
    }
}

fn type_has_field(schema: &Schema, type_name: &str, field_name: &str) -> bool {
    schema.type_field(type_name, field_name).is_ok()
}

/// Renames `__id` to `id`, `_id` to `internalID` and bare `id` according to
/// an [`IdPolicy`].
pub struct MigrateIds;

impl Codemod for MigrateIds {
    fn name(&self) -> &'static str {
        "migrate-ids"
    }

    fn description(&self) -> &'static str {
        "Rename Relay-era identity fields in GraphQL documents using the schema"
    }

    fn requires_schema(&self) -> bool {
        true
    }

    #[tracing::instrument(skip_all, fields(path = %file.path.display()))]
    fn transform(
        &self,
        file: &SourceFile,
        context: &CodemodContext<'_>,
    ) -> Result<TransformOutput> {
        let schema = context.schema.ok_or(CodemodError::MissingSchema {
            codemod: self.name(),
        })?;
        let mentions_tag = context
            .extract
            .tag_identifiers
            .iter()
            .any(|tag| file.text.contains(&format!("{tag}`")));
        if !mentions_tag {
            return Ok(TransformOutput::unchanged(&file.text));
        }

        let parsed = parse_source(&file.text, file.language)?;
        let mut rewriter = Rewriter::new(&file.text);

        for extracted in extract_from_source(&parsed, &context.extract) {
            if extracted.has_interpolations {
                rewriter.warn(
                    "Skipping GraphQL document with interpolations",
                    extracted.expression_range,
                );
                continue;
            }
            let mut document = parse_document(&extracted, &file.path)?;
            let template_offset = extracted.location.offset;
            let mut renamed = 0;

            for definition in &mut document.definitions {
                let root = definition_type(definition, schema);
                let selections = match definition {
                    Definition::OperationDefinition(operation) => {
                        let operation = operation.make_mut();
                        renamed += rename_directive_arguments(
                            &mut operation.directives,
                            template_offset,
                            &identity_argument,
                        )?;
                        &mut operation.selection_set
                    }
                    Definition::FragmentDefinition(fragment) => {
                        let fragment = fragment.make_mut();
                        renamed += rename_directive_arguments(
                            &mut fragment.directives,
                            template_offset,
                            &identity_argument,
                        )?;
                        &mut fragment.selection_set
                    }
                    _ => continue,
                };
                walk_fields(selections, root.as_ref(), Some(schema), &mut |field, visit| {
                    let offset = template_offset + visit.offset;
                    let parent = visit.parent_type.map(|name| name.as_str());
                    let new_name = match field.name.as_str() {
                        "__id" => Some("id".to_string()),
                        "_id" => Some("internalID".to_string()),
                        "id" => Some(bare_id_replacement(
                            &context.ids,
                            schema,
                            parent,
                            offset,
                            &mut rewriter,
                        )),
                        _ => None,
                    };
                    if let Some(new_name) = new_name {
                        tracing::debug!(from = %field.name, to = %new_name, ?parent, "Renaming identity field");
                        field.name = graphql_name(&new_name, offset)?;
                        renamed += 1;
                    }
                    renamed += rename_arguments(&mut field.arguments, offset, &identity_argument)?;
                    renamed += rename_directive_arguments(
                        &mut field.directives,
                        offset,
                        &identity_argument,
                    )?;
                    Ok(())
                })?;
            }

            if renamed > 0 {
                let Some(text) = template_text(&document) else {
                    rewriter.warn(UNPRINTABLE_TEMPLATE, extracted.expression_range);
                    continue;
                };
                let range = OffsetRange::new(
                    template_offset,
                    template_offset + extracted.location.length,
                );
                rewriter.replace(range, text);
            }
        }

        Ok(rewriter.finish())
    }
}

fn bare_id_replacement(
    policy: &IdPolicy,
    schema: &Schema,
    parent: Option<&str>,
    offset: usize,
    rewriter: &mut Rewriter<'_>,
) -> String {
    let resolved = parent.and_then(|parent| {
        policy.resolve(|field_name| type_has_field(schema, parent, field_name))
    });
    if let Some(name) = resolved {
        return name.to_string();
    }
    rewriter.warn(
        format!(
            "No replacement for `id` on `{}`, selecting `{}` instead",
            parent.unwrap_or("unknown type"),
            policy.placeholder
        ),
        OffsetRange::at(offset),
    );
    policy.placeholder.clone()
}

/// Argument renames applied alongside the field renames.
fn identity_argument(name: &str) -> Option<String> {
    (name == "__id").then(|| "id".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_codemod_types::{Language, Severity};

    const SCHEMA: &str = "
type Query {
  artist(id: ID!): Artist
  artists: [Artist]
  node(id: ID!): Node
  sale: Sale
}
interface Node { id: ID! }
type Artist implements Node {
  id: ID!
  slug: ID!
  internalID: ID!
  name: String
}
type Sale {
  internalID: ID!
  id: ID!
}
type Legacy {
  id: ID!
}
";

    fn schema() -> Schema {
        Schema::parse(SCHEMA, "schema.graphql").unwrap()
    }

    fn run(source: &str) -> TransformOutput {
        let schema = schema();
        let context = CodemodContext::default().with_schema(&schema);
        let file = SourceFile::new("Artist.tsx", source, Language::Tsx);
        MigrateIds.transform(&file, &context).unwrap()
    }

    #[test]
    fn test_policy_resolution() {
        let policy = IdPolicy::default();
        assert_eq!(policy.resolve(|_| true), Some("slug"));
        assert_eq!(
            policy.resolve(|field| field == "internalID"),
            Some("internalID")
        );
        assert_eq!(policy.resolve(|_| false), None);
    }

    #[test]
    fn test_policy_deserializes_with_defaults() {
        let policy: IdPolicy =
            serde_json::from_str(r#"{ "rules": [{ "rename": "uuid", "requires": ["uuid"] }] }"#)
                .unwrap();
        assert_eq!(policy.rules.len(), 1);
        assert_eq!(policy.placeholder, "slugORinternalID");
    }

    #[test]
    fn test_renames_identity_fields() {
        let source = "const query = graphql`
  query ArtistQuery {
    artist(id: \"banksy\") {
      __id
      _id
      id
      name
    }
    sale {
      id
    }
  }
`;
";
        let output = run(source);
        assert!(output.changed);
        assert!(output.source.starts_with("const query = graphql`"));
        assert!(output.source.ends_with("`;\n"));
        let artist = &output.source[output.source.find("artist(").unwrap()..];
        let artist = &artist[..artist.find('}').unwrap()];
        assert!(artist.contains("    id\n"));
        assert!(artist.contains("internalID\n"));
        assert!(artist.contains("slug\n"));
        assert!(!artist.contains("__id"));
        let sale = &output.source[output.source.find("sale {").unwrap()..];
        assert!(sale.contains("internalID"));
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn test_fragments_and_placeholder() {
        let source = "export const fragment = graphql`
  fragment Legacy_thing on Legacy {
    id
  }
`
";
        let output = run(source);
        assert!(output.source.contains("slugORinternalID"));
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.diagnostics[0].severity, Severity::Warning);
        assert!(output.diagnostics[0].message.contains("`Legacy`"));
    }

    #[test]
    fn test_identity_argument() {
        let source = "graphql`query { node(__id: \"abc\") { __typename } }`";
        let output = run(source);
        assert!(output.source.contains("node(id: \"abc\")"));
    }

    #[test]
    fn test_identity_directive_arguments() {
        let source = "graphql`query Q @cached(__id: \"q\") { artist(__id: \"a\") @tracked(__id: \"b\") { name } }`";
        let output = run(source);
        assert!(output.source.contains("@cached(id: \"q\")"));
        assert!(output.source.contains("artist(id: \"a\") @tracked(id: \"b\")"));
        assert!(!output.source.contains("__id"));
    }

    #[test]
    fn test_untouched_documents() {
        let source = "graphql`query { artist(id: \"x\") { name } }`";
        let output = run(source);
        assert!(!output.changed);
        assert_eq!(output.source, source);

        let source = "const notGraphQL = `id`;";
        let output = run(source);
        assert!(!output.changed);
    }

    #[test]
    fn test_requires_schema() {
        let file = SourceFile::new("a.ts", "graphql`{ id }`", Language::TypeScript);
        let error = MigrateIds
            .transform(&file, &CodemodContext::default())
            .unwrap_err();
        assert!(matches!(
            error,
            CodemodError::MissingSchema {
                codemod: "migrate-ids"
            }
        ));
    }
}
