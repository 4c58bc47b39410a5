//! Removes deprecated fields and enum values from schema definitions.

use crate::definitions::locate_definitions;
use crate::rewrite::Rewriter;
use crate::{Codemod, CodemodContext, CodemodError, Result, SourceFile, TransformOutput};
use graphql_schema_def::{FieldMap, FieldValue, FieldsSource};

/// Deletes every field or enum value configuration carrying a
/// `deprecationReason`.
pub struct PruneDeprecated;

impl Codemod for PruneDeprecated {
    fn name(&self) -> &'static str {
        "prune-deprecated"
    }

    fn description(&self) -> &'static str {
        "Remove deprecated fields and enum values from schema definitions"
    }

    #[tracing::instrument(skip_all, fields(path = %file.path.display()))]
    fn transform(
        &self,
        file: &SourceFile,
        context: &CodemodContext<'_>,
    ) -> Result<TransformOutput> {
        let definitions = locate_definitions(file, context)?;
        let mut rewriter = Rewriter::new(&file.text);
        rewriter.extend_diagnostics(definitions.diagnostics.iter().cloned());

        for map in &definitions.output_maps {
            remove_deprecated_fields(map, &mut rewriter);
        }

        // A standalone config has no map to be removed from, so it is emptied
        for named in &definitions.field_configs {
            if named.config.deprecated {
                tracing::info!(name = %named.name, "Emptying deprecated field config");
                rewriter.replace(named.config.range, "{}");
            }
        }

        for values in &definitions.enum_values {
            match values {
                FieldsSource::Inline(map) | FieldsSource::Deferred(map) => {
                    remove_deprecated_values(map, &mut rewriter)?;
                }
                FieldsSource::ByReference { range, .. } => {
                    rewriter.warn("Skipping enum values by variable reference", *range);
                }
                FieldsSource::ByCall { range, .. } | FieldsSource::Unsupported { range } => {
                    rewriter.warn(
                        "Skipping enum values that are not defined as an object expression",
                        *range,
                    );
                }
            }
        }

        Ok(rewriter.finish())
    }
}

fn remove_deprecated_fields(map: &FieldMap, rewriter: &mut Rewriter<'_>) {
    for field in map.fields() {
        if field.value.config().is_some_and(|config| config.deprecated) {
            tracing::info!(field = %field.key, "Removing deprecated field");
            rewriter.remove_entry(field.range);
        }
    }
}

fn remove_deprecated_values(map: &FieldMap, rewriter: &mut Rewriter<'_>) -> Result<()> {
    for value in map.fields() {
        let kind = match &value.value {
            FieldValue::Config(config) => {
                if config.deprecated {
                    tracing::info!(value = %value.key, "Removing deprecated enum value");
                    rewriter.remove_entry(value.range);
                }
                continue;
            }
            FieldValue::Reference { .. } => "variable reference",
            FieldValue::Call { .. } => "call expression",
            FieldValue::Other { .. } => "expression",
        };
        return Err(CodemodError::UnexpectedEnumValue {
            kind,
            offset: value.value.range().start,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_codemod_types::Language;

    fn transform(source: &str) -> Result<TransformOutput> {
        let file = SourceFile::new("schema.ts", source, Language::TypeScript);
        PruneDeprecated.transform(&file, &CodemodContext::default())
    }

    #[test]
    fn test_removes_deprecated_fields() {
        let source = r#"const Artist = new GraphQLObjectType({
  name: "Artist",
  fields: () => ({
    name: {
      type: GraphQLString,
    },
    old_name: {
      type: GraphQLString,
      deprecationReason: "Use name",
    },
    other: { type: GraphQLInt },
  }),
})
"#;
        let output = transform(source).unwrap();
        assert!(output.changed);
        assert_eq!(
            output.source,
            r#"const Artist = new GraphQLObjectType({
  name: "Artist",
  fields: () => ({
    name: {
      type: GraphQLString,
    },
    other: { type: GraphQLInt },
  }),
})
"#
        );
    }

    #[test]
    fn test_standalone_config_is_emptied() {
        let source = r#"export const OldField: GraphQLFieldConfig<any, any> = {
  type: GraphQLString,
  deprecationReason: "Gone",
}
"#;
        let output = transform(source).unwrap();
        assert_eq!(
            output.source,
            "export const OldField: GraphQLFieldConfig<any, any> = {}\n"
        );
    }

    #[test]
    fn test_removes_deprecated_enum_values() {
        let source = r#"export const Sort = new GraphQLEnumType({
  name: "Sort",
  values: {
    NAME_ASC: { value: "name" },
    NAME_DESC: { value: "-name", deprecationReason: "Unused" },
  },
})
"#;
        let output = transform(source).unwrap();
        assert!(output.source.contains("NAME_ASC"));
        assert!(!output.source.contains("NAME_DESC"));
    }

    #[test]
    fn test_enum_value_shapes() {
        let source = r"export const Sort = new GraphQLEnumType({
  name: 'Sort',
  values: { NAME_ASC: NameAscending },
})
";
        let error = transform(source).unwrap_err();
        assert!(matches!(
            error,
            CodemodError::UnexpectedEnumValue {
                kind: "variable reference",
                ..
            }
        ));

        let source = r"export const Sort = new GraphQLEnumType({
  name: 'Sort',
  values: sortValues,
})
";
        let output = transform(source).unwrap();
        assert!(!output.changed);
        assert!(output
            .diagnostics
            .iter()
            .any(|diagnostic| diagnostic.message == "Skipping enum values by variable reference"));
    }

    #[test]
    fn test_nothing_deprecated() {
        let source = "const A = new GraphQLObjectType({ name: 'A', fields: { a: { type: GraphQLInt } } })";
        let output = transform(source).unwrap();
        assert!(!output.changed);
        assert_eq!(output.source, source);
    }
}
