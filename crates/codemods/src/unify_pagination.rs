//! Replaces list-based pagination fields with their connection counterparts.

use crate::definitions::{locate_definitions, report_opaque_configs};
use crate::rewrite::Rewriter;
use crate::{Codemod, CodemodContext, Result, SourceFile, TransformOutput};
use graphql_naming::strip_connection_suffix;
use graphql_schema_def::{FieldMap, FieldValue, FieldsSource, TypeExpr};
use std::collections::HashSet;

/// Argument names marking a list field as paginated.
const PAGINATION_ARGS: &[&str] = &["size", "limit"];

/// Deletes list fields paginated with `size`/`limit` arguments when a
/// `…Connection` field exists next to them, then renames connection fields
/// to the bare name.
pub struct UnifyPagination;

impl Codemod for UnifyPagination {
    fn name(&self) -> &'static str {
        "unify-pagination"
    }

    fn description(&self) -> &'static str {
        "Replace paginated list fields with their connection fields, named without the suffix"
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
            report_opaque_configs(map, &mut rewriter);
            let deleted = delete_paginated_lists(map, &mut rewriter);
            rename_connections(map, &deleted, &mut rewriter);
        }

        Ok(rewriter.finish())
    }
}

fn is_paginated(args: Option<&FieldsSource>) -> bool {
    args.and_then(FieldsSource::map)
        .is_some_and(|args| PAGINATION_ARGS.iter().any(|name| args.contains_key(name)))
}

fn connection_sibling<'m>(map: &'m FieldMap, key: &str) -> Option<&'m str> {
    [format!("{key}Connection"), format!("{key}_connection")]
        .into_iter()
        .find_map(|name| map.get(&name).map(|field| field.key.as_str()))
}

/// Remove paginated list fields that have a connection sibling. Returns the
/// keys that were removed.
fn delete_paginated_lists<'m>(
    map: &'m FieldMap,
    rewriter: &mut Rewriter<'_>,
) -> HashSet<&'m str> {
    let mut deleted = HashSet::new();
    for field in map.fields() {
        let FieldValue::Config(config) = &field.value else {
            continue;
        };
        if !is_paginated(config.args.as_ref()) {
            continue;
        }
        match &config.type_expr {
            Some(TypeExpr::List { .. }) => {}
            other => {
                let range = other.as_ref().map_or(config.range, TypeExpr::range);
                rewriter.warn("Skipping type not defined as GraphQLList inline", range);
                continue;
            }
        }
        match connection_sibling(map, &field.key) {
            Some(connection) => {
                tracing::info!(field = %field.key, connection, "Removing paginated list field");
                rewriter.remove_entry(field.range);
                deleted.insert(field.key.as_str());
            }
            None => rewriter.warn(
                format!(
                    "Skipping removal of `{}` as no connection field exists for it",
                    field.key
                ),
                field.range,
            ),
        }
    }
    deleted
}

fn rename_connections(map: &FieldMap, deleted: &HashSet<&str>, rewriter: &mut Rewriter<'_>) {
    let mut taken: HashSet<String> = map
        .fields()
        .filter(|field| !deleted.contains(field.key.as_str()))
        .map(|field| field.key.clone())
        .collect();

    for field in map.fields() {
        let Some(bare) = strip_connection_suffix(&field.key) else {
            continue;
        };
        if taken.contains(bare) {
            rewriter.warn(
                "Skipping renaming of connection as a field with the new name exists",
                field.range,
            );
            continue;
        }
        taken.insert(bare.to_string());
        tracing::info!(from = %field.key, to = bare, "Renaming connection field");
        if field.shorthand {
            rewriter.replace(field.key_range, format!("{bare}: {}", field.key));
        } else {
            rewriter.replace(field.key_range, bare);
        }
    }
}
