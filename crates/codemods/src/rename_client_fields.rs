//! Camelizes the fields and arguments selected by client documents.

use crate::graphql::{
    graphql_name, parse_document, rename_arguments, rename_directive_arguments, template_text,
    walk_fields, UNPRINTABLE_TEMPLATE,
};
use crate::rewrite::{line_indent, Rewriter};
use crate::{Codemod, CodemodContext, Result, SourceFile, TransformOutput};
use apollo_compiler::ast::{Definition, Document, OperationType};
use graphql_codemod_types::OffsetRange;
use graphql_extract::{extract_from_source, parse_source};
use graphql_naming::{camelize, needs_camelize};

/// Renames selected fields and arguments to `camelCase`.
///
/// Renamed fields get an alias with their old name, so the response shape
/// seen by components stays the same.
pub struct RenameClientFields;

impl Codemod for RenameClientFields {
    fn name(&self) -> &'static str {
        "rename-client-fields"
    }

    fn description(&self) -> &'static str {
        "Camelize fields and arguments in GraphQL documents, aliasing fields to their old name"
    }

    #[tracing::instrument(skip_all, fields(path = %file.path.display()))]
    fn transform(
        &self,
        file: &SourceFile,
        context: &CodemodContext<'_>,
    ) -> Result<TransformOutput> {
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

            let renamed = camelize_document(&mut document, template_offset)?;
            if renamed == 0 {
                continue;
            }
            let Some(text) = template_text(&document) else {
                rewriter.warn(UNPRINTABLE_TEMPLATE, extracted.expression_range);
                continue;
            };
            tracing::debug!(renamed, tag = %extracted.tag, "Camelized document");
            rewriter.replace(
                OffsetRange::new(template_offset, template_offset + extracted.location.length),
                text,
            );

            if has_mutation(&document) {
                let start = extracted.expression_range.start;
                let comment = if line_break_is_unsafe(rewriter.text(), start) {
                    format!("/* {MUTATION_ADVISORY} */ ")
                } else {
                    let indent = line_indent(rewriter.text(), start);
                    format!("// {MUTATION_ADVISORY}\n{indent}")
                };
                rewriter.insert(start, comment);
            }
        }

        Ok(rewriter.finish())
    }
}

const MUTATION_ADVISORY: &str = "TODO: Inputs to the mutation might have changed case of the keys!";

/// Whether a line break before `offset` would end the statement early, as it
/// does right after `return`, `throw` or `yield`.
fn line_break_is_unsafe(text: &str, offset: usize) -> bool {
    let line_start = text[..offset].rfind('\n').map_or(0, |index| index + 1);
    let before = text[line_start..offset].trim_end();
    ["return", "throw", "yield"].iter().any(|keyword| {
        before.strip_suffix(keyword).is_some_and(|rest| {
            !rest
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        })
    })
}

fn camelized(name: &str) -> Option<String> {
    needs_camelize(name).then(|| camelize(name))
}

/// Rename everything in a document. Returns how many names changed.
fn camelize_document(document: &mut Document, template_offset: usize) -> Result<usize> {
    let mut renamed = 0;
    for definition in &mut document.definitions {
        let selections = match definition {
            Definition::OperationDefinition(operation) => {
                let operation = operation.make_mut();
                renamed += rename_directive_arguments(
                    &mut operation.directives,
                    template_offset,
                    &camelized,
                )?;
                &mut operation.selection_set
            }
            Definition::FragmentDefinition(fragment) => {
                let fragment = fragment.make_mut();
                renamed += rename_directive_arguments(
                    &mut fragment.directives,
                    template_offset,
                    &camelized,
                )?;
                &mut fragment.selection_set
            }
            _ => continue,
        };

        walk_fields(selections, None, None, &mut |field, visit| {
            let offset = template_offset + visit.offset;
            if let Some(new_name) = camelized(field.name.as_str()) {
                if field.alias.is_none() {
                    field.alias = Some(field.name.clone());
                }
                field.name = graphql_name(&new_name, offset)?;
                renamed += 1;
            }
            renamed += rename_arguments(&mut field.arguments, offset, &camelized)?;
            renamed += rename_directive_arguments(&mut field.directives, offset, &camelized)?;
            Ok(())
        })?;
    }
    Ok(renamed)
}

fn has_mutation(document: &Document) -> bool {
    document.definitions.iter().any(|definition| {
        matches!(
            definition,
            Definition::OperationDefinition(operation)
                if operation.operation_type == OperationType::Mutation
        )
    })
}
