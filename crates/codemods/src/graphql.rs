//! Parsing, walking and printing of embedded GraphQL documents.

use crate::{CodemodError, Result};
use apollo_compiler::ast::{
    Argument, Definition, DirectiveList, Document, Field, NamedType, Selection,
};
use apollo_compiler::{Name, Node, Schema};
use graphql_extract::ExtractedGraphQL;
use std::path::Path;

/// Parse the first template segment of an extracted document.
pub(crate) fn parse_document(extracted: &ExtractedGraphQL, path: &Path) -> Result<Document> {
    Document::parse(extracted.source.clone(), path).map_err(|with_errors| {
        let message = with_errors
            .errors
            .iter()
            .map(|error| error.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        CodemodError::GraphQLSyntax {
            message,
            offset: extracted.location.offset,
        }
    })
}

pub(crate) fn print_document(document: &Document) -> String {
    document.to_string()
}

pub(crate) const UNPRINTABLE_TEMPLATE: &str =
    "Skipping GraphQL document that cannot be written back into a template literal";

/// Print a document for a template literal. `None` when the printed text
/// holds a backtick or `${`, which would end the template or start an
/// interpolation.
pub(crate) fn template_text(document: &Document) -> Option<String> {
    let printed = print_document(document);
    (!printed.contains('`') && !printed.contains("${")).then_some(printed)
}

pub(crate) fn graphql_name(value: &str, offset: usize) -> Result<Name> {
    Name::new(value).map_err(|_| CodemodError::InvalidName {
        name: value.to_string(),
        offset,
    })
}

/// Type that the top-level selections of a definition are selected on.
pub(crate) fn definition_type(definition: &Definition, schema: &Schema) -> Option<NamedType> {
    match definition {
        Definition::OperationDefinition(operation) => {
            schema.root_operation(operation.operation_type).cloned()
        }
        Definition::FragmentDefinition(fragment) => Some(fragment.type_condition.clone()),
        _ => None,
    }
}

/// Where a field visited by [`walk_fields`] sits.
pub(crate) struct FieldVisit<'t> {
    /// Type the field is selected on, when a schema is available
    pub parent_type: Option<&'t NamedType>,
    /// Offset of the field within the document text
    pub offset: usize,
}

/// Pre-order walk over every field of a selection set, inline fragments
/// included.
///
/// Child types are resolved from the field name before `visit` runs, so a
/// visitor may rename the field without losing type information.
pub(crate) fn walk_fields<F>(
    selections: &mut [Selection],
    parent_type: Option<&NamedType>,
    schema: Option<&Schema>,
    visit: &mut F,
) -> Result<()>
where
    F: FnMut(&mut Field, &FieldVisit<'_>) -> Result<()>,
{
    for selection in selections {
        match selection {
            Selection::Field(node) => {
                let offset = node.location().map_or(0, |span| span.offset());
                let field_type = match (schema, parent_type) {
                    (Some(schema), Some(parent)) => schema
                        .type_field(parent.as_str(), node.name.as_str())
                        .ok()
                        .map(|definition| definition.ty.inner_named_type().clone()),
                    _ => None,
                };
                let field = node.make_mut();
                visit(
                    field,
                    &FieldVisit {
                        parent_type,
                        offset,
                    },
                )?;
                walk_fields(
                    &mut field.selection_set,
                    field_type.as_ref(),
                    schema,
                    visit,
                )?;
            }
            Selection::InlineFragment(node) => {
                let fragment = node.make_mut();
                let fragment_type = fragment
                    .type_condition
                    .clone()
                    .or_else(|| parent_type.cloned());
                walk_fields(
                    &mut fragment.selection_set,
                    fragment_type.as_ref(),
                    schema,
                    visit,
                )?;
            }
            Selection::FragmentSpread(_) => {}
        }
    }
    Ok(())
}

/// Rename arguments in place. Returns how many were renamed.
pub(crate) fn rename_arguments(
    arguments: &mut [Node<Argument>],
    offset: usize,
    rename: &dyn Fn(&str) -> Option<String>,
) -> Result<usize> {
    let mut renamed = 0;
    for argument in arguments {
        if let Some(new_name) = rename(argument.name.as_str()) {
            argument.make_mut().name = graphql_name(&new_name, offset)?;
            renamed += 1;
        }
    }
    Ok(renamed)
}

/// Rename the arguments of every directive in a list.
pub(crate) fn rename_directive_arguments(
    directives: &mut DirectiveList,
    offset: usize,
    rename: &dyn Fn(&str) -> Option<String>,
) -> Result<usize> {
    let mut renamed = 0;
    for directive in &mut directives.0 {
        renamed += rename_arguments(&mut directive.make_mut().arguments, offset, rename)?;
    }
    Ok(renamed)
}
