//! Shared access to the schema definitions of a source file.

use crate::rewrite::Rewriter;
use crate::{CodemodContext, Result, SourceFile};
use graphql_extract::parse_source;
use graphql_schema_def::{locate, FieldMap, FieldValue, SchemaDefinitions};

/// Parse a file and locate its schema definitions.
pub(crate) fn locate_definitions(
    file: &SourceFile,
    context: &CodemodContext<'_>,
) -> Result<SchemaDefinitions> {
    let parsed = parse_source(&file.text, file.language)?;
    Ok(locate(&parsed, &context.vocabulary)?)
}

/// Note every entry of `map` whose configuration is not written inline.
pub(crate) fn report_opaque_configs(map: &FieldMap, rewriter: &mut Rewriter<'_>) {
    for field in map.fields() {
        match &field.value {
            FieldValue::Config(_) => {}
            FieldValue::Reference { range, .. } => {
                rewriter.info("Skipping field config by variable reference", *range);
            }
            FieldValue::Call { callee, range } => {
                rewriter.info(
                    format!("Skipping field config from function call `{callee}(…)`"),
                    *range,
                );
            }
            FieldValue::Other { range } => {
                rewriter.info(
                    "Skipping field config that is not an object expression",
                    *range,
                );
            }
        }
    }
}
