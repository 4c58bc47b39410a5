//! Camelizes the names of fields, arguments and input fields in schema
//! definitions while keeping resolvers reading the old data shape.

use crate::definitions::{locate_definitions, report_opaque_configs};
use crate::rewrite::{append_property, line_indent, Rewriter};
use crate::{Codemod, CodemodContext, CodemodError, Result, SourceFile, TransformOutput};
use graphql_codemod_types::{Language, OffsetRange};
use graphql_naming::{camelize, needs_camelize};
use graphql_schema_def::{
    FieldEntry, FieldMap, FieldValue, FieldsSource, MapKind, ObjectParam, Param, PatternBinding,
    ResolveProp, Resolver, ResolverBody, TypeExpr,
};
use std::collections::HashSet;

/// Renames `snake_case` keys of output field, argument and input field maps.
///
/// Renamed output fields without a resolver get one reading the old property
/// from the source object. Resolvers consuming renamed arguments or inputs
/// have their parameter rewritten so their bodies keep working unmodified.
pub struct RenameDefinitions;

impl Codemod for RenameDefinitions {
    fn name(&self) -> &'static str {
        "rename-definitions"
    }

    fn description(&self) -> &'static str {
        "Camelize field, argument and input field names in schema definitions"
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

        // Output fields
        for map in &definitions.output_maps {
            report_opaque_configs(map, &mut rewriter);
            for rename in plan_renames(map, &mut rewriter) {
                rename_key(&rename, &mut rewriter);
                add_source_resolver(&rename, &mut rewriter);
            }
        }

        // Arguments, together with the resolvers consuming them
        for config in definitions.output_field_configs() {
            let Some(args) = config.args.as_ref().and_then(FieldsSource::map) else {
                continue;
            };
            let plan = plan_renames(args, &mut rewriter);
            if plan.is_empty() {
                continue;
            }
            for rename in &plan {
                rename_key(rename, &mut rewriter);
            }
            match &config.resolve {
                Some(ResolveProp {
                    function: Some(resolver),
                    ..
                }) => {
                    rewrite_resolver_param(args, &plan, resolver, 1, file.language, &mut rewriter)?;
                }
                Some(resolve) => rewriter.info(
                    "Skipping renaming of args in resolver that is not defined inline",
                    resolve.range,
                ),
                None => {}
            }
        }
        for map in &definitions.argument_maps {
            for rename in plan_renames(map, &mut rewriter) {
                rename_key(&rename, &mut rewriter);
            }
        }

        // Input fields, together with the mutate functions consuming them
        let input_plans: Vec<Vec<Rename<'_>>> = definitions
            .input_maps
            .iter()
            .map(|map| plan_renames(map, &mut rewriter))
            .collect();

        for mutation in &definitions.mutations {
            let Some(index) = mutation.input_map else {
                continue;
            };
            let (Some(map), Some(plan)) =
                (definitions.input_maps.get(index), input_plans.get(index))
            else {
                continue;
            };
            if plan.is_empty() {
                continue;
            }
            match &mutation.payload_resolver {
                Some(ResolveProp {
                    function: Some(resolver),
                    ..
                }) => {
                    rewrite_resolver_param(map, plan, resolver, 0, file.language, &mut rewriter)?;
                }
                Some(resolve) => rewriter.info(
                    "Skipping renaming of inputs in mutate function that is not defined inline",
                    resolve.range,
                ),
                None => {}
            }
        }

        for (map, plan) in definitions.input_maps.iter().zip(&input_plans) {
            for rename in plan {
                rename_key(rename, &mut rewriter);
            }
            if !plan.is_empty() {
                let comment = input_fields_comment(rewriter.text(), map, plan);
                rewriter.insert(map.range.end, comment);
            }
            report_custom_input_types(map, &mut rewriter);
        }

        Ok(rewriter.finish())
    }
}

/// A key rename that passed the collision check.
struct Rename<'m> {
    entry: &'m FieldEntry,
    new_name: String,
}

/// Decide which keys of a map get renamed.
///
/// A rename is skipped when the map already has an entry under the new name,
/// including one produced by an earlier rename in the same map.
fn plan_renames<'m>(map: &'m FieldMap, rewriter: &mut Rewriter<'_>) -> Vec<Rename<'m>> {
    let mut taken: HashSet<String> = map.fields().map(|field| field.key.clone()).collect();
    let mut plan = Vec::new();

    for field in map.fields() {
        if map.kind == MapKind::Output && field.key == "__id" {
            rewriter.info("Skipping `__id` field", field.range);
            continue;
        }
        if !needs_camelize(&field.key) {
            continue;
        }
        let new_name = camelize(&field.key);
        if taken.contains(&new_name) {
            rewriter.warn(
                format!(
                    "Skipping renaming `{}` as another {} by the name of `{new_name}` already \
                     exists and is presumed to supersede it",
                    field.key, map.kind
                ),
                field.range,
            );
            continue;
        }
        taken.remove(&field.key);
        taken.insert(new_name.clone());
        tracing::debug!(from = %field.key, to = %new_name, "Planned rename");
        plan.push(Rename {
            entry: field,
            new_name,
        });
    }
    plan
}

fn rename_key(rename: &Rename<'_>, rewriter: &mut Rewriter<'_>) {
    let entry = rename.entry;
    if entry.shorthand {
        rewriter.replace(entry.key_range, format!("{}: {}", rename.new_name, entry.key));
    } else {
        rewriter.replace(entry.key_range, rename.new_name.clone());
    }
}

/// Give a renamed output field a resolver reading the old property.
fn add_source_resolver(rename: &Rename<'_>, rewriter: &mut Rewriter<'_>) {
    let old_name = &rename.entry.key;
    match &rename.entry.value {
        FieldValue::Config(config) if config.resolve.is_none() => {
            let property = format!("resolve: ({{ {old_name} }}) => {old_name}");
            let edit = append_property(rewriter.text(), config.range, &config.props, &property);
            rewriter.push_edit(edit);
        }
        FieldValue::Config(_) => {}
        value => rewriter.info(
            format!("Skipping addition of resolver for `{old_name}` as its config is not defined inline"),
            value.range(),
        ),
    }
}

/// Keep the resolver parameter at `index` consistent with renamed keys.
fn rewrite_resolver_param(
    map: &FieldMap,
    plan: &[Rename<'_>],
    resolver: &Resolver,
    index: usize,
    language: Language,
    rewriter: &mut Rewriter<'_>,
) -> Result<()> {
    let Some(param) = resolver.params.get(index) else {
        let what = if map.kind == MapKind::Input {
            "inputs"
        } else {
            "args"
        };
        rewriter.info(
            format!("Skipping renaming of {what} as they are not captured as a parameter of the resolver"),
            resolver.range,
        );
        return Ok(());
    };

    match param {
        Param::Object(object) => {
            rename_pattern_keys(map, plan, object, rewriter);
            Ok(())
        }
        Param::Ident { name, range } => {
            let param = DestructuredParam {
                name,
                range: *range,
            };
            param.rewrite(map, plan, resolver, language, rewriter);
            Ok(())
        }
        Param::Other { kind, range } => Err(CodemodError::UnexpectedParam {
            kind: *kind,
            offset: range.start,
        }),
    }
}

/// `{ old_name }` becomes `{ newName: old_name }` and `{ old_name: x }`
/// becomes `{ newName: x }`, so the resolver body needs no changes.
fn rename_pattern_keys(
    map: &FieldMap,
    plan: &[Rename<'_>],
    object: &ObjectParam,
    rewriter: &mut Rewriter<'_>,
) {
    for prop in &object.props {
        if !needs_camelize(&prop.key) {
            continue;
        }
        let new_name = match plan.iter().find(|rename| rename.entry.key == prop.key) {
            Some(rename) => rename.new_name.clone(),
            // Skipped because of a collision
            None if map.contains_key(&prop.key) => continue,
            // Merged in through a spread and renamed where it is defined
            None => camelize(&prop.key),
        };
        match prop.binding {
            PatternBinding::Shorthand => {
                rewriter.insert(prop.key_range.start, format!("{new_name}: "));
            }
            PatternBinding::Renamed => rewriter.replace(prop.key_range, new_name),
        }
    }
}

/// A resolver parameter capturing the whole arguments object under one name.
struct DestructuredParam<'p> {
    name: &'p str,
    range: OffsetRange,
}

impl DestructuredParam<'_> {
    /// Replace `(source, options) => ...` with
    ///
    /// ```text
    /// (source, { newName, ..._options }) => {
    ///   const options: any = { old_name: newName, ..._options };
    ///   ...
    /// }
    /// ```
    ///
    /// The rest element is only added when some entries keep their name.
    fn rewrite(
        &self,
        map: &FieldMap,
        plan: &[Rename<'_>],
        resolver: &Resolver,
        language: Language,
        rewriter: &mut Rewriter<'_>,
    ) {
        let mut pattern: Vec<String> = plan.iter().map(|rename| rename.new_name.clone()).collect();
        let mut rebuilt: Vec<String> = plan
            .iter()
            .map(|rename| format!("{}: {}", rename.entry.key, rename.new_name))
            .collect();
        if plan.len() < map.len() {
            let rest = format!("..._{}", self.name);
            pattern.push(rest.clone());
            rebuilt.push(rest);
        }
        rewriter.replace(self.range, format!("{{ {} }}", pattern.join(", ")));

        let annotation = if language.is_typescript() { ": any" } else { "" };
        let declaration = format!("const {}{annotation} = {{ {} }};", self.name, rebuilt.join(", "));

        match &resolver.body {
            ResolverBody::Block {
                first_statement: Some(first),
                ..
            } => {
                let indent = line_indent(rewriter.text(), first.start);
                rewriter.insert(first.start, format!("{declaration}\n\n{indent}"));
            }
            ResolverBody::Block {
                range,
                first_statement: None,
            } => rewriter.insert(range.start + 1, format!(" {declaration} ")),
            ResolverBody::Expression { range } => {
                let text = rewriter.text();
                let indent = line_indent(text, resolver.range.start);
                let expression = range.slice(text).unwrap_or_default();
                rewriter.replace(
                    *range,
                    format!(
                        "{{\n{indent}  {declaration}\n\n{indent}  return {expression};\n{indent}}}"
                    ),
                );
            }
        }
    }
}

/// Documents the before and after key shapes next to a renamed input map,
/// for code that passes the inputs on without going through a resolver
/// parameter.
fn input_fields_comment(text: &str, map: &FieldMap, plan: &[Rename<'_>]) -> String {
    let indent = line_indent(text, map.range.start);
    let mut new_fields: Vec<String> = plan.iter().map(|rename| rename.new_name.clone()).collect();
    let mut old_fields: Vec<String> = plan
        .iter()
        .map(|rename| format!("{}: {}", rename.new_name, rename.entry.key))
        .collect();
    if plan.len() < map.len() {
        new_fields.push("..._newFields".to_string());
        old_fields.push("..._newFields".to_string());
    }
    format!(
        "/*\n{indent}{{\n{indent}  const {{ {} }} = newFields;\n{indent}  const oldFields = {{ {} }};\n{indent}}}\n{indent}*/",
        new_fields.join(", "),
        old_fields.join(", "),
    )
}

fn report_custom_input_types(map: &FieldMap, rewriter: &mut Rewriter<'_>) {
    for field in map.fields() {
        let Some(TypeExpr::Named { name, range }) =
            field.value.config().and_then(|config| config.type_expr.as_ref())
        else {
            continue;
        };
        if !name.starts_with("GraphQL") {
            rewriter.info(
                "Skipping renaming of nested input values in mutate function for custom input \
                 object type",
                *range,
            );
        }
    }
}
