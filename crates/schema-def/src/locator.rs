//! Walks a parsed source and builds the [`SchemaDefinitions`] model.

use crate::model::{
    ConfigProp, FieldConfig, FieldEntry, FieldMap, FieldValue, FieldsSource, MapEntry, MapKind,
    MutationConfig, NamedFieldConfig, ObjectParam, Param, PatternBinding, PatternProp,
    ResolveProp, Resolver, ResolverBody, SchemaDefinitions, TypeExpr,
};
use crate::vocabulary::{DeclarationKind, Vocabulary};
use crate::{LocateError, Result};
use graphql_codemod_types::{Diagnostic, OffsetRange};
use graphql_extract::ast::{
    BlockStmt, BlockStmtOrExpr, CallExpr, Callee, Expr, Function, Ident, MemberProp, MethodProp,
    NewExpr, ObjectLit, ObjectPat, ObjectPatProp, Pat, Prop, PropName, PropOrSpread, Stmt,
    TsEntityName, TsType, VarDeclarator,
};
use graphql_extract::{ParsedSource, Spanned, Visit, VisitWith};

/// Locate every statically identifiable schema definition in a source file.
///
/// Recognised shapes:
/// - `new <ObjectType>({ fields })`, `new <InputObjectType>({ fields })` and
///   `new <EnumType>({ values })`, where `fields` is an object literal or a
///   thunk returning one
/// - `<mutationHelper>({ inputFields, outputFields, mutateAndGetPayload })`
/// - variables annotated with a map, field config or mutation config type,
///   optionally wrapped as `Thunk<Map>`
///
/// Parentheses, `as` casts and `satisfies` wrappers are transparent.
#[tracing::instrument(skip_all)]
pub fn locate(parsed: &ParsedSource<'_>, vocabulary: &Vocabulary) -> Result<SchemaDefinitions> {
    let mut locator = Locator {
        parsed,
        vocabulary,
        definitions: SchemaDefinitions::default(),
        error: None,
    };
    parsed.module().visit_with(&mut locator);

    if let Some(error) = locator.error {
        return Err(error);
    }

    let definitions = locator.definitions;
    tracing::debug!(
        output_maps = definitions.output_maps.len(),
        input_maps = definitions.input_maps.len(),
        argument_maps = definitions.argument_maps.len(),
        field_configs = definitions.field_configs.len(),
        mutations = definitions.mutations.len(),
        enums = definitions.enum_values.len(),
        "Located schema definitions"
    );
    Ok(definitions)
}

/// Strip wrappers that do not change the value of an expression.
fn unwrap_expr(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unwrap_expr(&paren.expr),
        Expr::TsAs(cast) => unwrap_expr(&cast.expr),
        Expr::TsSatisfies(satisfies) => unwrap_expr(&satisfies.expr),
        Expr::TsConstAssertion(assertion) => unwrap_expr(&assertion.expr),
        Expr::TsNonNull(non_null) => unwrap_expr(&non_null.expr),
        _ => expr,
    }
}

/// Name of an identifier or the last segment of a member expression.
fn expr_name(expr: &Expr) -> Option<&str> {
    match unwrap_expr(expr) {
        Expr::Ident(ident) => Some(&*ident.sym),
        Expr::Member(member) => match &member.prop {
            MemberProp::Ident(name) => Some(&*name.sym),
            _ => None,
        },
        _ => None,
    }
}

fn callee_name(call: &CallExpr) -> Option<&str> {
    match &call.callee {
        Callee::Expr(callee) => expr_name(callee),
        _ => None,
    }
}

fn entity_name(name: &TsEntityName) -> &str {
    match name {
        TsEntityName::Ident(ident) => &*ident.sym,
        TsEntityName::TsQualifiedName(qualified) => &*qualified.right.sym,
    }
}

/// The object literal returned by the last statement of a block.
fn returned_object(block: &BlockStmt) -> Option<&ObjectLit> {
    let Stmt::Return(ret) = block.stmts.last()? else {
        return None;
    };
    match unwrap_expr(ret.arg.as_deref()?) {
        Expr::Object(object) => Some(object),
        _ => None,
    }
}

/// The value side of a property found by key.
enum PropValue<'n> {
    Expr(&'n Expr),
    Shorthand(&'n Ident),
    Method(&'n MethodProp),
}

struct Locator<'p, 'a> {
    parsed: &'p ParsedSource<'a>,
    vocabulary: &'p Vocabulary,
    definitions: SchemaDefinitions,
    error: Option<LocateError>,
}

impl Visit for Locator<'_, '_> {
    fn visit_new_expr(&mut self, node: &NewExpr) {
        if self.error.is_some() {
            return;
        }
        if let Err(error) = self.constructor(node) {
            self.error = Some(error);
            return;
        }
        node.visit_children_with(self);
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if self.error.is_some() {
            return;
        }
        if let Err(error) = self.mutation_helper_call(node) {
            self.error = Some(error);
            return;
        }
        node.visit_children_with(self);
    }

    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        if self.error.is_some() {
            return;
        }
        if let Err(error) = self.declaration(node) {
            self.error = Some(error);
            return;
        }
        node.visit_children_with(self);
    }
}

impl Locator<'_, '_> {
    fn warn(&mut self, message: String, range: OffsetRange) {
        tracing::warn!(offset = range.start, "{message}");
        self.definitions
            .diagnostics
            .push(Diagnostic::warning(message, range));
    }

    fn range<N: Spanned>(&self, node: &N) -> OffsetRange {
        self.parsed.node_range(node)
    }

    fn key_name(&self, key: &PropName) -> Option<String> {
        match key {
            PropName::Ident(ident) => Some(ident.sym.to_string()),
            PropName::Str(_) => {
                let quoted = self.parsed.snippet(key.span());
                Some(quoted.trim_matches(|c| c == '"' || c == '\'').to_string())
            }
            PropName::Num(_) | PropName::BigInt(_) => {
                Some(self.parsed.snippet(key.span()).to_string())
            }
            PropName::Computed(_) => None,
        }
    }

    fn prop_range(&self, prop: &Prop) -> OffsetRange {
        match prop {
            Prop::KeyValue(kv) => {
                OffsetRange::new(self.range(&kv.key).start, self.range(&*kv.value).end)
            }
            Prop::Shorthand(ident) => self.range(ident),
            Prop::Method(method) => OffsetRange::new(
                self.range(&method.key).start,
                self.parsed.range(method.function.span).end,
            ),
            Prop::Getter(getter) => self.parsed.range(getter.span),
            Prop::Setter(setter) => self.parsed.range(setter.span),
            Prop::Assign(assign) => {
                OffsetRange::new(self.range(&assign.key).start, self.range(&*assign.value).end)
            }
        }
    }

    fn find_property<'n>(
        &self,
        object: &'n ObjectLit,
        name: &str,
    ) -> Option<(OffsetRange, PropValue<'n>)> {
        object.props.iter().find_map(|prop| {
            let PropOrSpread::Prop(prop) = prop else {
                return None;
            };
            let value = match &**prop {
                Prop::KeyValue(kv) if self.key_name(&kv.key).as_deref() == Some(name) => {
                    PropValue::Expr(&kv.value)
                }
                Prop::Shorthand(ident) if &*ident.sym == name => PropValue::Shorthand(ident),
                Prop::Method(method) if self.key_name(&method.key).as_deref() == Some(name) => {
                    PropValue::Method(method)
                }
                _ => return None,
            };
            Some((self.prop_range(prop), value))
        })
    }

    // ------------------------------------------------------------------
    // Recognised definition sites
    // ------------------------------------------------------------------

    fn constructor(&mut self, node: &NewExpr) -> Result<()> {
        let Some(callee) = expr_name(&node.callee) else {
            return Ok(());
        };
        let (kind, property) = if self.vocabulary.is_object_type(callee) {
            (MapKind::Output, "fields")
        } else if self.vocabulary.is_input_object_type(callee) {
            (MapKind::Input, "fields")
        } else if self.vocabulary.is_enum_type(callee) {
            (MapKind::EnumValues, "values")
        } else {
            return Ok(());
        };
        let callee = callee.to_string();
        let offset = self.parsed.range(node.span).start;

        let config = node
            .args
            .as_ref()
            .and_then(|args| args.first())
            .map(|arg| unwrap_expr(&arg.expr));
        let Some(Expr::Object(config)) = config else {
            return Err(LocateError::ExpectedConfigObject { callee, offset });
        };
        let Some((_, value)) = self.find_property(config, property) else {
            return Err(LocateError::MissingProperty {
                property,
                callee,
                offset,
            });
        };

        let source = self.fields_source(value, kind)?;
        match kind {
            MapKind::EnumValues => self.definitions.enum_values.push(source),
            MapKind::Input => {
                self.push_input_map(source);
            }
            MapKind::Output | MapKind::Arguments => {
                self.push_output_map(source);
            }
        }
        Ok(())
    }

    fn mutation_helper_call(&mut self, node: &CallExpr) -> Result<()> {
        if !callee_name(node).is_some_and(|name| self.vocabulary.is_mutation_helper(name)) {
            return Ok(());
        }
        match node.args.first().map(|arg| unwrap_expr(&arg.expr)) {
            Some(Expr::Object(config)) => self.mutation_config(config),
            Some(other) => {
                let range = self.range(other);
                self.warn(
                    "Skipping mutation config that's not defined as object expression".to_string(),
                    range,
                );
                Ok(())
            }
            None => {
                let range = self.parsed.range(node.span);
                self.warn(
                    "Skipping mutation helper call without a config".to_string(),
                    range,
                );
                Ok(())
            }
        }
    }

    fn declaration(&mut self, node: &VarDeclarator) -> Result<()> {
        let Pat::Ident(binding) = &node.name else {
            return Ok(());
        };
        let Some(annotation) = &binding.type_ann else {
            return Ok(());
        };
        let Some(init) = node.init.as_deref() else {
            return Ok(());
        };
        let Some(kind) = self.annotated_kind(&annotation.type_ann) else {
            return Ok(());
        };
        tracing::debug!(name = %binding.id.sym, ?kind, "Found typed declaration");

        match kind {
            DeclarationKind::OutputFieldMap => {
                let source = self.thunk_source(init, MapKind::Output)?;
                self.push_output_map(source);
            }
            DeclarationKind::InputFieldMap => {
                let source = self.thunk_source(init, MapKind::Input)?;
                self.push_input_map(source);
            }
            DeclarationKind::ArgumentMap => match unwrap_expr(init) {
                Expr::Object(object) => {
                    let map = self.field_map(object, MapKind::Arguments)?;
                    self.definitions.argument_maps.push(map);
                }
                other => {
                    let range = self.range(other);
                    self.warn(
                        "Skipping args that are not defined as an object expression".to_string(),
                        range,
                    );
                }
            },
            DeclarationKind::FieldConfig => {
                if let Expr::Object(object) = unwrap_expr(init) {
                    let config = self.field_config(object)?;
                    self.definitions.field_configs.push(NamedFieldConfig {
                        name: binding.id.sym.to_string(),
                        config,
                    });
                }
            }
            DeclarationKind::MutationConfig => match unwrap_expr(init) {
                Expr::Object(object) => self.mutation_config(object)?,
                other => {
                    let range = self.range(other);
                    self.warn(
                        "Skipping mutation config that's not defined as object expression"
                            .to_string(),
                        range,
                    );
                }
            },
        }
        Ok(())
    }

    fn annotated_kind(&self, ty: &TsType) -> Option<DeclarationKind> {
        let TsType::TsTypeRef(reference) = ty else {
            return None;
        };
        let name = entity_name(&reference.type_name);
        if self.vocabulary.is_thunk_type(name) {
            let inner = reference.type_params.as_ref()?.params.first()?;
            let TsType::TsTypeRef(inner) = &**inner else {
                return None;
            };
            return self
                .vocabulary
                .declaration_kind(entity_name(&inner.type_name))
                .filter(|kind| {
                    matches!(
                        kind,
                        DeclarationKind::OutputFieldMap | DeclarationKind::InputFieldMap
                    )
                });
        }
        self.vocabulary.declaration_kind(name)
    }

    fn mutation_config(&mut self, config: &ObjectLit) -> Result<()> {
        let input_map = match self.find_property(config, "inputFields") {
            Some((_, value)) => {
                let source = self.fields_source(value, MapKind::Input)?;
                self.push_input_map(source)
            }
            None => None,
        };
        let output_map = match self.find_property(config, "outputFields") {
            Some((_, value)) => {
                let source = self.fields_source(value, MapKind::Output)?;
                self.push_output_map(source)
            }
            None => None,
        };
        let payload_resolver = self
            .find_property(config, "mutateAndGetPayload")
            .map(|(range, value)| ResolveProp {
                range,
                function: self.resolver_from(&value),
            });

        self.definitions.mutations.push(MutationConfig {
            range: self.range(config),
            input_map,
            output_map,
            payload_resolver,
        });
        Ok(())
    }

    fn push_output_map(&mut self, source: FieldsSource) -> Option<usize> {
        self.report_unfollowed(&source);
        let map = source.into_map()?;
        self.definitions.output_maps.push(map);
        Some(self.definitions.output_maps.len() - 1)
    }

    fn push_input_map(&mut self, source: FieldsSource) -> Option<usize> {
        self.report_unfollowed(&source);
        let map = source.into_map()?;
        self.definitions.input_maps.push(map);
        Some(self.definitions.input_maps.len() - 1)
    }

    fn report_unfollowed(&mut self, source: &FieldsSource) {
        match source {
            FieldsSource::Inline(_) | FieldsSource::Deferred(_) => {}
            FieldsSource::ByReference { range, .. } => {
                self.warn(
                    "Skipping fields declared as variable reference".to_string(),
                    *range,
                );
            }
            FieldsSource::ByCall { range, .. } | FieldsSource::Unsupported { range } => {
                self.warn(
                    "Skipping fields that do not hold either an object or a thunk returning one"
                        .to_string(),
                    *range,
                );
            }
        }
    }

    // ------------------------------------------------------------------
    // Maps
    // ------------------------------------------------------------------

    fn fields_source(&mut self, value: PropValue<'_>, kind: MapKind) -> Result<FieldsSource> {
        match value {
            PropValue::Expr(expr) => self.thunk_source(expr, kind),
            PropValue::Shorthand(ident) => Ok(FieldsSource::ByReference {
                name: ident.sym.to_string(),
                range: self.range(ident),
            }),
            PropValue::Method(method) => self.function_thunk(&method.function, kind),
        }
    }

    fn thunk_source(&mut self, expr: &Expr, kind: MapKind) -> Result<FieldsSource> {
        let expr = unwrap_expr(expr);
        let range = self.range(expr);
        match expr {
            Expr::Object(object) => Ok(FieldsSource::Inline(self.field_map(object, kind)?)),
            Expr::Arrow(arrow) => {
                let object = match &*arrow.body {
                    BlockStmtOrExpr::Expr(body) => match unwrap_expr(body) {
                        Expr::Object(object) => Some(object),
                        _ => None,
                    },
                    BlockStmtOrExpr::BlockStmt(block) => returned_object(block),
                };
                match object {
                    Some(object) => Ok(FieldsSource::Deferred(self.field_map(object, kind)?)),
                    None => Ok(FieldsSource::Unsupported { range }),
                }
            }
            Expr::Fn(function) => self.function_thunk(&function.function, kind),
            Expr::Ident(ident) => Ok(FieldsSource::ByReference {
                name: ident.sym.to_string(),
                range,
            }),
            Expr::Call(call) => Ok(FieldsSource::ByCall {
                callee: self.callee_label(call),
                range,
            }),
            _ => Ok(FieldsSource::Unsupported { range }),
        }
    }

    fn function_thunk(&mut self, function: &Function, kind: MapKind) -> Result<FieldsSource> {
        let range = self.parsed.range(function.span);
        match function.body.as_ref().and_then(returned_object) {
            Some(object) => Ok(FieldsSource::Deferred(self.field_map(object, kind)?)),
            None => Ok(FieldsSource::Unsupported { range }),
        }
    }

    fn args_source(&mut self, expr: &Expr) -> Result<FieldsSource> {
        let expr = unwrap_expr(expr);
        let range = self.range(expr);
        let source = match expr {
            Expr::Object(object) => {
                return Ok(FieldsSource::Inline(
                    self.field_map(object, MapKind::Arguments)?,
                ));
            }
            Expr::Call(call)
                if callee_name(call)
                    .is_some_and(|name| self.vocabulary.is_argument_decorator(name)) =>
            {
                if let Some(arg) = call.args.first().filter(|arg| arg.spread.is_none()) {
                    return self.args_source(&arg.expr);
                }
                FieldsSource::Unsupported { range }
            }
            Expr::Ident(ident) => FieldsSource::ByReference {
                name: ident.sym.to_string(),
                range,
            },
            Expr::Call(call) => FieldsSource::ByCall {
                callee: self.callee_label(call),
                range,
            },
            _ => FieldsSource::Unsupported { range },
        };
        self.warn(
            "Skipping args that are not defined as an object expression".to_string(),
            range,
        );
        Ok(source)
    }

    fn callee_label(&self, call: &CallExpr) -> String {
        match &call.callee {
            Callee::Expr(callee) => self.parsed.snippet(callee.span()).to_string(),
            Callee::Super(_) => "super".to_string(),
            Callee::Import(_) => "import".to_string(),
        }
    }

    fn field_map(&mut self, object: &ObjectLit, kind: MapKind) -> Result<FieldMap> {
        let mut entries = Vec::with_capacity(object.props.len());
        for prop in &object.props {
            match prop {
                PropOrSpread::Spread(spread) => {
                    let range = OffsetRange::new(
                        self.parsed.offset(spread.dot3_token.lo.0),
                        self.range(&*spread.expr).end,
                    );
                    let label = self.parsed.snippet(spread.expr.span()).to_string();
                    self.warn(format!("Skipping spread of `{label}`"), range);
                    entries.push(MapEntry::Spread { label, range });
                }
                PropOrSpread::Prop(prop) => entries.push(self.map_entry(prop, kind)?),
            }
        }
        Ok(FieldMap {
            kind,
            range: self.range(object),
            entries,
        })
    }

    fn map_entry(&mut self, prop: &Prop, kind: MapKind) -> Result<MapEntry> {
        let range = self.prop_range(prop);
        let unknown = |what: &'static str| LocateError::UnknownPropertyKind {
            kind: what,
            offset: range.start,
        };
        match prop {
            Prop::KeyValue(kv) => {
                let Some(key) = self.key_name(&kv.key) else {
                    self.warn(format!("Skipping {kind} with a computed key"), range);
                    return Ok(MapEntry::Unsupported { range });
                };
                let value = self.field_value(&kv.value)?;
                Ok(MapEntry::Field(FieldEntry {
                    key,
                    key_range: self.range(&kv.key),
                    shorthand: false,
                    range,
                    value,
                }))
            }
            Prop::Shorthand(ident) => {
                let name = ident.sym.to_string();
                Ok(MapEntry::Field(FieldEntry {
                    key: name.clone(),
                    key_range: range,
                    shorthand: true,
                    range,
                    value: FieldValue::Reference { name, range },
                }))
            }
            Prop::Method(_) => Err(unknown("method")),
            Prop::Getter(_) => Err(unknown("getter")),
            Prop::Setter(_) => Err(unknown("setter")),
            Prop::Assign(_) => Err(unknown("assignment")),
        }
    }

    fn field_value(&mut self, expr: &Expr) -> Result<FieldValue> {
        let expr = unwrap_expr(expr);
        let range = self.range(expr);
        Ok(match expr {
            Expr::Object(object) => FieldValue::Config(self.field_config(object)?),
            Expr::Ident(ident) => FieldValue::Reference {
                name: ident.sym.to_string(),
                range,
            },
            Expr::Call(call) => FieldValue::Call {
                callee: self.callee_label(call),
                range,
            },
            _ => FieldValue::Other { range },
        })
    }

    // ------------------------------------------------------------------
    // Field configurations
    // ------------------------------------------------------------------

    fn field_config(&mut self, object: &ObjectLit) -> Result<FieldConfig> {
        let mut config = FieldConfig {
            range: self.range(object),
            props: Vec::with_capacity(object.props.len()),
            type_expr: None,
            args: None,
            resolve: None,
            deprecated: false,
        };

        for prop in &object.props {
            let prop = match prop {
                PropOrSpread::Prop(prop) => prop,
                PropOrSpread::Spread(spread) => {
                    config.props.push(ConfigProp {
                        name: None,
                        range: OffsetRange::new(
                            self.parsed.offset(spread.dot3_token.lo.0),
                            self.range(&*spread.expr).end,
                        ),
                    });
                    continue;
                }
            };
            let range = self.prop_range(prop);
            let name = match &**prop {
                Prop::KeyValue(kv) => {
                    let name = self.key_name(&kv.key);
                    match name.as_deref() {
                        Some("type") => config.type_expr = Some(self.type_expr(&kv.value)),
                        Some("args") => config.args = Some(self.args_source(&kv.value)?),
                        Some("resolve") => {
                            config.resolve = Some(ResolveProp {
                                range,
                                function: self.resolver(&kv.value),
                            });
                        }
                        Some("deprecationReason") => config.deprecated = true,
                        _ => {}
                    }
                    name
                }
                Prop::Shorthand(ident) => {
                    let name = ident.sym.to_string();
                    match name.as_str() {
                        "type" => {
                            config.type_expr = Some(TypeExpr::Named {
                                name: name.clone(),
                                range,
                            });
                        }
                        "args" => {
                            config.args = Some(FieldsSource::ByReference {
                                name: name.clone(),
                                range,
                            });
                        }
                        "resolve" => {
                            config.resolve = Some(ResolveProp {
                                range,
                                function: None,
                            });
                        }
                        "deprecationReason" => config.deprecated = true,
                        _ => {}
                    }
                    Some(name)
                }
                Prop::Method(method) => {
                    let name = self.key_name(&method.key);
                    if name.as_deref() == Some("resolve") {
                        config.resolve = Some(ResolveProp {
                            range,
                            function: self.function_resolver(&method.function),
                        });
                    }
                    name
                }
                Prop::Getter(getter) => self.key_name(&getter.key),
                Prop::Setter(setter) => self.key_name(&setter.key),
                Prop::Assign(assign) => Some(assign.key.sym.to_string()),
            };
            config.props.push(ConfigProp { name, range });
        }

        Ok(config)
    }

    fn type_expr(&self, expr: &Expr) -> TypeExpr {
        let expr = unwrap_expr(expr);
        let range = self.range(expr);
        match expr {
            Expr::New(new)
                if expr_name(&new.callee).is_some_and(|name| self.vocabulary.is_list_type(name)) =>
            {
                TypeExpr::List { range }
            }
            Expr::Ident(ident) => TypeExpr::Named {
                name: ident.sym.to_string(),
                range,
            },
            _ => TypeExpr::Other { range },
        }
    }

    // ------------------------------------------------------------------
    // Resolvers
    // ------------------------------------------------------------------

    fn resolver_from(&self, value: &PropValue<'_>) -> Option<Resolver> {
        match value {
            PropValue::Expr(expr) => self.resolver(expr),
            PropValue::Method(method) => self.function_resolver(&method.function),
            PropValue::Shorthand(_) => None,
        }
    }

    fn resolver(&self, expr: &Expr) -> Option<Resolver> {
        match unwrap_expr(expr) {
            Expr::Arrow(arrow) => Some(Resolver {
                range: self.parsed.range(arrow.span),
                params: arrow.params.iter().map(|param| self.param(param)).collect(),
                body: match &*arrow.body {
                    BlockStmtOrExpr::BlockStmt(block) => self.block_body(block),
                    BlockStmtOrExpr::Expr(body) => ResolverBody::Expression {
                        range: self.range(&**body),
                    },
                },
            }),
            Expr::Fn(function) => self.function_resolver(&function.function),
            _ => None,
        }
    }

    fn function_resolver(&self, function: &Function) -> Option<Resolver> {
        let body = function.body.as_ref()?;
        Some(Resolver {
            range: self.parsed.range(function.span),
            params: function
                .params
                .iter()
                .map(|param| self.param(&param.pat))
                .collect(),
            body: self.block_body(body),
        })
    }

    fn block_body(&self, block: &BlockStmt) -> ResolverBody {
        ResolverBody::Block {
            range: self.parsed.range(block.span),
            first_statement: block.stmts.first().map(|stmt| self.range(stmt)),
        }
    }

    fn param(&self, pat: &Pat) -> Param {
        let range = self.range(pat);
        match pat {
            Pat::Ident(binding) => {
                let id_range = self.range(&binding.id);
                let end = binding
                    .type_ann
                    .as_ref()
                    .map_or(id_range.end, |annotation| {
                        self.parsed.range(annotation.span).end
                    });
                Param::Ident {
                    name: binding.id.sym.to_string(),
                    range: OffsetRange::new(id_range.start, end),
                }
            }
            Pat::Object(object) => Param::Object(self.object_param(object)),
            Pat::Assign(_) => Param::Other {
                kind: "default value",
                range,
            },
            Pat::Array(_) => Param::Other {
                kind: "array pattern",
                range,
            },
            Pat::Rest(_) => Param::Other {
                kind: "rest element",
                range,
            },
            _ => Param::Other {
                kind: "expression",
                range,
            },
        }
    }

    fn object_param(&self, object: &ObjectPat) -> ObjectParam {
        let mut props = Vec::with_capacity(object.props.len());
        let mut has_rest = false;
        for prop in &object.props {
            match prop {
                ObjectPatProp::KeyValue(kv) => {
                    if let Some(key) = self.key_name(&kv.key) {
                        props.push(PatternProp {
                            key,
                            key_range: self.range(&kv.key),
                            binding: PatternBinding::Renamed,
                        });
                    }
                }
                ObjectPatProp::Assign(assign) => props.push(PatternProp {
                    key: assign.key.id.sym.to_string(),
                    key_range: self.range(&assign.key.id),
                    binding: PatternBinding::Shorthand,
                }),
                ObjectPatProp::Rest(_) => has_rest = true,
            }
        }
        ObjectParam {
            range: self.parsed.range(object.span),
            props,
            has_rest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_codemod_types::Language;
    use graphql_extract::parse_source;

    fn locate_str(source: &str) -> Result<SchemaDefinitions> {
        let parsed = parse_source(source, Language::TypeScript).unwrap();
        locate(&parsed, &Vocabulary::default())
    }

    fn keys(map: &FieldMap) -> Vec<&str> {
        map.fields().map(|field| field.key.as_str()).collect()
    }

    #[test]
    fn test_object_type_with_inline_fields() {
        let source = r#"
const T = new GraphQLObjectType({
  name: "T",
  fields: {
    channel_id: { type: GraphQLString },
    image_url: { type: GraphQLString, resolve: ({ url }) => url },
  },
})
"#;
        let definitions = locate_str(source).unwrap();
        assert_eq!(definitions.output_maps.len(), 1);
        let map = &definitions.output_maps[0];
        assert_eq!(map.kind, MapKind::Output);
        assert_eq!(keys(map), vec!["channel_id", "image_url"]);

        let channel = map.get("channel_id").unwrap();
        assert_eq!(channel.key_range.slice(source), Some("channel_id"));
        let config = channel.value.config().unwrap();
        assert!(config.resolve.is_none());
        assert!(matches!(
            &config.type_expr,
            Some(TypeExpr::Named { name, .. }) if name == "GraphQLString"
        ));
        assert!(map.get("image_url").unwrap().value.config().unwrap().resolve.is_some());
    }

    #[test]
    fn test_thunk_fields_and_spread() {
        let source = r"
const T = new GraphQLInterfaceType<any, any>({
  name: 'T',
  fields: () => ({
    ...IDFields,
    a_b: { type: GraphQLString },
  }),
})
";
        let definitions = locate_str(source).unwrap();
        let map = &definitions.output_maps[0];
        assert_eq!(map.len(), 2);
        assert!(matches!(&map.entries[0], MapEntry::Spread { label, .. } if label == "IDFields"));
        assert_eq!(definitions.diagnostics.len(), 1);
        assert_eq!(definitions.diagnostics[0].message, "Skipping spread of `IDFields`");
    }

    #[test]
    fn test_thunk_with_block_body() {
        let source = r"
const T = new GraphQLObjectType({
  name: 'T',
  fields: function () {
    const shared = {};
    return { a_b: { type: GraphQLString } };
  },
})
";
        let definitions = locate_str(source).unwrap();
        assert_eq!(keys(&definitions.output_maps[0]), vec!["a_b"]);
    }

    #[test]
    fn test_fields_by_reference_is_reported() {
        let source = "const T = new GraphQLObjectType({ name: 'T', fields: sharedFields })";
        let definitions = locate_str(source).unwrap();
        assert!(definitions.output_maps.is_empty());
        assert_eq!(
            definitions.diagnostics[0].message,
            "Skipping fields declared as variable reference"
        );
    }

    #[test]
    fn test_typed_declarations() {
        let source = r"
const fields: GraphQLFieldConfigMap<any, any> = { a_b: { type: GraphQLString } }
const lazy: Thunk<GraphQLInputFieldConfigMap> = () => ({ c_d: { type: GraphQLString } })
const args: GraphQLFieldConfigArgumentMap = { e_f: { type: GraphQLString } }
export const Single: GraphQLFieldConfig<any, any> = { type: GraphQLString, deprecationReason: 'x' }
const untyped = { g_h: {} }
";
        let definitions = locate_str(source).unwrap();
        assert_eq!(keys(&definitions.output_maps[0]), vec!["a_b"]);
        assert_eq!(keys(&definitions.input_maps[0]), vec!["c_d"]);
        assert_eq!(keys(&definitions.argument_maps[0]), vec!["e_f"]);
        assert_eq!(definitions.field_configs.len(), 1);
        assert_eq!(definitions.field_configs[0].name, "Single");
        assert!(definitions.field_configs[0].config.deprecated);
    }

    #[test]
    fn test_args_unwrap_decorator() {
        let source = r"
const T = new GraphQLObjectType({
  name: 'T',
  fields: {
    things: {
      type: new GraphQLList(GraphQLString),
      args: pageable({ artwork_id: { type: GraphQLString } }),
      resolve: (_source, options, { loader }) => loader(options),
    },
  },
})
";
        let definitions = locate_str(source).unwrap();
        let config = definitions.output_maps[0]
            .get("things")
            .unwrap()
            .value
            .config()
            .unwrap();
        assert!(config.type_expr.as_ref().unwrap().is_list());
        let args = config.args.as_ref().unwrap();
        assert!(matches!(args, FieldsSource::Inline(_)));
        assert_eq!(keys(args.map().unwrap()), vec!["artwork_id"]);

        let resolver = config.resolve.as_ref().unwrap().function.as_ref().unwrap();
        assert_eq!(resolver.params.len(), 3);
        assert!(matches!(&resolver.params[1], Param::Ident { name, .. } if name == "options"));
        assert!(matches!(&resolver.params[2], Param::Object(object) if object.props[0].key == "loader"));
        assert!(matches!(resolver.body, ResolverBody::Expression { .. }));
    }

    #[test]
    fn test_object_param_bindings() {
        let source = r"
export const F: GraphQLFieldConfig<any, any> = {
  type: GraphQLString,
  resolve(_source, { artwork_id, other_id: some_other, ...rest }: Args) {
    return artwork_id
  },
}
";
        let definitions = locate_str(source).unwrap();
        let resolve = definitions.field_configs[0].config.resolve.as_ref().unwrap();
        let resolver = resolve.function.as_ref().unwrap();
        let Param::Object(object) = &resolver.params[1] else {
            panic!("expected an object pattern");
        };
        assert!(object.has_rest);
        assert_eq!(object.props.len(), 2);
        assert_eq!(object.props[0].binding, PatternBinding::Shorthand);
        assert_eq!(object.props[1].key, "other_id");
        assert_eq!(object.props[1].binding, PatternBinding::Renamed);
        assert_eq!(object.props[1].key_range.slice(source), Some("other_id"));
        assert!(matches!(resolver.body, ResolverBody::Block { first_statement: Some(_), .. }));
    }

    #[test]
    fn test_ident_param_range_includes_type_annotation() {
        let source = r"
export const F: GraphQLFieldConfig<any, any> = {
  type: GraphQLString,
  resolve: (_source, options: { a_b: string }) => options.a_b,
}
";
        let definitions = locate_str(source).unwrap();
        let resolver = definitions.field_configs[0]
            .config
            .resolve
            .as_ref()
            .unwrap()
            .function
            .as_ref()
            .unwrap();
        assert_eq!(
            resolver.params[1].range().slice(source),
            Some("options: { a_b: string }")
        );
    }

    #[test]
    fn test_mutation_helper() {
        let source = r"
export const M = mutationWithClientMutationId({
  name: 'M',
  inputFields: { artist_id: { type: GraphQLString } },
  outputFields: { consignment_submission: { type: GraphQLString } },
  mutateAndGetPayload: ({ artist_id }, { loader }) => loader(artist_id),
})
";
        let definitions = locate_str(source).unwrap();
        assert_eq!(definitions.mutations.len(), 1);
        let mutation = &definitions.mutations[0];
        let input = &definitions.input_maps[mutation.input_map.unwrap()];
        assert_eq!(keys(input), vec!["artist_id"]);
        let output = &definitions.output_maps[mutation.output_map.unwrap()];
        assert_eq!(keys(output), vec!["consignment_submission"]);
        assert!(mutation.payload_resolver.as_ref().unwrap().function.is_some());
    }

    #[test]
    fn test_mutation_config_declaration() {
        let source = r"
export const M: MutationConfig = {
  name: 'M',
  inputFields: { a_b: { type: GraphQLString } },
  outputFields: {},
  mutateAndGetPayload: (input) => input,
}
";
        let definitions = locate_str(source).unwrap();
        assert_eq!(definitions.mutations.len(), 1);
        assert_eq!(definitions.input_maps.len(), 1);
        assert_eq!(definitions.output_maps.len(), 1);
    }

    #[test]
    fn test_mutation_helper_without_object_is_soft() {
        let definitions = locate_str("mutationWithClientMutationId(config)").unwrap();
        assert!(definitions.mutations.is_empty());
        assert_eq!(definitions.diagnostics.len(), 1);
    }

    #[test]
    fn test_enum_values() {
        let source = r"
const E = new GraphQLEnumType({
  name: 'E',
  values: {
    availability_desc: { value: '-availability', deprecationReason: 'lower' },
    AVAILABILITY_DESC: { value: '-availability' },
  },
})
";
        let definitions = locate_str(source).unwrap();
        let map = definitions.enum_values[0].map().unwrap();
        assert_eq!(map.kind, MapKind::EnumValues);
        assert!(map.get("availability_desc").unwrap().value.config().unwrap().deprecated);
    }

    #[test]
    fn test_field_value_shapes() {
        let source = r"
const fields: GraphQLFieldConfigMap<any, any> = {
  by_reference: SomeField,
  by_call: markdown(({ about }) => about),
  channel_id,
  'quoted_key': { type: GraphQLString },
}
";
        let definitions = locate_str(source).unwrap();
        let map = &definitions.output_maps[0];
        assert!(matches!(&map.get("by_reference").unwrap().value, FieldValue::Reference { name, .. } if name == "SomeField"));
        assert!(matches!(&map.get("by_call").unwrap().value, FieldValue::Call { callee, .. } if callee == "markdown"));
        assert!(map.get("channel_id").unwrap().shorthand);
        assert!(map.get("quoted_key").is_some());
    }

    #[test]
    fn test_nested_object_types_are_found() {
        let source = r"
const fields: GraphQLFieldConfigMap<any, any> = {
  things_connection: {
    type: new GraphQLObjectType({ name: 'X', fields: { inner_field: { type: GraphQLString } } }),
  },
}
";
        let definitions = locate_str(source).unwrap();
        assert_eq!(definitions.output_maps.len(), 2);
        assert_eq!(keys(&definitions.output_maps[0]), vec!["things_connection"]);
        assert_eq!(keys(&definitions.output_maps[1]), vec!["inner_field"]);
    }

    #[test]
    fn test_expected_config_object() {
        let error = locate_str("const T = new GraphQLObjectType(config)").unwrap_err();
        assert!(matches!(error, LocateError::ExpectedConfigObject { ref callee, .. } if callee == "GraphQLObjectType"));
    }

    #[test]
    fn test_missing_fields_property() {
        let error = locate_str("const T = new GraphQLObjectType({ name: 'T' })").unwrap_err();
        assert!(matches!(error, LocateError::MissingProperty { property: "fields", .. }));
    }

    #[test]
    fn test_method_in_field_map_is_an_error() {
        let source = "const T = new GraphQLObjectType({ name: 'T', fields: { a() {} } })";
        let error = locate_str(source).unwrap_err();
        assert!(matches!(error, LocateError::UnknownPropertyKind { kind: "method", .. }));
        assert_eq!(error.offset(), source.find("a()").unwrap());
    }
}
