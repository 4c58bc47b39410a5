//! Types relay test fixtures with the raw response types of their queries.

use crate::graphql::{graphql_name, parse_document, template_text, UNPRINTABLE_TEMPLATE};
use crate::rewrite::Rewriter;
use crate::{Codemod, CodemodContext, CodemodError, Result, SourceFile, TransformOutput};
use apollo_compiler::ast::{Definition, Directive};
use apollo_compiler::Node;
use graphql_codemod_types::OffsetRange;
use graphql_extract::ast::{
    CallExpr, Callee, Expr, ImportSpecifier, ModuleDecl, ModuleItem, ObjectLit, Prop, PropName,
    PropOrSpread,
};
use graphql_extract::{
    parse_source, ExtractConfig, ExtractedGraphQL, ParsedSource, Spanned, Visit, VisitWith,
};
use std::collections::HashSet;

const RAW_RESPONSE_TYPE: &str = "raw_response_type";

/// A test helper rendering a query against fixture data.
struct TestHelper {
    callee: &'static str,
    fixture: &'static str,
    /// Older name of the fixture option, still accepted
    deprecated_fixture: Option<&'static str>,
}

const TEST_HELPERS: &[TestHelper] = &[
    TestHelper {
        callee: "renderRelayTree",
        fixture: "mockData",
        deprecated_fixture: Some("mockResolvers"),
    },
    TestHelper {
        callee: "createTestEnv",
        fixture: "defaultData",
        deprecated_fixture: None,
    },
];

/// Adds `@raw_response_type` to the queries of relay test helpers and casts
/// their fixture data to the generated raw response type.
pub struct RelayRawResponse;

impl Codemod for RelayRawResponse {
    fn name(&self) -> &'static str {
        "relay-raw-response"
    }

    fn description(&self) -> &'static str {
        "Type relay test fixtures with the raw response types of their queries"
    }

    #[tracing::instrument(skip_all, fields(path = %file.path.display()))]
    fn transform(
        &self,
        file: &SourceFile,
        context: &CodemodContext<'_>,
    ) -> Result<TransformOutput> {
        let parsed = parse_source(&file.text, file.language)?;
        let mut rewriter = Rewriter::new(&file.text);

        let mut calls = TestHelperCalls {
            parsed: &parsed,
            file,
            extract: &context.extract,
            rewriter: &mut rewriter,
            operations: Vec::new(),
            error: None,
        };
        parsed.module().visit_with(&mut calls);
        if let Some(error) = calls.error {
            return Err(error);
        }
        let operations = calls.operations;

        let imports = import_declarations(&parsed, &operations);
        if !imports.is_empty() {
            rewriter.insert(0, imports);
        }
        Ok(rewriter.finish())
    }
}

/// Name of a plain or string-keyed property, or of a shorthand property.
fn property_key<'s>(parsed: &ParsedSource<'s>, prop: &Prop) -> Option<&'s str> {
    match prop {
        Prop::KeyValue(kv) => match &kv.key {
            PropName::Ident(_) | PropName::Str(_) => {
                Some(parsed.snippet(kv.key.span()).trim_matches(['"', '\'']))
            }
            _ => None,
        },
        Prop::Shorthand(ident) => Some(parsed.snippet(ident.span)),
        _ => None,
    }
}

fn find_property<'n>(
    parsed: &ParsedSource<'_>,
    object: &'n ObjectLit,
    name: &str,
) -> Option<&'n Prop> {
    object
        .props
        .iter()
        .filter_map(|prop| match prop {
            PropOrSpread::Prop(prop) => Some(&**prop),
            PropOrSpread::Spread(_) => None,
        })
        .find(|prop| property_key(parsed, prop) == Some(name))
}

/// Import declarations for the raw response types of `operations` that the
/// module does not import yet, most recently recorded first.
fn import_declarations(parsed: &ParsedSource<'_>, operations: &[String]) -> String {
    let imported: HashSet<&str> = parsed
        .module()
        .body
        .iter()
        .filter_map(|item| match item {
            ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => Some(import),
            _ => None,
        })
        .flat_map(|import| import.specifiers.iter())
        .filter_map(|specifier| match specifier {
            ImportSpecifier::Named(named) => Some(&*named.local.sym),
            _ => None,
        })
        .collect();

    let mut seen = HashSet::new();
    let mut imports = String::new();
    for operation in operations.iter().rev() {
        if !seen.insert(operation.as_str()) {
            continue;
        }
        let type_name = format!("{operation}RawResponse");
        if imported.contains(type_name.as_str()) {
            continue;
        }
        imports.push_str(&format!(
            "import {{ {type_name} }} from \"__generated__/{operation}.graphql\";\n"
        ));
    }
    imports
}

struct TestHelperCalls<'p, 'a> {
    parsed: &'p ParsedSource<'a>,
    file: &'p SourceFile,
    extract: &'p ExtractConfig,
    rewriter: &'p mut Rewriter<'a>,
    /// Operation names in the order they were found
    operations: Vec<String>,
    error: Option<CodemodError>,
}

impl Visit for TestHelperCalls<'_, '_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if self.error.is_some() {
            return;
        }
        if let Err(error) = self.helper_call(node) {
            self.error = Some(error);
            return;
        }
        node.visit_children_with(self);
    }
}

impl TestHelperCalls<'_, '_> {
    fn range<N: Spanned>(&self, node: &N) -> OffsetRange {
        self.parsed.node_range(node)
    }

    fn helper_call(&mut self, node: &CallExpr) -> Result<()> {
        let Callee::Expr(callee) = &node.callee else {
            return Ok(());
        };
        let Expr::Ident(ident) = &**callee else {
            return Ok(());
        };
        let Some(helper) = TEST_HELPERS
            .iter()
            .find(|helper| helper.callee == &*ident.sym)
        else {
            return Ok(());
        };
        let offset = self.range(node).start;
        let callee = || helper.callee.to_string();

        let Some(Expr::Object(options)) = node.args.first().map(|arg| &*arg.expr) else {
            return Err(CodemodError::ExpectedOptionsObject {
                callee: callee(),
                offset,
            });
        };
        let Some(query) = find_property(self.parsed, options, "query") else {
            return Err(CodemodError::MissingOption {
                property: "query",
                callee: callee(),
                offset,
            });
        };
        let Some(operation) = self.add_raw_response_type(helper, query)? else {
            return Ok(());
        };

        let fixture = if let Some(prop) = find_property(self.parsed, options, helper.fixture) {
            prop
        } else if let Some((name, prop)) = helper.deprecated_fixture.and_then(|name| {
            find_property(self.parsed, options, name).map(|prop| (name, prop))
        }) {
            let range = self.range(prop);
            self.rewriter.warn(
                format!(
                    "Update deprecated usage of {name} to use {} instead!",
                    helper.fixture
                ),
                range,
            );
            prop
        } else {
            return Err(CodemodError::MissingOption {
                property: helper.fixture,
                callee: callee(),
                offset,
            });
        };

        self.cast_fixture(fixture, &operation);
        Ok(())
    }

    /// Add the directive to every operation of the query document. Returns
    /// the name of the last named operation.
    fn add_raw_response_type(
        &mut self,
        helper: &TestHelper,
        query: &Prop,
    ) -> Result<Option<String>> {
        let extracted = match query {
            Prop::KeyValue(kv) => match &*kv.value {
                Expr::TaggedTpl(tagged) => {
                    ExtractedGraphQL::from_tagged_template(self.parsed, tagged, self.extract)
                }
                _ => None,
            },
            _ => None,
        };
        let Some(extracted) = extracted else {
            let range = self.range(query);
            self.rewriter.warn(
                format!(
                    "Skipping `{}` call whose query is not a GraphQL tagged template",
                    helper.callee
                ),
                range,
            );
            return Ok(None);
        };
        if extracted.has_interpolations {
            self.rewriter.warn(
                "Skipping GraphQL document with interpolations",
                extracted.expression_range,
            );
            return Ok(None);
        }

        let mut document = parse_document(&extracted, &self.file.path)?;
        let template_offset = extracted.location.offset;
        let mut operations = Vec::new();
        let mut last_operation = None;
        let mut added = false;

        for definition in &mut document.definitions {
            let Definition::OperationDefinition(operation) = definition else {
                continue;
            };
            match &operation.name {
                Some(name) => {
                    operations.push(name.to_string());
                    last_operation = Some(name.to_string());
                }
                None => self.rewriter.warn(
                    "Skipping typing of fixture for anonymous operation",
                    extracted.expression_range,
                ),
            }
            let present = operation
                .directives
                .0
                .iter()
                .any(|directive| directive.name.as_str() == RAW_RESPONSE_TYPE);
            if !present {
                let name = graphql_name(RAW_RESPONSE_TYPE, template_offset)?;
                operation.make_mut().directives.0.push(Node::new(Directive {
                    name,
                    arguments: Vec::new(),
                }));
                added = true;
            }
        }

        if added {
            let Some(text) = template_text(&document) else {
                self.rewriter.warn(UNPRINTABLE_TEMPLATE, extracted.expression_range);
                return Ok(None);
            };
            tracing::info!(operation = ?last_operation, "Adding @raw_response_type");
            self.rewriter.replace(
                OffsetRange::new(template_offset, template_offset + extracted.location.length),
                text,
            );
        }
        self.operations.extend(operations);
        Ok(last_operation)
    }

    fn cast_fixture(&mut self, fixture: &Prop, operation: &str) {
        let type_name = format!("{operation}RawResponse");
        if !self.file.language.is_typescript() {
            let range = self.range(fixture);
            self.rewriter
                .warn("Skipping typing of fixture in a JavaScript source", range);
            return;
        }

        let (range, literal) = match fixture {
            Prop::Shorthand(ident) => {
                let range = self.range(ident);
                let name = self.parsed.snippet(ident.span);
                self.rewriter
                    .replace(range, format!("{name}: {name} as {type_name}"));
                (range, false)
            }
            Prop::KeyValue(kv) => {
                let range = self.range(&*kv.value);
                match &*kv.value {
                    Expr::TsAs(_) => {
                        tracing::debug!(offset = range.start, "Fixture is already typed");
                        return;
                    }
                    Expr::Object(_) | Expr::Call(_) | Expr::Ident(_) => {
                        self.rewriter.insert(range.end, format!(" as {type_name}"));
                        (range, matches!(&*kv.value, Expr::Object(_)))
                    }
                    _ => {
                        self.rewriter.warn("Unexpected fixture value type", range);
                        return;
                    }
                }
            }
            other => {
                let range = self.range(other);
                self.rewriter.warn("Unexpected fixture value type", range);
                return;
            }
        };

        if !literal {
            self.rewriter.warn(
                "Usage of a value other than an object literal may pass type-checking when it \
                 isn't supposed to, be sure to check that the result is being typed and not as \
                 `any`",
                range,
            );
        }
    }
}
