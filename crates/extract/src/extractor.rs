//! Extraction of tagged GraphQL template literals.

use crate::{ParsedSource, SourceLocation};
use graphql_codemod_types::OffsetRange;
use swc_core::ecma::ast::{Expr, TaggedTpl};
use swc_core::ecma::visit::{Visit, VisitWith};

/// Configuration for GraphQL extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Tag identifiers that mark a template literal as GraphQL
    pub tag_identifiers: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            tag_identifiers: vec!["graphql".to_string()],
        }
    }
}

/// A GraphQL document embedded in a tagged template literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedGraphQL {
    /// The tag identifier (e.g. `graphql`)
    pub tag: String,
    /// Text of the first template segment
    pub source: String,
    /// Location of the first template segment, excluding the backticks
    pub location: SourceLocation,
    /// Range of the whole tagged template expression, tag included
    pub expression_range: OffsetRange,
    /// Whether the template contains `${...}` interpolations
    pub has_interpolations: bool,
}

impl ExtractedGraphQL {
    /// Build from a tagged template node if its tag is one of the configured
    /// GraphQL tags.
    #[must_use]
    pub fn from_tagged_template(
        parsed: &ParsedSource<'_>,
        node: &TaggedTpl,
        config: &ExtractConfig,
    ) -> Option<Self> {
        let tag = is_graphql_tag(&node.tag, config)?;
        let first = node.tpl.quasis.first()?;

        // The template span starts at the opening backtick
        let start = parsed.offset(node.tpl.span.lo.0) + 1;
        let content = OffsetRange::new(start, start + first.raw.len());

        Some(Self {
            tag: tag.to_string(),
            source: parsed.slice(content).to_string(),
            location: SourceLocation::from_range(content, parsed.line_index()),
            expression_range: parsed.range(node.span),
            has_interpolations: !node.tpl.exprs.is_empty(),
        })
    }
}

/// Returns the tag name if `tag` is a bare identifier listed in the config.
#[must_use]
pub fn is_graphql_tag<'c>(tag: &Expr, config: &'c ExtractConfig) -> Option<&'c str> {
    let Expr::Ident(ident) = tag else {
        return None;
    };
    config
        .tag_identifiers
        .iter()
        .find(|name| &*ident.sym == name.as_str())
        .map(String::as_str)
}

struct TemplateCollector<'p, 'a> {
    parsed: &'p ParsedSource<'a>,
    config: &'p ExtractConfig,
    found: Vec<ExtractedGraphQL>,
}

impl Visit for TemplateCollector<'_, '_> {
    fn visit_tagged_tpl(&mut self, node: &TaggedTpl) {
        if let Some(extracted) =
            ExtractedGraphQL::from_tagged_template(self.parsed, node, self.config)
        {
            self.found.push(extracted);
        }
        node.visit_children_with(self);
    }
}

/// Find every tagged GraphQL template in a parsed source, in source order.
#[must_use]
pub fn extract_from_source(
    parsed: &ParsedSource<'_>,
    config: &ExtractConfig,
) -> Vec<ExtractedGraphQL> {
    let mut collector = TemplateCollector {
        parsed,
        config,
        found: Vec::new(),
    };
    parsed.module().visit_with(&mut collector);
    tracing::debug!(count = collector.found.len(), "Extracted GraphQL templates");
    collector.found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_source;
    use graphql_codemod_types::{Language, Position};

    #[test]
    fn test_extract_graphql_template() {
        let source = "const q = graphql`\n  query Q { me { id } }\n`;\n";
        let parsed = parse_source(source, Language::TypeScript).unwrap();
        let found = extract_from_source(&parsed, &ExtractConfig::default());

        assert_eq!(found.len(), 1);
        let extracted = &found[0];
        assert_eq!(extracted.tag, "graphql");
        assert_eq!(extracted.source, "\n  query Q { me { id } }\n");
        assert_eq!(extracted.location.offset, source.find('`').unwrap() + 1);
        assert_eq!(extracted.location.start, Position::new(0, 18));
        assert_eq!(
            extracted.expression_range.slice(source),
            Some("graphql`\n  query Q { me { id } }\n`")
        );
        assert!(!extracted.has_interpolations);
    }

    #[test]
    fn test_ignores_other_tags() {
        let source = "const a = css`color: red;`; const b = gql`{ a }`;";
        let parsed = parse_source(source, Language::TypeScript).unwrap();
        assert!(extract_from_source(&parsed, &ExtractConfig::default()).is_empty());

        let config = ExtractConfig {
            tag_identifiers: vec!["gql".to_string()],
        };
        let found = extract_from_source(&parsed, &config);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].source, "{ a }");
    }

    #[test]
    fn test_interpolations_are_flagged() {
        let source = "const q = graphql`query { ${fragment} a }`;";
        let parsed = parse_source(source, Language::TypeScript).unwrap();
        let found = extract_from_source(&parsed, &ExtractConfig::default());
        assert_eq!(found.len(), 1);
        assert!(found[0].has_interpolations);
        assert_eq!(found[0].source, "query { ");
    }

    #[test]
    fn test_nested_in_jsx() {
        let source = "const A = () => <Q query={graphql`query A { a }`} />;";
        let parsed = parse_source(source, Language::Tsx).unwrap();
        let found = extract_from_source(&parsed, &ExtractConfig::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].source, "query A { a }");
    }
}
