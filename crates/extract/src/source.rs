//! Parsed TypeScript/JavaScript source.

use crate::{ExtractError, Result};
use graphql_codemod_types::{Language, LineIndex, OffsetRange};
use swc_core::common::{sync::Lrc, FileName, SourceMap, Span, Spanned};
use swc_core::ecma::ast::{EsVersion, Module};
use swc_core::ecma::parser::lexer::Lexer;
use swc_core::ecma::parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

/// A parsed source file.
///
/// Holds the original text alongside the swc module so that node spans can be
/// mapped back to byte offsets of that text.
pub struct ParsedSource<'a> {
    text: &'a str,
    language: Language,
    module: Module,
    /// Position of the first byte of `text` in the swc source map
    base: u32,
    line_index: LineIndex,
}

impl std::fmt::Debug for ParsedSource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedSource")
            .field("language", &self.language)
            .field("len", &self.text.len())
            .finish_non_exhaustive()
    }
}

impl<'a> ParsedSource<'a> {
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub const fn module(&self) -> &Module {
        &self.module
    }

    #[must_use]
    pub const fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Byte offset in the original text for a source map position.
    #[must_use]
    pub fn offset(&self, pos: u32) -> usize {
        pos.saturating_sub(self.base) as usize
    }

    /// Byte range in the original text covered by a span.
    #[must_use]
    pub fn range(&self, span: Span) -> OffsetRange {
        OffsetRange::new(self.offset(span.lo.0), self.offset(span.hi.0))
    }

    /// Byte range covered by any AST node.
    #[must_use]
    pub fn node_range<N: Spanned>(&self, node: &N) -> OffsetRange {
        self.range(node.span())
    }

    /// Source text covered by a span.
    #[must_use]
    pub fn snippet(&self, span: Span) -> &'a str {
        self.range(span).slice(self.text).unwrap_or_default()
    }

    /// Source text covered by a byte range.
    #[must_use]
    pub fn slice(&self, range: OffsetRange) -> &'a str {
        range.slice(self.text).unwrap_or_default()
    }
}

fn syntax_for(language: Language) -> Syntax {
    if language.is_typescript() {
        Syntax::Typescript(TsSyntax {
            tsx: language.allows_jsx(),
            decorators: true,
            ..Default::default()
        })
    } else {
        Syntax::Es(EsSyntax {
            jsx: language.allows_jsx(),
            decorators: true,
            ..Default::default()
        })
    }
}

/// Parse TypeScript or JavaScript source text as an ES module.
///
/// Unrecoverable syntax errors are returned as [`ExtractError::Syntax`];
/// recoverable ones are logged and parsing continues.
#[tracing::instrument(skip(text), fields(size = text.len()))]
pub fn parse_source(text: &str, language: Language) -> Result<ParsedSource<'_>> {
    let cm: Lrc<SourceMap> = Lrc::default();
    let fm = cm.new_source_file(FileName::Anon.into(), text.to_owned());
    let base = fm.start_pos.0;

    let lexer = Lexer::new(
        syntax_for(language),
        EsVersion::Es2022,
        StringInput::from(&*fm),
        None,
    );
    let mut parser = Parser::new_from(lexer);

    let module = parser.parse_module().map_err(|err| ExtractError::Syntax {
        message: err.kind().msg().into_owned(),
        offset: err.span().lo.0.saturating_sub(base) as usize,
    })?;

    for err in parser.take_errors() {
        tracing::warn!(
            offset = err.span().lo.0.saturating_sub(base),
            "Recovered from syntax error: {}",
            err.kind().msg()
        );
    }

    Ok(ParsedSource {
        text,
        language,
        module,
        base,
        line_index: LineIndex::new(text),
    })
}
