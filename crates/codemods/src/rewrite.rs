//! Collecting text edits and diagnostics for one file.
//!
//! Codemods never re-print the host source. They record replacements,
//! insertions and removals against byte ranges of the original text and
//! apply them in one pass when done, so everything outside the edited
//! ranges keeps its formatting.

use crate::TransformOutput;
use graphql_codemod_types::{apply_edits, Diagnostic, OffsetRange, Severity, TextEdit};
use graphql_schema_def::ConfigProp;

pub(crate) struct Rewriter<'a> {
    text: &'a str,
    edits: Vec<TextEdit>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Rewriter<'a> {
    pub(crate) const fn new(text: &'a str) -> Self {
        Self {
            text,
            edits: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub(crate) const fn text(&self) -> &'a str {
        self.text
    }

    pub(crate) fn replace(&mut self, range: OffsetRange, new_text: impl Into<String>) {
        self.edits.push(TextEdit::replace(range, new_text));
    }

    pub(crate) fn insert(&mut self, offset: usize, text: impl Into<String>) {
        self.edits.push(TextEdit::insert(offset, text));
    }

    pub(crate) fn push_edit(&mut self, edit: TextEdit) {
        self.edits.push(edit);
    }

    /// Remove an entry of an object literal along with its separating comma,
    /// and its line if nothing else is left on it.
    pub(crate) fn remove_entry(&mut self, range: OffsetRange) {
        let range = removal_range(self.text, range);
        self.edits.push(TextEdit::replace(range, ""));
    }

    pub(crate) fn info(&mut self, message: impl Into<String>, range: OffsetRange) {
        self.report(Diagnostic::info(message, range));
    }

    pub(crate) fn warn(&mut self, message: impl Into<String>, range: OffsetRange) {
        self.report(Diagnostic::warning(message, range));
    }

    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Info => {
                tracing::debug!(offset = diagnostic.offset_range.start, "{}", diagnostic.message);
            }
            Severity::Warning | Severity::Error => {
                tracing::warn!(offset = diagnostic.offset_range.start, "{}", diagnostic.message);
            }
        }
        self.diagnostics.push(diagnostic);
    }

    /// Add diagnostics that were already logged where they were produced.
    pub(crate) fn extend_diagnostics(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    pub(crate) fn finish(self) -> TransformOutput {
        let applied = apply_edits(self.text, &self.edits);
        for edit in &applied.skipped {
            tracing::debug!(range = %edit.offset_range, "Dropped overlapping edit");
        }
        let changed = applied.changed(self.text);
        tracing::info!(
            edits = self.edits.len() - applied.skipped.len(),
            changed,
            "Applied edits"
        );
        TransformOutput {
            source: applied.text,
            diagnostics: self.diagnostics,
            changed,
        }
    }
}

fn line_start(text: &str, offset: usize) -> usize {
    text.get(..offset)
        .and_then(|before| before.rfind('\n'))
        .map_or(0, |newline| newline + 1)
}

/// Leading whitespace of the line containing `offset`.
pub(crate) fn line_indent(text: &str, offset: usize) -> &str {
    let line = text.get(line_start(text, offset)..).unwrap_or_default();
    let width = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..width]
}

fn skip_inline_whitespace(bytes: &[u8], mut offset: usize) -> usize {
    while matches!(bytes.get(offset), Some(b' ' | b'\t')) {
        offset += 1;
    }
    offset
}

fn skip_whitespace(bytes: &[u8], mut offset: usize) -> usize {
    while bytes.get(offset).is_some_and(u8::is_ascii_whitespace) {
        offset += 1;
    }
    offset
}

/// Range to delete when removing an object literal entry.
pub(crate) fn removal_range(text: &str, entry: OffsetRange) -> OffsetRange {
    let bytes = text.as_bytes();
    let mut end = skip_inline_whitespace(bytes, entry.end);
    if bytes.get(end) == Some(&b',') {
        end += 1;
    }
    let after = skip_inline_whitespace(bytes, end);

    let start = line_start(text, entry.start);
    let alone_on_line = text
        .get(start..entry.start)
        .is_some_and(|before| before.trim().is_empty());
    if alone_on_line {
        match bytes.get(after) {
            Some(b'\n') => return OffsetRange::new(start, after + 1),
            Some(b'\r') if bytes.get(after + 1) == Some(&b'\n') => {
                return OffsetRange::new(start, after + 2);
            }
            _ => {}
        }
    }
    OffsetRange::new(entry.start, after)
}

/// Edit appending `property` after the last property of an object literal.
///
/// Multi-line objects get the property on its own line, indented like the
/// last property. An existing trailing comma is kept.
pub(crate) fn append_property(
    text: &str,
    object: OffsetRange,
    props: &[ConfigProp],
    property: &str,
) -> TextEdit {
    let Some(last) = props.last() else {
        let inner = OffsetRange::new(object.start + 1, object.end.saturating_sub(1));
        if inner.slice(text).is_some_and(|inside| inside.trim().is_empty()) {
            return TextEdit::replace(inner, format!(" {property} "));
        }
        return TextEdit::insert(object.start + 1, format!(" {property},"));
    };

    let bytes = text.as_bytes();
    let after = skip_whitespace(bytes, last.range.end);
    let trailing_comma = bytes.get(after) == Some(&b',');
    let multiline = text
        .get(object.start..last.range.start)
        .is_some_and(|before| before.contains('\n'));

    match (multiline, trailing_comma) {
        (true, true) => {
            let indent = line_indent(text, last.range.start);
            TextEdit::insert(after + 1, format!("\n{indent}{property},"))
        }
        (true, false) => {
            let indent = line_indent(text, last.range.start);
            TextEdit::insert(last.range.end, format!(",\n{indent}{property}"))
        }
        (false, true) => TextEdit::insert(after + 1, format!(" {property},")),
        (false, false) => TextEdit::insert(last.range.end, format!(", {property}")),
    }
}
