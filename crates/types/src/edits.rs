//! Text edit types and edit application.

use crate::OffsetRange;

/// A text edit representing a change to apply to source code.
///
/// Text edits use byte offsets into the original text. All edits produced by a
/// codemod refer to the same unmodified source and are applied together by
/// [`apply_edits`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Byte offset range to replace
    pub offset_range: OffsetRange,
    /// The text to replace the range with (empty string means deletion)
    pub new_text: String,
}

impl TextEdit {
    /// Create a text edit replacing the given range.
    #[must_use]
    pub fn replace(range: OffsetRange, new_text: impl Into<String>) -> Self {
        Self {
            offset_range: range,
            new_text: new_text.into(),
        }
    }

    /// Create an insertion edit (insert text at position without removing anything).
    #[must_use]
    pub fn insert(position: usize, text: impl Into<String>) -> Self {
        Self {
            offset_range: OffsetRange::at(position),
            new_text: text.into(),
        }
    }

    /// Returns `true` if applying both edits would touch the same bytes.
    ///
    /// Insertions only conflict with edits whose range strictly surrounds them.
    #[must_use]
    pub fn conflicts_with(&self, other: &Self) -> bool {
        let a = self.offset_range;
        let b = other.offset_range;
        match (a.is_empty(), b.is_empty()) {
            (true, true) => false,
            (true, false) => b.start < a.start && a.start < b.end,
            (false, true) => a.start < b.start && b.start < a.end,
            (false, false) => a.start < b.end && b.start < a.end,
        }
    }
}

/// Result of applying a batch of edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedEdits {
    /// The rewritten text
    pub text: String,
    /// Edits that were not applied because they overlapped an earlier edit or
    /// pointed outside the text
    pub skipped: Vec<TextEdit>,
}

impl AppliedEdits {
    /// Returns `true` if the rewritten text differs from the input.
    #[must_use]
    pub fn changed(&self, original: &str) -> bool {
        self.text != original
    }
}

/// Apply edits to `source`.
///
/// Edits are accepted in the order given. An edit conflicting with one that
/// was already accepted is skipped, and exact duplicates are dropped. Insertions
/// at the same offset keep their relative order, and an insertion at the start
/// of a replaced range lands before the replacement.
#[must_use]
pub fn apply_edits(source: &str, edits: &[TextEdit]) -> AppliedEdits {
    let mut accepted: Vec<(usize, &TextEdit)> = Vec::with_capacity(edits.len());
    let mut skipped = Vec::new();

    for (index, edit) in edits.iter().enumerate() {
        let range = edit.offset_range;
        if range.start > range.end || range.slice(source).is_none() {
            skipped.push(edit.clone());
            continue;
        }
        if accepted.iter().any(|(_, existing)| *existing == edit) {
            continue;
        }
        if accepted
            .iter()
            .any(|(_, existing)| existing.conflicts_with(edit))
        {
            skipped.push(edit.clone());
            continue;
        }
        accepted.push((index, edit));
    }

    accepted.sort_by_key(|(index, edit)| (edit.offset_range.start, edit.offset_range.end, *index));

    let mut text = String::with_capacity(source.len());
    let mut cursor = 0;
    for (_, edit) in accepted {
        text.push_str(&source[cursor..edit.offset_range.start]);
        text.push_str(&edit.new_text);
        cursor = edit.offset_range.end;
    }
    text.push_str(&source[cursor..]);

    AppliedEdits { text, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(start: usize, end: usize, text: &str) -> TextEdit {
        TextEdit::replace(OffsetRange::new(start, end), text)
    }

    #[test]
    fn test_text_edit_insert() {
        let edit = TextEdit::insert(10, "inserted text");
        assert_eq!(edit.offset_range.start, 10);
        assert_eq!(edit.offset_range.end, 10);
        assert!(edit.offset_range.is_empty());
    }

    #[test]
    fn test_conflicts() {
        let replace = edit(10, 20, "x");
        assert!(replace.conflicts_with(&edit(15, 25, "y")));
        assert!(!replace.conflicts_with(&edit(20, 25, "y")));
        assert!(replace.conflicts_with(&TextEdit::insert(15, "y")));
        assert!(!replace.conflicts_with(&TextEdit::insert(10, "y")));
        assert!(!replace.conflicts_with(&TextEdit::insert(20, "y")));
        assert!(!TextEdit::insert(3, "a").conflicts_with(&TextEdit::insert(3, "b")));
    }

    #[test]
    fn test_apply_edits_in_any_order() {
        let source = "const channel_id = 1;";
        let edits = vec![edit(19, 20, "2"), edit(6, 16, "channelID")];
        let applied = apply_edits(source, &edits);
        assert_eq!(applied.text, "const channelID = 2;");
        assert!(applied.skipped.is_empty());
        assert!(applied.changed(source));
    }

    #[test]
    fn test_apply_edits_first_writer_wins() {
        let source = "abcdef";
        let edits = vec![edit(1, 4, "X"), edit(2, 5, "Y")];
        let applied = apply_edits(source, &edits);
        assert_eq!(applied.text, "aXef");
        assert_eq!(applied.skipped, vec![edit(2, 5, "Y")]);
    }

    #[test]
    fn test_apply_edits_drops_duplicates() {
        let source = "abc";
        let edits = vec![edit(0, 1, "A"), edit(0, 1, "A")];
        let applied = apply_edits(source, &edits);
        assert_eq!(applied.text, "Abc");
        assert!(applied.skipped.is_empty());
    }

    #[test]
    fn test_apply_edits_insertions_keep_order() {
        let source = "{}";
        let edits = vec![
            TextEdit::insert(1, "a"),
            TextEdit::insert(1, "b"),
            edit(1, 2, "c}"),
        ];
        let applied = apply_edits(source, &edits);
        assert_eq!(applied.text, "{abc}");
    }

    #[test]
    fn test_apply_edits_out_of_bounds_is_skipped() {
        let source = "abc";
        let applied = apply_edits(source, &[edit(2, 10, "x")]);
        assert_eq!(applied.text, "abc");
        assert_eq!(applied.skipped.len(), 1);
        assert!(!applied.changed(source));
    }

    #[test]
    fn test_apply_no_edits() {
        let applied = apply_edits("unchanged", &[]);
        assert_eq!(applied.text, "unchanged");
    }
}
