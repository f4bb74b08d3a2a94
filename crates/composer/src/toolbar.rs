/// Word inserted between the delimiters when nothing is selected.
pub const PLACEHOLDER: &str = "text";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    Bold,
    Italic,
    Underline,
    Strikethrough,
}

impl Delimiter {
    pub const ALL: [Delimiter; 4] = [
        Delimiter::Bold,
        Delimiter::Italic,
        Delimiter::Underline,
        Delimiter::Strikethrough,
    ];

    pub fn marker(self) -> &'static str {
        match self {
            Delimiter::Bold => "**",
            Delimiter::Italic => "*",
            Delimiter::Underline => "__",
            Delimiter::Strikethrough => "~~",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Delimiter::Bold => "Bold",
            Delimiter::Italic => "Italic",
            Delimiter::Underline => "Underline",
            Delimiter::Strikethrough => "Strikethrough",
        }
    }

    /// One-glyph caption for a compact toolbar button.
    pub fn glyph(self) -> &'static str {
        match self {
            Delimiter::Bold => "B",
            Delimiter::Italic => "I",
            Delimiter::Underline => "U",
            Delimiter::Strikethrough => "S",
        }
    }
}

/// Char positions, `start..end`. Reversed or out-of-range values are accepted
/// and normalised by [`wrap_selection`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    fn normalized(self, len: usize) -> Self {
        let start = self.start.min(len);
        let end = self.end.min(len);
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedText {
    pub text: String,
    /// Bounds of the wrapped content, delimiters excluded.
    pub selection: Selection,
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(offset, _)| offset)
}

/// Wraps the selected part of `text` in `delimiter`, or inserts the delimiter
/// around [`PLACEHOLDER`] at the caret when the selection is empty.
pub fn wrap_selection(text: &str, selection: Selection, delimiter: Delimiter) -> WrappedText {
    let selection = selection.normalized(text.chars().count());
    let start = byte_offset(text, selection.start);
    let end = byte_offset(text, selection.end);

    let inner = if selection.is_empty() {
        PLACEHOLDER
    } else {
        &text[start..end]
    };
    let marker = delimiter.marker();

    let mut wrapped = String::with_capacity(text.len() + inner.len() + marker.len() * 2);
    wrapped.push_str(&text[..start]);
    wrapped.push_str(marker);
    wrapped.push_str(inner);
    wrapped.push_str(marker);
    wrapped.push_str(&text[end..]);

    let inner_start = selection.start + marker.chars().count();
    WrappedText {
        text: wrapped,
        selection: Selection::new(inner_start, inner_start + inner.chars().count()),
    }
}

/// Replaces the selected part of `text` with `snippet` and leaves the caret
/// after it. Used for inserting role mentions and timestamp tokens.
pub fn insert_snippet(text: &str, selection: Selection, snippet: &str) -> WrappedText {
    let selection = selection.normalized(text.chars().count());
    let start = byte_offset(text, selection.start);
    let end = byte_offset(text, selection.end);

    let mut inserted = String::with_capacity(text.len() + snippet.len());
    inserted.push_str(&text[..start]);
    inserted.push_str(snippet);
    inserted.push_str(&text[end..]);

    let caret = selection.start + snippet.chars().count();
    WrappedText {
        text: inserted,
        selection: Selection::caret(caret),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::format;

    #[test]
    fn wraps_selected_word_and_selects_inner_text() {
        let result = wrap_selection("make this bold", Selection::new(5, 9), Delimiter::Bold);
        assert_eq!(result.text, "make **this** bold");
        assert_eq!(result.selection, Selection::new(7, 11));
        let chars: String = result.text.chars().skip(7).take(4).collect();
        assert_eq!(chars, "this");
    }

    #[test]
    fn empty_selection_inserts_placeholder_at_caret() {
        let result = wrap_selection("ab", Selection::caret(1), Delimiter::Strikethrough);
        assert_eq!(result.text, "a~~text~~b");
        assert_eq!(result.selection, Selection::new(3, 7));
    }

    #[test]
    fn reversed_and_out_of_range_selections_are_normalised() {
        let reversed = wrap_selection("hello", Selection::new(4, 1), Delimiter::Italic);
        assert_eq!(reversed.text, "h*ell*o");

        let past_end = wrap_selection("hi", Selection::new(10, 40), Delimiter::Underline);
        assert_eq!(past_end.text, "hi__text__");
        assert_eq!(past_end.selection, Selection::new(4, 8));
    }

    #[test]
    fn selections_count_chars_not_bytes() {
        let result = wrap_selection("héllo wörld", Selection::new(6, 11), Delimiter::Bold);
        assert_eq!(result.text, "héllo **wörld**");
        assert_eq!(result.selection, Selection::new(8, 13));
    }

    #[test]
    fn snippet_replaces_selection_and_moves_caret_past_it() {
        let result = insert_snippet("ping X now", Selection::new(5, 6), "<@&42>");
        assert_eq!(result.text, "ping <@&42> now");
        assert_eq!(result.selection, Selection::caret(11));

        let appended = insert_snippet("é", Selection::caret(99), " <t:1:R>");
        assert_eq!(appended.text, "é <t:1:R>");
        assert_eq!(appended.selection, Selection::caret(9));
    }

    #[test]
    fn wrapped_text_formats_with_the_matching_style() {
        for delimiter in Delimiter::ALL {
            let result = wrap_selection("x", Selection::new(0, 1), delimiter);
            let formatted = format(&result.text).unwrap();
            let span = &formatted.lines()[0][0];
            assert_eq!(span.text, "x");
            assert!(!span.style.is_plain(), "{delimiter:?} left text plain");
        }
    }
}
