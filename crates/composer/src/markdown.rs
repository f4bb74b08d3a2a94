//! The four-delimiter markdown subset the platform renders in message bodies.
//!
//! Each delimiter is one global, non-greedy, left-to-right pass over the text
//! (bold, then italic, then underline, then strikethrough). The text is kept
//! as a token stream; a pass turns matched delimiters into style markers, and
//! markers are never delimiters for a later pass. Overlapping or unbalanced
//! delimiters resolve purely by that pass order.

use std::sync::OnceLock;

use regex::Regex;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SpanStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
}

impl SpanStyle {
    pub const PLAIN: SpanStyle = SpanStyle {
        bold: false,
        italic: false,
        underline: false,
        strikethrough: false,
    };

    pub fn is_plain(&self) -> bool {
        *self == Self::PLAIN
    }

    fn set(&mut self, kind: Style, on: bool) {
        match kind {
            Style::Bold => self.bold = on,
            Style::Italic => self.italic = on,
            Style::Underline => self.underline = on,
            Style::Strikethrough => self.strikethrough = on,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: SpanStyle::PLAIN,
        }
    }
}

/// Formatted text as lines of styled spans. A line may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkedUpText {
    lines: Vec<Vec<Span>>,
}

impl MarkedUpText {
    pub fn lines(&self) -> &[Vec<Span>] {
        &self.lines
    }

    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.lines.iter().flatten()
    }

    /// The visible text with styling dropped, lines joined by `\n`.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.iter().map(|span| span.text.as_str()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn from_tokens(tokens: &[Token]) -> Self {
        let mut lines = Vec::new();
        let mut line = Vec::new();
        let mut buffer = String::new();
        let mut style = SpanStyle::PLAIN;

        for token in tokens {
            match *token {
                Token::Char('\n') => {
                    flush(&mut buffer, style, &mut line);
                    lines.push(std::mem::take(&mut line));
                }
                Token::Char(ch) => buffer.push(ch),
                Token::Open(kind) | Token::Close(kind) => {
                    flush(&mut buffer, style, &mut line);
                    style.set(kind, matches!(token, Token::Open(_)));
                }
            }
        }
        flush(&mut buffer, style, &mut line);
        lines.push(line);

        Self { lines }
    }
}

fn flush(buffer: &mut String, style: SpanStyle, line: &mut Vec<Span>) {
    if buffer.is_empty() {
        return;
    }
    line.push(Span {
        text: std::mem::take(buffer),
        style,
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Bold,
    Italic,
    Underline,
    Strikethrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Char(char),
    Open(Style),
    Close(Style),
}

// Stand-in for a marker while a pass matches. Any character other than a
// delimiter or a newline behaves the same; matches map back by position.
const MARKER_STAND_IN: char = '\u{FFFC}';

struct Pass {
    pattern: Regex,
    style: Style,
}

impl Pass {
    fn apply(&self, tokens: Vec<Token>) -> Vec<Token> {
        let mut haystack = String::with_capacity(tokens.len());
        // Byte offset of each token, plus one trailing entry for the end.
        let mut offsets = Vec::with_capacity(tokens.len() + 1);
        for token in &tokens {
            offsets.push(haystack.len());
            haystack.push(match token {
                Token::Char(ch) => *ch,
                Token::Open(_) | Token::Close(_) => MARKER_STAND_IN,
            });
        }
        offsets.push(haystack.len());
        let index_of = |offset: usize| offsets.partition_point(|&start| start < offset);

        let mut out = Vec::with_capacity(tokens.len());
        let mut cursor = 0;
        for caps in self.pattern.captures_iter(&haystack) {
            let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let (start, end) = (index_of(whole.start()), index_of(whole.end()));
            let (inner_start, inner_end) = (index_of(inner.start()), index_of(inner.end()));
            out.extend_from_slice(&tokens[cursor..start]);
            out.push(Token::Open(self.style));
            out.extend_from_slice(&tokens[inner_start..inner_end]);
            out.push(Token::Close(self.style));
            cursor = end;
        }
        out.extend_from_slice(&tokens[cursor..]);
        out
    }
}

fn passes() -> &'static [Pass] {
    static PASSES: OnceLock<Vec<Pass>> = OnceLock::new();
    PASSES.get_or_init(|| {
        [
            (r"\*\*(.+?)\*\*", Style::Bold),
            (r"\*(.+?)\*", Style::Italic),
            (r"__(.+?)__", Style::Underline),
            (r"~~(.+?)~~", Style::Strikethrough),
        ]
        .into_iter()
        .filter_map(|(pattern, style)| {
            Regex::new(pattern).ok().map(|pattern| Pass { pattern, style })
        })
        .collect()
    })
}

/// Formats `text` with the markdown subset. Only empty input yields `None`;
/// every character of non-empty input is kept.
pub fn format(text: &str) -> Option<MarkedUpText> {
    if text.is_empty() {
        return None;
    }

    let tokens = passes()
        .iter()
        .fold(text.chars().map(Token::Char).collect::<Vec<_>>(), |tokens, pass| {
            pass.apply(tokens)
        });

    Some(MarkedUpText::from_tokens(&tokens))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styled(text: &str, apply: impl FnOnce(&mut SpanStyle)) -> Span {
        let mut style = SpanStyle::PLAIN;
        apply(&mut style);
        Span {
            text: text.to_string(),
            style,
        }
    }

    #[test]
    fn empty_input_has_no_markup() {
        assert_eq!(format(""), None);
    }

    #[test]
    fn bold_then_literal_then_italic() {
        let text = format("**hi** and *there*").unwrap();
        assert_eq!(
            text.lines(),
            &[vec![
                styled("hi", |s| s.bold = true),
                Span::plain(" and "),
                styled("there", |s| s.italic = true),
            ]]
        );
    }

    #[test]
    fn underline_and_strikethrough() {
        let text = format("__under__ ~~gone~~").unwrap();
        assert_eq!(
            text.lines()[0],
            vec![
                styled("under", |s| s.underline = true),
                Span::plain(" "),
                styled("gone", |s| s.strikethrough = true),
            ]
        );
    }

    #[test]
    fn newlines_split_lines() {
        let text = format("one\n\n**two**").unwrap();
        assert_eq!(text.lines().len(), 3);
        assert!(text.lines()[1].is_empty());
        assert_eq!(text.lines()[2], vec![styled("two", |s| s.bold = true)]);
        assert_eq!(text.plain_text(), "one\n\ntwo");
    }

    #[test]
    fn triple_star_resolves_by_pass_order() {
        let text = format("***x***").unwrap();
        assert_eq!(
            text.lines()[0],
            vec![styled("x", |s| {
                s.bold = true;
                s.italic = true;
            })]
        );
    }

    #[test]
    fn unmatched_delimiters_stay_literal() {
        let text = format("2 * 3 = 6").unwrap();
        assert_eq!(text.lines()[0], vec![Span::plain("2 * 3 = 6")]);
        let text = format("**open").unwrap();
        assert_eq!(text.lines()[0], vec![Span::plain("**open")]);
    }

    #[test]
    fn delimiters_do_not_span_lines() {
        let text = format("**a\nb**").unwrap();
        assert_eq!(text.plain_text(), "**a\nb**");
        assert!(text.spans().all(|span| span.style.is_plain()));
    }

    #[test]
    fn nested_styles_combine() {
        let text = format("**bold __both__**").unwrap();
        assert_eq!(
            text.lines()[0],
            vec![
                styled("bold ", |s| s.bold = true),
                styled("both", |s| {
                    s.bold = true;
                    s.underline = true;
                }),
            ]
        );
    }

    #[test]
    fn private_use_characters_are_ordinary_text() {
        let text = format("a\u{E000}b").unwrap();
        assert_eq!(text.plain_text(), "a\u{E000}b");
        let text = format("\u{E001}").unwrap();
        assert_eq!(text.lines()[0], vec![Span::plain("\u{E001}")]);
        let text = format("**\u{E000}\u{FFFC}**").unwrap();
        assert_eq!(
            text.lines()[0],
            vec![styled("\u{E000}\u{FFFC}", |s| s.bold = true)]
        );
    }

    #[test]
    fn later_passes_can_enclose_earlier_matches() {
        let text = format("*a **b** c*").unwrap();
        assert_eq!(
            text.lines()[0],
            vec![
                styled("a ", |s| s.italic = true),
                styled("b", |s| {
                    s.bold = true;
                    s.italic = true;
                }),
                styled(" c", |s| s.italic = true),
            ]
        );
    }
}
