//! Terminal rendering of a [`RenderedPreview`].

use std::fmt::Write as _;

use composer::{
    preview::{ButtonAppearance, EmbedPreview, FieldWidth},
    MarkedUpText, RenderedPreview, Rgb, Span,
};

const RESET: &str = "\x1b[0m";

pub struct TextRenderer {
    ansi: bool,
}

impl TextRenderer {
    pub fn new(ansi: bool) -> Self {
        Self { ansi }
    }

    pub fn render(&self, preview: &RenderedPreview) -> String {
        let mut out = String::new();
        let header = &preview.header;
        let _ = writeln!(
            out,
            "[{}] {} {} {}",
            header.avatar.initial,
            self.bold(&header.display_name),
            header.badge,
            header.sent_label
        );
        if let Some(url) = &header.avatar.image_url {
            let _ = writeln!(out, "    avatar: {url}");
        }

        if preview.is_empty() {
            out.push_str("    (nothing to send yet)\n");
            return out;
        }

        if let Some(content) = &preview.content {
            for line in self.marked_up(content) {
                let _ = writeln!(out, "{line}");
            }
        }
        if let Some(embed) = &preview.embed {
            self.embed(&mut out, embed);
        }
        if !preview.buttons.is_empty() {
            let row: Vec<String> = preview
                .buttons
                .iter()
                .map(|button| match button.appearance {
                    ButtonAppearance::Solid { fill } => {
                        format!("{}[ {} ]{}", self.fg(fill), button.label, self.reset())
                    }
                    ButtonAppearance::Outline { text, .. } => {
                        format!("{}( {} ↗ ){}", self.fg(text), button.label, self.reset())
                    }
                })
                .collect();
            let _ = writeln!(out, "{}", row.join(" "));
        }
        out
    }

    fn embed(&self, out: &mut String, embed: &EmbedPreview) {
        let bar = format!("{}┃{}", self.fg(embed.accent), self.reset());
        let mut line = |text: &str| {
            let _ = writeln!(out, "{bar} {text}");
        };

        if let Some(author) = &embed.author {
            line(&self.bold(&author.name));
        }
        if let Some(title) = &embed.title {
            for text in self.marked_up(title) {
                line(&self.bold(&text));
            }
        }
        if let Some(description) = &embed.description {
            for text in self.marked_up(description) {
                line(&text);
            }
        }

        let mut pending_half: Vec<String> = Vec::new();
        for field in &embed.fields {
            let cell = format!(
                "{}: {}",
                self.bold(&field.name.plain_text()),
                self.marked_up(&field.value).join(" ")
            );
            match field.width {
                FieldWidth::Half => pending_half.push(cell),
                FieldWidth::Full => {
                    if !pending_half.is_empty() {
                        line(&pending_half.join("  |  "));
                        pending_half.clear();
                    }
                    line(&cell);
                }
            }
        }
        if !pending_half.is_empty() {
            line(&pending_half.join("  |  "));
        }

        if let Some(url) = &embed.thumbnail_url {
            line(&format!("thumbnail: {url}"));
        }
        if let Some(url) = &embed.image_url {
            line(&format!("image: {url}"));
        }
        if let Some(footer) = &embed.footer {
            line(&footer.to_string());
        }
    }

    fn marked_up(&self, text: &MarkedUpText) -> Vec<String> {
        text.lines()
            .iter()
            .map(|spans| spans.iter().map(|span| self.span(span)).collect())
            .collect()
    }

    fn span(&self, span: &Span) -> String {
        if !self.ansi || span.style.is_plain() {
            return span.text.clone();
        }
        let mut codes = Vec::new();
        if span.style.bold {
            codes.push("1");
        }
        if span.style.italic {
            codes.push("3");
        }
        if span.style.underline {
            codes.push("4");
        }
        if span.style.strikethrough {
            codes.push("9");
        }
        format!("\x1b[{}m{}{RESET}", codes.join(";"), span.text)
    }

    fn bold(&self, text: &str) -> String {
        if self.ansi {
            format!("\x1b[1m{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn fg(&self, color: Rgb) -> String {
        if self.ansi {
            format!("\x1b[38;2;{};{};{}m", color.0, color.1, color.2)
        } else {
            String::new()
        }
    }

    fn reset(&self) -> &'static str {
        if self.ansi {
            RESET
        } else {
            ""
        }
    }
}
