//! Terminal styling for dbtree output.
//!
//! Syntax highlighting for TOML and JSON, plus the small set of colors the CLI uses for
//! headers, warnings and highlighted hierarchy leaves.

#![warn(missing_docs)]

use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// Renders TOML and JSON with 24-bit terminal colors.
pub struct Highlighter {
    /// Bundled syntax definitions.
    syntax_set: SyntaxSet,
    /// Bundled themes, loaded on first use.
    theme_set: EmbeddedLazyThemeSet,
    /// Theme for every call.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a highlighter with the Dracula theme.
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Highlights TOML.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights JSON.
    pub fn highlight_json(&self, content: &str) -> String {
        self.highlight(content, "json")
    }

    /// Highlights content by syntax extension or name; unknown syntaxes render as plain text.
    pub fn highlight(&self, content: &str, syntax_name: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension(syntax_name)
            .or_else(|| self.syntax_set.find_syntax_by_name(syntax_name))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self.theme_set.get(self.theme);
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut output: String = LinesWithEndings::from(content)
            .map(|line| {
                let ranges: Vec<(Style, &str)> = highlighter
                    .highlight_line(line, &self.syntax_set)
                    .unwrap_or_else(|_| vec![(Style::default(), line)]);
                as_24_bit_terminal_escaped(&ranges, false)
            })
            .collect();
        output.push_str(colors::RESET);
        output
    }
}

/// SGR escape sequences used by the styling helpers.
pub mod colors {
    /// Bold.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan foreground.
    pub const CYAN: &str = "\x1b[36m";
    /// Green foreground.
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow foreground.
    pub const YELLOW: &str = "\x1b[33m";
    /// Red foreground.
    pub const RED: &str = "\x1b[31m";
    /// Faint.
    pub const DIM: &str = "\x1b[2m";
    /// Highlighted leaf color, rgb(191, 99, 130).
    pub const HIGHLIGHT: &str = "\x1b[38;2;191;99;130m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Wraps `text` in the given escape codes and a trailing reset.
fn paint(codes: &[&str], text: &str) -> String {
    let mut out = codes.concat();
    out.push_str(text);
    out.push_str(colors::RESET);
    out
}

/// Section header: bold cyan.
pub fn header(text: &str) -> String {
    paint(&[colors::BOLD, colors::CYAN], text)
}

/// Field or section label: bold.
pub fn subheader(text: &str) -> String {
    paint(&[colors::BOLD], text)
}

/// Secondary detail such as counts and paths.
pub fn dim(text: &str) -> String {
    paint(&[colors::DIM], text)
}

/// Green.
pub fn success(text: &str) -> String {
    paint(&[colors::GREEN], text)
}

/// Yellow.
pub fn warning(text: &str) -> String {
    paint(&[colors::YELLOW], text)
}

/// Red.
pub fn error(text: &str) -> String {
    paint(&[colors::RED], text)
}

/// A highlighted search hit.
pub fn emphasis(text: &str) -> String {
    paint(&[colors::BOLD, colors::HIGHLIGHT], text)
}

/// A dimmed horizontal rule `width` characters wide.
pub fn rule(width: usize) -> String {
    dim(&"\u{2500}".repeat(width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_wraps_and_resets() {
        assert_eq!(warning("careful"), "\x1b[33mcareful\x1b[0m");
        assert_eq!(header("x"), "\x1b[1m\x1b[36mx\x1b[0m");
    }

    #[test]
    fn test_highlighter_toml() {
        let hl = Highlighter::new();
        let output = hl.highlight_toml("[source]\ndatabase = \"Hosp\"\n");
        assert!(output.contains("\x1b["));
        assert!(output.contains("Hosp"));
        assert!(output.ends_with(colors::RESET));
    }

    #[test]
    fn test_highlighter_json() {
        let hl = Highlighter::new();
        let output = hl.highlight_json("{\"pid\": \"001\"}\n");
        assert!(output.contains("\x1b["));
        assert!(output.contains("001"));
    }

    #[test]
    fn test_unknown_syntax_keeps_text() {
        let hl = Highlighter::new();
        let output = hl.highlight("plain words\n", "no-such-syntax");
        assert!(output.contains("plain words"));
    }

    #[test]
    fn test_emphasis_uses_highlight_color() {
        let e = emphasis("PID: 001");
        assert!(e.starts_with(colors::BOLD));
        assert!(e.contains(colors::HIGHLIGHT));
        assert!(e.contains("PID: 001"));
        assert!(e.ends_with(colors::RESET));
    }

    #[test]
    fn test_header_formatting() {
        let h = header("Hierarchy");
        assert!(h.contains(colors::CYAN));
        assert!(h.contains("Hierarchy"));
    }

    #[test]
    fn test_rule_width() {
        assert_eq!(rule(3), dim("───"));
    }

    #[test]
    fn test_syntaxes_available() {
        let ss = extra_syntaxes();
        assert!(ss.find_syntax_by_extension("toml").is_some());
        assert!(ss.find_syntax_by_extension("json").is_some());
    }
}
