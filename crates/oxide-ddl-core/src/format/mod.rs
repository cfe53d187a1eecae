//! Formatting configuration and context.
//!
//! Formatting is driven by three values:
//!
//! - [`FormatSettings`]: fixed for a whole call (highlighting, layout,
//!   indent unit).
//! - [`FormatState`]: facts accumulated while writing (currently whether
//!   credentials were emitted).
//! - [`FormatFrame`]: nesting context. It is `Copy` and passed down by
//!   value, so a child can never change what its siblings see.

/// ANSI escape starting a highlighted keyword.
pub const HILITE_KEYWORD: &str = "\x1b[1m";
/// ANSI escape starting a highlighted function name.
pub const HILITE_FUNCTION: &str = "\x1b[1;33m";
/// ANSI escape resetting highlighting.
pub const HILITE_NONE: &str = "\x1b[0m";

/// Line layout of formatted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Everything on a single line.
    OneLine,
    /// Clauses on their own lines, column lists indented.
    #[default]
    MultiLine,
}

/// Formatting options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSettings {
    /// Wrap keywords and function names in ANSI escapes.
    pub highlight: bool,
    /// Line layout.
    pub layout: Layout,
    /// Number of spaces per indentation level.
    pub indent_unit: usize,
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatSettings {
    /// Multi-line layout, no highlighting, four-space indent.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            highlight: false,
            layout: Layout::MultiLine,
            indent_unit: 4,
        }
    }

    /// Single-line layout, no highlighting.
    #[must_use]
    pub const fn one_line() -> Self {
        Self::new().with_layout(Layout::OneLine)
    }

    /// Sets highlighting.
    #[must_use]
    pub const fn with_highlight(self, highlight: bool) -> Self {
        Self { highlight, ..self }
    }

    /// Sets the line layout.
    #[must_use]
    pub const fn with_layout(self, layout: Layout) -> Self {
        Self { layout, ..self }
    }

    /// Sets the indent unit.
    #[must_use]
    pub const fn with_indent_unit(self, indent_unit: usize) -> Self {
        Self {
            indent_unit,
            ..self
        }
    }

    /// Returns true for the single-line layout.
    #[must_use]
    pub const fn is_one_line(&self) -> bool {
        matches!(self.layout, Layout::OneLine)
    }

    /// Separator placed before a clause: a newline in multi-line layout,
    /// a space otherwise.
    #[must_use]
    pub const fn nl_or_ws(&self) -> &'static str {
        match self.layout {
            Layout::OneLine => " ",
            Layout::MultiLine => "\n",
        }
    }

    /// Whitespace for the indentation level of `frame`.
    #[must_use]
    pub fn indent(&self, frame: FormatFrame) -> String {
        " ".repeat(self.indent_unit * frame.indent)
    }

    /// Writes a keyword (or keyword sequence), highlighted if enabled.
    pub fn write_keyword(&self, out: &mut String, keyword: &str) {
        self.write_hilited(out, HILITE_KEYWORD, keyword);
    }

    /// Writes a function name, highlighted if enabled.
    pub fn write_function(&self, out: &mut String, name: &str) {
        self.write_hilited(out, HILITE_FUNCTION, name);
    }

    fn write_hilited(&self, out: &mut String, hilite: &str, text: &str) {
        if self.highlight {
            out.push_str(hilite);
            out.push_str(text);
            out.push_str(HILITE_NONE);
        } else {
            out.push_str(text);
        }
    }
}

/// Facts accumulated while formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatState {
    /// Set when a plain-text password was written to the output.
    pub credentials_written: bool,
}

/// Nesting context for one formatting call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatFrame {
    /// Indentation depth.
    pub indent: usize,
    /// The enclosing construct wants this node parenthesized.
    pub need_parens: bool,
}

impl FormatFrame {
    /// Returns a copy one indentation level deeper.
    #[must_use]
    pub const fn nested(self) -> Self {
        Self {
            indent: self.indent + 1,
            ..self
        }
    }

    /// Returns a copy with `need_parens` set to `need_parens`.
    #[must_use]
    pub const fn with_parens(self, need_parens: bool) -> Self {
        Self {
            need_parens,
            ..self
        }
    }
}

/// Removes ANSI highlighting escapes from formatted text.
#[must_use]
pub fn strip_highlighting(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for skipped in chars.by_ref() {
                if skipped == 'm' {
                    break;
                }
            }
        } else {
            plain.push(c);
        }
    }
    plain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = FormatSettings::default();
        assert!(!settings.highlight);
        assert_eq!(settings.layout, Layout::MultiLine);
        assert_eq!(settings.indent_unit, 4);
        assert_eq!(settings.nl_or_ws(), "\n");
    }

    #[test]
    fn test_one_line_settings() {
        let settings = FormatSettings::one_line();
        assert!(settings.is_one_line());
        assert_eq!(settings.nl_or_ws(), " ");
    }

    #[test]
    fn test_indent() {
        let settings = FormatSettings::new().with_indent_unit(2);
        let frame = FormatFrame::default().nested().nested();
        assert_eq!(settings.indent(frame), "    ");
        assert_eq!(settings.indent(FormatFrame::default()), "");
    }

    #[test]
    fn test_frame_copies_do_not_leak() {
        let outer = FormatFrame::default();
        let inner = outer.nested().with_parens(true);
        assert_eq!(outer.indent, 0);
        assert!(!outer.need_parens);
        assert_eq!(inner.indent, 1);
        assert!(inner.need_parens);
    }

    #[test]
    fn test_write_keyword_highlighting() {
        let mut plain = String::new();
        FormatSettings::new().write_keyword(&mut plain, "CREATE");
        assert_eq!(plain, "CREATE");

        let mut hilited = String::new();
        FormatSettings::new()
            .with_highlight(true)
            .write_keyword(&mut hilited, "CREATE");
        assert_eq!(hilited, "\x1b[1mCREATE\x1b[0m");
        assert_eq!(strip_highlighting(&hilited), "CREATE");
    }

    #[test]
    fn test_strip_highlighting_function() {
        let mut out = String::new();
        FormatSettings::new()
            .with_highlight(true)
            .write_function(&mut out, "MergeTree");
        out.push_str("()");
        assert_eq!(strip_highlighting(&out), "MergeTree()");
    }
}
