//! Source location tracking for tokens and parse errors.

/// A byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the span covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the text covered by this span, or an empty string when the
    /// span does not fall on character boundaries of `source`.
    #[must_use]
    pub fn slice<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.start..self.end).unwrap_or("")
    }

    /// Returns the 1-based `(line, column)` of the span start in `source`.
    ///
    /// Columns count characters, not bytes.
    #[must_use]
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let end = self.start.min(source.len());
        let prefix = source.get(..end).unwrap_or(source);
        let line = prefix.matches('\n').count() + 1;
        let column = prefix
            .rsplit('\n')
            .next()
            .map_or(0, |tail| tail.chars().count())
            + 1;
        (line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_len_and_empty() {
        assert_eq!(Span::new(5, 10).len(), 5);
        assert!(Span::new(5, 5).is_empty());
        assert!(!Span::new(5, 10).is_empty());
    }

    #[test]
    fn test_span_slice() {
        let sql = "CREATE TABLE t";
        assert_eq!(Span::new(7, 12).slice(sql), "TABLE");
        assert_eq!(Span::new(7, 99).slice(sql), "");
    }

    #[test]
    fn test_line_col() {
        let sql = "CREATE TABLE t\n(\n    x Int32\n)";
        assert_eq!(Span::new(0, 6).line_col(sql), (1, 1));
        assert_eq!(Span::new(21, 22).line_col(sql), (3, 5));
    }
}
