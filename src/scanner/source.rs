//! Character-level source access
//!
//! [`SourceStream`] is the pull-based character source underneath the lexer.
//! It tracks the line and column of the most recently consumed character and
//! offers a bounded, non-destructive lookahead via [`SourceStream::peek`].
//!
//! End-of-input policy: `next` returns `None` once the input is exhausted.
//! No sentinel characters are used; end of input only ever surfaces to the
//! parser as a real `Eof` token produced by the lexer.

use std::sync::Arc;

use crate::scanner::token::Position;

/// A pull-based character source over one translation unit.
pub struct SourceStream {
    file: Arc<str>,
    chars: Vec<char>,
    position: usize,
    line: u32,
    column: u32,
}

impl SourceStream {
    /// Create a stream over the given source text. `file` is the name used
    /// in every [`Position`] derived from this stream.
    pub fn new(file: &str, text: &str) -> Self {
        Self {
            file: Arc::from(file),
            chars: text.chars().collect(),
            position: 0,
            line: 1,
            column: 0,
        }
    }

    /// Whether another character can be consumed.
    pub fn has_next(&self) -> bool {
        self.position < self.chars.len()
    }

    /// Consume and return the next character, or `None` at end of input.
    ///
    /// Consuming `'\n'` increments the line and resets the column to 0;
    /// any other character increments the column.
    pub fn next(&mut self) -> Option<char> {
        let ch = *self.chars.get(self.position)?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Look at the next `n` characters without consuming them. Returns fewer
    /// than `n` characters near the end of input. Neither the consumption
    /// state nor the line/column tracking is perturbed.
    pub fn peek(&self, n: usize) -> &[char] {
        let end = (self.position + n).min(self.chars.len());
        &self.chars[self.position..end]
    }

    /// Look at the next character without consuming it.
    pub fn peek_char(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    /// Position of the most recently consumed character.
    pub fn position(&self) -> Position {
        Position::new(Arc::clone(&self.file), self.line, self.column)
    }

    /// Position the next character will have once consumed. At end of input
    /// this is one column past the last character, which is where the `Eof`
    /// token is reported.
    pub fn peek_position(&self) -> Position {
        match self.peek_char() {
            Some('\n') => Position::new(Arc::clone(&self.file), self.line + 1, 0),
            _ => Position::new(Arc::clone(&self.file), self.line, self.column + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consumes_in_order() {
        let mut source = SourceStream::new("test.sst", "ab");
        assert!(source.has_next());
        assert_eq!(source.next(), Some('a'));
        assert_eq!(source.next(), Some('b'));
        assert!(!source.has_next());
        assert_eq!(source.next(), None);
        assert_eq!(source.next(), None);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut source = SourceStream::new("test.sst", "class");
        assert_eq!(source.peek(3), ['c', 'l', 'a']);
        assert_eq!(source.peek(3), ['c', 'l', 'a']);

        let before = source.position();
        source.peek(5);
        assert_eq!(source.position(), before);
        assert_eq!(source.next(), Some('c'));
    }

    #[test]
    fn test_peek_truncates_at_end() {
        let source = SourceStream::new("test.sst", "ab");
        assert_eq!(source.peek(10), ['a', 'b']);
        assert_eq!(SourceStream::new("test.sst", "").peek(1), []);
    }

    #[test]
    fn test_line_column_tracking() {
        let mut source = SourceStream::new("test.sst", "ab\ncd");

        source.next();
        assert_eq!((source.position().line, source.position().column), (1, 1));
        source.next();
        assert_eq!((source.position().line, source.position().column), (1, 2));
        source.next(); // '\n'
        assert_eq!((source.position().line, source.position().column), (2, 0));
        source.next();
        assert_eq!((source.position().line, source.position().column), (2, 1));
    }

    #[test]
    fn test_peek_position() {
        let mut source = SourceStream::new("test.sst", "a\nb");
        assert_eq!(source.peek_position().column, 1);
        source.next();
        // next char is the newline; its consumption starts line 2
        assert_eq!(source.peek_position().line, 2);
        source.next();
        assert_eq!((source.peek_position().line, source.peek_position().column), (2, 1));
    }
}
