use derive_more::Display;

/// 1-based line number in the source text.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Line(pub usize);

/// A position in the source text that knows which line it is on.
///
/// Cloning is cheap, so the scanner keeps one clone at the start of every
/// lexeme and slices the lexeme out once the lexeme is complete.
#[derive(Clone)]
pub struct Cursor<'a> {
    source: &'a str,
    offset: usize,
    line: Line,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, offset: 0, line: Line(1) }
    }

    pub fn line(&self) -> Line {
        self.line
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.source.len()
    }

    fn rest(&self) -> &'a str {
        &self.source[self.offset..]
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn peek_next(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    /// Consumes the next character only if it is `expected`.
    pub fn advance_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.next();
            true
        } else {
            false
        }
    }

    /// Consumes characters as long as `pred` holds.
    pub fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.next();
        }
    }

    /// The source text between `start` and this cursor.
    pub fn slice_from(&self, start: &Cursor<'a>) -> &'a str {
        debug_assert!(std::ptr::eq(self.source, start.source));
        &self.source[start.offset..self.offset]
    }
}

impl<'a> From<&'a str> for Cursor<'a> {
    fn from(source: &'a str) -> Self {
        Self::new(source)
    }
}

impl Iterator for Cursor<'_> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line.0 += 1;
        }
        Some(c)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn slice_from() {
        let mut cursor: Cursor = "ab\ncd\n\n".into();

        cursor.next(); // 'a'

        let start = cursor.clone();

        cursor.next(); // 'b'
        cursor.next(); // '\n'
        cursor.next(); // 'c'

        assert_eq!(cursor.slice_from(&start), "b\nc");
        assert_eq!(start.slice_from(&start), "");
    }

    #[test]
    fn lines_and_lookahead() {
        let mut cursor = Cursor::new("ab\ncd\n\n");

        assert_eq!(cursor.peek(), Some('a'));
        assert_eq!(cursor.peek_next(), Some('b'));
        assert_eq!(cursor.next(), Some('a'));
        assert_eq!(cursor.line(), Line(1));

        assert_eq!(cursor.next(), Some('b'));
        assert_eq!(cursor.next(), Some('\n'));
        assert_eq!(cursor.line(), Line(2));
        let start = cursor.clone();

        cursor.advance_while(|c| c != '\n');
        assert_eq!(cursor.slice_from(&start), "cd");
        assert_eq!(cursor.peek(), Some('\n'));

        assert_eq!(cursor.next(), Some('\n'));
        assert_eq!(cursor.next(), Some('\n'));
        assert_eq!(cursor.line(), Line(4));
        assert!(cursor.is_at_end());

        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.line(), Line(4));
    }

    #[test]
    fn empty_source() {
        let mut cursor: Cursor = "".into();
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.peek_next(), None);
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.line(), Line(1));
    }

    #[test]
    fn advance_if() {
        let mut cursor: Cursor = "!=".into();
        assert!(!cursor.advance_if('='));
        assert!(cursor.advance_if('!'));
        assert!(cursor.advance_if('='));
        assert!(!cursor.advance_if('='));
        assert!(cursor.is_at_end());
    }

    #[test]
    fn multibyte_characters() {
        let mut cursor: Cursor = "é\"x".into();
        let start = cursor.clone();
        assert_eq!(cursor.next(), Some('é'));
        assert_eq!(cursor.offset, 2);
        assert_eq!(cursor.slice_from(&start), "é");
        assert_eq!(cursor.peek_next(), Some('x'));
    }
}
