//! Index-based cursor over an immutable structcode
//!
//! The parser never mutates its input. Instead, a [`Cursor`] holds a borrowed
//! `&str` and a monotonically increasing byte index into it, which only ever
//! advances by whole characters.

/// Forward-only cursor over a borrowed string.
///
/// `base` is the byte offset of `input` within the top-level structcode, so
/// that nested parses can report offsets relative to the original input.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    base: usize,
}

impl<'a> Cursor<'a> {
    /// Constructs a new `Cursor` at the start of `input`
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_base(input, 0)
    }

    /// Constructs a new `Cursor` at the start of `input`, which itself begins
    /// at byte `base` of the top-level structcode.
    #[must_use]
    pub fn with_base(input: &'a str, base: usize) -> Self {
        Self { input, pos: 0, base }
    }

    /// Returns the unconsumed remainder of the input.
    #[inline]
    #[must_use]
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Returns `true` if the input has been fully consumed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Absolute byte offset of the cursor within the top-level structcode.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> usize {
        self.base + self.pos
    }

    /// Returns the next character without consuming it.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consumes and returns the next character.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consumes the next character if it is equal to `expected`.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consumes and returns the maximal prefix whose characters satisfy `pred`.
    pub fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    /// Consumes everything up to and including the next `delim`, returning the
    /// text before it.
    ///
    /// Returns `None` if there is no `delim` in the remainder; nothing is
    /// consumed in that case.
    pub fn take_until(&mut self, delim: char) -> Option<&'a str> {
        let rest = self.rest();
        let len = rest.find(delim)?;
        self.pos += len + delim.len_utf8();
        Some(&rest[..len])
    }

    /// Consumes and returns the whole remainder.
    pub fn take_rest(&mut self) -> &'a str {
        let rest = self.rest();
        self.pos = self.input.len();
        rest
    }

    /// Scans for the `close` that balances an `open` the cursor has just
    /// consumed, counting nested `open`/`close` pairs along the way.
    ///
    /// On success, consumes through the closing delimiter and returns the
    /// enclosed text together with its absolute offset. Returns `None`, without
    /// consuming anything, if the remainder is unbalanced.
    pub fn take_group(&mut self, open: char, close: char) -> Option<(&'a str, usize)> {
        let rest = self.rest();
        let mut depth = 1usize;
        for (ix, c) in rest.char_indices() {
            if c == open {
                depth += 1;
            } else if c == close {
                depth -= 1;
                if depth == 0 {
                    let start = self.offset();
                    self.pos += ix + close.len_utf8();
                    return Some((&rest[..ix], start));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_and_peek() {
        let mut cur = Cursor::new("ab");
        assert_eq!(cur.peek(), Some('a'));
        assert_eq!(cur.bump(), Some('a'));
        assert_eq!(cur.offset(), 1);
        assert!(cur.eat('b'));
        assert!(cur.is_empty());
        assert_eq!(cur.bump(), None);
    }

    #[test]
    fn digit_run_stops_before_paren() {
        let mut cur = Cursor::new("12(3)");
        assert_eq!(cur.take_while(|c| c.is_ascii_digit()), "12");
        assert_eq!(cur.rest(), "(3)");
    }

    #[test]
    fn groups_balance_nested() {
        let mut cur = Cursor::with_base("{i}i}d", 10);
        assert_eq!(cur.take_group('{', '}'), Some(("{i}i", 10)));
        assert_eq!(cur.rest(), "d");
        assert_eq!(cur.offset(), 16);

        let mut cur = Cursor::new("2,3");
        assert_eq!(cur.take_group('(', ')'), None);
        assert_eq!(cur.rest(), "2,3");
    }

    #[test]
    fn take_until_delim() {
        let mut cur = Cursor::new("name*rest");
        assert_eq!(cur.take_until('*'), Some("name"));
        assert_eq!(cur.rest(), "rest");
        assert_eq!(cur.take_until(':'), None);
        assert_eq!(cur.take_rest(), "rest");
        assert!(cur.is_empty());
    }
}
