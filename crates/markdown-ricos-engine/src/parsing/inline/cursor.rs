/// A byte cursor over an inline string.
///
/// Delimiters are all ASCII, so every position the scanners stop at to slice
/// is a character boundary even though the cursor moves byte by byte.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Returns the current byte position.
    pub fn pos(&self) -> usize {
        self.i
    }

    /// Returns true if at end of string.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.byte_at(self.i)
    }

    pub fn byte_at(&self, i: usize) -> Option<u8> {
        self.s.as_bytes().get(i).copied()
    }

    /// The byte just before the cursor, if any.
    pub fn prev(&self) -> Option<u8> {
        self.i.checked_sub(1).and_then(|i| self.byte_at(i))
    }

    /// The character ending just before byte `i`.
    pub fn char_before(&self, i: usize) -> Option<char> {
        self.s.get(..i)?.chars().next_back()
    }

    /// The character starting at byte `i`.
    pub fn char_at(&self, i: usize) -> Option<char> {
        self.s.get(i..)?.chars().next()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.starts_with_at(self.i, pat)
    }

    pub fn starts_with_at(&self, i: usize, pat: &[u8]) -> bool {
        self.s
            .as_bytes()
            .get(i..)
            .is_some_and(|rest| rest.starts_with(pat))
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Moves to byte `i`, clamped to the end of input.
    pub fn seek(&mut self, i: usize) {
        self.i = i.min(self.s.len());
    }
}

/// Memoised search for the first match on a line at or after some offset.
///
/// The last answer is reused while queries move forward inside the range it
/// covers, so a left-to-right series of queries with the same predicate
/// examines each byte at most once.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineSearch {
    last: Option<Searched>,
    /// Bytes examined so far.
    pub examined: usize,
}

#[derive(Debug, Clone, Copy)]
enum Searched {
    /// The first match at or after `from` is `at`.
    Hit { from: usize, at: usize },
    /// Nothing in `from..until` matches; `until` is the line end.
    Miss { from: usize, until: usize },
}

impl LineSearch {
    /// First offset `j >= from` on the same line for which `is_match(j)` holds.
    ///
    /// `is_match` must be the same predicate on every call.
    pub fn find(
        &mut self,
        cur: &Cursor<'_>,
        from: usize,
        is_match: impl Fn(usize) -> bool,
    ) -> Option<usize> {
        match self.last {
            Some(Searched::Hit { from: start, at }) if (start..=at).contains(&from) => {
                return Some(at);
            }
            Some(Searched::Miss { from: start, until }) if (start..until).contains(&from) => {
                return None;
            }
            _ => {}
        }

        let bytes = cur.s.as_bytes();
        let mut j = from;
        while j < bytes.len() && bytes[j] != b'\n' {
            self.examined += 1;
            if is_match(j) {
                self.last = Some(Searched::Hit { from, at: j });
                return Some(j);
            }
            j += 1;
        }
        self.last = Some(Searched::Miss { from, until: j });
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new("hello");
        assert_eq!(cur.pos(), 0);
        assert!(!cur.eof());
        assert_eq!(cur.peek(), Some(b'h'));
        assert_eq!(cur.prev(), None);
        assert_eq!(cur.bump(), Some(b'h'));
        assert_eq!(cur.pos(), 1);
        assert_eq!(cur.prev(), Some(b'h'));
    }

    #[test]
    fn starts_with_pattern_longer_than_remaining() {
        let mut cur = Cursor::new("ab");
        assert!(!cur.starts_with(b"abcdef"));
        cur.bump();
        assert!(!cur.starts_with(b"bc"));
        assert!(cur.starts_with(b"b"));
    }

    #[test]
    fn starts_with_at_eof() {
        let mut cur = Cursor::new("ab");
        cur.seek(2);
        assert!(cur.eof());
        assert!(cur.starts_with(b""));
        assert!(!cur.starts_with(b"a"));
    }

    #[test]
    fn seek_clamps_to_end() {
        let mut cur = Cursor::new("hi");
        cur.seek(10);
        assert!(cur.eof());
        assert_eq!(cur.pos(), 2);
        assert_eq!(cur.bump(), None);
    }

    #[test]
    fn chars_around_multibyte_text() {
        let cur = Cursor::new("é_x");
        assert_eq!(cur.char_before(2), Some('é'));
        assert_eq!(cur.char_at(3), Some('x'));
        assert_eq!(cur.char_before(1), None);
        assert_eq!(cur.char_before(0), None);
    }

    fn star_at(cur: &Cursor<'_>) -> impl Fn(usize) -> bool {
        move |j| cur.byte_at(j) == Some(b'*')
    }

    #[test]
    fn line_search_stops_at_newline() {
        let cur = Cursor::new("a*b\nc*");
        assert_eq!(LineSearch::default().find(&cur, 0, star_at(&cur)), Some(1));
        assert_eq!(LineSearch::default().find(&cur, 2, star_at(&cur)), None);
        assert_eq!(LineSearch::default().find(&cur, 4, star_at(&cur)), Some(5));
    }

    #[test]
    fn line_search_reuses_answers_for_forward_queries() {
        let cur = Cursor::new("abcdefgh*ij\nk*");
        let mut search = LineSearch::default();
        for from in 0..=8 {
            assert_eq!(search.find(&cur, from, star_at(&cur)), Some(8));
        }
        assert_eq!(search.examined, 9);

        for from in 9..11 {
            assert_eq!(search.find(&cur, from, star_at(&cur)), None);
        }
        assert_eq!(search.examined, 11);

        assert_eq!(search.find(&cur, 12, star_at(&cur)), Some(13));
    }

    #[test]
    fn line_search_reads_each_byte_once_on_a_long_line() {
        let text = "x ".repeat(5000);
        let cur = Cursor::new(&text);
        let mut search = LineSearch::default();
        for from in 0..text.len() {
            assert_eq!(search.find(&cur, from, star_at(&cur)), None);
        }
        assert_eq!(search.examined, text.len());
    }
}
