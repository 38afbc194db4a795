use log::trace;

use crate::parsing::span::Span;

use super::{
    cursor::{Cursor, LineSearch},
    kinds::{Delimiter, Emphasis, Link},
    types::{InlineSpan, SpanKind},
};

/// Finds every accepted inline span in `s`, sorted by start offset.
///
/// Kinds are scanned in precedence order: bold-italic, bold, italic, link.
/// Each scan walks left to right; a candidate is accepted only when its full
/// range is disjoint from every span already claimed, and claims accumulate
/// across kinds. A scan that lands inside a claimed range jumps past it.
///
/// Accepted spans never overlap, so no two share a start offset.
pub fn scan_spans(s: &str) -> Vec<InlineSpan> {
    scan_spans_counted(s).0
}

/// [`scan_spans`] together with the number of steps the scans took.
///
/// Every scan only moves forward and closer searches are memoised per
/// delimiter, so the step count is bounded by a small multiple of `s.len()`.
pub fn scan_spans_counted(s: &str) -> (Vec<InlineSpan>, usize) {
    let mut claims = vec![];
    let mut steps = 0;

    for emphasis in [Emphasis::BoldItalic, Emphasis::Bold, Emphasis::Italic] {
        let mut closers = [LineSearch::default(); 2];
        steps += scan(s, &mut claims, |cur, walk| {
            try_parse_emphasis(cur, emphasis, walk, &mut closers)
        });
        steps += closers.iter().map(|search| search.examined).sum::<usize>();
    }

    let mut link = LinkSearches::default();
    steps += scan(s, &mut claims, |cur, walk| try_parse_link(cur, walk, &mut link));
    steps += link.examined();

    (claims, steps)
}

/// Claims from earlier scans, walked left to right alongside the cursor.
struct ClaimWalk<'c> {
    claims: &'c [InlineSpan],
    next: usize,
    skipped: usize,
}

impl<'c> ClaimWalk<'c> {
    fn new(claims: &'c [InlineSpan]) -> Self {
        Self {
            claims,
            next: 0,
            skipped: 0,
        }
    }

    /// End of the claim covering `offset`, if any. Offsets never move back.
    fn covering(&mut self, offset: usize) -> Option<usize> {
        while self
            .claims
            .get(self.next)
            .is_some_and(|span| span.full.end <= offset)
        {
            self.next += 1;
            self.skipped += 1;
        }
        self.claims
            .get(self.next)
            .filter(|span| span.full.start <= offset)
            .map(|span| span.full.end)
    }

    /// True when `candidate`, starting at the last offset passed to
    /// [`Self::covering`], overlaps no claim.
    fn is_free(&self, candidate: Span) -> bool {
        self.claims
            .get(self.next)
            .is_none_or(|span| !span.full.intersects(candidate))
    }
}

/// Runs one left-to-right scan and merges its spans into `claims`, which
/// stay sorted by start offset. Returns the steps taken.
fn scan<F>(s: &str, claims: &mut Vec<InlineSpan>, mut try_parse: F) -> usize
where
    F: FnMut(&Cursor<'_>, &ClaimWalk<'_>) -> Option<InlineSpan>,
{
    let mut cur = Cursor::new(s);
    let mut walk = ClaimWalk::new(claims);
    let mut accepted = vec![];
    let mut steps = 0;

    while !cur.eof() {
        steps += 1;
        if let Some(end) = walk.covering(cur.pos()) {
            cur.seek(end);
            continue;
        }
        if let Some(span) = try_parse(&cur, &walk) {
            trace!("inline span {:?} at {:?}", span.kind, span.full);
            cur.seek(span.full.end);
            accepted.push(span);
            continue;
        }
        cur.bump();
    }
    steps += walk.skipped;

    claims.extend(accepted);
    claims.sort_by_key(|span| span.full.start);
    steps
}

fn try_parse_emphasis(
    cur: &Cursor<'_>,
    emphasis: Emphasis,
    claims: &ClaimWalk<'_>,
    closers: &mut [LineSearch],
) -> Option<InlineSpan> {
    let kind = match emphasis {
        Emphasis::BoldItalic => SpanKind::BoldItalic,
        Emphasis::Bold => SpanKind::Bold,
        Emphasis::Italic => SpanKind::Italic,
    };

    emphasis
        .delimiters()
        .iter()
        .zip(closers.iter_mut())
        .find_map(|(&delim, closer)| {
            let (full, inner) = try_delimited(cur, delim, claims, closer)?;
            Some(InlineSpan {
                kind: kind.clone(),
                full,
                inner,
            })
        })
}

/// Attempts to match `delim ... delim` starting at the cursor.
///
/// The opening run must not continue a longer run of the same byte and must
/// be followed by non-whitespace; the closing run is the first one on the
/// same line accepted by [`is_closer`]. The inner text is never empty.
/// Underscore runs additionally may not touch a word character on their
/// outer side.
fn try_delimited(
    cur: &Cursor<'_>,
    delim: Delimiter,
    claims: &ClaimWalk<'_>,
    closers: &mut LineSearch,
) -> Option<(Span, Span)> {
    if !cur.starts_with(delim.run) || cur.prev() == Some(delim.byte()) {
        return None;
    }
    let start = cur.pos();
    if delim.word_bound && cur.char_before(start).is_some_and(char::is_alphanumeric) {
        return None;
    }

    let inner_start = start + delim.width();
    let first = cur.byte_at(inner_start)?;
    if first == delim.byte() || first.is_ascii_whitespace() {
        return None;
    }

    let close = closers.find(cur, inner_start + 1, |j| is_closer(cur, delim, j))?;
    let full = Span::new(start, close + delim.width());
    claims
        .is_free(full)
        .then_some((full, Span::new(inner_start, close)))
}

/// A closing run at `j`: preceded by neither whitespace nor the delimiter
/// byte, and for underscores not followed by a word character.
fn is_closer(cur: &Cursor<'_>, delim: Delimiter, j: usize) -> bool {
    if !cur.starts_with_at(j, delim.run) {
        return false;
    }
    let Some(before) = j.checked_sub(1).and_then(|i| cur.byte_at(i)) else {
        return false;
    };
    !before.is_ascii_whitespace()
        && before != delim.byte()
        && !(delim.word_bound
            && cur
                .char_at(j + delim.width())
                .is_some_and(char::is_alphanumeric))
}

#[derive(Default)]
struct LinkSearches {
    text_close: LineSearch,
    text_open: LineSearch,
    url_close: LineSearch,
}

impl LinkSearches {
    fn examined(&self) -> usize {
        self.text_close.examined + self.text_open.examined + self.url_close.examined
    }
}

/// Attempts to match `[text](url)` starting at the cursor.
///
/// Link text is taken verbatim; emphasis inside it is not resolved.
fn try_parse_link(
    cur: &Cursor<'_>,
    claims: &ClaimWalk<'_>,
    searches: &mut LinkSearches,
) -> Option<InlineSpan> {
    if cur.peek() != Some(Link::OPEN) || cur.prev() == Some(Link::IMAGE_BANG) {
        return None;
    }
    let is_byte = |byte: u8| move |j: usize| cur.byte_at(j) == Some(byte);

    let start = cur.pos();
    let text_start = start + 1;
    let text_end = searches
        .text_close
        .find(cur, text_start, is_byte(Link::TEXT_CLOSE))?;
    let nested = searches
        .text_open
        .find(cur, text_start, is_byte(Link::OPEN));
    if text_end == text_start || nested.is_some_and(|open| open < text_end) {
        return None;
    }

    if cur.byte_at(text_end + 1) != Some(Link::URL_OPEN) {
        return None;
    }
    let url_start = text_end + 2;
    let url_end = searches
        .url_close
        .find(cur, url_start, is_byte(Link::URL_CLOSE))?;

    let full = Span::new(start, url_end + 1);
    if !claims.is_free(full) {
        return None;
    }
    let url = link_destination(&cur.s[url_start..url_end])?;
    Some(InlineSpan {
        kind: SpanKind::Link { url },
        full,
        inner: Span::new(text_start, text_end),
    })
}

/// Destination part of `(url "optional title")`, without angle brackets.
fn link_destination(raw: &str) -> Option<String> {
    let dest = raw.split_whitespace().next()?;
    let dest = dest
        .strip_prefix('<')
        .and_then(|d| d.strip_suffix('>'))
        .unwrap_or(dest);
    (!dest.is_empty()).then(|| dest.to_string())
}
