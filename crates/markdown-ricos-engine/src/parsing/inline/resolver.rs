use crate::model::Decoration;
use crate::parsing::span::Span;
use crate::style::Color;

use super::{
    parser::scan_spans,
    types::{Segment, SpanKind},
};

/// Splits raw inline markdown into decorated segments.
///
/// Text between spans becomes a plain segment decorated with `base` only;
/// each span contributes its inner content decorated per its kind. Segments
/// are ordered and their `source` ranges tile the whole input, so
/// concatenating `text[segment.source]` always reproduces `text`. Input with
/// no recognised span yields exactly one plain segment equal to the input.
///
/// Never fails.
pub fn resolve(text: &str, base: Color) -> Vec<Segment> {
    let spans = scan_spans(text);
    if spans.is_empty() {
        return vec![plain(text, Span::new(0, text.len()), base)];
    }

    let mut out = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = 0;

    for span in spans {
        if span.full.start > cursor {
            out.push(plain(text, Span::new(cursor, span.full.start), base));
        }
        out.push(Segment::new(
            span.inner.slice(text),
            decorations_for(span.kind, base),
            span.full,
        ));
        cursor = span.full.end;
    }

    if cursor < text.len() {
        out.push(plain(text, Span::new(cursor, text.len()), base));
    }
    out
}

fn plain(text: &str, source: Span, base: Color) -> Segment {
    Segment::new(source.slice(text), vec![Decoration::Color(base)], source)
}

fn decorations_for(kind: SpanKind, base: Color) -> Vec<Decoration> {
    match kind {
        SpanKind::Bold => vec![Decoration::Bold, Decoration::Color(base)],
        SpanKind::Italic => vec![Decoration::Italic, Decoration::Color(base)],
        SpanKind::BoldItalic => vec![
            Decoration::Bold,
            Decoration::Italic,
            Decoration::Color(base),
        ],
        SpanKind::Link { url } => vec![
            Decoration::Color(base),
            Decoration::Link(url),
            Decoration::Underline,
        ],
    }
}
