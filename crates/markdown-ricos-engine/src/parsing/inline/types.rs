use crate::model::Decoration;
use crate::parsing::span::Span;

/// The kinds of inline span, listed in precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanKind {
    BoldItalic,
    Bold,
    Italic,
    Link { url: String },
}

/// An accepted inline span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    pub kind: SpanKind,
    /// Full span including delimiters.
    pub full: Span,
    /// Content between the delimiters (the link text for links).
    pub inner: Span,
}

/// A contiguous run of text sharing one ordered decoration list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub decorations: Vec<Decoration>,
    /// The input bytes this segment was produced from, delimiters included.
    pub source: Span,
}

impl Segment {
    pub fn new(text: impl Into<String>, decorations: Vec<Decoration>, source: Span) -> Self {
        Self {
            text: text.into(),
            decorations,
            source,
        }
    }
}
