//! # Inline Decoration
//!
//! Turns raw inline markdown (`**bold**`, `*italic*`, `***both***`,
//! `[text](url)`) into an ordered, gap-free list of decorated [`Segment`]s.
//!
//! ## Modules
//!
//! - **`types`**: `SpanKind`, `InlineSpan` and the output `Segment`
//! - **`kinds`**: delimiter ownership for emphasis and links
//! - **`cursor`**: byte cursor used by the scanners
//! - **`parser`**: `scan_spans()`, the precedence-ordered span scanner
//! - **`resolver`**: `resolve()`, spans to decorated segments
//!
//! ## Precedence
//!
//! Bold-italic beats bold, bold beats italic, italic beats links. A span is
//! only accepted if no higher-precedence span already claimed any of its
//! bytes, so `[**x**](u)` yields bold `x` between two plain runs rather than
//! a link. Formatting nested inside link text is not supported.

pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod resolver;
pub mod types;

pub use parser::scan_spans;
pub use resolver::resolve;
pub use types::{InlineSpan, Segment, SpanKind};
