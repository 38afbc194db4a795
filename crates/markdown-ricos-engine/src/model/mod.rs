//! # Document Model
//!
//! Typed RICOS node tree produced by the converter.
//!
//! - **`decoration`**: inline text decorations (color, bold, italic, underline, link)
//! - **`node`**: `Node`, its type tag and the per-type payloads
//! - **`document`**: the root `Document` with optional metadata
//!
//! Everything here is built fresh per conversion and never mutated afterwards.
//! Serialization follows the RICOS JSON layout: `{type, id, nodes, <typeData>}`.

pub mod decoration;
pub mod document;
pub mod node;

pub use decoration::Decoration;
pub use document::{Document, DocumentStyle, Metadata};
pub use node::{
    BlockquoteData, CodeBlockData, ContainerData, ContainerWidth, DividerData, HeadingData,
    ImageData, ImageSource, ListData, Node, NodeData, NodeType, ParagraphData, TextData,
    TextStyle, WidthSize,
};
