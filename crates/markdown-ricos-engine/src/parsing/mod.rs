pub mod html;
pub mod images;
pub mod inline;
pub mod lexer;
pub mod span;
pub mod token;

pub use images::{ImageRef, ParagraphPart, single_image, split_images};
pub use lexer::lex;
pub use span::Span;
pub use token::{ListItem, Token, tokens_from_json};
