//! # Inline Kinds
//!
//! Types that own the delimiters of each inline span kind. Scanners in
//! [`super::parser`] ask these types for their syntax and never hardcode
//! `*`, `_` or brackets themselves.
//!
//! - **`Emphasis`**: `***`, `**`/`__`, `*`/`_` delimiter runs
//! - **`Link`**: `[text](url)` brackets, and the `!` that turns it into an image

pub mod emphasis;
pub mod link;

pub use emphasis::{Delimiter, Emphasis};
pub use link::Link;
