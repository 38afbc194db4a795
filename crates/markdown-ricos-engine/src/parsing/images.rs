//! Markdown image references (`![alt](src)`) inside paragraph text.

use std::sync::OnceLock;

use regex::Regex;

/// An image reference found in markdown or HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub alt: String,
    pub src: String,
}

impl ImageRef {
    pub fn new(alt: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            alt: alt.into(),
            src: src.into(),
        }
    }
}

/// A paragraph split at its image references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParagraphPart {
    Text(String),
    Image(ImageRef),
}

fn image_regex() -> &'static Regex {
    static IMAGE_REGEX: OnceLock<Regex> = OnceLock::new();
    IMAGE_REGEX.get_or_init(|| {
        Regex::new(r#"!\[([^\]\n]*)\]\(\s*<?([^)\s>]+)>?(?:\s+"[^"\n]*")?\s*\)"#)
            .expect("Invalid image regex")
    })
}

/// Returns the image if `text` consists of exactly one image reference.
pub fn single_image(text: &str) -> Option<ImageRef> {
    let text = text.trim();
    let caps = image_regex().captures(text)?;
    let whole = caps.get(0)?;
    if whole.start() != 0 || whole.end() != text.len() {
        return None;
    }
    Some(ImageRef::new(&caps[1], &caps[2]))
}

/// Splits `text` at every image reference, left to right.
///
/// Text runs are trimmed and empty runs are dropped. Returns `None` when the
/// text contains no image at all.
pub fn split_images(text: &str) -> Option<Vec<ParagraphPart>> {
    let mut parts = Vec::new();
    let mut cursor = 0;
    let mut found = false;

    for caps in image_regex().captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        found = true;
        push_text(&mut parts, &text[cursor..whole.start()]);
        parts.push(ParagraphPart::Image(ImageRef::new(&caps[1], &caps[2])));
        cursor = whole.end();
    }

    if !found {
        return None;
    }
    push_text(&mut parts, &text[cursor..]);
    Some(parts)
}

fn push_text(parts: &mut Vec<ParagraphPart>, run: &str) {
    let run = run.trim();
    if !run.is_empty() {
        parts.push(ParagraphPart::Text(run.to_string()));
    }
}
