//! Image source classification.
//!
//! An image source is either an asset already hosted by the media platform
//! (referenced by its id) or an arbitrary external URL.

use serde::{Deserialize, Serialize};

use crate::style::DEFAULT_HOSTED_MEDIA_MARKER;

const URL_SCHEMES: [&str; 3] = ["http://", "https://", "//"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageReference {
    /// A platform-managed asset identifier.
    Hosted { id: String },
    /// Any other URL, used as-is.
    External { url: String },
}

impl ImageReference {
    pub fn hosted(id: impl Into<String>) -> Self {
        Self::Hosted { id: id.into() }
    }

    pub fn external(url: impl Into<String>) -> Self {
        Self::External { url: url.into() }
    }
}

/// Classifies `src` using the default hosted-media marker.
pub fn classify(src: &str) -> ImageReference {
    classify_with(src, &[DEFAULT_HOSTED_MEDIA_MARKER])
}

/// Classifies `src`, checked in order:
///
/// 1. a hosted-media marker followed by a path segment yields that segment
///    as the hosted id;
/// 2. a source without a URL scheme is itself a hosted id;
/// 3. anything else is an external URL.
pub fn classify_with<M: AsRef<str>>(src: &str, markers: &[M]) -> ImageReference {
    let src = src.trim();

    if let Some(id) = markers
        .iter()
        .find_map(|marker| hosted_segment(src, marker.as_ref()))
    {
        return ImageReference::hosted(id);
    }

    if !has_url_scheme(src) {
        return ImageReference::hosted(src);
    }

    ImageReference::external(src)
}

/// True when `src` starts with one of the recognised URL scheme prefixes.
pub fn has_url_scheme(src: &str) -> bool {
    URL_SCHEMES.iter().any(|scheme| {
        src.get(..scheme.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
    })
}

/// Heuristic used when attribute names can't be trusted: does this value
/// look like something an image could be loaded from?
pub fn looks_like_image_source<M: AsRef<str>>(value: &str, markers: &[M]) -> bool {
    let value = value.trim();
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return false;
    }
    has_url_scheme(value)
        || markers.iter().any(|m| value.contains(m.as_ref()))
        || has_image_extension(value)
}

fn has_image_extension(value: &str) -> bool {
    const EXTENSIONS: [&str; 7] = [".png", ".jpg", ".jpeg", ".gif", ".webp", ".svg", ".bmp"];
    let path = value.split(['?', '#']).next().unwrap_or(value);
    let lower = path.to_ascii_lowercase();
    EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

fn hosted_segment<'a>(src: &'a str, marker: &str) -> Option<&'a str> {
    let (_, rest) = src.split_once(marker)?;
    let segment = rest.split(['/', '?', '#']).next()?;
    (!segment.is_empty()).then_some(segment)
}
