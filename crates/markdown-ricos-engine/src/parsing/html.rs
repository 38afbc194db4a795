//! Recognition of standalone `<img>` HTML blocks.

use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use super::images::ImageRef;
use crate::media::looks_like_image_source;

fn img_tag_regex() -> &'static Regex {
    static IMG_TAG: OnceLock<Regex> = OnceLock::new();
    IMG_TAG.get_or_init(|| {
        Regex::new(r"(?is)^<img\b([^<>]*?)/?>$").expect("Invalid img tag regex")
    })
}

fn attribute_regex() -> &'static Regex {
    static ATTRIBUTE: OnceLock<Regex> = OnceLock::new();
    ATTRIBUTE.get_or_init(|| {
        Regex::new(r#"(?i)([a-z][a-z0-9_:-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>/]+))"#)
            .expect("Invalid attribute regex")
    })
}

/// Extracts the image from `html` if it is exactly one `<img>` tag.
///
/// The source is normally the `src` attribute, but values are checked for
/// whether they look like an image location so a tag whose `src` is empty or
/// unusable still yields the attribute that does. Anything other than a lone
/// `<img>` tag returns `None`.
pub fn img_tag<M: AsRef<str>>(html: &str, markers: &[M]) -> Option<ImageRef> {
    let html = html.trim();
    let Some(caps) = img_tag_regex().captures(html) else {
        debug!("dropping unsupported html block ({} bytes)", html.len());
        return None;
    };
    let attrs: Vec<(String, String)> = attribute_regex()
        .captures_iter(&caps[1])
        .filter_map(|attr| {
            let name = attr.get(1)?.as_str().to_ascii_lowercase();
            let value = attr.get(2).or(attr.get(3)).or(attr.get(4))?.as_str();
            Some((name, html_escape::decode_html_entities(value).into_owned()))
        })
        .collect();

    let named = |wanted: &str| {
        attrs
            .iter()
            .find(|(name, value)| name == wanted && !value.trim().is_empty())
            .map(|(_, value)| value.trim())
    };

    let src = named("src")
        .filter(|value| looks_like_image_source(value, markers))
        .or_else(|| {
            attrs
                .iter()
                .map(|(_, value)| value.trim())
                .find(|value| looks_like_image_source(value, markers))
        })
        .or_else(|| named("src"))?;

    let alt = named("alt").filter(|alt| *alt != src).unwrap_or_default();
    Some(ImageRef::new(alt, src))
}
