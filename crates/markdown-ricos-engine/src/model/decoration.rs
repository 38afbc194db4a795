use serde::Serialize;

use crate::style::Color;

/// A style attribute attached to a run of text.
///
/// The order of decorations on a segment carries no meaning; it is kept
/// stable only so rendered output is reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "DecorationRepr")]
pub enum Decoration {
    Color(Color),
    Bold,
    Italic,
    Underline,
    Link(String),
}

/// Wire layout of a decoration in RICOS JSON.
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all_fields = "camelCase")]
enum DecorationRepr {
    Color { color_data: ColorData },
    Bold { font_weight_value: u16 },
    Italic { italic_data: bool },
    Underline { underline_data: bool },
    Link { link_data: LinkData },
}

#[derive(Serialize)]
struct ColorData {
    foreground: Color,
}

#[derive(Serialize)]
struct LinkData {
    link: Link,
}

#[derive(Serialize)]
struct Link {
    url: String,
    target: LinkTarget,
}

#[derive(Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum LinkTarget {
    Blank,
}

const BOLD_WEIGHT: u16 = 700;

impl From<Decoration> for DecorationRepr {
    fn from(decoration: Decoration) -> Self {
        match decoration {
            Decoration::Color(foreground) => DecorationRepr::Color {
                color_data: ColorData { foreground },
            },
            Decoration::Bold => DecorationRepr::Bold {
                font_weight_value: BOLD_WEIGHT,
            },
            Decoration::Italic => DecorationRepr::Italic { italic_data: true },
            Decoration::Underline => DecorationRepr::Underline {
                underline_data: true,
            },
            Decoration::Link(url) => DecorationRepr::Link {
                link_data: LinkData {
                    link: Link {
                        url,
                        target: LinkTarget::Blank,
                    },
                },
            },
        }
    }
}
