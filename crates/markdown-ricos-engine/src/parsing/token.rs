use serde::Deserialize;

use crate::error::Result;

/// One block-level unit produced by the markdown tokenizer.
///
/// Inline text (`text` fields) is raw markdown: emphasis and link markers are
/// still present and are resolved later by [`crate::parsing::inline`].
///
/// The serde layout matches the common `{"type": "heading", "depth": 1, ...}`
/// token shape, so token streams from other tokenizers can be deserialized
/// directly. Unknown fields are ignored and unknown `type`s become
/// [`Token::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Token {
    Heading {
        depth: u8,
        text: String,
    },
    Paragraph {
        text: String,
    },
    List {
        #[serde(default)]
        ordered: bool,
        items: Vec<ListItem>,
    },
    Code {
        #[serde(default)]
        lang: Option<String>,
        text: String,
    },
    Blockquote {
        text: String,
    },
    Hr,
    Space,
    Html {
        text: String,
    },
    /// Any block kind the converter has no policy for (tables, footnotes, ...).
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListItem {
    pub text: String,
}

impl ListItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Token {
    /// Short lowercase name of the token kind, as used on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Token::Heading { .. } => "heading",
            Token::Paragraph { .. } => "paragraph",
            Token::List { .. } => "list",
            Token::Code { .. } => "code",
            Token::Blockquote { .. } => "blockquote",
            Token::Hr => "hr",
            Token::Space => "space",
            Token::Html { .. } => "html",
            Token::Unknown => "unknown",
        }
    }

    pub fn heading(depth: u8, text: impl Into<String>) -> Self {
        Token::Heading {
            depth,
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Token::Paragraph { text: text.into() }
    }
}

/// Decodes a JSON array of tokens.
///
/// Malformed JSON and tokens missing required fields are
/// [`ConvertError::TokenStream`](crate::error::ConvertError::TokenStream).
pub fn tokens_from_json(json: &str) -> Result<Vec<Token>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_tagged_tokens() {
        let json = r###"[
            {"type": "heading", "depth": 2, "text": "Title", "raw": "## Title"},
            {"type": "paragraph", "text": "Some **text**"},
            {"type": "list", "ordered": true, "items": [{"text": "a", "task": false}, {"text": "b"}]},
            {"type": "code", "lang": "rust", "text": "fn main() {}"},
            {"type": "code", "text": "plain"},
            {"type": "blockquote", "text": "quoted"},
            {"type": "hr", "raw": "---"},
            {"type": "space", "raw": "\n\n"},
            {"type": "html", "text": "<img src=\"a.png\">"}
        ]"###;

        let tokens = tokens_from_json(json).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::heading(2, "Title"),
                Token::paragraph("Some **text**"),
                Token::List {
                    ordered: true,
                    items: vec![ListItem::new("a"), ListItem::new("b")],
                },
                Token::Code {
                    lang: Some("rust".to_string()),
                    text: "fn main() {}".to_string(),
                },
                Token::Code {
                    lang: None,
                    text: "plain".to_string(),
                },
                Token::Blockquote {
                    text: "quoted".to_string(),
                },
                Token::Hr,
                Token::Space,
                Token::Html {
                    text: "<img src=\"a.png\">".to_string(),
                },
            ]
        );
    }

    #[test]
    fn unknown_kinds_deserialize_as_unknown() {
        let tokens = tokens_from_json(r#"[{"type": "table", "header": [], "rows": []}]"#).unwrap();
        assert_eq!(tokens, vec![Token::Unknown]);
        assert_eq!(tokens[0].kind(), "unknown");
    }

    #[test]
    fn malformed_stream_is_an_error() {
        assert!(matches!(
            tokens_from_json(r#"[{"type": "heading"}]"#),
            Err(ConvertError::TokenStream(_))
        ));
        assert!(matches!(
            tokens_from_json("not json"),
            Err(ConvertError::TokenStream(_))
        ));
    }
}
