//! Request and response helpers shared by every front end.
//!
//! Request bodies come as `text/plain`, `text/markdown` or JSON with a
//! `markdown`, `content` or `text` field. Responses are `{success, data}` on
//! success and `{error, details?}` on failure.

use serde::Serialize;
use serde_json::Value;

use crate::error::{ConvertError, Result};
use crate::model::Document;

/// JSON fields searched for markdown, in order.
pub const MARKDOWN_FIELDS: [&str; 3] = ["markdown", "content", "text"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Text,
    Json,
}

/// Pulls the markdown source out of a request body.
///
/// Without a content type the body is sniffed: anything starting with `{`
/// is read as JSON.
pub fn extract_markdown(content_type: Option<&str>, body: &[u8]) -> Result<String> {
    let text = std::str::from_utf8(body)
        .map_err(|_| ConvertError::missing_input("request body is not valid UTF-8"))?;

    let kind = match content_type {
        Some(content_type) => body_kind(content_type).ok_or_else(|| {
            ConvertError::missing_input(format!("unsupported content type: {content_type}"))
        })?,
        None if text.trim_start().starts_with('{') => BodyKind::Json,
        None => BodyKind::Text,
    };

    let markdown = match kind {
        BodyKind::Text => text.to_string(),
        BodyKind::Json => markdown_field(text)?,
    };

    if markdown.trim().is_empty() {
        return Err(ConvertError::missing_input("markdown content is empty"));
    }
    Ok(markdown)
}

fn body_kind(content_type: &str) -> Option<BodyKind> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match mime.as_str() {
        "text/plain" | "text/markdown" | "text/x-markdown" => Some(BodyKind::Text),
        "application/json" => Some(BodyKind::Json),
        _ if mime.ends_with("+json") => Some(BodyKind::Json),
        _ => None,
    }
}

fn markdown_field(json: &str) -> Result<String> {
    let value: Value = serde_json::from_str(json)
        .map_err(|err| ConvertError::missing_input(format!("invalid JSON body: {err}")))?;
    MARKDOWN_FIELDS
        .iter()
        .filter_map(|field| value.get(field).and_then(Value::as_str))
        .find(|markdown| !markdown.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            ConvertError::missing_input("expected a `markdown`, `content` or `text` field")
        })
}

/// Body of a conversion response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Success {
        success: bool,
        data: Document,
    },
    Failure {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
        #[serde(skip)]
        status: u16,
    },
}

impl Response {
    pub fn success(data: Document) -> Self {
        Self::Success {
            success: true,
            data,
        }
    }

    pub fn failure(error: &ConvertError) -> Self {
        if error.is_client_error() {
            Self::Failure {
                error: error.to_string(),
                details: None,
                status: 400,
            }
        } else {
            Self::Failure {
                error: "Error converting markdown".to_string(),
                details: Some(error.to_string()),
                status: 500,
            }
        }
    }

    pub fn from_result(result: Result<Document>) -> Self {
        match result {
            Ok(document) => Self::success(document),
            Err(error) => Self::failure(&error),
        }
    }

    /// HTTP status a server front end should answer with.
    pub fn status(&self) -> u16 {
        match self {
            Self::Success { .. } => 200,
            Self::Failure { status, .. } => *status,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
