use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::Node;

/// Root container of a converted document; `nodes` is in reading order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub nodes: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    pub document_style: DocumentStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub version: u32,
    pub created_timestamp: DateTime<Utc>,
    pub updated_timestamp: DateTime<Utc>,
}

/// Document-wide style overrides. Always empty for converted documents.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DocumentStyle {}

impl Metadata {
    pub const VERSION: u32 = 1;

    pub fn at(timestamp: DateTime<Utc>) -> Self {
        Self {
            version: Self::VERSION,
            created_timestamp: timestamp,
            updated_timestamp: timestamp,
        }
    }

    pub fn now() -> Self {
        Self::at(Utc::now())
    }
}

impl Document {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            ..Self::default()
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
