use serde::Serialize;

use crate::media::ImageReference;
use crate::model::Decoration;
use crate::style::{Alignment, DividerWidth, LineStyle, TextAlignment};

/// Type tag of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Heading,
    Paragraph,
    BulletedList,
    OrderedList,
    ListItem,
    CodeBlock,
    Blockquote,
    Divider,
    Image,
    Text,
}

/// One unit of the document tree.
///
/// `node_type` always agrees with the `data` variant; nodes are only created
/// through the builders in [`crate::builders`], which keep the two in sync.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub id: String,
    pub nodes: Vec<Node>,
    #[serde(flatten)]
    pub data: Option<NodeData>,
}

/// Type-specific payload, serialized under a `<type>Data` key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeData {
    HeadingData(HeadingData),
    ParagraphData(ParagraphData),
    BulletedListData(ListData),
    OrderedListData(ListData),
    CodeBlockData(CodeBlockData),
    BlockquoteData(BlockquoteData),
    DividerData(DividerData),
    ImageData(ImageData),
    TextData(TextData),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub text_alignment: TextAlignment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingData {
    pub level: u8,
    pub text_style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphData {
    pub text_style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListData {
    pub indentation: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeBlockData {
    pub language: String,
    pub text_style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockquoteData {
    pub indentation: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DividerData {
    pub line_style: LineStyle,
    pub width: DividerWidth,
    pub alignment: Alignment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WidthSize {
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerWidth {
    pub size: WidthSize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerData {
    pub width: ContainerWidth,
    pub alignment: Alignment,
    pub text_wrap: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSource {
    pub src: ImageReference,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    pub container_data: ContainerData,
    pub image: ImageSource,
    pub alt_text: String,
}

/// Leaf payload: a run of text and its decorations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextData {
    pub text: String,
    pub decorations: Vec<Decoration>,
}

impl Node {
    /// A blank paragraph used for vertical spacing.
    pub fn is_spacer(&self) -> bool {
        self.node_type == NodeType::Paragraph && self.nodes.is_empty()
    }

    pub fn text_data(&self) -> Option<&TextData> {
        match &self.data {
            Some(NodeData::TextData(data)) => Some(data),
            _ => None,
        }
    }

    pub fn heading_data(&self) -> Option<&HeadingData> {
        match &self.data {
            Some(NodeData::HeadingData(data)) => Some(data),
            _ => None,
        }
    }

    pub fn image_data(&self) -> Option<&ImageData> {
        match &self.data {
            Some(NodeData::ImageData(data)) => Some(data),
            _ => None,
        }
    }

    pub fn code_block_data(&self) -> Option<&CodeBlockData> {
        match &self.data {
            Some(NodeData::CodeBlockData(data)) => Some(data),
            _ => None,
        }
    }

    /// Concatenated text of every TEXT leaf below (and including) this node.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(data) = self.text_data() {
            out.push_str(&data.text);
        }
        for child in &self.nodes {
            child.collect_text(out);
        }
    }
}
