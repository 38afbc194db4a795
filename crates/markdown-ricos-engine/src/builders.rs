//! Node constructors.
//!
//! Every builder draws a fresh id and assembles one typed node. None of them
//! look at sibling nodes; ordering and spacer policy live in the walker.

use crate::error::{ConvertError, Result};
use crate::ids::IdGenerator;
use crate::media::classify_with;
use crate::model::{
    BlockquoteData, CodeBlockData, ContainerData, ContainerWidth, Decoration, DividerData,
    HeadingData, ImageData, ImageSource, ListData, Node, NodeData, NodeType, ParagraphData,
    TextData, TextStyle, WidthSize,
};
use crate::parsing::ImageRef;
use crate::parsing::inline::{Segment, resolve};
use crate::style::{Color, Style};

/// Language tag used for code blocks without one.
pub const PLAIN_TEXT_LANGUAGE: &str = "plaintext";

pub struct NodeFactory<'a> {
    ids: &'a mut dyn IdGenerator,
    style: &'a Style,
}

impl<'a> NodeFactory<'a> {
    pub fn new(ids: &'a mut dyn IdGenerator, style: &'a Style) -> Self {
        Self { ids, style }
    }

    pub fn style(&self) -> &Style {
        self.style
    }

    pub fn heading(&mut self, level: u8, text: &str) -> Result<Node> {
        if !(1..=6).contains(&level) {
            return Err(ConvertError::InvalidHeadingLevel(level));
        }
        let children = self.inline(text, self.style.heading_color);
        let data = NodeData::HeadingData(HeadingData {
            level,
            text_style: self.text_style(),
        });
        Ok(self.node(NodeType::Heading, children, Some(data)))
    }

    pub fn paragraph(&mut self, text: &str) -> Node {
        let children = self.inline(text, self.style.text_color);
        self.paragraph_with(children)
    }

    /// A paragraph with no children, used for vertical spacing.
    pub fn spacer(&mut self) -> Node {
        self.paragraph_with(vec![])
    }

    pub fn list<S: AsRef<str>>(&mut self, ordered: bool, items: &[S]) -> Node {
        let children = items
            .iter()
            .map(|item| self.list_item(item.as_ref()))
            .collect();
        let data = ListData { indentation: 0 };
        if ordered {
            self.node(
                NodeType::OrderedList,
                children,
                Some(NodeData::OrderedListData(data)),
            )
        } else {
            self.node(
                NodeType::BulletedList,
                children,
                Some(NodeData::BulletedListData(data)),
            )
        }
    }

    pub fn list_item(&mut self, text: &str) -> Node {
        let paragraph = self.paragraph(text);
        self.node(NodeType::ListItem, vec![paragraph], None)
    }

    /// Code is kept verbatim. The text leaf has an empty id.
    pub fn code_block(&mut self, code: &str, language: Option<&str>) -> Node {
        let text = Node {
            node_type: NodeType::Text,
            id: String::new(),
            nodes: vec![],
            data: Some(NodeData::TextData(TextData {
                text: code.to_string(),
                decorations: vec![Decoration::Color(self.style.text_color)],
            })),
        };
        let data = NodeData::CodeBlockData(CodeBlockData {
            language: language.unwrap_or(PLAIN_TEXT_LANGUAGE).to_string(),
            text_style: self.text_style(),
        });
        self.node(NodeType::CodeBlock, vec![text], Some(data))
    }

    pub fn blockquote(&mut self, text: &str) -> Node {
        let paragraph = self.paragraph(text);
        let data = NodeData::BlockquoteData(BlockquoteData { indentation: 1 });
        self.node(NodeType::Blockquote, vec![paragraph], Some(data))
    }

    pub fn divider(&mut self) -> Node {
        let divider = self.style.divider;
        let data = NodeData::DividerData(DividerData {
            line_style: divider.line_style,
            width: divider.width,
            alignment: divider.alignment,
        });
        self.node(NodeType::Divider, vec![], Some(data))
    }

    pub fn image(&mut self, image: &ImageRef) -> Node {
        let size = self.style.image_size;
        let data = NodeData::ImageData(ImageData {
            container_data: ContainerData {
                width: ContainerWidth {
                    size: WidthSize::Content,
                },
                alignment: self.style.image_alignment,
                text_wrap: true,
            },
            image: ImageSource {
                src: classify_with(&image.src, &self.style.hosted_media_markers),
                width: size.width,
                height: size.height,
            },
            alt_text: image.alt.clone(),
        });
        self.node(NodeType::Image, vec![], Some(data))
    }

    fn paragraph_with(&mut self, children: Vec<Node>) -> Node {
        let data = NodeData::ParagraphData(ParagraphData {
            text_style: self.text_style(),
        });
        self.node(NodeType::Paragraph, children, Some(data))
    }

    fn inline(&mut self, text: &str, color: Color) -> Vec<Node> {
        resolve(text, color)
            .into_iter()
            .map(|segment| self.text(segment))
            .collect()
    }

    fn text(&mut self, segment: Segment) -> Node {
        let data = NodeData::TextData(TextData {
            text: segment.text,
            decorations: segment.decorations,
        });
        self.node(NodeType::Text, vec![], Some(data))
    }

    fn text_style(&self) -> TextStyle {
        TextStyle {
            text_alignment: self.style.text_alignment,
        }
    }

    fn node(&mut self, node_type: NodeType, nodes: Vec<Node>, data: Option<NodeData>) -> Node {
        Node {
            node_type,
            id: self.ids.next_id(),
            nodes,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{SequentialIds, is_valid_id};
    use crate::media::ImageReference;
    use crate::style::{Alignment, ImageSize};
    use pretty_assertions::assert_eq;

    fn with_factory<T>(f: impl FnOnce(&mut NodeFactory<'_>) -> T) -> T {
        let style = Style::default();
        let mut ids = SequentialIds::new();
        let mut factory = NodeFactory::new(&mut ids, &style);
        f(&mut factory)
    }

    #[test]
    fn heading_uses_heading_color() {
        let node = with_factory(|f| f.heading(2, "Hello **you**")).unwrap();
        assert_eq!(node.node_type, NodeType::Heading);
        assert_eq!(node.heading_data().unwrap().level, 2);
        assert_eq!(node.nodes.len(), 2);
        let heading_color = Style::default().heading_color;
        let first = node.nodes[0].text_data().unwrap();
        assert_eq!(first.text, "Hello ");
        assert_eq!(first.decorations, vec![Decoration::Color(heading_color)]);
        let second = node.nodes[1].text_data().unwrap();
        assert_eq!(
            second.decorations,
            vec![Decoration::Bold, Decoration::Color(heading_color)]
        );
    }

    #[test]
    fn heading_rejects_out_of_range_levels() {
        let err = with_factory(|f| f.heading(7, "too deep")).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidHeadingLevel(7)));
        assert!(with_factory(|f| f.heading(0, "x")).is_err());
    }

    #[test]
    fn spacer_is_an_empty_paragraph() {
        let node = with_factory(|f| f.spacer());
        assert!(node.is_spacer());
        assert!(is_valid_id(&node.id));
    }

    #[test]
    fn every_node_gets_an_id() {
        let node = with_factory(|f| f.list(true, &["a", "*b*"]));
        assert_eq!(node.node_type, NodeType::OrderedList);
        assert_eq!(node.nodes.len(), 2);
        fn walk(node: &Node) {
            assert!(is_valid_id(&node.id), "bad id on {:?}", node.node_type);
            node.nodes.iter().for_each(walk);
        }
        walk(&node);
    }

    #[test]
    fn list_items_wrap_a_paragraph() {
        let node = with_factory(|f| f.list(false, &["only"]));
        assert_eq!(node.node_type, NodeType::BulletedList);
        let item = &node.nodes[0];
        assert_eq!(item.node_type, NodeType::ListItem);
        assert_eq!(item.data, None);
        assert_eq!(item.nodes[0].node_type, NodeType::Paragraph);
        assert_eq!(item.plain_text(), "only");
    }

    #[test]
    fn code_block_is_verbatim() {
        let node = with_factory(|f| f.code_block("let **x** = 1;", None));
        assert_eq!(node.code_block_data().unwrap().language, PLAIN_TEXT_LANGUAGE);
        let text = &node.nodes[0];
        assert_eq!(text.id, "");
        let data = text.text_data().unwrap();
        assert_eq!(data.text, "let **x** = 1;");
        assert_eq!(data.decorations, vec![Decoration::Color(Color::BLACK)]);

        let node = with_factory(|f| f.code_block("x", Some("rust")));
        assert_eq!(node.code_block_data().unwrap().language, "rust");
    }

    #[test]
    fn blockquote_wraps_resolved_paragraph() {
        let node = with_factory(|f| f.blockquote("a [link](http://x)"));
        assert_eq!(node.node_type, NodeType::Blockquote);
        assert_eq!(node.data, Some(NodeData::BlockquoteData(BlockquoteData { indentation: 1 })));
        assert_eq!(node.nodes[0].nodes.len(), 2);
    }

    #[test]
    fn image_is_classified_and_sized() {
        let node = with_factory(|f| {
            f.image(&ImageRef::new(
                "logo",
                "https://static.wixstatic.com/media/853f36_abc~mv2.png",
            ))
        });
        let data = node.image_data().unwrap();
        assert_eq!(data.image.src, ImageReference::hosted("853f36_abc~mv2.png"));
        assert_eq!(data.image.width, ImageSize::FALLBACK.width);
        assert_eq!(data.image.height, ImageSize::FALLBACK.height);
        assert_eq!(data.alt_text, "logo");
        assert_eq!(data.container_data.alignment, Alignment::Center);
        assert_eq!(data.container_data.width.size, WidthSize::Content);
        assert_eq!(
            serde_json::to_value(&data.container_data.width).unwrap(),
            serde_json::json!({"size": "CONTENT"})
        );
        assert!(node.nodes.is_empty());
    }

    #[test]
    fn divider_follows_style() {
        let node = with_factory(|f| f.divider());
        assert_eq!(node.node_type, NodeType::Divider);
        assert!(node.nodes.is_empty());
    }
}
