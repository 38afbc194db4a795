//! Block token walker.
//!
//! Feeds tokens through [`NodeFactory`] in order and applies the structural
//! policy: spacers around headings, images lifted out of paragraphs, HTML
//! reduced to `<img>` tags.

use log::{debug, trace};

use crate::builders::NodeFactory;
use crate::error::Result;
use crate::ids::IdGenerator;
use crate::model::{Document, Node};
use crate::parsing::html::img_tag;
use crate::parsing::{ParagraphPart, Token, single_image, split_images};
use crate::style::Style;

pub struct BlockWalker<'a> {
    factory: NodeFactory<'a>,
    out: Vec<Node>,
}

impl<'a> BlockWalker<'a> {
    pub fn new(style: &'a Style, ids: &'a mut dyn IdGenerator) -> Self {
        Self {
            factory: NodeFactory::new(ids, style),
            out: vec![],
        }
    }

    pub fn push(&mut self, token: &Token) -> Result<()> {
        trace!("walking {} token", token.kind());
        match token {
            Token::Heading { depth, text } => {
                let heading = self.factory.heading(*depth, text)?;
                if !self.out.is_empty() {
                    self.push_spacer();
                }
                self.out.push(heading);
                self.push_spacer();
            }
            Token::Paragraph { text } => self.paragraph(text),
            Token::List { ordered, items } => {
                let texts: Vec<&str> = items.iter().map(|item| item.text.as_str()).collect();
                let list = self.factory.list(*ordered, &texts);
                self.out.push(list);
            }
            Token::Code { lang, text } => {
                let lang = lang.as_deref().filter(|lang| !lang.is_empty());
                let code = self.factory.code_block(text, lang);
                self.out.push(code);
            }
            Token::Blockquote { text } => {
                let quote = self.factory.blockquote(text);
                self.out.push(quote);
            }
            Token::Hr => {
                let divider = self.factory.divider();
                self.out.push(divider);
            }
            Token::Space => self.push_spacer(),
            Token::Html { text } => {
                let image = img_tag(text, &self.factory.style().hosted_media_markers);
                match image {
                    Some(image) => {
                        let node = self.factory.image(&image);
                        self.out.push(node);
                    }
                    None => debug!("dropping html block: {text:?}"),
                }
            }
            Token::Unknown => debug!("skipping unsupported token"),
        }
        Ok(())
    }

    pub fn finish(self) -> Document {
        Document::new(self.out)
    }

    fn paragraph(&mut self, text: &str) {
        if let Some(image) = single_image(text) {
            let node = self.factory.image(&image);
            self.out.push(node);
            return;
        }
        let Some(parts) = split_images(text) else {
            let node = self.factory.paragraph(text);
            self.out.push(node);
            return;
        };
        for part in parts {
            let node = match part {
                ParagraphPart::Text(text) => self.factory.paragraph(&text),
                ParagraphPart::Image(image) => self.factory.image(&image),
            };
            self.out.push(node);
        }
    }

    fn push_spacer(&mut self) {
        let spacer = self.factory.spacer();
        self.out.push(spacer);
    }
}

/// Builds a document from `tokens`. The result carries no metadata.
pub fn build(tokens: &[Token], style: &Style, ids: &mut dyn IdGenerator) -> Result<Document> {
    let mut walker = BlockWalker::new(style, ids);
    for token in tokens {
        walker.push(token)?;
    }
    Ok(walker.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::media::ImageReference;
    use crate::model::NodeType;
    use crate::parsing::ListItem;
    use crate::ConvertError;
    use pretty_assertions::assert_eq;

    fn walk(tokens: &[Token]) -> Result<Document> {
        build(tokens, &Style::default(), &mut SequentialIds::new())
    }

    fn types(doc: &Document) -> Vec<NodeType> {
        doc.nodes.iter().map(|node| node.node_type).collect()
    }

    #[test]
    fn first_heading_has_no_leading_spacer() {
        let doc = walk(&[Token::heading(1, "Title")]).unwrap();
        assert_eq!(types(&doc), vec![NodeType::Heading, NodeType::Paragraph]);
        assert!(doc.nodes[1].is_spacer());
    }

    #[test]
    fn later_headings_are_surrounded_by_spacers() {
        let doc = walk(&[Token::paragraph("intro"), Token::heading(2, "Next")]).unwrap();
        let spacers: Vec<bool> = doc.nodes.iter().map(Node::is_spacer).collect();
        assert_eq!(spacers, vec![false, true, false, true]);
        assert_eq!(doc.nodes[2].node_type, NodeType::Heading);
    }

    #[test]
    fn single_image_paragraph_becomes_image() {
        let doc = walk(&[Token::paragraph("![alt](http://x/y.png)")]).unwrap();
        assert_eq!(types(&doc), vec![NodeType::Image]);
        let data = doc.nodes[0].image_data().unwrap();
        assert_eq!(data.image.src, ImageReference::external("http://x/y.png"));
        assert_eq!(data.alt_text, "alt");
    }

    #[test]
    fn mixed_paragraph_is_split_around_images() {
        let doc = walk(&[Token::paragraph(
            "See ![a](a.png) and ![b](http://x/b.png)",
        )])
        .unwrap();
        assert_eq!(
            types(&doc),
            vec![
                NodeType::Paragraph,
                NodeType::Image,
                NodeType::Paragraph,
                NodeType::Image,
            ]
        );
        assert_eq!(doc.nodes[0].plain_text(), "See");
        assert_eq!(doc.nodes[2].plain_text(), "and");
        assert_eq!(
            doc.nodes[1].image_data().unwrap().image.src,
            ImageReference::hosted("a.png")
        );
    }

    #[test]
    fn ordered_list_keeps_item_order() {
        let doc = walk(&[Token::List {
            ordered: true,
            items: vec![
                ListItem::new("one"),
                ListItem::new("two"),
                ListItem::new("three"),
            ],
        }])
        .unwrap();
        assert_eq!(types(&doc), vec![NodeType::OrderedList]);
        let items: Vec<String> = doc.nodes[0].nodes.iter().map(Node::plain_text).collect();
        assert_eq!(items, vec!["one", "two", "three"]);
    }

    #[test]
    fn empty_code_language_falls_back() {
        let doc = walk(&[Token::Code {
            lang: Some(String::new()),
            text: "x".to_string(),
        }])
        .unwrap();
        assert_eq!(
            doc.nodes[0].code_block_data().unwrap().language,
            crate::builders::PLAIN_TEXT_LANGUAGE
        );
    }

    #[test]
    fn html_only_yields_img_tags() {
        let doc = walk(&[
            Token::Html {
                text: "<div>hello</div>".to_string(),
            },
            Token::Html {
                text: "<img alt=\"cat\" src=\"http://x/cat.png\">".to_string(),
            },
        ])
        .unwrap();
        assert_eq!(types(&doc), vec![NodeType::Image]);
        assert_eq!(doc.nodes[0].image_data().unwrap().alt_text, "cat");
    }

    #[test]
    fn unknown_tokens_are_skipped() {
        let doc = walk(&[Token::Unknown, Token::Hr, Token::Unknown, Token::Space]).unwrap();
        assert_eq!(types(&doc), vec![NodeType::Divider, NodeType::Paragraph]);
    }

    #[test]
    fn bad_heading_aborts_without_partial_document() {
        let err = walk(&[Token::paragraph("kept?"), Token::heading(9, "nope")]).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidHeadingLevel(9)));
    }

    #[test]
    fn built_documents_carry_no_metadata() {
        let doc = walk(&[Token::paragraph("x")]).unwrap();
        assert_eq!(doc.metadata, None);
    }
}
