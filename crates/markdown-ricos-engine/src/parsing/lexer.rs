//! Block tokenizer built on `pulldown-cmark`.
//!
//! Only top-level blocks become tokens. Inline text is sliced verbatim from
//! the source so emphasis and link markers survive for the inline resolver.

use std::ops::Range;

use log::debug;
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use super::token::{ListItem, Token};

/// Tokenizes `markdown` into top-level block tokens, in document order.
pub fn lex(markdown: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(markdown);
    for (event, range) in Parser::new_ext(markdown, options()).into_offset_iter() {
        lexer.push(event, range);
    }
    lexer.finish()
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS
}

/// The top-level block currently being read.
enum OpenBlock {
    Heading {
        depth: u8,
        range: Range<usize>,
    },
    Paragraph {
        range: Range<usize>,
    },
    List {
        ordered: bool,
        items: Vec<ListItem>,
        item: Option<Range<usize>>,
    },
    Code {
        lang: Option<String>,
        text: String,
    },
    Blockquote {
        range: Range<usize>,
    },
    Html {
        text: String,
    },
    Unknown {
        kind: &'static str,
    },
}

struct Lexer<'a> {
    src: &'a str,
    depth: usize,
    open: Option<OpenBlock>,
    /// End offset of the previous top-level block.
    last_end: Option<usize>,
    out: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            depth: 0,
            open: None,
            last_end: None,
            out: vec![],
        }
    }

    fn push(&mut self, event: Event<'_>, range: Range<usize>) {
        match event {
            Event::Start(tag) => {
                if self.depth == 0 {
                    self.open_block(tag, range);
                } else {
                    self.nested_start(&tag, range);
                }
                self.depth += 1;
            }
            Event::End(tag) => {
                self.depth = self.depth.saturating_sub(1);
                if self.depth == 0 {
                    self.close_block(range);
                } else {
                    self.nested_end(tag);
                }
            }
            Event::Rule if self.depth == 0 => {
                self.separate(range.start);
                self.emit(Token::Hr, range.end);
            }
            Event::Text(text) => {
                if let Some(OpenBlock::Code { text: code, .. }) = &mut self.open {
                    code.push_str(&text);
                }
            }
            Event::Html(html) => {
                if let Some(OpenBlock::Html { text }) = &mut self.open {
                    text.push_str(&html);
                }
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Token> {
        // An unterminated block can only happen on malformed event streams.
        if let Some(open) = self.open.take() {
            let end = self.src.len();
            self.push_block(open, end);
        }
        self.out
    }

    fn open_block(&mut self, tag: Tag<'_>, range: Range<usize>) {
        self.separate(range.start);
        self.open = Some(match tag {
            Tag::Heading { level, .. } => OpenBlock::Heading {
                depth: level as u8,
                range,
            },
            Tag::Paragraph => OpenBlock::Paragraph { range },
            Tag::List(start) => OpenBlock::List {
                ordered: start.is_some(),
                items: vec![],
                item: None,
            },
            Tag::CodeBlock(kind) => OpenBlock::Code {
                lang: match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(str::to_string),
                    CodeBlockKind::Indented => None,
                },
                text: String::new(),
            },
            Tag::BlockQuote(_) => OpenBlock::Blockquote { range },
            Tag::HtmlBlock => OpenBlock::Html {
                text: String::new(),
            },
            Tag::Table(_) => OpenBlock::Unknown { kind: "table" },
            Tag::FootnoteDefinition(_) => OpenBlock::Unknown { kind: "footnote" },
            Tag::MetadataBlock(_) => OpenBlock::Unknown { kind: "metadata" },
            _ => OpenBlock::Unknown { kind: "other" },
        });
    }

    fn nested_start(&mut self, tag: &Tag<'_>, range: Range<usize>) {
        let Some(OpenBlock::List { item, .. }) = &mut self.open else {
            return;
        };
        match (self.depth, tag) {
            (1, Tag::Item) => *item = Some(range),
            // Nested lists are not kept; the item text stops where they begin.
            (2, Tag::List(_)) => {
                if let Some(item) = item
                    && range.start < item.end
                {
                    item.end = range.start;
                }
            }
            _ => {}
        }
    }

    fn nested_end(&mut self, tag: TagEnd) {
        let src = self.src;
        let Some(OpenBlock::List { items, item, .. }) = &mut self.open else {
            return;
        };
        if self.depth == 1
            && tag == TagEnd::Item
            && let Some(range) = item.take()
        {
            items.push(ListItem::new(list_item_text(slice(src, range))));
        }
    }

    fn close_block(&mut self, range: Range<usize>) {
        if let Some(open) = self.open.take() {
            self.push_block(open, range.end);
        }
    }

    fn push_block(&mut self, open: OpenBlock, end: usize) {
        let src = self.src;
        let token = match open {
            OpenBlock::Heading { depth, range } => Token::Heading {
                depth,
                text: heading_text(slice(src, range)),
            },
            OpenBlock::Paragraph { range } => Token::Paragraph {
                text: slice(src, range).trim().to_string(),
            },
            OpenBlock::List { ordered, items, .. } => Token::List { ordered, items },
            OpenBlock::Code { lang, mut text } => {
                if text.ends_with('\n') {
                    text.pop();
                }
                Token::Code { lang, text }
            }
            OpenBlock::Blockquote { range } => Token::Blockquote {
                text: blockquote_text(slice(src, range)),
            },
            OpenBlock::Html { text } => Token::Html {
                text: text.trim_end().to_string(),
            },
            OpenBlock::Unknown { kind } => {
                debug!("lexed unsupported block kind: {kind}");
                Token::Unknown
            }
        };
        self.emit(token, end);
    }

    fn emit(&mut self, token: Token, end: usize) {
        self.out.push(token);
        self.last_end = Some(end);
    }

    /// Emits a `space` token when two or more blank lines separate the
    /// previous block from the one starting at `start`. Headings absorb the
    /// blank lines that follow them.
    fn separate(&mut self, start: usize) {
        let Some(end) = self.last_end else {
            return;
        };
        if matches!(self.out.last(), Some(Token::Heading { .. })) {
            return;
        }
        if blank_lines_between(self.src, end, start) >= 2 {
            self.out.push(Token::Space);
        }
    }
}

fn slice(src: &str, range: Range<usize>) -> &str {
    src.get(range).unwrap_or_default()
}

fn blank_lines_between(src: &str, end: usize, start: usize) -> usize {
    let Some(gap) = src.get(end..start) else {
        return 0;
    };
    let at_line_start = end == 0 || src[..end].ends_with('\n');
    let gap = if at_line_start {
        gap
    } else {
        match gap.find('\n') {
            Some(i) => &gap[i + 1..],
            None => return 0,
        }
    };
    gap.matches('\n').count()
}

fn join_trimmed_lines(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Heading content without ATX `#` markers or the setext underline.
fn heading_text(raw: &str) -> String {
    let raw = raw.trim();
    if let Some((text, _underline)) = raw.rsplit_once('\n') {
        return join_trimmed_lines(text);
    }
    let content = raw.trim_start_matches('#').trim();
    let without_closing = content.trim_end_matches('#');
    if without_closing.is_empty() {
        String::new()
    } else if without_closing.ends_with([' ', '\t']) {
        without_closing.trim_end().to_string()
    } else {
        content.to_string()
    }
}

/// Quote content with one level of `>` markers removed.
fn blockquote_text(raw: &str) -> String {
    let lines: Vec<&str> = raw
        .lines()
        .map(|line| {
            let line = line.trim_start();
            match line.strip_prefix('>') {
                Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
                None => line,
            }
        })
        .collect();
    join_trimmed_lines(&lines.join("\n"))
}

/// Item content without the bullet/number marker or a task checkbox.
fn list_item_text(raw: &str) -> String {
    let mut lines = raw.lines();
    let first = lines.next().unwrap_or_default().trim_start();
    let first = strip_list_marker(first).trim_start();
    let first = ["[ ] ", "[x] ", "[X] "]
        .iter()
        .find_map(|task| first.strip_prefix(*task))
        .unwrap_or(first);

    let mut text = first.trim().to_string();
    for line in lines.map(str::trim).filter(|line| !line.is_empty()) {
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(line);
    }
    text
}

fn strip_list_marker(line: &str) -> &str {
    if let Some(rest) = line.strip_prefix(['-', '*', '+']) {
        return rest;
    }
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0
        && let Some(rest) = line[digits..].strip_prefix(['.', ')'])
    {
        return rest;
    }
    line
}
