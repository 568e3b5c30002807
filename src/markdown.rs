//! Markdown explanations turned into styled blocks the UI can draw.
//!
//! Works on partial input too: the typing reveal feeds a growing prefix of the
//! explanation every frame, and unfinished markup simply stays literal text
//! until its closing marker arrives.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Span {
    pub text: String,
    pub strong: bool,
    pub emphasis: bool,
    pub code: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    Heading { level: u8, spans: Vec<Span> },
    Paragraph(Vec<Span>),
    /// `marker` is "1.", "2." ... for ordered lists and "•" otherwise.
    ListItem {
        marker: String,
        depth: usize,
        spans: Vec<Span>,
    },
    Quote(Vec<Span>),
    CodeBlock(String),
    Rule,
}

impl Block {
    /// Text without any markup, mostly useful for tests and logs.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { spans, .. }
            | Block::Paragraph(spans)
            | Block::ListItem { spans, .. }
            | Block::Quote(spans) => spans.iter().map(|span| span.text.as_str()).collect(),
            Block::CodeBlock(code) => code.clone(),
            Block::Rule => String::new(),
        }
    }
}

fn heading_level_to_int(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<Block>,
    spans: Vec<Span>,
    strong: usize,
    emphasis: usize,
    /// Next number of each open list, `None` for bullet lists.
    lists: Vec<Option<u64>>,
    item_marker: Option<String>,
    heading: Option<u8>,
    in_quote: bool,
    code_block: Option<String>,
}

impl BlockBuilder {
    fn push_text(&mut self, text: &str, code: bool) {
        if text.is_empty() {
            return;
        }
        self.spans.push(Span {
            text: text.to_string(),
            strong: self.strong > 0,
            emphasis: self.emphasis > 0,
            code,
        });
    }

    fn take_spans(&mut self) -> Option<Vec<Span>> {
        if self.spans.iter().all(|span| span.text.trim().is_empty()) {
            self.spans.clear();
            return None;
        }
        Some(std::mem::take(&mut self.spans))
    }

    /// Closes the list item collected so far. Text after a nested list gets no marker.
    fn flush_item(&mut self) {
        let marker = self.item_marker.take();
        if let Some(spans) = self.take_spans() {
            self.blocks.push(Block::ListItem {
                marker: marker.unwrap_or_default(),
                depth: self.lists.len().saturating_sub(1),
                spans,
            });
        }
    }

    fn flush_paragraph(&mut self) {
        if let Some(spans) = self.take_spans() {
            let block = if self.in_quote {
                Block::Quote(spans)
            } else {
                Block::Paragraph(spans)
            };
            self.blocks.push(block);
        }
    }

    fn handle(&mut self, event: Event) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                self.flush_paragraph();
                self.heading = Some(heading_level_to_int(level));
            }
            Event::End(TagEnd::Heading(_)) => {
                let level = self.heading.take().unwrap_or(1);
                if let Some(spans) = self.take_spans() {
                    self.blocks.push(Block::Heading { level, spans });
                }
            }
            Event::End(TagEnd::Paragraph) => {
                if self.lists.is_empty() {
                    self.flush_paragraph();
                } else {
                    // Loose list items hold paragraphs; keep them on one item
                    self.push_text(" ", false);
                }
            }
            Event::Start(Tag::List(first_number)) => {
                if !self.lists.is_empty() {
                    self.flush_item();
                } else {
                    self.flush_paragraph();
                }
                self.lists.push(first_number);
            }
            Event::End(TagEnd::List(_)) => {
                self.lists.pop();
            }
            Event::Start(Tag::Item) => {
                let marker = match self.lists.last_mut() {
                    Some(Some(number)) => {
                        let marker = format!("{}.", number);
                        *number += 1;
                        marker
                    }
                    _ => "•".to_string(),
                };
                self.item_marker = Some(marker);
            }
            Event::End(TagEnd::Item) => self.flush_item(),
            Event::Start(Tag::BlockQuote) => {
                self.flush_paragraph();
                self.in_quote = true;
            }
            Event::End(TagEnd::BlockQuote) => {
                self.flush_paragraph();
                self.in_quote = false;
            }
            Event::Start(Tag::CodeBlock(_)) => {
                self.flush_paragraph();
                self.code_block = Some(String::new());
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(code) = self.code_block.take() {
                    self.blocks
                        .push(Block::CodeBlock(code.trim_end().to_string()));
                }
            }
            Event::Start(Tag::Strong) => self.strong += 1,
            Event::End(TagEnd::Strong) => self.strong = self.strong.saturating_sub(1),
            Event::Start(Tag::Emphasis) => self.emphasis += 1,
            Event::End(TagEnd::Emphasis) => self.emphasis = self.emphasis.saturating_sub(1),
            Event::Code(text) => self.push_text(&text, true),
            Event::Text(text) => match &mut self.code_block {
                Some(code) => code.push_str(&text),
                None => self.push_text(&text, false),
            },
            Event::SoftBreak => self.push_text(" ", false),
            Event::HardBreak => self.push_text("\n", false),
            Event::Rule => {
                self.flush_paragraph();
                self.blocks.push(Block::Rule);
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Block> {
        // A reveal can stop mid-block; keep whatever was collected
        if !self.lists.is_empty() {
            self.flush_item();
        } else {
            self.flush_paragraph();
        }
        self.blocks
    }
}

/// Parses an explanation into blocks.
pub fn parse_explanation(markdown: &str) -> Vec<Block> {
    let mut builder = BlockBuilder::default();
    for event in Parser::new_ext(markdown, Options::empty()) {
        builder.handle(event);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_and_numbered_list_lose_markers() {
        let blocks = parse_explanation(
            "## Core concept\n\n**Osmosis** is the *movement* of water.\n\n1. First point\n2. Second point\n",
        );

        assert_eq!(blocks.len(), 4);
        assert_eq!(
            blocks[0],
            Block::Heading {
                level: 2,
                spans: vec![Span {
                    text: "Core concept".to_string(),
                    ..Span::default()
                }],
            }
        );

        match &blocks[1] {
            Block::Paragraph(spans) => {
                assert_eq!(spans[0].text, "Osmosis");
                assert!(spans[0].strong);
                assert!(spans.iter().any(|s| s.text == "movement" && s.emphasis));
            }
            other => panic!("unexpected block {:?}", other),
        }

        match (&blocks[2], &blocks[3]) {
            (
                Block::ListItem { marker: first, .. },
                Block::ListItem { marker: second, .. },
            ) => {
                assert_eq!(first, "1.");
                assert_eq!(second, "2.");
            }
            other => panic!("unexpected blocks {:?}", other),
        }

        for block in &blocks {
            let text = block.plain_text();
            assert!(!text.contains("**"), "markup left in {:?}", text);
            assert!(!text.contains('#'), "markup left in {:?}", text);
            assert!(!text.starts_with("1."), "marker left in {:?}", text);
        }
        assert_eq!(blocks[2].plain_text(), "First point");
    }

    #[test]
    fn test_nested_bullets_keep_depth() {
        let blocks = parse_explanation("- Parent\n  - Child\n- Sibling\n");

        let items: Vec<(String, usize, String)> = blocks
            .iter()
            .map(|block| match block {
                Block::ListItem {
                    marker, depth, ..
                } => (marker.clone(), *depth, block.plain_text()),
                other => panic!("unexpected block {:?}", other),
            })
            .collect();

        assert_eq!(
            items,
            vec![
                ("•".to_string(), 0, "Parent".to_string()),
                ("•".to_string(), 1, "Child".to_string()),
                ("•".to_string(), 0, "Sibling".to_string()),
            ]
        );
    }

    #[test]
    fn test_code_and_rule() {
        let blocks = parse_explanation("Use `map`.\n\n---\n\n```\nlet x = 1;\n```\n");

        match &blocks[0] {
            Block::Paragraph(spans) => assert!(spans.iter().any(|s| s.code && s.text == "map")),
            other => panic!("unexpected block {:?}", other),
        }
        assert_eq!(blocks[1], Block::Rule);
        assert_eq!(blocks[2], Block::CodeBlock("let x = 1;".to_string()));
    }

    #[test]
    fn test_partial_reveal_keeps_text() {
        let blocks = parse_explanation("1. Plants use **sun");
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].plain_text().starts_with("Plants use"));
    }

    #[test]
    fn test_plain_text_is_single_paragraph() {
        let blocks = parse_explanation("Short version.");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].plain_text(), "Short version.");
    }
}
