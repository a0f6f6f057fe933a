//! Content renderer
//!
//! Section bodies are markdown. They are parsed once, when the doc set is
//! loaded, into a small closed set of [`Block`] variants. Lookup goes through
//! registry-issued [`SectionKey`]s, so the mapping from section to content is
//! total: every known section has exactly one block and unknown IDs resolve
//! to the default section before they reach the library.

use std::collections::HashMap;
use std::fmt;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Parser, Tag, TagEnd};
use serde::Serialize;
use thiserror::Error;

use super::registry::{SectionKey, SectionRegistry};
use super::section::SectionId;

#[derive(Debug, Error, PartialEq)]
pub enum ContentError {
    #[error("Section '{0}' has no content")]
    MissingBody(SectionId),

    #[error("Content provided for unknown section '{0}'")]
    UnknownSection(SectionId),
}

/// One item of a (possibly nested) list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    /// Nesting depth, 0 for top-level items
    pub depth: usize,
    pub text: String,
    /// A later paragraph of the previous item at this depth
    pub continuation: bool,
}

/// A renderable piece of section content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    Code { lang: Option<String>, text: String },
    List {
        ordered: bool,
        /// Number of the first top-level item
        start: u64,
        items: Vec<ListItem>,
    },
    Quote { text: String },
    Rule,
}

/// The content displayed for one section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentBlock {
    pub section: SectionId,
    pub title: String,
    pub blocks: Vec<Block>,
}

impl fmt::Display for ContentBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.chars().count().max(3)))?;

        for block in &self.blocks {
            writeln!(f)?;
            match block {
                Block::Heading { level, text } => {
                    writeln!(f, "{} {}", "#".repeat(usize::from(*level)), text)?;
                }
                Block::Paragraph { text } => writeln!(f, "{}", text)?,
                Block::Code { lang, text } => {
                    writeln!(f, "```{}", lang.as_deref().unwrap_or(""))?;
                    write!(f, "{}", text)?;
                    if !text.ends_with('\n') {
                        writeln!(f)?;
                    }
                    writeln!(f, "```")?;
                }
                Block::List {
                    ordered,
                    start,
                    items,
                } => {
                    let markers = list_markers(*ordered, *start, items);
                    for (item, marker) in items.iter().zip(markers) {
                        let indent = "  ".repeat(item.depth);
                        match marker {
                            ListMarker::Number(n) => writeln!(f, "{}{}. {}", indent, n, item.text)?,
                            ListMarker::Bullet => writeln!(f, "{}- {}", indent, item.text)?,
                            ListMarker::Continuation => writeln!(f, "{}  {}", indent, item.text)?,
                        }
                    }
                }
                Block::Quote { text } => {
                    for line in text.lines() {
                        writeln!(f, "> {}", line)?;
                    }
                }
                Block::Rule => writeln!(f, "---")?,
            }
        }

        Ok(())
    }
}

/// Parsed content for every section of a registry
#[derive(Debug, Clone)]
pub struct ContentLibrary {
    /// Indexed by `SectionKey`
    blocks: Vec<ContentBlock>,
}

impl ContentLibrary {
    /// Parses one markdown body per section
    ///
    /// Every registry section needs a body, and every body must belong to a
    /// registry section.
    pub fn new(
        registry: &SectionRegistry,
        mut bodies: HashMap<SectionId, String>,
    ) -> Result<Self, ContentError> {
        let mut blocks = Vec::with_capacity(registry.len());

        for section in registry.sections() {
            let body = bodies
                .remove(&section.id)
                .ok_or_else(|| ContentError::MissingBody(section.id.clone()))?;

            blocks.push(ContentBlock {
                section: section.id.clone(),
                title: section.title.clone(),
                blocks: parse_markdown(&body),
            });
        }

        if let Some(unknown) = bodies.into_keys().min() {
            return Err(ContentError::UnknownSection(unknown));
        }

        Ok(Self { blocks })
    }

    /// Content for a registry-issued key
    pub fn get(&self, key: SectionKey) -> &ContentBlock {
        &self.blocks[key.index()]
    }

    /// Content for a section ID, falling back to the default section
    pub fn render(&self, registry: &SectionRegistry, id: &str) -> &ContentBlock {
        self.get(registry.resolve(id))
    }
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Open container, innermost last
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    List,
    Quote,
}

/// The outermost list while its items are collected
struct OpenList {
    ordered: bool,
    start: u64,
    items: Vec<ListItem>,
}

/// Accumulates pulldown-cmark events into blocks
///
/// Only the outermost list or quote becomes a block. Whatever is nested inside
/// it is flattened into that block: list items (with depth) for a list, lines
/// for a quote. A code block inside a list splits the list around it.
#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<Block>,
    text: String,
    heading: Option<u8>,
    code: Option<Option<String>>,
    containers: Vec<Container>,
    list: Option<OpenList>,
    /// Per open list, whether its current item has produced text yet
    item_text: Vec<bool>,
    quote_lines: Vec<String>,
}

impl BlockBuilder {
    fn take_text(&mut self) -> String {
        let text = self.text.trim().to_string();
        self.text.clear();
        text
    }

    fn list_depth(&self) -> usize {
        self.containers
            .iter()
            .filter(|c| **c == Container::List)
            .count()
    }

    /// Marks the current item as having text; returns whether it already had some
    fn mark_item_text(&mut self) -> bool {
        match self.item_text.last_mut() {
            Some(seen) => std::mem::replace(seen, true),
            None => false,
        }
    }

    /// Hands pending text to whichever block is being built
    fn flush(&mut self) {
        let text = self.take_text();
        if text.is_empty() {
            return;
        }

        match self.containers.first() {
            None => self.blocks.push(Block::Paragraph { text }),
            Some(Container::List) => self.push_item(text),
            Some(Container::Quote) => self.push_quote_line(text),
        }
    }

    fn push_item(&mut self, text: String) {
        let depth = self.list_depth().saturating_sub(1);
        let continuation = self.mark_item_text();
        if let Some(list) = &mut self.list {
            list.items.push(ListItem {
                depth,
                text,
                continuation,
            });
        }
    }

    fn push_quote_line(&mut self, text: String) {
        let depth = self.list_depth();
        if depth == 0 {
            self.quote_lines.push(text);
            return;
        }

        let indent = "  ".repeat(depth - 1);
        let line = if self.mark_item_text() {
            format!("{}  {}", indent, text)
        } else {
            format!("{}- {}", indent, text)
        };
        self.quote_lines.push(line);
    }

    /// Moves the items collected so far into a list block, keeping numbering
    fn emit_list(&mut self) {
        if let Some(list) = &mut self.list {
            if list.items.is_empty() {
                return;
            }
            let items = std::mem::take(&mut list.items);
            let numbered = items
                .iter()
                .filter(|item| item.depth == 0 && !item.continuation)
                .count();
            self.blocks.push(Block::List {
                ordered: list.ordered,
                start: list.start,
                items,
            });
            list.start += numbered as u64;
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text.push_str(&text),
            Event::Code(code) => {
                self.text.push('`');
                self.text.push_str(&code);
                self.text.push('`');
            }
            Event::SoftBreak => self.text.push(' '),
            Event::HardBreak => self.text.push('\n'),
            Event::Rule => match self.containers.first() {
                None => self.blocks.push(Block::Rule),
                Some(Container::Quote) => self.quote_lines.push("---".to_string()),
                Some(Container::List) => {}
            },
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush();
                self.heading = Some(heading_level_to_num(level));
            }
            Tag::CodeBlock(kind) => {
                self.flush();
                if self.containers.first() == Some(&Container::List) {
                    self.emit_list();
                }
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(|lang| lang.to_string()),
                    CodeBlockKind::Indented => None,
                };
                self.code = Some(lang);
            }
            Tag::List(start) => {
                // Text gathered so far belongs to the enclosing item or quote
                self.flush();
                if self.containers.is_empty() {
                    self.list = Some(OpenList {
                        ordered: start.is_some(),
                        start: start.unwrap_or(1),
                        items: Vec::new(),
                    });
                }
                self.containers.push(Container::List);
                self.item_text.push(false);
            }
            Tag::Item => {
                self.flush();
                if let Some(seen) = self.item_text.last_mut() {
                    *seen = false;
                }
            }
            Tag::BlockQuote(_) => {
                self.flush();
                self.containers.push(Container::Quote);
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                let level = self.heading.take().unwrap_or(1);
                if self.containers.is_empty() {
                    let text = self.take_text();
                    self.blocks.push(Block::Heading { level, text });
                } else {
                    self.flush();
                }
            }
            TagEnd::CodeBlock => {
                let lang = self.code.take().flatten();
                let text = std::mem::take(&mut self.text);
                if self.containers.first() == Some(&Container::Quote) {
                    self.quote_lines
                        .extend(text.lines().map(|line| line.to_string()));
                } else {
                    self.blocks.push(Block::Code { lang, text });
                }
            }
            TagEnd::Paragraph | TagEnd::Item => self.flush(),
            TagEnd::List(_) => {
                self.flush();
                self.containers.pop();
                self.item_text.pop();
                if self.containers.is_empty() {
                    self.emit_list();
                    self.list = None;
                }
            }
            TagEnd::BlockQuote(_) => {
                self.flush();
                self.containers.pop();
                if self.containers.is_empty() {
                    let text = std::mem::take(&mut self.quote_lines).join("\n");
                    if !text.is_empty() {
                        self.blocks.push(Block::Quote { text });
                    }
                }
            }
            _ => {}
        }
    }
}

/// Marker shown in front of a list item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    Number(u64),
    Bullet,
    /// Further text of the item above, shown without a marker
    Continuation,
}

/// Markers for a list's items; only top-level items of ordered lists are numbered
pub fn list_markers(ordered: bool, start: u64, items: &[ListItem]) -> Vec<ListMarker> {
    let mut next = start;
    items
        .iter()
        .map(|item| {
            if item.continuation {
                ListMarker::Continuation
            } else if ordered && item.depth == 0 {
                next += 1;
                ListMarker::Number(next - 1)
            } else {
                ListMarker::Bullet
            }
        })
        .collect()
}

/// Parses a markdown body into content blocks
pub fn parse_markdown(markdown: &str) -> Vec<Block> {
    let mut builder = BlockBuilder::default();
    for event in Parser::new(markdown) {
        builder.event(event);
    }
    builder.flush();
    builder.blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::{sample_bodies, sample_registry};

    fn library() -> (SectionRegistry, ContentLibrary) {
        let registry = sample_registry();
        let library = ContentLibrary::new(&registry, sample_bodies()).unwrap();
        (registry, library)
    }

    #[test]
    fn parse_heading_and_paragraph() {
        let blocks = parse_markdown("## Setup\n\nRun the *installer* now.\n");
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 2,
                    text: "Setup".to_string()
                },
                Block::Paragraph {
                    text: "Run the installer now.".to_string()
                },
            ]
        );
    }

    #[test]
    fn parse_fenced_code_keeps_language() {
        let blocks = parse_markdown("```bash title=x\ncargo install relay\n```\n");
        assert_eq!(
            blocks,
            vec![Block::Code {
                lang: Some("bash".to_string()),
                text: "cargo install relay\n".to_string()
            }]
        );
    }

    #[test]
    fn parse_inline_code_is_kept() {
        let blocks = parse_markdown("Set `port` to 4222.");
        assert_eq!(
            blocks,
            vec![Block::Paragraph {
                text: "Set `port` to 4222.".to_string()
            }]
        );
    }

    fn item(depth: usize, text: &str) -> ListItem {
        ListItem {
            depth,
            text: text.to_string(),
            continuation: false,
        }
    }

    fn quote(text: &str) -> Block {
        Block::Quote {
            text: text.to_string(),
        }
    }

    #[test]
    fn parse_nested_list() {
        let blocks = parse_markdown("1. First\n   - inner\n2. Second\n");
        assert_eq!(
            blocks,
            vec![Block::List {
                ordered: true,
                start: 1,
                items: vec![item(0, "First"), item(1, "inner"), item(0, "Second")]
            }]
        );
    }

    #[test]
    fn parse_ordered_list_start() {
        let blocks = parse_markdown("3. Third\n4. Fourth\n");
        assert_eq!(
            blocks,
            vec![Block::List {
                ordered: true,
                start: 3,
                items: vec![item(0, "Third"), item(0, "Fourth")]
            }]
        );
    }

    #[test]
    fn code_inside_list_item_splits_list_in_order() {
        let blocks =
            parse_markdown("1. Install the binary:\n\n   ```bash\n   relay serve\n   ```\n2. Publish\n");
        assert_eq!(
            blocks,
            vec![
                Block::List {
                    ordered: true,
                    start: 1,
                    items: vec![item(0, "Install the binary:")]
                },
                Block::Code {
                    lang: Some("bash".to_string()),
                    text: "relay serve\n".to_string()
                },
                Block::List {
                    ordered: true,
                    start: 2,
                    items: vec![item(0, "Publish")]
                },
            ]
        );

        let text = ContentBlock {
            section: SectionId::parse("quick-start").unwrap(),
            title: "Quick Start".to_string(),
            blocks,
        }
        .to_string();
        assert_eq!(
            text,
            "Quick Start\n===========\n\n1. Install the binary:\n\n```bash\nrelay serve\n```\n\n2. Publish\n"
        );
    }

    #[test]
    fn text_after_code_in_item_continues_the_item() {
        let blocks = parse_markdown(
            "1. Start a node:\n\n   ```bash\n   relay serve\n   ```\n\n   Leave it running.\n2. Publish\n",
        );
        assert_eq!(blocks.len(), 3);
        assert_eq!(
            blocks[2],
            Block::List {
                ordered: true,
                start: 2,
                items: vec![
                    ListItem {
                        depth: 0,
                        text: "Leave it running.".to_string(),
                        continuation: true,
                    },
                    item(0, "Publish"),
                ]
            }
        );
        assert_eq!(
            list_markers(true, 2, &[item(0, "a"), item(0, "b")]),
            vec![ListMarker::Number(2), ListMarker::Number(3)]
        );
    }

    #[test]
    fn loose_item_paragraphs_are_kept() {
        let blocks = parse_markdown("- First line\n\n  Second paragraph\n- Next\n");
        assert_eq!(
            blocks,
            vec![Block::List {
                ordered: false,
                start: 1,
                items: vec![
                    item(0, "First line"),
                    ListItem {
                        depth: 0,
                        text: "Second paragraph".to_string(),
                        continuation: true,
                    },
                    item(0, "Next"),
                ]
            }]
        );
    }

    #[test]
    fn list_inside_quote_keeps_leading_text() {
        let blocks = parse_markdown("> Note:\n>\n> - a\n> - b\n");
        assert_eq!(blocks, vec![quote("Note:\n- a\n- b")]);
    }

    #[test]
    fn heading_and_code_inside_quote() {
        let blocks = parse_markdown("> ## Tip\n>\n> Run this:\n>\n> ```\n> relay topic list\n> ```\n");
        assert_eq!(blocks, vec![quote("Tip\nRun this:\nrelay topic list")]);
    }

    #[test]
    fn quote_inside_list_item_stays_in_item() {
        let blocks = parse_markdown("- Step one\n\n  > careful here\n- Step two\n");
        assert_eq!(
            blocks,
            vec![Block::List {
                ordered: false,
                start: 1,
                items: vec![
                    item(0, "Step one"),
                    ListItem {
                        depth: 0,
                        text: "careful here".to_string(),
                        continuation: true,
                    },
                    item(0, "Step two"),
                ]
            }]
        );
    }

    #[test]
    fn parse_quote_and_rule() {
        let blocks = parse_markdown("> Heads up\n\n---\n");
        assert_eq!(blocks, vec![quote("Heads up"), Block::Rule]);
    }

    #[test]
    fn every_section_has_content() {
        let (registry, library) = library();
        for section in registry.sections() {
            let block = library.render(&registry, section.id.as_str());
            assert_eq!(&block.section, &section.id);
            assert_eq!(block.title, section.title);
        }
    }

    #[test]
    fn unknown_id_renders_default() {
        let (registry, library) = library();
        assert_eq!(
            library.render(&registry, "does-not-exist"),
            library.render(&registry, "introduction")
        );
    }

    #[test]
    fn render_is_idempotent() {
        let (registry, library) = library();
        let first = library.render(&registry, "installation").clone();
        let second = library.render(&registry, "installation").clone();
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn missing_body_is_rejected() {
        let registry = sample_registry();
        let mut bodies = sample_bodies();
        bodies.remove(&SectionId::parse("configuration").unwrap());
        assert_eq!(
            ContentLibrary::new(&registry, bodies).unwrap_err(),
            ContentError::MissingBody(SectionId::parse("configuration").unwrap())
        );
    }

    #[test]
    fn unknown_body_is_rejected() {
        let registry = sample_registry();
        let mut bodies = sample_bodies();
        bodies.insert(SectionId::parse("stray").unwrap(), "text".to_string());
        assert_eq!(
            ContentLibrary::new(&registry, bodies).unwrap_err(),
            ContentError::UnknownSection(SectionId::parse("stray").unwrap())
        );
    }

    #[test]
    fn display_renders_title_and_blocks() {
        let (registry, library) = library();
        let text = library.render(&registry, "installation").to_string();
        assert!(text.starts_with("Installation\n============\n"));
        assert!(text.contains("```bash"));
    }
}
