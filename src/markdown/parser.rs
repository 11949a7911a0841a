//! Markdown parser built on comrak
//!
//! Converts comrak's arena AST into an owned tree that the preview can keep
//! between frames.

use comrak::{
    nodes::{AstNode, ListDelimType, ListType as ComrakListType, NodeValue, TableAlignment as ComrakTableAlignment},
    parse_document, Arena, Options,
};

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration options for markdown parsing and rendering.
#[derive(Debug, Clone)]
pub struct MarkdownOptions {
    /// Enable GitHub Flavored Markdown tables
    pub tables: bool,
    /// Enable strikethrough syntax (~~text~~)
    pub strikethrough: bool,
    /// Enable autolink URLs and emails
    pub autolink: bool,
    /// Enable task lists (- [ ] and - [x])
    pub tasklist: bool,
    /// Render single newlines inside paragraphs as line breaks
    pub hard_breaks: bool,
    /// Pass raw HTML through to the output
    pub raw_html: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            autolink: true,
            tasklist: true,
            hard_breaks: true,
            raw_html: true,
        }
    }
}

impl MarkdownOptions {
    /// Convert to comrak Options.
    pub fn to_comrak_options(&self) -> Options {
        let mut options = Options::default();

        options.extension.strikethrough = self.strikethrough;
        options.extension.table = self.tables;
        options.extension.autolink = self.autolink;
        options.extension.tasklist = self.tasklist;

        options.render.hardbreaks = self.hard_breaks;
        options.render.unsafe_ = self.raw_html;

        options
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// AST Types
// ─────────────────────────────────────────────────────────────────────────────

/// List type (ordered or unordered)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListType {
    Bullet,
    Ordered { start: usize, delimiter: char },
}

/// Table cell alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableAlignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl From<ComrakTableAlignment> for TableAlignment {
    fn from(align: ComrakTableAlignment) -> Self {
        match align {
            ComrakTableAlignment::None => TableAlignment::None,
            ComrakTableAlignment::Left => TableAlignment::Left,
            ComrakTableAlignment::Center => TableAlignment::Center,
            ComrakTableAlignment::Right => TableAlignment::Right,
        }
    }
}

/// Represents the type of a markdown node.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkdownNodeType {
    /// Root document node
    Document,
    /// Block quote (>)
    BlockQuote,
    /// List container
    List { list_type: ListType, tight: bool },
    /// List item
    Item,
    /// Task list item; `checked` is the box state
    TaskItem { checked: bool },
    /// Code block with optional language
    CodeBlock { language: String, literal: String },
    /// HTML block
    HtmlBlock(String),
    /// Paragraph
    Paragraph,
    /// Heading, level 1-6
    Heading { level: u8 },
    /// Thematic break (horizontal rule)
    ThematicBreak,
    /// Table
    Table { alignments: Vec<TableAlignment> },
    /// Table row
    TableRow { header: bool },
    /// Table cell
    TableCell,
    /// Inline text content
    Text(String),
    /// Soft line break
    SoftBreak,
    /// Hard line break
    LineBreak,
    /// Inline code
    Code(String),
    /// Inline HTML
    HtmlInline(String),
    /// Emphasis (italic)
    Emphasis,
    /// Strong emphasis (bold)
    Strong,
    /// Strikethrough
    Strikethrough,
    /// Link
    Link { url: String, title: String },
    /// Image
    Image { url: String, title: String },
    /// Anything the preview does not draw specially
    Other,
}

impl MarkdownNodeType {
    /// Whether this node starts a block rather than flowing inline.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            MarkdownNodeType::Document
                | MarkdownNodeType::BlockQuote
                | MarkdownNodeType::List { .. }
                | MarkdownNodeType::Item
                | MarkdownNodeType::TaskItem { .. }
                | MarkdownNodeType::CodeBlock { .. }
                | MarkdownNodeType::HtmlBlock(_)
                | MarkdownNodeType::Paragraph
                | MarkdownNodeType::Heading { .. }
                | MarkdownNodeType::ThematicBreak
                | MarkdownNodeType::Table { .. }
                | MarkdownNodeType::TableRow { .. }
                | MarkdownNodeType::TableCell
        )
    }
}

/// A node in the markdown AST with position information.
#[derive(Debug, Clone)]
pub struct MarkdownNode {
    /// The type of this node
    pub node_type: MarkdownNodeType,
    /// Child nodes
    pub children: Vec<MarkdownNode>,
    /// Start line in source (1-indexed)
    pub start_line: usize,
    /// End line in source (1-indexed)
    pub end_line: usize,
}

impl MarkdownNode {
    /// Get all text content from this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, output: &mut String) {
        match &self.node_type {
            MarkdownNodeType::Text(t) => output.push_str(t),
            MarkdownNodeType::Code(t) => output.push_str(t),
            MarkdownNodeType::SoftBreak => output.push(' '),
            MarkdownNodeType::LineBreak => output.push('\n'),
            _ => {}
        }
        for child in &self.children {
            child.collect_text(output);
        }
    }
}

/// A parsed markdown document.
#[derive(Debug, Clone)]
pub struct MarkdownDocument {
    /// Root node of the AST
    pub root: MarkdownNode,
}

impl MarkdownDocument {
    /// Top-level blocks in document order.
    pub fn blocks(&self) -> &[MarkdownNode] {
        &self.root.children
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Parse markdown text into an owned AST with the default options.
///
/// # Example
/// ```ignore
/// let doc = parse_markdown("# Hello\n\nWorld");
/// assert_eq!(doc.blocks().len(), 2);
/// ```
pub fn parse_markdown(markdown: &str) -> MarkdownDocument {
    parse_markdown_with_options(markdown, &MarkdownOptions::default())
}

/// Parse markdown text with custom options.
pub fn parse_markdown_with_options(markdown: &str, options: &MarkdownOptions) -> MarkdownDocument {
    let arena = Arena::new();
    let comrak_options = options.to_comrak_options();
    let root = parse_document(&arena, markdown, &comrak_options);

    MarkdownDocument {
        root: convert_node(root),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Internal Conversion Functions
// ─────────────────────────────────────────────────────────────────────────────

fn convert_node<'a>(node: &'a AstNode<'a>) -> MarkdownNode {
    let ast = node.data.borrow();
    let sourcepos = ast.sourcepos;

    MarkdownNode {
        node_type: convert_node_value(&ast.value),
        children: node.children().map(convert_node).collect(),
        start_line: sourcepos.start.line,
        end_line: sourcepos.end.line,
    }
}

fn convert_node_value(value: &NodeValue) -> MarkdownNodeType {
    match value {
        NodeValue::Document => MarkdownNodeType::Document,
        NodeValue::BlockQuote => MarkdownNodeType::BlockQuote,
        NodeValue::List(list) => {
            let list_type = match list.list_type {
                ComrakListType::Bullet => ListType::Bullet,
                ComrakListType::Ordered => ListType::Ordered {
                    start: list.start,
                    delimiter: if list.delimiter == ListDelimType::Period {
                        '.'
                    } else {
                        ')'
                    },
                },
            };
            MarkdownNodeType::List {
                list_type,
                tight: list.tight,
            }
        }
        NodeValue::Item(_) => MarkdownNodeType::Item,
        NodeValue::TaskItem(checked) => MarkdownNodeType::TaskItem {
            checked: checked.map(|c| c == 'x' || c == 'X').unwrap_or(false),
        },
        NodeValue::CodeBlock(code) => MarkdownNodeType::CodeBlock {
            language: code_language(&code.info).to_string(),
            literal: code.literal.clone(),
        },
        NodeValue::HtmlBlock(html) => MarkdownNodeType::HtmlBlock(html.literal.clone()),
        NodeValue::Paragraph => MarkdownNodeType::Paragraph,
        NodeValue::Heading(heading) => MarkdownNodeType::Heading {
            level: heading.level.clamp(1, 6),
        },
        NodeValue::ThematicBreak => MarkdownNodeType::ThematicBreak,
        NodeValue::Table(table) => MarkdownNodeType::Table {
            alignments: table
                .alignments
                .iter()
                .map(|a| TableAlignment::from(*a))
                .collect(),
        },
        NodeValue::TableRow(header) => MarkdownNodeType::TableRow { header: *header },
        NodeValue::TableCell => MarkdownNodeType::TableCell,
        NodeValue::Text(text) => MarkdownNodeType::Text(text.clone()),
        NodeValue::SoftBreak => MarkdownNodeType::SoftBreak,
        NodeValue::LineBreak => MarkdownNodeType::LineBreak,
        NodeValue::Code(code) => MarkdownNodeType::Code(code.literal.clone()),
        NodeValue::HtmlInline(html) => MarkdownNodeType::HtmlInline(html.clone()),
        NodeValue::Emph => MarkdownNodeType::Emphasis,
        NodeValue::Strong => MarkdownNodeType::Strong,
        NodeValue::Strikethrough => MarkdownNodeType::Strikethrough,
        NodeValue::Link(link) => MarkdownNodeType::Link {
            url: link.url.clone(),
            title: link.title.clone(),
        },
        NodeValue::Image(image) => MarkdownNodeType::Image {
            url: image.url.clone(),
            title: image.title.clone(),
        },
        _ => MarkdownNodeType::Other,
    }
}

/// First word of a fence info string (```` ```rust title="x" ```` → `rust`).
pub fn code_language(info: &str) -> &str {
    info.split_whitespace().next().unwrap_or("")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_document() {
        let doc = parse_markdown("");
        assert!(doc.blocks().is_empty());
    }

    #[test]
    fn test_parse_heading_levels() {
        let doc = parse_markdown("# One\n\n### Three");
        assert_eq!(doc.blocks().len(), 2);
        assert_eq!(doc.blocks()[0].node_type, MarkdownNodeType::Heading { level: 1 });
        assert_eq!(doc.blocks()[1].node_type, MarkdownNodeType::Heading { level: 3 });
        assert_eq!(doc.blocks()[1].text_content(), "Three");
    }

    #[test]
    fn test_parse_nested_list() {
        let doc = parse_markdown("- a\n  - b\n- c");
        let list = &doc.blocks()[0];
        assert!(matches!(
            list.node_type,
            MarkdownNodeType::List {
                list_type: ListType::Bullet,
                ..
            }
        ));
        assert_eq!(list.children.len(), 2);

        let first_item = &list.children[0];
        assert!(first_item
            .children
            .iter()
            .any(|c| matches!(c.node_type, MarkdownNodeType::List { .. })));
    }

    #[test]
    fn test_parse_ordered_list_start() {
        let doc = parse_markdown("3. three\n4. four");
        assert_eq!(
            doc.blocks()[0].node_type,
            MarkdownNodeType::List {
                list_type: ListType::Ordered {
                    start: 3,
                    delimiter: '.'
                },
                tight: true
            }
        );
    }

    #[test]
    fn test_parse_task_list() {
        let doc = parse_markdown("- [x] done\n- [ ] todo");
        let items = &doc.blocks()[0].children;
        assert_eq!(items[0].node_type, MarkdownNodeType::TaskItem { checked: true });
        assert_eq!(items[1].node_type, MarkdownNodeType::TaskItem { checked: false });
    }

    #[test]
    fn test_parse_code_block_language() {
        let doc = parse_markdown("```python extra\nprint(1)\n```");
        assert_eq!(
            doc.blocks()[0].node_type,
            MarkdownNodeType::CodeBlock {
                language: "python".to_string(),
                literal: "print(1)\n".to_string()
            }
        );
    }

    #[test]
    fn test_parse_table_alignment() {
        let doc = parse_markdown("| a | b |\n|:--|--:|\n| 1 | 2 |");
        assert_eq!(
            doc.blocks()[0].node_type,
            MarkdownNodeType::Table {
                alignments: vec![TableAlignment::Left, TableAlignment::Right]
            }
        );
        let rows = &doc.blocks()[0].children;
        assert_eq!(rows[0].node_type, MarkdownNodeType::TableRow { header: true });
        assert_eq!(rows[1].node_type, MarkdownNodeType::TableRow { header: false });
    }

    #[test]
    fn test_soft_break_is_hard_with_defaults() {
        let doc = parse_markdown("line one\nline two");
        let para = &doc.blocks()[0];
        assert!(para
            .children
            .iter()
            .any(|c| c.node_type == MarkdownNodeType::SoftBreak
                || c.node_type == MarkdownNodeType::LineBreak));
        assert_eq!(para.text_content().lines().count(), 1);
    }

    #[test]
    fn test_inline_styles() {
        let doc = parse_markdown("**b** *i* ~~s~~ `c` [l](https://example.com)");
        let kinds: Vec<_> = doc.blocks()[0]
            .children
            .iter()
            .map(|c| c.node_type.clone())
            .collect();
        assert!(kinds.contains(&MarkdownNodeType::Strong));
        assert!(kinds.contains(&MarkdownNodeType::Emphasis));
        assert!(kinds.contains(&MarkdownNodeType::Strikethrough));
        assert!(kinds.contains(&MarkdownNodeType::Code("c".to_string())));
        assert!(kinds.iter().any(|k| matches!(
            k,
            MarkdownNodeType::Link { url, .. } if url == "https://example.com"
        )));
    }

    #[test]
    fn test_source_lines() {
        let doc = parse_markdown("# Title\n\nPara\nmore\n");
        assert_eq!(doc.blocks()[0].start_line, 1);
        assert_eq!(doc.blocks()[1].start_line, 3);
        assert_eq!(doc.blocks()[1].end_line, 4);
    }

    #[test]
    fn test_block_classification() {
        assert!(MarkdownNodeType::Paragraph.is_block());
        assert!(!MarkdownNodeType::Strong.is_block());
        assert!(!MarkdownNodeType::Text(String::new()).is_block());
    }

    #[test]
    fn test_code_language() {
        assert_eq!(code_language("rust ignore"), "rust");
        assert_eq!(code_language(""), "");
    }
}
