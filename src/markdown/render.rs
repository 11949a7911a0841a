//! Markdown to HTML rendering
//!
//! comrak produces the HTML; fenced code blocks are swapped for
//! syntect-highlighted `<pre>` blocks before formatting.

use super::parser::{code_language, MarkdownOptions};
use super::syntax::{escape_html, get_highlighter};
use crate::config::Theme;
use crate::theme::ThemeColors;
use comrak::nodes::{NodeHtmlBlock, NodeValue};
use comrak::{format_html, parse_document, Arena};
use log::warn;

/// Render markdown to an HTML fragment with highlighted code blocks.
///
/// # Example
/// ```ignore
/// let html = render_html("# Hi", Theme::Light);
/// assert!(html.contains("<h1>"));
/// ```
pub fn render_html(markdown: &str, theme: Theme) -> String {
    let options = MarkdownOptions::default().to_comrak_options();
    let arena = Arena::new();
    let root = parse_document(&arena, markdown, &options);

    let highlighter = get_highlighter();
    let code_blocks: Vec<_> = root
        .descendants()
        .filter(|node| matches!(node.data.borrow().value, NodeValue::CodeBlock(_)))
        .collect();

    for node in code_blocks {
        let mut ast = node.data.borrow_mut();
        let NodeValue::CodeBlock(code) = &ast.value else {
            continue;
        };

        let language = code_language(&code.info).to_string();
        let body = highlighter.highlight_to_html(&code.literal, &language, theme);
        let literal = if language.is_empty() {
            format!("<div class=\"code-block\">\n{}</div>\n", body)
        } else {
            format!(
                "<div class=\"code-block\" data-lang=\"{}\">\n{}</div>\n",
                escape_html(&language),
                body
            )
        };

        ast.value = NodeValue::HtmlBlock(NodeHtmlBlock {
            block_type: 0,
            literal,
        });
    }

    let mut html = Vec::new();
    if let Err(e) = format_html(root, &options, &mut html) {
        warn!("Failed to format HTML: {}", e);
    }
    String::from_utf8_lossy(&html).into_owned()
}

/// Render markdown to a complete standalone HTML page.
pub fn render_html_document(markdown: &str, title: &str, theme: Theme) -> String {
    let body = render_html(markdown, theme);
    let colors = ThemeColors::for_theme(theme);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="Markdown Express">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <article class="markdown-body">
{body}
    </article>
</body>
</html>
"#,
        title = escape_html(title),
        css = theme_css(&colors),
        body = body,
    )
}

fn theme_css(colors: &ThemeColors) -> String {
    format!(
        r#"        body {{
            margin: 0;
            background: {background};
            color: {text};
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            line-height: 1.6;
        }}
        .markdown-body {{ max-width: 860px; margin: 0 auto; padding: 32px; }}
        a {{ color: {link}; }}
        h1, h2 {{ border-bottom: 1px solid {border}; padding-bottom: .3em; }}
        blockquote {{ margin: 0; padding: 0 1em; color: {muted}; border-left: 4px solid {border}; }}
        code {{ background: {code_bg}; padding: .15em .35em; border-radius: 4px; }}
        pre {{ padding: 12px 16px; border-radius: 6px; overflow-x: auto; background: {code_bg}; }}
        pre code {{ background: none; padding: 0; }}
        table {{ border-collapse: collapse; }}
        th, td {{ border: 1px solid {border}; padding: 6px 13px; }}
        hr {{ border: none; border-top: 1px solid {border}; }}
        img {{ max-width: 100%; }}"#,
        background = css_color(colors.base.background),
        text = css_color(colors.text.primary),
        link = css_color(colors.text.link),
        border = css_color(colors.base.border),
        muted = css_color(colors.text.muted),
        code_bg = css_color(colors.editor.code_block_bg),
    )
}

fn css_color(color: eframe::egui::Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}
