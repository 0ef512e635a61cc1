//! Flat HTML dialect. Headings are plain `<hN>` elements followed by their
//! paragraph; there is no section hierarchy, so no transformer is needed.

use crate::error::FormatError;
use crate::formatter::Formatter;
use crate::node::{ArrayItem, ArrayNode, NodesContainer, OutputNode, Render};

/// HTML has six heading ranks; deeper levels render as `<h6>`.
const MAX_HEADING_RANK: u32 = 6;

#[derive(Debug, Clone)]
pub enum HtmlNode {
    Body(ArrayNode<HtmlNode>),
    Paragraph(ArrayNode<HtmlNode>),
    Heading {
        level: u32,
        title: String,
        paragraph: Option<Box<HtmlNode>>,
    },
    Text(String),
    Inline(Box<HtmlNode>),
    Array(ArrayNode<HtmlNode>),
}

fn into_content(node: HtmlNode) -> ArrayNode<HtmlNode> {
    match node {
        HtmlNode::Array(array) => array,
        other => ArrayNode::new(vec![other]),
    }
}

impl Render for HtmlNode {
    fn render(&self) -> Result<String, FormatError> {
        match self {
            HtmlNode::Body(content) => Ok(format!("<body>{}</body>", content.render()?)),
            HtmlNode::Paragraph(content) => Ok(format!("<p>{}</p>", content.render()?)),
            HtmlNode::Heading {
                level,
                title,
                paragraph,
            } => {
                let rank = (*level).clamp(1, MAX_HEADING_RANK);
                let paragraph = match paragraph {
                    Some(p) => p.render()?,
                    None => String::new(),
                };
                Ok(format!(
                    "<h{rank}>{}</h{rank}>{paragraph}",
                    html_escape::encode_text(title)
                ))
            }
            HtmlNode::Text(text) => Ok(html_escape::encode_text(text).into_owned()),
            HtmlNode::Inline(node) => node.render(),
            HtmlNode::Array(items) => items.render(),
        }
    }
}

impl OutputNode for HtmlNode {}

impl ArrayItem for HtmlNode {
    fn render_item(&self) -> Option<Result<String, FormatError>> {
        Some(self.render())
    }
}

impl NodesContainer<HtmlNode> for HtmlNode {
    fn child_nodes(&self) -> Vec<&HtmlNode> {
        match self {
            HtmlNode::Body(content) | HtmlNode::Paragraph(content) | HtmlNode::Array(content) => {
                content.items()
            }
            HtmlNode::Heading { paragraph, .. } => paragraph.iter().map(|p| &**p).collect(),
            HtmlNode::Inline(node) => vec![&**node],
            HtmlNode::Text(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlFormatter;

impl Formatter for HtmlFormatter {
    type Node = HtmlNode;

    fn format_id(&self) -> &'static str {
        "html"
    }

    fn file_extension(&self) -> &'static str {
        "html"
    }

    fn generate_root(&self, content: HtmlNode) -> HtmlNode {
        HtmlNode::Body(into_content(content))
    }

    fn generate_paragraph_block(&self, content: HtmlNode) -> HtmlNode {
        HtmlNode::Paragraph(into_content(content))
    }

    fn generate_heading_block(&self, title: &str, level: u32, paragraph: Option<HtmlNode>) -> HtmlNode {
        HtmlNode::Heading {
            level,
            title: title.to_string(),
            paragraph: paragraph.map(|node| match node {
                HtmlNode::Paragraph(_) => Box::new(node),
                other => Box::new(HtmlNode::Paragraph(into_content(other))),
            }),
        }
    }

    fn generate_text_inline(&self, text: HtmlNode) -> HtmlNode {
        HtmlNode::Inline(Box::new(text))
    }

    fn generate_literal(&self, literal: &str) -> HtmlNode {
        HtmlNode::Text(literal.to_string())
    }

    fn generate_array(&self, items: Vec<HtmlNode>) -> HtmlNode {
        HtmlNode::Array(ArrayNode::new(items))
    }
}
