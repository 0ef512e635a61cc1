use super::nodes::{DocBookNode, HeadingNode, LiteralNode, ParagraphNode, RootNode};
use crate::formatter::Formatter;
use crate::ids::IdGenerator;
use crate::node::ArrayNode;

#[derive(Debug, Clone)]
pub struct DocBookFormatter {
    ids: IdGenerator,
}

impl DocBookFormatter {
    /// `ids` names the section every heading renders as.
    pub fn new(ids: IdGenerator) -> Self {
        DocBookFormatter { ids }
    }
}

impl Formatter for DocBookFormatter {
    type Node = DocBookNode;

    fn format_id(&self) -> &'static str {
        "docbook"
    }

    fn file_extension(&self) -> &'static str {
        "xml"
    }

    fn generate_root(&self, content: DocBookNode) -> DocBookNode {
        RootNode::from_node(content).into()
    }

    fn generate_paragraph_block(&self, content: DocBookNode) -> DocBookNode {
        ParagraphNode::new(content).into()
    }

    fn generate_heading_block(
        &self,
        title: &str,
        level: u32,
        paragraph: Option<DocBookNode>,
    ) -> DocBookNode {
        HeadingNode::new(title, level, paragraph, Some(self.ids.next_id())).into()
    }

    fn generate_text_inline(&self, text: DocBookNode) -> DocBookNode {
        LiteralNode::wrap(text).into()
    }

    fn generate_literal(&self, literal: &str) -> DocBookNode {
        LiteralNode::text(literal).into()
    }

    fn generate_array(&self, items: Vec<DocBookNode>) -> DocBookNode {
        ArrayNode::new(items).into()
    }
}
