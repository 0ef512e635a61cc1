use super::tokens;
use crate::error::FormatError;
use crate::node::{
    Annotations, ArrayItem, ArrayNode, ModifiableNodesContainer, NodesContainer, OutputNode,
    Render,
};
use crate::utils::{At, Handle};

/// Annotation carried by a paragraph a heading created around content that
/// was not a paragraph.
pub const PARA_SYNTHETIC_ANNOTATION: &str = "synthetic-paragraph";

#[derive(Debug, Clone)]
pub enum DocBookNode {
    Root(RootNode),
    Paragraph(ParagraphNode),
    Heading(HeadingNode),
    Section(SectionNode),
    Literal(LiteralNode),
    Array(ArrayNode<DocBookNode>),
}

impl DocBookNode {
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            DocBookNode::Root(_) => "root",
            DocBookNode::Paragraph(_) => "paragraph",
            DocBookNode::Heading(_) => "heading",
            DocBookNode::Section(_) => "section",
            DocBookNode::Literal(_) => "literal",
            DocBookNode::Array(_) => "array",
        }
    }

    #[must_use]
    pub fn as_container(&self) -> Option<&dyn NodesContainer<DocBookNode>> {
        match self {
            DocBookNode::Root(node) => Some(node),
            DocBookNode::Paragraph(node) => Some(node),
            DocBookNode::Heading(node) => Some(node),
            DocBookNode::Section(node) => Some(node),
            DocBookNode::Array(node) => Some(node),
            DocBookNode::Literal(_) => None,
        }
    }

    /// The node as a container that accepts new children, if it is one.
    pub fn as_container_mut(&mut self) -> Option<&mut dyn ModifiableNodesContainer<DocBookNode>> {
        match self {
            DocBookNode::Root(node) => Some(node),
            DocBookNode::Heading(node) => Some(node),
            DocBookNode::Section(node) => Some(node),
            DocBookNode::Paragraph(_) | DocBookNode::Literal(_) | DocBookNode::Array(_) => None,
        }
    }

    /// Children of the node; empty for leaves.
    #[must_use]
    pub fn child_nodes(&self) -> Vec<&DocBookNode> {
        self.as_container()
            .map(|container| container.child_nodes())
            .unwrap_or_default()
    }
}

impl Render for DocBookNode {
    fn render(&self) -> Result<String, FormatError> {
        match self {
            DocBookNode::Root(node) => node.render(),
            DocBookNode::Paragraph(node) => node.render(),
            DocBookNode::Heading(node) => node.render(),
            DocBookNode::Section(node) => node.render(),
            DocBookNode::Literal(node) => node.render(),
            DocBookNode::Array(node) => node.render(),
        }
    }
}

impl OutputNode for DocBookNode {
    fn annotations(&self) -> Option<&Annotations> {
        match self {
            DocBookNode::Paragraph(node) => node.annotations(),
            DocBookNode::Section(node) => node.annotations(),
            _ => None,
        }
    }
}

impl ArrayItem for DocBookNode {
    fn render_item(&self) -> Option<Result<String, FormatError>> {
        Some(self.render())
    }
}

/// Turns a generated content node into a child collection.
fn into_content(node: DocBookNode) -> ArrayNode<DocBookNode> {
    match node {
        DocBookNode::Array(array) => array,
        other => ArrayNode::new(vec![other]),
    }
}

#[derive(Debug, Clone, Default)]
pub struct RootNode {
    content: ArrayNode<DocBookNode>,
}

impl RootNode {
    pub fn new(content: ArrayNode<DocBookNode>) -> Self {
        RootNode { content }
    }

    pub fn from_children(children: Vec<DocBookNode>) -> Self {
        RootNode::new(ArrayNode::new(children))
    }

    pub fn from_node(content: DocBookNode) -> Self {
        RootNode::new(into_content(content))
    }
}

impl Render for RootNode {
    fn render(&self) -> Result<String, FormatError> {
        Ok(format!(
            "{}{}{}",
            tokens::BOOK_OPEN,
            self.content.render()?,
            tokens::BOOK_CLOSE
        ))
    }
}

impl OutputNode for RootNode {}

impl NodesContainer<DocBookNode> for RootNode {
    fn child_nodes(&self) -> Vec<&DocBookNode> {
        self.content.items()
    }
}

impl ModifiableNodesContainer<DocBookNode> for RootNode {
    fn add_child_node(&mut self, node: DocBookNode, at: Option<At>) -> Result<usize, FormatError> {
        self.content.add(node, at)
    }

    fn remove_child_node(&mut self, at: At) -> Result<Option<DocBookNode>, FormatError> {
        self.content.remove(at)
    }

    fn child_handle(&self, index: usize) -> Option<Handle> {
        self.content.handle_at(index)
    }
}

#[derive(Debug, Clone)]
pub struct ParagraphNode {
    content: ArrayNode<DocBookNode>,
    annotations: Option<Annotations>,
}

impl ParagraphNode {
    pub fn new(content: DocBookNode) -> Self {
        ParagraphNode {
            content: into_content(content),
            annotations: None,
        }
    }

    /// A paragraph created by the pipeline rather than read from the source.
    pub fn synthetic(content: DocBookNode) -> Self {
        ParagraphNode {
            content: into_content(content),
            annotations: Some(Annotations::described(PARA_SYNTHETIC_ANNOTATION)),
        }
    }
}

impl Render for ParagraphNode {
    fn render(&self) -> Result<String, FormatError> {
        Ok(format!(
            "{}{}{}",
            tokens::PARAGRAPH_OPEN,
            self.content.render()?,
            tokens::PARAGRAPH_CLOSE
        ))
    }
}

impl OutputNode for ParagraphNode {
    fn annotations(&self) -> Option<&Annotations> {
        self.annotations.as_ref()
    }
}

impl NodesContainer<DocBookNode> for ParagraphNode {
    fn child_nodes(&self) -> Vec<&DocBookNode> {
        self.content.items()
    }
}

/// A heading and the content that belongs to it. Renders as a titled section.
#[derive(Debug, Clone)]
pub struct HeadingNode {
    title: String,
    level: u32,
    id: Option<String>,
    // Created on first use.
    content: Option<ArrayNode<DocBookNode>>,
}

impl HeadingNode {
    /// `paragraph` becomes the first child. Anything that is not already a
    /// paragraph is wrapped in a synthetic one.
    pub fn new(
        title: impl Into<String>,
        level: u32,
        paragraph: Option<DocBookNode>,
        id: Option<String>,
    ) -> Self {
        let content = paragraph.map(|node| {
            let paragraph = match node {
                DocBookNode::Paragraph(p) => DocBookNode::Paragraph(p),
                other => DocBookNode::Paragraph(ParagraphNode::synthetic(other)),
            };
            ArrayNode::new(vec![paragraph])
        });
        HeadingNode {
            title: title.into(),
            level,
            id,
            content,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Render for HeadingNode {
    fn render(&self) -> Result<String, FormatError> {
        let content = match &self.content {
            Some(content) => content.render()?,
            None => String::new(),
        };
        Ok(format!(
            "{}{}{}{}{}{}",
            tokens::section_open(self.id()),
            tokens::TITLE_OPEN,
            html_escape::encode_text(&self.title),
            tokens::TITLE_CLOSE,
            content,
            tokens::SECTION_CLOSE
        ))
    }
}

impl OutputNode for HeadingNode {}

impl NodesContainer<DocBookNode> for HeadingNode {
    fn child_nodes(&self) -> Vec<&DocBookNode> {
        self.content
            .as_ref()
            .map(ArrayNode::items)
            .unwrap_or_default()
    }
}

impl ModifiableNodesContainer<DocBookNode> for HeadingNode {
    fn add_child_node(&mut self, node: DocBookNode, at: Option<At>) -> Result<usize, FormatError> {
        self.content
            .get_or_insert_with(ArrayNode::default)
            .add(node, at)
    }

    fn remove_child_node(&mut self, at: At) -> Result<Option<DocBookNode>, FormatError> {
        match (&mut self.content, at) {
            (Some(content), at) => content.remove(at),
            (None, At::Index(index)) => Err(FormatError::IndexOutOfRange { index, len: 0 }),
            (None, At::Handle(_)) => Ok(None),
        }
    }

    fn child_handle(&self, index: usize) -> Option<Handle> {
        self.content.as_ref().and_then(|c| c.handle_at(index))
    }
}

/// Grouping node with no AST counterpart; only the transformer builds these.
#[derive(Debug, Clone)]
pub struct SectionNode {
    id: Option<String>,
    content: ArrayNode<DocBookNode>,
    annotations: Option<Annotations>,
}

impl SectionNode {
    pub fn new(children: Vec<DocBookNode>, id: Option<String>) -> Self {
        SectionNode {
            id,
            content: ArrayNode::new(children),
            annotations: None,
        }
    }

    #[must_use]
    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = Some(annotations);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Render for SectionNode {
    fn render(&self) -> Result<String, FormatError> {
        Ok(format!(
            "{}{}{}",
            tokens::section_open(self.id()),
            self.content.render()?,
            tokens::SECTION_CLOSE
        ))
    }
}

impl OutputNode for SectionNode {
    fn annotations(&self) -> Option<&Annotations> {
        self.annotations.as_ref()
    }
}

impl NodesContainer<DocBookNode> for SectionNode {
    fn child_nodes(&self) -> Vec<&DocBookNode> {
        self.content.items()
    }
}

impl ModifiableNodesContainer<DocBookNode> for SectionNode {
    fn add_child_node(&mut self, node: DocBookNode, at: Option<At>) -> Result<usize, FormatError> {
        self.content.add(node, at)
    }

    fn remove_child_node(&mut self, at: At) -> Result<Option<DocBookNode>, FormatError> {
        self.content.remove(at)
    }

    fn child_handle(&self, index: usize) -> Option<Handle> {
        self.content.handle_at(index)
    }
}

#[derive(Debug, Clone)]
pub enum Literal {
    Text(String),
    Node(Box<DocBookNode>),
}

/// Raw text, or a single wrapped node for one-item inline content.
#[derive(Debug, Clone)]
pub struct LiteralNode {
    literal: Literal,
}

impl LiteralNode {
    pub fn text(text: impl Into<String>) -> Self {
        LiteralNode {
            literal: Literal::Text(text.into()),
        }
    }

    pub fn wrap(node: DocBookNode) -> Self {
        LiteralNode {
            literal: Literal::Node(Box::new(node)),
        }
    }

    pub fn literal(&self) -> &Literal {
        &self.literal
    }
}

impl Render for LiteralNode {
    fn render(&self) -> Result<String, FormatError> {
        match &self.literal {
            Literal::Text(text) => Ok(html_escape::encode_text(text).into_owned()),
            Literal::Node(node) => node.render(),
        }
    }
}

impl OutputNode for LiteralNode {}

impl From<RootNode> for DocBookNode {
    fn from(node: RootNode) -> Self {
        DocBookNode::Root(node)
    }
}

impl From<ParagraphNode> for DocBookNode {
    fn from(node: ParagraphNode) -> Self {
        DocBookNode::Paragraph(node)
    }
}

impl From<HeadingNode> for DocBookNode {
    fn from(node: HeadingNode) -> Self {
        DocBookNode::Heading(node)
    }
}

impl From<SectionNode> for DocBookNode {
    fn from(node: SectionNode) -> Self {
        DocBookNode::Section(node)
    }
}

impl From<LiteralNode> for DocBookNode {
    fn from(node: LiteralNode) -> Self {
        DocBookNode::Literal(node)
    }
}

impl From<ArrayNode<DocBookNode>> for DocBookNode {
    fn from(node: ArrayNode<DocBookNode>) -> Self {
        DocBookNode::Array(node)
    }
}
