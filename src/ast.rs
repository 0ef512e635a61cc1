use std::fmt::{self, Display};

/// The kinds of node an AST can carry.
///
/// Consumers match on this exhaustively, so a new kind is a compile error
/// everywhere it is not yet handled.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum NodeKind {
    Root,
    ParagraphBlock,
    TextInline,
    HeadingBlock,
    Heading,
}

impl NodeKind {
    pub const ALL: [NodeKind; 5] = [
        NodeKind::Root,
        NodeKind::ParagraphBlock,
        NodeKind::TextInline,
        NodeKind::HeadingBlock,
        NodeKind::Heading,
    ];

    /// The tag used for this kind on the wire.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            NodeKind::Root => "ROOT",
            NodeKind::ParagraphBlock => "PARAGRAPH:BLOCK",
            NodeKind::TextInline => "TEXT:INLINE",
            NodeKind::HeadingBlock => "HEADING:BLOCK",
            NodeKind::Heading => "HEADING",
        }
    }

    #[must_use]
    pub fn from_tag(tag: &str) -> Option<NodeKind> {
        NodeKind::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct AstNode {
    pub kind: NodeKind,
    pub value: AstValue,
}

#[derive(Debug, PartialEq, Clone)]
pub enum AstValue {
    Node(Box<AstNode>),
    Nodes(Vec<AstNode>),
    Text(String),
    Texts(Vec<String>),
    Heading(HeadingRecord),
}

impl AstValue {
    /// Short name of the value shape, for diagnostics.
    #[must_use]
    pub fn shape(&self) -> &'static str {
        match self {
            AstValue::Node(_) => "node",
            AstValue::Nodes(_) => "node sequence",
            AstValue::Text(_) => "text",
            AstValue::Texts(_) => "text sequence",
            AstValue::Heading(_) => "heading record",
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct HeadingRecord {
    /// Number of `#` markers, always at least 1.
    pub level: u32,
    pub title: String,
    /// Either a `PARAGRAPH:BLOCK` node or the bare inline content of one,
    /// e.g. a sequence of `TEXT:INLINE` nodes.
    pub paragraph: Option<Box<AstValue>>,
}

impl AstNode {
    pub fn new(kind: NodeKind, value: AstValue) -> Self {
        AstNode { kind, value }
    }

    pub fn root(children: Vec<AstNode>) -> Self {
        AstNode::new(NodeKind::Root, AstValue::Nodes(children))
    }

    pub fn paragraph(children: Vec<AstNode>) -> Self {
        AstNode::new(NodeKind::ParagraphBlock, AstValue::Nodes(children))
    }

    pub fn text(text: impl Into<String>) -> Self {
        AstNode::new(NodeKind::TextInline, AstValue::Text(text.into()))
    }

    /// Builds a `HEADING:BLOCK` wrapping a `HEADING` record.
    pub fn heading(level: u32, title: impl Into<String>, paragraph: Option<AstNode>) -> Self {
        let record = HeadingRecord {
            level,
            title: title.into(),
            paragraph: paragraph.map(|p| Box::new(AstValue::Node(Box::new(p)))),
        };
        AstNode::new(
            NodeKind::HeadingBlock,
            AstValue::Node(Box::new(AstNode::new(
                NodeKind::Heading,
                AstValue::Heading(record),
            ))),
        )
    }
}
