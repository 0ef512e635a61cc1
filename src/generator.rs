use crate::ast::{AstNode, AstValue, HeadingRecord, NodeKind};
use crate::error::GenerateError;
use crate::formatter::Formatter;

/// Walks an AST once and asks a [`Formatter`] to build the matching output
/// nodes. Knows nothing about any particular dialect.
pub struct Generator<'f, F: Formatter> {
    formatter: &'f F,
}

impl<'f, F: Formatter> Generator<'f, F> {
    pub fn new(formatter: &'f F) -> Self {
        Generator { formatter }
    }

    /// Builds the output tree for `ast`.
    ///
    /// # Errors
    /// Returns `GenerateError::MalformedAst` when a node's value does not have
    /// the shape its kind requires.
    pub fn generate(&self, ast: &AstNode) -> Result<F::Node, GenerateError> {
        log::trace!("generating {} ({})", ast.kind, ast.value.shape());
        match ast.kind {
            NodeKind::Root => {
                let content = self.generate_value(ast)?;
                Ok(self.formatter.generate_root(content))
            }
            NodeKind::ParagraphBlock => {
                let content = self.generate_value(ast)?;
                Ok(self.formatter.generate_paragraph_block(content))
            }
            NodeKind::TextInline => {
                let content = self.generate_value(ast)?;
                Ok(self.formatter.generate_text_inline(content))
            }
            NodeKind::HeadingBlock => match &ast.value {
                AstValue::Node(inner) => match (&inner.kind, &inner.value) {
                    (NodeKind::Heading, AstValue::Heading(record)) => {
                        self.generate_heading(ast, record)
                    }
                    _ => Err(malformed(ast, "expected a HEADING record")),
                },
                _ => Err(malformed(ast, "expected a single HEADING node")),
            },
            NodeKind::Heading => Err(malformed(ast, "HEADING must be wrapped in HEADING:BLOCK")),
        }
    }

    fn generate_heading(
        &self,
        owner: &AstNode,
        record: &HeadingRecord,
    ) -> Result<F::Node, GenerateError> {
        if record.level == 0 {
            return Err(malformed(owner, "heading level must be at least 1"));
        }
        let paragraph = record
            .paragraph
            .as_deref()
            .map(|content| self.generate_content(owner, content))
            .transpose()?;
        Ok(self
            .formatter
            .generate_heading_block(&record.title, record.level, paragraph))
    }

    fn generate_value(&self, owner: &AstNode) -> Result<F::Node, GenerateError> {
        self.generate_content(owner, &owner.value)
    }

    /// `owner` is the node reported when `value` has the wrong shape.
    fn generate_content(&self, owner: &AstNode, value: &AstValue) -> Result<F::Node, GenerateError> {
        match value {
            AstValue::Node(node) => self.generate(node),
            AstValue::Text(text) => Ok(self.formatter.generate_literal(text)),
            AstValue::Nodes(nodes) => {
                let items = nodes
                    .iter()
                    .map(|node| self.generate(node))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(self.formatter.generate_array(items))
            }
            AstValue::Texts(texts) => {
                let items = texts
                    .iter()
                    .map(|text| self.formatter.generate_literal(text))
                    .collect();
                Ok(self.formatter.generate_array(items))
            }
            AstValue::Heading(_) => Err(malformed(
                owner,
                "a heading record is only valid inside HEADING",
            )),
        }
    }
}

/// Shorthand for `Generator::new(formatter).generate(ast)`.
///
/// # Errors
/// See [`Generator::generate`].
pub fn generate<F: Formatter>(ast: &AstNode, formatter: &F) -> Result<F::Node, GenerateError> {
    Generator::new(formatter).generate(ast)
}

fn malformed(node: &AstNode, reason: &str) -> GenerateError {
    GenerateError::MalformedAst {
        kind: node.kind,
        reason: reason.to_string(),
        node: Box::new(node.clone()),
    }
}
