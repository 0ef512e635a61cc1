use crate::ast::AstNode;
use crate::error::ParserError;
use crate::lexer::{Lexer, Token, TokenType};
use miette::NamedSource;
use std::sync::Arc;

/// A recursive descent parser for the lightweight markup.
///
/// ```text
/// Document  ::= { BlankLine } { Block { BlankLine } } Eof
/// Block     ::= Heading | Paragraph
/// Heading   ::= HeadingLine [ Paragraph ]
/// Paragraph ::= TextLine { TextLine }
/// ```
#[derive(Debug)]
pub struct Parser {
    source: Arc<NamedSource<String>>,
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(source_text: &str) -> Self {
        Self::new_with_name(source_text, "source.md".to_string())
    }

    pub fn new_with_name(source_text: &str, name: String) -> Self {
        let source = Arc::new(NamedSource::new(name, source_text.to_string()));
        let tokens = Lexer::new(source_text).lex();
        Self {
            source,
            tokens,
            position: 0,
        }
    }

    // === Main Parsing Methods ===

    /// Document ::= { BlankLine } { Block { BlankLine } } Eof
    pub fn parse_document(&mut self) -> Result<AstNode, ParserError> {
        let mut blocks = Vec::new();
        loop {
            let token = self.current_token().clone();
            match token.ttype {
                TokenType::Eof => break,
                TokenType::BlankLine => self.advance(),
                TokenType::Heading { level, ref title } => {
                    blocks.push(self.parse_heading(level, title, &token)?);
                }
                TokenType::Text(_) => blocks.push(self.parse_paragraph()),
            }
        }
        log::trace!("parsed {} top-level blocks", blocks.len());
        Ok(AstNode::root(blocks))
    }

    /// Heading ::= HeadingLine [ Paragraph ]
    /// The paragraph must start on the line right after the heading.
    fn parse_heading(
        &mut self,
        level: u32,
        title: &str,
        token: &Token,
    ) -> Result<AstNode, ParserError> {
        if title.is_empty() {
            return Err(ParserError::EmptyHeading {
                src: (*self.source).clone(),
                span: (token.pos_start, token.pos_end - token.pos_start).into(),
            });
        }
        self.advance();

        let paragraph = if self.check_text() {
            Some(self.parse_paragraph())
        } else {
            None
        };
        Ok(AstNode::heading(level, title, paragraph))
    }

    /// Paragraph ::= TextLine { TextLine }
    fn parse_paragraph(&mut self) -> AstNode {
        let mut lines = Vec::new();
        while let TokenType::Text(line) = &self.current_token().ttype {
            lines.push(AstNode::text(line.clone()));
            self.advance();
        }
        AstNode::paragraph(lines)
    }

    // === Helper Methods ===

    fn current_token(&self) -> &Token {
        // The lexer always ends the stream with Eof and we never advance past it.
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
    }

    fn check_text(&self) -> bool {
        matches!(self.current_token().ttype, TokenType::Text(_))
    }
}

/// Parses `source` into an AST.
///
/// # Errors
/// Returns a `ParserError` when the markup is not well formed.
pub fn parse(source: &str) -> Result<AstNode, ParserError> {
    Parser::new(source).parse_document()
}
