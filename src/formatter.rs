use crate::node::OutputNode;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Factory for the nodes of one output dialect.
///
/// Every operation receives already-built children (or raw text) and returns
/// a new node. Implementations do no I/O and keep no state besides their
/// construction-time configuration.
pub trait Formatter {
    type Node: OutputNode;

    /// Identifier of the dialect as understood by the external converter.
    fn format_id(&self) -> &'static str;

    fn file_extension(&self) -> &'static str;

    fn generate_root(&self, content: Self::Node) -> Self::Node;

    fn generate_paragraph_block(&self, content: Self::Node) -> Self::Node;

    fn generate_heading_block(
        &self,
        title: &str,
        level: u32,
        paragraph: Option<Self::Node>,
    ) -> Self::Node;

    fn generate_text_inline(&self, text: Self::Node) -> Self::Node;

    fn generate_literal(&self, literal: &str) -> Self::Node;

    fn generate_array(&self, items: Vec<Self::Node>) -> Self::Node;
}

/// The output dialects this crate ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Section-oriented DocBook; needs the section transformer.
    #[default]
    DocBook,
    /// Flat HTML fragment.
    Html,
}

impl Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::DocBook => f.write_str("docbook"),
            Dialect::Html => f.write_str("html"),
        }
    }
}
