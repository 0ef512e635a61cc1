use crate::ast::{AstNode, NodeKind};
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum QuillError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parser(#[from] ParserError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Ast(#[from] AstError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Convert(#[from] ConvertError),
}

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum ParserError {
    #[error("Heading has no title")]
    #[diagnostic(
        code(parser::empty_heading),
        help("Write the title after the '#' markers, separated by a space.")
    )]
    EmptyHeading {
        #[source_code]
        src: NamedSource<String>,
        #[label("this heading marker is not followed by a title")]
        span: SourceSpan,
    },
}

/// Failures decoding the AST wire format handed over by an external parser.
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum AstError {
    #[error("AST input is not valid JSON: {reason}")]
    #[diagnostic(code(ast::invalid_json))]
    InvalidJson { reason: String },

    #[error("Unknown AST node kind `{kind}`")]
    #[diagnostic(
        code(ast::unknown_node_kind),
        help("Known kinds are ROOT, PARAGRAPH:BLOCK, TEXT:INLINE, HEADING:BLOCK and HEADING.")
    )]
    UnknownNodeKind { kind: String },

    #[error("Malformed AST: {reason}")]
    #[diagnostic(code(ast::malformed_ast), help("Offending fragment: {fragment}"))]
    MalformedAst { reason: String, fragment: String },
}

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum GenerateError {
    #[error("Malformed {kind} node: {reason}")]
    #[diagnostic(
        code(generator::malformed_ast),
        help("The node value does not have the shape its kind requires.")
    )]
    MalformedAst {
        kind: NodeKind,
        reason: String,
        node: Box<AstNode>,
    },
}

/// Failures raised by output nodes while rendering or mutating children.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum FormatError {
    #[error("Item {item} could not be stringified")]
    #[diagnostic(
        code(format::not_stringifiable),
        help("Items that are not output nodes need a stringifier on their array.")
    )]
    NotStringifiable { item: String },

    #[error("Index {index} is out of range for a collection of {len} children")]
    #[diagnostic(code(format::index_out_of_range))]
    IndexOutOfRange { index: isize, len: usize },

    #[error("No child is registered under handle {handle}")]
    #[diagnostic(code(format::unknown_handle))]
    UnknownHandle { handle: u64 },
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum TransformError {
    #[error("Expected a {expected} root, found {found}")]
    #[diagnostic(
        code(transformer::unexpected_root_type),
        help("The transformer must be paired with the formatter of the same dialect.")
    )]
    UnexpectedRootType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("A {found} node cannot accept children")]
    #[diagnostic(code(transformer::not_a_container))]
    NotAContainer { found: &'static str },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Format(#[from] FormatError),
}

#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Invalid YAML configuration")]
    #[diagnostic(code(config::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON configuration")]
    #[diagnostic(code(config::json))]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug, Diagnostic)]
pub enum ConvertError {
    #[error("Converter exited with {status}")]
    #[diagnostic(code(converter::conversion_failed), help("{stderr}"))]
    ConversionFailed { status: ExitStatus, stderr: String },

    #[error("Could not start converter `{program}`")]
    #[diagnostic(
        code(converter::spawn),
        help("Check that the converter is installed or set `converter_path`.")
    )]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O failure on {}", .path.display())]
    #[diagnostic(code(converter::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
