pub mod api;
pub mod ast;
pub mod config;
pub mod converter;
pub mod docbook;
pub mod error;
pub mod formatter;
pub mod generator;
pub mod html;
pub mod ids;
pub mod lexer;
pub mod node;
pub mod parser;
pub mod pipeline;
pub mod session;
pub mod transformer;
pub mod utils;
mod serialization;

pub use api::{convert_file, render, render_ast, render_with_ids, Rendered};
pub use ast::{AstNode, AstValue, HeadingRecord, NodeKind};
pub use config::{ConvertConfig, OutputFormat, SessionConfig};
pub use error::QuillError;
pub use formatter::{Dialect, Formatter};
pub use ids::IdGenerator;
