use crate::ast::AstNode;
use crate::config::ConvertConfig;
use crate::converter::Converter;
use crate::error::{ConvertError, QuillError};
use crate::formatter::{Dialect, Formatter};
use crate::ids::IdGenerator;
use crate::parser::Parser;
use crate::pipeline::{self, Pipeline};
use crate::session::Session;
use crate::transformer::Transformer;
use std::fs;
use std::path::Path;

/// Prefix of the ids given to heading sections when the caller does not
/// supply a generator.
pub const DEFAULT_ID_PREFIX: &str = "section";

/// Prefix of the ids given to synthetic sections when the caller does not
/// supply a generator.
pub const DEFAULT_SYNTHETIC_ID_PREFIX: &str = "synthetic";

/// The result of running a document through one dialect.
/// Carries the rendered text together with what a converter needs to know
/// about it, and the AST it was produced from.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub text: String,
    pub format_id: &'static str,
    pub file_extension: &'static str,
    pub ast: AstNode,
}

impl Rendered {
    /// The AST in its JSON wire form.
    #[must_use]
    pub fn ast_json(&self) -> serde_json::Value {
        self.ast.to_json()
    }
}

/// Parses and renders `source` in the given dialect. Heading sections are
/// numbered `section-1`, `section-2`, ... and synthetic ones `synthetic-1`, ...
///
/// # Errors
/// Returns a `QuillError` if parsing, generation, transformation or
/// rendering fails.
pub fn render(source: &str, file_name: &str, dialect: Dialect) -> Result<Rendered, QuillError> {
    let ast = parse_named(source, file_name)?;
    render_parsed(
        ast,
        dialect,
        IdGenerator::sequential(DEFAULT_ID_PREFIX),
        IdGenerator::sequential(DEFAULT_SYNTHETIC_ID_PREFIX),
    )
}

/// Like [`render`], with a caller-supplied id generator.
///
/// # Errors
/// See [`render`].
pub fn render_with_ids(
    source: &str,
    file_name: &str,
    dialect: Dialect,
    ids: IdGenerator,
) -> Result<Rendered, QuillError> {
    let ast = parse_named(source, file_name)?;
    render_ast(ast, dialect, ids)
}

/// Renders an already parsed AST, e.g. one decoded with
/// [`AstNode::from_json`].
///
/// # Errors
/// Returns a `QuillError` if generation, transformation or rendering fails.
pub fn render_ast(ast: AstNode, dialect: Dialect, ids: IdGenerator) -> Result<Rendered, QuillError> {
    render_parsed(ast, dialect, ids.clone(), ids)
}

fn parse_named(source: &str, file_name: &str) -> Result<AstNode, QuillError> {
    let mut parser = Parser::new_with_name(source, file_name.to_string());
    Ok(parser.parse_document()?)
}

fn render_parsed(
    ast: AstNode,
    dialect: Dialect,
    heading_ids: IdGenerator,
    synthetic_ids: IdGenerator,
) -> Result<Rendered, QuillError> {
    match dialect {
        Dialect::DocBook => run(&pipeline::docbook_with_ids(heading_ids, synthetic_ids), ast),
        Dialect::Html => run(&pipeline::html(), ast),
    }
}

fn run<F, T>(pipeline: &Pipeline<F, T>, ast: AstNode) -> Result<Rendered, QuillError>
where
    F: Formatter,
    T: Transformer<F::Node>,
{
    let text = pipeline.run_ast(&ast)?;
    Ok(Rendered {
        text,
        format_id: pipeline.formatter().format_id(),
        file_extension: pipeline.formatter().file_extension(),
        ast,
    })
}

/// Converts the markup file at `input` into `output` through the external
/// converter, using the dialect and output format from `config`.
///
/// The intermediate document is written into a fresh [`Session`] directory.
///
/// # Errors
/// Returns `QuillError::Convert` for I/O and converter failures and any
/// pipeline error for the document itself.
pub fn convert_file(input: &Path, output: &Path, config: &ConvertConfig) -> Result<(), QuillError> {
    let source = fs::read_to_string(input).map_err(|source| ConvertError::Io {
        path: input.to_path_buf(),
        source,
    })?;
    let file_name = input.display().to_string();
    let rendered = render(&source, &file_name, config.dialect)?;

    let session = Session::open(&config.session)?;
    let intermediate = session.write_intermediate(&rendered.text, rendered.file_extension)?;
    Converter::from_config(config).execute(
        rendered.format_id,
        config.output_format.converter_target(),
        &intermediate,
        output,
    )?;
    session.close()?;

    log::info!("converted {} to {}", input.display(), output.display());
    Ok(())
}
