use crate::ast::AstNode;
use crate::docbook::{DocBookFormatter, DocBookTransformer};
use crate::error::QuillError;
use crate::formatter::Formatter;
use crate::generator::Generator;
use crate::html::HtmlFormatter;
use crate::ids::IdGenerator;
use crate::node::Render;
use crate::parser::Parser;
use crate::transformer::{IdentityTransformer, Transformer};

/// parse -> generate -> transform -> render.
///
/// Holds nothing but the formatter and transformer it was built with, so one
/// pipeline can serve any number of independent runs.
#[derive(Debug, Clone)]
pub struct Pipeline<F, T> {
    formatter: F,
    transformer: T,
}

impl<F, T> Pipeline<F, T>
where
    F: Formatter,
    T: Transformer<F::Node>,
{
    pub fn new(formatter: F, transformer: T) -> Self {
        Pipeline {
            formatter,
            transformer,
        }
    }

    pub fn formatter(&self) -> &F {
        &self.formatter
    }

    /// Generates the output tree for `ast` without transforming it.
    ///
    /// # Errors
    /// Returns `QuillError::Generate` for a malformed AST.
    pub fn generate(&self, ast: &AstNode) -> Result<F::Node, QuillError> {
        Ok(Generator::new(&self.formatter).generate(ast)?)
    }

    /// Generates and transforms the output tree for `ast`.
    ///
    /// # Errors
    /// Returns the first generator or transformer failure.
    pub fn build(&self, ast: &AstNode) -> Result<F::Node, QuillError> {
        let generated = self.generate(ast)?;
        log::debug!("generated {} tree", self.formatter.format_id());
        let transformed = self.transformer.transform(&generated)?;
        log::debug!("transformed {} tree", self.formatter.format_id());
        Ok(transformed)
    }

    /// Runs everything after parsing and returns the rendered text.
    ///
    /// # Errors
    /// Returns the first failure of any stage; no partial output is produced.
    pub fn run_ast(&self, ast: &AstNode) -> Result<String, QuillError> {
        let tree = self.build(ast)?;
        let rendered = tree.render()?;
        log::debug!("rendered {} bytes of {}", rendered.len(), self.formatter.format_id());
        Ok(rendered)
    }

    /// # Errors
    /// See [`Pipeline::run_named`].
    pub fn run(&self, source: &str) -> Result<String, QuillError> {
        self.run_named(source, "source.md")
    }

    /// Parses `source` and runs the whole pipeline. `file_name` is only used
    /// in diagnostics.
    ///
    /// # Errors
    /// Returns the first failure of any stage.
    pub fn run_named(&self, source: &str, file_name: &str) -> Result<String, QuillError> {
        log::debug!("parsing {file_name}");
        let ast = Parser::new_with_name(source, file_name.to_string()).parse_document()?;
        self.run_ast(&ast)
    }
}

/// DocBook pipeline; `ids` names both heading sections and synthetic ones.
pub fn docbook(ids: IdGenerator) -> Pipeline<DocBookFormatter, DocBookTransformer> {
    docbook_with_ids(ids.clone(), ids)
}

/// DocBook pipeline drawing heading ids and synthetic section ids from
/// separate generators.
pub fn docbook_with_ids(
    heading_ids: IdGenerator,
    synthetic_ids: IdGenerator,
) -> Pipeline<DocBookFormatter, DocBookTransformer> {
    Pipeline::new(
        DocBookFormatter::new(heading_ids),
        DocBookTransformer::new(synthetic_ids),
    )
}

pub fn html() -> Pipeline<HtmlFormatter, IdentityTransformer> {
    Pipeline::new(HtmlFormatter, IdentityTransformer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docbook_hello_world() {
        let pipeline = docbook(IdGenerator::fixed("fakeid"));
        assert_eq!(
            pipeline.run("Hello world").unwrap(),
            "<book><section xml:id=\"fakeid\"><para>Hello world</para></section></book>"
        );
    }

    #[test]
    fn test_separate_id_streams() {
        let pipeline = docbook_with_ids(IdGenerator::sequential("h"), IdGenerator::sequential("s"));
        assert_eq!(
            pipeline.run("lead\n\n# A").unwrap(),
            "<book><section xml:id=\"s-1\"><para>lead</para></section>\n\
             <section xml:id=\"h-1\"><title>A</title></section></book>"
        );
    }

    #[test]
    fn test_html_is_not_regrouped() {
        assert_eq!(
            html().run("intro\n\n# Title\nbody").unwrap(),
            "<body><p>intro</p>\n<h1>Title</h1><p>body</p></body>"
        );
    }

    #[test]
    fn test_generate_leaves_tree_ungrouped() {
        let pipeline = docbook(IdGenerator::fixed("fakeid"));
        let ast = AstNode::root(vec![AstNode::paragraph(vec![AstNode::text("x")])]);
        let generated = pipeline.generate(&ast).unwrap();
        assert_eq!(generated.render().unwrap(), "<book><para>x</para></book>");
    }
}
