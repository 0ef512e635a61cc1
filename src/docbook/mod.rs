//! DocBook dialect: `<book>` root, `<section>` grouping, `<para>` blocks.
//!
//! Generated trees are not valid DocBook on their own: content has to sit in
//! sections. [`DocBookTransformer`] regroups the root's children accordingly.

pub mod formatter;
pub mod nodes;
pub mod tokens;
pub mod transformer;

pub use formatter::DocBookFormatter;
pub use nodes::{
    DocBookNode, HeadingNode, LiteralNode, ParagraphNode, RootNode, SectionNode,
    PARA_SYNTHETIC_ANNOTATION,
};
pub use transformer::{DocBookTransformer, SECTION_SYNTHETIC_ANNOTATION};
