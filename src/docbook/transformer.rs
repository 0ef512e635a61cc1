use super::nodes::{DocBookNode, RootNode, SectionNode};
use crate::error::TransformError;
use crate::ids::IdGenerator;
use crate::node::Annotations;
use crate::transformer::Transformer;

/// Annotation carried by the section created for content that precedes the
/// first heading.
pub const SECTION_SYNTHETIC_ANNOTATION: &str = "synthetic-section";

/// Regroups the root's children so that every block sits inside a section.
///
/// Headings open sections. A heading of level `n` closes every open heading
/// of level `n` or deeper, so deeper headings nest inside the nearest
/// shallower one. Content that precedes the first heading is collected into
/// one synthetic section. The pass is linear in the number of root children.
#[derive(Debug, Clone)]
pub struct DocBookTransformer {
    ids: IdGenerator,
}

/// A section still accepting content, with the level a new heading must be
/// at or above to close it.
struct OpenSection {
    level: u32,
    node: DocBookNode,
}

impl DocBookTransformer {
    pub fn new(ids: IdGenerator) -> Self {
        DocBookTransformer { ids }
    }

    fn synthetic_section(&self) -> DocBookNode {
        SectionNode::new(Vec::new(), Some(self.ids.next_id()))
            .with_annotations(Annotations::described(SECTION_SYNTHETIC_ANNOTATION))
            .into()
    }
}

/// For section-inducing nodes: the level at which the node closes open
/// sections, and the level at which it is closed itself. Plain sections sit
/// at the top of the hierarchy and are closed by any heading.
fn section_levels(node: &DocBookNode) -> Option<(u32, u32)> {
    match node {
        DocBookNode::Heading(heading) => Some((heading.level(), heading.level())),
        DocBookNode::Section(_) => Some((1, u32::MAX)),
        _ => None,
    }
}

fn append(target: &mut DocBookNode, child: DocBookNode) -> Result<(), TransformError> {
    let found = target.kind_name();
    let container = target
        .as_container_mut()
        .ok_or(TransformError::NotAContainer { found })?;
    container.add_child_node(child, None)?;
    Ok(())
}

/// Closes every open section whose level is at least `level`, attaching
/// each one to its parent (or to the top level).
fn close_sections(
    open: &mut Vec<OpenSection>,
    top: &mut Vec<DocBookNode>,
    level: u32,
) -> Result<(), TransformError> {
    while open.last().is_some_and(|section| section.level >= level) {
        let Some(closed) = open.pop() else { break };
        match open.last_mut() {
            Some(parent) => append(&mut parent.node, closed.node)?,
            None => top.push(closed.node),
        }
    }
    Ok(())
}

impl Transformer<DocBookNode> for DocBookTransformer {
    fn transform(&self, tree: &DocBookNode) -> Result<DocBookNode, TransformError> {
        if !matches!(tree, DocBookNode::Root(_)) {
            return Err(TransformError::UnexpectedRootType {
                expected: "root",
                found: tree.kind_name(),
            });
        }
        let children = tree.child_nodes();
        log::debug!("regrouping {} top-level nodes into sections", children.len());

        let mut top: Vec<DocBookNode> = Vec::new();
        let mut open: Vec<OpenSection> = Vec::new();

        if children
            .first()
            .is_some_and(|first| section_levels(first).is_none())
        {
            log::debug!("content precedes the first heading, adding a synthetic section");
            open.push(OpenSection {
                level: u32::MAX,
                node: self.synthetic_section(),
            });
        }

        for child in children {
            let child = child.clone();
            match section_levels(&child) {
                Some((closes, level)) => {
                    close_sections(&mut open, &mut top, closes)?;
                    open.push(OpenSection { level, node: child });
                }
                None => match open.last_mut() {
                    Some(target) => append(&mut target.node, child)?,
                    None => top.push(child),
                },
            }
        }
        close_sections(&mut open, &mut top, 0)?;

        Ok(RootNode::from_children(top).into())
    }
}
