use quill_core::docbook::{
    DocBookNode, DocBookTransformer, HeadingNode, LiteralNode, ParagraphNode, RootNode,
    SectionNode, PARA_SYNTHETIC_ANNOTATION, SECTION_SYNTHETIC_ANNOTATION,
};
use quill_core::error::FormatError;
use quill_core::ids::IdGenerator;
use quill_core::node::{ArrayItem, ArrayNode, ModifiableNodesContainer, NodesContainer, OutputNode, Render};
use quill_core::pipeline;
use quill_core::transformer::Transformer;
use quill_core::utils::At;

fn description(node: &DocBookNode) -> Option<&str> {
    node.annotations().and_then(|a| a.description.as_deref())
}

#[derive(Debug, Clone)]
struct Word(&'static str);

impl ArrayItem for Word {}

// === Array node ===

#[test]
fn test_array_render_empty_and_single() {
    let empty: ArrayNode<DocBookNode> = ArrayNode::new(vec![]);
    assert_eq!(empty.render().unwrap(), "");

    let single: ArrayNode<DocBookNode> = ArrayNode::new(vec![LiteralNode::text("only").into()]);
    assert_eq!(single.render().unwrap(), "only");
}

#[test]
fn test_array_of_plain_items_needs_stringifier() {
    let words = ArrayNode::new(vec![Word("a"), Word("b")]);
    assert!(matches!(
        words.render(),
        Err(FormatError::NotStringifiable { .. })
    ));

    let words = ArrayNode::with_stringifier(vec![Word("a"), Word("b")], |w: &Word| w.0.to_string())
        .with_separator(", ");
    assert_eq!(words.render().unwrap(), "a, b");
}

#[test]
fn test_array_positional_edits() {
    let mut array: ArrayNode<DocBookNode> = ArrayNode::new(vec![
        LiteralNode::text("a").into(),
        LiteralNode::text("c").into(),
    ]);
    array.add(LiteralNode::text("b").into(), Some(At::Index(0))).unwrap();
    array.add(LiteralNode::text("start").into(), Some(At::Index(-1))).unwrap();
    assert_eq!(array.render().unwrap(), "start\na\nb\nc");

    let handle = array.handle_at(2).unwrap();
    let removed = array.remove(At::Handle(handle)).unwrap().unwrap();
    assert_eq!(removed.render().unwrap(), "b");
    assert_eq!(array.len(), 3);

    assert_eq!(
        array.add(LiteralNode::text("x").into(), Some(At::Index(3))),
        Err(FormatError::IndexOutOfRange { index: 3, len: 3 })
    );
}

// === Node model ===

#[test]
fn test_heading_wraps_loose_content() {
    let heading: DocBookNode =
        HeadingNode::new("T", 1, Some(LiteralNode::text("loose").into()), None).into();
    let paragraph = heading.child_nodes()[0];
    assert_eq!(description(paragraph), Some(PARA_SYNTHETIC_ANNOTATION));
    assert_eq!(
        heading.render().unwrap(),
        "<section><title>T</title><para>loose</para></section>"
    );
}

#[test]
fn test_containers_accept_children() {
    let mut section = SectionNode::new(vec![], Some("s".into()));
    section
        .add_child_node(ParagraphNode::new(LiteralNode::text("one").into()).into(), None)
        .unwrap();
    assert_eq!(section.child_count(), 1);
    assert_eq!(
        section.render().unwrap(),
        "<section xml:id=\"s\"><para>one</para></section>"
    );
}

#[test]
fn test_clone_is_independent() {
    let original: DocBookNode = RootNode::from_children(vec![
        ParagraphNode::new(LiteralNode::text("a").into()).into(),
    ])
    .into();
    let mut copy = original.clone();
    copy.as_container_mut()
        .unwrap()
        .add_child_node(ParagraphNode::new(LiteralNode::text("b").into()).into(), None)
        .unwrap();

    assert_eq!(original.child_nodes().len(), 1);
    assert_eq!(copy.child_nodes().len(), 2);
    assert_eq!(original.render().unwrap(), "<book><para>a</para></book>");
}

// === Transformer structure ===

#[test]
fn test_transformed_tree_has_only_sections_at_top() {
    let pipeline = pipeline::docbook(IdGenerator::sequential("s"));
    let ast = quill_core::parser::parse("lead one\n\nlead two\n\n# A\n\n## B\nb\n\n# C").unwrap();
    let tree = pipeline.build(&ast).unwrap();

    let top = tree.child_nodes();
    assert_eq!(top.len(), 3);
    assert!(top
        .iter()
        .all(|n| matches!(n, DocBookNode::Section(_) | DocBookNode::Heading(_))));

    assert_eq!(description(top[0]), Some(SECTION_SYNTHETIC_ANNOTATION));
    assert_eq!(top[0].child_nodes().len(), 2);
    assert!(top[1..].iter().all(|n| description(n).is_none()));

    // `B` nests under `A`.
    let DocBookNode::Heading(a) = top[1] else {
        panic!("expected heading, got {:?}", top[1]);
    };
    assert_eq!(a.title(), "A");
    assert_eq!(a.child_count(), 1);
}

#[test]
fn test_transform_does_not_touch_generated_tree() {
    let pipeline = pipeline::docbook(IdGenerator::fixed("fakeid"));
    let ast = quill_core::parser::parse("a\n\n# H\nb").unwrap();
    let generated = pipeline.generate(&ast).unwrap();
    let before = generated.render().unwrap();

    let transformed = DocBookTransformer::new(IdGenerator::fixed("other"))
        .transform(&generated)
        .unwrap();

    assert_eq!(generated.render().unwrap(), before);
    assert_eq!(generated.child_nodes().len(), 2);
    assert_eq!(
        transformed.render().unwrap(),
        "<book><section xml:id=\"other\"><para>a</para></section>\n\
         <section xml:id=\"fakeid\"><title>H</title><para>b</para></section></book>"
    );
}
