//! Property tests for the postprocessing passes.

use cppdoc_comment::{
    postprocess, CommandKind, CommandNode, CommentNode, InlineKind, InlineNode, ParsedComment,
    SectionKind, SectionNode,
};
use cppdoc_markup::TreeBuilder;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Shape {
    Paragraph(String),
    Section(String),
    Command(String),
    Inline(String),
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let word = "[a-z]{1,8}";
    prop_oneof![
        word.prop_map(Shape::Paragraph),
        word.prop_map(Shape::Section),
        word.prop_map(Shape::Command),
        word.prop_map(Shape::Inline),
    ]
}

fn build(shape: &Shape) -> CommentNode {
    match shape {
        Shape::Paragraph(text) => {
            let mut builder = TreeBuilder::paragraph();
            builder.text(text).expect("text in paragraph");
            CommentNode::Block(builder.finish())
        }
        Shape::Section(text) => {
            let mut section = SectionNode::new(SectionKind::Effects, None, 1);
            let mut builder = TreeBuilder::paragraph();
            builder.text(text).expect("text in paragraph");
            section.push(CommentNode::Block(builder.finish()));
            CommentNode::Section(section)
        }
        Shape::Command(arg) => {
            CommentNode::Command(CommandNode::new(CommandKind::Exclude, arg.as_str(), 1))
        }
        Shape::Inline(name) => {
            CommentNode::Inline(InlineNode::new(InlineKind::Param, name.as_str(), 1))
        }
    }
}

fn command_args(nodes: &[CommentNode]) -> Vec<String> {
    nodes
        .iter()
        .filter_map(|n| n.as_command().map(|c| c.arguments.clone()))
        .collect()
}

fn inline_names(nodes: &[CommentNode]) -> Vec<String> {
    nodes
        .iter()
        .filter_map(|n| n.as_inline().map(|i| i.name.clone()))
        .collect()
}

proptest! {
    /// Commands and inlines always end up behind every other node, in
    /// their original relative order.
    #[test]
    fn floated_nodes_trail_in_relative_order(shapes in prop::collection::vec(shape_strategy(), 0..12)) {
        let children: Vec<CommentNode> = shapes.iter().map(build).collect();
        let expected_commands = command_args(&children);
        let expected_inlines = inline_names(&children);

        let result = postprocess(ParsedComment::new(children)).children;

        prop_assert_eq!(command_args(&result), expected_commands);
        prop_assert_eq!(inline_names(&result), expected_inlines);

        // No ordinary node appears after the first floated one.
        let first_floated = result.iter().position(|n| n.floats_to_back());
        if let Some(first) = first_floated {
            for node in &result[first..] {
                prop_assert!(node.floats_to_back(), "ordinary node after floated tail");
            }
        }
    }

    /// The passes never lose paragraph text: every input paragraph's text
    /// is still somewhere in the output sections.
    #[test]
    fn paragraph_text_is_preserved(shapes in prop::collection::vec(shape_strategy(), 0..12)) {
        let children: Vec<CommentNode> = shapes.iter().map(build).collect();
        let inputs: Vec<String> = shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Paragraph(text) | Shape::Section(text) => Some(text.clone()),
                _ => None,
            })
            .collect();

        let result = postprocess(ParsedComment::new(children)).children;
        let rendered: String = result
            .iter()
            .filter_map(|n| n.as_section().map(|s| s.text()))
            .collect::<Vec<_>>()
            .join("\n");

        for text in inputs {
            prop_assert!(rendered.contains(&text), "lost paragraph '{}'", text);
        }
    }

    /// Postprocessing is idempotent on its own output.
    #[test]
    fn postprocess_is_idempotent(shapes in prop::collection::vec(shape_strategy(), 0..10)) {
        let children: Vec<CommentNode> = shapes.iter().map(build).collect();
        let once = postprocess(ParsedComment::new(children));
        let twice = postprocess(once.clone());
        prop_assert_eq!(once, twice);
    }
}
