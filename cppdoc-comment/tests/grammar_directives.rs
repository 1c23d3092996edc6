//! Directive grammar tests over the parsed (pre-interpretation) tree.

use cppdoc_comment::postprocess;
use cppdoc_comment::testing::assert_comment;
use cppdoc_comment::{parse_comment, CommandKind, CommentConfig, InlineKind, SectionKind};
use rstest::rstest;

fn parse(text: &str) -> cppdoc_comment::ParsedComment {
    parse_comment(text, 1, &CommentConfig::default())
}

#[rstest]
#[case::effects("effects", SectionKind::Effects)]
#[case::requires("requires", SectionKind::Requires)]
#[case::returns("returns", SectionKind::Returns)]
#[case::throws("throws", SectionKind::Throws)]
#[case::synchronization("synchronization", SectionKind::Synchronization)]
#[case::complexity("complexity", SectionKind::Complexity)]
#[case::notes("notes", SectionKind::Notes)]
#[case::see("see", SectionKind::See)]
fn test_section_directives(#[case] spelling: &str, #[case] kind: SectionKind) {
    let parsed = parse(&format!("\\{} The body text.", spelling));
    assert_comment(&parsed).child_count(1).section(0, |section| {
        section.kind(kind).key(None).text("The body text.");
    });
}

#[rstest]
#[case::exclude("exclude", CommandKind::Exclude)]
#[case::unique_name("unique_name", CommandKind::UniqueName)]
#[case::synopsis("synopsis", CommandKind::Synopsis)]
#[case::group("group", CommandKind::Group)]
#[case::module("module", CommandKind::Module)]
#[case::output_section("output_section", CommandKind::OutputSection)]
#[case::entity("entity", CommandKind::Entity)]
#[case::file("file", CommandKind::File)]
fn test_command_directives(#[case] spelling: &str, #[case] kind: CommandKind) {
    let parsed = parse(&format!("\\{} arg text", spelling));
    assert_comment(&parsed).child_count(1).command(0, |command| {
        command.kind(kind).arguments("arg text");
    });
}

#[rstest]
#[case::param("param", InlineKind::Param)]
#[case::tparam("tparam", InlineKind::TemplateParam)]
#[case::base("base", InlineKind::Base)]
fn test_inline_directives(#[case] spelling: &str, #[case] kind: InlineKind) {
    let parsed = parse(&format!("\\{} name the body", spelling));
    assert_comment(&parsed).child_count(1).inline(0, |inline| {
        inline.kind(kind).name("name").child_count(1);
    });
}

#[test]
fn test_keyed_section_with_multiline_body() {
    let parsed = parse("\\throws std::bad_alloc - when allocation fails\nfor any reason");
    assert_comment(&parsed).child_count(1).section(0, |section| {
        section
            .kind(SectionKind::Throws)
            .key(Some("std::bad_alloc"))
            .text("when allocation fails\nfor any reason");
    });
}

#[test]
fn test_section_paragraph_lazily_continues() {
    let parsed = parse("Intro paragraph.\n\\effects Effect body.\nTrailing paragraph.");
    assert_comment(&parsed)
        .child_count(2)
        .block(0, |block| {
            block.root("Paragraph").text("Intro paragraph.");
        })
        .section(1, |section| {
            section
                .kind(SectionKind::Effects)
                .text("Effect body.\nTrailing paragraph.");
        });
}

#[test]
fn test_blank_line_separates_section_from_paragraph() {
    let parsed = parse("\\effects Effect body.\n\nNew paragraph.");
    assert_comment(&parsed)
        .child_count(2)
        .section(0, |section| {
            section.kind(SectionKind::Effects).text("Effect body.");
        })
        .block(1, |block| {
            block.root("Paragraph").text("New paragraph.");
        });
}

#[test]
fn test_postprocessed_inline_has_brief_and_details() {
    let parsed = postprocess(parse("\\param x head line\nsecond line\n\ntrailing outer"));
    assert_comment(&parsed)
        .child_count(2)
        .section(0, |section| {
            section.kind(SectionKind::Brief).text("trailing outer");
        })
        .inline(1, |inline| {
            inline
                .kind(InlineKind::Param)
                .name("x")
                .child_count(2)
                .section(0, |section| {
                    section.kind(SectionKind::Brief).text("head line");
                })
                .section(1, |section| {
                    section.kind(SectionKind::Details).text("second line");
                });
        });
}

#[test]
fn test_postprocessed_root_reorders_and_wraps() {
    let parsed = postprocess(parse(
        "Brief line.\n\\exclude\n\nDetail paragraph.\n\\param x - value",
    ));
    assert_comment(&parsed)
        .child_count(4)
        .section(0, |section| {
            section.kind(SectionKind::Brief).text("Brief line.");
        })
        .section(1, |section| {
            section.kind(SectionKind::Details).text("Detail paragraph.");
        })
        .command(2, |command| {
            command.kind(CommandKind::Exclude).arguments("");
        })
        .inline(3, |inline| {
            inline.name("x");
        });
}
