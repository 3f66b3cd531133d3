/*!
 * Tests for override block parsing and serialization
 */

use assedit::ass::{parse_blocks, serialize_blocks, strip_tags, Block, Color, Tag};

#[test]
fn test_parseBlocks_withTagsAndText_shouldAlternateRuns() {
    let blocks = parse_blocks("{\\b1}Hello {\\i1}world");

    assert_eq!(blocks.len(), 4);
    assert!(matches!(blocks[0], Block::Override(_)));
    assert_eq!(blocks[1], Block::Plain("Hello ".to_string()));
    assert!(matches!(blocks[2], Block::Override(_)));
    assert_eq!(blocks[3], Block::Plain("world".to_string()));
}

#[test]
fn test_parseBlocks_withComment_shouldBeCommentBlock() {
    let blocks = parse_blocks("a{translator note}b");

    assert_eq!(blocks.len(), 3);
    assert!(blocks[1].is_comment());
    assert_eq!(blocks[1].tags(), None);
}

#[test]
fn test_parseBlocks_withDrawingTag_shouldMarkFollowingTextAsDrawing() {
    let blocks = parse_blocks("{\\p2}m 0 0 l 100 0{\\p0}text");

    assert_eq!(
        blocks[1],
        Block::Drawing {
            text: "m 0 0 l 100 0".to_string(),
            scale: 2
        }
    );
    assert_eq!(blocks[3], Block::Plain("text".to_string()));
}

#[test]
fn test_serializeBlocks_withAwkwardInput_shouldReproduceText() {
    let inputs = [
        "",
        "plain",
        "{}",
        "{\\b1}{\\i1}x",
        "{comment}{\\fnComic Sans MS\\fs24}Hi",
        "{\\pos(10,20)\\t(0,500,\\fscx120)}Move",
        "{\\clip(m 0 0 l 10 10}unclosed paren",
        "{\\b1 trailing",
        "junk{before\\b1}x",
        "{\\p1}m 0 0{\\p0}é{\\c&H0000FF&}ü",
    ];

    for input in inputs {
        assert_eq!(serialize_blocks(&parse_blocks(input)), input, "round trip of {:?}", input);
    }
}

#[test]
fn test_stripTags_shouldRemoveGroupsAndComments() {
    assert_eq!(strip_tags("{\\b1}Hello{note} {\\i1}world"), "Hello world");
}

#[test]
fn test_tagParse_withSharedPrefix_shouldPickLongestName() {
    assert_eq!(Tag::parse("\\bord2").name, "\\bord");
    assert_eq!(Tag::parse("\\be1").name, "\\be");
    assert_eq!(Tag::parse("\\b700").name, "\\b");
    assert_eq!(Tag::parse("\\fscx120").name, "\\fscx");
    assert_eq!(Tag::parse("\\fs24").name, "\\fs");
    assert_eq!(Tag::parse("\\iclip(0,0,1,1)").name, "\\iclip");
}

#[test]
fn test_tagParse_withPosition_shouldReadParams() {
    let tag = Tag::parse("\\pos(320,240)");

    let values: Vec<f64> = tag.params.iter().filter_map(|p| p.as_float()).collect();
    assert_eq!(values, vec![320.0, 240.0]);
    assert_eq!(tag.to_string(), "\\pos(320,240)");
}

#[test]
fn test_colorParse_withTagAndStyleForms_shouldAgreeOnRgb() {
    let tag = Color::parse_ass("&H0000FF&").unwrap();
    let style = Color::parse_ass("&H800000FF").unwrap();

    assert_eq!(tag, Color::RED);
    assert!(tag.same_rgb(&style));
    assert_eq!(style.a, 0x80);
    assert_eq!(style.to_style_value(), "&H800000FF");
}

#[test]
fn test_colorParse_withInvalidLiteral_shouldFail() {
    assert!(Color::parse_ass("&HZZ&").is_err());
    assert!("red".parse::<Color>().is_err());
}
