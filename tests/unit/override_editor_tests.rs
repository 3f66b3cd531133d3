/*!
 * Tests for tag editing at the cursor
 */

use assedit::ass::{parse_blocks, serialize_blocks, Color, Style};
use assedit::editor::{
    block_at_pos, locate_insertion, ColorSlot, FontSpec, FormatFlag, Insertion, TaggedText, TextSelection,
};

fn set_tag(text: &str, tag: &str, value: &str, selection: TextSelection, at_end: bool) -> (String, isize) {
    let mut tagged = TaggedText::new(text);
    let edit = tagged.set_tag(tag, value, selection, at_end);
    (tagged.into_text(), edit.shift)
}

fn toggle(text: &str, flag: FormatFlag, style: &Style, selection: TextSelection) -> String {
    let mut tagged = TaggedText::new(text);
    tagged.toggle_flag(flag, style, selection);
    tagged.into_text()
}

#[test]
fn test_setTag_withPlainRunAtCursor_shouldPrependNewGroup() {
    let mut tagged = TaggedText::new("Hello {\\b1}world");
    let edit = tagged.set_tag("\\fn", "Arial", TextSelection::caret(0), false);

    assert_eq!(tagged.text(), "{\\fnArial}Hello {\\b1}world");
    assert_eq!(edit.shift, 10);
    assert!(edit.new_group);
    assert_eq!(edit.selection, TextSelection::caret(10));
}

#[test]
fn test_setTag_withExistingTag_shouldReplaceOnlyItsValue() {
    let (text, shift) = set_tag("{\\b1\\i1}text", "\\b", "0", TextSelection::caret(0), false);

    assert_eq!(text, "{\\b0\\i1}text");
    assert_eq!(shift, 0);
}

#[test]
fn test_setTag_withTagMissingFromGroup_shouldAppendToGroup() {
    let (text, shift) = set_tag("{\\i1}text", "\\b", "1", TextSelection::caret(0), false);

    assert_eq!(text, "{\\i1\\b1}text");
    assert_eq!(shift, 3);
}

#[test]
fn test_setTag_withDuplicates_shouldKeepFirstAndDropRest() {
    let (text, shift) = set_tag("{\\b1\\i1\\b0}x", "\\b", "1", TextSelection::caret(0), false);

    assert_eq!(text, "{\\b1\\i1}x");
    assert_eq!(shift, -3);
}

#[test]
fn test_setTag_withCursorRightAfterGroup_shouldEditThatGroup() {
    let (text, _) = set_tag("{\\b1}Hello", "\\b", "0", TextSelection::caret(5), false);

    assert_eq!(text, "{\\b0}Hello");
}

#[test]
fn test_setTag_withCursorInsideComment_shouldInsertBeforeComment() {
    let (text, _) = set_tag("{\\b1}a{note}b", "\\i", "1", TextSelection::caret(8), false);

    assert_eq!(text, "{\\b1}a{\\i1}{note}b");
}

#[test]
fn test_setTag_withCommentAfterOverride_shouldEditOverrideGroup() {
    let (text, shift) = set_tag("{\\b1}{note}x", "\\i", "1", TextSelection::caret(7), false);

    assert_eq!(text, "{\\b1\\i1}{note}x");
    assert_eq!(shift, 3);
}

#[test]
fn test_setTag_withDrawing_shouldEditPrecedingGroup() {
    let (text, _) = set_tag("{\\p1}m 0 0 l 10 10", "\\b", "1", TextSelection::caret(10), false);

    assert_eq!(text, "{\\p1\\b1}m 0 0 l 10 10");
}

#[test]
fn test_setTag_withEmptyText_shouldCreateGroupAtZero() {
    let (text, shift) = set_tag("", "\\an", "8", TextSelection::caret(3), false);

    assert_eq!(text, "{\\an8}");
    assert_eq!(shift, 6);
}

#[test]
fn test_setTag_atEnd_shouldLeaveSelectionAlone() {
    let mut tagged = TaggedText::new("Hello world");
    let edit = tagged.set_tag("\\i", "0", TextSelection::new(0, 5), true);

    assert_eq!(tagged.text(), "Hello{\\i0} world");
    assert_eq!(edit.selection, TextSelection::new(0, 5));
}

#[test]
fn test_setTag_anyInput_shouldKeepTextAndBlocksInSync() {
    let inputs = ["", "x", "{\\b1}a{c}b", "{\\p1}m 0 0{\\p0}x", "{\\pos(1,2)}é", "{}{}"];

    for input in inputs {
        for pos in 0..=input.chars().count() {
            let mut tagged = TaggedText::new(input);
            tagged.set_tag("\\fs", "30", TextSelection::caret(pos), false);
            let text = tagged.text().to_string();
            assert_eq!(serialize_blocks(tagged.blocks()), text);
            assert_eq!(serialize_blocks(&parse_blocks(&text)), text);
        }
    }
}

#[test]
fn test_toggleFlag_withCaretAndInheritedState_shouldInsertOneTag() {
    let text = toggle("Hello world", FormatFlag::Bold, &Style::default(), TextSelection::caret(6));

    assert_eq!(text, "Hello {\\b1}world");
    assert_eq!(text.matches("\\b").count(), 1);
}

#[test]
fn test_toggleFlag_withSelection_shouldWrapSelection() {
    let mut tagged = TaggedText::new("Hello world");
    let edit = tagged.toggle_flag(FormatFlag::Bold, &Style::default(), TextSelection::new(6, 11));

    assert_eq!(tagged.text(), "Hello {\\b1}world{\\b0}");
    assert_eq!(edit.selection, TextSelection::new(11, 16));
}

#[test]
fn test_toggleFlag_withSelectionAtStart_shouldRestoreAfterSelection() {
    let text = toggle("Hello world", FormatFlag::Bold, &Style::default(), TextSelection::new(0, 5));

    assert_eq!(text, "{\\b1}Hello{\\b0} world");
}

#[test]
fn test_toggleFlag_withBoldStyle_shouldTurnBoldOff() {
    let style = Style {
        bold: true,
        ..Style::default()
    };

    assert_eq!(toggle("text", FormatFlag::Bold, &style, TextSelection::caret(0)), "{\\b0}text");
}

#[test]
fn test_toggleFlag_insideBoldSpan_shouldInsertInverse() {
    let text = toggle("{\\b1}Hello", FormatFlag::Bold, &Style::default(), TextSelection::caret(7));

    assert_eq!(text, "{\\b1}He{\\b0}llo");
}

#[test]
fn test_toggleFlag_withUnderlineAndStrikeout_shouldUseTheirTags() {
    let style = Style::default();

    assert_eq!(toggle("a", FormatFlag::Underline, &style, TextSelection::caret(0)), "{\\u1}a");
    assert_eq!(toggle("a", FormatFlag::Strikeout, &style, TextSelection::caret(0)), "{\\s1}a");
}

#[test]
fn test_fontAt_afterFontGroup_shouldReadTags() {
    let mut tagged = TaggedText::new("{\\fnTimes\\fs30}x");
    let font = tagged.font_at(15, &Style::default());

    assert_eq!(font.face, "Times");
    assert_eq!(font.size, 30);
    assert!(!font.bold);
}

#[test]
fn test_applyFont_withUnchangedFont_shouldDoNothing() {
    let style = Style::default();
    let mut tagged = TaggedText::new("x");
    let font = tagged.font_at(0, &style);

    assert_eq!(tagged.apply_font(&font, &style, TextSelection::caret(0)), None);
    assert_eq!(tagged.text(), "x");
}

#[test]
fn test_applyFont_withUnderline_shouldWriteUnderlineTag() {
    let style = Style::default();
    let font = FontSpec {
        face: "Arial".to_string(),
        size: 20,
        bold: false,
        italic: false,
        underline: true,
    };
    let mut tagged = TaggedText::new("x");

    assert!(tagged.apply_font(&font, &style, TextSelection::caret(0)).is_some());
    assert_eq!(tagged.text(), "{\\u1}x");
}

#[test]
fn test_applyFont_withSeveralChanges_shouldShareOneGroup() {
    let style = Style::default();
    let font = FontSpec {
        face: "Verdana".to_string(),
        size: 32,
        bold: true,
        italic: false,
        underline: false,
    };
    let mut tagged = TaggedText::new("x");
    tagged.apply_font(&font, &style, TextSelection::caret(0));

    assert_eq!(tagged.text(), "{\\fnVerdana\\fs32\\b1}x");
}

#[test]
fn test_applyColor_withNewColor_shouldWriteBgrLiteral() {
    let mut tagged = TaggedText::new("text");
    let edit = tagged.apply_color(ColorSlot::Primary, Color::RED, &Style::default(), TextSelection::caret(0));

    assert!(edit.is_some());
    assert_eq!(tagged.text(), "{\\c&H0000FF&}text");
}

#[test]
fn test_applyColor_withStyleColor_shouldDoNothing() {
    let mut tagged = TaggedText::new("text");
    let edit = tagged.apply_color(ColorSlot::Outline, Color::BLACK, &Style::default(), TextSelection::caret(0));

    assert_eq!(edit, None);
    assert_eq!(tagged.text(), "text");
}

#[test]
fn test_applyColor_withLegacyPrimaryName_shouldReplaceIt() {
    let mut tagged = TaggedText::new("{\\1c&H00FF00&}x");
    let style = Style::default();

    assert_eq!(tagged.color_at(0, ColorSlot::Primary, &style), Color::rgb(0, 255, 0));
    tagged.apply_color(ColorSlot::Primary, Color::RED, &style, TextSelection::caret(0));
    assert_eq!(tagged.text(), "{\\1c&H0000FF&}x");
}

#[test]
fn test_valueAt_withOmittedValue_shouldFallBackToInitial() {
    let mut tagged = TaggedText::new("{\\fs40}big{\\fs}normal");
    let len = tagged.char_len();

    assert_eq!(tagged.value_at(5, 20, "\\fs"), 40);
    assert_eq!(tagged.value_at(len, 20, "\\fs"), 20);
}

#[test]
fn test_locateInsertion_withOverrideAtCursor_shouldUseExistingBlock() {
    let text = "a{\\b1}b";
    let blocks = parse_blocks(text);

    assert_eq!(block_at_pos(text, 6), 1);
    assert_eq!(locate_insertion(text, &blocks, 6), Insertion::Existing { block: 1 });
    assert_eq!(locate_insertion(text, &blocks, 0), Insertion::NewGroup { at: 0 });
}

#[test]
fn test_formatFlag_fromStr_shouldAcceptNamesAndLetters() {
    assert_eq!("bold".parse::<FormatFlag>(), Ok(FormatFlag::Bold));
    assert_eq!("I".parse::<FormatFlag>(), Ok(FormatFlag::Italic));
    assert!("blink".parse::<FormatFlag>().is_err());
    assert_eq!("3".parse::<ColorSlot>(), Ok(ColorSlot::Outline));
}
