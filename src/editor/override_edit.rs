/*!
 * Editing override tags at the cursor.
 *
 * All positions are character offsets into the line text, matching what a
 * text control reports. The functions here know nothing about the document or
 * the panel; they rewrite a `TaggedText` and report the new selection.
 */

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::ass::{parse_blocks, serialize_blocks, tag_alias, Block, Color, FromParam, Style, Tag};
use crate::errors::EditError;

/// Selection in a text control, in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextSelection {
    pub start: usize,
    pub end: usize,
}

impl TextSelection {
    /// Selection between two positions, in either order
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Empty selection at a position
    pub fn caret(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Both ends limited to `0..=len`
    pub fn clamped(&self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }

    fn shifted(&self, shift: isize, len: usize) -> Self {
        let move_by = |pos: usize| pos.saturating_add_signed(shift).min(len);
        Self::new(move_by(self.start), move_by(self.end))
    }
}

/// Outcome of a single tag edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagEdit {
    /// Where the selection should be after the edit
    pub selection: TextSelection,
    /// Net change in text length
    pub shift: isize,
    /// Whether a new `{...}` group was created
    pub new_group: bool,
}

/// Where a tag will be written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// Splice a new override group at this character position
    NewGroup { at: usize },
    /// Edit the override group at this block index
    Existing { block: usize },
}

/// Index of the block containing `pos`, by counting braces.
///
/// A `{` anywhere but the first character starts a new block. A `}` ends one
/// unless it is the last character, sits at or just before the cursor, or is
/// directly followed by another `{` (the look-ahead is skipped when the next
/// character is the last one). Adjacent groups thus count as one block when
/// the cursor is next to them.
pub fn block_at_pos(text: &str, pos: usize) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let Some(max) = chars.len().checked_sub(1) else {
        return 0;
    };

    let mut n = 0;
    for i in 0..=pos.min(max) {
        if i > 0 && chars[i] == '{' {
            n += 1;
        }
        if chars[i] == '}'
            && i != max
            && i != pos
            && i + 1 != pos
            && (i + 1 == max || chars[i + 1] != '{')
        {
            n += 1;
        }
    }
    n
}

/// Decide where a tag set at `pos` goes.
///
/// Drawing blocks are skipped backwards. Comment groups are skipped too, and
/// the insertion point moves to their opening brace. The first override
/// group reached is edited in place; a plain run gets a fresh group at the
/// insertion point.
pub fn locate_insertion(text: &str, blocks: &[Block], pos: usize) -> Insertion {
    let mut at = pos;
    let mut cursor = blocks
        .len()
        .checked_sub(1)
        .map(|last| block_at_pos(text, pos).min(last));

    while let Some(idx) = cursor {
        match &blocks[idx] {
            Block::Drawing { .. } => cursor = idx.checked_sub(1),
            Block::Plain(run) if run.starts_with('{') => {
                cursor = idx.checked_sub(1);
                at = rfind_char(text, '{', at).unwrap_or(0);
            }
            Block::Plain(_) => return Insertion::NewGroup { at },
            Block::Override(_) => return Insertion::Existing { block: idx },
        }
    }

    Insertion::NewGroup { at: 0 }
}

/// Value of `tag` in effect at block `block_index`.
///
/// Walks back through the blocks, latest tag first, and returns the first
/// match's value. An omitted or unreadable value yields `initial`, as does
/// finding no match at all.
pub fn effective_value<T: FromParam>(blocks: &[Block], block_index: usize, initial: T, tag: &str) -> T {
    let Some(last) = blocks.len().checked_sub(1) else {
        return initial;
    };
    let alias = tag_alias(tag);

    for block in blocks[..=block_index.min(last)].iter().rev() {
        let Block::Override(tags) = block else {
            continue;
        };
        if let Some(found) = tags.iter().rev().find(|t| t.matches(tag, alias)) {
            return match found.first_param() {
                Some(param) if !param.omitted => T::from_param(param).unwrap_or(initial),
                _ => initial,
            };
        }
    }
    initial
}

/// Line text with a lazily parsed block list that is kept in sync
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedText {
    text: String,
    blocks: Option<Vec<Block>>,
}

impl TaggedText {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            blocks: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Parsed blocks, parsing on first use
    pub fn blocks(&mut self) -> &[Block] {
        self.blocks.get_or_insert_with(|| parse_blocks(&self.text))
    }

    /// Drop the parsed blocks; the next access re-parses
    pub fn invalidate(&mut self) {
        self.blocks = None;
    }

    /// Value of `tag` in effect at a character position
    pub fn value_at<T: FromParam>(&mut self, pos: usize, initial: T, tag: &str) -> T {
        let block_index = block_at_pos(&self.text, pos);
        effective_value(self.blocks(), block_index, initial, tag)
    }

    /// Set `tag` to `value` at the selection start, or its end when `at_end`.
    ///
    /// An existing tag of the same name in the target group gets the new
    /// value and any later duplicates are removed; otherwise the tag is
    /// appended to the group, or a new group is created. Unless `at_end`, the
    /// returned selection is moved by the length change.
    pub fn set_tag(&mut self, tag: &str, value: &str, selection: TextSelection, at_end: bool) -> TagEdit {
        let selection = selection.clamped(self.char_len());
        let pos = if at_end { selection.end } else { selection.start };
        let insert = format!("{}{}", tag, value);
        let mut shift = insert.chars().count() as isize;

        let blocks = self.blocks.get_or_insert_with(|| parse_blocks(&self.text));
        let insertion = locate_insertion(&self.text, blocks, pos);

        let new_group = match insertion {
            Insertion::NewGroup { at } => {
                let byte = char_to_byte(&self.text, at);
                self.text.insert_str(byte, &format!("{{{}}}", insert));
                shift += 2;
                true
            }
            Insertion::Existing { block } => {
                if let Some(Block::Override(tags)) = blocks.get_mut(block) {
                    let alias = tag_alias(tag);
                    let mut found = false;
                    tags.retain_mut(|existing| {
                        if !existing.matches(tag, alias) {
                            return true;
                        }
                        shift -= existing.char_len() as isize;
                        if found {
                            return false;
                        }
                        existing.set_value(value);
                        found = true;
                        true
                    });
                    if !found {
                        tags.push(Tag::with_value(tag, value));
                    }
                }
                self.text = serialize_blocks(blocks);
                false
            }
        };
        self.blocks = Some(parse_blocks(&self.text));

        debug!("Set {}{} at {} ({:?}), shift {}", tag, value, pos, insertion, shift);

        let selection = if at_end {
            selection
        } else {
            selection.shifted(shift, self.char_len())
        };
        TagEdit {
            selection,
            shift,
            new_group,
        }
    }

    /// Flip an on/off flag for the selection.
    ///
    /// The inverse of the current value goes at the selection start. With a
    /// non-empty selection the current value is restored at its end, so only
    /// the selected span changes.
    pub fn toggle_flag(&mut self, flag: FormatFlag, style: &Style, selection: TextSelection) -> TagEdit {
        let selection = selection.clamped(self.char_len());
        let state = self.value_at(selection.start, flag.style_default(style), flag.tag());

        let edit = self.set_tag(flag.tag(), flag_value(!state), selection, false);
        if !selection.is_empty() {
            self.set_tag(flag.tag(), flag_value(state), edit.selection, true);
        }
        edit
    }

    /// Font in effect at a position
    pub fn font_at(&mut self, pos: usize, style: &Style) -> FontSpec {
        FontSpec {
            face: self.value_at(pos, style.font.clone(), "\\fn"),
            size: self.value_at(pos, style.font_size as i32, "\\fs"),
            bold: self.value_at(pos, style.bold, "\\b"),
            italic: self.value_at(pos, style.italic, "\\i"),
            underline: self.value_at(pos, style.underline, "\\u"),
        }
    }

    /// Write tags for every attribute where `font` differs from the font in
    /// effect at the selection start. Returns `None` when nothing differs.
    pub fn apply_font(&mut self, font: &FontSpec, style: &Style, selection: TextSelection) -> Option<TagEdit> {
        let mut selection = selection.clamped(self.char_len());
        let current = self.font_at(selection.start, style);
        if current == *font {
            return None;
        }

        let mut changes: Vec<(&str, String)> = Vec::new();
        if font.face != current.face {
            changes.push(("\\fn", font.face.clone()));
        }
        if font.size != current.size {
            changes.push(("\\fs", font.size.to_string()));
        }
        if font.bold != current.bold {
            changes.push(("\\b", flag_value(font.bold).to_string()));
        }
        if font.italic != current.italic {
            changes.push(("\\i", flag_value(font.italic).to_string()));
        }
        if font.underline != current.underline {
            changes.push(("\\u", flag_value(font.underline).to_string()));
        }

        let mut last = None;
        for (tag, value) in changes {
            let edit = self.set_tag(tag, &value, selection, false);
            selection = edit.selection;
            last = Some(edit);
        }
        last
    }

    /// Color of a slot in effect at a position
    pub fn color_at(&mut self, pos: usize, slot: ColorSlot, style: &Style) -> Color {
        self.value_at(pos, slot.style_default(style), slot.tag())
    }

    /// Set a color at the selection start. Returns `None` when the color is
    /// already in effect there.
    pub fn apply_color(
        &mut self,
        slot: ColorSlot,
        color: Color,
        style: &Style,
        selection: TextSelection,
    ) -> Option<TagEdit> {
        let selection = selection.clamped(self.char_len());
        let current = self.color_at(selection.start, slot, style);
        if current.same_rgb(&color) {
            return None;
        }
        Some(self.set_tag(slot.tag(), &color.to_tag_value(), selection, false))
    }
}

impl fmt::Display for TaggedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// On/off attributes with a toolbar toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatFlag {
    Bold,
    Italic,
    Underline,
    Strikeout,
}

impl FormatFlag {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Bold => "\\b",
            Self::Italic => "\\i",
            Self::Underline => "\\u",
            Self::Strikeout => "\\s",
        }
    }

    /// Description used for the commit
    pub fn description(&self) -> &'static str {
        match self {
            Self::Bold => "toggle bold",
            Self::Italic => "toggle italic",
            Self::Underline => "toggle underline",
            Self::Strikeout => "toggle strikeout",
        }
    }

    pub fn style_default(&self, style: &Style) -> bool {
        match self {
            Self::Bold => style.bold,
            Self::Italic => style.italic,
            Self::Underline => style.underline,
            Self::Strikeout => style.strikeout,
        }
    }
}

impl FromStr for FormatFlag {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bold" | "b" => Ok(Self::Bold),
            "italic" | "i" => Ok(Self::Italic),
            "underline" | "u" => Ok(Self::Underline),
            "strikeout" | "s" => Ok(Self::Strikeout),
            _ => Err(EditError::UnknownFlag(s.to_string())),
        }
    }
}

/// The four color tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSlot {
    Primary,
    Secondary,
    Outline,
    Shadow,
}

impl ColorSlot {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Primary => "\\c",
            Self::Secondary => "\\2c",
            Self::Outline => "\\3c",
            Self::Shadow => "\\4c",
        }
    }

    pub fn style_default(&self, style: &Style) -> Color {
        match self {
            Self::Primary => style.primary,
            Self::Secondary => style.secondary,
            Self::Outline => style.outline,
            Self::Shadow => style.shadow,
        }
    }
}

impl FromStr for ColorSlot {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "primary" | "1" => Ok(Self::Primary),
            "secondary" | "2" => Ok(Self::Secondary),
            "outline" | "3" => Ok(Self::Outline),
            "shadow" | "4" => Ok(Self::Shadow),
            _ => Err(EditError::UnknownColorSlot(s.to_string())),
        }
    }
}

/// Font attributes a font picker returns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSpec {
    pub face: String,
    pub size: i32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

fn flag_value(state: bool) -> &'static str {
    if state { "1" } else { "0" }
}

fn char_to_byte(text: &str, pos: usize) -> usize {
    text.char_indices().nth(pos).map_or(text.len(), |(byte, _)| byte)
}

/// Char index of the last `ch` at or before `pos`
fn rfind_char(text: &str, ch: char, pos: usize) -> Option<usize> {
    text.chars()
        .take(pos.saturating_add(1))
        .enumerate()
        .filter(|(_, c)| *c == ch)
        .map(|(idx, _)| idx)
        .last()
}
