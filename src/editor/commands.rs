/*!
 * Commands a UI layer sends to the edit panel.
 *
 * Each control of the panel maps to one command; the panel applies it to
 * the document and updates its view model.
 */

use serde::{Deserialize, Serialize};

use crate::ass::Color;
use crate::document::Margin;
use crate::editor::override_edit::{ColorSlot, FontSpec, FormatFlag, TextSelection};

/// How the text control changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextChange {
    Insert,
    Delete,
}

impl TextChange {
    /// Description used for the commit
    pub fn description(&self) -> &'static str {
        match self {
            TextChange::Insert => "insert text",
            TextChange::Delete => "delete text",
        }
    }
}

/// Whether times are shown as timestamps or frame numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeMode {
    #[default]
    Time,
    Frame,
}

/// Time controls; each keeps its own amendable commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Start,
    End,
    Duration,
}

impl TimeField {
    pub(crate) fn index(&self) -> usize {
        match self {
            TimeField::Start => 0,
            TimeField::End => 1,
            TimeField::Duration => 2,
        }
    }
}

/// Input from the panel's controls
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    /// The text control's content changed
    TextChanged { text: String, kind: TextChange },
    /// The text control's selection changed
    SetSelection(TextSelection),
    /// Bold/italic/underline/strikeout button
    ToggleFlag(FormatFlag),
    /// A font was picked
    SetFont(FontSpec),
    /// A color was picked for one of the four color slots
    SetColor { slot: ColorSlot, color: Color },
    SetStyle(String),
    SetActor(String),
    SetEffect(String),
    SetLayer(i32),
    SetMargin { margin: Margin, value: String },
    SetComment(bool),
    SetStartTime(u64),
    SetEndTime(u64),
    SetDuration(u64),
    /// Duration in frame mode
    SetDurationFrames(i64),
    SetTimeMode(TimeMode),
    /// Enter key or commit button: go to the next line, creating one at the end
    CommitLine,
}
