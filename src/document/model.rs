/*!
 * In-memory subtitle document.
 *
 * Holds dialogue lines, styles, the selection and the active line, plus a
 * commit log. The log only records what changed; it does not keep undo
 * snapshots.
 */

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::ass::Style;
use crate::document::commit::{CommitFlags, CommitId, CommitRecord};
use crate::errors::EditError;

/// Largest value a margin field accepts
pub const MAX_MARGIN: i32 = 9999;

/// Stable identifier of a dialogue line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineId(pub u64);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}", self.0)
    }
}

/// Margin fields shown by the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Margin {
    Left,
    Right,
    /// Sets top and bottom together
    Vertical,
}

impl Margin {
    /// Description used for the commit
    pub fn description(&self) -> &'static str {
        match self {
            Margin::Left => "MarginL change",
            Margin::Right => "MarginR change",
            Margin::Vertical => "MarginV change",
        }
    }
}

/// A dialogue line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    #[serde(skip)]
    pub id: Option<LineId>,
    pub start_ms: u64,
    pub end_ms: u64,
    #[serde(default)]
    pub layer: i32,
    pub style: String,
    #[serde(default)]
    pub actor: String,
    #[serde(default)]
    pub effect: String,
    #[serde(default)]
    pub comment: bool,
    /// Left, right, top, bottom
    #[serde(default)]
    pub margins: [i32; 4],
    pub text: String,
}

impl Line {
    /// Line with the given timing and text in the default style
    pub fn new(start_ms: u64, end_ms: u64, text: &str) -> Self {
        Self {
            id: None,
            start_ms,
            end_ms,
            layer: 0,
            style: "Default".to_string(),
            actor: String::new(),
            effect: String::new(),
            comment: false,
            margins: [0; 4],
            text: text.to_string(),
        }
    }

    /// Assigned identifier; lines not yet in a document have none
    pub fn line_id(&self) -> Option<LineId> {
        self.id
    }

    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    /// Margin as shown in the panel, unpadded
    pub fn margin_string(&self, margin: Margin) -> String {
        let value = match margin {
            Margin::Left => self.margins[0],
            Margin::Right => self.margins[1],
            Margin::Vertical => self.margins[2],
        };
        value.to_string()
    }

    /// Set a margin from user input; garbage reads as 0
    pub fn set_margin_string(&mut self, margin: Margin, value: &str) {
        let parsed = value
            .trim()
            .parse::<i64>()
            .map(|v| v.clamp(0, MAX_MARGIN as i64) as i32)
            .unwrap_or(0);
        match margin {
            Margin::Left => self.margins[0] = parsed,
            Margin::Right => self.margins[1] = parsed,
            Margin::Vertical => {
                self.margins[2] = parsed;
                self.margins[3] = parsed;
            }
        }
    }
}

/// A subtitle document being edited
#[derive(Debug)]
pub struct Document {
    lines: Vec<Line>,
    styles: Vec<Style>,
    selection: BTreeSet<LineId>,
    active: Option<LineId>,
    commits: Vec<CommitRecord>,
    next_line_id: u64,
    next_commit_id: u64,
}

impl Document {
    /// Empty document with the default style
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            styles: vec![Style::default()],
            selection: BTreeSet::new(),
            active: None,
            commits: Vec::new(),
            next_line_id: 1,
            next_commit_id: 1,
        }
    }

    /// Document holding the given lines
    pub fn with_lines(lines: impl IntoIterator<Item = Line>) -> Self {
        let mut doc = Self::new();
        for line in lines {
            doc.push_line(line);
        }
        doc
    }

    fn assign_id(&mut self, line: &mut Line) -> LineId {
        let id = LineId(self.next_line_id);
        self.next_line_id += 1;
        line.id = Some(id);
        id
    }

    /// Append a line, returning its id
    pub fn push_line(&mut self, mut line: Line) -> LineId {
        let id = self.assign_id(&mut line);
        self.lines.push(line);
        id
    }

    /// Insert a line directly after another one
    pub fn insert_after(&mut self, after: LineId, mut line: Line) -> Result<LineId, EditError> {
        let pos = self.position(after).ok_or(EditError::UnknownLine(after))?;
        let id = self.assign_id(&mut line);
        self.lines.insert(pos + 1, line);
        Ok(id)
    }

    fn position(&self, id: LineId) -> Option<usize> {
        self.lines.iter().position(|l| l.id == Some(id))
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.iter().find(|l| l.id == Some(id))
    }

    pub fn line_mut(&mut self, id: LineId) -> Option<&mut Line> {
        self.lines.iter_mut().find(|l| l.id == Some(id))
    }

    /// Add or replace a style by name
    pub fn set_style(&mut self, style: Style) {
        match self.styles.iter_mut().find(|s| s.name == style.name) {
            Some(existing) => *existing = style,
            None => self.styles.push(style),
        }
    }

    pub fn style(&self, name: &str) -> Option<&Style> {
        self.styles.iter().find(|s| s.name == name)
    }

    pub fn style_names(&self) -> Vec<String> {
        self.styles.iter().map(|s| s.name.clone()).collect()
    }

    /// Sorted, distinct, non-empty actor names
    pub fn actors(&self) -> Vec<String> {
        self.lines
            .iter()
            .filter(|l| !l.actor.is_empty())
            .map(|l| l.actor.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn active_line(&self) -> Option<LineId> {
        self.active
    }

    pub fn selection(&self) -> &BTreeSet<LineId> {
        &self.selection
    }

    /// Make one line active and the only selected line
    pub fn select(&mut self, id: LineId) -> Result<(), EditError> {
        if self.position(id).is_none() {
            return Err(EditError::UnknownLine(id));
        }
        self.active = Some(id);
        self.selection = BTreeSet::from([id]);
        Ok(())
    }

    /// Replace the selection; the active line must be part of the document
    pub fn set_selection(
        &mut self,
        selection: impl IntoIterator<Item = LineId>,
        active: Option<LineId>,
    ) -> Result<(), EditError> {
        let selection: BTreeSet<LineId> = selection.into_iter().collect();
        if let Some(unknown) = selection
            .iter()
            .chain(active.iter())
            .find(|id| self.position(**id).is_none())
        {
            return Err(EditError::UnknownLine(*unknown));
        }
        self.selection = selection;
        self.active = active;
        Ok(())
    }

    /// Move the active line to the following line. Returns false at the end.
    pub fn next_line(&mut self) -> bool {
        let next = self
            .active
            .and_then(|id| self.position(id))
            .and_then(|pos| self.lines.get(pos + 1))
            .and_then(|line| line.id);

        match next {
            Some(id) => {
                self.active = Some(id);
                self.selection = BTreeSet::from([id]);
                true
            }
            None => false,
        }
    }

    /// Apply a mutation to every selected line
    pub fn for_each_selected(&mut self, mut apply: impl FnMut(&mut Line)) {
        let selection = &self.selection;
        self.lines
            .iter_mut()
            .filter(|l| l.id.is_some_and(|id| selection.contains(&id)))
            .for_each(|l| apply(l));
    }

    /// Record a commit.
    ///
    /// When `amend` names the most recent commit, that commit absorbs this one
    /// and its id is returned; otherwise a new commit is recorded.
    pub fn commit(
        &mut self,
        description: &str,
        flags: CommitFlags,
        amend: Option<CommitId>,
        single_line: Option<LineId>,
    ) -> CommitId {
        if let (Some(amend_id), Some(last)) = (amend, self.commits.last_mut()) {
            if last.id == amend_id {
                last.flags |= flags;
                if last.single_line != single_line {
                    last.single_line = None;
                }
                last.amend_count += 1;
                debug!("Amended commit {} '{}'", amend_id, description);
                return amend_id;
            }
        }

        let id = CommitId(self.next_commit_id);
        self.next_commit_id += 1;
        self.commits.push(CommitRecord {
            id,
            description: description.to_string(),
            flags,
            single_line,
            amend_count: 1,
        });
        debug!("Commit {} '{}' ({:?})", id, description, flags);
        id
    }

    pub fn commits(&self) -> &[CommitRecord] {
        &self.commits
    }

    pub fn last_commit(&self) -> Option<&CommitRecord> {
        self.commits.last()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
