/*!
 * Commit bookkeeping for the document.
 *
 * Every mutation made through the edit panel is recorded as a commit with a
 * description and a set of change flags. A commit may amend the previous one
 * when the caller passes its id back, which is how consecutive keystrokes end
 * up as a single undo step.
 */

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::document::model::LineId;

bitflags! {
    /// What a commit changed
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CommitFlags: u32 {
        /// A whole new file was loaded
        const NEW = 1 << 0;
        /// Lines were reordered
        const ORDER = 1 << 1;
        const SCRIPT_INFO = 1 << 2;
        const STYLES = 1 << 3;
        const ATTACHMENT = 1 << 4;
        /// Dialogue lines were added or removed
        const DIAG_ADDREM = 1 << 5;
        const DIAG_TIME = 1 << 6;
        const DIAG_TEXT = 1 << 7;
        /// Style, actor, effect, layer, margins or comment flag
        const DIAG_META = 1 << 8;
        const DIAG_FULL = Self::DIAG_TIME.bits() | Self::DIAG_TEXT.bits() | Self::DIAG_META.bits();
    }
}

/// Identifier of a recorded commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CommitId(pub u64);

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One entry of the commit log
#[derive(Debug, Clone, PartialEq)]
pub struct CommitRecord {
    pub id: CommitId,
    pub description: String,
    pub flags: CommitFlags,
    /// Set when exactly one line was touched
    pub single_line: Option<LineId>,
    /// Number of commits folded into this one, including itself
    pub amend_count: usize,
}
