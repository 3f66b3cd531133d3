//! Grouping consecutive edits into one undo step.

use std::time::{Duration, Instant};

use crate::document::CommitId;

/// Default length of the grouping window
pub const DEFAULT_COALESCE_WINDOW: Duration = Duration::from_secs(10);

/// Remembers the last commit so the next edit of the same kind can amend it.
///
/// Amending is allowed while edits with the same description keep arriving
/// before `deadline`. Each recorded commit pushes the deadline out again.
#[derive(Debug, Clone)]
pub struct CommitCoalescer {
    window: Duration,
    last_description: Option<String>,
    last_commit_id: Option<CommitId>,
    deadline: Option<Instant>,
}

impl CommitCoalescer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_description: None,
            last_commit_id: None,
            deadline: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Commit id the next commit should amend, if any
    pub fn amend_target(&self, description: &str, amend: bool, now: Instant) -> Option<CommitId> {
        if !amend || self.last_description.as_deref() != Some(description) {
            return None;
        }
        match self.deadline {
            Some(deadline) if now < deadline => self.last_commit_id,
            _ => None,
        }
    }

    /// Remember a commit and restart the window
    pub fn record(&mut self, description: &str, id: CommitId, now: Instant) {
        self.last_description = Some(description.to_string());
        self.last_commit_id = Some(id);
        self.deadline = Some(now + self.window);
    }

    /// Forget the last commit id so the next edit starts a new commit.
    /// The description is kept.
    pub fn reset(&mut self) {
        self.last_commit_id = None;
    }

    pub fn last_commit_id(&self) -> Option<CommitId> {
        self.last_commit_id
    }

    pub fn last_description(&self) -> Option<&str> {
        self.last_description.as_deref()
    }
}

impl Default for CommitCoalescer {
    fn default() -> Self {
        Self::new(DEFAULT_COALESCE_WINDOW)
    }
}
