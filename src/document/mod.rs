/*!
 * Document model consumed by the edit panel.
 *
 * - `model`: lines, styles, selection and the active line
 * - `commit`: change flags and the commit log
 */

pub mod commit;
pub mod model;

// Re-export main types
pub use commit::{CommitFlags, CommitId, CommitRecord};
pub use model::{Document, Line, LineId, Margin, MAX_MARGIN};
