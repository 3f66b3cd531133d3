/*!
 * Subtitle edit panel logic.
 *
 * - `override_edit`: inserting, replacing and toggling override tags at the cursor
 * - `coalesce`: folding repeated edits into one commit
 * - `commands`: input from the panel's controls
 * - `panel`: the headless panel controller
 */

pub mod coalesce;
pub mod commands;
pub mod override_edit;
pub mod panel;

// Re-export main types
pub use coalesce::{CommitCoalescer, DEFAULT_COALESCE_WINDOW};
pub use commands::{EditCommand, TextChange, TimeField, TimeMode};
pub use override_edit::{
    block_at_pos, effective_value, locate_insertion, ColorSlot, FontSpec, FormatFlag, Insertion, TagEdit,
    TaggedText, TextSelection,
};
pub use panel::{EditContext, EditPanel, Focus, PanelView};
