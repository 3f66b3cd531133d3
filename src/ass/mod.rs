/*!
 * Inline override-tag syntax of ASS subtitle text.
 *
 * - `blocks`: splitting text into plain, drawing and override runs
 * - `tags`: override tags and their parameters
 * - `color`: `&HBBGGRR&` color literals
 * - `style`: style defaults used when no override applies
 */

pub mod blocks;
pub mod color;
pub mod style;
pub mod tags;

// Re-export main types
pub use blocks::{parse_blocks, serialize_blocks, strip_tags, Block};
pub use color::Color;
pub use style::Style;
pub use tags::{tag_alias, FromParam, Tag, TagParam};
