/*!
 * Splitting subtitle text into blocks.
 *
 * A line's text is a sequence of plain runs, drawing runs (text following a
 * non-zero `\p` tag) and override groups. Comment groups, `{...}` without
 * any backslash, are plain runs that keep their braces. An unmatched `{` is
 * plain text.
 */

use std::fmt;

use crate::ass::tags::{parse_tags, Tag};

/// One parsed segment of a line's text
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Visible text, or a comment group including its braces
    Plain(String),
    /// Vector drawing commands at the given `\p` scale
    Drawing { text: String, scale: i64 },
    /// An override group
    Override(Vec<Tag>),
}

impl Block {
    /// Plain run that is really a `{comment}`
    pub fn is_comment(&self) -> bool {
        matches!(self, Block::Plain(text) if text.starts_with('{'))
    }

    /// Tags of an override group
    pub fn tags(&self) -> Option<&[Tag]> {
        match self {
            Block::Override(tags) => Some(tags),
            _ => None,
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Block::Plain(text) | Block::Drawing { text, .. } => f.write_str(text),
            Block::Override(tags) => {
                f.write_str("{")?;
                for tag in tags {
                    write!(f, "{}", tag)?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Parse a line's text into blocks
pub fn parse_blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut drawing_scale: i64 = 0;
    let mut cur = 0;

    while cur < text.len() {
        let rest = &text[cur..];

        if rest.starts_with('{') {
            if let Some(close) = rest.find('}') {
                let content = &rest[1..close];
                cur += close + 1;

                if !content.is_empty() && !content.contains('\\') {
                    blocks.push(Block::Plain(format!("{{{}}}", content)));
                } else {
                    let tags = parse_tags(content);
                    if let Some(scale) = tags
                        .iter()
                        .filter(|tag| tag.name == "\\p")
                        .filter_map(|tag| tag.first_param())
                        .last()
                    {
                        drawing_scale = scale.as_int().unwrap_or(0);
                    }
                    blocks.push(Block::Override(tags));
                }
                continue;
            }
        }

        // Plain run up to the next brace, never empty
        let first_len = rest.chars().next().map_or(1, char::len_utf8);
        let end = rest[first_len..]
            .find('{')
            .map_or(rest.len(), |pos| pos + first_len);
        let run = rest[..end].to_string();
        cur += end;

        if drawing_scale == 0 {
            blocks.push(Block::Plain(run));
        } else {
            blocks.push(Block::Drawing {
                text: run,
                scale: drawing_scale,
            });
        }
    }

    blocks
}

/// Serialize blocks back into text
pub fn serialize_blocks(blocks: &[Block]) -> String {
    blocks.iter().map(ToString::to_string).collect()
}

/// Text with plain runs only; override and comment groups removed
pub fn strip_tags(text: &str) -> String {
    parse_blocks(text)
        .into_iter()
        .filter_map(|block| match block {
            Block::Plain(text) if !text.starts_with('{') => Some(text),
            _ => None,
        })
        .collect()
}
