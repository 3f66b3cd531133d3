/*!
 * Override tags.
 *
 * An override group `{\b1\fnArial\pos(10,20)}` is split into tags at
 * backslashes outside parentheses. Tag names are matched by prefix against
 * a fixed prototype table; anything unrecognized is kept verbatim so that
 * serializing a parsed group always reproduces the original text.
 */

use std::fmt;

use crate::ass::color::Color;

/// How a tag's parameters are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagSyntax {
    /// Single value directly after the name: `\b1`, `\fnArial`
    Simple,
    /// Comma separated values in parentheses: `\pos(1,2)`
    Parenthesized,
}

/// Known tags. Order matters: a name must come before any shorter name it
/// starts with, so `\bord` is tried before `\b`.
const PROTOTYPES: &[(&str, TagSyntax)] = &[
    ("\\alpha", TagSyntax::Simple),
    ("\\bord", TagSyntax::Simple),
    ("\\xbord", TagSyntax::Simple),
    ("\\ybord", TagSyntax::Simple),
    ("\\shad", TagSyntax::Simple),
    ("\\xshad", TagSyntax::Simple),
    ("\\yshad", TagSyntax::Simple),
    ("\\fade", TagSyntax::Parenthesized),
    ("\\move", TagSyntax::Parenthesized),
    ("\\clip", TagSyntax::Parenthesized),
    ("\\iclip", TagSyntax::Parenthesized),
    ("\\fscx", TagSyntax::Simple),
    ("\\fscy", TagSyntax::Simple),
    ("\\pos", TagSyntax::Parenthesized),
    ("\\org", TagSyntax::Parenthesized),
    ("\\pbo", TagSyntax::Simple),
    ("\\fad", TagSyntax::Parenthesized),
    ("\\fsp", TagSyntax::Simple),
    ("\\frx", TagSyntax::Simple),
    ("\\fry", TagSyntax::Simple),
    ("\\frz", TagSyntax::Simple),
    ("\\fr", TagSyntax::Simple),
    ("\\fax", TagSyntax::Simple),
    ("\\fay", TagSyntax::Simple),
    ("\\1c", TagSyntax::Simple),
    ("\\2c", TagSyntax::Simple),
    ("\\3c", TagSyntax::Simple),
    ("\\4c", TagSyntax::Simple),
    ("\\1a", TagSyntax::Simple),
    ("\\2a", TagSyntax::Simple),
    ("\\3a", TagSyntax::Simple),
    ("\\4a", TagSyntax::Simple),
    ("\\fe", TagSyntax::Simple),
    ("\\ko", TagSyntax::Simple),
    ("\\kf", TagSyntax::Simple),
    ("\\be", TagSyntax::Simple),
    ("\\blur", TagSyntax::Simple),
    ("\\fn", TagSyntax::Simple),
    ("\\fs", TagSyntax::Simple),
    ("\\an", TagSyntax::Simple),
    ("\\c", TagSyntax::Simple),
    ("\\b", TagSyntax::Simple),
    ("\\i", TagSyntax::Simple),
    ("\\u", TagSyntax::Simple),
    ("\\s", TagSyntax::Simple),
    ("\\a", TagSyntax::Simple),
    ("\\k", TagSyntax::Simple),
    ("\\K", TagSyntax::Simple),
    ("\\q", TagSyntax::Simple),
    ("\\p", TagSyntax::Simple),
    ("\\r", TagSyntax::Simple),
    ("\\t", TagSyntax::Parenthesized),
];

/// Legacy alternate spelling of a tag name, if it has one
pub fn tag_alias(name: &str) -> Option<&'static str> {
    match name {
        "\\c" => Some("\\1c"),
        "\\1c" => Some("\\c"),
        _ => None,
    }
}

/// One tag parameter, stored as written
#[derive(Debug, Clone, PartialEq)]
pub struct TagParam {
    pub raw: String,
    /// No value was written; the style supplies it
    pub omitted: bool,
}

impl TagParam {
    fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            omitted: raw.is_empty(),
        }
    }

    /// Replace the value
    pub fn set(&mut self, value: &str) {
        self.raw = value.to_string();
    }

    pub fn as_int(&self) -> Option<i64> {
        let trimmed = self.raw.trim();
        trimmed
            .parse::<i64>()
            .ok()
            .or_else(|| trimmed.parse::<f64>().ok().map(|v| v as i64))
    }

    pub fn as_float(&self) -> Option<f64> {
        self.raw.trim().parse::<f64>().ok()
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_int().map(|v| v != 0)
    }

    pub fn as_color(&self) -> Option<Color> {
        Color::parse_ass(&self.raw).ok()
    }
}

/// Conversion from a tag parameter to a typed value
pub trait FromParam: Sized {
    fn from_param(param: &TagParam) -> Option<Self>;
}

impl FromParam for bool {
    fn from_param(param: &TagParam) -> Option<Self> {
        param.as_bool()
    }
}

impl FromParam for i32 {
    fn from_param(param: &TagParam) -> Option<Self> {
        param.as_int().and_then(|v| i32::try_from(v).ok())
    }
}

impl FromParam for f64 {
    fn from_param(param: &TagParam) -> Option<Self> {
        param.as_float()
    }
}

impl FromParam for String {
    fn from_param(param: &TagParam) -> Option<Self> {
        Some(param.raw.clone())
    }
}

impl FromParam for Color {
    fn from_param(param: &TagParam) -> Option<Self> {
        param.as_color()
    }
}

/// A single override tag
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    /// Tag name including the backslash; the full token for unknown tags
    pub name: String,
    pub params: Vec<TagParam>,
    /// Whether the name matched a known prototype
    pub valid: bool,
    parens: Parens,
}

/// Parenthesis state as written, kept for lossless output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parens {
    None,
    Open,
    Closed,
}

impl Tag {
    /// Parse one token, e.g. `\fs20` or `\pos(10,20)`
    pub fn parse(token: &str) -> Self {
        let Some((name, syntax)) = PROTOTYPES
            .iter()
            .find(|(name, _)| token.starts_with(name))
        else {
            return Self {
                name: token.to_string(),
                params: Vec::new(),
                valid: false,
                parens: Parens::None,
            };
        };

        let rest = &token[name.len()..];
        match syntax {
            TagSyntax::Simple => Self {
                name: name.to_string(),
                params: vec![TagParam::new(rest)],
                valid: true,
                parens: Parens::None,
            },
            TagSyntax::Parenthesized => Self::parse_parenthesized(name, rest),
        }
    }

    fn parse_parenthesized(name: &str, rest: &str) -> Self {
        let Some(inner) = rest.strip_prefix('(') else {
            // `\pos` without arguments, or trailing junk kept as one param
            let params = if rest.is_empty() {
                Vec::new()
            } else {
                vec![TagParam::new(rest)]
            };
            return Self {
                name: name.to_string(),
                params,
                valid: true,
                parens: Parens::None,
            };
        };

        let (inner, parens) = match inner.strip_suffix(')') {
            Some(stripped) if balanced(stripped) => (stripped, Parens::Closed),
            _ => (inner, Parens::Open),
        };

        Self {
            name: name.to_string(),
            params: split_top_level(inner).into_iter().map(TagParam::new).collect(),
            valid: true,
            parens,
        }
    }

    /// Simple tag with a value, as SetTag creates it
    pub fn with_value(name: &str, value: &str) -> Self {
        Self::parse(&format!("{}{}", name, value))
    }

    /// Whether this tag answers to `name` or its alias
    pub fn matches(&self, name: &str, alias: Option<&str>) -> bool {
        self.name == name || alias.is_some_and(|alt| self.name == alt)
    }

    /// First parameter, if any
    pub fn first_param(&self) -> Option<&TagParam> {
        self.params.first()
    }

    /// Replace the first parameter and mark it explicit
    pub fn set_value(&mut self, value: &str) {
        match self.params.first_mut() {
            Some(param) => {
                param.set(value);
                param.omitted = false;
            }
            None => self.params.push(TagParam::new(value)),
        }
    }

    /// Length in characters of the serialized tag
    pub fn char_len(&self) -> usize {
        self.to_string().chars().count()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        match self.parens {
            Parens::None => {
                for param in self.params.iter().filter(|p| !p.omitted) {
                    f.write_str(&param.raw)?;
                }
                Ok(())
            }
            Parens::Open | Parens::Closed => {
                f.write_str("(")?;
                let raw: Vec<&str> = self.params.iter().map(|p| p.raw.as_str()).collect();
                f.write_str(&raw.join(","))?;
                if self.parens == Parens::Closed {
                    f.write_str(")")?;
                }
                Ok(())
            }
        }
    }
}

/// Split the inside of an override group into tag tokens.
///
/// A token starts at every backslash that is not nested in parentheses.
/// Text before the first backslash forms its own token.
pub fn tokenize(content: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth: usize = 0;
    let mut token_start = 0;

    for (idx, ch) in content.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '\\' if depth == 0 && idx > token_start => {
                tokens.push(&content[token_start..idx]);
                token_start = idx;
            }
            _ => {}
        }
    }
    if token_start < content.len() {
        tokens.push(&content[token_start..]);
    }
    tokens
}

/// Parse the inside of an override group
pub fn parse_tags(content: &str) -> Vec<Tag> {
    tokenize(content).into_iter().map(Tag::parse).collect()
}

fn balanced(text: &str) -> bool {
    let mut depth: i32 = 0;
    for ch in text.chars() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth: usize = 0;
    let mut start = 0;
    for (idx, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&text[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}
