use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::ParseOptionError;

/// Which punctuation may appear inside an identifier besides `[A-Za-z0-9_]`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum IdentifierPolicy {
    /// `?` and `!`, for predicate and bang names such as `empty?` or `save!`.
    #[default]
    Predicate,
    /// `.`, so aliases like `Foo.Bar` are captured whole.
    Dotted,
}

impl IdentifierPolicy {
    pub fn is_identifier_char(self, c: u8) -> bool {
        c.is_ascii_alphanumeric()
            || c == b'_'
            || match self {
                IdentifierPolicy::Predicate => c == b'?' || c == b'!',
                IdentifierPolicy::Dotted => c == b'.',
            }
    }

    pub fn name(self) -> &'static str {
        match self {
            IdentifierPolicy::Predicate => "predicate",
            IdentifierPolicy::Dotted => "dotted",
        }
    }
}

pub fn is_identifier_start(c: u8) -> bool {
    c.is_ascii_alphabetic()
}

/// Whitespace as the C locale classifies it.
pub fn is_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r')
}

impl Display for IdentifierPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IdentifierPolicy {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "predicate" => Ok(IdentifierPolicy::Predicate),
            "dotted" => Ok(IdentifierPolicy::Dotted),
            _ => Err(ParseOptionError::new("identifier policy", s)),
        }
    }
}
