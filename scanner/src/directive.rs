use crate::{Kind, ParseOptionError};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Which definition keywords are recognised.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum KeywordSet {
    /// `def`, `defp`, `defmacro`, `defmacrop`, `defrecord`, `defmodule`.
    Baseline,
    /// Baseline plus `defprotocol` and `defimpl`.
    #[default]
    Extended,
}

impl KeywordSet {
    /// Maps the leading keyword of a line to the kind it defines.
    pub fn classify(self, keyword: &str) -> Option<Kind> {
        match keyword {
            "def" | "defp" => Some(Kind::Function),
            "defmacro" | "defmacrop" => Some(Kind::Macro),
            "defrecord" => Some(Kind::Record),
            "defmodule" => Some(Kind::Module),
            "defprotocol" if self == KeywordSet::Extended => Some(Kind::Protocol),
            "defimpl" if self == KeywordSet::Extended => Some(Kind::Implementation),
            // import, require, alias, use, ...
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            KeywordSet::Baseline => "baseline",
            KeywordSet::Extended => "extended",
        }
    }
}

/// Every recognised keyword starts with this byte.
pub const DIRECTIVE_LEAD: u8 = b'd';

impl Display for KeywordSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeywordSet {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "baseline" => Ok(KeywordSet::Baseline),
            "extended" => Ok(KeywordSet::Extended),
            _ => Err(ParseOptionError::new("keyword set", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_every_keyword() {
        let cases = [
            ("def", Kind::Function),
            ("defp", Kind::Function),
            ("defmacro", Kind::Macro),
            ("defmacrop", Kind::Macro),
            ("defrecord", Kind::Record),
            ("defmodule", Kind::Module),
            ("defprotocol", Kind::Protocol),
            ("defimpl", Kind::Implementation),
        ];

        for (keyword, kind) in cases {
            assert_eq!(KeywordSet::Extended.classify(keyword), Some(kind), "{keyword}");
        }
    }

    #[test]
    fn baseline_ignores_protocols() {
        assert_eq!(KeywordSet::Baseline.classify("defprotocol"), None);
        assert_eq!(KeywordSet::Baseline.classify("defimpl"), None);
        assert_eq!(KeywordSet::Baseline.classify("defmodule"), Some(Kind::Module));
    }

    #[test]
    fn matching_is_exact_and_case_sensitive() {
        for keyword in ["de", "define", "Def", "DEFMODULE", "defs", "defmodules", "", "import"] {
            assert_eq!(KeywordSet::Extended.classify(keyword), None, "{keyword}");
        }
    }
}
