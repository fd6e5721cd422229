use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Kind {
    Macro,
    Function,
    Module,
    Record,
    Protocol,
    Implementation,
}

pub struct KindDefinition {
    pub kind: Kind,
    pub letter: char,
    pub name: &'static str,
    pub description: &'static str,
    pub enabled: bool,
}

pub static KIND_DEFINITIONS: [KindDefinition; Kind::COUNT] = [
    KindDefinition {
        kind: Kind::Macro,
        letter: 'd',
        name: "macro",
        description: "macro definitions",
        enabled: true,
    },
    KindDefinition {
        kind: Kind::Function,
        letter: 'f',
        name: "function",
        description: "functions",
        enabled: true,
    },
    KindDefinition {
        kind: Kind::Module,
        letter: 'm',
        name: "module",
        description: "modules",
        enabled: true,
    },
    KindDefinition {
        kind: Kind::Record,
        letter: 'r',
        name: "record",
        description: "record definitions",
        enabled: true,
    },
    KindDefinition {
        kind: Kind::Protocol,
        letter: 'p',
        name: "protocol",
        description: "protocol definitions",
        enabled: true,
    },
    KindDefinition {
        kind: Kind::Implementation,
        letter: 'l',
        name: "impl",
        description: "protocol implementations",
        enabled: true,
    },
];

impl Kind {
    pub const COUNT: usize = 6;

    pub const ALL: [Kind; Kind::COUNT] = [
        Kind::Macro,
        Kind::Function,
        Kind::Module,
        Kind::Record,
        Kind::Protocol,
        Kind::Implementation,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn definition(self) -> &'static KindDefinition {
        &KIND_DEFINITIONS[self.index()]
    }

    pub fn letter(self) -> char {
        self.definition().letter
    }

    pub fn name(self) -> &'static str {
        self.definition().name
    }

    pub fn description(self) -> &'static str {
        self.definition().description
    }

    pub fn from_letter(letter: char) -> Option<Kind> {
        KIND_DEFINITIONS
            .iter()
            .find(|definition| definition.letter == letter)
            .map(|definition| definition.kind)
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindSpecError {
    UnknownKind(char),
    DanglingModifier(char),
}

impl Display for KindSpecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            KindSpecError::UnknownKind(letter) => write!(f, "Unknown kind letter '{letter}'"),
            KindSpecError::DanglingModifier(modifier) => {
                write!(f, "Modifier '{modifier}' is not followed by a kind letter")
            }
        }
    }
}

impl std::error::Error for KindSpecError {}

/// Per-kind enabled flags. Configured before a scan, read-only during it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindTable {
    enabled: [bool; Kind::COUNT],
}

impl Default for KindTable {
    fn default() -> Self {
        let mut enabled = [false; Kind::COUNT];
        for definition in KIND_DEFINITIONS.iter() {
            enabled[definition.kind.index()] = definition.enabled;
        }
        KindTable { enabled }
    }
}

impl KindTable {
    pub fn none() -> Self {
        KindTable {
            enabled: [false; Kind::COUNT],
        }
    }

    pub fn is_enabled(&self, kind: Kind) -> bool {
        self.enabled[kind.index()]
    }

    pub fn set_enabled(&mut self, kind: Kind, enabled: bool) {
        self.enabled[kind.index()] = enabled;
    }

    /// Applies a ctags style kind list.
    ///
    /// `"fm"` enables exactly functions and modules. A spec starting with `+`
    /// or `-` edits the current flags instead, e.g. `"-r+p"`. `"*"` turns
    /// everything on.
    pub fn apply_spec(&mut self, spec: &str) -> Result<(), KindSpecError> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Ok(());
        }

        if !spec.starts_with(['+', '-']) {
            *self = KindTable::none();
        }

        let mut enable = true;
        let mut pending = None;
        for c in spec.chars() {
            match c {
                '+' | '-' => {
                    if let Some(modifier) = pending {
                        return Err(KindSpecError::DanglingModifier(modifier));
                    }
                    enable = c == '+';
                    pending = Some(c);
                }
                '*' => {
                    self.enabled = [enable; Kind::COUNT];
                    pending = None;
                }
                letter => {
                    let kind = Kind::from_letter(letter).ok_or(KindSpecError::UnknownKind(letter))?;
                    self.set_enabled(kind, enable);
                    pending = None;
                }
            }
        }

        match pending {
            Some(modifier) => Err(KindSpecError::DanglingModifier(modifier)),
            None => Ok(()),
        }
    }

    pub fn from_spec(spec: &str) -> Result<Self, KindSpecError> {
        let mut table = KindTable::default();
        table.apply_spec(spec)?;
        Ok(table)
    }

    pub fn enabled_kinds(&self) -> impl Iterator<Item = Kind> + '_ {
        Kind::ALL.into_iter().filter(|kind| self.is_enabled(*kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definitions_are_indexed_by_kind() {
        for kind in Kind::ALL {
            assert_eq!(kind.definition().kind, kind);
        }
    }

    #[test]
    fn letters_are_unique() {
        for kind in Kind::ALL {
            assert_eq!(Kind::from_letter(kind.letter()), Some(kind));
        }
        assert_eq!(Kind::from_letter('x'), None);
    }

    #[test]
    fn everything_enabled_by_default() {
        let table = KindTable::default();

        assert_eq!(table.enabled_kinds().count(), Kind::COUNT);
    }

    #[test]
    fn plain_spec_replaces_selection() {
        let table = KindTable::from_spec("fm").unwrap();

        assert_eq!(
            table.enabled_kinds().collect::<Vec<_>>(),
            vec![Kind::Function, Kind::Module]
        );
    }

    #[test]
    fn modifiers_edit_selection() {
        let table = KindTable::from_spec("-rl").unwrap();

        assert!(!table.is_enabled(Kind::Record));
        assert!(!table.is_enabled(Kind::Implementation));
        assert!(table.is_enabled(Kind::Protocol));

        let table = KindTable::from_spec("-*+f").unwrap();
        assert_eq!(table.enabled_kinds().collect::<Vec<_>>(), vec![Kind::Function]);
    }

    #[test]
    fn bad_specs_are_rejected() {
        assert_eq!(
            KindTable::from_spec("fz"),
            Err(KindSpecError::UnknownKind('z'))
        );
        assert_eq!(
            KindTable::from_spec("+f-"),
            Err(KindSpecError::DanglingModifier('-'))
        );
        assert_eq!(
            KindTable::from_spec("+-f"),
            Err(KindSpecError::DanglingModifier('+'))
        );
    }
}
