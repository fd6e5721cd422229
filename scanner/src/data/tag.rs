use crate::Kind;
use codespan::{Position, Span};
use std::fmt::{Display, Formatter};

/// The only enclosing construct a tag can be attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScopeKind {
    Module,
}

impl ScopeKind {
    pub fn name(self) -> &'static str {
        match self {
            ScopeKind::Module => "module",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagScope {
    pub kind: ScopeKind,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag {
    pub name: String,
    pub kind: Kind,
    pub scope: Option<TagScope>,
    /// Byte span of the name within the whole file.
    pub span: Span,
    /// Start of the name, zero-based.
    pub position: Position,
}

impl Tag {
    pub fn scope_name(&self) -> Option<&str> {
        self.scope.as_ref().map(|scope| scope.name.as_str())
    }

    /// Name qualified by its module, e.g. `Foo.bar`.
    pub fn qualified_name(&self) -> String {
        match self.scope_name() {
            Some(scope) => format!("{scope}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.name)?;
        if let Some(scope) = &self.scope {
            write!(f, " ({}:{})", scope.kind.name(), scope.name)?;
        }
        Ok(())
    }
}
