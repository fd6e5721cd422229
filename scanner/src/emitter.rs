use crate::{Kind, KindTable, ScopeKind, Tag, TagScope};
use codespan::{Position, Span};

/// Receives tags as they are found. Ordering, dedup and persistence are the
/// sink's business.
pub trait TagSink {
    fn accept(&mut self, tag: Tag);
}

impl TagSink for Vec<Tag> {
    fn accept(&mut self, tag: Tag) {
        self.push(tag);
    }
}

/// A name found in the source, already located in file coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Identifier<'a> {
    pub text: &'a str,
    pub span: Span,
    pub position: Position,
}

pub struct Emitter<'a, S: TagSink + ?Sized> {
    kinds: &'a KindTable,
    sink: &'a mut S,
}

impl<'a, S: TagSink + ?Sized> Emitter<'a, S> {
    pub fn new(kinds: &'a KindTable, sink: &'a mut S) -> Self {
        Emitter { kinds, sink }
    }

    pub fn emit(&mut self, identifier: Identifier<'_>, kind: Kind) -> bool {
        self.emit_scoped(identifier, kind, None)
    }

    /// Returns whether a tag reached the sink.
    pub fn emit_scoped(&mut self, identifier: Identifier<'_>, kind: Kind, scope: Option<&str>) -> bool {
        if identifier.text.is_empty() || !self.kinds.is_enabled(kind) {
            return false;
        }

        let tag = Tag {
            name: identifier.text.to_owned(),
            kind,
            scope: scope.filter(|name| !name.is_empty()).map(|name| TagScope {
                kind: ScopeKind::Module,
                name: name.to_owned(),
            }),
            span: identifier.span,
            position: identifier.position,
        };

        tracing::trace!("Emitting {}", tag);
        self.sink.accept(tag);
        true
    }
}
