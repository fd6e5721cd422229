use crate::files::Files;
use codespan::{FileError, FileId, Position, Span};
use scanner::{IdentifierPolicy, Tag};

/// A tag found somewhere in the workspace.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub file_id: FileId,
    pub tag: Tag,
}

/// The reference under the cursor: everything up to the end of the dotted
/// segment the cursor is in. On `Foo.bar` the cursor on `Foo` yields `Foo`,
/// anywhere on `bar` yields `Foo.bar`.
fn reference_at<'a>(word: &'a str, word_span: Span, index: usize) -> (&'a str, Span) {
    let offset = index.saturating_sub(word_span.start()).min(word.len());
    let end = word[offset..]
        .find('.')
        .map(|dot| offset + dot)
        .unwrap_or(word.len());
    let start = word[..end].rfind('.').map(|dot| dot + 1).unwrap_or(0);

    (
        &word[..end],
        Span::new(word_span.start() + start, word_span.start() + end),
    )
}

fn matching<'a>(
    files: &'a Files,
    predicate: impl Fn(&Tag) -> bool + 'a,
) -> impl Iterator<Item = Definition> + 'a {
    files
        .tags()
        .filter(move |(_, tag)| predicate(tag))
        .map(|(file_id, tag)| Definition {
            file_id,
            tag: tag.clone(),
        })
}

/// Tags named `reference`. A qualified `Mod.fun` prefers functions scoped to
/// `Mod` and falls back to any `fun`.
pub fn resolve(files: &Files, reference: &str) -> Vec<Definition> {
    let exact: Vec<Definition> = matching(files, |tag| tag.name == reference).collect();
    if !exact.is_empty() {
        return exact;
    }

    let Some((qualifier, name)) = reference.rsplit_once('.') else {
        return exact;
    };

    let scoped: Vec<Definition> = matching(files, |tag| {
        tag.name == name && tag.scope_name() == Some(qualifier)
    })
    .collect();
    if !scoped.is_empty() {
        return scoped;
    }

    matching(files, |tag| tag.name == name).collect()
}

/// Definitions for the identifier at `position` in `id`, same file first,
/// plus the span of the part of the identifier that was resolved.
pub fn find_definitions(
    files: &Files,
    id: FileId,
    position: Position,
    policy: IdentifierPolicy,
) -> Result<Option<(Vec<Definition>, Span)>, FileError> {
    let file = &files.get(id).file;
    // Identifiers are ASCII, so a column inside a multi-byte character
    // cannot be on one.
    let index = match file.position_to_byte_index(position) {
        Err(FileError::InvalidCharBoundary { .. }) => return Ok(None),
        index => index?,
    };
    let (word, word_span) =
        file.get_word_at_position(position, |b| b == b'.' || policy.is_identifier_char(b))?;
    let (reference, span) = reference_at(word, word_span, index);

    if reference.is_empty() || reference.ends_with('.') {
        return Ok(None);
    }

    let mut definitions = resolve(files, reference);
    definitions.sort_by_key(|definition| definition.file_id != id);

    Ok(Some((definitions, span)))
}
