use codespan::{File, FileId};
use scanner::{Scanner, Tag};
use tower_lsp_server::lsp_types::Uri;

pub struct IndexedFile {
    pub id: FileId,
    pub uri: Uri,
    pub file: File,
    pub tags: Vec<Tag>,
}

impl IndexedFile {
    pub fn new(id: FileId, uri: Uri, file: File) -> IndexedFile {
        IndexedFile {
            id,
            uri,
            file,
            tags: vec![],
        }
    }

    pub fn index(&mut self, scanner: &Scanner) {
        self.tags.clear();
        scanner.scan(&self.file, &mut self.tags);
        tracing::debug!("Indexed {} ({} tags)", self.uri.as_str(), self.tags.len());
    }

    /// The definition line as written, for hovers.
    pub fn definition_source<'a>(&'a self, tag: &'a Tag) -> &'a str {
        self.file
            .get_line_source(tag.position.line)
            .map(str::trim)
            .unwrap_or(tag.name.as_str())
    }
}
