use crate::indexed_file::IndexedFile;
use codespan::{File, FileId};
use scanner::{Scanner, Tag};
use std::collections::HashMap;
use tower_lsp_server::lsp_types::{TextDocumentContentChangeEvent, Uri};

#[derive(Default)]
pub struct Files {
    files: Vec<IndexedFile>,
    pub sources: HashMap<Uri, FileId>,
}

impl Files {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, uri: Uri, contents: String) -> FileId {
        let id = FileId::new(self.files.len());
        let file = File::new(uri.as_str(), contents);
        self.files.push(IndexedFile::new(id, uri.clone(), file));
        self.sources.insert(uri, id);
        id
    }

    /// Returns the existing id for `uri`, leaving its contents alone.
    pub fn get_or_insert(&mut self, uri: Uri, contents: String) -> FileId {
        match self.sources.get(&uri) {
            Some(id) => *id,
            None => self.add(uri, contents),
        }
    }

    /// Like [`Files::get_or_insert`] but the editor's text always wins.
    pub fn open(&mut self, uri: Uri, contents: String) -> FileId {
        match self.sources.get(&uri).copied() {
            Some(id) => {
                self.update(id, contents);
                id
            }
            None => self.add(uri, contents),
        }
    }

    pub fn get(&self, id: FileId) -> &IndexedFile {
        &self.files[id.get()]
    }

    pub fn get_mut(&mut self, id: FileId) -> &mut IndexedFile {
        &mut self.files[id.get()]
    }

    pub fn update(&mut self, id: FileId, source: String) {
        self.get_mut(id).file.update(source)
    }

    /// Applies editor changes in order. Each ranged change is resolved
    /// against the text produced by the previous one.
    pub fn apply_changes(
        &mut self,
        uri: &Uri,
        changes: Vec<TextDocumentContentChangeEvent>,
    ) -> Option<FileId> {
        let id = *self.sources.get(uri)?;

        for change in changes {
            let file = &self.get(id).file;
            let source = match change.range {
                None => change.text,
                Some(range) => match file.range_to_byte_span(&range.into()) {
                    Ok(span) if span.start <= span.end => {
                        let mut source = file.source.clone();
                        source.replace_range(span, &change.text);
                        source
                    }
                    _ => {
                        tracing::warn!("Dropping change outside of {}", uri.as_str());
                        continue;
                    }
                },
            };
            self.update(id, source);
        }

        Some(id)
    }

    pub fn index(&mut self, id: FileId, scanner: &Scanner) {
        self.get_mut(id).index(scanner);
    }

    pub fn index_all(&mut self, scanner: &Scanner) {
        for file in self.files.iter_mut() {
            file.index(scanner);
        }
    }

    /// Every tag in the workspace, paired with the file it lives in.
    pub fn tags(&self) -> impl Iterator<Item = (FileId, &Tag)> {
        self.files
            .iter()
            .flat_map(|file| file.tags.iter().map(move |tag| (file.id, tag)))
    }
}
