use codespan::{File, FileId};
use scanner::{Tag, TagSink};
use std::path::{Path, PathBuf};

pub struct SourceFile {
    pub path: PathBuf,
    pub file: File,
}

impl SourceFile {
    /// Line text for patterns, empty when the line does not exist.
    pub fn line_text(&self, line: usize) -> &str {
        self.file.get_line_source(line).unwrap_or_default()
    }
}

#[derive(Default)]
pub struct SourceFiles {
    files: Vec<SourceFile>,
}

impl SourceFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: PathBuf, source: String) -> FileId {
        let id = FileId::new(self.files.len());
        let file = File::new(path.display().to_string(), source);
        self.files.push(SourceFile { path, file });
        id
    }

    pub fn get(&self, id: FileId) -> &SourceFile {
        &self.files[id.get()]
    }

    pub fn path(&self, id: FileId) -> &Path {
        &self.get(id).path
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    pub file_id: FileId,
    pub tag: Tag,
}

/// Gathers tags from many files, remembering which file each came from.
#[derive(Debug)]
pub struct TagCollector {
    current: FileId,
    entries: Vec<TagEntry>,
}

impl Default for TagCollector {
    fn default() -> Self {
        TagCollector {
            current: FileId::NONE,
            entries: Vec::new(),
        }
    }
}

impl TagCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags accepted from now on belong to `file_id`.
    pub fn begin_file(&mut self, file_id: FileId) {
        self.current = file_id;
    }

    pub fn entries(&self) -> &[TagEntry] {
        &self.entries
    }

    /// Entries ordered by name, then path, then line.
    pub fn sorted(&self, files: &SourceFiles) -> Vec<TagEntry> {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| {
            a.tag
                .name
                .cmp(&b.tag.name)
                .then_with(|| files.path(a.file_id).cmp(files.path(b.file_id)))
                .then_with(|| a.tag.position.cmp(&b.tag.position))
        });
        entries
    }
}

impl TagSink for TagCollector {
    fn accept(&mut self, tag: Tag) {
        self.entries.push(TagEntry {
            file_id: self.current,
            tag,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanner::Scanner;

    #[test]
    fn entries_remember_their_file() {
        let scanner = Scanner::default();
        let mut files = SourceFiles::new();
        let mut collector = TagCollector::new();

        for (path, source) in [("b.ex", "def zeta\n"), ("a.ex", "def alpha\ndef zeta\n")] {
            let id = files.add(PathBuf::from(path), source.to_string());
            collector.begin_file(id);
            scanner.scan(&files.get(id).file, &mut collector);
        }

        let sorted: Vec<(String, PathBuf)> = collector
            .sorted(&files)
            .into_iter()
            .map(|entry| (entry.tag.name, files.path(entry.file_id).to_path_buf()))
            .collect();

        assert_eq!(collector.entries().len(), 3);
        assert_eq!(
            sorted,
            vec![
                ("alpha".to_string(), PathBuf::from("a.ex")),
                ("zeta".to_string(), PathBuf::from("a.ex")),
                ("zeta".to_string(), PathBuf::from("b.ex")),
            ]
        );
    }
}
