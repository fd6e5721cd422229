use crate::collector::{SourceFiles, TagCollector};
use scanner::Scanner;
use std::path::PathBuf;

pub struct Index {
    pub files: SourceFiles,
    pub tags: TagCollector,
}

/// Reads and scans each file. Unreadable files are logged and left out;
/// invalid UTF-8 is replaced rather than rejected.
pub fn index_files(scanner: &Scanner, paths: Vec<PathBuf>) -> Index {
    let mut files = SourceFiles::new();
    let mut tags = TagCollector::new();

    for path in paths {
        let source = match std::fs::read(&path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) => {
                tracing::warn!("Skipping {}: {}", path.display(), err);
                continue;
            }
        };

        let id = files.add(path, source);
        tags.begin_file(id);
        scanner.scan(&files.get(id).file, &mut tags);
    }

    tracing::debug!(
        "Indexed {} files, {} tags",
        files.len(),
        tags.entries().len()
    );

    Index { files, tags }
}
