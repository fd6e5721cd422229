use scanner::Language;
use std::path::PathBuf;

/// Files under `paths` that `language` handles, in a stable order.
///
/// A path naming a file is always kept, whatever its extension, so callers
/// can force a file through the scanner.
pub fn collect_sources(paths: &[PathBuf], language: &Language) -> Vec<PathBuf> {
    let mut sources = vec![];

    for path in paths {
        if path.is_file() {
            sources.push(path.clone());
            continue;
        }

        for entry in walkdir::WalkDir::new(path).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!("Skipping unreadable entry: {}", err);
                    continue;
                }
            };

            if entry.file_type().is_file() && language.handles(entry.path()) {
                sources.push(entry.into_path());
            }
        }
    }

    sources
}
