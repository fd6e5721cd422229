use crate::{KIND_DEFINITIONS, KindDefinition};
use std::ffi::OsStr;
use std::path::Path;

/// What the host needs to route files to this scanner.
pub struct Language {
    pub name: &'static str,
    pub kinds: &'static [KindDefinition],
    pub extensions: &'static [&'static str],
}

pub static ELIXIR: Language = Language {
    name: "Elixir",
    kinds: &KIND_DEFINITIONS,
    extensions: &["ex", "exs"],
};

impl Language {
    pub fn handles(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|extension| self.extensions.contains(&extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_by_extension() {
        assert!(ELIXIR.handles(Path::new("lib/app.ex")));
        assert!(ELIXIR.handles(Path::new("test/app_test.exs")));
        assert!(!ELIXIR.handles(Path::new("mix.lock")));
        assert!(!ELIXIR.handles(Path::new("README")));
        assert!(!ELIXIR.handles(Path::new("app.EX")));
    }

    #[test]
    fn exposes_the_full_kind_table() {
        assert_eq!(ELIXIR.kinds.len(), 6);
    }
}
