use std::path::{Path, PathBuf};
use std::str::FromStr;
use tower_lsp_server::lsp_types::Uri;

pub fn path_to_uri(path: &Path) -> Option<Uri> {
    let url = url::Url::from_file_path(path).ok()?;
    Uri::from_str(url.as_str()).ok()
}

pub fn uri_to_path(uri: &Uri) -> Option<PathBuf> {
    url::Url::parse(uri.as_str()).ok()?.to_file_path().ok()
}

/// Last segment of the URI's path.
pub fn file_name(uri: &Uri) -> Option<&str> {
    uri.path()
        .as_str()
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_paths_round_trip() {
        let path = std::env::temp_dir().join("lib").join("my app.ex");
        let uri = path_to_uri(&path).unwrap();

        assert!(uri.as_str().starts_with("file://"));
        assert_eq!(uri_to_path(&uri), Some(path));
    }

    #[test]
    fn relative_paths_have_no_uri() {
        assert!(path_to_uri(Path::new("lib/app.ex")).is_none());
    }

    #[test]
    fn file_name_is_the_whole_last_segment() {
        let config = Uri::from_str("file:///project/extags.toml").unwrap();
        let lookalike = Uri::from_str("file:///project/myextags.toml").unwrap();
        let folder = Uri::from_str("file:///project/").unwrap();

        assert_eq!(file_name(&config), Some("extags.toml"));
        assert_eq!(file_name(&lookalike), Some("myextags.toml"));
        assert_eq!(file_name(&folder), None);
    }
}
