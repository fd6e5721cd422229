use crate::output::OutputFormat;
use codespan::Span;
use scanner::{IdentifierPolicy, KeywordSet, KindSpecError, KindTable, ScanOptions, ScopeMode};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

pub const CONFIG_FILE_NAME: &str = "extags.toml";

#[derive(serde::Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScannerSection {
    pub keywords: Option<KeywordSet>,
    pub scope: Option<ScopeMode>,
    pub identifiers: Option<IdentifierPolicy>,
    pub kinds: Option<String>,
}

#[derive(serde::Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    pub format: Option<OutputFormat>,
    pub sort: Option<bool>,
}

#[derive(serde::Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LogSection {
    pub level: Option<String>,
}

#[derive(serde::Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Configuration {
    pub scanner: ScannerSection,
    pub output: OutputSection,
    pub log: LogSection,
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    Kinds(KindSpecError),
    LogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Failed to read {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "Failed to parse {}: {}", path.display(), source.message())
            }
            ConfigError::Kinds(err) => write!(f, "Invalid kinds: {err}"),
            ConfigError::LogLevel(level) => write!(f, "Invalid log level: {level:?}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Kinds(err) => Some(err),
            ConfigError::LogLevel(_) => None,
        }
    }
}

impl From<KindSpecError> for ConfigError {
    fn from(err: KindSpecError) -> Self {
        ConfigError::Kinds(err)
    }
}

impl ConfigError {
    /// Where in the configuration file the problem is, when known.
    pub fn span(&self) -> Option<Span> {
        match self {
            ConfigError::Parse { source, .. } => source
                .span()
                .map(|range| Span::new(range.start, range.end)),
            _ => None,
        }
    }
}

impl Configuration {
    pub fn parse(path: &Path, source: &str) -> Result<Self, ConfigError> {
        let configuration: Configuration =
            toml::from_str(source).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        // Surface bad values at load time rather than at first scan.
        configuration.scan_options()?;
        configuration.log_level()?;

        Ok(configuration)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(path, &source)
    }

    /// Loads `extags.toml` from `dir`, or the defaults when there is none.
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            tracing::debug!("Loading configuration from {}", path.display());
            Self::load(&path)
        } else {
            Ok(Configuration::default())
        }
    }

    pub fn scan_options(&self) -> Result<ScanOptions, ConfigError> {
        let section = &self.scanner;
        let defaults = ScanOptions::default();

        let mut kinds = KindTable::default();
        if let Some(spec) = &section.kinds {
            kinds.apply_spec(spec)?;
        }

        Ok(ScanOptions {
            keywords: section.keywords.unwrap_or(defaults.keywords),
            scope: section.scope.unwrap_or(defaults.scope),
            identifiers: section.identifiers.unwrap_or(defaults.identifiers),
            kinds,
        })
    }

    pub fn log_level(&self) -> Result<Option<LevelFilter>, ConfigError> {
        self.log
            .level
            .as_deref()
            .map(|level| {
                level
                    .parse::<LevelFilter>()
                    .map_err(|_| ConfigError::LogLevel(level.to_owned()))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanner::Kind;

    fn parse(source: &str) -> Result<Configuration, ConfigError> {
        Configuration::parse(Path::new(CONFIG_FILE_NAME), source)
    }

    #[test]
    fn empty_file_gives_defaults() {
        let configuration = parse("").unwrap();

        assert_eq!(configuration, Configuration::default());
        assert_eq!(configuration.scan_options().unwrap(), ScanOptions::default());
    }

    #[test]
    fn reads_every_section() {
        let configuration = parse(
            r#"
[scanner]
keywords = "baseline"
scope = "none"
identifiers = "dotted"
kinds = "-r"

[output]
format = "json"
sort = false

[log]
level = "debug"
"#,
        )
        .unwrap();

        let options = configuration.scan_options().unwrap();
        assert_eq!(options.keywords, KeywordSet::Baseline);
        assert_eq!(options.scope, ScopeMode::None);
        assert_eq!(options.identifiers, IdentifierPolicy::Dotted);
        assert!(!options.kinds.is_enabled(Kind::Record));
        assert!(options.kinds.is_enabled(Kind::Function));
        assert_eq!(configuration.output.format, Some(OutputFormat::Json));
        assert_eq!(configuration.output.sort, Some(false));
        assert_eq!(configuration.log_level().unwrap(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn unknown_variant_is_a_parse_error_with_span() {
        let err = parse("[scanner]\nkeywords = \"everything\"\n").unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.span().is_some());
    }

    #[test]
    fn bad_kind_spec_is_reported() {
        let err = parse("[scanner]\nkinds = \"fq\"\n").unwrap_err();

        assert!(matches!(err, ConfigError::Kinds(KindSpecError::UnknownKind('q'))));
    }

    #[test]
    fn bad_log_level_is_reported() {
        let err = parse("[log]\nlevel = \"loud\"\n").unwrap_err();

        assert!(matches!(err, ConfigError::LogLevel(_)));
    }

    #[test]
    fn discover_without_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(
            Configuration::discover(dir.path()).unwrap(),
            Configuration::default()
        );
    }

    #[test]
    fn discover_reads_file_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[scanner]\nscope = \"none\"\n").unwrap();

        let configuration = Configuration::discover(dir.path()).unwrap();

        assert_eq!(configuration.scanner.scope, Some(ScopeMode::None));
    }
}
