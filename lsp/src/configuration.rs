use codespan::{File, Range};
use extags::{ConfigError, Configuration};
use std::path::Path;
use tower_lsp_server::lsp_types::{Diagnostic, DiagnosticSeverity};

fn error_range(source: &str, err: &ConfigError) -> Range {
    let file = File::new("", source.to_string());

    err.span()
        .and_then(|span| file.byte_span_to_range(span).ok())
        .unwrap_or_default()
}

/// Reads `extags.toml`, turning any problem into a diagnostic on that file.
pub fn load_configuration(path: &Path) -> Result<Configuration, Diagnostic> {
    let source = std::fs::read_to_string(path).map_err(|source| {
        let err = ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        diagnostic(error_range("", &err), &err)
    })?;

    Configuration::parse(path, &source).map_err(|err| diagnostic(error_range(&source, &err), &err))
}

fn diagnostic(range: Range, err: &ConfigError) -> Diagnostic {
    Diagnostic {
        range: range.into(),
        severity: Some(DiagnosticSeverity::ERROR),
        source: Some("extags".to_string()),
        message: err.to_string(),
        ..Diagnostic::default()
    }
}
