use crate::files::Files;
use crate::uri::uri_to_path;
use codespan::FileId;
use scanner::{IdentifierPolicy, Scanner};
use std::path::PathBuf;
use tower_lsp_server::lsp_types::{ClientCapabilities, PositionEncodingKind, Uri};

#[derive(Default)]
pub struct State {
    pub files: Files,
    pub workspace_folder: Option<Uri>,
    pub client_capabilities: ClientCapabilities,
    pub scanner: Scanner,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&mut self, id: FileId) {
        self.files.index(id, &self.scanner);
    }

    /// Swaps the scan options and re-indexes everything already known.
    pub fn set_scanner(&mut self, scanner: Scanner) {
        tracing::info!("Scanning with {:?}", scanner.options());
        self.scanner = scanner;
        self.files.index_all(&self.scanner);
    }

    pub fn identifiers(&self) -> IdentifierPolicy {
        self.scanner.options().identifiers
    }

    pub fn supports_progress(&self) -> bool {
        self.client_capabilities
            .window
            .as_ref()
            .and_then(|window| window.work_done_progress)
            .unwrap_or(false)
    }

    /// Columns are byte offsets, which only match the client's when it
    /// accepts UTF-8.
    pub fn position_encoding(&self) -> Option<PositionEncodingKind> {
        self.client_capabilities
            .general
            .as_ref()?
            .position_encodings
            .as_ref()?
            .contains(&PositionEncodingKind::UTF8)
            .then_some(PositionEncodingKind::UTF8)
    }

    pub fn workspace_path(&self) -> Option<PathBuf> {
        uri_to_path(self.workspace_folder.as_ref()?)
    }
}
