use crate::configuration::load_configuration;
use crate::definition::{Definition, find_definitions};
use crate::document_symbols::document_symbols;
use crate::error::file_error_to_lsp;
use crate::hover::hover_markdown;
use crate::index_engine::IndexEngine;
use crate::state::State;
use crate::uri::{file_name, path_to_uri, uri_to_path};
use extags::CONFIG_FILE_NAME;
use scanner::Scanner;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_lsp_server::lsp_types::{
    DidChangeTextDocumentParams, DidChangeWatchedFilesParams, DidOpenTextDocumentParams,
    DocumentSymbolParams, DocumentSymbolResponse, FileChangeType, GotoDefinitionParams,
    GotoDefinitionResponse, Hover, HoverContents, HoverParams, HoverProviderCapability,
    InitializeParams, InitializeResult, InitializedParams, LocationLink, MarkupContent, MarkupKind,
    OneOf, Range, Registration, ServerCapabilities, ServerInfo, TextDocumentPositionParams,
    TextDocumentSyncCapability, TextDocumentSyncKind,
};
use tower_lsp_server::{Client, LanguageServer, jsonrpc::Result};

pub struct TagServer {
    client: Client,
    state: Arc<Mutex<State>>,
    index_engine: Arc<IndexEngine>,
}

impl TagServer {
    pub fn new(client: Client) -> Self {
        let state = Arc::new(Mutex::new(State::new()));
        TagServer {
            client,
            state: state.clone(),
            index_engine: Arc::new(IndexEngine::new(state)),
        }
    }

    async fn load_config(&self, path: &Path) {
        let Some(uri) = path_to_uri(path) else {
            return;
        };

        match load_configuration(path).map(|configuration| configuration.scan_options()) {
            Ok(Ok(options)) => {
                self.state.lock().await.set_scanner(Scanner::new(options));
                self.client.publish_diagnostics(uri, vec![], None).await;
            }
            Ok(Err(err)) => tracing::error!("{err}"),
            Err(diagnostic) => {
                tracing::warn!("{}: {}", path.display(), diagnostic.message);
                self.client
                    .publish_diagnostics(uri, vec![diagnostic], None)
                    .await;
            }
        }
    }

    /// Definitions under the cursor and the range of the word they matched.
    async fn definitions_at(
        &self,
        params: &TextDocumentPositionParams,
    ) -> Result<Option<(Vec<Definition>, Range)>> {
        let state = self.state.lock().await;
        let Some(&id) = state.files.sources.get(&params.text_document.uri) else {
            return Ok(None);
        };

        let found = find_definitions(
            &state.files,
            id,
            params.position.into(),
            state.identifiers(),
        )
        .map_err(file_error_to_lsp)?;
        let Some((definitions, span)) = found else {
            return Ok(None);
        };

        let origin = state
            .files
            .get(id)
            .file
            .byte_span_to_range(span)
            .map_err(file_error_to_lsp)?;
        Ok(Some((definitions, origin.into())))
    }
}

impl LanguageServer for TagServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let mut state = self.state.lock().await;
        if let Some(folder) = params.workspace_folders.as_ref().and_then(|f| f.first()) {
            state.workspace_folder = Some(folder.uri.clone());
        }
        state.client_capabilities = params.capabilities;
        let position_encoding = state.position_encoding();
        if position_encoding.is_none() {
            tracing::warn!("Client does not accept UTF-8 columns; non-ASCII lines may be off");
        }

        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "extags-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            capabilities: ServerCapabilities {
                position_encoding,
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::INCREMENTAL,
                )),
                definition_provider: Some(OneOf::Left(true)),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                document_symbol_provider: Some(OneOf::Left(true)),
                ..ServerCapabilities::default()
            },
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        let registration = Registration {
            id: "config-watcher".to_string(),
            method: "workspace/didChangeWatchedFiles".to_string(),
            register_options: Some(serde_json::json!({
                "watchers": [
                    {
                        "globPattern": format!("**/{CONFIG_FILE_NAME}"),
                        "kind": 7, // create, change, delete
                    }
                ]
            })),
        };

        if let Err(err) = self.client.register_capability(vec![registration]).await {
            tracing::warn!("Could not watch {CONFIG_FILE_NAME}: {err}");
        }

        let (folder, directory) = {
            let state = self.state.lock().await;
            (state.workspace_folder.clone(), state.workspace_path())
        };

        if let Some(config_path) = directory.map(|dir| dir.join(CONFIG_FILE_NAME))
            && config_path.is_file()
        {
            self.load_config(&config_path).await;
        }

        if let Some(workspace_folder) = folder {
            tokio::spawn(
                self.index_engine
                    .clone()
                    .crawl_fs(workspace_folder, self.client.clone()),
            );
        }
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let mut state = self.state.lock().await;
        let id = state
            .files
            .open(params.text_document.uri, params.text_document.text);
        state.index(id);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let mut state = self.state.lock().await;
        if let Some(id) = state
            .files
            .apply_changes(&params.text_document.uri, params.content_changes)
        {
            state.index(id);
        }
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let Some((definitions, origin)) = self
            .definitions_at(&params.text_document_position_params)
            .await?
        else {
            return Ok(None);
        };

        let state = self.state.lock().await;
        let links = definitions
            .iter()
            .filter_map(|definition| {
                let target = state.files.get(definition.file_id);
                let range = target.file.byte_span_to_range(definition.tag.span).ok()?;

                Some(LocationLink {
                    origin_selection_range: Some(origin),
                    target_uri: target.uri.clone(),
                    target_range: range.into(),
                    target_selection_range: range.into(),
                })
            })
            .collect();

        Ok(Some(GotoDefinitionResponse::Link(links)))
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let Some((definitions, origin)) = self
            .definitions_at(&params.text_document_position_params)
            .await?
        else {
            return Ok(None);
        };

        let state = self.state.lock().await;
        Ok(hover_markdown(&state.files, &definitions).map(|value| Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value,
            }),
            range: Some(origin),
        }))
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        let state = self.state.lock().await;

        Ok(state
            .files
            .sources
            .get(&params.text_document.uri)
            .map(|id| DocumentSymbolResponse::Nested(document_symbols(state.files.get(*id)))))
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        let changes = params
            .changes
            .into_iter()
            .filter(|change| file_name(&change.uri) == Some(CONFIG_FILE_NAME));

        for change in changes {
            if change.typ == FileChangeType::DELETED {
                tracing::info!("{CONFIG_FILE_NAME} removed, using defaults");
                self.state.lock().await.set_scanner(Scanner::default());
                self.client.publish_diagnostics(change.uri, vec![], None).await;
            } else if let Some(path) = uri_to_path(&change.uri) {
                self.load_config(&path).await;
            }
        }
    }
}
