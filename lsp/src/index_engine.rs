use crate::state::State;
use crate::uri::{path_to_uri, uri_to_path};
use extags::walk::collect_sources;
use scanner::ELIXIR;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_lsp_server::Client;
use tower_lsp_server::lsp_types::request::WorkDoneProgressCreate;
use tower_lsp_server::lsp_types::{ProgressToken, Uri, WorkDoneProgressCreateParams};
use uuid::Uuid;

pub struct IndexEngine {
    pub state: Arc<Mutex<State>>,
}

impl IndexEngine {
    pub fn new(state: Arc<Mutex<State>>) -> Self {
        IndexEngine { state }
    }

    /// Indexes every Elixir source under `root_uri`. Documents the editor
    /// already opened keep their in-memory text.
    pub async fn crawl_fs(self: Arc<Self>, root_uri: Uri, client: Client) {
        let Some(directory) = uri_to_path(&root_uri) else {
            tracing::warn!("Not indexing {}: not a local folder", root_uri.as_str());
            return;
        };

        let token = ProgressToken::String(Uuid::new_v4().to_string());
        let supports_progress = self.state.lock().await.supports_progress();
        if supports_progress
            && let Err(err) = client
                .send_request::<WorkDoneProgressCreate>(WorkDoneProgressCreateParams {
                    token: token.clone(),
                })
                .await
        {
            tracing::debug!("Client declined progress: {err}");
        }

        let progress = client
            .progress(token, "Indexing")
            .with_percentage(0)
            .with_message("Looking for sources...")
            .begin()
            .await;

        let sources = tokio::task::spawn_blocking(move || collect_sources(&[directory], &ELIXIR))
            .await
            .unwrap_or_default();
        let total = sources.len();

        for (index, path) in sources.iter().enumerate() {
            progress
                .report_with_message(format!("{index}/{total}"), (index * 100 / total) as u32)
                .await;

            let Some(uri) = path_to_uri(path) else {
                continue;
            };
            let contents = match tokio::fs::read(path).await {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(err) => {
                    tracing::warn!("Skipping {}: {err}", path.display());
                    continue;
                }
            };

            let mut state = self.state.lock().await;
            let id = state.files.get_or_insert(uri, contents);
            state.index(id);
        }

        progress.finish().await;
        tracing::info!("Indexed {total} files");
    }
}
