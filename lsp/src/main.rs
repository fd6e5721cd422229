mod configuration;
mod definition;
mod document_symbols;
mod error;
mod files;
mod hover;
mod index_engine;
mod indexed_file;
mod logger;
mod server;
mod state;
mod uri;

use server::TagServer;
use tower_lsp_server::{LspService, Server};
use tracing::level_filters::LevelFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(|client| {
        logger::init(client.clone(), LevelFilter::INFO);
        TagServer::new(client)
    });
    Server::new(stdin, stdout, socket).serve(service).await;

    Ok(())
}
