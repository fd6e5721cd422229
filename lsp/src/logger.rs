use std::io;

use tower_lsp_server::Client;
use tower_lsp_server::lsp_types::MessageType;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;

/// Forwards each formatted event to the client's log.
pub struct LspLogger {
    client: Client,
}

impl io::Write for LspLogger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let client = self.client.clone();
        let message = String::from_utf8_lossy(buf).trim_end().to_string();
        tokio::spawn(async move {
            client.log_message(MessageType::LOG, message).await;
        });
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub struct LogWriter {
    client: Client,
}

impl LogWriter {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl<'a> MakeWriter<'a> for LogWriter {
    type Writer = LspLogger;

    fn make_writer(&'a self) -> Self::Writer {
        LspLogger {
            client: self.client.clone(),
        }
    }
}

pub fn init(client: Client, level: LevelFilter) {
    let layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .with_writer(LogWriter::new(client))
        .with_filter(level);

    if tracing::subscriber::set_global_default(tracing_subscriber::registry().with(layer)).is_err()
    {
        eprintln!("extags-lsp: a global logger is already installed");
    }
}
