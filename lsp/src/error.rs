use codespan::FileError;
use tower_lsp_server::jsonrpc::Error;

/// A position the client sent does not exist in our copy of the document.
pub fn file_error_to_lsp(file_error: FileError) -> Error {
    tracing::debug!("Rejecting request: {file_error}");
    Error::invalid_params(file_error.to_string())
}
