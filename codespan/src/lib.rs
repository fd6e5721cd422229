mod file;
mod file_id;
mod position;
mod range;
mod span;

#[cfg(feature = "lsp")]
mod lsp;

pub use file::*;
pub use file_id::*;
pub use position::*;
pub use range::*;
pub use span::*;
