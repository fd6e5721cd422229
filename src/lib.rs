//! Tag generation for Elixir projects: configuration, file discovery, tag
//! collection and tag file output around the [`scanner`] crate.

pub mod collector;
pub mod configuration;
pub mod index;
pub mod logging;
pub mod output;
pub mod walk;

pub use collector::{SourceFile, SourceFiles, TagCollector, TagEntry};
pub use configuration::{CONFIG_FILE_NAME, ConfigError, Configuration};
pub use index::{Index, index_files};
pub use output::OutputFormat;
