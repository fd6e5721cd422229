//! Line-oriented tag extraction for Elixir sources.
//!
//! Each line is looked at once: leading whitespace is skipped, comment and
//! attribute lines are dropped, and a leading `def*` keyword followed by a
//! name produces a [`Tag`]. The only state carried between lines is the most
//! recent `defmodule` name.

pub mod charset;
pub mod data;
pub mod directive;
pub mod emitter;
pub mod error;
pub mod language;
pub mod scanner;
pub mod scope;
pub mod stream;

pub use charset::IdentifierPolicy;
pub use data::*;
pub use directive::KeywordSet;
pub use emitter::{Emitter, Identifier, TagSink};
pub use error::ParseOptionError;
pub use language::{ELIXIR, Language};
pub use scanner::{ScanOptions, Scanner, ScopeMode};
