mod kind;
mod tag;

pub use kind::*;
pub use tag::*;
