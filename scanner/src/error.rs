use std::fmt::{Display, Formatter};

/// An option value that names no known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptionError {
    pub option: &'static str,
    pub given: String,
}

impl ParseOptionError {
    pub fn new(option: &'static str, given: &str) -> Self {
        ParseOptionError {
            option,
            given: given.to_owned(),
        }
    }
}

impl Display for ParseOptionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown {}: {:?}", self.option, self.given)
    }
}

impl std::error::Error for ParseOptionError {}
