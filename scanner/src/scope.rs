/// The single enclosing-module slot of a file scan.
///
/// A new `defmodule` overwrites the slot. Nothing restores an outer module
/// when an inner one ends, since lines carry no block structure here.
#[derive(Debug, Default)]
pub struct ModuleScope {
    current: Option<String>,
}

impl ModuleScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_module_directive(&mut self, name: &str) {
        self.current = Some(name.to_owned());
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        assert_eq!(ModuleScope::new().current(), None);
    }

    #[test]
    fn later_module_overwrites_earlier() {
        let mut scope = ModuleScope::new();
        scope.on_module_directive("Outer");
        scope.on_module_directive("Inner");

        assert_eq!(scope.current(), Some("Inner"));
    }
}
