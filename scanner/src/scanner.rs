use crate::charset::IdentifierPolicy;
use crate::directive::{DIRECTIVE_LEAD, KeywordSet};
use crate::emitter::{Emitter, Identifier, TagSink};
use crate::scope::ModuleScope;
use crate::stream::Stream;
use crate::{Kind, KindTable, ParseOptionError, Tag};
use codespan::{File, Line, Position};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Whether function tags carry the enclosing module.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScopeMode {
    None,
    #[default]
    Module,
}

impl ScopeMode {
    pub fn name(self) -> &'static str {
        match self {
            ScopeMode::None => "none",
            ScopeMode::Module => "module",
        }
    }
}

impl Display for ScopeMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScopeMode {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(ScopeMode::None),
            "module" => Ok(ScopeMode::Module),
            _ => Err(ParseOptionError::new("scope mode", s)),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    pub keywords: KeywordSet,
    pub scope: ScopeMode,
    pub identifiers: IdentifierPolicy,
    pub kinds: KindTable,
}

/// Line-oriented tag scanner. Holds configuration only; every scan starts
/// with an empty module scope.
#[derive(Debug, Default, Clone)]
pub struct Scanner {
    options: ScanOptions,
}

impl Scanner {
    pub fn new(options: ScanOptions) -> Self {
        Scanner { options }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    pub fn scan<S: TagSink + ?Sized>(&self, file: &File, sink: &mut S) {
        tracing::debug!("Scanning {}", file.name);
        self.scan_lines(file.lines(), sink);
    }

    pub fn scan_lines<'a, I, S>(&self, lines: I, sink: &mut S)
    where
        I: IntoIterator<Item = Line<'a>>,
        S: TagSink + ?Sized,
    {
        let mut scope = ModuleScope::new();
        let mut emitter = Emitter::new(&self.options.kinds, sink);

        for line in lines {
            self.scan_line(line, &mut scope, &mut emitter);
        }
    }

    /// Convenience for callers holding plain text.
    pub fn scan_source(&self, source: &str) -> Vec<Tag> {
        let file = File::new("<source>", source.to_owned());
        let mut tags = Vec::new();
        self.scan(&file, &mut tags);
        tags
    }

    fn scan_line<S: TagSink + ?Sized>(
        &self,
        line: Line<'_>,
        scope: &mut ModuleScope,
        emitter: &mut Emitter<'_, S>,
    ) {
        let mut stream = Stream::new(line.text);
        stream.skip_whitespace();

        // `#` comments and `@` attributes/doc strings are never definitions.
        if stream.peek() != Some(DIRECTIVE_LEAD) {
            return;
        }

        let keyword = stream.identifier(self.options.identifiers);
        stream.skip_whitespace();
        let name = stream.identifier(self.options.identifiers);

        let Some(kind) = self.options.keywords.classify(keyword.lexeme) else {
            return;
        };

        let identifier = Identifier {
            text: name.lexeme,
            span: name.span.offset(line.span.start()),
            position: Position::new(line.index, name.span.start()),
        };

        match kind {
            Kind::Module => {
                emitter.emit(identifier, kind);
                if !name.is_empty() {
                    scope.on_module_directive(name.lexeme);
                }
            }
            Kind::Function if self.options.scope == ScopeMode::Module => {
                emitter.emit_scoped(identifier, kind, scope.current());
            }
            _ => {
                emitter.emit(identifier, kind);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScopeKind;
    use codespan::Span;

    fn summary(tags: &[Tag]) -> Vec<(Kind, &str, Option<&str>)> {
        tags.iter()
            .map(|tag| (tag.kind, tag.name.as_str(), tag.scope_name()))
            .collect()
    }

    fn unscoped() -> Scanner {
        Scanner::new(ScanOptions {
            scope: ScopeMode::None,
            ..ScanOptions::default()
        })
    }

    #[test]
    fn module_scopes_following_functions() {
        let tags = Scanner::default()
            .scan_source("defmodule Foo do\n  def bar(x) do\n    x + 1\n  end\nend\n");

        assert_eq!(
            summary(&tags),
            vec![
                (Kind::Module, "Foo", None),
                (Kind::Function, "bar", Some("Foo")),
            ]
        );
        assert_eq!(tags[1].scope.as_ref().unwrap().kind, ScopeKind::Module);
    }

    #[test]
    fn scope_mode_none_leaves_functions_unscoped() {
        let tags = unscoped().scan_source("defmodule Foo do\n  def bar(x) do\n    x + 1\n  end\nend\n");

        assert_eq!(
            summary(&tags),
            vec![(Kind::Module, "Foo", None), (Kind::Function, "bar", None)]
        );
    }

    #[test]
    fn indented_private_function() {
        let tags = Scanner::default().scan_source("  defp helper do\nend\n");

        assert_eq!(summary(&tags), vec![(Kind::Function, "helper", None)]);
    }

    #[test]
    fn comments_and_attributes_are_skipped() {
        let scanner = Scanner::default();

        assert!(scanner.scan_source("# def fake\n").is_empty());
        assert!(scanner.scan_source("   # defmodule Fake do\n").is_empty());
        assert!(scanner.scan_source("  @doc \"\"\"\n").is_empty());
        assert!(scanner.scan_source("@moduledoc def fake\n").is_empty());
    }

    #[test]
    fn protocols_depend_on_keyword_set() {
        let source = "defprotocol Enumerable do\nend\ndefimpl Enumerable do\nend\n";
        let extended = Scanner::default().scan_source(source);
        let baseline = Scanner::new(ScanOptions {
            keywords: KeywordSet::Baseline,
            ..ScanOptions::default()
        })
        .scan_source(source);

        assert_eq!(
            summary(&extended),
            vec![
                (Kind::Protocol, "Enumerable", None),
                (Kind::Implementation, "Enumerable", None),
            ]
        );
        assert!(baseline.is_empty());
    }

    #[test]
    fn later_module_replaces_scope() {
        let source = "\
defmodule Outer do
  defmodule Inner do
    def a, do: 1
  end
  def b, do: 2
end
";
        let tags = Scanner::default().scan_source(source);

        assert_eq!(
            summary(&tags),
            vec![
                (Kind::Module, "Outer", None),
                (Kind::Module, "Inner", None),
                (Kind::Function, "a", Some("Inner")),
                (Kind::Function, "b", Some("Inner")),
            ]
        );
    }

    #[test]
    fn only_functions_are_scoped() {
        let source = "defmodule M do\n  defmacro m\n  defrecord R\n  defp f\nend\n";
        let tags = Scanner::default().scan_source(source);

        assert_eq!(
            summary(&tags),
            vec![
                (Kind::Module, "M", None),
                (Kind::Macro, "m", None),
                (Kind::Record, "R", None),
                (Kind::Function, "f", Some("M")),
            ]
        );
    }

    #[test]
    fn non_directive_lines_emit_nothing() {
        let source = "import Foo\nalias Bar\ndo_something()\nx = def\nend\n  \n\n";

        assert!(Scanner::default().scan_source(source).is_empty());
    }

    #[test]
    fn directive_without_name_emits_nothing() {
        let tags = Scanner::default().scan_source("def (x)\ndefmodule\ndef\n");

        assert!(tags.is_empty());
    }

    #[test]
    fn nameless_module_keeps_previous_scope() {
        let tags = Scanner::default().scan_source("defmodule A do\ndefmodule do\ndef f\n");

        assert_eq!(
            summary(&tags),
            vec![(Kind::Module, "A", None), (Kind::Function, "f", Some("A"))]
        );
    }

    #[test]
    fn prefix_keywords_do_not_match() {
        let tags = Scanner::default().scan_source("defmodules X\ndefine y\ndefdelegate z(x), to: Y\n");

        assert!(tags.is_empty());
    }

    #[test]
    fn identifier_policy_changes_names() {
        let source = "defmodule Foo.Bar do\n  def empty?(list)\nend\n";
        let predicate = Scanner::default().scan_source(source);
        let dotted = Scanner::new(ScanOptions {
            identifiers: IdentifierPolicy::Dotted,
            ..ScanOptions::default()
        })
        .scan_source(source);

        assert_eq!(
            summary(&predicate),
            vec![
                (Kind::Module, "Foo", None),
                (Kind::Function, "empty?", Some("Foo")),
            ]
        );
        assert_eq!(
            summary(&dotted),
            vec![
                (Kind::Module, "Foo.Bar", None),
                (Kind::Function, "empty", Some("Foo.Bar")),
            ]
        );
    }

    #[test]
    fn disabled_module_kind_still_tracks_scope() {
        let scanner = Scanner::new(ScanOptions {
            kinds: KindTable::from_spec("-m").unwrap(),
            ..ScanOptions::default()
        });
        let tags = scanner.scan_source("defmodule A do\n  def f\nend\n");

        assert_eq!(summary(&tags), vec![(Kind::Function, "f", Some("A"))]);
    }

    #[test]
    fn tags_are_located_in_the_file() {
        let source = "defmodule Foo do\r\n  def bar(x) do\r\nend\r\n";
        let tags = Scanner::default().scan_source(source);

        assert_eq!(tags[0].span, Span::new(10, 13));
        assert_eq!(tags[0].position, Position::new(0, 10));
        assert_eq!(tags[1].position, Position::new(1, 6));
        assert_eq!(&source[tags[1].span.start..tags[1].span.end], "bar");
    }

    #[test]
    fn repeated_scans_are_identical() {
        let source = "defmodule A do\n  def a\n  defmacro b\nend\ndefmodule B do\n  defp c\nend\n";
        let scanner = Scanner::default();

        assert_eq!(scanner.scan_source(source), scanner.scan_source(source));
    }

    #[test]
    fn each_scan_starts_without_scope() {
        let scanner = Scanner::default();
        let _ = scanner.scan_source("defmodule A do\nend\n");
        let tags = scanner.scan_source("def f\n");

        assert_eq!(summary(&tags), vec![(Kind::Function, "f", None)]);
    }
}
