use crate::collector::{SourceFiles, TagEntry};
use scanner::{KindTable, Language};
use std::io::{self, Write};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Extended ctags format, readable by vi and most editors.
    #[default]
    Ctags,
    /// One JSON object per line.
    Json,
    /// Human readable cross reference.
    Xref,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonTag<'a> {
    #[serde(rename = "_type")]
    kind_of_record: &'static str,
    name: &'a str,
    path: String,
    pattern: String,
    line: usize,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope_kind: Option<&'static str>,
}

pub fn escape_pattern(line: &str) -> String {
    let mut escaped = String::with_capacity(line.len());
    for c in line.chars() {
        if matches!(c, '\\' | '/') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub fn write_tags<W: Write>(
    out: &mut W,
    format: OutputFormat,
    files: &SourceFiles,
    entries: &[TagEntry],
    sorted: bool,
) -> io::Result<()> {
    match format {
        OutputFormat::Ctags => write_ctags(out, files, entries, sorted),
        OutputFormat::Json => write_json(out, files, entries),
        OutputFormat::Xref => write_xref(out, files, entries),
    }
}

fn write_ctags<W: Write>(
    out: &mut W,
    files: &SourceFiles,
    entries: &[TagEntry],
    sorted: bool,
) -> io::Result<()> {
    writeln!(
        out,
        "!_TAG_FILE_FORMAT\t2\t/extended format; --format=1 will not append ;\" to lines/"
    )?;
    writeln!(
        out,
        "!_TAG_FILE_SORTED\t{}\t/0=unsorted, 1=sorted, 2=foldcase/",
        u8::from(sorted)
    )?;
    writeln!(out, "!_TAG_PROGRAM_NAME\textags\t//")?;
    writeln!(out, "!_TAG_PROGRAM_VERSION\t{}\t//", env!("CARGO_PKG_VERSION"))?;

    for entry in entries {
        let source = files.get(entry.file_id);
        let tag = &entry.tag;
        write!(
            out,
            "{}\t{}\t/^{}$/;\"\t{}",
            tag.name,
            source.path.display(),
            escape_pattern(source.line_text(tag.position.line)),
            tag.kind.letter()
        )?;
        if let Some(scope) = &tag.scope {
            write!(out, "\t{}:{}", scope.kind.name(), scope.name)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

fn write_json<W: Write>(out: &mut W, files: &SourceFiles, entries: &[TagEntry]) -> io::Result<()> {
    for entry in entries {
        let source = files.get(entry.file_id);
        let tag = &entry.tag;
        let record = JsonTag {
            kind_of_record: "tag",
            name: &tag.name,
            path: source.path.display().to_string(),
            pattern: format!("/^{}$/", escape_pattern(source.line_text(tag.position.line))),
            line: tag.position.line + 1,
            kind: tag.kind.name(),
            scope: tag.scope_name(),
            scope_kind: tag.scope.as_ref().map(|scope| scope.kind.name()),
        };

        serde_json::to_writer(&mut *out, &record)?;
        writeln!(out)?;
    }

    Ok(())
}

fn write_xref<W: Write>(out: &mut W, files: &SourceFiles, entries: &[TagEntry]) -> io::Result<()> {
    for entry in entries {
        let source = files.get(entry.file_id);
        let tag = &entry.tag;
        writeln!(
            out,
            "{:<16} {:<10} {:>4} {:<16} {}",
            tag.name,
            tag.kind.name(),
            tag.position.line + 1,
            source.path.display(),
            source.line_text(tag.position.line).trim_end()
        )?;
    }

    Ok(())
}

pub fn write_kind_list<W: Write>(out: &mut W, language: &Language, kinds: &KindTable) -> io::Result<()> {
    for definition in language.kinds {
        let state = if kinds.is_enabled(definition.kind) {
            ""
        } else {
            " [off]"
        };
        writeln!(
            out,
            "{}  {:<10} {}{}",
            definition.letter, definition.name, definition.description, state
        )?;
    }
    Ok(())
}

pub fn write_language_map<W: Write>(out: &mut W, language: &Language) -> io::Result<()> {
    let patterns = language
        .extensions
        .iter()
        .map(|extension| format!("*.{extension}"))
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(out, "{:<16} {}", language.name, patterns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::TagCollector;
    use scanner::{ELIXIR, Kind, Scanner};
    use std::path::PathBuf;

    fn render(format: OutputFormat, source: &str) -> String {
        let mut files = SourceFiles::new();
        let mut collector = TagCollector::new();
        let id = files.add(PathBuf::from("lib/foo.ex"), source.to_string());
        collector.begin_file(id);
        Scanner::default().scan(&files.get(id).file, &mut collector);

        let mut out = Vec::new();
        write_tags(&mut out, format, &files, &collector.sorted(&files), true).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn patterns_escape_slashes_and_backslashes() {
        assert_eq!(escape_pattern(r"def a/b \ c"), r"def a\/b \\ c");
    }

    #[test]
    fn ctags_lines_carry_kind_and_scope() {
        let output = render(OutputFormat::Ctags, "defmodule Foo do\n  def bar(x), do: x\nend\n");
        let lines: Vec<&str> = output.lines().filter(|line| !line.starts_with("!_")).collect();

        assert_eq!(
            lines,
            vec![
                "Foo\tlib/foo.ex\t/^defmodule Foo do$/;\"\tm",
                "bar\tlib/foo.ex\t/^  def bar(x), do: x$/;\"\tf\tmodule:Foo",
            ]
        );
        assert!(output.starts_with("!_TAG_FILE_FORMAT\t2\t"));
        assert!(output.contains("!_TAG_FILE_SORTED\t1\t"));
    }

    #[test]
    fn json_records_parse_back() {
        let output = render(OutputFormat::Json, "defmodule Foo do\n  def bar\nend\n");
        let records: Vec<serde_json::Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["_type"], "tag");
        assert_eq!(records[1]["name"], "bar");
        assert_eq!(records[1]["kind"], "function");
        assert_eq!(records[1]["line"], 2);
        assert_eq!(records[1]["scope"], "Foo");
        assert_eq!(records[1]["scopeKind"], "module");
        assert!(records[0].get("scope").is_none());
    }

    #[test]
    fn xref_shows_line_numbers() {
        let output = render(OutputFormat::Xref, "\n\ndefmacro twice(x)\n");

        assert_eq!(
            output,
            "twice            macro         3 lib/foo.ex       defmacro twice(x)\n"
        );
    }

    #[test]
    fn kind_list_marks_disabled_kinds() {
        let kinds = KindTable::from_spec("-r").unwrap();
        let mut out = Vec::new();
        write_kind_list(&mut out, &ELIXIR, &kinds).unwrap();
        let listing = String::from_utf8(out).unwrap();

        assert!(listing.contains("f  function   functions\n"));
        assert!(listing.contains("r  record     record definitions [off]\n"));
        assert_eq!(listing.lines().count(), Kind::COUNT);
    }

    #[test]
    fn language_map_lists_extensions() {
        let mut out = Vec::new();
        write_language_map(&mut out, &ELIXIR).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Elixir           *.ex *.exs\n");
    }
}
