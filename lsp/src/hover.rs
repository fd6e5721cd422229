use crate::definition::Definition;
use crate::files::Files;

/// Markdown for the first definition: the directive line as written, then
/// its kind and module-qualified name.
pub fn hover_markdown(files: &Files, definitions: &[Definition]) -> Option<String> {
    let definition = definitions.first()?;
    let file = files.get(definition.file_id);
    let tag = &definition.tag;

    let mut value = format!(
        "```elixir\n{}\n```\n*{}* `{}`",
        file.definition_source(tag),
        tag.kind.name(),
        tag.qualified_name()
    );
    if definitions.len() > 1 {
        value.push_str(&format!(" ({} definitions)", definitions.len()));
    }

    Some(value)
}
