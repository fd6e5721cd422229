use crate::indexed_file::IndexedFile;
use scanner::{Kind, Tag};
use std::collections::HashMap;
use tower_lsp_server::lsp_types::{DocumentSymbol, SymbolKind};

fn symbol_kind(kind: Kind) -> SymbolKind {
    match kind {
        Kind::Function | Kind::Macro => SymbolKind::FUNCTION,
        Kind::Module => SymbolKind::MODULE,
        Kind::Record => SymbolKind::STRUCT,
        Kind::Protocol => SymbolKind::INTERFACE,
        Kind::Implementation => SymbolKind::CLASS,
    }
}

#[allow(deprecated)]
fn tag_to_symbol(tag: &Tag, file: &IndexedFile) -> Option<DocumentSymbol> {
    let range = file.file.byte_span_to_range(tag.span).ok()?.into();

    Some(DocumentSymbol {
        name: tag.name.clone(),
        detail: Some(tag.kind.name().to_string()),
        kind: symbol_kind(tag.kind),
        tags: None,
        deprecated: None,
        range,
        selection_range: range,
        children: None,
    })
}

/// Outline of a file. Functions sit under the module their scope names;
/// when a module name repeats, the latest definition before them wins.
pub fn document_symbols(file: &IndexedFile) -> Vec<DocumentSymbol> {
    let mut symbols: Vec<DocumentSymbol> = vec![];
    let mut modules: HashMap<&str, usize> = HashMap::new();

    for tag in file.tags.iter() {
        let Some(symbol) = tag_to_symbol(tag, file) else {
            continue;
        };

        if tag.kind == Kind::Module {
            modules.insert(tag.name.as_str(), symbols.len());
            symbols.push(symbol);
            continue;
        }

        match tag.scope_name().and_then(|scope| modules.get(scope)) {
            Some(&index) => symbols[index]
                .children
                .get_or_insert_with(Vec::new)
                .push(symbol),
            None => symbols.push(symbol),
        }
    }

    symbols
}
