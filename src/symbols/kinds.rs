use lsp_types::{CompletionItemKind, SymbolKind};

use crate::analysis::context::{Chapter, Context};
use crate::symbols::DeclarationKind;

/// Outline kind for a declaration, parameters can't be reassigned in chapters 1 and 2
pub fn map_declaration_kind_to_symbol_kind(kind: DeclarationKind, context: &Context) -> SymbolKind {
    match kind {
        DeclarationKind::Import => SymbolKind::NAMESPACE,
        DeclarationKind::Function => SymbolKind::FUNCTION,
        DeclarationKind::Let => SymbolKind::VARIABLE,
        DeclarationKind::Param => match context.chapter {
            Chapter::Source1 | Chapter::Source2 => SymbolKind::CONSTANT,
            Chapter::Source3 | Chapter::Source4 => SymbolKind::VARIABLE,
        },
        DeclarationKind::Const => SymbolKind::CONSTANT,
    }
}

pub fn map_meta_to_completion_item_kind(meta: &str) -> CompletionItemKind {
    match meta {
        "const" => CompletionItemKind::CONSTANT,
        "let" => CompletionItemKind::VARIABLE,
        "import" => CompletionItemKind::MODULE,
        _ => CompletionItemKind::TEXT,
    }
}
