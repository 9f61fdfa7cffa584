mod extractors;
mod kinds;

use std::collections::VecDeque;
use std::ffi::{c_char, c_int};

use log::debug;
use lsp_types::{DocumentSymbol, Range};

use crate::analysis::context::Context;
use crate::ast::{Node, NodeKind};
use crate::{SlangError, ffi_document_call};

pub use extractors::{FUNCTION_NODE_TO_SYMBOL, IMPORT_NODE_TO_SYMBOL, VARIABLE_NODE_TO_SYMBOL};
pub use kinds::{map_declaration_kind_to_symbol_kind, map_meta_to_completion_item_kind};

/// Extracts the outline of an ESTree JSON document for the given chapter (1 to 4).
///
/// Returns a JSON array of LSP document symbols, or a null pointer on failure (see `slang_get_errors`).
/// The returned string has to be freed with `slang_free_string`.
#[unsafe(no_mangle)]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe extern "C" fn slang_document_symbols(ast_json: *const c_char, chapter: c_int) -> *mut c_char {
    ffi_document_call(ast_json, chapter, |program, context| {
        let symbols = document_symbols(&program, &context);
        serde_json::to_string(&symbols).map_err(|err| SlangError::Serialization(err.to_string()))
    })
}

/// Where a name was introduced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Import,
    Function,
    Let,
    Const,
    Param,
}

/// A declared name, `selection_range` covers just the identifier inside `range`
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramSymbol {
    pub name: String,
    pub kind: DeclarationKind,
    pub range: Range,
    pub selection_range: Range,
}

impl ProgramSymbol {
    #[allow(deprecated)]
    pub fn to_document_symbol(&self, context: &Context) -> DocumentSymbol {
        DocumentSymbol {
            name: self.name.clone(),
            detail: None,
            kind: map_declaration_kind_to_symbol_kind(self.kind, context),
            tags: None,
            deprecated: None,
            range: self.range,
            selection_range: self.selection_range,
            children: None,
        }
    }
}

/// Binds a node kind to the function turning such a node into results
pub struct NodeToSymbol<T> {
    pub kind: NodeKind,
    pub callback: fn(&Node) -> Vec<T>,
}

// derived impls would require `T: Clone`
impl<T> Clone for NodeToSymbol<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeToSymbol<T> {}

/// Collects every declared name in the tree, wherever the cursor is.
///
/// Nodes are visited breadth first starting at `program`. For each node every extractor bound to
/// its kind runs, in the order given, and its results are appended. The output is fully
/// determined by the tree and the extractor list.
pub fn get_all_names<T>(program: &Node, node_to_symbols: &[NodeToSymbol<T>]) -> Vec<T> {
    let mut queue: VecDeque<&Node> = VecDeque::from([program]);
    let mut symbols = Vec::new();
    let mut visited = 0usize;

    while let Some(node) = queue.pop_front() {
        visited += 1;
        let kind = node.kind();

        for extractor in node_to_symbols.iter().filter(|x| x.kind == kind) {
            symbols.extend((extractor.callback)(node));
        }

        queue.extend(node.children());
    }

    debug!("visited {} nodes, collected {} symbols", visited, symbols.len());
    symbols
}

/// Async flavour of `get_all_names` for request handlers, it never suspends
pub async fn get_all_names_async<T>(program: &Node, node_to_symbols: &[NodeToSymbol<T>]) -> Vec<T> {
    get_all_names(program, node_to_symbols)
}

/// Variable, function and import declarations of the program
pub fn program_symbols(program: &Node) -> Vec<ProgramSymbol> {
    get_all_names(
        program,
        &[VARIABLE_NODE_TO_SYMBOL, FUNCTION_NODE_TO_SYMBOL, IMPORT_NODE_TO_SYMBOL],
    )
}

/// Flat outline of the program as the editor expects it
pub fn document_symbols(program: &Node, context: &Context) -> Vec<DocumentSymbol> {
    program_symbols(program)
        .iter()
        .map(|symbol| symbol.to_document_symbol(context))
        .collect()
}
