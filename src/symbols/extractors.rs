use log::warn;

use crate::ast::{Node, NodeKind, VariableKind, source_loc_to_range};
use crate::symbols::{DeclarationKind, NodeToSymbol, ProgramSymbol};

pub const VARIABLE_NODE_TO_SYMBOL: NodeToSymbol<ProgramSymbol> = NodeToSymbol {
    kind: NodeKind::VariableDeclaration,
    callback: variable_declaration_to_symbol,
};

pub const FUNCTION_NODE_TO_SYMBOL: NodeToSymbol<ProgramSymbol> = NodeToSymbol {
    kind: NodeKind::FunctionDeclaration,
    callback: function_declaration_to_symbol,
};

pub const IMPORT_NODE_TO_SYMBOL: NodeToSymbol<ProgramSymbol> = NodeToSymbol {
    kind: NodeKind::ImportDeclaration,
    callback: import_declaration_to_symbol,
};

/// One symbol per declarator, `let` and `var` are reassignable, `const` is not
fn variable_declaration_to_symbol(node: &Node) -> Vec<ProgramSymbol> {
    let Node::VariableDeclaration(decl) = node else {
        return Vec::new();
    };

    let kind = match decl.kind {
        VariableKind::Var | VariableKind::Let => DeclarationKind::Let,
        VariableKind::Const => DeclarationKind::Const,
    };

    decl.declarations
        .iter()
        .map(|declarator| ProgramSymbol {
            name: declarator.id.name.clone(),
            kind,
            range: source_loc_to_range(&declarator.loc),
            selection_range: source_loc_to_range(&declarator.id.loc),
        })
        .collect()
}

/// The parameters first, then the function itself
fn function_declaration_to_symbol(node: &Node) -> Vec<ProgramSymbol> {
    let Node::FunctionDeclaration(func) = node else {
        return Vec::new();
    };

    let mut symbols: Vec<ProgramSymbol> = func
        .params
        .iter()
        .filter_map(|param| match param {
            Node::Identifier(id) => Some(ProgramSymbol {
                name: id.name.clone(),
                kind: DeclarationKind::Param,
                range: source_loc_to_range(&id.loc),
                selection_range: source_loc_to_range(&id.loc),
            }),
            other => {
                warn!("skipping {:?} parameter of '{}'", other.kind(), func.id.name);
                None
            }
        })
        .collect();

    symbols.push(ProgramSymbol {
        name: func.id.name.clone(),
        kind: DeclarationKind::Function,
        range: source_loc_to_range(&func.loc),
        selection_range: source_loc_to_range(&func.id.loc),
    });

    symbols
}

/// One symbol per named specifier, all sharing the range of the whole import statement
fn import_declaration_to_symbol(node: &Node) -> Vec<ProgramSymbol> {
    let Node::ImportDeclaration(import) = node else {
        return Vec::new();
    };

    import
        .specifiers
        .iter()
        .filter_map(|specifier| match specifier {
            Node::ImportSpecifier(spec) => Some(ProgramSymbol {
                name: spec.imported.name.clone(),
                kind: DeclarationKind::Import,
                range: source_loc_to_range(&import.loc),
                selection_range: source_loc_to_range(&spec.loc),
            }),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::fixtures::{block, ident, loc, node, number};
    use lsp_types::{Position, Range};
    use serde_json::json;

    fn range(line: u32, start: u32, end: u32) -> Range {
        Range::new(Position::new(line, start), Position::new(line, end))
    }

    #[test]
    fn test_multiple_declarators() {
        // let a = 1, b = 2;
        let decl = node(json!({
            "type": "VariableDeclaration",
            "kind": "let",
            "declarations": [
                { "type": "VariableDeclarator", "id": ident("a", 1, 4), "init": number(1.0, "1", 1, 8), "loc": loc(1, 4, 9) },
                { "type": "VariableDeclarator", "id": ident("b", 1, 11), "init": number(2.0, "2", 1, 15), "loc": loc(1, 11, 16) }
            ],
            "loc": loc(1, 0, 17)
        }));

        let symbols = variable_declaration_to_symbol(&decl);
        assert_eq!(symbols.len(), 2);
        assert_eq!(symbols[0].name, "a");
        assert_eq!(symbols[0].kind, DeclarationKind::Let);
        assert_eq!(symbols[0].range, range(0, 4, 9));
        assert_eq!(symbols[0].selection_range, range(0, 4, 5));
        assert_eq!(symbols[1].name, "b");
        assert_eq!(symbols[1].range, range(0, 11, 16));
        assert_eq!(symbols[1].selection_range, range(0, 11, 12));
    }

    #[test]
    fn test_var_is_let_like() {
        let decl = node(json!({
            "type": "VariableDeclaration",
            "kind": "var",
            "declarations": [
                { "type": "VariableDeclarator", "id": ident("v", 1, 4), "init": null, "loc": loc(1, 4, 5) }
            ],
            "loc": loc(1, 0, 6)
        }));
        assert_eq!(variable_declaration_to_symbol(&decl)[0].kind, DeclarationKind::Let);
    }

    #[test]
    fn test_params_before_function() {
        // function f(a, b) { }
        let func = node(json!({
            "type": "FunctionDeclaration",
            "id": ident("f", 1, 9),
            "params": [ident("a", 1, 11), ident("b", 1, 14)],
            "body": block(vec![], loc(1, 17, 20)),
            "loc": loc(1, 0, 20)
        }));

        let symbols = function_declaration_to_symbol(&func);
        let names: Vec<_> = symbols.iter().map(|s| (s.name.as_str(), s.kind)).collect();
        assert_eq!(
            names,
            vec![
                ("a", DeclarationKind::Param),
                ("b", DeclarationKind::Param),
                ("f", DeclarationKind::Function),
            ]
        );
        assert_eq!(symbols[0].range, symbols[0].selection_range);
        assert_eq!(symbols[2].range, range(0, 0, 20));
        assert_eq!(symbols[2].selection_range, range(0, 9, 10));
    }

    #[test]
    fn test_function_without_params() {
        let func = node(json!({
            "type": "FunctionDeclaration",
            "id": ident("main", 1, 9),
            "params": [],
            "body": block(vec![], loc(1, 16, 19)),
            "loc": loc(1, 0, 19)
        }));

        let symbols = function_declaration_to_symbol(&func);
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0].kind, DeclarationKind::Function);
    }

    #[test]
    fn test_import_specifiers_share_statement_range() {
        // import { a, b } from "m";
        let import = node(json!({
            "type": "ImportDeclaration",
            "specifiers": [
                { "type": "ImportSpecifier", "imported": ident("a", 1, 9), "local": ident("a", 1, 9), "loc": loc(1, 9, 10) },
                { "type": "ImportSpecifier", "imported": ident("b", 1, 12), "local": ident("b", 1, 12), "loc": loc(1, 12, 13) }
            ],
            "source": { "type": "Literal", "value": "m", "raw": "\"m\"", "loc": loc(1, 21, 24) },
            "loc": loc(1, 0, 25)
        }));

        let symbols = import_declaration_to_symbol(&import);
        assert_eq!(symbols.len(), 2);
        // the full range is the whole statement for every specifier, only the selection differs
        assert_eq!(symbols[0].range, range(0, 0, 25));
        assert_eq!(symbols[0].range, symbols[1].range);
        assert_eq!(symbols[0].selection_range, range(0, 9, 10));
        assert_eq!(symbols[1].selection_range, range(0, 12, 13));
        assert!(symbols.iter().all(|s| s.kind == DeclarationKind::Import));
    }

    #[test]
    fn test_import_uses_imported_name() {
        // import { head as first } from "list";
        let import = node(json!({
            "type": "ImportDeclaration",
            "specifiers": [
                { "type": "ImportSpecifier", "imported": ident("head", 1, 9), "local": ident("first", 1, 17), "loc": loc(1, 9, 22) }
            ],
            "loc": loc(1, 0, 37)
        }));
        assert_eq!(import_declaration_to_symbol(&import)[0].name, "head");
    }

    #[test]
    fn test_wrong_node_yields_nothing() {
        let brk = node(json!({ "type": "BreakStatement", "loc": loc(1, 0, 6) }));
        assert!(variable_declaration_to_symbol(&brk).is_empty());
        assert!(function_declaration_to_symbol(&brk).is_empty());
        assert!(import_declaration_to_symbol(&brk).is_empty());
    }
}
