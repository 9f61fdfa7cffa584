use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::SlangError;

pub(crate) mod children;
pub(crate) mod location;
#[cfg(test)]
pub(crate) mod fixtures;

pub use children::children;
pub use location::{source_loc_to_range, substr_from_source_loc};

/// Stack reserved for turning a document into a tree, enough for expressions nested thousands deep
const PARSE_STACK_SIZE: usize = 64 * 1024 * 1024;

/// Represents a position in the source code, lines are 1-indexed and columns 0-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourcePosition {
    pub line: u32,
    pub column: u32,
}

/// Represents a span in the source code (start and end positions)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceLocation {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

/// The discriminant of a `Node`, used to bind rules and symbol extractors to node shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    BlockStatement,
    ExpressionStatement,
    IfStatement,
    WhileStatement,
    ForStatement,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    DebuggerStatement,
    FunctionDeclaration,
    FunctionExpression,
    ArrowFunctionExpression,
    VariableDeclaration,
    VariableDeclarator,
    Identifier,
    Literal,
    UnaryExpression,
    BinaryExpression,
    LogicalExpression,
    AssignmentExpression,
    ConditionalExpression,
    CallExpression,
    NewExpression,
    ArrayExpression,
    MemberExpression,
    ObjectExpression,
    Property,
    ImportDeclaration,
    ImportSpecifier,
    ImportDefaultSpecifier,
    ImportNamespaceSpecifier,
    Unknown,
}

/// An ESTree node as produced by the Source parser.
///
/// The tree is handed to us already parsed (usually as JSON), the analysis code only ever reads it.
/// Node types we have no use for deserialize to `Node::Unknown` and are treated as leaves.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    Program(Program),
    BlockStatement(BlockStatement),
    ExpressionStatement(ExpressionStatement),
    IfStatement(IfStatement),
    WhileStatement(WhileStatement),
    ForStatement(ForStatement),
    ReturnStatement(ReturnStatement),
    BreakStatement(BreakStatement),
    ContinueStatement(ContinueStatement),
    DebuggerStatement(DebuggerStatement),
    FunctionDeclaration(FunctionDeclaration),
    FunctionExpression(FunctionExpression),
    ArrowFunctionExpression(ArrowFunctionExpression),
    VariableDeclaration(VariableDeclaration),
    VariableDeclarator(VariableDeclarator),
    Identifier(Identifier),
    Literal(Literal),
    UnaryExpression(UnaryExpression),
    BinaryExpression(BinaryExpression),
    LogicalExpression(BinaryExpression),
    AssignmentExpression(BinaryExpression),
    ConditionalExpression(ConditionalExpression),
    CallExpression(CallExpression),
    NewExpression(CallExpression),
    ArrayExpression(ArrayExpression),
    MemberExpression(MemberExpression),
    ObjectExpression(ObjectExpression),
    Property(Property),
    ImportDeclaration(ImportDeclaration),
    ImportSpecifier(ImportSpecifier),
    ImportDefaultSpecifier(ImportLocalSpecifier),
    ImportNamespaceSpecifier(ImportLocalSpecifier),
    #[serde(other)]
    Unknown,
}

impl Node {
    /// Deserializes an ESTree document (with `loc` information) into a tree.
    ///
    /// Nesting depth is not limited: the JSON reader grows its stack on demand and the whole
    /// read runs on a dedicated stack of `PARSE_STACK_SIZE`, since tagged nodes are rebuilt
    /// from buffered content recursively.
    pub fn from_json(source: &str) -> Result<Node, SlangError> {
        stacker::grow(PARSE_STACK_SIZE, || {
            let mut json = serde_json::Deserializer::from_str(source);
            json.disable_recursion_limit();
            let node = Node::deserialize(serde_stacker::Deserializer::new(&mut json))
                .map_err(|err| SlangError::MalformedAst(err.to_string()))?;
            json.end().map_err(|err| SlangError::MalformedAst(err.to_string()))?;
            Ok(node)
        })
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Program(_) => NodeKind::Program,
            Node::BlockStatement(_) => NodeKind::BlockStatement,
            Node::ExpressionStatement(_) => NodeKind::ExpressionStatement,
            Node::IfStatement(_) => NodeKind::IfStatement,
            Node::WhileStatement(_) => NodeKind::WhileStatement,
            Node::ForStatement(_) => NodeKind::ForStatement,
            Node::ReturnStatement(_) => NodeKind::ReturnStatement,
            Node::BreakStatement(_) => NodeKind::BreakStatement,
            Node::ContinueStatement(_) => NodeKind::ContinueStatement,
            Node::DebuggerStatement(_) => NodeKind::DebuggerStatement,
            Node::FunctionDeclaration(_) => NodeKind::FunctionDeclaration,
            Node::FunctionExpression(_) => NodeKind::FunctionExpression,
            Node::ArrowFunctionExpression(_) => NodeKind::ArrowFunctionExpression,
            Node::VariableDeclaration(_) => NodeKind::VariableDeclaration,
            Node::VariableDeclarator(_) => NodeKind::VariableDeclarator,
            Node::Identifier(_) => NodeKind::Identifier,
            Node::Literal(_) => NodeKind::Literal,
            Node::UnaryExpression(_) => NodeKind::UnaryExpression,
            Node::BinaryExpression(_) => NodeKind::BinaryExpression,
            Node::LogicalExpression(_) => NodeKind::LogicalExpression,
            Node::AssignmentExpression(_) => NodeKind::AssignmentExpression,
            Node::ConditionalExpression(_) => NodeKind::ConditionalExpression,
            Node::CallExpression(_) => NodeKind::CallExpression,
            Node::NewExpression(_) => NodeKind::NewExpression,
            Node::ArrayExpression(_) => NodeKind::ArrayExpression,
            Node::MemberExpression(_) => NodeKind::MemberExpression,
            Node::ObjectExpression(_) => NodeKind::ObjectExpression,
            Node::Property(_) => NodeKind::Property,
            Node::ImportDeclaration(_) => NodeKind::ImportDeclaration,
            Node::ImportSpecifier(_) => NodeKind::ImportSpecifier,
            Node::ImportDefaultSpecifier(_) => NodeKind::ImportDefaultSpecifier,
            Node::ImportNamespaceSpecifier(_) => NodeKind::ImportNamespaceSpecifier,
            Node::Unknown => NodeKind::Unknown,
        }
    }

    /// Location of the node, `None` only for `Node::Unknown`
    pub fn loc(&self) -> Option<&SourceLocation> {
        let loc = match self {
            Node::Program(n) => &n.loc,
            Node::BlockStatement(n) => &n.loc,
            Node::ExpressionStatement(n) => &n.loc,
            Node::IfStatement(n) => &n.loc,
            Node::WhileStatement(n) => &n.loc,
            Node::ForStatement(n) => &n.loc,
            Node::ReturnStatement(n) => &n.loc,
            Node::BreakStatement(n) => &n.loc,
            Node::ContinueStatement(n) => &n.loc,
            Node::DebuggerStatement(n) => &n.loc,
            Node::FunctionDeclaration(n) => &n.loc,
            Node::FunctionExpression(n) => &n.loc,
            Node::ArrowFunctionExpression(n) => &n.loc,
            Node::VariableDeclaration(n) => &n.loc,
            Node::VariableDeclarator(n) => &n.loc,
            Node::Identifier(n) => &n.loc,
            Node::Literal(n) => &n.loc,
            Node::UnaryExpression(n) => &n.loc,
            Node::BinaryExpression(n)
            | Node::LogicalExpression(n)
            | Node::AssignmentExpression(n) => &n.loc,
            Node::ConditionalExpression(n) => &n.loc,
            Node::CallExpression(n) | Node::NewExpression(n) => &n.loc,
            Node::ArrayExpression(n) => &n.loc,
            Node::MemberExpression(n) => &n.loc,
            Node::ObjectExpression(n) => &n.loc,
            Node::Property(n) => &n.loc,
            Node::ImportDeclaration(n) => &n.loc,
            Node::ImportSpecifier(n) => &n.loc,
            Node::ImportDefaultSpecifier(n) | Node::ImportNamespaceSpecifier(n) => &n.loc,
            Node::Unknown => return None,
        };
        Some(loc)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Program {
    pub body: Vec<Node>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockStatement {
    pub body: Vec<Node>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpressionStatement {
    pub expression: Box<Node>,
    pub loc: SourceLocation,
}

/// An if statement, `alternate` is either a block or another if statement (for else if)
#[derive(Debug, Clone, Deserialize)]
pub struct IfStatement {
    pub test: Box<Node>,
    pub consequent: Box<Node>,
    #[serde(default)]
    pub alternate: Option<Box<Node>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WhileStatement {
    pub test: Box<Node>,
    pub body: Box<Node>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForStatement {
    #[serde(default)]
    pub init: Option<Box<Node>>,
    #[serde(default)]
    pub test: Option<Box<Node>>,
    #[serde(default)]
    pub update: Option<Box<Node>>,
    pub body: Box<Node>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReturnStatement {
    #[serde(default)]
    pub argument: Option<Box<Node>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BreakStatement {
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContinueStatement {
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DebuggerStatement {
    pub loc: SourceLocation,
}

/// A named function declaration, `params` are plain identifiers in every chapter we lint
#[derive(Debug, Clone, Deserialize)]
pub struct FunctionDeclaration {
    pub id: Identifier,
    pub params: Vec<Node>,
    pub body: Box<Node>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FunctionExpression {
    #[serde(default)]
    pub id: Option<Identifier>,
    pub params: Vec<Node>,
    pub body: Box<Node>,
    pub loc: SourceLocation,
}

/// `body` is either a block statement or a single expression
#[derive(Debug, Clone, Deserialize)]
pub struct ArrowFunctionExpression {
    pub params: Vec<Node>,
    pub body: Box<Node>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariableDeclaration {
    pub declarations: Vec<VariableDeclarator>,
    pub kind: VariableKind,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariableDeclarator {
    pub id: Identifier,
    #[serde(default)]
    pub init: Option<Box<Node>>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Identifier {
    pub name: String,
    pub loc: SourceLocation,
}

/// A literal, `value` keeps the JSON shape so `null`, booleans, numbers and strings stay distinguishable
#[derive(Debug, Clone, Deserialize)]
pub struct Literal {
    #[serde(default)]
    pub value: Value,
    pub loc: SourceLocation,
}

impl Literal {
    /// The name `typeof` would give the value at runtime (regex literals are objects)
    pub fn type_name(&self) -> &'static str {
        match &self.value {
            Value::Null | Value::Object(_) | Value::Array(_) => "object",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        self.value.as_f64()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnaryExpression {
    pub operator: String,
    pub argument: Box<Node>,
    pub loc: SourceLocation,
}

/// Shared shape of binary, logical and assignment expressions
#[derive(Debug, Clone, Deserialize)]
pub struct BinaryExpression {
    pub operator: String,
    pub left: Box<Node>,
    pub right: Box<Node>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConditionalExpression {
    pub test: Box<Node>,
    pub consequent: Box<Node>,
    pub alternate: Box<Node>,
    pub loc: SourceLocation,
}

/// Shared shape of call and `new` expressions
#[derive(Debug, Clone, Deserialize)]
pub struct CallExpression {
    pub callee: Box<Node>,
    pub arguments: Vec<Node>,
    pub loc: SourceLocation,
}

/// Array literal, holes (`[1, , 2]`) are `None`
#[derive(Debug, Clone, Deserialize)]
pub struct ArrayExpression {
    pub elements: Vec<Option<Node>>,
    pub loc: SourceLocation,
}

/// `object[property]` when computed, `object.property` otherwise
#[derive(Debug, Clone, Deserialize)]
pub struct MemberExpression {
    pub object: Box<Node>,
    pub property: Box<Node>,
    pub computed: bool,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectExpression {
    pub properties: Vec<Node>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Property {
    pub key: Box<Node>,
    pub value: Box<Node>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImportDeclaration {
    pub specifiers: Vec<Node>,
    pub loc: SourceLocation,
}

/// `import { imported as local } from "module";`
#[derive(Debug, Clone, Deserialize)]
pub struct ImportSpecifier {
    pub imported: Identifier,
    pub local: Identifier,
    pub loc: SourceLocation,
}

/// Default and namespace specifiers only bind a local name
#[derive(Debug, Clone, Deserialize)]
pub struct ImportLocalSpecifier {
    pub local: Identifier,
    pub loc: SourceLocation,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_PROGRAM: &str = r#"{
        "type": "Program",
        "sourceType": "module",
        "start": 0,
        "end": 28,
        "loc": { "start": { "line": 1, "column": 0 }, "end": { "line": 2, "column": 9 } },
        "body": [
            {
                "type": "VariableDeclaration",
                "kind": "const",
                "loc": { "start": { "line": 1, "column": 0 }, "end": { "line": 1, "column": 18 } },
                "declarations": [
                    {
                        "type": "VariableDeclarator",
                        "loc": { "start": { "line": 1, "column": 6 }, "end": { "line": 1, "column": 17 } },
                        "id": {
                            "type": "Identifier",
                            "name": "x",
                            "loc": { "start": { "line": 1, "column": 6 }, "end": { "line": 1, "column": 7 } }
                        },
                        "init": {
                            "type": "Literal",
                            "value": null,
                            "raw": "null",
                            "loc": { "start": { "line": 1, "column": 10 }, "end": { "line": 1, "column": 14 } }
                        }
                    }
                ]
            },
            {
                "type": "EmptyStatement",
                "loc": { "start": { "line": 2, "column": 0 }, "end": { "line": 2, "column": 1 } }
            }
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let program = Node::from_json(TEST_PROGRAM).unwrap();
        assert_eq!(program.kind(), NodeKind::Program);

        let Node::Program(program) = program else {
            panic!("expected a program");
        };
        assert_eq!(program.body.len(), 2);
        assert_eq!(program.body[0].kind(), NodeKind::VariableDeclaration);
        // node types we do not model become leaves without a location
        assert_eq!(program.body[1].kind(), NodeKind::Unknown);
        assert!(program.body[1].loc().is_none());

        let Node::VariableDeclaration(decl) = &program.body[0] else {
            panic!("expected a variable declaration");
        };
        assert_eq!(decl.kind, VariableKind::Const);
        assert_eq!(decl.declarations[0].id.name, "x");
        let Some(init) = &decl.declarations[0].init else {
            panic!("expected an initializer");
        };
        let Node::Literal(lit) = init.as_ref() else {
            panic!("expected a literal");
        };
        assert!(lit.value.is_null());
        assert_eq!(lit.type_name(), "object");
    }

    #[test]
    fn test_deeply_nested_expression() {
        // !!!...!x, far deeper than serde_json's default nesting limit
        let loc = r#"{ "start": { "line": 1, "column": 0 }, "end": { "line": 1, "column": 1 } }"#;
        let mut expr = format!(r#"{{ "type": "Identifier", "name": "x", "loc": {loc} }}"#);
        for _ in 0..1000 {
            expr = format!(
                r#"{{ "type": "UnaryExpression", "operator": "!", "prefix": true, "argument": {expr}, "loc": {loc} }}"#
            );
        }

        let mut node = Node::from_json(&expr).unwrap();
        let mut depth = 0;
        while let Node::UnaryExpression(unary) = node {
            node = *unary.argument;
            depth += 1;
        }
        assert_eq!(depth, 1000);
        assert_eq!(node.kind(), NodeKind::Identifier);
    }

    #[test]
    fn test_trailing_garbage_is_malformed() {
        let result = Node::from_json(
            r#"{ "type": "BreakStatement", "loc": { "start": { "line": 1, "column": 0 }, "end": { "line": 1, "column": 6 } } } x"#,
        );
        assert!(matches!(result, Err(SlangError::MalformedAst(_))));
    }

    #[test]
    fn test_missing_loc_is_malformed() {
        let result = Node::from_json(r#"{ "type": "BreakStatement" }"#);
        assert!(matches!(result, Err(SlangError::MalformedAst(_))));
    }

    #[test]
    fn test_function_without_name_is_malformed() {
        let result = Node::from_json(
            r#"{
                "type": "FunctionDeclaration",
                "id": null,
                "params": [],
                "body": {
                    "type": "BlockStatement",
                    "body": [],
                    "loc": { "start": { "line": 1, "column": 13 }, "end": { "line": 1, "column": 15 } }
                },
                "loc": { "start": { "line": 1, "column": 0 }, "end": { "line": 1, "column": 15 } }
            }"#,
        );
        assert!(matches!(result, Err(SlangError::MalformedAst(_))));
    }
}
