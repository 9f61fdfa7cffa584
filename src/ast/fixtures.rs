//! ESTree JSON builders shared by the unit tests

use serde_json::{Value, json};

use crate::ast::Node;

/// Location on a single line
pub fn loc(line: u32, start: u32, end: u32) -> Value {
    span(line, start, line, end)
}

pub fn span(start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Value {
    json!({
        "start": { "line": start_line, "column": start_column },
        "end": { "line": end_line, "column": end_column }
    })
}

pub fn ident(name: &str, line: u32, column: u32) -> Value {
    json!({ "type": "Identifier", "name": name, "loc": loc(line, column, column + name.len() as u32) })
}

pub fn number(value: f64, raw: &str, line: u32, column: u32) -> Value {
    json!({ "type": "Literal", "value": value, "raw": raw, "loc": loc(line, column, column + raw.len() as u32) })
}

pub fn block(body: Vec<Value>, loc: Value) -> Value {
    json!({ "type": "BlockStatement", "body": body, "loc": loc })
}

pub fn program(body: Vec<Value>, loc: Value) -> Value {
    json!({ "type": "Program", "sourceType": "module", "body": body, "loc": loc })
}

pub fn node(value: Value) -> Node {
    serde_json::from_value(value).unwrap()
}
