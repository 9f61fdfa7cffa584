use lsp_types::{Position, Range};

use crate::SlangError;
use crate::ast::SourceLocation;

/// Converts a parser location (1-indexed lines) into an editor range (0-indexed lines), columns are kept
pub fn source_loc_to_range(loc: &SourceLocation) -> Range {
    Range {
        start: Position {
            line: loc.start.line.saturating_sub(1),
            character: loc.start.column,
        },
        end: Position {
            line: loc.end.line.saturating_sub(1),
            character: loc.end.column,
        },
    }
}

impl From<&SourceLocation> for Range {
    fn from(loc: &SourceLocation) -> Self {
        source_loc_to_range(loc)
    }
}

/// Extracts the source text covered by `loc` from the document split into lines.
///
/// Columns count characters, a location spanning several lines is joined back with `\n`.
pub fn substr_from_source_loc(text: &[&str], loc: &SourceLocation) -> Result<String, SlangError> {
    let start = line_at(text, loc.start.line)?;
    if loc.start.line == loc.end.line {
        return Ok(char_slice(start, loc.start.column, Some(loc.end.column)));
    }

    let end = line_at(text, loc.end.line)?;
    let mut parts = vec![char_slice(start, loc.start.column, None)];
    for line in (loc.start.line + 1)..loc.end.line {
        parts.push(line_at(text, line)?.to_string());
    }
    parts.push(char_slice(end, 0, Some(loc.end.column)));

    Ok(parts.join("\n"))
}

fn line_at<'a>(text: &[&'a str], line: u32) -> Result<&'a str, SlangError> {
    line.checked_sub(1)
        .and_then(|index| text.get(index as usize))
        .copied()
        .ok_or(SlangError::LocationOutOfBounds { line, lines: text.len() })
}

fn char_slice(line: &str, start: u32, end: Option<u32>) -> String {
    let chars = line.chars().skip(start as usize);
    match end {
        Some(end) => chars.take((end as usize).saturating_sub(start as usize)).collect(),
        None => chars.collect(),
    }
}
