use regex::Regex;

use crate::SlangError;

/// Finds the first line already importing from `module_name`, e.g. `import { head } from "list";`.
///
/// Returns the 0-indexed line so a completion can extend that import instead of adding a new one.
pub fn find_existing_import_line(code: &str, module_name: &str) -> Result<Option<usize>, SlangError> {
    let pattern = format!(
        r#"import\s*\{{\s*([^}}]*)\s*\}}\s*from\s*["']{}["'];"#,
        regex::escape(module_name)
    );
    let import_regex = Regex::new(&pattern).map_err(|err| SlangError::InvalidPattern(err.to_string()))?;

    Ok(code.split('\n').position(|line| import_regex.is_match(line)))
}
