use log::error;
use std::ffi::{CStr, CString, c_char, c_int};
use std::ptr;
use thiserror::Error;

pub mod analysis;
pub mod ast;
pub mod imports;
pub mod symbols;

pub use analysis::Linter;
pub use analysis::context::{Chapter, Context, Variant};
pub use analysis::diagnostic::{Diagnostic, DiagnosticCollector, DiagnosticSeverity};
pub use analysis::external_api::LintConfig;
pub use analysis::rule::LintRule;
pub use analysis::rule_registry::RuleRegistry;
pub use ast::{Node, NodeKind, SourceLocation, SourcePosition};
pub use imports::find_existing_import_line;
pub use symbols::{DeclarationKind, NodeToSymbol, ProgramSymbol, get_all_names, get_all_names_async};

#[derive(Debug, Error)]
pub enum SlangError {
    #[error("Malformed syntax tree: {0}")]
    MalformedAst(String),
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(String),
    #[error("A null pointer was passed for {0}")]
    NullPointer(&'static str),
    #[error("Unknown chapter: {0}")]
    InvalidChapter(i64),
    #[error("Line {line} is outside of the document ({lines} lines)")]
    LocationOutOfBounds { line: u32, lines: usize },
    #[error("Failed to build search pattern: {0}")]
    InvalidPattern(String),
    #[error("Failed to serialize result: {0}")]
    Serialization(String),
}

thread_local! {
    static ERRORS: std::cell::RefCell<Vec<String>> = const { std::cell::RefCell::new(Vec::new()) };
}

pub fn slang_error(err: &str) {
    ERRORS.with(|errors| errors.borrow_mut().push(err.to_string()));
    error!("{:?}", err);
}

/// classic get errors function, returns the last error emitted by slang lint, if there are no errors returns a null pointer
///
/// you have to free the returned string using `slang_free_string`
#[unsafe(no_mangle)]
pub unsafe extern "C" fn slang_get_errors() -> *mut c_char {
    ERRORS.with(|errors| match errors.borrow().last() {
        Some(last_error) => match CString::new(last_error.clone()) {
            Ok(cstring) => cstring.into_raw(),
            Err(_) => ptr::null_mut(),
        },
        None => ptr::null_mut(),
    })
}

/// Use to free any strings allocated by slang lint
#[unsafe(no_mangle)]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe extern "C" fn slang_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        let _ = CString::from_raw(ptr);
    }
}

/// Shared plumbing of the document entry points: decodes the tree and chapter, runs `f` and hands
/// its JSON back as an owned C string. Any failure is recorded and turns into a null pointer.
///
/// # Safety
/// `ast_json` has to be null or point to a nul terminated string that stays alive for the call.
pub(crate) unsafe fn ffi_document_call<F>(ast_json: *const c_char, chapter: c_int, f: F) -> *mut c_char
where
    F: FnOnce(Node, Context) -> Result<String, SlangError>,
{
    if ast_json.is_null() {
        slang_error(&SlangError::NullPointer("the syntax tree").to_string());
        return ptr::null_mut();
    }

    // SAFETY: checked for null above, the caller guarantees termination and lifetime
    let source = unsafe { CStr::from_ptr(ast_json) };
    let result = source
        .to_str()
        .map_err(|err| SlangError::Utf8Error(err.to_string()))
        .and_then(|json| {
            let context = Context::new(Chapter::try_from(i64::from(chapter))?);
            let program = Node::from_json(json)?;
            f(program, context)
        })
        .and_then(|output| CString::new(output).map_err(|err| SlangError::Serialization(err.to_string())));

    match result {
        Ok(cstring) => cstring.into_raw(),
        Err(err) => {
            slang_error(&err.to_string());
            ptr::null_mut()
        }
    }
}
