//! Line-oriented import extraction
//!
//! Each language family has an [`ImportExtractor`] that scans source text once,
//! line by line, and resolves specifiers against the [`FileIndex`] of
//! discovered files. Nothing here can fail: text that does not look like an
//! import is ignored.

mod ecmascript;
mod go;
mod include;
mod jvm;
mod python;
mod rust;

pub use ecmascript::EcmaScriptExtractor;
pub use go::GoExtractor;
pub use include::IncludeExtractor;
pub use jvm::JvmExtractor;
pub use python::PythonExtractor;
pub use rust::RustExtractor;

use crate::models::file_record::Language;
use crate::utils::FileIndex;
use serde::{Deserialize, Serialize};

/// How an import was written
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ImportKind {
    /// `import`, `from … import`, `use`, `export … from`
    Static,
    /// `import(…)`
    Dynamic,
    /// `require(…)`
    Require,
    /// Rust `mod x;`
    Module,
    /// `#include "x.h"`
    LocalInclude,
    /// `#include <x.h>`
    SystemInclude,
}

/// An import as found in source, before resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawImport {
    /// Specifier exactly as written
    pub specifier: String,
    /// 1-based line number
    pub line: usize,
    pub kind: ImportKind,
}

impl RawImport {
    pub fn new(specifier: impl Into<String>, line: usize, kind: ImportKind) -> Self {
        Self {
            specifier: specifier.into(),
            line,
            kind,
        }
    }
}

/// Extracts and resolves imports for one language family
pub trait ImportExtractor: Send + Sync {
    /// Scan text for import statements in source order
    fn extract(&self, text: &str) -> Vec<RawImport>;

    /// Map an import to a discovered file, relative to the scan root
    fn resolve(&self, import: &RawImport, importer: &str, index: &FileIndex) -> Option<String>;

    /// Name of the sentinel node used when `resolve` finds nothing
    fn external_name(&self, import: &RawImport) -> String;
}

static ECMASCRIPT: EcmaScriptExtractor = EcmaScriptExtractor;
static PYTHON: PythonExtractor = PythonExtractor;
static RUST: RustExtractor = RustExtractor;
static GO: GoExtractor = GoExtractor;
static JVM: JvmExtractor = JvmExtractor;
static INCLUDE: IncludeExtractor = IncludeExtractor;

/// Extractor for a language, if imports are understood for it
pub fn extractor_for(language: Language) -> Option<&'static dyn ImportExtractor> {
    match language {
        Language::JavaScript | Language::TypeScript | Language::Vue | Language::Svelte => {
            Some(&ECMASCRIPT)
        }
        Language::Python => Some(&PYTHON),
        Language::Rust => Some(&RUST),
        Language::Go => Some(&GO),
        Language::Java | Language::Kotlin | Language::Scala => Some(&JVM),
        Language::C | Language::Cpp | Language::ObjectiveC => Some(&INCLUDE),
        _ => None,
    }
}

/// Extract imports from text, or nothing for unsupported languages
pub fn extract_imports(language: Language, text: &str) -> Vec<RawImport> {
    extractor_for(language)
        .map(|extractor| extractor.extract(text))
        .unwrap_or_default()
}

/// Iterate over `(line_number, line)` pairs, 1-based
pub(crate) fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().map(|(idx, line)| (idx + 1, line))
}
