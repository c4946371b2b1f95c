//! Go imports

use super::{numbered_lines, ImportExtractor, ImportKind, RawImport};
use crate::utils::FileIndex;
use regex::Regex;
use std::sync::OnceLock;

fn single_import() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^import\s+(?:[\w.]+\s+)?"([^"]+)""#).expect("valid regex"))
}

fn block_entry() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^(?:[\w.]+\s+)?"([^"]+)""#).expect("valid regex"))
}

/// Scanner for single-line and parenthesised `import` blocks
#[derive(Debug, Default, Clone, Copy)]
pub struct GoExtractor;

impl ImportExtractor for GoExtractor {
    fn extract(&self, text: &str) -> Vec<RawImport> {
        let mut imports = Vec::new();
        let mut in_block = false;

        for (line_no, line) in numbered_lines(text) {
            let trimmed = line.trim();

            if in_block {
                if trimmed.starts_with(')') {
                    in_block = false;
                } else if let Some(caps) = block_entry().captures(trimmed) {
                    imports.push(RawImport::new(&caps[1], line_no, ImportKind::Static));
                }
                continue;
            }

            if trimmed.starts_with("import") && trimmed.trim_start_matches("import").trim_start().starts_with('(') {
                // `import ( "fmt" )` on one line
                let inner = trimmed.split_once('(').map(|(_, rest)| rest).unwrap_or("");
                let (entries, closed) = match inner.split_once(')') {
                    Some((entries, _)) => (entries, true),
                    None => (inner, false),
                };
                for entry in entries.split(';') {
                    if let Some(caps) = block_entry().captures(entry.trim()) {
                        imports.push(RawImport::new(&caps[1], line_no, ImportKind::Static));
                    }
                }
                in_block = !closed;
            } else if let Some(caps) = single_import().captures(trimmed) {
                imports.push(RawImport::new(&caps[1], line_no, ImportKind::Static));
            }
        }

        imports
    }

    fn resolve(&self, import: &RawImport, _importer: &str, index: &FileIndex) -> Option<String> {
        let specifier = import.specifier.as_str();
        let segments: Vec<&str> = specifier.split('/').collect();

        // Standard library style paths only match a directory of the same path
        if !segments[0].contains('.') {
            return package_file(index, specifier);
        }

        // Longest directory suffix first; a lone trailing segment is too ambiguous
        for len in (2..=segments.len()).rev() {
            let suffix = segments[segments.len() - len..].join("/");
            if let Some(dir) = index.find_dir_suffix(&suffix) {
                if let Some(file) = package_file(index, dir) {
                    return Some(file);
                }
            }
        }
        None
    }

    fn external_name(&self, import: &RawImport) -> String {
        let segments: Vec<&str> = import.specifier.split('/').collect();
        if segments[0].contains('.') && segments.len() > 3 {
            segments[..3].join("/")
        } else {
            import.specifier.clone()
        }
    }
}

/// First non-test Go file of a package directory
fn package_file(index: &FileIndex, dir: &str) -> Option<String> {
    index
        .files_in_dir(dir)
        .find(|path| path.ends_with(".go") && !path.ends_with("_test.go"))
        .map(str::to_string)
}
