//! Rust module declarations and `use` paths

use super::{numbered_lines, ImportExtractor, ImportKind, RawImport};
use crate::utils::path_resolver::{join, parent};
use crate::utils::FileIndex;
use regex::Regex;
use std::sync::OnceLock;

const CRATE_ROOTS: &[&str] = &["lib.rs", "main.rs"];

fn mod_decl() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:pub(?:\([^)]*\))?\s+)?mod\s+([A-Za-z_]\w*)\s*;").expect("valid regex")
    })
}

fn use_decl() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:pub(?:\([^)]*\))?\s+)?use\s+(?:::)?([A-Za-z_][\w:]*)").expect("valid regex")
    })
}

fn extern_crate() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^extern\s+crate\s+([A-Za-z_]\w*)").expect("valid regex"))
}

/// Scanner for `mod x;`, `use …` and `extern crate …`
#[derive(Debug, Default, Clone, Copy)]
pub struct RustExtractor;

impl ImportExtractor for RustExtractor {
    fn extract(&self, text: &str) -> Vec<RawImport> {
        let mut imports = Vec::new();

        for (line_no, line) in numbered_lines(text) {
            let trimmed = line.trim_start();
            if trimmed.starts_with("//") {
                continue;
            }

            if let Some(caps) = mod_decl().captures(trimmed) {
                imports.push(RawImport::new(&caps[1], line_no, ImportKind::Module));
            } else if let Some(caps) = use_decl().captures(trimmed) {
                let path = caps[1].trim_end_matches(':');
                imports.push(RawImport::new(path, line_no, ImportKind::Static));
            } else if let Some(caps) = extern_crate().captures(trimmed) {
                imports.push(RawImport::new(&caps[1], line_no, ImportKind::Static));
            }
        }

        imports
    }

    fn resolve(&self, import: &RawImport, importer: &str, index: &FileIndex) -> Option<String> {
        if import.kind == ImportKind::Module {
            let dir = module_dir(importer);
            return index.first_existing(module_files(&dir, &import.specifier));
        }

        let mut segments = import.specifier.split("::").peekable();
        let mut base = match segments.next()? {
            "crate" => crate_root_dir(importer, index)?,
            "self" => module_dir(importer),
            "super" => parent(&module_dir(importer)).to_string(),
            _ => return None,
        };
        while segments.peek() == Some(&"super") {
            segments.next();
            base = parent(&base).to_string();
        }

        // Longest module prefix that exists wins; trailing segments are items
        let rest: Vec<&str> = segments.collect();
        for len in (1..=rest.len()).rev() {
            let module = rest[..len].join("/");
            if let Some(found) = index.first_existing(module_files(&base, &module)) {
                return Some(found);
            }
        }

        directory_module_file(&base, importer, index)
    }

    fn external_name(&self, import: &RawImport) -> String {
        import
            .specifier
            .split("::")
            .next()
            .unwrap_or(&import.specifier)
            .to_string()
    }
}

/// Directory holding the submodules declared by `file`
fn module_dir(file: &str) -> String {
    let dir = parent(file);
    let name = file.rsplit('/').next().unwrap_or(file);
    match name {
        "mod.rs" | "lib.rs" | "main.rs" => dir.to_string(),
        _ => join(dir, name.trim_end_matches(".rs")),
    }
}

fn module_files(dir: &str, module: &str) -> [String; 2] {
    let base = join(dir, module);
    [format!("{}.rs", base), format!("{}/mod.rs", base)]
}

/// Nearest ancestor directory of the importer holding `lib.rs` or `main.rs`
fn crate_root_dir(importer: &str, index: &FileIndex) -> Option<String> {
    let mut dir = parent(importer);
    loop {
        if CRATE_ROOTS.iter().any(|root| index.contains(&join(dir, root))) {
            return Some(dir.to_string());
        }
        if dir.is_empty() {
            return None;
        }
        dir = parent(dir);
    }
}

/// File that declares the items of the module living in `dir`
fn directory_module_file(dir: &str, importer: &str, index: &FileIndex) -> Option<String> {
    let mut candidates: Vec<String> = CRATE_ROOTS.iter().map(|root| join(dir, root)).collect();
    candidates.push(join(dir, "mod.rs"));
    if !dir.is_empty() {
        candidates.push(format!("{}.rs", dir));
    }
    index
        .first_existing(candidates)
        .or_else(|| index.contains(importer).then(|| importer.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> FileIndex {
        FileIndex::new([
            "src/lib.rs",
            "src/models/mod.rs",
            "src/models/config.rs",
            "src/parsers.rs",
            "src/parsers/outline.rs",
        ])
    }

    #[test]
    fn test_extracts_mod_and_use() {
        let text = "pub mod models;\nmod parsers;\nuse std::fmt;\nuse crate::models::{config, Settings};\npub(crate) use super::x;\n// use crate::hidden;\nextern crate serde;\n";
        let specs: Vec<(String, usize, ImportKind)> = RustExtractor
            .extract(text)
            .into_iter()
            .map(|i| (i.specifier, i.line, i.kind))
            .collect();
        assert_eq!(
            specs,
            vec![
                ("models".to_string(), 1, ImportKind::Module),
                ("parsers".to_string(), 2, ImportKind::Module),
                ("std::fmt".to_string(), 3, ImportKind::Static),
                ("crate::models".to_string(), 4, ImportKind::Static),
                ("super::x".to_string(), 5, ImportKind::Static),
                ("serde".to_string(), 7, ImportKind::Static),
            ]
        );
    }

    #[test]
    fn test_resolves_mod_declarations() {
        let index = index();
        let module = |name: &str| RawImport::new(name, 1, ImportKind::Module);
        assert_eq!(
            RustExtractor.resolve(&module("models"), "src/lib.rs", &index).as_deref(),
            Some("src/models/mod.rs")
        );
        assert_eq!(
            RustExtractor.resolve(&module("config"), "src/models/mod.rs", &index).as_deref(),
            Some("src/models/config.rs")
        );
        assert_eq!(
            RustExtractor.resolve(&module("outline"), "src/parsers.rs", &index).as_deref(),
            Some("src/parsers/outline.rs")
        );
    }

    #[test]
    fn test_resolves_use_paths() {
        let index = index();
        let path = |spec: &str| RawImport::new(spec, 1, ImportKind::Static);
        assert_eq!(
            RustExtractor
                .resolve(&path("crate::models::config::Settings"), "src/parsers/outline.rs", &index)
                .as_deref(),
            Some("src/models/config.rs")
        );
        assert_eq!(
            RustExtractor.resolve(&path("super::config"), "src/models/mod.rs", &index).as_deref(),
            Some("src/lib.rs")
        );
        assert_eq!(
            RustExtractor.resolve(&path("crate::Error"), "src/models/config.rs", &index).as_deref(),
            Some("src/lib.rs")
        );
        assert_eq!(RustExtractor.resolve(&path("serde::Serialize"), "src/lib.rs", &index), None);
        assert_eq!(RustExtractor.external_name(&path("serde::Serialize")), "serde");
    }
}
