//! Python imports

use super::{numbered_lines, ImportExtractor, ImportKind, RawImport};
use crate::utils::path_resolver::{join, parent};
use crate::utils::FileIndex;
use regex::Regex;
use std::sync::OnceLock;

fn from_import() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^from\s+(\.*[\w.]*)\s+import\s+(.+)$").expect("valid regex"))
}

fn plain_import() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^import\s+(.+)$").expect("valid regex"))
}

/// Scanner for `import a.b` and `from .x import y` statements
#[derive(Debug, Default, Clone, Copy)]
pub struct PythonExtractor;

impl ImportExtractor for PythonExtractor {
    fn extract(&self, text: &str) -> Vec<RawImport> {
        let mut imports = Vec::new();

        for (line_no, line) in numbered_lines(text) {
            let trimmed = line.trim();
            if trimmed.starts_with('#') {
                continue;
            }

            if let Some(caps) = from_import().captures(trimmed) {
                let module = &caps[1];
                if module.chars().all(|c| c == '.') {
                    // `from . import a, b` imports sibling modules
                    for name in imported_names(&caps[2]) {
                        imports.push(RawImport::new(format!("{}{}", module, name), line_no, ImportKind::Static));
                    }
                } else {
                    imports.push(RawImport::new(module, line_no, ImportKind::Static));
                }
            } else if let Some(caps) = plain_import().captures(trimmed) {
                for name in imported_names(&caps[1]) {
                    imports.push(RawImport::new(name, line_no, ImportKind::Static));
                }
            }
        }

        imports
    }

    fn resolve(&self, import: &RawImport, importer: &str, index: &FileIndex) -> Option<String> {
        let specifier = import.specifier.as_str();
        let dots = specifier.chars().take_while(|c| *c == '.').count();
        let module_path = specifier[dots..].replace('.', "/");

        if dots > 0 {
            let mut base = parent(importer);
            for _ in 1..dots {
                if base.is_empty() {
                    return None;
                }
                base = parent(base);
            }
            return index.first_existing(module_candidates(base, &module_path));
        }

        let importer_dir = parent(importer);
        ["", importer_dir, "src"]
            .iter()
            .find_map(|root| index.first_existing(module_candidates(root, &module_path)))
    }

    fn external_name(&self, import: &RawImport) -> String {
        if import.specifier.starts_with('.') {
            return import.specifier.clone();
        }
        import
            .specifier
            .split('.')
            .next()
            .unwrap_or(&import.specifier)
            .to_string()
    }
}

/// Module names from an import list, aliases and parentheses dropped
fn imported_names(list: &str) -> Vec<&str> {
    let list = list.split('#').next().unwrap_or(list);
    list.split(',')
        .map(|part| part.trim().trim_matches(|c| c == '(' || c == ')' || c == '\\').trim())
        .filter_map(|part| part.split_whitespace().next())
        .filter(|name| *name != "*" && name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '.'))
        .collect()
}

fn module_candidates(base: &str, module_path: &str) -> Vec<String> {
    if module_path.is_empty() {
        return vec![join(base, "__init__.py")];
    }
    let module = join(base, module_path);
    vec![format!("{}.py", module), format!("{}/__init__.py", module)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_imports() {
        let text = "import os, sys as system\nfrom .models import User\nfrom . import views, urls\n# import hidden\nfrom pkg.sub import (a, b)\n";
        let specs: Vec<(String, usize)> = PythonExtractor
            .extract(text)
            .into_iter()
            .map(|i| (i.specifier, i.line))
            .collect();
        assert_eq!(
            specs,
            vec![
                ("os".to_string(), 1),
                ("sys".to_string(), 1),
                (".models".to_string(), 2),
                (".views".to_string(), 3),
                (".urls".to_string(), 3),
                ("pkg.sub".to_string(), 5),
            ]
        );
    }

    #[test]
    fn test_resolves_relative_and_absolute() {
        let index = FileIndex::new([
            "app/__init__.py",
            "app/models.py",
            "app/views/__init__.py",
            "app/views/list.py",
            "src/lib/core.py",
        ]);
        let import = |spec: &str| RawImport::new(spec, 1, ImportKind::Static);

        assert_eq!(
            PythonExtractor.resolve(&import(".models"), "app/views/__init__.py", &index),
            None
        );
        assert_eq!(
            PythonExtractor.resolve(&import("..models"), "app/views/list.py", &index).as_deref(),
            Some("app/models.py")
        );
        assert_eq!(
            PythonExtractor.resolve(&import("app.views"), "main.py", &index).as_deref(),
            Some("app/views/__init__.py")
        );
        assert_eq!(
            PythonExtractor.resolve(&import("lib.core"), "main.py", &index).as_deref(),
            Some("src/lib/core.py")
        );
        assert_eq!(PythonExtractor.resolve(&import("requests"), "main.py", &index), None);
    }

    #[test]
    fn test_external_name_is_top_package() {
        let import = RawImport::new("django.db.models", 1, ImportKind::Static);
        assert_eq!(PythonExtractor.external_name(&import), "django");
    }
}
