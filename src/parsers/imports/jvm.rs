//! Java, Kotlin and Scala imports

use super::{numbered_lines, ImportExtractor, ImportKind, RawImport};
use crate::utils::FileIndex;
use regex::Regex;
use std::sync::OnceLock;

const SOURCE_EXTENSIONS: &[&str] = &["java", "kt", "scala"];

fn import_decl() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^import\s+(?:static\s+)?([A-Za-z_]\w*(?:\.\w+)*(?:\.\*)?)").expect("valid regex")
    })
}

/// Scanner for fully qualified `import a.b.C` declarations
#[derive(Debug, Default, Clone, Copy)]
pub struct JvmExtractor;

impl ImportExtractor for JvmExtractor {
    fn extract(&self, text: &str) -> Vec<RawImport> {
        numbered_lines(text)
            .filter_map(|(line_no, line)| {
                let caps = import_decl().captures(line.trim_start())?;
                Some(RawImport::new(&caps[1], line_no, ImportKind::Static))
            })
            .collect()
    }

    fn resolve(&self, import: &RawImport, _importer: &str, index: &FileIndex) -> Option<String> {
        let specifier = import.specifier.as_str();

        // Wildcard imports name a package directory
        if let Some(package) = specifier
            .strip_suffix(".*")
            .or_else(|| specifier.strip_suffix("._"))
        {
            let dir = index.find_dir_suffix(&package.replace('.', "/"))?;
            return index
                .files_in_dir(dir)
                .find(|path| has_source_extension(path))
                .map(str::to_string);
        }

        // `a.b.C` and, for static or nested imports, `a.b` owning the member
        let segments: Vec<&str> = specifier.split('.').collect();
        for len in (1..=segments.len()).rev().take(2) {
            let base = segments[..len].join("/");
            for ext in SOURCE_EXTENSIONS {
                if let Some(found) = index.find_suffix(&format!("{}.{}", base, ext)) {
                    return Some(found.to_string());
                }
            }
        }
        None
    }

    fn external_name(&self, import: &RawImport) -> String {
        let segments: Vec<&str> = import.specifier.split('.').collect();
        if segments.len() > 2 {
            segments[..2].join(".")
        } else {
            import.specifier.clone()
        }
    }
}

fn has_source_extension(path: &str) -> bool {
    SOURCE_EXTENSIONS
        .iter()
        .any(|ext| path.rsplit('.').next() == Some(*ext))
}
