//! JavaScript, TypeScript, Vue and Svelte imports

use super::{numbered_lines, ImportExtractor, ImportKind, RawImport};
use crate::utils::path_resolver::{join, normalize, parent};
use crate::utils::FileIndex;
use regex::Regex;
use std::sync::OnceLock;

/// Extensions tried, in order, when a specifier omits one
const EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs", "vue", "svelte", "json"];
const INDEX_NAMES: &[&str] = &["index"];

struct Patterns {
    from: Regex,
    side_effect: Regex,
    require: Regex,
    dynamic: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        from: Regex::new(r#"(?:^|[\s}*])from\s*['"]([^'"]+)['"]"#).expect("valid regex"),
        side_effect: Regex::new(r#"^import\s*['"]([^'"]+)['"]"#).expect("valid regex"),
        require: Regex::new(r#"\brequire\(\s*['"]([^'"]+)['"]\s*\)"#).expect("valid regex"),
        dynamic: Regex::new(r#"\bimport\(\s*['"]([^'"]+)['"]\s*\)"#).expect("valid regex"),
    })
}

/// Statement-level scanner for ECMAScript module syntax and CommonJS
#[derive(Debug, Default, Clone, Copy)]
pub struct EcmaScriptExtractor;

impl ImportExtractor for EcmaScriptExtractor {
    fn extract(&self, text: &str) -> Vec<RawImport> {
        let patterns = patterns();
        let mut imports = Vec::new();

        for (line_no, line) in numbered_lines(text) {
            let trimmed = line.trim_start();
            if trimmed.starts_with("//") || trimmed.starts_with('*') {
                continue;
            }

            let statement = trimmed.starts_with("import")
                || trimmed.starts_with("export")
                || trimmed.starts_with('}');
            if statement {
                if let Some(caps) = patterns.side_effect.captures(trimmed) {
                    imports.push(RawImport::new(&caps[1], line_no, ImportKind::Static));
                } else if let Some(caps) = patterns.from.captures(trimmed) {
                    imports.push(RawImport::new(&caps[1], line_no, ImportKind::Static));
                }
            }

            for caps in patterns.require.captures_iter(trimmed) {
                imports.push(RawImport::new(&caps[1], line_no, ImportKind::Require));
            }
            for caps in patterns.dynamic.captures_iter(trimmed) {
                imports.push(RawImport::new(&caps[1], line_no, ImportKind::Dynamic));
            }
        }

        imports
    }

    fn resolve(&self, import: &RawImport, importer: &str, index: &FileIndex) -> Option<String> {
        let specifier = strip_query(&import.specifier);

        if specifier.starts_with('.') {
            let base = normalize(&join(parent(importer), specifier))?;
            return index.resolve_with_extensions(&base, EXTENSIONS, INDEX_NAMES);
        }
        if let Some(rooted) = specifier.strip_prefix('/') {
            let base = normalize(rooted)?;
            return index.resolve_with_extensions(&base, EXTENSIONS, INDEX_NAMES);
        }

        index.tsconfig().and_then(|tsconfig| {
            tsconfig
                .alias_candidates(specifier)
                .iter()
                .find_map(|base| index.resolve_with_extensions(base, EXTENSIONS, INDEX_NAMES))
        })
    }

    fn external_name(&self, import: &RawImport) -> String {
        let specifier = strip_query(&import.specifier);
        if specifier.starts_with('.') || specifier.starts_with('/') {
            return specifier.to_string();
        }
        split_package_specifier(specifier).0.to_string()
    }
}

/// Drop bundler query suffixes such as `?raw`
fn strip_query(specifier: &str) -> &str {
    specifier.split(['?', '#']).next().unwrap_or(specifier)
}

/// Split a bare specifier into package name and subpath, scoped names included
pub fn split_package_specifier(specifier: &str) -> (&str, Option<&str>) {
    let mut slashes = specifier.match_indices('/').map(|(idx, _)| idx);
    let split_at = if specifier.starts_with('@') {
        slashes.nth(1)
    } else {
        slashes.next()
    };

    match split_at {
        Some(idx) => (&specifier[..idx], Some(&specifier[idx + 1..])),
        None => (specifier, None),
    }
}
