//! C, C++ and Objective-C include directives

use super::{numbered_lines, ImportExtractor, ImportKind, RawImport};
use crate::utils::path_resolver::{join, normalize, parent};
use crate::utils::FileIndex;
use regex::Regex;
use std::sync::OnceLock;

fn include_directive() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^#\s*(?:include|import)\s*([<"])([^>"]+)[>"]"#).expect("valid regex")
    })
}

/// Scanner for `#include "local.h"` and `#include <system.h>`
#[derive(Debug, Default, Clone, Copy)]
pub struct IncludeExtractor;

impl ImportExtractor for IncludeExtractor {
    fn extract(&self, text: &str) -> Vec<RawImport> {
        numbered_lines(text)
            .filter_map(|(line_no, line)| {
                let caps = include_directive().captures(line.trim_start())?;
                let kind = if &caps[1] == "<" {
                    ImportKind::SystemInclude
                } else {
                    ImportKind::LocalInclude
                };
                Some(RawImport::new(&caps[2], line_no, kind))
            })
            .collect()
    }

    fn resolve(&self, import: &RawImport, importer: &str, index: &FileIndex) -> Option<String> {
        if import.kind == ImportKind::SystemInclude {
            return None;
        }
        let specifier = import.specifier.as_str();

        let candidates = [join(parent(importer), specifier), specifier.to_string()];
        candidates
            .iter()
            .filter_map(|candidate| normalize(candidate))
            .find(|candidate| index.contains(candidate))
            .or_else(|| {
                let suffix = normalize(specifier)?;
                index.find_suffix(&suffix).map(str::to_string)
            })
    }

    fn external_name(&self, import: &RawImport) -> String {
        import.specifier.clone()
    }
}
