//! Declaration outlines for the codebase map
//!
//! A cheap regex pass per language picks out the module purpose line,
//! type declarations and top-level functions. Declarations are matched only
//! at the start of a line, which keeps nested items out.

use crate::models::analysis::Outline;
use crate::models::file_record::Language;
use regex::Regex;
use std::sync::OnceLock;

struct DeclPatterns {
    types: Vec<Regex>,
    functions: Vec<Regex>,
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect()
}

fn python() -> &'static DeclPatterns {
    static P: OnceLock<DeclPatterns> = OnceLock::new();
    P.get_or_init(|| DeclPatterns {
        types: compile(&[r"^class\s+(\w+)"]),
        functions: compile(&[r"^(?:async\s+)?def\s+(\w+)"]),
    })
}

fn rust() -> &'static DeclPatterns {
    static P: OnceLock<DeclPatterns> = OnceLock::new();
    P.get_or_init(|| DeclPatterns {
        types: compile(&[r"^(?:pub(?:\([^)]*\))?\s+)?(?:struct|enum|trait|union)\s+(\w+)"]),
        functions: compile(&[r"^(?:pub(?:\([^)]*\))?\s+)?(?:const\s+)?(?:async\s+)?(?:unsafe\s+)?fn\s+(\w+)"]),
    })
}

fn ecmascript() -> &'static DeclPatterns {
    static P: OnceLock<DeclPatterns> = OnceLock::new();
    P.get_or_init(|| DeclPatterns {
        types: compile(&[
            r"^(?:export\s+)?(?:default\s+)?(?:abstract\s+)?class\s+(\w+)",
            r"^(?:export\s+)?interface\s+(\w+)",
        ]),
        functions: compile(&[
            r"^(?:export\s+)?(?:default\s+)?(?:async\s+)?function\s*\*?\s*(\w+)",
            r"^(?:export\s+)?const\s+(\w+)\s*=\s*(?:async\s+)?(?:\([^)]*\)|\w+)\s*=>",
        ]),
    })
}

fn go() -> &'static DeclPatterns {
    static P: OnceLock<DeclPatterns> = OnceLock::new();
    P.get_or_init(|| DeclPatterns {
        types: compile(&[r"^type\s+(\w+)\s+(?:struct|interface)"]),
        functions: compile(&[r"^func\s+(?:\([^)]+\)\s+)?(\w+)"]),
    })
}

fn jvm() -> &'static DeclPatterns {
    static P: OnceLock<DeclPatterns> = OnceLock::new();
    P.get_or_init(|| DeclPatterns {
        types: compile(&[
            r"^(?:(?:public|private|protected|internal|abstract|final|sealed|open|data|static)\s+)*(?:class|interface|enum|object|trait|record)\s+(\w+)",
        ]),
        functions: compile(&[r"^(?:(?:public|private|internal)\s+)?fun\s+(\w+)"]),
    })
}

fn patterns_for(language: Language) -> Option<&'static DeclPatterns> {
    match language {
        Language::Python => Some(python()),
        Language::Rust => Some(rust()),
        Language::JavaScript | Language::TypeScript | Language::Vue | Language::Svelte => {
            Some(ecmascript())
        }
        Language::Go => Some(go()),
        Language::Java | Language::Kotlin | Language::Scala => Some(jvm()),
        _ => None,
    }
}

/// Outline a file's declarations; languages without patterns get an empty outline
pub fn outline(language: Language, text: &str) -> Outline {
    let Some(patterns) = patterns_for(language) else {
        return Outline::default();
    };

    let mut result = Outline {
        purpose: purpose(language, text),
        ..Default::default()
    };

    for line in text.lines() {
        if let Some(name) = first_capture(&patterns.types, line) {
            push_unique(&mut result.types, name);
        } else if let Some(name) = first_capture(&patterns.functions, line) {
            push_unique(&mut result.functions, name);
        }
    }

    result
}

fn first_capture<'a>(patterns: &[Regex], line: &'a str) -> Option<&'a str> {
    patterns
        .iter()
        .find_map(|re| re.captures(line).and_then(|caps| caps.get(1)))
        .map(|m| m.as_str())
}

fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|existing| existing == name) {
        names.push(name.to_string());
    }
}

/// First line of the module-level documentation
fn purpose(language: Language, text: &str) -> Option<String> {
    let line = match language {
        Language::Python => python_docstring(text),
        Language::Rust => text
            .lines()
            .map(str::trim)
            .find_map(|line| line.strip_prefix("//!"))
            .map(str::trim),
        Language::Go => text
            .lines()
            .map(str::trim)
            .find_map(|line| line.strip_prefix("// Package "))
            .map(str::trim),
        _ => block_doc_comment(text),
    }?;

    let line = line.trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}

/// Docstring opening the module, after any shebang or comment lines
fn python_docstring(text: &str) -> Option<&str> {
    let mut lines = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'));
    let first = lines.next()?;
    let quote = ["\"\"\"", "'''"].into_iter().find(|q| first.starts_with(q))?;
    let body = &first[quote.len()..];
    let body = body.split(quote).next().unwrap_or(body).trim();
    if body.is_empty() {
        lines.next().map(|line| line.trim_end_matches(quote))
    } else {
        Some(body)
    }
}

/// First text line of a leading `/** … */` comment
fn block_doc_comment(text: &str) -> Option<&str> {
    let mut lines = text.lines().map(str::trim).skip_while(|line| line.is_empty());
    let first = lines.next()?;
    let rest = first.strip_prefix("/**")?;
    let inline = rest.trim_end_matches("*/").trim();
    if !inline.is_empty() {
        return Some(inline);
    }
    lines
        .take_while(|line| !line.starts_with("*/"))
        .map(|line| line.trim_start_matches('*').trim().trim_end_matches("*/").trim())
        .find(|line| !line.is_empty() && !line.starts_with('@'))
}
