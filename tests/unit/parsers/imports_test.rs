use cartographer::models::file_record::Language;
use cartographer::parsers::{extract_imports, extractor_for, ImportKind};

fn specifiers(language: Language, text: &str) -> Vec<(String, usize)> {
    extract_imports(language, text)
        .into_iter()
        .map(|import| (import.specifier, import.line))
        .collect()
}

#[test]
fn test_dispatch_by_language() {
    assert_eq!(
        specifiers(Language::TypeScript, "import { x } from './x';\nconst y = require('y');\n"),
        vec![("./x".to_string(), 1), ("y".to_string(), 2)]
    );
    assert_eq!(
        specifiers(Language::Python, "import os\nfrom .models import User\n"),
        vec![("os".to_string(), 1), (".models".to_string(), 2)]
    );
    assert_eq!(
        specifiers(Language::Go, "package main\n\nimport \"fmt\"\n"),
        vec![("fmt".to_string(), 3)]
    );
}

#[test]
fn test_non_code_languages_have_no_imports() {
    assert!(extractor_for(Language::Markdown).is_none());
    assert!(extract_imports(Language::Markdown, "import os\n").is_empty());
    assert!(extract_imports(Language::Other, "#include <stdio.h>\n").is_empty());
}

#[test]
fn test_require_and_dynamic_kinds() {
    let imports = extract_imports(
        Language::JavaScript,
        "const fs = require('fs');\nconst lazy = () => import('./lazy');\n",
    );
    let kinds: Vec<ImportKind> = imports.iter().map(|import| import.kind).collect();
    assert_eq!(kinds, vec![ImportKind::Require, ImportKind::Dynamic]);
}
