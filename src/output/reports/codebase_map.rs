//! CODEBASE_MAP.md

use super::markdown::{code, number, plural, table, NO_FILES_FOUND};
use super::{ReportKind, ReportRenderer};
use crate::models::analysis::{Analysis, Outline};
use crate::models::file_record::FileRecord;
use crate::models::metrics::format_percentage;
use std::collections::BTreeMap;

/// Directory levels drawn in the structure tree
const TREE_DEPTH: usize = 3;
/// Directories deeper than this show a file count instead of file names
const TREE_FILE_DEPTH: usize = 2;
/// Directories with more direct files than this show a count instead
const TREE_FILES_PER_DIR: usize = 12;
/// Files described per directory under Key Modules
const KEY_MODULES_PER_DIR: usize = 5;
/// Declarations listed per file
const DECLS_PER_FILE: usize = 8;

const ENTRY_POINT_NAMES: &[&str] = &[
    "main.rs",
    "lib.rs",
    "main.py",
    "__main__.py",
    "app.py",
    "manage.py",
    "wsgi.py",
    "main.go",
    "index.js",
    "index.ts",
    "main.js",
    "main.ts",
    "server.js",
    "server.ts",
    "app.js",
    "app.ts",
    "Main.java",
    "Application.java",
    "Main.kt",
    "main.c",
    "main.cpp",
    "Program.cs",
];

const MANIFEST_NAMES: &[&str] = &[
    "Cargo.toml",
    "package.json",
    "pyproject.toml",
    "setup.py",
    "requirements.txt",
    "go.mod",
    "pom.xml",
    "build.gradle",
    "build.gradle.kts",
    "CMakeLists.txt",
    "Makefile",
    "Dockerfile",
    "tsconfig.json",
];

/// Renderer for the codebase overview
pub struct CodebaseMapReport;

impl ReportRenderer for CodebaseMapReport {
    fn kind(&self) -> ReportKind {
        ReportKind::CodebaseMap
    }

    fn render(&self, analysis: &Analysis) -> String {
        let mut output = format!("# Codebase Map: {}\n\n", analysis.project.name);

        if analysis.is_empty() {
            output.push_str(&format!(
                "Root directory: {}\n\n",
                code(&analysis.project.root_name)
            ));
            output.push_str(NO_FILES_FOUND);
            return output;
        }

        output.push_str(&overview(analysis));
        output.push('\n');
        output.push_str(&architecture(analysis));
        output.push('\n');
        output.push_str(&directory_structure(analysis));
        output.push('\n');
        output.push_str(&key_modules(analysis));
        output.push('\n');
        output.push_str(&navigation_guide(analysis));
        output
    }
}

fn overview(analysis: &Analysis) -> String {
    let metrics = &analysis.metrics;
    let mut output = String::from("## Overview\n\n");
    if let Some(description) = &analysis.project.description {
        output.push_str(&format!("{}\n\n", description));
    }

    let mut rows = vec![
        vec!["Root directory".to_string(), code(&analysis.project.root_name)],
        vec!["Files".to_string(), number(metrics.total.files as u64)],
        vec!["Lines".to_string(), number(metrics.total.lines as u64)],
        vec!["Languages".to_string(), metrics.by_language.len().to_string()],
    ];
    if let Some((language, _)) = primary_code_language(analysis) {
        rows.push(vec![
            "Primary language".to_string(),
            format!(
                "{} ({})",
                language,
                format_percentage(metrics.language_share(language))
            ),
        ]);
    }
    output.push_str(&table(&["Property", "Value"], &rows));
    output
}

fn primary_code_language(analysis: &Analysis) -> Option<(&str, usize)> {
    let mut lines_by_language: BTreeMap<&str, usize> = BTreeMap::new();
    for file in analysis.files.iter().filter(|f| f.language.is_code()) {
        *lines_by_language.entry(file.language.tag()).or_insert(0) += file.lines;
    }
    lines_by_language
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
}

fn architecture(analysis: &Analysis) -> String {
    let mut output = String::from("## Architecture\n\n### Top-level Directories\n\n");

    let mut rows = Vec::new();
    for (dir, stats) in &analysis.metrics.by_directory {
        let files: Vec<&FileRecord> = analysis
            .files
            .iter()
            .filter(|f| f.top_level_dir() == dir)
            .collect();
        let display = if dir == "." {
            "(root)".to_string()
        } else {
            code(&format!("{}/", dir))
        };
        rows.push(vec![
            display,
            directory_role(dir).to_string(),
            stats.files.to_string(),
            dominant_language(&files).unwrap_or("-").to_string(),
        ]);
    }
    output.push_str(&table(&["Directory", "Role", "Files", "Main language"], &rows));

    output.push_str("\n### Entry Points\n\n");
    let entries = entry_points(analysis);
    if entries.is_empty() {
        output.push_str("No conventional entry points detected.\n");
    } else {
        for file in entries {
            output.push_str(&format!("- {} ({})\n", code(&file.path), file.language));
        }
    }
    output
}

/// Role guessed from a conventional directory name
fn directory_role(dir: &str) -> &'static str {
    match dir.to_ascii_lowercase().as_str() {
        "." => "Root files",
        "src" | "lib" | "pkg" | "internal" | "app" | "source" => "Source code",
        "cmd" | "bin" => "Executables",
        "test" | "tests" | "spec" | "specs" | "__tests__" | "testing" => "Tests",
        "doc" | "docs" | "documentation" => "Documentation",
        "script" | "scripts" | "tools" | "tooling" | "hack" => "Scripts and tooling",
        "config" | "configs" | "conf" | "settings" => "Configuration",
        ".github" | ".gitlab" | ".circleci" | "ci" => "CI configuration",
        "examples" | "example" | "samples" | "demo" | "demos" => "Examples",
        "assets" | "static" | "public" | "resources" | "images" | "img" => "Static assets",
        "migrations" | "db" | "sql" => "Database",
        "vendor" | "third_party" | "external" => "Vendored code",
        "benches" | "bench" | "benchmarks" => "Benchmarks",
        "include" => "Headers",
        _ => "Module",
    }
}

/// Language with the most lines among `files`, ties broken by name
fn dominant_language(files: &[&FileRecord]) -> Option<&'static str> {
    let mut lines_by_language: BTreeMap<&'static str, usize> = BTreeMap::new();
    for file in files {
        *lines_by_language.entry(file.language.tag()).or_insert(0) += file.lines.max(1);
    }
    lines_by_language
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(language, _)| language)
}

fn entry_points(analysis: &Analysis) -> Vec<&FileRecord> {
    analysis
        .files
        .iter()
        .filter(|f| ENTRY_POINT_NAMES.contains(&f.file_name()))
        .filter(|f| f.path.split('/').count() <= 3)
        .collect()
}

/// Directory node of the structure tree
#[derive(Default)]
struct TreeNode<'a> {
    dirs: BTreeMap<&'a str, TreeNode<'a>>,
    files: Vec<&'a str>,
    total: usize,
}

impl<'a> TreeNode<'a> {
    fn insert(&mut self, path: &'a str) {
        self.total += 1;
        match path.split_once('/') {
            Some((dir, rest)) => self.dirs.entry(dir).or_default().insert(rest),
            None => self.files.push(path),
        }
    }

    fn render(&self, prefix: &str, depth: usize, output: &mut String) {
        let mut entries: Vec<(String, Option<&TreeNode<'a>>)> = self
            .dirs
            .iter()
            .map(|(name, node)| (format!("{}/ ({})", name, plural(node.total, "file")), Some(node)))
            .collect();

        if depth <= TREE_FILE_DEPTH && self.files.len() <= TREE_FILES_PER_DIR {
            entries.extend(self.files.iter().map(|name| (name.to_string(), None)));
        } else if !self.files.is_empty() {
            entries.push((format!("... {}", plural(self.files.len(), "file")), None));
        }

        let count = entries.len();
        for (i, (label, node)) in entries.into_iter().enumerate() {
            let last = i + 1 == count;
            output.push_str(&format!("{}{}{}\n", prefix, if last { "└── " } else { "├── " }, label));
            if let Some(node) = node {
                if depth < TREE_DEPTH {
                    let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
                    node.render(&child_prefix, depth + 1, output);
                }
            }
        }
    }
}

fn directory_structure(analysis: &Analysis) -> String {
    let mut root = TreeNode::default();
    for file in &analysis.files {
        root.insert(&file.path);
    }

    let mut output = String::from("## Directory Structure\n\n```text\n");
    output.push_str(&format!("{}/\n", analysis.project.root_name));
    root.render("", 1, &mut output);
    output.push_str("```\n");
    output
}

fn key_modules(analysis: &Analysis) -> String {
    let mut output = String::from("## Key Modules\n\n");

    let mut by_dir: BTreeMap<&str, Vec<&FileRecord>> = BTreeMap::new();
    for file in analysis.files.iter().filter(|f| f.language.is_code()) {
        by_dir.entry(file.top_level_dir()).or_default().push(file);
    }

    if by_dir.is_empty() {
        output.push_str("No source modules detected.\n");
        return output;
    }

    for (dir, mut files) in by_dir {
        // Documented files first, then the most imported, then the largest
        files.sort_by(|a, b| {
            let a_outline = analysis.outlines.contains_key(&a.path);
            let b_outline = analysis.outlines.contains_key(&b.path);
            b_outline
                .cmp(&a_outline)
                .then_with(|| analysis.graph.fan_in(&b.path).cmp(&analysis.graph.fan_in(&a.path)))
                .then_with(|| b.lines.cmp(&a.lines))
                .then_with(|| a.path.cmp(&b.path))
        });

        let heading = if dir == "." { "(root)".to_string() } else { code(&format!("{}/", dir)) };
        output.push_str(&format!("### {}\n\n", heading));

        for file in files.iter().take(KEY_MODULES_PER_DIR) {
            output.push_str(&describe_module(analysis, file));
        }
        if files.len() > KEY_MODULES_PER_DIR {
            output.push_str(&format!(
                "- ... and {} more\n",
                plural(files.len() - KEY_MODULES_PER_DIR, "source file")
            ));
        }
        output.push('\n');
    }

    output
}

fn describe_module(analysis: &Analysis, file: &FileRecord) -> String {
    let mut line = format!("- **{}** ({}, {})", code(&file.path), file.language, plural(file.lines, "line"));
    let fan_in = analysis.graph.fan_in(&file.path);
    if fan_in > 0 {
        line.push_str(&format!(", imported by {}", plural(fan_in, "file")));
    }

    let Some(outline) = analysis.outlines.get(&file.path) else {
        line.push('\n');
        return line;
    };
    if let Some(purpose) = &outline.purpose {
        line.push_str(&format!(": {}", purpose));
    }
    line.push('\n');
    line.push_str(&declarations(outline));
    line
}

fn declarations(outline: &Outline) -> String {
    let mut output = String::new();
    for (label, names) in [("Types", &outline.types), ("Functions", &outline.functions)] {
        if names.is_empty() {
            continue;
        }
        let mut listed: Vec<String> = names.iter().take(DECLS_PER_FILE).map(|n| code(n)).collect();
        if names.len() > DECLS_PER_FILE {
            listed.push(format!("+{} more", names.len() - DECLS_PER_FILE));
        }
        output.push_str(&format!("  - {}: {}\n", label, listed.join(", ")));
    }
    output
}

fn navigation_guide(analysis: &Analysis) -> String {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let dirs_with_role = |role: &str| -> Vec<String> {
        analysis
            .metrics
            .by_directory
            .keys()
            .filter(|dir| dir.as_str() != "." && directory_role(dir) == role)
            .map(|dir| code(&format!("{}/", dir)))
            .collect()
    };

    let entries: Vec<String> = entry_points(analysis).iter().map(|f| code(&f.path)).collect();
    if !entries.is_empty() {
        rows.push(vec!["Entry points".to_string(), entries.join(", ")]);
    }
    for (label, role) in [
        ("Source code", "Source code"),
        ("Tests", "Tests"),
        ("Documentation", "Documentation"),
        ("Scripts", "Scripts and tooling"),
        ("CI configuration", "CI configuration"),
        ("Examples", "Examples"),
    ] {
        let dirs = dirs_with_role(role);
        if !dirs.is_empty() {
            rows.push(vec![label.to_string(), dirs.join(", ")]);
        }
    }

    let manifests: Vec<String> = analysis
        .files
        .iter()
        .filter(|f| !f.path.contains('/') && MANIFEST_NAMES.contains(&f.path.as_str()))
        .map(|f| code(&f.path))
        .collect();
    if !manifests.is_empty() {
        rows.push(vec!["Build and dependencies".to_string(), manifests.join(", ")]);
    }

    rows.push(vec!["Import graph".to_string(), code(ReportKind::DependencyGraph.file_name())]);
    rows.push(vec!["Security findings".to_string(), code(ReportKind::SecurityScan.file_name())]);
    rows.push(vec!["Open tasks".to_string(), code(ReportKind::TodoIndex.file_name())]);
    rows.push(vec!["Size metrics".to_string(), code(ReportKind::Metrics.file_name())]);

    let mut output = String::from("## Navigation Guide\n\n");
    output.push_str(&table(&["Looking for", "Location"], &rows));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metrics::MetricsAggregator;
    use crate::models::analysis::ProjectInfo;
    use crate::models::file_record::Language;

    fn record(path: &str, language: Language, lines: usize) -> FileRecord {
        FileRecord {
            path: path.to_string(),
            language,
            lines,
            bytes: lines as u64 * 20,
            binary: false,
        }
    }

    fn sample() -> Analysis {
        let files = vec![
            record("Cargo.toml", Language::Toml, 10),
            record("src/lib.rs", Language::Rust, 120),
            record("src/main.rs", Language::Rust, 40),
            record("tests/smoke.rs", Language::Rust, 15),
        ];
        let mut outlines = BTreeMap::new();
        outlines.insert(
            "src/lib.rs".to_string(),
            Outline {
                purpose: Some("Library root".to_string()),
                types: vec!["Config".to_string()],
                functions: vec!["run".to_string()],
            },
        );
        Analysis {
            project: ProjectInfo::new("demo", None),
            metrics: MetricsAggregator::aggregate(&files),
            files,
            outlines,
            ..Default::default()
        }
    }

    #[test]
    fn test_sections_present() {
        let rendered = CodebaseMapReport.render(&sample());
        for section in [
            "## Overview",
            "## Architecture",
            "## Directory Structure",
            "## Key Modules",
            "## Navigation Guide",
        ] {
            assert!(rendered.contains(section), "missing {}", section);
        }
        assert!(rendered.contains("| Primary language | Rust"));
        assert!(rendered.contains("- **`src/lib.rs`** (Rust, 120 lines): Library root"));
        assert!(rendered.contains("  - Types: `Config`"));
    }

    #[test]
    fn test_navigation_only_lists_existing_locations() {
        let rendered = CodebaseMapReport.render(&sample());
        assert!(rendered.contains("| Tests | `tests/` |"));
        assert!(rendered.contains("| Build and dependencies | `Cargo.toml` |"));
        assert!(!rendered.contains("| Documentation |"));
        assert!(!rendered.contains("| Examples |"));
    }

    #[test]
    fn test_tree() {
        let rendered = CodebaseMapReport.render(&sample());
        assert!(rendered.contains("demo/\n├── src/ (2 files)\n│   ├── lib.rs\n│   └── main.rs\n"));
        assert!(rendered.contains("└── Cargo.toml\n"));
    }
}
