//! Per-file records and language classification

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Source language of a file, classified from its name and first line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Language {
    C,
    Cpp,
    CSharp,
    Css,
    Dockerfile,
    Go,
    GraphQl,
    Html,
    Java,
    JavaScript,
    Json,
    Kotlin,
    Lua,
    Makefile,
    Markdown,
    ObjectiveC,
    Perl,
    Php,
    PowerShell,
    Python,
    R,
    Ruby,
    Rust,
    Scala,
    Scss,
    Shell,
    Sql,
    Svelte,
    Swift,
    Toml,
    TypeScript,
    Vue,
    Xml,
    Yaml,
    /// Anything not recognised; counted under "Other" in metrics
    Other,
}

impl Language {
    /// Classify a file. Total: unknown files map to `Language::Other`.
    ///
    /// `first_line` is consulted for a shebang only when the name alone
    /// does not identify the language.
    pub fn classify(path: &Path, first_line: Option<&str>) -> Self {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();

        if let Some(language) = Self::from_file_name(file_name) {
            return language;
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        if let Some(language) = extension.as_deref().and_then(Self::from_extension) {
            return language;
        }

        first_line
            .and_then(Self::from_shebang)
            .unwrap_or(Language::Other)
    }

    fn from_file_name(name: &str) -> Option<Self> {
        let language = match name {
            "Dockerfile" | "Containerfile" => Language::Dockerfile,
            "Makefile" | "makefile" | "GNUmakefile" => Language::Makefile,
            "CMakeLists.txt" => Language::Makefile,
            "Gemfile" | "Rakefile" => Language::Ruby,
            "Cargo.lock" | "Pipfile" => Language::Toml,
            _ if name.starts_with("Dockerfile.") => Language::Dockerfile,
            _ => return None,
        };
        Some(language)
    }

    fn from_extension(ext: &str) -> Option<Self> {
        let language = match ext {
            "py" | "pyw" | "pyi" => Language::Python,
            "js" | "jsx" | "mjs" | "cjs" => Language::JavaScript,
            "ts" | "tsx" | "mts" | "cts" => Language::TypeScript,
            "vue" => Language::Vue,
            "svelte" => Language::Svelte,
            "rs" => Language::Rust,
            "go" => Language::Go,
            "java" => Language::Java,
            "kt" | "kts" => Language::Kotlin,
            "scala" | "sc" => Language::Scala,
            "c" | "h" => Language::C,
            "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => Language::Cpp,
            "m" | "mm" => Language::ObjectiveC,
            "cs" => Language::CSharp,
            "rb" => Language::Ruby,
            "php" => Language::Php,
            "swift" => Language::Swift,
            "r" => Language::R,
            "lua" => Language::Lua,
            "pl" | "pm" => Language::Perl,
            "sh" | "bash" | "zsh" => Language::Shell,
            "ps1" | "psm1" => Language::PowerShell,
            "html" | "htm" => Language::Html,
            "css" | "less" => Language::Css,
            "scss" | "sass" => Language::Scss,
            "json" => Language::Json,
            "yaml" | "yml" => Language::Yaml,
            "toml" => Language::Toml,
            "xml" => Language::Xml,
            "md" | "markdown" | "rst" => Language::Markdown,
            "sql" => Language::Sql,
            "graphql" | "gql" => Language::GraphQl,
            "dockerfile" => Language::Dockerfile,
            _ => return None,
        };
        Some(language)
    }

    fn from_shebang(line: &str) -> Option<Self> {
        let interpreter_line = line.strip_prefix("#!")?;
        let mut parts = interpreter_line.split_whitespace();
        let program = parts.next()?;
        let program = if program.ends_with("/env") {
            parts.find(|arg| !arg.starts_with('-'))?
        } else {
            program
        };
        let name = program.rsplit('/').next().unwrap_or(program);

        let language = if name.starts_with("python") {
            Language::Python
        } else if name == "node" || name == "deno" || name == "bun" {
            Language::JavaScript
        } else if matches!(name, "sh" | "bash" | "zsh" | "dash" | "ksh") {
            Language::Shell
        } else if name.starts_with("ruby") {
            Language::Ruby
        } else if name.starts_with("perl") {
            Language::Perl
        } else if name.starts_with("php") {
            Language::Php
        } else {
            return None;
        };
        Some(language)
    }

    /// Display name used in reports
    pub fn tag(&self) -> &'static str {
        match self {
            Language::C => "C",
            Language::Cpp => "C++",
            Language::CSharp => "C#",
            Language::Css => "CSS",
            Language::Dockerfile => "Dockerfile",
            Language::Go => "Go",
            Language::GraphQl => "GraphQL",
            Language::Html => "HTML",
            Language::Java => "Java",
            Language::JavaScript => "JavaScript",
            Language::Json => "JSON",
            Language::Kotlin => "Kotlin",
            Language::Lua => "Lua",
            Language::Makefile => "Makefile",
            Language::Markdown => "Markdown",
            Language::ObjectiveC => "Objective-C",
            Language::Perl => "Perl",
            Language::Php => "PHP",
            Language::PowerShell => "PowerShell",
            Language::Python => "Python",
            Language::R => "R",
            Language::Ruby => "Ruby",
            Language::Rust => "Rust",
            Language::Scala => "Scala",
            Language::Scss => "SCSS",
            Language::Shell => "Shell",
            Language::Sql => "SQL",
            Language::Svelte => "Svelte",
            Language::Swift => "Swift",
            Language::Toml => "TOML",
            Language::TypeScript => "TypeScript",
            Language::Vue => "Vue",
            Language::Xml => "XML",
            Language::Yaml => "YAML",
            Language::Other => "Other",
        }
    }

    /// Whether files of this language are program source rather than data or docs
    pub fn is_code(&self) -> bool {
        !matches!(
            self,
            Language::Json
                | Language::Yaml
                | Language::Toml
                | Language::Xml
                | Language::Markdown
                | Language::Other
        )
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One discovered file. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the scan root, `/`-separated
    pub path: String,

    pub language: Language,

    /// Number of lines (0 for binary files and files that were not read)
    pub lines: usize,

    /// Size on disk in bytes
    pub bytes: u64,

    /// Whether the null-byte sniff flagged the file as binary
    pub binary: bool,
}

impl FileRecord {
    /// Top-level directory of the file, `.` for files at the root
    pub fn top_level_dir(&self) -> &str {
        match self.path.split_once('/') {
            Some((dir, _)) => dir,
            None => ".",
        }
    }

    /// Directory containing the file, empty for files at the root
    pub fn parent_dir(&self) -> &str {
        match self.path.rfind('/') {
            Some(idx) => &self.path[..idx],
            None => "",
        }
    }

    /// Final path component
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Count lines the way editors do: a trailing newline does not start a new line
pub fn count_lines(bytes: &[u8]) -> usize {
    if bytes.is_empty() {
        return 0;
    }
    let newlines = bytes.iter().filter(|b| **b == b'\n').count();
    if bytes.ends_with(b"\n") {
        newlines
    } else {
        newlines + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_classify_by_extension() {
        assert_eq!(Language::classify(Path::new("src/main.rs"), None), Language::Rust);
        assert_eq!(Language::classify(Path::new("a/b.TSX"), None), Language::TypeScript);
        assert_eq!(Language::classify(Path::new("x.mjs"), None), Language::JavaScript);
        assert_eq!(Language::classify(Path::new("inc/util.h"), None), Language::C);
        assert_eq!(Language::classify(Path::new("Dockerfile"), None), Language::Dockerfile);
    }

    #[test]
    fn test_classify_by_shebang() {
        assert_eq!(
            Language::classify(Path::new("bin/tool"), Some("#!/usr/bin/env python3")),
            Language::Python
        );
        assert_eq!(
            Language::classify(Path::new("run"), Some("#!/bin/bash -e")),
            Language::Shell
        );
        assert_eq!(
            Language::classify(Path::new("cli"), Some("#!/usr/bin/env -S node --harmony")),
            Language::JavaScript
        );
    }

    #[test]
    fn test_classify_is_total() {
        let odd_paths = [
            PathBuf::from(""),
            PathBuf::from("."),
            PathBuf::from("noext"),
            PathBuf::from(".hidden"),
            PathBuf::from("weird.ext.zzz"),
            PathBuf::from("trailing."),
        ];
        for path in &odd_paths {
            let language = Language::classify(path, Some("not a shebang"));
            assert!(!language.tag().is_empty());
        }
        assert_eq!(Language::classify(Path::new("data.bin"), None), Language::Other);
        assert_eq!(Language::classify(Path::new("x"), Some("#!")), Language::Other);
    }

    #[test]
    fn test_record_helpers() {
        let record = FileRecord {
            path: "src/core/walker.rs".to_string(),
            language: Language::Rust,
            lines: 10,
            bytes: 100,
            binary: false,
        };
        assert_eq!(record.top_level_dir(), "src");
        assert_eq!(record.parent_dir(), "src/core");
        assert_eq!(record.file_name(), "walker.rs");

        let root_file = FileRecord {
            path: "README.md".to_string(),
            ..record
        };
        assert_eq!(root_file.top_level_dir(), ".");
        assert_eq!(root_file.parent_dir(), "");
    }

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines(b""), 0);
        assert_eq!(count_lines(b"one"), 1);
        assert_eq!(count_lines(b"one\n"), 1);
        assert_eq!(count_lines(b"one\ntwo"), 2);
        assert_eq!(count_lines(b"\n\n"), 2);
    }
}
