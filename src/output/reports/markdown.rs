//! Small markdown building helpers shared by the reports

use crate::models::finding::Finding;

/// Section shown in place of content when nothing was scanned
pub const NO_FILES_FOUND: &str =
    "## No files found\n\nNo files remained under the scanned root after ignore rules were applied.\n";

/// Escape a value for use inside a table cell
pub fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

/// Inline code span, widening the fence when the value contains backticks
pub fn code(value: &str) -> String {
    if value.contains('`') {
        format!("`` {} ``", value)
    } else {
        format!("`{}`", value)
    }
}

/// Render a table with a header row
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut output = String::new();
    output.push_str(&format!("| {} |\n", headers.join(" | ")));
    output.push_str(&format!(
        "|{}\n",
        headers.iter().map(|_| "---|").collect::<String>()
    ));
    for row in rows {
        let cells: Vec<String> = row.iter().map(|cell| escape_cell(cell)).collect();
        output.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    output
}

/// `1 file`, `3 files`
pub fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

/// Thousands separators for counts
pub fn number(value: u64) -> String {
    let digits = value.to_string();
    let mut output = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            output.push(',');
        }
        output.push(ch);
    }
    output
}

/// Human readable byte size
pub fn format_size(size: u64) -> String {
    if size < 1024 {
        format!("{} B", size)
    } else if size < 1024 * 1024 {
        format!("{:.1} KB", size as f64 / 1024.0)
    } else if size < 1024 * 1024 * 1024 {
        format!("{:.1} MB", size as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1} GB", size as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

/// Table of skipped files with their reasons, or a one-line note
pub fn skipped_files_section(skipped: &[&Finding]) -> String {
    let mut output = String::from("## Skipped Files\n\n");
    if skipped.is_empty() {
        output.push_str("No files were skipped.\n");
        return output;
    }

    output.push_str("These files were counted but not fully scanned.\n\n");
    let rows: Vec<Vec<String>> = skipped
        .iter()
        .map(|finding| vec![code(&finding.file), finding.text.clone()])
        .collect();
    output.push_str(&table(&["File", "Reason"], &rows));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_escapes_pipes() {
        let rendered = table(&["A", "B"], &[vec!["x|y".into(), "z".into()]]);
        assert_eq!(rendered, "| A | B |\n|---|---|\n| x\\|y | z |\n");
    }

    #[test]
    fn test_number_and_size() {
        assert_eq!(number(0), "0");
        assert_eq!(number(999), "999");
        assert_eq!(number(1234567), "1,234,567");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_plural_and_code() {
        assert_eq!(plural(1, "file"), "1 file");
        assert_eq!(plural(2, "file"), "2 files");
        assert_eq!(code("a`b"), "`` a`b ``");
    }
}
