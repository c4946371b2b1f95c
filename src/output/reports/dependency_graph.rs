//! DEPENDENCY_GRAPH.md

use super::markdown::{code, plural, table, NO_FILES_FOUND};
use super::{ReportKind, ReportRenderer};
use crate::models::analysis::Analysis;
use crate::models::dependency_graph::DependencyGraph;
use std::collections::BTreeMap;

/// Entries in each "most connected" ranking
const RANKING_LIMIT: usize = 10;

/// Renderer for the import graph report
pub struct DependencyGraphReport {
    max_nodes: usize,
}

impl DependencyGraphReport {
    pub fn new(max_nodes: usize) -> Self {
        Self { max_nodes }
    }
}

impl ReportRenderer for DependencyGraphReport {
    fn kind(&self) -> ReportKind {
        ReportKind::DependencyGraph
    }

    fn render(&self, analysis: &Analysis) -> String {
        let mut output = String::from("# Dependency Graph\n\n");
        if analysis.is_empty() {
            output.push_str(NO_FILES_FOUND);
            return output;
        }

        let graph = &analysis.graph;
        output.push_str(&overview(graph));
        output.push('\n');
        output.push_str(&mermaid(graph, self.max_nodes));
        output.push('\n');
        output.push_str(&circular_dependencies(graph));
        output.push('\n');
        output.push_str(&external_dependencies(graph));
        output.push('\n');
        output.push_str(&most_connected(graph));
        output
    }
}

fn overview(graph: &DependencyGraph) -> String {
    let stats = graph.statistics();
    let rows = vec![
        vec!["Source files".to_string(), stats.file_nodes.to_string()],
        vec!["Internal imports".to_string(), stats.internal_edges.to_string()],
        vec!["External packages".to_string(), stats.external_nodes.to_string()],
        vec!["External imports".to_string(), stats.external_edges.to_string()],
        vec!["Circular dependencies".to_string(), stats.cycles.to_string()],
    ];

    let mut output = String::from("## Overview\n\n");
    output.push_str(&table(&["Metric", "Count"], &rows));
    output.push_str(
        "\nImports are extracted line by line with patterns, so dynamic or generated imports may be missing.\n",
    );
    output
}

/// Mermaid label text; quotes are not allowed inside `["..."]`
fn mermaid_label(path: &str) -> String {
    path.replace('"', "#quot;")
}

fn mermaid(graph: &DependencyGraph, max_nodes: usize) -> String {
    let mut output = String::from("## Module Graph\n\n");
    let adjacency = graph.internal_adjacency();
    if graph.internal_edge_count() == 0 {
        output.push_str("No imports between scanned files were resolved.\n");
        return output;
    }

    // Connected files ranked by degree, then path
    let mut connected: Vec<(&str, usize)> = graph
        .files()
        .map(|path| (path, graph.fan_in(path) + graph.fan_out(path)))
        .filter(|(_, degree)| *degree > 0)
        .collect();
    let total_connected = connected.len();
    connected.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    connected.truncate(max_nodes);

    let mut selected: Vec<&str> = connected.into_iter().map(|(path, _)| path).collect();
    selected.sort_unstable();
    let ids: BTreeMap<&str, usize> = selected.iter().enumerate().map(|(i, path)| (*path, i)).collect();

    output.push_str("```mermaid\ngraph TD\n");
    for (path, id) in &ids {
        output.push_str(&format!("    n{}[\"{}\"]\n", id, mermaid_label(path)));
    }

    let cycle_edges = graph.cycle_edges();
    let mut highlighted = Vec::new();
    let mut edge_index = 0;
    for (from, targets) in &adjacency {
        let Some(from_id) = ids.get(from) else {
            continue;
        };
        for to in targets {
            let Some(to_id) = ids.get(to) else {
                continue;
            };
            output.push_str(&format!("    n{} --> n{}\n", from_id, to_id));
            if cycle_edges.contains(&(*from, *to)) {
                highlighted.push(edge_index.to_string());
            }
            edge_index += 1;
        }
    }
    if !highlighted.is_empty() {
        output.push_str(&format!(
            "    linkStyle {} stroke:#d73a49,stroke-width:2px\n",
            highlighted.join(",")
        ));
    }
    output.push_str("```\n");

    if total_connected > ids.len() {
        output.push_str(&format!(
            "\nShowing the {} most connected of {} connected files.\n",
            ids.len(),
            total_connected
        ));
    }
    if !highlighted.is_empty() {
        output.push_str("\nEdges that are part of a circular dependency are drawn in red.\n");
    }
    output
}

fn circular_dependencies(graph: &DependencyGraph) -> String {
    let mut output = String::from("## Circular Dependencies\n\n");
    if graph.cycles.is_empty() {
        output.push_str("No circular dependencies detected.\n");
        return output;
    }

    output.push_str(&format!("Found {}.\n\n", plural(graph.cycles.len(), "cycle")));
    for (i, cycle) in graph.cycles.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, code(&cycle.to_string())));
    }
    output
}

fn external_dependencies(graph: &DependencyGraph) -> String {
    let mut output = String::from("## External Dependencies\n\n");
    let mut usage = graph.external_usage();
    if usage.is_empty() {
        output.push_str("No external dependencies detected.\n");
        return output;
    }

    usage.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let rows: Vec<Vec<String>> = usage
        .iter()
        .map(|(name, importers)| vec![code(name), importers.to_string()])
        .collect();
    output.push_str("Imports that did not resolve to a scanned file, grouped by package.\n\n");
    output.push_str(&table(&["Package", "Imported by"], &rows));
    output
}

fn most_connected(graph: &DependencyGraph) -> String {
    let mut output = String::from("## Most Connected Modules\n\n");

    for (title, column, ranking) in [
        ("Most Imported", "Imported by", graph.most_imported(RANKING_LIMIT)),
        ("Most Importing", "Imports", graph.most_importing(RANKING_LIMIT)),
    ] {
        output.push_str(&format!("### {}\n\n", title));
        if ranking.is_empty() {
            output.push_str("None.\n\n");
            continue;
        }
        let rows: Vec<Vec<String>> = ranking
            .iter()
            .map(|(path, count)| vec![code(path), count.to_string()])
            .collect();
        output.push_str(&table(&["Module", column], &rows));
        output.push('\n');
    }

    output.truncate(output.trim_end().len());
    output.push('\n');
    output
}
