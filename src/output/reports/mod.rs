//! Markdown report rendering
//!
//! Rendering is a pure function of the [`Analysis`]: no timestamps, no
//! absolute paths and every collection in a fixed order, so the same tree
//! always produces byte-identical reports.

mod codebase_map;
mod dependency_graph;
mod markdown;
mod metrics;
mod security_scan;
mod todo_index;

pub use codebase_map::CodebaseMapReport;
pub use dependency_graph::DependencyGraphReport;
pub use metrics::MetricsReport;
pub use security_scan::SecurityScanReport;
pub use todo_index::TodoIndexReport;

use crate::models::analysis::Analysis;
use serde::Serialize;
use std::fmt;

/// Default cap on internal nodes drawn in the Mermaid graph
pub const DEFAULT_MAX_GRAPH_NODES: usize = 50;

/// The five generated documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ReportKind {
    CodebaseMap,
    DependencyGraph,
    SecurityScan,
    TodoIndex,
    Metrics,
}

impl ReportKind {
    /// Fixed output order
    pub const ALL: [ReportKind; 5] = [
        ReportKind::CodebaseMap,
        ReportKind::DependencyGraph,
        ReportKind::SecurityScan,
        ReportKind::TodoIndex,
        ReportKind::Metrics,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ReportKind::CodebaseMap => "CODEBASE_MAP.md",
            ReportKind::DependencyGraph => "DEPENDENCY_GRAPH.md",
            ReportKind::SecurityScan => "SECURITY_SCAN.md",
            ReportKind::TodoIndex => "TODO_INDEX.md",
            ReportKind::Metrics => "METRICS.md",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// A rendered markdown document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub kind: ReportKind,
    pub content: String,
}

/// Renders one report from an analysis
pub trait ReportRenderer: Send + Sync {
    fn kind(&self) -> ReportKind;

    fn render(&self, analysis: &Analysis) -> String;
}

/// Options affecting report content
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub max_graph_nodes: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_graph_nodes: DEFAULT_MAX_GRAPH_NODES,
        }
    }
}

/// One renderer per report, in output order
pub fn renderers(options: RenderOptions) -> Vec<Box<dyn ReportRenderer>> {
    vec![
        Box::new(CodebaseMapReport),
        Box::new(DependencyGraphReport::new(options.max_graph_nodes)),
        Box::new(SecurityScanReport),
        Box::new(TodoIndexReport),
        Box::new(MetricsReport),
    ]
}

/// Render all five reports in their fixed order
pub fn render_all(analysis: &Analysis, options: RenderOptions) -> Vec<RenderedReport> {
    renderers(options)
        .iter()
        .map(|renderer| RenderedReport {
            kind: renderer.kind(),
            content: renderer.render(analysis),
        })
        .collect()
}
