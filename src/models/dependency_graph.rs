//! Dependency graph data structures

use super::file_record::Language;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Lookup key for a graph node
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeKey {
    /// A scanned file, by relative path
    File(String),
    /// Sentinel for an import target outside the scanned tree
    External(String),
}

impl NodeKey {
    pub fn name(&self) -> &str {
        match self {
            NodeKey::File(path) => path,
            NodeKey::External(name) => name,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, NodeKey::External(_))
    }
}

/// A node in the dependency graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphNode {
    File { path: String, language: Language },
    External { name: String },
}

impl GraphNode {
    pub fn key(&self) -> NodeKey {
        match self {
            GraphNode::File { path, .. } => NodeKey::File(path.clone()),
            GraphNode::External { name } => NodeKey::External(name.clone()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            GraphNode::File { path, .. } => path,
            GraphNode::External { name } => name,
        }
    }
}

/// An import relationship between a file and another node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportEdge {
    /// Importing file
    pub source: String,
    /// Imported node
    pub target: NodeKey,
    /// Import specifier as written in the source
    pub specifier: String,
    /// 1-based line of the import statement
    pub line: usize,
    /// Whether the target is a scanned file
    pub resolved: bool,
}

/// A circular import chain, rotated to start at its smallest path
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cycle {
    /// Distinct files in import order; the chain closes back to the first
    pub nodes: Vec<String>,
}

impl Cycle {
    /// Build the canonical rotation of a cycle given as distinct nodes in order
    pub fn canonical(mut nodes: Vec<String>) -> Self {
        if let Some(min_pos) = nodes
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.cmp(b.1))
            .map(|(pos, _)| pos)
        {
            nodes.rotate_left(min_pos);
        }
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Edges of the cycle including the closing edge
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        let n = self.nodes.len();
        (0..n).map(move |i| (self.nodes[i].as_str(), self.nodes[(i + 1) % n].as_str()))
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            write!(f, "{} -> ", node)?;
        }
        match self.nodes.first() {
            Some(first) => write!(f, "{}", first),
            None => Ok(()),
        }
    }
}

/// Dependency graph over scanned files and external sentinels
///
/// Every edge endpoint is a node of the graph: unresolved imports point at
/// `External` sentinel nodes rather than dangling.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: DiGraph<GraphNode, ImportEdge>,
    index: BTreeMap<NodeKey, NodeIndex>,
    /// Detected import cycles, sorted and unique
    pub cycles: Vec<Cycle>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file node, returning the existing one if already present
    pub fn add_file(&mut self, path: &str, language: Language) -> NodeIndex {
        self.add_node(GraphNode::File {
            path: path.to_string(),
            language,
        })
    }

    /// Add an external sentinel node, created once per name
    pub fn add_external(&mut self, name: &str) -> NodeIndex {
        self.add_node(GraphNode::External {
            name: name.to_string(),
        })
    }

    fn add_node(&mut self, node: GraphNode) -> NodeIndex {
        let key = node.key();
        if let Some(idx) = self.index.get(&key) {
            return *idx;
        }
        let idx = self.graph.add_node(node);
        self.index.insert(key, idx);
        idx
    }

    /// Add an edge between two existing nodes
    ///
    /// Returns false when an edge between the same pair already exists; the
    /// first one is kept.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, edge: ImportEdge) -> bool {
        if self.graph.find_edge(from, to).is_some() {
            return false;
        }
        self.graph.add_edge(from, to, edge);
        true
    }

    pub fn node_index(&self, key: &NodeKey) -> Option<NodeIndex> {
        self.index.get(key).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&GraphNode> {
        self.graph.node_weight(idx)
    }

    pub fn contains(&self, key: &NodeKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn file_count(&self) -> usize {
        self.index.keys().filter(|key| !key.is_external()).count()
    }

    pub fn external_count(&self) -> usize {
        self.index.keys().filter(|key| key.is_external()).count()
    }

    pub fn internal_edge_count(&self) -> usize {
        self.graph.edge_weights().filter(|edge| edge.resolved).count()
    }

    pub fn external_edge_count(&self) -> usize {
        self.graph.edge_weights().filter(|edge| !edge.resolved).count()
    }

    /// File paths in sorted order
    pub fn files(&self) -> impl Iterator<Item = &str> + '_ {
        self.index.keys().filter_map(|key| match key {
            NodeKey::File(path) => Some(path.as_str()),
            NodeKey::External(_) => None,
        })
    }

    /// All edges, sorted by source then target
    pub fn edges(&self) -> Vec<&ImportEdge> {
        let mut edges: Vec<&ImportEdge> = self.graph.edge_weights().collect();
        edges.sort_by(|a, b| (&a.source, &a.target).cmp(&(&b.source, &b.target)));
        edges
    }

    /// Internal adjacency: every file mapped to the sorted, unique files it imports
    pub fn internal_adjacency(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut adjacency: BTreeMap<&str, BTreeSet<&str>> =
            self.files().map(|path| (path, BTreeSet::new())).collect();

        for edge in self.graph.edge_references() {
            let weight = edge.weight();
            if !weight.resolved {
                continue;
            }
            if let (Some(GraphNode::File { path: from, .. }), Some(GraphNode::File { path: to, .. })) =
                (self.graph.node_weight(edge.source()), self.graph.node_weight(edge.target()))
            {
                adjacency.entry(from.as_str()).or_default().insert(to.as_str());
            }
        }

        adjacency
            .into_iter()
            .map(|(from, targets)| (from, targets.into_iter().collect()))
            .collect()
    }

    /// Number of files importing this file
    pub fn fan_in(&self, path: &str) -> usize {
        self.count_file_neighbors(path, Direction::Incoming)
    }

    /// Number of files this file imports
    pub fn fan_out(&self, path: &str) -> usize {
        self.count_file_neighbors(path, Direction::Outgoing)
    }

    fn count_file_neighbors(&self, path: &str, direction: Direction) -> usize {
        let Some(idx) = self.node_index(&NodeKey::File(path.to_string())) else {
            return 0;
        };
        self.graph
            .edges_directed(idx, direction)
            .filter(|edge| edge.weight().resolved)
            .count()
    }

    /// Number of external packages this file imports
    pub fn external_fan_out(&self, path: &str) -> usize {
        let Some(idx) = self.node_index(&NodeKey::File(path.to_string())) else {
            return 0;
        };
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .filter(|edge| !edge.weight().resolved)
            .count()
    }

    /// External sentinels with the number of files importing each, sorted by name
    pub fn external_usage(&self) -> Vec<(&str, usize)> {
        self.index
            .iter()
            .filter(|(key, _)| key.is_external())
            .map(|(key, idx)| {
                let importers = self.graph.edges_directed(*idx, Direction::Incoming).count();
                (key.name(), importers)
            })
            .collect()
    }

    /// Files ranked by fan-in, ties broken by path; zero entries omitted
    pub fn most_imported(&self, limit: usize) -> Vec<(&str, usize)> {
        self.rank_files(limit, |path| self.fan_in(path))
    }

    /// Files ranked by fan-out, ties broken by path; zero entries omitted
    pub fn most_importing(&self, limit: usize) -> Vec<(&str, usize)> {
        self.rank_files(limit, |path| self.fan_out(path))
    }

    fn rank_files<F>(&self, limit: usize, score: F) -> Vec<(&str, usize)>
    where
        F: Fn(&str) -> usize,
    {
        let mut ranked: Vec<(&str, usize)> = self
            .files()
            .map(|path| (path, score(path)))
            .filter(|(_, count)| *count > 0)
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(limit);
        ranked
    }

    /// Set of directed file edges that lie on some detected cycle
    pub fn cycle_edges(&self) -> BTreeSet<(&str, &str)> {
        self.cycles.iter().flat_map(|cycle| cycle.edges()).collect()
    }

    /// Get statistics about the dependency graph
    pub fn statistics(&self) -> GraphStatistics {
        let (max_fan_in_file, max_fan_in) = self
            .most_imported(1)
            .first()
            .map(|(path, count)| (Some(path.to_string()), *count))
            .unwrap_or((None, 0));
        let (max_fan_out_file, max_fan_out) = self
            .most_importing(1)
            .first()
            .map(|(path, count)| (Some(path.to_string()), *count))
            .unwrap_or((None, 0));

        GraphStatistics {
            file_nodes: self.file_count(),
            external_nodes: self.external_count(),
            internal_edges: self.internal_edge_count(),
            external_edges: self.external_edge_count(),
            cycles: self.cycles.len(),
            max_fan_in,
            max_fan_in_file,
            max_fan_out,
            max_fan_out_file,
        }
    }

    /// Check that every edge endpoint is a node in the index
    pub fn is_consistent(&self) -> bool {
        self.graph.edge_references().all(|edge| {
            let endpoints = [edge.source(), edge.target()];
            endpoints.iter().all(|idx| {
                self.graph
                    .node_weight(*idx)
                    .map(|node| self.index.get(&node.key()) == Some(idx))
                    .unwrap_or(false)
            })
        })
    }
}

/// Statistics about the dependency graph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub file_nodes: usize,
    pub external_nodes: usize,
    pub internal_edges: usize,
    pub external_edges: usize,
    pub cycles: usize,
    pub max_fan_in: usize,
    pub max_fan_in_file: Option<String>,
    pub max_fan_out: usize,
    pub max_fan_out_file: Option<String>,
}
