//! Dependency graph construction from extracted imports

use crate::models::dependency_graph::{Cycle, DependencyGraph, ImportEdge, NodeKey};
use crate::models::file_record::FileRecord;
use crate::parsers::imports::{extractor_for, RawImport};
use crate::utils::FileIndex;
use petgraph::algo::kosaraju_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::NodeFiltered;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Builds the dependency graph for a set of scanned files
pub struct DependencyGraphBuilder<'a> {
    index: &'a FileIndex,
}

impl<'a> DependencyGraphBuilder<'a> {
    /// Create a builder resolving imports against `index`
    pub fn new(index: &'a FileIndex) -> Self {
        Self { index }
    }

    /// Build the graph from file records and their raw imports
    ///
    /// Every record becomes a file node. Resolved imports link two file
    /// nodes; unresolved ones link to an external sentinel. Cycles are
    /// detected once the graph is complete.
    pub fn build(
        &self,
        files: &[FileRecord],
        imports: &BTreeMap<String, Vec<RawImport>>,
    ) -> DependencyGraph {
        let mut graph = DependencyGraph::new();

        for file in files {
            graph.add_file(&file.path, file.language);
        }

        for file in files {
            let Some(file_imports) = imports.get(&file.path) else {
                continue;
            };
            let Some(extractor) = extractor_for(file.language) else {
                continue;
            };
            let Some(from) = graph.node_index(&NodeKey::File(file.path.clone())) else {
                continue;
            };

            for import in file_imports {
                let (to, target, resolved) =
                    match extractor.resolve(import, &file.path, self.index) {
                        Some(path) if path == file.path => continue,
                        Some(path) => match graph.node_index(&NodeKey::File(path.clone())) {
                            Some(idx) => (idx, NodeKey::File(path), true),
                            None => continue,
                        },
                        None => {
                            let name = extractor.external_name(import);
                            (graph.add_external(&name), NodeKey::External(name), false)
                        }
                    };

                graph.add_edge(
                    from,
                    to,
                    ImportEdge {
                        source: file.path.clone(),
                        target,
                        specifier: import.specifier.clone(),
                        line: import.line,
                        resolved,
                    },
                );
            }
        }

        graph.cycles = find_cycles(&graph.internal_adjacency());

        debug!(
            "Built dependency graph: {} files, {} external, {} edges, {} cycles",
            graph.file_count(),
            graph.external_count(),
            graph.edge_count(),
            graph.cycles.len()
        );

        graph
    }
}

/// Upper bound on cycles collected by the elementary-cycle enumeration
pub const MAX_ENUMERATED_CYCLES: usize = 10_000;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    Unvisited,
    InProgress,
    Done,
}

/// Find import cycles
///
/// A three-colour depth-first search reports the cycle closed by every back
/// edge. Cycles that share nodes with one already found are not always back
/// edges, so every strongly connected component is then searched for its
/// elementary cycles as well. Cycles are rotated to their smallest member and
/// de-duplicated; the result does not depend on edge order.
pub fn find_cycles(adjacency: &BTreeMap<&str, Vec<&str>>) -> Vec<Cycle> {
    let mut cycles = back_edge_cycles(adjacency);
    elementary_cycles(adjacency, &mut cycles);
    cycles.into_iter().collect()
}

/// Iterative three-colour depth-first search over sorted roots and neighbours
///
/// The search never stops early. Each edge into an in-progress node closes
/// the cycle formed by the current path from that node.
fn back_edge_cycles<'a>(adjacency: &BTreeMap<&'a str, Vec<&'a str>>) -> BTreeSet<Cycle> {
    let mut color: BTreeMap<&str, Color> = adjacency
        .keys()
        .map(|node| (*node, Color::Unvisited))
        .collect();
    let mut cycles: BTreeSet<Cycle> = BTreeSet::new();
    let no_neighbours: Vec<&str> = Vec::new();

    for root in adjacency.keys() {
        if color.get(root) != Some(&Color::Unvisited) {
            continue;
        }

        // Each frame is a node on the current path and its next neighbour slot
        let mut stack: Vec<(&str, usize)> = vec![(*root, 0)];
        color.insert(*root, Color::InProgress);

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            let neighbours = adjacency.get(node).unwrap_or(&no_neighbours);

            if frame.1 >= neighbours.len() {
                color.insert(node, Color::Done);
                stack.pop();
                continue;
            }
            let next = neighbours[frame.1];
            frame.1 += 1;

            match color.get(next).copied().unwrap_or(Color::Unvisited) {
                Color::Unvisited => {
                    color.insert(next, Color::InProgress);
                    stack.push((next, 0));
                }
                Color::InProgress => {
                    if let Some(start) = stack.iter().position(|(n, _)| *n == next) {
                        let nodes = stack[start..].iter().map(|(n, _)| n.to_string()).collect();
                        cycles.insert(Cycle::canonical(nodes));
                    }
                }
                Color::Done => {}
            }
        }
    }

    cycles
}

/// Add every elementary cycle to `cycles`, up to [`MAX_ENUMERATED_CYCLES`]
///
/// Johnson's algorithm: repeatedly take the smallest node that still sits in
/// a non-trivial strongly connected component, collect the circuits through
/// it inside that component, then drop it from the graph.
fn elementary_cycles(adjacency: &BTreeMap<&str, Vec<&str>>, cycles: &mut BTreeSet<Cycle>) {
    let names: Vec<&str> = adjacency
        .iter()
        .flat_map(|(node, targets)| std::iter::once(*node).chain(targets.iter().copied()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let rank: BTreeMap<&str, usize> = names.iter().enumerate().map(|(i, name)| (*name, i)).collect();

    // Node `i` of the graph is `names[i]`, so index order is name order
    let mut graph: DiGraph<(), ()> = DiGraph::with_capacity(names.len(), 0);
    for _ in &names {
        graph.add_node(());
    }
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); names.len()];
    for (node, targets) in adjacency {
        let from = rank[node];
        for target in targets {
            successors[from].push(rank[target]);
        }
        successors[from].sort_unstable();
        successors[from].dedup();
        for &to in &successors[from] {
            graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
        }
    }

    let mut removed = vec![false; names.len()];
    let limit = MAX_ENUMERATED_CYCLES.max(cycles.len());

    loop {
        let components = {
            let view = NodeFiltered::from_fn(&graph, |node: NodeIndex| !removed[node.index()]);
            kosaraju_scc(&view)
        };

        let mut next: Option<Vec<NodeIndex>> = None;
        for component in components {
            if component.len() < 2 {
                // A lone node stays acyclic in every smaller subgraph
                for node in component {
                    removed[node.index()] = true;
                }
                continue;
            }
            let smallest = component.iter().map(|n| n.index()).min();
            let current = next.as_ref().and_then(|c| c.iter().map(|n| n.index()).min());
            if current.is_none() || smallest < current {
                next = Some(component);
            }
        }

        let Some(component) = next else {
            break;
        };
        let mut in_component = vec![false; names.len()];
        for node in &component {
            in_component[node.index()] = true;
        }
        let Some(start) = component.iter().map(|n| n.index()).min() else {
            break;
        };

        if !circuits_from(start, &successors, &in_component, &names, cycles, limit) {
            warn!(
                "Stopped listing import cycles after {} entries; the graph has more",
                cycles.len()
            );
            break;
        }
        removed[start] = true;
    }
}

/// Collect the circuits through `start` that stay inside `in_component`
///
/// Returns false once `cycles` reaches `limit`.
fn circuits_from(
    start: usize,
    successors: &[Vec<usize>],
    in_component: &[bool],
    names: &[&str],
    cycles: &mut BTreeSet<Cycle>,
    limit: usize,
) -> bool {
    let mut blocked = vec![false; successors.len()];
    let mut blocked_by: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); successors.len()];

    // Frames hold a node on the path, its next successor slot, and whether a
    // circuit was closed below it
    let mut frames: Vec<(usize, usize, bool)> = vec![(start, 0, false)];
    blocked[start] = true;

    while let Some(&(node, slot, _)) = frames.last() {
        if let Some(&next) = successors[node].get(slot) {
            let top = frames.len() - 1;
            frames[top].1 += 1;
            if !in_component[next] {
                continue;
            }
            if next == start {
                frames[top].2 = true;
                let nodes = frames.iter().map(|(n, _, _)| names[*n].to_string()).collect();
                cycles.insert(Cycle::canonical(nodes));
                if cycles.len() >= limit {
                    return false;
                }
            } else if !blocked[next] {
                blocked[next] = true;
                frames.push((next, 0, false));
            }
            continue;
        }

        let Some((node, _, closed)) = frames.pop() else {
            break;
        };
        if closed {
            unblock(node, &mut blocked, &mut blocked_by);
            if let Some(parent) = frames.last_mut() {
                parent.2 = true;
            }
        } else {
            for &next in &successors[node] {
                if in_component[next] {
                    blocked_by[next].insert(node);
                }
            }
        }
    }

    true
}

fn unblock(node: usize, blocked: &mut [bool], blocked_by: &mut [BTreeSet<usize>]) {
    blocked[node] = false;
    let mut pending = vec![node];
    while let Some(current) = pending.pop() {
        for waiting in std::mem::take(&mut blocked_by[current]) {
            if blocked[waiting] {
                blocked[waiting] = false;
                pending.push(waiting);
            }
        }
    }
}
