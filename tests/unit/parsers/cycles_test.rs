use std::collections::{BTreeMap, BTreeSet};

use cartographer::parsers::find_cycles;

fn adjacency<'a>(edges: &[(&'a str, &'a str)]) -> BTreeMap<&'a str, Vec<&'a str>> {
    let mut map: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (from, to) in edges {
        map.entry(*from).or_default().push(*to);
        map.entry(*to).or_default();
    }
    for targets in map.values_mut() {
        targets.sort();
        targets.dedup();
    }
    map
}

#[test]
fn test_each_cycle_reported_once_regardless_of_edge_order() {
    let forward = find_cycles(&adjacency(&[("a", "b"), ("b", "c"), ("c", "a"), ("c", "d")]));
    let backward = find_cycles(&adjacency(&[("c", "d"), ("c", "a"), ("b", "c"), ("a", "b")]));

    assert_eq!(forward, backward);
    assert_eq!(forward.len(), 1);
    assert_eq!(forward[0].to_string(), "a -> b -> c -> a");
}

#[test]
fn test_cycles_are_unique_and_canonical() {
    let cycles = find_cycles(&adjacency(&[
        ("src/a.py", "src/b.py"),
        ("src/b.py", "src/a.py"),
        ("src/b.py", "src/c.py"),
        ("src/c.py", "src/b.py"),
        ("lib/x.py", "lib/x.py"),
    ]));

    let rendered: BTreeSet<String> = cycles.iter().map(|c| c.to_string()).collect();
    assert_eq!(rendered.len(), cycles.len());
    for cycle in &cycles {
        // Canonical rotation starts at the smallest path
        let smallest = cycle.nodes.iter().min().unwrap();
        assert_eq!(&cycle.nodes[0], smallest);
    }
}

#[test]
fn test_acyclic_graph_has_no_cycles() {
    let cycles = find_cycles(&adjacency(&[("main", "lib"), ("lib", "util"), ("main", "util")]));
    assert!(cycles.is_empty());
}

#[test]
fn test_overlapping_cycles_through_a_finished_node() {
    let cycles = find_cycles(&adjacency(&[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d"), ("d", "a")]));

    let rendered: Vec<String> = cycles.iter().map(|c| c.to_string()).collect();
    assert_eq!(rendered, vec!["a -> b -> d -> a", "a -> c -> d -> a"]);
}

#[test]
fn test_overlapping_cycles_do_not_depend_on_names() {
    // Same shape as above with the shared node sorting first
    let cycles = find_cycles(&adjacency(&[("z", "b"), ("z", "c"), ("b", "a"), ("c", "a"), ("a", "z")]));

    let rendered: Vec<String> = cycles.iter().map(|c| c.to_string()).collect();
    assert_eq!(rendered, vec!["a -> z -> b -> a", "a -> z -> c -> a"]);
}

#[test]
fn test_every_elementary_cycle_of_a_complete_graph() {
    let nodes = ["a", "b", "c", "d"];
    let mut edges = Vec::new();
    for from in nodes {
        for to in nodes {
            if from != to {
                edges.push((from, to));
            }
        }
    }

    // 6 two-node, 8 three-node and 6 four-node cycles
    let cycles = find_cycles(&adjacency(&edges));
    assert_eq!(cycles.len(), 20);
    let rendered: BTreeSet<String> = cycles.iter().map(|c| c.to_string()).collect();
    assert_eq!(rendered.len(), 20);
    assert!(rendered.contains("a -> c -> b -> d -> a"));
}
