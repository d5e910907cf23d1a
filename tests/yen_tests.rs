use ordered_float::OrderedFloat;
use relaxgraph::graph::{DirectedGraph, Graph, TaggedEdge};
use relaxgraph::{Error, SortedPath, YenShortestPaths};
use std::collections::HashSet;

type Edge = TaggedEdge<char, OrderedFloat<f64>>;

fn edge(source: char, target: char, weight: f64) -> Edge {
    TaggedEdge::new(source, target, OrderedFloat(weight))
}

fn graph_from(edges: &[(char, char, f64)]) -> DirectedGraph<char, Edge> {
    DirectedGraph::from_edges(edges.iter().map(|&(s, t, w)| edge(s, t, w)))
}

// Diamond with two routes of equal weight
fn diamond() -> DirectedGraph<char, Edge> {
    graph_from(&[
        ('A', 'B', 1.0),
        ('A', 'C', 2.0),
        ('B', 'D', 2.0),
        ('C', 'D', 1.0),
    ])
}

// The usual example graph for k-shortest paths
fn example_graph() -> DirectedGraph<char, Edge> {
    graph_from(&[
        ('C', 'D', 3.0),
        ('C', 'E', 2.0),
        ('D', 'F', 4.0),
        ('E', 'D', 1.0),
        ('E', 'F', 2.0),
        ('E', 'G', 3.0),
        ('F', 'G', 2.0),
        ('F', 'H', 1.0),
        ('G', 'H', 2.0),
    ])
}

fn route(path: &SortedPath<char, OrderedFloat<f64>>) -> String {
    path.vertices().into_iter().collect()
}

#[test]
fn test_diamond_tie_goes_to_first_removal() {
    let graph = diamond();
    let mut yen = YenShortestPaths::new(&graph, 'A', 'D', 2).unwrap();
    let paths = yen.execute().unwrap();

    assert_eq!(paths.len(), 2);
    assert_eq!(paths[0].edges(), &[edge('A', 'B', 1.0), edge('B', 'D', 2.0)]);
    assert_eq!(paths[0].weight(), OrderedFloat(3.0));
    assert_eq!(paths[1].edges(), &[edge('A', 'C', 2.0), edge('C', 'D', 1.0)]);
    assert_eq!(paths[1].weight(), OrderedFloat(3.0));

    // Removing A->B first already yields weight 3, B->D cannot beat it
    assert_eq!(yen.removed_edges(), &[edge('A', 'B', 1.0)]);
}

#[test]
fn test_k_larger_than_available_paths() {
    let graph = diamond();
    let mut yen = YenShortestPaths::new(&graph, 'A', 'D', 5).unwrap();
    let paths = yen.execute().unwrap();

    assert_eq!(paths.len(), 2, "only two loopless routes exist");
    assert_eq!(yen.removed_edges().len(), 1);
}

#[test]
fn test_single_path_requested() {
    let graph = example_graph();
    let mut yen = YenShortestPaths::new(&graph, 'C', 'H', 1).unwrap();
    let paths = yen.execute().unwrap();

    assert_eq!(paths.len(), 1);
    assert_eq!(route(&paths[0]), "CEFH");
    assert_eq!(paths[0].weight(), OrderedFloat(5.0));
    assert!(yen.removed_edges().is_empty());
}

#[test]
fn test_example_graph_paths() {
    let graph = example_graph();
    let mut yen = YenShortestPaths::new(&graph, 'C', 'H', 3).unwrap();
    let paths = yen.execute().unwrap();

    let routes: Vec<String> = paths.iter().map(route).collect();
    assert_eq!(routes, vec!["CEFH", "CEGH", "CDFH"]);
    let weights: Vec<f64> = paths.iter().map(|p| p.weight().into_inner()).collect();
    assert_eq!(weights, vec![5.0, 7.0, 8.0]);
    assert_eq!(
        yen.removed_edges(),
        &[edge('E', 'F', 2.0), edge('C', 'E', 2.0)]
    );
}

// Permanent removals cut C->E, so C-E-D-F-H (8) is never found and the
// fourth path is C-D-F-G-H (11).
#[test]
fn test_example_graph_without_spur_bookkeeping() {
    let graph = example_graph();
    let mut yen = YenShortestPaths::new(&graph, 'C', 'H', 10).unwrap();
    let paths = yen.execute().unwrap();

    let routes: Vec<String> = paths.iter().map(route).collect();
    assert_eq!(routes, vec!["CEFH", "CEGH", "CDFH", "CDFGH"]);
    assert_eq!(paths[3].weight(), OrderedFloat(11.0));
    assert_eq!(
        yen.removed_edges(),
        &[edge('E', 'F', 2.0), edge('C', 'E', 2.0), edge('F', 'H', 1.0)]
    );
    assert_eq!(yen.removed_edges().len(), paths.len() - 1);
}

#[test]
fn test_paths_are_loopless_distinct_and_ascending() {
    let graph = example_graph();
    let mut yen = YenShortestPaths::new(&graph, 'C', 'H', 10).unwrap();
    let paths = yen.execute().unwrap();

    let mut seen = HashSet::new();
    for window in paths.windows(2) {
        assert!(window[0].weight() <= window[1].weight());
    }
    for path in &paths {
        let vertices = path.vertices();
        let unique: HashSet<char> = vertices.iter().copied().collect();
        assert_eq!(unique.len(), vertices.len(), "path {} repeats a vertex", route(path));
        assert_eq!(vertices.first(), Some(&'C'));
        assert_eq!(vertices.last(), Some(&'H'));
        assert!(seen.insert(route(path)), "path {} returned twice", route(path));
    }
}

#[test]
fn test_custom_weights() {
    let graph = example_graph();
    let mut yen = YenShortestPaths::new(&graph, 'C', 'H', 10)
        .unwrap()
        .with_weights(|_| OrderedFloat(1.0));
    let paths = yen.execute().unwrap();

    let routes: Vec<String> = paths.iter().map(route).collect();
    assert_eq!(routes, vec!["CDFH", "CEFH", "CEGH", "CEDFH", "CEDFGH"]);
    let hops: Vec<f64> = paths.iter().map(|p| p.weight().into_inner()).collect();
    assert_eq!(hops, vec![3.0, 3.0, 3.0, 4.0, 5.0]);
    assert_eq!(yen.removed_edges().len(), 4);
}

#[test]
fn test_filter_is_applied_to_results() {
    let graph = example_graph();
    let mut yen = YenShortestPaths::new(&graph, 'C', 'H', 10)
        .unwrap()
        .with_filter(|paths| {
            paths
                .into_iter()
                .filter(|path| path.weight() <= OrderedFloat(7.0))
                .collect()
        });
    let paths = yen.execute().unwrap();

    assert_eq!(paths.len(), 2);
    // the filter does not change what the search removed
    assert_eq!(yen.removed_edges().len(), 3);
}

#[test]
fn test_zero_k_is_rejected() {
    let graph = diamond();
    let result = YenShortestPaths::new(&graph, 'A', 'D', 0);
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}

#[test]
fn test_missing_source_has_no_path() {
    let graph = diamond();
    let mut yen = YenShortestPaths::new(&graph, 'Z', 'D', 3).unwrap();
    assert_eq!(yen.execute().unwrap_err(), Error::NoPathFound);
}

#[test]
fn test_unreachable_target_has_no_path() {
    let mut graph = diamond();
    graph.add_vertices_and_edge(edge('E', 'A', 1.0));

    let mut yen = YenShortestPaths::new(&graph, 'A', 'E', 3).unwrap();
    assert_eq!(yen.execute().unwrap_err(), Error::NoPathFound);
    assert!(yen.removed_edges().is_empty());
}

#[test]
fn test_source_equal_to_target_has_no_path() {
    let graph = diamond();
    let mut yen = YenShortestPaths::new(&graph, 'A', 'A', 2).unwrap();
    assert_eq!(yen.execute().unwrap_err(), Error::NoPathFound);
}

#[test]
fn test_caller_graph_is_untouched() {
    let graph = example_graph();
    let edges_before: Vec<Edge> = graph.edges().cloned().collect();

    let mut yen = YenShortestPaths::new(&graph, 'C', 'H', 10).unwrap();
    yen.execute().unwrap();

    assert!(!yen.removed_edges().is_empty());
    let edges_after: Vec<Edge> = graph.edges().cloned().collect();
    assert_eq!(edges_before, edges_after);
    for removed in yen.removed_edges() {
        assert!(graph.contains_edge(removed));
    }
}

#[test]
fn test_removed_edges_count_matches_found_paths() {
    for k in 1..=6 {
        let graph = example_graph();
        let mut yen = YenShortestPaths::new(&graph, 'C', 'H', k).unwrap();
        let paths = yen.execute().unwrap();

        assert_eq!(paths.len(), k.min(4));
        assert_eq!(yen.removed_edges().len(), k.min(4) - 1);
    }
}
