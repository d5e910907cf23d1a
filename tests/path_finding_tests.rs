use ordered_float::OrderedFloat;
use relaxgraph::algorithm::traits::ShortestPathAlgorithm;
use relaxgraph::graph::{DirectedGraph, Graph, MutableGraph, TaggedEdge};
use relaxgraph::{BellmanFord, Dijkstra, Error, PredecessorRecorder};
use std::collections::HashMap;

type Weight = OrderedFloat<f64>;
type GridEdge = TaggedEdge<usize, Weight>;
type Grid = DirectedGraph<usize, GridEdge>;

// Test helper function to create a simple grid graph
fn create_test_grid(width: usize, height: usize, blocked: &[(usize, usize)]) -> Grid {
    let mut graph = DirectedGraph::with_capacity(width * height);

    // Add vertices for all positions in the grid
    for vertex in 0..(width * height) {
        graph.add_vertex(vertex);
    }

    // Connect adjacent walkable vertices (including diagonals)
    for y in 0..height {
        for x in 0..width {
            if blocked.contains(&(x, y)) {
                continue;
            }
            let vertex = y * width + x;

            // Define possible moves (8 directions)
            let directions = [
                // Cardinal directions (N, E, S, W)
                (0, -1, 1.0), (1, 0, 1.0), (0, 1, 1.0), (-1, 0, 1.0),
                // Diagonal directions (NE, SE, SW, NW)
                (1, -1, 1.4), (1, 1, 1.4), (-1, 1, 1.4), (-1, -1, 1.4),
            ];

            for (dx, dy, cost) in directions {
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;

                if nx >= 0 && ny >= 0 && nx < width as i32 && ny < height as i32 {
                    let (nx, ny) = (nx as usize, ny as usize);
                    if !blocked.contains(&(nx, ny)) {
                        let neighbor = ny * width + nx;
                        graph.add_edge(TaggedEdge::new(vertex, neighbor, OrderedFloat(cost)));
                    }
                }
            }
        }
    }

    graph
}

// Runs Dijkstra from source and returns its distance to target with the path to it
fn dijkstra_path(graph: &Grid, source: usize, target: usize) -> Option<(Weight, Vec<GridEdge>)> {
    let mut recorder = PredecessorRecorder::new();
    let distance = {
        let mut dijkstra =
            Dijkstra::new(graph, |edge: &GridEdge| edge.tag).on_tree_edge(|edge| recorder.record(edge));
        dijkstra.compute(&source).unwrap();
        dijkstra.try_get_distance(&target)
    };
    Some((distance?, recorder.try_get_path(&target)?))
}

fn assert_path_continuity(graph: &Grid, path: &[GridEdge], source: usize, target: usize) {
    assert_eq!(path[0].source, source, "Path should start at source");
    assert_eq!(path[path.len() - 1].target, target, "Path should end at target");
    for window in path.windows(2) {
        assert_eq!(window[0].target, window[1].source, "Path should be connected");
    }
    for edge in path {
        assert!(graph.contains_edge(edge), "Path should only use existing edges");
    }
}

fn path_weight(path: &[GridEdge]) -> f64 {
    path.iter().map(|edge| edge.tag.into_inner()).sum()
}

// Test that paths can be found in a simple grid
#[test]
fn test_path_finding_simple_grid() {
    let graph = create_test_grid(10, 10, &[]);

    // Top-left corner (0,0) to bottom-right corner (9,9)
    let (source, target) = (0, 99);

    let (distance, path) = dijkstra_path(&graph, source, target).expect("Dijkstra should find a path");
    assert_path_continuity(&graph, &path, source, target);

    // Nine diagonal moves
    assert!((distance.into_inner() - 9.0 * 1.4).abs() < 1e-9);
    assert!((path_weight(&path) - distance.into_inner()).abs() < 1e-9);
    assert_eq!(path.len(), 9);
}

#[test]
fn test_dijkstra_and_bellman_ford_agree() {
    let graph = create_test_grid(12, 9, &[(4, 2), (4, 3), (4, 4), (4, 5), (8, 6), (8, 7), (8, 8)]);
    let weights = |edge: &GridEdge| edge.tag;

    let mut dijkstra = Dijkstra::new(&graph, weights);
    let mut bellman_ford = BellmanFord::new(&graph, weights);
    dijkstra.compute(&0).unwrap();
    bellman_ford.compute(&0).unwrap();

    assert_eq!(dijkstra.name(), "Dijkstra");
    assert_eq!(bellman_ford.name(), "Bellman-Ford");
    assert_eq!(dijkstra.state().distances().len(), bellman_ford.state().distances().len());

    for vertex in graph.vertices() {
        match (dijkstra.try_get_distance(vertex), bellman_ford.try_get_distance(vertex)) {
            (Some(a), Some(b)) => assert!(
                (a.into_inner() - b.into_inner()).abs() < 1e-9,
                "distances to {} differ: {} vs {}",
                vertex,
                a,
                b
            ),
            (None, None) => {}
            other => panic!("reachability of {} differs: {:?}", vertex, other),
        }
    }
}

// Test path finding with obstacles
#[test]
fn test_path_finding_with_obstacles() {
    let mut graph = create_test_grid(10, 10, &[]);

    // Create a wall of obstacles in column 5, open at the bottom
    let obstacles: Vec<usize> = (0..8).map(|y| y * 10 + 5).collect();
    let edges_to_remove: Vec<GridEdge> = graph
        .edges()
        .filter(|edge| obstacles.contains(&edge.source) || obstacles.contains(&edge.target))
        .cloned()
        .collect();
    for edge in &edges_to_remove {
        assert!(graph.remove_edge(edge));
    }
    assert!(!graph.remove_edge(&edges_to_remove[0]), "edge is already gone");

    let (source, target) = (0, 99);
    let (distance, path) =
        dijkstra_path(&graph, source, target).expect("Dijkstra should find a path around obstacles");
    assert_path_continuity(&graph, &path, source, target);
    for edge in &path {
        assert!(!obstacles.contains(&edge.target), "Path should avoid obstacles");
    }
    assert!(distance.into_inner() > 9.0 * 1.4, "detour should cost more than the diagonal");

    // Obstacles themselves are unreachable
    assert!(dijkstra_path(&graph, source, 5).is_none());
}

// Test the city pathfinding scenario
#[test]
fn test_city_pathfinding() {
    let (width, height) = (25, 18);

    // Add some buildings as obstacles
    let buildings = [
        (3, 3), (4, 3), (5, 3),
        (3, 4), (4, 4), (5, 4),
        (3, 5), (4, 5), (5, 5),
        (10, 10), (11, 10), (12, 10),
        (10, 11), (11, 11), (12, 11),
        (10, 12), (11, 12), (12, 12),
    ];
    let graph = create_test_grid(width, height, &buildings);

    // Define some key locations
    let locations = HashMap::from([
        ("home", (0, 0)),
        ("work", (20, 15)),
        ("gym", (15, 8)),
        ("park", (8, 12)),
    ]);

    // Test path finding between locations
    for (from_name, &(fx, fy)) in &locations {
        for (to_name, &(tx, ty)) in &locations {
            if from_name == to_name {
                continue;
            }
            let source = fy * width + fx;
            let target = ty * width + tx;

            let (distance, path) = dijkstra_path(&graph, source, target)
                .unwrap_or_else(|| panic!("Should find a path from {} to {}", from_name, to_name));
            assert_path_continuity(&graph, &path, source, target);
            assert!((path_weight(&path) - distance.into_inner()).abs() < 1e-9);
        }
    }
}

#[test]
fn test_negative_weight() {
    let graph = DirectedGraph::from_edges([
        TaggedEdge::new('a', 'b', OrderedFloat(1.0)),
        TaggedEdge::new('b', 'c', OrderedFloat(-2.0)),
        TaggedEdge::new('a', 'c', OrderedFloat(4.0)),
    ]);
    let weights = |edge: &TaggedEdge<char, Weight>| edge.tag;

    let mut dijkstra = Dijkstra::new(&graph, weights);
    assert_eq!(dijkstra.compute(&'a'), Err(Error::NegativeWeight(-2.0)));

    let mut bellman_ford = BellmanFord::new(&graph, weights);
    bellman_ford.compute(&'a').unwrap();
    assert_eq!(bellman_ford.try_get_distance(&'c'), Some(OrderedFloat(-1.0)));
}

#[test]
fn test_negative_cycle() {
    let graph = DirectedGraph::from_edges([
        TaggedEdge::new(0, 1, OrderedFloat(1.0)),
        TaggedEdge::new(1, 2, OrderedFloat(1.0)),
        TaggedEdge::new(2, 3, OrderedFloat(-3.0)),
        TaggedEdge::new(3, 1, OrderedFloat(1.0)),
        TaggedEdge::new(3, 4, OrderedFloat(2.0)),
    ]);

    let mut bellman_ford = BellmanFord::new(&graph, |edge: &TaggedEdge<i32, Weight>| edge.tag);
    assert_eq!(bellman_ford.compute(&0), Err(Error::NegativeCycle));
}

#[test]
fn test_missing_root() {
    let graph = create_test_grid(3, 3, &[]);
    let weights = |edge: &GridEdge| edge.tag;

    let mut dijkstra = Dijkstra::new(&graph, weights);
    assert!(matches!(dijkstra.compute(&100), Err(Error::VertexNotFound(_))));

    let mut bellman_ford = BellmanFord::new(&graph, weights);
    assert!(matches!(bellman_ford.compute(&100), Err(Error::VertexNotFound(_))));
}

#[test]
fn test_repeated_runs_start_fresh() {
    let graph = create_test_grid(4, 4, &[]);
    let mut dijkstra = Dijkstra::new(&graph, |edge: &GridEdge| edge.tag);

    dijkstra.compute(&0).unwrap();
    assert_eq!(dijkstra.try_get_distance(&0), Some(OrderedFloat(0.0)));

    dijkstra.compute(&15).unwrap();
    assert_eq!(dijkstra.try_get_distance(&15), Some(OrderedFloat(0.0)));
    let back = dijkstra.try_get_distance(&0).unwrap();
    assert!((back.into_inner() - 3.0 * 1.4).abs() < 1e-9);
}
