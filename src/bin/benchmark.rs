use std::env;
use std::time::{Duration, Instant};

use log::info;
use ordered_float::OrderedFloat;
use rand::Rng;
use serde::Serialize;

use relaxgraph::data_structures::BinaryHeapWrapper;
use relaxgraph::graph::{DirectedGraph, MutableGraph, TaggedEdge};
use relaxgraph::{SoftHeap, YenShortestPaths};

type Weight = OrderedFloat<f64>;

#[derive(Debug, Serialize)]
struct HeapReport {
    elements: usize,
    error_rate: f64,
    min_rank: usize,
    soft_heap_ms: f64,
    binary_heap_ms: f64,
    max_corrupted: usize,
    descents: usize,
}

#[derive(Debug, Serialize)]
struct YenReport {
    vertices: usize,
    edges: usize,
    k: usize,
    found: usize,
    weights: Vec<f64>,
    elapsed_ms: f64,
}

#[derive(Debug, Serialize)]
struct Report {
    heap: HeapReport,
    yen: Option<YenReport>,
}

// Function to benchmark the soft heap against the binary heap wrapper
fn benchmark_heaps(elements: usize, error_rate: f64) -> Result<HeapReport, relaxgraph::Error> {
    let mut rng = rand::thread_rng();
    let keys: Vec<u64> = (0..elements).map(|_| rng.gen_range(0..1_000_000)).collect();

    let start = Instant::now();
    let mut soft_heap = SoftHeap::new(error_rate, u64::MAX)?;
    for (value, &key) in keys.iter().enumerate() {
        soft_heap.insert(key, value)?;
    }
    let mut max_corrupted = soft_heap.corrupted_count();
    let mut descents = 0;
    let mut last_key = 0;
    while !soft_heap.is_empty() {
        if soft_heap.len() % 1024 == 0 {
            max_corrupted = max_corrupted.max(soft_heap.corrupted_count());
        }
        let (key, _) = soft_heap.delete_min()?;
        if key < last_key {
            descents += 1;
        }
        last_key = key;
    }
    let soft_heap_time = start.elapsed();

    let start = Instant::now();
    let mut binary_heap = BinaryHeapWrapper::with_capacity(elements);
    for (value, &key) in keys.iter().enumerate() {
        binary_heap.push(value, key);
    }
    while binary_heap.pop().is_some() {}
    let binary_heap_time = start.elapsed();

    Ok(HeapReport {
        elements,
        error_rate,
        min_rank: soft_heap.min_rank(),
        soft_heap_ms: millis(soft_heap_time),
        binary_heap_ms: millis(binary_heap_time),
        max_corrupted,
        descents,
    })
}

// Function to generate a random directed graph with specified parameters
fn generate_random_graph(
    num_vertices: usize,
    edge_factor: f64,
) -> DirectedGraph<usize, TaggedEdge<usize, Weight>> {
    let mut graph = DirectedGraph::with_capacity(num_vertices).with_parallel_edges(false);
    let mut rng = rand::thread_rng();

    for v in 0..num_vertices {
        graph.add_vertex(v);
    }

    // Approximately edge_factor * n edges
    let num_edges = (edge_factor * num_vertices as f64) as usize;
    for _ in 0..num_edges {
        let u = rng.gen_range(0..num_vertices);
        let v = rng.gen_range(0..num_vertices);
        // Avoid self-loops and ensure positive weights
        if u != v {
            let weight = OrderedFloat(rng.gen_range(1.0..100.0));
            graph.add_edge(TaggedEdge::new(u, v, weight));
        }
    }

    graph
}

fn benchmark_yen(num_vertices: usize, k: usize) -> Result<Option<YenReport>, relaxgraph::Error> {
    let graph = generate_random_graph(num_vertices, 4.0);
    let edges = graph.edges().count();

    let start = Instant::now();
    let mut yen = YenShortestPaths::new(&graph, 0, num_vertices - 1, k)?;
    let paths = match yen.execute() {
        Ok(paths) => paths,
        Err(relaxgraph::Error::NoPathFound) => {
            info!("no path between 0 and {} in the random graph", num_vertices - 1);
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    Ok(Some(YenReport {
        vertices: num_vertices,
        edges,
        k,
        found: paths.len(),
        weights: paths.iter().map(|path| path.weight().into_inner()).collect(),
        elapsed_ms: millis(start.elapsed()),
    }))
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let elements = args.get(1).and_then(|arg| arg.parse().ok()).unwrap_or(100_000);
    let error_rate = args.get(2).and_then(|arg| arg.parse().ok()).unwrap_or(0.1);
    let vertices: usize = args.get(3).and_then(|arg| arg.parse().ok()).unwrap_or(1_000).max(2);
    let k = args.get(4).and_then(|arg| arg.parse().ok()).unwrap_or(5);

    info!(
        "benchmarking {} elements at error rate {}, Yen with k={} on {} vertices",
        elements, error_rate, k, vertices
    );

    let report = Report {
        heap: benchmark_heaps(elements, error_rate)?,
        yen: benchmark_yen(vertices, k)?,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
