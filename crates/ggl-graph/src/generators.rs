use ggl_core::errors::GglError;
use ggl_core::rng::RngHandle;
use ggl_core::LabeledGraph;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::graph::Graph;

/// Generates a random labeled multigraph with deterministic randomness.
///
/// Labels are drawn uniformly from the provided pools. Self-loops and
/// parallel edges may occur when `allow_self_loops` is set and by chance
/// respectively.
pub fn gen_random_labeled(
    n_nodes: usize,
    n_edges: usize,
    node_labels: &[&str],
    edge_labels: &[&str],
    allow_self_loops: bool,
    rng: &mut RngHandle,
) -> Result<Graph, GglError> {
    if node_labels.is_empty() || edge_labels.is_empty() {
        return Err(GglError::graph(
            "empty-label-pool",
            "random generator requires at least one node and one edge label",
        ));
    }
    if n_nodes == 0 && n_edges > 0 {
        return Err(GglError::graph(
            "empty-graph",
            "cannot place edges in a graph without nodes",
        ));
    }
    if n_nodes == 1 && n_edges > 0 && !allow_self_loops {
        return Err(GglError::graph(
            "no-edge-slot",
            "a single node only admits self-loops",
        )
        .with_context("edges", n_edges));
    }
    let mut graph = Graph::with_capacity(n_nodes, n_edges);
    for _ in 0..n_nodes {
        let label = node_labels.choose(rng.inner_mut()).copied().unwrap_or_default();
        graph.add_node(label);
    }
    let mut placed = 0;
    while placed < n_edges {
        let source = rng.inner_mut().gen_range(0..n_nodes);
        let target = rng.inner_mut().gen_range(0..n_nodes);
        if source == target && !allow_self_loops {
            continue;
        }
        let label = edge_labels.choose(rng.inner_mut()).copied().unwrap_or_default();
        graph.add_edge(source, target, label)?;
        placed += 1;
    }
    Ok(graph)
}

/// Generates a `rows x cols` grid whose cells are linked to their row, column
/// and optional `block x block` box neighbours, Sudoku style.
///
/// Cell `(r, c)` gets index `r * cols + c`. Pass `block = 0` for a plain
/// row/column lattice where only orthogonally adjacent cells are linked.
pub fn gen_grid(
    rows: usize,
    cols: usize,
    block: usize,
    node_label: &str,
    edge_label: &str,
) -> Result<Graph, GglError> {
    let mut graph = Graph::with_capacity(rows * cols, rows * cols * 4);
    for _ in 0..rows * cols {
        graph.add_node(node_label);
    }
    for a in 0..rows * cols {
        for b in (a + 1)..rows * cols {
            let (ra, ca) = (a / cols, a % cols);
            let (rb, cb) = (b / cols, b % cols);
            let linked = if block == 0 {
                (ra == rb && ca.abs_diff(cb) == 1) || (ca == cb && ra.abs_diff(rb) == 1)
            } else {
                ra == rb || ca == cb || (ra / block == rb / block && ca / block == cb / block)
            };
            if linked {
                graph.add_edge(a, b, edge_label)?;
            }
        }
    }
    Ok(graph)
}

/// Generates a simple cycle of `n` nodes.
pub fn gen_cycle(n: usize, node_label: &str, edge_label: &str) -> Result<Graph, GglError> {
    let mut graph = Graph::with_capacity(n, n);
    for _ in 0..n {
        graph.add_node(node_label);
    }
    for node in 0..n {
        graph.add_edge(node, (node + 1) % n, edge_label)?;
    }
    Ok(graph)
}

/// Renumbers the nodes of `graph`: node `i` becomes node `perm[i]`.
pub fn permute_nodes(graph: &Graph, perm: &[usize]) -> Result<Graph, GglError> {
    let n = graph.node_count();
    let mut seen = vec![false; n];
    if perm.len() != n || perm.iter().any(|&p| p >= n || std::mem::replace(&mut seen[p], true)) {
        return Err(GglError::graph("invalid-permutation", "not a permutation of the node set")
            .with_context("nodes", n)
            .with_context("length", perm.len()));
    }
    let mut labels = vec![String::new(); n];
    for (old, &new) in perm.iter().enumerate() {
        labels[new] = graph.node_label(old).to_string();
    }
    Graph::from_parts(
        labels,
        graph
            .edges()
            .map(|(_, edge)| (perm[edge.source], perm[edge.target], edge.label.clone())),
    )
}
