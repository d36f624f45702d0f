use std::collections::BTreeMap;

use ggl_core::LabeledGraph;
use sha2::{Digest, Sha256};

const REFINEMENT_ROUNDS: usize = 4;

type Color = [u8; 32];

/// Computes an isomorphism-invariant structural hash.
///
/// Node colours start from the node label and are refined with the sorted
/// multiset of `(edge label, neighbour colour)` pairs (self-loops tagged
/// separately). Isomorphic graphs always hash equal; equal hashes are a
/// strong hint but not a proof of isomorphism.
pub fn invariant_hash(graph: &dyn LabeledGraph) -> String {
    let node_count = graph.node_count();
    let mut colors: Vec<Color> = (0..node_count)
        .map(|node| {
            let mut hasher = Sha256::new();
            hasher.update(b"node");
            update_str(graph.node_label(node), &mut hasher);
            hasher.finalize().into()
        })
        .collect();

    for _ in 0..REFINEMENT_ROUNDS {
        let next: Vec<Color> = (0..node_count)
            .map(|node| {
                let mut neighbourhood: Vec<(bool, &str, Color)> = graph
                    .incident_edges(node)
                    .map(|edge| (edge.is_self_loop(), edge.label, colors[edge.to]))
                    .collect();
                neighbourhood.sort_unstable();
                let mut hasher = Sha256::new();
                hasher.update(colors[node]);
                hasher.update((neighbourhood.len() as u64).to_le_bytes());
                for (self_loop, label, color) in neighbourhood {
                    hasher.update([u8::from(self_loop)]);
                    update_str(label, &mut hasher);
                    hasher.update(color);
                }
                hasher.finalize().into()
            })
            .collect();
        colors = next;
    }

    let mut histogram: BTreeMap<Color, u64> = BTreeMap::new();
    for color in &colors {
        *histogram.entry(*color).or_insert(0) += 1;
    }
    let mut hasher = Sha256::new();
    hasher.update((node_count as u64).to_le_bytes());
    hasher.update((graph.edge_count() as u64).to_le_bytes());
    for (color, count) in histogram {
        hasher.update(color);
        hasher.update(count.to_le_bytes());
    }
    format!("{:x}", hasher.finalize())
}

fn update_str(value: &str, hasher: &mut Sha256) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}
