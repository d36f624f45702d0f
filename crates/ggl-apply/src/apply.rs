use std::collections::{BTreeMap, BTreeSet};

use ggl_core::errors::GglError;
use ggl_core::LabeledGraph;
use ggl_graph::{component_ids, ArenaGraph, Graph};
use ggl_match::label_matches;
use ggl_rule::{EdgeContext, LeftSidePattern, NodeContext, Rule, RuleEdge};
use log::trace;

use crate::config::ApplyConfig;
use crate::rewrite::LabelRewrite;

/// Applies `rule` to `target` at one match of its left side.
///
/// `mapping[i]` is the target node of left-side node `i` (local numbering
/// of [`Rule::left_side`]). The target is copied; the returned graph is the
/// compacted result of the edit.
pub fn apply_rule(
    rule: &Rule,
    target: &dyn LabeledGraph,
    mapping: &[usize],
    config: &ApplyConfig,
) -> Result<Graph, GglError> {
    Rewrite::new(rule, config)?.apply(target, mapping)
}

/// Edge removed together with a left-only node whose other endpoint
/// survives.
#[derive(Debug, Clone)]
struct Dangling {
    source: usize,
    survivor: usize,
    label: String,
}

/// A validated rule ready to be applied repeatedly.
#[derive(Debug)]
pub(crate) struct Rewrite<'r> {
    rule: &'r Rule,
    left: LeftSidePattern<'r>,
    add_each_component: bool,
    rewriter: Box<dyn LabelRewrite>,
}

impl<'r> Rewrite<'r> {
    pub(crate) fn new(rule: &'r Rule, config: &ApplyConfig) -> Result<Self, GglError> {
        let status = rule.is_consistent();
        if !status.is_consistent() {
            return Err(GglError::apply("inconsistent-rule", "rule failed the consistency check")
                .with_context("rule", rule.id().unwrap_or("<unnamed>"))
                .with_context("status", status));
        }
        config.validate()?;
        Ok(Self {
            rule,
            left: rule.left_side(),
            add_each_component: config.add_each_component,
            rewriter: config.label_rewrite.rewriter(),
        })
    }

    pub(crate) fn rule(&self) -> &'r Rule {
        self.rule
    }

    pub(crate) fn left(&self) -> &LeftSidePattern<'r> {
        &self.left
    }

    pub(crate) fn apply(&self, target: &dyn LabeledGraph, mapping: &[usize]) -> Result<Graph, GglError> {
        self.check_mapping(target, mapping)?;
        let (mut host, mut image) = self.build_host(target, mapping);
        self.relabel(&mut host, &image)?;
        self.remove_left_edges(&mut host, &image)?;
        let dangling = self.remove_left_nodes(&mut host, &image)?;
        self.insert_right(&mut host, &mut image)?;
        self.paste(&mut host, &image, dangling)?;
        let (graph, _) = host.compact();
        trace!(
            "rule {:?} produced {} nodes / {} edges",
            self.rule.id(),
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    fn error(&self, code: &str, message: &str) -> GglError {
        GglError::apply(code, message).with_context("rule", self.rule.id().unwrap_or("<unnamed>"))
    }

    fn check_mapping(&self, target: &dyn LabeledGraph, mapping: &[usize]) -> Result<(), GglError> {
        if mapping.len() != self.left.node_count() {
            return Err(self
                .error("mapping-length", "mapping does not cover the left side")
                .with_context("expected", self.left.node_count())
                .with_context("found", mapping.len()));
        }
        let mut seen = BTreeSet::new();
        for (local, &node) in mapping.iter().enumerate() {
            if node >= target.node_count() {
                return Err(self
                    .error("unknown-node", "mapping points outside the target")
                    .with_context("pattern_node", local)
                    .with_context("node", node));
            }
            if !seen.insert(node) {
                return Err(self
                    .error("non-injective-mapping", "two pattern nodes share a target node")
                    .with_context("node", node));
            }
        }
        Ok(())
    }

    /// Copies the target into an arena and returns the slot of every matched
    /// core node.
    fn build_host(&self, target: &dyn LabeledGraph, mapping: &[usize]) -> (ArenaGraph, Vec<Option<usize>>) {
        let mut image = vec![None; self.rule.nodes().len()];
        if !self.add_each_component {
            let host = ArenaGraph::from_graph(target);
            for (local, &node) in mapping.iter().enumerate() {
                image[self.left.to_core(local)] = Some(node);
            }
            return (host, image);
        }
        let (component_of, count) = component_ids(target);
        let mut touched = vec![false; count];
        let mut host = ArenaGraph::new();
        for component in self.left.connected_components() {
            let hit = component_of[mapping[component[0]]];
            touched[hit] = true;
            let keep: Vec<bool> = component_of.iter().map(|&id| id == hit).collect();
            let slots = host.extend_from(target, &keep);
            for local in component {
                image[self.left.to_core(local)] = slots[mapping[local]];
            }
        }
        let untouched: Vec<bool> = component_of.iter().map(|&id| !touched[id]).collect();
        host.extend_from(target, &untouched);
        (host, image)
    }

    fn slot(&self, image: &[Option<usize>], core: usize) -> Result<usize, GglError> {
        image
            .get(core)
            .copied()
            .flatten()
            .ok_or_else(|| self.error("unmapped-node", "rule node has no image").with_context("node", core))
    }

    fn relabel(&self, host: &mut ArenaGraph, image: &[Option<usize>]) -> Result<(), GglError> {
        for (core, node) in self.rule.nodes().iter().enumerate() {
            if node.context != NodeContext::LabelChange {
                continue;
            }
            let right = node.right_label().ok_or_else(|| {
                self.error("missing-right-label", "label change without right label")
                    .with_context("node", core)
            })?;
            let slot = self.slot(image, core)?;
            let label = self.rewriter.rewrite(host.node_label(slot)?, right);
            host.set_label(slot, label)?;
        }
        Ok(())
    }

    /// Assigns every left edge a distinct target edge between the same
    /// images and deletes those assigned to left-only edges. Exact labels
    /// pick first so wildcard edges cannot steal an edge an exact one needs.
    fn remove_left_edges(&self, host: &mut ArenaGraph, image: &[Option<usize>]) -> Result<(), GglError> {
        let wildcard = self.rule.wildcard();
        let mut groups: BTreeMap<(usize, usize), Vec<&RuleEdge>> = BTreeMap::new();
        for edge in self.rule.edges().iter().filter(|edge| edge.context.on_left()) {
            let a = self.slot(image, edge.source)?;
            let b = self.slot(image, edge.target)?;
            groups.entry((a.min(b), a.max(b))).or_default().push(edge);
        }
        for ((a, b), mut edges) in groups {
            edges.sort_by_key(|edge| {
                (
                    wildcard == Some(edge.label.as_str()),
                    edge.context != EdgeContext::Context,
                )
            });
            let mut free = host.edges_between(a, b)?;
            for edge in edges {
                let position = free.iter().position(|&id| {
                    host.edge(id)
                        .map_or(false, |record| label_matches(wildcard, &edge.label, &record.label))
                });
                let Some(position) = position else {
                    return Err(self
                        .error("missing-edge", "matched edge not present in the target")
                        .with_context("source", edge.source)
                        .with_context("target", edge.target)
                        .with_context("label", &edge.label));
                };
                let id = free.swap_remove(position);
                if edge.context == EdgeContext::LeftOnly {
                    host.remove_edge(id)?;
                }
            }
        }
        Ok(())
    }

    fn remove_left_nodes(&self, host: &mut ArenaGraph, image: &[Option<usize>]) -> Result<Vec<Dangling>, GglError> {
        let mut doomed = BTreeMap::new();
        for (core, node) in self.rule.nodes().iter().enumerate() {
            if node.context == NodeContext::LeftOnly {
                doomed.insert(self.slot(image, core)?, core);
            }
        }
        let mut dangling = Vec::new();
        for (&slot, &core) in &doomed {
            for id in host.self_loops(slot)? {
                host.remove_edge(id)?;
            }
            for id in host.incident(slot)? {
                let record = host.remove_edge(id)?;
                let survivor = record.other(slot);
                if !doomed.contains_key(&survivor) {
                    dangling.push(Dangling {
                        source: core,
                        survivor,
                        label: record.label,
                    });
                }
            }
            host.remove_node(slot)?;
        }
        Ok(dangling)
    }

    fn insert_right(&self, host: &mut ArenaGraph, image: &mut [Option<usize>]) -> Result<(), GglError> {
        for (core, node) in self.rule.nodes().iter().enumerate() {
            if node.context == NodeContext::RightOnly {
                image[core] = Some(host.add_node(node.label.clone()));
            }
        }
        for edge in self.rule.edges() {
            if edge.context == EdgeContext::RightOnly {
                let a = self.slot(image, edge.source)?;
                let b = self.slot(image, edge.target)?;
                host.add_edge(a, b, edge.label.clone())?;
            }
        }
        Ok(())
    }

    fn paste(&self, host: &mut ArenaGraph, image: &[Option<usize>], dangling: Vec<Dangling>) -> Result<(), GglError> {
        let core_of: BTreeMap<usize, usize> = self
            .rule
            .nodes()
            .iter()
            .enumerate()
            .filter(|(_, node)| node.context.is_context())
            .filter_map(|(core, _)| image[core].map(|slot| (slot, core)))
            .collect();
        for edge in dangling {
            let other_core = core_of.get(&edge.survivor).copied();
            let mut pasted = 0;
            for directive in self.rule.copy_and_paste_for(edge.source) {
                if !directive.admits(other_core, &edge.label) {
                    continue;
                }
                let paste_target = self.slot(image, directive.paste_target)?;
                host.add_edge(paste_target, edge.survivor, edge.label.clone())?;
                pasted += 1;
            }
            if pasted == 0 {
                trace!(
                    "dropped dangling edge '{}' of rule node {} to slot {}",
                    edge.label,
                    edge.source,
                    edge.survivor
                );
            }
        }
        Ok(())
    }
}
