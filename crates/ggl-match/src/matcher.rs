use std::cmp::Reverse;
use std::collections::BTreeMap;

use ggl_core::{Decision, LabeledGraph};
use log::{debug, trace, warn};

use crate::config::MatchConfig;
use crate::label_matches;
use crate::order::AutomorphismOrder;
use crate::pattern::Pattern;
use crate::reporter::MatchReporter;

/// Frontier-first backtracking subgraph matcher.
///
/// Matches are injective, non-induced embeddings: every pattern edge needs a
/// distinct target edge between the corresponding images, while extra target
/// edges are ignored. The only ordering guarantee is exhaustiveness up to
/// [`MatchConfig::max_hits`].
#[derive(Debug, Clone, Default)]
pub struct SubgraphMatcher {
    config: MatchConfig,
}

impl SubgraphMatcher {
    /// Creates a matcher with the given configuration.
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Reports every match of `pattern` in `target` and returns the number
    /// of reported hits.
    pub fn find_matches(
        &self,
        pattern: &dyn Pattern,
        target: &dyn LabeledGraph,
        reporter: &mut dyn MatchReporter,
    ) -> usize {
        self.find_matches_with_order(pattern, None, target, reporter)
    }

    /// Like [`SubgraphMatcher::find_matches`], additionally rejecting matches
    /// that `order` does not admit.
    pub fn find_matches_with_order(
        &self,
        pattern: &dyn Pattern,
        order: Option<&AutomorphismOrder>,
        target: &dyn LabeledGraph,
        reporter: &mut dyn MatchReporter,
    ) -> usize {
        let mut budget = self.config.max_hits;
        let (hits, _) = self.run_pattern(0, pattern, order, target, reporter, &mut budget);
        hits
    }

    /// Searches several patterns in caller order against one target.
    ///
    /// The hit cap is shared across all patterns. [`Decision::Backtrack`]
    /// moves on to the next pattern, [`Decision::Stop`] ends the call.
    pub fn find_matches_all(
        &self,
        patterns: &[&dyn Pattern],
        target: &dyn LabeledGraph,
        reporter: &mut dyn MatchReporter,
    ) -> usize {
        self.find_matches_all_with_orders(patterns, &[], target, reporter)
    }

    /// Like [`SubgraphMatcher::find_matches_all`]; `orders[i]` applies to
    /// `patterns[i]` and missing entries mean no order.
    pub fn find_matches_all_with_orders(
        &self,
        patterns: &[&dyn Pattern],
        orders: &[Option<AutomorphismOrder>],
        target: &dyn LabeledGraph,
        reporter: &mut dyn MatchReporter,
    ) -> usize {
        let mut budget = self.config.max_hits;
        let mut total = 0;
        for (pattern_id, pattern) in patterns.iter().enumerate() {
            if budget == 0 {
                break;
            }
            let order = orders.get(pattern_id).and_then(Option::as_ref);
            let (hits, decision) =
                self.run_pattern(pattern_id, *pattern, order, target, reporter, &mut budget);
            total += hits;
            if decision.is_stop() {
                break;
            }
        }
        total
    }

    fn run_pattern(
        &self,
        pattern_id: usize,
        pattern: &dyn Pattern,
        order: Option<&AutomorphismOrder>,
        target: &dyn LabeledGraph,
        reporter: &mut dyn MatchReporter,
        budget: &mut usize,
    ) -> (usize, Decision) {
        if *budget == 0 {
            return (0, Decision::Stop);
        }
        let node_count = pattern.node_count();
        if node_count > target.node_count() || pattern.edge_count() > target.edge_count() {
            debug!(
                "pattern {pattern_id} skipped: {} nodes/{} edges vs target {}/{}",
                node_count,
                pattern.edge_count(),
                target.node_count(),
                target.edge_count()
            );
            return (0, Decision::Continue);
        }
        let order = order.filter(|order| {
            let fits = order.pattern_size() == node_count;
            if !fits {
                warn!(
                    "ignoring automorphism order for {} nodes on pattern {pattern_id} with {node_count}",
                    order.pattern_size()
                );
            }
            fits
        });
        if node_count == 0 {
            *budget -= 1;
            let decision = reporter.report_hit(pattern_id, pattern, target, &[]);
            return (1, if *budget == 0 { Decision::Stop } else { decision });
        }
        let Some(plan) = SearchPlan::build(pattern) else {
            return (0, Decision::Continue);
        };

        let mut search = Search {
            pattern_id,
            pattern,
            target,
            plan: &plan,
            order,
            mapping: vec![None; node_count],
            used: vec![false; target.node_count()],
            budget: *budget,
            hits: 0,
        };
        let decision = search.extend(0, reporter);
        *budget = search.budget;
        debug!(
            "pattern {pattern_id}: {} hits, decision {decision:?}",
            search.hits
        );
        (search.hits, decision)
    }
}

/// Per-position bookkeeping of the search order.
struct PlanStep<'p> {
    node: usize,
    /// Earliest ordered neighbour; its image supplies the candidates.
    parent: Option<usize>,
    /// Earlier ordered neighbours with the labels of the connecting edges.
    links: Vec<(usize, Vec<&'p str>)>,
    loops: Vec<&'p str>,
    plain_degree: usize,
    /// Constraints whose last node is mapped at this position.
    checks: Vec<usize>,
}

struct SearchPlan<'p> {
    steps: Vec<PlanStep<'p>>,
}

impl<'p> SearchPlan<'p> {
    fn build(pattern: &'p dyn Pattern) -> Option<Self> {
        let node_count = pattern.node_count();
        let constraints = pattern.constraints();
        let mut weight = vec![0usize; node_count];
        for constraint in constraints {
            for node in constraint.nodes() {
                if node >= node_count {
                    warn!("constraint {constraint:?} references node {node} outside the pattern");
                    return None;
                }
                weight[node] += 1;
            }
        }

        let order = node_order(pattern, &weight);
        let mut position = vec![0usize; node_count];
        for (pos, &node) in order.iter().enumerate() {
            position[node] = pos;
        }
        let mut checks = vec![Vec::new(); node_count];
        for (idx, constraint) in constraints.iter().enumerate() {
            let last = constraint
                .nodes()
                .into_iter()
                .map(|node| position[node])
                .max()
                .unwrap_or(0);
            checks[last].push(idx);
        }

        let steps = order
            .iter()
            .enumerate()
            .map(|(pos, &node)| {
                let mut earlier: Vec<usize> = pattern
                    .incident_edges(node)
                    .filter(|edge| !edge.is_self_loop() && position[edge.to] < pos)
                    .map(|edge| edge.to)
                    .collect();
                earlier.sort_by_key(|&other| position[other]);
                earlier.dedup();
                let loops: Vec<&'p str> = pattern
                    .incident_edges(node)
                    .filter(|edge| edge.is_self_loop())
                    .map(|edge| edge.label)
                    .collect();
                PlanStep {
                    node,
                    parent: earlier.first().copied(),
                    links: earlier
                        .into_iter()
                        .map(|other| (other, pattern.edge_labels_between(node, other)))
                        .collect(),
                    plain_degree: pattern.degree(node) - loops.len(),
                    loops,
                    checks: std::mem::take(&mut checks[pos]),
                }
            })
            .collect();
        Some(Self { steps })
    }
}

/// Orders pattern nodes frontier-first: the next node is the unordered one
/// with the most edges into the ordered set, ties broken by constraint
/// weight, degree and index. When the frontier is empty a new component is
/// seeded with the highest (constraint weight, degree) node.
fn node_order(pattern: &dyn Pattern, weight: &[usize]) -> Vec<usize> {
    let node_count = pattern.node_count();
    let mut ordered = vec![false; node_count];
    let mut links = vec![0usize; node_count];
    let mut order = Vec::with_capacity(node_count);
    while order.len() < node_count {
        let frontier = (0..node_count)
            .filter(|&node| !ordered[node] && links[node] > 0)
            .max_by_key(|&node| (links[node], weight[node], pattern.degree(node), Reverse(node)));
        let next = match frontier {
            Some(node) => node,
            None => match (0..node_count)
                .filter(|&node| !ordered[node])
                .max_by_key(|&node| (weight[node], pattern.degree(node), Reverse(node)))
            {
                Some(seed) => seed,
                None => break,
            },
        };
        ordered[next] = true;
        order.push(next);
        for edge in pattern.incident_edges(next) {
            if !edge.is_self_loop() && !ordered[edge.to] {
                links[edge.to] += 1;
            }
        }
    }
    order
}

struct Search<'s> {
    pattern_id: usize,
    pattern: &'s dyn Pattern,
    target: &'s dyn LabeledGraph,
    plan: &'s SearchPlan<'s>,
    order: Option<&'s AutomorphismOrder>,
    mapping: Vec<Option<usize>>,
    used: Vec<bool>,
    budget: usize,
    hits: usize,
}

impl Search<'_> {
    fn extend(&mut self, depth: usize, reporter: &mut dyn MatchReporter) -> Decision {
        let plan = self.plan;
        let Some(step) = plan.steps.get(depth) else {
            return self.report(reporter);
        };
        let candidates: Vec<usize> = match step.parent {
            Some(parent) => {
                let Some(anchor) = self.mapping[parent] else {
                    return Decision::Continue;
                };
                let mut around: Vec<usize> = self
                    .target
                    .incident_edges(anchor)
                    .map(|edge| edge.to)
                    .collect();
                around.sort_unstable();
                around.dedup();
                around
            }
            None => (0..self.target.node_count()).collect(),
        };

        for candidate in candidates {
            if !self.feasible(step, candidate) {
                continue;
            }
            self.mapping[step.node] = Some(candidate);
            self.used[candidate] = true;
            let admitted = self.constraints_hold(step)
                && self.order.map_or(true, |order| order.admits(&self.mapping));
            let decision = if admitted {
                self.extend(depth + 1, reporter)
            } else {
                Decision::Continue
            };
            self.used[candidate] = false;
            self.mapping[step.node] = None;
            if decision != Decision::Continue {
                return decision;
            }
        }
        Decision::Continue
    }

    fn feasible(&self, step: &PlanStep<'_>, candidate: usize) -> bool {
        if self.used[candidate] {
            return false;
        }
        let wildcard = self.pattern.wildcard();
        if !label_matches(
            wildcard,
            self.pattern.node_label(step.node),
            self.target.node_label(candidate),
        ) {
            return false;
        }
        let loops = self.target.self_loop_count(candidate);
        if loops < step.loops.len() || self.target.degree(candidate) - loops < step.plain_degree {
            return false;
        }
        if !step.loops.is_empty()
            && !covers(
                &step.loops,
                &self.target.edge_labels_between(candidate, candidate),
                wildcard,
            )
        {
            return false;
        }
        step.links.iter().all(|(other, labels)| match self.mapping[*other] {
            Some(image) => covers(
                labels,
                &self.target.edge_labels_between(candidate, image),
                wildcard,
            ),
            None => false,
        })
    }

    fn constraints_hold(&self, step: &PlanStep<'_>) -> bool {
        let constraints = self.pattern.constraints();
        step.checks
            .iter()
            .all(|&idx| constraints[idx].is_valid_match(self.target, &self.mapping))
    }

    fn report(&mut self, reporter: &mut dyn MatchReporter) -> Decision {
        if self.budget == 0 {
            return Decision::Stop;
        }
        let mapping: Vec<usize> = self.mapping.iter().flatten().copied().collect();
        trace!("pattern {} hit {mapping:?}", self.pattern_id);
        self.hits += 1;
        self.budget -= 1;
        let decision = reporter.report_hit(self.pattern_id, self.pattern, self.target, &mapping);
        if self.budget == 0 {
            Decision::Stop
        } else {
            decision
        }
    }
}

/// Returns whether the `available` target edge labels can cover `required`
/// pattern edge labels one-to-one. Exact labels are consumed first; wildcard
/// edges then take any of the remaining target edges.
fn covers(required: &[&str], available: &[&str], wildcard: Option<&str>) -> bool {
    if required.len() > available.len() {
        return false;
    }
    let mut pool: BTreeMap<&str, usize> = BTreeMap::new();
    for &label in available {
        *pool.entry(label).or_insert(0) += 1;
    }
    for &label in required {
        if wildcard == Some(label) {
            continue;
        }
        match pool.get_mut(label) {
            Some(count) if *count > 0 => *count -= 1,
            _ => return false,
        }
    }
    true
}
