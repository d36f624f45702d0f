use ggl_aut::find_automorphisms;
use ggl_core::errors::GglError;
use ggl_core::LabeledGraph;
use ggl_match::{AutomorphismOrder, Pattern, SubgraphMatcher};
use ggl_rule::{CopyAndPaste, EdgeContext, LeftSidePattern, Rule, RuleEdge};
use log::{debug, info, warn};

use crate::applier::RuleApplier;
use crate::config::EngineConfig;
use crate::sink::GraphSink;

/// A consistent rule with its left side and optional symmetry order.
#[derive(Debug, Clone)]
pub struct PreparedRule<'r> {
    rule: &'r Rule,
    left: LeftSidePattern<'r>,
    order: Option<AutomorphismOrder>,
}

impl<'r> PreparedRule<'r> {
    /// Returns the rule.
    pub fn rule(&self) -> &'r Rule {
        self.rule
    }

    /// Returns the left side searched for in targets.
    pub fn left_side(&self) -> &LeftSidePattern<'r> {
        &self.left
    }

    /// Returns the symmetry order, if symmetry breaking is on.
    pub fn order(&self) -> Option<&AutomorphismOrder> {
        self.order.as_ref()
    }
}

/// Front end running matcher and applier for a set of rules.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    config: EngineConfig,
}

impl RuleEngine {
    /// Creates an engine after validating `config`.
    pub fn new(config: EngineConfig) -> Result<Self, GglError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Keeps the consistent rules and prepares them for matching.
    /// Inconsistent rules are skipped with a warning.
    pub fn prepare<'r>(&self, rules: &'r [Rule]) -> Vec<PreparedRule<'r>> {
        rules
            .iter()
            .filter(|rule| {
                let status = rule.is_consistent();
                if !status.is_consistent() {
                    warn!("skipping rule {:?}: {status}", rule.id());
                }
                status.is_consistent()
            })
            .map(|rule| self.prepare_rule(rule))
            .collect()
    }

    fn prepare_rule<'r>(&self, rule: &'r Rule) -> PreparedRule<'r> {
        let left = rule.left_side();
        let order = self
            .config
            .matching
            .symmetry_breaking
            .then(|| rule_order(rule, &left, self.config.matching.max_automorphisms));
        PreparedRule { rule, left, order }
    }

    /// Applies every consistent rule at every match in `target` and pushes
    /// the results into `sink`. Returns the number of pushed graphs.
    ///
    /// The hit cap of the matching configuration is shared by all rules.
    pub fn apply_rules<S: GraphSink + ?Sized>(
        &self,
        rules: &[Rule],
        target: &dyn LabeledGraph,
        sink: &mut S,
    ) -> Result<usize, GglError> {
        let prepared = self.prepare(rules);
        self.apply_prepared(&prepared, target, sink)
    }

    /// Shorthand for [`RuleEngine::apply_rules`] with one rule.
    pub fn apply_rule<S: GraphSink + ?Sized>(
        &self,
        rule: &Rule,
        target: &dyn LabeledGraph,
        sink: &mut S,
    ) -> Result<usize, GglError> {
        self.apply_rules(std::slice::from_ref(rule), target, sink)
    }

    /// Runs already prepared rules against `target`.
    pub fn apply_prepared<S: GraphSink + ?Sized>(
        &self,
        prepared: &[PreparedRule<'_>],
        target: &dyn LabeledGraph,
        sink: &mut S,
    ) -> Result<usize, GglError> {
        let patterns: Vec<&dyn Pattern> = prepared
            .iter()
            .map(|entry| &entry.left as &dyn Pattern)
            .collect();
        let orders: Vec<Option<AutomorphismOrder>> =
            prepared.iter().map(|entry| entry.order.clone()).collect();
        let mut applier = RuleApplier::for_rules(
            prepared.iter().map(|entry| entry.rule),
            &self.config.application,
            &mut *sink,
        )?;
        let matcher = SubgraphMatcher::new(self.config.matching.clone());
        let hits = matcher.find_matches_all_with_orders(&patterns, &orders, target, &mut applier);
        let applied = applier.applied();
        applier.finish()?;
        info!(
            "{} rules produced {applied} graphs from {hits} matches",
            prepared.len()
        );
        Ok(applied)
    }
}

/// Symmetry order of the left side restricted to permutations that also
/// map the whole rule onto itself, so that suppressed matches would only
/// have produced identical results.
fn rule_order(rule: &Rule, left: &LeftSidePattern<'_>, limit: usize) -> AutomorphismOrder {
    let automorphisms = find_automorphisms(left, limit);
    let kept: Vec<Vec<usize>> = automorphisms
        .permutations()
        .iter()
        .filter(|perm| preserves_rule(rule, left, perm))
        .cloned()
        .collect();
    debug!(
        "rule {:?}: {} of {} left automorphisms preserve the rule",
        rule.id(),
        kept.len(),
        automorphisms.len()
    );
    AutomorphismOrder::new(left.node_count(), kept)
}

fn preserves_rule(rule: &Rule, left: &LeftSidePattern<'_>, perm: &[usize]) -> bool {
    let nodes = rule.nodes();
    let mut core: Vec<usize> = (0..nodes.len()).collect();
    for (local, &image) in perm.iter().enumerate() {
        core[left.to_core(local)] = left.to_core(image);
    }
    if (0..nodes.len()).any(|node| nodes[core[node]] != nodes[node]) {
        return false;
    }
    let edge_keys = |map: &dyn Fn(usize) -> usize| {
        let mut keys: Vec<(usize, usize, EdgeContext, &str)> = rule
            .edges()
            .iter()
            .map(|edge: &RuleEdge| {
                let (a, b) = (map(edge.source), map(edge.target));
                (a.min(b), a.max(b), edge.context, edge.label.as_str())
            })
            .collect();
        keys.sort_unstable();
        keys
    };
    if edge_keys(&|node| node) != edge_keys(&|node| core[node]) {
        return false;
    }
    rule.copy_and_paste().iter().all(|directive| {
        let mapped = CopyAndPaste {
            source: core[directive.source],
            paste_target: core[directive.paste_target],
            target_filter: directive
                .target_filter
                .as_ref()
                .map(|filter| filter.iter().map(|&node| core[node]).collect()),
            edge_labels: directive.edge_labels.clone(),
        };
        rule.copy_and_paste().contains(&mapped)
    })
}
