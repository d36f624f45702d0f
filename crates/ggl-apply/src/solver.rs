use ggl_core::errors::GglError;
use ggl_core::{Decision, LabeledGraph};
use ggl_graph::Graph;
use ggl_match::{AutomorphismOrder, MatchReporter, Pattern, SubgraphMatcher};
use ggl_rule::Rule;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::apply::Rewrite;
use crate::config::EngineConfig;
use crate::engine::RuleEngine;
use crate::sink::UniqueGraphSink;

/// Bounds of a [`DepthFirstRewriter`] search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverLimits {
    /// Maximum number of rule applications along one path.
    pub max_depth: usize,
    /// Maximum number of new graphs explored before giving up.
    pub max_expansions: usize,
}

impl Default for SolverLimits {
    fn default() -> Self {
        Self {
            max_depth: 64,
            max_expansions: 100_000,
        }
    }
}

/// Result of [`DepthFirstRewriter::search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// First graph satisfying the goal, if one was reached.
    pub solution: Option<Graph>,
    /// Ids of the rules applied from the start graph to the solution.
    pub path: Vec<String>,
    /// Number of distinct graphs derived during the search.
    pub expansions: usize,
    /// Whether the search stopped on the expansion budget.
    pub budget_exhausted: bool,
}

#[derive(Debug)]
struct Step<'r> {
    rewrite: Rewrite<'r>,
    order: Option<AutomorphismOrder>,
}

struct SearchState<'g> {
    goal: &'g dyn Fn(&Graph) -> bool,
    visited: UniqueGraphSink,
    path: Vec<String>,
    expansions: usize,
    budget_exhausted: bool,
    solution: Option<Graph>,
    error: Option<GglError>,
}

/// Depth-first match, apply and re-match driver.
///
/// Starting from a graph, every match of every rule is applied and the
/// search descends into each result not seen before, until a graph
/// satisfies the goal predicate. Graphs are deduplicated up to isomorphism
/// across the whole search.
#[derive(Debug)]
pub struct DepthFirstRewriter<'r> {
    config: EngineConfig,
    limits: SolverLimits,
    steps: Vec<Step<'r>>,
}

impl<'r> DepthFirstRewriter<'r> {
    /// Prepares the consistent subset of `rules` with the engine settings.
    pub fn new(engine: &RuleEngine, rules: &'r [Rule], limits: SolverLimits) -> Result<Self, GglError> {
        let config = engine.config().clone();
        let steps = engine
            .prepare(rules)
            .into_iter()
            .map(|prepared| {
                Ok(Step {
                    rewrite: Rewrite::new(prepared.rule(), &config.application)?,
                    order: prepared.order().cloned(),
                })
            })
            .collect::<Result<Vec<_>, GglError>>()?;
        Ok(Self {
            config,
            limits,
            steps,
        })
    }

    /// Returns the search bounds.
    pub fn limits(&self) -> &SolverLimits {
        &self.limits
    }

    /// Searches for a graph reachable from `start` that satisfies `goal`.
    ///
    /// Fails only when a rule application breaks; running out of depth or
    /// budget yields an outcome without solution.
    pub fn search(&self, start: &Graph, goal: impl Fn(&Graph) -> bool) -> Result<RewriteOutcome, GglError> {
        let mut state = SearchState {
            goal: &goal,
            visited: UniqueGraphSink::new(),
            path: Vec::new(),
            expansions: 0,
            budget_exhausted: false,
            solution: None,
            error: None,
        };
        state.visited.insert(start.clone());
        self.descend(&mut state, start, 0);
        if let Some(err) = state.error {
            return Err(err);
        }
        let path = if state.solution.is_some() {
            state.path
        } else {
            Vec::new()
        };
        debug!(
            "depth-first search finished after {} expansions (solved: {})",
            state.expansions,
            state.solution.is_some()
        );
        Ok(RewriteOutcome {
            solution: state.solution,
            path,
            expansions: state.expansions,
            budget_exhausted: state.budget_exhausted,
        })
    }

    fn descend(&self, state: &mut SearchState<'_>, graph: &Graph, depth: usize) -> Decision {
        if (state.goal)(graph) {
            state.solution = Some(graph.clone());
            return Decision::Stop;
        }
        if depth >= self.limits.max_depth {
            return Decision::Continue;
        }
        let matcher = SubgraphMatcher::new(self.config.matching.clone());
        for step in &self.steps {
            let mut expander = Expander {
                solver: self,
                step,
                state: &mut *state,
                depth,
                decision: Decision::Continue,
            };
            let pattern: &dyn Pattern = step.rewrite.left();
            matcher.find_matches_with_order(pattern, step.order.as_ref(), graph, &mut expander);
            if expander.decision.is_stop() {
                return Decision::Stop;
            }
        }
        Decision::Continue
    }
}

/// Reporter applying one rule at one search node and recursing into the
/// results.
struct Expander<'a, 'r, 'g> {
    solver: &'a DepthFirstRewriter<'r>,
    step: &'a Step<'r>,
    state: &'a mut SearchState<'g>,
    depth: usize,
    decision: Decision,
}

impl Expander<'_, '_, '_> {
    fn stop(&mut self) -> Decision {
        self.decision = Decision::Stop;
        Decision::Stop
    }
}

impl MatchReporter for Expander<'_, '_, '_> {
    fn report_hit(
        &mut self,
        _pattern_id: usize,
        _pattern: &dyn Pattern,
        target: &dyn LabeledGraph,
        mapping: &[usize],
    ) -> Decision {
        let child = match self.step.rewrite.apply(target, mapping) {
            Ok(child) => child,
            Err(err) => {
                self.state.error = Some(err);
                return self.stop();
            }
        };
        if !self.state.visited.insert(child.clone()) {
            return Decision::Continue;
        }
        if self.state.expansions >= self.solver.limits.max_expansions {
            self.state.budget_exhausted = true;
            return self.stop();
        }
        self.state.expansions += 1;
        let rule_id = self.step.rewrite.rule().id().unwrap_or_default().to_owned();
        trace!("depth {}: applied {rule_id}", self.depth + 1);
        self.state.path.push(rule_id);
        if self.solver.descend(self.state, &child, self.depth + 1).is_stop() {
            return self.stop();
        }
        self.state.path.pop();
        Decision::Continue
    }
}
