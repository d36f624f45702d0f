use ggl_core::errors::GglError;
use ggl_core::{Decision, LabeledGraph};
use ggl_match::{MatchReporter, Pattern};
use ggl_rule::Rule;
use log::{debug, warn};

use crate::apply::Rewrite;
use crate::config::ApplyConfig;
use crate::sink::GraphSink;

/// Match reporter that applies a rule to every reported match and pushes
/// the result into a [`GraphSink`].
///
/// Pattern `i` of a multi-pattern search is the left side of rule `i`. The
/// first failed application is recorded and ends the search.
#[derive(Debug)]
pub struct RuleApplier<'r, S: GraphSink> {
    rewrites: Vec<Rewrite<'r>>,
    sink: S,
    applied: usize,
    error: Option<GglError>,
}

impl<'r, S: GraphSink> RuleApplier<'r, S> {
    /// Creates an applier for a single rule. Fails for inconsistent rules.
    pub fn new(rule: &'r Rule, config: &ApplyConfig, sink: S) -> Result<Self, GglError> {
        Self::for_rules([rule], config, sink)
    }

    /// Creates an applier for several rules, indexed by pattern id.
    pub fn for_rules(
        rules: impl IntoIterator<Item = &'r Rule>,
        config: &ApplyConfig,
        sink: S,
    ) -> Result<Self, GglError> {
        let rewrites = rules
            .into_iter()
            .map(|rule| Rewrite::new(rule, config))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            rewrites,
            sink,
            applied: 0,
            error: None,
        })
    }

    /// Number of graphs pushed so far.
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// First application error, if any.
    pub fn error(&self) -> Option<&GglError> {
        self.error.as_ref()
    }

    /// Returns the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the applier and returns the sink regardless of errors.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Consumes the applier, surfacing the recorded error if there is one.
    pub fn finish(self) -> Result<S, GglError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.sink),
        }
    }

    fn fail(&mut self, err: GglError) -> Decision {
        warn!("rule application failed: {err}");
        if self.error.is_none() {
            self.error = Some(err);
        }
        Decision::Stop
    }
}

impl<S: GraphSink> MatchReporter for RuleApplier<'_, S> {
    fn report_hit(
        &mut self,
        pattern_id: usize,
        _pattern: &dyn Pattern,
        target: &dyn LabeledGraph,
        mapping: &[usize],
    ) -> Decision {
        let Some(rewrite) = self.rewrites.get(pattern_id) else {
            let err = GglError::apply("unknown-pattern", "no rule registered for pattern")
                .with_context("pattern_id", pattern_id)
                .with_context("rules", self.rewrites.len());
            return self.fail(err);
        };
        match rewrite.apply(target, mapping) {
            Ok(graph) => {
                debug!(
                    "rule {:?} applied at {mapping:?}",
                    rewrite.rule().id()
                );
                self.sink.add(graph);
                self.applied += 1;
                Decision::Continue
            }
            Err(err) => self.fail(err),
        }
    }
}
