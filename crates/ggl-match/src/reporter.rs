use ggl_core::{Decision, LabeledGraph};
use serde::{Deserialize, Serialize};

use crate::pattern::Pattern;

/// Injective mapping from pattern nodes to target nodes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Match(Vec<usize>);

impl Match {
    /// Wraps a mapping where entry `i` is the image of pattern node `i`.
    pub fn new(targets: Vec<usize>) -> Self {
        Self(targets)
    }

    /// Returns the image of `pattern_node`.
    pub fn target_of(&self, pattern_node: usize) -> Option<usize> {
        self.0.get(pattern_node).copied()
    }

    /// Returns the mapping as a slice.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Returns the number of mapped pattern nodes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the match maps no node (empty pattern).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns whether all images are pairwise distinct.
    pub fn is_injective(&self) -> bool {
        let mut sorted = self.0.clone();
        sorted.sort_unstable();
        sorted.windows(2).all(|pair| pair[0] != pair[1])
    }

    /// Consumes the match and returns the raw mapping.
    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }
}

/// Consumer of matches produced by [`crate::SubgraphMatcher`].
pub trait MatchReporter {
    /// Called once per match. `pattern_id` is the position of `pattern` in
    /// the caller's pattern list and `mapping[i]` the target node of pattern
    /// node `i`.
    fn report_hit(
        &mut self,
        pattern_id: usize,
        pattern: &dyn Pattern,
        target: &dyn LabeledGraph,
        mapping: &[usize],
    ) -> Decision;
}

/// Reporter that only counts hits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchCounter {
    hits: usize,
}

impl MatchCounter {
    /// Creates a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of reported hits.
    pub fn hits(&self) -> usize {
        self.hits
    }
}

impl MatchReporter for MatchCounter {
    fn report_hit(
        &mut self,
        _pattern_id: usize,
        _pattern: &dyn Pattern,
        _target: &dyn LabeledGraph,
        _mapping: &[usize],
    ) -> Decision {
        self.hits += 1;
        Decision::Continue
    }
}

/// Reporter that keeps every hit together with its pattern id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchStore {
    hits: Vec<(usize, Match)>,
}

impl MatchStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored hits in report order.
    pub fn hits(&self) -> &[(usize, Match)] {
        &self.hits
    }

    /// Returns the matches reported for one pattern.
    pub fn matches_of(&self, pattern_id: usize) -> impl Iterator<Item = &Match> + '_ {
        self.hits
            .iter()
            .filter(move |(id, _)| *id == pattern_id)
            .map(|(_, m)| m)
    }

    /// Returns the number of stored hits.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Returns whether nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Consumes the store and returns the hits.
    pub fn into_hits(self) -> Vec<(usize, Match)> {
        self.hits
    }
}

impl MatchReporter for MatchStore {
    fn report_hit(
        &mut self,
        pattern_id: usize,
        _pattern: &dyn Pattern,
        _target: &dyn LabeledGraph,
        mapping: &[usize],
    ) -> Decision {
        self.hits.push((pattern_id, Match::new(mapping.to_vec())));
        Decision::Continue
    }
}
