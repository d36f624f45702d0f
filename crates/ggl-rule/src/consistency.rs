use std::fmt::{self, Display};
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Composable set of structural problems found by [`crate::Rule::is_consistent`].
///
/// The empty set means the rule is consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleConsistency(u32);

const NAMES: [(RuleConsistency, &str); 8] = [
    (RuleConsistency::NO_RULE_ID, "no-rule-id"),
    (RuleConsistency::WRONG_EDGE_CONTEXT, "wrong-edge-context"),
    (RuleConsistency::EDGE_ENDPOINT_OUT_OF_RANGE, "edge-endpoint-out-of-range"),
    (
        RuleConsistency::COPY_AND_PASTE_SOURCE_NOT_LEFT_ONLY,
        "copy-and-paste-source-not-left-only",
    ),
    (
        RuleConsistency::COPY_AND_PASTE_TARGET_NOT_RIGHT,
        "copy-and-paste-target-not-right",
    ),
    (
        RuleConsistency::COPY_AND_PASTE_FILTER_OUT_OF_RANGE,
        "copy-and-paste-filter-out-of-range",
    ),
    (RuleConsistency::CONSTRAINT_NODE_NOT_LEFT, "constraint-node-not-left"),
    (
        RuleConsistency::LABEL_CHANGE_WITHOUT_RIGHT_LABEL,
        "label-change-without-right-label",
    ),
];

impl RuleConsistency {
    /// No problem found.
    pub const CONSISTENT: Self = Self(0);
    /// The rule has no (or an empty) id.
    pub const NO_RULE_ID: Self = Self(1);
    /// An edge context does not fit the contexts of its endpoints.
    pub const WRONG_EDGE_CONTEXT: Self = Self(1 << 1);
    /// An edge references a node index outside the core graph.
    pub const EDGE_ENDPOINT_OUT_OF_RANGE: Self = Self(1 << 2);
    /// A copy-and-paste source is missing or not a left-only node.
    pub const COPY_AND_PASTE_SOURCE_NOT_LEFT_ONLY: Self = Self(1 << 3);
    /// A paste target is missing or does not survive application.
    pub const COPY_AND_PASTE_TARGET_NOT_RIGHT: Self = Self(1 << 4);
    /// A copy-and-paste target filter references a node outside the core graph.
    pub const COPY_AND_PASTE_FILTER_OUT_OF_RANGE: Self = Self(1 << 5);
    /// A constraint references a node that is not on the left side.
    pub const CONSTRAINT_NODE_NOT_LEFT: Self = Self(1 << 6);
    /// A label-change node lacks its right label.
    pub const LABEL_CHANGE_WITHOUT_RIGHT_LABEL: Self = Self(1 << 7);

    /// Returns the raw bits.
    pub fn bits(&self) -> u32 {
        self.0
    }

    /// Returns whether no flag is set.
    pub fn is_consistent(&self) -> bool {
        self.0 == 0
    }

    /// Returns whether all flags of `other` are set.
    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Sets the flags of `other`.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Returns the codes of the set flags.
    pub fn names(&self) -> Vec<&'static str> {
        NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl BitOr for RuleConsistency {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for RuleConsistency {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl Display for RuleConsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_consistent() {
            write!(f, "consistent")
        } else {
            write!(f, "{}", self.names().join("|"))
        }
    }
}
