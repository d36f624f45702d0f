use std::fmt;

use serde::{Deserialize, Serialize};

/// Computes the new label of a label-change node.
pub trait LabelRewrite: fmt::Debug {
    /// Returns the label replacing `current`, the label the matched target
    /// node carries, given the rule's right label.
    fn rewrite(&self, current: &str, right: &str) -> String;
}

/// Writes the right label verbatim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaceLabel;

impl LabelRewrite for ReplaceLabel {
    fn rewrite(&self, _current: &str, right: &str) -> String {
        right.to_owned()
    }
}

/// Replaces the part of the label before the first `separator` and keeps
/// the rest, e.g. `"C:12"` becomes `"O:12"` for right label `"O"`.
///
/// Labels without the separator are replaced wholesale, and so is every
/// label when the right label already carries a separator of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreserveSuffix {
    separator: String,
}

impl PreserveSuffix {
    /// Creates the rewrite for `separator`.
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    /// Returns the separator.
    pub fn separator(&self) -> &str {
        &self.separator
    }
}

impl LabelRewrite for PreserveSuffix {
    fn rewrite(&self, current: &str, right: &str) -> String {
        if self.separator.is_empty() || right.contains(self.separator.as_str()) {
            return right.to_owned();
        }
        match current.split_once(self.separator.as_str()) {
            Some((_, suffix)) => format!("{right}{}{suffix}", self.separator),
            None => right.to_owned(),
        }
    }
}

/// Serializable choice of [`LabelRewrite`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LabelRewriteMode {
    /// [`ReplaceLabel`].
    #[default]
    Replace,
    /// [`PreserveSuffix`] with the given separator.
    PreserveSuffix {
        /// Separator between the replaced head and the kept suffix.
        separator: String,
    },
}

impl LabelRewriteMode {
    /// Instantiates the selected rewrite.
    pub fn rewriter(&self) -> Box<dyn LabelRewrite> {
        match self {
            LabelRewriteMode::Replace => Box::new(ReplaceLabel),
            LabelRewriteMode::PreserveSuffix { separator } => {
                Box::new(PreserveSuffix::new(separator.clone()))
            }
        }
    }
}
