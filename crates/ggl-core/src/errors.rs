//! Structured error types shared across GGL crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`GglError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (indices, labels, sizes, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the GGL engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum GglError {
    /// Graph structural errors (unknown nodes, non-isolated removals, ...).
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Rule model errors (index out of range, malformed side views).
    #[error("rule error: {0}")]
    Rule(ErrorInfo),
    /// Matcher misuse (mismatched pattern lists, invalid options).
    #[error("match error: {0}")]
    Match(ErrorInfo),
    /// Broken invariants detected while applying a rule to a match.
    #[error("apply error: {0}")]
    Apply(ErrorInfo),
    /// Configuration loading errors.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl GglError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            GglError::Graph(info)
            | GglError::Rule(info)
            | GglError::Match(info)
            | GglError::Apply(info)
            | GglError::Config(info)
            | GglError::Serde(info) => info,
        }
    }

    /// Returns the stable machine readable code of the error.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Adds a context entry to the payload, keeping the error family.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        match self {
            GglError::Graph(info) => GglError::Graph(info.with_context(key, value)),
            GglError::Rule(info) => GglError::Rule(info.with_context(key, value)),
            GglError::Match(info) => GglError::Match(info.with_context(key, value)),
            GglError::Apply(info) => GglError::Apply(info.with_context(key, value)),
            GglError::Config(info) => GglError::Config(info.with_context(key, value)),
            GglError::Serde(info) => GglError::Serde(info.with_context(key, value)),
        }
    }

    /// Shorthand for a [`GglError::Graph`] error.
    pub fn graph(code: impl Into<String>, message: impl Into<String>) -> Self {
        GglError::Graph(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`GglError::Rule`] error.
    pub fn rule(code: impl Into<String>, message: impl Into<String>) -> Self {
        GglError::Rule(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`GglError::Match`] error.
    pub fn matching(code: impl Into<String>, message: impl Into<String>) -> Self {
        GglError::Match(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`GglError::Apply`] error.
    pub fn apply(code: impl Into<String>, message: impl Into<String>) -> Self {
        GglError::Apply(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`GglError::Config`] error.
    pub fn config(code: impl Into<String>, message: impl Into<String>) -> Self {
        GglError::Config(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`GglError::Serde`] error.
    pub fn serde(code: impl Into<String>, message: impl Into<String>) -> Self {
        GglError::Serde(ErrorInfo::new(code, message))
    }
}
