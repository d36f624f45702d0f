use ggl_core::errors::GglError;
use ggl_match::MatchConfig;
use serde::{Deserialize, Serialize};

use crate::rewrite::LabelRewriteMode;

/// Options of a single rule application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplyConfig {
    /// Resolve every connected component of the left side against its own
    /// copy of the target component it matched into.
    pub add_each_component: bool,
    /// How label-change nodes receive their new label.
    pub label_rewrite: LabelRewriteMode,
}

impl ApplyConfig {
    /// Returns a copy with per-component application switched on or off.
    pub fn with_add_each_component(mut self, enabled: bool) -> Self {
        self.add_each_component = enabled;
        self
    }

    /// Returns a copy using `mode` for label changes.
    pub fn with_label_rewrite(mut self, mode: LabelRewriteMode) -> Self {
        self.label_rewrite = mode;
        self
    }

    /// Rejects settings the applier cannot honour.
    pub fn validate(&self) -> Result<(), GglError> {
        if let LabelRewriteMode::PreserveSuffix { separator } = &self.label_rewrite {
            if separator.is_empty() {
                return Err(GglError::config(
                    "empty-separator",
                    "preserve_suffix needs a non-empty separator",
                ));
            }
        }
        Ok(())
    }
}

/// Complete engine configuration: matching plus application.
///
/// ```yaml
/// matching:
///   max_hits: 100
///   symmetry_breaking: true
/// application:
///   add_each_component: false
///   label_rewrite:
///     mode: preserve_suffix
///     separator: ":"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Matcher settings.
    pub matching: MatchConfig,
    /// Applier settings.
    pub application: ApplyConfig,
}

impl EngineConfig {
    /// Parses and validates a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self, GglError> {
        let config: Self = serde_yaml::from_str(text)
            .map_err(|err| GglError::config("parse-yaml", err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self, GglError> {
        let config: Self = serde_json::from_str(text)
            .map_err(|err| GglError::config("parse-json", err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Renders the configuration as YAML.
    pub fn to_yaml_string(&self) -> Result<String, GglError> {
        serde_yaml::to_string(self).map_err(|err| GglError::serde("serialize-yaml", err.to_string()))
    }

    /// Validates both sections.
    pub fn validate(&self) -> Result<(), GglError> {
        self.matching.validate()?;
        self.application.validate()
    }
}
