//! The flattened, path-specific result of resolution

use super::profile::{ConfigLayer, Profile};
use super::rule::{GlobalAccess, RuleSetting};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Fully merged configuration for one profile and one target file
///
/// Computed per call by the resolver and owned by the caller; nothing in
/// the registry points back to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveConfig {
    /// Profile the configuration was resolved from
    pub profile: String,

    /// Target file path as given to the resolver
    pub file: PathBuf,

    /// Linear merge order, deepest-extended first
    pub chain: Vec<String>,

    /// Overrides that matched, as `<profile id>#<index>`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub applied_overrides: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parser: Option<String>,

    pub plugins: Vec<String>,

    pub env: BTreeMap<String, bool>,

    pub globals: BTreeMap<String, GlobalAccess>,

    pub settings: BTreeMap<String, Value>,

    pub parser_options: BTreeMap<String, Value>,

    pub rules: BTreeMap<String, RuleSetting>,
}

impl EffectiveConfig {
    pub(crate) fn new(profile: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            profile: profile.into(),
            file: file.into(),
            ..Default::default()
        }
    }

    /// Setting for a rule, if any merged source mentions it
    pub fn rule(&self, name: &str) -> Option<&RuleSetting> {
        self.rules.get(name)
    }

    /// Rules whose severity is not `off`
    pub fn enabled_rules(&self) -> impl Iterator<Item = (&String, &RuleSetting)> {
        self.rules.iter().filter(|(_, setting)| setting.is_enabled())
    }

    /// Flatten this configuration into a standalone profile with no `extends`
    ///
    /// Registering the result and extending it is equivalent to extending
    /// the chain it was resolved from, minus overrides (which are already
    /// folded in for this file).
    pub fn into_profile(self, id: impl Into<String>) -> Profile {
        Profile {
            id: id.into(),
            layer: ConfigLayer {
                extends: Vec::new(),
                parser: self.parser,
                parser_options: self.parser_options.into_iter().collect(),
                plugins: self.plugins,
                env: self.env.into_iter().collect(),
                globals: self.globals.into_iter().collect(),
                rules: self.rules.into_iter().collect(),
                settings: self.settings.into_iter().collect(),
            },
            ..Default::default()
        }
    }
}
