//! Caller-supplied plugin capabilities
//!
//! Plugins are never looked up globally. The caller hands the registry a
//! [`PluginCatalog`] describing which rules each plugin defines and which
//! shareable configs it exports (`plugin:<name>/<config>`), plus an optional
//! core entry for un-prefixed rules and `eslint:<config>` ids.

use crate::config::{EffectiveConfig, Profile};
use crate::error::LintrcError;
use crate::result::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

/// Rules and shareable configs provided by one plugin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginDefinition {
    /// Rule names without the plugin prefix
    #[serde(default)]
    pub rules: BTreeSet<String>,

    /// Shareable configs keyed by config name
    #[serde(default)]
    pub configs: IndexMap<String, Profile>,
}

impl PluginDefinition {
    pub fn with_rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules.extend(rules.into_iter().map(Into::into));
        self
    }

    pub fn with_config(mut self, name: impl Into<String>, profile: Profile) -> Self {
        self.configs.insert(name.into(), profile);
        self
    }
}

/// Mapping from plugin identifier to its capabilities
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginCatalog {
    /// Core rules and `eslint:*` configs; `None` disables core rule checks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core: Option<PluginDefinition>,

    #[serde(default)]
    pub plugins: IndexMap<String, PluginDefinition>,
}

/// Problem found when checking an effective configuration against a catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RuleIssue {
    /// The rule's plugin is missing from the effective plugin set
    PluginNotEnabled { rule: String, plugin: String },
    /// The catalog knows no plugin by this name
    UnknownPlugin { rule: String, plugin: String },
    /// The plugin (or core) does not define this rule
    UnknownRule { rule: String },
}

impl fmt::Display for RuleIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleIssue::PluginNotEnabled { rule, plugin } => {
                write!(f, "rule '{rule}' needs plugin '{plugin}', which is not enabled")
            }
            RuleIssue::UnknownPlugin { rule, plugin } => {
                write!(f, "rule '{rule}' refers to unknown plugin '{plugin}'")
            }
            RuleIssue::UnknownRule { rule } => write!(f, "rule '{rule}' is not defined"),
        }
    }
}

impl PluginCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a JSON/JSONC or YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| LintrcError::io_error(path, e))?;
        let mut catalog: PluginCatalog = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).map_err(|e| LintrcError::parse_error(path, e))?
            }
            _ => json5::from_str(&content).map_err(|e| LintrcError::parse_error(path, e))?,
        };
        catalog.assign_config_ids();
        tracing::debug!(
            "Loaded plugin catalog with {} plugins from {}",
            catalog.plugins.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn with_core(mut self, core: PluginDefinition) -> Self {
        self.core = Some(core);
        self.assign_config_ids();
        self
    }

    pub fn with_plugin(mut self, name: impl Into<String>, plugin: PluginDefinition) -> Self {
        self.plugins.insert(name.into(), plugin);
        self.assign_config_ids();
        self
    }

    pub fn plugin(&self, name: &str) -> Option<&PluginDefinition> {
        self.plugins.get(name)
    }

    /// Look up a shareable config by its extension id
    ///
    /// Handles `plugin:<plugin>/<config>` and `eslint:<config>`; other ids
    /// are not catalog ids and yield `None`.
    pub fn shareable_config(&self, id: &str) -> Option<&Profile> {
        if let Some(rest) = id.strip_prefix("plugin:") {
            let (plugin, config) = rest.rsplit_once('/')?;
            return self.plugins.get(plugin)?.configs.get(config);
        }
        if let Some(config) = id.strip_prefix("eslint:") {
            return self.core.as_ref()?.configs.get(config);
        }
        None
    }

    /// Check every enabled rule of `config` against the catalog
    pub fn validate(&self, config: &EffectiveConfig) -> Vec<RuleIssue> {
        let mut issues = Vec::new();

        for (rule, _) in config.enabled_rules() {
            match plugin_prefix(rule) {
                Some((plugin, local)) => {
                    if !config.plugins.iter().any(|p| p == plugin) {
                        issues.push(RuleIssue::PluginNotEnabled {
                            rule: rule.clone(),
                            plugin: plugin.to_string(),
                        });
                    }
                    match self.plugins.get(plugin) {
                        None => issues.push(RuleIssue::UnknownPlugin {
                            rule: rule.clone(),
                            plugin: plugin.to_string(),
                        }),
                        Some(definition) if !definition.rules.contains(local) => {
                            issues.push(RuleIssue::UnknownRule { rule: rule.clone() })
                        }
                        Some(_) => {}
                    }
                }
                None => {
                    if let Some(core) = &self.core
                        && !core.rules.contains(rule.as_str())
                    {
                        issues.push(RuleIssue::UnknownRule { rule: rule.clone() });
                    }
                }
            }
        }

        issues
    }

    /// Shareable configs carry their extension id so errors name them properly
    fn assign_config_ids(&mut self) {
        if let Some(core) = &mut self.core {
            for (name, profile) in core.configs.iter_mut() {
                profile.id = format!("eslint:{name}");
            }
        }
        for (plugin, definition) in self.plugins.iter_mut() {
            for (name, profile) in definition.configs.iter_mut() {
                profile.id = format!("plugin:{plugin}/{name}");
            }
        }
    }
}

/// Split `@scope/plugin/rule` into (`@scope/plugin`, `rule`)
fn plugin_prefix(rule: &str) -> Option<(&str, &str)> {
    rule.rsplit_once('/')
}
