//! Profile and override declarations
//!
//! A [`Profile`] is one named configuration file: a [`ConfigLayer`] plus the
//! file-level `id`, `root` and `overrides` fields. An [`Override`] is a
//! partial layer scoped to file globs.

use super::rule::{GlobalAccess, RuleSetting};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Fields shared by profiles and overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigLayer {
    /// Profiles merged underneath this one, in order
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "one_or_many"
    )]
    #[schemars(with = "Vec<String>", description = "Profile ids to extend (string or list)")]
    pub extends: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Parser identifier")]
    pub parser: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    #[schemars(with = "BTreeMap<String, Value>", description = "Free-form parser options")]
    pub parser_options: IndexMap<String, Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schemars(description = "Plugin identifiers")]
    pub plugins: Vec<String>,

    #[serde(
        default,
        skip_serializing_if = "IndexMap::is_empty",
        deserialize_with = "deserialize_flags"
    )]
    #[schemars(with = "BTreeMap<String, bool>", description = "Environment flags")]
    pub env: IndexMap<String, bool>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    #[schemars(
        with = "BTreeMap<String, Value>",
        description = "Global variables: true/'writable', false/'readonly', or 'off'"
    )]
    pub globals: IndexMap<String, GlobalAccess>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    #[schemars(
        with = "BTreeMap<String, Value>",
        description = "Rule settings: severity (0-2, 'off', 'warn', 'error') or [severity, ...options]"
    )]
    pub rules: IndexMap<String, RuleSetting>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    #[schemars(with = "BTreeMap<String, Value>", description = "Shared plugin settings")]
    pub settings: IndexMap<String, Value>,
}

/// A named configuration profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// JSON schema reference, ignored by resolution
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Profile identifier; loaders fall back to the file stem when empty
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Stop the upward search for ancestor configuration files here
    #[serde(default, skip_serializing_if = "is_false")]
    pub root: bool,

    #[serde(flatten)]
    pub layer: ConfigLayer,

    /// Path-scoped partial configurations, applied after extension
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<Override>,

    /// Directory of a cascaded config file, relative to the cascade root.
    /// Its override globs match target paths relative to this directory.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// A partial configuration applied to files matching `files`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Override {
    #[serde(deserialize_with = "one_or_many")]
    #[schemars(with = "Vec<String>", description = "Glob patterns this override applies to")]
    pub files: Vec<String>,

    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "one_or_many"
    )]
    #[schemars(with = "Vec<String>", description = "Glob patterns excluded from `files`")]
    pub excluded_files: Vec<String>,

    #[serde(flatten)]
    pub layer: ConfigLayer,
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}

fn deserialize_flags<'de, D>(deserializer: D) -> Result<IndexMap<String, bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Flag(bool),
        Text(String),
    }

    IndexMap::<String, RawFlag>::deserialize(deserializer)?
        .into_iter()
        .map(|(name, raw)| match raw {
            RawFlag::Flag(flag) => Ok((name, flag)),
            RawFlag::Text(text) => match text.as_str() {
                "true" => Ok((name, true)),
                "false" => Ok((name, false)),
                other => Err(serde::de::Error::custom(format!(
                    "env flag '{name}' must be a boolean, got '{other}'"
                ))),
            },
        })
        .collect()
}

impl Profile {
    /// Create an empty profile with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_extends<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.layer.extends.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_parser(mut self, parser: impl Into<String>) -> Self {
        self.layer.parser = Some(parser.into());
        self
    }

    pub fn with_plugin(mut self, plugin: impl Into<String>) -> Self {
        self.layer.plugins.push(plugin.into());
        self
    }

    pub fn with_rule(mut self, name: impl Into<String>, setting: impl Into<RuleSetting>) -> Self {
        self.layer.rules.insert(name.into(), setting.into());
        self
    }

    pub fn with_env(mut self, flag: impl Into<String>, enabled: bool) -> Self {
        self.layer.env.insert(flag.into(), enabled);
        self
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: Value) -> Self {
        self.layer.settings.insert(key.into(), value);
        self
    }

    pub fn with_override(mut self, entry: Override) -> Self {
        self.overrides.push(entry);
        self
    }

    pub fn as_root(mut self) -> Self {
        self.root = true;
        self
    }

    /// Ids this profile extends, in declaration order
    pub fn extends(&self) -> &[String] {
        &self.layer.extends
    }
}

impl Override {
    /// Create an override for the given file globs
    pub fn for_files<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: patterns.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn excluding<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_files
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn with_rule(mut self, name: impl Into<String>, setting: impl Into<RuleSetting>) -> Self {
        self.layer.rules.insert(name.into(), setting.into());
        self
    }

    pub fn with_parser(mut self, parser: impl Into<String>) -> Self {
        self.layer.parser = Some(parser.into());
        self
    }

    pub fn with_plugin(mut self, plugin: impl Into<String>) -> Self {
        self.layer.plugins.push(plugin.into());
        self
    }

    pub fn with_extends<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.layer.extends.extend(ids.into_iter().map(Into::into));
        self
    }
}
