//! Configuration merging logic
//!
//! Layers are applied in merge order onto an [`EffectiveConfig`]; the layer
//! applied last wins. `extends` is not merged here, the resolver expands it
//! before any layer is applied.

use super::effective::EffectiveConfig;
use super::profile::ConfigLayer;

impl EffectiveConfig {
    /// Merge a layer on top of the accumulated configuration (layer takes precedence)
    ///
    /// - `parser`: last writer wins
    /// - `plugins`: union, first-seen order
    /// - `env`: union of flags, last writer wins per flag
    /// - `globals`, `settings`, `parserOptions`, `rules`: per-key last writer wins
    pub fn merge_layer(&mut self, layer: &ConfigLayer) {
        if let Some(parser) = &layer.parser {
            self.parser = Some(parser.clone());
        }

        for plugin in &layer.plugins {
            if !self.plugins.contains(plugin) {
                self.plugins.push(plugin.clone());
            }
        }

        for (flag, enabled) in &layer.env {
            self.env.insert(flag.clone(), *enabled);
        }

        for (name, access) in &layer.globals {
            self.globals.insert(name.clone(), *access);
        }

        for (key, value) in &layer.settings {
            self.settings.insert(key.clone(), value.clone());
        }

        for (key, value) in &layer.parser_options {
            self.parser_options.insert(key.clone(), value.clone());
        }

        for (rule, setting) in &layer.rules {
            self.rules.insert(rule.clone(), setting.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GlobalAccess, Profile, RuleSetting, Severity};
    use serde_json::json;

    #[test]
    fn test_later_layer_wins_per_rule() {
        let base = Profile::new("base")
            .with_rule("no-var", Severity::Off)
            .with_rule("quotemark", Severity::Off);
        let backend = Profile::new("backend").with_rule("no-var", Severity::Error);

        let mut config = EffectiveConfig::default();
        config.merge_layer(&base.layer);
        config.merge_layer(&backend.layer);

        assert_eq!(config.rule("no-var"), Some(&RuleSetting::Severity(Severity::Error)));
        assert_eq!(config.rule("quotemark"), Some(&RuleSetting::Severity(Severity::Off)));
        assert_eq!(config.rules.len(), 2);
    }

    #[test]
    fn test_options_replaced_not_merged() {
        let mut config = EffectiveConfig::default();
        let first = Profile::new("a").with_rule(
            "indent",
            RuleSetting::with_options(Severity::Error, vec![json!(4)]),
        );
        let second = Profile::new("b").with_rule("indent", Severity::Warn);

        config.merge_layer(&first.layer);
        config.merge_layer(&second.layer);

        assert_eq!(config.rule("indent"), Some(&RuleSetting::Severity(Severity::Warn)));
    }

    #[test]
    fn test_plugins_union_in_first_seen_order() {
        let mut config = EffectiveConfig::default();
        config.merge_layer(&Profile::new("a").with_plugin("react").with_plugin("jest").layer);
        config.merge_layer(&Profile::new("b").with_plugin("jest").with_plugin("@emotion").layer);

        assert_eq!(config.plugins, ["react", "jest", "@emotion"]);
    }

    #[test]
    fn test_parser_last_writer_wins_and_none_keeps() {
        let mut config = EffectiveConfig::default();
        config.merge_layer(&Profile::new("a").with_parser("espree").layer);
        config.merge_layer(&Profile::new("b").with_parser("@typescript-eslint/parser").layer);
        config.merge_layer(&Profile::new("c").layer);

        assert_eq!(config.parser.as_deref(), Some("@typescript-eslint/parser"));
    }

    #[test]
    fn test_env_and_globals_merge() {
        let mut first = Profile::new("a").with_env("browser", true).with_env("node", true);
        first
            .layer
            .globals
            .insert("window".into(), GlobalAccess::Readonly);
        let mut second = Profile::new("b").with_env("node", false);
        second
            .layer
            .globals
            .insert("window".into(), GlobalAccess::Off);

        let mut config = EffectiveConfig::default();
        config.merge_layer(&first.layer);
        config.merge_layer(&second.layer);

        assert_eq!(config.env.get("browser"), Some(&true));
        assert_eq!(config.env.get("node"), Some(&false));
        assert_eq!(config.globals.get("window"), Some(&GlobalAccess::Off));
    }

    #[test]
    fn test_settings_replace_whole_top_level_key() {
        let mut config = EffectiveConfig::default();
        config.merge_layer(
            &Profile::new("a")
                .with_setting("react", json!({ "version": "16", "pragma": "React" }))
                .layer,
        );
        config.merge_layer(&Profile::new("b").with_setting("react", json!({ "version": "18" })).layer);

        assert_eq!(config.settings["react"], json!({ "version": "18" }));
    }
}
