//! Immutable profile registry
//!
//! Profiles are registered once through [`RegistryBuilder`] and never
//! change afterwards. The registry is `Send + Sync`, so one instance can
//! back any number of concurrent resolutions.

use crate::builtin;
use crate::config::{EffectiveConfig, Profile};
use crate::error::LintrcError;
use crate::plugin::PluginCatalog;
use crate::resolver::Resolver;
use crate::result::Result;
use indexmap::IndexMap;
use std::path::Path;

/// Registered profiles plus the plugin catalog used for `plugin:` and
/// `eslint:` extension ids
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: IndexMap<String, Profile>,
    plugins: PluginCatalog,
}

/// Builder for [`ProfileRegistry`]
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    profiles: IndexMap<String, Profile>,
    plugins: PluginCatalog,
}

impl RegistryBuilder {
    /// Register the bundled `backend`, `frontend` and `react-native` profiles
    pub fn with_builtin_profiles(self) -> Result<Self> {
        self.with_profiles(builtin::builtin_profiles()?)
    }

    /// Register one profile; ids must be non-empty and unique
    pub fn with_profile(mut self, profile: Profile) -> Result<Self> {
        if profile.id.is_empty() {
            return Err(LintrcError::config_error("Cannot register a profile without an id"));
        }
        if self.profiles.contains_key(&profile.id) {
            return Err(LintrcError::DuplicateProfile { id: profile.id });
        }
        tracing::debug!(
            "Registering profile '{}' ({} rules, {} overrides)",
            profile.id,
            profile.layer.rules.len(),
            profile.overrides.len()
        );
        self.profiles.insert(profile.id.clone(), profile);
        Ok(self)
    }

    pub fn with_profiles(self, profiles: impl IntoIterator<Item = Profile>) -> Result<Self> {
        profiles
            .into_iter()
            .try_fold(self, |builder, profile| builder.with_profile(profile))
    }

    pub fn with_plugins(mut self, catalog: PluginCatalog) -> Self {
        self.plugins = catalog;
        self
    }

    pub fn build(self) -> ProfileRegistry {
        ProfileRegistry {
            profiles: self.profiles,
            plugins: self.plugins,
        }
    }
}

impl ProfileRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Look up a profile by id, falling back to the plugin catalog's
    /// shareable configs for `plugin:` and `eslint:` ids
    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.profiles
            .get(id)
            .or_else(|| self.plugins.shareable_config(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Registered profile ids in registration order (catalog configs excluded)
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn profiles(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn plugins(&self) -> &PluginCatalog {
        &self.plugins
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(self)
    }

    /// Shorthand for `self.resolver().resolve(id, file)`
    pub fn resolve(&self, id: &str, file: impl AsRef<Path>) -> Result<EffectiveConfig> {
        self.resolver().resolve(id, file)
    }
}
