//! CLI command implementations
//!
//! Top-level commands (resolve, chain, profiles, check, schema) live in this
//! file; profile file management is in `commands/config.rs`.

pub mod config;

use anyhow::{Context, bail};
use lintrc_core::{ConfigLoader, PluginCatalog, ProfileRegistry, RegistryBuilder};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::output;
use crate::{OutputFormat, RegistryOptions};

/// Build the registry from the bundled profiles, profile directories and catalog
pub fn load_registry(options: &RegistryOptions) -> anyhow::Result<ProfileRegistry> {
    Ok(registry_builder(options)?.build())
}

/// Registry builder preloaded from the global flags
pub fn registry_builder(options: &RegistryOptions) -> anyhow::Result<RegistryBuilder> {
    let mut builder = ProfileRegistry::builder();

    if options.builtin {
        builder = builder.with_builtin_profiles()?;
    }

    for dir in &options.profile_dirs {
        let profiles = ConfigLoader::load_dir(dir)
            .with_context(|| format!("Failed to load profiles from {}", dir.display()))?;
        debug!("Registering {} profiles from {}", profiles.len(), dir.display());
        builder = builder.with_profiles(profiles)?;
    }

    if let Some(path) = &options.plugins {
        let catalog = PluginCatalog::load(path)?;
        builder = builder.with_plugins(catalog);
    }

    Ok(builder)
}

/// Match targets against patterns relative to the working directory
pub fn target_path(path: &Path) -> PathBuf {
    if path.is_absolute()
        && let Ok(cwd) = std::env::current_dir()
        && let Ok(relative) = path.strip_prefix(&cwd)
    {
        return relative.to_path_buf();
    }
    path.to_path_buf()
}

/// Resolve command implementation
pub fn resolve_command(
    options: &RegistryOptions,
    profile: &str,
    paths: &[PathBuf],
    format: OutputFormat,
) -> anyhow::Result<()> {
    let registry = load_registry(options)?;
    let targets: Vec<PathBuf> = paths.iter().map(|p| target_path(p)).collect();
    debug!("Resolving '{}' for {} paths", profile, targets.len());

    let mut configs = Vec::new();
    let mut failures = 0;
    for (path, result) in registry.resolver().resolve_many(profile, targets.as_slice()) {
        match result {
            Ok(config) => configs.push(config),
            Err(e) => {
                output::print_failure(&path, &e);
                failures += 1;
            }
        }
    }

    if !configs.is_empty() {
        output::print_configs(&configs, format)?;
    }

    if failures > 0 {
        bail!(
            "{} of {} paths failed to resolve against '{}'",
            failures,
            targets.len(),
            profile
        );
    }
    Ok(())
}

/// Chain command implementation
pub fn chain_command(options: &RegistryOptions, profile: &str) -> anyhow::Result<()> {
    let registry = load_registry(options)?;
    let chain = registry.resolver().extension_chain(profile)?;
    output::print_chain(&chain);
    Ok(())
}

/// Profiles command implementation
pub fn profiles_command(options: &RegistryOptions) -> anyhow::Result<()> {
    let registry = load_registry(options)?;
    if registry.is_empty() {
        info!("No profiles registered");
        return Ok(());
    }
    output::print_profiles(registry.profiles());
    Ok(())
}

/// Check command implementation
pub fn check_command(
    options: &RegistryOptions,
    profile: &str,
    paths: &[PathBuf],
) -> anyhow::Result<()> {
    if options.plugins.is_none() {
        bail!("check needs a plugin catalog; pass --plugins <FILE>");
    }

    let registry = load_registry(options)?;
    let targets: Vec<PathBuf> = paths.iter().map(|p| target_path(p)).collect();

    let mut total = 0;
    for (path, result) in registry.resolver().resolve_many(profile, targets.as_slice()) {
        let config = result?;
        let issues = registry.plugins().validate(&config);
        output::print_issues(&path, &issues);
        total += issues.len();
    }

    if total > 0 {
        bail!("Found {} rule issue(s)", total);
    }
    Ok(())
}

/// Schema command implementation
pub fn schema_command() -> anyhow::Result<()> {
    let schema = lintrc_core::profile_schema()?;
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
