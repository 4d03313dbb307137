//! Profile file subcommands: validate and show

use anyhow::{Context, bail};
use lintrc_core::{ConfigLoader, FileMatcher};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{registry_builder, target_path};
use crate::output;
use crate::{OutputFormat, RegistryOptions};

/// Validate a profile file: it must parse and every override pattern must compile
pub fn validate_command(path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = find_config(path)?;
    let profile = ConfigLoader::load_profile(&path)?;

    for entry in &profile.overrides {
        FileMatcher::new(&entry.files, &entry.excluded_files)?;
    }

    output::print_valid(&path, &profile);
    Ok(())
}

/// Show a profile file, or the configuration it resolves to for a target
///
/// With `resolved` and no explicit file, the directory cascade above the
/// target is loaded and resolved from its nearest config.
pub fn show_command(
    options: &RegistryOptions,
    path: Option<PathBuf>,
    resolved: Option<PathBuf>,
) -> anyhow::Result<()> {
    let Some(target) = resolved else {
        let path = find_config(path)?;
        let profile = ConfigLoader::load_profile(&path)?;
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    };

    let builder = registry_builder(options)?;
    let (entry, target, builder) = match path {
        Some(path) => {
            let profile = ConfigLoader::load_profile(&path)?;
            (profile.id.clone(), target_path(&target), builder.with_profile(profile)?)
        }
        None => {
            let (start, rest) = split_existing(&target);
            let Some(cascade) = ConfigLoader::discover_cascade(&start)? else {
                bail!("No .lintrc file found above {}", target.display());
            };
            debug!(
                "Cascade for {}: {} config files under {}",
                target.display(),
                cascade.profiles.len(),
                cascade.root_dir.display()
            );
            let mut absolute = start
                .canonicalize()
                .with_context(|| format!("Failed to resolve {}", start.display()))?;
            if !rest.as_os_str().is_empty() {
                absolute.push(rest);
            }
            let relative = cascade.relative_target(&absolute).with_context(|| {
                format!(
                    "{} is outside the cascade root {}",
                    target.display(),
                    cascade.root_dir.display()
                )
            })?;
            (cascade.entry, relative, builder.with_profiles(cascade.profiles)?)
        }
    };

    let registry = builder.build();
    let config = registry.resolve(&entry, &target)?;
    output::print_configs(std::slice::from_ref(&config), OutputFormat::Json)
}

fn find_config(path: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match path {
        Some(path) => Ok(path),
        None => ConfigLoader::auto_discover(Path::new("."))?
            .context("No .lintrc file found in the current directory or its parents"),
    }
}

/// Targets need not exist; split off the closest existing directory and
/// the remaining components
fn split_existing(target: &Path) -> (PathBuf, PathBuf) {
    for dir in target.ancestors() {
        if !dir.as_os_str().is_empty() && dir.exists() {
            let rest = target.strip_prefix(dir).map(Path::to_path_buf).unwrap_or_default();
            return (dir.to_path_buf(), rest);
        }
    }
    (PathBuf::from("."), target.to_path_buf())
}
