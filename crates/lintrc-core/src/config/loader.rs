//! Configuration file discovery and loading

use super::profile::Profile;
use crate::error::LintrcError;
use crate::result::Result;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory config file names, in lookup priority order
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".lintrc.json",
    ".lintrc.jsonc",
    ".lintrc.yaml",
    ".lintrc.yml",
    ".lintrc.toml",
];

const SUPPORTED_EXTENSIONS: &[&str] = &["json", "jsonc", "json5", "yaml", "yml", "toml"];

/// Configuration files found by walking upward from a directory
///
/// `profiles` is ordered nearest-first; each one already extends the profile
/// of its nearest ancestor, so resolving `entry` merges the whole cascade.
/// Target paths passed to the resolver are relative to `root_dir`, the
/// directory of the topmost config.
#[derive(Debug, Clone)]
pub struct ConfigCascade {
    pub entry: String,
    pub root_dir: PathBuf,
    pub profiles: Vec<Profile>,
}

impl ConfigCascade {
    /// Express an absolute path relative to `root_dir`
    ///
    /// Returns `None` for paths outside the cascade root.
    pub fn relative_target(&self, path: &Path) -> Option<PathBuf> {
        path.strip_prefix(&self.root_dir).ok().map(Path::to_path_buf)
    }
}

/// Configuration loader for discovering and loading profile files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a profile from a specific file
    ///
    /// The format is chosen by extension: `.json`, `.jsonc` and `.json5` go
    /// through json5 (comments and trailing commas allowed), `.yaml`/`.yml`
    /// through serde_yaml and `.toml` through toml. A profile without an `id`
    /// takes the file stem.
    pub fn load_profile(path: &Path) -> Result<Profile> {
        let content = fs::read_to_string(path).map_err(|e| LintrcError::io_error(path, e))?;
        let mut profile = Self::parse_profile(path, &content)?;

        if profile.id.is_empty() {
            profile.id = default_profile_id(path);
        }
        tracing::debug!("Loaded profile '{}' from {}", profile.id, path.display());
        Ok(profile)
    }

    /// Parse profile content; `path` only selects the format and labels errors
    pub fn parse_profile(path: &Path, content: &str) -> Result<Profile> {
        let ext = path.extension().and_then(|e| e.to_str());

        match ext {
            Some("json") | Some("jsonc") | Some("json5") => {
                json5::from_str(content).map_err(|e| LintrcError::parse_error(path, e))
            }
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(content).map_err(|e| LintrcError::parse_error(path, e))
            }
            Some("toml") => toml::from_str(content).map_err(|e| LintrcError::parse_error(path, e)),
            _ => Err(LintrcError::config_error(format!(
                "Unsupported file extension for '{}' (expected .json, .jsonc, .json5, .yaml, .yml or .toml)",
                path.display()
            ))),
        }
    }

    /// Load every supported profile file under `dir`, sorted by path
    pub fn load_dir(dir: &Path) -> Result<Vec<Profile>> {
        if !dir.is_dir() {
            return Err(LintrcError::config_error(format!(
                "Profile directory not found: {}",
                dir.display()
            )));
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = entry.map_err(|e| {
                LintrcError::config_error(format!("Failed to walk {}: {e}", dir.display()))
            })?;
            let path = entry.path();
            let supported = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext));
            if entry.file_type().is_file() && supported {
                paths.push(path.to_path_buf());
            }
        }
        paths.sort();

        tracing::debug!("Found {} profile files in {}", paths.len(), dir.display());
        paths.iter().map(|path| Self::load_profile(path)).collect()
    }

    /// Auto-discover the nearest config file by traversing upward from `start_path`
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = canonical_dir(start_path)?;

        loop {
            if let Some(found) = config_in_dir(&current) {
                tracing::debug!("Found config: {}", found.display());
                return Ok(Some(found));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Ok(None),
            }
        }
    }

    /// Collect the cascade of config files above `start_path`
    ///
    /// Walks upward collecting at most one config file per directory and
    /// stops after the first profile declaring `root: true`. Profiles are
    /// registered under their file path; each gets its ancestor's id
    /// prepended to `extends` and its directory, relative to the topmost
    /// config's directory, as `base_dir`. Returns `None` when no config file
    /// exists.
    pub fn discover_cascade(start_path: &Path) -> Result<Option<ConfigCascade>> {
        let mut current = canonical_dir(start_path)?;
        let mut found = Vec::new();

        loop {
            if let Some(path) = config_in_dir(&current) {
                let mut profile = Self::load_profile(&path)?;
                profile.id = path.display().to_string();
                let is_root = profile.root;
                found.push((profile, current.clone()));
                if is_root {
                    tracing::debug!("Stopping cascade at root config {}", path.display());
                    break;
                }
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        let Some((_, root_dir)) = found.last() else {
            return Ok(None);
        };
        let root_dir = root_dir.clone();

        let mut profiles: Vec<Profile> = found
            .into_iter()
            .map(|(mut profile, dir)| {
                let relative = dir.strip_prefix(&root_dir).unwrap_or(dir.as_path());
                profile.base_dir = Some(relative.to_path_buf());
                profile
            })
            .collect();

        for i in 0..profiles.len() - 1 {
            let ancestor = profiles[i + 1].id.clone();
            profiles[i].layer.extends.insert(0, ancestor);
        }

        Ok(Some(ConfigCascade {
            entry: profiles[0].id.clone(),
            root_dir,
            profiles,
        }))
    }
}

fn canonical_dir(start_path: &Path) -> Result<PathBuf> {
    let path = start_path
        .canonicalize()
        .map_err(|e| LintrcError::io_error(start_path, e))?;
    if path.is_file() {
        Ok(path.parent().map(Path::to_path_buf).unwrap_or(path))
    } else {
        Ok(path)
    }
}

fn config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

fn default_profile_id(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    stem.trim_start_matches('.').to_string()
}
