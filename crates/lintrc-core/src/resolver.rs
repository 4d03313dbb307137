//! Profile resolution
//!
//! Resolving a profile for a file happens in three steps:
//!
//! 1. Expand `extends` depth-first into a linear merge order, deepest first
//!    and the requested profile last. A profile reached twice keeps its
//!    first position; reaching a profile that is still on the current path
//!    is a cycle.
//! 2. Merge every profile's layer in that order.
//! 3. Test the overrides of every profile in the chain, in merge order and
//!    then declaration order, and merge those matching the file on top.
//!    A profile with a `base_dir` (a cascaded config file) sees the target
//!    relative to that directory and never matches files outside it.
//!
//! Resolution never mutates the registry and returns no partial result on
//! error.

use crate::config::{EffectiveConfig, Profile};
use crate::error::LintrcError;
use crate::matcher::{FileMatcher, normalize_path};
use crate::registry::ProfileRegistry;
use crate::result::Result;
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Resolves profiles from a borrowed, immutable registry
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    registry: &'a ProfileRegistry,
}

struct ChainWalk<'a> {
    stack: Vec<String>,
    seen: HashSet<String>,
    order: Vec<&'a Profile>,
}

impl<'a> ChainWalk<'a> {
    fn new() -> Self {
        Self {
            stack: Vec::new(),
            seen: HashSet::new(),
            order: Vec::new(),
        }
    }
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a ProfileRegistry) -> Self {
        Self { registry }
    }

    /// Linear merge order for `id`: deepest-extended first, `id` last
    pub fn extension_chain(&self, id: &str) -> Result<Vec<&'a Profile>> {
        let mut walk = ChainWalk::new();
        self.walk(id, None, &mut walk)?;
        Ok(walk.order)
    }

    /// Resolve `id` for the file at `file`
    ///
    /// # Errors
    ///
    /// - [`LintrcError::ProfileNotFound`] if `id` or anything it extends is unknown
    /// - [`LintrcError::CyclicExtension`] if the extension graph loops
    /// - [`LintrcError::InvalidGlobPattern`] if an override pattern is malformed
    pub fn resolve(&self, id: &str, file: impl AsRef<Path>) -> Result<EffectiveConfig> {
        let file = file.as_ref();
        let chain = self.extension_chain(id)?;
        debug!(
            "Resolving '{}' for {} through {} profiles",
            id,
            file.display(),
            chain.len()
        );

        let mut config = EffectiveConfig::new(id, file);
        config.chain = chain.iter().map(|p| p.id.clone()).collect();

        for profile in &chain {
            config.merge_layer(&profile.layer);
        }

        for profile in &chain {
            let scoped = scoped_target(file, profile.base_dir.as_deref());
            for (index, entry) in profile.overrides.iter().enumerate() {
                let matcher = FileMatcher::new(&entry.files, &entry.excluded_files)?;
                if !scoped.as_deref().is_some_and(|target| matcher.is_match(target)) {
                    trace!("Override {}#{} skipped for {}", profile.id, index, file.display());
                    continue;
                }

                let label = format!("{}#{}", profile.id, index);
                trace!("Override {} applies to {}", label, file.display());

                if !entry.layer.extends.is_empty() {
                    let mut walk = ChainWalk::new();
                    for base in &entry.layer.extends {
                        self.walk(base, Some(&label), &mut walk)?;
                    }
                    for base in walk.order {
                        config.merge_layer(&base.layer);
                    }
                }
                config.merge_layer(&entry.layer);
                config.applied_overrides.push(label);
            }
        }

        Ok(config)
    }

    /// Resolve `id` for many files in parallel; results keep input order
    pub fn resolve_many<P>(&self, id: &str, files: &[P]) -> Vec<(PathBuf, Result<EffectiveConfig>)>
    where
        P: AsRef<Path> + Sync,
    {
        files
            .par_iter()
            .map(|file| (file.as_ref().to_path_buf(), self.resolve(id, file)))
            .collect()
    }

    fn walk(&self, id: &str, referenced_by: Option<&str>, state: &mut ChainWalk<'a>) -> Result<()> {
        if state.stack.iter().any(|entry| entry == id) {
            let mut chain = state.stack.clone();
            chain.push(id.to_string());
            return Err(LintrcError::CyclicExtension { chain });
        }
        if state.seen.contains(id) {
            trace!("Profile '{}' already merged, skipping repeat", id);
            return Ok(());
        }

        let profile = self
            .registry
            .get(id)
            .ok_or_else(|| LintrcError::profile_not_found(id, referenced_by))?;

        state.stack.push(id.to_string());
        for base in profile.extends() {
            self.walk(base, Some(id), state)?;
        }
        state.stack.pop();

        state.seen.insert(id.to_string());
        state.order.push(profile);
        Ok(())
    }
}

/// Target path as seen by the overrides of a profile rooted at `base_dir`
///
/// `None` when the target lies outside `base_dir`.
fn scoped_target(file: &Path, base_dir: Option<&Path>) -> Option<PathBuf> {
    let Some(base) = base_dir else {
        return Some(file.to_path_buf());
    };
    let base = normalize_path(base);
    if base.is_empty() {
        return Some(file.to_path_buf());
    }
    let target = normalize_path(file);
    target
        .strip_prefix(&base)
        .and_then(|rest| rest.strip_prefix('/'))
        .map(PathBuf::from)
}
