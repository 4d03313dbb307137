//! File glob matching for overrides
//!
//! Semantics are fixed rather than inherited from any host tool:
//! - matching is case-sensitive
//! - `*`, `?` and `[...]` never match `/`
//! - `**` as a whole segment matches zero or more segments
//! - a pattern without `/` is matched against the file name only
//! - target paths are normalised (`\` to `/`, leading `./` dropped)

use crate::error::LintrcError;
use crate::result::Result;
use glob::{MatchOptions, Pattern};
use std::path::Path;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug, Clone)]
struct CompiledPattern {
    pattern: Pattern,
    basename_only: bool,
}

impl CompiledPattern {
    fn new(raw: &str) -> Result<Self> {
        let trimmed = raw.strip_prefix("./").unwrap_or(raw);
        let pattern = Pattern::new(trimmed).map_err(|source| LintrcError::InvalidGlobPattern {
            pattern: raw.to_string(),
            source,
        })?;
        Ok(Self {
            pattern,
            basename_only: !trimmed.contains('/'),
        })
    }

    fn matches(&self, path: &str) -> bool {
        let candidate = if self.basename_only {
            path.rsplit('/').next().unwrap_or(path)
        } else {
            path
        };
        self.pattern.matches_with(candidate, MATCH_OPTIONS)
    }
}

/// Compiled `files` / `excludedFiles` pair of an override
#[derive(Debug, Clone)]
pub struct FileMatcher {
    include: Vec<CompiledPattern>,
    exclude: Vec<CompiledPattern>,
}

impl FileMatcher {
    /// Compile include and exclude patterns; any malformed pattern is an error
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self> {
        Ok(Self {
            include: include
                .iter()
                .map(|p| CompiledPattern::new(p))
                .collect::<Result<_>>()?,
            exclude: exclude
                .iter()
                .map(|p| CompiledPattern::new(p))
                .collect::<Result<_>>()?,
        })
    }

    /// True when any include pattern matches and no exclude pattern does
    pub fn is_match(&self, path: &Path) -> bool {
        let normalized = normalize_path(path);
        self.include.iter().any(|p| p.matches(&normalized))
            && !self.exclude.iter().any(|p| p.matches(&normalized))
    }
}

/// Render a path with `/` separators and no leading `./`
pub fn normalize_path(path: &Path) -> String {
    let mut text = path.to_string_lossy().replace('\\', "/");
    while let Some(rest) = text.strip_prefix("./") {
        text = rest.to_string();
    }
    text
}
