//! Configuration model for lintrc
//!
//! This module provides the declaration types and their loading:
//! - JSON/JSONC/JSON5, YAML and TOML profile files
//! - Auto-discovery by traversing up directories, stopping at `root: true`
//! - Extension (`extends`) and path-scoped `overrides`
//! - Strong typing with serde and JSON Schema generation via schemars
//!
//! ## Example Profile
//!
//! ```jsonc
//! {
//!   "root": true,
//!   "extends": ["eslint:recommended", "prettier"],
//!   "parser": "@typescript-eslint/parser",
//!   "plugins": ["@typescript-eslint"],
//!   "env": { "es6": true },
//!   "rules": {
//!     "no-var": 2,
//!     "@typescript-eslint/indent": [2, 2]
//!   },
//!   "overrides": [
//!     {
//!       "files": ["*.ts", "*.tsx"],
//!       "rules": { "no-undef": "off" }
//!     }
//!   ]
//! }
//! ```

mod effective;
mod loader;
mod merge;
mod profile;
mod rule;

pub use effective::EffectiveConfig;
pub use loader::{CONFIG_FILE_NAMES, ConfigCascade, ConfigLoader};
pub use profile::{ConfigLayer, Override, Profile};
pub use rule::{GlobalAccess, RuleSetting, Severity};
