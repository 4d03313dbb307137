//! lintrc core
//!
//! Layered lint-configuration resolution. Profiles are loaded once into an
//! immutable [`ProfileRegistry`]; [`Resolver::resolve`] merges a profile's
//! extension chain and the overrides matching a target file into one
//! [`EffectiveConfig`].
//!
//! ```no_run
//! use lintrc_core::{Profile, ProfileRegistry, Severity};
//!
//! let registry = ProfileRegistry::builder()
//!     .with_profile(Profile::new("base").with_rule("no-var", Severity::Off))?
//!     .with_profile(
//!         Profile::new("backend")
//!             .with_extends(["base"])
//!             .with_rule("no-var", Severity::Error),
//!     )?
//!     .build();
//!
//! let config = registry.resolve("backend", "src/main.ts")?;
//! assert_eq!(config.rule("no-var").map(|r| r.severity()), Some(Severity::Error));
//! # Ok::<(), lintrc_core::LintrcError>(())
//! ```

pub mod builtin;
pub mod config;
pub mod error;
pub mod matcher;
pub mod plugin;
pub mod registry;
pub mod resolver;
pub mod result;

// Re-export commonly used types
pub use builtin::{BUILTIN_PROFILE_IDS, builtin_profiles};
pub use config::{
    ConfigCascade, ConfigLayer, ConfigLoader, EffectiveConfig, GlobalAccess, Override, Profile,
    RuleSetting, Severity,
};
pub use error::{ErrorKind, LintrcError};
pub use matcher::FileMatcher;
pub use plugin::{PluginCatalog, PluginDefinition, RuleIssue};
pub use registry::{ProfileRegistry, RegistryBuilder};
pub use resolver::Resolver;
pub use result::Result;

/// JSON Schema for profile files
pub fn profile_schema() -> Result<serde_json::Value> {
    let schema = schemars::schema_for!(Profile);
    let mut value = serde_json::to_value(&schema)
        .map_err(|e| LintrcError::config_error(format!("Failed to serialize schema: {e}")))?;
    value["title"] = serde_json::json!("lintrc profile");
    Ok(value)
}

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lintrc=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
