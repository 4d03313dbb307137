//! Bundled profiles for the backend, frontend and mobile targets

use crate::config::{ConfigLoader, Profile};
use crate::result::Result;
use std::path::Path;

const BUILTIN_SOURCES: &[(&str, &str)] = &[
    ("backend", include_str!("../profiles/backend.jsonc")),
    ("frontend", include_str!("../profiles/frontend.jsonc")),
    ("react-native", include_str!("../profiles/react-native.jsonc")),
];

/// Ids of the bundled profiles, in registration order
pub const BUILTIN_PROFILE_IDS: &[&str] = &["backend", "frontend", "react-native"];

/// Parse the bundled profiles
///
/// Their `extends` entries name external bases (`eslint:recommended`,
/// `prettier`, `@react-native-community`, ...) that the caller registers
/// or supplies through the plugin catalog.
pub fn builtin_profiles() -> Result<Vec<Profile>> {
    BUILTIN_SOURCES
        .iter()
        .map(|(id, source)| {
            let mut profile = ConfigLoader::parse_profile(Path::new(&format!("{id}.jsonc")), source)?;
            profile.id = (*id).to_string();
            Ok(profile)
        })
        .collect()
}
