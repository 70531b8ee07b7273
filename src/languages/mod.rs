//! Language profiles and the extension registry.
//!
//! Each language module provides:
//! - The file extensions it claims
//! - Tree-sitter queries for imports and function/type declarations
//! - A grammar accessor for the parsing capability
//!
//! Profiles are static data. Registering a new language means adding a
//! module here and calling its `register()` from `register_all`.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

pub mod go;
pub mod java;
pub mod javascript;
pub mod python;
pub mod typescript;

/// Static configuration for one language.
#[derive(Debug, Clone, Copy)]
pub struct LanguageProfile {
    /// Language identifier (e.g., "python", "go")
    pub name: &'static str,
    /// File extensions this language claims, without the dot, lowercase
    pub extensions: &'static [&'static str],
    /// Grammar accessor for the parsing capability
    pub grammar: fn() -> tree_sitter::Language,
    /// Tree-sitter query matching import references
    pub imports_query: &'static str,
    /// Tree-sitter query matching function/class/type declarations
    pub functions_query: &'static str,
}

lazy_static::lazy_static! {
    /// Registered profiles, keyed by language name.
    static ref PROFILES: RwLock<HashMap<&'static str, LanguageProfile>> =
        RwLock::new(HashMap::new());
    /// Extension (lowercase, no dot) to language name.
    static ref EXTENSIONS: RwLock<HashMap<&'static str, &'static str>> =
        RwLock::new(HashMap::new());
}

/// Register a language profile and claim its extensions.
pub fn register(profile: LanguageProfile) {
    let mut extensions = EXTENSIONS.write().unwrap();
    for &ext in profile.extensions {
        extensions.insert(ext, profile.name);
    }
    let mut profiles = PROFILES.write().unwrap();
    profiles.insert(profile.name, profile);
}

/// Get the profile for a language name.
pub fn profile(name: &str) -> Option<LanguageProfile> {
    let profiles = PROFILES.read().unwrap();
    profiles.get(name).copied()
}

/// Resolve a file extension (without the dot) to a language name.
/// Matching is case-insensitive. Returns None for unknown extensions.
pub fn language_for_extension(ext: &str) -> Option<&'static str> {
    let extensions = EXTENSIONS.read().unwrap();
    extensions.get(ext.to_lowercase().as_str()).copied()
}

/// Resolve a path to a language name via its extension.
pub fn language_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    language_for_extension(ext)
}

/// Return all registered language names, sorted.
pub fn registered_languages() -> Vec<&'static str> {
    let profiles = PROFILES.read().unwrap();
    let mut names: Vec<_> = profiles.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Register all built-in language profiles.
/// Call once at startup before discovery or analysis.
pub fn register_all() {
    go::register();
    java::register();
    javascript::register();
    python::register();
    typescript::register();
}
