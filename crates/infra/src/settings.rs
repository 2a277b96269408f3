//! Runtime feature flags read by the list-entry workflows.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::warn;

/// Whether keyword searches go through the full-text index.
pub const USE_INDEXED_SEARCH: &str = "Catalog.Search.UseCatalogIndexedSearchInManager";

/// Boolean settings lookup. Unknown settings fall back to `default`.
pub trait SettingsProvider: Send + Sync {
    fn get_flag(&self, name: &str, default: bool) -> bool;
}

#[derive(Debug, Default)]
pub struct InMemorySettings {
    flags: RwLock<HashMap<String, bool>>,
}

impl InMemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flag(self, name: impl Into<String>, value: bool) -> Self {
        self.set_flag(name, value);
        self
    }

    pub fn set_flag(&self, name: impl Into<String>, value: bool) {
        if let Ok(mut flags) = self.flags.write() {
            flags.insert(name.into(), value);
        }
    }
}

impl SettingsProvider for InMemorySettings {
    fn get_flag(&self, name: &str, default: bool) -> bool {
        self.flags
            .read()
            .ok()
            .and_then(|flags| flags.get(name).copied())
            .unwrap_or(default)
    }
}

type Lookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Settings read from environment variables.
///
/// `Catalog.Search.UseCatalogIndexedSearchInManager` is looked up as
/// `CATALOG_SEARCH_USE_CATALOG_INDEXED_SEARCH_IN_MANAGER`.
pub struct EnvSettings {
    lookup: Lookup,
}

impl EnvSettings {
    pub fn new() -> Self {
        Self::with_source(|key| std::env::var(key).ok())
    }

    /// Read values from `lookup` instead of the process environment.
    pub fn with_source(lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
        Self {
            lookup: Box::new(lookup),
        }
    }

    pub fn env_key(name: &str) -> String {
        let mut key = String::with_capacity(name.len() + 8);
        let mut prev_lower = false;
        for ch in name.chars() {
            if ch == '.' || ch == '-' {
                key.push('_');
                prev_lower = false;
                continue;
            }
            if ch.is_ascii_uppercase() && prev_lower {
                key.push('_');
            }
            prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
            key.push(ch.to_ascii_uppercase());
        }
        key
    }
}

impl Default for EnvSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for EnvSettings {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EnvSettings").finish_non_exhaustive()
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl SettingsProvider for EnvSettings {
    fn get_flag(&self, name: &str, default: bool) -> bool {
        let key = Self::env_key(name);
        match (self.lookup)(&key) {
            None => default,
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                warn!(setting = name, env = %key, value = %raw, "invalid boolean setting, using default");
                default
            }),
        }
    }
}
