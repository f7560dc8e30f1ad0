//! Server configuration
//!
//! Read from environment variables:
//! - `PORT` (default 3000)
//! - `CATALOG_PATH` - optional JSON crop catalog; built-in tables otherwise
//! - `DEFAULT_REGION` (default "global")
//! - `STORED_TOP_N` - recommendations persisted per run (default 3)
//! - `MARKET_CACHE_TTL_SECS` (default 300)

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;

use crate::catalog::CropCatalog;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub catalog_path: Option<PathBuf>,
    pub default_region: String,
    pub stored_top_n: usize,
    pub market_cache_ttl_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            catalog_path: None,
            default_region: "global".to_string(),
            stored_top_n: 3,
            market_cache_ttl_secs: 300,
        }
    }
}

impl ServerConfig {
    /// Configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Configuration from an arbitrary key lookup
    ///
    /// Unparseable values keep their defaults (with a warning).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            port: parse_or(&lookup, "PORT", defaults.port),
            catalog_path: lookup("CATALOG_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            default_region: lookup("DEFAULT_REGION")
                .filter(|r| !r.trim().is_empty())
                .unwrap_or(defaults.default_region),
            stored_top_n: parse_or(&lookup, "STORED_TOP_N", defaults.stored_top_n),
            market_cache_ttl_secs: parse_or(&lookup, "MARKET_CACHE_TTL_SECS", defaults.market_cache_ttl_secs),
        }
    }

    /// Catalog from `catalog_path`, or the built-in tables
    pub fn load_catalog(&self) -> Result<CropCatalog> {
        match &self.catalog_path {
            Some(path) => {
                let catalog = CropCatalog::load(path)?;
                tracing::info!("Loaded crop catalog from {:?} ({} crops)", path, catalog.len());
                Ok(catalog)
            }
            None => {
                tracing::info!("Using built-in crop catalog");
                Ok(CropCatalog::default())
            }
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
                default
            }
        },
        None => default,
    }
}
