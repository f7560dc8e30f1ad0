//! Crop Catalog Lookup Tables
//!
//! Static per-crop reference data (water requirement, carbon footprint, soil
//! suitability, yield, price distribution, base demand) and the soil retention
//! table used by the soil compatibility scorer.
//!
//! The built-in tables cover rice, wheat, corn and soybeans plus the four soil
//! classes clay, sandy, loamy and silt. A catalog can also be loaded from JSON
//! to override or extend the built-ins (regional tables, test doubles).
//!
//! Lookups are case-insensitive. Unknown names never fail: they resolve to the
//! fallback entry and the lookup reports `known = false`.

use anyhow::{Context, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Static reference data for a single crop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropCatalogEntry {
    pub name: String,
    /// Seasonal water requirement (mm per season)
    pub water_requirement_mm: f64,
    /// Relative carbon footprint (kg CO2e per kg, informational)
    pub carbon_footprint: f64,
    /// Soil types the crop is known to do well in
    #[serde(default)]
    pub soil_suitability: Vec<String>,
    #[serde(default)]
    pub growth_period_days: u32,
    /// Base yield (tons per hectare)
    pub base_yield: f64,
    /// Mean and standard deviation of the simulated market price
    pub price_mean: f64,
    pub price_std: f64,
    /// Base demand score (0-1)
    pub base_demand_score: f64,
}

/// Water and nutrient retention for one soil class (both 0-1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilRetention {
    pub water_retention: f64,
    pub nutrient_retention: f64,
}

/// Result of a crop lookup, flagging whether the fallback entry was used
#[derive(Debug, Clone, Copy)]
pub struct CropLookup<'a> {
    pub entry: &'a CropCatalogEntry,
    pub known: bool,
}

/// On-disk catalog layout
#[derive(Debug, Deserialize)]
struct CatalogFile {
    crops: Vec<CropCatalogEntry>,
    #[serde(default)]
    soils: FxHashMap<String, SoilRetention>,
    fallback_crop: Option<CropCatalogEntry>,
    fallback_soil: Option<SoilRetention>,
}

/// Immutable crop + soil reference tables
#[derive(Debug, Clone)]
pub struct CropCatalog {
    crops: Vec<CropCatalogEntry>,
    crop_index: FxHashMap<String, usize>,
    soils: FxHashMap<String, SoilRetention>,
    fallback_crop: CropCatalogEntry,
    fallback_soil: SoilRetention,
}

// ============================================================================
// BUILT-IN TABLES
// ============================================================================

const FALLBACK_SOIL: SoilRetention = SoilRetention { water_retention: 0.5, nutrient_retention: 0.5 };

const BUILTIN_SOILS: &[(&str, SoilRetention)] = &[
    ("clay", SoilRetention { water_retention: 0.8, nutrient_retention: 0.9 }),
    ("sandy", SoilRetention { water_retention: 0.4, nutrient_retention: 0.3 }),
    ("loamy", SoilRetention { water_retention: 0.7, nutrient_retention: 0.8 }),
    ("silt", SoilRetention { water_retention: 0.6, nutrient_retention: 0.7 }),
];

#[allow(clippy::too_many_arguments)]
fn entry(
    name: &str,
    water_requirement_mm: f64,
    carbon_footprint: f64,
    soils: &[&str],
    growth_period_days: u32,
    base_yield: f64,
    price: (f64, f64),
    base_demand_score: f64,
) -> CropCatalogEntry {
    CropCatalogEntry {
        name: name.to_string(),
        water_requirement_mm,
        carbon_footprint,
        soil_suitability: soils.iter().map(|s| s.to_string()).collect(),
        growth_period_days,
        base_yield,
        price_mean: price.0,
        price_std: price.1,
        base_demand_score,
    }
}

fn builtin_crops() -> Vec<CropCatalogEntry> {
    vec![
        entry("rice", 1500.0, 2.7, &["clay", "loamy"], 120, 4.5, (400.0, 50.0), 0.8),
        entry("wheat", 450.0, 1.8, &["loamy", "sandy"], 120, 3.0, (300.0, 30.0), 0.7),
        entry("corn", 500.0, 2.0, &["loamy", "silt"], 90, 5.5, (250.0, 25.0), 0.75),
        entry("soybeans", 450.0, 1.5, &["loamy", "clay"], 100, 2.8, (500.0, 60.0), 0.65),
    ]
}

fn builtin_fallback_crop() -> CropCatalogEntry {
    entry("unknown", 500.0, 0.0, &[], 0, 3.0, (300.0, 30.0), 0.5)
}

impl Default for CropCatalog {
    fn default() -> Self {
        let soils = BUILTIN_SOILS
            .iter()
            .map(|(name, retention)| (name.to_string(), *retention))
            .collect();
        Self::from_parts(builtin_crops(), soils, builtin_fallback_crop(), FALLBACK_SOIL)
    }
}

impl CropCatalog {
    fn from_parts(
        crops: Vec<CropCatalogEntry>,
        soils: FxHashMap<String, SoilRetention>,
        fallback_crop: CropCatalogEntry,
        fallback_soil: SoilRetention,
    ) -> Self {
        let crop_index = crops
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.to_lowercase(), i))
            .collect();
        let soils = soils
            .into_iter()
            .map(|(name, retention)| (name.to_lowercase(), retention))
            .collect();

        Self { crops, crop_index, soils, fallback_crop, fallback_soil }
    }

    /// Load a catalog from a JSON file
    ///
    /// Soils missing from the file fall back to the built-in soil table, and a
    /// missing fallback entry falls back to the built-in defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read crop catalog: {:?}", path))?;

        Self::from_json_str(&contents)
            .with_context(|| format!("Invalid crop catalog: {:?}", path))
    }

    /// Parse and validate a catalog from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)
            .with_context(|| "Failed to parse crop catalog JSON")?;

        let mut seen = FxHashSet::default();
        for crop in &file.crops {
            validate_entry(crop)?;
            if !seen.insert(crop.name.to_lowercase()) {
                anyhow::bail!("Duplicate crop '{}' in catalog", crop.name);
            }
        }

        let fallback_crop = file.fallback_crop.unwrap_or_else(builtin_fallback_crop);
        validate_entry(&fallback_crop)?;

        let mut soils: FxHashMap<String, SoilRetention> = BUILTIN_SOILS
            .iter()
            .map(|(name, retention)| (name.to_string(), *retention))
            .collect();
        for (name, retention) in file.soils {
            validate_retention(&name, &retention)?;
            soils.insert(name.to_lowercase(), retention);
        }

        let fallback_soil = file.fallback_soil.unwrap_or(FALLBACK_SOIL);
        validate_retention("fallback", &fallback_soil)?;

        Ok(Self::from_parts(file.crops, soils, fallback_crop, fallback_soil))
    }

    /// Exact (case-insensitive) crop lookup
    pub fn crop(&self, name: &str) -> Option<&CropCatalogEntry> {
        self.crop_index
            .get(&name.to_lowercase())
            .map(|&i| &self.crops[i])
    }

    /// Crop lookup that degrades to the fallback entry for unknown crops
    pub fn crop_or_default(&self, name: &str) -> CropLookup<'_> {
        match self.crop(name) {
            Some(entry) => CropLookup { entry, known: true },
            None => {
                tracing::debug!("Crop '{}' not in catalog, using default reference values", name);
                CropLookup { entry: &self.fallback_crop, known: false }
            }
        }
    }

    /// Soil retention pair, degrading to (0.5, 0.5) for unknown soils
    pub fn soil(&self, soil_type: &str) -> SoilRetention {
        match self.soils.get(&soil_type.to_lowercase()) {
            Some(retention) => *retention,
            None => {
                tracing::debug!("Soil type '{}' not in catalog, using default retention", soil_type);
                self.fallback_soil
            }
        }
    }

    /// Whether a soil type is present in the table
    pub fn knows_soil(&self, soil_type: &str) -> bool {
        self.soils.contains_key(&soil_type.to_lowercase())
    }

    /// Candidate crops used when a farmer has no preferences (catalog order)
    pub fn default_candidates(&self) -> Vec<String> {
        self.crops.iter().map(|c| c.name.clone()).collect()
    }

    pub fn crops(&self) -> &[CropCatalogEntry] {
        &self.crops
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}

fn validate_entry(crop: &CropCatalogEntry) -> Result<()> {
    let finite_non_negative = |v: f64| v.is_finite() && v >= 0.0;

    anyhow::ensure!(!crop.name.trim().is_empty(), "Crop entry with empty name");
    anyhow::ensure!(
        finite_non_negative(crop.water_requirement_mm),
        "Crop '{}': water requirement must be >= 0, got {}",
        crop.name,
        crop.water_requirement_mm
    );
    anyhow::ensure!(
        finite_non_negative(crop.base_yield),
        "Crop '{}': base yield must be >= 0, got {}",
        crop.name,
        crop.base_yield
    );
    anyhow::ensure!(
        crop.price_mean.is_finite() && crop.price_mean > 0.0,
        "Crop '{}': price mean must be > 0, got {}",
        crop.name,
        crop.price_mean
    );
    anyhow::ensure!(
        finite_non_negative(crop.price_std),
        "Crop '{}': price std must be >= 0, got {}",
        crop.name,
        crop.price_std
    );
    anyhow::ensure!(
        finite_non_negative(crop.base_demand_score),
        "Crop '{}': base demand score must be >= 0, got {}",
        crop.name,
        crop.base_demand_score
    );
    Ok(())
}

fn validate_retention(name: &str, retention: &SoilRetention) -> Result<()> {
    let unit = |v: f64| (0.0..=1.0).contains(&v);
    anyhow::ensure!(
        unit(retention.water_retention) && unit(retention.nutrient_retention),
        "Soil '{}': retention values must be within [0, 1]",
        name
    );
    Ok(())
}
