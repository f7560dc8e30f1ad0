//! Crop Advisor
//!
//! Ranks candidate crops for a farmer by blending a sustainability score
//! (water, soil, carbon, biodiversity) with a market score (ROI, demand,
//! price trend).
//!
//! Module layout:
//! - `catalog`: immutable crop + soil reference tables
//! - `metrics/`: soil compatibility, water requirement, sustainability
//! - `market/`: price trend, demand, profitability, signal sources
//! - `combiner`: name-keyed join of the two stages + final ranking
//! - `scorer`: `CropRecommender`, the pipeline entry point
//! - `api_server` / `store` (feature `api`): HTTP API and in-memory persistence

pub mod catalog;
pub mod combiner;
pub mod config;
pub mod error;
pub mod market;
pub mod metrics;
pub mod practices;
pub mod profile;
pub mod scorer;

#[cfg(feature = "api")]
pub mod api_server;
#[cfg(feature = "api")]
pub mod store;

// Re-export commonly used types
pub use catalog::{CropCatalog, CropCatalogEntry, SoilRetention};
pub use combiner::{combine, CropRecommendation};
pub use config::ServerConfig;
pub use error::{ScoringError, ScoringResult};
pub use market::{
    DemandLevel, MarketAnalysis, MarketSignalSource, MarketTrend, PriceTrend, ProfitabilityEstimate,
    RandomSignals, StaticSignals,
};
pub use metrics::{SustainabilityMetrics, SustainabilityResult};
pub use practices::{sustainable_practices, SustainablePractice};
pub use profile::FarmerProfile;
pub use scorer::CropRecommender;

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
