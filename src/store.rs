//! Farmer and recommendation store
//!
//! In-memory provider for farmer profiles and sink for ranked
//! recommendations. Farmers get sequential ids starting at 1; every stored
//! recommendation row is timestamped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{PoisonError, RwLock};

use crate::combiner::CropRecommendation;
use crate::profile::FarmerProfile;

pub type FarmerId = u64;

/// A stored farmer profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmerRecord {
    pub farmer_id: FarmerId,
    pub profile: FarmerProfile,
    pub created_at: DateTime<Utc>,
}

/// A persisted recommendation row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecommendation {
    pub recommendation_id: u64,
    pub farmer_id: FarmerId,
    pub crop: String,
    pub sustainability_score: f64,
    pub profitability_score: f64,
    pub water_efficiency_score: f64,
    pub overall_score: f64,
    pub recommendation_date: DateTime<Utc>,
    pub details: serde_json::Value,
}

/// Looks up farmer profiles by id
pub trait FarmerProfileProvider: Send + Sync {
    fn farmer(&self, farmer_id: FarmerId) -> Option<FarmerRecord>;
}

/// Persists the outcome of a recommendation run
pub trait RecommendationSink: Send + Sync {
    /// Store the first `top_n` recommendations; returns the stored rows
    fn store_recommendations(
        &self,
        farmer_id: FarmerId,
        recommendations: &[CropRecommendation],
        top_n: usize,
    ) -> Vec<StoredRecommendation>;
}

#[derive(Debug, Default)]
struct StoreInner {
    farmers: Vec<FarmerRecord>,
    recommendations: Vec<StoredRecommendation>,
}

/// Thread-safe in-memory store
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a farmer, returning the new record
    pub fn create_farmer(&self, profile: FarmerProfile) -> FarmerRecord {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let record = FarmerRecord {
            farmer_id: inner.farmers.len() as FarmerId + 1,
            profile,
            created_at: Utc::now(),
        };
        inner.farmers.push(record.clone());
        tracing::info!("Created farmer {} ({})", record.farmer_id, record.profile.name);
        record
    }

    /// Stored recommendations for a farmer, oldest first
    pub fn recommendations_for(&self, farmer_id: FarmerId) -> Vec<StoredRecommendation> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .recommendations
            .iter()
            .filter(|r| r.farmer_id == farmer_id)
            .cloned()
            .collect()
    }

    pub fn farmer_count(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).farmers.len()
    }
}

impl FarmerProfileProvider for InMemoryStore {
    fn farmer(&self, farmer_id: FarmerId) -> Option<FarmerRecord> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        // ids are 1-based positions
        let index = usize::try_from(farmer_id).ok()?.checked_sub(1)?;
        inner.farmers.get(index).cloned()
    }
}

impl RecommendationSink for InMemoryStore {
    fn store_recommendations(
        &self,
        farmer_id: FarmerId,
        recommendations: &[CropRecommendation],
        top_n: usize,
    ) -> Vec<StoredRecommendation> {
        let now = Utc::now();
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        let mut stored = Vec::new();
        for rec in recommendations.iter().take(top_n) {
            let row = StoredRecommendation {
                recommendation_id: inner.recommendations.len() as u64 + 1,
                farmer_id,
                crop: rec.crop.clone(),
                sustainability_score: rec.sustainability_score,
                profitability_score: rec.market_score,
                water_efficiency_score: rec.sustainability_metrics.water_efficiency,
                overall_score: rec.overall_score,
                recommendation_date: now,
                details: details_json(rec),
            };
            inner.recommendations.push(row.clone());
            stored.push(row);
        }

        tracing::debug!("Stored {} recommendations for farmer {}", stored.len(), farmer_id);
        stored
    }
}

/// Full recommendation as stored alongside the score columns
fn details_json(rec: &CropRecommendation) -> serde_json::Value {
    match serde_json::to_value(rec) {
        Ok(details) => details,
        Err(e) => {
            tracing::warn!("Storing {} without details: {}", rec.crop, e);
            serde_json::Value::Null
        }
    }
}
