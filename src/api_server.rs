// Axum API Server Module
//
// Purpose: REST API for farmer profiles, ranked crop recommendations,
// market reports and sustainable practices.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use moka::future::Cache;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::error::ScoringError;
use crate::market::RandomSignals;
use crate::practices::sustainable_practices;
use crate::profile::FarmerProfile;
use crate::scorer::CropRecommender;
use crate::store::{FarmerId, FarmerProfileProvider, InMemoryStore, RecommendationSink};

/// Farm size used for regional market reports (hectares)
const MARKET_REPORT_FARM_SIZE: f64 = 10.0;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<CropRecommender>,
    pub store: Arc<InMemoryStore>,
    pub market_cache: Cache<String, serde_json::Value>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(recommender: CropRecommender, config: ServerConfig) -> Self {
        tracing::info!("Initializing Moka market cache (ttl {}s)...", config.market_cache_ttl_secs);
        let market_cache = Cache::builder()
            .max_capacity(1_000)
            .time_to_live(Duration::from_secs(config.market_cache_ttl_secs))
            .build();

        Self {
            recommender: Arc::new(recommender),
            store: Arc::new(InMemoryStore::new()),
            market_cache,
            config: Arc::new(config),
        }
    }

    /// Load the catalog named by the config and build the state
    pub fn from_config(config: ServerConfig) -> anyhow::Result<Self> {
        let catalog = config.load_catalog()?;
        Ok(Self::new(CropRecommender::new(Arc::new(catalog)), config))
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Farmer profiles
        .route("/api/farmers", post(create_farmer))
        .route("/api/farmers/:id", get(get_farmer))

        // Recommendations
        .route("/api/recommendations", post(recommend))
        .route("/api/recommendations/:farmer_id", get(get_recommendations))
        .route("/api/recommendations/:farmer_id/history", get(get_recommendation_history))

        // Market + practices
        .route("/api/market-analysis/:region", get(get_market_analysis))
        .route("/api/sustainable-practices/:farmer_id/:crop", get(get_sustainable_practices))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Request Types
// ============================================================================

/// Stateless ranking request
#[derive(Debug, Deserialize)]
struct RecommendationRequest {
    profile: FarmerProfile,
    /// Overrides the profile's preferred crops
    crops: Option<Vec<String>>,
    region: Option<String>,
    /// Fixes the market simulation for reproducible results
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct MarketQuery {
    /// Comma-separated crop names
    crops: Option<String>,
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn create_farmer(
    State(state): State<AppState>,
    Json(profile): Json<FarmerProfile>,
) -> Result<Json<serde_json::Value>, AppError> {
    profile.validate()?;
    let record = state.store.create_farmer(profile);

    Ok(Json(serde_json::json!({
        "farmer_id": record.farmer_id,
        "message": "Farmer profile created successfully"
    })))
}

async fn get_farmer(
    State(state): State<AppState>,
    Path(farmer_id): Path<FarmerId>,
) -> Result<Json<serde_json::Value>, AppError> {
    let record = find_farmer(&state, farmer_id)?;
    Ok(Json(serde_json::to_value(record).map_err(internal)?))
}

/// Rank crops for a stored farmer and persist the top entries
async fn get_recommendations(
    State(state): State<AppState>,
    Path(farmer_id): Path<FarmerId>,
) -> Result<Json<serde_json::Value>, AppError> {
    let record = find_farmer(&state, farmer_id)?;
    let recommender = state.recommender.clone();
    let profile = record.profile;

    tracing::info!("Ranking crops for farmer {}", farmer_id);

    // CPU-bound work: run in blocking thread pool
    let recommendations = tokio::task::spawn_blocking(move || {
        let region = profile.location.clone();
        recommender.recommend_for_profile(&profile, &region, &mut RandomSignals::from_entropy())
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    let stored = state
        .store
        .store_recommendations(farmer_id, &recommendations, state.config.stored_top_n);

    Ok(Json(serde_json::json!({
        "farmer_id": farmer_id,
        "recommendations": recommendations,
        "stored": stored.len(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

/// Rank crops for a posted profile (nothing is stored)
async fn recommend(
    State(state): State<AppState>,
    Json(payload): Json<RecommendationRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let recommender = state.recommender.clone();
    let region = payload
        .region
        .unwrap_or_else(|| state.config.default_region.clone());
    let response_region = region.clone();

    let recommendations = tokio::task::spawn_blocking(move || {
        let profile = payload.profile;
        let candidates = payload
            .crops
            .unwrap_or_else(|| profile.candidate_crops(recommender.catalog()));
        let mut signals = match payload.seed {
            Some(seed) => RandomSignals::seeded(seed),
            None => RandomSignals::from_entropy(),
        };
        recommender.recommend(&profile, &candidates, &region, &mut signals)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    Ok(Json(serde_json::json!({
        "region": response_region,
        "recommendations": recommendations,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

async fn get_recommendation_history(
    State(state): State<AppState>,
    Path(farmer_id): Path<FarmerId>,
) -> Result<Json<serde_json::Value>, AppError> {
    find_farmer(&state, farmer_id)?;
    let history = state.store.recommendations_for(farmer_id);

    Ok(Json(serde_json::json!({
        "farmer_id": farmer_id,
        "recommendations": history,
    })))
}

/// Market report for a region (cached per region + crop list)
async fn get_market_analysis(
    State(state): State<AppState>,
    Path(region): Path<String>,
    Query(query): Query<MarketQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    // Normalized so every request sharing a cache key gets the same body
    let region = region.trim().to_lowercase();
    let crops = match query.crops.as_deref() {
        Some(list) => normalize_crop_list(list.split(',')),
        None => normalize_crop_list(state.recommender.catalog().default_candidates().iter()),
    };

    let cache_key = format!("{}|{}", region, crops.join(","));
    if let Some(cached) = state.market_cache.get(&cache_key).await {
        tracing::debug!("Market cache hit: {}", cache_key);
        return Ok(Json(cached));
    }

    let report = state.recommender.market_report(
        &crops,
        &region,
        MARKET_REPORT_FARM_SIZE,
        &mut RandomSignals::from_entropy(),
    )?;

    let response = serde_json::json!({
        "region": region,
        "market_analysis": report,
        "timestamp": chrono::Utc::now().to_rfc3339()
    });
    state.market_cache.insert(cache_key, response.clone()).await;

    Ok(Json(response))
}

async fn get_sustainable_practices(
    State(state): State<AppState>,
    Path((farmer_id, crop)): Path<(FarmerId, String)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let record = find_farmer(&state, farmer_id)?;
    let practices = sustainable_practices(&record.profile, &crop);

    Ok(Json(serde_json::json!({
        "farmer_id": farmer_id,
        "crop": crop,
        "sustainable_practices": practices,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn find_farmer(state: &AppState, farmer_id: FarmerId) -> Result<crate::store::FarmerRecord, AppError> {
    state
        .store
        .farmer(farmer_id)
        .ok_or_else(|| AppError::NotFound(format!("Farmer {} not found", farmer_id)))
}

/// Trimmed, lower-cased crop names without blanks or repeats, in request order
fn normalize_crop_list<I, T>(crops: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for crop in crops {
        let crop = crop.as_ref().trim().to_lowercase();
        if !crop.is_empty() && !normalized.contains(&crop) {
            normalized.push(crop);
        }
    }
    normalized
}

fn internal(e: serde_json::Error) -> AppError {
    AppError::Internal(format!("JSON serialization error: {}", e))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl From<ScoringError> for AppError {
    fn from(e: ScoringError) -> Self {
        match e {
            ScoringError::InvalidInput(_) => AppError::BadRequest(e.to_string()),
            ScoringError::InconsistentState(_) => {
                tracing::error!("Scoring pipeline inconsistency: {}", e);
                AppError::Internal(e.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
