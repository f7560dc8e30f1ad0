//! Market signal sources
//!
//! The market analyzer never draws randomness itself. Every stochastic input
//! (current price, price trend, demand level, demand growth factor) comes from
//! a `MarketSignalSource`, so a forecasting model or a fixed test double can
//! replace the simulation without touching the scoring formulas.

use rand::distributions::WeightedIndex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use super::demand::DemandLevel;
use super::price_trend::PriceTrend;

/// Trend draw probabilities: Decreasing, Stable, Increasing
pub const TREND_PROBABILITIES: [f64; 3] = [0.3, 0.4, 0.3];

/// Demand draw probabilities: Low, Medium, High
pub const DEMAND_PROBABILITIES: [f64; 3] = [0.2, 0.5, 0.3];

/// Range of the multiplicative demand growth factor
pub const GROWTH_FACTOR_RANGE: (f64, f64) = (0.8, 1.2);

/// Source of market observations for a scoring run
pub trait MarketSignalSource {
    /// Current market price for a crop whose price has this mean and std
    fn current_price(&mut self, mean: f64, std_dev: f64) -> f64;

    fn price_trend(&mut self) -> PriceTrend;

    fn demand_level(&mut self) -> DemandLevel;

    /// Multiplier applied to the base demand score
    fn growth_factor(&mut self) -> f64;
}

// ============================================================================
// Simulated signals
// ============================================================================

/// Random market simulation
///
/// Price ~ Normal(mean, std), trend and demand from fixed categorical
/// distributions, growth ~ Uniform(0.8, 1.2).
#[derive(Debug, Clone)]
pub struct RandomSignals {
    rng: StdRng,
    trend_dist: WeightedIndex<f64>,
    demand_dist: WeightedIndex<f64>,
}

impl RandomSignals {
    /// Seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible simulation
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            trend_dist: weighted(&TREND_PROBABILITIES),
            demand_dist: weighted(&DEMAND_PROBABILITIES),
        }
    }
}

fn weighted(probabilities: &[f64; 3]) -> WeightedIndex<f64> {
    // Only built from the non-negative, non-zero constants above
    WeightedIndex::new(probabilities).expect("signal probabilities are valid weights")
}

impl MarketSignalSource for RandomSignals {
    fn current_price(&mut self, mean: f64, std_dev: f64) -> f64 {
        match Normal::new(mean, std_dev) {
            Ok(dist) => dist.sample(&mut self.rng),
            Err(_) => mean,
        }
    }

    fn price_trend(&mut self) -> PriceTrend {
        match self.trend_dist.sample(&mut self.rng) {
            0 => PriceTrend::Decreasing,
            1 => PriceTrend::Stable,
            _ => PriceTrend::Increasing,
        }
    }

    fn demand_level(&mut self) -> DemandLevel {
        match self.demand_dist.sample(&mut self.rng) {
            0 => DemandLevel::Low,
            1 => DemandLevel::Medium,
            _ => DemandLevel::High,
        }
    }

    fn growth_factor(&mut self) -> f64 {
        self.rng.gen_range(GROWTH_FACTOR_RANGE.0..GROWTH_FACTOR_RANGE.1)
    }
}

// ============================================================================
// Deterministic signals
// ============================================================================

/// Fixed market signals
///
/// Price is the catalog mean unless `price` overrides it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticSignals {
    pub price: Option<f64>,
    pub trend: PriceTrend,
    pub demand: DemandLevel,
    pub growth_factor: f64,
}

impl Default for StaticSignals {
    fn default() -> Self {
        Self {
            price: None,
            trend: PriceTrend::Stable,
            demand: DemandLevel::Medium,
            growth_factor: 1.0,
        }
    }
}

impl StaticSignals {
    pub fn with_trend(trend: PriceTrend) -> Self {
        Self { trend, ..Self::default() }
    }
}

impl MarketSignalSource for StaticSignals {
    fn current_price(&mut self, mean: f64, _std_dev: f64) -> f64 {
        self.price.unwrap_or(mean)
    }

    fn price_trend(&mut self) -> PriceTrend {
        self.trend
    }

    fn demand_level(&mut self) -> DemandLevel {
        self.demand
    }

    fn growth_factor(&mut self) -> f64 {
        self.growth_factor
    }
}
