//! Randomized decommissioning curves for legacy (pre-horizon) capacity.
//!
//! Historical capacity data rarely records commissioning dates, so for case
//! studies each (node, technology) pair is assigned a randomly drawn Weibull
//! shape factor and a randomly drawn share of its lifetime already elapsed.
//! The resulting survival curves phase the legacy capacity out over the
//! model's investment steps.
//!
//! All draws come from a scoped generator seeded once per call, so the output
//! is reproducible and independent of any other random state in the process.
use crate::id::{NodeID, TechnologyID};
use crate::input::is_sorted_and_unique;
use crate::input::technology::LifetimeMap;
use crate::survival::{DEFAULT_ZERO_FLOOR, SurvivalCurve, SurvivalMethod};
use anyhow::{Result, ensure};
use indexmap::{IndexMap, IndexSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The default seed for the decommissioning draws
pub const DEFAULT_SEED: u64 = 5555;
/// Default lower bound for the drawn Weibull shape factor
pub const DEFAULT_SHAPE_MIN: f64 = 3.0;
/// Default upper bound for the drawn Weibull shape factor
pub const DEFAULT_SHAPE_MAX: f64 = 8.0;
/// Default lower bound for the drawn elapsed-lifetime share
pub const DEFAULT_AGE_FACTOR_MIN: f64 = 0.1;
/// Default upper bound for the drawn elapsed-lifetime share
pub const DEFAULT_AGE_FACTOR_MAX: f64 = 0.8;

/// Settings for the randomized decommissioning-curve generator
#[derive(PartialEq, Debug, Clone)]
pub struct DecommissionSettings {
    /// Seed for the random draws
    pub seed: u64,
    /// Lower bound for the drawn Weibull shape factor
    pub shape_min: f64,
    /// Upper bound for the drawn Weibull shape factor
    pub shape_max: f64,
    /// Lower bound for the drawn fraction of lifetime already elapsed
    pub age_factor_min: f64,
    /// Upper bound for the drawn fraction of lifetime already elapsed
    pub age_factor_max: f64,
    /// Near-zero floor for the Weibull fractions
    pub zero_floor: f64,
}

impl Default for DecommissionSettings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            shape_min: DEFAULT_SHAPE_MIN,
            shape_max: DEFAULT_SHAPE_MAX,
            age_factor_min: DEFAULT_AGE_FACTOR_MIN,
            age_factor_max: DEFAULT_AGE_FACTOR_MAX,
            zero_floor: DEFAULT_ZERO_FLOOR,
        }
    }
}

impl DecommissionSettings {
    fn validate(&self) -> Result<()> {
        ensure!(
            0.0 < self.shape_min && self.shape_min <= self.shape_max,
            "Shape factor bounds must be positive with min <= max (got {} to {})",
            self.shape_min,
            self.shape_max
        );
        ensure!(
            0.0 < self.age_factor_min && self.age_factor_min <= self.age_factor_max,
            "Age factor bounds must be positive with min <= max (got {} to {})",
            self.age_factor_min,
            self.age_factor_max
        );
        ensure!(
            (0.0..1.0).contains(&self.zero_floor),
            "Zero floor must be in [0, 1) (got {})",
            self.zero_floor
        );

        Ok(())
    }
}

/// Remaining-capacity fractions per (node, technology) pair over the step years
#[derive(PartialEq, Debug, Clone)]
pub struct DecommissionCurves {
    /// The step years the fractions are evaluated at
    pub years: Vec<u32>,
    /// One fraction per step year, keyed by (node, technology)
    pub fractions: IndexMap<(NodeID, TechnologyID), Vec<f64>>,
}

/// Generate the randomized decommissioning curves for legacy capacity.
///
/// Each pair gets one shape factor and one age factor, drawn uniformly from
/// the configured bounds in the enumeration order of `pairs` (all shape
/// factors first, then all age factors). The pair's average remaining life is
/// `lifetime * age_factor` and its remaining fraction at each step is the
/// Weibull survival at `age = year - first_year`.
///
/// Two calls with the same settings, pairs and inputs produce identical
/// output. A technology with an infinite (absent) lifetime keeps fraction 1
/// at every step; its draws are still consumed so the stream layout does not
/// depend on lifetime data.
///
/// # Arguments
///
/// * `pairs` - The (node, technology) pairs, in a fixed enumeration order
/// * `lifetimes` - Technology lifetimes in years
/// * `years` - The future step years to evaluate (strictly increasing)
/// * `settings` - Seed, draw bounds and floor
pub fn decommission_curves(
    pairs: &IndexSet<(NodeID, TechnologyID)>,
    lifetimes: &LifetimeMap,
    years: &[u32],
    settings: &DecommissionSettings,
) -> Result<DecommissionCurves> {
    settings.validate()?;
    ensure!(!years.is_empty(), "No step years provided");
    ensure!(
        is_sorted_and_unique(years),
        "Step years must be in order and unique"
    );
    for (_, technology) in pairs {
        ensure!(
            lifetimes.contains_key(technology),
            "Unknown technology {technology} in initial capacity"
        );
    }

    // Draw order is part of the contract: all shape factors first, then all
    // age factors, in the enumeration order of `pairs`
    let mut rng = StdRng::seed_from_u64(settings.seed);
    let shape_factors = draw_factors(&mut rng, pairs.len(), settings.shape_min, settings.shape_max);
    let age_factors = draw_factors(
        &mut rng,
        pairs.len(),
        settings.age_factor_min,
        settings.age_factor_max,
    );

    let first_year = years[0];
    let mut fractions = IndexMap::new();
    for (((node, technology), &shape), &age_factor) in
        pairs.iter().zip(&shape_factors).zip(&age_factors)
    {
        let curve = SurvivalCurve::new(SurvivalMethod::Weibull, shape, settings.zero_floor, 0.0)?;
        let avg_remaining_life = lifetimes[technology] * age_factor;
        let row = years
            .iter()
            .map(|&year| curve.survival(f64::from(year - first_year), avg_remaining_life))
            .collect();
        fractions.insert((node.clone(), technology.clone()), row);
    }

    Ok(DecommissionCurves {
        years: years.to_vec(),
        fractions,
    })
}

/// Draw `count` values uniformly from the inclusive range `[min, max]`
fn draw_factors(rng: &mut StdRng, count: usize, min: f64, max: f64) -> Vec<f64> {
    (0..count).map(|_| rng.gen_range(min..=max)).collect()
}
