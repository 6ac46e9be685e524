//! The vintage-availability tensor for pathway models.
//!
//! For every pair of an investment step and a capacity vintage, the tensor
//! holds the fraction of a technology's capacity installed in the vintage
//! step that still physically exists at the investment step. Pairs where the
//! vintage lies in the future relative to the investment step are invalid:
//! survival curves are undefined for negative ages, so such cells are never
//! evaluated and are absent from the tensor.
use crate::id::TechnologyID;
use crate::input::is_sorted_and_unique;
use crate::input::technology::LifetimeMap;
use crate::step::step_resolution;
use crate::survival::{SurvivalCurve, SurvivalMethod, DEFAULT_SHAPE, DEFAULT_ZERO_FLOOR};
use anyhow::{Result, ensure};
use indexmap::IndexMap;

/// Parameters controlling how the vintage-availability tensor is evaluated
#[derive(PartialEq, Debug, Clone)]
pub struct AvailabilityParams {
    /// The survival-curve family to apply
    pub method: SurvivalMethod,
    /// Weibull shape factor
    pub shape: f64,
    /// Near-zero floor for Weibull fractions
    pub zero_floor: f64,
    /// Step width to assume when only a single investment step exists
    pub base_resolution: u32,
}

impl Default for AvailabilityParams {
    fn default() -> Self {
        Self {
            method: SurvivalMethod::Weibull,
            shape: DEFAULT_SHAPE,
            zero_floor: DEFAULT_ZERO_FLOOR,
            base_resolution: crate::step::DEFAULT_BASE_RESOLUTION,
        }
    }
}

/// Fractional availability indexed by (technology, investstep, vintagestep).
///
/// Only valid cells (vintagestep ≤ investstep) are stored; [`Self::get`]
/// returns `None` for future-vintage cells, which are thereby excluded from
/// any available-capacity accounting.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct VintageAvailability {
    values: IndexMap<(TechnologyID, u32, u32), f64>,
}

impl VintageAvailability {
    /// The availability fraction for a cell, if the cell is valid
    pub fn get(&self, technology: &TechnologyID, investstep: u32, vintagestep: u32) -> Option<f64> {
        self.values
            .get(&(technology.clone(), investstep, vintagestep))
            .copied()
    }

    /// Iterate over all valid cells in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&TechnologyID, u32, u32, f64)> {
        self.values
            .iter()
            .map(|((technology, investstep, vintagestep), value)| {
                (technology, *investstep, *vintagestep, *value)
            })
    }

    /// The number of valid cells
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the tensor contains no cells
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Evaluate the vintage-availability tensor.
///
/// For every valid (investstep, vintagestep) pair the elapsed age is
/// `investstep - vintagestep` and the selected survival curve is evaluated
/// per technology with that technology's lifetime. With the step method, the
/// width of the investment step (from [`step_resolution`]) converts a
/// lifetime ending mid-step into a fractional survival share.
///
/// # Arguments
///
/// * `investsteps` - Ordered years at which new capacity may be built
/// * `vintagesteps` - Ordered years in which capacity may have been installed
/// * `lifetimes` - Technology lifetimes (infinite = never decays)
/// * `params` - Curve selection and parameters
///
/// # Returns
///
/// The availability tensor, with cells in (technology, vintagestep,
/// investstep) iteration order.
pub fn vintage_availability(
    investsteps: &[u32],
    vintagesteps: &[u32],
    lifetimes: &LifetimeMap,
    params: &AvailabilityParams,
) -> Result<VintageAvailability> {
    ensure!(!vintagesteps.is_empty(), "No vintage steps provided");
    ensure!(
        is_sorted_and_unique(vintagesteps),
        "Vintage steps must be in order and unique"
    );

    // One curve per investment step; only the step method's width varies
    let widths = step_resolution(investsteps, params.base_resolution)?;
    let curves: Vec<SurvivalCurve> = widths
        .iter()
        .map(|&width| {
            SurvivalCurve::new(
                params.method,
                params.shape,
                params.zero_floor,
                f64::from(width),
            )
        })
        .collect::<Result<_>>()?;

    let mut values = IndexMap::new();
    for (technology, &lifetime) in lifetimes {
        for &vintagestep in vintagesteps {
            for (&investstep, curve) in investsteps.iter().zip(&curves) {
                if investstep < vintagestep {
                    // Future vintage: the curve must never be evaluated here
                    continue;
                }
                let age = f64::from(investstep - vintagestep);
                values.insert(
                    (technology.clone(), investstep, vintagestep),
                    curve.survival(age, lifetime),
                );
            }
        }
    }

    Ok(VintageAvailability { values })
}

/// The all-ones availability tensor for transmission technologies.
///
/// Transmission vintages are treated as always fully available: every valid
/// (investstep, vintagestep) pair gets fraction 1.
pub fn transmission_availability(
    technologies: &[TechnologyID],
    steps: &[u32],
) -> Result<VintageAvailability> {
    ensure!(
        is_sorted_and_unique(steps),
        "Investment steps must be in order and unique"
    );

    let mut values = IndexMap::new();
    for technology in technologies {
        for &vintagestep in steps {
            for &investstep in steps.iter().filter(|&&v| v >= vintagestep) {
                values.insert((technology.clone(), investstep, vintagestep), 1.0);
            }
        }
    }

    Ok(VintageAvailability { values })
}
