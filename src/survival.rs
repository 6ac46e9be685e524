//! Survival curves describing how installed capacity decays with age.
//!
//! Each curve maps an elapsed age (years since installation) and a technology
//! lifetime to the fraction of capacity still operative. An infinite lifetime
//! means the capacity never decays.
use anyhow::{Result, ensure};
use serde_string_enum::{DeserializeLabeledStringEnum, SerializeLabeledStringEnum};
use statrs::function::gamma::gamma;

/// The default Weibull shape factor (memoryless/exponential decay)
pub const DEFAULT_SHAPE: f64 = 1.0;

/// Survival fractions below this value are floored to exactly zero.
///
/// This stops near-zero floating-point noise reaching the optimisation model
/// as spurious non-zero capacity bounds.
pub const DEFAULT_ZERO_FLOOR: f64 = 1e-3;

/// The family of survival curve to apply to ageing capacity
#[derive(PartialEq, Eq, Debug, Clone, Copy, SerializeLabeledStringEnum, DeserializeLabeledStringEnum)]
pub enum SurvivalMethod {
    /// Weibull survival curve (see <https://doi.org/10.1186/s12544-020-00464-0>)
    #[string = "weibull"]
    Weibull,
    /// Straight-line decay from one to zero over exactly one lifetime
    #[string = "linear"]
    Linear,
    /// Binary cutoff at one lifetime, with a fractional share at sub-step resolution
    #[string = "step"]
    Step,
}

/// A survival curve with its family-specific parameters.
///
/// Constructed with [`SurvivalCurve::new`], which validates the parameters, so
/// evaluation itself cannot fail.
#[derive(PartialEq, Debug, Clone)]
pub enum SurvivalCurve {
    /// Weibull curve: `exp(-(age/lifetime)^shape * Γ(1+1/shape)^shape)`.
    ///
    /// `Γ(1+1/shape)^shape` normalises the curve so that its *mean* life
    /// equals the supplied lifetime for any shape.
    Weibull {
        /// Shape factor (β). <1 infant mortality, 1 random failure, >1 wear-out
        shape: f64,
        /// Fractions below this value are floored to exactly zero
        zero_floor: f64,
    },
    /// Linear curve: `clip(1 - age/lifetime, min=0)`
    Linear,
    /// Step curve: full survival until one lifetime has elapsed.
    ///
    /// With a nonzero step `width`, capacity expiring part-way through a step
    /// survives as the share `(lifetime - age) / width`. At zero width this
    /// degenerates to a pure 0/1 existence indicator.
    Step {
        /// Width of the step the age falls in (0 for a pure indicator)
        width: f64,
    },
}

impl SurvivalCurve {
    /// Create a survival curve for the given method, validating its parameters.
    ///
    /// # Arguments
    ///
    /// * `method` - The curve family to apply
    /// * `shape` - Weibull shape factor (ignored by other families)
    /// * `zero_floor` - Near-zero floor for Weibull fractions
    /// * `width` - Step width (ignored by other families)
    pub fn new(method: SurvivalMethod, shape: f64, zero_floor: f64, width: f64) -> Result<Self> {
        let curve = match method {
            SurvivalMethod::Weibull => {
                ensure!(
                    shape > 0.0,
                    "Weibull shape factor must be positive (got {shape})"
                );
                ensure!(
                    (0.0..1.0).contains(&zero_floor),
                    "Zero floor must be in [0, 1) (got {zero_floor})"
                );
                Self::Weibull { shape, zero_floor }
            }
            SurvivalMethod::Linear => Self::Linear,
            SurvivalMethod::Step => {
                ensure!(
                    width >= 0.0,
                    "Step width must not be negative (got {width})"
                );
                Self::Step { width }
            }
        };

        Ok(curve)
    }

    /// The fraction of capacity still operative at the given age.
    ///
    /// # Arguments
    ///
    /// * `age` - Elapsed time since installation, in years (must not be negative)
    /// * `lifetime` - Technology lifetime in years (positive; may be infinite)
    ///
    /// # Returns
    ///
    /// A fraction in the range [0, 1].
    pub fn survival(&self, age: f64, lifetime: f64) -> f64 {
        debug_assert!(age >= 0.0, "Curves are undefined for negative ages");
        debug_assert!(lifetime > 0.0, "Lifetime must be positive");

        match *self {
            Self::Weibull { shape, zero_floor } => {
                let normalisation = gamma(1.0 + 1.0 / shape).powf(shape);
                let fraction = (-(age / lifetime).powf(shape) * normalisation).exp();
                if fraction < zero_floor { 0.0 } else { fraction }
            }
            Self::Linear => (1.0 - age / lifetime).max(0.0),
            Self::Step { width } => {
                let remaining = lifetime - age;
                if remaining >= width && remaining > 0.0 {
                    1.0
                } else if remaining > 0.0 {
                    remaining / width
                } else {
                    0.0
                }
            }
        }
    }

    /// A closed-form LaTeX rendering of the curve, for documentation output.
    ///
    /// Pure formatting; has no effect on the numeric computation.
    pub fn as_math_string(&self) -> String {
        let age = r"\textit{age}_\text{tech}";
        let lifetime = r"\textit{lifetime}_\text{tech}";
        match *self {
            Self::Weibull { shape, .. } => format!(
                r"\exp{{\left(-\left(\frac{{{age}}}{{{lifetime}}}\right)^{{{shape}}}\times\Gamma\left(1+\frac{{1}}{{{shape}}}\right)^{{{shape}}}\right)}}"
            ),
            Self::Linear => format!(
                r"\begin{{cases}}1-\frac{{{age}}}{{{lifetime}}}, & \text{{if }} 1-\frac{{{age}}}{{{lifetime}}}\gt 0\\0, & \text{{otherwise}}\end{{cases}}"
            ),
            Self::Step { width } => format!(
                r"\begin{{cases}}1, & \text{{if }} {lifetime}-{age}\geq {width}\\\frac{{{lifetime}-{age}}}{{{width}}}, & \text{{if }} 0\lt {lifetime}-{age}\lt {width}\\0, & \text{{otherwise}}\end{{cases}}"
            ),
        }
    }
}
