//! Code for loading the pathway model configuration file.
use crate::availability::AvailabilityParams;
use crate::decommission::{
    DEFAULT_AGE_FACTOR_MAX, DEFAULT_AGE_FACTOR_MIN, DEFAULT_SEED, DEFAULT_SHAPE_MAX,
    DEFAULT_SHAPE_MIN, DecommissionSettings,
};
use crate::grouping::GroupingMap;
use crate::id::TechnologyID;
use crate::input::read_toml;
use crate::step::{DEFAULT_BASE_RESOLUTION, build_step_years};
use crate::survival::{DEFAULT_SHAPE, DEFAULT_ZERO_FLOOR, SurvivalMethod};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// The name of the model configuration file
pub const PATHWAY_FILE_NAME: &str = "pathway.toml";

fn default_shape() -> f64 {
    DEFAULT_SHAPE
}

fn default_zero_floor() -> f64 {
    DEFAULT_ZERO_FLOOR
}

fn default_base_resolution() -> u32 {
    DEFAULT_BASE_RESOLUTION
}

fn default_method() -> SurvivalMethod {
    SurvivalMethod::Weibull
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_shape_min() -> f64 {
    DEFAULT_SHAPE_MIN
}

fn default_shape_max() -> f64 {
    DEFAULT_SHAPE_MAX
}

fn default_age_factor_min() -> f64 {
    DEFAULT_AGE_FACTOR_MIN
}

fn default_age_factor_max() -> f64 {
    DEFAULT_AGE_FACTOR_MAX
}

/// Represents the contents of the entire model configuration file
#[derive(PartialEq, Debug, Deserialize)]
pub struct PathwayFile {
    /// The investment-step horizon
    pub steps: StepsConfig,
    /// Vintage-availability parameters
    #[serde(default)]
    pub vintages: VintagesConfig,
    /// Randomized decommissioning parameters
    #[serde(default)]
    pub decommissioning: DecommissioningConfig,
    /// Transmission technologies (always fully available)
    #[serde(default)]
    pub transmission: TransmissionConfig,
    /// Optional node/technology groupings for the capacity table
    #[serde(default)]
    pub grouping: GroupingConfig,
    /// The program log level
    #[serde(default)]
    pub log_level: Option<String>,
}

/// The "steps" section of the model configuration file
#[derive(PartialEq, Debug, Deserialize)]
pub struct StepsConfig {
    /// The first investment step
    pub first_year: u32,
    /// The final investment step (inclusive)
    pub final_year: u32,
    /// Spacing between investment steps, in years
    pub resolution: u32,
}

/// The "vintages" section of the model configuration file
#[derive(PartialEq, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VintagesConfig {
    /// The survival-curve family for vintage availability
    #[serde(default = "default_method")]
    pub method: SurvivalMethod,
    /// Weibull shape factor
    #[serde(default = "default_shape")]
    pub shape: f64,
    /// Survival fractions below this value are floored to zero
    #[serde(default = "default_zero_floor")]
    pub zero_floor: f64,
    /// Step width to assume when only a single investment step exists
    #[serde(default = "default_base_resolution")]
    pub base_resolution: u32,
}

impl Default for VintagesConfig {
    fn default() -> Self {
        Self {
            method: default_method(),
            shape: default_shape(),
            zero_floor: default_zero_floor(),
            base_resolution: default_base_resolution(),
        }
    }
}

impl VintagesConfig {
    /// Convert to evaluator parameters
    pub fn to_params(&self) -> AvailabilityParams {
        AvailabilityParams {
            method: self.method,
            shape: self.shape,
            zero_floor: self.zero_floor,
            base_resolution: self.base_resolution,
        }
    }
}

/// The "decommissioning" section of the model configuration file
#[derive(PartialEq, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecommissioningConfig {
    /// Seed for the random draws
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Lower bound for the drawn Weibull shape factor
    #[serde(default = "default_shape_min")]
    pub shape_min: f64,
    /// Upper bound for the drawn Weibull shape factor
    #[serde(default = "default_shape_max")]
    pub shape_max: f64,
    /// Lower bound for the drawn fraction of lifetime already elapsed
    #[serde(default = "default_age_factor_min")]
    pub age_factor_min: f64,
    /// Upper bound for the drawn fraction of lifetime already elapsed
    #[serde(default = "default_age_factor_max")]
    pub age_factor_max: f64,
}

impl Default for DecommissioningConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            shape_min: default_shape_min(),
            shape_max: default_shape_max(),
            age_factor_min: default_age_factor_min(),
            age_factor_max: default_age_factor_max(),
        }
    }
}

impl DecommissioningConfig {
    /// Convert to generator settings, sharing the vintage section's zero floor
    pub fn to_settings(&self, zero_floor: f64) -> DecommissionSettings {
        DecommissionSettings {
            seed: self.seed,
            shape_min: self.shape_min,
            shape_max: self.shape_max,
            age_factor_min: self.age_factor_min,
            age_factor_max: self.age_factor_max,
            zero_floor,
        }
    }
}

/// The "transmission" section of the model configuration file
#[derive(PartialEq, Debug, Deserialize, Default)]
pub struct TransmissionConfig {
    /// Transmission technologies, whose vintages are always fully available
    #[serde(default)]
    pub techs: Vec<TechnologyID>,
}

/// The "grouping" section of the model configuration file
#[derive(PartialEq, Debug, Deserialize, Default)]
pub struct GroupingConfig {
    /// Grouping for node labels
    #[serde(default)]
    pub nodes: Option<GroupingMap>,
    /// Grouping for technology labels
    #[serde(default)]
    pub techs: Option<GroupingMap>,
}

impl PathwayFile {
    /// Read the model configuration file from the specified directory.
    ///
    /// Validation is eager: an invalid horizon fails here, before any data is
    /// loaded.
    ///
    /// # Arguments
    ///
    /// * `model_dir` - Folder containing model input files
    pub fn from_path<P: AsRef<Path>>(model_dir: P) -> Result<PathwayFile> {
        let file_path = model_dir.as_ref().join(PATHWAY_FILE_NAME);
        let file: PathwayFile = read_toml(&file_path)?;
        file.step_years()
            .with_context(|| format!("Invalid step configuration in {}", file_path.display()))?;

        Ok(file)
    }

    /// The investment-step years described by the "steps" section
    pub fn step_years(&self) -> Result<Vec<u32>> {
        build_step_years(
            self.steps.first_year,
            self.steps.final_year,
            self.steps.resolution,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_pathway_file(contents: &str) -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        let mut file = File::create(dir.path().join(PATHWAY_FILE_NAME)).unwrap();
        writeln!(file, "{contents}").unwrap();
        dir
    }

    #[test]
    fn test_from_path_minimal() {
        let dir = write_pathway_file(
            "[steps]\nfirst_year = 2025\nfinal_year = 2050\nresolution = 5",
        );
        let file = PathwayFile::from_path(dir.path()).unwrap();
        assert_eq!(
            file.step_years().unwrap(),
            vec![2025, 2030, 2035, 2040, 2045, 2050]
        );

        // All other sections take their documented defaults
        assert_eq!(file.vintages, VintagesConfig::default());
        assert_eq!(file.decommissioning.seed, DEFAULT_SEED);
        assert!(file.transmission.techs.is_empty());
        assert_eq!(file.grouping, GroupingConfig::default());
    }

    #[test]
    fn test_from_path_overrides() {
        let dir = write_pathway_file(
            "[steps]\nfirst_year = 2030\nfinal_year = 2040\nresolution = 10\n\
             [vintages]\nmethod = \"step\"\nbase_resolution = 2\n\
             [decommissioning]\nseed = 42\nshape_min = 2.5\n\
             [transmission]\ntechs = [\"ac_NORD_to_CNOR\"]",
        );
        let file = PathwayFile::from_path(dir.path()).unwrap();
        assert_eq!(file.vintages.method, SurvivalMethod::Step);
        assert_eq!(file.vintages.base_resolution, 2);
        assert_approx_eq!(f64, file.vintages.shape, DEFAULT_SHAPE);
        assert_eq!(file.decommissioning.seed, 42);
        assert_approx_eq!(f64, file.decommissioning.shape_min, 2.5);
        assert_approx_eq!(f64, file.decommissioning.shape_max, DEFAULT_SHAPE_MAX);
        assert_eq!(file.transmission.techs, vec!["ac_NORD_to_CNOR".into()]);
    }

    #[test]
    fn test_from_path_partial_period() {
        let dir = write_pathway_file(
            "[steps]\nfirst_year = 2025\nfinal_year = 2048\nresolution = 5",
        );
        assert!(PathwayFile::from_path(dir.path()).is_err());
    }

    #[test]
    fn test_from_path_unknown_method() {
        let dir = write_pathway_file(
            "[steps]\nfirst_year = 2025\nfinal_year = 2050\nresolution = 5\n\
             [vintages]\nmethod = \"exponential\"",
        );
        assert!(PathwayFile::from_path(dir.path()).is_err());
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempdir().unwrap();
        assert!(PathwayFile::from_path(dir.path()).is_err());
    }
}
