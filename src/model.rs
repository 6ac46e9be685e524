//! Code for pathway models.
//!
//! A model is loaded with an explicit [`Model::from_path`] call and generates
//! its pathway tables with [`Model::generate`]. Each generate call builds
//! independent tables; no state is shared between builds.
use crate::availability::{VintageAvailability, transmission_availability, vintage_availability};
use crate::config::PathwayFile;
use crate::decommission::{DecommissionCurves, decommission_curves};
use crate::grouping::regroup_capacity;
use crate::id::{NodeID, TechnologyID};
use crate::input::capacity::{CapacityRow, node_tech_pairs, read_initial_capacity};
use crate::input::technology::{LifetimeMap, read_technologies};
use crate::step::step_resolution;
use anyhow::{Result, ensure};
use indexmap::IndexSet;
use log::info;
use std::path::Path;

/// A pathway model: configuration plus validated input data
#[derive(Debug)]
pub struct Model {
    /// The model configuration
    pub config: PathwayFile,
    /// The investment-step years
    pub years: Vec<u32>,
    /// Technology lifetimes
    pub lifetimes: LifetimeMap,
    /// Initial installed capacity (regrouped if groupings are configured)
    pub capacity: Vec<CapacityRow>,
    /// The distinct (node, technology) pairs of the capacity table
    pub pairs: IndexSet<(NodeID, TechnologyID)>,
}

/// The generated pathway tables, ready to be written as model input data
pub struct PathwayTables {
    /// Width in years of each investment step
    pub investstep_resolution: Vec<(u32, u32)>,
    /// Vintage availability for ageing technologies
    pub vintage_availability: VintageAvailability,
    /// All-ones vintage availability for transmission technologies
    pub transmission_availability: VintageAvailability,
    /// Randomized decommissioning curves for legacy capacity
    pub decommission: DecommissionCurves,
}

impl Model {
    /// Read a model from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `model_dir` - Folder containing model input files
    pub fn from_path<P: AsRef<Path>>(model_dir: P) -> Result<Model> {
        let config = PathwayFile::from_path(&model_dir)?;
        Self::from_config(model_dir, config)
    }

    /// Read a model's input data, using an already-loaded configuration.
    pub fn from_config<P: AsRef<Path>>(model_dir: P, config: PathwayFile) -> Result<Model> {
        let model_dir = model_dir.as_ref();
        let years = config.step_years()?;
        let lifetimes = read_technologies(model_dir)?;
        let raw_capacity = read_initial_capacity(model_dir)?;
        let capacity = regroup_capacity(
            &raw_capacity,
            config.grouping.nodes.as_ref(),
            config.grouping.techs.as_ref(),
        )?;
        let pairs = node_tech_pairs(&capacity);
        for (_, technology) in &pairs {
            ensure!(
                lifetimes.contains_key(technology),
                "Unknown technology {technology} in initial capacity"
            );
        }

        Ok(Model {
            config,
            years,
            lifetimes,
            capacity,
            pairs,
        })
    }

    /// Generate all pathway tables for this model.
    pub fn generate(&self) -> Result<PathwayTables> {
        let params = self.config.vintages.to_params();
        info!(
            "Generating pathway tables for {} investment steps ({} survival curves)",
            self.years.len(),
            params.method
        );

        let widths = step_resolution(&self.years, params.base_resolution)?;
        let investstep_resolution = self.years.iter().copied().zip(widths).collect();

        let availability =
            vintage_availability(&self.years, &self.years, &self.lifetimes, &params)?;
        let transmission =
            transmission_availability(&self.config.transmission.techs, &self.years)?;

        let settings = self.config.decommissioning.to_settings(params.zero_floor);
        let decommission =
            decommission_curves(&self.pairs, &self.lifetimes, &self.years, &settings)?;
        info!(
            "Generated decommissioning curves for {} (node, technology) pairs with seed {}",
            self.pairs.len(),
            settings.seed
        );

        Ok(PathwayTables {
            investstep_resolution,
            vintage_availability: availability,
            transmission_availability: transmission,
            decommission,
        })
    }
}
