//! Code for reading the technology lifetime table from a CSV file.
use crate::id::TechnologyID;
use crate::input::{input_err_msg, read_csv};
use anyhow::{Context, Result, ensure};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

const TECHNOLOGIES_FILE_NAME: &str = "technologies.csv";

/// A map of technology lifetimes in years, keyed by technology ID.
///
/// A technology with no lifetime in the input file is stored as
/// [`f64::INFINITY`], meaning its capacity never decays.
pub type LifetimeMap = IndexMap<TechnologyID, f64>;

#[derive(PartialEq, Debug, Deserialize)]
struct TechnologyRaw {
    technology: String,
    lifetime: Option<f64>,
}

impl TechnologyRaw {
    fn validate(&self) -> Result<()> {
        if let Some(lifetime) = self.lifetime {
            ensure!(
                lifetime.is_finite() && lifetime > 0.0,
                "Error in technology {}: Lifetime must be a positive number of years",
                self.technology
            );
        }

        Ok(())
    }
}

/// Read the technology lifetime table from the specified model directory.
///
/// # Arguments
///
/// * `model_dir` - Folder containing model input files
///
/// # Returns
///
/// A map of lifetimes keyed by technology ID, in file order.
pub fn read_technologies(model_dir: &Path) -> Result<LifetimeMap> {
    let file_path = model_dir.join(TECHNOLOGIES_FILE_NAME);
    let records = read_csv::<TechnologyRaw>(&file_path)?;
    read_technologies_from_iter(records.into_iter()).with_context(|| input_err_msg(&file_path))
}

fn read_technologies_from_iter<I>(iter: I) -> Result<LifetimeMap>
where
    I: Iterator<Item = TechnologyRaw>,
{
    let mut lifetimes = LifetimeMap::new();
    for record in iter {
        record.validate()?;
        let id = TechnologyID::new(&record.technology);
        let lifetime = record.lifetime.unwrap_or(f64::INFINITY);
        ensure!(
            lifetimes.insert(id, lifetime).is_none(),
            "Duplicate technology {} in lifetime table",
            record.technology
        );
    }

    Ok(lifetimes)
}
