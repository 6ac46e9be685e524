//! The module responsible for writing generated pathway tables to disk.
use crate::id::{NodeID, TechnologyID};
use crate::input::capacity::CapacityRow;
use crate::model::PathwayTables;
use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The root folder in which model-specific output folders will be created
const OUTPUT_DIRECTORY_ROOT: &str = "pathways_results";

/// The output file name for investment-step widths
const INVESTSTEP_RESOLUTION_FILE_NAME: &str = "investstep_resolution.csv";

/// The output file name for the vintage-availability tensor
const VINTAGE_AVAILABILITY_FILE_NAME: &str = "vintage_availability.csv";

/// The output file name for the transmission availability tensor
const TRANSMISSION_AVAILABILITY_FILE_NAME: &str = "transmission_availability.csv";

/// The output file name for legacy-capacity decommissioning curves
const DECOMMISSIONING_FILE_NAME: &str = "initial_capacity_decommissioning.csv";

/// The output file name for the (possibly regrouped) initial capacity
const INITIAL_CAPACITY_FILE_NAME: &str = "initial_capacity.csv";

/// Get the default output folder for the specified model directory
pub fn get_output_dir(model_dir: &Path) -> Result<PathBuf> {
    let model_dir = model_dir
        .canonicalize() // canonicalise in case the user has specified "."
        .context("Could not resolve path to model")?;

    let model_name = model_dir
        .file_name()
        .context("Model cannot be in root folder")?
        .to_str()
        .context("Invalid chars in model dir name")?;

    Ok([OUTPUT_DIRECTORY_ROOT, model_name].iter().collect())
}

/// Create the output directory for generated tables.
///
/// # Returns
///
/// Whether an existing directory was replaced. Replacing requires
/// `overwrite`; without it an existing directory is an error.
pub fn create_output_directory(output_dir: &Path, overwrite: bool) -> Result<bool> {
    let existed = output_dir.is_dir();
    if existed {
        ensure!(
            overwrite,
            "Output directory {} already exists. Pass --overwrite to replace it.",
            output_dir.display()
        );
        fs::remove_dir_all(output_dir)?;
    }
    fs::create_dir_all(output_dir)?;

    Ok(existed)
}

/// Represents a row in the investment-step resolution CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct ResolutionRow {
    investstep: u32,
    resolution: u32,
}

/// Represents a row in a vintage-availability CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct AvailabilityRow {
    technology: TechnologyID,
    investstep: u32,
    vintagestep: u32,
    availability: f64,
}

/// Represents a row in the decommissioning-curves CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct DecommissionRow {
    node: NodeID,
    technology: TechnologyID,
    year: u32,
    fraction: f64,
}

fn write_csv_rows<T: Serialize>(file_path: &Path, rows: impl Iterator<Item = T>) -> Result<()> {
    let mut writer = csv::Writer::from_path(file_path)
        .with_context(|| format!("Could not create {}", file_path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Write all generated pathway tables to the output directory as CSV files.
///
/// Tables are written in long format; future-vintage cells are absent by
/// construction, so only valid (investstep, vintagestep) pairs appear.
///
/// # Arguments
///
/// * `tables` - The generated tables
/// * `capacity` - The (possibly regrouped) initial-capacity table
/// * `output_dir` - The directory to write to (must exist)
pub fn write_tables(
    tables: &PathwayTables,
    capacity: &[CapacityRow],
    output_dir: &Path,
) -> Result<()> {
    write_csv_rows(
        &output_dir.join(INVESTSTEP_RESOLUTION_FILE_NAME),
        tables
            .investstep_resolution
            .iter()
            .map(|&(investstep, resolution)| ResolutionRow {
                investstep,
                resolution,
            }),
    )?;

    for (file_name, availability) in [
        (VINTAGE_AVAILABILITY_FILE_NAME, &tables.vintage_availability),
        (
            TRANSMISSION_AVAILABILITY_FILE_NAME,
            &tables.transmission_availability,
        ),
    ] {
        write_csv_rows(
            &output_dir.join(file_name),
            availability
                .iter()
                .map(|(technology, investstep, vintagestep, value)| AvailabilityRow {
                    technology: technology.clone(),
                    investstep,
                    vintagestep,
                    availability: value,
                }),
        )?;
    }

    write_csv_rows(
        &output_dir.join(DECOMMISSIONING_FILE_NAME),
        tables
            .decommission
            .fractions
            .iter()
            .flat_map(|((node, technology), row)| {
                tables
                    .decommission
                    .years
                    .iter()
                    .zip(row)
                    .map(|(&year, &fraction)| DecommissionRow {
                        node: node.clone(),
                        technology: technology.clone(),
                        year,
                        fraction,
                    })
            }),
    )?;

    write_csv_rows(
        &output_dir.join(INITIAL_CAPACITY_FILE_NAME),
        capacity.iter().cloned(),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::write_model_dir;
    use crate::input::read_csv;
    use crate::model::Model;
    use tempfile::tempdir;

    #[test]
    fn test_create_output_directory() {
        let dir = tempdir().unwrap();
        let output_dir = dir.path().join("results");

        assert!(!create_output_directory(&output_dir, false).unwrap());
        assert!(output_dir.is_dir());

        // Already exists: fails without overwrite, replaces with it
        assert!(create_output_directory(&output_dir, false).is_err());
        assert!(create_output_directory(&output_dir, true).unwrap());
    }

    #[test]
    fn test_write_tables() {
        let model_dir = write_model_dir();
        let model = Model::from_path(model_dir.path()).unwrap();
        let tables = model.generate().unwrap();

        let out = tempdir().unwrap();
        write_tables(&tables, &model.capacity, out.path()).unwrap();

        let resolution: Vec<ResolutionRow> =
            read_csv(&out.path().join(INVESTSTEP_RESOLUTION_FILE_NAME)).unwrap();
        assert_eq!(resolution.len(), model.years.len());
        assert!(resolution.iter().all(|row| row.resolution == 5));

        let availability: Vec<AvailabilityRow> =
            read_csv(&out.path().join(VINTAGE_AVAILABILITY_FILE_NAME)).unwrap();
        assert_eq!(availability.len(), tables.vintage_availability.len());
        // Only valid cells are written
        assert!(
            availability
                .iter()
                .all(|row| row.vintagestep <= row.investstep)
        );

        let decommission: Vec<DecommissionRow> =
            read_csv(&out.path().join(DECOMMISSIONING_FILE_NAME)).unwrap();
        assert_eq!(decommission.len(), model.pairs.len() * model.years.len());

        let capacity: Vec<CapacityRow> =
            read_csv(&out.path().join(INITIAL_CAPACITY_FILE_NAME)).unwrap();
        assert_eq!(capacity, model.capacity);
    }
}
