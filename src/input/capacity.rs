//! Code for reading the initial installed-capacity table from a CSV file.
use crate::id::{NodeID, TechnologyID};
use crate::input::{input_err_msg, read_csv};
use anyhow::{Context, Result, ensure};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

const INITIAL_CAPACITY_FILE_NAME: &str = "initial_capacity.csv";

/// One (node, technology) capacity entry from the initial-capacity table
#[derive(PartialEq, Clone, Debug, Deserialize, Serialize)]
pub struct CapacityRow {
    /// The node (region) the capacity is installed in
    pub node: NodeID,
    /// The technology the capacity belongs to
    pub technology: TechnologyID,
    /// Installed capacity
    pub capacity: f64,
}

impl CapacityRow {
    fn validate(&self) -> Result<()> {
        ensure!(
            self.capacity.is_finite() && self.capacity >= 0.0,
            "Error in capacity for {} at {}: Capacity must be a non-negative number",
            self.technology,
            self.node
        );

        Ok(())
    }
}

/// Read the initial installed capacity from the specified model directory.
///
/// Non-numeric capacity values fail deserialisation before any aggregation
/// takes place.
///
/// # Arguments
///
/// * `model_dir` - Folder containing model input files
pub fn read_initial_capacity(model_dir: &Path) -> Result<Vec<CapacityRow>> {
    let file_path = model_dir.join(INITIAL_CAPACITY_FILE_NAME);
    let rows = read_csv::<CapacityRow>(&file_path)?;
    for row in &rows {
        row.validate().with_context(|| input_err_msg(&file_path))?;
    }

    Ok(rows)
}

/// The distinct (node, technology) pairs of a capacity table, in first-appearance order.
///
/// The order is significant: the randomized decommissioning generator draws
/// its factors in this enumeration order.
pub fn node_tech_pairs(rows: &[CapacityRow]) -> IndexSet<(NodeID, TechnologyID)> {
    rows.iter()
        .map(|row| (row.node.clone(), row.technology.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::assert_error;

    fn row(node: &str, technology: &str, capacity: f64) -> CapacityRow {
        CapacityRow {
            node: node.into(),
            technology: technology.into(),
            capacity,
        }
    }

    #[test]
    fn test_validate() {
        assert!(row("NORD", "ccgt", 100.0).validate().is_ok());
        assert!(row("NORD", "ccgt", 0.0).validate().is_ok());
        for capacity in [-1.0, f64::NAN, f64::INFINITY] {
            assert_error!(
                row("NORD", "ccgt", capacity).validate(),
                "Error in capacity for ccgt at NORD: Capacity must be a non-negative number"
            );
        }
    }

    #[test]
    fn test_node_tech_pairs_order_and_dedup() {
        let rows = [
            row("NORD", "ccgt", 100.0),
            row("SUD", "pv", 50.0),
            row("NORD", "ccgt", 25.0), // duplicate pair
            row("NORD", "pv", 10.0),
        ];
        let pairs = node_tech_pairs(&rows);
        let expected: Vec<(NodeID, TechnologyID)> = vec![
            ("NORD".into(), "ccgt".into()),
            ("SUD".into(), "pv".into()),
            ("NORD".into(), "pv".into()),
        ];
        assert!(pairs.iter().cloned().eq(expected));
    }
}
