//! Fixtures for tests
use crate::id::{NodeID, TechnologyID};
use crate::input::technology::LifetimeMap;
use indexmap::{IndexSet, indexmap};
use rstest::fixture;
use std::fs::File;
use std::io::Write;
use tempfile::TempDir;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

#[fixture]
pub fn lifetimes() -> LifetimeMap {
    indexmap! {
        "ccgt".into() => 22.0,
        "pv".into() => 20.0,
        "hydropower".into() => f64::INFINITY,
    }
}

#[fixture]
pub fn node_tech_pairs() -> IndexSet<(NodeID, TechnologyID)> {
    [
        ("NORD", "ccgt"),
        ("NORD", "hydropower"),
        ("SUD", "ccgt"),
        ("SICI", "pv"),
    ]
    .into_iter()
    .map(|(node, technology)| (node.into(), technology.into()))
    .collect()
}

/// Write a minimal, valid model directory for end-to-end tests
pub fn write_model_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();

    let mut file = File::create(dir.path().join("pathway.toml")).unwrap();
    writeln!(
        file,
        "[steps]\nfirst_year = 2025\nfinal_year = 2050\nresolution = 5\n\n\
         [transmission]\ntechs = [\"ac_NORD_to_SUD\"]"
    )
    .unwrap();

    let mut file = File::create(dir.path().join("technologies.csv")).unwrap();
    writeln!(file, "technology,lifetime\nccgt,22\npv,20\nhydropower,").unwrap();

    let mut file = File::create(dir.path().join("initial_capacity.csv")).unwrap();
    writeln!(
        file,
        "node,technology,capacity\nNORD,ccgt,100\nNORD,hydropower,50\nSUD,ccgt,80\nSICI,pv,30"
    )
    .unwrap();

    dir
}
