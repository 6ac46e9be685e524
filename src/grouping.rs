//! Category groupings for aggregating nodes and technologies.
//!
//! A grouping maps a new label to the set of original labels it absorbs, e.g.
//! `{"hydropower": ["hydro_dam", "hydro_ror"]}`. Groupings must be exhaustive:
//! a value with no assigned group is a hard error, never a silently dropped
//! row.
use crate::input::capacity::CapacityRow;
use anyhow::{Result, bail};
use indexmap::IndexMap;

/// A grouping dictionary: `{new_label: [old_label, ...]}`
pub type GroupingMap = IndexMap<String, Vec<String>>;

/// Find the group a value belongs to.
///
/// # Arguments
///
/// * `value` - The original label
/// * `grouping` - The grouping dictionary
///
/// # Returns
///
/// The new label, or an error if no group covers `value`.
pub fn map_to_group<'a>(value: &str, grouping: &'a GroupingMap) -> Result<&'a str> {
    for (group, members) in grouping {
        if members.iter().any(|member| member == value) {
            return Ok(group);
        }
    }

    bail!("No group defined for value {value}");
}

/// Aggregate a capacity table under grouped node and technology labels.
///
/// Capacity is summed per (node group, technology group). Either grouping may
/// be omitted, in which case the original labels are kept for that axis.
///
/// # Arguments
///
/// * `rows` - The capacity table to aggregate
/// * `node_grouping` - Optional grouping for node labels
/// * `tech_grouping` - Optional grouping for technology labels
///
/// # Returns
///
/// The aggregated table, in first-appearance order of the grouped pairs, or
/// an error if a grouping is not exhaustive.
pub fn regroup_capacity(
    rows: &[CapacityRow],
    node_grouping: Option<&GroupingMap>,
    tech_grouping: Option<&GroupingMap>,
) -> Result<Vec<CapacityRow>> {
    let mut totals = IndexMap::new();
    for row in rows {
        let node = match node_grouping {
            Some(grouping) => map_to_group(&row.node.0, grouping)?.into(),
            None => row.node.clone(),
        };
        let technology = match tech_grouping {
            Some(grouping) => map_to_group(&row.technology.0, grouping)?.into(),
            None => row.technology.clone(),
        };
        *totals.entry((node, technology)).or_insert(0.0) += row.capacity;
    }

    Ok(totals
        .into_iter()
        .map(|((node, technology), capacity)| CapacityRow {
            node,
            technology,
            capacity,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::assert_error;
    use indexmap::indexmap;

    fn tech_grouping() -> GroupingMap {
        indexmap! {
            "hydropower".into() => vec!["hydro_dam".into(), "hydro_ror".into()],
            "pv".into() => vec!["pv_farm".into(), "pv_rooftop".into()],
        }
    }

    fn row(node: &str, technology: &str, capacity: f64) -> CapacityRow {
        CapacityRow {
            node: node.into(),
            technology: technology.into(),
            capacity,
        }
    }

    #[test]
    fn test_map_to_group() {
        let grouping = tech_grouping();
        assert_eq!(map_to_group("hydro_dam", &grouping).unwrap(), "hydropower");
        assert_eq!(map_to_group("pv_rooftop", &grouping).unwrap(), "pv");
        assert_error!(
            map_to_group("geothermal", &grouping),
            "No group defined for value geothermal"
        );
    }

    #[test]
    fn test_regroup_capacity_sums_groups() {
        let rows = [
            row("NORD", "hydro_dam", 100.0),
            row("NORD", "hydro_ror", 20.0),
            row("NORD", "pv_farm", 5.0),
        ];
        let regrouped = regroup_capacity(&rows, None, Some(&tech_grouping())).unwrap();
        assert_eq!(
            regrouped,
            vec![row("NORD", "hydropower", 120.0), row("NORD", "pv", 5.0)]
        );
    }

    #[test]
    fn test_regroup_capacity_identity() {
        let rows = [row("NORD", "ccgt", 100.0), row("SUD", "ccgt", 50.0)];
        assert_eq!(regroup_capacity(&rows, None, None).unwrap(), rows);
    }

    #[test]
    fn test_regroup_capacity_not_exhaustive() {
        // A grouping dictionary missing a category must fail, not drop the row
        let rows = [row("NORD", "hydro_dam", 1.0), row("NORD", "coal", 2.0)];
        assert_error!(
            regroup_capacity(&rows, None, Some(&tech_grouping())),
            "No group defined for value coal"
        );
    }
}
