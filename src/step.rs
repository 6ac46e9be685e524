//! Code for working with investment steps.
//!
//! Investment steps are the discrete future decision points of a pathway
//! model, given as an ordered sequence of calendar years. The spacing between
//! steps need not be uniform.
use crate::input::is_sorted_and_unique;
use anyhow::{Result, ensure};
use itertools::Itertools;

/// The resolution assigned to a single-step sequence, where no difference exists
pub const DEFAULT_BASE_RESOLUTION: u32 = 1;

/// Derive the width in years of each investment step.
///
/// The width of a step is the forward difference to the next step; the last
/// step has no trailing edge, so it inherits the width of its predecessor
/// interval. A single-step sequence gets `base_resolution`.
///
/// # Arguments
///
/// * `years` - Ordered sequence of step years (strictly increasing, non-empty)
/// * `base_resolution` - Width to use when only one step exists
///
/// # Returns
///
/// One strictly positive width per step, in step order.
pub fn step_resolution(years: &[u32], base_resolution: u32) -> Result<Vec<u32>> {
    ensure!(!years.is_empty(), "No investment steps provided");
    ensure!(
        is_sorted_and_unique(years),
        "Investment steps must be in order and unique"
    );
    ensure!(
        base_resolution > 0,
        "Base resolution must be greater than 0"
    );

    if years.len() == 1 {
        return Ok(vec![base_resolution]);
    }

    let mut widths: Vec<u32> = years
        .iter()
        .tuple_windows()
        .map(|(year, next)| next - year)
        .collect();
    let last = *widths.last().unwrap();
    widths.push(last);

    Ok(widths)
}

/// Build the inclusive sequence of step years from `first_year` to `final_year`.
///
/// # Arguments
///
/// * `first_year` - The first investment step
/// * `final_year` - The final investment step (inclusive)
/// * `resolution` - Uniform spacing between steps, in years
///
/// # Returns
///
/// The step years, or an error if the resolution does not evenly divide the
/// year range (the horizon is never silently truncated).
pub fn build_step_years(first_year: u32, final_year: u32, resolution: u32) -> Result<Vec<u32>> {
    ensure!(
        first_year <= final_year,
        "First year {first_year} is after final year {final_year}"
    );
    ensure!(resolution > 0, "Investment-step resolution must be greater than 0");
    ensure!(
        (final_year - first_year) % resolution == 0,
        "Investment-step resolution of {resolution} years must fit between {first_year} and \
         {final_year} without any partial investment periods"
    );

    Ok((first_year..=final_year).step_by(resolution as usize).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::assert_error;
    use rstest::rstest;

    #[rstest]
    #[case(&[2020], &[1])] // single step falls back to the base resolution
    #[case(&[2020, 2030, 2045], &[10, 15, 15])] // last width repeats the prior interval
    #[case(&[2025, 2030, 2035, 2040, 2045, 2050], &[5, 5, 5, 5, 5, 5])]
    fn test_step_resolution_valid(#[case] years: &[u32], #[case] expected: &[u32]) {
        assert_eq!(
            step_resolution(years, DEFAULT_BASE_RESOLUTION).unwrap(),
            expected
        );
    }

    #[test]
    fn test_step_resolution_base_resolution() {
        assert_eq!(step_resolution(&[2020], 5).unwrap(), &[5]);
    }

    #[rstest]
    #[case(&[], "No investment steps provided")]
    #[case(&[2030, 2020], "Investment steps must be in order and unique")]
    #[case(&[2020, 2020], "Investment steps must be in order and unique")]
    fn test_step_resolution_invalid(#[case] years: &[u32], #[case] error_msg: &str) {
        assert_error!(step_resolution(years, DEFAULT_BASE_RESOLUTION), error_msg);
    }

    #[rstest]
    #[case(2025, 2050, 5, &[2025, 2030, 2035, 2040, 2045, 2050])]
    #[case(2020, 2020, 10, &[2020])]
    #[case(2020, 2040, 20, &[2020, 2040])]
    fn test_build_step_years_valid(
        #[case] first_year: u32,
        #[case] final_year: u32,
        #[case] resolution: u32,
        #[case] expected: &[u32],
    ) {
        assert_eq!(
            build_step_years(first_year, final_year, resolution).unwrap(),
            expected
        );
    }

    #[test]
    fn test_build_step_years_partial_period() {
        assert_error!(
            build_step_years(2025, 2048, 5),
            "Investment-step resolution of 5 years must fit between 2025 and 2048 without any \
             partial investment periods"
        );
    }

    #[test]
    fn test_build_step_years_reversed_range() {
        assert!(build_step_years(2050, 2025, 5).is_err());
    }
}
