//! Common functionality for the pathways capacity-vintage toolkit.
#![warn(missing_docs)]
pub mod availability;
pub mod cli;
pub mod config;
pub mod decommission;
pub mod grouping;
pub mod id;
pub mod input;
pub mod log;
pub mod model;
pub mod output;
pub mod step;
pub mod survival;

#[cfg(test)]
mod fixture;
