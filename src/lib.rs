//! Command-line front end for the thread-harvest pipeline.
//!
//! The binary wires a live browser tab (over the Chrome DevTools protocol)
//! into [`harvest_flow::HarvestFlow`] and writes the resulting participant
//! records in the operator's chosen format.

pub mod cli;
pub mod config;
pub mod errors;
pub mod output;
