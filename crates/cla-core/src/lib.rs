//! Ambient plumbing shared by the CLA portal crates: tracing setup and
//! database connection handling.

pub mod db;
pub mod tracing;
