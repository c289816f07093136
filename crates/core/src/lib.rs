//! Domain types for the SHETRAN/UDM run orchestrator.
//!
//! Everything here is free of pipeline state: run configuration, scenario
//! selectors, input naming rules, the output metadata schema, and the
//! external tool executors.

pub mod config;
pub mod error;
pub mod metadata;
pub mod naming;
pub mod scenario;
pub mod tools;
