//! SHETRAN/UDM run pipeline.
//!
//! Stages a catchment's inputs into a fresh run folder, runs the land-cover
//! converter, SHETRAN prepare and the SHETRAN simulation in sequence, and
//! writes `metadata.json`. Progress is recorded in the plain-text run log
//! as well as through `tracing`.

pub mod archive;
pub mod artifacts;
pub mod error;
pub mod layout;
pub mod run_log;
pub mod runner;
pub mod staging;

pub use error::{PipelineError, PipelineResult};
pub use layout::RunLayout;
pub use run_log::RunLog;
pub use runner::{run, run_started, start_run, RunSummary};
pub use staging::{StagingReport, UdmCopy};
