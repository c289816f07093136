//! External tool execution.
//!
//! The SHETRAN converter, prepare and simulation steps are pre-built
//! executables. This module names them ([`catalog`]), defines the executor
//! seam ([`executor`]) and runs them as subprocesses ([`binary`],
//! [`subprocess`]). No pipeline state lives here.

pub mod binary;
pub mod catalog;
pub mod executor;
pub mod subprocess;

pub use binary::BinaryExecutor;
pub use catalog::Tool;
pub use executor::{ToolError, ToolExecutor, ToolInput, ToolOutput};
