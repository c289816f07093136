//! The SHETRAN executables and how the pipeline picks between them.

use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::scenario::CatchmentId;

/// One of the pre-built executables shipped alongside the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Land-cover converter for catchments below the threshold.
    UdmConverter,
    /// Land-cover converter for catchments at or above the threshold.
    Ceh2TypesConverter,
    /// Builds the simulation inputs from a library file.
    Prepare,
    /// The rainfall-runoff simulation itself.
    Simulation,
}

impl Tool {
    pub fn binary_name(self) -> &'static str {
        match self {
            Self::UdmConverter => "shetran-setup-UDM-linux",
            Self::Ceh2TypesConverter => "shetran-setup-CEH2Types-linux",
            Self::Prepare => "shetran-prepare-snow",
            Self::Simulation => "shetran-linux",
        }
    }

    /// Path to the executable inside `tools_dir`.
    pub fn path_in(self, tools_dir: &Path) -> PathBuf {
        tools_dir.join(self.binary_name())
    }

    /// Pick the land-cover converter for a catchment.
    ///
    /// Catchment codes numbered `threshold` and above use the CEH2Types
    /// converter; everything below uses the UDM converter.
    pub fn converter_for(catchment: &CatchmentId, threshold: u64) -> Result<Self, CoreError> {
        if catchment.number()? >= threshold {
            Ok(Self::Ceh2TypesConverter)
        } else {
            Ok(Self::UdmConverter)
        }
    }
}
