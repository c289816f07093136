use std::path::PathBuf;
use std::time::Duration;

use crate::error::CoreError;
use crate::scenario::{CatchmentId, NfmScenario, UdmScenario};

/// Default root of the `inputs/` and `outputs/` trees.
pub const DEFAULT_DATA_PATH: &str = "/data";

/// Default metadata title.
pub const DEFAULT_TITLE: &str = "SHETRAN output";

/// Catchments numbered at or above this use the CEH2Types converter.
pub const DEFAULT_CONVERTER_THRESHOLD: u64 = 200_000;

/// Run configuration resolved once from environment variables.
///
/// Built at process entry and passed by reference to every pipeline step;
/// nothing downstream reads the environment.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Root of the data tree (default: `/data`).
    pub data_path: PathBuf,
    pub catchment: CatchmentId,
    pub nfm: NfmScenario,
    pub udm: UdmScenario,
    /// Selects `{catchment}_climate_files_{climate}.zip`.
    pub climate: String,
    /// Title written into `metadata.json`.
    pub title: String,
    /// Directory holding the SHETRAN executables (default: `.`).
    pub tools_dir: PathBuf,
    pub converter_threshold: u64,
    /// Per-tool wall-clock limit. `None` waits indefinitely.
    pub tool_timeout: Option<Duration>,
}

impl RunConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var               | Default          |
    /// |-----------------------|------------------|
    /// | `DATA_PATH`           | `/data`          |
    /// | `CATCHMENT_NAME`      | required         |
    /// | `NFM_SCENARIO`        | none             |
    /// | `UDM_SCENARIO`        | `Baseline`       |
    /// | `CLIMATE_SCENARIO`    | required         |
    /// | `TITLE`               | `SHETRAN output` |
    /// | `TOOLS_DIR`           | `.`              |
    /// | `CONVERTER_THRESHOLD` | `200000`         |
    /// | `TOOL_TIMEOUT_SECS`   | unset            |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`RunConfig::from_env`] but reading variables through `lookup`.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let data_path = data_path_from_lookup(&lookup);

        let catchment = get("CATCHMENT_NAME")
            .map(CatchmentId::new)
            .ok_or(CoreError::MissingEnv("CATCHMENT_NAME"))?;

        let nfm = NfmScenario::parse(get("NFM_SCENARIO").as_deref());

        let udm = get("UDM_SCENARIO")
            .map(|v| UdmScenario::parse(&v))
            .unwrap_or_default();

        let climate = get("CLIMATE_SCENARIO").ok_or(CoreError::MissingEnv("CLIMATE_SCENARIO"))?;

        let title = get("TITLE").unwrap_or_else(|| DEFAULT_TITLE.to_string());

        let tools_dir = get("TOOLS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let converter_threshold = match get("CONVERTER_THRESHOLD") {
            Some(raw) => parse_number("CONVERTER_THRESHOLD", &raw)?,
            None => DEFAULT_CONVERTER_THRESHOLD,
        };

        let tool_timeout = get("TOOL_TIMEOUT_SECS")
            .map(|raw| parse_number("TOOL_TIMEOUT_SECS", &raw).map(Duration::from_secs))
            .transpose()?;

        Ok(Self {
            data_path,
            catchment,
            nfm,
            udm,
            climate,
            title,
            tools_dir,
            converter_threshold,
            tool_timeout,
        })
    }
}

/// Resolve only `DATA_PATH`. Never fails, so the output tree can be set up
/// before the rest of the configuration is checked.
pub fn data_path_from_lookup<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    lookup("DATA_PATH")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
}

fn parse_number(key: &'static str, raw: &str) -> Result<u64, CoreError> {
    raw.trim().parse().map_err(|e: std::num::ParseIntError| CoreError::InvalidEnv {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
