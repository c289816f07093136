//! Catchment and scenario selectors for a single run.
//!
//! These are the typed forms of the `CATCHMENT_NAME`, `NFM_SCENARIO` and
//! `UDM_SCENARIO` environment variables. Parsing is lenient in the same way
//! the deployed workflow has always been: an unknown NFM value simply means
//! "no NFM", and any UDM name other than `Baseline` is passed through as a
//! land-cover variant.

use std::fmt;

use crate::error::CoreError;

/// Numeric catchment code, kept as the string the user supplied.
///
/// File selection works on the raw string (every input whose name contains
/// it), so the numeric value is only parsed on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatchmentId(String);

impl CatchmentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the identifier as an unsigned integer.
    pub fn number(&self) -> Result<u64, CoreError> {
        self.0
            .trim()
            .parse()
            .map_err(|_| CoreError::NonNumericCatchment(self.0.clone()))
    }
}

impl fmt::Display for CatchmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Natural Flood Management intervention applied to the inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NfmScenario {
    #[default]
    None,
    Max,
    Balanced,
}

impl NfmScenario {
    /// `max` and `balanced` select a scenario; anything else (including an
    /// unset variable) means no NFM files are staged.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("max") => Self::Max,
            Some("balanced") => Self::Balanced,
            _ => Self::None,
        }
    }

    /// Token that marks an input file as belonging to this scenario.
    pub fn file_token(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Max => Some("NFM_max"),
            Self::Balanced => Some("NFM_balanced"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Max => "max",
            Self::Balanced => "balanced",
        }
    }
}

/// Urban Development Model land-cover variant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UdmScenario {
    /// The 2017 observed land cover.
    #[default]
    Baseline,
    /// A named GB land-cover projection, e.g. `SSP2_2050`.
    Named(String),
}

impl UdmScenario {
    pub const BASELINE: &'static str = "Baseline";

    pub fn parse(value: &str) -> Self {
        if value == Self::BASELINE {
            Self::Baseline
        } else {
            Self::Named(value.to_string())
        }
    }
}

impl fmt::Display for UdmScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Baseline => f.write_str(Self::BASELINE),
            Self::Named(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn nfm_known_values() {
        assert_eq!(NfmScenario::parse(Some("max")), NfmScenario::Max);
        assert_eq!(NfmScenario::parse(Some("balanced")), NfmScenario::Balanced);
    }

    #[test]
    fn nfm_anything_else_is_none() {
        assert_eq!(NfmScenario::parse(None), NfmScenario::None);
        assert_eq!(NfmScenario::parse(Some("")), NfmScenario::None);
        assert_eq!(NfmScenario::parse(Some("Max")), NfmScenario::None);
        assert_eq!(NfmScenario::parse(Some("none")), NfmScenario::None);
    }

    #[test]
    fn nfm_tokens() {
        assert_eq!(NfmScenario::None.file_token(), None);
        assert_eq!(NfmScenario::Max.file_token(), Some("NFM_max"));
        assert_eq!(NfmScenario::Balanced.file_token(), Some("NFM_balanced"));
    }

    #[test]
    fn udm_baseline_is_case_sensitive() {
        assert_eq!(UdmScenario::parse("Baseline"), UdmScenario::Baseline);
        assert_eq!(
            UdmScenario::parse("baseline"),
            UdmScenario::Named("baseline".to_string())
        );
    }

    #[test]
    fn udm_display_round_trips_name() {
        assert_eq!(UdmScenario::parse("SSP2_2050").to_string(), "SSP2_2050");
        assert_eq!(UdmScenario::Baseline.to_string(), "Baseline");
    }

    #[test]
    fn catchment_number() {
        assert_eq!(CatchmentId::new("123456").number().unwrap(), 123456);
        assert_eq!(CatchmentId::new("2002").number().unwrap(), 2002);
    }

    #[test]
    fn catchment_non_numeric() {
        assert_matches!(
            CatchmentId::new("Tyne").number(),
            Err(CoreError::NonNumericCatchment(id)) if id == "Tyne"
        );
    }
}
