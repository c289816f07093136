//! File naming conventions for catchment inputs and converter outputs.
//!
//! Every input in the data store is prefixed with its catchment code, e.g.
//! `123456_DEM.asc`, `123456_NFM_balanced_woodland.asc`,
//! `123456_climate_files_rcp85.zip`. The functions here derive source names
//! from the run configuration and the names files get once staged into the
//! run folder.

use crate::scenario::{CatchmentId, UdmScenario};

/// Suffix of the library file written by the UDM / CEH2Types converter.
pub const LIBRARY_FILE_SUFFIX: &str = "_LibraryFile_UDM.xml";

/// Prefix of the run-data file written by SHETRAN prepare.
pub const RUNDATA_PREFIX: &str = "rundata_";

/// Token identifying the autocalibrated library file among the inputs.
pub const AUTOCAL_LIBRARY_TOKEN: &str = "_autocal_Library";

/// Staged name of the autocalibration results table.
pub const RESULTS_STAGED_NAME: &str = "results.csv";

/// Tokens that exclude an input from the verbatim copy. Files carrying
/// them are staged by a scenario-specific rule (or not at all).
const SCENARIO_TOKENS: [&str; 5] = ["_NFM_", "_UDM_", "_climate_files_", "_autocal_", "results"];

/// Whether an input belongs to the catchment (plain substring match).
pub fn belongs_to_catchment(file_name: &str, catchment: &CatchmentId) -> bool {
    file_name.contains(catchment.as_str())
}

/// Strip the scenario qualifier from an NFM input name.
///
/// ```
/// use shetran_core::naming::nfm_staged_name;
///
/// assert_eq!(nfm_staged_name("1_NFM_max_storage.asc"), "1_NFM_storage.asc");
/// assert_eq!(nfm_staged_name("1_NFM_balanced_woodland.asc"), "1_NFM_woodland.asc");
/// ```
pub fn nfm_staged_name(file_name: &str) -> String {
    file_name.replace("max_", "").replace("balanced_", "")
}

/// Source land-cover raster for the chosen UDM scenario.
pub fn udm_source_name(catchment: &CatchmentId, scenario: &UdmScenario) -> String {
    match scenario {
        UdmScenario::Baseline => format!("{catchment}_LandCover_UDM_2017.asc"),
        UdmScenario::Named(name) => format!("{catchment}_LandCover_UDM_GB_LandCover_{name}.asc"),
    }
}

/// Name the converter expects the land-cover raster under.
pub fn udm_staged_name(catchment: &CatchmentId) -> String {
    format!("{catchment}_LandCover_UDM.asc")
}

pub fn climate_archive_name(catchment: &CatchmentId, climate_scenario: &str) -> String {
    format!("{catchment}_climate_files_{climate_scenario}.zip")
}

/// Drop the `{catchment}_autocal_` prefix so the library keeps only its
/// own name, e.g. `123456_autocal_LibraryFile.xml` -> `LibraryFile.xml`.
pub fn autocal_staged_name(file_name: &str, catchment: &CatchmentId) -> String {
    file_name.replace(&format!("{catchment}_autocal_"), "")
}

pub fn results_source_name(catchment: &CatchmentId) -> String {
    format!("{catchment}_results.csv")
}

/// Whether a catchment input is copied into the run folder unchanged.
pub fn is_verbatim_input(file_name: &str) -> bool {
    !SCENARIO_TOKENS.iter().any(|token| file_name.contains(token))
}

pub fn is_library_file(file_name: &str) -> bool {
    file_name.ends_with(LIBRARY_FILE_SUFFIX)
}

pub fn is_rundata_file(file_name: &str) -> bool {
    file_name.starts_with(RUNDATA_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catchment() -> CatchmentId {
        CatchmentId::new("123456")
    }

    #[test]
    fn udm_baseline_source() {
        assert_eq!(
            udm_source_name(&catchment(), &UdmScenario::Baseline),
            "123456_LandCover_UDM_2017.asc"
        );
    }

    #[test]
    fn udm_named_source() {
        assert_eq!(
            udm_source_name(&catchment(), &UdmScenario::parse("SSP2_2050")),
            "123456_LandCover_UDM_GB_LandCover_SSP2_2050.asc"
        );
    }

    #[test]
    fn udm_staged() {
        assert_eq!(udm_staged_name(&catchment()), "123456_LandCover_UDM.asc");
    }

    #[test]
    fn nfm_removes_every_qualifier() {
        // Both tokens go, whichever scenario selected the file.
        assert_eq!(
            nfm_staged_name("123456_NFM_max_balanced_ponds.asc"),
            "123456_NFM_ponds.asc"
        );
        assert_eq!(nfm_staged_name("123456_NFM_ponds.asc"), "123456_NFM_ponds.asc");
    }

    #[test]
    fn climate_archive() {
        assert_eq!(
            climate_archive_name(&catchment(), "rcp85"),
            "123456_climate_files_rcp85.zip"
        );
    }

    #[test]
    fn autocal_prefix_stripped() {
        assert_eq!(
            autocal_staged_name("123456_autocal_LibraryFile.xml", &catchment()),
            "LibraryFile.xml"
        );
    }

    #[test]
    fn verbatim_filter() {
        assert!(is_verbatim_input("123456_DEM.asc"));
        assert!(is_verbatim_input("123456_Mask.asc"));
        assert!(!is_verbatim_input("123456_NFM_max_storage.asc"));
        assert!(!is_verbatim_input("123456_LandCover_UDM_2017.asc"));
        assert!(!is_verbatim_input("123456_climate_files_rcp85.zip"));
        assert!(!is_verbatim_input("123456_autocal_LibraryFile.xml"));
        assert!(!is_verbatim_input("123456_results.csv"));
    }

    #[test]
    fn catchment_membership_is_substring() {
        assert!(belongs_to_catchment("123456_DEM.asc", &catchment()));
        assert!(belongs_to_catchment("x123456y", &catchment()));
        assert!(!belongs_to_catchment("12345_DEM.asc", &catchment()));
    }

    #[test]
    fn artifact_patterns() {
        assert!(is_library_file("2002_LibraryFile_UDM.xml"));
        assert!(!is_library_file("2002_LibraryFile.xml"));
        assert!(is_rundata_file("rundata_2002.txt"));
        assert!(!is_rundata_file("output_rundata_2002.txt"));
    }
}
