//! Output metadata document (`metadata.json`).
//!
//! A DCAT-style dataset record describing the run. Only the title and the
//! creation timestamp vary; the temporal and spatial extents are emitted as
//! empty placeholders because nothing in the pipeline computes them yet.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const METADATA_CONTEXT: &str = "metadata-v1";
pub const DATASET_TYPE: &str = "dcat:Dataset";
pub const LICENSE_URL: &str = "https://creativecommons.org/licences/by/4.0/";
pub const CONTACT_NAME: &str = "DAFNI";
pub const CONTACT_EMAIL: &str = "support@dafni.ac.uk";

/// Description placeholder (a single space).
pub const DEFAULT_DESCRIPTION: &str = " ";

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunMetadata {
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(rename = "dct:language")]
    pub language: String,
    #[serde(rename = "dct:title")]
    pub title: String,
    #[serde(rename = "dct:description")]
    pub description: String,
    #[serde(rename = "dcat:keyword")]
    pub keywords: Vec<String>,
    #[serde(rename = "dct:subject")]
    pub subject: String,
    #[serde(rename = "dct:license")]
    pub license: License,
    #[serde(rename = "dct:creator")]
    pub creator: Vec<Creator>,
    #[serde(rename = "dcat:contactPoint")]
    pub contact_point: ContactPoint,
    /// ISO 8601 UTC timestamp with a trailing `Z`.
    #[serde(rename = "dct:created")]
    pub created: String,
    #[serde(rename = "dct:PeriodOfTime")]
    pub period_of_time: PeriodOfTime,
    pub dafni_version_note: String,
    #[serde(rename = "dct:spatial")]
    pub spatial: Spatial,
    pub geojson: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct License {
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "rdfs:label")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Creator {
    #[serde(rename = "@type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactPoint {
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(rename = "vcard:fn")]
    pub name: String,
    #[serde(rename = "vcard:hasEmail")]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodOfTime {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "time:hasBeginning")]
    pub beginning: Option<String>,
    #[serde(rename = "time:hasEnd")]
    pub end: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Spatial {
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(rename = "rdfs:label")]
    pub label: Option<String>,
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl RunMetadata {
    /// Build the record for a run finished at `created`.
    pub fn new(title: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            context: vec![METADATA_CONTEXT.to_string()],
            kind: DATASET_TYPE.to_string(),
            language: "en".to_string(),
            title: title.into(),
            description: DEFAULT_DESCRIPTION.to_string(),
            keywords: vec!["shetran".to_string()],
            subject: "Environment".to_string(),
            license: License {
                kind: "LicenseDocument".to_string(),
                id: LICENSE_URL.to_string(),
                label: None,
            },
            creator: vec![Creator {
                kind: "foaf:Organization".to_string(),
            }],
            contact_point: ContactPoint {
                kind: "vcard:Organization".to_string(),
                name: CONTACT_NAME.to_string(),
                email: CONTACT_EMAIL.to_string(),
            },
            created: format_created(created),
            period_of_time: PeriodOfTime {
                kind: "dct:PeriodOfTime".to_string(),
                beginning: None,
                end: None,
            },
            dafni_version_note: "created".to_string(),
            spatial: Spatial {
                kind: "dct:Location".to_string(),
                label: None,
            },
            geojson: serde_json::Map::new(),
        }
    }

    /// Build the record stamped with the current time.
    pub fn now(title: impl Into<String>) -> Self {
        Self::new(title, Utc::now())
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Microsecond-precision ISO 8601 with a `Z` suffix.
fn format_created(created: DateTime<Utc>) -> String {
    created.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}
