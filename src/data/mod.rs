//! # Dataset Loading
//!
//! Compatibility data is authored as JSON, one file per dataset variant:
//!
//! ```json
//! {
//!   "name": "critical_care",
//!   "fallback": { "precautions": "...", "nursingCare": "..." },
//!   "drugs":   [{ "id": "1", "name": "Adrenaline", "thaiName": "..." }],
//!   "results": [{ "drug1Id": "1", "drug2Id": "4", "status": "compatible",
//!                 "precautions": "...", "nursingCare": "...", "reference": "..." }]
//! }
//! ```
//!
//! Files under `data/` are compiled into the binary by `build.rs`. A dataset
//! is validated before a store is built from it, and any violation is fatal:
//! the resolver assumes clean data once running.

mod bundled;
mod validate;

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::info;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::config::{DatasetSource, ResolvedConfig};
use crate::core::resolver::CompatibilityResolver;
use crate::core::store::CompatibilityStore;
use crate::core::types::{Drug, FallbackGuidance, MixingResult};

pub use bundled::{DEFAULT_DATASET, bundled_names};

/// On-disk shape of a dataset file.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Dataset {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Text for pairs with no authored record
    #[serde(default)]
    pub fallback: FallbackGuidance,
    pub drugs: Vec<Drug>,
    pub results: Vec<MixingResult>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum DatasetError {
    Io(std::io::Error),
    /// Malformed JSON, a missing field, or a status outside the closed set
    Parse(serde_json::Error),
    UnknownBundled(String),
    EmptyDrugId { name: String },
    DuplicateDrugId(String),
    DuplicateDrugName(String),
    SelfPair(String),
    DanglingReference { drug_id: String, pair: (String, String) },
    DuplicatePair(String, String),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io(e) => write!(f, "dataset I/O error: {e}"),
            DatasetError::Parse(e) => write!(f, "dataset parse error: {e}"),
            DatasetError::UnknownBundled(name) => write!(f, "no bundled dataset named '{name}'"),
            DatasetError::EmptyDrugId { name } => write!(f, "drug '{name}' has an empty id"),
            DatasetError::DuplicateDrugId(id) => write!(f, "duplicate drug id: {id}"),
            DatasetError::DuplicateDrugName(name) => write!(f, "duplicate drug name: {name}"),
            DatasetError::SelfPair(id) => write!(f, "record pairs drug {id} with itself"),
            DatasetError::DanglingReference { drug_id, pair } => write!(
                f,
                "record ({}, {}) references unknown drug {drug_id}",
                pair.0, pair.1
            ),
            DatasetError::DuplicatePair(a, b) => {
                write!(f, "more than one record for pair ({a}, {b})")
            }
        }
    }
}

impl std::error::Error for DatasetError {}

// ============================================================================
// Loading
// ============================================================================

impl Dataset {
    /// Parses a dataset from JSON. Does not validate.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        serde_json::from_str(json).map_err(DatasetError::Parse)
    }

    /// Reads and parses a dataset file. Does not validate.
    pub fn from_file(path: &Path) -> Result<Self, DatasetError> {
        let contents = fs::read_to_string(path).map_err(DatasetError::Io)?;
        Self::from_json(&contents)
    }

    /// Parses one of the datasets compiled in from `data/`.
    pub fn bundled(name: &str) -> Result<Self, DatasetError> {
        let json = bundled::lookup(name)
            .ok_or_else(|| DatasetError::UnknownBundled(name.to_string()))?;
        Self::from_json(json)
    }

    /// Checks the integrity rules the resolver relies on.
    pub fn validate(&self) -> Result<(), DatasetError> {
        validate::check(self)
    }

    /// Validates and consumes the dataset into an immutable store.
    pub fn into_store(self) -> Result<CompatibilityStore, DatasetError> {
        self.validate()?;
        info!(
            "Loaded dataset '{}': {} drugs, {} records",
            self.name,
            self.drugs.len(),
            self.results.len()
        );
        Ok(CompatibilityStore::from_validated(
            self.name,
            self.drugs,
            self.results,
            self.fallback,
        ))
    }
}

/// Loads the configured dataset and wires it into a resolver.
/// Call once at startup; the store is never mutated afterwards.
pub fn open(config: &ResolvedConfig) -> Result<CompatibilityResolver, DatasetError> {
    let dataset = match &config.dataset {
        DatasetSource::Bundled(name) => Dataset::bundled(name)?,
        DatasetSource::File(path) => {
            info!("Reading dataset file {}", path.display());
            Dataset::from_file(path)?
        }
    };
    let store = dataset.into_store()?;
    Ok(CompatibilityResolver::new(Arc::new(store), config.options))
}

/// JSON Schema for dataset files, for external authoring tools.
pub fn dataset_schema() -> serde_json::Value {
    let schema = schemars::schema_for!(Dataset);
    serde_json::to_value(schema).unwrap_or(serde_json::Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolver::ResolverOptions;
    use crate::core::types::CompatibilityStatus;
    use crate::test_support::init_logging;

    #[test]
    fn test_default_bundled_dataset_loads() {
        init_logging();
        let store = Dataset::bundled(DEFAULT_DATASET).unwrap().into_store().unwrap();
        assert_eq!(store.name(), "critical_care");
        assert_eq!(store.all_drugs().len(), 16);
        assert_eq!(store.results().len(), 75);
    }

    #[test]
    fn test_unknown_bundled_dataset() {
        let err = Dataset::bundled("nope").unwrap_err();
        assert!(matches!(err, DatasetError::UnknownBundled(ref n) if n == "nope"));
        assert_eq!(err.to_string(), "no bundled dataset named 'nope'");
    }

    #[test]
    fn test_caution_records_carry_concentration_notes() {
        let dataset = Dataset::bundled(DEFAULT_DATASET).unwrap();
        let caution: Vec<_> = dataset
            .results
            .iter()
            .filter(|r| r.status == CompatibilityStatus::Caution)
            .collect();
        assert_eq!(caution.len(), 5);
        for record in caution {
            let subs: Vec<_> = record.concentration_notes.iter().map(|n| n.sub_status).collect();
            assert_eq!(
                subs,
                [CompatibilityStatus::Compatible, CompatibilityStatus::Incompatible]
            );
        }
    }

    #[test]
    fn test_unknown_status_is_a_parse_error() {
        let json = r#"{
            "name": "bad",
            "drugs": [
                { "id": "1", "name": "A", "thaiName": "a" },
                { "id": "2", "name": "B", "thaiName": "b" }
            ],
            "results": [
                { "drug1Id": "1", "drug2Id": "2", "status": "probably_fine",
                  "precautions": "", "nursingCare": "" }
            ]
        }"#;
        assert!(matches!(Dataset::from_json(json), Err(DatasetError::Parse(_))));
    }

    #[test]
    fn test_record_fields_use_camel_case_keys() {
        let json = r#"{
            "name": "keys",
            "fallback": { "precautions": "ask", "nursingCare": "watch" },
            "drugs": [
                { "id": "1", "name": "Adrenaline", "thaiName": "อะดรีนาลีน" },
                { "id": "4", "name": "Ceftriaxone", "thaiName": "เซฟไตรอะโซน" }
            ],
            "results": [
                { "drug1Id": "1", "drug2Id": "4", "status": "caution",
                  "precautions": "-", "nursingCare": "NSS",
                  "concentrationNotes": [
                      { "description": "low dose", "subStatus": "compatible" }
                  ] }
            ]
        }"#;
        let dataset = Dataset::from_json(json).unwrap();
        assert_eq!(dataset.drugs[0].thai_name, "อะดรีนาลีน");
        assert_eq!(dataset.fallback.nursing_care, "watch");
        let record = &dataset.results[0];
        assert_eq!((record.drug1_id.as_str(), record.drug2_id.as_str()), ("1", "4"));
        assert_eq!(record.nursing_care, "NSS");
        assert_eq!(
            record.concentration_notes[0].sub_status,
            CompatibilityStatus::Compatible
        );

        let written = serde_json::to_value(record).unwrap();
        assert!(written.get("nursingCare").is_some());
        assert!(written.get("nursing_care").is_none());
    }

    #[test]
    fn test_snake_case_keys_are_rejected() {
        let json = r#"{
            "name": "keys",
            "drugs": [{ "id": "1", "name": "Adrenaline", "thai_name": "a" }],
            "results": []
        }"#;
        assert!(matches!(Dataset::from_json(json), Err(DatasetError::Parse(_))));
    }

    #[test]
    fn test_unknown_field_is_a_parse_error() {
        let json = r#"{ "name": "x", "drugs": [], "results": [], "colour": "red" }"#;
        assert!(matches!(Dataset::from_json(json), Err(DatasetError::Parse(_))));
    }

    #[test]
    fn test_missing_fallback_is_empty() {
        let json = r#"{ "name": "x", "drugs": [], "results": [] }"#;
        let dataset = Dataset::from_json(json).unwrap();
        assert_eq!(dataset.fallback, FallbackGuidance::default());
        assert!(dataset.description.is_none());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Dataset::from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
    }

    #[test]
    fn test_open_bundled() {
        let config = ResolvedConfig {
            dataset: DatasetSource::Bundled(DEFAULT_DATASET.to_string()),
            options: ResolverOptions::merged(),
        };
        let resolver = open(&config).unwrap();
        assert_eq!(resolver.options(), ResolverOptions::merged());
        assert_eq!(resolver.all_drugs()[0].name, "Adrenaline");
    }

    #[test]
    fn test_open_default_config() {
        let resolver = open(&ResolvedConfig::default()).unwrap();
        assert_eq!(resolver.store().name(), DEFAULT_DATASET);
        assert!(resolver.options().include_caution_as_distinct_bucket);
    }

    #[test]
    fn test_open_file() {
        let dir = std::env::temp_dir().join(format!("drugmix-open-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tiny.json");
        fs::write(
            &path,
            r#"{
                "name": "tiny",
                "drugs": [
                    { "id": "a", "name": "Alpha", "thaiName": "อัลฟา" },
                    { "id": "b", "name": "Beta", "thaiName": "เบตา" }
                ],
                "results": [
                    { "drug1Id": "b", "drug2Id": "a", "status": "incompatible",
                      "precautions": "-", "nursingCare": "-" }
                ]
            }"#,
        )
        .unwrap();

        let config = ResolvedConfig {
            dataset: DatasetSource::File(path.clone()),
            options: ResolverOptions::default(),
        };
        let resolver = open(&config).unwrap();
        assert_eq!(resolver.store().name(), "tiny");
        let result = resolver.resolve_pair("a", "b").unwrap();
        assert_eq!(result.status, CompatibilityStatus::Incompatible);
        assert_eq!(result.reference, "-");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_schema_describes_dataset_fields() {
        let schema = dataset_schema();
        let properties = &schema["properties"];
        for field in ["name", "drugs", "results", "fallback"] {
            assert!(properties.get(field).is_some(), "missing {field}");
        }
        assert!(schema["definitions"].get("CompatibilityStatus").is_some());
    }
}
