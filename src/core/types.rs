use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Marker authors use in free-text fields for "not applicable".
pub const NOT_APPLICABLE: &str = "-";

/// A drug in the curated table. Immutable once loaded.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Drug {
    /// Stable identifier assigned at authoring time, never reused
    pub id: String,
    /// Canonical English/Latin name, unique within a dataset
    pub name: String,
    /// Thai display name
    pub thai_name: String,
}

/// Classification of a drug pair.
///
/// The variants are independent display categories, not a severity scale,
/// so no ordering is derived.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompatibilityStatus {
    #[serde(rename = "compatible")]
    Compatible,
    #[serde(rename = "caution")]
    Caution,
    /// Either an authored limited-data record or no authored record at all
    #[serde(rename = "limited_data")]
    LimitedData,
    #[serde(rename = "incompatible")]
    Incompatible,
}

impl CompatibilityStatus {
    /// All variants, in bucket display order.
    pub const ALL: [CompatibilityStatus; 4] = [
        CompatibilityStatus::Compatible,
        CompatibilityStatus::Caution,
        CompatibilityStatus::LimitedData,
        CompatibilityStatus::Incompatible,
    ];

    /// The identifier used in dataset files.
    pub fn as_str(self) -> &'static str {
        match self {
            CompatibilityStatus::Compatible => "compatible",
            CompatibilityStatus::Caution => "caution",
            CompatibilityStatus::LimitedData => "limited_data",
            CompatibilityStatus::Incompatible => "incompatible",
        }
    }

    /// Returns a human-readable label for display
    pub fn label(self) -> &'static str {
        match self {
            CompatibilityStatus::Compatible => "Compatible",
            CompatibilityStatus::Caution => "Caution",
            CompatibilityStatus::LimitedData => "Limited Data",
            CompatibilityStatus::Incompatible => "Incompatible",
        }
    }

    pub fn thai_label(self) -> &'static str {
        match self {
            CompatibilityStatus::Compatible => "ผสมได้",
            CompatibilityStatus::Caution => "ควรระวัง",
            CompatibilityStatus::LimitedData => "ข้อมูลจำกัด",
            CompatibilityStatus::Incompatible => "ห้ามผสม",
        }
    }
}

/// English and Thai label pair for a status bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLabel {
    pub english: &'static str,
    pub thai: &'static str,
}

/// A concentration-specific sub-case of a pair record,
/// e.g. "Azithromycin 2 mg/ml + Ceftriaxone 20 mg/ml in D5W" → compatible.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConcentrationNote {
    pub description: String,
    pub sub_status: CompatibilityStatus,
}

/// One authored compatibility record for an unordered drug pair.
///
/// `(drug1_id, drug2_id)` and `(drug2_id, drug1_id)` denote the same record.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MixingResult {
    pub drug1_id: String,
    pub drug2_id: String,
    pub status: CompatibilityStatus,
    /// Clinical warning; may be empty or "-"
    pub precautions: String,
    /// Administration and fluid guidance; may be "-"
    pub nursing_care: String,
    #[serde(default = "default_reference")]
    pub reference: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub concentration_notes: Vec<ConcentrationNote>,
}

fn default_reference() -> String {
    NOT_APPLICABLE.to_string()
}

/// Returns `None` for empty or "-" text.
fn applicable(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == NOT_APPLICABLE {
        None
    } else {
        Some(text)
    }
}

impl MixingResult {
    /// True if this record concerns the unordered pair `{a, b}`.
    pub fn concerns(&self, a: &str, b: &str) -> bool {
        (self.drug1_id == a && self.drug2_id == b) || (self.drug1_id == b && self.drug2_id == a)
    }

    /// The id on the other side of the pair from `id`, if `id` is part of it.
    pub fn other_side(&self, id: &str) -> Option<&str> {
        if self.drug1_id == id {
            Some(&self.drug2_id)
        } else if self.drug2_id == id {
            Some(&self.drug1_id)
        } else {
            None
        }
    }

    pub fn precautions_text(&self) -> Option<&str> {
        applicable(&self.precautions)
    }

    pub fn nursing_care_text(&self) -> Option<&str> {
        applicable(&self.nursing_care)
    }

    pub fn reference_text(&self) -> Option<&str> {
        applicable(&self.reference)
    }
}

/// Text used when no authored record exists for a pair.
/// Both fields are empty when a dataset doesn't provide them.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FallbackGuidance {
    #[serde(default)]
    pub precautions: String,
    #[serde(default)]
    pub nursing_care: String,
}
