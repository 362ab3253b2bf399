//! # Compatibility Store
//!
//! Immutable holder of the drug table and the pair-record table.
//!
//! ```text
//! CompatibilityStore
//! ├── name: String                  // dataset name
//! ├── drugs: Vec<Drug>              // sorted by name at construction
//! ├── results: Vec<MixingResult>    // authored records, file order
//! └── fallback: FallbackGuidance    // text for pairs without a record
//! ```
//!
//! Lookups are linear scans. The tables hold tens of rows, so there is no
//! index. A store is only built from a validated [`Dataset`](crate::data::Dataset);
//! see [`crate::data`].

use crate::core::collation::sort_by_name;
use crate::core::types::{Drug, FallbackGuidance, MixingResult};

#[derive(Debug, Clone)]
pub struct CompatibilityStore {
    name: String,
    drugs: Vec<Drug>,
    results: Vec<MixingResult>,
    fallback: FallbackGuidance,
}

impl CompatibilityStore {
    /// Builds a store from tables that have already passed validation.
    pub(crate) fn from_validated(
        name: String,
        mut drugs: Vec<Drug>,
        results: Vec<MixingResult>,
        fallback: FallbackGuidance,
    ) -> Self {
        sort_by_name(&mut drugs);
        Self {
            name,
            drugs,
            results,
            fallback,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The authored record for the unordered pair `{a_id, b_id}`, if any.
    /// `None` means "no authored data", not an error.
    pub fn find_result(&self, a_id: &str, b_id: &str) -> Option<&MixingResult> {
        self.results.iter().find(|r| r.concerns(a_id, b_id))
    }

    pub fn get_drug(&self, id: &str) -> Option<&Drug> {
        self.drugs.iter().find(|d| d.id == id)
    }

    /// All drugs, ascending by name.
    pub fn all_drugs(&self) -> &[Drug] {
        &self.drugs
    }

    pub fn results(&self) -> &[MixingResult] {
        &self.results
    }

    pub fn fallback(&self) -> &FallbackGuidance {
        &self.fallback
    }
}
