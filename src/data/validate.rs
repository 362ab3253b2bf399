//! Load-time integrity checks.
//!
//! Rules, checked in this order and reported on first violation:
//! 1. every drug id is non-empty and unique
//! 2. every drug name is unique
//! 3. no record pairs a drug with itself
//! 4. both ids of every record exist in the drug table
//! 5. at most one record per unordered pair
//!
//! The closed status set is enforced earlier, by deserialization.

use std::collections::HashSet;

use log::debug;

use super::{Dataset, DatasetError};

pub(super) fn check(dataset: &Dataset) -> Result<(), DatasetError> {
    let mut ids: HashSet<&str> = HashSet::new();
    let mut names: HashSet<&str> = HashSet::new();

    for drug in &dataset.drugs {
        if drug.id.trim().is_empty() {
            return Err(DatasetError::EmptyDrugId {
                name: drug.name.clone(),
            });
        }
        if !ids.insert(&drug.id) {
            return Err(DatasetError::DuplicateDrugId(drug.id.clone()));
        }
        if !names.insert(&drug.name) {
            return Err(DatasetError::DuplicateDrugName(drug.name.clone()));
        }
    }

    let mut pairs: HashSet<(&str, &str)> = HashSet::new();
    for result in &dataset.results {
        let (a, b) = (result.drug1_id.as_str(), result.drug2_id.as_str());
        if a == b {
            return Err(DatasetError::SelfPair(a.to_string()));
        }
        for id in [a, b] {
            if !ids.contains(id) {
                return Err(DatasetError::DanglingReference {
                    drug_id: id.to_string(),
                    pair: (a.to_string(), b.to_string()),
                });
            }
        }
        let key = if a < b { (a, b) } else { (b, a) };
        if !pairs.insert(key) {
            return Err(DatasetError::DuplicatePair(a.to_string(), b.to_string()));
        }
    }

    debug!(
        "Dataset '{}' passed validation ({} drugs, {} pairs)",
        dataset.name,
        ids.len(),
        pairs.len()
    );
    Ok(())
}
