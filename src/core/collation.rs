//! # Name Collation
//!
//! Drug lists are ordered the way a locale-aware string compare orders them:
//! letters compare case-insensitively first ("Adrenaline" < "azithromycin"
//! < "Ceftazidime"), and only exact case-insensitive ties fall back to case,
//! with lowercase first.
//!
//! There is no accent folding: letters outside ASCII compare by code point
//! after lowercasing, so "Émulsion" sorts after "Zinc". Dataset names are
//! expected to be plain Latin.

use std::cmp::Ordering;

use crate::core::types::Drug;

/// Compares two display names.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    primary
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

/// Sorts drugs by name under [`compare_names`].
pub fn sort_by_name<D: AsRef<Drug>>(drugs: &mut [D]) {
    drugs.sort_by(|a, b| compare_names(&a.as_ref().name, &b.as_ref().name));
}

impl AsRef<Drug> for Drug {
    fn as_ref(&self) -> &Drug {
        self
    }
}
