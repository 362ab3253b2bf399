//! Datasets compiled in from `data/*.json` (see `build.rs`).

include!(concat!(env!("OUT_DIR"), "/bundled_datasets.rs"));

/// Dataset used when nothing else is configured.
pub const DEFAULT_DATASET: &str = "critical_care";

/// Raw JSON of a bundled dataset, by file stem.
pub(super) fn lookup(name: &str) -> Option<&'static str> {
    BUNDLED_DATASETS
        .iter()
        .find(|(stem, _)| *stem == name)
        .map(|(_, json)| *json)
}

/// Names of every bundled dataset, sorted.
pub fn bundled_names() -> impl Iterator<Item = &'static str> {
    BUNDLED_DATASETS.iter().map(|(stem, _)| *stem)
}
