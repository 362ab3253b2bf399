//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Once};

use simplelog::{ConfigBuilder, LevelFilter, TestLogger};

use crate::core::resolver::{CompatibilityResolver, ResolverOptions};
use crate::core::store::CompatibilityStore;
use crate::core::types::{CompatibilityStatus, Drug, FallbackGuidance, MixingResult};
use crate::data::{DEFAULT_DATASET, Dataset};

static LOGGER: Once = Once::new();

/// Routes `log` output through the test harness. Safe to call from every test.
pub fn init_logging() {
    LOGGER.call_once(|| {
        let config = ConfigBuilder::new().set_time_format_rfc3339().build();
        let _ = TestLogger::init(LevelFilter::Debug, config);
    });
}

pub fn drug(id: &str, name: &str) -> Drug {
    Drug {
        id: id.to_string(),
        name: name.to_string(),
        thai_name: format!("{name} (th)"),
    }
}

pub fn record(a: &str, b: &str, status: CompatibilityStatus) -> MixingResult {
    MixingResult {
        drug1_id: a.to_string(),
        drug2_id: b.to_string(),
        status,
        precautions: "-".to_string(),
        nursing_care: "-".to_string(),
        reference: "-".to_string(),
        concentration_notes: Vec::new(),
    }
}

/// Five drugs, two records:
/// Adrenaline(1) + Ceftriaxone(4) compatible, Dobutamine(5) + Dopamine(6)
/// incompatible. Hydrocortisone(9) has no records. No fallback text.
pub fn scenario_store() -> CompatibilityStore {
    CompatibilityStore::from_validated(
        "scenario".to_string(),
        vec![
            drug("9", "Hydrocortisone"),
            drug("6", "Dopamine"),
            drug("5", "Dobutamine"),
            drug("4", "Ceftriaxone"),
            drug("1", "Adrenaline"),
        ],
        vec![
            record("1", "4", CompatibilityStatus::Compatible),
            record("5", "6", CompatibilityStatus::Incompatible),
        ],
        FallbackGuidance::default(),
    )
}

pub fn scenario_resolver(options: ResolverOptions) -> CompatibilityResolver {
    init_logging();
    CompatibilityResolver::new(Arc::new(scenario_store()), options)
}

/// Resolver over the bundled default dataset.
pub fn critical_care(options: ResolverOptions) -> CompatibilityResolver {
    init_logging();
    let store = Dataset::bundled(DEFAULT_DATASET)
        .and_then(Dataset::into_store)
        .expect("bundled dataset is valid");
    CompatibilityResolver::new(Arc::new(store), options)
}
