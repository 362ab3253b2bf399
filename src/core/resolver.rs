//! # Compatibility Resolver
//!
//! Turns store lookups into the two query shapes a presentation layer needs:
//!
//! - [`CompatibilityResolver::resolve_pair`]: the "mix two drugs" view. Returns
//!   the authored record, or a synthesized `limited_data` record when none exists.
//! - [`CompatibilityResolver::group_by_compatibility`]: the "single drug" view.
//!   Partitions every other drug into one bucket per status.
//!
//! Both are pure queries over the immutable store. The only data produced here
//! that isn't in the store is the fallback record, and it is never written back.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use log::{debug, warn};

use crate::core::collation::sort_by_name;
use crate::core::store::CompatibilityStore;
use crate::core::types::{CompatibilityStatus, Drug, MixingResult, NOT_APPLICABLE, StatusLabel};

/// Which status buckets are in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverOptions {
    /// When false, `caution` is folded into `limited_data` and only three
    /// buckets exist.
    pub include_caution_as_distinct_bucket: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            include_caution_as_distinct_bucket: true,
        }
    }
}

impl ResolverOptions {
    /// The three-bucket layout.
    pub fn merged() -> Self {
        Self {
            include_caution_as_distinct_bucket: false,
        }
    }

    /// The statuses that get a bucket, in display order.
    pub fn statuses(&self) -> &'static [CompatibilityStatus] {
        if self.include_caution_as_distinct_bucket {
            &CompatibilityStatus::ALL
        } else {
            &[
                CompatibilityStatus::Compatible,
                CompatibilityStatus::LimitedData,
                CompatibilityStatus::Incompatible,
            ]
        }
    }

    /// The bucket a status is reported under.
    pub fn bucket_for(&self, status: CompatibilityStatus) -> CompatibilityStatus {
        match status {
            CompatibilityStatus::Caution if !self.include_caution_as_distinct_bucket => {
                CompatibilityStatus::LimitedData
            }
            other => other,
        }
    }
}

/// Caller misuse of [`CompatibilityResolver::resolve_pair`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Both ids name the same drug. No self-pair records exist.
    SameDrug(String),
    /// The id is not in the drug table.
    UnknownDrug(String),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::SameDrug(id) => write!(f, "cannot mix drug {id} with itself"),
            ResolveError::UnknownDrug(id) => write!(f, "unknown drug id: {id}"),
        }
    }
}

impl std::error::Error for ResolveError {}

/// Drugs partitioned by their status against one selected drug.
///
/// Every bucket is sorted by name. Buckets not in use for the current
/// [`ResolverOptions`] are absent.
#[derive(Debug, Clone, PartialEq)]
pub struct CompatibilityGroups<'a> {
    buckets: Vec<(CompatibilityStatus, Vec<&'a Drug>)>,
}

impl<'a> CompatibilityGroups<'a> {
    fn empty(options: &ResolverOptions) -> Self {
        Self {
            buckets: options
                .statuses()
                .iter()
                .map(|&status| (status, Vec::new()))
                .collect(),
        }
    }

    fn push(&mut self, status: CompatibilityStatus, drug: &'a Drug) {
        if let Some((_, drugs)) = self.buckets.iter_mut().find(|(s, _)| *s == status) {
            drugs.push(drug);
        }
    }

    /// Drugs in the bucket for `status`. Empty if the bucket isn't in use.
    pub fn get(&self, status: CompatibilityStatus) -> &[&'a Drug] {
        self.buckets
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, drugs)| drugs.as_slice())
            .unwrap_or(&[])
    }

    /// True if `status` has a bucket in this grouping.
    pub fn has_bucket(&self, status: CompatibilityStatus) -> bool {
        self.buckets.iter().any(|(s, _)| *s == status)
    }

    /// Buckets in display order, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (CompatibilityStatus, &[&'a Drug])> {
        self.buckets.iter().map(|(s, drugs)| (*s, drugs.as_slice()))
    }

    /// Total drugs across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|(_, drugs)| drugs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The bucket holding the drug with `id`, if it was grouped.
    pub fn status_of(&self, id: &str) -> Option<CompatibilityStatus> {
        self.buckets
            .iter()
            .find(|(_, drugs)| drugs.iter().any(|d| d.id == id))
            .map(|(s, _)| *s)
    }
}

/// Query layer over a shared, immutable [`CompatibilityStore`].
#[derive(Debug, Clone)]
pub struct CompatibilityResolver {
    store: Arc<CompatibilityStore>,
    options: ResolverOptions,
}

impl CompatibilityResolver {
    pub fn new(store: Arc<CompatibilityStore>, options: ResolverOptions) -> Self {
        Self { store, options }
    }

    pub fn store(&self) -> &CompatibilityStore {
        &self.store
    }

    pub fn options(&self) -> ResolverOptions {
        self.options
    }

    /// All drugs, ascending by name. For populating pickers.
    pub fn all_drugs(&self) -> &[Drug] {
        self.store.all_drugs()
    }

    /// Display label for a status bucket. In the three-bucket layout the
    /// limited-data bucket also stands for caution.
    pub fn status_label(&self, status: CompatibilityStatus) -> StatusLabel {
        let merged = !self.options.include_caution_as_distinct_bucket;
        match self.options.bucket_for(status) {
            CompatibilityStatus::LimitedData if merged => StatusLabel {
                english: "Limited Data / Caution",
                thai: "ข้อมูลจำกัด / ควรระวัง",
            },
            bucket => StatusLabel {
                english: bucket.label(),
                thai: bucket.thai_label(),
            },
        }
    }

    /// Resolves the compatibility of two distinct drugs.
    ///
    /// An authored record is returned as stored (`Cow::Borrowed`), with its
    /// id fields in authored order, not the caller's. When no record exists a
    /// `limited_data` record is synthesized from the dataset's fallback text,
    /// carrying the caller's ids in caller order. In the three-bucket layout an
    /// authored `caution` record comes back owned with its status folded into
    /// `limited_data`.
    pub fn resolve_pair(
        &self,
        drug_a_id: &str,
        drug_b_id: &str,
    ) -> Result<Cow<'_, MixingResult>, ResolveError> {
        if drug_a_id == drug_b_id {
            warn!("Rejected self-pair query for drug {}", drug_a_id);
            return Err(ResolveError::SameDrug(drug_a_id.to_string()));
        }
        for id in [drug_a_id, drug_b_id] {
            if self.store.get_drug(id).is_none() {
                warn!("Rejected pair query with unknown drug id {}", id);
                return Err(ResolveError::UnknownDrug(id.to_string()));
            }
        }

        match self.store.find_result(drug_a_id, drug_b_id) {
            Some(result) => {
                let bucket = self.options.bucket_for(result.status);
                if bucket == result.status {
                    Ok(Cow::Borrowed(result))
                } else {
                    Ok(Cow::Owned(MixingResult {
                        status: bucket,
                        ..result.clone()
                    }))
                }
            }
            None => {
                debug!(
                    "No authored record for {} + {}, using fallback",
                    drug_a_id, drug_b_id
                );
                Ok(Cow::Owned(self.fallback_result(drug_a_id, drug_b_id)))
            }
        }
    }

    fn fallback_result(&self, drug_a_id: &str, drug_b_id: &str) -> MixingResult {
        let fallback = self.store.fallback();
        MixingResult {
            drug1_id: drug_a_id.to_string(),
            drug2_id: drug_b_id.to_string(),
            status: CompatibilityStatus::LimitedData,
            precautions: fallback.precautions.clone(),
            nursing_care: fallback.nursing_care.clone(),
            reference: NOT_APPLICABLE.to_string(),
            concentration_notes: Vec::new(),
        }
    }

    /// Groups every drug except `selected_drug_id` by its status against it.
    ///
    /// Drugs with an authored record go to that record's bucket; all others go
    /// to `limited_data`. An unknown id therefore yields every drug in
    /// `limited_data`.
    pub fn group_by_compatibility(&self, selected_drug_id: &str) -> CompatibilityGroups<'_> {
        let mut groups = CompatibilityGroups::empty(&self.options);
        let mut known: HashSet<&str> = HashSet::new();

        for result in self.store.results() {
            let Some(other_id) = result.other_side(selected_drug_id) else {
                continue;
            };
            if let Some(other) = self.store.get_drug(other_id) {
                groups.push(self.options.bucket_for(result.status), other);
                known.insert(other_id);
            }
        }

        for drug in self.store.all_drugs() {
            if drug.id != selected_drug_id && !known.contains(drug.id.as_str()) {
                groups.push(CompatibilityStatus::LimitedData, drug);
            }
        }

        for (_, drugs) in groups.buckets.iter_mut() {
            sort_by_name(drugs);
        }

        groups
    }
}
