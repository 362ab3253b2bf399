//! Drugmix library: drug-mixing compatibility lookup.

pub mod core;
pub mod data;

#[cfg(test)]
pub mod test_support;

pub use crate::core::resolver::{
    CompatibilityGroups, CompatibilityResolver, ResolveError, ResolverOptions,
};
pub use crate::core::store::CompatibilityStore;
pub use crate::core::types::{CompatibilityStatus, Drug, MixingResult};
pub use crate::data::{Dataset, DatasetError};
