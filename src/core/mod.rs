//! # Core Compatibility Logic
//!
//! This module contains Drugmix's domain logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Store (drug + pair   │
//!                    │    tables, read-only)   │
//!                    │  • Resolver (pairwise,  │
//!                    │    grouping queries)    │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │  Mix two   │      │   Single   │      │   Drug     │
//!     │   drugs    │      │   drug     │      │  pickers   │
//!     │   view     │      │   lookup   │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`]: `Drug`, `CompatibilityStatus`, `MixingResult`
//! - [`store`]: `CompatibilityStore`, exact lookups over the tables
//! - [`resolver`]: `CompatibilityResolver`, the two query operations
//! - [`collation`]: name ordering shared by every sorted list
//! - [`config`]: which dataset to load and which buckets to show
//!
//! Loading and validating datasets lives in [`crate::data`].

pub mod collation;
pub mod config;
pub mod resolver;
pub mod store;
pub mod types;
