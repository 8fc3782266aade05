//! Series label normalization.
//!
//! Each (country, frequency) pair goes through three stages:
//!
//! 1. [`currency`]: raw currency codes become `LCU`/`USD`.
//! 2. [`exceptions`]: a pair-specific rule repairs known header quirks.
//! 3. [`reorder`]: unit tokens are put in their canonical order.
//!
//! [`pipeline`] drives the stages over a table and reports what changed.

pub mod context;
pub mod currency;
pub mod error;
pub mod exceptions;
pub mod pipeline;
pub mod reorder;

pub use context::NormalizeContext;
pub use currency::{CurrencyOutcome, substitute_all, substitute_currency};
pub use error::NormalizeError;
pub use exceptions::{ExceptionRegistry, ExceptionRule, default_registry, registry_with_exceptions};
pub use pipeline::{NormalizedLabels, normalize_all, normalize_labels, normalize_pair};
pub use reorder::{ReorderOutcome, ReorderSummary, detect_units, reorder_all, reorder_label};
