//! CLI library components for the label normalizer.

pub mod logging;
pub mod pairs;
pub mod report;
