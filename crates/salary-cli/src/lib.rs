//! CLI library components for the salary schedule toolkit.

pub mod logging;
pub mod pipeline;
pub mod report;
pub mod types;
