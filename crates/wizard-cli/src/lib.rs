//! CLI library components for the import wizard.

pub mod logging;
pub mod overrides;
pub mod summary;
