//! Value transformation for the import wizard.
//!
//! Every transformation is a pure `(value, config) -> String` function that
//! never fails: values that cannot be converted are returned unchanged so the
//! problem can surface later as a validation issue.
//!
//! # Example
//!
//! ```
//! use wizard_model::TransformationConfig;
//! use wizard_transform::transform;
//!
//! assert_eq!(transform("3.14159", &TransformationConfig::number(2)), "3.14");
//! assert_eq!(transform("abc", &TransformationConfig::number(0)), "abc");
//! ```

mod custom;
mod engine;

pub mod normalization;

pub use custom::{CustomFn, CustomFunctions};
pub use engine::{Transformer, transform};
