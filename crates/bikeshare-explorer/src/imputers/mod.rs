//! Imputation module for handling missing values.
//!
//! Numeric columns are backward filled; categorical columns receive a
//! placeholder value. The first column of a dataset is never touched.

mod missing;

pub use missing::{ImputationMethod, ImputationNote, MissingValueImputer};
