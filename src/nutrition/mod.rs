//! Nutrition core
//!
//! Pure extraction, aggregation, and coercion logic. No I/O; everything in
//! this module is deterministic over its inputs.

pub mod aggregate;
pub mod catalog;
pub mod coerce;
pub mod extract;

pub use aggregate::{aggregate_totals, LogNutrients};
pub use catalog::{Nutrient, NutrientCategory, NutrientInfo};
pub use coerce::{coerce_field, coerce_numeric};
pub use extract::{extract_nutrients, FoodNutrient, NutrientBundle};
