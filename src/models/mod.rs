//! Data models
//!
//! Rust structs representing database entities.

mod day;
mod food_log;
mod goal;
mod totals;

pub use day::Day;
pub use food_log::{
    FoodLog, FoodLogCreate, FoodLogUpdate, MealType, recalculate_day_totals,
};
pub use goal::Goal;
pub use totals::NutritionTotals;
