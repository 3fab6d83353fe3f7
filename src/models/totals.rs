//! Dense nutrition totals
//!
//! Used for day caches, goal targets, and aggregation output. All six
//! fields are always present and numeric; an empty day is all zeros.

use serde::{Deserialize, Serialize};

/// Summed nutrition values across logged entries
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,      // grams
    pub carbs: f64,        // grams
    pub fat: f64,          // grams
    pub fiber: f64,        // grams
    pub sodium: f64,       // milligrams
}

impl NutritionTotals {
    /// Create totals with all zeros
    pub fn zero() -> Self {
        Self::default()
    }

    /// Add another totals record to this one
    pub fn add(&self, other: &NutritionTotals) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
            fiber: self.fiber + other.fiber,
            sodium: self.sodium + other.sodium,
        }
    }
}
