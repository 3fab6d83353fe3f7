//! Nutrition aggregation
//!
//! Folds per-entry nutrient values into dense totals. Entries carry
//! nullable nutrient fields (a food database may not have reported them)
//! and a quantity multiplier in servings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::NutritionTotals;

use super::coerce::coerce_field;

/// One log-like record for aggregation
///
/// Nutrient fields are None when the source never reported them; at
/// aggregation time a missing field contributes zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogNutrients {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub fiber: Option<f64>,
    pub sodium: Option<f64>,
    pub quantity: Option<f64>,
}

impl LogNutrients {
    /// Build from an untyped JSON row, coercing each field
    ///
    /// Accepts the loose shapes seen at the API/database boundary: numbers,
    /// numeric strings, or null for every field. Missing keys read as null.
    pub fn from_json(row: &Value) -> Self {
        Self {
            calories: coerce_field(row, "calories"),
            protein: coerce_field(row, "protein"),
            carbs: coerce_field(row, "carbs"),
            fat: coerce_field(row, "fat"),
            fiber: coerce_field(row, "fiber"),
            sodium: coerce_field(row, "sodium"),
            quantity: coerce_field(row, "quantity"),
        }
    }

    /// The multiplier applied to every nutrient field of this entry
    ///
    /// A quantity of 0, NaN, or None falls back to 1 serving. Zero does not
    /// mean zero contribution; existing logs depend on this (see DESIGN.md).
    pub fn effective_quantity(&self) -> f64 {
        match self.quantity {
            Some(q) if q != 0.0 && !q.is_nan() => q,
            _ => 1.0,
        }
    }
}

/// Sum a collection of log entries into dense totals
///
/// Each of the six fields accumulates independently:
/// `total[f] += (value ?? 0) * effective_quantity`. Empty input yields
/// all-zero totals.
pub fn aggregate_totals(logs: &[LogNutrients]) -> NutritionTotals {
    let mut totals = NutritionTotals::zero();

    for log in logs {
        let q = log.effective_quantity();
        totals.calories += log.calories.unwrap_or(0.0) * q;
        totals.protein += log.protein.unwrap_or(0.0) * q;
        totals.carbs += log.carbs.unwrap_or(0.0) * q;
        totals.fat += log.fat.unwrap_or(0.0) * q;
        totals.fiber += log.fiber.unwrap_or(0.0) * q;
        totals.sodium += log.sodium.unwrap_or(0.0) * q;
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_log(quantity: Option<f64>) -> LogNutrients {
        LogNutrients {
            calories: Some(200.0),
            protein: Some(10.0),
            carbs: Some(30.0),
            fat: Some(5.0),
            fiber: Some(2.0),
            sodium: Some(300.0),
            quantity,
        }
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let totals = aggregate_totals(&[]);
        assert_eq!(totals, NutritionTotals::zero());
        assert_eq!(totals.calories, 0.0);
        assert_eq!(totals.sodium, 0.0);
    }

    #[test]
    fn test_quantity_one_is_identity() {
        let totals = aggregate_totals(&[full_log(Some(1.0))]);
        assert_eq!(totals.calories, 200.0);
        assert_eq!(totals.protein, 10.0);
        assert_eq!(totals.carbs, 30.0);
        assert_eq!(totals.fat, 5.0);
        assert_eq!(totals.fiber, 2.0);
        assert_eq!(totals.sodium, 300.0);
    }

    #[test]
    fn test_quantity_scales_linearly() {
        let totals = aggregate_totals(&[full_log(Some(2.0))]);
        assert_eq!(totals.calories, 400.0);
        assert_eq!(totals.protein, 20.0);
        assert_eq!(totals.carbs, 60.0);
        assert_eq!(totals.fat, 10.0);
        assert_eq!(totals.fiber, 4.0);
        assert_eq!(totals.sodium, 600.0);

        let totals = aggregate_totals(&[full_log(Some(0.5))]);
        assert_eq!(totals.calories, 100.0);
    }

    #[test]
    fn test_quantity_zero_treated_as_one() {
        // Compatibility quirk: zero falls back to 1 serving, not zero
        // contribution.
        let totals = aggregate_totals(&[full_log(Some(0.0))]);
        assert_eq!(totals.calories, 200.0);
        assert_eq!(totals.sodium, 300.0);
    }

    #[test]
    fn test_quantity_none_treated_as_one() {
        let totals = aggregate_totals(&[full_log(None)]);
        assert_eq!(totals.calories, 200.0);
    }

    #[test]
    fn test_quantity_nan_treated_as_one() {
        let totals = aggregate_totals(&[full_log(Some(f64::NAN))]);
        assert_eq!(totals.calories, 200.0);
    }

    #[test]
    fn test_all_null_fields_contribute_zero() {
        let log = LogNutrients {
            quantity: Some(3.0),
            ..LogNutrients::default()
        };
        let totals = aggregate_totals(&[log]);
        assert_eq!(totals, NutritionTotals::zero());
    }

    #[test]
    fn test_null_fields_do_not_block_others() {
        let log = LogNutrients {
            calories: Some(120.0),
            protein: None,
            carbs: Some(15.0),
            fat: None,
            fiber: None,
            sodium: None,
            quantity: Some(2.0),
        };
        let totals = aggregate_totals(&[log]);
        assert_eq!(totals.calories, 240.0);
        assert_eq!(totals.protein, 0.0);
        assert_eq!(totals.carbs, 30.0);
    }

    #[test]
    fn test_aggregation_is_additive() {
        let a = full_log(Some(1.0));
        let b = LogNutrients {
            calories: Some(75.0),
            protein: Some(3.0),
            carbs: Some(12.0),
            fat: Some(1.5),
            fiber: Some(0.5),
            sodium: Some(40.0),
            quantity: Some(1.0),
        };
        let combined = aggregate_totals(&[a.clone(), b.clone()]);
        let separate_a = aggregate_totals(std::slice::from_ref(&a));
        let separate_b = aggregate_totals(std::slice::from_ref(&b));
        assert_eq!(combined, separate_a.add(&separate_b));
    }

    #[test]
    fn test_from_json_coerces_strings_and_nulls() {
        let row = json!({
            "calories": "200",
            "protein": 10,
            "carbs": null,
            "fat": "not a number",
            "sodium": "12.5",
            "quantity": "2"
        });
        let log = LogNutrients::from_json(&row);
        assert_eq!(log.calories, Some(200.0));
        assert_eq!(log.protein, Some(10.0));
        assert_eq!(log.carbs, None);
        assert_eq!(log.fat, None);
        assert_eq!(log.fiber, None); // missing key reads as null
        assert_eq!(log.sodium, Some(12.5));

        let totals = aggregate_totals(&[log]);
        assert_eq!(totals.calories, 400.0);
        assert_eq!(totals.fat, 0.0);
        assert_eq!(totals.sodium, 25.0);
    }
}
