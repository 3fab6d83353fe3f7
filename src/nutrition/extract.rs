//! Nutrient extraction
//!
//! Maps vendor nutrient records (FDC nutrient numbers) into a canonical
//! sparse bundle. A nutrient the vendor did not report is absent from the
//! bundle, not zero; callers that need to distinguish "not reported" from
//! "zero" rely on that.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::Nutrient;

/// One vendor nutrient record as delivered by a food database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodNutrient {
    /// Vendor nutrient number (not stable across vendors)
    pub id: u32,
    /// Vendor display name, kept for diagnostics only
    pub name: String,
    /// Amount in the vendor's unit, copied without conversion
    pub amount: f64,
    /// Vendor unit string
    pub unit_name: String,
}

/// Sparse mapping of canonical keys to values for one food item
pub type NutrientBundle = BTreeMap<Nutrient, f64>;

/// Extract a canonical bundle from vendor nutrient records
///
/// Entries whose ID is not in the catalog are dropped silently. Duplicate
/// IDs overwrite (last write wins). Absent or empty input yields an empty
/// bundle.
pub fn extract_nutrients(entries: Option<&[FoodNutrient]>) -> NutrientBundle {
    let mut bundle = NutrientBundle::new();

    let Some(entries) = entries else {
        return bundle;
    };

    for entry in entries {
        if let Some(key) = Nutrient::from_fdc_id(entry.id) {
            bundle.insert(key, entry.amount);
        }
    }

    bundle
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u32, name: &str, amount: f64, unit: &str) -> FoodNutrient {
        FoodNutrient {
            id,
            name: name.to_string(),
            amount,
            unit_name: unit.to_string(),
        }
    }

    #[test]
    fn test_absent_input_is_empty_bundle() {
        assert!(extract_nutrients(None).is_empty());
    }

    #[test]
    fn test_empty_input_is_empty_bundle() {
        assert!(extract_nutrients(Some(&[])).is_empty());
    }

    #[test]
    fn test_mapped_ids_copied_exactly() {
        let entries = vec![
            entry(1008, "Energy", 250.0, "kcal"),
            entry(1003, "Protein", 12.5, "g"),
        ];
        let bundle = extract_nutrients(Some(&entries));
        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.get(&Nutrient::Calories), Some(&250.0));
        assert_eq!(bundle.get(&Nutrient::Protein), Some(&12.5));
    }

    #[test]
    fn test_unmapped_ids_dropped() {
        let entries = vec![
            entry(1008, "Energy", 100.0, "kcal"),
            entry(9999, "Mystery", 55.0, "g"),
        ];
        let bundle = extract_nutrients(Some(&entries));
        assert_eq!(bundle.len(), 1);
        assert!(bundle.contains_key(&Nutrient::Calories));
    }

    #[test]
    fn test_duplicate_ids_last_write_wins() {
        let entries = vec![
            entry(1008, "Energy", 100.0, "kcal"),
            entry(1008, "Energy", 140.0, "kcal"),
        ];
        let bundle = extract_nutrients(Some(&entries));
        assert_eq!(bundle.get(&Nutrient::Calories), Some(&140.0));
    }

    #[test]
    fn test_missing_key_stays_missing() {
        // No conversion of "missing" into zero
        let entries = vec![entry(1003, "Protein", 8.0, "g")];
        let bundle = extract_nutrients(Some(&entries));
        assert_eq!(bundle.get(&Nutrient::Calories), None);
        assert!(!bundle.contains_key(&Nutrient::Calories));
    }

    #[test]
    fn test_no_unit_conversion() {
        // Sodium reported in grams is still copied verbatim
        let entries = vec![entry(1093, "Sodium, Na", 0.3, "g")];
        let bundle = extract_nutrients(Some(&entries));
        assert_eq!(bundle.get(&Nutrient::Sodium), Some(&0.3));
    }

    #[test]
    fn test_bundle_serializes_with_canonical_keys() {
        let entries = vec![entry(1258, "Fatty acids, total saturated", 2.0, "g")];
        let bundle = extract_nutrients(Some(&entries));
        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(json["saturated_fat"], serde_json::json!(2.0));
    }
}
