//! Nutrient tools
//!
//! FoodData Central lookups, catalog info for UI rendering, and the
//! JSON-boundary totals preview.

use serde::Serialize;
use serde_json::Value;

use crate::fdc::FdcClient;
use crate::models::NutritionTotals;
use crate::nutrition::{
    aggregate_totals, extract_nutrients, LogNutrients, Nutrient, NutrientCategory,
};

/// One extracted nutrient with display metadata
#[derive(Debug, Serialize)]
pub struct NutrientValue {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub category: NutrientCategory,
    pub amount: f64,
}

/// Response for get_food_nutrients
#[derive(Debug, Serialize)]
pub struct FoodNutrientsResponse {
    pub fdc_id: i64,
    pub description: String,
    pub brand: Option<String>,
    /// Sparse: only nutrients the database reported
    pub nutrients: Vec<NutrientValue>,
}

/// One search hit
#[derive(Debug, Serialize)]
pub struct FoodSearchHit {
    pub fdc_id: i64,
    pub description: String,
    pub brand: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
}

/// Response for search_foods
#[derive(Debug, Serialize)]
pub struct SearchFoodsResponse {
    pub query: String,
    pub hits: Vec<FoodSearchHit>,
}

/// Response for nutrient_info
#[derive(Debug, Serialize)]
pub struct NutrientInfoResponse {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub category: NutrientCategory,
}

/// Response for preview_totals
#[derive(Debug, Serialize)]
pub struct PreviewTotalsResponse {
    pub totals: NutritionTotals,
    pub log_count: usize,
}

fn bundle_values(nutrients: &[crate::nutrition::FoodNutrient]) -> Vec<NutrientValue> {
    extract_nutrients(Some(nutrients))
        .iter()
        .map(|(key, amount)| {
            let info = key.info();
            NutrientValue {
                key: key.key(),
                label: info.label,
                unit: info.unit,
                category: info.category,
                amount: *amount,
            }
        })
        .collect()
}

/// Fetch a food and return its extracted canonical bundle with labels
pub fn get_food_nutrients(client: &FdcClient, fdc_id: i64) -> Result<FoodNutrientsResponse, String> {
    let food = client
        .get_food(fdc_id)
        .map_err(|e| format!("FoodData Central lookup failed: {}", e))?;

    Ok(FoodNutrientsResponse {
        fdc_id: food.fdc_id,
        description: food.description,
        brand: food.brand,
        nutrients: bundle_values(&food.nutrients),
    })
}

/// Search FoodData Central for foods by name
pub fn search_foods(client: &FdcClient, query: &str, limit: i64) -> Result<SearchFoodsResponse, String> {
    let query = query.trim();
    if query.is_empty() {
        return Err("search query cannot be empty".to_string());
    }
    let limit = limit.clamp(1, 50);

    let foods = client
        .search_foods(query, limit)
        .map_err(|e| format!("FoodData Central search failed: {}", e))?;

    let hits = foods
        .into_iter()
        .map(|food| {
            let bundle = extract_nutrients(Some(&food.nutrients));
            FoodSearchHit {
                fdc_id: food.fdc_id,
                description: food.description,
                brand: food.brand,
                calories: bundle.get(&Nutrient::Calories).copied(),
                protein: bundle.get(&Nutrient::Protein).copied(),
            }
        })
        .collect();

    Ok(SearchFoodsResponse {
        query: query.to_string(),
        hits,
    })
}

/// Look up display info for a canonical nutrient key
pub fn nutrient_info(key: &str) -> Result<NutrientInfoResponse, String> {
    let nutrient = Nutrient::from_key(key)
        .ok_or_else(|| format!("Unknown nutrient key: {}", key))?;

    let info = nutrient.info();
    Ok(NutrientInfoResponse {
        key: nutrient.key(),
        label: info.label,
        unit: info.unit,
        category: info.category,
    })
}

/// Aggregate raw JSON log rows without persisting anything
///
/// Each row's fields go through numeric coercion, so values may arrive as
/// numbers, numeric strings, or null.
pub fn preview_totals(rows: &[Value]) -> PreviewTotalsResponse {
    let logs: Vec<LogNutrients> = rows.iter().map(LogNutrients::from_json).collect();
    let totals = aggregate_totals(&logs);

    PreviewTotalsResponse {
        totals,
        log_count: logs.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nutrient_info_known_key() {
        let info = nutrient_info("vitamin_c").unwrap();
        assert_eq!(info.label, "Vitamin C");
        assert_eq!(info.unit, "mg");
        assert_eq!(info.category, NutrientCategory::Vitamin);
    }

    #[test]
    fn test_nutrient_info_unknown_key() {
        assert!(nutrient_info("midichlorians").is_err());
    }

    #[test]
    fn test_preview_totals_crosses_json_boundary() {
        let rows = vec![
            json!({"calories": 200, "protein": 10, "carbs": 30, "fat": 5, "fiber": 2, "sodium": 300, "quantity": 2}),
            json!({"calories": "100", "protein": null, "quantity": null}),
        ];
        let resp = preview_totals(&rows);
        assert_eq!(resp.log_count, 2);
        assert_eq!(resp.totals.calories, 500.0);
        assert_eq!(resp.totals.protein, 20.0);
        assert_eq!(resp.totals.sodium, 600.0);
    }

    #[test]
    fn test_preview_totals_empty() {
        let resp = preview_totals(&[]);
        assert_eq!(resp.log_count, 0);
        assert_eq!(resp.totals, NutritionTotals::zero());
    }
}
