//! FoodData Central HTTP client
//!
//! Thin blocking client for the USDA FoodData Central API. Responses are
//! parsed leniently: the two payload shapes (detail and search) disagree on
//! field names, and amounts sometimes arrive as strings, so every numeric
//! field goes through the coercion helper.

use serde_json::Value;
use thiserror::Error;

use crate::nutrition::{coerce_numeric, FoodNutrient};

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "MACROLOG_FDC_API_KEY";

/// FoodData Central client errors
#[derive(Debug, Error)]
pub enum FdcError {
    #[error("FDC API key not configured (set {API_KEY_ENV})")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("FDC returned status {0}")]
    Status(u16),

    #[error("Food not found: fdc_id {0}")]
    NotFound(i64),

    #[error("Unexpected response shape: {0}")]
    BadResponse(String),
}

/// A food returned by search or detail lookup
#[derive(Debug, Clone)]
pub struct FdcFood {
    pub fdc_id: i64,
    pub description: String,
    pub brand: Option<String>,
    pub nutrients: Vec<FoodNutrient>,
}

/// Blocking FoodData Central client
pub struct FdcClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl FdcClient {
    /// Build a client with the API key from the environment
    pub fn from_env() -> Result<Self, FdcError> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| FdcError::MissingApiKey)?;
        Ok(Self::new(DEFAULT_BASE_URL, api_key))
    }

    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Fetch a single food record by FDC ID
    pub fn get_food(&self, fdc_id: i64) -> Result<FdcFood, FdcError> {
        let url = format!("{}/food/{}", self.base_url, fdc_id);
        tracing::debug!(fdc_id, "fetching food detail");

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()?;

        match response.status().as_u16() {
            200 => {}
            404 => return Err(FdcError::NotFound(fdc_id)),
            code => return Err(FdcError::Status(code)),
        }

        let body: Value = response.json()?;
        parse_food(&body).ok_or_else(|| FdcError::BadResponse("missing fdcId or description".to_string()))
    }

    /// Search foods by free-text query
    pub fn search_foods(&self, query: &str, page_size: i64) -> Result<Vec<FdcFood>, FdcError> {
        let url = format!("{}/foods/search", self.base_url);
        tracing::debug!(query, "searching foods");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("pageSize", &page_size.to_string()),
            ])
            .send()?;

        if !response.status().is_success() {
            return Err(FdcError::Status(response.status().as_u16()));
        }

        let body: Value = response.json()?;
        let foods = body
            .get("foods")
            .and_then(Value::as_array)
            .ok_or_else(|| FdcError::BadResponse("missing foods array".to_string()))?;

        Ok(foods.iter().filter_map(parse_food).collect())
    }
}

/// Parse one food object from either payload shape
fn parse_food(food: &Value) -> Option<FdcFood> {
    let fdc_id = food.get("fdcId").and_then(Value::as_i64)?;
    let description = food.get("description").and_then(Value::as_str)?.to_string();
    let brand = food
        .get("brandOwner")
        .or_else(|| food.get("brandName"))
        .and_then(Value::as_str)
        .map(str::to_string);

    let nutrients = food
        .get("foodNutrients")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(parse_food_nutrient).collect())
        .unwrap_or_default();

    Some(FdcFood {
        fdc_id,
        description,
        brand,
        nutrients,
    })
}

/// Parse one vendor nutrient record from either payload shape
///
/// Detail payloads nest the nutrient (`{"nutrient": {"id", "name",
/// "unitName"}, "amount"}`); search payloads flatten it (`{"nutrientId",
/// "nutrientName", "unitName", "value"}`). Records without a usable ID or
/// amount are skipped.
fn parse_food_nutrient(entry: &Value) -> Option<FoodNutrient> {
    let nested = entry.get("nutrient");

    let id = nested
        .and_then(|n| n.get("id"))
        .or_else(|| entry.get("nutrientId"))
        .and_then(coerce_opt_u32)?;

    let name = nested
        .and_then(|n| n.get("name"))
        .or_else(|| entry.get("nutrientName"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    let unit_name = nested
        .and_then(|n| n.get("unitName"))
        .or_else(|| entry.get("unitName"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    let amount = entry
        .get("amount")
        .or_else(|| entry.get("value"))
        .and_then(coerce_numeric)?;

    Some(FoodNutrient {
        id,
        name,
        amount,
        unit_name,
    })
}

fn coerce_opt_u32(v: &Value) -> Option<u32> {
    coerce_numeric(v).and_then(|n| {
        if n >= 0.0 && n.fract() == 0.0 && n <= u32::MAX as f64 {
            Some(n as u32)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::{extract_nutrients, Nutrient};
    use serde_json::json;

    #[test]
    fn test_parse_detail_shape() {
        let body = json!({
            "fdcId": 173944,
            "description": "Oats, regular and quick",
            "foodNutrients": [
                {"nutrient": {"id": 1008, "name": "Energy", "unitName": "kcal"}, "amount": 379.0},
                {"nutrient": {"id": 1003, "name": "Protein", "unitName": "g"}, "amount": 13.2},
                {"nutrient": {"id": 1062, "name": "Energy", "unitName": "kJ"}, "amount": 1590.0}
            ]
        });
        let food = parse_food(&body).unwrap();
        assert_eq!(food.fdc_id, 173944);
        assert_eq!(food.nutrients.len(), 3);

        let bundle = extract_nutrients(Some(&food.nutrients));
        assert_eq!(bundle.get(&Nutrient::Calories), Some(&379.0));
        assert_eq!(bundle.get(&Nutrient::Protein), Some(&13.2));
        // kJ entry is unmapped and drops out
        assert_eq!(bundle.len(), 2);
    }

    #[test]
    fn test_parse_search_shape_with_string_values() {
        let body = json!({
            "fdcId": 2262074,
            "description": "Greek Yogurt",
            "brandOwner": "Some Dairy Co",
            "foodNutrients": [
                {"nutrientId": 1008, "nutrientName": "Energy", "unitName": "KCAL", "value": "59"},
                {"nutrientId": 1003, "nutrientName": "Protein", "unitName": "G", "value": 10.2}
            ]
        });
        let food = parse_food(&body).unwrap();
        assert_eq!(food.brand.as_deref(), Some("Some Dairy Co"));
        assert_eq!(food.nutrients[0].amount, 59.0);
    }

    #[test]
    fn test_records_without_amount_are_skipped() {
        let body = json!({
            "fdcId": 1,
            "description": "Sparse",
            "foodNutrients": [
                {"nutrientId": 1008, "value": null},
                {"nutrientId": 1003, "value": 5.0}
            ]
        });
        let food = parse_food(&body).unwrap();
        assert_eq!(food.nutrients.len(), 1);
        assert_eq!(food.nutrients[0].id, 1003);
    }

    #[test]
    fn test_food_without_id_rejected() {
        assert!(parse_food(&json!({"description": "No id"})).is_none());
    }

    #[tokio::test]
    async fn test_client_runs_on_blocking_threads() {
        // The blocking client aborts the process if built, used, or dropped
        // on a runtime thread; confined to spawn_blocking it must fail
        // cleanly instead.
        let result = tokio::task::spawn_blocking(|| {
            let client = FdcClient::new("http://127.0.0.1:1", "test-key");
            client.get_food(1)
        })
        .await
        .unwrap();
        assert!(matches!(result, Err(FdcError::Http(_))));
    }
}
