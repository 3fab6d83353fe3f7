//! Food log tools
//!
//! Logging foods by hand or from FoodData Central, plus edits and deletes.

use serde::Serialize;

use crate::db::Database;
use crate::fdc::FdcClient;
use crate::models::{FoodLog, FoodLogCreate, FoodLogUpdate, MealType, NutritionTotals};
use crate::nutrition::{extract_nutrients, LogNutrients, Nutrient};

use super::validate_date;

/// Response for log_food and log_food_from_fdc
#[derive(Debug, Serialize)]
pub struct LogFoodResponse {
    pub id: i64,
    pub date: String,
    pub meal_type: MealType,
    pub name: String,
    pub fdc_id: Option<i64>,
    pub nutrients: LogNutrients,
    pub day_totals: NutritionTotals,
}

/// Response for update_food_log
#[derive(Debug, Serialize)]
pub struct UpdateFoodLogResponse {
    pub success: bool,
    pub updated_at: String,
    pub day_totals: NutritionTotals,
}

/// Response for delete_food_log
#[derive(Debug, Serialize)]
pub struct DeleteFoodLogResponse {
    pub success: bool,
    pub deleted_id: i64,
    pub day_totals: NutritionTotals,
}

fn day_totals(db: &Database, day_id: i64) -> Result<NutritionTotals, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    crate::models::Day::get_by_id(&conn, day_id)
        .map_err(|e| format!("Failed to read day: {}", e))?
        .map(|d| d.cached_totals)
        .ok_or_else(|| format!("Day not found with id: {}", day_id))
}

/// Log a food with hand-entered nutrient values
pub fn log_food(db: &Database, date: &str, data: FoodLogCreate) -> Result<LogFoodResponse, String> {
    validate_date(date)?;

    for (label, value) in [
        ("calories", data.calories),
        ("protein", data.protein),
        ("carbs", data.carbs),
        ("fat", data.fat),
        ("fiber", data.fiber),
        ("sodium", data.sodium),
    ] {
        if let Some(v) = value {
            if v < 0.0 {
                return Err(format!("{} cannot be negative", label));
            }
        }
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let log = FoodLog::create(&conn, date, &data)
        .map_err(|e| format!("Failed to log food: {}", e))?;

    let totals = day_totals(db, log.day_id)?;

    Ok(LogFoodResponse {
        id: log.id,
        date: date.to_string(),
        meal_type: log.meal_type,
        name: log.name,
        fdc_id: log.fdc_id,
        nutrients: log.nutrients,
        day_totals: totals,
    })
}

/// Log a food by FoodData Central ID
///
/// Fetches the food record, extracts its nutrient bundle, and persists the
/// six core fields. A nutrient the database did not report stays NULL in
/// the row rather than being stored as zero.
pub fn log_food_from_fdc(
    db: &Database,
    client: &FdcClient,
    date: &str,
    fdc_id: i64,
    meal_type: MealType,
    quantity: Option<f64>,
    notes: Option<String>,
) -> Result<LogFoodResponse, String> {
    validate_date(date)?;

    let food = client
        .get_food(fdc_id)
        .map_err(|e| format!("FoodData Central lookup failed: {}", e))?;

    let bundle = extract_nutrients(Some(&food.nutrients));

    let data = FoodLogCreate {
        meal_type,
        name: food.description,
        fdc_id: Some(fdc_id),
        calories: bundle.get(&Nutrient::Calories).copied(),
        protein: bundle.get(&Nutrient::Protein).copied(),
        carbs: bundle.get(&Nutrient::Carbs).copied(),
        fat: bundle.get(&Nutrient::Fat).copied(),
        fiber: bundle.get(&Nutrient::Fiber).copied(),
        sodium: bundle.get(&Nutrient::Sodium).copied(),
        quantity,
        notes,
    };

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let log = FoodLog::create(&conn, date, &data)
        .map_err(|e| format!("Failed to log food: {}", e))?;

    let totals = day_totals(db, log.day_id)?;

    Ok(LogFoodResponse {
        id: log.id,
        date: date.to_string(),
        meal_type: log.meal_type,
        name: log.name,
        fdc_id: log.fdc_id,
        nutrients: log.nutrients,
        day_totals: totals,
    })
}

/// Update a food log entry
pub fn update_food_log(
    db: &Database,
    id: i64,
    data: FoodLogUpdate,
) -> Result<UpdateFoodLogResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let updated = FoodLog::update(&conn, id, &data)
        .map_err(|e| format!("Failed to update food log: {}", e))?;

    match updated {
        Some(log) => {
            let totals = day_totals(db, log.day_id)?;
            Ok(UpdateFoodLogResponse {
                success: true,
                updated_at: log.updated_at,
                day_totals: totals,
            })
        }
        None => Err(format!("Food log not found with id: {}", id)),
    }
}

/// Delete a food log entry
pub fn delete_food_log(db: &Database, id: i64) -> Result<DeleteFoodLogResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let log = FoodLog::get_by_id(&conn, id)
        .map_err(|e| format!("Database error: {}", e))?
        .ok_or_else(|| format!("Food log not found with id: {}", id))?;

    FoodLog::delete(&conn, id).map_err(|e| format!("Failed to delete food log: {}", e))?;

    let totals = day_totals(db, log.day_id)?;

    Ok(DeleteFoodLogResponse {
        success: true,
        deleted_id: id,
        day_totals: totals,
    })
}
