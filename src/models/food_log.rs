//! Food log model
//!
//! One logged food per row. Nutrient columns are nullable: NULL records
//! that the source food database never reported the value, which stays
//! distinguishable from an explicit zero until aggregation.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};
use crate::nutrition::{aggregate_totals, LogNutrients};

use super::{Day, NutritionTotals};

/// Meal type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Unspecified,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
            MealType::Unspecified => "unspecified",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "breakfast" => MealType::Breakfast,
            "lunch" => MealType::Lunch,
            "dinner" => MealType::Dinner,
            "snack" => MealType::Snack,
            _ => MealType::Unspecified,
        }
    }
}

/// A logged food entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodLog {
    pub id: i64,
    pub day_id: i64,
    pub meal_type: MealType,
    pub name: String,
    /// FoodData Central ID when logged from the food database
    pub fdc_id: Option<i64>,
    pub nutrients: LogNutrients,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a food log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodLogCreate {
    pub meal_type: MealType,
    pub name: String,
    pub fdc_id: Option<i64>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub fiber: Option<f64>,
    pub sodium: Option<f64>,
    pub quantity: Option<f64>,
    pub notes: Option<String>,
}

/// Data for updating a food log; None fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodLogUpdate {
    pub meal_type: Option<MealType>,
    pub name: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub fiber: Option<f64>,
    pub sodium: Option<f64>,
    pub quantity: Option<f64>,
    pub notes: Option<String>,
}

impl FoodLog {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let meal_type_str: String = row.get("meal_type")?;
        Ok(Self {
            id: row.get("id")?,
            day_id: row.get("day_id")?,
            meal_type: MealType::from_str(&meal_type_str),
            name: row.get("name")?,
            fdc_id: row.get("fdc_id")?,
            nutrients: LogNutrients {
                calories: row.get("calories")?,
                protein: row.get("protein")?,
                carbs: row.get("carbs")?,
                fat: row.get("fat")?,
                fiber: row.get("fiber")?,
                sodium: row.get("sodium")?,
                quantity: row.get("quantity")?,
            },
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Insert a new food log for the given date, creating the day if needed
    pub fn create(conn: &Connection, date: &str, data: &FoodLogCreate) -> DbResult<Self> {
        let name = data.name.trim();
        if name.is_empty() {
            return Err(DbError::InvalidInput("food name cannot be empty".to_string()));
        }

        let day = Day::get_or_create(conn, date)?;

        conn.execute(
            r#"
            INSERT INTO food_logs (
                day_id, meal_type, name, fdc_id,
                calories, protein, carbs, fat, fiber, sodium,
                quantity, notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
            params![
                day.id,
                data.meal_type.as_str(),
                name,
                data.fdc_id,
                data.calories,
                data.protein,
                data.carbs,
                data.fat,
                data.fiber,
                data.sodium,
                data.quantity,
                data.notes,
            ],
        )?;

        let id = conn.last_insert_rowid();
        let log = Self::get_by_id(conn, id)?
            .ok_or_else(|| DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))?;

        recalculate_day_totals(conn, day.id)?;

        Ok(log)
    }

    /// Get a food log by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM food_logs WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(log) => Ok(Some(log)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get all food logs for a day
    pub fn get_for_day(conn: &Connection, day_id: i64) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM food_logs WHERE day_id = ?1 ORDER BY meal_type, id"
        )?;

        let logs = stmt
            .query_map([day_id], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(logs)
    }

    /// Update a food log
    pub fn update(conn: &Connection, id: i64, data: &FoodLogUpdate) -> DbResult<Option<Self>> {
        let existing = Self::get_by_id(conn, id)?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut updates = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        macro_rules! add_update {
            ($field:ident, $col:expr) => {
                if let Some(ref val) = data.$field {
                    updates.push(format!("{} = ?{}", $col, params_vec.len() + 1));
                    params_vec.push(Box::new(val.clone()));
                }
            };
        }

        if let Some(meal_type) = data.meal_type {
            updates.push(format!("meal_type = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(meal_type.as_str().to_string()));
        }
        add_update!(name, "name");
        add_update!(calories, "calories");
        add_update!(protein, "protein");
        add_update!(carbs, "carbs");
        add_update!(fat, "fat");
        add_update!(fiber, "fiber");
        add_update!(sodium, "sodium");
        add_update!(quantity, "quantity");
        add_update!(notes, "notes");

        if updates.is_empty() {
            return Ok(Some(existing));
        }

        updates.push("updated_at = datetime('now')".to_string());

        let sql = format!(
            "UPDATE food_logs SET {} WHERE id = ?{}",
            updates.join(", "),
            params_vec.len() + 1
        );

        params_vec.push(Box::new(id));

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
        conn.execute(&sql, params_refs.as_slice())?;

        recalculate_day_totals(conn, existing.day_id)?;

        Self::get_by_id(conn, id)
    }

    /// Delete a food log
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        // Get day_id before delete for recalculation
        let log = Self::get_by_id(conn, id)?;

        let rows = conn.execute("DELETE FROM food_logs WHERE id = ?1", [id])?;

        if rows > 0 {
            if let Some(log) = log {
                recalculate_day_totals(conn, log.day_id)?;
            }
        }

        Ok(rows > 0)
    }

    /// Count food logs for a day
    pub fn count_for_day(conn: &Connection, day_id: i64) -> DbResult<i64> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM food_logs WHERE day_id = ?1",
            [day_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Count all food logs
    pub fn count(conn: &Connection) -> DbResult<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM food_logs", [], |row| row.get(0))?;
        Ok(count)
    }
}

/// Recalculate a day's cached totals from its food logs
///
/// Reads the day's rows, runs them through the aggregator, and writes the
/// cache back. Returns the fresh totals.
pub fn recalculate_day_totals(conn: &Connection, day_id: i64) -> DbResult<NutritionTotals> {
    let logs = FoodLog::get_for_day(conn, day_id)?;

    let entries: Vec<LogNutrients> = logs.into_iter().map(|l| l.nutrients).collect();
    let totals = aggregate_totals(&entries);

    Day::update_cached_totals(conn, day_id, &totals)?;

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn oatmeal(quantity: Option<f64>) -> FoodLogCreate {
        FoodLogCreate {
            meal_type: MealType::Breakfast,
            name: "Oatmeal".to_string(),
            fdc_id: None,
            calories: Some(150.0),
            protein: Some(5.0),
            carbs: Some(27.0),
            fat: Some(3.0),
            fiber: Some(4.0),
            sodium: Some(0.0),
            quantity,
            notes: None,
        }
    }

    #[test]
    fn test_create_recalculates_day_cache() {
        let conn = test_conn();
        let log = FoodLog::create(&conn, "2026-08-29", &oatmeal(Some(2.0))).unwrap();
        assert_eq!(log.nutrients.calories, Some(150.0));

        let day = Day::get_by_date(&conn, "2026-08-29").unwrap().unwrap();
        assert_eq!(day.cached_totals.calories, 300.0);
        assert_eq!(day.cached_totals.fiber, 8.0);
    }

    #[test]
    fn test_null_nutrients_persist_as_null() {
        let conn = test_conn();
        let mut data = oatmeal(Some(1.0));
        data.fiber = None;
        data.sodium = None;
        let log = FoodLog::create(&conn, "2026-08-29", &data).unwrap();

        let fetched = FoodLog::get_by_id(&conn, log.id).unwrap().unwrap();
        // Missing from the source stays missing in storage
        assert_eq!(fetched.nutrients.fiber, None);
        assert_eq!(fetched.nutrients.sodium, None);
        assert_eq!(fetched.nutrients.calories, Some(150.0));
    }

    #[test]
    fn test_update_recalculates_day_cache() {
        let conn = test_conn();
        let log = FoodLog::create(&conn, "2026-08-29", &oatmeal(Some(1.0))).unwrap();

        let update = FoodLogUpdate {
            quantity: Some(3.0),
            ..FoodLogUpdate::default()
        };
        FoodLog::update(&conn, log.id, &update).unwrap();

        let day = Day::get_by_date(&conn, "2026-08-29").unwrap().unwrap();
        assert_eq!(day.cached_totals.calories, 450.0);
    }

    #[test]
    fn test_delete_recalculates_day_cache() {
        let conn = test_conn();
        let log = FoodLog::create(&conn, "2026-08-29", &oatmeal(Some(1.0))).unwrap();
        FoodLog::create(&conn, "2026-08-29", &oatmeal(Some(1.0))).unwrap();

        assert!(FoodLog::delete(&conn, log.id).unwrap());

        let day = Day::get_by_date(&conn, "2026-08-29").unwrap().unwrap();
        assert_eq!(day.cached_totals.calories, 150.0);
    }

    #[test]
    fn test_empty_name_rejected() {
        let conn = test_conn();
        let mut data = oatmeal(None);
        data.name = "   ".to_string();
        assert!(FoodLog::create(&conn, "2026-08-29", &data).is_err());
    }

    #[test]
    fn test_zero_quantity_counts_as_one_in_cache() {
        let conn = test_conn();
        FoodLog::create(&conn, "2026-08-29", &oatmeal(Some(0.0))).unwrap();

        let day = Day::get_by_date(&conn, "2026-08-29").unwrap().unwrap();
        // Falsy-quantity fallback flows through the cache path too
        assert_eq!(day.cached_totals.calories, 150.0);
    }
}
