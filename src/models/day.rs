//! Day model
//!
//! Represents a day with cached aggregated nutrition totals.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

use super::NutritionTotals;

/// A day container for food logs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Day {
    pub id: i64,
    pub date: String,  // ISO date: "2026-08-29"
    pub cached_totals: NutritionTotals,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Day {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            date: row.get("date")?,
            cached_totals: NutritionTotals {
                calories: row.get("cached_calories")?,
                protein: row.get("cached_protein")?,
                carbs: row.get("cached_carbs")?,
                fat: row.get("cached_fat")?,
                fiber: row.get("cached_fiber")?,
                sodium: row.get("cached_sodium")?,
            },
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Create a new day
    pub fn create(conn: &Connection, date: &str, notes: Option<&str>) -> DbResult<Self> {
        conn.execute(
            "INSERT INTO days (date, notes) VALUES (?1, ?2)",
            params![date, notes],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?
            .ok_or_else(|| crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Get a day by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM days WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(day) => Ok(Some(day)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get a day by date
    pub fn get_by_date(conn: &Connection, date: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM days WHERE date = ?1")?;

        let result = stmt.query_row([date], Self::from_row);
        match result {
            Ok(day) => Ok(Some(day)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get or create a day by date
    pub fn get_or_create(conn: &Connection, date: &str) -> DbResult<Self> {
        if let Some(day) = Self::get_by_date(conn, date)? {
            return Ok(day);
        }

        Self::create(conn, date, None)
    }

    /// List days with optional date range
    pub fn list(
        conn: &Connection,
        start_date: Option<&str>,
        end_date: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> DbResult<Vec<Self>> {
        let mut sql = String::from("SELECT * FROM days WHERE 1=1");
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(start) = start_date {
            params_vec.push(Box::new(start.to_string()));
            sql.push_str(&format!(" AND date >= ?{}", params_vec.len()));
        }

        if let Some(end) = end_date {
            params_vec.push(Box::new(end.to_string()));
            sql.push_str(&format!(" AND date <= ?{}", params_vec.len()));
        }

        sql.push_str(" ORDER BY date DESC");

        params_vec.push(Box::new(limit));
        sql.push_str(&format!(" LIMIT ?{}", params_vec.len()));

        params_vec.push(Box::new(offset));
        sql.push_str(&format!(" OFFSET ?{}", params_vec.len()));

        let mut stmt = conn.prepare(&sql)?;
        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();

        let days = stmt
            .query_map(params_refs.as_slice(), Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(days)
    }

    /// Update cached totals for a day
    pub fn update_cached_totals(conn: &Connection, id: i64, totals: &NutritionTotals) -> DbResult<()> {
        conn.execute(
            r#"
            UPDATE days SET
                cached_calories = ?1,
                cached_protein = ?2,
                cached_carbs = ?3,
                cached_fat = ?4,
                cached_fiber = ?5,
                cached_sodium = ?6,
                updated_at = datetime('now')
            WHERE id = ?7
            "#,
            params![
                totals.calories,
                totals.protein,
                totals.carbs,
                totals.fat,
                totals.fiber,
                totals.sodium,
                id,
            ],
        )?;
        Ok(())
    }

    /// Delete a day
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM days WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
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

    #[test]
    fn test_get_or_create_is_idempotent() {
        let conn = test_conn();
        let a = Day::get_or_create(&conn, "2026-08-29").unwrap();
        let b = Day::get_or_create(&conn, "2026-08-29").unwrap();
        assert_eq!(a.id, b.id);
        assert_eq!(a.cached_totals, NutritionTotals::zero());
    }

    #[test]
    fn test_update_cached_totals() {
        let conn = test_conn();
        let day = Day::get_or_create(&conn, "2026-08-29").unwrap();

        let totals = NutritionTotals {
            calories: 1800.0,
            protein: 90.0,
            carbs: 200.0,
            fat: 60.0,
            fiber: 25.0,
            sodium: 1500.0,
        };
        Day::update_cached_totals(&conn, day.id, &totals).unwrap();

        let day = Day::get_by_id(&conn, day.id).unwrap().unwrap();
        assert_eq!(day.cached_totals, totals);
    }

    #[test]
    fn test_list_date_range() {
        let conn = test_conn();
        Day::get_or_create(&conn, "2026-08-27").unwrap();
        Day::get_or_create(&conn, "2026-08-28").unwrap();
        Day::get_or_create(&conn, "2026-08-29").unwrap();

        let days = Day::list(&conn, Some("2026-08-28"), None, 50, 0).unwrap();
        assert_eq!(days.len(), 2);
        // Most recent first
        assert_eq!(days[0].date, "2026-08-29");
    }

    #[test]
    fn test_delete() {
        let conn = test_conn();
        let day = Day::get_or_create(&conn, "2026-08-29").unwrap();

        assert!(Day::delete(&conn, day.id).unwrap());
        assert!(Day::get_by_id(&conn, day.id).unwrap().is_none());
        assert!(!Day::delete(&conn, day.id).unwrap());
    }
}
