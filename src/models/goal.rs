//! Daily goal model
//!
//! A single row of daily nutrient targets. Absent until the user sets one.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

use super::NutritionTotals;

/// Daily nutrient targets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub targets: NutritionTotals,
    pub updated_at: String,
}

impl Goal {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            targets: NutritionTotals {
                calories: row.get("calories")?,
                protein: row.get("protein")?,
                carbs: row.get("carbs")?,
                fat: row.get("fat")?,
                fiber: row.get("fiber")?,
                sodium: row.get("sodium")?,
            },
            updated_at: row.get("updated_at")?,
        })
    }

    /// Get the current goal, if set
    pub fn get(conn: &Connection) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM goals WHERE id = 1")?;

        let result = stmt.query_row([], Self::from_row);
        match result {
            Ok(goal) => Ok(Some(goal)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set (upsert) the goal
    pub fn set(conn: &Connection, targets: &NutritionTotals) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO goals (id, calories, protein, carbs, fat, fiber, sodium)
            VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(id) DO UPDATE SET
                calories = excluded.calories,
                protein = excluded.protein,
                carbs = excluded.carbs,
                fat = excluded.fat,
                fiber = excluded.fiber,
                sodium = excluded.sodium,
                updated_at = datetime('now')
            "#,
            params![
                targets.calories,
                targets.protein,
                targets.carbs,
                targets.fat,
                targets.fiber,
                targets.sodium,
            ],
        )?;

        Self::get(conn)?
            .ok_or_else(|| crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    #[test]
    fn test_goal_absent_then_set() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        assert!(Goal::get(&conn).unwrap().is_none());

        let targets = NutritionTotals {
            calories: 2200.0,
            protein: 120.0,
            carbs: 250.0,
            fat: 70.0,
            fiber: 30.0,
            sodium: 2000.0,
        };
        let goal = Goal::set(&conn, &targets).unwrap();
        assert_eq!(goal.targets, targets);

        // Upsert replaces
        let mut revised = targets.clone();
        revised.calories = 2000.0;
        let goal = Goal::set(&conn, &revised).unwrap();
        assert_eq!(goal.targets.calories, 2000.0);
    }
}
