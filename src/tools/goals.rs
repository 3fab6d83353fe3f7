//! Goal tools
//!
//! Setting and reading the daily nutrient targets.

use serde::Serialize;

use crate::db::Database;
use crate::models::{Goal, NutritionTotals};

/// Response for set_goal and get_goal
#[derive(Debug, Serialize)]
pub struct GoalResponse {
    pub targets: NutritionTotals,
    pub updated_at: String,
}

/// Set the daily goal targets
pub fn set_goal(db: &Database, targets: NutritionTotals) -> Result<GoalResponse, String> {
    for (label, value) in [
        ("calories", targets.calories),
        ("protein", targets.protein),
        ("carbs", targets.carbs),
        ("fat", targets.fat),
        ("fiber", targets.fiber),
        ("sodium", targets.sodium),
    ] {
        if value < 0.0 {
            return Err(format!("{} target cannot be negative", label));
        }
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let goal = Goal::set(&conn, &targets).map_err(|e| format!("Failed to set goal: {}", e))?;

    Ok(GoalResponse {
        targets: goal.targets,
        updated_at: goal.updated_at,
    })
}

/// Get the current daily goal, if one is set
pub fn get_goal(db: &Database) -> Result<Option<GoalResponse>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let goal = Goal::get(&conn).map_err(|e| format!("Failed to get goal: {}", e))?;

    Ok(goal.map(|g| GoalResponse {
        targets: g.targets,
        updated_at: g.updated_at,
    }))
}
