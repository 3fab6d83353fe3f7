//! Day tools
//!
//! Day detail, day listings, and the goal dashboard.

use serde::Serialize;

use crate::db::Database;
use crate::models::{Day, FoodLog, Goal, MealType, NutritionTotals};

use super::validate_date;

/// Day with food logs for detailed view
#[derive(Debug, Serialize)]
pub struct DayDetail {
    pub id: i64,
    pub date: String,
    pub meals: DayMeals,
    pub totals: NutritionTotals,
    pub notes: Option<String>,
}

/// Logs organized by meal type
#[derive(Debug, Default, Serialize)]
pub struct DayMeals {
    pub breakfast: Vec<FoodLog>,
    pub lunch: Vec<FoodLog>,
    pub dinner: Vec<FoodLog>,
    pub snack: Vec<FoodLog>,
    pub unspecified: Vec<FoodLog>,
}

/// Summary row for list_days
#[derive(Debug, Serialize)]
pub struct DaySummary {
    pub id: i64,
    pub date: String,
    pub totals: NutritionTotals,
    pub log_count: i64,
}

/// Response for list_days
#[derive(Debug, Serialize)]
pub struct ListDaysResponse {
    pub days: Vec<DaySummary>,
    pub limit: i64,
    pub offset: i64,
}

/// Progress against one goal field
#[derive(Debug, Serialize)]
pub struct GoalProgress {
    pub target: f64,
    pub consumed: f64,
    pub percent: f64,
}

/// Goal progress across the six fields
#[derive(Debug, Serialize)]
pub struct DashboardGoals {
    pub calories: GoalProgress,
    pub protein: GoalProgress,
    pub carbs: GoalProgress,
    pub fat: GoalProgress,
    pub fiber: GoalProgress,
    pub sodium: GoalProgress,
}

/// Response for get_dashboard
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub date: String,
    pub totals: NutritionTotals,
    pub log_count: i64,
    /// None when no goal is set or the goal read failed; the dashboard
    /// still returns totals in that case.
    pub goals: Option<DashboardGoals>,
}

/// Get a day with its food logs grouped by meal
pub fn get_day(db: &Database, date: &str) -> Result<Option<DayDetail>, String> {
    validate_date(date)?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let day = Day::get_by_date(&conn, date)
        .map_err(|e| format!("Failed to get day: {}", e))?;

    let Some(day) = day else {
        return Ok(None);
    };

    let logs = FoodLog::get_for_day(&conn, day.id)
        .map_err(|e| format!("Failed to get food logs: {}", e))?;

    let mut meals = DayMeals::default();
    for log in logs {
        match log.meal_type {
            MealType::Breakfast => meals.breakfast.push(log),
            MealType::Lunch => meals.lunch.push(log),
            MealType::Dinner => meals.dinner.push(log),
            MealType::Snack => meals.snack.push(log),
            MealType::Unspecified => meals.unspecified.push(log),
        }
    }

    Ok(Some(DayDetail {
        id: day.id,
        date: day.date,
        meals,
        totals: day.cached_totals,
        notes: day.notes,
    }))
}

/// List days with cached totals, most recent first
pub fn list_days(
    db: &Database,
    start_date: Option<&str>,
    end_date: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<ListDaysResponse, String> {
    if let Some(start) = start_date {
        validate_date(start)?;
    }
    if let Some(end) = end_date {
        validate_date(end)?;
    }
    let limit = limit.clamp(1, 200);
    let offset = offset.max(0);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let days = Day::list(&conn, start_date, end_date, limit, offset)
        .map_err(|e| format!("Failed to list days: {}", e))?;

    let mut summaries = Vec::with_capacity(days.len());
    for day in days {
        let log_count = FoodLog::count_for_day(&conn, day.id)
            .map_err(|e| format!("Failed to count logs: {}", e))?;
        summaries.push(DaySummary {
            id: day.id,
            date: day.date,
            totals: day.cached_totals,
            log_count,
        });
    }

    Ok(ListDaysResponse {
        days: summaries,
        limit,
        offset,
    })
}

fn progress(target: f64, consumed: f64) -> GoalProgress {
    let percent = if target > 0.0 {
        (consumed / target) * 100.0
    } else {
        0.0
    };
    GoalProgress {
        target,
        consumed,
        percent,
    }
}

/// Dashboard for a date: totals plus goal progress
///
/// Totals and goal are read independently; a missing or failed goal read
/// degrades to `goals: null` rather than failing the whole request.
pub fn get_dashboard(db: &Database, date: &str) -> Result<DashboardResponse, String> {
    validate_date(date)?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let day = Day::get_by_date(&conn, date)
        .map_err(|e| format!("Failed to get day: {}", e))?;

    let (totals, log_count) = match &day {
        Some(day) => {
            let count = FoodLog::count_for_day(&conn, day.id)
                .map_err(|e| format!("Failed to count logs: {}", e))?;
            (day.cached_totals.clone(), count)
        }
        None => (NutritionTotals::zero(), 0),
    };

    let goals = match Goal::get(&conn) {
        Ok(Some(goal)) => {
            let t = &goal.targets;
            Some(DashboardGoals {
                calories: progress(t.calories, totals.calories),
                protein: progress(t.protein, totals.protein),
                carbs: progress(t.carbs, totals.carbs),
                fat: progress(t.fat, totals.fat),
                fiber: progress(t.fiber, totals.fiber),
                sodium: progress(t.sodium, totals.sodium),
            })
        }
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("goal read failed, returning dashboard without goals: {}", e);
            None
        }
    };

    Ok(DashboardResponse {
        date: date.to_string(),
        totals,
        log_count,
        goals,
    })
}
