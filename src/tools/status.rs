//! Service status tool

use serde::Serialize;

use crate::build_info::BuildInfo;
use crate::db::Database;
use crate::models::FoodLog;

/// Response for macrolog_status
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub build: BuildInfo,
    pub schema_version: i32,
    pub total_food_logs: i64,
    pub goal_set: bool,
}

/// Report build metadata and database state
pub fn status(db: &Database) -> Result<StatusResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let schema_version = crate::db::migrations::get_schema_version(&conn)
        .map_err(|e| format!("Failed to read schema version: {}", e))?;
    let total_food_logs =
        FoodLog::count(&conn).map_err(|e| format!("Failed to count food logs: {}", e))?;
    let goal_set = crate::models::Goal::get(&conn)
        .map_err(|e| format!("Failed to read goal: {}", e))?
        .is_some();

    Ok(StatusResponse {
        build: BuildInfo::current(),
        schema_version,
        total_food_logs,
        goal_set,
    })
}
