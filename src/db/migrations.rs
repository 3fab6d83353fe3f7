//! Schema migrations
//!
//! Versioned, forward-only. Each migration runs at most once; the applied
//! set is tracked in `schema_migrations`.

use rusqlite::Connection;

use super::connection::DbResult;

/// Latest schema version this binary knows about
const SCHEMA_VERSION: i32 = 1;

/// Apply any migrations newer than the database's recorded version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    if get_schema_version(conn)? < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Migration v1: Initial schema
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- DAYS
        -- Daily aggregation container
        -- ============================================
        CREATE TABLE days (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL UNIQUE,           -- ISO date: "2026-08-29"

            -- Cached daily totals - recalculated when food logs change
            cached_calories REAL NOT NULL DEFAULT 0,
            cached_protein REAL NOT NULL DEFAULT 0,
            cached_carbs REAL NOT NULL DEFAULT 0,
            cached_fat REAL NOT NULL DEFAULT 0,
            cached_fiber REAL NOT NULL DEFAULT 0,
            cached_sodium REAL NOT NULL DEFAULT 0,

            -- Metadata
            notes TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE UNIQUE INDEX idx_days_date ON days(date);

        -- ============================================
        -- FOOD LOGS
        -- What was actually consumed. Nutrient columns are nullable:
        -- NULL means the food database never reported the value, which
        -- is distinct from an explicit zero.
        -- ============================================
        CREATE TABLE food_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            day_id INTEGER NOT NULL REFERENCES days(id) ON DELETE CASCADE,
            meal_type TEXT NOT NULL CHECK(meal_type IN ('breakfast', 'lunch', 'dinner', 'snack', 'unspecified')),

            name TEXT NOT NULL,
            fdc_id INTEGER,                      -- provenance when logged from FoodData Central

            -- Per-serving nutrient values
            calories REAL,
            protein REAL,                        -- grams
            carbs REAL,                          -- grams
            fat REAL,                            -- grams
            fiber REAL,                          -- grams
            sodium REAL,                         -- milligrams

            quantity REAL,                       -- servings multiplier

            -- Metadata
            notes TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_food_logs_day ON food_logs(day_id);
        CREATE INDEX idx_food_logs_type ON food_logs(meal_type);
        CREATE INDEX idx_food_logs_fdc ON food_logs(fdc_id);

        -- ============================================
        -- GOALS
        -- Daily nutrient targets (single active row)
        -- ============================================
        CREATE TABLE goals (
            id INTEGER PRIMARY KEY CHECK(id = 1),
            calories REAL NOT NULL DEFAULT 2000,
            protein REAL NOT NULL DEFAULT 50,
            carbs REAL NOT NULL DEFAULT 275,
            fat REAL NOT NULL DEFAULT 78,
            fiber REAL NOT NULL DEFAULT 28,
            sodium REAL NOT NULL DEFAULT 2300,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )?;

    Ok(())
}

/// Highest applied migration version, 0 for a fresh database
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Whether the database is behind the binary's schema version
pub fn needs_migration(conn: &Connection) -> DbResult<bool> {
    Ok(get_schema_version(conn)? < SCHEMA_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_apply_to_fresh_db() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), 1);
        assert!(!needs_migration(&conn).unwrap());
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), 1);
    }
}
