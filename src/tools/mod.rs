//! Macrolog tools module
//!
//! MCP tool implementations: validation, orchestration, and response shapes.

pub mod days;
pub mod food_logs;
pub mod goals;
pub mod nutrients;
pub mod status;

/// Validate an ISO date string (YYYY-MM-DD)
///
/// Days are keyed by the raw string, so only the canonical zero-padded
/// rendering is accepted; "2026-2-9" would otherwise create a second day
/// row alongside "2026-02-09".
pub fn validate_date(date: &str) -> Result<(), String> {
    let parsed = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", date))?;

    if parsed.format("%Y-%m-%d").to_string() != date {
        return Err(format!("Invalid date '{}', expected YYYY-MM-DD", date));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2026-08-29").is_ok());
        assert!(validate_date("2026-02-09").is_ok());
        // Non-canonical spellings would key a second day row for the same date
        assert!(validate_date("2026-2-9").is_err());
        assert!(validate_date("2026-02-9").is_err());
        assert!(validate_date("08/29/2026").is_err());
        assert!(validate_date("not a date").is_err());
    }
}
