use anyhow::{anyhow, Result};
use chrono::{DateTime, Datelike, Local, NaiveDate};
use chrono_english::{parse_date_string, Dialect};
use now::DateTimeNow;

/// Stopwatch display: minutes unpadded, seconds padded. 125 seconds is "2:05".
pub fn format_stopwatch(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Focus-timer display: both fields padded. 65 seconds is "01:05".
pub fn format_countdown(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Resolves a human date expression like "yesterday", "15/03/2025" or
/// "1 week ago" relative to `reference`.
pub fn parse_date_expr(
    expr: &str,
    reference: DateTime<Local>,
    dialect: Dialect,
) -> Result<NaiveDate> {
    let parsed = parse_date_string(expr, reference, dialect)
        .map_err(|e| anyhow!("could not understand date {expr:?}: {e}"))?;
    Ok(parsed.with_timezone(&Local).beginning_of_day().date_naive())
}

/// Lays out the month containing `date` as a Sunday-first grid: leading
/// `None` cells up to the weekday of the 1st, then one cell per day.
pub fn month_grid(date: NaiveDate) -> Vec<Option<NaiveDate>> {
    let first = date.with_day(1).unwrap();
    let offset = first.weekday().num_days_from_sunday() as usize;
    let mut cells: Vec<Option<NaiveDate>> = vec![None; offset];
    let mut day = first;
    while day.month() == first.month() {
        cells.push(Some(day));
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn stopwatch_format_pads_seconds_only() {
        assert_eq!(format_stopwatch(0), "0:00");
        assert_eq!(format_stopwatch(65), "1:05");
        assert_eq!(format_stopwatch(125), "2:05");
        assert_eq!(format_stopwatch(3600), "60:00");
    }

    #[test]
    fn countdown_format_pads_both_fields() {
        assert_eq!(format_countdown(65), "01:05");
        assert_eq!(format_countdown(1500), "25:00");
        assert_eq!(format_countdown(900), "15:00");
        assert_eq!(format_countdown(0), "00:00");
    }

    #[test]
    fn month_grid_offsets_by_first_weekday() {
        // June 2025 starts on a Sunday: no leading blanks, 30 cells.
        let june = month_grid(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
        assert_eq!(june.len(), 30);
        assert!(june[0].is_some());

        // July 2025 starts on a Tuesday: two leading blanks.
        let july = month_grid(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
        assert_eq!(july.iter().filter(|c| c.is_none()).count(), 2);
        assert_eq!(july.len(), 2 + 31);
        assert_eq!(
            july.last().unwrap().unwrap(),
            NaiveDate::from_ymd_opt(2025, 7, 31).unwrap()
        );
    }

    #[test]
    fn date_expressions_resolve_against_reference() {
        let reference = Local.with_ymd_and_hms(2025, 3, 16, 12, 0, 0).unwrap();
        let yesterday = parse_date_expr("yesterday", reference, Dialect::Uk).unwrap();
        assert_eq!(yesterday, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());

        let explicit = parse_date_expr("15/03/2025", reference, Dialect::Uk).unwrap();
        assert_eq!(explicit, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());

        assert!(parse_date_expr("not a date", reference, Dialect::Uk).is_err());
    }
}
