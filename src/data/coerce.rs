//! Column Coercion Module
//! Best-effort conversion of raw CSV columns to typed values.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use polars::prelude::*;

/// Timestamp layouts accepted by `parse_datetime`, tried in order.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
];

/// Date-only layouts, parsed as midnight.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d"];

/// Parse one raw cell into a timestamp.
///
/// Empty and unparseable cells yield `None`.
fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }

    None
}

/// Replace `column` with a microsecond datetime column, in place.
///
/// Cells that fail to parse become null. Frames without the column are
/// left untouched.
pub fn coerce_datetime(df: &mut DataFrame, column: &str) -> PolarsResult<()> {
    let Ok(raw) = df.column(column) else {
        return Ok(());
    };

    let strings = raw.cast(&DataType::String)?;
    let parsed = strings
        .str()?
        .into_iter()
        .map(|cell| cell.and_then(parse_datetime));
    let coerced =
        DatetimeChunked::from_naive_datetime_options(column.into(), parsed, TimeUnit::Microseconds);

    df.with_column(coerced.into_series())?;
    Ok(())
}

/// Replace `column` with a Float64 column, in place.
///
/// Non-numeric cells become null. Frames without the column are left
/// untouched.
pub fn coerce_numeric(df: &mut DataFrame, column: &str) -> PolarsResult<()> {
    let Ok(raw) = df.column(column) else {
        return Ok(());
    };

    // Non-strict cast: invalid cells turn into nulls instead of erroring.
    let coerced = raw.cast(&DataType::Float64)?;

    df.with_column(coerced)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn micros(y: i32, m: u32, d: u32) -> i64 {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp_micros()
    }

    fn datetime_cell(df: &DataFrame, column: &str, idx: usize) -> Option<i64> {
        df.column(column)
            .unwrap()
            .as_materialized_series()
            .datetime()
            .unwrap()
            .get(idx)
    }

    #[test]
    fn parse_datetime_accepts_dates_and_timestamps() {
        let date = parse_datetime("2026-01-15").unwrap();
        assert_eq!(
            date,
            NaiveDate::from_ymd_opt(2026, 1, 15)
                .unwrap()
                .and_time(NaiveTime::MIN)
        );

        let stamp = parse_datetime("2026-01-15 08:30:00").unwrap();
        assert_eq!(stamp.time(), NaiveTime::from_hms_opt(8, 30, 0).unwrap());

        assert!(parse_datetime("not-a-date").is_none());
        assert!(parse_datetime("").is_none());
    }

    #[test]
    fn coerce_datetime_nulls_bad_cells_and_keeps_good_ones() {
        let mut df = DataFrame::new(vec![Column::new(
            "due_date".into(),
            vec!["2026-01-15", "not-a-date", "2026-02-01 09:15:00"],
        )])
        .unwrap();

        coerce_datetime(&mut df, "due_date").unwrap();

        assert!(matches!(
            df.column("due_date").unwrap().dtype(),
            DataType::Datetime(TimeUnit::Microseconds, None)
        ));
        assert_eq!(datetime_cell(&df, "due_date", 0), Some(micros(2026, 1, 15)));
        assert_eq!(datetime_cell(&df, "due_date", 1), None);
        assert!(datetime_cell(&df, "due_date", 2).is_some());
    }

    #[test]
    fn coerce_numeric_nulls_non_numeric_cells() {
        let mut df =
            DataFrame::new(vec![Column::new("value".into(), vec!["12.5", "abc"])]).unwrap();

        coerce_numeric(&mut df, "value").unwrap();

        let values = df.column("value").unwrap().f64().unwrap();
        assert_eq!(values.get(0), Some(12.5));
        assert_eq!(values.get(1), None);
    }

    #[test]
    fn coercion_skips_absent_columns() {
        let mut df = DataFrame::new(vec![Column::new("id".into(), vec![1i64, 2])]).unwrap();

        coerce_datetime(&mut df, "due_date").unwrap();
        coerce_numeric(&mut df, "value").unwrap();

        assert_eq!(df.width(), 1);
        assert_eq!(df.height(), 2);
    }
}
