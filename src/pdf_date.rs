//! PDF date strings (`D:YYYYMMDDHHmmSS+HH'mm'`) to normalized UTC timestamps.
//!
//! The first two characters are treated as a prefix and skipped whatever they
//! are. Only the hour part of the UTC offset is applied; its sign is honoured,
//! so `-08'00'` moves the timestamp forward by eight hours. A trailing `Z` or
//! a missing offset means the time is already UTC.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::error::HarvestError;

/// Output format for normalized timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses an optional PDF date, logging and discarding malformed input.
///
/// Absent input returns `None` without any parse attempt.
pub fn parse_pdf_date(raw: Option<&str>) -> Option<NaiveDateTime> {
    let raw = raw?;
    match try_parse_pdf_date(raw) {
        Ok(ts) => Some(ts),
        Err(e) => {
            tracing::warn!(error = %e, "could not convert PDF date to timestamp");
            None
        }
    }
}

/// Strict variant of [`parse_pdf_date`] that reports why the input was rejected.
pub fn try_parse_pdf_date(raw: &str) -> Result<NaiveDateTime, HarvestError> {
    let year = numeric_field(raw, 2, 6, "year")?;
    let month = numeric_field(raw, 6, 8, "month")?;
    let day = numeric_field(raw, 8, 10, "day")?;
    let hour = numeric_field(raw, 10, 12, "hour")?;
    let minute = numeric_field(raw, 12, 14, "minute")?;
    let second = numeric_field(raw, 14, 16, "second")?;
    if year == 0 {
        return Err(HarvestError::date_parse(raw, "year 0 is out of range"));
    }

    let local = NaiveDate::from_ymd_opt(year as i32, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, second))
        .ok_or_else(|| HarvestError::date_parse(raw, "date component out of range"))?;

    let offset_hours = offset_hours(raw, raw.get(16..).unwrap_or(""))?;

    local
        .checked_sub_signed(TimeDelta::hours(offset_hours))
        .ok_or_else(|| HarvestError::date_parse(raw, "timestamp overflow after offset"))
}

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn numeric_field(raw: &str, start: usize, end: usize, name: &str) -> Result<u32, HarvestError> {
    let field = raw
        .get(start..end)
        .ok_or_else(|| HarvestError::date_parse(raw, format!("missing {}", name)))?;
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(HarvestError::date_parse(
            raw,
            format!("non-numeric {} '{}'", name, field),
        ));
    }
    field
        .parse::<u32>()
        .map_err(|e| HarvestError::date_parse(raw, format!("{}: {}", name, e)))
}

fn offset_hours(raw: &str, tail: &str) -> Result<i64, HarvestError> {
    let mut chars = tail.chars();
    let sign = match chars.next() {
        None | Some('Z') => return Ok(0),
        Some('+') => 1,
        Some('-') => -1,
        Some(other) => {
            return Err(HarvestError::date_parse(
                raw,
                format!("unexpected offset marker '{}'", other),
            ))
        }
    };
    let digits: String = chars.take_while(|c| c.is_ascii_digit()).take(2).collect();
    if digits.is_empty() {
        return Err(HarvestError::date_parse(raw, "missing offset hours"));
    }
    let hours: i64 = digits
        .parse()
        .map_err(|e| HarvestError::date_parse(raw, format!("offset: {}", e)))?;
    Ok(sign * hours)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(raw: &str) -> Option<String> {
        parse_pdf_date(Some(raw)).map(|ts| format_timestamp(&ts))
    }

    #[test]
    fn positive_offset_is_subtracted() {
        assert_eq!(
            parsed("D:20240101120000+05'00'").as_deref(),
            Some("2024-01-01 07:00:00")
        );
    }

    #[test]
    fn negative_offset_moves_forward() {
        assert_eq!(
            parsed("D:20230615093015-08'00'").as_deref(),
            Some("2023-06-15 17:30:15")
        );
    }

    #[test]
    fn offset_can_cross_a_day_boundary() {
        assert_eq!(
            parsed("D:20240101020000+05'00'").as_deref(),
            Some("2023-12-31 21:00:00")
        );
    }

    #[test]
    fn zulu_and_missing_offset_are_utc() {
        assert_eq!(
            parsed("D:20240229235959Z").as_deref(),
            Some("2024-02-29 23:59:59")
        );
        assert_eq!(
            parsed("D:20240229235959").as_deref(),
            Some("2024-02-29 23:59:59")
        );
    }

    #[test]
    fn offset_minutes_are_ignored() {
        assert_eq!(
            parsed("D:20240101120000+05'30'").as_deref(),
            Some("2024-01-01 07:00:00")
        );
    }

    #[test]
    fn prefix_is_skipped_regardless_of_content() {
        assert_eq!(
            parsed("xx20240101120000+00'00'").as_deref(),
            Some("2024-01-01 12:00:00")
        );
    }

    #[test]
    fn absent_empty_and_garbage_are_none() {
        assert_eq!(parse_pdf_date(None), None);
        assert_eq!(parse_pdf_date(Some("")), None);
        assert_eq!(parse_pdf_date(Some("garbage")), None);
    }

    #[test]
    fn out_of_range_components_are_rejected() {
        assert!(try_parse_pdf_date("D:20241301120000Z").is_err());
        assert!(try_parse_pdf_date("D:20230229120000Z").is_err());
        assert!(try_parse_pdf_date("D:20240101250000Z").is_err());
    }

    #[test]
    fn year_zero_is_rejected() {
        assert_eq!(parsed("D:00000101120000+00'00'"), None);
        assert!(parsed("D:00010101120000+00'00'").is_some());
    }

    #[test]
    fn non_numeric_fields_are_rejected() {
        let err = try_parse_pdf_date("D:2024AB01120000Z").unwrap_err();
        assert!(matches!(err, HarvestError::DateParse { .. }));
        assert!(err.to_string().contains("month"));
        assert!(try_parse_pdf_date("D:+0240101120000Z").is_err());
    }

    #[test]
    fn bad_offset_marker_is_rejected() {
        assert!(try_parse_pdf_date("D:20240101120000?05'00'").is_err());
        assert!(try_parse_pdf_date("D:20240101120000+").is_err());
    }

    #[test]
    fn non_ascii_input_does_not_panic() {
        assert_eq!(parse_pdf_date(Some("D:2024é0101120000Z")), None);
    }
}
