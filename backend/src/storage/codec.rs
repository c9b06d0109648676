//! Text encodings used by the tables.
//!
//! Dates are `YYYY-MM-DD`, timestamps RFC 3339 UTC with microseconds (so they
//! sort lexically) and decimals fixed-scale strings such as `"4.25"`.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, SecondsFormat, SubsecRound, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub use shared::validation::{TEMPERATURE_SCALE, WEIGHT_SCALE};

/// Current time at the precision the tables keep
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

pub fn encode_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn decode_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .with_context(|| format!("Invalid stored date '{}'", text))
}

pub fn encode_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_timestamp(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc))
        .with_context(|| format!("Invalid stored timestamp '{}'", text))
}

pub fn encode_decimal(value: f64, scale: usize) -> String {
    format!("{:.*}", scale, value)
}

pub fn decode_decimal(text: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid stored decimal '{}'", text))
}

pub fn encode_optional_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(encode_date)
}

pub fn decode_optional_date(text: Option<String>) -> Result<Option<NaiveDate>> {
    text.as_deref().map(decode_date).transpose()
}

pub fn encode_optional_decimal(value: Option<f64>, scale: usize) -> Option<String> {
    value.map(|v| encode_decimal(v, scale))
}

pub fn decode_optional_decimal(text: Option<String>) -> Result<Option<f64>> {
    text.as_deref().map(decode_decimal).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_decimal_scale() {
        assert_eq!(encode_decimal(4.25, WEIGHT_SCALE), "4.25");
        assert_eq!(encode_decimal(3.0, WEIGHT_SCALE), "3.00");
        assert_eq!(encode_decimal(36.5, TEMPERATURE_SCALE), "36.5");
        assert_eq!(decode_decimal("4.25").unwrap(), 4.25);
        assert_eq!(decode_decimal("3.00").unwrap(), 3.0);
        assert!(decode_decimal("heavy").is_err());
    }

    #[test]
    fn test_optional_values() {
        assert_eq!(encode_optional_decimal(None, WEIGHT_SCALE), None);
        assert_eq!(decode_optional_decimal(None).unwrap(), None);
        assert_eq!(
            decode_optional_decimal(Some("172.50".to_string())).unwrap(),
            Some(172.5)
        );
        assert_eq!(
            decode_optional_date(Some("2024-03-01".to_string())).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }

    #[test]
    fn test_timestamps_sort_lexically() {
        let earlier = Utc.with_ymd_and_hms(2024, 1, 9, 23, 59, 59).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();

        let a = encode_timestamp(earlier);
        let b = encode_timestamp(later);
        assert_eq!(a, "2024-01-09T23:59:59.000000Z");
        assert!(a < b);
        assert_eq!(decode_timestamp(&b).unwrap(), later);
    }

    #[test]
    fn test_now_survives_storage() {
        let stamp = now();
        assert_eq!(decode_timestamp(&encode_timestamp(stamp)).unwrap(), stamp);
    }
}
