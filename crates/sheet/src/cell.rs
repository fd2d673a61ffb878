use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Seconds in one day, used for Excel serial conversions.
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Represents a cell value in a sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Date(NaiveDateTime),
}

impl CellValue {
    /// Check if the value is null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Check if the value is null or the empty string.
    ///
    /// Whitespace-only text is a value and does not count as missing.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Try to get the value as a float
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            CellValue::Float(f) => Some(*f),
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::String(s) => s.trim().parse().ok(),
            CellValue::Date(dt) => Some(datetime_to_excel_serial(dt)),
            CellValue::Null => None,
        }
    }

    /// Get the value as a string
    #[must_use]
    pub fn as_str(&self) -> String {
        self.to_string()
    }

    /// Render the cell with a strftime pattern when it holds a date,
    /// falling back to the plain string form otherwise.
    #[must_use]
    pub fn format_date_or_str(&self, pattern: &str) -> String {
        match self {
            CellValue::Date(dt) => dt.format(pattern).to_string(),
            other => other.as_str(),
        }
    }
}

/// Parse ISO 8601 dates (`2024-03-01`) and date-times (`2024-03-01T08:30:00`).
#[must_use]
pub fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn excel_epoch() -> NaiveDateTime {
    // Excel's 1900 system counts from 1899-12-30 once the 1900 leap-year bug is folded in
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Convert an Excel 1900-system serial number into a date-time
#[must_use]
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let seconds = (serial * SECONDS_PER_DAY).round() as i64;
    excel_epoch().checked_add_signed(Duration::try_seconds(seconds)?)
}

/// Convert a date-time into an Excel 1900-system serial number
#[must_use]
pub fn datetime_to_excel_serial(dt: &NaiveDateTime) -> f64 {
    let delta = *dt - excel_epoch();
    delta.num_seconds() as f64 / SECONDS_PER_DAY
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Null
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, ""),
            CellValue::Bool(true) => write!(f, "True"),
            CellValue::Bool(false) => write!(f, "False"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(fl) => write!(f, "{fl}"),
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Date(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Int(i64::from(i))
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::Date(dt)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        d.and_hms_opt(0, 0, 0).map_or(CellValue::Null, CellValue::Date)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_iso_datetime() {
        assert_eq!(parse_iso_datetime("2024-03-01"), Some(date(2024, 3, 1)));
        assert_eq!(parse_iso_datetime("2024-03-01T00:00:00"), Some(date(2024, 3, 1)));
        assert_eq!(parse_iso_datetime("NO CATEGORIZADO"), None);
    }

    #[test]
    fn test_is_missing() {
        assert!(CellValue::Null.is_missing());
        assert!(CellValue::from("").is_missing());
        assert!(!CellValue::from("   ").is_missing());
        assert!(!CellValue::Int(0).is_missing());
        assert!(!CellValue::from("x").is_missing());
    }

    #[test]
    fn test_bool_display() {
        assert_eq!(CellValue::Bool(true).as_str(), "True");
        assert_eq!(CellValue::Bool(false).as_str(), "False");
    }

    #[test]
    fn test_excel_serial_conversions() {
        // 2024-01-01 is serial 45292 in the 1900 date system
        assert_eq!(excel_serial_to_datetime(45292.0), Some(date(2024, 1, 1)));
        assert!((datetime_to_excel_serial(&date(2024, 1, 1)) - 45292.0).abs() < f64::EPSILON);
        assert_eq!(excel_serial_to_datetime(-1.0), None);
    }

    #[test]
    fn test_format_date_or_str() {
        let cell = CellValue::Date(date(2023, 7, 9));
        assert_eq!(cell.format_date_or_str("%d/%m/%Y"), "09/07/2023");
        assert_eq!(CellValue::from("sin fecha").format_date_or_str("%d/%m/%Y"), "sin fecha");
        assert_eq!(CellValue::Int(12).format_date_or_str("%d/%m/%Y"), "12");
        assert_eq!(CellValue::Null.format_date_or_str("%d/%m/%Y"), "");
    }

    #[test]
    fn test_float_display_drops_integral_fraction() {
        assert_eq!(CellValue::Float(7.0).as_str(), "7");
        assert_eq!(CellValue::Float(1500.5).as_str(), "1500.5");
    }
}
