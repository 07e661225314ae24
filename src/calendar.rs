//! Calendar months used to key inflation data and label schedule periods

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Spanish short month names, as printed on period labels
pub const MONTH_LABELS: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

/// A calendar month (1-12) in a given year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    // Field order matters: derived Ord compares year first
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Create a year-month. Months outside 1-12 are normalized into the
    /// adjacent years (month 13 of 2024 is January 2025).
    pub fn new(month: u32, year: i32) -> Self {
        Self::from_ordinal(year as i64 * 12 + month as i64 - 1)
    }

    /// Month within 1-12. Fields set directly or deserialized may not be.
    pub fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month)
    }

    /// Month containing the local current date
    pub fn current() -> Self {
        Self::from(Local::now().date_naive())
    }

    fn ordinal(&self) -> i64 {
        self.year as i64 * 12 + self.month as i64 - 1
    }

    fn from_ordinal(ordinal: i64) -> Self {
        Self {
            year: ordinal.div_euclid(12) as i32,
            month: ordinal.rem_euclid(12) as u32 + 1,
        }
    }

    /// Month shifted by `months` (negative goes back in time)
    pub fn offset(&self, months: i64) -> Self {
        Self::from_ordinal(self.ordinal() + months)
    }

    pub fn next(&self) -> Self {
        self.offset(1)
    }

    pub fn prev(&self) -> Self {
        self.offset(-1)
    }

    /// Number of months from `self` to `later` (negative if `later` is earlier)
    pub fn months_until(&self, later: YearMonth) -> i64 {
        later.ordinal() - self.ordinal()
    }

    pub fn is_december(&self) -> bool {
        self.month == 12
    }

    /// Label such as "Ene 2025"
    pub fn label(&self) -> String {
        format!("{} {}", MONTH_LABELS[(self.month - 1) as usize], self.year)
    }

    /// Compact label such as "Ene 25"
    pub fn short_label(&self) -> String {
        format!(
            "{} {:02}",
            MONTH_LABELS[(self.month - 1) as usize],
            self.year.rem_euclid(100)
        )
    }

    /// First day of the month
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl Default for YearMonth {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_rollover() {
        let dec = YearMonth::new(12, 2024);
        assert_eq!(dec.next(), YearMonth::new(1, 2025));
        assert_eq!(YearMonth::new(1, 2025).prev(), dec);
        assert_eq!(YearMonth::new(13, 2024), YearMonth::new(1, 2025));
        assert_eq!(dec.offset(-24), YearMonth::new(12, 2022));
    }

    #[test]
    fn test_validity() {
        assert!(YearMonth::new(0, 2025).is_valid());
        let raw: YearMonth = serde_json::from_str(r#"{"year":2025,"month":0}"#).unwrap();
        assert!(!raw.is_valid());
        assert!(!YearMonth { year: 2025, month: 13 }.is_valid());
    }

    #[test]
    fn test_ordering_and_distance() {
        let a = YearMonth::new(11, 2024);
        let b = YearMonth::new(2, 2025);
        assert!(a < b);
        assert_eq!(a.months_until(b), 3);
        assert_eq!(b.months_until(a), -3);
    }

    #[test]
    fn test_labels() {
        let m = YearMonth::new(1, 2025);
        assert_eq!(m.label(), "Ene 2025");
        assert_eq!(m.short_label(), "Ene 25");
        assert_eq!(m.to_string(), "01/2025");
        assert_eq!(YearMonth::new(12, 2030).label(), "Dic 2030");
    }

    #[test]
    fn test_from_naive_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 17).unwrap();
        assert_eq!(YearMonth::from(date), YearMonth::new(3, 2025));
        assert_eq!(YearMonth::new(3, 2025).first_day(), NaiveDate::from_ymd_opt(2025, 3, 1));
    }
}
