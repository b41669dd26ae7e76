//! Roster period.

use chrono::NaiveDate;

/// The calendar range a roster covers, as printed ("DD/MM/YYYY").
///
/// The strings are kept exactly as extracted and are empty when the roster
/// had no date-range line. [`RosterPeriod::start`] and [`RosterPeriod::end`]
/// give checked dates for callers that need them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterPeriod {
    pub start_date: String,
    pub end_date: String,
}

impl RosterPeriod {
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }

    /// True if no date range was found.
    pub fn is_empty(&self) -> bool {
        self.start_date.is_empty() && self.end_date.is_empty()
    }

    /// First day of the roster, if the printed date is a real date.
    pub fn start(&self) -> Option<NaiveDate> {
        parse_roster_date(&self.start_date)
    }

    /// Last day of the roster, if the printed date is a real date.
    pub fn end(&self) -> Option<NaiveDate> {
        parse_roster_date(&self.end_date)
    }
}

fn parse_roster_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%d/%m/%Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_period() {
        let period = RosterPeriod::default();
        assert!(period.is_empty());
        assert_eq!(period.start(), None);
        assert_eq!(period.end(), None);
    }

    #[test]
    fn parses_day_month_year() {
        let period = RosterPeriod::new("01/03/2024", "31/03/2024");
        assert!(!period.is_empty());
        assert_eq!(period.start(), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(period.end(), NaiveDate::from_ymd_opt(2024, 3, 31));
    }

    #[test]
    fn impossible_dates_stay_raw() {
        let period = RosterPeriod::new("31/02/2024", "99/99/9999");
        assert_eq!(period.start_date, "31/02/2024");
        assert_eq!(period.start(), None);
        assert_eq!(period.end(), None);
    }
}
