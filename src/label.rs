//! Human-readable labels for a [`DateRange`].

use chrono::{Local, NaiveDate};

use crate::types::DateRange;

pub const TODAY: &str = "Σήμερα";
pub const YESTERDAY: &str = "Χθες";

/// Formats a date the way the Greek locale writes short dates, e.g. `18/4/2025`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d/%-m/%Y").to_string()
}

/// Labels `range` relative to `today`.
///
/// | Range                      | Label                          |
/// |----------------------------|--------------------------------|
/// | single day, today          | `Σήμερα`                       |
/// | single day, yesterday      | `Χθες`                         |
/// | other single day           | the formatted date             |
/// | span of 1 to 7 days        | `Τελευταίες {span + 1} ημέρες`  |
/// | span of 8 to 30 days       | `Τελευταίες {weeks} εβδομάδες`  |
/// | longer                     | `{from} - {to}`                |
pub fn format_date_range_label(range: &DateRange, today: NaiveDate) -> String {
    if range.from == range.to {
        return if range.from == today {
            TODAY.to_string()
        } else if Some(range.from) == today.pred_opt() {
            YESTERDAY.to_string()
        } else {
            format_date(range.from)
        };
    }

    let span = range.span_days();
    if span <= 7 {
        format!("Τελευταίες {} ημέρες", span + 1)
    } else if span <= 30 {
        // ceil(span / 7)
        format!("Τελευταίες {} εβδομάδες", (span + 6) / 7)
    } else {
        format!("{} - {}", format_date(range.from), format_date(range.to))
    }
}

/// [`format_date_range_label`] against the local wall-clock date.
pub fn format_date_range_label_now(range: &DateRange) -> String {
    format_date_range_label(range, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range(from: NaiveDate, to: NaiveDate) -> DateRange {
        DateRange { from, to }
    }

    #[test]
    fn test_today() {
        let today = date(2025, 3, 1);
        assert_eq!(format_date_range_label(&range(today, today), today), TODAY);
    }

    #[test]
    fn test_yesterday_across_month_boundary() {
        let today = date(2025, 3, 1);
        let yesterday = date(2025, 2, 28);
        assert_eq!(
            format_date_range_label(&range(yesterday, yesterday), today),
            YESTERDAY
        );
    }

    #[test]
    fn test_other_single_day() {
        let today = date(2025, 3, 1);
        let day = date(2025, 1, 5);
        assert_eq!(format_date_range_label(&range(day, day), today), "5/1/2025");
    }

    #[test]
    fn test_last_days() {
        let today = date(2025, 3, 10);
        let week = DateRange::last_days(today, 6).unwrap();
        assert_eq!(format_date_range_label(&week, today), "Τελευταίες 7 ημέρες");

        let eight = DateRange::last_days(today, 7).unwrap();
        assert_eq!(format_date_range_label(&eight, today), "Τελευταίες 8 ημέρες");

        let two = DateRange::last_days(today, 1).unwrap();
        assert_eq!(format_date_range_label(&two, today), "Τελευταίες 2 ημέρες");
    }

    #[test]
    fn test_last_weeks() {
        let today = date(2025, 3, 31);
        let r = DateRange::last_days(today, 8).unwrap();
        assert_eq!(format_date_range_label(&r, today), "Τελευταίες 2 εβδομάδες");

        let month = DateRange::last_days(today, 30).unwrap();
        assert_eq!(format_date_range_label(&month, today), "Τελευταίες 5 εβδομάδες");
    }

    #[test]
    fn test_explicit_range() {
        let today = date(2025, 6, 1);
        let r = range(date(2025, 1, 1), date(2025, 3, 1));
        assert_eq!(format_date_range_label(&r, today), "1/1/2025 - 1/3/2025");
    }
}
