//! Month arithmetic for the calendar grid

use chrono::{Datelike, Months, NaiveDate};

/// The displayed month: its first day plus every day up to the last one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    first: NaiveDate,
    days: Vec<NaiveDate>,
}

impl MonthView {
    /// Month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        let first = first_of_month(date);
        Self {
            first,
            days: days_in_month(first),
        }
    }

    #[cfg(test)]
    pub fn first(&self) -> NaiveDate {
        self.first
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn day(&self, index: usize) -> Option<NaiveDate> {
        self.days.get(index).copied()
    }

    /// Column index of `date`, if it falls in this month
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        if date.year() == self.first.year() && date.month() == self.first.month() {
            Some(date.day0() as usize)
        } else {
            None
        }
    }

    /// Shift by `delta` months (negative goes back)
    pub fn shifted(&self, delta: i32) -> Self {
        Self::containing(shift_month(self.first, delta))
    }

    /// Header text, e.g. "March 2025"
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Every day of the month starting at `first`, in order
pub fn days_in_month(first: NaiveDate) -> Vec<NaiveDate> {
    let first = first_of_month(first);
    first
        .iter_days()
        .take_while(|d| d.month() == first.month())
        .collect()
}

/// Move a date by whole months, saturating at the representable range
pub fn shift_month(date: NaiveDate, delta: i32) -> NaiveDate {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    };
    shifted.unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_lists_every_day() {
        let view = MonthView::containing(ymd(2025, 3, 17));
        assert_eq!(view.first(), ymd(2025, 3, 1));
        assert_eq!(view.days().len(), 31);
        assert_eq!(view.days()[0], ymd(2025, 3, 1));
        assert_eq!(*view.days().last().unwrap(), ymd(2025, 3, 31));
    }

    #[test]
    fn february_respects_leap_years() {
        assert_eq!(days_in_month(ymd(2024, 2, 1)).len(), 29);
        assert_eq!(days_in_month(ymd(2025, 2, 1)).len(), 28);
        assert_eq!(days_in_month(ymd(1900, 2, 1)).len(), 28);
        assert_eq!(days_in_month(ymd(2000, 2, 1)).len(), 29);
    }

    #[test]
    fn shifting_crosses_year_boundaries() {
        let jan = MonthView::containing(ymd(2025, 1, 31));
        assert_eq!(jan.shifted(-1).first(), ymd(2024, 12, 1));
        assert_eq!(jan.shifted(1).first(), ymd(2025, 2, 1));
        assert_eq!(jan.shifted(12).first(), ymd(2026, 1, 1));
    }

    #[test]
    fn index_of_only_matches_same_month() {
        let view = MonthView::containing(ymd(2025, 4, 1));
        assert_eq!(view.index_of(ymd(2025, 4, 1)), Some(0));
        assert_eq!(view.index_of(ymd(2025, 4, 30)), Some(29));
        assert_eq!(view.index_of(ymd(2024, 4, 10)), None);
        assert_eq!(view.index_of(ymd(2025, 5, 1)), None);
        assert_eq!(view.day(30), None);
    }

    #[test]
    fn title_uses_full_month_name() {
        assert_eq!(MonthView::containing(ymd(2025, 9, 3)).title(), "September 2025");
    }
}
