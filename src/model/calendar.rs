// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Fixed calendar tables and date arithmetic.
//!
//! The calendar covers a single, hardcoded year. Day counts come from a
//! non-leap table and are never adjusted.

use chrono::{Datelike, NaiveDate, TimeDelta};

pub(crate) const YEAR: i32 = 2026;

/// Events this many days ahead of today (inclusive) are flagged as upcoming.
pub(crate) const PROXIMITY_DAYS: i64 = 7;

pub(crate) const MONTH_NAMES: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho",
    "Julho", "Agosto", "Setembro", "Outubro", "Novembro", "Dezembro",
];

pub(crate) const DAY_NAMES: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];

pub(crate) const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub(crate) fn days_in_month(month_index: u32) -> Option<u32> {
    DAYS_IN_MONTH.get(month_index as usize).copied()
}

pub(crate) fn month_name(month_index: u32) -> &'static str {
    MONTH_NAMES.get(month_index as usize).copied().unwrap_or("?")
}

fn first_of_month(month_index: u32) -> Option<NaiveDate> {
    if month_index > 11 {
        return None;
    }
    NaiveDate::from_ymd_opt(YEAR, month_index + 1, 1)
}

/// Returns the calendar date of `(month_index, day)` in [`YEAR`].
///
/// Days past the end of the month roll over into the following month, so
/// `(1, 30)` is the 2nd of March.
pub(crate) fn event_date(month_index: u32, day: u32) -> Option<NaiveDate> {
    first_of_month(month_index)?.checked_add_signed(TimeDelta::days(i64::from(day) - 1))
}

/// Number of whole days from `today` to the event date; negative in the past.
pub(crate) fn days_until(month_index: u32, day: u32, today: NaiveDate) -> Option<i64> {
    event_date(month_index, day).map(|date| (date - today).num_days())
}

pub(crate) fn is_proximate(month_index: u32, day: u32, today: NaiveDate) -> bool {
    days_until(month_index, day, today).is_some_and(|diff| (0..=PROXIMITY_DAYS).contains(&diff))
}

pub(crate) fn is_today(month_index: u32, day: u32, today: NaiveDate) -> bool {
    today.year() == YEAR && today.month0() == month_index && today.day() == day
}

/// Weekday of the first of the month, counting from Sunday as zero.
pub(crate) fn first_weekday(month_index: u32) -> u32 {
    first_of_month(month_index)
        .map(|date| date.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

/// Formats a slot as e.g. `"Dom, 15 de Março de 2026"`.
pub(crate) fn long_date(month_index: u32, day: u32) -> String {
    let weekday = event_date(month_index, day)
        .map(|date| DAY_NAMES[date.weekday().num_days_from_sunday() as usize])
        .unwrap_or("?");

    format!("{}, {} de {} de {}", weekday, day, month_name(month_index), YEAR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn proximity_window_is_inclusive() {
        let today = date(2026, 3, 10);

        assert!(is_proximate(2, 10, today));
        assert!(is_proximate(2, 17, today));
        assert!(!is_proximate(2, 18, today));
        assert!(!is_proximate(2, 9, today));
    }

    #[test]
    fn proximity_spans_month_boundaries() {
        let today = date(2026, 1, 28);

        assert_eq!(days_until(1, 3, today), Some(6));
        assert!(is_proximate(1, 3, today));
    }

    #[test]
    fn overflowing_days_roll_into_next_month() {
        assert_eq!(event_date(1, 30), Some(date(2026, 3, 2)));
        assert_eq!(event_date(12, 1), None);
    }

    #[test]
    fn today_requires_the_fixed_year() {
        assert!(is_today(2, 10, date(2026, 3, 10)));
        assert!(!is_today(2, 10, date(2027, 3, 10)));
        assert!(!is_today(2, 11, date(2026, 3, 10)));
    }

    #[test]
    fn first_weekday_counts_from_sunday() {
        // 2026-01-01 is a Thursday, 2026-03-01 a Sunday.
        assert_eq!(first_weekday(0), 4);
        assert_eq!(first_weekday(2), 0);
        assert_eq!(first_weekday(1), 0);
    }

    #[test]
    fn long_date_names_weekday_and_month() {
        assert_eq!(long_date(2, 15), "Dom, 15 de Março de 2026");
    }
}
