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

//! Calendar view state and derived display data.
//!
//! The view has two modes: an annual overview with one card per month, and a
//! monthly grid of days. Everything shown is derived from the current
//! [`EventIndex`], the active [`RegionFilter`] and today's date; nothing here
//! ever modifies the index.
//!
//! # Sections
//!
//! * **Summaries**: [`month_summaries`] computes per-month counts and the
//!   "upcoming" flag for the annual cards.
//! * **Grid**: [`month_grid`] lays out the days of a month for the monthly
//!   view.
//! * **State**: [`CalendarView`] holds the mode, cursor and filter, and the
//!   slot of the open editor dialog, if any.

mod event;
mod render;

pub(crate) use event::CalendarAction;

use chrono::NaiveDate;

use crate::{
    model::{
        EventIndex, RegionFilter,
        calendar::{self, DAYS_IN_MONTH},
    },
    util::format::pluralize,
};

/// Number of month cards per row in the annual view.
pub(crate) const CARDS_PER_ROW: u32 = 4;

const DAYS_PER_WEEK: u32 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum ViewMode {
    #[default]
    Annual,
    Monthly,
}

/// Visual treatment of a month card, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CardStyle {
    Proximate,
    HasEvents,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthSummary {
    pub(crate) month: u32,
    pub(crate) name: &'static str,
    pub(crate) days_in_month: u32,
    pub(crate) count: usize,
    pub(crate) proximate: bool,
    pub(crate) style: CardStyle,
}

impl MonthSummary {
    /// The one-line caption shown on the month card.
    pub(crate) fn caption(&self, filter: RegionFilter) -> String {
        let count = self.count;
        match self.style {
            CardStyle::Proximate => {
                format!("EVENTO PRÓXIMO! ({count} {})", pluralize(count, "Evento"))
            }
            CardStyle::HasEvents => format!(
                "{count} {} {}",
                pluralize(count, "Evento"),
                pluralize(count, "Encontrado")
            ),
            CardStyle::Empty => match filter {
                RegionFilter::Only(region) => format!("Sem eventos em {region}"),
                RegionFilter::All => "Enter para agendar eventos".to_string(),
            },
        }
    }
}

/// Visual treatment of a day cell, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DayStyle {
    Today,
    Proximate,
    HasEvents,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DayCell {
    pub(crate) day: u32,
    pub(crate) is_today: bool,
    pub(crate) proximate: bool,
    pub(crate) has_events: bool,
    pub(crate) count: usize,
    pub(crate) style: DayStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthGrid {
    pub(crate) month: u32,
    /// Empty cells before the first day, counting from Sunday.
    pub(crate) leading_blanks: u32,
    pub(crate) days: Vec<DayCell>,
}

impl MonthGrid {
    /// Number of calendar rows (weeks) needed to show the month.
    pub(crate) fn weeks(&self) -> u32 {
        (self.leading_blanks + self.days.len() as u32).div_ceil(DAYS_PER_WEEK)
    }
}

/// Summarises every month of the year for the annual view.
///
/// A month is flagged as proximate when at least one event that passes the
/// filter falls within the proximity window starting today.
pub(crate) fn month_summaries(
    index: &EventIndex,
    filter: RegionFilter,
    today: NaiveDate,
) -> [MonthSummary; 12] {
    std::array::from_fn(|month| {
        let month = month as u32;

        let mut count = 0;
        let mut proximate = false;
        for (day, events) in index.month(month) {
            let matching = events.iter().filter(|e| filter.matches(e.region)).count();
            count += matching;
            if matching > 0 && !proximate {
                proximate = calendar::is_proximate(month, day, today);
            }
        }

        let style = if proximate {
            CardStyle::Proximate
        } else if count > 0 {
            CardStyle::HasEvents
        } else {
            CardStyle::Empty
        };

        MonthSummary {
            month,
            name: calendar::month_name(month),
            days_in_month: DAYS_IN_MONTH[month as usize],
            count,
            proximate,
            style,
        }
    })
}

/// Lays out one month for the monthly view.
///
/// Only days that exist in the month are produced, so stored events on a
/// day past the end of the month never appear in the grid.
pub(crate) fn month_grid(
    index: &EventIndex,
    month: u32,
    filter: RegionFilter,
    today: NaiveDate,
) -> MonthGrid {
    let days_in_month = calendar::days_in_month(month).unwrap_or(0);

    let days = (1..=days_in_month)
        .map(|day| {
            let count = index
                .day(month, day)
                .iter()
                .filter(|e| filter.matches(e.region))
                .count();
            let has_events = count > 0;
            let is_today = calendar::is_today(month, day, today);
            let proximate = has_events && calendar::is_proximate(month, day, today);

            let style = if is_today {
                DayStyle::Today
            } else if proximate {
                DayStyle::Proximate
            } else if has_events {
                DayStyle::HasEvents
            } else {
                DayStyle::Empty
            };

            DayCell {
                day,
                is_today,
                proximate,
                has_events,
                count,
                style,
            }
        })
        .collect();

    MonthGrid {
        month,
        leading_blanks: calendar::first_weekday(month),
        days,
    }
}

/// State of the calendar screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CalendarView {
    pub(crate) mode: ViewMode,
    pub(crate) selected_month: u32,
    pub(crate) filter: RegionFilter,
    pub(crate) cursor_day: u32,
    /// `(month, day)` of the open editor dialog.
    pub(crate) dialog: Option<(u32, u32)>,
}

impl Default for CalendarView {
    fn default() -> Self {
        Self {
            mode: ViewMode::Annual,
            selected_month: 0,
            filter: RegionFilter::All,
            cursor_day: 1,
            dialog: None,
        }
    }
}

impl CalendarView {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Applies a region filter selection.
    ///
    /// Selecting the region that is already active returns to showing all
    /// regions. Any selection made from the monthly view returns to the
    /// annual view.
    pub(crate) fn select_filter(&mut self, selection: RegionFilter) {
        self.filter = self.filter.toggle(selection);
        if self.mode == ViewMode::Monthly {
            self.mode = ViewMode::Annual;
        }
    }

    pub(crate) fn open_month(&mut self, month: u32) {
        if month > 11 {
            return;
        }
        self.selected_month = month;
        self.cursor_day = 1;
        self.mode = ViewMode::Monthly;
    }

    pub(crate) fn back(&mut self) {
        self.mode = ViewMode::Annual;
    }

    /// Opens the editor for the day under the cursor. Only possible from the
    /// monthly view.
    pub(crate) fn open_dialog(&mut self) -> Option<(u32, u32)> {
        if self.mode != ViewMode::Monthly {
            return None;
        }
        let slot = (self.selected_month, self.cursor_day);
        self.dialog = Some(slot);
        Some(slot)
    }

    pub(crate) fn close_dialog(&mut self) {
        self.dialog = None;
    }

    pub(crate) fn is_dialog_open(&self) -> bool {
        self.dialog.is_some()
    }

    /// Moves the cursor horizontally: by one month in the annual view, by one
    /// day in the monthly view.
    pub(crate) fn move_horizontal(&mut self, delta: i32) {
        match self.mode {
            ViewMode::Annual => self.move_month(delta),
            ViewMode::Monthly => self.move_day(delta),
        }
    }

    /// Moves the cursor vertically: by one row of cards in the annual view,
    /// by one week in the monthly view.
    pub(crate) fn move_vertical(&mut self, delta: i32) {
        match self.mode {
            ViewMode::Annual => self.move_month(delta * CARDS_PER_ROW as i32),
            ViewMode::Monthly => self.move_day(delta * DAYS_PER_WEEK as i32),
        }
    }

    fn move_month(&mut self, delta: i32) {
        let target = self.selected_month as i32 + delta;
        if (0..12).contains(&target) {
            self.selected_month = target as u32;
        }
    }

    fn move_day(&mut self, delta: i32) {
        let last = calendar::days_in_month(self.selected_month).unwrap_or(1) as i32;
        self.cursor_day = (self.cursor_day as i32 + delta).clamp(1, last) as u32;
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::model::{CalendarEvent, EventId, Region};

    fn event(id: &str, month_index: u32, day: u32, region: Region) -> CalendarEvent {
        CalendarEvent {
            id: EventId::from(id),
            month_index,
            day,
            text: id.to_string(),
            link: None,
            region,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn march_10() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    #[test]
    fn upcoming_event_flags_its_month() {
        let index = EventIndex::from_events(vec![event("fair", 2, 15, Region::SC)]);

        let summaries = month_summaries(&index, RegionFilter::All, march_10());
        let march = &summaries[2];
        assert_eq!(march.count, 1);
        assert!(march.proximate);
        assert_eq!(march.style, CardStyle::Proximate);
        assert_eq!(march.caption(RegionFilter::All), "EVENTO PRÓXIMO! (1 Evento)");

        let summaries = month_summaries(&index, RegionFilter::Only(Region::RS), march_10());
        let march = &summaries[2];
        assert_eq!(march.count, 0);
        assert!(!march.proximate);
        assert_eq!(march.style, CardStyle::Empty);
        assert_eq!(march.caption(RegionFilter::Only(Region::RS)), "Sem eventos em RS");
    }

    #[test]
    fn distant_events_are_only_counted() {
        let index = EventIndex::from_events(vec![
            event("a", 6, 1, Region::PR),
            event("b", 6, 20, Region::SC),
        ]);

        let summaries = month_summaries(&index, RegionFilter::All, march_10());
        let july = &summaries[6];
        assert_eq!(july.name, "Julho");
        assert_eq!(july.days_in_month, 31);
        assert_eq!(july.style, CardStyle::HasEvents);
        assert_eq!(july.caption(RegionFilter::All), "2 Eventos Encontrados");

        assert_eq!(summaries[0].style, CardStyle::Empty);
        assert_eq!(summaries[0].caption(RegionFilter::All), "Enter para agendar eventos");
    }

    #[test]
    fn past_events_are_not_proximate() {
        let index = EventIndex::from_events(vec![event("old", 2, 9, Region::SC)]);

        let summaries = month_summaries(&index, RegionFilter::All, march_10());
        assert_eq!(summaries[2].style, CardStyle::HasEvents);
        assert_eq!(summaries[2].caption(RegionFilter::All), "1 Evento Encontrado");
    }

    #[test]
    fn march_grid_marks_today_and_upcoming_days() {
        let index = EventIndex::from_events(vec![
            event("fair", 2, 15, Region::SC),
            event("meeting", 2, 10, Region::SC),
            event("late", 2, 25, Region::RS),
        ]);

        let grid = month_grid(&index, 2, RegionFilter::All, march_10());
        assert_eq!(grid.leading_blanks, 0);
        assert_eq!(grid.days.len(), 31);
        assert_eq!(grid.weeks(), 5);

        let day = |d: u32| &grid.days[d as usize - 1];
        assert_eq!(day(10).style, DayStyle::Today);
        assert!(day(10).has_events);
        assert_eq!(day(15).style, DayStyle::Proximate);
        assert_eq!(day(25).style, DayStyle::HasEvents);
        assert_eq!(day(16).style, DayStyle::Empty);

        let grid = month_grid(&index, 2, RegionFilter::Only(Region::RS), march_10());
        assert_eq!(grid.days[14].style, DayStyle::Empty);
        assert_eq!(grid.days[14].count, 0);
        assert_eq!(grid.days[24].count, 1);
    }

    #[test]
    fn grid_starts_on_the_right_weekday() {
        let index = EventIndex::default();

        let january = month_grid(&index, 0, RegionFilter::All, march_10());
        assert_eq!(january.leading_blanks, 4);
        assert_eq!(january.weeks(), 5);

        let february = month_grid(&index, 1, RegionFilter::All, march_10());
        assert_eq!(february.leading_blanks, 0);
        assert_eq!(february.days.len(), 28);
        assert_eq!(february.weeks(), 4);
    }

    #[test]
    fn overflowing_day_is_counted_but_not_drawn() {
        let index = EventIndex::from_events(vec![event("ghost", 1, 30, Region::SC)]);

        let summaries = month_summaries(&index, RegionFilter::All, march_10());
        assert_eq!(summaries[1].count, 1);

        let grid = month_grid(&index, 1, RegionFilter::All, march_10());
        assert!(grid.days.iter().all(|cell| !cell.has_events));
    }

    #[test]
    fn filter_selection_toggles_and_leaves_monthly_view() {
        let mut view = CalendarView::new();

        view.select_filter(RegionFilter::Only(Region::SC));
        assert_eq!(view.filter, RegionFilter::Only(Region::SC));

        view.select_filter(RegionFilter::Only(Region::SC));
        assert_eq!(view.filter, RegionFilter::All);

        view.open_month(4);
        view.select_filter(RegionFilter::Only(Region::PR));
        assert_eq!(view.mode, ViewMode::Annual);
        assert_eq!(view.filter, RegionFilter::Only(Region::PR));
    }

    #[test]
    fn annual_cursor_moves_by_card_rows() {
        let mut view = CalendarView::new();

        view.move_horizontal(1);
        assert_eq!(view.selected_month, 1);
        view.move_vertical(1);
        assert_eq!(view.selected_month, 5);
        view.move_vertical(2);
        assert_eq!(view.selected_month, 5);
        view.move_horizontal(-6);
        assert_eq!(view.selected_month, 5);
        view.move_vertical(-1);
        assert_eq!(view.selected_month, 1);
    }

    #[test]
    fn monthly_cursor_is_clamped_to_the_month() {
        let mut view = CalendarView::new();
        view.open_month(1);

        view.move_horizontal(-1);
        assert_eq!(view.cursor_day, 1);
        view.move_vertical(3);
        assert_eq!(view.cursor_day, 22);
        view.move_vertical(1);
        assert_eq!(view.cursor_day, 28);
    }

    #[test]
    fn dialog_opens_only_from_monthly_view() {
        let mut view = CalendarView::new();
        assert_eq!(view.open_dialog(), None);

        view.open_month(2);
        view.move_horizontal(14);
        assert_eq!(view.open_dialog(), Some((2, 15)));
        assert!(view.is_dialog_open());

        view.close_dialog();
        assert!(!view.is_dialog_open());
    }
}
