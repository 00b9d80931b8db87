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

//! Month → day event lookup.
//!
//! The index is rebuilt from the complete row set after every fetch and is
//! never patched in place, so two refetches of the same rows always produce
//! the same index regardless of the order in which they complete.

use std::collections::BTreeMap;

use crate::model::{CalendarEvent, Region};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct EventIndex {
    months: BTreeMap<u32, BTreeMap<u32, Vec<CalendarEvent>>>,
}

/// Unfiltered event totals per region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct RegionalCounts {
    pub(crate) sc: usize,
    pub(crate) rs: usize,
    pub(crate) pr: usize,
}

impl RegionalCounts {
    pub(crate) fn get(&self, region: Region) -> usize {
        match region {
            Region::SC => self.sc,
            Region::RS => self.rs,
            Region::PR => self.pr,
        }
    }

    fn increment(&mut self, region: Region) {
        match region {
            Region::SC => self.sc += 1,
            Region::RS => self.rs += 1,
            Region::PR => self.pr += 1,
        }
    }
}

impl EventIndex {
    /// Buckets events by month index and then by day.
    ///
    /// Events sharing a `(month, day)` slot keep their input order.
    pub(crate) fn from_events(events: impl IntoIterator<Item = CalendarEvent>) -> Self {
        let mut months: BTreeMap<u32, BTreeMap<u32, Vec<CalendarEvent>>> = BTreeMap::new();

        for event in events {
            months
                .entry(event.month_index)
                .or_default()
                .entry(event.day)
                .or_default()
                .push(event);
        }

        Self { months }
    }

    /// Events in the given slot; an empty slice when there are none.
    pub(crate) fn day(&self, month_index: u32, day: u32) -> &[CalendarEvent] {
        self.months
            .get(&month_index)
            .and_then(|days| days.get(&day))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Non-empty days of a month in ascending day order.
    pub(crate) fn month(&self, month_index: u32) -> impl Iterator<Item = (u32, &[CalendarEvent])> {
        self.months
            .get(&month_index)
            .into_iter()
            .flat_map(|days| days.iter().map(|(day, events)| (*day, events.as_slice())))
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &CalendarEvent> {
        self.months.values().flat_map(|days| days.values().flatten())
    }

    #[cfg(test)]
    pub(crate) fn into_events(self) -> Vec<CalendarEvent> {
        self.months
            .into_values()
            .flat_map(|days| days.into_values().flatten())
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.iter().count()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub(crate) fn regional_counts(&self) -> RegionalCounts {
        let mut counts = RegionalCounts::default();
        for event in self.iter() {
            counts.increment(event.region);
        }
        counts
    }
}
