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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application: calendar
//! events, the regions they are tagged with, and the filter applied to them
//! when rendering.
//!
//! # Sub-modules
//!
//! * [`calendar`]: Fixed calendar tables (year, month names, day counts) and
//!   date arithmetic.
//! * [`index`]: The month → day lookup built from a flat list of events.

pub(crate) mod calendar;
pub(crate) mod index;

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) use index::EventIndex;

/// Errors raised while building or parsing domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub(crate) enum EventError {
    #[error("Event text must not be empty")]
    EmptyText,
    #[error("Month index out of range: {0}")]
    MonthOutOfRange(u32),
    #[error("Day {day} out of range for month {month_index}")]
    DayOutOfRange { month_index: u32, day: u32 },
    #[error("Unknown region: {0}")]
    UnknownRegion(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub(crate) enum Region {
    #[default]
    SC,
    RS,
    PR,
}

impl Region {
    pub(crate) const ALL: [Region; 3] = [Region::SC, Region::RS, Region::PR];

    pub(crate) const fn code(self) -> &'static str {
        match self {
            Region::SC => "SC",
            Region::RS => "RS",
            Region::PR => "PR",
        }
    }

    pub(crate) const fn name(self) -> &'static str {
        match self {
            Region::SC => "Santa Catarina",
            Region::RS => "Rio Grande do Sul",
            Region::PR => "Paraná",
        }
    }

    /// The region after this one, wrapping around.
    pub(crate) const fn next(self) -> Self {
        match self {
            Region::SC => Region::RS,
            Region::RS => Region::PR,
            Region::PR => Region::SC,
        }
    }

    /// The region before this one, wrapping around.
    pub(crate) const fn previous(self) -> Self {
        match self {
            Region::SC => Region::PR,
            Region::RS => Region::SC,
            Region::PR => Region::RS,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SC" => Ok(Region::SC),
            "RS" => Ok(Region::RS),
            "PR" => Ok(Region::PR),
            other => Err(EventError::UnknownRegion(other.to_string())),
        }
    }
}

/// The region filter applied to the calendar view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum RegionFilter {
    #[default]
    All,
    Only(Region),
}

impl RegionFilter {
    pub(crate) fn matches(self, region: Region) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Only(only) => only == region,
        }
    }

    /// Applies a filter selection on top of the current filter.
    ///
    /// Selecting the region that is already the only active one returns to
    /// [`RegionFilter::All`], anything else replaces the current filter.
    pub(crate) fn toggle(self, selection: RegionFilter) -> Self {
        match selection {
            RegionFilter::Only(region) if self == RegionFilter::Only(region) => RegionFilter::All,
            other => other,
        }
    }
}

/// Opaque, store-assigned event identifier.
///
/// Remote tables may use either text (uuid) or integer primary keys; both are
/// carried as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(from = "RawEventId")]
pub(crate) struct EventId(pub(crate) String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEventId {
    Text(String),
    Number(i64),
}

impl From<RawEventId> for EventId {
    fn from(raw: RawEventId) -> Self {
        match raw {
            RawEventId::Text(text) => Self(text),
            RawEventId::Number(number) => Self(number.to_string()),
        }
    }
}

impl EventId {
    pub(crate) fn new_v4() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A row of the `events` table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub(crate) struct CalendarEvent {
    pub(crate) id: EventId,
    pub(crate) month_index: u32,
    pub(crate) day: u32,
    #[serde(rename = "event_text")]
    pub(crate) text: String,
    #[serde(rename = "event_link")]
    pub(crate) link: Option<String>,
    pub(crate) region: Region,
    pub(crate) created_at: DateTime<Utc>,
}

/// A validated insert request for the `events` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct NewEvent {
    pub(crate) month_index: u32,
    pub(crate) day: u32,
    #[serde(rename = "event_text")]
    pub(crate) text: String,
    #[serde(rename = "event_link")]
    pub(crate) link: Option<String>,
    pub(crate) region: Region,
}

impl NewEvent {
    /// Validates and normalises a new event.
    ///
    /// An empty link is stored as `None` rather than as an empty string, and
    /// the day must exist in the (non-leap) month.
    ///
    /// # Errors
    ///
    /// Returns an [`EventError`] if the text is blank, the month index is not
    /// in `0..=11` or the day is not a day of that month.
    pub(crate) fn new(
        month_index: u32,
        day: u32,
        text: &str,
        link: &str,
        region: Region,
    ) -> Result<Self, EventError> {
        let days = calendar::days_in_month(month_index).ok_or(EventError::MonthOutOfRange(month_index))?;
        if day == 0 || day > days {
            return Err(EventError::DayOutOfRange { month_index, day });
        }

        let text = text.trim();
        if text.is_empty() {
            return Err(EventError::EmptyText);
        }

        let link = link.trim();
        let link = (!link.is_empty()).then(|| link.to_string());

        Ok(Self {
            month_index,
            day,
            text: text.to_string(),
            link,
            region,
        })
    }

    /// Materialises the row a store would hold for this request.
    pub(crate) fn into_event(self, id: EventId, created_at: DateTime<Utc>) -> CalendarEvent {
        CalendarEvent {
            id,
            month_index: self.month_index,
            day: self.day,
            text: self.text,
            link: self.link,
            region: self.region,
            created_at,
        }
    }
}
