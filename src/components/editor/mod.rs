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

//! Event editor dialog.
//!
//! A small form for one calendar day: a required description, an optional
//! link and a region, above the list of events already scheduled on that
//! day. The editor never talks to the store itself; it reports what the user
//! asked for as an [`EditorIntent`] and leaves the rest to the application.

mod event;
mod render;

use ratatui::widgets::ListState;
use tui_input::Input;

use crate::model::{CalendarEvent, EventId, Region};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum EditorField {
    #[default]
    Text,
    Link,
    Region,
    Existing,
}

impl EditorField {
    fn next(self, has_existing: bool) -> Self {
        match self {
            EditorField::Text => EditorField::Link,
            EditorField::Link => EditorField::Region,
            EditorField::Region if has_existing => EditorField::Existing,
            EditorField::Region | EditorField::Existing => EditorField::Text,
        }
    }

    fn previous(self, has_existing: bool) -> Self {
        match self {
            EditorField::Text if has_existing => EditorField::Existing,
            EditorField::Text => EditorField::Region,
            EditorField::Link => EditorField::Text,
            EditorField::Region => EditorField::Link,
            EditorField::Existing => EditorField::Region,
        }
    }
}

/// The form contents at the time it was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EventDraft {
    pub(crate) text: String,
    pub(crate) link: String,
    pub(crate) region: Region,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EditorIntent {
    Add(EventDraft),
    Delete(EventId),
    Close,
}

pub(crate) struct EventEditor {
    pub(crate) text: Input,
    pub(crate) link: Input,
    pub(crate) region: Region,
    pub(crate) focus: EditorField,
    pub(crate) selected_existing: ListState,
}

impl Default for EventEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl EventEditor {
    pub(crate) fn new() -> Self {
        Self {
            text: Input::default(),
            link: Input::default(),
            region: Region::default(),
            focus: EditorField::default(),
            selected_existing: ListState::default(),
        }
    }

    /// Resets the whole dialog, ready to be shown for a new day.
    pub(crate) fn reset(&mut self) {
        self.clear_form();
        self.focus = EditorField::Text;
        self.selected_existing.select(None);
    }

    /// Clears the form fields; the region goes back to its default.
    fn clear_form(&mut self) {
        self.text.reset();
        self.link.reset();
        self.region = Region::default();
    }

    /// Takes the form contents if the description is not blank, clearing
    /// the form.
    fn submit(&mut self) -> Option<EventDraft> {
        let text = self.text.value().trim();
        if text.is_empty() {
            return None;
        }

        let draft = EventDraft {
            text: text.to_string(),
            link: self.link.value().trim().to_string(),
            region: self.region,
        };
        self.clear_form();

        Some(draft)
    }

    fn cycle_focus(&mut self, forward: bool, existing: &[CalendarEvent]) {
        let has_existing = !existing.is_empty();
        self.focus = if forward {
            self.focus.next(has_existing)
        } else {
            self.focus.previous(has_existing)
        };

        if self.focus == EditorField::Existing && self.selected_existing.selected().is_none() {
            self.selected_existing.select(Some(0));
        }
    }

    fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.selected_existing.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.selected_existing.select(Some(i));
    }

    fn select_previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = self.selected_existing.selected().map_or(0, |i| i.saturating_sub(1));
        self.selected_existing.select(Some(i));
    }

    /// Keeps the selection and focus valid after the list of existing events
    /// changes underneath the dialog.
    pub(crate) fn sync_existing(&mut self, len: usize) {
        match self.selected_existing.selected() {
            _ if len == 0 => {
                self.selected_existing.select(None);
                if self.focus == EditorField::Existing {
                    self.focus = EditorField::Text;
                }
            }
            Some(i) if i >= len => self.selected_existing.select(Some(len - 1)),
            _ => {}
        }
    }

    fn selected_id(&self, existing: &[CalendarEvent]) -> Option<EventId> {
        self.selected_existing
            .selected()
            .and_then(|i| existing.get(i))
            .map(|event| event.id.clone())
    }
}
