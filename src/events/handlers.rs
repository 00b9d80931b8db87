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

use anyhow::Result;
use chrono::Local;

use crate::{
    App,
    model::{CalendarEvent, EventIndex},
    store::StoreChange,
    tasks::AppTask,
};

pub(super) fn handle_events_loaded(app: &mut App, rows: Vec<CalendarEvent>) {
    app.index = EventIndex::from_events(rows);
    app.loading = false;
    app.load_error = None;

    if let Some((month, day)) = app.calendar.dialog {
        app.editor.sync_existing(app.index.day(month, day).len());
    }
}

pub(super) fn handle_load_failed(app: &mut App, message: String) {
    app.loading = false;
    app.load_error = Some(message);
}

pub(super) fn handle_event_added(app: &mut App, event: &CalendarEvent) {
    if app.calendar.dialog == Some((event.month_index, event.day)) {
        app.calendar.close_dialog();
    }
}

pub(super) fn handle_store_changed(app: &mut App, change: StoreChange) -> Result<()> {
    log::debug!("store changed: {change:?}");
    app.task_tx.send(AppTask::LoadEvents)?;

    Ok(())
}

pub(super) fn handle_tick(app: &mut App) {
    app.today = Local::now().date_naive();
}
