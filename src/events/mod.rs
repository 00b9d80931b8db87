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

//! Application logic, event handling, and task dispatching.
//!
//! This module acts as the central hub for the "Controller" logic of the
//! application. It organizes how various inputs are translated into internal
//! state changes.
//!
//! # Organization
//!
//! * [`AppEvent`]: Everything the main loop reacts to: keyboard input, results
//!   reported by the task worker, store change notifications and ticks.
//! * `handlers`: Applies task results and notifications to the application
//!   state.
//! * `key_handlers`: Routes key presses to the editor dialog when it is open,
//!   otherwise to the calendar and the global shortcuts.

mod handlers;
mod key_handlers;

use handlers::*;
use key_handlers::process_key_event;

use std::io::Stdout;

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{App, model::CalendarEvent, render::draw, store::StoreChange};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    EventsLoaded(Vec<CalendarEvent>),
    LoadFailed(String),
    EventAdded(CalendarEvent),

    StoreChanged(StoreChange),

    Tick,

    ExitApplication,
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until an exit event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        handle_event(app, event)?;

        terminal.draw(|f| draw(f, app))?;
    }
    Ok(())
}

/// Applies a single event to the application state.
pub(crate) fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => process_key_event(app, key)?,
        AppEvent::EventsLoaded(rows) => handle_events_loaded(app, rows),
        AppEvent::LoadFailed(message) => handle_load_failed(app, message),
        AppEvent::EventAdded(event) => handle_event_added(app, &event),
        AppEvent::StoreChanged(change) => handle_store_changed(app, change)?,
        AppEvent::Tick => handle_tick(app),
        AppEvent::ExitApplication => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver};

    use chrono::{TimeZone, Utc};
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::{
        components::ViewMode,
        model::{EventId, Region},
        tasks::AppTask,
    };

    fn app() -> (App, Receiver<AppTask>) {
        let (task_tx, task_rx) = mpsc::channel();
        (App::new(task_tx), task_rx)
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))).unwrap();
    }

    fn row(id: &str, month_index: u32, day: u32) -> CalendarEvent {
        CalendarEvent {
            id: EventId::from(id),
            month_index,
            day,
            text: id.to_string(),
            link: None,
            region: Region::SC,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    /// Opens the editor dialog on the 1st of January.
    fn open_dialog(app: &mut App) {
        press(app, KeyCode::Enter);
        press(app, KeyCode::Enter);
        assert_eq!(app.calendar.dialog, Some((0, 1)));
    }

    #[test]
    fn loaded_rows_replace_the_index_and_clear_errors() {
        let (mut app, _tasks) = app();
        app.load_error = Some("failed".to_string());
        assert!(app.loading);

        handle_event(&mut app, AppEvent::EventsLoaded(vec![row("a", 2, 15)])).unwrap();
        assert!(!app.loading);
        assert_eq!(app.index.day(2, 15).len(), 1);
        assert_eq!(app.load_error, None);

        handle_event(&mut app, AppEvent::EventsLoaded(vec![])).unwrap();
        assert!(app.index.is_empty());
    }

    #[test]
    fn failed_load_keeps_the_calendar_usable() {
        let (mut app, _tasks) = app();

        handle_event(&mut app, AppEvent::LoadFailed("Erro".to_string())).unwrap();
        assert_eq!(app.load_error.as_deref(), Some("Erro"));
        assert!(!app.loading);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.calendar.mode, ViewMode::Monthly);
    }

    #[test]
    fn store_changes_trigger_a_refetch() {
        let (mut app, tasks) = app();

        handle_event(&mut app, AppEvent::StoreChanged(StoreChange::Changed)).unwrap();
        assert!(matches!(tasks.try_recv(), Ok(AppTask::LoadEvents)));
    }

    #[test]
    fn saving_in_the_dialog_queues_an_insert() {
        let (mut app, tasks) = app();
        open_dialog(&mut app);

        for c in "Feira".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        match tasks.try_recv() {
            Ok(AppTask::AddEvent(event)) => {
                assert_eq!((event.month_index, event.day), (0, 1));
                assert_eq!(event.text, "Feira");
                assert_eq!(event.link, None);
                assert_eq!(event.region, Region::SC);
            }
            other => panic!("unexpected task: {other:?}"),
        }

        // The dialog stays open until the insert is confirmed.
        assert!(app.calendar.is_dialog_open());
        handle_event(&mut app, AppEvent::EventAdded(row("new", 0, 1))).unwrap();
        assert!(!app.calendar.is_dialog_open());
    }

    #[test]
    fn keys_go_to_the_dialog_while_it_is_open() {
        let (mut app, _tasks) = app();
        open_dialog(&mut app);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.event_rx.try_recv().is_err());
        assert_eq!(app.editor.text.value(), "q");

        press(&mut app, KeyCode::Esc);
        assert!(!app.calendar.is_dialog_open());
        assert_eq!(app.calendar.mode, ViewMode::Monthly);

        press(&mut app, KeyCode::Char('q'));
        assert!(matches!(app.event_rx.try_recv(), Ok(AppEvent::ExitApplication)));
    }

    #[test]
    fn ctrl_c_quits_even_while_the_dialog_is_open() {
        let (mut app, _tasks) = app();
        open_dialog(&mut app);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        handle_event(&mut app, AppEvent::Key(ctrl_c)).unwrap();

        assert!(matches!(app.event_rx.try_recv(), Ok(AppEvent::ExitApplication)));
        assert_eq!(app.editor.text.value(), "");
    }

    #[test]
    fn deleting_in_the_dialog_queues_a_delete() {
        let (mut app, tasks) = app();
        handle_event(&mut app, AppEvent::EventsLoaded(vec![row("only", 0, 1)])).unwrap();
        open_dialog(&mut app);

        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::Delete);

        assert!(matches!(tasks.try_recv(), Ok(AppTask::DeleteEvent(id)) if id == EventId::from("only")));
    }

    #[test]
    fn reload_key_queues_a_load() {
        let (mut app, tasks) = app();

        press(&mut app, KeyCode::Char('r'));
        assert!(matches!(tasks.try_recv(), Ok(AppTask::LoadEvents)));
    }
}
