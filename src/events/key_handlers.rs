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
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use crate::{
    App,
    components::{CalendarAction, EditorIntent},
    events::AppEvent,
    model::NewEvent,
    tasks::AppTask,
};

/// Maps keyboard input to application actions.
///
/// This function acts as the primary input router for the TUI. While the
/// editor dialog is open it receives every key, so that letters are typed
/// rather than interpreted as shortcuts; only Ctrl-C is handled before it.
/// Otherwise keys go to the calendar view first and then to the global
/// shortcuts.
///
/// # Arguments
///
/// * `app` - A mutable reference to the application state.
/// * `key` - The key event captured from the terminal backend.
///
/// # Errors
///
/// Returns an error if a task or event fails to send.
pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if is_interrupt(&key) {
        app.event_tx.send(AppEvent::ExitApplication)?;
        return Ok(());
    }

    let event = Event::Key(key);

    if let Some((month, day)) = app.calendar.dialog {
        let intent = app.editor.process_event(&event, app.index.day(month, day));
        if let Some(intent) = intent {
            handle_editor_intent(app, month, day, intent)?;
        }
        return Ok(());
    }

    if let Some(action) = app.calendar.process_event(&event) {
        match action {
            CalendarAction::OpenDialog { month, day } => {
                log::debug!("editing {}/{}", day, month + 1);
                app.editor.reset();
            }
        }
        return Ok(());
    }

    process_global_key_event(app, key)
}

fn handle_editor_intent(app: &mut App, month: u32, day: u32, intent: EditorIntent) -> Result<()> {
    match intent {
        EditorIntent::Add(draft) => {
            match NewEvent::new(month, day, &draft.text, &draft.link, draft.region) {
                Ok(event) => app.task_tx.send(AppTask::AddEvent(event))?,
                Err(e) => log::warn!("Event not saved: {e}"),
            }
        }
        EditorIntent::Delete(id) => app.task_tx.send(AppTask::DeleteEvent(id))?,
        EditorIntent::Close => app.calendar.close_dialog(),
    }

    Ok(())
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,

        KeyCode::Char('r') => app.task_tx.send(AppTask::LoadEvents)?,

        _ => {}
    }

    Ok(())
}
