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

use crossterm::event::{Event, KeyCode, KeyModifiers};
use tui_input::backend::crossterm::EventHandler;

use crate::{
    components::editor::{EditorField, EditorIntent, EventEditor},
    model::CalendarEvent,
};

impl EventEditor {
    /// Handles one input event while the dialog is open.
    ///
    /// `existing` is the current list of events on the dialog's day, as
    /// shown below the form.
    pub(crate) fn process_event(
        &mut self,
        event: &Event,
        existing: &[CalendarEvent],
    ) -> Option<EditorIntent> {
        let Event::Key(key_event) = event else {
            return None;
        };

        self.sync_existing(existing.len());

        // Keys that behave the same whichever field has focus
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Esc, _) => return Some(EditorIntent::Close),
            (KeyCode::BackTab, _) | (KeyCode::Tab, KeyModifiers::SHIFT) => {
                self.cycle_focus(false, existing);
                return None;
            }
            (KeyCode::Tab, _) => {
                self.cycle_focus(true, existing);
                return None;
            }
            _ => {}
        }

        match self.focus {
            EditorField::Text | EditorField::Link => match key_event.code {
                KeyCode::Enter => self.submit().map(EditorIntent::Add),
                _ => {
                    let input = if self.focus == EditorField::Text {
                        &mut self.text
                    } else {
                        &mut self.link
                    };
                    input.handle_event(event);
                    None
                }
            },

            EditorField::Region => match key_event.code {
                KeyCode::Left | KeyCode::Char('h') => {
                    self.region = self.region.previous();
                    None
                }
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                    self.region = self.region.next();
                    None
                }
                KeyCode::Enter => self.submit().map(EditorIntent::Add),
                _ => None,
            },

            EditorField::Existing => match key_event.code {
                KeyCode::Down | KeyCode::Char('j') => {
                    self.select_next(existing.len());
                    None
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.select_previous(existing.len());
                    None
                }
                KeyCode::Delete | KeyCode::Char('d') | KeyCode::Char('x') => {
                    self.selected_id(existing).map(EditorIntent::Delete)
                }
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use crossterm::event::KeyEvent;

    use super::*;
    use crate::{
        components::editor::EventDraft,
        model::{EventId, Region},
    };

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(editor: &mut EventEditor, text: &str) {
        for c in text.chars() {
            assert_eq!(editor.process_event(&key(KeyCode::Char(c)), &[]), None);
        }
    }

    fn existing(ids: &[&str]) -> Vec<CalendarEvent> {
        ids.iter()
            .map(|id| CalendarEvent {
                id: EventId::from(*id),
                month_index: 2,
                day: 15,
                text: id.to_string(),
                link: None,
                region: Region::RS,
                created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            })
            .collect()
    }

    #[test]
    fn filling_the_form_produces_an_add_intent() {
        let mut editor = EventEditor::new();

        type_text(&mut editor, "Feira");
        editor.process_event(&key(KeyCode::Tab), &[]);
        type_text(&mut editor, "https://x.y");
        editor.process_event(&key(KeyCode::Tab), &[]);
        editor.process_event(&key(KeyCode::Right), &[]);
        editor.process_event(&key(KeyCode::Right), &[]);

        let intent = editor.process_event(&key(KeyCode::Enter), &[]);
        assert_eq!(
            intent,
            Some(EditorIntent::Add(EventDraft {
                text: "Feira".to_string(),
                link: "https://x.y".to_string(),
                region: Region::PR,
            }))
        );

        // The form is ready for another entry.
        assert_eq!(editor.text.value(), "");
        assert_eq!(editor.region, Region::SC);
    }

    #[test]
    fn enter_without_text_does_nothing() {
        let mut editor = EventEditor::new();
        type_text(&mut editor, "  ");

        assert_eq!(editor.process_event(&key(KeyCode::Enter), &[]), None);
    }

    #[test]
    fn letters_are_typed_not_interpreted() {
        let mut editor = EventEditor::new();
        type_text(&mut editor, "dxjq");

        assert_eq!(editor.text.value(), "dxjq");
    }

    #[test]
    fn delete_targets_the_selected_existing_event() {
        let mut editor = EventEditor::new();
        let rows = existing(&["a", "b"]);

        editor.process_event(&key(KeyCode::BackTab), &rows);
        assert_eq!(editor.focus, EditorField::Existing);
        editor.process_event(&key(KeyCode::Down), &rows);

        assert_eq!(
            editor.process_event(&key(KeyCode::Char('d')), &rows),
            Some(EditorIntent::Delete(EventId::from("b")))
        );
    }

    #[test]
    fn escape_closes_from_any_field() {
        let mut editor = EventEditor::new();
        assert_eq!(editor.process_event(&key(KeyCode::Esc), &[]), Some(EditorIntent::Close));

        editor.process_event(&key(KeyCode::Tab), &[]);
        editor.process_event(&key(KeyCode::Tab), &[]);
        assert_eq!(editor.focus, EditorField::Region);
        assert_eq!(editor.process_event(&key(KeyCode::Esc), &[]), Some(EditorIntent::Close));
    }
}
