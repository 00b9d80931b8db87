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

use crossterm::event::{Event, KeyCode};

use crate::{
    components::calendar::{CalendarView, ViewMode},
    model::{Region, RegionFilter},
};

/// Outcomes of calendar input that the application must act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CalendarAction {
    OpenDialog { month: u32, day: u32 },
}

impl CalendarView {
    pub(crate) fn process_event(&mut self, event: &Event) -> Option<CalendarAction> {
        let Event::Key(key_event) = event else {
            return None;
        };

        match key_event.code {
            KeyCode::Char('h') | KeyCode::Left => self.move_horizontal(-1),
            KeyCode::Char('l') | KeyCode::Right => self.move_horizontal(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_vertical(-1),
            KeyCode::Char('j') | KeyCode::Down => self.move_vertical(1),

            // Region filter
            KeyCode::Char('0') => self.select_filter(RegionFilter::All),
            KeyCode::Char('1') => self.select_filter(RegionFilter::Only(Region::SC)),
            KeyCode::Char('2') => self.select_filter(RegionFilter::Only(Region::RS)),
            KeyCode::Char('3') => self.select_filter(RegionFilter::Only(Region::PR)),

            KeyCode::Esc | KeyCode::Backspace => self.back(),

            KeyCode::Enter => match self.mode {
                ViewMode::Annual => self.open_month(self.selected_month),
                ViewMode::Monthly => {
                    return self
                        .open_dialog()
                        .map(|(month, day)| CalendarAction::OpenDialog { month, day });
                }
            },

            _ => {}
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn press(view: &mut CalendarView, code: KeyCode) -> Option<CalendarAction> {
        view.process_event(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    #[test]
    fn enter_opens_month_then_dialog() {
        let mut view = CalendarView::new();

        press(&mut view, KeyCode::Right);
        press(&mut view, KeyCode::Right);
        assert_eq!(press(&mut view, KeyCode::Enter), None);
        assert_eq!(view.mode, ViewMode::Monthly);
        assert_eq!(view.selected_month, 2);

        press(&mut view, KeyCode::Down);
        assert_eq!(
            press(&mut view, KeyCode::Enter),
            Some(CalendarAction::OpenDialog { month: 2, day: 8 })
        );
    }

    #[test]
    fn escape_returns_to_annual_view() {
        let mut view = CalendarView::new();
        view.open_month(3);

        press(&mut view, KeyCode::Esc);
        assert_eq!(view.mode, ViewMode::Annual);
        assert_eq!(view.selected_month, 3);
    }

    #[test]
    fn number_keys_select_region_filter() {
        let mut view = CalendarView::new();

        press(&mut view, KeyCode::Char('2'));
        assert_eq!(view.filter, RegionFilter::Only(Region::RS));
        press(&mut view, KeyCode::Char('2'));
        assert_eq!(view.filter, RegionFilter::All);
        press(&mut view, KeyCode::Char('3'));
        press(&mut view, KeyCode::Char('0'));
        assert_eq!(view.filter, RegionFilter::All);
    }
}
