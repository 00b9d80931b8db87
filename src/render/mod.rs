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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called after
//! every application event. The screen is split into a header with the region
//! filter, an optional error banner, the calendar itself (or a placeholder
//! until the first load completes) and a one-line key help. The event editor, when open, is drawn last as a centered overlay.

mod footer;
mod header;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Paragraph},
};

use crate::{
    App,
    render::{footer::draw_footer, header::draw_header},
    theme::Theme,
};

const LOADING_MESSAGE: &str = "Carregando calendário...";

const DIALOG_WIDTH: u16 = 72;
const DIALOG_HEIGHT: u16 = 28;

pub(crate) trait Render {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme);
}

/// Renders the user interface to the terminal frame.
///
/// # Arguments
///
/// * `f` - The current terminal frame used for drawing.
/// * `app` - A mutable reference to the application state; the editor keeps
///   its list selection and input cursor state across frames.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    f.render_widget(
        Block::default().style(
            Style::default()
                .bg(app.theme.background_colour)
                .fg(app.theme.text_colour),
        ),
        area,
    );

    let banner_height = u16::from(app.load_error.is_some());

    // Outer layout: header, banner, calendar, footer
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(banner_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(f, outer[0], app);

    if let Some(message) = &app.load_error {
        let banner = Paragraph::new(format!(" {message}")).style(
            Style::default()
                .fg(app.theme.error_colour)
                .add_modifier(Modifier::BOLD),
        );
        f.render_widget(banner, outer[1]);
    }

    if app.loading {
        draw_loading(f, outer[2], &app.theme);
    } else {
        app.calendar
            .as_panel(&app.index, app.today)
            .draw(f, outer[2], &app.theme);
    }

    draw_footer(f, outer[3], app);

    if let Some((month, day)) = app.calendar.dialog {
        let dialog_area = centered_rect(area, DIALOG_WIDTH, DIALOG_HEIGHT);
        app.editor
            .as_dialog(month, day, app.index.day(month, day))
            .draw(f, dialog_area, &app.theme);
    }
}

fn draw_loading(f: &mut Frame, area: Rect, theme: &Theme) {
    let [_, line, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);

    let placeholder = Paragraph::new(LOADING_MESSAGE)
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.muted_colour));
    f.render_widget(placeholder, line);
}

/// Centers a rectangle of at most `width` x `height` inside `area`.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use chrono::{TimeZone, Utc};
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    use super::*;
    use crate::model::{CalendarEvent, EventId, EventIndex, Region};

    fn screen(buffer: &Buffer) -> String {
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        screen(terminal.backend().buffer())
    }

    fn app_with_event() -> App {
        let (task_tx, _task_rx) = mpsc::channel();
        let mut app = App::new(task_tx);
        app.loading = false;
        app.index = EventIndex::from_events(vec![CalendarEvent {
            id: EventId::from("1"),
            month_index: 4,
            day: 20,
            text: "Encontro".to_string(),
            link: None,
            region: Region::RS,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }]);
        app
    }

    #[test]
    fn centered_rect_fits_small_areas() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_rect(area, 72, 28), area);
        assert_eq!(centered_rect(Rect::new(0, 0, 100, 40), 72, 28), Rect::new(14, 6, 72, 28));
    }

    #[test]
    fn calendar_is_replaced_by_placeholder_until_first_load() {
        let (task_tx, _task_rx) = mpsc::channel();
        let mut app = App::new(task_tx);

        let text = render(&mut app);
        assert!(text.contains("Carregando calendário..."));
        assert!(!text.contains("Janeiro"));

        app.loading = false;
        let text = render(&mut app);
        assert!(!text.contains("Carregando calendário..."));
        assert!(text.contains("Janeiro"));
    }

    #[test]
    fn header_shows_filter_and_counts() {
        let mut app = app_with_event();
        let text = render(&mut app);

        assert!(text.contains("Todas as Regiões"));
        assert!(text.contains("SC: 0"));
        assert!(text.contains("RS: 1"));
        assert!(text.contains("PR: 0"));
    }

    #[test]
    fn load_error_is_shown_as_banner() {
        let mut app = app_with_event();
        app.load_error = Some("Erro ao carregar eventos.".to_string());

        assert!(render(&mut app).contains("Erro ao carregar eventos."));
    }

    #[test]
    fn open_dialog_is_drawn_over_the_calendar() {
        let mut app = app_with_event();
        app.calendar.open_month(4);
        app.calendar.cursor_day = 20;
        app.calendar.open_dialog();

        let text = render(&mut app);
        assert!(text.contains("Adicionar Novo Evento"));
        assert!(text.contains("Encontro"));
    }
}
