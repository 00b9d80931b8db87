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

//! UI rendering logic for the calendar.
//!
//! The annual view is a 4x3 grid of month cards; the monthly view is a week
//! grid with one cell per day. Card and cell colours follow the style
//! priorities computed in the parent module.

use chrono::NaiveDate;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap},
};

use crate::{
    components::calendar::{
        CARDS_PER_ROW, CalendarView, CardStyle, DayCell, DayStyle, MonthSummary, ViewMode,
        month_grid, month_summaries,
    },
    model::{
        EventIndex,
        calendar::{DAY_NAMES, YEAR, month_name},
    },
    render::Render,
    theme::Theme,
    util::format::pluralize,
};

const MARKER: &str = "●";

/// The calendar view bound to the data it displays.
pub(crate) struct CalendarPanel<'a> {
    view: &'a CalendarView,
    index: &'a EventIndex,
    today: NaiveDate,
}

impl CalendarView {
    pub(crate) fn as_panel<'a>(&'a self, index: &'a EventIndex, today: NaiveDate) -> CalendarPanel<'a> {
        CalendarPanel { view: self, index, today }
    }
}

impl Render for CalendarPanel<'_> {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        match self.view.mode {
            ViewMode::Annual => self.draw_annual(f, area, theme),
            ViewMode::Monthly => self.draw_monthly(f, area, theme),
        }
    }
}

impl CalendarPanel<'_> {
    fn draw_annual(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let summaries = month_summaries(self.index, self.view.filter, self.today);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(area);

        for (row, row_area) in rows.iter().enumerate() {
            let cards = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, CARDS_PER_ROW); CARDS_PER_ROW as usize])
                .split(*row_area);

            for (column, card_area) in cards.iter().enumerate() {
                let month = row * CARDS_PER_ROW as usize + column;
                self.draw_card(f, *card_area, &summaries[month], theme);
            }
        }
    }

    fn draw_card(&self, f: &mut Frame, area: Rect, summary: &MonthSummary, theme: &Theme) {
        let selected = summary.month == self.view.selected_month;

        let (border_colour, caption_colour, bg) = match summary.style {
            CardStyle::Proximate => (theme.proximate_colour, theme.today_fg, theme.today_bg),
            CardStyle::HasEvents => (theme.has_events_colour, theme.accent_colour, theme.has_events_bg),
            CardStyle::Empty => (theme.border_colour, theme.accent_colour, theme.background_colour),
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(if selected { BorderType::Thick } else { BorderType::Rounded })
            .border_style(Style::default().fg(if selected { theme.cursor_colour } else { border_colour }))
            .title(Line::from(summary.name).bold().fg(theme.text_colour))
            .padding(Padding::horizontal(1))
            .style(Style::default().bg(bg));

        if summary.style != CardStyle::Empty {
            block = block.title(Line::from(MARKER).right_aligned().fg(border_colour));
        }

        let text = vec![
            Line::from(format!("{} dias", summary.days_in_month)).fg(theme.muted_colour),
            Line::from(summary.caption(self.view.filter)).fg(caption_colour).bold(),
        ];

        let card = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
        f.render_widget(card, area);
    }

    fn draw_monthly(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let grid = month_grid(self.index, self.view.selected_month, self.view.filter, self.today);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled(
                format!("{}, {}", month_name(grid.month), YEAR),
                Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD),
            ),
            Span::styled("   Esc ← Voltar", Style::default().fg(theme.muted_colour)),
        ]);
        f.render_widget(Paragraph::new(title), chunks[0]);

        let weekday_areas = week_columns(chunks[1]);
        for (name, cell_area) in DAY_NAMES.iter().zip(weekday_areas.iter()) {
            let label = Paragraph::new(*name)
                .alignment(Alignment::Center)
                .fg(theme.muted_colour)
                .bold();
            f.render_widget(label, *cell_area);
        }

        let weeks = grid.weeks().max(1);
        let week_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints((0..weeks).map(|_| Constraint::Ratio(1, weeks)))
            .split(chunks[2]);

        for (position, cell) in grid.days.iter().enumerate() {
            let slot = grid.leading_blanks as usize + position;
            let (week, weekday) = (slot / 7, slot % 7);
            if let Some(week_area) = week_areas.get(week) {
                let cell_area = week_columns(*week_area)[weekday];
                self.draw_day(f, cell_area, cell, theme);
            }
        }
    }

    fn draw_day(&self, f: &mut Frame, area: Rect, cell: &DayCell, theme: &Theme) {
        let selected = cell.day == self.view.cursor_day;

        let (fg, bg, border_colour) = match cell.style {
            DayStyle::Today => (theme.today_fg, theme.today_bg, theme.proximate_colour),
            DayStyle::Proximate => (theme.text_colour, theme.proximate_bg, theme.proximate_colour),
            DayStyle::HasEvents => (theme.text_colour, theme.has_events_bg, theme.has_events_colour),
            DayStyle::Empty => (theme.text_colour, theme.empty_day_bg, theme.empty_day_bg),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if selected { BorderType::Thick } else { BorderType::Rounded })
            .border_style(Style::default().fg(if selected { theme.cursor_colour } else { border_colour }))
            .style(Style::default().bg(bg));

        let mut day_line = vec![Span::styled(
            cell.day.to_string(),
            Style::default().fg(fg).add_modifier(if cell.is_today { Modifier::BOLD } else { Modifier::empty() }),
        )];
        if cell.proximate {
            day_line.push(Span::styled(format!(" {MARKER}"), Style::default().fg(theme.proximate_colour)));
        }

        let mut text = vec![Line::from(day_line)];
        if cell.count > 0 {
            text.push(Line::from(format!("{} {}", cell.count, pluralize(cell.count, "evento"))).fg(fg));
        }

        let day = Paragraph::new(text).alignment(Alignment::Center).block(block);
        f.render_widget(day, area);
    }
}

fn week_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 7); 7])
        .split(area)
}
