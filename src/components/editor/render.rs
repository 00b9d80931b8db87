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

//! UI rendering logic for the event editor dialog.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Padding, Paragraph},
};
use tui_input::Input;

use crate::{
    components::editor::{EditorField, EventEditor},
    model::{CalendarEvent, calendar::long_date},
    render::Render,
    theme::Theme,
    util::format::region_label,
};

/// The editor bound to the day it is editing.
pub(crate) struct EditorDialog<'a> {
    editor: &'a mut EventEditor,
    month: u32,
    day: u32,
    existing: &'a [CalendarEvent],
}

impl EventEditor {
    pub(crate) fn as_dialog<'a>(
        &'a mut self,
        month: u32,
        day: u32,
        existing: &'a [CalendarEvent],
    ) -> EditorDialog<'a> {
        EditorDialog {
            editor: self,
            month,
            day,
            existing,
        }
    }
}

impl Render for EditorDialog<'_> {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        self.editor.sync_existing(self.existing.len());

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.accent_colour))
            .title(Line::from(" Adicionar Novo Evento ").bold().fg(theme.accent_colour))
            .padding(Padding::horizontal(1))
            .style(Style::default().bg(theme.dialog_colour).fg(theme.text_colour));

        let inner = block.inner(area);
        f.render_widget(Clear, area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let date = Paragraph::new(long_date(self.month, self.day)).fg(theme.muted_colour);
        f.render_widget(date, chunks[0]);

        self.draw_input(f, chunks[1], "Descrição do Evento", EditorField::Text, theme);
        self.draw_input(f, chunks[2], "Link (Opcional)", EditorField::Link, theme);
        self.draw_region(f, chunks[3], theme);

        if !self.existing.is_empty() {
            self.draw_existing(f, chunks[4], theme);
        }

        let help = Line::from(vec![
            Span::styled("Enter", Style::default().fg(theme.accent_colour)),
            Span::raw(" Salvar Evento  "),
            Span::styled("Tab", Style::default().fg(theme.accent_colour)),
            Span::raw(" Próximo campo  "),
            Span::styled("Esc", Style::default().fg(theme.accent_colour)),
            Span::raw(" Cancelar"),
        ]);
        f.render_widget(Paragraph::new(help).fg(theme.muted_colour), chunks[5]);
    }
}

impl EditorDialog<'_> {
    fn field_block(&self, title: &str, field: EditorField, theme: &Theme) -> Block<'static> {
        let focused = self.editor.focus == field;
        Block::default()
            .borders(Borders::ALL)
            .border_type(if focused { BorderType::Thick } else { BorderType::Plain })
            .border_style(Style::default().fg(if focused { theme.cursor_colour } else { theme.border_colour }))
            .title(format!(" {title} "))
    }

    fn draw_input(&self, f: &mut Frame, area: Rect, title: &str, field: EditorField, theme: &Theme) {
        let input: &Input = match field {
            EditorField::Link => &self.editor.link,
            _ => &self.editor.text,
        };

        let block = self.field_block(title, field, theme);
        let inner = block.inner(area);

        let width = inner.width.max(1) as usize;
        let scroll = input.visual_scroll(width);
        let text = Paragraph::new(input.value())
            .scroll((0, scroll as u16))
            .block(block);
        f.render_widget(text, area);

        if self.editor.focus == field {
            let x = inner.x + (input.visual_cursor().max(scroll) - scroll) as u16;
            f.set_cursor_position((x, inner.y));
        }
    }

    fn draw_region(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let block = self.field_block("Região do Evento", EditorField::Region, theme);
        let line = Line::from(vec![
            Span::styled("◀ ", Style::default().fg(theme.muted_colour)),
            Span::styled(region_label(self.editor.region), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(" ▶", Style::default().fg(theme.muted_colour)),
        ]);
        f.render_widget(Paragraph::new(line).block(block), area);
    }

    fn draw_existing(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let existing = self.existing;
        let items = existing.iter().map(|event| {
            let mut spans = vec![Span::raw(event.text.as_str())];
            if let Some(link) = &event.link {
                spans.push(Span::styled(format!("  {link}"), Style::default().fg(theme.accent_colour)));
            }
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                format!(" {} ", event.region),
                Style::default()
                    .bg(theme.has_events_colour)
                    .fg(theme.text_colour)
                    .add_modifier(Modifier::BOLD),
            ));
            ListItem::new(Line::from(spans))
        });

        let focused = self.editor.focus == EditorField::Existing;
        let list = List::new(items)
            .block(self.field_block("Eventos Existentes (d remove)", EditorField::Existing, theme))
            .highlight_symbol("× ")
            .highlight_style(if focused {
                Style::default().fg(theme.error_colour).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            });

        f.render_stateful_widget(list, area, &mut self.editor.selected_existing);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::model::{EventId, Region};

    #[test]
    fn dialog_shows_date_and_existing_events() {
        let existing = vec![CalendarEvent {
            id: EventId::from("1"),
            month_index: 2,
            day: 15,
            text: "Feira de Negócios".to_string(),
            link: Some("https://example.com".to_string()),
            region: Region::RS,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }];

        let mut editor = EventEditor::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                editor.as_dialog(2, 15, &existing).draw(f, area, &Theme::default());
            })
            .unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();

        assert!(screen.contains("Dom, 15 de Março de 2026"));
        assert!(screen.contains("Feira de Negócios"));
        assert!(screen.contains("Santa Catarina (SC)"));
    }
}
