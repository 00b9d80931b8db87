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

//! Render the application header.
//!
//! The title, the active region filter and one count per region. The counts
//! always cover the whole year regardless of the filter; the key in brackets
//! selects that region.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::{
    App,
    model::{Region, RegionFilter, calendar::YEAR},
    util::format::filter_label,
};

pub(crate) fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(app.theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let filter = app.calendar.filter;
    let counts = app.index.regional_counts();

    let mut spans = vec![
        Span::styled(format!("Calendário de Eventos {YEAR}"), bold.fg(app.theme.accent_colour)),
        Span::raw("  "),
        Span::styled(filter_label(filter), Style::default().fg(app.theme.muted_colour)),
        Span::raw("   "),
    ];

    for (key, region) in Region::ALL.into_iter().enumerate() {
        let count = counts.get(region);
        let label = format!(" [{}] {}: {} ", key + 1, region.code(), count);

        let style = if filter == RegionFilter::Only(region) {
            bold.fg(app.theme.background_colour).bg(app.theme.accent_colour)
        } else if count > 0 {
            Style::default().fg(app.theme.has_events_colour)
        } else {
            Style::default().fg(app.theme.muted_colour)
        };

        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), inner_area);
}
