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

//! Render the key help line.

use ratatui::{Frame, layout::Rect, style::Style, widgets::Paragraph};

use crate::{App, components::ViewMode};

const ANNUAL_HELP: &str =
    "←↑↓→ mover  Enter abrir mês  0-3 filtrar região  r recarregar  q sair";
const MONTHLY_HELP: &str =
    "←↑↓→ mover  Enter agendar eventos  Esc voltar  0-3 filtrar região  r recarregar  q sair";
const DIALOG_HELP: &str = "Tab próximo campo  Enter salvar  Del excluir  Esc fechar";

pub(crate) fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let help = if app.calendar.is_dialog_open() {
        DIALOG_HELP
    } else {
        match app.calendar.mode {
            ViewMode::Annual => ANNUAL_HELP,
            ViewMode::Monthly => MONTHLY_HELP,
        }
    };

    f.render_widget(
        Paragraph::new(format!(" {help}")).style(Style::default().fg(app.theme.muted_colour)),
        area,
    );
}
