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

//! Visual styling and color configuration for the TUI.
//!
//! This module defines the application's color palette and provides utilities
//! for converting colors between Ratatui's internal representation and external
//! formats (such as hexadecimal strings) used for terminal emulator styling.

use ratatui::style::Color;

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    pub(crate) background_colour: Color,
    pub(crate) dialog_colour: Color,
    pub(crate) accent_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) cursor_colour: Color,
    pub(crate) text_colour: Color,
    pub(crate) muted_colour: Color,
    pub(crate) error_colour: Color,

    pub(crate) proximate_colour: Color,
    pub(crate) proximate_bg: Color,
    pub(crate) has_events_colour: Color,
    pub(crate) has_events_bg: Color,
    pub(crate) today_fg: Color,
    pub(crate) today_bg: Color,
    pub(crate) empty_day_bg: Color,
}

impl Default for Theme {
    // Returns the standard application theme.
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    // Constructs the default theme.
    pub(crate) const fn default_theme() -> Self {
        Self {
            background_colour: Color::Rgb(17, 24, 39),
            dialog_colour: Color::Rgb(31, 41, 55),
            accent_colour: Color::Rgb(129, 140, 248),
            border_colour: Color::Rgb(75, 85, 99),
            cursor_colour: Color::Rgb(250, 204, 21),
            text_colour: Color::Rgb(243, 244, 246),
            muted_colour: Color::Rgb(156, 163, 175),
            error_colour: Color::Rgb(248, 113, 113),

            proximate_colour: Color::Rgb(239, 68, 68),
            proximate_bg: Color::Rgb(153, 27, 27),
            has_events_colour: Color::Rgb(99, 102, 241),
            has_events_bg: Color::Rgb(55, 48, 163),
            today_fg: Color::Rgb(254, 202, 202),
            today_bg: Color::Rgb(127, 29, 29),
            empty_day_bg: Color::Rgb(55, 65, 81),
        }
    }

    /// Converts a [`ratatui::style::Color`] into a CSS-style hexadecimal
    /// string.
    ///
    /// This is primarily used to set the terminal emulator's background color
    /// via escape sequences. Colours without an RGB value yield `None`.
    ///
    /// # Arguments
    ///
    /// * `colour` - The Ratatui color to convert.
    pub(crate) fn to_hex(colour: Color) -> Option<String> {
        match colour {
            Color::Rgb(r, g, b) => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
            _ => None,
        }
    }
}
