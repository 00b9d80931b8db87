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

use crate::model::{Region, RegionFilter};

/// Appends a plural `s` to `word` unless `count` is exactly one.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(pluralize(1, "Evento"), "Evento");
/// assert_eq!(pluralize(3, "Evento"), "Eventos");
/// ```
pub(crate) fn pluralize(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

/// Formats a region as e.g. `"Santa Catarina (SC)"`.
pub(crate) fn region_label(region: Region) -> String {
    format!("{} ({})", region.name(), region.code())
}

pub(crate) fn filter_label(filter: RegionFilter) -> String {
    match filter {
        RegionFilter::All => "Todas as Regiões".to_string(),
        RegionFilter::Only(region) => region_label(region),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plural_only_when_not_one() {
        assert_eq!(pluralize(0, "Evento"), "Eventos");
        assert_eq!(pluralize(1, "Evento"), "Evento");
        assert_eq!(pluralize(2, "Encontrado"), "Encontrados");
    }

    #[test]
    fn filter_labels() {
        assert_eq!(filter_label(RegionFilter::All), "Todas as Regiões");
        assert_eq!(filter_label(RegionFilter::Only(Region::PR)), "Paraná (PR)");
    }
}
