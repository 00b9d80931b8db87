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

use crate::{
    events::AppEvent,
    model::{EventId, NewEvent},
    tasks::TaskContext,
};

pub(super) const LOAD_ERROR_MESSAGE: &str =
    "Erro ao carregar eventos. Tente novamente em alguns momentos.";

pub(super) fn load_events(ctx: &mut TaskContext) -> Result<()> {
    match ctx.store.fetch_all() {
        Ok(rows) => {
            log::debug!("fetched {} events", rows.len());
            ctx.event_tx.send(AppEvent::EventsLoaded(rows))?;
        }
        Err(e) => {
            log::error!("Failed to load events: {e}");
            ctx.event_tx
                .send(AppEvent::LoadFailed(LOAD_ERROR_MESSAGE.to_string()))?;
        }
    }

    Ok(())
}

/// Refetches after a successful mutation. A failure here is only logged and
/// the current index is kept; the load error is reserved for explicit loads.
fn refetch_events(ctx: &mut TaskContext) -> Result<()> {
    match ctx.store.fetch_all() {
        Ok(rows) => ctx.event_tx.send(AppEvent::EventsLoaded(rows))?,
        Err(e) => log::error!("Failed to refetch events after a change: {e}"),
    }

    Ok(())
}

pub(super) fn add_event(ctx: &mut TaskContext, event: NewEvent) -> Result<()> {
    let stored = match ctx.store.insert(&event) {
        Ok(stored) => stored,
        Err(e) => {
            log::error!("Failed to add event on {}/{}: {e}", event.day, event.month_index + 1);
            return Ok(());
        }
    };

    log::info!("added event {} ({})", stored.id, stored.region);
    ctx.event_tx.send(AppEvent::EventAdded(stored))?;

    refetch_events(ctx)
}

pub(super) fn delete_event(ctx: &mut TaskContext, id: EventId) -> Result<()> {
    if let Err(e) = ctx.store.delete(&id) {
        log::error!("Failed to delete event {id}: {e}");
        return Ok(());
    }

    log::info!("deleted event {id}");

    refetch_events(ctx)
}
