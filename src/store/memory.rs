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

//! In-process event store.
//!
//! Clones share the same table, so one clone can act as a "remote" writer
//! while another is owned by the task worker. Listeners are notified
//! synchronously on every write.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use crate::{
    model::{CalendarEvent, EventId, NewEvent},
    store::{EventStore, Listener, Result, StoreChange, Subscription},
};

#[derive(Clone, Default)]
pub(crate) struct MemoryStore {
    inner: Arc<Mutex<MemoryTable>>,
}

#[derive(Default)]
struct MemoryTable {
    rows: Vec<CalendarEvent>,
    listeners: Vec<(u64, Listener)>,
    next_listener_id: u64,
}

impl MemoryTable {
    fn notify(&self, change: StoreChange) {
        for (_, listener) in &self.listeners {
            listener(change.clone());
        }
    }
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> MutexGuard<'_, MemoryTable> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    pub(crate) fn listener_count(&self) -> usize {
        self.table().listeners.len()
    }
}

impl EventStore for MemoryStore {
    fn fetch_all(&mut self) -> Result<Vec<CalendarEvent>> {
        Ok(self.table().rows.clone())
    }

    fn insert(&mut self, event: &NewEvent) -> Result<CalendarEvent> {
        let stored = event.clone().into_event(EventId::new_v4(), Utc::now());

        let mut table = self.table();
        table.rows.push(stored.clone());
        table.notify(StoreChange::Inserted(stored.id.clone()));

        Ok(stored)
    }

    fn delete(&mut self, id: &EventId) -> Result<()> {
        let mut table = self.table();
        let before = table.rows.len();
        table.rows.retain(|row| &row.id != id);

        if table.rows.len() != before {
            table.notify(StoreChange::Deleted(id.clone()));
        }

        Ok(())
    }

    fn subscribe(&self, listener: Listener) -> Result<Subscription> {
        let id = {
            let mut table = self.table();
            let id = table.next_listener_id;
            table.next_listener_id += 1;
            table.listeners.push((id, listener));
            id
        };

        let inner = Arc::clone(&self.inner);
        Ok(Subscription::new(move || {
            let mut table = inner.lock().unwrap_or_else(PoisonError::into_inner);
            table.listeners.retain(|(listener_id, _)| *listener_id != id);
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;
    use crate::model::Region;

    #[test]
    fn clones_share_rows() {
        let mut store = MemoryStore::new();
        let mut other = store.clone();

        let inserted = other
            .insert(&NewEvent::new(2, 15, "Feira", "", Region::SC).unwrap())
            .unwrap();

        assert_eq!(store.fetch_all().unwrap(), vec![inserted]);
    }

    #[test]
    fn writes_notify_listeners_until_released() {
        let mut store = MemoryStore::new();
        let (tx, rx) = mpsc::channel();

        let subscription = store
            .subscribe(Box::new(move |change| {
                let _ = tx.send(change);
            }))
            .unwrap();
        assert_eq!(store.listener_count(), 1);

        let inserted = store
            .insert(&NewEvent::new(0, 1, "Ano novo", "", Region::RS).unwrap())
            .unwrap();
        assert_eq!(rx.try_recv(), Ok(StoreChange::Inserted(inserted.id.clone())));

        store.delete(&inserted.id).unwrap();
        assert_eq!(rx.try_recv(), Ok(StoreChange::Deleted(inserted.id.clone())));

        // Deleting a missing row changes nothing.
        store.delete(&inserted.id).unwrap();
        assert!(rx.try_recv().is_err());

        drop(subscription);
        assert_eq!(store.listener_count(), 0);
    }
}
