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

//! SQLite event store.
//!
//! All rows live in a single `events` table. Change notifications come from a
//! second connection that polls `PRAGMA data_version`, which SQLite bumps
//! whenever another connection (in this process or any other) commits a
//! change to the database file.
//!
//! # Performance
//!
//! Queries use [`rusqlite::Connection::prepare_cached`] to reduce SQL parsing
//! overhead.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use chrono::{SubsecRound, Utc};
use rusqlite::{Connection, params};

use crate::{
    model::{CalendarEvent, EventId, NewEvent},
    store::{
        EventStore, Listener, Result, Subscription, model::format_timestamp,
        watch::spawn_watcher,
    },
};

pub(crate) struct SqliteStore {
    conn: Connection,
    path: PathBuf,
    poll_interval: Duration,
}

impl SqliteStore {
    /// Opens (or creates) the database file and configures it.
    ///
    /// This function performs the following setup:
    /// * **WAL Mode**: Enables Write-Ahead Logging so that the change watcher
    ///   can read while the writer commits.
    /// * **Performance Tuning**: Sets synchronous mode to `NORMAL`.
    /// * **Schema**: Executes [`create_schema`] to ensure the table exists.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * The database file cannot be opened.
    /// * The initial PRAGMA configurations fail.
    /// * The schema initialization fails.
    pub(crate) fn open(path: impl AsRef<Path>, poll_interval: Duration) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path)?;

        let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
        if journal_mode != "wal" {
            log::warn!("Failed to switch to WAL mode. Current mode: {journal_mode}");
        }

        conn.execute_batch("PRAGMA synchronous = NORMAL;")?;
        conn.set_prepared_statement_cache_capacity(16);

        create_schema(&conn)?;

        log::info!("opened event database {}", path.display());

        Ok(Self {
            conn,
            path,
            poll_interval,
        })
    }
}

/// Create the database schema.
///
/// The column set mirrors the remote `events` table. `created_at` is stored
/// as fixed-width RFC 3339 text so that lexical and chronological order agree.
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "BEGIN;

        CREATE TABLE IF NOT EXISTS events (
            id TEXT PRIMARY KEY,
            month_index INTEGER NOT NULL CHECK (month_index BETWEEN 0 AND 11),
            day INTEGER NOT NULL CHECK (day BETWEEN 1 AND 31),
            event_text TEXT NOT NULL,
            event_link TEXT,
            region TEXT NOT NULL CHECK (region IN ('SC', 'RS', 'PR')),
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_events_created_at ON events (created_at);

        COMMIT;",
    )?;

    Ok(())
}

fn data_version(conn: &Connection) -> Result<u64> {
    let version: i64 = conn.query_row("PRAGMA data_version", [], |r| r.get(0))?;
    Ok(version as u64)
}

impl EventStore for SqliteStore {
    fn fetch_all(&mut self) -> Result<Vec<CalendarEvent>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, month_index, day, event_text, event_link, region, created_at
             FROM events
             ORDER BY created_at, rowid",
        )?;

        let events = stmt
            .query_map([], CalendarEvent::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(events)
    }

    fn insert(&mut self, event: &NewEvent) -> Result<CalendarEvent> {
        // Truncated to the precision the timestamp is stored with.
        let created_at = Utc::now().trunc_subsecs(6);
        let stored = event.clone().into_event(EventId::new_v4(), created_at);

        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO events (id, month_index, day, event_text, event_link, region, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        stmt.execute(params![
            stored.id,
            stored.month_index,
            stored.day,
            stored.text,
            stored.link,
            stored.region,
            format_timestamp(&stored.created_at),
        ])?;

        Ok(stored)
    }

    fn delete(&mut self, id: &EventId) -> Result<()> {
        let mut stmt = self.conn.prepare_cached("DELETE FROM events WHERE id = ?1")?;
        let removed = stmt.execute(params![id])?;
        if removed == 0 {
            log::debug!("delete of {id} matched no rows");
        }

        Ok(())
    }

    fn subscribe(&self, listener: Listener) -> Result<Subscription> {
        let watcher = Connection::open(&self.path)?;
        let baseline = data_version(&watcher)?;

        spawn_watcher(
            "sqlite",
            self.poll_interval,
            Some(baseline),
            move || data_version(&watcher),
            listener,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;
    use crate::{model::Region, store::StoreChange};

    fn open_temp() -> (tempfile::TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(dir.path().join("events.db"), Duration::from_millis(10)).unwrap();
        (dir, store)
    }

    #[test]
    fn insert_then_fetch_in_creation_order() {
        let (_dir, mut store) = open_temp();

        let first = store
            .insert(&NewEvent::new(2, 15, "Feira", "", Region::SC).unwrap())
            .unwrap();
        let second = store
            .insert(&NewEvent::new(0, 3, "Congresso", "https://example.com", Region::PR).unwrap())
            .unwrap();

        let rows = store.fetch_all().unwrap();
        assert_eq!(rows, vec![first, second]);
    }

    #[test]
    fn empty_link_is_stored_as_null() {
        let (_dir, mut store) = open_temp();
        store
            .insert(&NewEvent::new(4, 1, "Encontro", "", Region::RS).unwrap())
            .unwrap();

        let is_null: bool = store
            .conn
            .query_row("SELECT event_link IS NULL FROM events", [], |r| r.get(0))
            .unwrap();
        assert!(is_null);
    }

    #[test]
    fn delete_removes_only_the_given_row() {
        let (_dir, mut store) = open_temp();
        let gone = store
            .insert(&NewEvent::new(5, 10, "a", "", Region::SC).unwrap())
            .unwrap();
        let kept = store
            .insert(&NewEvent::new(5, 10, "b", "", Region::SC).unwrap())
            .unwrap();

        store.delete(&gone.id).unwrap();
        store.delete(&EventId::from("missing")).unwrap();

        assert_eq!(store.fetch_all().unwrap(), vec![kept]);
    }

    #[test]
    fn rows_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.db");

        let inserted = {
            let mut store = SqliteStore::open(&path, Duration::from_millis(10)).unwrap();
            store
                .insert(&NewEvent::new(9, 7, "Semana", "", Region::PR).unwrap())
                .unwrap()
        };

        let mut store = SqliteStore::open(&path, Duration::from_millis(10)).unwrap();
        assert_eq!(store.fetch_all().unwrap(), vec![inserted]);
    }

    #[test]
    fn writes_from_another_connection_are_notified() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.db");
        let store = SqliteStore::open(&path, Duration::from_millis(10)).unwrap();

        let (tx, rx) = mpsc::channel();
        let _subscription = store
            .subscribe(Box::new(move |change| {
                let _ = tx.send(change);
            }))
            .unwrap();

        let mut other = SqliteStore::open(&path, Duration::from_millis(10)).unwrap();
        other
            .insert(&NewEvent::new(1, 2, "Remoto", "", Region::RS).unwrap())
            .unwrap();

        let change = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(change, StoreChange::Changed);
    }
}
