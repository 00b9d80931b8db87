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

//! Data access layer.
//!
//! This module defines the [`EventStore`] capability used by the rest of the
//! application to reach the `events` table: query everything in creation
//! order, insert one row, delete a row by id, and subscribe to change
//! notifications.
//!
//! # Backends
//!
//! * [`SqliteStore`]: A local SQLite database file.
//! * [`PostgrestStore`]: A hosted PostgREST endpoint (such as Supabase)
//!   accessed directly over HTTP.
//! * [`MemoryStore`]: An in-process table, mostly useful for testing.
//!
//! Each backend delivers change notifications through a [`Subscription`]; the
//! notification is released when the subscription is dropped.

mod memory;
mod model;
mod postgrest;
mod sqlite;
mod watch;

use thiserror::Error;

pub(crate) use memory::MemoryStore;
pub(crate) use postgrest::PostgrestStore;
pub(crate) use sqlite::SqliteStore;

use crate::{
    config::{AppConfig, StoreConfig},
    model::{CalendarEvent, EventId, NewEvent},
};

/// Errors that can occur when talking to an event store.
#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("Failed to decode response: {0}")]
    Decode(String),
    #[error("Invalid store URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ureq::Error> for StoreError {
    fn from(e: ureq::Error) -> Self {
        StoreError::Http(e.to_string())
    }
}

pub(crate) type Result<T> = std::result::Result<T, StoreError>;

/// A change observed on the `events` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreChange {
    Inserted(EventId),
    Deleted(EventId),
    /// Something changed but the backend cannot tell what.
    Changed,
}

/// Callback invoked for every change notification.
pub(crate) type Listener = Box<dyn Fn(StoreChange) + Send + 'static>;

/// Access to the `events` table.
pub(crate) trait EventStore: Send {
    /// Fetches every row, ordered by creation time.
    fn fetch_all(&mut self) -> Result<Vec<CalendarEvent>>;

    /// Inserts one row and returns it as stored.
    fn insert(&mut self, event: &NewEvent) -> Result<CalendarEvent>;

    /// Deletes the row with the given id. Deleting a missing id is not an
    /// error.
    fn delete(&mut self, id: &EventId) -> Result<()>;

    /// Registers a listener for inserts, updates and deletes on the table.
    fn subscribe(&self, listener: Listener) -> Result<Subscription>;
}

/// Handle to an active change subscription.
///
/// The subscription is released when the handle is dropped.
pub(crate) struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub(crate) fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// Opens the store selected in the application configuration.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the remote URL is
/// malformed. No request is made to a remote store here.
pub(crate) fn open_store(config: &AppConfig) -> Result<Box<dyn EventStore>> {
    let store: Box<dyn EventStore> = match &config.store {
        StoreConfig::Sqlite { path } => Box::new(SqliteStore::open(path, config.poll_interval())?),
        StoreConfig::Postgrest { url, api_key } => {
            Box::new(PostgrestStore::new(url, api_key, config.poll_interval())?)
        }
        StoreConfig::Memory => Box::new(MemoryStore::new()),
    };

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_a_subscription_releases_it_once() {
        use std::sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        };

        let released = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&released);
        let subscription = Subscription::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(released.load(Ordering::SeqCst), 0);
        drop(subscription);
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn store_error_display() {
        let error = StoreError::Http("connection refused".to_string());
        assert_eq!(error.to_string(), "HTTP request failed: connection refused");

        let error = StoreError::Decode("missing field `day`".to_string());
        assert_eq!(error.to_string(), "Failed to decode response: missing field `day`");
    }

    #[test]
    fn memory_backend_opens_from_config() {
        let config = AppConfig {
            store: StoreConfig::Memory,
            ..AppConfig::default()
        };

        let mut store = open_store(&config).unwrap();
        assert!(store.fetch_all().unwrap().is_empty());
    }
}
