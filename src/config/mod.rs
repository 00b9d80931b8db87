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

//! Application configuration.
//!
//! This module manages the application configuration file. The file selects
//! which event store backend to use and how often it is polled for changes.
//!
//! A missing or unreadable configuration file falls back to the defaults: a
//! local SQLite database named `events.db` in the working directory.

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};
use url::Url;

const CONFIG_NAME: &str = "regiocal";

const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) version: u32,
    pub(crate) store: StoreConfig,
    pub(crate) poll_interval_ms: u64,
    pub(crate) log_file: PathBuf,
}

/// Event store backend selection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub(crate) enum StoreConfig {
    Sqlite { path: PathBuf },
    Postgrest { url: Url, api_key: String },
    Memory,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Sqlite {
            path: PathBuf::from("events.db"),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            store: StoreConfig::default(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            log_file: PathBuf::from("regiocal.log"),
        }
    }
}

impl AppConfig {
    /// Interval at which the store is polled for remote changes, never less
    /// than 100ms.
    pub(crate) fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(100))
    }
}

pub(crate) fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}
