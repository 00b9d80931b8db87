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

//! Polling change watcher.
//!
//! Backends without a push channel detect changes by periodically probing a
//! cheap version value and notifying when it differs from the last one seen.

use std::{
    sync::mpsc::{self, RecvTimeoutError},
    thread,
    time::Duration,
};

use crate::store::{Listener, Result, StoreChange, Subscription};

/// Spawns a background thread that calls `probe` every `interval` and
/// notifies `listener` whenever the returned version changes from
/// `baseline`.
///
/// The thread exits as soon as the returned [`Subscription`] is dropped.
/// Probe failures are logged and the previous version is kept. Without a
/// baseline the first successful probe only records one, so a store that is
/// unreachable at startup is watched once it comes back.
///
/// # Errors
///
/// Returns an error if the thread cannot be spawned.
pub(super) fn spawn_watcher<P>(
    name: &str,
    interval: Duration,
    baseline: Option<u64>,
    mut probe: P,
    listener: Listener,
) -> Result<Subscription>
where
    P: FnMut() -> Result<u64> + Send + 'static,
{
    let (stop_tx, stop_rx) = mpsc::channel::<()>();

    thread::Builder::new()
        .name(format!("{name}-watcher"))
        .spawn(move || {
            let mut last_version = baseline.or_else(|| poll(&mut probe));

            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }

                let Some(version) = poll(&mut probe) else {
                    continue;
                };

                match last_version.replace(version) {
                    Some(previous) if previous != version => {
                        log::debug!("events table changed (version {previous} -> {version})");
                        listener(StoreChange::Changed);
                    }
                    Some(_) => {}
                    None => log::debug!("change watcher baseline is version {version}"),
                }
            }

            log::debug!("change watcher stopped");
        })?;

    Ok(Subscription::new(move || drop(stop_tx)))
}

fn poll<P>(probe: &mut P) -> Option<u64>
where
    P: FnMut() -> Result<u64>,
{
    probe()
        .map_err(|e| log::warn!("Failed to poll for changes: {e}"))
        .ok()
}
