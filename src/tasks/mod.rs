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

//! Asynchronous application task processing.
//!
//! This module implements the command pattern used to offload store access
//! from the main UI thread. A dedicated worker owns the [`EventStore`] and
//! translates [`AppTask`] requests into store operations, broadcasting the
//! results back to the application via [`AppEvent`]s.
//!
//! Tasks are processed strictly in the order they were sent. Every successful
//! mutation is followed by a full refetch, so the application never patches
//! its event index locally.

mod handlers;
use handlers::*;

use anyhow::Result;
use std::{
    sync::mpsc::{Receiver, Sender},
    thread,
};

use crate::{
    events::AppEvent,
    model::{EventId, NewEvent},
    store::EventStore,
};

#[derive(Debug)]
pub(crate) enum AppTask {
    LoadEvents,

    AddEvent(NewEvent),
    DeleteEvent(EventId),
}

/// Spawns a background thread to process application tasks.
///
/// The worker takes ownership of the store and enters a blocking loop,
/// listening for incoming [`AppTask`]s until the task channel is closed.
///
/// # Arguments
///
/// * `store` - The event store used for every task.
/// * `task_rx` - The receiving end of the task channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_task_worker(
    mut store: Box<dyn EventStore>,
    task_rx: Receiver<AppTask>,
    event_tx: Sender<AppEvent>,
) {
    thread::spawn(move || {
        while let Ok(task) = task_rx.recv() {
            let mut ctx = TaskContext {
                store: store.as_mut(),
                event_tx: &event_tx,
            };

            if let Err(e) = handle_task(task, &mut ctx) {
                log::error!("Task worker stopping: {e:#}");
                break;
            }
        }

        log::debug!("task worker finished");
    });
}

/// Bundles shared resources required by task handlers to simplify resource
/// passing when invoking those handler functions.
struct TaskContext<'a> {
    store: &'a mut dyn EventStore,
    event_tx: &'a Sender<AppEvent>,
}

/// Orchestrates the execution of a single task.
///
/// Store failures are handled inside the individual handlers; an error is
/// only returned when the result cannot be delivered to the application.
fn handle_task(task: AppTask, ctx: &mut TaskContext) -> Result<()> {
    match task {
        AppTask::LoadEvents => load_events(ctx),

        AppTask::AddEvent(event) => add_event(ctx, event),
        AppTask::DeleteEvent(id) => delete_event(ctx, id),
    }
}
