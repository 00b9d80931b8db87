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

//! # Regional Event Calendar TUI.
//!
//! A terminal calendar of events for the year 2026, tagged by Brazilian
//! region (SC, RS and PR) and kept in a shared event store.
//!
//! This application coordinates a TUI frontend built with `ratatui` and a
//! background processing layer.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle and UI rendering.
//! * A **Task Worker** owns the event store and runs every query and mutation
//!   off the UI thread.
//! * **Event Loops** capture user input, store change notifications and
//!   system ticks to drive the UI state.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between the UI and background workers is handled via `std::sync::mpsc`
//! channels.

mod components;
mod config;
mod events;
mod logger;
mod model;
mod render;
mod store;
mod tasks;
mod theme;
mod util;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use crossterm::{
    event::{self, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self},
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};

use crate::{
    components::{CalendarView, EventEditor},
    events::{AppEvent, process_events},
    model::EventIndex,
    store::{EventStore, StoreChange, Subscription},
    tasks::{AppTask, spawn_task_worker},
    theme::Theme,
};

/// Application state.
pub(crate) struct App {
    pub(crate) theme: Theme,

    pub(crate) event_tx: Sender<AppEvent>,
    pub(crate) event_rx: Receiver<AppEvent>,

    pub(crate) task_tx: Sender<AppTask>,

    pub(crate) index: EventIndex,
    /// Set until the first load completes, successfully or not.
    pub(crate) loading: bool,
    pub(crate) load_error: Option<String>,
    pub(crate) today: NaiveDate,

    pub(crate) calendar: CalendarView,
    pub(crate) editor: EventEditor,
}

impl App {
    /// Create a new instance of application state.
    pub(crate) fn new(task_tx: Sender<AppTask>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        Self {
            theme: Theme::default(),
            event_tx,
            event_rx,
            task_tx,
            index: EventIndex::default(),
            loading: true,
            load_error: None,
            today: Local::now().date_naive(),
            calendar: CalendarView::new(),
            editor: EventEditor::new(),
        }
    }
}

/// The entry point of the application.
///
/// Loads the configuration, starts logging, opens the event store, manages the
/// terminal lifecycle, and returns an error if any part of the execution
/// fails.
fn main() -> Result<()> {
    let config = config::load_config();

    logger::init(&config.log_file)?;
    log::info!("Starting event calendar for {}", model::calendar::YEAR);

    let store = store::open_store(&config).context("Failed to open event store")?;

    let (task_tx, task_rx) = mpsc::channel();

    let mut app = App::new(task_tx);

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app, store, task_rx);
    restore_terminal(&mut terminal);

    if let Err(e) = &res {
        log::error!("Application error: {e:#}");
    }

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    if let Some(hex) = Theme::to_hex(app.theme.background_colour) {
        util::term::set_terminal_bg(&hex).ok();
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`], including disabling
/// raw mode, leaving the alternate screen, and resetting the background color.
/// It also ensures the cursor is made visible again.
///
/// Failures are ignored, as this is called during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg().ok();
    terminal.show_cursor().ok();
}

/// Subscribes to store changes, forwarding each one to the event loop.
///
/// Live updates are optional: if the backend refuses the subscription the
/// calendar still works and can be reloaded by hand.
fn subscribe(store: &dyn EventStore, event_tx: Sender<AppEvent>) -> Option<Subscription> {
    let listener = Box::new(move |change: StoreChange| {
        event_tx.send(AppEvent::StoreChanged(change)).ok();
    });

    match store.subscribe(listener) {
        Ok(subscription) => Some(subscription),
        Err(e) => {
            log::warn!("Live updates unavailable: {e}");
            None
        }
    }
}

/// Starts the application's background workers and enters the main event loop.
///
/// This function spawns several long-running background threads:
/// * A task worker that owns the store and processes [`AppTask`]s.
/// * An input thread to poll for system keyboard events.
/// * A tick thread to trigger periodic UI refreshes.
///
/// The store subscription is held until the event loop returns.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: Box<dyn EventStore>,
    task_rx: Receiver<AppTask>,
) -> Result<()> {
    let _subscription = subscribe(&*store, app.event_tx.clone());

    spawn_task_worker(store, task_rx, app.event_tx.clone());

    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read() {
                if key.kind == KeyEventKind::Press {
                    tx_keys.send(AppEvent::Key(key)).ok();
                }
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            let _ = tx_tick.send(AppEvent::Tick);
            thread::sleep(Duration::from_millis(250));
        }
    });

    // Initial fetch of every event
    app.task_tx.send(AppTask::LoadEvents)?;

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
