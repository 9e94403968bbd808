//! Main TUI runner - entry point and event loop

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use gtview_app::actions::abort_all;
use gtview_app::message::Message;
use gtview_app::process;
use gtview_app::signals;
use gtview_app::state::AppState;
use gtview_app::{FetchTaskMap, Settings};
use gtview_client::ApiClient;
use gtview_core::prelude::*;
use tokio::sync::mpsc;

use super::{event, render, terminal};

/// Run the dashboard until the operator quits
///
/// Must be called inside a multi-threaded tokio runtime: the event loop
/// blocks on terminal polling while fetch tasks run on the workers.
pub async fn run(settings: Settings) -> Result<()> {
    let client = ApiClient::new(&settings.api.base_url, settings.api.timeout())?;
    info!(
        "Backend: {} (timeout {}s)",
        client.base_url(),
        settings.api.request_timeout_secs
    );

    terminal::install_panic_hook();
    let mut term = ratatui::init();

    let mut state = AppState::with_settings(settings);

    let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
    signals::spawn_signal_handler(msg_tx.clone());

    let fetch_tasks: FetchTaskMap = Arc::new(Mutex::new(HashMap::new()));

    let result = run_loop(&mut term, &mut state, msg_rx, msg_tx, &client, &fetch_tasks);

    abort_all(&fetch_tasks);
    ratatui::restore();

    if let Err(ref e) = result {
        error!("Event loop exited with error: {e}");
    } else {
        info!("gtview exiting");
    }
    result
}

/// Main event loop
fn run_loop(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut AppState,
    mut msg_rx: mpsc::Receiver<Message>,
    msg_tx: mpsc::Sender<Message>,
    client: &ApiClient,
    fetch_tasks: &FetchTaskMap,
) -> Result<()> {
    // first update mounts the dashboard (run list fetch)
    process::process_message(state, Message::Tick, &msg_tx, client, fetch_tasks);

    while !state.should_quit() {
        // Fetch results, signal handler
        while let Ok(msg) = msg_rx.try_recv() {
            process::process_message(state, msg, &msg_tx, client, fetch_tasks);
        }

        terminal.draw(|frame| render::view(frame, state))?;

        if let Some(message) = event::poll()? {
            process::process_message(state, message, &msg_tx, client, fetch_tasks);
        }
    }

    Ok(())
}
