//! Message processing
//!
//! Runs the TEA update loop for one incoming message, reconciles fetch
//! effects after every state transition and dispatches the resulting
//! actions.

use gtview_client::ApiClient;
use tokio::sync::mpsc;

use crate::actions::{handle_action, FetchTaskMap};
use crate::handler::{self, UpdateAction};
use crate::message::Message;
use crate::state::AppState;

/// Apply a message and its follow-ups, returning every action to perform
///
/// Pure with respect to I/O: effect reconciliation runs after each update
/// so a follow-up message always sees the fetches its predecessor caused.
pub fn run_update(state: &mut AppState, message: Message) -> Vec<UpdateAction> {
    let mut actions = Vec::new();
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);
        if let Some(action) = result.action {
            actions.push(action);
        }
        actions.extend(handler::reconcile(state));
        msg = result.message;
    }
    actions
}

/// Process a message through the TEA update function
pub fn process_message(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    client: &ApiClient,
    fetch_tasks: &FetchTaskMap,
) {
    for action in run_update(state, message) {
        handle_action(action, msg_tx.clone(), client, fetch_tasks);
    }
}
