//! Fetch result handlers and effect reconciliation
//!
//! Every result carries the ticket it was issued with; results whose ticket
//! is no longer current for their rule are dropped.

use gtview_core::{DetailKind, FileDetailRow, FileDiffRow, FileResult, IndentationRun, Run};
use gtview_core::ThreeWayViewPayload;
use tracing::{debug, error, warn};

use crate::effects::{FetchRequest, FetchRule, Reconciled, Ticket};
use crate::state::{AppState, RunDetails};
use crate::view::{FileKey, FileSelection};
use crate::viewer::{PaneVisibility, ThreeWayViewer};

use super::{UpdateAction, UpdateResult};

/// Alert shown when the three-way view cannot be loaded
pub const THREE_WAY_ERROR: &str = "Error loading file details. Please check the server.";

/// Turn the reconciler's decisions into actions, clearing data of rules
/// whose key went away
pub fn reconcile(state: &mut AppState) -> Vec<UpdateAction> {
    let Reconciled { requests, cleared } = state.effects.reconcile(&state.view);
    let mut actions = Vec::with_capacity(requests.len() + cleared.len());

    for rule in cleared {
        debug!("Fetch rule {rule:?} cleared");
        clear_rule_data(state, rule);
        actions.push(UpdateAction::CancelFetch(rule));
    }

    for request in requests {
        match &request {
            FetchRequest::RunResults { .. } => state.run_results.clear(),
            FetchRequest::FileDiff { .. } => state.file_diff.clear(),
            _ => {}
        }
        actions.push(UpdateAction::Fetch(request));
    }

    actions
}

fn clear_rule_data(state: &mut AppState, rule: FetchRule) {
    match rule {
        FetchRule::RunLists => {}
        FetchRule::RunDetail => clear_details(state, DetailKind::Content),
        FetchRule::IndentationDetail => clear_details(state, DetailKind::Indentation),
        FetchRule::ThreeWay => state.viewer = None,
        FetchRule::RunResults => state.run_results.clear(),
        FetchRule::FileDiff => state.file_diff.clear(),
    }
}

fn clear_details(state: &mut AppState, kind: DetailKind) {
    if state.details.as_ref().is_some_and(|d| d.kind == kind) {
        state.details = None;
    }
}

/// Accept a result only if its ticket is current, retiring the ticket
fn accept(state: &mut AppState, rule: FetchRule, ticket: Ticket) -> bool {
    if !state.effects.is_current(rule, ticket) {
        debug!("Dropping stale {rule:?} response (ticket {ticket})");
        return false;
    }
    state.effects.complete(rule, ticket);
    true
}

pub fn handle_run_lists_loaded(
    state: &mut AppState,
    ticket: Ticket,
    runs: Result<Vec<Run>, String>,
    indentation_runs: Result<Vec<IndentationRun>, String>,
) -> UpdateResult {
    if !accept(state, FetchRule::RunLists, ticket) {
        return UpdateResult::none();
    }

    let mut failures = Vec::new();
    match runs {
        Ok(runs) => state.runs = runs,
        Err(e) => {
            error!("Error fetching runs: {e}");
            failures.push(e);
        }
    }
    match indentation_runs {
        Ok(runs) => state.indentation_runs = runs,
        Err(e) => {
            error!("Error fetching indentation runs: {e}");
            failures.push(e);
        }
    }
    state.clamp_cursors();

    if failures.is_empty() {
        state.set_status(format!(
            "Loaded {} runs, {} indentation runs",
            state.runs.len(),
            state.indentation_runs.len()
        ));
    } else {
        state.set_error(failures.join("; "));
    }
    UpdateResult::none()
}

pub fn handle_run_detail_loaded(
    state: &mut AppState,
    ticket: Ticket,
    run_id: String,
    kind: DetailKind,
    result: Result<Vec<FileDetailRow>, String>,
) -> UpdateResult {
    let rule = match kind {
        DetailKind::Content => FetchRule::RunDetail,
        DetailKind::Indentation => FetchRule::IndentationDetail,
    };
    if !accept(state, rule, ticket) {
        return UpdateResult::none();
    }

    match result {
        Ok(rows) => {
            debug!("Loaded {} detail rows for run {run_id}", rows.len());
            state.details = Some(RunDetails { run_id, kind, rows });
            state.cursors.details = 0;
        }
        Err(e) => {
            error!("Error fetching run details: {e}");
            state.set_error(e);
            state.details = None;
            // drop the id and go back to the summary it came from
            state.view.close_detail();
        }
    }
    UpdateResult::none()
}

pub fn handle_three_way_loaded(
    state: &mut AppState,
    ticket: Ticket,
    key: FileKey,
    result: Result<ThreeWayViewPayload, String>,
) -> UpdateResult {
    if !accept(state, FetchRule::ThreeWay, ticket) {
        return UpdateResult::none();
    }

    let payload = match result {
        Ok(payload) => payload,
        Err(e) => {
            error!("Error fetching three-way view data: {e}");
            state.view.close_file();
            state.viewer = None;
            state.show_alert(format!("{THREE_WAY_ERROR}\n{e}"));
            return UpdateResult::none();
        }
    };

    // the server may answer with a different page than requested
    let mut key = key;
    let server_page = payload.pagination.current_page;
    if server_page != key.page {
        warn!(
            "Requested page {} of {} but server returned page {server_page}",
            key.page, key.file_name
        );
        state.view.set_file_page(server_page);
        if let Some(reconciled) = state.view.file_key() {
            state.effects.acknowledge_three_way(reconciled.clone());
            key = reconciled;
        }
    }

    match state.viewer.as_mut() {
        Some(viewer)
            if viewer.key().run_id == key.run_id && viewer.key().file_name == key.file_name =>
        {
            viewer.replace_payload(key, payload);
        }
        _ => {
            let panes = PaneVisibility::from(&state.settings.viewer);
            state.viewer = Some(ThreeWayViewer::new(key, payload, panes));
        }
    }
    UpdateResult::none()
}

pub fn handle_run_results_loaded(
    state: &mut AppState,
    ticket: Ticket,
    run_id: String,
    result: Result<Vec<FileResult>, String>,
) -> UpdateResult {
    if !accept(state, FetchRule::RunResults, ticket) {
        return UpdateResult::none();
    }
    match result {
        Ok(rows) => {
            debug!("Loaded {} file results for run {run_id}", rows.len());
            state.run_results = rows;
        }
        Err(e) => {
            error!("Error fetching run results: {e}");
            state.run_results.clear();
        }
    }
    state.clamp_cursors();
    UpdateResult::none()
}

pub fn handle_file_diff_loaded(
    state: &mut AppState,
    ticket: Ticket,
    selection: FileSelection,
    result: Result<Vec<FileDiffRow>, String>,
) -> UpdateResult {
    if !accept(state, FetchRule::FileDiff, ticket) {
        return UpdateResult::none();
    }
    match result {
        Ok(rows) => {
            debug!(
                "Loaded {} diff rows for {}_{}",
                rows.len(),
                selection.file_name,
                selection.suffix
            );
            state.file_diff = rows;
        }
        Err(e) => {
            error!("Error fetching file diff: {e}");
            state.file_diff.clear();
        }
    }
    UpdateResult::none()
}
