//! Tests for handler module

use super::*;
use crate::effects::{FetchRequest, FetchRule, Ticket};
use crate::input_key::InputKey;
use crate::message::Message;
use crate::process::run_update;
use crate::state::{AppState, StatusLevel, UiMode};
use crate::submit_dialog::SubmitDialog;
use crate::view::{DisplayFlag, FileKey, View};
use crate::viewer::Pane;
use gtview_core::{
    ComparisonRow, ComparisonSubmitted, DetailKind, FileDetailRow, FolderKind, IndentationRun,
    MatchField, Pagination, Run, ThreeWayViewPayload,
};
use serde_json::json;

// ─────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────

fn fetches(actions: &[UpdateAction]) -> Vec<FetchRequest> {
    actions
        .iter()
        .filter_map(|a| match a {
            UpdateAction::Fetch(request) => Some(request.clone()),
            _ => None,
        })
        .collect()
}

fn single_fetch(actions: &[UpdateAction]) -> FetchRequest {
    let mut requests = fetches(actions);
    assert_eq!(requests.len(), 1, "expected one fetch in {actions:?}");
    requests.remove(0)
}

fn run(id: &str) -> Run {
    Run {
        id: id.to_string(),
        ..Default::default()
    }
}

fn indentation_run(id: &str) -> IndentationRun {
    IndentationRun {
        id: id.to_string(),
        ..Default::default()
    }
}

fn row(content: &str) -> ComparisonRow {
    ComparisonRow {
        content_output: json!(content),
        content_gt: json!(content),
        content_match: true,
        ..Default::default()
    }
}

fn payload(current: u32, total: u32) -> ThreeWayViewPayload {
    ThreeWayViewPayload {
        file_name: "doc_1".into(),
        page_num: current.to_string(),
        pagination: Pagination {
            current_page: current,
            total_pages: total,
            ..Default::default()
        },
        comparison_data: vec![row("a"), row("b")],
        pdf_view_base64: None,
        html_view_content: None,
    }
}

/// State after mount with the run lists loaded
fn loaded_state() -> AppState {
    let mut state = AppState::new();
    let actions = run_update(&mut state, Message::Tick);
    let FetchRequest::RunLists { ticket } = single_fetch(&actions) else {
        panic!("mount must fetch run lists");
    };
    run_update(
        &mut state,
        Message::RunListsLoaded {
            ticket,
            runs: Ok(vec![run("2024-01-01_10-00-00"), run("2024-01-02_09-30-00")]),
            indentation_runs: Ok(vec![indentation_run("2024-02-01_08-00-00")]),
        },
    );
    state
}

/// State with the viewer open on doc_1 page `page` of `total`
fn viewer_state(page: u32, total: u32) -> (AppState, FileKey) {
    let mut state = loaded_state();
    let actions = run_update(
        &mut state,
        Message::OpenFile {
            run_id: "r1".into(),
            file_name: "doc_1".into(),
            page,
        },
    );
    let FetchRequest::ThreeWay { ticket, key } = single_fetch(&actions) else {
        panic!("opening a file must fetch the three-way view");
    };
    run_update(
        &mut state,
        Message::ThreeWayLoaded {
            ticket,
            key: key.clone(),
            result: Ok(payload(page, total)),
        },
    );
    assert!(state.viewer.is_some());
    (state, key)
}

fn detail_ticket(actions: &[UpdateAction]) -> (Ticket, String, DetailKind) {
    match single_fetch(actions) {
        FetchRequest::RunDetail {
            ticket,
            run_id,
            kind,
        } => (ticket, run_id, kind),
        other => panic!("expected detail fetch, got {other:?}"),
    }
}

// ─────────────────────────────────────────────────────────
// Quit
// ─────────────────────────────────────────────────────────

#[test]
fn test_quit_message_sets_quitting() {
    let mut state = AppState::new();
    update(&mut state, Message::Quit);
    assert!(state.should_quit());
}

#[test]
fn test_q_key_produces_request_quit_message() {
    let state = AppState::new();
    let result = handle_key(&state, InputKey::Char('q'));
    assert!(matches!(result, Some(Message::RequestQuit)));
}

#[test]
fn test_ctrl_c_quits_from_every_mode() {
    let mut state = AppState::new();
    for mode in [
        UiMode::Normal,
        UiMode::ConfirmDialog,
        UiMode::Alert,
        UiMode::SubmitDialog,
    ] {
        state.ui_mode = mode;
        assert!(matches!(
            handle_key(&state, InputKey::CharCtrl('c')),
            Some(Message::Quit)
        ));
    }
}

#[test]
fn test_quit_with_unsaved_edits_asks_first() {
    let (mut state, _) = viewer_state(1, 3);
    run_update(&mut state, Message::ToggleFocusedMatch);
    assert!(state.has_unsaved_edits());

    run_update(&mut state, Message::RequestQuit);
    assert!(!state.should_quit());
    assert_eq!(state.ui_mode, UiMode::ConfirmDialog);

    run_update(&mut state, Message::ConfirmDialogAccept);
    assert!(state.should_quit());
}

// ─────────────────────────────────────────────────────────
// Display flags and keys
// ─────────────────────────────────────────────────────────

#[test]
fn test_number_keys_toggle_flags() {
    let mut state = AppState::new();
    run_update(&mut state, Message::Key(InputKey::Char('2')));
    assert!(state.view.flag(DisplayFlag::IndentationResult));
    assert_eq!(state.effective_view(), View::IndentationSummary);

    run_update(&mut state, Message::Key(InputKey::Char('2')));
    run_update(&mut state, Message::Key(InputKey::Char('1')));
    assert_eq!(state.effective_view(), View::Welcome);
}

#[test]
fn test_cursor_clamps_to_table() {
    let mut state = loaded_state();
    run_update(&mut state, Message::Key(InputKey::Down));
    run_update(&mut state, Message::Key(InputKey::Down));
    run_update(&mut state, Message::Key(InputKey::Down));
    assert_eq!(state.cursors.runs, 1);
    run_update(&mut state, Message::Key(InputKey::Home));
    assert_eq!(state.cursors.runs, 0);
    run_update(&mut state, Message::Key(InputKey::End));
    assert_eq!(state.cursors.runs, 1);
}

#[test]
fn test_run_lists_failure_sets_error_status() {
    let mut state = AppState::new();
    let actions = run_update(&mut state, Message::Tick);
    let ticket = single_fetch(&actions).ticket();
    run_update(
        &mut state,
        Message::RunListsLoaded {
            ticket,
            runs: Err("Failed to fetch runs (HTTP 500)".into()),
            indentation_runs: Ok(vec![indentation_run("i1")]),
        },
    );
    assert!(state.runs.is_empty());
    assert_eq!(state.indentation_runs.len(), 1);
    let status = state.status.as_ref().unwrap();
    assert_eq!(status.level, StatusLevel::Error);
    assert!(status.text.contains("Failed to fetch runs"));
    assert!(!state.is_loading(FetchRule::RunLists));
}

#[test]
fn test_reload_refetches_lists() {
    let mut state = loaded_state();
    let actions = run_update(&mut state, Message::Key(InputKey::Char('r')));
    assert!(matches!(
        single_fetch(&actions),
        FetchRequest::RunLists { .. }
    ));
}

// ─────────────────────────────────────────────────────────
// End-to-end drill-down
// ─────────────────────────────────────────────────────────

#[test]
fn test_content_run_to_three_way_view() {
    let mut state = loaded_state();

    // click run
    let actions = run_update(&mut state, Message::Key(InputKey::Enter));
    let (ticket, run_id, kind) = detail_ticket(&actions);
    assert_eq!(run_id, "2024-01-01_10-00-00");
    assert_eq!(kind, DetailKind::Content);
    assert_eq!(state.view.detail_run_id(), Some("2024-01-01_10-00-00"));
    assert_eq!(state.effective_view(), View::RunDetails);

    run_update(
        &mut state,
        Message::RunDetailLoaded {
            ticket,
            run_id: run_id.clone(),
            kind,
            result: Ok(vec![FileDetailRow {
                file_name: "doc".into(),
                page_num: "1".into(),
                table_num: None,
                ..Default::default()
            }]),
        },
    );
    assert_eq!(state.active_details().unwrap().rows.len(), 1);

    // "View"
    let actions = run_update(&mut state, Message::Key(InputKey::Enter));
    match single_fetch(&actions) {
        FetchRequest::ThreeWay { key, .. } => {
            assert_eq!(key.run_id, "2024-01-01_10-00-00");
            assert_eq!(key.file_name, "doc_1");
            assert_eq!(key.page, 1);
            assert_eq!(key.kind, DetailKind::Content);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(state.effective_view(), View::ThreeWay);
}

#[test]
fn test_indentation_run_to_three_way_view() {
    let mut state = loaded_state();
    run_update(&mut state, Message::ToggleFlag(DisplayFlag::IndentationResult));

    let actions = run_update(&mut state, Message::Key(InputKey::Enter));
    let (ticket, run_id, kind) = detail_ticket(&actions);
    assert_eq!(kind, DetailKind::Indentation);

    run_update(
        &mut state,
        Message::RunDetailLoaded {
            ticket,
            run_id,
            kind,
            result: Ok(vec![FileDetailRow {
                file_name: "doc".into(),
                table_num: Some("2".into()),
                page_num: "3".into(),
                total_rows: Some(4),
                ..Default::default()
            }]),
        },
    );

    let actions = run_update(&mut state, Message::ActivateRow);
    match single_fetch(&actions) {
        FetchRequest::ThreeWay { key, .. } => {
            assert_eq!(key.file_name, "doc_table_2_3");
            assert_eq!(key.page, 3);
            assert_eq!(key.kind, DetailKind::Indentation);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_stale_detail_response_is_dropped() {
    let mut state = loaded_state();
    let (old_ticket, _, _) = detail_ticket(&run_update(
        &mut state,
        Message::OpenRunDetail("r1".into()),
    ));
    let (new_ticket, _, _) = detail_ticket(&run_update(
        &mut state,
        Message::OpenRunDetail("r2".into()),
    ));

    run_update(
        &mut state,
        Message::RunDetailLoaded {
            ticket: old_ticket,
            run_id: "r1".into(),
            kind: DetailKind::Content,
            result: Ok(vec![FileDetailRow::default()]),
        },
    );
    assert!(state.details.is_none());
    assert!(state.is_loading(FetchRule::RunDetail));

    run_update(
        &mut state,
        Message::RunDetailLoaded {
            ticket: new_ticket,
            run_id: "r2".into(),
            kind: DetailKind::Content,
            result: Ok(vec![]),
        },
    );
    assert_eq!(state.details.as_ref().unwrap().run_id, "r2");
    assert!(!state.is_loading(FetchRule::RunDetail));
}

#[test]
fn test_detail_failure_falls_back_to_summary() {
    let mut state = loaded_state();
    state.view.set_flag(DisplayFlag::RunSummary, true);
    let (ticket, run_id, kind) =
        detail_ticket(&run_update(&mut state, Message::OpenRunDetail("r1".into())));

    run_update(
        &mut state,
        Message::RunDetailLoaded {
            ticket,
            run_id,
            kind,
            result: Err("Failed to fetch run detail page for r1 (HTTP 404)".into()),
        },
    );
    assert_eq!(state.view.detail_run_id(), None);
    assert_eq!(state.effective_view(), View::FinalSummary);
    assert!(!state.view.flag(DisplayFlag::RunSummary));
    assert_eq!(state.status.as_ref().unwrap().level, StatusLevel::Error);
}

#[test]
fn test_esc_closes_detail() {
    let mut state = loaded_state();
    run_update(&mut state, Message::OpenRunDetail("r1".into()));
    let actions = run_update(&mut state, Message::Key(InputKey::Esc));
    assert_eq!(state.effective_view(), View::FinalSummary);
    assert!(actions
        .iter()
        .any(|a| matches!(a, UpdateAction::CancelFetch(FetchRule::RunDetail))));
}

// ─────────────────────────────────────────────────────────
// Three-way viewer
// ─────────────────────────────────────────────────────────

#[test]
fn test_three_way_failure_closes_file_and_alerts() {
    let mut state = loaded_state();
    run_update(&mut state, Message::OpenRunDetail("r1".into()));
    let actions = run_update(
        &mut state,
        Message::OpenFile {
            run_id: "r1".into(),
            file_name: "doc_1".into(),
            page: 1,
        },
    );
    let FetchRequest::ThreeWay { ticket, key } = single_fetch(&actions) else {
        panic!("expected three-way fetch");
    };

    run_update(
        &mut state,
        Message::ThreeWayLoaded {
            ticket,
            key,
            result: Err("Empty response: three-way view".into()),
        },
    );
    assert!(state.view.file_key().is_none());
    assert_eq!(state.view.file_detail_page(), 1);
    assert_eq!(state.effective_view(), View::RunDetails);
    assert_eq!(state.ui_mode, UiMode::Alert);
    assert!(state
        .alert
        .as_deref()
        .unwrap()
        .starts_with(fetch::THREE_WAY_ERROR));

    run_update(&mut state, Message::Key(InputKey::Char('x')));
    assert_eq!(state.ui_mode, UiMode::Normal);
    assert!(state.alert.is_none());
}

#[test]
fn test_server_page_reconciliation_does_not_refetch() {
    let mut state = loaded_state();
    let actions = run_update(
        &mut state,
        Message::OpenFile {
            run_id: "r1".into(),
            file_name: "doc_1".into(),
            page: 9,
        },
    );
    let FetchRequest::ThreeWay { ticket, key } = single_fetch(&actions) else {
        panic!("expected three-way fetch");
    };

    let actions = run_update(
        &mut state,
        Message::ThreeWayLoaded {
            ticket,
            key,
            result: Ok(payload(3, 3)),
        },
    );
    assert!(fetches(&actions).is_empty());
    assert_eq!(state.view.file_detail_page(), 3);
    assert_eq!(state.viewer.as_ref().unwrap().key().page, 3);
}

#[test]
fn test_clean_page_step_navigates() {
    let (mut state, _) = viewer_state(1, 3);
    let actions = run_update(&mut state, Message::Key(InputKey::Char(']')));
    match single_fetch(&actions) {
        FetchRequest::ThreeWay { key, .. } => assert_eq!(key.page, 2),
        other => panic!("unexpected {other:?}"),
    }

    // out of range: nothing
    let (mut state, _) = viewer_state(1, 1);
    assert!(run_update(&mut state, Message::Key(InputKey::Char(']'))).is_empty());
    assert!(run_update(&mut state, Message::Key(InputKey::Char('['))).is_empty());
}

#[test]
fn test_dirty_page_step_requires_confirmation() {
    let (mut state, _) = viewer_state(1, 3);
    run_update(&mut state, Message::Key(InputKey::Char(' ')));
    assert!(state.has_unsaved_edits());

    let actions = run_update(&mut state, Message::Key(InputKey::PageDown));
    assert!(fetches(&actions).is_empty());
    assert_eq!(state.ui_mode, UiMode::ConfirmDialog);

    // cancel keeps the edits and the page
    run_update(&mut state, Message::Key(InputKey::Esc));
    assert_eq!(state.ui_mode, UiMode::Normal);
    assert_eq!(state.view.file_detail_page(), 1);
    assert!(state.has_unsaved_edits());

    // discard navigates
    run_update(&mut state, Message::Key(InputKey::PageDown));
    let actions = run_update(&mut state, Message::Key(InputKey::Enter));
    match single_fetch(&actions) {
        FetchRequest::ThreeWay { key, .. } => assert_eq!(key.page, 2),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_dirty_close_asks_then_closes() {
    let (mut state, _) = viewer_state(1, 3);
    run_update(
        &mut state,
        Message::ToggleMatch {
            row: 0,
            field: MatchField::FontColor,
        },
    );

    run_update(&mut state, Message::Key(InputKey::Esc));
    assert_eq!(state.ui_mode, UiMode::ConfirmDialog);
    assert_eq!(state.effective_view(), View::ThreeWay);

    let actions = run_update(&mut state, Message::Key(InputKey::Char('y')));
    assert!(state.viewer.is_none());
    assert_eq!(state.effective_view(), View::FinalSummary);
    assert!(actions
        .iter()
        .any(|a| matches!(a, UpdateAction::CancelFetch(FetchRule::ThreeWay))));
}

#[test]
fn test_clean_close_is_immediate() {
    let (mut state, _) = viewer_state(2, 3);
    run_update(&mut state, Message::Key(InputKey::Esc));
    assert_eq!(state.ui_mode, UiMode::Normal);
    assert!(state.view.file_key().is_none());
    assert_eq!(state.view.file_detail_page(), 1);
}

#[test]
fn test_save_persists_and_failure_restores_dirty() {
    let (mut state, key) = viewer_state(1, 3);
    run_update(&mut state, Message::ToggleFocusedMatch);

    let actions = run_update(&mut state, Message::Key(InputKey::Char('s')));
    let (saved_key, saved) = match actions.as_slice() {
        [UpdateAction::PersistChanges { key, payload, .. }] => (key.clone(), payload.clone()),
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(saved_key, key);
    assert!(!saved.comparison_data[0].content_match);
    assert!(!state.has_unsaved_edits());

    run_update(
        &mut state,
        Message::SaveFinished {
            key,
            result: Err("disk full".into()),
        },
    );
    assert!(state.has_unsaved_edits());
    assert_eq!(state.status.as_ref().unwrap().level, StatusLevel::Error);
}

#[test]
fn test_save_failure_for_other_page_leaves_viewer_clean() {
    let (mut state, key) = viewer_state(1, 3);
    let other = FileKey { page: 2, ..key };
    run_update(
        &mut state,
        Message::SaveFinished {
            key: other,
            result: Err("disk full".into()),
        },
    );
    assert!(!state.has_unsaved_edits());
}

#[test]
fn test_pane_toggles_survive_page_change() {
    let (mut state, _) = viewer_state(1, 3);
    run_update(&mut state, Message::Key(InputKey::Char('h')));
    assert!(!state.viewer.as_ref().unwrap().panes().is_visible(Pane::Html));

    let actions = run_update(&mut state, Message::Key(InputKey::Char(']')));
    let FetchRequest::ThreeWay { ticket, key } = single_fetch(&actions) else {
        panic!("expected three-way fetch");
    };
    run_update(
        &mut state,
        Message::ThreeWayLoaded {
            ticket,
            key,
            result: Ok(payload(2, 3)),
        },
    );
    let viewer = state.viewer.as_ref().unwrap();
    assert_eq!(viewer.current_page(), 2);
    assert!(!viewer.panes().is_visible(Pane::Html));
}

#[test]
fn test_export_without_pdf_reports_error() {
    let (mut state, _) = viewer_state(1, 1);
    let actions = run_update(&mut state, Message::Key(InputKey::Char('e')));
    assert!(actions.is_empty());
    assert_eq!(state.status.as_ref().unwrap().level, StatusLevel::Error);
}

// ─────────────────────────────────────────────────────────
// Selection-driven views
// ─────────────────────────────────────────────────────────

#[test]
fn test_space_selects_run_and_fetches_results() {
    let mut state = loaded_state();
    let actions = run_update(&mut state, Message::Key(InputKey::Char(' ')));
    match single_fetch(&actions) {
        FetchRequest::RunResults { run_id, .. } => assert_eq!(run_id, "2024-01-01_10-00-00"),
        other => panic!("unexpected {other:?}"),
    }

    run_update(&mut state, Message::ToggleFlag(DisplayFlag::RunSummary));
    assert_eq!(state.effective_view(), View::RunSummary);
}

#[test]
fn test_space_on_detail_row_selects_file() {
    let mut state = loaded_state();
    let (ticket, run_id, kind) =
        detail_ticket(&run_update(&mut state, Message::OpenRunDetail("r1".into())));
    run_update(
        &mut state,
        Message::RunDetailLoaded {
            ticket,
            run_id,
            kind,
            result: Ok(vec![FileDetailRow {
                file_name: "doc".into(),
                page_num: "4".into(),
                ..Default::default()
            }]),
        },
    );

    let actions = run_update(&mut state, Message::Key(InputKey::Char(' ')));
    let rules: Vec<FetchRule> = fetches(&actions).iter().map(FetchRequest::rule).collect();
    assert_eq!(rules, vec![FetchRule::RunResults, FetchRule::FileDiff]);
    let selection = state.view.file_selection().unwrap();
    assert_eq!(selection.file_name, "doc");
    assert_eq!(selection.suffix, "4");
}

#[test]
fn test_run_results_failure_leaves_results_empty() {
    let mut state = loaded_state();
    let actions = run_update(&mut state, Message::SelectRun("r1".into()));
    let ticket = single_fetch(&actions).ticket();
    run_update(
        &mut state,
        Message::RunResultsLoaded {
            ticket,
            run_id: "r1".into(),
            result: Err("Failed to fetch run details for r1".into()),
        },
    );
    assert!(state.run_results.is_empty());
    assert_eq!(state.view.selected_run_id(), Some("r1"));
}

// ─────────────────────────────────────────────────────────
// Deletion
// ─────────────────────────────────────────────────────────

#[test]
fn test_delete_requires_confirmation_then_removes_on_success() {
    let mut state = loaded_state();
    run_update(&mut state, Message::SelectRun("2024-01-01_10-00-00".into()));

    let actions = run_update(&mut state, Message::Key(InputKey::Char('d')));
    assert!(actions.is_empty());
    assert_eq!(state.ui_mode, UiMode::ConfirmDialog);

    let actions = run_update(&mut state, Message::Key(InputKey::Enter));
    let run_id = match actions.as_slice() {
        [UpdateAction::DeleteRun { run_id }] => run_id.clone(),
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(run_id, "2024-01-01_10-00-00");
    // still listed until the backend confirms
    assert_eq!(state.runs.len(), 2);

    run_update(
        &mut state,
        Message::RunDeleted {
            run_id,
            result: Ok(()),
        },
    );
    assert_eq!(state.runs.len(), 1);
    assert_eq!(state.view.selected_run_id(), None);
    assert!(state.pending_delete.is_none());
}

#[test]
fn test_delete_failure_keeps_run() {
    let mut state = loaded_state();
    run_update(&mut state, Message::DeleteRun("2024-01-01_10-00-00".into()));
    run_update(
        &mut state,
        Message::RunDeleted {
            run_id: "2024-01-01_10-00-00".into(),
            result: Err("Failed to delete run 2024-01-01_10-00-00 (HTTP 500)".into()),
        },
    );
    assert_eq!(state.runs.len(), 2);
    assert_eq!(state.status.as_ref().unwrap().level, StatusLevel::Error);
}

#[test]
fn test_delete_cancel_does_nothing() {
    let mut state = loaded_state();
    run_update(&mut state, Message::Key(InputKey::Char('d')));
    let actions = run_update(&mut state, Message::Key(InputKey::Char('n')));
    assert!(actions.is_empty());
    assert_eq!(state.ui_mode, UiMode::Normal);
    assert_eq!(state.runs.len(), 2);
}

// ─────────────────────────────────────────────────────────
// Submission
// ─────────────────────────────────────────────────────────

#[test]
fn test_local_submit_guarded_then_sent() {
    let mut state = loaded_state();
    run_update(&mut state, Message::Key(InputKey::Char('n')));
    assert_eq!(state.ui_mode, UiMode::SubmitDialog);

    let actions = run_update(&mut state, Message::Key(InputKey::Enter));
    assert!(actions.is_empty());
    assert!(state.submit_dialog.as_ref().unwrap().error().is_some());

    for c in "gt.zip".chars() {
        run_update(&mut state, Message::Key(InputKey::Char(c)));
    }
    run_update(&mut state, Message::Key(InputKey::Tab));
    for c in "out.zip".chars() {
        run_update(&mut state, Message::Key(InputKey::Char(c)));
    }
    let actions = run_update(&mut state, Message::Key(InputKey::Enter));
    assert!(matches!(
        actions.as_slice(),
        [UpdateAction::SubmitLocal { .. }]
    ));
    assert!(state.submit_dialog.as_ref().unwrap().is_submitting());

    // locked while in flight
    assert!(run_update(&mut state, Message::Key(InputKey::Enter)).is_empty());
}

#[test]
fn test_server_submit_flow_reloads_lists() {
    let mut state = loaded_state();
    let actions = run_update(&mut state, Message::Key(InputKey::Char('N')));
    assert!(matches!(actions.as_slice(), [UpdateAction::LoadFolders]));

    run_update(
        &mut state,
        Message::FoldersLoaded {
            kind: FolderKind::Gt,
            result: Ok(vec!["gt_a".into()]),
        },
    );
    run_update(
        &mut state,
        Message::FoldersLoaded {
            kind: FolderKind::Output,
            result: Ok(vec!["out_a".into(), "out_b".into()]),
        },
    );

    run_update(&mut state, Message::Key(InputKey::Char(' ')));
    run_update(&mut state, Message::Key(InputKey::Tab));
    run_update(&mut state, Message::Key(InputKey::Down));
    run_update(&mut state, Message::Key(InputKey::Char(' ')));

    let actions = run_update(&mut state, Message::Key(InputKey::Enter));
    match actions.as_slice() {
        [UpdateAction::SubmitServer(submission)] => {
            assert_eq!(submission.gt_folder, "gt_a");
            assert_eq!(submission.output_folder, "out_b");
            assert_eq!(submission.description, "Run from UI");
        }
        other => panic!("unexpected {other:?}"),
    }

    let actions = run_update(
        &mut state,
        Message::ComparisonSubmitted(Ok(ComparisonSubmitted {
            run_id: Some("2024-03-01_12-00-00".into()),
            message: None,
        })),
    );
    assert!(state.submit_dialog.is_none());
    assert_eq!(state.ui_mode, UiMode::Normal);
    assert!(state
        .status
        .as_ref()
        .unwrap()
        .text
        .contains("2024-03-01_12-00-00"));
    assert!(matches!(
        single_fetch(&actions),
        FetchRequest::RunLists { .. }
    ));
}

#[test]
fn test_submit_failure_unlocks_form() {
    let mut state = loaded_state();
    run_update(&mut state, Message::OpenLocalSubmit);
    if let Some(SubmitDialog::Local(form)) = state.submit_dialog.as_mut() {
        form.gt_archive = "gt.zip".into();
        form.output_archive = "out.zip".into();
    }
    run_update(&mut state, Message::SubmitDialogSubmit);
    run_update(
        &mut state,
        Message::ComparisonSubmitted(Err("Failed to run comparison (HTTP 500)".into())),
    );
    let dialog = state.submit_dialog.as_ref().unwrap();
    assert!(!dialog.is_submitting());
    assert_eq!(dialog.error(), Some("Failed to run comparison (HTTP 500)"));
}

#[test]
fn test_folder_load_failure_shown_in_list() {
    let mut state = AppState::new();
    run_update(&mut state, Message::OpenServerSubmit);
    run_update(
        &mut state,
        Message::FoldersLoaded {
            kind: FolderKind::Output,
            result: Err("Failed to fetch unprocessed output folders".into()),
        },
    );
    let Some(SubmitDialog::Server(form)) = state.submit_dialog.as_ref() else {
        panic!("server form expected");
    };
    assert!(form.output_folders.error.is_some());
    assert!(form.gt_folders.loading);
}
