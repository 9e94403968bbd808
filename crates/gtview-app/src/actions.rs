//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Fetch tasks are tracked per rule. Starting a fetch aborts the rule's
//! previous task, and a cleared rule aborts its task outright.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use gtview_client::ApiClient;
use gtview_core::{DetailKind, FolderKind, ResultExt, SavePayload};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::effects::{FetchRequest, FetchRule};
use crate::handler::UpdateAction;
use crate::message::Message;

/// In-flight fetch task of each rule
pub type FetchTaskMap = Arc<Mutex<HashMap<FetchRule, JoinHandle<()>>>>;

/// Execute an action by spawning a background task
pub fn handle_action(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    client: &ApiClient,
    fetch_tasks: &FetchTaskMap,
) {
    match action {
        UpdateAction::Fetch(request) => {
            let rule = request.rule();
            let handle = tokio::spawn(run_fetch(request, client.clone(), msg_tx));
            track(fetch_tasks, rule, Some(handle));
        }

        UpdateAction::CancelFetch(rule) => {
            track(fetch_tasks, rule, None);
        }

        UpdateAction::DeleteRun { run_id } => {
            let client = client.clone();
            tokio::spawn(async move {
                let result = client.delete_run(&run_id).await.map_err(|e| e.to_string());
                let _ = msg_tx.send(Message::RunDeleted { run_id, result }).await;
            });
        }

        UpdateAction::SubmitLocal {
            gt_archive,
            output_archive,
        } => {
            let client = client.clone();
            tokio::spawn(async move {
                let result = client
                    .submit_local_comparison(&gt_archive, &output_archive)
                    .await
                    .map_err(|e| e.to_string());
                let _ = msg_tx.send(Message::ComparisonSubmitted(result)).await;
            });
        }

        UpdateAction::SubmitServer(submission) => {
            let client = client.clone();
            tokio::spawn(async move {
                let result = client
                    .submit_server_comparison(
                        &submission.gt_folder,
                        &submission.output_folder,
                        &submission.description,
                    )
                    .await
                    .map_err(|e| e.to_string());
                let _ = msg_tx.send(Message::ComparisonSubmitted(result)).await;
            });
        }

        UpdateAction::LoadFolders => {
            for kind in [FolderKind::Gt, FolderKind::Output] {
                let client = client.clone();
                let tx = msg_tx.clone();
                tokio::spawn(async move {
                    let result = client
                        .list_unprocessed_folders(kind)
                        .await
                        .map_err(|e| e.to_string());
                    let _ = tx.send(Message::FoldersLoaded { kind, result }).await;
                });
            }
        }

        UpdateAction::PersistChanges {
            key,
            payload,
            save_dir,
        } => {
            tokio::spawn(async move {
                let result = persist_changes(&save_dir, &payload)
                    .await
                    .map_err(|e| e.to_string());
                let _ = msg_tx.send(Message::SaveFinished { key, result }).await;
            });
        }

        UpdateAction::ExportPdf {
            key,
            bytes,
            save_dir,
        } => {
            tokio::spawn(async move {
                let path = output_path(&save_dir, &key.run_id, &key.file_name, key.page, "pdf");
                let result = write_file(&path, &bytes)
                    .await
                    .map(|()| path)
                    .map_err(|e| e.to_string());
                let _ = msg_tx.send(Message::PdfExported(result)).await;
            });
        }
    }
}

/// Store `handle` as the rule's task, aborting the one it replaces
fn track(fetch_tasks: &FetchTaskMap, rule: FetchRule, handle: Option<JoinHandle<()>>) {
    let Ok(mut tasks) = fetch_tasks.lock() else {
        warn!("Fetch task map poisoned; {rule:?} task not tracked");
        return;
    };
    let previous = match handle {
        Some(handle) => tasks.insert(rule, handle),
        None => tasks.remove(&rule),
    };
    if let Some(previous) = previous {
        if !previous.is_finished() {
            debug!("Aborting superseded {rule:?} fetch");
            previous.abort();
        }
    }
}

/// Abort every in-flight fetch (shutdown)
pub fn abort_all(fetch_tasks: &FetchTaskMap) {
    if let Ok(mut tasks) = fetch_tasks.lock() {
        for (_, handle) in tasks.drain() {
            handle.abort();
        }
    }
}

async fn run_fetch(request: FetchRequest, client: ApiClient, msg_tx: mpsc::Sender<Message>) {
    let message = match request {
        FetchRequest::RunLists { ticket } => {
            let (runs, indentation_runs) =
                tokio::join!(client.list_runs(), client.list_indentation_runs());
            Message::RunListsLoaded {
                ticket,
                runs: runs.map_err(|e| e.to_string()),
                indentation_runs: indentation_runs.map_err(|e| e.to_string()),
            }
        }

        FetchRequest::RunDetail {
            ticket,
            run_id,
            kind,
        } => {
            let result = match kind {
                DetailKind::Content => client.get_run_detail(&run_id).await,
                DetailKind::Indentation => client.get_indentation_detail(&run_id).await,
            };
            Message::RunDetailLoaded {
                ticket,
                run_id,
                kind,
                result: result.map_err(|e| e.to_string()),
            }
        }

        FetchRequest::ThreeWay { ticket, key } => {
            let result = match key.kind {
                DetailKind::Content => {
                    client
                        .get_three_way_view(&key.run_id, &key.file_name, key.page)
                        .await
                }
                DetailKind::Indentation => {
                    client
                        .get_indentation_three_way_view(&key.run_id, &key.file_name, key.page)
                        .await
                }
            };
            Message::ThreeWayLoaded {
                ticket,
                key,
                result: result.map_err(|e| e.to_string()),
            }
        }

        FetchRequest::RunResults { ticket, run_id } => {
            let result = client.get_run_results(&run_id).await;
            Message::RunResultsLoaded {
                ticket,
                run_id,
                result: result.map_err(|e| e.to_string()),
            }
        }

        FetchRequest::FileDiff { ticket, selection } => {
            let result = client
                .get_file_diff(&selection.run_id, &selection.file_name, &selection.suffix)
                .await;
            Message::FileDiffLoaded {
                ticket,
                selection,
                result: result.map_err(|e| e.to_string()),
            }
        }
    };

    if msg_tx.send(message).await.is_err() {
        debug!("Fetch result dropped: message channel closed");
    }
}

/// Write a saved page as pretty JSON under `save_dir/{run}/`
pub async fn persist_changes(save_dir: &Path, payload: &SavePayload) -> gtview_core::Result<PathBuf> {
    let path = output_path(
        save_dir,
        &payload.run_id,
        &payload.file_name,
        payload.page,
        "json",
    );
    let body = serde_json::to_vec_pretty(payload)?;
    write_file(&path, &body).await?;
    Ok(path)
}

async fn write_file(path: &Path, bytes: &[u8]) -> gtview_core::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// `save_dir/{run}/{file}_page{n}.{ext}` with path separators replaced
pub fn output_path(save_dir: &Path, run_id: &str, file_name: &str, page: u32, ext: &str) -> PathBuf {
    let clean = |s: &str| s.replace(['/', '\\'], "_");
    save_dir
        .join(clean(run_id))
        .join(format!("{}_page{page}.{ext}", clean(file_name)))
}
