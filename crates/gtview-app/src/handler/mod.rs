//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes
//! - `fetch`: Fetch results and effect reconciliation
//! - `viewer`: Three-way viewer handlers
//! - `submit`: Comparison submission dialog handlers

pub(crate) mod fetch;
pub(crate) mod keys;
pub(crate) mod submit;
pub(crate) mod update;
pub(crate) mod viewer;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use gtview_core::SavePayload;

use crate::effects::{FetchRequest, FetchRule};
use crate::message::Message;
use crate::submit_dialog::ServerSubmission;
use crate::view::FileKey;

// Re-export main entry points
pub use fetch::reconcile;
pub use keys::handle_key;
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Run a gateway fetch; replaces any in-flight fetch of the same rule
    Fetch(FetchRequest),

    /// Abort the in-flight fetch of a rule whose key went away
    CancelFetch(FetchRule),

    /// Delete a run on the backend (already confirmed by the operator)
    DeleteRun { run_id: String },

    /// Upload two local archives for comparison
    SubmitLocal {
        gt_archive: PathBuf,
        output_archive: PathBuf,
    },

    /// Compare two folders already on the server
    SubmitServer(ServerSubmission),

    /// Load both unprocessed-folder lists for the server form
    LoadFolders,

    /// Write edited comparison rows to the save directory
    PersistChanges {
        key: FileKey,
        payload: SavePayload,
        save_dir: PathBuf,
    },

    /// Write the decoded PDF page to the save directory
    ExportPdf {
        key: FileKey,
        bytes: Vec<u8>,
        save_dir: PathBuf,
    },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
