//! Shutdown on SIGINT / SIGTERM
//!
//! A signal quits without the unsaved-edits prompt: the terminal may be
//! going away and nobody is there to answer it.

use gtview_core::prelude::*;
use tokio::sync::mpsc;

use crate::message::Message;

/// Forward the first termination signal as [`Message::Quit`]
pub fn spawn_signal_handler(tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        match shutdown_signal().await {
            Ok(name) => {
                info!("{name} received, shutting down");
                if tx.send(Message::Quit).await.is_err() {
                    debug!("Event loop already gone");
                }
            }
            Err(e) => error!("Signal handler not installed: {e}"),
        }
    });
}

#[cfg(unix)]
async fn shutdown_signal() -> Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut term = signal(SignalKind::terminate())
        .map_err(|e| Error::terminal(format!("SIGTERM: {e}")))?;

    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            res.map_err(|e| Error::terminal(format!("SIGINT: {e}")))?;
            Ok("SIGINT")
        }
        _ = term.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| Error::terminal(format!("Ctrl+C: {e}")))?;
    Ok("Ctrl+C")
}
