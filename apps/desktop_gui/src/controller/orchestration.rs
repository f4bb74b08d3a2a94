//! Command orchestration helpers between the UI and the backend worker queues.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};

pub const QUEUE_FULL_MESSAGE: &str = "UI command queue is full; please retry";
pub const QUEUE_DISCONNECTED_MESSAGE: &str =
    "Backend command processor disconnected (possible startup/runtime failure); restart the editor";

/// Queues `cmd` without blocking the UI thread.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), UiError> {
    let cmd_name = cmd.name();
    let context = cmd.error_context();
    tracing::debug!(command = cmd_name, "queueing ui->backend command");
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "ui->backend command queue is full");
            Err(UiError::from_message(context, QUEUE_FULL_MESSAGE))
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "ui->backend command queue disconnected");
            Err(UiError::from_message(context, QUEUE_DISCONNECTED_MESSAGE))
        }
    }
}

/// Delivers an event the UI must not miss, waiting for room in the queue.
/// Returns false only when the UI side has gone away.
pub fn deliver_ui_event(ui_tx: &Sender<UiEvent>, event: UiEvent) -> bool {
    match ui_tx.send(event) {
        Ok(()) => true,
        Err(_) => {
            tracing::warn!("ui event queue disconnected; dropping event");
            false
        }
    }
}
