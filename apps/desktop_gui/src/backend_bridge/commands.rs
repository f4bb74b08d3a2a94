//! Backend commands queued from UI to backend worker.

use client_core::SubmitTicket;
use shared::presets::{NewPreset, PresetKind};

use crate::controller::events::UiErrorContext;

#[derive(Debug)]
pub enum BackendCommand {
    Send(SubmitTicket),
    ListPresets(PresetKind),
    AddPreset(NewPreset),
    RemovePreset { kind: PresetKind, id: String },
    FetchImage { url: String },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Send(_) => "send",
            BackendCommand::ListPresets(_) => "list_presets",
            BackendCommand::AddPreset(_) => "add_preset",
            BackendCommand::RemovePreset { .. } => "remove_preset",
            BackendCommand::FetchImage { .. } => "fetch_image",
        }
    }

    /// What a failure to queue this command is reported against.
    pub fn error_context(&self) -> UiErrorContext {
        match self {
            BackendCommand::Send(_) => UiErrorContext::SendMessage,
            BackendCommand::ListPresets(_)
            | BackendCommand::AddPreset(_)
            | BackendCommand::RemovePreset { .. } => UiErrorContext::Presets,
            BackendCommand::FetchImage { .. } => UiErrorContext::ImageFetch,
        }
    }
}
