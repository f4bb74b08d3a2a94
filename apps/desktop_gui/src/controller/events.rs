//! UI/backend events and error modeling for the desktop editor.

use client_core::TransportError;
use shared::presets::{PresetKind, PresetRecord};

use crate::media::PreviewImage;

pub enum UiEvent {
    Info(String),
    Error(UiError),
    SendFinished(Result<(), TransportError>),
    PresetsLoaded {
        kind: PresetKind,
        records: Vec<PresetRecord>,
    },
    ImageLoaded {
        url: String,
        image: PreviewImage,
    },
    ImageFailed {
        url: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Storage,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    SendMessage,
    Presets,
    ImageFetch,
    General,
}

impl UiErrorContext {
    pub fn label(self) -> &'static str {
        match self {
            UiErrorContext::BackendStartup => "Startup",
            UiErrorContext::SendMessage => "Send",
            UiErrorContext::Presets => "Presets",
            UiErrorContext::ImageFetch => "Image",
            UiErrorContext::General => "General",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("needs a")
            || message_lower.contains("invalid")
            || message_lower.contains("missing")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("database")
            || message_lower.contains("sqlite")
            || message_lower.contains("preset store")
        {
            UiErrorCategory::Storage
        } else if message_lower.contains("timeout")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("request")
            || message_lower.contains("disconnect")
            || message_lower.contains("queue")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Storage => "Storage",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_validation_messages_are_validation_errors() {
        let err = UiError::from_message(UiErrorContext::Presets, "role preset needs a name");
        assert_eq!(err.category(), UiErrorCategory::Validation);
        assert_eq!(err.context(), UiErrorContext::Presets);
    }

    #[test]
    fn database_failures_are_storage_errors() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "preset database error: unable to open database file",
        );
        assert_eq!(err.category(), UiErrorCategory::Storage);
        assert_eq!(err_label(err.category()), "Storage");
    }

    #[test]
    fn command_queue_disconnect_is_a_transport_error() {
        let err = UiError::from_message(
            UiErrorContext::General,
            "Backend command processor disconnected",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }

    #[test]
    fn anything_else_is_unexpected() {
        let err = UiError::from_message(UiErrorContext::ImageFetch, "unsupported image format");
        assert_eq!(err.category(), UiErrorCategory::Unknown);
        assert_eq!(err.message(), "unsupported image format");
    }
}
