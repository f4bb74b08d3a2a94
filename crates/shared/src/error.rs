use thiserror::Error;

use crate::presets::PresetKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown button style {0}; expected 1-5")]
pub struct UnknownButtonStyle(pub u8);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("at most {max} buttons are allowed per message")]
    TooManyButtons { max: usize },
    #[error("no embed field at index {0}")]
    FieldOutOfRange(usize),
    #[error("no button at index {0}")]
    ButtonOutOfRange(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresetValidationError {
    #[error("{kind} preset needs a name")]
    MissingName { kind: PresetKind },
    #[error("webhook preset needs a url")]
    MissingUrl,
    #[error("role preset needs a format")]
    MissingFormat,
}
