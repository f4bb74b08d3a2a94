use crate::{
    domain::{ButtonSpec, EmbedCard, EmbedField, WebhookIdentity},
    error::FormError,
};

/// Platform limit for buttons in one action row.
pub const MAX_BUTTONS: usize = 5;

/// The editor's in-memory model. Replaced wholesale by the UI; the core only reads snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    identity: WebhookIdentity,
    content: String,
    embed: EmbedCard,
    buttons: Vec<ButtonSpec>,
}

impl FormState {
    pub fn new(
        identity: WebhookIdentity,
        content: impl Into<String>,
        embed: EmbedCard,
        buttons: Vec<ButtonSpec>,
    ) -> Result<Self, FormError> {
        let mut form = Self {
            identity,
            content: content.into(),
            embed,
            buttons: Vec::new(),
        };
        form.set_buttons(buttons)?;
        Ok(form)
    }

    pub fn identity(&self) -> &WebhookIdentity {
        &self.identity
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn embed(&self) -> &EmbedCard {
        &self.embed
    }

    pub fn buttons(&self) -> &[ButtonSpec] {
        &self.buttons
    }

    pub fn set_identity(&mut self, identity: WebhookIdentity) {
        self.identity = identity;
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn set_embed(&mut self, embed: EmbedCard) {
        self.embed = embed;
    }

    pub fn set_buttons(&mut self, buttons: Vec<ButtonSpec>) -> Result<(), FormError> {
        if buttons.len() > MAX_BUTTONS {
            return Err(FormError::TooManyButtons { max: MAX_BUTTONS });
        }
        self.buttons = buttons;
        Ok(())
    }

    pub fn add_field(&mut self) {
        self.embed.fields.push(EmbedField::default());
    }

    pub fn remove_field(&mut self, index: usize) -> Result<EmbedField, FormError> {
        if index >= self.embed.fields.len() {
            return Err(FormError::FieldOutOfRange(index));
        }
        Ok(self.embed.fields.remove(index))
    }

    pub fn add_button(&mut self, button: ButtonSpec) -> Result<(), FormError> {
        if self.buttons.len() >= MAX_BUTTONS {
            return Err(FormError::TooManyButtons { max: MAX_BUTTONS });
        }
        self.buttons.push(button);
        Ok(())
    }

    pub fn remove_button(&mut self, index: usize) -> Result<ButtonSpec, FormError> {
        if index >= self.buttons.len() {
            return Err(FormError::ButtonOutOfRange(index));
        }
        Ok(self.buttons.remove(index))
    }

    pub fn can_add_button(&self) -> bool {
        self.buttons.len() < MAX_BUTTONS
    }

    /// Detached copy handed to the payload builder or the preview renderer.
    pub fn snapshot(&self) -> FormState {
        self.clone()
    }
}
