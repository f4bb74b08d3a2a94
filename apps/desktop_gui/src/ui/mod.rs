//! UI layer for the desktop editor: app shell, editor panels, preview painter and themes.

pub mod app;
mod panels;
pub mod preview;
pub mod theme;

pub use app::WebhookStudioApp;
