//! Client-side plumbing around the composer: delivering payloads to webhook
//! endpoints, the submit/notice state machine and user settings.

pub mod config;
pub mod error;
pub mod session;
pub mod transport;

pub use config::{load_settings, Settings};
pub use error::{SubmitError, TransportError};
pub use session::{Notice, NoticeKind, SubmitSession, SubmitTicket};
pub use transport::{HttpTransport, Transport};
