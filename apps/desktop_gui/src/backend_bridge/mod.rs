//! Worker thread that owns everything async: the HTTP transport, the preset store and image fetches.

pub mod commands;
pub mod runtime;
