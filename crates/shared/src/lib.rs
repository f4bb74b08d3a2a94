pub mod domain;
pub mod error;
pub mod form;
pub mod presets;
pub mod protocol;
