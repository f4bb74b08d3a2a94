//! Pure transforms from editor form state to the webhook wire payload and to
//! the preview the editor paints next to the form.
//!
//! Nothing in this crate performs I/O. [`payload`] and [`preview`] share the
//! inclusion rules in `visibility`, so a part of the embed is either present in
//! both the payload and the preview or in neither.

pub mod color;
pub mod markdown;
pub mod payload;
pub mod preview;
pub mod timestamp;
pub mod toolbar;
mod visibility;

pub use color::{parse_hex_color, Rgb};
pub use markdown::{format as format_markdown, MarkedUpText, Span, SpanStyle};
pub use payload::{build as build_payload, build_at as build_payload_at, build_form as build_form_payload};
pub use preview::{
    render as render_preview, render_at as render_preview_at, render_form as render_form_preview,
    RenderedPreview,
};
pub use timestamp::{TimestampError, TimestampStyle, TimestampToken};
pub use toolbar::{insert_snippet, wrap_selection, Delimiter, Selection, WrappedText};
