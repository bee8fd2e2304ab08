//! Renderers for built model graphs.

#[cfg(feature = "json")]
pub mod json;
