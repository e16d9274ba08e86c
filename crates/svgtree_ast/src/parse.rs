//! Drivers that feed a tokenizer's output into a [`crate::builder::EventSink`].
//!
//! Any tokenizer can build a tree by calling the sink's methods in document order; the drivers
//! here are the ones bundled with the crate.
#[cfg(feature = "roxmltree")]
pub mod roxmltree;
