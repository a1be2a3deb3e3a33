//! Font-backed text metrics for trellis.
//!
//! [`TextEngine`] implements [`trellis::TextMetrics`] with `cosmic-text` shaping and keeps a
//! registry of fonts loaded under caller-chosen ids. Text whose font cannot be resolved is
//! measured with [`trellis::ApproximateMetrics`], so layout never fails on a missing font.

mod error;

#[cfg(feature = "cosmic")]
mod engine;

pub use error::FontError;

#[cfg(feature = "cosmic")]
pub use engine::{EngineConfig, TextEngine};
