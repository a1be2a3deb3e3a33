//! # trellis
//!
//! Constraint-based box layout for documents and other fixed-format output.
//!
//! A layout tree is built from [`Node`]s (boxes, text and images) with per-axis
//! [`Size`] rules: `Fit` to content, `Fixed`, or `Grow` into leftover space. Layout
//! resolves every node's size and absolute position in six ordered passes, asking a
//! [`TextMetrics`] implementation for text sizes and line wrapping. Renderers are
//! out of scope; [`LayoutOutput`] flattens a laid out tree for them.
//!
//! ## Core Types
//!
//! - [`Node`] - A box, text or image in the layout tree
//! - [`Size`] / [`Sizing`] - Per-axis sizing rule with optional min/max clamps
//! - [`Direction`], [`Spacing`], [`HorizontalAlign`], [`VerticalAlign`] - Container settings
//!
//! ## Layout
//!
//! - [`Node::compute_layout`] / [`layout`] - Run the sizing pipeline
//! - [`TextMetrics`] - Trait for text measurement and wrapping
//! - [`ApproximateMetrics`] - Font-free fallback metrics
//!
//! ## Output
//!
//! - [`LayoutOutput`] - Flattened draw items for renderers
//! - [`Node::dump`] - Human-readable tree dump for debugging
//!
//! ```
//! use trellis::{ApproximateMetrics, Direction, Node, PaperSize, Size, Spacing};
//!
//! let mut page = Node::new()
//!     .with_paper_size(PaperSize::A4)
//!     .with_direction(Direction::TopToBottom)
//!     .with_padding(Spacing::all(36.0))
//!     .with_children(vec![
//!         Node::text("Quarterly report").with_font_size(24.0),
//!         Node::text("Revenue grew in every region.").with_width(Size::grow()),
//!     ]);
//!
//! page.compute_layout(&mut ApproximateMetrics::default());
//!
//! let body = &page.children()[1];
//! assert_eq!(body.width().value(), 595.0 - 72.0);
//! assert_eq!(body.position().x, 36.0);
//! ```

mod content;
mod debug;
mod layout;
mod measure;
mod node;
mod output;
mod pipeline;
mod primitives;

pub use content::*;
pub use debug::*;
pub use layout::*;
pub use measure::*;
pub use node::*;
pub use output::*;
pub use pipeline::*;
pub use primitives::*;

pub use trellis_macros::WithBuilders;
