//! The sizing pipeline.
//!
//! Layout runs six passes over the whole tree, always in this order:
//!
//! 1. fit widths (post-order)
//! 2. grow & shrink widths (pre-order)
//! 3. wrap text to the resolved widths (pre-order)
//! 4. fit heights (post-order)
//! 5. grow & shrink heights (pre-order)
//! 6. positions (pre-order)
//!
//! Widths are final before any text is wrapped, and heights are computed from the
//! wrapped text, so each pass only reads values earlier passes have settled.

use trellis_macros::WithBuilders;

use crate::content::NodeKind;
use crate::layout::{Direction, Position, Size};
use crate::measure::{TextMetrics, TextRequest};
use crate::node::Node;

/// Options for [`Node::compute_layout_with_options`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, WithBuilders)]
pub struct LayoutOptions {
    /// Reject trees with more levels than this before touching any node
    #[with_builders(into)]
    pub max_depth: Option<usize>,
}

/// Errors returned by [`Node::compute_layout_with_options`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout tree is {depth} levels deep, which exceeds the limit of {limit}")]
    DepthExceeded { depth: usize, limit: usize },
}

/// Lay out an optional tree in place.
///
/// `None` is returned unchanged; otherwise the same root comes back with every size,
/// position and wrapped text resolved.
pub fn layout<'a>(
    root: Option<&'a mut Node>,
    metrics: &mut dyn TextMetrics,
) -> Option<&'a mut Node> {
    let root = root?;
    root.compute_layout(metrics);
    Some(root)
}

impl Node {
    /// Run the full sizing pipeline with this node as the root.
    ///
    /// Running it again on an already laid out tree gives identical results.
    pub fn compute_layout(&mut self, metrics: &mut dyn TextMetrics) {
        run_passes(self, metrics);
    }

    /// Like [`Node::compute_layout`], but validates the tree against `options` first.
    ///
    /// On error the tree is left untouched.
    pub fn compute_layout_with_options(
        &mut self,
        metrics: &mut dyn TextMetrics,
        options: &LayoutOptions,
    ) -> Result<(), LayoutError> {
        if let Some(limit) = options.max_depth {
            let depth = self.depth();
            if depth > limit {
                log::warn!("refusing to lay out tree of depth {depth} (limit {limit})");
                return Err(LayoutError::DepthExceeded { depth, limit });
            }
        }

        run_passes(self, metrics);
        Ok(())
    }
}

fn run_passes(root: &mut Node, metrics: &mut dyn TextMetrics) {
    if log::log_enabled!(log::Level::Debug) {
        log::debug!(
            "laying out {} nodes, depth {}",
            root.node_count(),
            root.depth()
        );
    }

    fit_sizes(root, Axis::X, metrics);
    log::trace!("pass 1: fit widths, root width = {}", root.width().value());

    distribute(root, Axis::X);
    log::trace!("pass 2: grow & shrink widths");

    wrap_text(root, metrics);
    log::trace!("pass 3: wrap text");

    fit_sizes(root, Axis::Y, metrics);
    log::trace!("pass 4: fit heights, root height = {}", root.height().value());

    distribute(root, Axis::Y);
    log::trace!("pass 5: grow & shrink heights");

    place(root, true);
    log::trace!("pass 6: positions");
}

/// The axis a sizing pass works on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn size(self, node: &Node) -> &Size {
        match self {
            Axis::X => node.width(),
            Axis::Y => node.height(),
        }
    }

    fn size_mut(self, node: &mut Node) -> &mut Size {
        match self {
            Axis::X => node.width_mut(),
            Axis::Y => node.height_mut(),
        }
    }

    /// Padding on both ends of this axis
    fn padding(self, node: &Node) -> f32 {
        match self {
            Axis::X => node.padding().horizontal(),
            Axis::Y => node.padding().vertical(),
        }
    }

    /// Whether children are stacked along this axis
    fn is_main(self, direction: Direction) -> bool {
        matches!(
            (self, direction),
            (Axis::X, Direction::LeftToRight) | (Axis::Y, Direction::TopToBottom)
        )
    }
}

/// Passes 1 and 4: resolve Fit sizes bottom-up
fn fit_sizes(node: &mut Node, axis: Axis, metrics: &mut dyn TextMetrics) {
    for child in node.children_mut() {
        fit_sizes(child, axis, metrics);
    }

    if !axis.size(node).is_fit() {
        axis.size_mut(node).reset();
        return;
    }

    let content = content_extent(node, axis, metrics);
    let padding = axis.padding(node);
    let size = axis.size_mut(node);
    let resolved = size.clamp(content + padding);
    size.set_value(resolved);
}

fn content_extent(node: &Node, axis: Axis, metrics: &mut dyn TextMetrics) -> f32 {
    if let NodeKind::Text(text) = node.kind() {
        return match axis {
            // Widths come from the authored text, heights from the wrapped lines
            Axis::X => metrics.measure_width(TextRequest::new(
                text.source(),
                &text.font_id,
                text.font_size,
            )),
            Axis::Y => metrics.measure_height(TextRequest::from_text_content(text)),
        };
    }

    let sizes = node.children().iter().map(|child| axis.size(child).value());
    if axis.is_main(node.direction()) {
        sizes.sum::<f32>() + node.total_gap()
    } else {
        sizes.fold(0.0, f32::max)
    }
}

/// Passes 2 and 5: hand space down to Grow children, shrink overflowing rows
fn distribute(node: &mut Node, axis: Axis) {
    if node.children().is_empty() {
        return;
    }

    let size = axis.size(node);
    // A Grow node has no space of its own to hand out to its children
    let available = if size.is_grow() {
        0.0
    } else {
        size.value() - axis.padding(node)
    };

    if axis.is_main(node.direction()) {
        grow_along_main(node, axis, available);
        shrink_along_main(node, axis, available);
    } else {
        let fill = available.max(0.0);
        for child in node.children_mut() {
            let size = axis.size_mut(child);
            if size.is_grow() {
                size.set_value(fill);
            }
        }
    }

    for child in node.children_mut() {
        distribute(child, axis);
    }
}

fn grow_along_main(node: &mut Node, axis: Axis, available: f32) {
    let (grow_count, used) =
        node.children()
            .iter()
            .fold((0usize, node.total_gap()), |(count, used), child| {
                let size = axis.size(child);
                if size.is_grow() {
                    (count + 1, used)
                } else {
                    (count, used + size.value())
                }
            });

    if grow_count == 0 {
        return;
    }

    let remaining = available - used;
    let share = if remaining > 0.0 {
        remaining / grow_count as f32
    } else {
        0.0
    };

    for child in node.children_mut() {
        let size = axis.size_mut(child);
        if size.is_grow() {
            size.set_value(share);
        }
    }
}

fn shrink_along_main(node: &mut Node, axis: Axis, available: f32) {
    let required = node
        .children()
        .iter()
        .map(|child| axis.size(child).value())
        .sum::<f32>()
        + node.total_gap();

    if available <= 0.0 || required <= 0.0 || required <= available {
        return;
    }

    let ratio = available / required;
    for child in node.children_mut() {
        let size = axis.size_mut(child);
        let shrunk = size.value() * ratio;
        size.set_value(size.min().map_or(shrunk, |min| shrunk.max(min)));
    }
}

/// Pass 3: wrap every text node to its resolved content width
fn wrap_text(node: &mut Node, metrics: &mut dyn TextMetrics) {
    let available = node.width().value() - node.padding().horizontal();

    if let NodeKind::Text(text) = node.kind_mut() {
        text.reset_value();
        // Whitespace-only text keeps its source so its height matches its measured width
        if !text.source().trim().is_empty() && available > 0.0 {
            let request = TextRequest::new(text.source(), &text.font_id, text.font_size);
            let wrapped = metrics.wrap_to_width(request, available);
            text.set_value(wrapped);
        }
    }

    for child in node.children_mut() {
        wrap_text(child, metrics);
    }
}

/// Pass 6: place children inside their parent's content area
fn place(node: &mut Node, is_root: bool) {
    if is_root {
        node.set_position(Position::ORIGIN);
    }

    let content = node.content_rect();
    let gap = node.child_gap();
    let h_align = node.h_align();
    let v_align = node.v_align();

    match node.direction() {
        Direction::LeftToRight => {
            let extent = node
                .children()
                .iter()
                .map(|child| child.width().value())
                .sum::<f32>()
                + node.total_gap();
            let mut x = content.min[0] + h_align.offset(content.width(), extent);

            for child in node.children_mut() {
                let y = content.min[1] + v_align.offset(content.height(), child.height().value());
                child.set_position(Position::new(x, y));
                x += child.width().value() + gap;
            }
        }
        Direction::TopToBottom => {
            let extent = node
                .children()
                .iter()
                .map(|child| child.height().value())
                .sum::<f32>()
                + node.total_gap();
            let mut y = content.min[1] + v_align.offset(content.height(), extent);

            for child in node.children_mut() {
                let x = content.min[0] + h_align.offset(content.width(), child.width().value());
                child.set_position(Position::new(x, y));
                y += child.height().value() + gap;
            }
        }
    }

    for child in node.children_mut() {
        place(child, false);
    }
}
