use std::fmt::Write;

use trellis_macros::WithBuilders;

use crate::content::NodeKind;
use crate::layout::{Size, Sizing};
use crate::node::Node;

/// What [`Node::dump`] prints besides kind, sizing rules, size and position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, WithBuilders)]
pub struct DumpOptions {
    /// Print padding (top right bottom left)
    pub show_padding: bool,
    /// Print text values, with wrapped lines escaped
    pub show_text: bool,
    /// Print image sources
    pub show_images: bool,
}

impl DumpOptions {
    /// Create dump options with nothing extra enabled
    pub const fn none() -> Self {
        Self {
            show_padding: false,
            show_text: false,
            show_images: false,
        }
    }

    /// Create dump options with everything enabled
    pub const fn all() -> Self {
        Self {
            show_padding: true,
            show_text: true,
            show_images: true,
        }
    }
}

impl Node {
    /// Render the tree as indented text, one node per line.
    ///
    /// ```
    /// # use trellis::{ApproximateMetrics, DumpOptions, Node};
    /// let mut root = Node::new().with_child(Node::new().with_size(10.0, 20.0));
    /// root.compute_layout(&mut ApproximateMetrics::default());
    /// assert_eq!(
    ///     root.dump(&DumpOptions::none()),
    ///     "Box [Fit x Fit] 10x20 @ (0, 0)\n  Box [Fixed(10) x Fixed(20)] 10x20 @ (0, 0)\n"
    /// );
    /// ```
    pub fn dump(&self, options: &DumpOptions) -> String {
        let mut out = String::new();
        self.walk(&mut |node, depth| {
            // Writing to a String cannot fail
            let _ = dump_line(&mut out, node, depth, options);
        });
        out
    }
}

fn dump_line(
    out: &mut String,
    node: &Node,
    depth: usize,
    options: &DumpOptions,
) -> std::fmt::Result {
    write!(out, "{:indent$}{}", "", node.kind().name(), indent = depth * 2)?;
    if let Some(id) = node.id() {
        write!(out, " #{}", id.as_str())?;
    }

    let position = node.position();
    write!(
        out,
        " [{} x {}] {}x{} @ ({}, {})",
        SizingLabel(node.width()),
        SizingLabel(node.height()),
        Num(node.width().value()),
        Num(node.height().value()),
        Num(position.x),
        Num(position.y),
    )?;

    if options.show_padding {
        let padding = node.padding();
        write!(
            out,
            " padding({} {} {} {})",
            Num(padding.top),
            Num(padding.right),
            Num(padding.bottom),
            Num(padding.left)
        )?;
    }

    match node.kind() {
        NodeKind::Text(text) if options.show_text => write!(out, " {:?}", text.value())?,
        NodeKind::Image(image) if options.show_images => write!(out, " src={:?}", image.src)?,
        _ => {}
    }

    writeln!(out)
}

/// Sizing rule with its clamps, e.g. `Fit(min 10)`
struct SizingLabel<'a>(&'a Size);

impl std::fmt::Display for SizingLabel<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.sizing() {
            Sizing::Fit => f.write_str("Fit")?,
            Sizing::Fixed(value) => write!(f, "Fixed({})", Num(value))?,
            Sizing::Grow => f.write_str("Grow")?,
        }

        match (self.0.min(), self.0.max()) {
            (Some(min), Some(max)) => write!(f, "(min {}, max {})", Num(min), Num(max)),
            (Some(min), None) => write!(f, "(min {})", Num(min)),
            (None, Some(max)) => write!(f, "(max {})", Num(max)),
            (None, None) => Ok(()),
        }
    }
}

/// Number with at most two decimals and no trailing zeros
struct Num(f32);

impl std::fmt::Display for Num {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rounded = format!("{:.2}", self.0);
        let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
        match trimmed {
            "-0" => f.write_str("0"),
            other => f.write_str(other),
        }
    }
}
