use crate::content::{FontId, ImageContent, NodeKind, TextContent};
use crate::content::{HorizontalAlign, VerticalAlign};
use crate::layout::{Direction, PaperSize, Position, Size, Spacing};
use crate::primitives::Rect;

/// Unique identifier for a node, used to look nodes up after layout
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(String);

impl NodeId {
    /// Create a new NodeId from a string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A box in the layout tree
///
/// Nodes are either:
/// - Boxes: containers that lay out their children along `direction`
/// - Text leaves: measured and wrapped through a [`TextMetrics`](crate::TextMetrics) oracle
/// - Image leaves: sized only by their own `Size` rules
///
/// Configuration fields are private - use the builder methods (`with_*`) to configure nodes.
/// Geometry (resolved sizes, position, wrapped text) is written by the layout pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Optional identifier for this node
    id: Option<NodeId>,
    kind: NodeKind,
    /// Main axis for children
    direction: Direction,
    width: Size,
    height: Size,
    /// Padding inside the node
    padding: Spacing,
    /// Gap between consecutive children along the main axis
    child_gap: f32,
    /// Horizontal alignment of children within this container
    ///
    /// For LeftToRight: aligns the whole block of children (main axis)
    /// For TopToBottom: aligns each child on its own (cross axis)
    h_align: HorizontalAlign,
    /// Vertical alignment of children within this container
    ///
    /// For LeftToRight: aligns each child on its own (cross axis)
    /// For TopToBottom: aligns the whole block of children (main axis)
    v_align: VerticalAlign,
    children: Vec<Node>,
    /// Top-left corner, absolute (filled during layout pass)
    position: Position,
}

impl Node {
    /// Create a new box with default settings (Fit x Fit, LeftToRight, Left/Top)
    pub fn new() -> Self {
        Self::with_kind(NodeKind::Box)
    }

    /// Create a text leaf
    pub fn text(text: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Text(TextContent::new(text)))
    }

    /// Create an image leaf
    pub fn image(src: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Image(ImageContent::new(src)))
    }

    fn with_kind(kind: NodeKind) -> Self {
        Self {
            id: None,
            kind,
            direction: Direction::default(),
            width: Size::default(),
            height: Size::default(),
            padding: Spacing::ZERO,
            child_gap: 0.0,
            h_align: HorizontalAlign::default(),
            v_align: VerticalAlign::default(),
            children: Vec::new(),
            position: Position::ORIGIN,
        }
    }

    /// Set the node ID
    pub fn with_id(mut self, id: impl Into<NodeId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the width rule
    pub fn with_width(mut self, width: Size) -> Self {
        self.width = width;
        self
    }

    /// Set the height rule
    pub fn with_height(mut self, height: Size) -> Self {
        self.height = height;
        self
    }

    /// Set both width and height rules
    pub fn with_sizing(self, width: Size, height: Size) -> Self {
        self.with_width(width).with_height(height)
    }

    /// Set both width and height to fixed values
    pub fn with_size(self, width: f32, height: f32) -> Self {
        self.with_sizing(Size::fixed(width), Size::fixed(height))
    }

    /// Set both axes to a fixed paper format
    pub fn with_paper_size(self, paper: PaperSize) -> Self {
        let (width, height) = paper.dimensions();
        self.with_size(width, height)
    }

    /// Set the direction children are laid out in
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the padding
    pub fn with_padding(mut self, padding: Spacing) -> Self {
        assert!(
            padding.is_non_negative(),
            "Padding must not be negative: {padding:?}"
        );
        self.padding = padding;
        self
    }

    /// Set the gap between children
    pub fn with_child_gap(mut self, gap: f32) -> Self {
        assert!(gap >= 0.0, "Child gap must not be negative: {gap}");
        self.child_gap = gap;
        self
    }

    /// Set horizontal alignment of children within this container
    pub fn with_h_align(mut self, align: HorizontalAlign) -> Self {
        self.h_align = align;
        self
    }

    /// Set vertical alignment of children within this container
    pub fn with_v_align(mut self, align: VerticalAlign) -> Self {
        self.v_align = align;
        self
    }

    /// Set both alignments
    pub fn with_alignment(self, h_align: HorizontalAlign, v_align: VerticalAlign) -> Self {
        self.with_h_align(h_align).with_v_align(v_align)
    }

    /// Set the font of a text node
    pub fn with_font_id(mut self, font_id: impl Into<FontId>) -> Self {
        let text = self.text_content_mut_or_panic("with_font_id");
        text.font_id = font_id.into();
        self
    }

    /// Set the font size of a text node
    pub fn with_font_size(mut self, font_size: f32) -> Self {
        assert!(font_size > 0.0, "Font size must be positive: {font_size}");
        let text = self.text_content_mut_or_panic("with_font_size");
        text.font_size = font_size;
        self
    }

    /// Add a child node
    pub fn with_child(mut self, child: Node) -> Self {
        assert!(
            !self.kind.is_leaf_kind(),
            "Cannot add children to a {} node",
            self.kind.name()
        );
        self.children.push(child);
        self
    }

    /// Add multiple children
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        assert!(
            !self.kind.is_leaf_kind(),
            "Cannot add children to a {} node",
            self.kind.name()
        );
        self.children.extend(children);
        self
    }

    fn text_content_mut_or_panic(&mut self, method: &str) -> &mut TextContent {
        match &mut self.kind {
            NodeKind::Text(text) => text,
            other => panic!("{method} is only valid on Text nodes, not {}", other.name()),
        }
    }

    /// Get the node ID, if set
    pub fn id(&self) -> Option<&NodeId> {
        self.id.as_ref()
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Text content, for text nodes
    pub fn text_content(&self) -> Option<&TextContent> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Laid out text (wrapped after layout), for text nodes
    pub fn text_value(&self) -> Option<&str> {
        self.text_content().map(TextContent::value)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn width(&self) -> &Size {
        &self.width
    }

    pub fn height(&self) -> &Size {
        &self.height
    }

    pub fn padding(&self) -> Spacing {
        self.padding
    }

    pub fn child_gap(&self) -> f32 {
        self.child_gap
    }

    pub fn h_align(&self) -> HorizontalAlign {
        self.h_align
    }

    pub fn v_align(&self) -> VerticalAlign {
        self.v_align
    }

    /// Get the children
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// The node's box (position + resolved size)
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(
            [self.position.x, self.position.y],
            [self.width.value(), self.height.value()],
        )
    }

    /// The node's box minus its padding
    pub fn content_rect(&self) -> Rect {
        self.rect().inset(self.padding)
    }

    /// Total gap space between children along the main axis
    pub(crate) fn total_gap(&self) -> f32 {
        self.child_gap * self.children.len().saturating_sub(1) as f32
    }

    // Internal mutators (used by the pipeline)

    pub(crate) fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    pub(crate) fn width_mut(&mut self) -> &mut Size {
        &mut self.width
    }

    pub(crate) fn height_mut(&mut self) -> &mut Size {
        &mut self.height
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    /// Visit this node and all descendants in pre-order, with their depth (root = 0)
    pub fn walk<F>(&self, visit: &mut F)
    where
        F: FnMut(&Node, usize),
    {
        self.walk_at(0, visit);
    }

    fn walk_at<F>(&self, depth: usize, visit: &mut F)
    where
        F: FnMut(&Node, usize),
    {
        visit(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, visit);
        }
    }

    /// Find a node by ID (pre-order, first match)
    pub fn find(&self, id: &str) -> Option<&Node> {
        if self.id.as_ref().is_some_and(|own| own.as_str() == id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Number of levels in this subtree (a lone node has depth 1).
    ///
    /// Computed without recursion so it is safe on pathological trees.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
        max_depth
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Sizing;

    #[test]
    fn test_box_defaults() {
        let node = Node::new();
        assert_eq!(node.kind(), &NodeKind::Box);
        assert_eq!(node.direction(), Direction::LeftToRight);
        assert_eq!(node.width().sizing(), Sizing::Fit);
        assert_eq!(node.height().sizing(), Sizing::Fit);
        assert!(node.width().min().is_none());
        assert!(node.width().max().is_none());
        assert_eq!(node.h_align(), HorizontalAlign::Left);
        assert_eq!(node.v_align(), VerticalAlign::Top);
        assert_eq!(node.padding(), Spacing::ZERO);
        assert_eq!(node.child_gap(), 0.0);
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_text_node_options() {
        let node = Node::text("Test").with_font_size(14.0).with_font_id("Arial");
        let text = node.text_content().unwrap();
        assert_eq!(text.source(), "Test");
        assert_eq!(text.font_size, 14.0);
        assert_eq!(text.font_id.as_str(), "Arial");
        assert_eq!(node.width().sizing(), Sizing::Fit);
    }

    #[test]
    fn test_image_node_with_fixed_size() {
        let node = Node::image("test.jpg").with_size(100.0, 200.0);
        assert_eq!(node.kind(), &NodeKind::Image(ImageContent::new("test.jpg")));
        assert_eq!(node.width().sizing(), Sizing::Fixed(100.0));
        assert_eq!(node.width().value(), 100.0);
        assert_eq!(node.height().value(), 200.0);
    }

    #[test]
    fn test_children_keep_order() {
        let parent = Node::new().with_children(vec![
            Node::new().with_id("a"),
            Node::new().with_id("b"),
            Node::new().with_id("c"),
        ]);
        let ids: Vec<_> = parent
            .children()
            .iter()
            .map(|child| child.id().unwrap().as_str())
            .collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    #[should_panic(expected = "Cannot add children to a Text node")]
    fn test_text_nodes_cannot_have_children() {
        let _ = Node::text("leaf").with_child(Node::new());
    }

    #[test]
    #[should_panic(expected = "only valid on Text nodes")]
    fn test_font_size_on_box_panics() {
        let _ = Node::new().with_font_size(12.0);
    }

    #[test]
    #[should_panic(expected = "must not be negative")]
    fn test_negative_gap_panics() {
        let _ = Node::new().with_child_gap(-1.0);
    }

    #[test]
    fn test_paper_size_sets_fixed_axes() {
        let page = Node::new().with_paper_size(PaperSize::A4);
        assert_eq!(page.width().sizing(), Sizing::Fixed(595.0));
        assert_eq!(page.height().sizing(), Sizing::Fixed(842.0));
    }

    #[test]
    fn test_walk_depth_and_count() {
        let tree = Node::new().with_id("root").with_children(vec![
            Node::new().with_child(Node::text("deep")),
            Node::image("img.png"),
        ]);

        let mut visited = Vec::new();
        tree.walk(&mut |node, depth| visited.push((node.kind().name(), depth)));

        assert_eq!(
            visited,
            [("Box", 0), ("Box", 1), ("Text", 2), ("Image", 1)]
        );
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.depth(), 3);
        assert!(tree.find("root").is_some());
        assert!(tree.find("missing").is_none());
    }
}
