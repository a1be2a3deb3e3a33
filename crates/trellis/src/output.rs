use crate::content::{FontId, NodeKind};
use crate::layout::Position;
use crate::measure::TextMetrics;
use crate::node::{Node, NodeId};
use crate::primitives::Rect;

/// What a renderer should draw for one node
#[derive(Clone, Debug, PartialEq)]
pub enum DrawContent {
    /// A container; renderers typically draw nothing or a background
    Box,
    /// Laid out (wrapped) text
    Text {
        text: String,
        font_id: FontId,
        font_size: f32,
    },
    /// An image source, passed through untouched
    Image { src: String },
}

/// One node of a laid out tree, flattened for rendering
#[derive(Clone, Debug, PartialEq)]
pub struct DrawItem {
    pub id: Option<NodeId>,
    /// The node's full box
    pub rect: Rect,
    /// The box minus padding
    pub content_rect: Rect,
    /// Distance from the root (root = 0)
    pub depth: usize,
    pub content: DrawContent,
}

/// A laid out tree flattened into draw items, in pre-order (parents before children)
#[derive(Clone, Debug, Default)]
pub struct LayoutOutput {
    pub items: Vec<DrawItem>,
}

impl LayoutOutput {
    /// Collect draw items from an already laid out tree
    pub fn from_node(root: &Node) -> Self {
        let mut items = Vec::with_capacity(root.node_count());
        root.walk(&mut |node, depth| items.push(draw_item(node, depth)));
        Self { items }
    }

    /// Lay out `root` and collect its draw items
    pub fn from_node_with_metrics(root: &mut Node, metrics: &mut dyn TextMetrics) -> Self {
        root.compute_layout(metrics);
        Self::from_node(root)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Text items only
    pub fn texts(&self) -> impl Iterator<Item = &DrawItem> {
        self.items
            .iter()
            .filter(|item| matches!(item.content, DrawContent::Text { .. }))
    }

    /// Find an item by node ID
    pub fn get(&self, id: &str) -> Option<&DrawItem> {
        self.items
            .iter()
            .find(|item| item.id.as_ref().is_some_and(|own| own.as_str() == id))
    }

    /// All items whose box contains `point`, ordered from shallowest to deepest
    pub fn hit_test(&self, point: Position) -> Vec<&DrawItem> {
        let mut hits: Vec<&DrawItem> = self
            .items
            .iter()
            .filter(|item| item.rect.contains(point))
            .collect();
        hits.sort_by_key(|item| item.depth);
        hits
    }

    /// The deepest item whose box contains `point`
    pub fn hit_test_deepest(&self, point: Position) -> Option<&DrawItem> {
        self.hit_test(point).pop()
    }
}

fn draw_item(node: &Node, depth: usize) -> DrawItem {
    let content = match node.kind() {
        NodeKind::Box => DrawContent::Box,
        NodeKind::Text(text) => DrawContent::Text {
            text: text.value().to_string(),
            font_id: text.font_id.clone(),
            font_size: text.font_size,
        },
        NodeKind::Image(image) => DrawContent::Image {
            src: image.src.clone(),
        },
    };

    DrawItem {
        id: node.id().cloned(),
        rect: node.rect(),
        content_rect: node.content_rect(),
        depth,
        content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Direction, Spacing};
    use crate::measure::ApproximateMetrics;

    fn page() -> Node {
        Node::new()
            .with_id("page")
            .with_size(300.0, 200.0)
            .with_direction(Direction::TopToBottom)
            .with_padding(Spacing::all(10.0))
            .with_children(vec![
                Node::text("Title").with_id("title").with_font_size(20.0),
                Node::new().with_id("body").with_child(
                    Node::image("chart.png")
                        .with_id("chart")
                        .with_size(100.0, 50.0),
                ),
            ])
    }

    #[test]
    fn test_items_follow_tree_order() {
        let mut root = page();
        let output = LayoutOutput::from_node_with_metrics(&mut root, &mut ApproximateMetrics::default());

        assert_eq!(output.len(), 4);
        let depths: Vec<usize> = output.items.iter().map(|item| item.depth).collect();
        assert_eq!(depths, [0, 1, 1, 2]);

        assert_eq!(output.items[0].content, DrawContent::Box);
        assert_eq!(
            output.items[3].content,
            DrawContent::Image {
                src: "chart.png".to_string()
            }
        );
    }

    #[test]
    fn test_rects_match_node_geometry() {
        let mut root = page();
        root.compute_layout(&mut ApproximateMetrics::default());
        let output = LayoutOutput::from_node(&root);

        let page = output.get("page").unwrap();
        assert_eq!(page.rect, Rect::new([0.0, 0.0], [300.0, 200.0]));
        assert_eq!(page.content_rect, Rect::new([10.0, 10.0], [290.0, 190.0]));

        // "Title" at 20pt is 20 * 1.2 = 24 tall; body starts right below it
        let chart = output.get("chart").unwrap();
        assert_eq!(chart.rect.origin(), root.find("chart").unwrap().position());
        assert_eq!(chart.rect.width(), 100.0);
        assert!((chart.rect.min[1] - 34.0).abs() < 1e-3);
    }

    #[test]
    fn test_text_items_carry_wrapped_text_and_font() {
        let mut root = Node::new()
            .with_width(crate::Size::fixed(60.0))
            .with_child(Node::text("alpha beta").with_font_id("Serif"));
        let output = LayoutOutput::from_node_with_metrics(&mut root, &mut ApproximateMetrics::default());

        let texts: Vec<&DrawItem> = output.texts().collect();
        assert_eq!(texts.len(), 1);
        assert_eq!(
            texts[0].content,
            DrawContent::Text {
                text: "alpha\nbeta".to_string(),
                font_id: FontId::new("Serif"),
                font_size: 12.0,
            }
        );
    }

    #[test]
    fn test_hit_test_orders_shallow_to_deep() {
        let mut root = page();
        let output = LayoutOutput::from_node_with_metrics(&mut root, &mut ApproximateMetrics::default());

        let chart = output.get("chart").unwrap().rect;
        let inside = Position::new(chart.min[0] + 1.0, chart.min[1] + 1.0);
        let hits: Vec<Option<&str>> = output
            .hit_test(inside)
            .iter()
            .map(|item| item.id.as_ref().map(NodeId::as_str))
            .collect();
        assert_eq!(hits, [Some("page"), Some("body"), Some("chart")]);

        let deepest = output.hit_test_deepest(inside).unwrap();
        assert_eq!(deepest.id, Some(NodeId::new("chart")));
        assert!(output.hit_test_deepest(Position::new(500.0, 500.0)).is_none());
    }
}
