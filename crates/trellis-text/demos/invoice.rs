//! Lays out a one-page invoice and prints the resolved tree.
//!
//! Usage: `cargo run --example invoice [path/to/font.ttf]`
//!
//! Without a font file the text is measured with system fonts when "Body" names an installed
//! family, and with approximate metrics otherwise. Set `RUST_LOG=trellis=trace` to follow the
//! individual layout passes.

use trellis::{
    Direction, DrawContent, DumpOptions, HorizontalAlign, LayoutOutput, Node, PaperSize, Size,
    Spacing, VerticalAlign,
};
use trellis_text::{EngineConfig, TextEngine};

const BODY_FONT: &str = "Body";
/// A4 width minus the page's horizontal padding. Grow labels only receive leftover space
/// from a parent with a concrete width, so the rows are sized explicitly.
const CONTENT_WIDTH: f32 = 595.0 - 2.0 * 48.0;

fn line_item(description: &str, quantity: u32, price: f32) -> Node {
    Node::new()
        .with_width(Size::fixed(CONTENT_WIDTH))
        .with_child_gap(12.0)
        .with_children(vec![
            Node::text(description)
                .with_font_id(BODY_FONT)
                .with_width(Size::grow()),
            Node::text(quantity.to_string())
                .with_font_id(BODY_FONT)
                .with_width(Size::fixed(40.0)),
            Node::text(format!("{:.2}", price * quantity as f32))
                .with_font_id(BODY_FONT)
                .with_width(Size::fit().with_min(70.0)),
        ])
}

fn invoice() -> Node {
    let header = Node::new()
        .with_width(Size::fixed(CONTENT_WIDTH))
        .with_v_align(VerticalAlign::Middle)
        .with_children(vec![
            Node::text("INVOICE")
                .with_font_id(BODY_FONT)
                .with_font_size(28.0)
                .with_width(Size::grow()),
            Node::image("logo.png").with_size(96.0, 48.0),
        ]);

    let items = Node::new()
        .with_width(Size::fixed(CONTENT_WIDTH))
        .with_direction(Direction::TopToBottom)
        .with_child_gap(6.0)
        .with_children(vec![
            line_item("Layout engine consulting, on-site workshop", 2, 950.0),
            line_item("Font licensing for print and screen use", 1, 120.0),
            line_item("Travel", 1, 85.5),
        ]);

    let total = Node::new()
        .with_width(Size::fixed(CONTENT_WIDTH))
        .with_h_align(HorizontalAlign::Right)
        .with_child(
            Node::text("Total due: 2105.50")
                .with_font_id(BODY_FONT)
                .with_font_size(14.0),
        );

    let terms = Node::text(
        "Payment is due within thirty days of the invoice date. Please include the invoice \
         number with your transfer. Late payments are subject to a fee of two percent per \
         month on the outstanding balance.",
    )
    .with_font_id(BODY_FONT)
    .with_font_size(9.0)
    .with_width(Size::grow());

    Node::new()
        .with_id("page")
        .with_paper_size(PaperSize::A4)
        .with_direction(Direction::TopToBottom)
        .with_padding(Spacing::symmetric(48.0, 56.0))
        .with_child_gap(24.0)
        .with_children(vec![header, items, total, terms])
}

fn main() {
    env_logger::init();

    let mut engine = TextEngine::new(EngineConfig::default());
    if let Some(path) = std::env::args().nth(1) {
        if let Err(err) = engine.load_font_file(BODY_FONT, &path) {
            log::error!("{err}");
            std::process::exit(1);
        }
    }

    let mut page = invoice();
    let output = LayoutOutput::from_node_with_metrics(&mut page, &mut engine);

    print!("{}", page.dump(&DumpOptions::all()));

    println!();
    println!("{} draw items", output.len());
    for item in output.texts() {
        if let DrawContent::Text { text, .. } = &item.content {
            let lines = text.lines().count();
            println!(
                "  text at ({:.1}, {:.1}), {} line(s): {:?}",
                item.rect.min[0],
                item.rect.min[1],
                lines,
                text.lines().next().unwrap_or_default()
            );
        }
    }
}
