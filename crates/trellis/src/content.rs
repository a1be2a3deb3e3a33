use trellis_macros::WithBuilders;

/// Default font size for text nodes, in points
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Identifier of a font as known to a [`TextMetrics`](crate::TextMetrics) implementation.
///
/// The empty id never resolves, so text using it is measured with the approximate fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FontId(String);

impl FontId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for FontId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FontId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for FontId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Text content of a leaf node
#[derive(Debug, Clone, PartialEq, WithBuilders)]
pub struct TextContent {
    /// Authored text; wrapping always starts from here
    #[with_builders(skip)]
    source: String,
    /// Laid out text (wrapped by the pipeline)
    #[with_builders(skip)]
    value: String,
    #[with_builders(into)]
    pub font_id: FontId,
    /// Font size in points
    pub font_size: f32,
}

impl TextContent {
    pub fn new(text: impl Into<String>) -> Self {
        let source = text.into();
        Self {
            value: source.clone(),
            source,
            font_id: FontId::default(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    /// The text as authored
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The text as laid out, with line breaks inserted by wrapping
    pub fn value(&self) -> &str {
        &self.value
    }

    pub(crate) fn set_value(&mut self, value: String) {
        self.value = value;
    }

    pub(crate) fn reset_value(&mut self) {
        if self.value != self.source {
            self.value.clone_from(&self.source);
        }
    }
}

/// Image content of a leaf node.
///
/// The layout engine does not read image data; `src` is passed through to renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageContent {
    pub src: String,
}

impl ImageContent {
    pub fn new(src: impl Into<String>) -> Self {
        Self { src: src.into() }
    }
}

/// What a node is
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NodeKind {
    /// Layout container
    #[default]
    Box,
    /// Leaf with string content
    Text(TextContent),
    /// Leaf with an image source
    Image(ImageContent),
}

impl NodeKind {
    pub fn is_leaf_kind(&self) -> bool {
        !matches!(self, NodeKind::Box)
    }

    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Box => "Box",
            NodeKind::Text(_) => "Text",
            NodeKind::Image(_) => "Image",
        }
    }
}

/// Horizontal placement of children within the content area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical placement of children within the content area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl HorizontalAlign {
    /// Offset of a block of `extent` inside `available` space
    pub(crate) fn offset(self, available: f32, extent: f32) -> f32 {
        match self {
            HorizontalAlign::Left => 0.0,
            HorizontalAlign::Center => (available - extent) / 2.0,
            HorizontalAlign::Right => available - extent,
        }
    }
}

impl VerticalAlign {
    /// Offset of a block of `extent` inside `available` space
    pub(crate) fn offset(self, available: f32, extent: f32) -> f32 {
        match self {
            VerticalAlign::Top => 0.0,
            VerticalAlign::Middle => (available - extent) / 2.0,
            VerticalAlign::Bottom => available - extent,
        }
    }
}
