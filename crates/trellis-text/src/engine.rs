use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use cosmic_text::{fontdb, Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Wrap};
use trellis::{line_count, wrap_words, ApproximateMetrics, FontId, TextMetrics, TextRequest};
use trellis_macros::WithBuilders;

use crate::FontError;

/// Text used to probe a font's line height
const LINE_HEIGHT_PROBE: &str = "Hg";

/// Configuration for [`TextEngine`]
#[derive(Debug, Clone, PartialEq, WithBuilders)]
pub struct EngineConfig {
    /// Locale used for shaping and font fallback (e.g. "en-US")
    #[with_builders(into)]
    pub locale: String,
    /// Also resolve font ids against installed system font families
    pub load_system_fonts: bool,
    /// Line height as a multiple of the font size, used for shaping buffers
    pub line_height: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            load_system_fonts: true,
            line_height: ApproximateMetrics::DEFAULT_LINE_HEIGHT,
        }
    }
}

/// [`TextMetrics`] backed by cosmic-text shaping.
///
/// Fonts are registered under caller-chosen ids with [`TextEngine::load_font_file`] or
/// [`TextEngine::load_font_bytes`]. Text whose font id does not resolve (unregistered, not a
/// system family, or empty) is measured with [`ApproximateMetrics`].
pub struct TextEngine {
    font_system: FontSystem,
    line_height: f32,
    /// Registered font id -> family name of the loaded face
    registered: HashMap<FontId, String>,
    /// Resolution results, so system lookups and warnings happen once per id
    resolved: HashMap<FontId, Option<String>>,
    /// (family, font size bits) -> ascent + descent
    line_heights: HashMap<(String, u32), f32>,
    fallback: ApproximateMetrics,
}

impl TextEngine {
    pub fn new(config: EngineConfig) -> Self {
        let mut db = fontdb::Database::new();
        if config.load_system_fonts {
            db.load_system_fonts();
            log::debug!("loaded {} system font faces", db.len());
        }

        Self {
            font_system: FontSystem::new_with_locale_and_db(config.locale, db),
            line_height: config.line_height,
            registered: HashMap::new(),
            resolved: HashMap::new(),
            line_heights: HashMap::new(),
            fallback: ApproximateMetrics::default(),
        }
    }

    /// Read a font file and register it under `name`
    pub fn load_font_file(
        &mut self,
        name: impl Into<FontId>,
        path: impl AsRef<Path>,
    ) -> Result<(), FontError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_font_bytes(name, bytes)
    }

    /// Register font data under `name`. Re-registering a name replaces the previous font.
    pub fn load_font_bytes(
        &mut self,
        name: impl Into<FontId>,
        bytes: Vec<u8>,
    ) -> Result<(), FontError> {
        let name = name.into();
        if name.is_empty() {
            return Err(FontError::EmptyName);
        }

        let ids = self
            .font_system
            .db_mut()
            .load_font_source(fontdb::Source::Binary(Arc::new(bytes)));

        let db = self.font_system.db();
        let family = ids
            .iter()
            .filter_map(|id| db.face(*id))
            .find_map(|face| face.families.first().map(|(family, _)| family.clone()))
            .ok_or_else(|| FontError::Parse { name: name.clone() })?;

        log::debug!("registered font {name} as family {family:?}");
        self.resolved.remove(&name);
        self.registered.insert(name, family);
        Ok(())
    }

    /// Register several font files, stopping at the first failure
    pub fn load_fonts<N, P>(&mut self, fonts: &[(N, P)]) -> Result<(), FontError>
    where
        N: AsRef<str>,
        P: AsRef<Path>,
    {
        for (name, path) in fonts {
            self.load_font_file(name.as_ref(), path)?;
        }
        Ok(())
    }

    /// Ids registered so far, with the family each maps to
    pub fn registered_fonts(&self) -> impl Iterator<Item = (&FontId, &str)> {
        self.registered
            .iter()
            .map(|(id, family)| (id, family.as_str()))
    }

    /// Whether text in `font_id` is shaped with a real font
    pub fn is_resolvable(&mut self, font_id: &FontId) -> bool {
        self.resolve(font_id).is_some()
    }

    fn resolve(&mut self, font_id: &FontId) -> Option<String> {
        if let Some(family) = self.registered.get(font_id) {
            return Some(family.clone());
        }
        if let Some(cached) = self.resolved.get(font_id) {
            return cached.clone();
        }

        let system_family = (!font_id.is_empty())
            .then(|| {
                self.font_system.db().faces().find_map(|face| {
                    face.families
                        .iter()
                        .find(|(family, _)| family == font_id.as_str())
                        .map(|(family, _)| family.clone())
                })
            })
            .flatten();

        if system_family.is_none() {
            log::warn!("font {font_id:?} is not available, using approximate metrics");
        }
        self.resolved.insert(font_id.clone(), system_family.clone());
        system_family
    }

    fn shape(&mut self, family: &str, text: &str, font_size: f32) -> Buffer {
        let metrics = Metrics::new(font_size, font_size * self.line_height);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_wrap(&mut self.font_system, Wrap::None);
        buffer.set_size(&mut self.font_system, None, None);

        let attrs = Attrs::new().family(Family::Name(family));
        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(&mut self.font_system, false);
        buffer
    }

    /// Width of the widest shaped line
    fn shaped_width(&mut self, family: &str, text: &str, font_size: f32) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        let buffer = self.shape(family, text, font_size);
        buffer
            .layout_runs()
            .map(|run| run.line_w)
            .fold(0.0, f32::max)
    }

    /// Ascent + descent of a shaped probe line
    fn shaped_line_height(&mut self, family: &str, font_size: f32) -> Option<f32> {
        let key = (family.to_string(), font_size.to_bits());
        if let Some(height) = self.line_heights.get(&key) {
            return Some(*height);
        }

        let mut buffer = self.shape(family, LINE_HEIGHT_PROBE, font_size);
        let height = buffer
            .line_layout(&mut self.font_system, 0)?
            .first()
            .map(|line| line.max_ascent + line.max_descent)?;

        self.line_heights.insert(key, height);
        Some(height)
    }

    /// Family to shape `request` with, if it can be shaped at all
    fn family_for(&mut self, request: &TextRequest<'_>) -> Option<String> {
        if request.font_size <= 0.0 {
            return None;
        }
        self.resolve(request.font_id)
    }
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl std::fmt::Debug for TextEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEngine")
            .field("line_height", &self.line_height)
            .field("registered", &self.registered)
            .finish_non_exhaustive()
    }
}

impl TextMetrics for TextEngine {
    fn measure_width(&mut self, request: TextRequest<'_>) -> f32 {
        match self.family_for(&request) {
            Some(family) => self.shaped_width(&family, request.text, request.font_size),
            None => self.fallback.measure_width(request),
        }
    }

    fn measure_height(&mut self, request: TextRequest<'_>) -> f32 {
        let lines = line_count(request.text);
        if lines == 0 {
            return 0.0;
        }

        let line_height = self
            .family_for(&request)
            .and_then(|family| self.shaped_line_height(&family, request.font_size));
        match line_height {
            Some(height) => height * lines as f32,
            None => self.fallback.measure_height(request),
        }
    }

    fn wrap_to_width(&mut self, request: TextRequest<'_>, max_width: f32) -> String {
        match self.family_for(&request) {
            Some(family) => wrap_words(request.text, max_width, |line| {
                self.shaped_width(&family, line, request.font_size)
            }),
            None => self.fallback.wrap_to_width(request, max_width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis::{Node, Size};

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// Engine without system fonts: everything falls back to approximate metrics
    fn offline_engine() -> TextEngine {
        init_logging();
        TextEngine::new(EngineConfig::default().with_load_system_fonts(false))
    }

    fn request<'a>(text: &'a str, font: &'a FontId) -> TextRequest<'a> {
        TextRequest::new(text, font, 12.0)
    }

    #[test]
    fn test_config_builders() {
        let config = EngineConfig::default()
            .with_locale("de-DE")
            .with_load_system_fonts(false)
            .with_line_height(1.5);
        assert_eq!(config.locale, "de-DE");
        assert!(!config.load_system_fonts);
        assert_eq!(config.line_height, 1.5);
    }

    #[test]
    fn test_unresolved_font_uses_approximate_metrics() {
        let mut engine = offline_engine();
        let mut approx = ApproximateMetrics::default();
        let font = FontId::new("Definitely Not Installed");

        assert!(!engine.is_resolvable(&font));
        assert_eq!(
            engine.measure_width(request("Hello World", &font)),
            approx.measure_width(request("Hello World", &font))
        );
        assert_eq!(
            engine.measure_height(request("a\nb", &font)),
            approx.measure_height(request("a\nb", &font))
        );
        assert_eq!(
            engine.wrap_to_width(request("one two three", &font), 60.0),
            approx.wrap_to_width(request("one two three", &font), 60.0)
        );
    }

    #[test]
    fn test_empty_font_id_never_resolves() {
        let mut engine = offline_engine();
        assert!(!engine.is_resolvable(&FontId::default()));
    }

    #[test]
    fn test_empty_text_measures_zero() {
        let mut engine = offline_engine();
        let font = FontId::default();
        assert_eq!(engine.measure(request("", &font)), trellis::IntrinsicSize::zero());
    }

    #[test]
    fn test_missing_font_file_is_io_error() {
        let mut engine = offline_engine();
        let err = engine
            .load_font_file("Body", "/nonexistent/fonts/body.ttf")
            .unwrap_err();
        assert!(matches!(err, FontError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/fonts/body.ttf"));
    }

    #[test]
    fn test_invalid_font_data_is_parse_error() {
        let mut engine = offline_engine();
        let err = engine
            .load_font_bytes("Body", b"definitely not a font".to_vec())
            .unwrap_err();
        assert!(matches!(err, FontError::Parse { ref name } if name.as_str() == "Body"));
        assert_eq!(engine.registered_fonts().count(), 0);
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut engine = offline_engine();
        let err = engine.load_font_bytes("", Vec::new()).unwrap_err();
        assert!(matches!(err, FontError::EmptyName));
    }

    #[test]
    fn test_load_fonts_stops_at_first_failure() {
        let mut engine = offline_engine();
        let result = engine.load_fonts(&[("A", "/nonexistent/a.ttf"), ("B", "/nonexistent/b.ttf")]);
        assert!(matches!(result, Err(FontError::Io { ref path, .. }) if path.ends_with("a.ttf")));
    }

    #[test]
    fn test_layout_with_fallback_engine() {
        let mut engine = offline_engine();
        let mut root = Node::new()
            .with_width(Size::fixed(100.0))
            .with_child(Node::text("Hello World How Are You").with_font_id("Missing"));

        root.compute_layout(&mut engine);

        let text = &root.children()[0];
        assert_eq!(text.text_value(), Some("Hello World\nHow Are You"));
        assert!((text.height().value() - 2.0 * 14.4).abs() < 1e-3);
    }

    /// Shapes with whatever system font is installed; does nothing on machines without fonts
    #[test]
    fn test_system_font_shaping() {
        init_logging();
        let mut engine = TextEngine::default();
        let Some(family) = engine
            .font_system
            .db()
            .faces()
            .find_map(|face| face.families.first().map(|(family, _)| family.clone()))
        else {
            return;
        };
        let font = FontId::new(family);
        assert!(engine.is_resolvable(&font));

        let short = engine.measure_width(request("Hi", &font));
        let long = engine.measure_width(request("Hi there, general", &font));
        assert!(long > short);

        let one = engine.measure_height(request("Hello", &font));
        let two = engine.measure_height(request("Hello\nWorld", &font));
        assert!(one > 0.0);
        assert!((two - 2.0 * one).abs() < 1e-3);

        let wrapped = engine.wrap_to_width(request("Hi there, general", &font), long * 0.6);
        assert!(wrapped.contains('\n'));
    }
}
