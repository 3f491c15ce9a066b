//! Text measurement for sizing diagram boxes.
//!
//! Box widths are derived from the text they display. Two backends are
//! available through the [`TextMeasure`] trait:
//!
//! - [`EstimateMeasure`] - a fixed advance per character. Deterministic and
//!   independent of installed fonts; this is the default.
//! - [`FontMeasure`] - shapes the text with `cosmic-text` against the system
//!   fonts for an accurate width.
//!
//! # Example
//!
//! ```
//! # use xsdvi_core::text::{EstimateMeasure, TextMeasure};
//! let measure = EstimateMeasure::default();
//! assert_eq!(measure.text_width("abc"), 3.0 * measure.char_width());
//! ```

use std::sync::{Arc, Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;

/// Default horizontal advance of one character, in pixels.
pub const DEFAULT_CHAR_WIDTH: f32 = 7.0;

/// Measures the rendered width of single-line text.
pub trait TextMeasure {
    /// Width of `text` in pixels.
    fn text_width(&self, text: &str) -> f32;

    /// Width of one average character, used for fixed-character allowances.
    fn char_width(&self) -> f32;
}

/// Estimates text width as a fixed advance per character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimateMeasure {
    char_width: f32,
}

impl EstimateMeasure {
    /// Creates an estimate with the given per-character advance.
    pub fn new(char_width: f32) -> Self {
        Self { char_width }
    }
}

impl Default for EstimateMeasure {
    fn default() -> Self {
        Self::new(DEFAULT_CHAR_WIDTH)
    }
}

impl TextMeasure for EstimateMeasure {
    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_width
    }

    fn char_width(&self) -> f32 {
        self.char_width
    }
}

/// Measures text by shaping it with real font metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct FontMeasure {
    font_family: String,
    font_size: f32,
}

impl FontMeasure {
    /// Creates a measure for the given font family and size in pixels.
    pub fn new(font_family: impl Into<String>, font_size: f32) -> Self {
        Self {
            font_family: font_family.into(),
            font_size,
        }
    }
}

impl TextMeasure for FontMeasure {
    fn text_width(&self, text: &str) -> f32 {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .calculate_text_width(text, &self.font_family, self.font_size)
    }

    fn char_width(&self) -> f32 {
        let width = self.text_width("n");
        if width > 0.0 {
            width
        } else {
            self.font_size * 0.55
        }
    }
}

/// TextManager maintains a reusable FontSystem instance to avoid expensive recreation
struct TextManager {
    font_system: Arc<Mutex<FontSystem>>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Arc::new(Mutex::new(FontSystem::new())),
        }
    }

    /// Calculate the width of a single line of text in pixels using cosmic-text.
    ///
    /// Falls back to a per-character estimate when no font produced layout runs
    /// (for example on a system without any installed fonts).
    fn calculate_text_width(&self, text: &str, font_family: &str, font_size: f32) -> f32 {
        if text.is_empty() {
            return 0.0;
        }

        let Ok(mut font_system) = self.font_system.lock() else {
            return text.chars().count() as f32 * font_size * 0.55;
        };

        let metrics = Metrics::new(font_size, font_size * 1.15);
        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(Family::Name(font_family));
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let width = buffer
            .layout_runs()
            .filter_map(|run| run.glyphs.last().map(|glyph| glyph.x + glyph.w))
            .fold(0.0_f32, f32::max);

        if width > 0.0 {
            width
        } else {
            text.chars().count() as f32 * font_size * 0.55
        }
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_estimate_counts_characters_not_bytes() {
        let measure = EstimateMeasure::new(10.0);
        assert_approx_eq!(f32, measure.text_width("0..∞"), 40.0);
        assert_approx_eq!(f32, measure.text_width(""), 0.0);
    }

    #[test]
    fn test_estimate_default_char_width() {
        let measure = EstimateMeasure::default();
        assert_approx_eq!(f32, measure.char_width(), DEFAULT_CHAR_WIDTH);
    }

    #[test]
    fn test_font_measure_grows_with_text() {
        let measure = FontMeasure::new("sans-serif", 11.0);
        let short = measure.text_width("Id");
        let long = measure.text_width("PurchaseOrderIdentifier");

        assert!(short > 0.0);
        assert!(long > short, "{long} should exceed {short}");
        assert!(measure.char_width() > 0.0);
    }
}
