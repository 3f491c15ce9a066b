//! Minimum box width computation.

use crate::text::TextMeasure;

/// Accumulates the widest of a set of candidate text fragments.
///
/// The calculator starts at a minimum width and only ever grows: every
/// candidate is measured as `offset + text width + extra characters`, and the
/// final width is the largest candidate seen, never below the minimum.
///
/// # Example
///
/// ```
/// # use xsdvi_core::{symbol::WidthCalculator, text::EstimateMeasure};
/// let measure = EstimateMeasure::new(10.0);
/// let mut calc = WidthCalculator::new(60.0, &measure);
/// calc.fit_text(15.0, Some("Order"), 3); // 15 + 50 + 30
/// calc.fit_text(15.0, None, 0);
/// assert_eq!(calc.width(), 95.0);
/// ```
pub struct WidthCalculator<'a> {
    width: f32,
    measure: &'a dyn TextMeasure,
}

impl<'a> WidthCalculator<'a> {
    /// Creates a calculator starting at `min_width`.
    pub fn new(min_width: f32, measure: &'a dyn TextMeasure) -> Self {
        Self {
            width: min_width,
            measure,
        }
    }

    /// Widens to fit `text` plus `extra_chars` characters of padding.
    /// Absent text contributes nothing.
    pub fn fit_text(&mut self, offset: f32, text: Option<&str>, extra_chars: u32) {
        if let Some(text) = text {
            let candidate = offset
                + self.measure.text_width(text)
                + extra_chars as f32 * self.measure.char_width();
            self.fit(candidate);
        }
    }

    /// Widens to fit a fixed allowance of `chars` characters.
    pub fn fit_chars(&mut self, offset: f32, chars: u32) {
        let candidate = offset + chars as f32 * self.measure.char_width();
        self.fit(candidate);
    }

    /// The accumulated width.
    pub fn width(&self) -> f32 {
        self.width
    }

    fn fit(&mut self, candidate: f32) {
        if candidate > self.width {
            self.width = candidate;
        }
    }
}
