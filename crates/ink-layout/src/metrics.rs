use ink_dom::FontWeight;

/// Text measurement hook used for line fitting.
pub trait TextMetrics {
    /// Pixel width of `text` rendered at the given size and weight.
    fn measure(&self, text: &str, font_size: f32, font_weight: FontWeight) -> f32;
}

impl<T: TextMetrics + ?Sized> TextMetrics for &T {
    fn measure(&self, text: &str, font_size: f32, font_weight: FontWeight) -> f32 {
        (**self).measure(text, font_size, font_weight)
    }
}

impl<T: TextMetrics + ?Sized> TextMetrics for Box<T> {
    fn measure(&self, text: &str, font_size: f32, font_weight: FontWeight) -> f32 {
        (**self).measure(text, font_size, font_weight)
    }
}

/// Fixed-advance estimate for hosts without real font data.
///
/// Every character advances by `font_size * advance_ratio`; bold text is
/// widened by `bold_widening`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    pub advance_ratio: f32,
    pub bold_widening: f32,
}

impl MonospaceMetrics {
    pub const fn new(advance_ratio: f32) -> Self {
        Self {
            advance_ratio,
            bold_widening: 1.0,
        }
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance_ratio: 0.6,
            bold_widening: 1.1,
        }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn measure(&self, text: &str, font_size: f32, font_weight: FontWeight) -> f32 {
        let advance = font_size * self.advance_ratio;
        let advance = match font_weight {
            FontWeight::Bold => advance * self.bold_widening,
            FontWeight::Normal | FontWeight::Italic => advance,
        };
        text.chars().count() as f32 * advance
    }
}
