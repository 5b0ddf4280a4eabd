//! Paragraph layout: flattens a content forest into styled words and breaks
//! them greedily into lines against the viewport width.

mod metrics;

use ink_dom::ContentForest;
use ink_dom::FontWeight;

pub use metrics::MonospaceMetrics;
pub use metrics::TextMetrics;

/// Layout tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Left, right and top inset of the content, in px.
    pub margin: f32,
    /// Line height as a multiple of the tallest font in the line.
    pub line_height_factor: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: 10.0,
            line_height_factor: 1.25,
        }
    }
}

/// A measured word. Only lives for the duration of a layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledWord {
    pub text: String,
    pub font_size: f32,
    pub font_weight: FontWeight,
    pub width: f32,
    /// Width of one space at this word's style.
    pub space_width: f32,
}

/// A positioned text run, in document coordinates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DisplayItem {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub font_size: f32,
    pub font_weight: FontWeight,
}

/// Ordered display items plus the total laid-out height.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DisplayList {
    pub items: Vec<DisplayItem>,
    pub content_height: f32,
}

impl DisplayList {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DisplayItem> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a DisplayList {
    type Item = &'a DisplayItem;
    type IntoIter = std::slice::Iter<'a, DisplayItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Computes display lists from content forests.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine<M> {
    metrics: M,
    config: LayoutConfig,
}

impl<M: TextMetrics> LayoutEngine<M> {
    pub fn new(metrics: M) -> Self {
        Self::with_config(metrics, LayoutConfig::default())
    }

    pub fn with_config(metrics: M, config: LayoutConfig) -> Self {
        Self { metrics, config }
    }

    pub fn config(&self) -> LayoutConfig {
        self.config
    }

    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    /// Lays out `forest` with the configured margin.
    pub fn layout(&self, forest: &ContentForest, viewport_width: f32) -> DisplayList {
        self.layout_with_margin(forest, viewport_width, self.config.margin)
    }

    pub fn layout_with_margin(
        &self,
        forest: &ContentForest,
        viewport_width: f32,
        margin: f32,
    ) -> DisplayList {
        let words = flatten(forest, &self.metrics);
        let word_count = words.len();

        let mut lines = LineBreaker::new(viewport_width, margin, self.config.line_height_factor);
        for word in words {
            lines.push(word);
        }
        let list = lines.finish();

        log::debug!(
            "laid out {} words at width {}: {} items, height {}",
            word_count,
            viewport_width,
            list.len(),
            list.content_height
        );
        list
    }
}

/// Splits every node's text on single spaces and measures each word, in
/// pre-order. Empty tokens are dropped.
pub fn flatten(forest: &ContentForest, metrics: &impl TextMetrics) -> Vec<StyledWord> {
    let mut words = Vec::new();

    for (_, node) in forest.pre_order() {
        let text = node.text_content();
        if text.is_empty() {
            continue;
        }

        let font_size = node.font_size();
        let font_weight = node.font_weight();
        let space_width = metrics.measure(" ", font_size, font_weight);
        for token in text.split(' ').filter(|token| !token.is_empty()) {
            words.push(StyledWord {
                text: token.to_owned(),
                font_size,
                font_weight,
                width: metrics.measure(token, font_size, font_weight),
                space_width,
            });
        }
    }

    words
}

/// Greedy single-pass line breaker.
#[derive(Debug)]
struct LineBreaker {
    margin: f32,
    right_edge: f32,
    line_height_factor: f32,
    cursor_x: f32,
    cursor_y: f32,
    line: Vec<StyledWord>,
    max_font_size: f32,
    items: Vec<DisplayItem>,
}

impl LineBreaker {
    fn new(viewport_width: f32, margin: f32, line_height_factor: f32) -> Self {
        Self {
            margin,
            right_edge: margin + (viewport_width - 2.0 * margin),
            line_height_factor,
            cursor_x: margin,
            cursor_y: margin,
            line: Vec::new(),
            max_font_size: 0.0,
            items: Vec::new(),
        }
    }

    fn push(&mut self, word: StyledWord) {
        if !self.line.is_empty() && self.cursor_x + word.width > self.right_edge {
            self.flush();
        }

        self.cursor_x += word.width + word.space_width;
        self.max_font_size = self.max_font_size.max(word.font_size);
        self.line.push(word);
    }

    /// Emits the current line with every word bottom-aligned to the tallest.
    fn flush(&mut self) {
        let line_top = self.cursor_y;
        let mut x = self.margin;

        for word in self.line.drain(..) {
            let advance = word.width + word.space_width;
            self.items.push(DisplayItem {
                x,
                y: line_top + (self.max_font_size - word.font_size),
                text: word.text,
                font_size: word.font_size,
                font_weight: word.font_weight,
            });
            x += advance;
        }

        self.cursor_y += self.max_font_size * self.line_height_factor;
        self.max_font_size = 0.0;
        self.cursor_x = self.margin;
    }

    fn finish(mut self) -> DisplayList {
        self.flush();
        DisplayList {
            items: self.items,
            content_height: self.cursor_y,
        }
    }
}
