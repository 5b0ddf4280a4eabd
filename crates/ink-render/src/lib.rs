//! Paint command generation from display lists.
//!
//! Rasterization happens elsewhere: this crate only applies the viewport
//! (scroll offset, visible range) and paint colours, and replays the result
//! onto a [`PaintSurface`].

use ink_dom::FontWeight;
use ink_layout::DisplayList;

/// Opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Paint-time settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintConfig {
    /// Offset of the document's top edge from the surface's top edge.
    pub content_top: f32,
    pub foreground: Color,
    pub background: Color,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            content_top: 0.0,
            foreground: Color::BLACK,
            background: Color::WHITE,
        }
    }
}

/// Visible window onto the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scroll_y: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
        }
    }

    /// Scrolls by `delta` px. Scrolling never goes above the document top.
    pub fn scroll_by(&mut self, delta: f32) {
        self.scroll_y = (self.scroll_y + delta).max(0.0);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_y = 0.0;
    }

    /// Returns whether the width changed, which invalidates layout.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        let width_changed = self.width != width;
        self.width = width;
        self.height = height;
        width_changed
    }
}

/// A text run in surface coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawText {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub font_size: f32,
    pub font_weight: FontWeight,
    pub color: Color,
}

/// Paint commands for one frame, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub background: Color,
    pub texts: Vec<DrawText>,
}

impl Frame {
    pub fn draw_calls(&self) -> usize {
        self.texts.len()
    }

    /// Replays the frame onto `surface`.
    pub fn paint(&self, surface: &mut dyn PaintSurface) {
        surface.clear(self.background);
        for text in &self.texts {
            surface.draw_text(text);
        }
    }
}

/// Host drawing backend.
pub trait PaintSurface {
    fn clear(&mut self, background: Color);
    fn draw_text(&mut self, text: &DrawText);
}

/// Converts display lists into frames.
#[derive(Debug, Default)]
pub struct Renderer {
    config: PaintConfig,
}

impl Renderer {
    pub fn new(config: PaintConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> PaintConfig {
        self.config
    }

    /// Shifts items by the scroll offset and drops those entirely outside
    /// the viewport.
    pub fn render(&self, list: &DisplayList, viewport: &Viewport) -> Frame {
        let offset_y = self.config.content_top - viewport.scroll_y;
        let texts: Vec<DrawText> = list
            .iter()
            .filter_map(|item| {
                let y = item.y + offset_y;
                if y + item.font_size < 0.0 || y > viewport.height {
                    return None;
                }
                Some(DrawText {
                    x: item.x,
                    y,
                    text: item.text.clone(),
                    font_size: item.font_size,
                    font_weight: item.font_weight,
                    color: self.config.foreground,
                })
            })
            .collect();

        log::debug!(
            "rendered {} of {} items at scroll {}",
            texts.len(),
            list.len(),
            viewport.scroll_y
        );

        Frame {
            background: self.config.background,
            texts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Color;
    use super::DrawText;
    use super::PaintConfig;
    use super::PaintSurface;
    use super::Renderer;
    use super::Viewport;
    use ink_dom::FontWeight;
    use ink_layout::DisplayItem;
    use ink_layout::DisplayList;

    fn item(y: f32, text: &str) -> DisplayItem {
        DisplayItem {
            x: 10.0,
            y,
            text: text.to_owned(),
            font_size: 16.0,
            font_weight: FontWeight::Normal,
        }
    }

    fn list(items: Vec<DisplayItem>) -> DisplayList {
        DisplayList {
            items,
            content_height: 0.0,
        }
    }

    #[test]
    fn empty_list_has_zero_draw_calls() {
        let frame =
            Renderer::default().render(&DisplayList::default(), &Viewport::new(800.0, 600.0));
        assert_eq!(frame.draw_calls(), 0);
        assert_eq!(frame.background, Color::WHITE);
    }

    #[test]
    fn applies_scroll_offset_and_content_top() {
        let renderer = Renderer::new(PaintConfig {
            content_top: 80.0,
            ..PaintConfig::default()
        });
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.scroll_by(30.0);

        let frame = renderer.render(&list(vec![item(10.0, "hello")]), &viewport);
        assert_eq!(frame.texts.len(), 1);
        assert_eq!(frame.texts[0].y, 60.0);
        assert_eq!(frame.texts[0].x, 10.0);
        assert_eq!(frame.texts[0].color, Color::BLACK);
    }

    #[test]
    fn culls_items_outside_viewport() {
        let mut viewport = Viewport::new(800.0, 100.0);
        viewport.scroll_by(50.0);
        let frame = Renderer::default().render(
            &list(vec![item(10.0, "above"), item(60.0, "inside"), item(400.0, "below")]),
            &viewport,
        );
        let texts: Vec<&str> = frame.texts.iter().map(|text| text.text.as_str()).collect();
        assert_eq!(texts, vec!["inside"]);
    }

    #[test]
    fn scroll_never_goes_above_top() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.scroll_by(40.0);
        viewport.scroll_by(-100.0);
        assert_eq!(viewport.scroll_y, 0.0);
    }

    #[test]
    fn resize_reports_width_changes() {
        let mut viewport = Viewport::new(800.0, 600.0);
        assert!(!viewport.resize(800.0, 300.0));
        assert!(viewport.resize(640.0, 300.0));
        assert_eq!(viewport.height, 300.0);
    }

    #[derive(Default)]
    struct RecordingSurface {
        cleared: Vec<Color>,
        drawn: Vec<String>,
    }

    impl PaintSurface for RecordingSurface {
        fn clear(&mut self, background: Color) {
            self.cleared.push(background);
        }

        fn draw_text(&mut self, text: &DrawText) {
            self.drawn.push(text.text.clone());
        }
    }

    #[test]
    fn paint_clears_then_draws_in_order() {
        let frame = Renderer::default().render(
            &list(vec![item(10.0, "one"), item(30.0, "two")]),
            &Viewport::new(800.0, 600.0),
        );
        let mut surface = RecordingSurface::default();
        frame.paint(&mut surface);

        assert_eq!(surface.cleared, vec![Color::WHITE]);
        assert_eq!(surface.drawn, vec!["one".to_owned(), "two".to_owned()]);
    }
}
