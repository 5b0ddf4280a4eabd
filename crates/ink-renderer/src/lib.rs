//! Renderer pipeline from fetched markup to frame output.
//!
//! Fetching happens outside: [`RendererProcess::navigate`] awaits whatever
//! future the host hands it and then runs the synchronous pipeline. A failed
//! fetch is shown as page text rather than surfaced as an error.

use std::future::Future;

use ink_core::InkResult;
use ink_css::StyleSheet;
use ink_dom::ContentForest;
use ink_dom::TextStyle;
use ink_html::HtmlParser;
use ink_layout::DisplayList;
use ink_layout::LayoutConfig;
use ink_layout::LayoutEngine;
use ink_layout::TextMetrics;
use ink_render::Frame;
use ink_render::PaintConfig;
use ink_render::Renderer;
use ink_render::Viewport;
use ink_script::CapturedScripts;
use ink_script::ScriptCaptureConfig;
use ink_script::ScriptSource;

/// Pipeline settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    pub default_style: TextStyle,
    pub layout: LayoutConfig,
    pub paint: PaintConfig,
    pub scripts: ScriptCaptureConfig,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            default_style: TextStyle::default(),
            layout: LayoutConfig::default(),
            paint: PaintConfig::default(),
            scripts: ScriptCaptureConfig::default(),
            viewport_width: 800.0,
            viewport_height: 600.0,
        }
    }
}

/// The currently loaded page and its layout at the current viewport width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub source: String,
    pub forest: ContentForest,
    pub style_rules: StyleSheet,
    pub display_list: DisplayList,
}

/// Parses, lays out and renders one page at a time.
#[derive(Debug)]
pub struct RendererProcess<M> {
    html: HtmlParser,
    layout: LayoutEngine<M>,
    render: Renderer,
    default_style: TextStyle,
    scripts: CapturedScripts,
    viewport: Viewport,
    page: Page,
}

impl<M: TextMetrics> RendererProcess<M> {
    pub fn new(metrics: M, config: RendererConfig) -> Self {
        Self {
            html: HtmlParser::default(),
            layout: LayoutEngine::with_config(metrics, config.layout),
            render: Renderer::new(config.paint),
            default_style: config.default_style,
            scripts: CapturedScripts::new(config.scripts),
            viewport: Viewport::new(config.viewport_width, config.viewport_height),
            page: Page::default(),
        }
    }

    /// Waits for `fetch` to complete, then loads its result.
    pub async fn navigate<F>(&mut self, fetch: F)
    where
        F: Future<Output = InkResult<String>>,
    {
        let fetched = fetch.await;
        self.load(fetched);
    }

    /// Replaces the current page. Fetch errors become `Error: …` text.
    pub fn load(&mut self, fetched: InkResult<String>) {
        let source = match fetched {
            Ok(body) => body,
            Err(error) => {
                log::warn!("fetch failed, rendering error page: {error}");
                format!("Error: {error}")
            }
        };

        self.scripts.clear();
        let parsed = self
            .html
            .parse(&source, self.default_style, &mut self.scripts);
        let display_list = self.layout.layout(&parsed.forest, self.viewport.width);
        self.viewport.scroll_to_top();

        self.page = Page {
            source,
            forest: parsed.forest,
            style_rules: parsed.style_rules,
            display_list,
        };
    }

    /// Resizes the viewport, re-running layout if the width changed.
    pub fn resize(&mut self, width: f32, height: f32) {
        if self.viewport.resize(width, height) {
            self.page.display_list = self.layout.layout(&self.page.forest, width);
        }
    }

    pub fn scroll_by(&mut self, delta: f32) {
        self.viewport.scroll_by(delta);
    }

    pub fn frame(&self) -> Frame {
        self.render.render(&self.page.display_list, &self.viewport)
    }

    /// Parses and renders `html_source` in one step.
    pub fn render_document(&mut self, html_source: &str) -> Frame {
        self.load(Ok(html_source.to_owned()));
        self.frame()
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Scripts captured from the current page. They are never executed.
    pub fn scripts(&self) -> &[ScriptSource] {
        self.scripts.scripts()
    }
}
