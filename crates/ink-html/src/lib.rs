//! Markup tokenization and content tree construction.
//!
//! The builder never fails: malformed markup yields a smaller or flatter forest.

mod entities;
mod raw_text;
pub mod tokenizer;

use ink_css::CssParser;
use ink_css::StyleSheet;
use ink_dom::ContentForest;
use ink_dom::ContentNode;
use ink_dom::FontWeight;
use ink_dom::ForestBuilder;
use ink_dom::NodeId;
use ink_dom::TextStyle;
use ink_script::ScriptSink;
use ink_script::ScriptSource;

pub use entities::decode_entities;
pub use tokenizer::Mode;
pub use tokenizer::Step;
pub use tokenizer::Tag;

/// Smallest font size `<small>` can shrink to.
const MIN_FONT_SIZE: f32 = 2.0;

/// Forest and style rules produced from one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    pub forest: ContentForest,
    pub style_rules: StyleSheet,
}

/// Parses raw markup into a content forest.
#[derive(Debug, Default)]
pub struct HtmlParser {
    css: CssParser,
}

impl HtmlParser {
    pub fn parse(
        &self,
        input: &str,
        default_style: TextStyle,
        scripts: &mut dyn ScriptSink,
    ) -> ParsedDocument {
        let styles = raw_text::extract_blocks(input, "style");
        let mut style_rules = StyleSheet::empty();
        for block in &styles.blocks {
            style_rules.extend(self.css.parse(block));
        }

        let extracted = raw_text::extract_blocks(&styles.remaining, "script");
        let script_count = extracted.blocks.len();
        for (index, block) in extracted.blocks.into_iter().enumerate() {
            scripts.accept(ScriptSource::inline(index, block));
        }

        let forest = build_forest(&extracted.remaining, default_style);
        log::debug!(
            "parsed document: {} nodes, {} style rules, {} scripts",
            forest.len(),
            style_rules.rule_count(),
            script_count
        );

        ParsedDocument {
            forest,
            style_rules,
        }
    }
}

/// Runs the tokenizer over `input` (style and script blocks already removed).
pub fn build_forest(input: &str, default_style: TextStyle) -> ContentForest {
    let mut builder = TreeBuilder::new(default_style, !tokenizer::has_body_tag(input));
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        builder.feed(ch, chars.peek().copied());
    }
    builder.finish()
}

/// Returns `parent` with the presentational override for `tag_name` applied.
pub fn apply_tag_override(parent: TextStyle, tag_name: &str) -> TextStyle {
    match tag_name {
        "b" => TextStyle::new(parent.font_size, FontWeight::Bold),
        "i" => TextStyle::new(parent.font_size, FontWeight::Italic),
        "small" => TextStyle::new(
            (parent.font_size - 2.0).max(MIN_FONT_SIZE),
            parent.font_weight,
        ),
        "big" => TextStyle::new(parent.font_size + 2.0, parent.font_weight),
        _ => parent,
    }
}

/// An entry of the open-element stack. The synthetic root has no id.
#[derive(Debug, Clone, Copy)]
struct OpenNode {
    id: Option<NodeId>,
    style: TextStyle,
}

/// Tokenizer state plus the forest under construction.
#[derive(Debug)]
pub struct TreeBuilder {
    mode: Mode,
    stack: Vec<OpenNode>,
    in_body: bool,
    pending_text: String,
    tag_buffer: String,
    forest: ForestBuilder,
}

impl TreeBuilder {
    pub fn new(default_style: TextStyle, in_body: bool) -> Self {
        Self {
            mode: Mode::Text,
            stack: vec![OpenNode {
                id: None,
                style: default_style,
            }],
            in_body,
            pending_text: String::new(),
            tag_buffer: String::new(),
            forest: ForestBuilder::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn in_body(&self) -> bool {
        self.in_body
    }

    /// Number of open nodes, counting the synthetic root.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Consumes one character; `next` is the following character, if any.
    pub fn feed(&mut self, ch: char, next: Option<char>) {
        let (mode, step) = tokenizer::transition(self.mode, ch, next);
        self.mode = mode;

        match step {
            Step::Text(ch) => {
                if self.in_body {
                    self.pending_text.push(ch);
                }
            }
            Step::TagStart => self.tag_buffer.clear(),
            Step::TagChar(ch) => self.tag_buffer.push(ch),
            Step::TagEnd => {
                let raw = std::mem::take(&mut self.tag_buffer);
                if let Some(tag) = Tag::from_raw(&raw) {
                    self.handle_tag(tag);
                }
            }
            Step::Skip => {}
        }
    }

    /// Flushes trailing text. An unterminated tag is dropped.
    pub fn finish(mut self) -> ContentForest {
        if self.mode == Mode::Tag {
            log::trace!("discarding unterminated tag <{}", self.tag_buffer);
        }
        self.flush_text();
        self.forest.finish()
    }

    fn handle_tag(&mut self, tag: Tag) {
        log::trace!(
            "tag {}{} (in body: {}, depth: {})",
            if tag.is_end { "/" } else { "" },
            tag.name,
            self.in_body,
            self.stack.len()
        );

        if tag.name == "body" {
            if self.in_body {
                self.flush_text();
            }
            self.in_body = !tag.is_end;
            return;
        }

        if !self.in_body {
            return;
        }

        self.flush_text();
        if tag.is_end {
            if self.stack.len() > 1 {
                self.stack.pop();
            }
            return;
        }

        let parent = self.top();
        let style = apply_tag_override(parent.style, &tag.name);
        let id = self
            .forest
            .append(parent.id, ContentNode::element(tag.name, style));
        self.stack.push(OpenNode {
            id: Some(id),
            style,
        });
    }

    fn flush_text(&mut self) {
        if self.pending_text.is_empty() {
            return;
        }

        let text = decode_entities(&self.pending_text);
        self.pending_text.clear();
        let parent = self.top();
        self.forest
            .append(parent.id, ContentNode::text(text, parent.style));
    }

    fn top(&self) -> OpenNode {
        self.stack.last().copied().unwrap_or(OpenNode {
            id: None,
            style: TextStyle::default(),
        })
    }
}
