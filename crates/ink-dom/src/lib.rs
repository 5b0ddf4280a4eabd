//! Styled content tree data structures.

use core::fmt;

/// ID used to address nodes in the forest arena.
pub type NodeId = usize;

/// Font weight/style carried by every content node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
    Italic,
}

impl FontWeight {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
            Self::Italic => "italic",
        }
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Inherited text style. Copied into each node when it is created.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TextStyle {
    pub font_size: f32,
    pub font_weight: FontWeight,
}

impl TextStyle {
    pub const fn new(font_size: f32, font_weight: FontWeight) -> Self {
        Self {
            font_size,
            font_weight,
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(16.0, FontWeight::Normal)
    }
}

/// One element or text leaf of the content forest.
///
/// Text leaves have no tag name; elements usually have no text of their own.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContentNode {
    tag_name: Option<String>,
    style: TextStyle,
    text_content: String,
    children: Vec<NodeId>,
}

impl ContentNode {
    pub fn element(tag_name: impl Into<String>, style: TextStyle) -> Self {
        Self {
            tag_name: Some(tag_name.into()),
            style,
            text_content: String::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text_content: impl Into<String>, style: TextStyle) -> Self {
        Self {
            tag_name: None,
            style,
            text_content: text_content.into(),
            children: Vec::new(),
        }
    }

    pub fn tag_name(&self) -> Option<&str> {
        self.tag_name.as_deref()
    }

    pub fn style(&self) -> TextStyle {
        self.style
    }

    pub fn font_size(&self) -> f32 {
        self.style.font_size
    }

    pub fn font_weight(&self) -> FontWeight {
        self.style.font_weight
    }

    pub fn text_content(&self) -> &str {
        &self.text_content
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_text(&self) -> bool {
        self.tag_name.is_none()
    }
}

/// Ordered list of top-level content nodes backed by a node arena.
///
/// There is no document root: the synthetic root used while building is
/// never stored. A finished forest cannot be mutated.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContentForest {
    nodes: Vec<ContentNode>,
    roots: Vec<NodeId>,
}

impl ContentForest {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> Option<&ContentNode> {
        self.nodes.get(id)
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &ContentNode> + '_ {
        self.node(id)
            .map(ContentNode::children)
            .unwrap_or_default()
            .iter()
            .filter_map(|child| self.node(*child))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first pre-order walk over every node, in document order.
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder {
            forest: self,
            pending: self.roots.iter().rev().copied().collect(),
        }
    }

    /// Concatenated text of every leaf in document order.
    pub fn text(&self) -> String {
        self.pre_order()
            .map(|(_, node)| node.text_content())
            .collect()
    }
}

/// Iterator returned by [`ContentForest::pre_order`].
#[derive(Debug)]
pub struct PreOrder<'a> {
    forest: &'a ContentForest,
    pending: Vec<NodeId>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (NodeId, &'a ContentNode);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let id = self.pending.pop()?;
            let Some(node) = self.forest.node(id) else {
                continue;
            };
            self.pending.extend(node.children.iter().rev().copied());
            return Some((id, node));
        }
    }
}

/// Append-only builder that produces a [`ContentForest`].
#[derive(Debug, Default)]
pub struct ForestBuilder {
    forest: ContentForest,
}

impl ForestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `node` under `parent`, or as a top-level node when `parent` is
    /// `None`. A dangling parent id also falls back to top level.
    pub fn append(&mut self, parent: Option<NodeId>, node: ContentNode) -> NodeId {
        let id = self.forest.nodes.len();
        self.forest.nodes.push(node);

        match parent.and_then(|parent| self.forest.nodes.get_mut(parent)) {
            Some(parent) => parent.children.push(id),
            None => self.forest.roots.push(id),
        }

        id
    }

    pub fn finish(self) -> ContentForest {
        self.forest
    }
}

#[cfg(test)]
mod tests {
    use super::ContentNode;
    use super::FontWeight;
    use super::ForestBuilder;
    use super::TextStyle;

    #[test]
    fn builder_links_children_to_parents() {
        let style = TextStyle::default();
        let mut builder = ForestBuilder::new();
        let p = builder.append(None, ContentNode::element("p", style));
        let text = builder.append(Some(p), ContentNode::text("hi", style));
        let forest = builder.finish();

        assert_eq!(forest.roots(), &[p]);
        assert_eq!(forest.node(p).map(ContentNode::children), Some(&[text][..]));
        assert_eq!(forest.children(p).count(), 1);
        assert_eq!(forest.len(), 2);
    }

    #[test]
    fn pre_order_visits_in_document_order() {
        let style = TextStyle::new(12.0, FontWeight::Bold);
        let mut builder = ForestBuilder::new();
        let a = builder.append(None, ContentNode::element("a", style));
        builder.append(Some(a), ContentNode::text("one ", style));
        let b = builder.append(Some(a), ContentNode::element("b", style));
        builder.append(Some(b), ContentNode::text("two ", style));
        builder.append(Some(a), ContentNode::text("three ", style));
        builder.append(None, ContentNode::text("four", style));
        let forest = builder.finish();

        let tags: Vec<Option<&str>> = forest
            .pre_order()
            .map(|(_, node)| node.tag_name())
            .collect();
        assert_eq!(tags, vec![Some("a"), None, Some("b"), None, None, None]);
        assert_eq!(forest.text(), "one two three four");
    }

    #[test]
    fn default_style_is_sixteen_normal() {
        let style = TextStyle::default();
        assert_eq!(style.font_size, 16.0);
        assert_eq!(style.font_weight, FontWeight::Normal);
        assert_eq!(FontWeight::Italic.to_string(), "italic");
    }
}
