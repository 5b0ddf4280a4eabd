//! Style rule extraction and stylesheet model.
//!
//! Rules are collected, not applied: there is no cascade or selector
//! matching. Malformed input degrades to fewer rules, never to an error.

use std::collections::BTreeMap;

/// Property name to property value.
pub type StyleDeclarationSet = BTreeMap<String, String>;

/// One `selector { declarations }` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StyleRule {
    pub selector: String,
    pub declarations: StyleDeclarationSet,
}

impl StyleRule {
    pub fn declaration(&self, property: &str) -> Option<&str> {
        self.declarations.get(property).map(String::as_str)
    }
}

/// Style rules in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StyleSheet {
    pub rules: Vec<StyleRule>,
}

impl StyleSheet {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Appends `other`'s rules after this sheet's rules.
    pub fn extend(&mut self, other: StyleSheet) {
        self.rules.extend(other.rules);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StyleRule> {
        self.rules.iter()
    }
}

impl<'a> IntoIterator for &'a StyleSheet {
    type Item = &'a StyleRule;
    type IntoIter = std::slice::Iter<'a, StyleRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Parses CSS source text.
#[derive(Debug, Default)]
pub struct CssParser;

impl CssParser {
    pub fn parse(&self, input: &str) -> StyleSheet {
        let mut rules = Vec::new();
        let mut cursor = 0_usize;

        while let Some((selector_raw, body_raw, next_cursor)) = next_rule_block(input, cursor) {
            cursor = next_cursor;
            rules.push(StyleRule {
                selector: selector_raw.trim().to_owned(),
                declarations: parse_declarations(body_raw),
            });
        }

        log::trace!("parsed {} style rules from {} bytes", rules.len(), input.len());
        StyleSheet { rules }
    }
}

/// Finds the next `{`, then the first `}` after it. A block missing its `}`
/// runs to the end of input.
fn next_rule_block(input: &str, from: usize) -> Option<(&str, &str, usize)> {
    let open = find_byte(input.as_bytes(), from, b'{')?;
    let selector = &input[from..open];
    let body_start = open.saturating_add(1);

    match find_byte(input.as_bytes(), body_start, b'}') {
        Some(close) => Some((selector, &input[body_start..close], close.saturating_add(1))),
        None => Some((selector, &input[body_start..], input.len())),
    }
}

fn parse_declarations(body: &str) -> StyleDeclarationSet {
    let mut declarations = StyleDeclarationSet::new();
    for declaration in body.split(';') {
        if let Some((name, value)) = split_declaration(declaration) {
            declarations.insert(name.to_owned(), value.to_owned());
        }
    }
    declarations
}

fn split_declaration(declaration: &str) -> Option<(&str, &str)> {
    let (name, value) = declaration.split_once(':')?;
    let name = name.trim();
    let value = value.trim();
    if name.is_empty() || value.is_empty() {
        return None;
    }
    Some((name, value))
}

fn find_byte(bytes: &[u8], from: usize, byte: u8) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|candidate| *candidate == byte)
        .map(|offset| from + offset)
}

#[cfg(test)]
mod tests {
    use super::CssParser;

    #[test]
    fn parses_simple_rules() {
        let parser = CssParser;
        let sheet = parser.parse("body { color: red; } .card { padding: 8px; }");
        assert_eq!(sheet.rule_count(), 2);
        assert_eq!(sheet.rules[0].selector, "body");
        assert_eq!(sheet.rules[0].declaration("color"), Some("red"));
        assert_eq!(sheet.rules[1].selector, ".card");
        assert_eq!(sheet.rules[1].declaration("padding"), Some("8px"));
    }

    #[test]
    fn captures_last_declaration_without_semicolon() {
        let parser = CssParser;
        let sheet = parser.parse("p { color: red; font-size: 12px }");
        assert_eq!(sheet.rule_count(), 1);

        let rule = &sheet.rules[0];
        assert_eq!(rule.selector, "p");
        assert_eq!(rule.declarations.len(), 2);
        assert_eq!(rule.declaration("color"), Some("red"));
        assert_eq!(rule.declaration("font-size"), Some("12px"));
    }

    #[test]
    fn drops_malformed_declarations() {
        let parser = CssParser;
        let sheet = parser.parse("h1 { bogus; : red; color: ; margin: 0 }");
        assert_eq!(sheet.rule_count(), 1);
        assert_eq!(sheet.rules[0].declarations.len(), 1);
        assert_eq!(sheet.rules[0].declaration("margin"), Some("0"));
    }

    #[test]
    fn splits_on_first_colon_only() {
        let parser = CssParser;
        let sheet = parser.parse("a { background: url(http://x/y.png) }");
        assert_eq!(
            sheet.rules[0].declaration("background"),
            Some("url(http://x/y.png)")
        );
    }

    #[test]
    fn keeps_rules_with_no_declarations() {
        let parser = CssParser;
        let sheet = parser.parse("div { } span {}");
        assert_eq!(sheet.rule_count(), 2);
        assert!(sheet.iter().all(|rule| rule.declarations.is_empty()));
    }

    #[test]
    fn unterminated_block_runs_to_end_of_input() {
        let parser = CssParser;
        let sheet = parser.parse("em { font-style: italic");
        assert_eq!(sheet.rule_count(), 1);
        assert_eq!(sheet.rules[0].declaration("font-style"), Some("italic"));
    }

    #[test]
    fn empty_and_trailing_text_yield_no_rules() {
        let parser = CssParser;
        assert!(parser.parse("").is_empty());
        assert!(parser.parse("   just a selector   ").is_empty());
    }

    #[test]
    fn later_duplicates_win() {
        let parser = CssParser;
        let sheet = parser.parse("p { color: red; color: blue }");
        assert_eq!(sheet.rules[0].declaration("color"), Some("blue"));
    }
}
