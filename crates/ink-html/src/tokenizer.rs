//! Character-level state machine for the markup tokenizer.
//!
//! [`transition`] is pure: it decides what one character means given the
//! current mode and a single character of lookahead. Tree effects are applied
//! by the caller.

/// Tokenizer mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Text,
    Tag,
}

/// What the caller should do with the character just consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Literal document text.
    Text(char),
    /// A `<` that starts a tag; the tag buffer should be reset.
    TagStart,
    /// A character inside a tag.
    TagChar(char),
    /// The `>` that ends a tag; the tag buffer is complete.
    TagEnd,
    /// Consumed with no effect.
    Skip,
}

pub fn transition(mode: Mode, ch: char, next: Option<char>) -> (Mode, Step) {
    match (mode, ch) {
        (Mode::Text, '<') if next.is_some_and(is_literal_lt_follower) => {
            (Mode::Text, Step::Text('<'))
        }
        (Mode::Text, '<') => (Mode::Tag, Step::TagStart),
        (Mode::Text, '>') => (Mode::Text, Step::Skip),
        (Mode::Text, other) => (Mode::Text, Step::Text(other)),
        (Mode::Tag, '>') => (Mode::Text, Step::TagEnd),
        (Mode::Tag, other) => (Mode::Tag, Step::TagChar(other)),
    }
}

/// `<` followed by whitespace or a digit is treated as text ("1 < 2", "<3").
fn is_literal_lt_follower(ch: char) -> bool {
    ch.is_whitespace() || ch.is_ascii_digit()
}

/// A completed tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub is_end: bool,
}

impl Tag {
    /// Reads a raw tag buffer (text between `<` and `>`). The name runs up to
    /// the first space; attributes are not interpreted.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let head = raw.split(' ').next().unwrap_or_default();
        let (name, is_end) = match head.strip_prefix('/') {
            Some(rest) => (rest, true),
            None => (head, false),
        };

        if name.is_empty() {
            return None;
        }

        Some(Self {
            name: name.to_lowercase(),
            is_end,
        })
    }
}

/// Runs the state machine over `input` and reports whether any opening
/// `body` tag is present.
pub fn has_body_tag(input: &str) -> bool {
    let mut mode = Mode::Text;
    let mut buffer = String::new();
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        let (next_mode, step) = transition(mode, ch, chars.peek().copied());
        mode = next_mode;
        match step {
            Step::TagStart => buffer.clear(),
            Step::TagChar(ch) => buffer.push(ch),
            Step::TagEnd => {
                if Tag::from_raw(&buffer).is_some_and(|tag| !tag.is_end && tag.name == "body") {
                    return true;
                }
            }
            Step::Text(_) | Step::Skip => {}
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::Mode;
    use super::Step;
    use super::Tag;
    use super::has_body_tag;
    use super::transition;

    #[test]
    fn lt_opens_tag_before_letters() {
        assert_eq!(
            transition(Mode::Text, '<', Some('p')),
            (Mode::Tag, Step::TagStart)
        );
        assert_eq!(
            transition(Mode::Text, '<', Some('/')),
            (Mode::Tag, Step::TagStart)
        );
    }

    #[test]
    fn lt_before_whitespace_or_digit_is_text() {
        assert_eq!(
            transition(Mode::Text, '<', Some(' ')),
            (Mode::Text, Step::Text('<'))
        );
        assert_eq!(
            transition(Mode::Text, '<', Some('\n')),
            (Mode::Text, Step::Text('<'))
        );
        assert_eq!(
            transition(Mode::Text, '<', Some('3')),
            (Mode::Text, Step::Text('<'))
        );
    }

    #[test]
    fn lt_at_end_of_input_opens_tag() {
        assert_eq!(transition(Mode::Text, '<', None), (Mode::Tag, Step::TagStart));
    }

    #[test]
    fn gt_closes_tag_and_is_dropped_in_text() {
        assert_eq!(transition(Mode::Tag, '>', None), (Mode::Text, Step::TagEnd));
        assert_eq!(transition(Mode::Text, '>', Some('a')), (Mode::Text, Step::Skip));
    }

    #[test]
    fn tag_mode_accumulates_everything_else() {
        assert_eq!(
            transition(Mode::Tag, '<', Some(' ')),
            (Mode::Tag, Step::TagChar('<'))
        );
        assert_eq!(
            transition(Mode::Tag, 'x', None),
            (Mode::Tag, Step::TagChar('x'))
        );
    }

    #[test]
    fn tag_names_are_lowercased_up_to_first_space() {
        assert_eq!(
            Tag::from_raw("DIV class=\"x\""),
            Some(Tag {
                name: "div".to_owned(),
                is_end: false,
            })
        );
        assert_eq!(
            Tag::from_raw("/B"),
            Some(Tag {
                name: "b".to_owned(),
                is_end: true,
            })
        );
        assert_eq!(Tag::from_raw(""), None);
        assert_eq!(Tag::from_raw("/"), None);
    }

    #[test]
    fn detects_body_tags() {
        assert!(has_body_tag("<html><BODY class=x>hi</body>"));
        assert!(!has_body_tag("<p>no body here</p>"));
        assert!(!has_body_tag("</body> only a close"));
        assert!(!has_body_tag("<bodyguard>"));
    }
}
