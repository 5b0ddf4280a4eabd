/// Decodes the five supported character references in a single pass.
/// Decoded output is never re-scanned, so `&amp;lt;` becomes `&lt;`.
pub fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut cursor = 0_usize;

    while let Some(rel_amp) = input[cursor..].find('&') {
        let amp = cursor + rel_amp;
        out.push_str(&input[cursor..amp]);

        match decode_reference(&input[amp..]) {
            Some((decoded, consumed)) => {
                out.push(decoded);
                cursor = amp + consumed;
            }
            None => {
                out.push('&');
                cursor = amp + 1;
            }
        }
    }

    out.push_str(&input[cursor..]);
    out
}

fn decode_reference(rest: &str) -> Option<(char, usize)> {
    const REFERENCES: [(&str, char); 5] = [
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&#39;", '\''),
    ];

    REFERENCES
        .iter()
        .find(|(reference, _)| rest.starts_with(*reference))
        .map(|(reference, decoded)| (*decoded, reference.len()))
}

#[cfg(test)]
mod tests {
    use super::decode_entities;

    #[test]
    fn decodes_supported_references() {
        assert_eq!(decode_entities("A &amp; B"), "A & B");
        assert_eq!(
            decode_entities("&lt;p&gt; &quot;hi&quot; it&#39;s"),
            "<p> \"hi\" it's"
        );
    }

    #[test]
    fn decodes_exactly_once() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
        assert_eq!(decode_entities("fish & chips"), "fish & chips");
    }

    #[test]
    fn leaves_unknown_references_alone() {
        assert_eq!(decode_entities("&nbsp;&copy;&#x41;"), "&nbsp;&copy;&#x41;");
        assert_eq!(decode_entities("trailing &"), "trailing &");
    }
}
