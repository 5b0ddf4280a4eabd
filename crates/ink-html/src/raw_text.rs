//! Removal of raw-text blocks (`<style>`, `<script>`) ahead of tokenizing.

/// Working text with every `<tag …>…</tag>` block removed, plus the inner
/// text of each removed block in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    pub remaining: String,
    pub blocks: Vec<String>,
}

/// Extracts non-nested blocks for `tag_name`, matching case-insensitively.
/// An opening tag without a matching close is left in the text untouched.
pub fn extract_blocks(input: &str, tag_name: &str) -> Extracted {
    let bytes = input.as_bytes();
    let tag_bytes = tag_name.as_bytes();
    let mut out = Extracted::default();
    let mut copied_until = 0_usize;
    let mut idx = 0_usize;

    while let Some(open) = find_open_tag(bytes, idx, tag_bytes) {
        let Some(open_end) = find_byte(bytes, open, b'>') else {
            break;
        };
        let content_start = open_end.saturating_add(1);
        let Some((close, close_end)) = find_end_tag(bytes, content_start, tag_bytes) else {
            break;
        };

        out.remaining.push_str(&input[copied_until..open]);
        out.blocks.push(input[content_start..close].to_owned());
        copied_until = close_end;
        idx = close_end;
    }

    out.remaining.push_str(&input[copied_until..]);
    out
}

fn find_open_tag(bytes: &[u8], from: usize, tag: &[u8]) -> Option<usize> {
    let mut idx = from;
    while let Some(lt) = find_byte(bytes, idx, b'<') {
        let name_start = lt.saturating_add(1);
        if starts_with_ignore_ascii_case(bytes, name_start, tag)
            && tag_name_boundary(bytes, name_start.saturating_add(tag.len()))
        {
            return Some(lt);
        }
        idx = name_start;
    }
    None
}

/// Returns the start of `</tag` and the index just past its `>`.
fn find_end_tag(bytes: &[u8], from: usize, tag: &[u8]) -> Option<(usize, usize)> {
    let mut idx = from;
    while let Some(lt) = find_byte(bytes, idx, b'<') {
        let name_start = lt.saturating_add(2);
        if bytes.get(lt.saturating_add(1)).copied() == Some(b'/')
            && starts_with_ignore_ascii_case(bytes, name_start, tag)
        {
            let after_name = skip_spaces(bytes, name_start.saturating_add(tag.len()));
            if bytes.get(after_name).copied() == Some(b'>') {
                return Some((lt, after_name.saturating_add(1)));
            }
        }
        idx = lt.saturating_add(1);
    }
    None
}

fn tag_name_boundary(bytes: &[u8], idx: usize) -> bool {
    match bytes.get(idx).copied() {
        None => false,
        Some(byte) => byte.is_ascii_whitespace() || byte == b'>' || byte == b'/',
    }
}

fn skip_spaces(bytes: &[u8], mut idx: usize) -> usize {
    while idx < bytes.len() && bytes[idx].is_ascii_whitespace() {
        idx = idx.saturating_add(1);
    }
    idx
}

fn starts_with_ignore_ascii_case(bytes: &[u8], idx: usize, pattern: &[u8]) -> bool {
    let end = idx.saturating_add(pattern.len());
    if end > bytes.len() {
        return false;
    }

    bytes[idx..end]
        .iter()
        .zip(pattern.iter())
        .all(|(left, right)| left.eq_ignore_ascii_case(right))
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
    use super::extract_blocks;

    #[test]
    fn removes_blocks_and_keeps_surrounding_text() {
        let extracted = extract_blocks("a<style>p{}</style>b<STYLE>\nq{}\n</Style>c", "style");
        assert_eq!(extracted.remaining, "abc");
        assert_eq!(extracted.blocks, vec!["p{}".to_owned(), "\nq{}\n".to_owned()]);
    }

    #[test]
    fn open_tag_may_carry_attributes() {
        let extracted = extract_blocks(
            "<script type=\"text/javascript\">go()</script >done",
            "script",
        );
        assert_eq!(extracted.remaining, "done");
        assert_eq!(extracted.blocks, vec!["go()".to_owned()]);
    }

    #[test]
    fn similar_tag_names_are_not_blocks() {
        let extracted = extract_blocks("<styles>x</styles>", "style");
        assert_eq!(extracted.remaining, "<styles>x</styles>");
        assert!(extracted.blocks.is_empty());
    }

    #[test]
    fn unterminated_block_is_left_in_place() {
        let extracted = extract_blocks("x<style>p{}", "style");
        assert_eq!(extracted.remaining, "x<style>p{}");
        assert!(extracted.blocks.is_empty());
    }

    #[test]
    fn blocks_do_not_nest() {
        let extracted = extract_blocks(
            "<script>a<script>b</script>c</script>",
            "script",
        );
        assert_eq!(extracted.blocks, vec!["a<script>b".to_owned()]);
        assert_eq!(extracted.remaining, "c</script>");
    }
}
