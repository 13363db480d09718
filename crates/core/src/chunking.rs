/// Splits cleaned page text into consecutive fixed-width chunks.
///
/// Indexed by character so multi-byte text never splits inside a code
/// point. Empty input yields exactly one empty chunk, so the pipeline
/// always has at least one unit of work.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }

    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::with_capacity(chars.len().div_ceil(max_chars));
    let mut start = 0;

    while start < chars.len() {
        let end = (start + max_chars).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        start = end;
    }

    chunks
}
