/// Fallback used when the document title yields no usable file name
const DEFAULT_FILE_STEM: &str = "document";

/// Split pasted text into URLs: one per line, trimmed, blank lines dropped
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Convert a document title to a file name stem
pub fn safe_file_name(title: &str) -> String {
    let base = title.trim();
    let base = if base.is_empty() { DEFAULT_FILE_STEM } else { base };

    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Collapse every run of whitespace into a single space (no trimming)
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}
