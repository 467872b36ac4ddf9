/// Characters that carry meaning in Markdown inline syntax
pub const MARKDOWN_SPECIALS: [char; 9] = ['\\', '*', '_', '[', ']', '(', ')', '#', '`'];

/// Backslash-escape every Markdown special character.
///
/// Works in one left-to-right pass over the input, so backslashes introduced
/// here are never escaped a second time.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        if MARKDOWN_SPECIALS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape only the inline-code delimiter. Other special characters are kept
/// as they are since code spans render them literally anyway.
pub fn escape_code_span(text: &str) -> String {
    text.replace('`', "\\`")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_specials() {
        assert_eq!(
            escape_markdown("*hello_[world](x)#`"),
            r"\*hello\_\[world\]\(x\)\#\`"
        );
    }

    #[test]
    fn test_backslash_escaped_once() {
        assert_eq!(escape_markdown(r"a\*b"), r"a\\\*b");
        assert_eq!(escape_markdown(r"\\"), r"\\\\");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(escape_markdown("Hello, World! 1 + 2 = 3"), "Hello, World! 1 + 2 = 3");
        assert_eq!(escape_markdown(""), "");
        assert_eq!(escape_markdown("olá – ünïcode"), "olá – ünïcode");
    }

    #[test]
    fn test_code_span_only_escapes_backtick() {
        assert_eq!(escape_code_span("a `b` *c*"), r"a \`b\` *c*");
    }
}
