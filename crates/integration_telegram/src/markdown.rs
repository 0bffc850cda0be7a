//! MarkdownV2 helpers
//!
//! Telegram rejects a MarkdownV2 message outright if a reserved character is
//! left unescaped, so every piece of free text goes through these helpers.

/// Characters that must be escaped outside code entities
const RESERVED: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
    '\\',
];

/// Escape text for use as plain MarkdownV2 content
pub fn escape_markdown_v2(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        if RESERVED.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Bold entity with escaped content
pub fn bold(text: &str) -> String {
    format!("*{}*", escape_markdown_v2(text))
}

/// Preformatted block; only backtick and backslash need escaping inside
pub fn code_block(text: &str) -> String {
    let mut body = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if c == '`' || c == '\\' {
            body.push('\\');
        }
        body.push(c);
    }
    if !body.ends_with('\n') {
        body.push('\n');
    }
    format!("```\n{body}```")
}
