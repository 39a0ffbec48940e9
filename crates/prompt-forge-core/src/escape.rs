/// Escapes markup-significant characters in user-controlled text.
///
/// `&` becomes `&amp;`, `<` `&lt;`, `>` `&gt;`, `"` `&quot;` and `'` `&apos;`.
/// A single pass gives the same result as replacing `&` first and the rest
/// afterwards, so existing entity sequences are escaped exactly once.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Turns a user-supplied key into a usable element name.
///
/// Keys that already are valid names pass through unchanged. Otherwise any
/// character other than a letter, digit, `_`, `-` or `.` becomes `_`, a name
/// not starting with a letter or `_` gets a `_` prefix, and an empty key
/// becomes `_`.
pub fn element_name(key: &str) -> String {
    let mut name: String = key
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    match name.chars().next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => name.insert(0, '_'),
    }
    name
}
