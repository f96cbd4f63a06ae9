//! HTML escaping for user-supplied values echoed into messages.

/// Escape the characters that are significant in HTML text and attributes.
///
/// Any value that came from a request and ends up in an error message goes
/// through here, so a hostile parameter like `<script>` is rendered inert.
#[must_use]
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
