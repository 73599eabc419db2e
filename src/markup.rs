//! HTML escaping for text and attribute values written into navbar markup.

/// Escape `text` with the mustache entity table.
///
/// ```
/// assert_eq!(
///     navglot::markup::escape(r#"<a href="/x">Tom & 'Jerry'</a>"#),
///     "&lt;a href&#x3D;&quot;&#x2F;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;&#x2F;a&gt;"
/// );
/// ```
#[must_use]
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '/' => escaped.push_str("&#x2F;"),
            '`' => escaped.push_str("&#x60;"),
            '=' => escaped.push_str("&#x3D;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape;
    use rstest::rstest;

    #[rstest]
    #[case("plain text", "plain text")]
    #[case("a=b", "a&#x3D;b")]
    #[case("`code`", "&#x60;code&#x60;")]
    #[case("", "")]
    fn escapes_the_entity_table(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape(input), expected);
    }
}
