//! Markup stripping for free-text form input

use std::{collections::HashSet, sync::LazyLock};

/// Allows no tags at all and drops `<script>` elements together with their
/// content.
static CLEANER: LazyLock<ammonia::Builder<'static>> = LazyLock::new(|| {
    let mut builder = ammonia::Builder::empty();
    builder.clean_content_tags(HashSet::from(["script"]));
    builder
});

/// Trims `input`, caps it at `max_len` characters and strips all markup.
///
/// Text outside of tags is kept as typed, except that `<` and `>` come back
/// as `&lt;` and `&gt;`. A `<` that is never closed is text, not the start of
/// a tag.
///
/// The result never exceeds `max_len` characters, never ends inside `&lt;` or
/// `&gt;` and is a fixed point: sanitizing it again returns it unchanged.
pub fn sanitize_text(input: &str, max_len: usize) -> String {
    let input = truncate_chars(input.trim(), max_len);
    let cleaned = CLEANER.clean(&escape_text(input)).to_string();
    let cleaned = unescape_text(&cleaned);
    truncate_escaped(&cleaned, max_len).trim().to_owned()
}

/// Escapes `&` so the parser keeps entities literally, and every `<` after the
/// last `>`.
fn escape_text(input: &str) -> String {
    let closed = input.rfind('>').unwrap_or(0);
    let mut escaped = String::with_capacity(input.len());
    for (idx, c) in input.char_indices() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' if idx >= closed => escaped.push_str("&lt;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Reverts the serializer's `&amp;` and `&nbsp;`, leaving `&lt;` and `&gt;`.
fn unescape_text(s: &str) -> String {
    let mut unescaped = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(idx) = rest.find('&') {
        unescaped.push_str(&rest[..idx]);
        rest = &rest[idx..];
        if let Some(tail) = rest.strip_prefix("&amp;") {
            unescaped.push('&');
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("&nbsp;") {
            unescaped.push('\u{a0}');
            rest = tail;
        } else {
            unescaped.push('&');
            rest = &rest[1..];
        }
    }
    unescaped.push_str(rest);
    unescaped
}

fn truncate_chars(s: &str, max_len: usize) -> &str {
    match s.char_indices().nth(max_len) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Escaping `<` and `>` can make the cleaned text longer than the cap again.
fn truncate_escaped(s: &str, max_len: usize) -> &str {
    let truncated = truncate_chars(s, max_len);
    if truncated.len() == s.len() {
        return s;
    }

    match truncated.rfind('&') {
        Some(idx) if is_partial_entity(&truncated[idx..]) => &truncated[..idx],
        _ => truncated,
    }
}

fn is_partial_entity(tail: &str) -> bool {
    tail.len() < 4 && ["&lt;", "&gt;"].iter().any(|entity| entity.starts_with(tail))
}
