// Text normalization: slugs, search keys, character references.
use once_cell::sync::Lazy;
use std::collections::HashMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// NFD-decompose and drop combining marks ("Šamorín" -> "Samorin").
fn strip_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// URL-safe derivation of a display name: diacritics stripped, lowercased,
/// whitespace runs collapsed to single hyphens, everything outside
/// `[a-z0-9_-]` dropped. Idempotent, so a slug round-trips unchanged.
pub fn slugify(text: &str) -> String {
    let stripped = strip_diacritics(text).to_lowercase();
    let mut slug = String::with_capacity(stripped.len());
    for c in stripped.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            slug.push(c);
        } else if (c.is_whitespace() || c == '-') && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

/// Comparison key for diacritic-insensitive substring search. Never used for
/// display.
pub fn normalize_for_search(text: &str) -> String {
    strip_diacritics(text).to_lowercase()
}

static NAMED_ENTITIES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("amp", "&"),
        ("lt", "<"),
        ("gt", ">"),
        ("quot", "\""),
        ("apos", "'"),
        // plain space rather than U+00A0 so search keys stay matchable
        ("nbsp", " "),
    ])
});

// Entity bodies longer than this are treated as literal text, not references.
const MAX_ENTITY_LEN: usize = 8;

/// Decode HTML/XML character references (`&amp;`, `&#233;`, `&#xE9;`) to
/// literal text. Unknown or unterminated references pass through verbatim.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail[1..]
            .find(';')
            .filter(|end| *end <= MAX_ENTITY_LEN)
            .and_then(|end| decode_reference(&tail[1..1 + end]).map(|c| (c, end)));
        match decoded {
            Some((decoded, end)) => {
                out.push_str(&decoded);
                rest = &tail[end + 2..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_reference(body: &str) -> Option<String> {
    if let Some(num) = body.strip_prefix('#') {
        let code = if let Some(hex) = num.strip_prefix(['x', 'X']) {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            num.parse::<u32>().ok()?
        };
        return char::from_u32(code).map(String::from);
    }
    NAMED_ENTITIES.get(body).map(|s| s.to_string())
}
