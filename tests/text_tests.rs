//! Slug, search-key, and entity-decoding behavior.

use cardex::domain::text::{decode_entities, normalize_for_search, slugify};

#[test]
fn slugify_strips_diacritics() {
    assert_eq!(slugify("Šamorín"), "samorin");
    assert_eq!(slugify("Casino Café de Paris"), "casino-cafe-de-paris");
}

#[test]
fn slugify_matches_ascii_spelling() {
    assert_eq!(slugify("Šamorín Casino"), slugify("Samorin Casino"));
}

#[test]
fn slugify_collapses_whitespace_and_hyphens() {
    assert_eq!(slugify("Banco  Casino   Bratislava"), "banco-casino-bratislava");
    assert_eq!(slugify("Rebuy - Stars"), "rebuy-stars");
    assert_eq!(slugify("--edge--case--"), "edge-case");
}

#[test]
fn slugify_drops_punctuation() {
    assert_eq!(slugify("King's Resort!"), "kings-resort");
}

#[test]
fn slugify_is_idempotent() {
    for name in ["Šamorín Casino", "Banco Casino Bratislava", "King's Resort", ""] {
        let once = slugify(name);
        assert_eq!(slugify(&once), once);
    }
}

#[test]
fn slugify_empty_input() {
    assert_eq!(slugify(""), "");
    assert_eq!(slugify("   "), "");
    assert_eq!(slugify("!!!"), "");
}

#[test]
fn normalize_for_search_is_diacritic_insensitive() {
    assert_eq!(normalize_for_search("Šamorín"), "samorin");
    assert_eq!(normalize_for_search("ŠAMORÍN"), normalize_for_search("šamorín"));
}

#[test]
fn decode_named_entities() {
    assert_eq!(decode_entities("Bally&apos;s &amp; Co"), "Bally's & Co");
    assert_eq!(decode_entities("&lt;tag&gt; &quot;q&quot;"), "<tag> \"q\"");
}

#[test]
fn decode_numeric_entities() {
    assert_eq!(decode_entities("Caf&#233;"), "Café");
    assert_eq!(decode_entities("Caf&#xE9;"), "Café");
}

#[test]
fn decode_leaves_unknown_references_alone() {
    assert_eq!(decode_entities("R&D department"), "R&D department");
    assert_eq!(decode_entities("&bogus; &"), "&bogus; &");
    assert_eq!(decode_entities(""), "");
}
