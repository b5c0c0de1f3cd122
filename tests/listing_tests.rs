//! End-to-end country-listing pipeline against a scripted source.

mod common;

use std::sync::atomic::Ordering;

use cardex::application::listing::country_listing;
use cardex::domain::error::DirectoryError;
use cardex::infrastructure::config::Config;
use cardex::state::AppState;
use common::ScriptedSource;

fn app_state() -> AppState {
    AppState::new(Config::default()).expect("state")
}

/// 14 tags, 2 without ids: the listing shows 12 venues on a single page
/// with no pagination controls.
#[tokio::test(start_paused = true)]
async fn listing_drops_idless_tags_and_fits_one_page() {
    let mut xml = String::from("<CASINOS>");
    for i in 1..=12 {
        xml.push_str(&format!(
            r#"<CASINO ID="{i}" TITLE="Casino {i}" CITY="Bratislava" COUNTRY="SK"/>"#
        ));
    }
    xml.push_str(r#"<CASINO TITLE="No id"/><CASINO TITLE="Also no id"/>"#);
    xml.push_str("</CASINOS>");

    let source = ScriptedSource::new(&xml);
    let state = app_state();
    let view = country_listing(&source, &state, "sk", None, 1)
        .await
        .unwrap();

    assert_eq!(view.country, "SK");
    assert_eq!(view.page.total_items, 12);
    assert_eq!(view.page.total_pages, 1);
    assert!(view.window.is_empty(), "12 items at 12/page needs no controls");
}

#[tokio::test(start_paused = true)]
async fn thirteen_items_paginate_with_controls() {
    let venues: Vec<(String, String, String)> = (1..=13)
        .map(|i| (i.to_string(), format!("Casino {i}"), "Kosice".to_string()))
        .collect();
    let refs: Vec<(&str, &str, &str)> = venues
        .iter()
        .map(|(a, b, c)| (a.as_str(), b.as_str(), c.as_str()))
        .collect();
    let source = ScriptedSource::new(&common::country_xml(&refs));
    let state = app_state();

    let view = country_listing(&source, &state, "SK", None, 2)
        .await
        .unwrap();
    assert_eq!(view.page.total_pages, 2);
    assert_eq!(view.page.current_page, 2);
    assert_eq!(view.page.items.len(), 1);
    assert!(!view.window.is_empty());
}

#[tokio::test(start_paused = true)]
async fn search_filters_diacritic_insensitively() {
    let source = ScriptedSource::new(&common::country_xml(&[
        ("1", "Samorin Poker Room", "Samorin"),
        ("2", "Banco Casino", "Bratislava"),
    ]));
    let state = app_state();

    let view = country_listing(&source, &state, "SK", Some("šamorín"), 1)
        .await
        .unwrap();
    assert_eq!(view.page.total_items, 1);
    assert_eq!(view.page.items[0].name, "Samorin Poker Room");
}

#[tokio::test(start_paused = true)]
async fn narrowed_collection_lands_on_page_one() {
    let venues: Vec<(String, String, String)> = (1..=30)
        .map(|i| (i.to_string(), format!("Casino {i}"), "Nitra".to_string()))
        .collect();
    let refs: Vec<(&str, &str, &str)> = venues
        .iter()
        .map(|(a, b, c)| (a.as_str(), b.as_str(), c.as_str()))
        .collect();
    let source = ScriptedSource::new(&common::country_xml(&refs));
    let state = app_state();

    // page 3 exists unfiltered, but the search shrinks the collection
    let view = country_listing(&source, &state, "SK", Some("Casino 3"), 3)
        .await
        .unwrap();
    assert_eq!(view.page.total_items, 2); // "Casino 3" and "Casino 30"
    assert_eq!(view.page.current_page, 1);
}

#[tokio::test(start_paused = true)]
async fn listing_succeeds_after_transient_failures() {
    let source = ScriptedSource::new(&common::country_xml(&[("1", "Alfa", "Bratislava")]))
        .fail_country_times(2);
    let state = app_state();

    let view = country_listing(&source, &state, "SK", None, 1)
        .await
        .unwrap();
    assert_eq!(view.page.total_items, 1);
    assert_eq!(source.country_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn listing_fails_terminally_once_retries_exhaust() {
    let source = ScriptedSource::new(&common::country_xml(&[("1", "Alfa", "Bratislava")]))
        .fail_country_times(99);
    let state = app_state();

    let err = country_listing(&source, &state, "SK", None, 1)
        .await
        .unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(
        source.country_calls.load(Ordering::SeqCst),
        3,
        "default policy allows three attempts"
    );
}

#[tokio::test(start_paused = true)]
async fn malformed_payload_is_terminal_without_retry() {
    let source = ScriptedSource::new("<ERROR>maintenance</ERROR>");
    let state = app_state();

    let err = country_listing(&source, &state, "SK", None, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::InvalidFormat(_)));
    assert_eq!(source.country_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn visible_venues_get_logos_from_the_detail_cache() {
    let source = ScriptedSource::new(&common::country_xml(&[
        ("1", "Alfa", "Bratislava"),
        ("2", "Bravo", "Kosice"),
    ]))
    .with_detail("1", &common::detail_xml("1", "Alfa", Some("https://img.example/1.png")))
    .with_detail("2", &common::detail_xml("2", "Bravo", None));
    let state = app_state();

    let view = country_listing(&source, &state, "SK", None, 1)
        .await
        .unwrap();
    assert_eq!(
        view.page.items[0].logo_url.as_deref(),
        Some("https://img.example/1.png")
    );
    assert_eq!(view.page.items[1].logo_url, None);
    assert_eq!(source.detail_calls.load(Ordering::SeqCst), 2);

    // a re-render of the same country reuses both the parse memo and the
    // resolved logo entries
    country_listing(&source, &state, "SK", None, 1).await.unwrap();
    assert_eq!(source.detail_calls.load(Ordering::SeqCst), 2);
    assert_eq!(state.parser.lock().unwrap().scans(), 1);
}

#[tokio::test(start_paused = true)]
async fn country_change_resets_the_logo_cache() {
    let source = ScriptedSource::new(&common::country_xml(&[("1", "Alfa", "Bratislava")]))
        .with_detail("1", &common::detail_xml("1", "Alfa", Some("https://img.example/1.png")));
    let state = app_state();

    country_listing(&source, &state, "SK", None, 1).await.unwrap();
    assert_eq!(source.detail_calls.load(Ordering::SeqCst), 1);

    country_listing(&source, &state, "CZ", None, 1).await.unwrap();
    assert_eq!(
        source.detail_calls.load(Ordering::SeqCst),
        2,
        "new country, fresh logo lookups"
    );
}

#[tokio::test(start_paused = true)]
async fn empty_listing_is_a_success_not_an_error() {
    let source = ScriptedSource::new("<CASINOS></CASINOS>");
    let state = app_state();

    let view = country_listing(&source, &state, "SK", None, 1)
        .await
        .unwrap();
    assert_eq!(view.page.total_items, 0);
    assert!(view.window.is_empty());
}
