//! Page slicing, page-number windows, and the reset-on-change rule.

use cardex::domain::pagination::{
    controls_for, page_window, paginate, PageMark, PaginationState,
};

#[test]
fn twenty_five_items_at_page_size_twelve() {
    let items: Vec<u32> = (1..=25).collect();
    let page = paginate(&items, 12, 1);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 12);

    let last = paginate(&items, 12, 3);
    assert_eq!(last.items, vec![25]);
    assert_eq!(last.offset(), 24);
}

#[test]
fn empty_collection_still_has_one_page() {
    let items: Vec<u32> = Vec::new();
    let page = paginate(&items, 12, 1);
    assert_eq!(page.total_pages, 1);
    assert!(page.items.is_empty());
}

#[test]
fn out_of_range_page_is_clamped() {
    let items: Vec<u32> = (1..=5).collect();
    let page = paginate(&items, 12, 9);
    assert_eq!(page.current_page, 1);
    assert_eq!(page.items.len(), 5);
    let page = paginate(&items, 2, 0);
    assert_eq!(page.current_page, 1);
}

#[test]
fn collection_change_resets_to_page_one() {
    let full: Vec<u32> = (1..=25).collect();
    let mut state = PaginationState::new(12);
    state.set_page(3);
    assert_eq!(state.page_of(&full).current_page, 3);

    // a narrowing search replaces the collection
    let narrowed: Vec<u32> = (1..=5).collect();
    state.collection_changed();
    let page = state.page_of(&narrowed);
    assert_eq!(page.current_page, 1);
    assert_eq!(page.items.len(), 5);
}

#[test]
fn window_shows_first_last_and_radius() {
    let marks = page_window(5, 9, 2);
    assert_eq!(
        marks,
        vec![
            PageMark::Page(1),
            PageMark::Gap,
            PageMark::Page(3),
            PageMark::Page(4),
            PageMark::Page(5),
            PageMark::Page(6),
            PageMark::Page(7),
            PageMark::Gap,
            PageMark::Page(9),
        ]
    );
}

#[test]
fn window_collapses_each_gap_to_one_marker() {
    let marks = page_window(1, 30, 2);
    let gaps = marks.iter().filter(|m| matches!(m, PageMark::Gap)).count();
    assert_eq!(gaps, 1);
    assert_eq!(marks.first(), Some(&PageMark::Page(1)));
    assert_eq!(marks.last(), Some(&PageMark::Page(30)));
    // never two adjacent gaps anywhere
    for pair in marks.windows(2) {
        assert!(!matches!(pair, [PageMark::Gap, PageMark::Gap]));
    }
}

#[test]
fn window_without_gaps_when_everything_fits() {
    let marks = page_window(2, 4, 2);
    assert_eq!(
        marks,
        vec![
            PageMark::Page(1),
            PageMark::Page(2),
            PageMark::Page(3),
            PageMark::Page(4),
        ]
    );
}

#[test]
fn no_controls_when_collection_fits_one_page() {
    let items: Vec<u32> = (1..=12).collect();
    let page = paginate(&items, 12, 1);
    assert!(controls_for(&page, 12, 2).is_empty());

    let items: Vec<u32> = (1..=13).collect();
    let page = paginate(&items, 12, 1);
    assert!(!controls_for(&page, 12, 2).is_empty());
}
