//! Dense tables behave as locked surfaces until they really overflow.

use panelkit_core::Rect;
use panelkit_layout::ScrollOverflowGuard;
use panelkit_style::{Tokens, attr};
use panelkit_widgets::{
    CellAlignment, ColumnSet, ColumnSpec, PanelChrome, PanelVariant, Record, ScrollInputs,
    ScrollKey, TableBody, Widget,
};

fn six_columns() -> ColumnSet {
    ColumnSet::new([
        ColumnSpec::new("logo", "", 28),
        ColumnSpec::new("team", "Team", 180),
        ColumnSpec::new("gp", "GP", 40).align(CellAlignment::END),
        ColumnSpec::new("w", "W", 40).align(CellAlignment::END),
        ColumnSpec::new("l", "L", 40).align(CellAlignment::END),
        ColumnSpec::new("pts", "Pts", 48).align(CellAlignment::END),
    ])
    .unwrap()
}

fn row(i: i64) -> Record {
    Record::new()
        .with("team", format!("Team {i}"))
        .with("gp", 10)
        .with("w", i % 10)
        .with("l", 10 - i % 10)
        .with("pts", 2 * (i % 10))
}

#[test]
fn two_hundred_rows_in_a_150px_viewport() {
    let columns = six_columns();
    let mut chrome = PanelChrome::new(PanelVariant::Table);
    chrome.set_table_columns(&columns);
    chrome.set_body(TableBody::new(columns.clone()));

    // Tertiary bar (26) + 150 px of body.
    chrome.layout(Rect::new(0, 0, 400, 176));
    let body = chrome.body_as_mut::<TableBody>().unwrap();
    assert_eq!(body.viewport().height, 150);
    body.set_rows((0..200).map(row));

    assert!(body.is_overflowing());
    assert_eq!(body.scroll().range(), (200.0 * 24.0) - 150.0);
    assert_eq!(body.scroll().range(), 4650.0);
    assert!(body.scroll().scrollbar_hidden());
    assert!(
        body.style_hooks()
            .has_attr(attr::HIDDEN_SCROLLBAR, &true.into())
    );
    assert_eq!(body.scroll().inputs(), ScrollInputs::all());

    let moved = body.scroll_mut().wheel(1.0);
    assert!(moved > 0.0);
    assert_eq!(body.scroll().offset(), moved);
    assert!(body.visible_rows().start > 0);

    body.scroll_mut().key(ScrollKey::End);
    assert_eq!(body.scroll().offset(), 4650.0);
}

#[test]
fn rows_that_fit_lock_the_surface() {
    let mut body = TableBody::new(six_columns());
    body.layout(Rect::new(0, 0, 400, 144));
    body.set_rows((0..6).map(row));
    assert!(!body.is_overflowing());
    assert_eq!(body.scroll().range(), 0.0);
    assert_eq!(body.scroll_mut().wheel(3.0), 0.0);
    assert_eq!(body.scroll_mut().trackpad(40.0), 0.0);
}

#[test]
fn one_pixel_of_rounding_stays_locked() {
    let mut body = TableBody::new(six_columns());
    body.layout(Rect::new(0, 0, 400, 143));
    body.set_rows((0..6).map(row));
    assert!(!body.is_overflowing());

    body.layout(Rect::new(0, 0, 400, 142));
    assert!(body.is_overflowing());
    assert_eq!(body.scroll().range(), 2.0);
}

#[test]
fn guard_transitions_both_ways_on_mutation_and_resize() {
    let mut chrome = PanelChrome::new(PanelVariant::Table);
    chrome.set_body(TableBody::new(six_columns()));
    chrome.layout(Rect::new(0, 0, 400, 240));

    let body = chrome.body_as_mut::<TableBody>().unwrap();
    body.set_rows((0..10).map(row));
    assert!(!body.is_overflowing());
    body.push_row(row(10));
    assert!(body.is_overflowing());

    chrome.layout(Rect::new(0, 0, 400, 264));
    assert!(!chrome.body_as::<TableBody>().unwrap().is_overflowing());

    chrome.layout(Rect::new(0, 0, 400, 100));
    let body = chrome.body_as_mut::<TableBody>().unwrap();
    assert!(body.is_overflowing());
    body.clear_rows();
    assert!(!body.is_overflowing());
}

#[test]
fn chrome_tokens_size_rows_and_guard() {
    let tokens = Tokens {
        row_height_px: 30,
        overflow_threshold_px: 10.0,
        ..Tokens::default()
    };
    let mut chrome = PanelChrome::with_tokens(PanelVariant::Table, tokens);
    let mut body = TableBody::new(six_columns());
    body.set_rows((0..5).map(row));
    chrome.set_body(body);

    let body = chrome.body_as::<TableBody>().unwrap();
    assert_eq!(body.row_height_px(), 30);
    assert_eq!(body.content_height(), 150);
    assert_eq!(body.scroll().region().guard().threshold_px(), 10.0);

    // 150 px of rows in 141 px of body: 9 px over, inside the tolerance.
    chrome.layout(Rect::new(0, 0, 400, 141));
    assert!(!chrome.body_as::<TableBody>().unwrap().is_overflowing());
    chrome.layout(Rect::new(0, 0, 400, 139));
    assert!(chrome.body_as::<TableBody>().unwrap().is_overflowing());
}

#[test]
fn explicit_row_height_survives_chrome_tokens() {
    let tokens = Tokens {
        row_height_px: 30,
        ..Tokens::default()
    };
    let mut chrome = PanelChrome::with_tokens(PanelVariant::Table, tokens);
    chrome.add_body(
        TableBody::new(six_columns())
            .row_height(20)
            .guard(ScrollOverflowGuard::new(0.0)),
    );
    let body = chrome.body_as::<TableBody>().unwrap();
    assert_eq!(body.row_height_px(), 20);
    assert_eq!(body.scroll().region().guard().threshold_px(), 0.0);
}

#[test]
fn table_body_with_tokens_uses_token_metrics() {
    let tokens = Tokens {
        row_height_px: 18,
        overflow_threshold_px: 4.0,
        ..Tokens::default()
    };
    let mut body = TableBody::with_tokens(six_columns(), &tokens);
    body.set_rows((0..3).map(row));
    assert_eq!(body.content_height(), 54);
    body.layout(Rect::new(0, 0, 400, 50));
    assert!(!body.is_overflowing());
    body.layout(Rect::new(0, 0, 400, 49));
    assert_eq!(body.scroll().range(), 5.0);
}
