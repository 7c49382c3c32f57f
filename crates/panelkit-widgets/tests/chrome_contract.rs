//! Bar visibility and body padding through the public chrome verbs.

use panelkit_core::{Rect, Sides};
use panelkit_widgets::{BarRole, BarVisibility, Item, PanelChrome, PanelVariant};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    SetLeft(usize),
    SetRight(usize),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..4).prop_map(Op::SetLeft),
        (0usize..4).prop_map(Op::SetRight),
        Just(Op::Clear),
    ]
}

fn items(n: usize) -> Vec<Item> {
    (0..n).map(|i| Item::text(format!("item {i}"))).collect()
}

fn apply(chrome: &mut PanelChrome, role: BarRole, op: &Op) {
    match (role, op) {
        (BarRole::Secondary, Op::SetLeft(n)) => chrome.set_filters_left(items(*n)),
        (BarRole::Secondary, Op::SetRight(n)) => chrome.set_filters_right(items(*n)),
        (BarRole::Secondary, Op::Clear) => chrome.clear_filters(),
        (BarRole::Tertiary, Op::SetLeft(n)) => chrome.set_columns_left(items(*n)),
        (BarRole::Tertiary, Op::SetRight(n)) => chrome.set_columns_right(items(*n)),
        (BarRole::Tertiary, Op::Clear) => chrome.clear_columns(),
        (_, Op::SetLeft(n)) => {
            let text = items(*n).into_iter().next();
            let right = chrome.bar(BarRole::Footer).right().len();
            chrome.set_footer(
                text.as_ref().and_then(Item::as_text),
                (right > 0).then(|| Item::text("right")),
            );
        }
        (_, Op::SetRight(n)) => {
            let text = chrome
                .bar(BarRole::Footer)
                .left()
                .first()
                .and_then(Item::as_text)
                .map(str::to_owned);
            chrome.set_footer(text.as_deref(), (*n > 0).then(|| Item::text("right")));
        }
        (_, Op::Clear) => chrome.clear_footer(),
    }
}

proptest! {
    #[test]
    fn non_primary_visibility_follows_content(
        role in prop_oneof![
            Just(BarRole::Secondary),
            Just(BarRole::Tertiary),
            Just(BarRole::Footer),
        ],
        ops in proptest::collection::vec(op(), 0..24),
    ) {
        let mut chrome = PanelChrome::new(PanelVariant::Card);
        prop_assert!(!chrome.bar(role).is_visible());
        for op in &ops {
            apply(&mut chrome, role, op);
            let bar = chrome.bar(role);
            let has_items = !bar.left().is_empty() || !bar.right().is_empty();
            prop_assert_eq!(bar.is_visible(), has_items);
        }
    }

    #[test]
    fn primary_with_title_never_hides(
        actions in proptest::collection::vec(any::<bool>(), 0..12),
    ) {
        let mut chrome = PanelChrome::with_title(PanelVariant::Card, "Schedule");
        for (i, left) in actions.iter().enumerate() {
            if *left {
                chrome.add_action_left(Item::action(format!("a{i}"), "A"));
            } else {
                chrome.clear_actions();
            }
            prop_assert!(chrome.bar(BarRole::Primary).is_visible());
        }
    }
}

#[test]
fn primary_title_only_is_visible() {
    let mut chrome = PanelChrome::new(PanelVariant::Card);
    chrome.set_primary("Power Rankings", [], []);
    assert!(chrome.bar(BarRole::Primary).is_visible());

    chrome.add_action_right(Item::action("refresh", "Refresh"));
    chrome.clear_actions();
    let primary = chrome.bar(BarRole::Primary);
    assert!(primary.is_visible());
    assert!(primary.right().is_empty());
    assert_eq!(primary.title(), "Power Rankings");
}

#[test]
fn primary_actions_without_title_are_visible() {
    let mut chrome = PanelChrome::new(PanelVariant::Card);
    chrome.add_action_left(Item::action("back", "Back"));
    assert!(chrome.bar(BarRole::Primary).is_visible());
    chrome.clear_actions();
    assert!(!chrome.bar(BarRole::Primary).is_visible());
}

#[test]
fn primary_cleared_to_nothing_hides() {
    let mut chrome = PanelChrome::with_title(PanelVariant::Table, "Roster");
    chrome.set_primary("", [], []);
    assert_eq!(
        chrome.bar(BarRole::Primary).visibility(),
        BarVisibility::Hidden
    );
}

#[test]
fn forced_hidden_is_the_only_override() {
    let mut chrome = PanelChrome::new(PanelVariant::Card);
    chrome.set_filters_left([Item::text("Conference")]);
    chrome.force_hide_bar(BarRole::Secondary, true);
    assert_eq!(
        chrome.bar(BarRole::Secondary).visibility(),
        BarVisibility::ForcedHidden
    );
    let layout = chrome.layout(Rect::new(0, 0, 200, 200));
    assert_eq!(layout.secondary, None);

    chrome.force_hide_bar(BarRole::Secondary, false);
    assert!(chrome.bar(BarRole::Secondary).is_visible());
}

#[test]
fn table_padding_defaults_to_zero() {
    let chrome = PanelChrome::new(PanelVariant::Table);
    assert_eq!(chrome.body_padding(), Sides::ZERO);
    assert!(!chrome.has_explicit_padding());
}

#[test]
fn explicit_padding_survives_set_variant_table() {
    let mut chrome = PanelChrome::new(PanelVariant::Table);
    chrome.set_body_padding(Sides::new(2, 8, 2, 8));
    chrome.set_variant(PanelVariant::Table);
    assert_eq!(chrome.body_padding(), Sides::new(2, 8, 2, 8));

    let layout = chrome.layout(Rect::new(0, 0, 100, 100));
    assert_eq!(layout.body_content, Rect::new(8, 2, 84, 96));
}

#[test]
fn card_padding_follows_variant_changes() {
    let mut chrome = PanelChrome::new(PanelVariant::Table);
    chrome.set_variant(PanelVariant::Card);
    assert_eq!(chrome.body_padding(), chrome.tokens().card_padding);
    chrome.set_variant(PanelVariant::Table);
    assert_eq!(chrome.body_padding(), Sides::ZERO);
}

#[test]
fn bar_hooks_expose_role() {
    let chrome = PanelChrome::new(PanelVariant::Card);
    let hooks = chrome.bar(BarRole::Tertiary).style_hooks();
    assert_eq!(hooks.object_name(), "TertiaryHeaderBar");
    assert!(hooks.has_attr("barRole", &"tertiary".into()));
}
