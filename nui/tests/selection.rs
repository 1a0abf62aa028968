use nui::components::selection::Selectable;
use nui::prelude::*;

#[derive(Debug, Default, Clone)]
struct Row {
    selected: bool,
}

impl Selectable for Row {
    fn is_selected(&self) -> bool {
        self.selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

fn rows(n: usize) -> Vec<Row> {
    vec![Row::default(); n]
}

fn identity(n: usize) -> Vec<usize> {
    (0..n).collect()
}

// ============================================================================
// Click interpretation
// ============================================================================

#[test]
fn test_click_kind_from_modifiers() {
    let multi = SelectionMode::Multiple;
    assert_eq!(ClickKind::from_modifiers(Modifiers::new(), multi), ClickKind::Replace);
    assert_eq!(ClickKind::from_modifiers(Modifiers::shift(), multi), ClickKind::Range);
    assert_eq!(ClickKind::from_modifiers(Modifiers::ctrl(), multi), ClickKind::Toggle);
    assert_eq!(ClickKind::from_modifiers(Modifiers::meta(), multi), ClickKind::Toggle);
    assert_eq!(ClickKind::from_modifiers(Modifiers::alt(), multi), ClickKind::Inspect);
}

#[test]
fn test_single_mode_ignores_shift_and_ctrl() {
    let single = SelectionMode::Single;
    assert_eq!(ClickKind::from_modifiers(Modifiers::shift(), single), ClickKind::Replace);
    assert_eq!(ClickKind::from_modifiers(Modifiers::ctrl(), single), ClickKind::Replace);
    assert_eq!(ClickKind::from_modifiers(Modifiers::alt(), single), ClickKind::Inspect);
}

// ============================================================================
// Click sequences
// ============================================================================

#[test]
fn test_click_shift_ctrl_sequence() {
    let mut items = rows(10);
    let order = identity(10);
    let mut selection = Selection::new(SelectionMode::Multiple);

    selection.click(&mut items, &order, 2, Modifiers::new());
    assert_eq!(Selection::selected_indices(&items), vec![2]);
    assert_eq!(selection.anchor(), Some(2));

    selection.click(&mut items, &order, 5, Modifiers::shift());
    assert_eq!(Selection::selected_indices(&items), vec![2, 3, 4, 5]);
    assert_eq!(selection.anchor(), Some(2));

    selection.click(&mut items, &order, 7, Modifiers::ctrl());
    assert_eq!(Selection::selected_indices(&items), vec![2, 3, 4, 5, 7]);

    selection.click(&mut items, &order, 0, Modifiers::new());
    assert_eq!(Selection::selected_indices(&items), vec![0]);
}

#[test]
fn test_shift_click_upwards() {
    let mut items = rows(10);
    let order = identity(10);
    let mut selection = Selection::new(SelectionMode::Multiple);

    selection.click(&mut items, &order, 6, Modifiers::new());
    selection.click(&mut items, &order, 3, Modifiers::shift());

    assert_eq!(Selection::selected_indices(&items), vec![3, 4, 5, 6]);
}

#[test]
fn test_shift_click_adds_to_existing_selection() {
    let mut items = rows(10);
    let order = identity(10);
    let mut selection = Selection::new(SelectionMode::Multiple);

    selection.click(&mut items, &order, 0, Modifiers::new());
    selection.click(&mut items, &order, 8, Modifiers::ctrl());
    selection.click(&mut items, &order, 6, Modifiers::shift());

    assert_eq!(Selection::selected_indices(&items), vec![0, 6, 7, 8]);
}

#[test]
fn test_shift_click_without_anchor_is_plain_click() {
    let mut items = rows(5);
    items[0].selected = true;
    let order = identity(5);
    let mut selection = Selection::new(SelectionMode::Multiple);

    let change = selection.click(&mut items, &order, 3, Modifiers::shift());

    assert_eq!(change, SelectionChange::Changed);
    assert_eq!(Selection::selected_indices(&items), vec![3]);
    assert_eq!(selection.anchor(), Some(3));
}

#[test]
fn test_ctrl_deselect_keeps_anchor() {
    let mut items = rows(10);
    let order = identity(10);
    let mut selection = Selection::new(SelectionMode::Multiple);

    selection.click(&mut items, &order, 2, Modifiers::new());
    selection.click(&mut items, &order, 4, Modifiers::ctrl());
    assert_eq!(selection.anchor(), Some(4));

    selection.click(&mut items, &order, 2, Modifiers::ctrl());

    assert_eq!(Selection::selected_indices(&items), vec![4]);
    assert_eq!(selection.anchor(), Some(4));
}

#[test]
fn test_alt_click_inspects_without_change() {
    let mut items = rows(5);
    let order = identity(5);
    let mut selection = Selection::new(SelectionMode::Multiple);
    selection.click(&mut items, &order, 1, Modifiers::new());

    let change = selection.click(&mut items, &order, 3, Modifiers::alt());

    assert_eq!(change, SelectionChange::Inspect { position: 3 });
    assert_eq!(Selection::selected_indices(&items), vec![1]);
}

#[test]
fn test_repeated_plain_click_is_unchanged() {
    let mut items = rows(5);
    let order = identity(5);
    let mut selection = Selection::new(SelectionMode::Multiple);

    assert_eq!(
        selection.click(&mut items, &order, 1, Modifiers::new()),
        SelectionChange::Changed
    );
    assert_eq!(
        selection.click(&mut items, &order, 1, Modifiers::new()),
        SelectionChange::Unchanged
    );
}

#[test]
fn test_click_out_of_range_is_ignored() {
    let mut items = rows(3);
    let order = identity(3);
    let mut selection = Selection::new(SelectionMode::Multiple);

    assert_eq!(
        selection.click(&mut items, &order, 3, Modifiers::new()),
        SelectionChange::Unchanged
    );
    assert!(Selection::selected_indices(&items).is_empty());
}

#[test]
fn test_positions_map_through_order() {
    let mut items = rows(4);
    let order = vec![3, 1, 2, 0];
    let mut selection = Selection::new(SelectionMode::Multiple);

    selection.click(&mut items, &order, 0, Modifiers::new());
    selection.click(&mut items, &order, 1, Modifiers::shift());

    assert_eq!(Selection::selected_indices(&items), vec![1, 3]);
    assert_eq!(Selection::selected_positions(&items, &order), vec![0, 1]);
}

// ============================================================================
// Programmatic selection
// ============================================================================

#[test]
fn test_select_indices_replaces_selection() {
    let mut items = rows(5);
    let mut selection = Selection::new(SelectionMode::Multiple);
    selection.select_indices(&mut items, &[0, 1]);

    let changed = selection.select_indices(&mut items, &[3, 4, 99]);

    assert!(changed);
    assert_eq!(Selection::selected_indices(&items), vec![3, 4]);
    assert_eq!(selection.anchor(), None);
}

#[test]
fn test_select_indices_over_large_set() {
    let mut items = rows(100_000);
    let mut selection = Selection::new(SelectionMode::Multiple);
    let wanted: Vec<usize> = (0..100_000).step_by(2).collect();

    assert!(selection.select_indices(&mut items, &wanted));

    assert_eq!(Selection::selected_indices(&items), wanted);
    assert!(!selection.select_indices(&mut items, &wanted));
}

#[test]
fn test_select_indices_single_mode_keeps_first() {
    let mut items = rows(5);
    let mut selection = Selection::new(SelectionMode::Single);

    selection.select_indices(&mut items, &[2, 4]);

    assert_eq!(Selection::selected_indices(&items), vec![2]);
}

#[test]
fn test_clear_reports_change() {
    let mut items = rows(3);
    let mut selection = Selection::new(SelectionMode::Multiple);
    assert!(!selection.clear(&mut items));

    selection.select_positions(&mut items, &identity(3), &[1]);
    assert!(selection.clear(&mut items));
    assert!(Selection::selected_indices(&items).is_empty());
}
