//! Selection state management for components.
//!
//! Selection flags live on the items themselves (see [`Selectable`]); this
//! module only keeps the range anchor and applies click semantics. Positions
//! are indices into the component's current ordering (after search and sort),
//! not original record indices.

use nuidom::Modifiers;

/// Selection mode for components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// One item at a time; modifier clicks behave like plain clicks.
    Single,
    /// Multiple items can be selected (Ctrl/Cmd+click, Shift+range)
    #[default]
    Multiple,
}

/// An item carrying its own selection flag.
pub trait Selectable {
    fn is_selected(&self) -> bool;
    fn set_selected(&mut self, selected: bool);
}

/// How a click is interpreted, derived from its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    /// Plain click: select only the clicked item.
    Replace,
    /// Shift+click: select everything between the anchor and the click.
    Range,
    /// Ctrl/Cmd+click: toggle the clicked item.
    Toggle,
    /// Alt+click: inspect the item without touching the selection.
    Inspect,
}

impl ClickKind {
    pub fn from_modifiers(modifiers: Modifiers, mode: SelectionMode) -> Self {
        if modifiers.alt {
            return ClickKind::Inspect;
        }
        match mode {
            SelectionMode::Single => ClickKind::Replace,
            SelectionMode::Multiple if modifiers.shift => ClickKind::Range,
            SelectionMode::Multiple if modifiers.command() => ClickKind::Toggle,
            SelectionMode::Multiple => ClickKind::Replace,
        }
    }
}

/// Result of applying a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    /// At least one flag changed.
    Changed,
    Unchanged,
    /// Alt+click on the item at this position.
    Inspect { position: usize },
}

/// Anchor-based selection controller.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    mode: SelectionMode,
    /// Anchor for range selection (Shift+click starting point)
    anchor: Option<usize>,
}

impl Selection {
    pub fn new(mode: SelectionMode) -> Self {
        Self { mode, anchor: None }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Get the anchor position for range selection.
    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    /// Forget the anchor without touching any flags.
    pub fn reset_anchor(&mut self) {
        self.anchor = None;
    }

    /// Clear every flag and the anchor. Returns true if any flag changed.
    pub fn clear<T: Selectable>(&mut self, items: &mut [T]) -> bool {
        self.anchor = None;
        let mut changed = false;
        for item in items.iter_mut().filter(|i| i.is_selected()) {
            item.set_selected(false);
            changed = true;
        }
        changed
    }

    /// Apply a click at `position` of `order`.
    ///
    /// `order` maps positions to indices into `items`. Out-of-range
    /// positions are ignored.
    pub fn click<T: Selectable>(
        &mut self,
        items: &mut [T],
        order: &[usize],
        position: usize,
        modifiers: Modifiers,
    ) -> SelectionChange {
        if position >= order.len() {
            return SelectionChange::Unchanged;
        }
        match ClickKind::from_modifiers(modifiers, self.mode) {
            ClickKind::Inspect => SelectionChange::Inspect { position },
            ClickKind::Replace => self.replace(items, order, position),
            ClickKind::Range => match self.anchor {
                Some(anchor) if anchor < order.len() => {
                    let (start, end) = if anchor <= position {
                        (anchor, position)
                    } else {
                        (position, anchor)
                    };
                    let mut changed = false;
                    for &index in &order[start..=end] {
                        changed |= set_flag(items, index, true);
                    }
                    to_change(changed)
                }
                // No usable anchor: behave like a plain click
                _ => self.replace(items, order, position),
            },
            ClickKind::Toggle => {
                let index = order[position];
                let now_selected = !items.get(index).is_some_and(Selectable::is_selected);
                set_flag(items, index, now_selected);
                if now_selected {
                    self.anchor = Some(position);
                }
                SelectionChange::Changed
            }
        }
    }

    /// Replace the selection with the given positions of `order`.
    pub fn select_positions<T: Selectable>(
        &mut self,
        items: &mut [T],
        order: &[usize],
        positions: &[usize],
    ) -> bool {
        let indices: Vec<usize> = positions
            .iter()
            .filter_map(|&p| order.get(p).copied())
            .collect();
        self.select_indices(items, &indices)
    }

    /// Replace the selection with the given item indices.
    ///
    /// In single mode only the first valid index is kept.
    pub fn select_indices<T: Selectable>(&mut self, items: &mut [T], indices: &[usize]) -> bool {
        let mut wanted = vec![false; items.len()];
        let valid = indices.iter().copied().filter(|&i| i < items.len());
        let take = match self.mode {
            SelectionMode::Single => 1,
            SelectionMode::Multiple => usize::MAX,
        };
        for index in valid.take(take) {
            wanted[index] = true;
        }
        self.anchor = None;
        let mut changed = false;
        for (item, &on) in items.iter_mut().zip(&wanted) {
            if item.is_selected() != on {
                item.set_selected(on);
                changed = true;
            }
        }
        changed
    }

    /// Selected item indices in item order.
    pub fn selected_indices<T: Selectable>(items: &[T]) -> Vec<usize> {
        items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_selected())
            .map(|(index, _)| index)
            .collect()
    }

    /// Positions of selected items within `order`.
    pub fn selected_positions<T: Selectable>(items: &[T], order: &[usize]) -> Vec<usize> {
        order
            .iter()
            .enumerate()
            .filter(|&(_, &index)| items.get(index).is_some_and(Selectable::is_selected))
            .map(|(position, _)| position)
            .collect()
    }

    fn replace<T: Selectable>(
        &mut self,
        items: &mut [T],
        order: &[usize],
        position: usize,
    ) -> SelectionChange {
        let target = order[position];
        let mut changed = false;
        for (index, item) in items.iter_mut().enumerate() {
            let on = index == target;
            if item.is_selected() != on {
                item.set_selected(on);
                changed = true;
            }
        }
        self.anchor = Some(position);
        to_change(changed)
    }
}

fn set_flag<T: Selectable>(items: &mut [T], index: usize, on: bool) -> bool {
    match items.get_mut(index) {
        Some(item) if item.is_selected() != on => {
            item.set_selected(on);
            true
        }
        _ => false,
    }
}

fn to_change(changed: bool) -> SelectionChange {
    if changed {
        SelectionChange::Changed
    } else {
        SelectionChange::Unchanged
    }
}
