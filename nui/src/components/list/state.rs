//! List component state.

use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Instant;

use log::{debug, info, warn};
use nuidom::{Document, Modifiers, NodeId};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio_util::sync::CancellationToken;

use super::config::{ListConfig, ListOptions, SortDirection, Timing};
use super::events::{EventSink, ListEvent, ListEventKind, ListReason};
use super::filter::{FilteredView, SortOutcome};
use super::geometry::{DEFAULT_ITEM_HEIGHT, Geometry, ScrollMode};
use super::item::ListRecord;
use super::render::{Reconciler, Surface};
use super::store::RecordStore;
use crate::components::selection::{Selection, SelectionChange, SelectionMode};

/// Unique identifier for a List component instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListId(usize);

impl ListId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for ListId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__list_{}", self.0)
    }
}

/// Internal state for the List component.
#[derive(Debug)]
pub(super) struct ListInner<R: ListRecord> {
    id: ListId,
    doc: Document,
    surface: Surface,
    store: RecordStore<R>,
    view: FilteredView,
    geometry: Geometry,
    selection: Selection,
    reconciler: Reconciler<R>,
    events: EventSink<R>,
    options: ListOptions,
    timing: Timing,

    search_term: String,
    sort_column: Option<usize>,
    sort_direction: SortDirection,

    // Deadlines, evaluated by `tick`
    pending_search: Option<(String, Instant)>,
    resize_due: Option<Instant>,
    next_recalibration: Option<Instant>,
    wheel_muted_until: Option<Instant>,

    force_render: bool,
    visible: bool,
    destroyed: bool,
    /// Positions attached by the last pass.
    rendered: Range<usize>,
}

impl<R: ListRecord> ListInner<R> {
    fn new(id: ListId, config: ListConfig<R>) -> Self {
        let ListConfig {
            data,
            render,
            mut options,
            timing,
            viewport_height,
            item_height,
        } = config;

        if let Err(e) = options.validate() {
            warn!("{id}: {e}");
            options.sanitize();
        }

        let mut doc = Document::new();
        let surface = Surface::build(&mut doc, &options);
        let mode = if options.single {
            SelectionMode::Single
        } else {
            SelectionMode::Multiple
        };
        let item_height = if item_height.is_finite() && item_height > 0.0 {
            item_height
        } else {
            warn!("{id}: item height {item_height} is not usable");
            DEFAULT_ITEM_HEIGHT
        };

        let mut inner = Self {
            id,
            doc,
            surface,
            store: RecordStore::new(),
            view: FilteredView::new(),
            geometry: Geometry::new(item_height, sanitize_height(viewport_height)),
            selection: Selection::new(mode),
            reconciler: Reconciler::new(render, options.verbose),
            events: EventSink::new(),
            sort_column: options.sort_default,
            sort_direction: options.sort_direction_default,
            options,
            timing,
            search_term: String::new(),
            pending_search: None,
            resize_due: None,
            next_recalibration: None,
            wheel_muted_until: None,
            force_render: true,
            visible: true,
            destroyed: false,
            rendered: 0..0,
        };
        inner.load(data, false);
        inner
    }

    // -------------------------------------------------------------------------
    // Dataset
    // -------------------------------------------------------------------------

    fn load(&mut self, records: Vec<R>, skip_filter: bool) {
        let dropped = self.store.load(records);
        self.reconciler.clear();
        for node in dropped {
            if let Err(e) = self.doc.remove(node) {
                warn!("{}: {e}", self.id);
            }
        }
        self.selection.reset_anchor();
        if skip_filter {
            self.view.reset_all(self.store.len());
        } else {
            self.refilter();
        }
        self.recalculate_extent();
        self.force_render = true;
        self.update_status();
        self.emit_list(ListReason::Reset);
    }

    fn append(&mut self, records: Vec<R>) {
        let added = self.store.append(records);
        if added == 0 {
            return;
        }
        if self.options.verbose {
            debug!("{}: appended {added} records", self.id);
        }
        // Positions may shift under the new ordering
        self.selection.reset_anchor();
        self.refilter();
        self.recalculate_extent();
        self.force_render = true;
        self.update_status();
        self.emit_list(ListReason::Appended);
    }

    /// Refresh one record. Returns true if its selection flag was cleared.
    fn update_item(&mut self, index: usize, record: Option<R>) -> bool {
        let was_selected = self.store.get(index).is_some_and(|item| item.selected);
        let Some(node) = self.store.update(index, record) else {
            return false;
        };
        if let Some(node) = node {
            self.reconciler.forget(index, node);
            if let Err(e) = self.doc.remove(node) {
                warn!("{}: {e}", self.id);
            }
        }
        self.force_render = true;
        was_selected
    }

    // -------------------------------------------------------------------------
    // Search and sort
    // -------------------------------------------------------------------------

    /// Rebuild the view for the current term and re-apply the sort.
    fn refilter(&mut self) {
        self.view
            .filter(self.store.items(), &self.search_term, &self.options.search);
        self.view.sort(
            self.store.items(),
            &self.options.sort,
            self.sort_column,
            self.sort_direction,
        );
    }

    fn apply_search(&mut self, term: String) {
        if self.options.verbose {
            debug!("{}: search {term:?}", self.id);
        }
        self.pending_search = None;
        self.search_term = term;
        if let Some(search) = self.surface.search {
            if let Err(e) = self.doc.set_data(search, "value", self.search_term.clone()) {
                warn!("{}: {e}", self.id);
            }
        }
        self.refilter();
        let selection_changed = self.selection.clear(self.store.items_mut());
        self.recalculate_extent();
        let len = self.view.len();
        if self.options.logmode {
            self.geometry.scroll_to_bottom(len);
        } else {
            self.geometry.scroll_to_top(len);
        }
        self.force_render = true;
        if selection_changed {
            self.emit_selection();
        }
        self.update_status();
        self.emit_list(ListReason::Filtered);
    }

    fn apply_sort(&mut self, column: usize, direction: SortDirection) {
        if column >= self.options.sort.len() {
            return;
        }
        self.sort_column = Some(column);
        self.sort_direction = direction;
        let outcome = self.view.sort(
            self.store.items(),
            &self.options.sort,
            Some(column),
            direction,
        );
        if self.options.verbose {
            debug!("{}: sort {column} {direction:?}: {outcome:?}", self.id);
        }
        if matches!(outcome, SortOutcome::Sorted | SortOutcome::Reversed) {
            if let Some(sort) = self.surface.sort {
                if let Err(e) = self.doc.set_data(sort, "value", column.to_string()) {
                    warn!("{}: {e}", self.id);
                }
            }
            self.selection.reset_anchor();
            self.force_render = true;
            self.events
                .emit(self.id, ListEventKind::Sort { column, direction });
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    fn click(&mut self, position: usize, modifiers: Modifiers) -> SelectionChange {
        let change = self.selection.click(
            self.store.items_mut(),
            self.view.order(),
            position,
            modifiers,
        );
        match change {
            SelectionChange::Changed => self.emit_selection(),
            SelectionChange::Inspect { position } => {
                if let Some(item) = self.view.get(position).and_then(|i| self.store.get(i)) {
                    info!(
                        "{}: item {} at {position}: {:?}",
                        self.id, item.original_index, item.record
                    );
                }
            }
            SelectionChange::Unchanged => {}
        }
        change
    }

    fn emit_selection(&mut self) {
        let indices = Selection::selected_indices(self.store.items());
        let items: Vec<R> = indices
            .iter()
            .filter_map(|&i| self.store.get(i).map(|item| item.record.clone()))
            .collect();
        self.force_render = true;
        self.update_status();
        self.events.emit(
            self.id,
            ListEventKind::Selection {
                count: indices.len(),
                indices,
                items,
            },
        );
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    /// Pick the scroll mode for the current view and size the spacer.
    fn recalculate_extent(&mut self) {
        let len = self.view.len();
        let mode = ScrollMode::select(len, self.options.touch, self.timing.fixed_threshold);
        if self.geometry.set_mode(mode) {
            if self.options.verbose {
                debug!("{}: {len} rows, switching to {mode:?} scrolling", self.id);
            }
            self.force_render = true;
        }
        self.surface.show_mode(&mut self.doc, mode);
        let height = self.geometry.content_height(len) as f32;
        if let Err(e) = self.doc.set_height(self.surface.spacer, Some(height)) {
            warn!("{}: {e}", self.id);
        }
        self.geometry.clamp_scroll(len);
    }

    /// Adopt the measured height of the first attached row, if it changed.
    fn recalibrate(&mut self) {
        let container = self.surface.container(self.geometry.mode);
        let Some(measured) = self
            .doc
            .first_child(container)
            .and_then(|node| self.doc.outer_height(node))
            .map(f64::from)
        else {
            return;
        };
        if !measured.is_finite()
            || measured <= 0.0
            || (measured - self.geometry.item_height).abs() < f64::EPSILON
        {
            return;
        }
        if self.options.verbose {
            debug!(
                "{}: item height {} -> {measured}",
                self.id, self.geometry.item_height
            );
        }
        self.geometry.item_height = measured;
        self.recalculate_extent();
        self.force_render = true;
        self.events.emit(
            self.id,
            ListEventKind::HeightChange {
                item_height: measured,
            },
        );
    }

    fn wheel_muted(&self, now: Instant) -> bool {
        self.wheel_muted_until.is_some_and(|until| now < until)
    }

    // -------------------------------------------------------------------------
    // Frame
    // -------------------------------------------------------------------------

    fn tick(&mut self, now: Instant) {
        if self
            .pending_search
            .as_ref()
            .is_some_and(|(_, due)| *due <= now)
            && let Some((term, _)) = self.pending_search.take()
        {
            self.apply_search(term);
        }
        if self.resize_due.is_some_and(|due| due <= now) {
            self.resize_due = None;
            self.recalibrate();
            self.force_render = true;
        }
        if self.next_recalibration.is_none_or(|due| due <= now) {
            self.recalibrate();
            self.next_recalibration = Some(now + self.timing.recalibrate_interval);
        }
        if self.wheel_muted_until.is_some_and(|until| until <= now) {
            self.wheel_muted_until = None;
        }
        self.reconciler.run_due(&mut self.doc, now);
    }

    fn frame(&mut self, now: Instant) -> bool {
        if !self.visible {
            return false;
        }
        self.tick(now);
        if self.options.logmode && !self.wheel_muted(now) {
            self.geometry.scroll_to_bottom(self.view.len());
        }
        self.render(now)
    }

    /// One reconciliation pass if anything moved. Returns true if it ran.
    fn render(&mut self, now: Instant) -> bool {
        if self.view.is_empty() {
            if !self.rendered.is_empty() || self.force_render {
                for container in [self.surface.content, self.surface.fixed] {
                    if let Err(e) = self.doc.clear_children(container) {
                        warn!("{}: {e}", self.id);
                    }
                }
                self.rendered = 0..0;
                self.force_render = false;
            }
            return false;
        }
        if !self.force_render && !self.geometry.needs_render() {
            return false;
        }
        // Leaves the force flag set so a later frame retries
        let Some(window) = self.geometry.window(self.view.len()) else {
            return false;
        };
        let attached = self.reconciler.reconcile(
            &mut self.doc,
            &self.surface,
            self.store.items_mut(),
            &self.view,
            window.clone(),
            &self.geometry,
            now,
        );
        if self.options.verbose {
            debug!(
                "{}: rendered {:?} ({attached} nodes, {:?})",
                self.id, window, self.geometry.mode
            );
        }
        self.rendered = window;
        self.geometry.mark_rendered();
        self.force_render = false;
        true
    }

    // -------------------------------------------------------------------------
    // Notifications
    // -------------------------------------------------------------------------

    fn emit_list(&mut self, reason: ListReason) {
        self.events.emit(
            self.id,
            ListEventKind::List {
                reason,
                total: self.store.len(),
                shown: self.view.len(),
            },
        );
    }

    fn update_status(&mut self) {
        let Some(status) = self.surface.status else {
            return;
        };
        let selected = Selection::selected_indices(self.store.items()).len();
        let mut text = format!("{} / {}", self.view.len(), self.store.len());
        if selected > 0 {
            text.push_str(&format!(", {selected} selected"));
        }
        if let Err(e) = self.doc.set_text(status, text) {
            warn!("{}: {e}", self.id);
        }
    }

    fn teardown(&mut self) {
        self.events.emit(self.id, ListEventKind::CleanUp);
        self.events.close();
        self.pending_search = None;
        self.resize_due = None;
        self.next_recalibration = None;
        self.wheel_muted_until = None;
        self.reconciler.clear();
        for container in [self.surface.content, self.surface.fixed] {
            if let Err(e) = self.doc.clear_children(container) {
                warn!("{}: {e}", self.id);
            }
        }
        for node in self.store.clear() {
            if let Err(e) = self.doc.remove(node) {
                warn!("{}: {e}", self.id);
            }
        }
        self.view.clear();
        self.rendered = 0..0;
        self.visible = false;
        self.destroyed = true;
        info!("{}: destroyed", self.id);
    }
}

fn sanitize_height(height: f64) -> f64 {
    if height.is_finite() { height.max(0.0) } else { 0.0 }
}

/// A virtualized list of records.
///
/// `List<R>` is a handle: clones share the same state, so the host and the
/// frame loop can both hold one. Every entry point takes the write lock once,
/// so operations never interleave.
///
/// After [`destroy`](List::destroy) every entry point is a no-op.
#[derive(Debug)]
pub struct List<R: ListRecord> {
    id: ListId,
    inner: Arc<RwLock<ListInner<R>>>,
    cancel: CancellationToken,
}

impl<R: ListRecord> Clone for List<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            cancel: self.cancel.clone(),
        }
    }
}

impl<R: ListRecord> List<R> {
    /// Build a list and load its initial dataset.
    pub fn new(config: ListConfig<R>) -> Self {
        let id = ListId::new();
        Self {
            id,
            inner: Arc::new(RwLock::new(ListInner::new(id, config))),
            cancel: CancellationToken::new(),
        }
    }

    /// Get the unique ID.
    pub fn id(&self) -> ListId {
        self.id
    }

    /// Cancelled when the list is destroyed.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run `f` on live state. Returns `None` after destroy.
    fn update<T>(&self, op: &str, f: impl FnOnce(&mut ListInner<R>) -> T) -> Option<T> {
        let Ok(mut guard) = self.inner.write() else {
            return None;
        };
        if guard.destroyed {
            debug!("{}: {op} ignored, list destroyed", self.id);
            return None;
        }
        Some(f(&mut guard))
    }

    fn read<T>(&self, f: impl FnOnce(&ListInner<R>) -> T) -> Option<T> {
        self.inner.read().ok().map(|guard| f(&guard))
    }

    // -------------------------------------------------------------------------
    // Dataset
    // -------------------------------------------------------------------------

    /// Replace the dataset.
    ///
    /// With `skip_filter` the view shows every record in original order and
    /// the current search and sort are not applied.
    pub fn update_data(&self, data: Vec<R>, skip_filter: bool) {
        self.update("update_data", |inner| inner.load(data, skip_filter));
    }

    /// Take the grown dataset. Only records past the current length are new;
    /// a dataset that did not grow is ignored.
    pub fn append_data(&self, data: Vec<R>) {
        self.update("append_data", |inner| inner.append(data));
    }

    /// Refresh the record at `index`, dropping its node and selection flag.
    ///
    /// With `render_now` the visible window is redrawn before returning,
    /// otherwise on the next frame. Unknown indices are ignored.
    pub fn update_item(&self, index: usize, record: Option<R>, render_now: bool) {
        self.update_items(vec![(index, record)], render_now);
    }

    /// Refresh many records, redrawing once.
    pub fn update_items(&self, updates: Vec<(usize, Option<R>)>, render_now: bool) {
        self.update("update_items", |inner| {
            let mut selection_changed = false;
            for (index, record) in updates {
                selection_changed |= inner.update_item(index, record);
            }
            if selection_changed {
                inner.emit_selection();
            }
            if render_now {
                inner.force_render = true;
                inner.render(Instant::now());
            }
        });
    }

    // -------------------------------------------------------------------------
    // Search and sort
    // -------------------------------------------------------------------------

    /// A search keystroke. Filtering runs once no keystroke arrived for
    /// [`Timing::search_debounce`].
    pub fn search_input(&self, term: impl Into<String>, now: Instant) {
        let term = term.into();
        self.update("search_input", |inner| {
            let due = now + inner.timing.search_debounce;
            inner.pending_search = Some((term.clone(), due));
            inner
                .events
                .emit(inner.id, ListEventKind::SearchInput { term });
        });
    }

    /// Filter immediately, cancelling any pending keystroke.
    pub fn set_search(&self, term: impl Into<String>) {
        let term = term.into();
        self.update("set_search", |inner| inner.apply_search(term));
    }

    /// Order by sort column `column`. Unknown columns are ignored.
    pub fn set_sort(&self, column: usize, direction: SortDirection) {
        self.update("set_sort", |inner| inner.apply_sort(column, direction));
    }

    /// Column and direction the view is currently ordered by.
    pub fn sort_state(&self) -> Option<(usize, SortDirection)> {
        self.read(|inner| inner.view.applied_sort()).flatten()
    }

    pub fn search_term(&self) -> String {
        self.read(|inner| inner.search_term.clone())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Click the row at `position` of the current view.
    pub fn click(&self, position: usize, modifiers: Modifiers) -> SelectionChange {
        self.update("click", |inner| inner.click(position, modifiers))
            .unwrap_or(SelectionChange::Unchanged)
    }

    /// Click whatever row `node` belongs to (the row node or a descendant).
    pub fn click_node(&self, node: NodeId, modifiers: Modifiers) -> Option<SelectionChange> {
        self.update("click_node", |inner| {
            let mut current = Some(node);
            while let Some(n) = current {
                if let Some(index) = inner.reconciler.owner_of(n) {
                    let position = inner.view.position_of(index)?;
                    return Some(inner.click(position, modifiers));
                }
                current = inner.doc.parent(n);
            }
            None
        })
        .flatten()
    }

    /// Original indices of the selected records.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.read(|inner| Selection::selected_indices(inner.store.items()))
            .unwrap_or_default()
    }

    /// Positions of the selected records within the current view.
    pub fn selected_positions(&self) -> Vec<usize> {
        self.read(|inner| Selection::selected_positions(inner.store.items(), inner.view.order()))
            .unwrap_or_default()
    }

    /// The selected records in original order.
    pub fn selection(&self) -> Vec<R> {
        self.read(|inner| {
            inner
                .store
                .items()
                .iter()
                .filter(|item| item.selected)
                .map(|item| item.record.clone())
                .collect()
        })
        .unwrap_or_default()
    }

    pub fn set_selected_indices(&self, indices: &[usize]) {
        self.update("set_selected_indices", |inner| {
            if inner
                .selection
                .select_indices(inner.store.items_mut(), indices)
            {
                inner.emit_selection();
            }
        });
    }

    pub fn set_selected_positions(&self, positions: &[usize]) {
        self.update("set_selected_positions", |inner| {
            if inner.selection.select_positions(
                inner.store.items_mut(),
                inner.view.order(),
                positions,
            ) {
                inner.emit_selection();
            }
        });
    }

    pub fn clear_selection(&self) {
        self.update("clear_selection", |inner| {
            if inner.selection.clear(inner.store.items_mut()) {
                inner.emit_selection();
            }
        });
    }

    // -------------------------------------------------------------------------
    // Scrolling and layout
    // -------------------------------------------------------------------------

    /// Host scroll position of the viewport, in pixels.
    pub fn scroll_to(&self, pixels: f64) {
        self.update("scroll_to", |inner| {
            let len = inner.view.len();
            inner.geometry.set_scroll_pixels(pixels, len);
        });
    }

    /// Wheel input. In log mode this also holds off pinning to the bottom
    /// for [`Timing::wheel_mute`].
    pub fn wheel(&self, delta: f64, now: Instant) {
        self.update("wheel", |inner| {
            let len = inner.view.len();
            inner.geometry.wheel(delta, len);
            if inner.options.logmode {
                inner.wheel_muted_until = Some(now + inner.timing.wheel_mute);
            }
        });
    }

    /// Bring the record with original index `index` to the top of the
    /// viewport. Records hidden by the search are ignored.
    pub fn scroll_to_index(&self, index: usize) {
        self.update("scroll_to_index", |inner| {
            let len = inner.view.len();
            if let Some(position) = inner.view.position_of(index) {
                let pixels = inner.geometry.pixels_for_position(position, len);
                inner.geometry.set_scroll_pixels(pixels, len);
            }
        });
    }

    /// The host viewport changed height.
    ///
    /// Recalibration follows after [`Timing::resize_debounce`]. A list that
    /// had no usable viewport before renders right away.
    pub fn resize(&self, viewport_height: f64, now: Instant) {
        self.update("resize", |inner| {
            let was_ready = inner.geometry.is_ready();
            inner.geometry.viewport_height = sanitize_height(viewport_height);
            inner.recalculate_extent();
            inner.resize_due = Some(now + inner.timing.resize_debounce);
            inner.force_render = true;
            if !was_ready && inner.geometry.is_ready() && inner.visible {
                inner.render(now);
            }
        });
    }

    /// Start or stop rendering, as the host element enters or leaves view.
    pub fn set_visible(&self, visible: bool) {
        self.update("set_visible", |inner| {
            if inner.visible == visible {
                return;
            }
            inner.visible = visible;
            if visible {
                inner.geometry.invalidate();
                inner.force_render = true;
            }
            inner
                .events
                .emit(inner.id, ListEventKind::Visibility { visible });
        });
    }

    // -------------------------------------------------------------------------
    // Frame
    // -------------------------------------------------------------------------

    /// Run due timers, then reconcile if the scroll metric moved or a render
    /// was requested. Returns true if a pass ran.
    pub fn frame(&self, now: Instant) -> bool {
        self.update("frame", |inner| inner.frame(now))
            .unwrap_or(false)
    }

    /// Run due timers only.
    pub fn tick(&self, now: Instant) {
        self.update("tick", |inner| inner.tick(now));
    }

    /// Reconcile immediately, even if nothing moved.
    pub fn render_now(&self) -> bool {
        self.update("render_now", |inner| {
            inner.force_render = true;
            inner.render(Instant::now())
        })
        .unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Events and lifecycle
    // -------------------------------------------------------------------------

    /// Receive lifecycle and selection events.
    ///
    /// After destroy the returned receiver is already closed.
    pub fn subscribe(&self) -> UnboundedReceiver<ListEvent<R>> {
        self.update("subscribe", |inner| inner.events.subscribe())
            .unwrap_or_else(|| mpsc::unbounded_channel().1)
    }

    /// Tear the list down. Emits `CleanUp` to current subscribers, then
    /// closes every channel and releases all nodes.
    pub fn destroy(&self) {
        self.cancel.cancel();
        self.update("destroy", ListInner::teardown);
    }

    pub fn is_destroyed(&self) -> bool {
        self.read(|inner| inner.destroyed).unwrap_or(true)
    }

    // -------------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------------

    /// Number of records in the dataset.
    pub fn len(&self) -> usize {
        self.read(|inner| inner.store.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of records passing the current search.
    pub fn filtered_len(&self) -> usize {
        self.read(|inner| inner.view.len()).unwrap_or(0)
    }

    /// Original indices in display order.
    pub fn visible_order(&self) -> Vec<usize> {
        self.read(|inner| inner.view.order().to_vec())
            .unwrap_or_default()
    }

    pub fn mode(&self) -> ScrollMode {
        self.read(|inner| inner.geometry.mode).unwrap_or_default()
    }

    pub fn item_height(&self) -> f64 {
        self.read(|inner| inner.geometry.item_height)
            .unwrap_or_default()
    }

    pub fn scroll_pixels(&self) -> f64 {
        self.read(|inner| inner.geometry.scroll_pixels)
            .unwrap_or_default()
    }

    pub fn scroll_fraction(&self) -> f64 {
        self.read(|inner| inner.geometry.scroll_fraction)
            .unwrap_or_default()
    }

    /// Height of the scroll surface.
    pub fn content_height(&self) -> f64 {
        self.read(|inner| inner.geometry.content_height(inner.view.len()))
            .unwrap_or_default()
    }

    /// View positions attached by the last pass.
    pub fn rendered_range(&self) -> Range<usize> {
        self.read(|inner| inner.rendered.clone())
            .unwrap_or(0..0)
    }

    /// Deferred row updates that have not come due yet.
    pub fn pending_updates(&self) -> usize {
        self.read(|inner| inner.reconciler.pending_updates())
            .unwrap_or_default()
    }

    /// Original indices attached by the last pass, in display order.
    pub fn rendered_indices(&self) -> Vec<usize> {
        self.read(|inner| {
            inner.view.order()[inner.rendered.start.min(inner.view.len())
                ..inner.rendered.end.min(inner.view.len())]
                .to_vec()
        })
        .unwrap_or_default()
    }

    /// Cached node of the record at `index`, if it was ever rendered.
    pub fn node_of(&self, index: usize) -> Option<NodeId> {
        self.read(|inner| inner.store.get(index).and_then(|item| item.node))
            .flatten()
    }

    pub fn is_visible(&self) -> bool {
        self.read(|inner| inner.visible).unwrap_or(false)
    }

    pub fn surface(&self) -> Option<Surface> {
        self.read(|inner| inner.surface)
    }

    pub fn timing(&self) -> Timing {
        self.read(|inner| inner.timing).unwrap_or_default()
    }

    /// Id of the footer button that `node` is (or is inside of).
    pub fn footer_button(&self, node: NodeId) -> Option<String> {
        self.read(|inner| inner.surface.footer_action(&inner.doc, node))
            .flatten()
    }

    /// Read access to the list's document.
    pub fn with_document<T>(&self, f: impl FnOnce(&Document) -> T) -> Option<T> {
        self.read(|inner| f(&inner.doc))
    }

    /// Write access to the list's document, e.g. to apply host layout.
    pub fn with_document_mut<T>(&self, f: impl FnOnce(&mut Document) -> T) -> Option<T> {
        self.update("with_document_mut", |inner| f(&mut inner.doc))
    }
}
