//! Rendering logic for the List component.
//!
//! The list owns a small tree of chrome nodes ([`Surface`]) and reconciles
//! the visible window of records into one of two containers on every pass.

use std::collections::HashMap;
use std::fmt;
use std::ops::Range;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, warn};
use nuidom::{Document, Element, NodeId, Overflow, Position};

use super::config::{FooterButton, ListOptions};
use super::filter::FilteredView;
use super::geometry::{Geometry, ScrollMode};
use super::item::ListRecord;
use super::store::ViewItem;
use crate::error::extract_panic_message;

/// Turns one record into a node of the list's document.
pub type RenderFn<R> = Arc<dyn Fn(&R, &mut Document) -> Option<Rendered> + Send + Sync>;

/// Runs against a node once it is attached.
pub type UpdateHook = Arc<dyn Fn(NodeId, &mut Document) + Send + Sync>;

/// Class toggled on nodes of selected records.
pub const SELECTED_CLASS: &str = "selected";

/// Data attribute carrying a footer button's id.
pub const ACTION_ATTR: &str = "action";

/// A render callback's result.
pub struct Rendered {
    pub node: NodeId,
    pub deferred: Option<DeferredUpdate>,
}

impl Rendered {
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            deferred: None,
        }
    }

    /// Ask for `hook` to run `delay` after the node is first attached.
    pub fn deferred<F>(mut self, delay: Duration, hook: F) -> Self
    where
        F: Fn(NodeId, &mut Document) + Send + Sync + 'static,
    {
        self.deferred = Some(DeferredUpdate {
            delay,
            hook: Arc::new(hook),
        });
        self
    }
}

impl fmt::Debug for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rendered")
            .field("node", &self.node)
            .field("deferred", &self.deferred)
            .finish()
    }
}

#[derive(Clone)]
pub struct DeferredUpdate {
    pub delay: Duration,
    pub hook: UpdateHook,
}

impl fmt::Debug for DeferredUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredUpdate")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Chrome
// =============================================================================

/// Node ids of the list's fixed structure.
///
/// ```text
/// nui-list
/// ├── list-search      (when search fields are configured)
/// ├── list-sort        (when sort columns are configured)
/// ├── list-scroll      viewport, overflow: auto
/// │   ├── list-spacer  sized to the content height
/// │   └── list-content normal-mode rows
/// ├── list-fixed       fixed-mode rows, laid over the viewport
/// └── list-footer      (when a footer is configured)
///     ├── list-footer-left / list-footer-right buttons
///     └── list-status
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    pub root: NodeId,
    pub search: Option<NodeId>,
    pub sort: Option<NodeId>,
    pub scroller: NodeId,
    pub spacer: NodeId,
    pub content: NodeId,
    pub fixed: NodeId,
    pub footer: Option<NodeId>,
    pub status: Option<NodeId>,
}

impl Surface {
    /// Build the chrome under the document root.
    pub fn build(doc: &mut Document, options: &ListOptions) -> Self {
        let document_root = doc.root();
        let root = doc.create(Element::tag("nui-list").class("nui-list"));
        attach(doc, document_root, root);

        let search = (!options.search.is_empty()).then(|| {
            let labels: Vec<&str> = options.search.iter().map(|f| f.label.as_str()).collect();
            let node = doc.create(
                Element::tag("input")
                    .class("list-search")
                    .data("placeholder", labels.join(", ")),
            );
            attach(doc, root, node);
            node
        });

        let sort = (!options.sort.is_empty()).then(|| {
            let node = doc.create(Element::tag("select").class("list-sort"));
            for (index, spec) in options.sort.iter().enumerate() {
                let option = doc.create(
                    Element::tag("option")
                        .content(spec.label.clone())
                        .data("value", index.to_string()),
                );
                attach(doc, node, option);
            }
            attach(doc, root, node);
            node
        });

        let scroller = doc.create(
            Element::box_()
                .class("list-scroll")
                .position(Position::Relative)
                .overflow_y(Overflow::Auto),
        );
        let spacer = doc.create(Element::box_().class("list-spacer").height(0.0));
        let content = doc.create(Element::box_().class("list-content").position(Position::Relative));
        let fixed = doc.create(
            Element::box_()
                .class("list-fixed")
                .position(Position::Absolute)
                .top(0.0)
                .hidden(true),
        );
        attach(doc, root, scroller);
        attach(doc, scroller, spacer);
        attach(doc, scroller, content);
        attach(doc, root, fixed);

        let (footer, status) = match &options.footer {
            Some(config) => {
                let footer = doc.create(Element::box_().class("list-footer"));
                let left = button_group(doc, "list-footer-left", &config.buttons_left);
                let status = doc.create(Element::text("").class("list-status"));
                let right = button_group(doc, "list-footer-right", &config.buttons_right);
                attach(doc, footer, left);
                attach(doc, footer, status);
                attach(doc, footer, right);
                attach(doc, root, footer);
                (Some(footer), Some(status))
            }
            None => (None, None),
        };

        Self {
            root,
            search,
            sort,
            scroller,
            spacer,
            content,
            fixed,
            footer,
            status,
        }
    }

    /// Container receiving rows in `mode`.
    pub fn container(&self, mode: ScrollMode) -> NodeId {
        match mode {
            ScrollMode::Normal => self.content,
            ScrollMode::Fixed => self.fixed,
        }
    }

    /// Show the container of `mode` and hide the other one.
    pub fn show_mode(&self, doc: &mut Document, mode: ScrollMode) {
        let fixed = mode == ScrollMode::Fixed;
        if let Err(e) = doc
            .set_hidden(self.content, fixed)
            .and_then(|()| doc.set_hidden(self.fixed, !fixed))
        {
            warn!("list chrome: {e}");
        }
    }

    /// Id of the footer button `node` belongs to, if any.
    pub fn footer_action(&self, doc: &Document, node: NodeId) -> Option<String> {
        let footer = self.footer?;
        let mut current = Some(node);
        while let Some(n) = current {
            if n == footer {
                return None;
            }
            if let Some(action) = doc.get(n).and_then(|e| e.get_data(ACTION_ATTR))
                && doc.is_ancestor(footer, n)
            {
                return Some(action.clone());
            }
            current = doc.parent(n);
        }
        None
    }
}

fn button_group(doc: &mut Document, class: &str, buttons: &[FooterButton]) -> NodeId {
    let group = doc.create(Element::box_().class(class));
    for button in buttons {
        let node = doc.create(
            Element::tag("button")
                .class("list-button")
                .content(button.label.clone())
                .data(ACTION_ATTR, button.id.clone()),
        );
        attach(doc, group, node);
    }
    group
}

fn attach(doc: &mut Document, parent: NodeId, child: NodeId) {
    if let Err(e) = doc.append_child(parent, child) {
        warn!("list chrome: {e}");
    }
}

// =============================================================================
// Reconciliation
// =============================================================================

struct PendingUpdate {
    node: NodeId,
    due: Instant,
    hook: UpdateHook,
}

/// Materializes windows of the view into the document.
///
/// Keeps two side tables: which record a node belongs to, and the deferred
/// updates waiting for their node to be attached long enough.
pub struct Reconciler<R> {
    render: Option<RenderFn<R>>,
    owners: HashMap<NodeId, usize>,
    pending: HashMap<usize, PendingUpdate>,
    verbose: bool,
}

impl<R> fmt::Debug for Reconciler<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reconciler")
            .field("render", &self.render.is_some())
            .field("owners", &self.owners.len())
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl<R: ListRecord> Reconciler<R> {
    pub fn new(render: Option<RenderFn<R>>, verbose: bool) -> Self {
        if render.is_none() {
            warn!("list has no render callback; rows will use fallback nodes");
        }
        Self {
            render,
            owners: HashMap::new(),
            pending: HashMap::new(),
            verbose,
        }
    }

    /// Original index of the record that owns `node`.
    pub fn owner_of(&self, node: NodeId) -> Option<usize> {
        self.owners.get(&node).copied()
    }

    /// Attach `window` of `view` to the container of the current mode.
    ///
    /// Returns the number of nodes attached.
    #[allow(clippy::too_many_arguments)]
    pub fn reconcile(
        &mut self,
        doc: &mut Document,
        surface: &Surface,
        items: &mut [ViewItem<R>],
        view: &FilteredView,
        window: Range<usize>,
        geometry: &Geometry,
        now: Instant,
    ) -> usize {
        for container in [surface.content, surface.fixed] {
            if let Err(e) = doc.clear_children(container) {
                warn!("list container: {e}");
            }
        }

        let container = surface.container(geometry.mode);
        let start = window.start;
        let mut attached = 0;
        for position in window {
            let Some(item) = view.get(position).and_then(|index| items.get_mut(index)) else {
                continue;
            };
            let node = match item.node.filter(|&n| doc.contains(n)) {
                Some(node) => node,
                None => {
                    let node = self.materialize(doc, item, now);
                    item.node = Some(node);
                    node
                }
            };

            release_fragment(doc, node);
            if doc.parent(node) != Some(container)
                && let Err(e) = doc.append_child(container, node)
            {
                warn!("item {}: {e}", item.original_index);
                continue;
            }
            self.owners.insert(node, item.original_index);

            if let Some(element) = doc.get_mut(node) {
                element.set_class(SELECTED_CLASS, item.selected);
                element.position = Position::Absolute;
                element.top = Some(geometry.top_for(position, start) as f32);
            }
            attached += 1;
        }

        self.run_due(doc, now);
        attached
    }

    /// Run deferred updates whose delay has elapsed.
    ///
    /// An update whose node is no longer connected at that point is dropped.
    pub fn run_due(&mut self, doc: &mut Document, now: Instant) {
        let due: Vec<usize> = self
            .pending
            .iter()
            .filter(|(_, p)| p.due <= now)
            .map(|(&index, _)| index)
            .collect();
        for index in due {
            let Some(update) = self.pending.remove(&index) else {
                continue;
            };
            if !doc.is_connected(update.node) {
                if self.verbose {
                    debug!("item {index}: deferred update skipped, node detached");
                }
                continue;
            }
            let hook = update.hook;
            if let Err(panic) = catch_unwind(AssertUnwindSafe(|| hook(update.node, doc))) {
                warn!(
                    "item {index}: deferred update panicked: {}",
                    extract_panic_message(&*panic)
                );
            }
        }
    }

    /// Number of deferred updates still waiting.
    pub fn pending_updates(&self) -> usize {
        self.pending.len()
    }

    /// Forget everything known about `node` of record `index`.
    pub fn forget(&mut self, index: usize, node: NodeId) {
        self.owners.remove(&node);
        self.pending.remove(&index);
    }

    pub fn clear(&mut self) {
        self.owners.clear();
        self.pending.clear();
    }

    fn materialize(&mut self, doc: &mut Document, item: &ViewItem<R>, now: Instant) -> NodeId {
        let index = item.original_index;
        let rendered = match &self.render {
            Some(render) => {
                match catch_unwind(AssertUnwindSafe(|| render(&item.record, doc))) {
                    Ok(Some(rendered)) if doc.contains(rendered.node) => Some(rendered),
                    Ok(Some(rendered)) => {
                        warn!(
                            "item {index}: render callback returned stale node {}",
                            rendered.node
                        );
                        None
                    }
                    Ok(None) => {
                        warn!("item {index}: render callback returned nothing");
                        None
                    }
                    Err(panic) => {
                        warn!(
                            "item {index}: render callback panicked: {}",
                            extract_panic_message(&*panic)
                        );
                        None
                    }
                }
            }
            None => None,
        };

        match rendered {
            Some(Rendered { node, deferred }) => {
                if let Some(update) = deferred {
                    self.pending.insert(
                        index,
                        PendingUpdate {
                            node,
                            due: now + update.delay,
                            hook: update.hook,
                        },
                    );
                }
                if self.verbose {
                    debug!("item {index}: rendered {node}");
                }
                node
            }
            None => doc.create(
                Element::box_()
                    .class("list-item")
                    .class("list-item-fallback")
                    .content(format!("item {index}")),
            ),
        }
    }
}

/// Move `node` out of the fragment it was built in and free the fragment
/// once empty.
fn release_fragment(doc: &mut Document, node: NodeId) {
    let Some(parent) = doc.parent(node) else {
        return;
    };
    if !doc.get(parent).is_some_and(Element::is_fragment) {
        return;
    }
    if let Err(e) = doc.detach(node) {
        warn!("list fragment: {e}");
        return;
    }
    if doc.children(parent).is_empty()
        && let Err(e) = doc.remove(parent)
    {
        warn!("list fragment: {e}");
    }
}
