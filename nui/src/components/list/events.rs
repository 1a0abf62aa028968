//! Lifecycle and selection notifications for the List component.

use log::trace;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::config::SortDirection;
use super::state::ListId;

/// Why the list content was rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListReason {
    /// The dataset was replaced.
    Reset,
    /// The search term changed.
    Filtered,
    /// Records were appended to the dataset.
    Appended,
}

/// Event kinds. The set is closed.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEventKind<R> {
    List {
        reason: ListReason,
        /// Records in the dataset.
        total: usize,
        /// Records passing the current search.
        shown: usize,
    },
    /// Fired whenever the selection changes.
    Selection {
        count: usize,
        /// Original indices of the selected records.
        indices: Vec<usize>,
        items: Vec<R>,
    },
    /// The measured item height changed.
    HeightChange { item_height: f64 },
    Visibility { visible: bool },
    Sort {
        column: usize,
        direction: SortDirection,
    },
    /// A search keystroke arrived; filtering follows after the debounce.
    SearchInput { term: String },
    /// The list was torn down. Nothing is sent after this.
    CleanUp,
}

impl<R> ListEventKind<R> {
    /// Wire name of the event type.
    pub fn name(&self) -> &'static str {
        match self {
            ListEventKind::List { .. } => "list",
            ListEventKind::Selection { .. } => "selection",
            ListEventKind::HeightChange { .. } => "height_change",
            ListEventKind::Visibility { .. } => "visibility",
            ListEventKind::Sort { .. } => "sort",
            ListEventKind::SearchInput { .. } => "search_input",
            ListEventKind::CleanUp => "list_cleanUp",
        }
    }
}

/// An event together with the list that emitted it.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEvent<R> {
    pub target: ListId,
    pub kind: ListEventKind<R>,
}

/// Fan-out of events to every subscriber.
#[derive(Debug)]
pub(crate) struct EventSink<R> {
    senders: Vec<UnboundedSender<ListEvent<R>>>,
}

impl<R: Clone> EventSink<R> {
    pub fn new() -> Self {
        Self {
            senders: Vec::new(),
        }
    }

    pub fn subscribe(&mut self) -> UnboundedReceiver<ListEvent<R>> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.senders.push(tx);
        rx
    }

    /// Send to every live subscriber, dropping the ones that went away.
    pub fn emit(&mut self, target: ListId, kind: ListEventKind<R>) {
        trace!("{target}: {}", kind.name());
        let event = ListEvent { target, kind };
        self.senders.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Drop every sender. Receivers observe the channel closing.
    pub fn close(&mut self) {
        self.senders.clear();
    }
}
