//! List component - a virtualized, searchable, sortable list of records.
//!
//! The List component provides:
//! - Windowed rendering (only the visible slice of records has nodes attached)
//! - Two scroll mappings: pixel-accurate for moderate counts, fraction-based
//!   past [`Timing::fixed_threshold`] records
//! - Node reuse (a record's node is rendered once and repositioned afterwards)
//! - Debounced search and sort with an in-place reversal shortcut
//! - Single and multi-selection with Ctrl/Cmd+click and Shift+range
//!
//! # Example
//!
//! ```ignore
//! use nui::prelude::*;
//! use serde_json::json;
//!
//! let data = vec![json!({"name": "alpha"}), json!({"name": "beta"})];
//! let list = List::new(
//!     ListConfig::new(data)
//!         .search(vec![SearchField::new("name", "Name")])
//!         .render(|record, doc| {
//!             let name = record.field("name").unwrap_or_default().into_owned();
//!             let node = doc.create(Element::box_().class("row").height(30.0).content(name));
//!             Some(Rendered::new(node))
//!         })
//!         .viewport_height(300.0),
//! );
//! let mut events = list.subscribe();
//! ```

pub mod config;
pub mod events;
pub mod filter;
pub mod geometry;
pub mod item;
pub mod render;
mod state;
pub mod store;

pub use config::{
    FooterButton, FooterConfig, ListConfig, ListOptions, SearchField, SortDirection, SortSpec,
    Timing,
};
pub use events::{ListEvent, ListEventKind, ListReason};
pub use filter::{FilteredView, SortOutcome};
pub use geometry::{Geometry, ScrollMode};
pub use item::ListRecord;
pub use render::{DeferredUpdate, RenderFn, Rendered, Surface, UpdateHook};
pub use state::{List, ListId};
pub use store::{RecordStore, ViewItem};
