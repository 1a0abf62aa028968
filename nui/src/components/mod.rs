//! UI components with self-managed state.
//!
//! Each component lives in its own module with:
//! - `state.rs` - the component handle and its state type
//! - `render.rs` - rendering logic
//! - `mod.rs` - public exports

pub mod list;
pub mod selection;

pub use list::{List, ListConfig, ListId, ListRecord};
pub use selection::{Selection, SelectionChange, SelectionMode};
