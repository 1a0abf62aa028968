pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod types;

pub use document::{Document, NodeId};
pub use element::Element;
pub use error::DomError;
pub use event::Modifiers;
pub use types::*;
