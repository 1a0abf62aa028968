pub mod components;
pub mod error;
pub mod runtime;

pub use error::{ConfigError, extract_panic_message};
pub use runtime::{FrameLoop, spawn_frame_loop};

pub mod prelude {
    pub use crate::components::list::{
        DeferredUpdate, FooterButton, FooterConfig, List, ListConfig, ListEvent, ListEventKind,
        ListId, ListOptions, ListReason, ListRecord, Rendered, ScrollMode, SearchField,
        SortDirection, SortSpec, Surface, Timing,
    };
    pub use crate::components::selection::{ClickKind, Selection, SelectionChange, SelectionMode};
    pub use crate::error::ConfigError;
    pub use crate::runtime::{FrameLoop, spawn_frame_loop};

    pub use nuidom::{Document, Edges, Element, Modifiers, NodeId};
}
