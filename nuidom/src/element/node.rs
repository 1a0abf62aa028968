use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::{Edges, Overflow, Position};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// Tag used for detached construction containers.
pub const FRAGMENT_TAG: &str = "#fragment";

/// The payload of one node in a [`Document`](crate::Document).
///
/// Elements are plain data. Tree structure (parent, children) is owned by
/// the document so that nodes can be detached and re-attached without
/// cloning.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    // Identity
    pub id: String,
    pub tag: String,

    // Content
    pub text: Option<String>,

    // Presentation
    pub classes: Vec<String>,
    pub hidden: bool,

    // Box model
    /// Border-box height in pixels. `None` means "not laid out yet".
    pub height: Option<f32>,
    pub margin: Edges,

    // Positioning
    pub position: Position,
    pub top: Option<f32>,
    pub overflow_y: Overflow,

    // Custom data storage (data-* attributes)
    pub data: HashMap<String, String>,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            tag: "div".to_string(),
            text: None,
            classes: Vec::new(),
            hidden: false,
            height: None,
            margin: Edges::default(),
            position: Position::Static,
            top: None,
            overflow_y: Overflow::Visible,
            data: HashMap::new(),
        }
    }
}

impl Element {
    pub fn box_() -> Self {
        Self {
            id: generate_id("box"),
            ..Default::default()
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            id: generate_id("text"),
            tag: "span".to_string(),
            text: Some(content.into()),
            ..Default::default()
        }
    }

    /// Create an element with an explicit tag name.
    pub fn tag(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            id: generate_id(&tag),
            tag,
            ..Default::default()
        }
    }

    /// A construction container. Fragments are never connected; children
    /// built inside one are moved out when appended elsewhere.
    pub fn fragment() -> Self {
        Self {
            id: generate_id("fragment"),
            tag: FRAGMENT_TAG.to_string(),
            ..Default::default()
        }
    }

    pub fn is_fragment(&self) -> bool {
        self.tag == FRAGMENT_TAG
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    // Content
    pub fn content(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    // Presentation
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    // Box model
    pub fn height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn margin(mut self, margin: Edges) -> Self {
        self.margin = margin;
        self
    }

    // Positioning
    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn top(mut self, top: f32) -> Self {
        self.top = Some(top);
        self
    }

    pub fn overflow_y(mut self, overflow: Overflow) -> Self {
        self.overflow_y = overflow;
        self
    }

    // Custom data
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn get_data(&self, key: &str) -> Option<&String> {
        self.data.get(key)
    }

    // Class list

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Returns true if the class was not present before.
    pub fn add_class(&mut self, class: impl Into<String>) -> bool {
        let class = class.into();
        if self.has_class(&class) {
            return false;
        }
        self.classes.push(class);
        true
    }

    /// Returns true if the class was present before.
    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        self.classes.len() != before
    }

    /// Add or remove a class. Returns true if the class list changed.
    pub fn set_class(&mut self, class: &str, on: bool) -> bool {
        if on {
            self.add_class(class)
        } else {
            self.remove_class(class)
        }
    }

    /// Height including vertical margins, if the element has been sized.
    pub fn outer_height(&self) -> Option<f32> {
        self.height.map(|h| h + self.margin.vertical_total())
    }
}
