//! List configuration types.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use nuidom::Document;
use serde::Deserialize;

use super::geometry::DEFAULT_ITEM_HEIGHT;
use super::item::ListRecord;
use super::render::{RenderFn, Rendered};
use crate::error::ConfigError;

/// A field the search box matches against.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchField {
    pub prop: String,
    #[serde(default)]
    pub label: String,
}

impl SearchField {
    pub fn new(prop: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            prop: prop.into(),
            label: label.into(),
        }
    }
}

/// A sortable column.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SortSpec {
    pub prop: String,
    #[serde(default)]
    pub label: String,
    /// Compare as numbers instead of text.
    #[serde(default)]
    pub numeric: bool,
}

impl SortSpec {
    pub fn new(prop: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            prop: prop.into(),
            label: label.into(),
            numeric: false,
        }
    }

    pub fn numeric(prop: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            numeric: true,
            ..Self::new(prop, label)
        }
    }
}

/// Sort direction. `Up` is ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Up,
    Down,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Up => SortDirection::Down,
            SortDirection::Down => SortDirection::Up,
        }
    }

    pub fn is_descending(self) -> bool {
        self == SortDirection::Down
    }
}

/// A footer button descriptor. Clicks are reported back by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FooterButton {
    pub id: String,
    #[serde(default)]
    pub label: String,
}

impl FooterButton {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    pub buttons_left: Vec<FooterButton>,
    pub buttons_right: Vec<FooterButton>,
}

/// Declarative list options.
///
/// Everything except the dataset and the render callback, so that hosts can
/// keep list setup in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ListOptions {
    pub search: Vec<SearchField>,
    pub sort: Vec<SortSpec>,
    /// Index into `sort` applied on load.
    pub sort_default: Option<usize>,
    pub sort_direction_default: SortDirection,
    pub footer: Option<FooterConfig>,
    /// Keep the view pinned to the newest (last) record.
    pub logmode: bool,
    /// Disable multi and range selection.
    pub single: bool,
    /// Log debug diagnostics.
    pub verbose: bool,
    /// The host is a touch device. Touch hosts always use pixel scrolling.
    pub touch: bool,
}

impl ListOptions {
    /// Parse and validate options from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(index) = self.sort_default
            && index >= self.sort.len()
        {
            return Err(ConfigError::SortDefaultOutOfRange {
                index,
                len: self.sort.len(),
            });
        }
        if let Some(index) = self.search.iter().position(|f| f.prop.is_empty()) {
            return Err(ConfigError::EmptyProp {
                kind: "search",
                index,
            });
        }
        if let Some(index) = self.sort.iter().position(|s| s.prop.is_empty()) {
            return Err(ConfigError::EmptyProp { kind: "sort", index });
        }
        if let Some(footer) = &self.footer {
            for (side, buttons) in [("left", &footer.buttons_left), ("right", &footer.buttons_right)] {
                if let Some(index) = buttons.iter().position(|b| b.id.is_empty()) {
                    return Err(ConfigError::EmptyButtonId { side, index });
                }
            }
        }
        Ok(())
    }

    /// Drop the parts of the options that would misbehave at runtime.
    pub(crate) fn sanitize(&mut self) {
        // Keep the default pointing at the same column once empty specs go
        self.sort_default = self.sort_default.and_then(|i| {
            let spec = self.sort.get(i)?;
            (!spec.prop.is_empty())
                .then(|| self.sort[..i].iter().filter(|s| !s.prop.is_empty()).count())
        });
        self.search.retain(|f| !f.prop.is_empty());
        self.sort.retain(|s| !s.prop.is_empty());
    }
}

/// Timers and thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    /// Delay between the last search keystroke and filtering.
    pub search_debounce: Duration,
    /// Delay between the last resize and recalibration.
    pub resize_debounce: Duration,
    /// Period of item-height measurement.
    pub recalibrate_interval: Duration,
    /// How long wheel input suspends log-mode pinning.
    pub wheel_mute: Duration,
    /// Frame period of the render loop.
    pub frame_interval: Duration,
    /// Record count at which fraction-based scrolling takes over.
    pub fixed_threshold: usize,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            search_debounce: Duration::from_millis(300),
            resize_debounce: Duration::from_millis(150),
            recalibrate_interval: Duration::from_millis(300),
            wheel_mute: Duration::from_millis(1000),
            frame_interval: Duration::from_millis(16),
            fixed_threshold: 1000,
        }
    }
}

/// Everything needed to build a [`List`](super::List).
pub struct ListConfig<R: ListRecord> {
    pub data: Vec<R>,
    pub render: Option<RenderFn<R>>,
    pub options: ListOptions,
    pub timing: Timing,
    /// Height of the host viewport in pixels, 0 until laid out.
    pub viewport_height: f64,
    /// Item height assumed until the first measurement.
    pub item_height: f64,
}

impl<R: ListRecord> ListConfig<R> {
    pub fn new(data: Vec<R>) -> Self {
        Self {
            data,
            render: None,
            options: ListOptions::default(),
            timing: Timing::default(),
            viewport_height: 0.0,
            item_height: DEFAULT_ITEM_HEIGHT,
        }
    }

    /// Set the callback turning a record into a node.
    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&R, &mut Document) -> Option<Rendered> + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    pub fn options(mut self, options: ListOptions) -> Self {
        self.options = options;
        self
    }

    pub fn search(mut self, fields: Vec<SearchField>) -> Self {
        self.options.search = fields;
        self
    }

    pub fn sort(mut self, specs: Vec<SortSpec>) -> Self {
        self.options.sort = specs;
        self
    }

    /// Sort by column `index` on load.
    pub fn sort_default(mut self, index: usize, direction: SortDirection) -> Self {
        self.options.sort_default = Some(index);
        self.options.sort_direction_default = direction;
        self
    }

    pub fn footer(mut self, footer: FooterConfig) -> Self {
        self.options.footer = Some(footer);
        self
    }

    pub fn logmode(mut self) -> Self {
        self.options.logmode = true;
        self
    }

    pub fn single(mut self) -> Self {
        self.options.single = true;
        self
    }

    pub fn verbose(mut self) -> Self {
        self.options.verbose = true;
        self
    }

    pub fn touch(mut self) -> Self {
        self.options.touch = true;
        self
    }

    pub fn timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn viewport_height(mut self, height: f64) -> Self {
        self.viewport_height = height;
        self
    }

    pub fn item_height(mut self, height: f64) -> Self {
        self.item_height = height;
        self
    }
}

impl<R: ListRecord> fmt::Debug for ListConfig<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListConfig")
            .field("records", &self.data.len())
            .field("render", &self.render.is_some())
            .field("options", &self.options)
            .field("timing", &self.timing)
            .field("viewport_height", &self.viewport_height)
            .field("item_height", &self.item_height)
            .finish()
    }
}
