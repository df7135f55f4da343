// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration and callbacks of a drag context.
//!
//! [`DragConfig`] is plain data and, with the `serde` feature, can be read from
//! any serde format. Missing keys take their defaults and unknown keys are
//! ignored. Keys are accepted in `snake_case` and in `camelCase`.
//!
//! ```
//! # #[cfg(feature = "serde")]
//! # fn example() {
//! use sortable::DragConfig;
//!
//! let config: DragConfig = serde_json::from_str(
//!     r#"{ "contextName": "todo", "visibleClone": true, "colour": "red" }"#,
//! )
//! .unwrap();
//! assert_eq!(config.context_name.as_deref(), Some("todo"));
//! assert!(config.visible_clone);
//! assert!(config.clone_picked_element);
//! # }
//! ```
//!
//! [`Callbacks`] are boxed closures and live next to the config in [`Options`].

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use crate::event::{DragStartEvent, DragTargetEvent, PointerEvent};

/// Plain-data options, fixed for the lifetime of a context.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DragConfig {
    /// Scopes hit testing to this context. Required and non-empty.
    #[cfg_attr(feature = "serde", serde(alias = "contextName"))]
    pub context_name: Option<String>,
    /// Show a placeholder at the prospective drop slot.
    #[cfg_attr(feature = "serde", serde(alias = "clonePickedElement"))]
    pub clone_picked_element: bool,
    /// Render the placeholder instead of only reserving its space.
    #[cfg_attr(feature = "serde", serde(alias = "visibleClone"))]
    pub visible_clone: bool,
    /// Copy the picked element's descendants into the placeholder.
    #[cfg_attr(feature = "serde", serde(alias = "deepClone"))]
    pub deep_clone: bool,
    /// Keep the dragged element from moving horizontally.
    #[cfg_attr(feature = "serde", serde(alias = "restrictX"))]
    pub restrict_x: bool,
    /// Keep the dragged element from moving vertically.
    #[cfg_attr(feature = "serde", serde(alias = "restrictY"))]
    pub restrict_y: bool,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            context_name: None,
            clone_picked_element: true,
            visible_clone: false,
            deep_clone: false,
            restrict_x: false,
            restrict_y: false,
        }
    }
}

/// Callback invoked when an item is picked.
pub type StartCallback<N> = Box<dyn FnMut(&DragStartEvent<'_, N>)>;
/// Callback invoked on enter, leave and drop.
pub type TargetCallback<N> = Box<dyn FnMut(&DragTargetEvent<'_, N>)>;
/// Callback invoked when a drag ends, dropped or not.
pub type EndCallback<N> = Box<dyn FnMut(&PointerEvent<N>)>;

/// Optional host callbacks. Absent callbacks are skipped.
///
/// Callbacks run synchronously inside event handling and only see shared
/// references; they cannot reach back into the context.
pub struct Callbacks<N> {
    /// An item was picked.
    pub on_drag_start: Option<StartCallback<N>>,
    /// The pointer moved onto a new target.
    pub on_drag_enter: Option<TargetCallback<N>>,
    /// The pointer moved off the previous target.
    pub on_drag_leave: Option<TargetCallback<N>>,
    /// The picked item was released over a target.
    pub on_drop: Option<TargetCallback<N>>,
    /// The drag ended.
    pub on_drag_end: Option<EndCallback<N>>,
}

impl<N> Default for Callbacks<N> {
    fn default() -> Self {
        Self {
            on_drag_start: None,
            on_drag_enter: None,
            on_drag_leave: None,
            on_drop: None,
            on_drag_end: None,
        }
    }
}

impl<N> fmt::Debug for Callbacks<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_drag_start", &self.on_drag_start.is_some())
            .field("on_drag_enter", &self.on_drag_enter.is_some())
            .field("on_drag_leave", &self.on_drag_leave.is_some())
            .field("on_drop", &self.on_drop.is_some())
            .field("on_drag_end", &self.on_drag_end.is_some())
            .finish()
    }
}

/// Everything a context is constructed from.
///
/// ```
/// use sortable::Options;
///
/// let options: Options<u32> = Options::new("playlist")
///     .visible_clone(true)
///     .restrict_x(true)
///     .on_drop(|e| {
///         let _ = (e.picked.index(), e.target.index(), e.below);
///     });
/// assert_eq!(options.config.context_name.as_deref(), Some("playlist"));
/// assert!(options.callbacks.on_drop.is_some());
/// ```
#[derive(Debug)]
pub struct Options<N> {
    /// Plain-data options.
    pub config: DragConfig,
    /// Host callbacks.
    pub callbacks: Callbacks<N>,
}

impl<N> Default for Options<N> {
    fn default() -> Self {
        Self::from_config(DragConfig::default())
    }
}

impl<N> Options<N> {
    /// Options with the given context name and default settings.
    pub fn new(context_name: impl Into<String>) -> Self {
        Self::from_config(DragConfig {
            context_name: Some(context_name.into()),
            ..DragConfig::default()
        })
    }

    /// Options from an existing config, without callbacks.
    pub fn from_config(config: DragConfig) -> Self {
        Self {
            config,
            callbacks: Callbacks::default(),
        }
    }

    /// See [`DragConfig::clone_picked_element`].
    pub fn clone_picked_element(mut self, enabled: bool) -> Self {
        self.config.clone_picked_element = enabled;
        self
    }

    /// See [`DragConfig::visible_clone`].
    pub fn visible_clone(mut self, enabled: bool) -> Self {
        self.config.visible_clone = enabled;
        self
    }

    /// See [`DragConfig::deep_clone`].
    pub fn deep_clone(mut self, enabled: bool) -> Self {
        self.config.deep_clone = enabled;
        self
    }

    /// See [`DragConfig::restrict_x`].
    pub fn restrict_x(mut self, enabled: bool) -> Self {
        self.config.restrict_x = enabled;
        self
    }

    /// See [`DragConfig::restrict_y`].
    pub fn restrict_y(mut self, enabled: bool) -> Self {
        self.config.restrict_y = enabled;
        self
    }

    /// Set the drag-start callback.
    pub fn on_drag_start(mut self, f: impl FnMut(&DragStartEvent<'_, N>) + 'static) -> Self {
        self.callbacks.on_drag_start = Some(Box::new(f));
        self
    }

    /// Set the drag-enter callback.
    pub fn on_drag_enter(mut self, f: impl FnMut(&DragTargetEvent<'_, N>) + 'static) -> Self {
        self.callbacks.on_drag_enter = Some(Box::new(f));
        self
    }

    /// Set the drag-leave callback.
    pub fn on_drag_leave(mut self, f: impl FnMut(&DragTargetEvent<'_, N>) + 'static) -> Self {
        self.callbacks.on_drag_leave = Some(Box::new(f));
        self
    }

    /// Set the drop callback.
    pub fn on_drop(mut self, f: impl FnMut(&DragTargetEvent<'_, N>) + 'static) -> Self {
        self.callbacks.on_drop = Some(Box::new(f));
        self
    }

    /// Set the drag-end callback.
    pub fn on_drag_end(mut self, f: impl FnMut(&PointerEvent<N>) + 'static) -> Self {
        self.callbacks.on_drag_end = Some(Box::new(f));
        self
    }
}
