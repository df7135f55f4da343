// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the element tree: node identifiers, styles, and listener handles.

use kurbo::{Point, Vec2};

/// Identifier for an element in a [`Document`](crate::Document).
///
/// This is a small, copyable handle that stays stable across structural edits
/// but becomes invalid when the underlying slot is freed.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On creation, a fresh slot is allocated with generation `1`.
/// - On [`Document::remove`](crate::Document::remove), the slot is freed; any existing `NodeId`
///   that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Detaching an element (see [`Document::detach`](crate::Document::detach)) does not free it.
/// Use [`Document::is_alive`](crate::Document::is_alive) to check liveness.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Rendering switches carried by a [`Style`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct StyleFlags: u8 {
        /// `display: none`. The element and its subtree take no space and are never hit.
        const DISPLAY_NONE   = 0b0000_0001;
        /// `visibility: hidden`. The element keeps its space but is not hit; inherited by descendants.
        const HIDDEN         = 0b0000_0010;
        /// `user-select: none`.
        const NO_USER_SELECT = 0b0000_0100;
    }
}

/// How an element is placed.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Position {
    /// Stacked vertically in its parent's block flow.
    #[default]
    Static,
    /// Taken out of flow and placed at a viewport origin.
    Fixed {
        /// Top-left corner in viewport coordinates.
        origin: Point,
    },
}

/// Inline style of an element.
///
/// `Style::default()` is the unstyled state: in flow, untranslated, shown.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    /// Flow or fixed placement.
    pub position: Position,
    /// Render-time translation; never affects layout of siblings.
    pub translate: Vec2,
    /// Stacking order. `None` inherits the parent's stacking level.
    pub z_index: Option<i32>,
    /// Display, visibility and selection switches.
    pub flags: StyleFlags,
}

impl Style {
    /// Returns `true` when the element is laid out in its parent's flow.
    pub fn in_flow(&self) -> bool {
        matches!(self.position, Position::Static) && !self.flags.contains(StyleFlags::DISPLAY_NONE)
    }
}

/// Kinds of pointer events a listener can subscribe to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Button press.
    PointerDown,
    /// Pointer motion.
    PointerMove,
    /// Button release.
    PointerUp,
    /// Secondary-button request for a context menu.
    ContextMenu,
    /// The platform's own drag-and-drop gesture starting on an element.
    DragStart,
}

/// Where a listener is attached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Receives every event of its kind, wherever it lands.
    Document,
    /// Receives events whose target is this element or one of its descendants.
    Element(NodeId),
}

/// Handle returned by [`Document::listen`](crate::Document::listen).
///
/// Handles are never reused within one document, so a stale handle cannot
/// alias a newer subscription.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);
