// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer events fed into a context and the payloads handed to callbacks.

use kurbo::Point;

use crate::DraggableItem;

/// Kinds of pointer input the engine reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Button press on an element.
    Down,
    /// Pointer motion anywhere.
    Move,
    /// Button release anywhere.
    Up,
    /// Secondary-button context menu request.
    ContextMenu,
    /// The platform's own drag-and-drop starting on an element.
    NativeDragStart,
}

/// A pointer event in viewport coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent<N> {
    /// What happened.
    pub kind: PointerEventKind,
    /// Pointer position in viewport coordinates.
    pub position: Point,
    /// Element the event was targeted at, when known.
    pub target: Option<N>,
    /// Set by the engine when the host should skip its default action.
    pub default_prevented: bool,
}

impl<N> PointerEvent<N> {
    /// An untargeted event.
    pub fn new(kind: PointerEventKind, position: Point) -> Self {
        Self {
            kind,
            position,
            target: None,
            default_prevented: false,
        }
    }

    /// Attach the element the event was targeted at.
    pub fn with_target(mut self, target: N) -> Self {
        self.target = Some(target);
        self
    }

    /// Ask the host to skip its default action (for example the native context menu).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

/// Payload of the drag-start callback.
#[derive(Debug)]
pub struct DragStartEvent<'a, N> {
    /// The originating pointer event.
    pub event: &'a PointerEvent<N>,
    /// The item that was just picked.
    pub picked: &'a DraggableItem<N>,
}

/// Payload of the enter, leave and drop callbacks.
#[derive(Debug)]
pub struct DragTargetEvent<'a, N> {
    /// The originating pointer event.
    pub event: &'a PointerEvent<N>,
    /// The item being dragged.
    pub picked: &'a DraggableItem<N>,
    /// The item entered, left, or dropped onto.
    pub target: &'a DraggableItem<N>,
    /// `true` when the pointer is past the vertical middle of the target.
    pub below: bool,
}
