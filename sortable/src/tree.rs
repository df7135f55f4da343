// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host seam: what the engine needs from an element tree.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use kurbo::{Point, Rect, Vec2};

use crate::event::PointerEventKind;

/// Where an element is placed.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Placement {
    /// Laid out by the container.
    #[default]
    Flow,
    /// Out of flow, pinned at a viewport origin.
    Fixed {
        /// Top-left corner in viewport coordinates.
        origin: Point,
    },
}

/// The visual properties the engine reads and writes.
///
/// `VisualState::default()` is the restored state of an element that is not
/// being dragged.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VisualState {
    /// Flow or fixed placement.
    pub placement: Placement,
    /// Render-time translation. Layout position is unaffected.
    pub offset: Vec2,
    /// Stacking order, `None` for the default level.
    pub z_index: Option<i32>,
    /// Whether text in the element can be selected.
    pub selectable: bool,
    /// `false` removes the element from rendering and layout.
    pub displayed: bool,
    /// `false` keeps the element's space but hides it.
    pub visible: bool,
}

impl Default for VisualState {
    fn default() -> Self {
        Self {
            placement: Placement::Flow,
            offset: Vec2::ZERO,
            z_index: None,
            selectable: true,
            displayed: true,
            visible: true,
        }
    }
}

/// Where a subscription is attached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenScope<N> {
    /// Every event of the kind, wherever it lands.
    Document,
    /// Events targeted at this element or its descendants.
    Element(N),
}

/// An element tree the engine can drive.
///
/// Hosts implement this over their own scene (a DOM binding, a retained UI
/// tree, or [`sortable_dom::Document`] with the `dom_adapter` feature).
///
/// Structural edits do not report failure: the engine never depends on the
/// outcome of an individual edit, and implementations are expected to leave
/// the tree unchanged when an edit is invalid (for example a stale handle).
pub trait ElementTree {
    /// Element handle.
    type Node: Copy + Eq + Hash + Debug;
    /// Subscription handle returned by [`ElementTree::listen`].
    type Listener: Copy + Eq + Hash + Debug;

    /// Parent of an element, if attached.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Direct children in order.
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// The sibling right after `node`.
    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    /// `true` if `node` is `ancestor` or inside it.
    fn contains(&self, ancestor: Self::Node, node: Self::Node) -> bool;

    /// Insert (or move) `node` under `parent` before `reference`; last when `None`.
    fn insert_before(
        &mut self,
        parent: Self::Node,
        node: Self::Node,
        reference: Option<Self::Node>,
    );

    /// Put `new` where `old` is under `parent`, moving `new` and detaching `old`.
    fn replace_child(&mut self, parent: Self::Node, new: Self::Node, old: Self::Node);

    /// Take an element out of the tree, keeping it alive.
    fn detach(&mut self, node: Self::Node);

    /// Take an element out of the tree and release it.
    fn discard(&mut self, node: Self::Node);

    /// Copy an element, with its descendants when `deep`. The copy is detached.
    fn clone_node(&mut self, node: Self::Node, deep: bool) -> Option<Self::Node>;

    /// Attribute value.
    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    /// Attribute presence.
    fn has_attribute(&self, node: Self::Node, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Set an attribute.
    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);

    /// Remove an attribute.
    fn remove_attribute(&mut self, node: Self::Node, name: &str);

    /// Current rendered box in viewport coordinates, computed from live layout.
    fn bounding_rect(&self, node: Self::Node) -> Rect;

    /// Topmost hittable element under a viewport point.
    fn element_from_point(&self, pt: Point) -> Option<Self::Node>;

    /// Current visual state.
    fn visual(&self, node: Self::Node) -> VisualState;

    /// Replace the visual state.
    fn set_visual(&mut self, node: Self::Node, visual: VisualState);

    /// Subscribe to pointer events of `kind` reaching `scope`.
    fn listen(&mut self, scope: ListenScope<Self::Node>, kind: PointerEventKind)
    -> Self::Listener;

    /// Drop a subscription.
    fn unlisten(&mut self, listener: Self::Listener);
}
