// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter for Sortable DOM.
//!
//! ## Feature
//!
//! Enable with `dom_adapter`.
//!
//! ## Notes
//!
//! Visual state maps onto the element's inline [`Style`]: placement onto
//! [`Position`], the offset onto `translate`, and the three switches onto
//! [`StyleFlags`]. Structural edits that the document rejects are logged at
//! `warn` and leave the tree unchanged.
//!
//! The document only routes events; [`dispatch`] does the delivery. It asks the
//! document which subscriptions an event reaches, then hands the event to the
//! context owning each one, in subscription order.

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use sortable_dom::{
    Document, DomError, EventKind, ListenerId, NodeId, Position, Scope, Style, StyleFlags,
};

use crate::context::DragContext;
use crate::event::{PointerEvent, PointerEventKind};
use crate::tree::{ElementTree, ListenScope, Placement, VisualState};

fn checked(op: &'static str, result: Result<(), DomError>) {
    if let Err(err) = result {
        tracing::warn!(op, error = %err, "document rejected an edit");
    }
}

/// The document event kind a pointer event kind is routed as.
pub fn event_kind(kind: PointerEventKind) -> EventKind {
    match kind {
        PointerEventKind::Down => EventKind::PointerDown,
        PointerEventKind::Move => EventKind::PointerMove,
        PointerEventKind::Up => EventKind::PointerUp,
        PointerEventKind::ContextMenu => EventKind::ContextMenu,
        PointerEventKind::NativeDragStart => EventKind::DragStart,
    }
}

fn style_from_visual(visual: VisualState) -> Style {
    let mut flags = StyleFlags::empty();
    flags.set(StyleFlags::DISPLAY_NONE, !visual.displayed);
    flags.set(StyleFlags::HIDDEN, !visual.visible);
    flags.set(StyleFlags::NO_USER_SELECT, !visual.selectable);
    Style {
        position: match visual.placement {
            Placement::Flow => Position::Static,
            Placement::Fixed { origin } => Position::Fixed { origin },
        },
        translate: visual.offset,
        z_index: visual.z_index,
        flags,
    }
}

fn visual_from_style(style: &Style) -> VisualState {
    VisualState {
        placement: match style.position {
            Position::Static => Placement::Flow,
            Position::Fixed { origin } => Placement::Fixed { origin },
        },
        offset: style.translate,
        z_index: style.z_index,
        selectable: !style.flags.contains(StyleFlags::NO_USER_SELECT),
        displayed: !style.flags.contains(StyleFlags::DISPLAY_NONE),
        visible: !style.flags.contains(StyleFlags::HIDDEN),
    }
}

impl ElementTree for Document {
    type Node = NodeId;
    type Listener = ListenerId;

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parent_of(node)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.children_of(node).to_vec()
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        Self::next_sibling(self, node)
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        Self::contains(self, ancestor, node)
    }

    fn insert_before(&mut self, parent: NodeId, node: NodeId, reference: Option<NodeId>) {
        checked(
            "insert_before",
            Self::insert_before(self, parent, node, reference),
        );
    }

    fn replace_child(&mut self, parent: NodeId, new: NodeId, old: NodeId) {
        checked("replace_child", Self::replace_child(self, parent, new, old));
    }

    fn detach(&mut self, node: NodeId) {
        checked("detach", Self::detach(self, node));
    }

    fn discard(&mut self, node: NodeId) {
        checked("remove", self.remove(node));
    }

    fn clone_node(&mut self, node: NodeId, deep: bool) -> Option<NodeId> {
        Self::clone_node(self, node, deep)
            .inspect_err(|err| tracing::warn!(error = %err, "couldn't clone element"))
            .ok()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        Self::attribute(self, node, name)
    }

    fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        Self::has_attribute(self, node, name)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        checked("set_attribute", Self::set_attribute(self, node, name, value));
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        checked("remove_attribute", Self::remove_attribute(self, node, name));
    }

    fn bounding_rect(&self, node: NodeId) -> Rect {
        Self::bounding_rect(self, node)
    }

    fn element_from_point(&self, pt: Point) -> Option<NodeId> {
        Self::element_from_point(self, pt)
    }

    fn visual(&self, node: NodeId) -> VisualState {
        self.style(node)
            .map(visual_from_style)
            .unwrap_or_default()
    }

    fn set_visual(&mut self, node: NodeId, visual: VisualState) {
        checked("set_style", self.set_style(node, style_from_visual(visual)));
    }

    fn listen(&mut self, scope: ListenScope<NodeId>, kind: PointerEventKind) -> ListenerId {
        let scope = match scope {
            ListenScope::Document => Scope::Document,
            ListenScope::Element(node) => Scope::Element(node),
        };
        Self::listen(self, scope, event_kind(kind))
    }

    fn unlisten(&mut self, listener: ListenerId) {
        if !Self::unlisten(self, listener) {
            tracing::debug!(?listener, "listener was already gone");
        }
    }
}

/// Deliver `event` to every context owning a subscription it reaches.
///
/// An event without a target is targeted at the topmost element under its
/// position first. Subscriptions are resolved once, before any context runs,
/// so edits made while handling do not change who receives this event.
pub fn dispatch(
    doc: &mut Document,
    contexts: &mut [&mut DragContext<Document>],
    event: &mut PointerEvent<NodeId>,
) {
    if event.target.is_none() {
        event.target = doc.element_from_point(event.position);
    }
    let route = doc.route(event_kind(event.kind), event.target);
    tracing::trace!(kind = ?event.kind, target = ?event.target, listeners = route.len(), "dispatch");
    for listener in route {
        if let Some(ctx) = contexts.iter_mut().find(|ctx| ctx.owns(listener)) {
            ctx.handle_event(doc, listener, event);
        }
    }
}

/// Build an event of `kind` at `position`, dispatch it, and return it.
///
/// ```
/// use kurbo::{Point, Size};
/// use sortable::adapters::dom::dispatch_at;
/// use sortable::{DragContext, Options, PointerEventKind};
/// use sortable_dom::Document;
///
/// let mut doc = Document::new(Size::new(100.0, 100.0));
/// let list = doc.create_element(Size::new(100.0, 20.0));
/// doc.append_child(doc.root(), list).unwrap();
/// for _ in 0..2 {
///     let item = doc.create_element(Size::new(100.0, 10.0));
///     doc.set_attribute(item, "draggable", "true").unwrap();
///     doc.append_child(list, item).unwrap();
/// }
///
/// let mut ctx = DragContext::new(&mut doc, Some(list), Some(Options::new("list")));
/// dispatch_at(&mut doc, &mut [&mut ctx], PointerEventKind::Down, Point::new(5.0, 5.0));
/// assert!(ctx.is_picked());
/// let menu = dispatch_at(&mut doc, &mut [&mut ctx], PointerEventKind::ContextMenu, Point::new(5.0, 5.0));
/// assert!(menu.default_prevented);
/// assert!(!ctx.is_picked());
/// ```
pub fn dispatch_at(
    doc: &mut Document,
    contexts: &mut [&mut DragContext<Document>],
    kind: PointerEventKind,
    position: Point,
) -> PointerEvent<NodeId> {
    let mut event = PointerEvent::new(kind, position);
    dispatch(doc, contexts, &mut event);
    event
}
