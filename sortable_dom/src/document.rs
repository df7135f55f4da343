// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The element tree: structure, attributes, styles, layout, and hit testing.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Rect, Size, Vec2};
use smallvec::SmallVec;

use crate::listeners::Listeners;
use crate::{DomError, EventKind, ListenerId, NodeId, Position, Scope, Style, StyleFlags};

#[derive(Clone, Debug)]
struct Element {
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 8]>,
    attributes: HashMap<String, String>,
    size: Size,
    style: Style,
}

impl Element {
    fn new(size: Size) -> Self {
        Self {
            parent: None,
            children: SmallVec::new(),
            attributes: HashMap::new(),
            size,
            style: Style::default(),
        }
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    element: Option<Element>,
}

/// An in-memory element tree.
///
/// The document owns a root element sized to the viewport. Elements are
/// created detached and become part of the rendered tree once they are
/// inserted under a connected parent.
///
/// Layout is a single block flow: a static element sits at its parent's
/// origin, shifted down by the heights of the in-flow siblings before it.
/// Fixed elements sit at their own viewport origin. Translations apply at
/// render time only, to the element and its descendants. Geometry is
/// recomputed on every query.
#[derive(Clone, Debug)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
    listeners: Listeners,
}

impl Document {
    /// Create a document whose root covers `viewport`.
    pub fn new(viewport: Size) -> Self {
        let mut doc = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: NodeId::new(0, 1),
            listeners: Listeners::default(),
        };
        doc.root = doc.alloc(Element::new(viewport));
        doc
    }

    /// The root element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create a detached element with the given intrinsic size.
    pub fn create_element(&mut self, size: Size) -> NodeId {
        self.alloc(Element::new(size))
    }

    /// Returns `true` if `id` refers to a live element.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    /// Parent of a live element, if attached.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.element(id)?.parent
    }

    /// Children of an element in document order. Empty for stale handles.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.element(id).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    /// The sibling immediately after `id`, if any.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent_of(id)?;
        let siblings = self.children_of(parent);
        let at = siblings.iter().position(|&c| c == id)?;
        siblings.get(at + 1).copied()
    }

    /// Returns `true` if `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.is_alive(ancestor) {
            return false;
        }
        let mut cur = Some(node);
        while let Some(n) = cur {
            if n == ancestor {
                return true;
            }
            cur = self.parent_of(n);
        }
        false
    }

    /// Append `node` as the last child of `parent`, moving it if already attached.
    pub fn append_child(&mut self, parent: NodeId, node: NodeId) -> Result<(), DomError> {
        self.insert_before(parent, node, None)
    }

    /// Insert `node` under `parent` before `reference`, or last when `reference` is `None`.
    ///
    /// An attached `node` is moved. Inserting a node before itself is a no-op.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        node: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DomError> {
        self.check_insertable(parent, node)?;
        if reference == Some(node) {
            return Ok(());
        }
        if let Some(r) = reference
            && self.parent_of(r) != Some(parent)
        {
            return Err(DomError::NotAChild { parent, child: r });
        }

        self.detach(node)?;
        let children = &self.element(parent).ok_or(DomError::StaleNode(parent))?.children;
        let at = reference
            .and_then(|r| children.iter().position(|&c| c == r))
            .unwrap_or(children.len());
        self.element_mut(parent)
            .ok_or(DomError::StaleNode(parent))?
            .children
            .insert(at, node);
        self.element_mut(node).ok_or(DomError::StaleNode(node))?.parent = Some(parent);
        Ok(())
    }

    /// Put `new` in the place of `old` under `parent`; `old` ends up detached.
    ///
    /// `new` is moved if already attached, including when it is a sibling of `old`.
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        new: NodeId,
        old: NodeId,
    ) -> Result<(), DomError> {
        self.check_insertable(parent, new)?;
        if self.parent_of(old) != Some(parent) {
            return Err(DomError::NotAChild { parent, child: old });
        }
        if new == old {
            return Ok(());
        }

        self.detach(new)?;
        let el = self.element_mut(parent).ok_or(DomError::StaleNode(parent))?;
        let at = el
            .children
            .iter()
            .position(|&c| c == old)
            .ok_or(DomError::NotAChild { parent, child: old })?;
        el.children[at] = new;
        self.element_mut(new).ok_or(DomError::StaleNode(new))?.parent = Some(parent);
        self.element_mut(old).ok_or(DomError::StaleNode(old))?.parent = None;
        Ok(())
    }

    /// Detach an element from its parent, keeping it (and its subtree) alive.
    pub fn detach(&mut self, node: NodeId) -> Result<(), DomError> {
        if node == self.root {
            return Err(DomError::Root);
        }
        let parent = self
            .element_mut(node)
            .ok_or(DomError::StaleNode(node))?
            .parent
            .take();
        if let Some(p) = parent
            && let Some(el) = self.element_mut(p)
        {
            el.children.retain(|c| *c != node);
        }
        Ok(())
    }

    /// Detach an element and free it along with its subtree.
    ///
    /// Element-scoped listeners on freed elements are dropped too.
    pub fn remove(&mut self, node: NodeId) -> Result<(), DomError> {
        self.detach(node)?;
        let mut stack = alloc::vec![node];
        let mut freed = Vec::new();
        while let Some(id) = stack.pop() {
            let idx = id.idx();
            if let Some(el) = self.slots[idx].element.take() {
                stack.extend(el.children.iter().copied());
                freed.push(id);
                #[allow(clippy::cast_possible_truncation, reason = "slot indices fit in u32")]
                self.free.push(idx as u32);
            }
        }
        self.listeners
            .retain_scopes(|scope| !matches!(scope, Scope::Element(n) if freed.contains(&n)));
        Ok(())
    }

    /// Copy an element into a new detached element.
    ///
    /// Attributes, size and style are copied. With `deep`, descendants are copied too.
    pub fn clone_node(&mut self, node: NodeId, deep: bool) -> Result<NodeId, DomError> {
        let src = self.element(node).ok_or(DomError::StaleNode(node))?;
        let mut copy = Element::new(src.size);
        copy.attributes = src.attributes.clone();
        copy.style = src.style.clone();
        let children: SmallVec<[NodeId; 8]> = src.children.clone();

        let id = self.alloc(copy);
        if deep {
            for child in children {
                let child_copy = self.clone_node(child, true)?;
                self.append_child(id, child_copy)?;
            }
        }
        Ok(id)
    }

    /// Value of an attribute.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attributes.get(name).map(String::as_str)
    }

    /// Returns `true` if the attribute is present, whatever its value.
    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.element(node)
            .is_some_and(|e| e.attributes.contains_key(name))
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.element_mut(node)
            .ok_or(DomError::StaleNode(node))?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Remove an attribute. Removing an absent attribute succeeds.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<(), DomError> {
        self.element_mut(node)
            .ok_or(DomError::StaleNode(node))?
            .attributes
            .remove(name);
        Ok(())
    }

    /// Intrinsic size of an element.
    pub fn size(&self, node: NodeId) -> Option<Size> {
        self.element(node).map(|e| e.size)
    }

    /// Change the intrinsic size of an element.
    pub fn set_size(&mut self, node: NodeId, size: Size) -> Result<(), DomError> {
        self.element_mut(node).ok_or(DomError::StaleNode(node))?.size = size;
        Ok(())
    }

    /// Inline style of an element.
    pub fn style(&self, node: NodeId) -> Option<&Style> {
        self.element(node).map(|e| &e.style)
    }

    /// Replace the inline style of an element.
    pub fn set_style(&mut self, node: NodeId, style: Style) -> Result<(), DomError> {
        self.element_mut(node).ok_or(DomError::StaleNode(node))?.style = style;
        Ok(())
    }

    /// Returns `true` if the element is connected to the root and no element on
    /// the way up is `display: none`.
    pub fn is_rendered(&self, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(n) = cur {
            let Some(el) = self.element(n) else {
                return false;
            };
            if el.style.flags.contains(StyleFlags::DISPLAY_NONE) {
                return false;
            }
            if n == self.root {
                return true;
            }
            cur = el.parent;
        }
        false
    }

    /// Rendered box of an element in viewport coordinates.
    ///
    /// Elements that are not rendered report [`Rect::ZERO`].
    pub fn bounding_rect(&self, node: NodeId) -> Rect {
        let Some(el) = self.element(node) else {
            return Rect::ZERO;
        };
        if !self.is_rendered(node) {
            return Rect::ZERO;
        }
        let mut offset = Vec2::ZERO;
        let mut cur = Some(node);
        while let Some(n) = cur {
            let Some(e) = self.element(n) else { break };
            offset += e.style.translate;
            cur = e.parent;
        }
        Rect::from_origin_size(self.layout_origin(node) + offset, el.size)
    }

    /// The topmost rendered, visible element whose box contains `pt`.
    ///
    /// Stacking is decided by the effective z-index first, then by document
    /// order (later elements paint over earlier ones, children over parents).
    pub fn element_from_point(&self, pt: Point) -> Option<NodeId> {
        let mut scan = HitScan {
            pt,
            order: 0,
            best: None,
        };
        self.hit_walk(self.root, 0, Vec2::ZERO, false, &mut scan);
        scan.best.map(|(_, id)| id)
    }

    /// Subscribe to events of `kind` reaching `scope`.
    pub fn listen(&mut self, scope: Scope, kind: EventKind) -> ListenerId {
        self.listeners.add(scope, kind)
    }

    /// Drop a subscription. Returns `false` if the handle was not registered.
    pub fn unlisten(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Subscriptions an event of `kind` targeted at `target` reaches, in registration order.
    ///
    /// Document-scoped listeners always match. Element-scoped listeners match
    /// when the target is the element or one of its descendants.
    pub fn route(&self, kind: EventKind, target: Option<NodeId>) -> Vec<ListenerId> {
        self.listeners
            .of_kind(kind)
            .filter(|e| match e.scope {
                Scope::Document => true,
                Scope::Element(n) => target.is_some_and(|t| self.contains(n, t)),
            })
            .map(|e| e.id)
            .collect()
    }

    fn alloc(&mut self, element: Element) -> NodeId {
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation += 1;
            slot.element = Some(element);
            NodeId::new(idx, slot.generation)
        } else {
            #[allow(clippy::cast_possible_truncation, reason = "slot counts fit in u32")]
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 1,
                element: Some(element),
            });
            NodeId::new(idx, 1)
        }
    }

    fn element(&self, id: NodeId) -> Option<&Element> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.element.as_ref()
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.element.as_mut()
    }

    fn check_insertable(&self, parent: NodeId, node: NodeId) -> Result<(), DomError> {
        if !self.is_alive(parent) {
            return Err(DomError::StaleNode(parent));
        }
        if !self.is_alive(node) {
            return Err(DomError::StaleNode(node));
        }
        if node == self.root {
            return Err(DomError::Root);
        }
        if self.contains(node, parent) {
            return Err(DomError::Cycle { parent, node });
        }
        Ok(())
    }

    fn layout_origin(&self, id: NodeId) -> Point {
        let Some(el) = self.element(id) else {
            return Point::ZERO;
        };
        if let Position::Fixed { origin } = el.style.position {
            return origin;
        }
        let Some(parent) = el.parent else {
            return Point::ZERO;
        };
        let base = self.layout_origin(parent);
        let mut y = base.y;
        for &sibling in self.children_of(parent) {
            if sibling == id {
                break;
            }
            if let Some(s) = self.element(sibling)
                && s.style.in_flow()
            {
                y += s.size.height;
            }
        }
        Point::new(base.x, y)
    }

    fn hit_walk(&self, id: NodeId, z: i32, offset: Vec2, hidden: bool, scan: &mut HitScan) {
        let Some(el) = self.element(id) else { return };
        if el.style.flags.contains(StyleFlags::DISPLAY_NONE) {
            return;
        }
        let z = el.style.z_index.unwrap_or(z);
        let hidden = hidden || el.style.flags.contains(StyleFlags::HIDDEN);
        let offset = offset + el.style.translate;
        scan.order += 1;

        if !hidden {
            let rect = Rect::from_origin_size(self.layout_origin(id) + offset, el.size);
            let key = (z, scan.order);
            if rect.contains(scan.pt) && scan.best.is_none_or(|(k, _)| key > k) {
                scan.best = Some((key, id));
            }
        }
        for &child in &el.children {
            self.hit_walk(child, z, offset, hidden, scan);
        }
    }
}

struct HitScan {
    pt: Point,
    order: usize,
    best: Option<((i32, usize), NodeId)>,
}
