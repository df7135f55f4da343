// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag context: registration, the pick/target state machine, and commit.

use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt;
use core::mem;

use hashbrown::HashMap;
use kurbo::{Point, Rect};

use crate::event::{DragStartEvent, DragTargetEvent, PointerEvent, PointerEventKind};
use crate::item::DraggableItem;
use crate::options::{Callbacks, DragConfig, Options, TargetCallback};
use crate::tags;
use crate::target::TargetTracker;
use crate::tree::{ElementTree, ListenScope, VisualState};
use crate::Error;

/// `true` when `y` is strictly past the vertical middle of `rect`.
///
/// A pointer exactly on the middle counts as above.
pub fn is_below_midpoint(rect: Rect, y: f64) -> bool {
    y > rect.y0 + rect.height() / 2.0
}

/// State of one context: idle, or one item picked.
#[derive(Clone, Debug, PartialEq)]
pub enum DragState<N> {
    /// Nothing is picked.
    Idle,
    /// An item is under drag control.
    Picked(Pick<N>),
}

/// The active pick.
#[derive(Clone, Debug, PartialEq)]
pub struct Pick<N> {
    item: usize,
    target: TargetTracker<usize>,
    placeholder: Option<N>,
}

impl<N: Copy> Pick<N> {
    /// Index of the picked item.
    pub fn item(&self) -> usize {
        self.item
    }

    /// Index of the current target item.
    pub fn target(&self) -> Option<usize> {
        self.target.current()
    }

    /// The placeholder element, when placeholders are enabled.
    pub fn placeholder(&self) -> Option<N> {
        self.placeholder
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ItemRole {
    Press,
    NativeDragStart,
}

#[derive(Copy, Clone, Debug)]
struct ItemListener {
    index: usize,
    role: ItemRole,
}

#[derive(Copy, Clone, Debug)]
struct DocumentListeners<L> {
    pointer_move: L,
    pointer_up: L,
    context_menu: L,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Resolved {
    None,
    Item(usize),
    Placeholder,
}

/// Reorders the children of one container by press, drag and release.
///
/// ## Wiring
///
/// Construction tags the container, registers one [`DraggableItem`] per direct
/// child, and subscribes to pointer move, pointer up and context menu at
/// document scope plus press and native drag start on every item. The host
/// delivers events through [`DragContext::handle_event`] together with the
/// subscription handle they arrived on; handles the context does not own are
/// ignored.
///
/// ## Lifecycle of a drag
///
/// - **Press** on an eligible item while idle lifts it and, when
///   [`DragConfig::clone_picked_element`] is set, prepares a detached placeholder.
/// - **Move** translates the lifted element, resolves the target under the
///   pointer with the lifted element hidden, moves the placeholder before the
///   target (pointer at or above its middle) or after it, and fires leave/enter
///   when the target changes.
/// - **Release** (pointer up, or context menu while picked) drops onto the
///   target if there is one, fires drag end, and restores the idle state.
///
/// Only the drop step changes the container's real child order.
///
/// ## Inert contexts
///
/// [`DragContext::new`] never fails. Missing inputs are logged and produce an
/// inert context that holds no subscriptions and ignores every event.
pub struct DragContext<T: ElementTree> {
    config: DragConfig,
    callbacks: Callbacks<T::Node>,
    container: Option<T::Node>,
    items: Vec<DraggableItem<T::Node>>,
    by_element: HashMap<T::Node, usize>,
    item_listeners: HashMap<T::Listener, ItemListener>,
    document_listeners: Option<DocumentListeners<T::Listener>>,
    state: DragState<T::Node>,
}

impl<T: ElementTree> fmt::Debug for DragContext<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragContext")
            .field("config", &self.config)
            .field("callbacks", &self.callbacks)
            .field("container", &self.container)
            .field("items", &self.items)
            .field("by_element", &self.by_element)
            .field("item_listeners", &self.item_listeners)
            .field("document_listeners", &self.document_listeners)
            .field("state", &self.state)
            .finish()
    }
}

impl<T: ElementTree> DragContext<T> {
    /// Create a context, or an inert one if the inputs are incomplete.
    ///
    /// Failures are logged with [`tracing::error!`]. Use
    /// [`DragContext::try_new`] to observe them instead.
    pub fn new(
        tree: &mut T,
        container: Option<T::Node>,
        options: Option<Options<T::Node>>,
    ) -> Self {
        match Self::try_new(tree, container, options) {
            Ok(ctx) => ctx,
            Err(err) => {
                tracing::error!(error = %err, ?container, "couldn't create a drag context");
                Self::inert(Options::default())
            }
        }
    }

    /// Create a context, reporting why wiring was impossible.
    pub fn try_new(
        tree: &mut T,
        container: Option<T::Node>,
        options: Option<Options<T::Node>>,
    ) -> Result<Self, Error> {
        let container = container.ok_or(Error::MissingContainer)?;
        let options = options.ok_or(Error::MissingOptions)?;
        match options.config.context_name.as_deref() {
            None => return Err(Error::MissingContextName),
            Some("") => return Err(Error::EmptyContextName),
            Some(name) => tree.set_attribute(container, tags::CONTEXT, name),
        }

        let mut ctx = Self::inert(options);
        ctx.container = Some(container);
        ctx.document_listeners = Some(DocumentListeners {
            pointer_move: tree.listen(ListenScope::Document, PointerEventKind::Move),
            pointer_up: tree.listen(ListenScope::Document, PointerEventKind::Up),
            context_menu: tree.listen(ListenScope::Document, PointerEventKind::ContextMenu),
        });
        ctx.register_items(tree, container);
        tracing::debug!(
            context = ctx.context_name(),
            items = ctx.items.len(),
            "drag context created"
        );
        Ok(ctx)
    }

    fn inert(options: Options<T::Node>) -> Self {
        Self {
            config: options.config,
            callbacks: options.callbacks,
            container: None,
            items: Vec::new(),
            by_element: HashMap::new(),
            item_listeners: HashMap::new(),
            document_listeners: None,
            state: DragState::Idle,
        }
    }

    /// `true` if the context holds no subscriptions and ignores all events.
    pub fn is_inert(&self) -> bool {
        self.container.is_none()
    }

    /// The managed container.
    pub fn container(&self) -> Option<T::Node> {
        self.container
    }

    /// The context name used for tagging and hit-test scoping.
    pub fn context_name(&self) -> Option<&str> {
        self.config.context_name.as_deref()
    }

    /// The plain-data options.
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Registered items, in index order.
    pub fn items(&self) -> &[DraggableItem<T::Node>] {
        &self.items
    }

    /// The item wrapping `element`, if registered.
    pub fn item_for(&self, element: T::Node) -> Option<&DraggableItem<T::Node>> {
        self.by_element.get(&element).map(|&i| &self.items[i])
    }

    /// The state machine value.
    pub fn state(&self) -> &DragState<T::Node> {
        &self.state
    }

    /// `true` while an item is picked.
    pub fn is_picked(&self) -> bool {
        matches!(self.state, DragState::Picked(_))
    }

    /// The picked item.
    pub fn picked(&self) -> Option<&DraggableItem<T::Node>> {
        match &self.state {
            DragState::Picked(pick) => self.items.get(pick.item),
            DragState::Idle => None,
        }
    }

    /// The current target item.
    pub fn target(&self) -> Option<&DraggableItem<T::Node>> {
        match &self.state {
            DragState::Picked(pick) => pick.target.current().and_then(|i| self.items.get(i)),
            DragState::Idle => None,
        }
    }

    /// The placeholder element of the active pick.
    pub fn placeholder(&self) -> Option<T::Node> {
        match &self.state {
            DragState::Picked(pick) => pick.placeholder,
            DragState::Idle => None,
        }
    }

    /// `true` if `listener` is one of this context's subscriptions.
    pub fn owns(&self, listener: T::Listener) -> bool {
        self.item_listeners.contains_key(&listener)
            || self.document_listeners.is_some_and(|d| {
                listener == d.pointer_move || listener == d.pointer_up || listener == d.context_menu
            })
    }

    /// Re-scan the container's children and reassign indices from zero.
    ///
    /// Every [`DraggableItem`] obtained before the refresh is invalid afterwards.
    /// Refreshing during a drag is not allowed; it is logged and ignored.
    pub fn refresh(&mut self, tree: &mut T) {
        let Some(container) = self.container else {
            return;
        };
        if self.is_picked() {
            tracing::warn!(
                context = self.context_name(),
                "refresh ignored while an item is picked"
            );
            return;
        }
        self.unregister_items(tree);
        self.register_items(tree, container);
    }

    /// Drop every subscription and return to an empty, inert state.
    ///
    /// A drag in progress is abandoned without callbacks: the placeholder is
    /// discarded and the lifted element restored in place.
    pub fn destroy(&mut self, tree: &mut T) {
        if let DragState::Picked(pick) = mem::replace(&mut self.state, DragState::Idle) {
            if let Some(placeholder) = pick.placeholder {
                tree.discard(placeholder);
            }
            if let Some(item) = self.items.get_mut(pick.item) {
                item.release(tree);
            }
        }
        self.unregister_items(tree);
        if let Some(doc) = self.document_listeners.take() {
            tree.unlisten(doc.pointer_move);
            tree.unlisten(doc.pointer_up);
            tree.unlisten(doc.context_menu);
        }
        self.container = None;
    }

    /// Handle an event delivered on `listener`.
    ///
    /// Events on handles this context does not own are ignored. The event's
    /// `default_prevented` flag is set for native drag starts on items and for
    /// context menus that end a drag.
    pub fn handle_event(
        &mut self,
        tree: &mut T,
        listener: T::Listener,
        event: &mut PointerEvent<T::Node>,
    ) {
        if let Some(doc) = self.document_listeners {
            if listener == doc.pointer_move {
                self.on_move(tree, event);
                return;
            }
            if listener == doc.pointer_up {
                self.on_release(tree, event);
                return;
            }
            if listener == doc.context_menu {
                if self.is_picked() {
                    event.prevent_default();
                    self.on_release(tree, event);
                }
                return;
            }
        }
        let Some(entry) = self.item_listeners.get(&listener).copied() else {
            return;
        };
        match entry.role {
            ItemRole::NativeDragStart => event.prevent_default(),
            ItemRole::Press => self.on_press(tree, entry.index, event),
        }
    }

    fn register_items(&mut self, tree: &mut T, container: T::Node) {
        let name = self.config.context_name.as_deref().unwrap_or_default();
        for (index, element) in tree.children(container).into_iter().enumerate() {
            tree.set_attribute(element, tags::INDEX, &index.to_string());
            tree.set_attribute(element, tags::CONTEXT, name);
            let press = tree.listen(ListenScope::Element(element), PointerEventKind::Down);
            let native = tree.listen(
                ListenScope::Element(element),
                PointerEventKind::NativeDragStart,
            );
            self.item_listeners.insert(
                press,
                ItemListener {
                    index,
                    role: ItemRole::Press,
                },
            );
            self.item_listeners.insert(
                native,
                ItemListener {
                    index,
                    role: ItemRole::NativeDragStart,
                },
            );
            self.by_element.insert(element, index);
            self.items.push(DraggableItem::new(index, element));
        }
    }

    fn unregister_items(&mut self, tree: &mut T) {
        for (listener, _) in self.item_listeners.drain() {
            tree.unlisten(listener);
        }
        self.items.clear();
        self.by_element.clear();
    }

    fn on_press(&mut self, tree: &mut T, index: usize, event: &PointerEvent<T::Node>) {
        let already_picked = self.is_picked();
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        if !item.press(tree, event.position, already_picked) {
            return;
        }

        let placeholder = if self.config.clone_picked_element {
            let placeholder = make_placeholder(tree, item.element(), &self.config);
            if placeholder.is_none() {
                tracing::warn!(index, "couldn't clone the picked element for a placeholder");
            }
            placeholder
        } else {
            None
        };
        self.state = DragState::Picked(Pick {
            item: index,
            target: TargetTracker::new(),
            placeholder,
        });
        tracing::debug!(context = self.context_name(), index, "item picked");

        if let Some(on_drag_start) = self.callbacks.on_drag_start.as_mut() {
            on_drag_start(&DragStartEvent {
                event,
                picked: &self.items[index],
            });
        }
    }

    fn on_move(&mut self, tree: &mut T, event: &PointerEvent<T::Node>) {
        let (Some(container), DragState::Picked(pick)) = (self.container, &mut self.state) else {
            return;
        };
        let picked = &self.items[pick.item];
        picked.drag_to(
            tree,
            event.position,
            self.config.restrict_x,
            self.config.restrict_y,
        );

        let name = self.config.context_name.as_deref().unwrap_or_default();
        let resolved = resolve_target(
            tree,
            name,
            &self.by_element,
            container,
            picked,
            pick.placeholder,
            event.position,
        );
        let candidate = match resolved {
            Resolved::Placeholder => pick.target.current(),
            Resolved::Item(i) if i != pick.item => Some(i),
            Resolved::Item(_) | Resolved::None => None,
        };

        if let Some(placeholder) = pick.placeholder
            && resolved != Resolved::Placeholder
        {
            let target = candidate.map(|i| self.items[i].element());
            place_placeholder(tree, container, placeholder, target, event.position.y);
        }

        let change = pick.target.update(candidate);
        if let Some(left) = change.left {
            tracing::trace!(index = left, "drag leave");
            notify(
                &mut self.callbacks.on_drag_leave,
                tree,
                event,
                picked,
                &self.items[left],
            );
        }
        if let Some(entered) = change.entered {
            tracing::trace!(index = entered, "drag enter");
            notify(
                &mut self.callbacks.on_drag_enter,
                tree,
                event,
                picked,
                &self.items[entered],
            );
        }
    }

    fn on_release(&mut self, tree: &mut T, event: &PointerEvent<T::Node>) {
        let DragState::Picked(pick) = mem::replace(&mut self.state, DragState::Idle) else {
            return;
        };
        let Some(container) = self.container else {
            return;
        };
        let picked = &self.items[pick.item];

        if let Some(target_index) = pick.target.current() {
            let target = &self.items[target_index];
            let below = notify(&mut self.callbacks.on_drop, tree, event, picked, target);
            commit(
                tree,
                container,
                picked.element(),
                target.element(),
                pick.placeholder,
                below,
            );
            tracing::debug!(
                context = self.context_name(),
                picked = pick.item,
                target = target_index,
                below,
                "item dropped"
            );
        } else {
            tracing::debug!(
                context = self.context_name(),
                picked = pick.item,
                "released without a target"
            );
        }

        if let Some(on_drag_end) = self.callbacks.on_drag_end.as_mut() {
            on_drag_end(event);
        }

        if let Some(placeholder) = pick.placeholder {
            tree.discard(placeholder);
        }
        self.items[pick.item].release(tree);
    }
}

/// Invoke a target callback if present and return the below-midpoint flag it saw.
fn notify<T: ElementTree>(
    callback: &mut Option<TargetCallback<T::Node>>,
    tree: &T,
    event: &PointerEvent<T::Node>,
    picked: &DraggableItem<T::Node>,
    target: &DraggableItem<T::Node>,
) -> bool {
    let below = is_below_midpoint(tree.bounding_rect(target.element()), event.position.y);
    if let Some(callback) = callback.as_mut() {
        callback(&DragTargetEvent {
            event,
            picked,
            target,
            below,
        });
    }
    below
}

fn make_placeholder<T: ElementTree>(
    tree: &mut T,
    element: T::Node,
    config: &DragConfig,
) -> Option<T::Node> {
    let placeholder = tree.clone_node(element, config.deep_clone)?;
    tree.set_visual(
        placeholder,
        VisualState {
            visible: config.visible_clone,
            ..VisualState::default()
        },
    );
    tree.set_attribute(placeholder, tags::CLONE, "");
    tree.remove_attribute(placeholder, tags::DRAGGABLE);
    tree.remove_attribute(placeholder, tags::PICKED);
    Some(placeholder)
}

fn resolve_target<T: ElementTree>(
    tree: &mut T,
    name: &str,
    by_element: &HashMap<T::Node, usize>,
    container: T::Node,
    picked: &DraggableItem<T::Node>,
    placeholder: Option<T::Node>,
    pt: Point,
) -> Resolved {
    if let Some(placeholder) = placeholder
        && tree.contains(container, placeholder)
        && tree.bounding_rect(placeholder).contains(pt)
    {
        return Resolved::Placeholder;
    }

    picked.hide(tree);
    let hit = tree.element_from_point(pt);
    picked.show(tree);

    let mut cur = hit;
    while let Some(node) = cur {
        if placeholder == Some(node) {
            return Resolved::Placeholder;
        }
        if tree.attribute(node, tags::CONTEXT) == Some(name)
            && tree.has_attribute(node, tags::DRAGGABLE)
        {
            return by_element
                .get(&node)
                .map_or(Resolved::None, |&i| Resolved::Item(i));
        }
        cur = tree.parent(node);
    }
    Resolved::None
}

fn place_placeholder<T: ElementTree>(
    tree: &mut T,
    container: T::Node,
    placeholder: T::Node,
    target: Option<T::Node>,
    y: f64,
) {
    let Some(target) = target else {
        if tree.contains(container, placeholder) {
            let visual = VisualState {
                displayed: false,
                ..tree.visual(placeholder)
            };
            tree.set_visual(placeholder, visual);
            tree.detach(placeholder);
        }
        return;
    };

    let visual = VisualState {
        displayed: true,
        ..tree.visual(placeholder)
    };
    tree.set_visual(placeholder, visual);
    let reference = if is_below_midpoint(tree.bounding_rect(target), y) {
        tree.next_sibling(target)
    } else {
        Some(target)
    };
    tree.insert_before(container, placeholder, reference);
}

fn commit<T: ElementTree>(
    tree: &mut T,
    container: T::Node,
    element: T::Node,
    target: T::Node,
    placeholder: Option<T::Node>,
    below: bool,
) {
    match placeholder {
        Some(placeholder) if tree.contains(container, placeholder) => {
            tree.replace_child(container, element, placeholder);
        }
        _ => {
            let reference = if below {
                tree.next_sibling(target)
            } else {
                Some(target)
            };
            tree.insert_before(container, element, reference);
        }
    }
}
