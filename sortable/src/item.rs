// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draggable items: one per managed child of a container.

use kurbo::{Point, Rect, Vec2};

use crate::tags;
use crate::tree::{ElementTree, Placement, VisualState};

/// Stacking level of a lifted element.
pub const LIFTED_Z_INDEX: i32 = 999;

/// Tracks the pointer offset of an active press.
///
/// Only the press position is kept. Every move reports its total offset from
/// there, never an incremental delta.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct PointerTrack {
    start: Option<Point>,
}

impl PointerTrack {
    pub(crate) fn start(&mut self, pos: Point) {
        self.start = Some(pos);
    }

    /// Offset from the press position, with restricted axes pinned to zero.
    pub(crate) fn offset(&self, pos: Point, restrict_x: bool, restrict_y: bool) -> Option<Vec2> {
        let delta = pos - self.start?;
        Some(Vec2::new(
            if restrict_x { 0.0 } else { delta.x },
            if restrict_y { 0.0 } else { delta.y },
        ))
    }

    pub(crate) fn end(&mut self) {
        self.start = None;
    }

    pub(crate) fn start_pos(&self) -> Option<Point> {
        self.start
    }
}

/// One managed child of a container.
///
/// An item tags and reads its element but never owns it. Its index is the
/// child's position at registration time and is only meaningful until the
/// next [`DragContext::refresh`](crate::DragContext::refresh).
#[derive(Clone, Debug, PartialEq)]
pub struct DraggableItem<N> {
    index: usize,
    element: N,
    track: PointerTrack,
}

impl<N: Copy> DraggableItem<N> {
    pub(crate) fn new(index: usize, element: N) -> Self {
        Self {
            index,
            element,
            track: PointerTrack::default(),
        }
    }

    /// Position among the container's children at registration time.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The wrapped element.
    pub fn element(&self) -> N {
        self.element
    }

    /// Pointer position captured when the item was pressed, while it is picked.
    pub fn initial_pointer_position(&self) -> Option<Point> {
        self.track.start_pos()
    }

    /// `true` if the element is not disabled and is marked draggable with a value other than `"false"`.
    pub fn can_drag<T: ElementTree<Node = N>>(&self, tree: &T) -> bool {
        !tree.has_attribute(self.element, tags::DISABLED)
            && tree
                .attribute(self.element, tags::DRAGGABLE)
                .is_some_and(|v| v != "false")
    }

    /// The host payload stored under [`tags::DRAG_DATA`], unparsed.
    pub fn data<'t, T: ElementTree<Node = N>>(&self, tree: &'t T) -> Option<&'t str> {
        tree.attribute(self.element, tags::DRAG_DATA)
    }

    /// Live rendered box.
    pub fn bounding_rect<T: ElementTree<Node = N>>(&self, tree: &T) -> Rect {
        tree.bounding_rect(self.element)
    }

    /// Left edge of the rendered box.
    pub fn x<T: ElementTree<Node = N>>(&self, tree: &T) -> f64 {
        self.bounding_rect(tree).x0
    }

    /// Top edge of the rendered box.
    pub fn y<T: ElementTree<Node = N>>(&self, tree: &T) -> f64 {
        self.bounding_rect(tree).y0
    }

    /// Width of the rendered box.
    pub fn width<T: ElementTree<Node = N>>(&self, tree: &T) -> f64 {
        self.bounding_rect(tree).width()
    }

    /// Height of the rendered box.
    pub fn height<T: ElementTree<Node = N>>(&self, tree: &T) -> f64 {
        self.bounding_rect(tree).height()
    }

    /// Lift the item if it is eligible and nothing else is picked.
    ///
    /// Returns `true` when the item was lifted: the element is pinned where it
    /// currently renders, raised, made unselectable and tagged as picked.
    pub(crate) fn press<T: ElementTree<Node = N>>(
        &mut self,
        tree: &mut T,
        pointer: Point,
        already_picked: bool,
    ) -> bool {
        if already_picked || !self.can_drag(tree) {
            return false;
        }
        self.track.start(pointer);

        let origin = tree.bounding_rect(self.element).origin();
        let visual = VisualState {
            placement: Placement::Fixed { origin },
            z_index: Some(LIFTED_Z_INDEX),
            selectable: false,
            ..tree.visual(self.element)
        };
        tree.set_visual(self.element, visual);
        tree.set_attribute(self.element, tags::PICKED, "");
        true
    }

    /// Translate the element by the pointer's offset from the press position.
    pub(crate) fn drag_to<T: ElementTree<Node = N>>(
        &self,
        tree: &mut T,
        pointer: Point,
        restrict_x: bool,
        restrict_y: bool,
    ) {
        let Some(offset) = self.track.offset(pointer, restrict_x, restrict_y) else {
            return;
        };
        let visual = VisualState {
            offset,
            ..tree.visual(self.element)
        };
        tree.set_visual(self.element, visual);
    }

    /// Drop the lifted look and the picked tag.
    pub(crate) fn release<T: ElementTree<Node = N>>(&mut self, tree: &mut T) {
        self.track.end();
        tree.remove_attribute(self.element, tags::PICKED);
        tree.set_visual(self.element, VisualState::default());
    }

    pub(crate) fn hide<T: ElementTree<Node = N>>(&self, tree: &mut T) {
        self.set_displayed(tree, false);
    }

    pub(crate) fn show<T: ElementTree<Node = N>>(&self, tree: &mut T) {
        self.set_displayed(tree, true);
    }

    fn set_displayed<T: ElementTree<Node = N>>(&self, tree: &mut T, displayed: bool) {
        let visual = VisualState {
            displayed,
            ..tree.visual(self.element)
        };
        tree.set_visual(self.element, visual);
    }
}
