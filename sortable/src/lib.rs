// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sortable: pointer-driven reordering of a container's children.
//!
//! ## Overview
//!
//! A [`DragContext`] manages one container. Every direct child becomes a
//! [`DraggableItem`]. The user presses an item, drags it over its siblings, and
//! releases it; the item is then moved before or after the sibling it was
//! released over. While dragging, an optional placeholder previews the slot the
//! item would drop into.
//!
//! ## The host seam
//!
//! The engine does not own a scene. It drives anything implementing
//! [`ElementTree`]: structure edits, string attributes, live geometry, point
//! hit testing, a small [`VisualState`] per element, and pointer subscriptions
//! handed out as opaque handles. With the `dom_adapter` feature (on by
//! default) [`sortable_dom::Document`] implements it, and
//! [`adapters::dom::dispatch`] delivers routed events to contexts.
//!
//! ## Placement rule
//!
//! Let `r` be the live box of the target under the pointer. The pointer is
//! *below* when `y > r.y0 + r.height() / 2`, see [`is_below_midpoint`]. Below
//! means "after the target", otherwise "before it". The same rule places the
//! placeholder during the drag and the element on drop, and is reported to the
//! enter, leave and drop callbacks.
//!
//! ## Tagging
//!
//! Attribute names live in [`tags`]. Items opt in with `draggable` (any value
//! but `"false"`) and opt out with `disabled`. The engine writes the context
//! name and each child's index, and marks the lifted element and the
//! placeholder while a drag is active.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use sortable::adapters::dom::dispatch_at;
//! use sortable::{DragContext, Options, PointerEventKind};
//! use sortable_dom::Document;
//!
//! let mut doc = Document::new(Size::new(100.0, 100.0));
//! let list = doc.create_element(Size::new(100.0, 40.0));
//! doc.append_child(doc.root(), list).unwrap();
//! let mut rows = Vec::new();
//! for _ in 0..4 {
//!     let row = doc.create_element(Size::new(100.0, 10.0));
//!     doc.set_attribute(row, "draggable", "true").unwrap();
//!     doc.append_child(list, row).unwrap();
//!     rows.push(row);
//! }
//! let [a, b, c, d] = rows[..] else { unreachable!() };
//!
//! let mut ctx = DragContext::new(&mut doc, Some(list), Some(Options::new("rows")));
//!
//! // Press the first row, drag into the lower half of the third, release.
//! dispatch_at(&mut doc, &mut [&mut ctx], PointerEventKind::Down, Point::new(50.0, 5.0));
//! dispatch_at(&mut doc, &mut [&mut ctx], PointerEventKind::Move, Point::new(50.0, 17.0));
//! assert_eq!(ctx.target().map(|t| t.element()), Some(c));
//! dispatch_at(&mut doc, &mut [&mut ctx], PointerEventKind::Up, Point::new(50.0, 17.0));
//!
//! assert_eq!(doc.children_of(list), &[b, c, a, d]);
//! assert!(!ctx.is_picked());
//! ```
//!
//! ## Features
//!
//! - `std` (default): build dependencies with the standard library.
//! - `libm`: floating point support for `no_std` builds.
//! - `serde` (default): `Deserialize`/`Serialize` for [`DragConfig`].
//! - `dom_adapter` (default): the [`adapters::dom`] integration.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
mod context;
mod error;
mod event;
mod item;
mod options;
pub mod tags;
pub mod target;
mod tree;

pub use context::{DragContext, DragState, Pick, is_below_midpoint};
pub use error::Error;
pub use event::{DragStartEvent, DragTargetEvent, PointerEvent, PointerEventKind};
pub use item::{DraggableItem, LIFTED_Z_INDEX};
pub use options::{Callbacks, DragConfig, EndCallback, Options, StartCallback, TargetCallback};
pub use tree::{ElementTree, ListenScope, Placement, VisualState};
