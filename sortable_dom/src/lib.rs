// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sortable DOM: a small in-memory element tree.
//!
//! This crate models just enough of a document object model to host
//! pointer-driven interactions without a browser:
//!
//! - A hierarchy of elements addressed by generational [`NodeId`] handles.
//! - String attributes per element, used for tagging and selection.
//! - An inline [`Style`] per element: flow or fixed placement, a render-time
//!   translation, stacking order, and display/visibility switches.
//! - A single vertical block-flow layout, recomputed on every geometry query.
//! - Point hit testing over rendered, visible elements.
//! - A listener registry handing out [`ListenerId`] subscription handles.
//!
//! It does not run handlers. Hosts ask [`Document::route`] which subscriptions
//! an event reaches and deliver the event to whoever owns those handles. Keeping
//! subscriptions as plain handles means dropping one is explicit and cannot
//! leave a closure behind that points at a destroyed owner.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use sortable_dom::{Document, EventKind, Scope};
//!
//! let mut doc = Document::new(Size::new(200.0, 200.0));
//! let list = doc.create_element(Size::new(200.0, 40.0));
//! doc.append_child(doc.root(), list).unwrap();
//!
//! let first = doc.create_element(Size::new(200.0, 20.0));
//! let second = doc.create_element(Size::new(200.0, 20.0));
//! doc.append_child(list, first).unwrap();
//! doc.append_child(list, second).unwrap();
//!
//! // Block flow stacks the children.
//! assert_eq!(doc.bounding_rect(second).y0, 20.0);
//! assert_eq!(doc.element_from_point(Point::new(10.0, 25.0)), Some(second));
//!
//! // Element-scoped listeners see events targeted at descendants.
//! let press = doc.listen(Scope::Element(list), EventKind::PointerDown);
//! assert_eq!(doc.route(EventKind::PointerDown, Some(first)), vec![press]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
mod error;
mod listeners;
mod types;

pub use document::Document;
pub use error::DomError;
pub use types::{EventKind, ListenerId, NodeId, Position, Scope, Style, StyleFlags};
