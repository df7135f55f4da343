// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared scaffolding for the Sortable demos.
//!
//! Run:
//! - `cargo run -p sortable_demos --example reorder_list`
//! - `cargo run -p sortable_demos --example two_lists`
//!
//! Set `RUST_LOG` to change what is printed, for example `RUST_LOG=sortable=trace`.

use kurbo::{Point, Size};
use sortable::adapters::dom::dispatch_at;
use sortable::{DragContext, PointerEventKind, tags};
use sortable_dom::{Document, NodeId};
use tracing_subscriber::EnvFilter;

/// Height of one demo row.
pub const ROW_HEIGHT: f64 = 24.0;

/// Install a formatting subscriber filtered by `RUST_LOG`, defaulting to `sortable=debug`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sortable=debug,info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Append a container of `rows` draggable rows to `parent`.
///
/// Every row carries a JSON payload `{"id": i}` under [`tags::DRAG_DATA`].
pub fn build_list(doc: &mut Document, parent: NodeId, rows: usize) -> (NodeId, Vec<NodeId>) {
    let width = doc.size(parent).map_or(200.0, |s| s.width);
    #[allow(clippy::cast_precision_loss, reason = "demo row counts are small")]
    let list = doc.create_element(Size::new(width, ROW_HEIGHT * rows as f64));
    doc.append_child(parent, list)
        .expect("parent is a live element");
    let rows = (0..rows)
        .map(|i| {
            let row = doc.create_element(Size::new(width, ROW_HEIGHT));
            doc.set_attribute(row, tags::DRAGGABLE, "")
                .expect("row was just created");
            doc.set_attribute(row, tags::DRAG_DATA, &format!(r#"{{"id":{i}}}"#))
                .expect("row was just created");
            doc.append_child(list, row).expect("list was just created");
            row
        })
        .collect();
    (list, rows)
}

/// The `id` field of a row's drag payload.
pub fn row_id(doc: &Document, row: NodeId) -> Option<u64> {
    let data = doc.attribute(row, tags::DRAG_DATA)?;
    let value: serde_json::Value = serde_json::from_str(data).ok()?;
    value.get("id")?.as_u64()
}

/// Row ids of a list in current child order.
pub fn order(doc: &Document, list: NodeId) -> Vec<u64> {
    doc.children_of(list)
        .iter()
        .filter_map(|&row| row_id(doc, row))
        .collect()
}

/// Press at `from`, move through `path`, release at the last point.
pub fn drag_along(
    doc: &mut Document,
    contexts: &mut [&mut DragContext<Document>],
    from: Point,
    path: &[Point],
) {
    dispatch_at(doc, contexts, PointerEventKind::Down, from);
    for &pt in path {
        dispatch_at(doc, contexts, PointerEventKind::Move, pt);
    }
    let end = path.last().copied().unwrap_or(from);
    dispatch_at(doc, contexts, PointerEventKind::Up, end);
}
