// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reorder a list of ten rows.
//!
//! The context keeps rows from moving sideways, previews the drop slot with a
//! visible deep copy, and logs every callback.
//!
//! Run:
//! - `cargo run -p sortable_demos --example reorder_list`

use kurbo::{Point, Size};
use sortable::{DragContext, Options};
use sortable_demos::{ROW_HEIGHT, build_list, drag_along, init_logging, order, row_id};
use sortable_dom::Document;

fn main() {
    init_logging();

    let mut doc = Document::new(Size::new(200.0, 400.0));
    let root = doc.root();
    let (list, rows) = build_list(&mut doc, root, 10);
    for &row in &rows {
        let label = doc.create_element(Size::new(120.0, ROW_HEIGHT / 2.0));
        doc.append_child(row, label).expect("row is live");
    }

    let options = Options::new("draggableList")
        .visible_clone(true)
        .deep_clone(true)
        .restrict_x(true)
        .on_drag_enter(|e| {
            tracing::info!(over = e.target.index(), below = e.below, "drag enter");
        })
        .on_drop(|e| {
            tracing::info!(
                picked = e.picked.index(),
                over = e.target.index(),
                below = e.below,
                "drop"
            );
        });
    let mut ctx = DragContext::new(&mut doc, Some(list), Some(options));
    println!("start:  {:?}", order(&doc, list));

    // Lift the first row and release it over the lower half of the fourth.
    let y = |rows: f64| ROW_HEIGHT * rows;
    drag_along(
        &mut doc,
        &mut [&mut ctx],
        Point::new(100.0, y(0.5)),
        &[
            Point::new(100.0, y(1.2)),
            Point::new(130.0, y(2.3)),
            Point::new(160.0, y(2.7)),
        ],
    );
    println!("first:  {:?}", order(&doc, list));

    // Lift the last row and release it over the top half of the first.
    drag_along(
        &mut doc,
        &mut [&mut ctx],
        Point::new(100.0, y(9.5)),
        &[
            Point::new(100.0, y(5.0)),
            Point::new(100.0, y(1.5)),
            Point::new(100.0, y(0.2)),
        ],
    );
    println!("second: {:?}", order(&doc, list));

    // New rows only take part after a refresh.
    let extra = doc.create_element(Size::new(200.0, ROW_HEIGHT));
    doc.set_attribute(extra, sortable::tags::DRAGGABLE, "")
        .expect("extra is live");
    doc.set_attribute(extra, sortable::tags::DRAG_DATA, r#"{"id":10}"#)
        .expect("extra is live");
    doc.append_child(list, extra).expect("list is live");
    ctx.refresh(&mut doc);
    println!(
        "refreshed: {} items, last is {:?}",
        ctx.items().len(),
        ctx.items().last().and_then(|item| row_id(&doc, item.element()))
    );

    ctx.destroy(&mut doc);
    println!("listeners after destroy: {}", doc.listener_count());
}
