// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two independent lists configured from JSON.
//!
//! Rows only reorder within their own list: dragging a row of the left list
//! over the right one finds no target, and the drag ends without a drop.
//!
//! Run:
//! - `cargo run -p sortable_demos --example two_lists`

use kurbo::{Point, Size};
use sortable::{DragConfig, DragContext, Options, PointerEvent};
use sortable_demos::{ROW_HEIGHT, build_list, drag_along, init_logging, order};
use sortable_dom::{Document, NodeId, Position, Style};

const LEFT: &str = r#"{ "contextName": "left", "visibleClone": true }"#;
const RIGHT: &str =
    r#"{ "context_name": "right", "clone_picked_element": false, "restrictX": true }"#;

fn log_end(list: &'static str) -> impl FnMut(&PointerEvent<NodeId>) {
    move |event| tracing::info!(list, x = event.position.x, y = event.position.y, "drag ended")
}

fn main() {
    init_logging();

    let mut doc = Document::new(Size::new(400.0, 300.0));
    let root = doc.root();
    let left_column = doc.create_element(Size::new(200.0, 300.0));
    let right_column = doc.create_element(Size::new(200.0, 300.0));
    doc.append_child(root, left_column).expect("root is live");
    doc.append_child(root, right_column).expect("root is live");
    doc.set_style(
        right_column,
        Style {
            position: Position::Fixed {
                origin: Point::new(200.0, 0.0),
            },
            ..Style::default()
        },
    )
    .expect("column is live");

    let (left, _) = build_list(&mut doc, left_column, 5);
    let (right, _) = build_list(&mut doc, right_column, 5);

    let left_config: DragConfig = serde_json::from_str(LEFT).expect("valid config");
    let right_config: DragConfig = serde_json::from_str(RIGHT).expect("valid config");
    let mut l = DragContext::new(
        &mut doc,
        Some(left),
        Some(Options::from_config(left_config).on_drag_end(log_end("left"))),
    );
    let mut r = DragContext::new(
        &mut doc,
        Some(right),
        Some(Options::from_config(right_config).on_drag_end(log_end("right"))),
    );

    println!("left:  {:?}", order(&doc, left));
    println!("right: {:?}", order(&doc, right));

    // Left row 0 dragged into the right column: no target there.
    drag_along(
        &mut doc,
        &mut [&mut l, &mut r],
        Point::new(100.0, ROW_HEIGHT * 0.5),
        &[Point::new(300.0, ROW_HEIGHT * 2.5)],
    );
    // Right row 4 dragged to the top of its own list.
    drag_along(
        &mut doc,
        &mut [&mut l, &mut r],
        Point::new(300.0, ROW_HEIGHT * 4.5),
        &[
            Point::new(300.0, ROW_HEIGHT * 2.0),
            Point::new(300.0, ROW_HEIGHT * 0.2),
        ],
    );

    println!("left:  {:?}", order(&doc, left));
    println!("right: {:?}", order(&doc, right));
}
