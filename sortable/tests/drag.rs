// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end drag sessions over `sortable_dom`.
//!
//! Every fixture is a 100×40 list of four 100×10 rows stacked from the top of
//! the viewport. Once the first row is lifted it leaves the flow, so the others
//! shift up: the second row spans y 0..10, the third 10..20, the fourth 20..30.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Size, Vec2};
use sortable::adapters::dom::{dispatch, dispatch_at};
use sortable::{
    DragContext, DragState, Error, LIFTED_Z_INDEX, Options, PointerEvent, PointerEventKind, tags,
};
use sortable_dom::{Document, NodeId, Position, StyleFlags};

#[derive(Clone, Debug, PartialEq)]
enum Log {
    Start(usize),
    Enter(usize, bool),
    Leave(usize, bool),
    Drop(usize, usize, bool),
    End,
}

type Journal = Rc<RefCell<Vec<Log>>>;

fn recording(options: Options<NodeId>) -> (Options<NodeId>, Journal) {
    let journal = Journal::default();
    let (start, enter, leave, drop, end) = (
        journal.clone(),
        journal.clone(),
        journal.clone(),
        journal.clone(),
        journal.clone(),
    );
    let options = options
        .on_drag_start(move |e| start.borrow_mut().push(Log::Start(e.picked.index())))
        .on_drag_enter(move |e| {
            enter
                .borrow_mut()
                .push(Log::Enter(e.target.index(), e.below));
        })
        .on_drag_leave(move |e| {
            leave
                .borrow_mut()
                .push(Log::Leave(e.target.index(), e.below));
        })
        .on_drop(move |e| {
            drop.borrow_mut()
                .push(Log::Drop(e.picked.index(), e.target.index(), e.below));
        })
        .on_drag_end(move |_| end.borrow_mut().push(Log::End));
    (options, journal)
}

fn list(doc: &mut Document, parent: NodeId, rows: usize) -> (NodeId, Vec<NodeId>) {
    let list = doc.create_element(Size::new(100.0, 10.0 * rows as f64));
    doc.append_child(parent, list).unwrap();
    let rows = (0..rows)
        .map(|_| {
            let row = doc.create_element(Size::new(100.0, 10.0));
            doc.set_attribute(row, tags::DRAGGABLE, "true").unwrap();
            doc.append_child(list, row).unwrap();
            row
        })
        .collect();
    (list, rows)
}

struct Fixture {
    doc: Document,
    list: NodeId,
    rows: Vec<NodeId>,
    ctx: DragContext<Document>,
    journal: Journal,
}

impl Fixture {
    fn new(options: Options<NodeId>) -> Self {
        let mut doc = Document::new(Size::new(100.0, 100.0));
        let root = doc.root();
        let (list, rows) = list(&mut doc, root, 4);
        let (options, journal) = recording(options);
        let ctx = DragContext::new(&mut doc, Some(list), Some(options));
        Self {
            doc,
            list,
            rows,
            ctx,
            journal,
        }
    }

    fn send(&mut self, kind: PointerEventKind, x: f64, y: f64) -> PointerEvent<NodeId> {
        dispatch_at(&mut self.doc, &mut [&mut self.ctx], kind, Point::new(x, y))
    }

    fn press_on(&mut self, row: usize) -> PointerEvent<NodeId> {
        let element = self.rows[row];
        let center = self.doc.bounding_rect(element).center();
        let mut event = PointerEvent::new(PointerEventKind::Down, center).with_target(element);
        dispatch(&mut self.doc, &mut [&mut self.ctx], &mut event);
        event
    }

    fn order(&self) -> Vec<NodeId> {
        self.doc.children_of(self.list).to_vec()
    }

    fn rows_in(&self, order: [usize; 4]) -> Vec<NodeId> {
        order.iter().map(|&i| self.rows[i]).collect()
    }

    fn journal(&self) -> Vec<Log> {
        self.journal.borrow().clone()
    }
}

#[test]
fn release_in_lower_half_moves_after_target() {
    let mut f = Fixture::new(Options::new("rows"));
    f.send(PointerEventKind::Down, 50.0, 5.0);
    f.send(PointerEventKind::Move, 50.0, 17.0);
    f.send(PointerEventKind::Up, 50.0, 17.0);

    assert_eq!(f.order(), f.rows_in([1, 2, 0, 3]));
    assert_eq!(
        f.journal(),
        vec![
            Log::Start(0),
            Log::Enter(2, true),
            Log::Drop(0, 2, true),
            Log::End
        ]
    );
    assert!(!f.ctx.is_picked());
}

#[test]
fn release_in_upper_half_moves_before_target() {
    let mut f = Fixture::new(Options::new("rows"));
    f.send(PointerEventKind::Down, 50.0, 5.0);
    f.send(PointerEventKind::Move, 50.0, 12.0);
    f.send(PointerEventKind::Up, 50.0, 12.0);

    assert_eq!(f.order(), f.rows_in([1, 0, 2, 3]));
    assert_eq!(
        f.journal(),
        vec![
            Log::Start(0),
            Log::Enter(2, false),
            Log::Drop(0, 2, false),
            Log::End
        ]
    );
}

#[test]
fn pointer_exactly_on_the_middle_counts_as_above() {
    let mut f = Fixture::new(Options::new("rows").clone_picked_element(false));
    f.send(PointerEventKind::Down, 50.0, 5.0);
    f.send(PointerEventKind::Move, 50.0, 15.0);
    f.send(PointerEventKind::Up, 50.0, 15.0);

    assert_eq!(f.order(), f.rows_in([1, 0, 2, 3]));
    assert!(f.journal().contains(&Log::Drop(0, 2, false)));
}

#[test]
fn without_placeholder_drop_inserts_relative_to_target() {
    let mut below = Fixture::new(Options::new("rows").clone_picked_element(false));
    below.send(PointerEventKind::Down, 50.0, 5.0);
    below.send(PointerEventKind::Move, 50.0, 17.0);
    assert_eq!(below.ctx.placeholder(), None);
    below.send(PointerEventKind::Up, 50.0, 17.0);
    assert_eq!(below.order(), below.rows_in([1, 2, 0, 3]));

    let mut above = Fixture::new(Options::new("rows").clone_picked_element(false));
    above.send(PointerEventKind::Down, 50.0, 5.0);
    above.send(PointerEventKind::Move, 50.0, 12.0);
    above.send(PointerEventKind::Up, 50.0, 12.0);
    assert_eq!(above.order(), above.rows_in([1, 0, 2, 3]));
}

#[test]
fn last_row_can_move_to_the_front() {
    let mut f = Fixture::new(Options::new("rows"));
    f.send(PointerEventKind::Down, 50.0, 35.0);
    // The first row spans 0..10 and the lifted fourth row is hidden while hit testing.
    f.send(PointerEventKind::Move, 50.0, 2.0);
    f.send(PointerEventKind::Up, 50.0, 2.0);

    assert_eq!(f.order(), f.rows_in([3, 0, 1, 2]));
    assert!(f.journal().contains(&Log::Drop(3, 0, false)));
}

#[test]
fn enter_and_leave_alternate() {
    let mut f = Fixture::new(Options::new("rows"));
    f.send(PointerEventKind::Down, 50.0, 5.0);
    for y in [17.0, 17.0, 18.0, 35.0, 36.0, 80.0, 80.0, 5.0, 90.0] {
        f.send(PointerEventKind::Move, 50.0, y);
    }
    f.send(PointerEventKind::Up, 50.0, 90.0);

    let mut current = None;
    for entry in f.journal() {
        match entry {
            Log::Enter(i, _) => {
                assert_eq!(current, None, "entered {i} without leaving {current:?}");
                current = Some(i);
            }
            Log::Leave(i, _) => {
                assert_eq!(current, Some(i), "left {i} without entering it");
                current = None;
            }
            _ => {}
        }
    }
    assert_eq!(current, None, "the drag ended outside every target");
    let enters = f
        .journal()
        .iter()
        .filter(|e| matches!(e, Log::Enter(..)))
        .count();
    assert_eq!(enters, 3, "third row, fourth row, then the second row");
}

#[test]
fn release_outside_any_target_changes_nothing() {
    let mut f = Fixture::new(Options::new("rows").visible_clone(true));
    let before = f.order();
    let listeners = f.doc.listener_count();

    f.send(PointerEventKind::Down, 50.0, 5.0);
    f.send(PointerEventKind::Move, 50.0, 17.0);
    let placeholder = f.ctx.placeholder().unwrap();
    f.send(PointerEventKind::Move, 50.0, 80.0);
    assert!(!f.doc.contains(f.list, placeholder));
    f.send(PointerEventKind::Up, 50.0, 80.0);

    assert_eq!(f.order(), before);
    assert!(!f.doc.is_alive(placeholder));
    assert_eq!(f.doc.listener_count(), listeners);
    let journal = f.journal();
    assert!(!journal.iter().any(|e| matches!(e, Log::Drop(..))));
    assert_eq!(journal.last(), Some(&Log::End));

    let a = f.rows[0];
    assert_eq!(f.doc.style(a), Some(&Default::default()));
    assert!(!f.doc.has_attribute(a, tags::PICKED));
}

#[test]
fn second_press_during_a_drag_is_ignored() {
    let mut f = Fixture::new(Options::new("rows"));
    f.press_on(0);
    f.press_on(2);

    assert_eq!(f.ctx.picked().map(|p| p.index()), Some(0));
    assert!(!f.doc.has_attribute(f.rows[2], tags::PICKED));
    assert_eq!(f.journal(), vec![Log::Start(0)]);
    let picked = f.ctx.items().iter().filter(|i| f.doc.has_attribute(i.element(), tags::PICKED));
    assert_eq!(picked.count(), 1);
}

#[test]
fn ineligible_rows_are_never_picked() {
    let mut f = Fixture::new(Options::new("rows"));
    f.doc.set_attribute(f.rows[0], tags::DISABLED, "").unwrap();
    f.doc.set_attribute(f.rows[1], tags::DRAGGABLE, "false").unwrap();
    f.doc.remove_attribute(f.rows[2], tags::DRAGGABLE).unwrap();

    for row in 0..3 {
        f.press_on(row);
        assert!(!f.ctx.is_picked(), "row {row} should not be draggable");
        assert_eq!(f.doc.style(f.rows[row]), Some(&Default::default()));
    }
    assert!(f.journal().is_empty());

    assert!(f.ctx.items()[3].can_drag(&f.doc));
    f.press_on(3);
    assert!(f.ctx.is_picked());
}

#[test]
fn lifted_row_is_pinned_raised_and_follows_the_pointer() {
    let mut f = Fixture::new(Options::new("rows"));
    f.send(PointerEventKind::Down, 50.0, 5.0);
    let a = f.rows[0];

    let style = f.doc.style(a).unwrap().clone();
    assert_eq!(
        style.position,
        Position::Fixed {
            origin: Point::ZERO
        }
    );
    assert_eq!(style.z_index, Some(LIFTED_Z_INDEX));
    assert!(style.flags.contains(StyleFlags::NO_USER_SELECT));
    assert!(f.doc.has_attribute(a, tags::PICKED));
    assert_eq!(
        f.ctx.picked().unwrap().initial_pointer_position(),
        Some(Point::new(50.0, 5.0))
    );

    f.send(PointerEventKind::Move, 70.0, 17.0);
    assert_eq!(f.doc.style(a).unwrap().translate, Vec2::new(20.0, 12.0));
    assert!(!f.doc.style(a).unwrap().flags.contains(StyleFlags::DISPLAY_NONE));
}

#[test]
fn restricted_axes_stay_put() {
    let mut f = Fixture::new(Options::new("rows").restrict_x(true));
    f.send(PointerEventKind::Down, 50.0, 5.0);
    f.send(PointerEventKind::Move, 70.0, 17.0);
    assert_eq!(f.doc.style(f.rows[0]).unwrap().translate, Vec2::new(0.0, 12.0));

    let mut f = Fixture::new(Options::new("rows").restrict_y(true));
    f.send(PointerEventKind::Down, 50.0, 5.0);
    f.send(PointerEventKind::Move, 70.0, 17.0);
    assert_eq!(f.doc.style(f.rows[0]).unwrap().translate, Vec2::new(20.0, 0.0));
}

#[test]
fn placeholder_is_a_tagged_copy_that_previews_the_slot() {
    let mut f = Fixture::new(Options::new("rows").deep_clone(true));
    let child = f.doc.create_element(Size::new(10.0, 5.0));
    f.doc.append_child(f.rows[0], child).unwrap();

    f.send(PointerEventKind::Down, 50.0, 5.0);
    let placeholder = f.ctx.placeholder().unwrap();
    assert!(f.doc.parent_of(placeholder).is_none(), "detached until a target is found");
    assert!(f.doc.has_attribute(placeholder, tags::CLONE));
    assert!(!f.doc.has_attribute(placeholder, tags::DRAGGABLE));
    assert!(!f.doc.has_attribute(placeholder, tags::PICKED));
    assert_eq!(f.doc.children_of(placeholder).len(), 1);
    let style = f.doc.style(placeholder).unwrap();
    assert!(style.flags.contains(StyleFlags::HIDDEN));
    assert_eq!(style.position, Position::Static);

    f.send(PointerEventKind::Move, 50.0, 17.0);
    let [_, b, c, d] = f.rows[..] else {
        unreachable!()
    };
    assert_eq!(f.order(), vec![f.rows[0], b, c, placeholder, d]);
    assert_eq!(f.ctx.target().map(|t| t.element()), Some(c));

    // Moving over the placeholder itself keeps the target.
    f.send(PointerEventKind::Move, 50.0, 25.0);
    assert_eq!(f.ctx.target().map(|t| t.element()), Some(c));
    assert_eq!(f.journal().len(), 2);
}

#[test]
fn shallow_visible_placeholder() {
    let mut f = Fixture::new(Options::new("rows").visible_clone(true));
    let child = f.doc.create_element(Size::new(10.0, 5.0));
    f.doc.append_child(f.rows[0], child).unwrap();

    f.send(PointerEventKind::Down, 50.0, 5.0);
    let placeholder = f.ctx.placeholder().unwrap();
    assert!(f.doc.children_of(placeholder).is_empty());
    assert!(!f.doc.style(placeholder).unwrap().flags.contains(StyleFlags::HIDDEN));
}

#[test]
fn context_menu_during_a_drag_ends_it() {
    let mut f = Fixture::new(Options::new("rows"));
    let idle = f.send(PointerEventKind::ContextMenu, 50.0, 5.0);
    assert!(!idle.default_prevented, "idle contexts leave the menu alone");

    f.send(PointerEventKind::Down, 50.0, 5.0);
    f.send(PointerEventKind::Move, 50.0, 17.0);
    let menu = f.send(PointerEventKind::ContextMenu, 50.0, 17.0);
    assert!(menu.default_prevented);
    assert!(!f.ctx.is_picked());
    assert_eq!(f.order(), f.rows_in([1, 2, 0, 3]));
    assert_eq!(f.journal().last(), Some(&Log::End));
}

#[test]
fn native_drag_start_on_a_row_is_suppressed() {
    let mut f = Fixture::new(Options::new("rows"));
    let native = f.send(PointerEventKind::NativeDragStart, 50.0, 25.0);
    assert!(native.default_prevented);
    assert!(!f.ctx.is_picked());

    let outside = f.send(PointerEventKind::NativeDragStart, 50.0, 80.0);
    assert!(!outside.default_prevented);
}

#[test]
fn registration_tags_container_and_rows() {
    let f = Fixture::new(Options::new("rows"));
    assert_eq!(f.doc.attribute(f.list, tags::CONTEXT), Some("rows"));
    for (i, &row) in f.rows.iter().enumerate() {
        assert_eq!(f.doc.attribute(row, tags::CONTEXT), Some("rows"));
        assert_eq!(f.doc.attribute(row, tags::INDEX), Some(i.to_string().as_str()));
        let item = f.ctx.item_for(row).unwrap();
        assert_eq!(item.index(), i);
        assert_eq!(item.y(&f.doc), 10.0 * i as f64);
        assert_eq!(item.height(&f.doc), 10.0);
        assert_eq!(item.width(&f.doc), 100.0);
    }
    // Three document subscriptions plus press and native drag start per row.
    assert_eq!(f.doc.listener_count(), 3 + 2 * 4);
    assert_eq!(f.ctx.context_name(), Some("rows"));
}

#[test]
fn drag_data_is_readable_from_callbacks() {
    let seen: Rc<RefCell<Option<String>>> = Rc::default();
    let sink = seen.clone();
    let mut doc = Document::new(Size::new(100.0, 100.0));
    let root = doc.root();
    let (list, rows) = list(&mut doc, root, 2);
    doc.set_attribute(rows[1], tags::DRAG_DATA, r#"{"id":7}"#).unwrap();

    let options = Options::new("rows").on_drop(move |e| {
        *sink.borrow_mut() = Some(format!("{}->{}", e.picked.index(), e.target.index()));
    });
    let mut ctx = DragContext::new(&mut doc, Some(list), Some(options));
    assert_eq!(ctx.items()[1].data(&doc), Some(r#"{"id":7}"#));
    assert_eq!(ctx.items()[0].data(&doc), None);

    dispatch_at(&mut doc, &mut [&mut ctx], PointerEventKind::Down, Point::new(50.0, 15.0));
    dispatch_at(&mut doc, &mut [&mut ctx], PointerEventKind::Move, Point::new(50.0, 2.0));
    dispatch_at(&mut doc, &mut [&mut ctx], PointerEventKind::Up, Point::new(50.0, 2.0));
    assert_eq!(seen.borrow().as_deref(), Some("1->0"));
    assert_eq!(doc.children_of(list), &[rows[1], rows[0]]);
}

#[test]
fn refresh_reindexes_from_live_children() {
    let mut f = Fixture::new(Options::new("rows"));
    let listeners = f.doc.listener_count();

    f.ctx.refresh(&mut f.doc);
    f.ctx.refresh(&mut f.doc);
    assert_eq!(f.doc.listener_count(), listeners);
    let elements: Vec<_> = f.ctx.items().iter().map(|i| i.element()).collect();
    assert_eq!(elements, f.rows);

    f.send(PointerEventKind::Down, 50.0, 5.0);
    f.send(PointerEventKind::Move, 50.0, 17.0);
    f.send(PointerEventKind::Up, 50.0, 17.0);
    // Indices are those of registration time until the next refresh.
    assert_eq!(f.doc.attribute(f.rows[0], tags::INDEX), Some("0"));

    f.ctx.refresh(&mut f.doc);
    let order = f.order();
    for (i, item) in f.ctx.items().iter().enumerate() {
        assert_eq!(item.index(), i);
        assert_eq!(item.element(), order[i]);
    }
    assert_eq!(f.doc.attribute(f.rows[0], tags::INDEX), Some("2"));
    assert_eq!(f.doc.listener_count(), listeners);
}

#[test]
fn refresh_picks_up_new_rows() {
    let mut f = Fixture::new(Options::new("rows"));
    let extra = f.doc.create_element(Size::new(100.0, 10.0));
    f.doc.set_attribute(extra, tags::DRAGGABLE, "").unwrap();
    f.doc.append_child(f.list, extra).unwrap();

    f.ctx.refresh(&mut f.doc);
    assert_eq!(f.ctx.items().len(), 5);
    assert_eq!(f.ctx.item_for(extra).map(|i| i.index()), Some(4));

    f.send(PointerEventKind::Down, 50.0, 45.0);
    assert_eq!(f.ctx.picked().map(|p| p.element()), Some(extra));
}

#[test]
fn refresh_during_a_drag_is_ignored() {
    let mut f = Fixture::new(Options::new("rows"));
    f.send(PointerEventKind::Down, 50.0, 5.0);
    f.ctx.refresh(&mut f.doc);
    assert!(f.ctx.is_picked());
    assert_eq!(f.ctx.items().len(), 4);
    f.send(PointerEventKind::Move, 50.0, 17.0);
    f.send(PointerEventKind::Up, 50.0, 17.0);
    assert_eq!(f.order(), f.rows_in([1, 2, 0, 3]));
}

#[test]
fn destroy_releases_every_subscription() {
    let mut f = Fixture::new(Options::new("rows"));
    f.ctx.destroy(&mut f.doc);
    assert_eq!(f.doc.listener_count(), 0);
    assert!(f.ctx.is_inert());
    assert!(f.ctx.items().is_empty());

    f.send(PointerEventKind::Down, 50.0, 5.0);
    assert!(!f.ctx.is_picked());
    assert!(f.journal().is_empty());
}

#[test]
fn destroy_mid_drag_restores_the_tree() {
    let mut f = Fixture::new(Options::new("rows"));
    let before = f.order();
    f.send(PointerEventKind::Down, 50.0, 5.0);
    f.send(PointerEventKind::Move, 50.0, 17.0);
    let placeholder = f.ctx.placeholder().unwrap();

    f.ctx.destroy(&mut f.doc);
    assert_eq!(f.order(), before);
    assert!(!f.doc.is_alive(placeholder));
    assert_eq!(f.doc.style(f.rows[0]), Some(&Default::default()));
    assert_eq!(f.journal(), vec![Log::Start(0), Log::Enter(2, true)]);
    assert_eq!(f.ctx.state(), &DragState::Idle);
}

#[test]
fn contexts_do_not_see_each_others_rows() {
    let mut doc = Document::new(Size::new(100.0, 100.0));
    let root = doc.root();
    let (left, left_rows) = list(&mut doc, root, 4);
    let (right, right_rows) = list(&mut doc, root, 4);
    let (left_options, left_log) = recording(Options::new("left"));
    let (right_options, right_log) = recording(Options::new("right"));
    let mut l = DragContext::new(&mut doc, Some(left), Some(left_options));
    let mut r = DragContext::new(&mut doc, Some(right), Some(right_options));

    // Lift a left row and drag it over the right list (y 40..80).
    for (kind, y) in [
        (PointerEventKind::Down, 5.0),
        (PointerEventKind::Move, 55.0),
        (PointerEventKind::Up, 55.0),
    ] {
        dispatch_at(&mut doc, &mut [&mut l, &mut r], kind, Point::new(50.0, y));
    }

    assert_eq!(doc.children_of(left), left_rows.as_slice());
    assert_eq!(doc.children_of(right), right_rows.as_slice());
    assert_eq!(*left_log.borrow(), vec![Log::Start(0), Log::End]);
    assert!(right_log.borrow().is_empty());
}

#[test]
fn incomplete_inputs_yield_an_inert_context() {
    let mut doc = Document::new(Size::new(100.0, 100.0));
    let root = doc.root();
    let (list, _) = list(&mut doc, root, 2);

    assert_eq!(
        DragContext::try_new(&mut doc, None, Some(Options::new("x"))).unwrap_err(),
        Error::MissingContainer
    );
    assert_eq!(
        DragContext::try_new(&mut doc, Some(list), None).unwrap_err(),
        Error::MissingOptions
    );
    assert_eq!(
        DragContext::try_new(&mut doc, Some(list), Some(Options::default())).unwrap_err(),
        Error::MissingContextName
    );
    assert_eq!(
        DragContext::try_new(&mut doc, Some(list), Some(Options::new(""))).unwrap_err(),
        Error::EmptyContextName
    );

    let mut ctx = DragContext::new(&mut doc, Some(list), Some(Options::new("")));
    assert!(ctx.is_inert());
    assert!(ctx.items().is_empty());
    assert_eq!(doc.listener_count(), 0);
    assert!(!doc.has_attribute(list, tags::CONTEXT));

    // Even a handle delivered by hand is ignored.
    let stray = doc.listen(sortable_dom::Scope::Document, sortable_dom::EventKind::PointerDown);
    let mut event = PointerEvent::new(PointerEventKind::Down, Point::new(5.0, 5.0));
    ctx.handle_event(&mut doc, stray, &mut event);
    assert!(!ctx.is_picked());
    assert!(!ctx.owns(stray));
}
