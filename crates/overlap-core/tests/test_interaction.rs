use overlap_core::geometry::Point;
use overlap_core::interaction::{hit_test, nudge, Direction, DragController, DragState};
use overlap_core::slot::SlotId;
use overlap_core::store::PlacementStore;

mod common;

fn two_image_store() -> PlacementStore {
    let mut store = common::square_store(100.0);
    store
        .set_image(SlotId::A, common::solid_image(100, 100, [0, 0, 0, 255]))
        .unwrap();
    store
        .set_image(SlotId::B, common::solid_image(40, 40, [0, 0, 0, 255]))
        .unwrap();
    store
}

fn position(store: &PlacementStore, id: SlotId) -> Point {
    store.slot(id).unwrap().position().unwrap()
}

#[test]
fn test_drag_moves_by_pointer_displacement() {
    let mut store = two_image_store();
    let mut drag = DragController::new();

    assert!(drag.pointer_down(&mut store, SlotId::A, Point::new(10.0, 10.0)));
    assert_eq!(store.selected(), Some(SlotId::A));
    assert!(drag.is_dragging());

    assert!(drag.pointer_move(&mut store, Point::new(25.0, 5.0)));
    assert_eq!(position(&store, SlotId::A), Point::new(15.0, -5.0));

    // Displacement is measured from the gesture start, not the last move.
    assert!(drag.pointer_move(&mut store, Point::new(12.0, 12.0)));
    assert_eq!(position(&store, SlotId::A), Point::new(2.0, 2.0));

    drag.pointer_up();
    assert_eq!(drag.state(), DragState::Idle);
    assert!(!drag.pointer_move(&mut store, Point::new(90.0, 90.0)));
    assert_eq!(position(&store, SlotId::A), Point::new(2.0, 2.0));
}

#[test]
fn test_drag_updates_intersection() {
    let mut store = two_image_store();
    let mut drag = DragController::new();
    let before = store.intersection().unwrap();
    assert_eq!(before.width(), 40.0);

    drag.pointer_down(&mut store, SlotId::B, Point::new(50.0, 50.0));
    drag.pointer_move(&mut store, Point::new(90.0, 50.0));
    drag.pointer_up();

    let after = store.intersection().unwrap();
    assert_eq!(after.left, 70.0);
    assert_eq!(after.width(), 30.0);
}

#[test]
fn test_drag_on_invisible_slot_is_ignored() {
    let mut store = two_image_store();
    let mut drag = DragController::new();
    assert!(!drag.pointer_down(&mut store, SlotId::C, Point::ORIGIN));
    assert_eq!(drag.state(), DragState::Idle);
    assert_eq!(store.selected(), Some(SlotId::B));
}

#[test]
fn test_only_one_drag_at_a_time() {
    let mut store = two_image_store();
    let mut drag = DragController::new();
    assert!(drag.pointer_down(&mut store, SlotId::A, Point::ORIGIN));
    assert!(!drag.pointer_down(&mut store, SlotId::B, Point::ORIGIN));
    assert_eq!(drag.dragging_slot(), Some(SlotId::A));
    assert_eq!(store.selected(), Some(SlotId::A));
}

#[test]
fn test_nudge_moves_selected_slot() {
    let mut store = two_image_store();
    let start = position(&store, SlotId::B);

    assert!(nudge(&mut store, Direction::Right, 10.0));
    assert!(nudge(&mut store, Direction::Up, 10.0));
    assert_eq!(position(&store, SlotId::B), start.offset(10.0, -10.0));

    assert!(nudge(&mut store, Direction::Left, 1.0));
    assert!(nudge(&mut store, Direction::Down, 1.0));
    assert_eq!(position(&store, SlotId::B), start.offset(9.0, -9.0));
    assert_eq!(position(&store, SlotId::A), Point::ORIGIN);
}

#[test]
fn test_nudge_without_selection_is_noop() {
    let mut store = common::square_store(100.0);
    assert!(!nudge(&mut store, Direction::Left, 10.0));
}

#[test]
fn test_hit_test_prefers_selected_then_topmost() {
    let mut store = two_image_store();
    // B (selected, 30..70) lies over A.
    assert_eq!(hit_test(&store, Point::new(50.0, 50.0)), Some(SlotId::B));
    assert_eq!(hit_test(&store, Point::new(5.0, 5.0)), Some(SlotId::A));

    store.select(SlotId::A);
    assert_eq!(hit_test(&store, Point::new(50.0, 50.0)), Some(SlotId::A));

    store.set_position(SlotId::A, Point::new(500.0, 500.0));
    assert_eq!(hit_test(&store, Point::new(50.0, 50.0)), Some(SlotId::B));
    assert_eq!(hit_test(&store, Point::new(5.0, 5.0)), None);
}

#[test]
fn test_direction_parsing() {
    assert_eq!("up".parse::<Direction>().unwrap(), Direction::Up);
    assert_eq!("LEFT".parse::<Direction>().unwrap(), Direction::Left);
    assert_eq!("r".parse::<Direction>().unwrap(), Direction::Right);
    assert!("sideways".parse::<Direction>().is_err());
}

#[test]
fn test_direction_display_parses_back() {
    for &dir in Direction::ALL {
        assert_eq!(dir.to_string().parse::<Direction>().unwrap(), dir);
    }
}

#[test]
fn test_nudges_in_every_direction_return_home() {
    let mut store = two_image_store();
    let start = position(&store, SlotId::B);
    for &dir in Direction::ALL {
        assert!(nudge(&mut store, dir, 7.5));
    }
    assert_eq!(position(&store, SlotId::B), start);
}
