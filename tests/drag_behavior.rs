use hamsterhouse::catalog;
use hamsterhouse::design::Position;
use hamsterhouse::surface::{tags, VisualSurface};
mod common;

fn placed(s: &mut common::Session, category: &str, item: &str) -> hamsterhouse::surface::NodeId {
    assert!(s.controller.toggle_furnishing(category, item, true));
    s.controller.advance(common::ms(100));
    s.controller.sync().furnishing_node(item).expect("node placed")
}

#[test]
fn drag_outside_the_house_clamps_and_snaps() {
    let mut s = common::session();
    let node = placed(&mut s, "outside", "exercise-wheel");
    let origin = s.controller.sync().surface().position(node).unwrap();

    assert!(s.controller.pointer_down(node, Position::new(origin.x + 10.0, origin.y + 10.0)));
    let moved = s.controller.pointer_move(Position::new(5_000.0, -700.0)).unwrap();
    assert_eq!(moved, Position::new(360.0, 0.0));

    let release = s.controller.pointer_up().expect("release");
    assert_eq!(release.position, Position::new(360.0, 0.0));
    assert_eq!(release.furnishing, "exercise-wheel");
    assert_eq!(s.controller.spoken().last().map(String::as_str), Some(catalog::PLACEMENT_DONE));
}

#[test]
fn resting_positions_are_grid_multiples_inside_bounds() {
    let mut s = common::session();
    let node = placed(&mut s, "bedroom", "hammock");
    let pointers = [
        (13.0, 17.0),
        (-3.0, 299.0),
        (399.0, 151.0),
        (185.5, 95.2),
        (10_000.0, 10_000.0),
    ];
    for (x, y) in pointers {
        let origin = s.controller.sync().surface().position(node).unwrap();
        assert!(s.controller.pointer_down(node, origin));
        s.controller.pointer_move(Position::new(x, y));
        let at = s.controller.pointer_up().unwrap().position;
        assert!((0.0..=370.0).contains(&at.x), "{:?}", at);
        assert!((0.0..=270.0).contains(&at.y), "{:?}", at);
        assert_eq!(at.x % 20.0, 0.0, "{:?}", at);
        assert_eq!(at.y % 20.0, 0.0, "{:?}", at);
    }
}

#[test]
fn grid_and_node_are_marked_only_while_dragging() {
    let mut s = common::session();
    let node = placed(&mut s, "eating", "food-bowl");
    let grid = s.controller.sync().scaffold().placement_grid;

    s.controller.pointer_down(node, Position::new(50.0, 50.0));
    assert_eq!(s.controller.sync().surface().tag(grid, tags::STATE), Some("active"));
    assert_eq!(s.controller.sync().surface().tag(node, tags::STATE), Some("dragging"));

    s.controller.pointer_up();
    assert_eq!(s.controller.sync().surface().tag(grid, tags::STATE), None);
    assert_eq!(s.controller.sync().surface().tag(node, tags::STATE), None);
}

#[test]
fn release_and_move_while_idle_do_nothing() {
    let mut s = common::session();
    let node = placed(&mut s, "bedroom", "tunnel");
    let before = s.controller.sync().surface().position(node).unwrap();
    let spoken = s.controller.spoken().len();

    assert!(s.controller.pointer_move(Position::new(0.0, 0.0)).is_none());
    assert!(s.controller.pointer_up().is_none());
    assert_eq!(s.controller.sync().surface().position(node).unwrap(), before);
    assert_eq!(s.controller.spoken().len(), spoken);
}

#[test]
fn only_furnishings_can_be_grabbed() {
    let mut s = common::session();
    let mascot = s.controller.sync().scaffold().mascot;
    assert!(!s.controller.pointer_down(mascot, Position::new(1.0, 1.0)));
    assert!(!s.controller.sync().drag_state().is_dragging());
}

#[test]
fn second_press_during_a_drag_is_ignored() {
    let mut s = common::session();
    let first = placed(&mut s, "bedroom", "tunnel");
    let second = placed(&mut s, "bedroom", "hideout");
    assert!(s.controller.pointer_down(first, Position::new(0.0, 0.0)));
    assert!(!s.controller.pointer_down(second, Position::new(0.0, 0.0)));
    assert_eq!(s.controller.pointer_up().unwrap().node, first);
}

#[test]
fn removing_the_dragged_item_ends_the_drag() {
    let mut s = common::session();
    let node = placed(&mut s, "outside", "litter-box");
    assert!(s.controller.pointer_down(node, Position::new(30.0, 30.0)));
    s.controller.toggle_furnishing("outside", "litter-box", false);
    assert!(!s.controller.sync().drag_state().is_dragging());
    assert!(s.controller.pointer_up().is_none());
    let grid = s.controller.sync().scaffold().placement_grid;
    assert_eq!(s.controller.sync().surface().tag(grid, tags::STATE), None);
}
