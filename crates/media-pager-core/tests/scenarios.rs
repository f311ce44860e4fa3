//! End-to-end gesture scenarios driven through `PagerTestRule`.

use media_pager_core::{DragResponse, Rotation};
use media_pager_testing::robot_assertions::{assert_approx_eq, assert_at_rest};
use media_pager_testing::{FakeMediaSource, PagerTestRule};

#[test]
fn dragging_past_the_threshold_moves_focus_forward() {
    let mut rule = PagerTestRule::carousel(10);
    rule.begin();

    let response = rule.drag_by_normalized(-0.6);
    match response {
        DragResponse::Moved {
            delta,
            jumped,
            rotations,
        } => {
            assert_approx_eq(delta, -0.6, 1e-5, "applied delta");
            assert_eq!(jumped, 0);
            assert_eq!(rotations.as_slice(), &[Rotation::Forward]);
        }
        other => panic!("expected a move, got {other:?}"),
    }
    assert_eq!(rule.focused_index(), 1);
    assert_eq!(rule.observer().notifications(), vec![1]);
    assert_eq!(rule.indices(), [0, 1, 2]);
    assert_approx_eq(rule.positions()[1], 0.4, 1e-5, "new middle position");
}

#[test]
fn linear_first_item_refuses_to_reveal_a_previous_item() {
    let mut rule = PagerTestRule::linear(3);
    rule.begin();

    let response = rule.drag_by_normalized(0.3);
    assert_eq!(
        response,
        DragResponse::Moved {
            delta: 0.0,
            jumped: 0,
            rotations: Default::default()
        }
    );
    assert_eq!(rule.positions()[1], 0.0);
    assert!(rule.observer().notifications().is_empty());
}

#[test]
fn linear_last_item_refuses_to_reveal_a_next_item() {
    let mut rule = PagerTestRule::linear(2);
    rule.swipe(-0.6, -500.0);
    rule.settle();
    assert_eq!(rule.focused_index(), 1);

    rule.begin();
    rule.drag_by_normalized(-0.4);
    assert_eq!(rule.positions()[1], 0.0);
    rule.release(-500.0);
    rule.settle();
    assert_eq!(rule.focused_index(), 1);
    assert_at_rest(rule.engine(), "after pushing past the last item");
}

#[test]
fn oversized_linear_drag_stops_at_the_last_item() {
    let mut rule = PagerTestRule::linear(3);
    rule.begin();
    rule.drag_by_normalized(-5.0);
    assert_eq!(rule.focused_index(), 2);
    assert_eq!(rule.observer().notifications(), vec![1, 2]);
    assert_eq!(rule.positions()[1], 0.0);
}

#[test]
fn slow_short_release_settles_back() {
    let mut rule = PagerTestRule::carousel(10);
    rule.begin();
    rule.drag_by_normalized(0.05);

    match rule.release(0.0) {
        DragResponse::Released { snap_delta, .. } => {
            assert_approx_eq(snap_delta, -0.05, 1e-5, "settle-back delta")
        }
        other => panic!("expected a release, got {other:?}"),
    }
    rule.settle();
    assert_eq!(rule.focused_index(), 0);
    assert!(rule.observer().notifications().is_empty());
    assert_at_rest(rule.engine(), "after settling back");
}

#[test]
fn flick_toward_next_commits_to_it() {
    let mut rule = PagerTestRule::carousel(10);
    rule.begin();
    rule.drag_by_normalized(-0.2);
    let next_position = rule.positions()[2];

    match rule.release(-20.0) {
        DragResponse::Released { snap_delta, .. } => {
            assert_approx_eq(snap_delta, -next_position, 1e-5, "snap to next")
        }
        other => panic!("expected a release, got {other:?}"),
    }
    assert!(rule.observer().notifications().is_empty());

    let frames = rule.settle();
    assert!(frames > 1, "snap should animate over several frames");
    assert_eq!(rule.focused_index(), 1);
    assert_eq!(rule.observer().notifications(), vec![1]);
    assert_at_rest(rule.engine(), "after committing to next");
}

#[test]
fn flick_against_the_drag_direction_settles_back() {
    let mut rule = PagerTestRule::carousel(10);
    rule.begin();
    rule.drag_by_normalized(0.3);
    rule.release(-400.0);
    rule.settle();
    assert_eq!(rule.focused_index(), 0);
    assert_at_rest(rule.engine(), "after a contrary flick");
}

#[test]
fn backward_swipe_wraps_in_carousel() {
    let mut rule = PagerTestRule::carousel(4);
    rule.swipe(0.3, 600.0);
    rule.settle();
    assert_eq!(rule.focused_index(), 3);
    assert_eq!(rule.indices(), [-2, -1, 0]);
    assert_eq!(rule.observer().notifications(), vec![3]);
}

#[test]
fn cancelled_drag_still_snaps() {
    let mut rule = PagerTestRule::carousel(5);
    rule.begin();
    rule.drag_by_normalized(-0.45);
    rule.cancel();
    rule.settle();
    assert_eq!(rule.focused_index(), 0);
    assert_at_rest(rule.engine(), "after cancel");
}

#[test]
fn late_fetch_for_a_recycled_slot_is_ignored() {
    let mut rule = PagerTestRule::carousel(10);
    let late = rule.source().take(9).expect("index 9 requested at start");
    let recycled = rule.engine().window().previous().id();

    rule.begin();
    rule.drag_by_normalized(-0.6);
    assert_eq!(rule.engine().window().slot(recycled).index(), 2);

    late.complete(9, Some(FakeMediaSource::image_for(9)));
    assert_eq!(rule.engine_mut().pump_content(), 0);
    assert!(rule.engine().window().slot(recycled).content().is_none());

    rule.deliver_all();
    assert_eq!(
        rule.engine().window().slot(recycled).content().cloned(),
        Some(FakeMediaSource::image_for(2))
    );
}

#[test]
fn out_of_order_deliveries_land_in_their_slots() {
    let mut rule = PagerTestRule::carousel(10);
    assert_eq!(rule.source().complete_all_reversed(), 3);
    assert_eq!(rule.engine_mut().pump_content(), 3);

    let count = rule.engine().item_count();
    for slot in rule.engine().slots() {
        let expected = FakeMediaSource::image_for(slot.effective_index(count));
        assert_eq!(slot.content(), Some(&expected));
    }
}

#[test]
fn frames_pump_pending_deliveries() {
    let mut rule = PagerTestRule::carousel(3);
    assert!(rule.source().complete(0));
    assert!(!rule.advance(media_pager_testing::testing::FRAME));
    assert_eq!(
        rule.engine().window().middle().content().cloned(),
        Some(FakeMediaSource::image_for(0))
    );
}

#[test]
fn count_changes_are_read_at_each_decision() {
    let mut rule = PagerTestRule::linear(5);
    rule.swipe(-0.6, -500.0);
    rule.settle();
    assert_eq!(rule.focused_index(), 1);

    rule.source().set_count(2);
    rule.begin();
    rule.drag_by_normalized(-0.7);
    assert_eq!(rule.positions()[1], 0.0, "index 1 is now the last item");
}
