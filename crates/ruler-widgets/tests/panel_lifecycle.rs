//! Ruler panel lifecycle tests
//!
//! Recording, the pinned play head, the scrub zone, context menus and the
//! idle-tick refresh logic, driven through the same harness as quick-play.

mod common;

use common::{Harness, QP_Y, SCRUB_Y};
use ruler_core::TransportCommand;
use ruler_widgets::{
    Gesture, IndicatorShape, MenuChoice, MouseButton, MouseEventState, PointerEvent,
    RulerCursor, RulerInput, RulerMenuAction, RulerNotification,
};

fn pinned_and_playing(h: &mut Harness) {
    h.scrubber.transporting_pinned = true;
    h.transport.audio_active = true;
}

// ═══════════════════════════════════════════════════════════════════════════════
// RECORDING
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_recording_cancels_gesture_and_blocks_new_ones() {
    let mut h = Harness::new(10.0, (2.0, 4.0));
    h.left_down(600);
    h.drag(800, false);
    assert_eq!(h.panel.mouse_event_state(), MouseEventState::SelectingRange);

    h.transport.capturing = true;
    {
        let (panel, mut ctx) = h.split();
        panel.on_audio_start_stop(&mut ctx, true, true);
    }
    assert!(h.panel.is_recording());
    assert!(h.panel.gesture().is_none());
    assert_eq!(h.region(), (2.0, 4.0));

    let result = h.left_down(300);
    assert!(!result.redraw);
    assert!(h.panel.gesture().is_none());

    let (panel, ctx) = h.split();
    let preview = panel.preview(&ctx, 300, QP_Y);
    assert_eq!(preview.tooltip, "Timeline actions disabled during recording");
    assert_eq!(preview.cursor, RulerCursor::Default);
}

#[test]
fn test_recording_stop_reenables_gestures() {
    let mut h = Harness::new(10.0, (2.0, 4.0));
    {
        let (panel, mut ctx) = h.split();
        panel.on_audio_start_stop(&mut ctx, true, true);
        panel.on_audio_start_stop(&mut ctx, true, false);
    }
    assert!(!h.panel.is_recording());

    h.left_down(600);
    assert_eq!(h.panel.mouse_event_state(), MouseEventState::ClickPending);
}

#[test]
fn test_playback_stop_resyncs_inactive_region() {
    let mut h = Harness::new(10.0, (2.0, 4.0));
    h.view.play_region.set_times(6.0, 8.0);
    let (panel, mut ctx) = h.split();
    panel.on_audio_start_stop(&mut ctx, false, false);
    assert_eq!(h.region(), (2.0, 4.0));
}

#[test]
fn test_capture_blocks_gestures_before_notification() {
    let mut h = Harness::new(10.0, (2.0, 4.0));
    h.transport.capturing = true;

    let result = h.left_down(600);
    assert!(!result.redraw);
    assert!(h.panel.gesture().is_none());
    assert_eq!(h.region(), (2.0, 4.0));
    assert!(h.transport.commands.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════════
// PINNED PLAY HEAD
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_playhead_drag_allowed_while_recording() {
    let mut h = Harness::new(10.0, (2.0, 4.0));
    pinned_and_playing(&mut h);
    {
        let (panel, mut ctx) = h.split();
        panel.on_audio_start_stop(&mut ctx, true, true);
    }

    // Pinned head sits at half of the 1000px track area
    h.left_down(500);
    assert!(matches!(h.panel.gesture(), Some(Gesture::Playhead(_))));
    {
        let (panel, ctx) = h.split();
        let preview = panel.preview(&ctx, 500, QP_Y);
        assert_eq!(preview.tooltip, "Record/Play head");
        assert_eq!(preview.cursor, RulerCursor::ResizeHorizontal);
    }

    h.drag(750, false);
    assert_eq!(h.panel.config().playhead.pinned_fraction, 0.75);
    // Only the release persists the new position
    assert!(h.panel.take_notifications().is_empty());

    h.left_up(750, false);
    let notifications = h.panel.take_notifications();
    assert_eq!(notifications.len(), 1);
    match &notifications[0] {
        RulerNotification::ConfigChanged(config) => {
            assert_eq!(config.playhead.pinned_fraction, 0.75)
        }
        other => panic!("unexpected notification {:?}", other),
    }
    // The region was never touched
    assert_eq!(h.region(), (2.0, 4.0));
}

#[test]
fn test_playhead_double_click_resets_fraction() {
    let mut config = ruler_core::RulerConfig::default();
    config.playhead.pinned_fraction = 0.3;
    let mut h = Harness::with_config(10.0, (2.0, 4.0), config);
    pinned_and_playing(&mut h);

    let result = h.press(
        PointerEvent::new(300, QP_Y)
            .with_button(MouseButton::Left)
            .with_double_click(true),
    );
    assert!(result.cancelled);
    assert!(h.panel.gesture().is_none());
    assert_eq!(h.panel.config().playhead.pinned_fraction, 0.5);
    assert_eq!(h.panel.take_notifications().len(), 1);
}

#[test]
fn test_playhead_cancel_restores_fraction() {
    let mut h = Harness::new(10.0, (2.0, 4.0));
    pinned_and_playing(&mut h);
    h.left_down(500);
    h.drag(900, false);
    h.cancel();
    assert_eq!(h.panel.config().playhead.pinned_fraction, 0.5);
}

#[test]
fn test_playhead_ignored_when_not_playing() {
    let mut h = Harness::new(10.0, (2.0, 4.0));
    h.scrubber.transporting_pinned = true;
    h.left_down(500);
    assert!(matches!(h.panel.gesture(), Some(Gesture::PlayRegion(_))));
}

#[test]
fn test_pinned_head_not_grabbed_from_scrub_zone() {
    let mut h = Harness::new(10.0, (2.0, 4.0));
    pinned_and_playing(&mut h);

    h.press(PointerEvent::new(500, SCRUB_Y).with_button(MouseButton::Left));
    assert!(matches!(h.panel.gesture(), Some(Gesture::Scrub(_))));
    assert_eq!(h.scrubber.marks, vec![(500, false, false)]);
    assert_eq!(h.panel.config().playhead.pinned_fraction, 0.5);
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCRUB ZONE
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_scrub_press_marks_start() {
    let mut h = Harness::new(10.0, (2.0, 4.0));
    let press = PointerEvent::new(300, SCRUB_Y).with_button(MouseButton::Left);
    let result = h.press(press);
    assert!(result.redraw);
    assert_eq!(h.scrubber.marks, vec![(300, false, false)]);
    assert!(matches!(h.panel.gesture(), Some(Gesture::Scrub(_))));

    {
        let (panel, ctx) = h.split();
        let preview = panel.preview(&ctx, 300, SCRUB_Y);
        assert_eq!(preview.message, "Drag to Seek. Release and move to Scrub.");
    }

    h.release(PointerEvent::new(300, SCRUB_Y).with_button(MouseButton::Left));
    assert!(h.panel.gesture().is_none());
    assert!(h.transport.commands.is_empty());
}

#[test]
fn test_scrub_refused_when_unavailable() {
    let mut h = Harness::new(10.0, (2.0, 4.0));
    h.scrubber.can_scrub = false;
    let result = h.press(PointerEvent::new(300, SCRUB_Y).with_button(MouseButton::Left));
    assert!(result.cancelled);
    assert!(h.panel.gesture().is_none());
    assert!(h.scrubber.marks.is_empty());
}

#[test]
fn test_scrub_cancel_stops_transport() {
    let mut h = Harness::new(10.0, (2.0, 4.0));
    h.press(PointerEvent::new(300, SCRUB_Y).with_button(MouseButton::Left));
    h.cancel();
    assert_eq!(h.scrubber.cancels, 1);
    assert!(!h.scrubber.has_mark);
    assert_eq!(h.transport.commands, vec![TransportCommand::Stop]);
}

#[test]
fn test_quick_play_press_pauses_marked_scrub() {
    let mut h = Harness::new(10.0, (2.0, 4.0));
    h.scrubber.has_mark = true;
    h.left_down(600);
    assert_eq!(h.transport.commands, vec![TransportCommand::Pause]);
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONTEXT MENU
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_right_click_requests_menu() {
    let mut h = Harness::new(10.0, (2.0, 4.0));
    h.press(PointerEvent::new(300, QP_Y).with_button(MouseButton::Right));
    assert_eq!(h.panel.mouse_event_state(), MouseEventState::None);

    let result = h.release(PointerEvent::new(300, QP_Y).with_button(MouseButton::Right));
    assert_eq!(result.menu, Some(MenuChoice::QuickPlay));
    assert_eq!(
        h.panel.take_notifications(),
        vec![RulerNotification::ShowMenu(MenuChoice::QuickPlay)]
    );
    assert_eq!(h.region(), (2.0, 4.0));
    assert!(h.transport.commands.is_empty());
    assert_eq!(h.panel.menu(MenuChoice::QuickPlay, &h.view).len(), 7);
    assert!(h.panel.menu(MenuChoice::Scrub, &h.view).is_empty());
}

#[test]
fn test_toggle_pinned_head_reaches_marked_scrubber() {
    let mut h = Harness::new(10.0, (2.0, 4.0));
    h.scrubber.has_mark = true;
    {
        let (panel, mut ctx) = h.split();
        panel.apply_menu_action(&mut ctx, RulerMenuAction::TogglePinnedHead);
    }
    assert!(h.panel.config().playhead.pinned);
    assert_eq!(h.scrubber.scroll_scrubbing, vec![true]);
    assert_eq!(h.panel.take_notifications().len(), 1);
}

#[test]
fn test_toggle_auto_scroll_updates_view_and_config() {
    let mut h = Harness::new(10.0, (2.0, 4.0));
    let (panel, mut ctx) = h.split();
    panel.apply_menu_action(&mut ctx, RulerMenuAction::ToggleAutoScroll);
    assert!(!h.view.update_track_indicator);
    assert!(!h.panel.config().display.auto_scroll);
}

#[test]
fn test_loop_menu_actions() {
    let mut h = Harness::new(10.0, (2.0, 4.0));
    {
        let (panel, mut ctx) = h.split();
        panel.apply_menu_action(&mut ctx, RulerMenuAction::TogglePlayRegion);
    }
    assert!(h.view.play_region.is_active());
    assert_eq!(h.region(), (2.0, 4.0));

    h.view.selection = ruler_core::SelectedRegion::new(5.0, 6.0);
    {
        let (panel, mut ctx) = h.split();
        panel.apply_menu_action(&mut ctx, RulerMenuAction::ClearPlayRegion);
    }
    assert!(!h.view.play_region.is_active());
    assert_eq!(h.region(), (5.0, 6.0));
    assert_eq!(h.view.play_region.last_active_bounds(), (-1.0, -1.0));

    // The cleared loop is no longer drawn
    let (panel, ctx) = h.split();
    assert!(panel.scene(&ctx).region.is_none());
}

// ═══════════════════════════════════════════════════════════════════════════════
// IDLE TICKS AND OVERLAYS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_idle_refresh_follows_view_changes() {
    let mut h = Harness::new(10.0, (2.0, 4.0));
    {
        let (panel, ctx) = h.split();
        assert!(panel.on_idle(&ctx).refresh_ruler);
    }
    h.panel.mark_drawn(&h.view);
    {
        let (panel, ctx) = h.split();
        let report = panel.on_idle(&ctx);
        assert!(!report.refresh_ruler);
        assert!(!report.redraw_overlays);
    }

    h.view.selection = ruler_core::SelectedRegion::new(1.0, 3.0);
    h.panel.on_selection_change(&mut h.view);
    let (panel, ctx) = h.split();
    assert!(panel.on_idle(&ctx).refresh_ruler);
}

#[test]
fn test_hover_shows_and_hides_indicator() {
    let mut h = Harness::new(10.0, (2.0, 4.0));
    h.move_to(PointerEvent::new(600, QP_Y));
    {
        let (panel, ctx) = h.split();
        assert!(panel.on_idle(&ctx).redraw_overlays);
    }
    let indicator = h.panel.overlays().indicator.state().pending();
    assert_eq!(indicator.x, 600);
    assert_eq!(indicator.shape(), IndicatorShape::QuickPlay);
    assert_eq!(h.panel.overlays().guideline.state().pending().x, 600);

    h.panel.mark_drawn(&h.view);
    {
        let (panel, ctx) = h.split();
        assert!(!panel.on_idle(&ctx).redraw_overlays);
    }

    let (panel, mut ctx) = h.split();
    panel.handle_input(&mut ctx, RulerInput::Left);
    assert!(panel.on_idle(&ctx).redraw_overlays);
    assert!(!panel.overlays().indicator.state().pending().is_visible());
}

#[test]
fn test_scrub_zone_hover_previews_scrub() {
    let mut h = Harness::new(10.0, (2.0, 4.0));
    h.move_to(PointerEvent::new(700, SCRUB_Y));
    let (panel, ctx) = h.split();
    panel.on_idle(&ctx);
    let indicator = panel.overlays().indicator.state().pending();
    assert_eq!(indicator.shape(), IndicatorShape::Scrub);
    assert!(panel.overlays().guideline.state().pending().previewing);
}

#[test]
fn test_playhead_drag_shows_plain_indicator() {
    let mut h = Harness::new(10.0, (2.0, 4.0));
    pinned_and_playing(&mut h);
    h.scrubber.has_mark = true;
    h.scrubber.scrubbing = true;

    h.move_to(PointerEvent::new(500, QP_Y));
    {
        let (panel, ctx) = h.split();
        panel.on_idle(&ctx);
        let indicator = panel.overlays().indicator.state().pending();
        assert_eq!(indicator.shape(), IndicatorShape::Scrub);
    }

    h.left_down(500);
    assert!(matches!(h.panel.gesture(), Some(Gesture::Playhead(_))));
    let (panel, ctx) = h.split();
    panel.on_idle(&ctx);
    let indicator = panel.overlays().indicator.state().pending();
    assert!(indicator.is_visible());
    assert_eq!(indicator.shape(), IndicatorShape::QuickPlay);
}

#[test]
fn test_indicator_hidden_while_audio_plays() {
    let mut h = Harness::new(10.0, (2.0, 4.0));
    h.transport.audio_active = true;
    h.move_to(PointerEvent::new(600, QP_Y));
    let (panel, ctx) = h.split();
    panel.on_idle(&ctx);
    assert!(!panel.overlays().indicator.state().pending().is_visible());
}

#[test]
fn test_scene_reflects_active_region() {
    let mut h = Harness::new(10.0, (2.0, 4.0));
    h.view.set_play_region_to_selection();
    pinned_and_playing(&mut h);
    {
        let (panel, mut ctx) = h.split();
        panel.apply_menu_action(&mut ctx, RulerMenuAction::TogglePinnedHead);
    }
    let (panel, ctx) = h.split();
    let scene = panel.scene(&ctx);
    let region = scene.region.expect("region is drawn");
    assert_eq!((region.left, region.right), (200.0, 400.0));
    assert!(region.active);
    assert_eq!(scene.pinned_head, Some(500.0));
    assert!(scene.scrub_zone.is_some());
}
