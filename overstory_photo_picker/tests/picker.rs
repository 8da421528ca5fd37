// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `overstory_photo_picker` crate.

use kurbo::{Point, Rect, Size, Vec2};
use overstory_photo_picker::{PhotoPicker, PickerConfig, PickerEvent};
use understory_floating_panel::{PanOutcome, PanSample, PanelEvent, PanelState};
use understory_preheat::{CollectionUpdate, ImageCache, LibraryChange};

#[derive(Default)]
struct Counting {
    started: usize,
    stopped: usize,
    resets: usize,
    target_size: Option<Size>,
}

impl ImageCache<u32> for Counting {
    fn start_caching(&mut self, assets: &[u32], target_size: Size) {
        self.started += assets.len();
        self.target_size = Some(target_size);
    }

    fn stop_caching(&mut self, assets: &[u32], _: Size) {
        self.stopped += assets.len();
    }

    fn stop_caching_all(&mut self) {
        self.resets += 1;
    }
}

fn picker() -> PhotoPicker<u32> {
    let mut picker = PhotoPicker::new(Rect::new(0.0, 0.0, 320.0, 400.0), PickerConfig::default());
    picker.set_assets((0..40).collect());
    picker
}

fn grid_at(y: f64) -> Rect {
    Rect::new(0.0, y, 320.0, y + 480.0)
}

fn at(y: f64) -> Point {
    Point::new(160.0, y)
}

#[test]
fn layout_follows_the_panel() {
    let picker = picker();
    assert_eq!(picker.grid().item_size, Size::new(78.5, 78.5));
    assert_eq!(picker.crop().bounds(), Size::new(320.0, 350.0));
    assert!(picker.crop_interaction_enabled());
}

#[test]
fn layout_change_refits_crop_and_grid() {
    let mut picker = picker();
    let mut cache = Counting::default();
    picker.crop_mut().set_content(Size::new(1_100.0, 1_100.0));

    picker.set_panel_bounds(Rect::new(0.0, 0.0, 390.0, 600.0));
    assert_eq!(picker.panel().fold_extent(), 550.0);
    assert_eq!(picker.crop().bounds(), Size::new(390.0, 550.0));
    assert_eq!(picker.crop().zoom(), 390.0 / 1_100.0);
    assert_eq!(picker.grid().item_size, Size::new(96.0, 96.0));

    // Thumbnails are requested at the new cell size.
    picker.grid_did_scroll(grid_at(0.0), &mut cache);
    assert_eq!(cache.target_size, Some(Size::new(96.0, 96.0)));
}

#[test]
fn grid_overscroll_allows_panning_outside() {
    let mut picker = picker();
    let mut cache = Counting::default();

    assert!(picker.grid_did_scroll(grid_at(0.0), &mut cache).is_some());
    assert!(cache.started > 0);
    assert!(!picker.panel().allow_pan_outside());

    picker.grid_did_scroll(grid_at(-20.0), &mut cache);
    assert!(picker.panel().allow_pan_outside());
    picker.grid_did_scroll(grid_at(10.0), &mut cache);
    assert!(!picker.panel().allow_pan_outside());
}

#[test]
fn pan_on_unfolded_panel_clears_outside_permission() {
    let mut picker = picker();
    assert!(picker.check_pan());
    assert!(picker.panel().allow_pan_outside());

    let outcome = picker.main_pan(PanSample::began(at(380.0)));
    assert_eq!(outcome, Some(PanOutcome::Tracking));
    assert!(!picker.panel().allow_pan_outside());
}

#[test]
fn zooming_blocks_panel_gestures() {
    let mut picker = picker();
    picker.crop_mut().set_content(Size::new(640.0, 480.0));
    picker.crop_mut().begin_zoom();

    assert!(!picker.check_pan());
    assert_eq!(picker.main_pan(PanSample::began(at(380.0))), None);
    assert!(!picker.panel().is_tracking());

    picker.crop_mut().end_zoom();
    assert!(picker.main_pan(PanSample::began(at(380.0))).is_some());
}

#[test]
fn moving_panel_pins_the_grid() {
    let mut picker = picker();
    let mut cache = Counting::default();
    picker.grid_did_scroll(grid_at(120.0), &mut cache);
    picker.main_pan(PanSample::began(at(380.0)));

    // The grid drifts under the finger while the panel starts moving.
    picker.grid_did_scroll(grid_at(150.0), &mut cache);
    picker.main_pan(PanSample::changed(at(300.0), Vec2::new(0.0, -300.0)));

    assert_eq!(picker.panel().state(), PanelState::Moved);
    assert!(!picker.crop_interaction_enabled());
    assert_eq!(picker.drain_events(), [PickerEvent::ScrollGrid { offset_y: 120.0 }]);
    assert_eq!(picker.grid_offset_y(), 120.0);
}

#[test]
fn overscrolled_grid_is_pinned_at_its_top() {
    let mut picker = picker();
    let mut cache = Counting::default();
    picker.grid_did_scroll(grid_at(-30.0), &mut cache);
    picker.main_pan(PanSample::began(at(380.0)));
    picker.main_pan(PanSample::changed(at(300.0), Vec2::new(0.0, -300.0)));

    assert_eq!(picker.drain_events(), [PickerEvent::ScrollGrid { offset_y: 0.0 }]);
}

#[test]
fn selecting_unfolds_then_scrolls_to_the_item() {
    let mut picker = picker();
    picker.panel_mut().restore(PanelState::Folded, false);
    assert!(!picker.crop_interaction_enabled());

    let events = picker.select(9);
    assert!(matches!(
        events.as_slice(),
        [PanelEvent::SnapTo {
            target: PanelState::Unfolded,
            ..
        }]
    ));
    assert_eq!(
        picker.drain_events(),
        [PickerEvent::Selected { index: 9, asset: 9 }]
    );

    let events = picker.finish_snap(true);
    assert_eq!(
        events.as_slice(),
        &[PanelEvent::DidEndMoving {
            state: PanelState::Unfolded
        }]
    );
    // Item 9 is in the third row; rows are 78.5 tall with 2pt spacing.
    assert_eq!(
        picker.drain_events(),
        [PickerEvent::ScrollToItem {
            index: 9,
            offset_y: 161.0
        }]
    );
    assert_eq!(picker.grid_offset_y(), 161.0);
    assert!(picker.crop_interaction_enabled());

    // The completion ran once; a stray finish does nothing.
    assert!(picker.finish_snap(true).is_empty());
    assert!(picker.drain_events().is_empty());
}

#[test]
fn selecting_past_the_end_is_ignored() {
    let mut picker = picker();
    assert!(picker.select(40).is_empty());
    assert!(picker.drain_events().is_empty());
    assert!(!picker.panel().is_snapping());
}

#[test]
fn released_drag_snaps_without_scrolling_the_grid() {
    let mut picker = picker();
    picker.main_pan(PanSample::began(at(380.0)));
    picker.main_pan(PanSample::changed(at(180.0), Vec2::new(0.0, -400.0)));
    let outcome = picker
        .main_pan(PanSample::ended(at(180.0), Vec2::new(0.0, -1500.0)))
        .expect("not zooming");
    assert!(matches!(
        outcome.events(),
        [PanelEvent::SnapTo {
            target: PanelState::Folded,
            ..
        }]
    ));
    picker.drain_events();

    picker.finish_snap(true);
    assert!(picker.drain_events().is_empty());
}

#[test]
fn tap_unfolds_a_folded_panel() {
    let mut picker = picker();
    assert!(picker.tap().is_empty());
    picker.panel_mut().restore(PanelState::Folded, false);
    assert!(matches!(
        picker.tap().as_slice(),
        [PanelEvent::SnapTo {
            target: PanelState::Unfolded,
            ..
        }]
    ));
}

#[test]
fn library_change_resets_caching() {
    let mut picker = picker();
    let mut cache = Counting::default();
    picker.reset(&mut cache);
    picker.grid_did_scroll(grid_at(0.0), &mut cache);

    let update = picker.library_did_change(
        LibraryChange {
            assets_after: (0..10).collect(),
            ..LibraryChange::default()
        },
        &mut cache,
    );
    assert_eq!(update, CollectionUpdate::Reload);
    assert_eq!(picker.assets().len(), 10);
    assert_eq!(cache.resets, 2);
    assert_eq!(picker.window().previous_preheat_rect(), Rect::ZERO);
}
