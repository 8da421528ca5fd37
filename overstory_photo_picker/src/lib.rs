// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=overstory_photo_picker --heading-base-level=0

//! Overstory Photo Picker: a headless photo picker screen.
//!
//! The screen shows a crop area inside a floating panel above a grid of
//! library photos. Dragging folds the panel away to reveal more of the grid;
//! picking a photo unfolds it again and loads the photo into the crop area.
//!
//! [`PhotoPicker`] wires together:
//! - an [`understory_floating_panel::FloatingPanel`] for the panel,
//! - an [`understory_preheat::PreheatWindow`] caching grid thumbnails around
//!   the grid's scroll position,
//! - a [`CropFrame`] that fits and zooms the picked photo.
//!
//! Hosts forward gestures and scroll callbacks to the picker, apply the
//! returned panel events, and drain [`PickerEvent`]s for everything else.
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use overstory_photo_picker::{PhotoPicker, PickerConfig, PickerEvent};
//! use understory_floating_panel::{PanelEvent, PanelState};
//! use understory_preheat::ImageCache;
//!
//! struct NoCache;
//! impl ImageCache<u32> for NoCache {
//!     fn start_caching(&mut self, _: &[u32], _: Size) {}
//!     fn stop_caching(&mut self, _: &[u32], _: Size) {}
//!     fn stop_caching_all(&mut self) {}
//! }
//!
//! let bounds = Rect::new(0.0, 0.0, 320.0, 400.0);
//! let mut picker: PhotoPicker<u32> = PhotoPicker::new(bounds, PickerConfig::default());
//! picker.set_assets((0..40).collect());
//! picker.reset(&mut NoCache);
//! picker.grid_did_scroll(Rect::new(0.0, 0.0, 320.0, 500.0), &mut NoCache);
//!
//! // Picking a photo unfolds the panel...
//! let events = picker.select(9);
//! assert!(matches!(
//!     events.as_slice(),
//!     [PanelEvent::SnapTo { target: PanelState::Unfolded, .. }]
//! ));
//! assert_eq!(picker.drain_events(), [PickerEvent::Selected { index: 9, asset: 9 }]);
//!
//! // ...and once the host's animation ends, the grid brings it to the top.
//! picker.finish_snap(true);
//! assert!(matches!(
//!     picker.drain_events().as_slice(),
//!     [PickerEvent::ScrollToItem { index: 9, .. }]
//! ));
//! ```

mod crop;
mod picker;

pub use crop::{CropConfig, CropFrame};
pub use picker::{PhotoPicker, PickerConfig, PickerEvent};
