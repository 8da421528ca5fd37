// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_floating_panel --heading-base-level=0

//! Understory Floating Panel: a fold/unfold state machine for draggable panels.
//!
//! A floating panel sits at the top of its container and can be dragged up
//! until only a small visible area remains (folded), or back down until it is
//! fully shown (unfolded). This crate turns pan-gesture samples into offset
//! changes and rest-state decisions; it does not own any view, animation, or
//! gesture recognizer.
//!
//! The core type is [`FloatingPanel`]. It tracks:
//! - The panel's unfolded frame and a single vertical **offset**, the only
//!   value the host's layout needs to read.
//! - A [`PanelState`] (`Unfolded`, `Folded`, `Moved`) derived from that
//!   offset on demand and never cached.
//! - The current pan gesture via [`PanTracker`].
//! - Whether pans outside the panel may move it, which hosts toggle from
//!   sibling gestures such as a nested scroll view pulled past its top.
//!
//! Every call returns [`PanelEvent`]s describing what the host should do:
//! move the panel, fade a dimming overlay, or animate to a rest state and
//! report back through [`FloatingPanel::finish_snap`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Vec2};
//! use understory_floating_panel::{
//!     DraggingZone, FloatingPanel, PanSample, PanelConfig, PanelEvent, PanelState,
//! };
//!
//! let config = PanelConfig::default().with_dragging_zone(DraggingZone::All);
//! let mut panel = FloatingPanel::new(Rect::new(0.0, 0.0, 320.0, 400.0), config);
//!
//! panel.receive_pan(PanSample::began(Point::new(160.0, 380.0)));
//!
//! // Drag up by 200pt.
//! panel.receive_pan(PanSample::changed(
//!     Point::new(160.0, 180.0),
//!     Vec2::new(0.0, -400.0),
//! ));
//! assert_eq!(panel.state(), PanelState::Moved);
//! assert_eq!(panel.offset(), -200.0);
//!
//! // A slow release: the midpoint reached the container's top, so it folds.
//! let outcome = panel.receive_pan(PanSample::ended(
//!     Point::new(160.0, 180.0),
//!     Vec2::new(0.0, -50.0),
//! ));
//! assert!(matches!(
//!     outcome.events(),
//!     [PanelEvent::SnapTo { target: PanelState::Folded, .. }]
//! ));
//! assert_eq!(panel.state(), PanelState::Folded);
//!
//! // The host animates, then reports completion.
//! let events = panel.finish_snap(true);
//! assert_eq!(
//!     events.as_slice(),
//!     &[PanelEvent::DidEndMoving { state: PanelState::Folded }]
//! );
//! ```
//!
//! ## Release rules
//!
//! When a gesture ends (or is cancelled) with the panel [`PanelState::Moved`]:
//! - a release at least [`PanelConfig::snap_velocity`] fast, or one whose
//!   midpoint has crossed the container's top edge in the direction of
//!   travel, snaps in that direction (up folds, down unfolds);
//! - otherwise it snaps back against the direction of travel;
//! - a release with no vertical velocity goes to the nearest rest state.
//!
//! Diagnostics for dropped samples and snap decisions are emitted through
//! `tracing`; no subscriber is installed.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod pan;
mod panel;
mod state;

pub use config::PanelConfig;
pub use pan::{PanPhase, PanSample, PanTracker};
pub use panel::{
    AnimationCompletion, FloatingPanel, IgnoreReason, PanOutcome, PanelEvent, PanelEvents,
};
pub use state::{Direction, DraggingZone, PanelState};
