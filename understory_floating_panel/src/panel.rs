// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The floating panel controller.

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Point, Rect, Vec2};
use smallvec::{SmallVec, smallvec};

use crate::config::PanelConfig;
use crate::pan::{PanPhase, PanSample, PanTracker};
use crate::state::{Direction, PanelState};

/// Events produced by a single controller call, in the order they happened.
pub type PanelEvents = SmallVec<[PanelEvent; 4]>;

/// One-shot callback run when an animated snap finishes.
///
/// The argument is the `finished` flag the host reports to
/// [`FloatingPanel::finish_snap`].
pub type AnimationCompletion = Box<dyn FnOnce(bool)>;

/// Something the host should react to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanelEvent {
    /// The offset is about to change under a drag.
    WillMove {
        /// State before the move.
        from: PanelState,
    },
    /// The offset changed under a drag. Hosts move the panel to `offset`
    /// without animation and set the dimming overlay's opacity to `progress`.
    Moved {
        /// New panel offset.
        offset: f64,
        /// Dimming overlay progress in `[0, max_overlay]`.
        progress: f64,
    },
    /// The panel should animate to a rest state. The host calls
    /// [`FloatingPanel::finish_snap`] once the animation completes.
    SnapTo {
        /// Rest state being animated to.
        target: PanelState,
        /// Offset of that rest state.
        offset: f64,
        /// Overlay opacity at the end of the animation.
        overlay: f64,
    },
    /// The panel jumped to a rest state without animation.
    Restored {
        /// The new rest state.
        state: PanelState,
        /// Offset of that rest state.
        offset: f64,
    },
    /// Movement for the current gesture or snap is over.
    DidEndMoving {
        /// State the panel came to rest in.
        state: PanelState,
    },
}

/// Why a pan sample left the panel untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// Location or velocity was NaN or infinite.
    NonFinite,
    /// The gesture began outside the configured dragging zone.
    OutsideDraggingZone,
    /// A non-`Began` sample arrived with no gesture being tracked.
    NotTracking,
    /// The touch was outside the panel and panning from outside is not
    /// currently permitted.
    OutsidePanel,
}

/// Result of feeding one sample into [`FloatingPanel::receive_pan`].
#[derive(Clone, Debug, PartialEq)]
pub enum PanOutcome {
    /// The sample was dropped without touching panel state.
    Ignored(IgnoreReason),
    /// A gesture began and is now tracked.
    Tracking,
    /// The sample was processed. The events may be empty when the sample
    /// did not move the panel.
    Handled(PanelEvents),
}

impl PanOutcome {
    /// Events carried by a [`PanOutcome::Handled`] outcome.
    #[must_use]
    pub fn events(&self) -> &[PanelEvent] {
        match self {
            Self::Handled(events) => events,
            Self::Ignored(_) | Self::Tracking => &[],
        }
    }
}

/// Tracks a draggable panel's vertical offset inside its container.
///
/// The offset is the single scalar the host's layout consumes, usually as the
/// constant of a top constraint: `0` when unfolded, `-(height - visible_area)`
/// when folded. [`FloatingPanel::state`] is always derived from it.
///
/// All methods must be called from the thread that delivers UI events.
pub struct FloatingPanel {
    config: PanelConfig,
    bounds: Rect,
    offset: f64,
    pan: PanTracker,
    allow_pan_outside: bool,
    moved_during_pan: bool,
    pending_snap: Option<PanelState>,
    completion: Option<AnimationCompletion>,
}

impl fmt::Debug for FloatingPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FloatingPanel")
            .field("config", &self.config)
            .field("bounds", &self.bounds)
            .field("offset", &self.offset)
            .field("pan", &self.pan)
            .field("allow_pan_outside", &self.allow_pan_outside)
            .field("moved_during_pan", &self.moved_during_pan)
            .field("pending_snap", &self.pending_snap)
            .field("completion", &self.completion.is_some())
            .finish()
    }
}

impl FloatingPanel {
    /// Creates an unfolded panel.
    ///
    /// `bounds` is the panel's frame in container coordinates while unfolded.
    #[must_use]
    pub fn new(bounds: Rect, config: PanelConfig) -> Self {
        Self {
            config: config.normalized(),
            bounds: bounds.abs(),
            offset: 0.0,
            pan: PanTracker::default(),
            allow_pan_outside: false,
            moved_during_pan: false,
            pending_snap: None,
            completion: None,
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Replaces the configuration, keeping the panel in its rest state.
    pub fn set_config(&mut self, config: PanelConfig) {
        let state = self.state();
        self.config = config.normalized();
        self.repin(state);
    }

    /// The panel's unfolded frame.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Reports a new unfolded frame after layout.
    ///
    /// A folded panel stays folded; a moved panel is clamped into the new range.
    pub fn set_panel_bounds(&mut self, bounds: Rect) {
        let state = self.state();
        self.bounds = bounds.abs();
        self.repin(state);
    }

    fn repin(&mut self, state: PanelState) {
        self.offset = match state {
            PanelState::Unfolded => 0.0,
            PanelState::Folded => self.folded_offset(),
            PanelState::Moved => self.offset.clamp(self.folded_offset(), 0.0),
        };
    }

    /// Current vertical displacement of the panel.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Distance the panel travels between unfolded and folded.
    #[must_use]
    pub fn fold_extent(&self) -> f64 {
        (self.bounds.height() - self.config.visible_area).max(0.0)
    }

    /// Offset at which the panel is folded.
    #[must_use]
    pub fn folded_offset(&self) -> f64 {
        let extent = self.fold_extent();
        if extent > 0.0 { -extent } else { 0.0 }
    }

    /// Rest state derived from the current offset.
    #[must_use]
    pub fn state(&self) -> PanelState {
        PanelState::from_offset(self.offset, self.folded_offset())
    }

    /// The panel's current frame in container coordinates.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.bounds + Vec2::new(0.0, self.offset)
    }

    /// Dimming overlay progress for the current offset, capped at
    /// [`PanelConfig::max_overlay`].
    #[must_use]
    pub fn progress(&self) -> f64 {
        let extent = self.fold_extent();
        if extent <= 0.0 {
            return 0.0;
        }
        (self.offset.abs() / extent).min(self.config.max_overlay)
    }

    /// Whether pans found outside the panel's frame may move it.
    #[must_use]
    pub fn allow_pan_outside(&self) -> bool {
        self.allow_pan_outside
    }

    /// Permits or forbids moving the panel from pans outside its frame, for
    /// example while a nested scroll view is pulled past its top edge.
    pub fn set_allow_pan_outside(&mut self, allow: bool) {
        self.allow_pan_outside = allow;
    }

    /// Returns `true` while a pan gesture is being tracked.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.pan.is_tracking()
    }

    /// Returns `true` between an animated restore and its
    /// [`FloatingPanel::finish_snap`].
    #[must_use]
    pub fn is_snapping(&self) -> bool {
        self.pending_snap.is_some()
    }

    /// Registers the callback run once by the next [`FloatingPanel::finish_snap`].
    pub fn set_animation_completion(&mut self, completion: impl FnOnce(bool) + 'static) {
        self.completion = Some(Box::new(completion));
    }

    /// Drops a registered completion without running it.
    pub fn clear_animation_completion(&mut self) {
        self.completion = None;
    }

    /// Feeds one pan sample into the controller.
    pub fn receive_pan(&mut self, sample: PanSample) -> PanOutcome {
        if !sample.is_finite() {
            tracing::debug!(phase = ?sample.phase, "dropping non-finite pan sample");
            // A tracked gesture still has to come to rest.
            if sample.phase.is_terminal() && self.pan.is_tracking() {
                let mut events = PanelEvents::new();
                self.release(Direction::None, 0.0, &mut events);
                return PanOutcome::Handled(events);
            }
            return PanOutcome::Ignored(IgnoreReason::NonFinite);
        }
        if sample.phase == PanPhase::Began {
            return self.begin_pan(sample.location);
        }

        let Some(delta) = self.pan.advance(sample.location) else {
            tracing::debug!(phase = ?sample.phase, "pan sample without a tracked gesture");
            return PanOutcome::Ignored(IgnoreReason::NotTracking);
        };
        let direction = Direction::from_velocity(sample.velocity.y, delta);

        let mut events = PanelEvents::new();
        if self.permits(sample.location, direction) {
            events = self.move_by(direction);
            if !events.is_empty() {
                self.moved_during_pan = true;
            }
        } else if !sample.phase.is_terminal() {
            tracing::debug!(y = sample.location.y, "pan outside panel ignored");
            return PanOutcome::Ignored(IgnoreReason::OutsidePanel);
        }

        if sample.phase.is_terminal() {
            self.release(direction, sample.velocity.y, &mut events);
        }
        PanOutcome::Handled(events)
    }

    fn begin_pan(&mut self, location: Point) -> PanOutcome {
        if !self
            .config
            .dragging_zone
            .admits(location.y, self.frame().max_y())
        {
            self.pan.finish();
            tracing::debug!(y = location.y, "pan began outside the dragging zone");
            return PanOutcome::Ignored(IgnoreReason::OutsideDraggingZone);
        }
        self.pan.begin(location);
        self.moved_during_pan = false;
        PanOutcome::Tracking
    }

    fn permits(&self, location: Point, direction: Direction) -> bool {
        if self.frame().contains(location) {
            return true;
        }
        // A downward drag keeps going once the finger slips off a moving panel.
        if matches!(direction, Direction::Down(_)) && self.state() == PanelState::Moved {
            return true;
        }
        self.allow_pan_outside
    }

    /// Moves the panel by the direction's delta.
    ///
    /// The offset never leaves `[folded_offset, 0]`. A delta that would
    /// overshoot lands exactly on the boundary when the panel is already
    /// [`PanelState::Moved`]; from a rest state it is ignored.
    pub fn move_by(&mut self, direction: Direction) -> PanelEvents {
        let mut events = PanelEvents::new();
        let Some(delta) = direction.delta() else {
            tracing::debug!("direction not found yet, nothing to move");
            return events;
        };
        if !delta.is_finite() {
            return events;
        }

        let from = self.state();
        let folded = self.folded_offset();
        let target = self.offset + delta;
        let next = if target < folded || target > 0.0 {
            if from != PanelState::Moved {
                return events;
            }
            target.clamp(folded, 0.0)
        } else {
            target
        };
        if next == self.offset {
            return events;
        }

        events.push(PanelEvent::WillMove { from });
        self.offset = next;
        let progress = self.progress();
        tracing::trace!(offset = next, progress, "panel moved");
        events.push(PanelEvent::Moved {
            offset: next,
            progress,
        });
        events
    }

    fn release(&mut self, direction: Direction, velocity_y: f64, events: &mut PanelEvents) {
        self.pan.finish();
        let moved = core::mem::take(&mut self.moved_during_pan);
        let state = self.state();
        if state != PanelState::Moved {
            if moved {
                events.push(PanelEvent::DidEndMoving { state });
            }
            return;
        }

        let target = self.snap_target(direction, velocity_y);
        tracing::debug!(%direction, velocity_y, %target, "pan released");
        events.extend(self.restore(target, true));
    }

    /// Decides where a released panel should rest.
    ///
    /// A fast release (at least [`PanelConfig::snap_velocity`]) or one that
    /// [crossed enough](Self::crossed_enough) follows the direction of travel;
    /// anything else falls back against it. Without a direction the nearest
    /// rest state wins.
    #[must_use]
    pub fn snap_target(&self, direction: Direction, velocity_y: f64) -> PanelState {
        let decisive =
            velocity_y.abs() >= self.config.snap_velocity || self.crossed_enough(direction);
        match (direction, decisive) {
            (Direction::Up(_), true) | (Direction::Down(_), false) => PanelState::Folded,
            (Direction::Down(_), true) | (Direction::Up(_), false) => PanelState::Unfolded,
            (Direction::None, _) => self.closest_state(),
        }
    }

    /// Whether the panel's vertical midpoint has passed the container's top
    /// edge in the direction of travel.
    #[must_use]
    pub fn crossed_enough(&self, direction: Direction) -> bool {
        let mid_y = self.frame().center().y;
        match direction {
            Direction::Up(_) => mid_y <= 0.0,
            Direction::Down(_) => mid_y >= 0.0,
            Direction::None => false,
        }
    }

    /// The rest state nearest to the panel's vertical midpoint.
    #[must_use]
    pub fn closest_state(&self) -> PanelState {
        if self.frame().center().y <= 0.0 {
            PanelState::Folded
        } else {
            PanelState::Unfolded
        }
    }

    /// Puts the panel into a rest state.
    ///
    /// Restoring to [`PanelState::Moved`] does nothing. An animated restore
    /// emits [`PanelEvent::SnapTo`] and waits for
    /// [`FloatingPanel::finish_snap`]; a new animated restore before that
    /// supersedes the pending one.
    pub fn restore(&mut self, state: PanelState, animated: bool) -> PanelEvents {
        let offset = match state {
            PanelState::Unfolded => 0.0,
            PanelState::Folded => self.folded_offset(),
            PanelState::Moved => return PanelEvents::new(),
        };
        self.offset = offset;

        if !animated {
            return smallvec![PanelEvent::Restored { state, offset }];
        }
        if let Some(previous) = self.pending_snap.replace(state) {
            tracing::debug!(%previous, %state, "snap superseded");
        }
        let overlay = match state {
            PanelState::Unfolded => 0.0,
            _ => self.config.max_overlay,
        };
        smallvec![PanelEvent::SnapTo {
            target: state,
            offset,
            overlay,
        }]
    }

    /// Handles a tap on the panel: a folded panel unfolds.
    pub fn tap(&mut self) -> PanelEvents {
        if self.state() == PanelState::Folded {
            self.restore(PanelState::Unfolded, true)
        } else {
            PanelEvents::new()
        }
    }

    /// Reports that the host finished animating the pending snap.
    ///
    /// Emits [`PanelEvent::DidEndMoving`] and runs the registered completion
    /// exactly once; later calls without a new snap do nothing.
    pub fn finish_snap(&mut self, finished: bool) -> PanelEvents {
        let Some(target) = self.pending_snap.take() else {
            return PanelEvents::new();
        };
        tracing::trace!(%target, finished, "snap finished");
        if let Some(completion) = self.completion.take() {
            completion(finished);
        }
        smallvec![PanelEvent::DidEndMoving {
            state: self.state(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DraggingZone;

    fn panel() -> FloatingPanel {
        // 400pt tall panel, 50pt stays visible when folded.
        FloatingPanel::new(
            Rect::new(0.0, 0.0, 320.0, 400.0),
            PanelConfig::default().with_dragging_zone(DraggingZone::All),
        )
    }

    #[test]
    fn starts_unfolded() {
        let p = panel();
        assert_eq!(p.state(), PanelState::Unfolded);
        assert_eq!(p.fold_extent(), 350.0);
        assert_eq!(p.folded_offset(), -350.0);
        assert_eq!(p.progress(), 0.0);
    }

    #[test]
    fn move_up_from_rest_applies() {
        let mut p = panel();
        let events = p.move_by(Direction::Up(-35.0));
        assert_eq!(
            events.as_slice(),
            &[
                PanelEvent::WillMove {
                    from: PanelState::Unfolded
                },
                PanelEvent::Moved {
                    offset: -35.0,
                    progress: 0.1
                },
            ]
        );
        assert_eq!(p.state(), PanelState::Moved);
    }

    #[test]
    fn overshoot_from_rest_is_ignored() {
        let mut p = panel();
        assert!(p.move_by(Direction::Down(10.0)).is_empty());
        assert!(p.move_by(Direction::Up(-500.0)).is_empty());
        assert_eq!(p.offset(), 0.0);

        p.restore(PanelState::Folded, false);
        assert!(p.move_by(Direction::Up(-1.0)).is_empty());
        assert_eq!(p.state(), PanelState::Folded);
    }

    #[test]
    fn overshoot_while_moved_lands_on_boundary() {
        let mut p = panel();
        p.move_by(Direction::Up(-100.0));
        p.move_by(Direction::Up(-400.0));
        assert_eq!(p.offset(), -350.0);
        assert_eq!(p.state(), PanelState::Folded);

        p.move_by(Direction::Down(100.0));
        p.move_by(Direction::Down(400.0));
        assert_eq!(p.offset(), 0.0);
        assert_eq!(p.state(), PanelState::Unfolded);
    }

    #[test]
    fn jittery_up_sample_cannot_push_past_unfolded() {
        let mut p = panel();
        p.move_by(Direction::Up(-10.0));
        p.move_by(Direction::Up(30.0));
        assert_eq!(p.offset(), 0.0);
    }

    #[test]
    fn none_direction_does_not_move() {
        let mut p = panel();
        assert!(p.move_by(Direction::None).is_empty());
        assert_eq!(p.offset(), 0.0);
    }

    #[test]
    fn progress_is_capped() {
        let mut p = panel();
        p.move_by(Direction::Up(-300.0));
        assert_eq!(p.progress(), 0.6);
    }

    #[test]
    fn snap_target_by_velocity_and_position() {
        let mut p = panel();
        p.move_by(Direction::Up(-100.0));
        // Midpoint is at 100: nothing crossed, slow release falls back.
        assert_eq!(p.snap_target(Direction::Up(-1.0), -10.0), PanelState::Unfolded);
        assert_eq!(p.snap_target(Direction::Down(1.0), 10.0), PanelState::Unfolded);
        assert_eq!(p.snap_target(Direction::Up(-1.0), -1200.0), PanelState::Folded);
        assert_eq!(p.snap_target(Direction::None, 0.0), PanelState::Unfolded);

        p.move_by(Direction::Up(-150.0));
        // Midpoint is at -50: crossed going up.
        assert!(p.crossed_enough(Direction::Up(-1.0)));
        assert_eq!(p.snap_target(Direction::Up(-1.0), -10.0), PanelState::Folded);
        assert_eq!(p.snap_target(Direction::Down(1.0), 10.0), PanelState::Folded);
        assert_eq!(p.snap_target(Direction::None, 0.0), PanelState::Folded);
    }

    #[test]
    fn restore_to_moved_is_noop() {
        let mut p = panel();
        p.move_by(Direction::Up(-20.0));
        assert!(p.restore(PanelState::Moved, true).is_empty());
        assert_eq!(p.offset(), -20.0);
        assert!(!p.is_snapping());
    }

    #[test]
    fn resizing_keeps_rest_state() {
        let mut p = panel();
        p.restore(PanelState::Folded, false);
        p.set_panel_bounds(Rect::new(0.0, 0.0, 320.0, 500.0));
        assert_eq!(p.state(), PanelState::Folded);
        assert_eq!(p.offset(), -450.0);

        p.move_by(Direction::Down(400.0));
        assert_eq!(p.offset(), -50.0);
        p.set_panel_bounds(Rect::new(0.0, 0.0, 320.0, 80.0));
        assert_eq!(p.offset(), -30.0);
        assert_eq!(p.state(), PanelState::Folded);
    }

    #[test]
    fn short_panel_cannot_fold() {
        let mut p = FloatingPanel::new(Rect::new(0.0, 0.0, 100.0, 40.0), PanelConfig::default());
        assert_eq!(p.fold_extent(), 0.0);
        assert!(p.move_by(Direction::Up(-10.0)).is_empty());
        p.restore(PanelState::Folded, false);
        assert_eq!(p.state(), PanelState::Unfolded);
        assert_eq!(p.progress(), 0.0);
    }
}
