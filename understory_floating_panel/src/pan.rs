// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan gesture samples and the per-gesture touch tracker.
//!
//! ## Usage
//!
//! 1) Call [`PanTracker::begin`] with the location of a `Began` sample.
//! 2) On each later sample, call [`PanTracker::advance`] to get the vertical
//!    distance travelled since the previous sample.
//! 3) Call [`PanTracker::finish`] when the gesture ends or is cancelled.
//!
//! ```
//! use kurbo::Point;
//! use understory_floating_panel::PanTracker;
//!
//! let mut pan = PanTracker::default();
//! pan.begin(Point::new(10.0, 300.0));
//!
//! assert_eq!(pan.advance(Point::new(12.0, 280.0)), Some(-20.0));
//! assert_eq!(pan.advance(Point::new(12.0, 270.0)), Some(-10.0));
//!
//! pan.finish();
//! assert!(!pan.is_tracking());
//! ```

use kurbo::{Point, Vec2};

/// Lifecycle phase of a pan sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanPhase {
    /// First sample of a gesture.
    Began,
    /// The touch moved.
    Changed,
    /// The touch lifted.
    Ended,
    /// The gesture was interrupted. Handled exactly like [`PanPhase::Ended`].
    Cancelled,
}

impl PanPhase {
    /// Returns `true` for [`PanPhase::Ended`] and [`PanPhase::Cancelled`].
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled)
    }
}

/// One sample delivered by the gesture source.
///
/// Location and velocity are both expressed in the coordinate space of the
/// view the gesture is attached to, which is also the panel's container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanSample {
    /// Phase of the gesture.
    pub phase: PanPhase,
    /// Current touch location.
    pub location: Point,
    /// Current velocity in points per second.
    pub velocity: Vec2,
}

impl PanSample {
    /// Creates a sample.
    #[must_use]
    pub fn new(phase: PanPhase, location: Point, velocity: Vec2) -> Self {
        Self {
            phase,
            location,
            velocity,
        }
    }

    /// A `Began` sample at rest.
    #[must_use]
    pub fn began(location: Point) -> Self {
        Self::new(PanPhase::Began, location, Vec2::ZERO)
    }

    /// A `Changed` sample.
    #[must_use]
    pub fn changed(location: Point, velocity: Vec2) -> Self {
        Self::new(PanPhase::Changed, location, velocity)
    }

    /// An `Ended` sample.
    #[must_use]
    pub fn ended(location: Point, velocity: Vec2) -> Self {
        Self::new(PanPhase::Ended, location, velocity)
    }

    /// A `Cancelled` sample.
    #[must_use]
    pub fn cancelled(location: Point, velocity: Vec2) -> Self {
        Self::new(PanPhase::Cancelled, location, velocity)
    }

    /// Returns `true` when both location and velocity are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.location.is_finite() && self.velocity.is_finite()
    }
}

/// Remembers where the current pan's last sample landed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanTracker {
    previous: Option<Point>,
}

impl PanTracker {
    /// Starts tracking a gesture at `location`, discarding any previous one.
    pub fn begin(&mut self, location: Point) {
        self.previous = Some(location);
    }

    /// Records `location` and returns the vertical distance from the previous
    /// sample, or `None` if no gesture is being tracked.
    pub fn advance(&mut self, location: Point) -> Option<f64> {
        let previous = self.previous?;
        self.previous = Some(location);
        Some(location.y - previous.y)
    }

    /// The last recorded location.
    #[must_use]
    pub fn previous(&self) -> Option<Point> {
        self.previous
    }

    /// Stops tracking and returns the last recorded location.
    pub fn finish(&mut self) -> Option<Point> {
        self.previous.take()
    }

    /// Returns `true` between [`PanTracker::begin`] and [`PanTracker::finish`].
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.previous.is_some()
    }
}
