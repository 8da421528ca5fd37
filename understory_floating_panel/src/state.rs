// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panel rest states, movement directions, and dragging zones.

use core::fmt;

/// Where a floating panel currently rests.
///
/// The state is never stored: [`crate::FloatingPanel::state`] derives it from
/// the live offset every time it is asked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanelState {
    /// The panel has not been moved; its offset is `0`.
    Unfolded,
    /// Only the configured visible area of the panel remains on screen.
    Folded,
    /// Somewhere between the two rest states.
    Moved,
}

impl PanelState {
    /// Classifies an offset against the folded boundary.
    ///
    /// `folded_offset` is the (non-positive) offset at which the panel is
    /// folded. When it is `0` the panel cannot fold and every in-range offset
    /// reports [`PanelState::Unfolded`].
    #[must_use]
    pub fn from_offset(offset: f64, folded_offset: f64) -> Self {
        if offset == 0.0 {
            Self::Unfolded
        } else if offset == folded_offset {
            Self::Folded
        } else {
            Self::Moved
        }
    }
}

impl fmt::Display for PanelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unfolded => "Unfolded",
            Self::Folded => "Folded",
            Self::Moved => "Moved",
        })
    }
}

/// Vertical direction of a single pan sample, carrying the per-sample delta.
///
/// The variant comes from the sample's velocity, the delta from the distance
/// between this location and the previous one. The two can disagree in sign
/// when a finger jitters; movement uses the delta as-is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Direction {
    /// Moving towards the top of the container.
    Up(f64),
    /// Moving towards the bottom of the container.
    Down(f64),
    /// No vertical velocity.
    None,
}

impl Direction {
    /// Classifies a sample by the sign of its vertical velocity.
    #[must_use]
    pub fn from_velocity(velocity_y: f64, delta: f64) -> Self {
        if velocity_y < 0.0 {
            Self::Up(delta)
        } else if velocity_y > 0.0 {
            Self::Down(delta)
        } else {
            Self::None
        }
    }

    /// Returns the same direction carrying a new delta.
    ///
    /// [`Direction::None`] stays `None`.
    #[must_use]
    pub fn with_delta(self, delta: f64) -> Self {
        match self {
            Self::Up(_) => Self::Up(delta),
            Self::Down(_) => Self::Down(delta),
            Self::None => Self::None,
        }
    }

    /// The carried delta, if any.
    #[must_use]
    pub fn delta(self) -> Option<f64> {
        match self {
            Self::Up(delta) | Self::Down(delta) => Some(delta),
            Self::None => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up(_) => "Up",
            Self::Down(_) => "Down",
            Self::None => "None",
        })
    }
}

/// Restricts where a pan gesture may begin.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum DraggingZone {
    /// A pan may begin anywhere.
    #[default]
    All,
    /// A pan may only begin within this many points above the panel's
    /// bottom edge (or anywhere below it).
    Some(f64),
}

impl DraggingZone {
    /// Returns `true` if a pan beginning at `y` is allowed for a panel whose
    /// bottom edge currently sits at `panel_max_y`.
    #[must_use]
    pub fn admits(self, y: f64, panel_max_y: f64) -> bool {
        match self {
            Self::All => true,
            Self::Some(height) => y >= panel_max_y - height.max(0.0),
        }
    }
}
