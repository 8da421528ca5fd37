// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panel tuning and its normalization.

use crate::state::DraggingZone;

/// Tuning for a [`crate::FloatingPanel`].
///
/// Values are normalized rather than rejected: negative lengths clamp to
/// zero and the overlay cap clamps into `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelConfig {
    /// Height of the panel that stays on screen when folded.
    pub visible_area: f64,
    /// Where a pan may begin.
    pub dragging_zone: DraggingZone,
    /// Release speed (points per second) at or above which the panel always
    /// snaps in the direction of travel.
    pub snap_velocity: f64,
    /// Upper bound for the dimming overlay's progress.
    pub max_overlay: f64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            visible_area: 50.0,
            dragging_zone: DraggingZone::Some(50.0),
            snap_velocity: 1000.0,
            max_overlay: 0.6,
        }
    }
}

impl PanelConfig {
    /// Sets the folded visible area.
    #[must_use]
    pub fn with_visible_area(mut self, visible_area: f64) -> Self {
        self.visible_area = visible_area;
        self.normalized()
    }

    /// Sets the dragging zone.
    #[must_use]
    pub fn with_dragging_zone(mut self, zone: DraggingZone) -> Self {
        self.dragging_zone = zone;
        self.normalized()
    }

    /// Sets the decisive release speed.
    #[must_use]
    pub fn with_snap_velocity(mut self, snap_velocity: f64) -> Self {
        self.snap_velocity = snap_velocity;
        self.normalized()
    }

    /// Sets the overlay cap.
    #[must_use]
    pub fn with_max_overlay(mut self, max_overlay: f64) -> Self {
        self.max_overlay = max_overlay;
        self.normalized()
    }

    pub(crate) fn normalized(mut self) -> Self {
        self.visible_area = non_negative(self.visible_area);
        self.snap_velocity = non_negative(self.snap_velocity);
        self.max_overlay = if self.max_overlay.is_finite() {
            self.max_overlay.clamp(0.0, 1.0)
        } else {
            0.0
        };
        if let DraggingZone::Some(height) = self.dragging_zone {
            self.dragging_zone = DraggingZone::Some(non_negative(height));
        }
        self
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_picker() {
        let config = PanelConfig::default();
        assert_eq!(config.visible_area, 50.0);
        assert_eq!(config.dragging_zone, DraggingZone::Some(50.0));
        assert_eq!(config.snap_velocity, 1000.0);
        assert_eq!(config.max_overlay, 0.6);
    }

    #[test]
    fn builders_normalize() {
        let config = PanelConfig::default()
            .with_visible_area(-5.0)
            .with_dragging_zone(DraggingZone::Some(-1.0))
            .with_max_overlay(3.0)
            .with_snap_velocity(f64::NAN);
        assert_eq!(config.visible_area, 0.0);
        assert_eq!(config.dragging_zone, DraggingZone::Some(0.0));
        assert_eq!(config.max_overlay, 1.0);
        assert_eq!(config.snap_velocity, 0.0);
    }
}
