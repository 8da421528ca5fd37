// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertical rectangle differences between two cache windows.
//!
//! The difference only tracks how far one rectangle extends above or below
//! the other. Horizontal differences are not reported, which is exact for
//! windows that only ever scroll vertically.

use kurbo::Rect;
use smallvec::SmallVec;

/// Strips of one rectangle lying beyond another; at most one above and one below.
pub type Strips = SmallVec<[Rect; 2]>;

/// Regions produced by [`difference`].
pub type Differences = SmallVec<[RectDifference; 4]>;

/// A region that entered or left a cache window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RectDifference {
    /// The region is newly covered.
    Added(Rect),
    /// The region is no longer covered.
    Removed(Rect),
}

impl RectDifference {
    /// The region itself.
    #[must_use]
    pub fn area(self) -> Rect {
        match self {
            Self::Added(area) | Self::Removed(area) => area,
        }
    }

    /// Returns `true` for [`RectDifference::Added`].
    #[must_use]
    pub fn is_added(self) -> bool {
        matches!(self, Self::Added(_))
    }
}

/// Horizontal strips of `other` that extend beyond `base` vertically.
///
/// The strip below `base` comes first, then the strip above it. Each strip
/// has `other`'s width and starts at the larger of the two left edges.
#[must_use]
pub fn exclusive_or(base: Rect, other: Rect) -> Strips {
    let mut strips = Strips::new();
    let x = base.x0.max(other.x0);
    let width = other.width();

    if other.y1 > base.y1 {
        strips.push(Rect::new(x, base.y1, x + width, other.y1));
    }
    if base.y0 > other.y0 {
        strips.push(Rect::new(x, other.y0, x + width, base.y0));
    }
    strips
}

/// Returns `true` when the rectangles share a region of positive area.
#[must_use]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

/// Regions that enter and leave coverage when a window moves from `old` to `new`.
///
/// Disjoint windows report all of `new` as added and all of `old` as removed.
/// Overlapping windows report the strips of `new` beyond `old` as added,
/// followed by the strips of `old` beyond `new` as removed. Regions with no
/// area are dropped.
#[must_use]
pub fn difference(old: Rect, new: Rect) -> Differences {
    let mut out = Differences::new();
    if !overlaps(old, new) {
        if new.area() > 0.0 {
            out.push(RectDifference::Added(new));
        }
        if old.area() > 0.0 {
            out.push(RectDifference::Removed(old));
        }
        return out;
    }

    out.extend(exclusive_or(old, new).into_iter().map(RectDifference::Added));
    out.extend(exclusive_or(new, old).into_iter().map(RectDifference::Removed));
    out
}
