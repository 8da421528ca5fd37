// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform column grid: which cells does a rectangle touch?

use core::ops::Range;

use kurbo::{Point, Rect, Size};

use crate::difference::overlaps;
use crate::window::AssetLocator;

/// Layout of a single-section grid with a fixed number of columns.
///
/// Items are laid out left to right, top to bottom, starting at `origin`.
/// All cells share `item_size`; `spacing` separates both rows and columns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    /// Number of columns; at least `1`.
    pub columns: usize,
    /// Size of every cell.
    pub item_size: Size,
    /// Gap between adjacent rows and columns.
    pub spacing: f64,
    /// Top-left corner of the first cell.
    pub origin: Point,
}

impl GridLayout {
    /// Creates a grid, normalizing degenerate input.
    #[must_use]
    pub fn new(columns: usize, item_size: Size, spacing: f64) -> Self {
        Self {
            columns: columns.max(1),
            item_size: Size::new(item_size.width.max(0.0), item_size.height.max(0.0)),
            spacing: spacing.max(0.0),
            origin: Point::ZERO,
        }
    }

    /// A grid of square cells that exactly fills `width`.
    ///
    /// Each side is `(width - spacing * (columns - 1)) / columns`.
    #[must_use]
    pub fn square(width: f64, columns: usize, spacing: f64) -> Self {
        let columns = columns.max(1);
        let spacing = spacing.max(0.0);
        let gaps = spacing * (columns - 1) as f64;
        let side = ((width - gaps) / columns as f64).max(0.0);
        Self::new(columns, Size::new(side, side), spacing)
    }

    /// Moves the first cell to `origin`.
    #[must_use]
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    fn row_stride(&self) -> f64 {
        self.item_size.height + self.spacing
    }

    fn column_stride(&self) -> f64 {
        self.item_size.width + self.spacing
    }

    /// Number of rows needed for `len` items.
    #[must_use]
    pub fn rows(&self, len: usize) -> usize {
        len.div_ceil(self.columns)
    }

    /// Height of the laid-out content for `len` items.
    #[must_use]
    pub fn content_height(&self, len: usize) -> f64 {
        match self.rows(len) {
            0 => 0.0,
            rows => rows as f64 * self.row_stride() - self.spacing,
        }
    }

    /// Frame of the item at `index`.
    #[must_use]
    pub fn item_frame(&self, index: usize) -> Rect {
        let row = index / self.columns;
        let column = index % self.columns;
        let origin = Point::new(
            self.origin.x + column as f64 * self.column_stride(),
            self.origin.y + row as f64 * self.row_stride(),
        );
        Rect::from_origin_size(origin, self.item_size)
    }

    /// Calls `f` with the index of every item among the first `len` whose
    /// frame overlaps `area`, in ascending order.
    pub fn visit_items<F: FnMut(usize)>(&self, area: Rect, len: usize, mut f: F) {
        if len == 0 || self.item_size.is_zero_area() || area.area() <= 0.0 {
            return;
        }
        let rows = self.candidates(
            area.y0 - self.origin.y,
            area.y1 - self.origin.y,
            self.row_stride(),
        );
        let columns = self.candidates(
            area.x0 - self.origin.x,
            area.x1 - self.origin.x,
            self.column_stride(),
        );
        let columns = columns.start.min(self.columns)..columns.end.min(self.columns);
        let last_row = self.rows(len);
        let rows = rows.start.min(last_row)..rows.end.min(last_row);

        for row in rows {
            let first = row * self.columns;
            for column in columns.clone() {
                let index = first + column;
                if index >= len {
                    break;
                }
                if overlaps(self.item_frame(index), area) {
                    f(index);
                }
            }
        }
    }

    /// Rows or columns that may overlap `[start, end)` along one axis.
    ///
    /// The range is conservative; callers confirm each cell with a frame test.
    fn candidates(&self, start: f64, end: f64, stride: f64) -> Range<usize> {
        if stride <= 0.0 || !start.is_finite() || !end.is_finite() || end <= 0.0 {
            return 0..0;
        }
        let first = lane(start.max(0.0) / stride);
        let last = lane(end / stride);
        first..last.saturating_add(1)
    }
}

/// Resolves grid regions against a snapshot of asset identifiers, one per item.
#[derive(Clone, Copy, Debug)]
pub struct GridAssets<'a, A> {
    layout: &'a GridLayout,
    assets: &'a [A],
}

impl<'a, A> GridAssets<'a, A> {
    /// Pairs a layout with the identifiers of its items in display order.
    #[must_use]
    pub fn new(layout: &'a GridLayout, assets: &'a [A]) -> Self {
        Self { layout, assets }
    }
}

impl<A: Clone> AssetLocator for GridAssets<'_, A> {
    type Asset = A;

    fn visit_assets<F: FnMut(A)>(&self, area: Rect, mut f: F) {
        self.layout.visit_items(area, self.assets.len(), |index| {
            if let Some(asset) = self.assets.get(index) {
                f(asset.clone());
            }
        });
    }
}

fn lane(value: f64) -> usize {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Used only for lane approximation; every candidate is confirmed by a frame test"
    )]
    {
        value.max(0.0) as usize
    }
}
