// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zoom-to-fit geometry for the crop area.

use kurbo::{Point, Rect, Size, Vec2};

/// Tuning for a [`CropFrame`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropConfig {
    /// Largest zoom scale the user may reach.
    pub max_zoom: f64,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self { max_zoom: 4.0 }
    }
}

impl CropConfig {
    /// Sets [`CropConfig::max_zoom`].
    #[must_use]
    pub fn with_max_zoom(mut self, max_zoom: f64) -> Self {
        self.max_zoom = max_zoom;
        self
    }

    fn normalized(self) -> Self {
        let max_zoom = if self.max_zoom.is_finite() && self.max_zoom > 0.0 {
            self.max_zoom
        } else {
            1.0
        };
        Self { max_zoom }
    }
}

/// A zoomable image inside a fixed crop area.
///
/// New content starts at the smallest zoom that shows all of it. Content
/// smaller than the area along an axis is centered along that axis.
#[derive(Clone, Debug, PartialEq)]
pub struct CropFrame {
    config: CropConfig,
    bounds: Size,
    content: Size,
    zoom: f64,
    content_offset: Point,
    zooming: bool,
    highlighted: bool,
}

impl CropFrame {
    /// Creates an empty crop area of size `bounds`.
    #[must_use]
    pub fn new(bounds: Size, config: CropConfig) -> Self {
        Self {
            config: config.normalized(),
            bounds: abs_size(bounds),
            content: Size::ZERO,
            zoom: 1.0,
            content_offset: Point::ZERO,
            zooming: false,
            highlighted: false,
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    /// Size of the crop area.
    #[must_use]
    pub fn bounds(&self) -> Size {
        self.bounds
    }

    /// Resizes the crop area and refits the content.
    pub fn set_bounds(&mut self, bounds: Size) {
        self.bounds = abs_size(bounds);
        self.fit();
    }

    /// Unscaled size of the displayed image.
    #[must_use]
    pub fn content(&self) -> Size {
        self.content
    }

    /// Shows new content fitted into the area, with the highlight hidden.
    pub fn set_content(&mut self, content: Size) {
        self.content = abs_size(content);
        self.highlighted = false;
        self.fit();
    }

    fn fit(&mut self) {
        self.zoom = self.min_zoom();
        self.content_offset = Point::ZERO;
        tracing::debug!(zoom = self.zoom, "crop content fitted");
    }

    /// The zoom at which the whole content fits the area.
    ///
    /// `1.0` while either size is empty.
    #[must_use]
    pub fn min_zoom(&self) -> f64 {
        if self.content.is_zero_area() || self.bounds.is_zero_area() {
            return 1.0;
        }
        let width_scale = self.bounds.width / self.content.width;
        let height_scale = self.bounds.height / self.content.height;
        width_scale.min(height_scale)
    }

    /// The largest zoom; never below [`CropFrame::min_zoom`].
    #[must_use]
    pub fn max_zoom(&self) -> f64 {
        self.config.max_zoom.max(self.min_zoom())
    }

    /// Current zoom scale.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Returns `true` between [`CropFrame::begin_zoom`] and [`CropFrame::end_zoom`].
    #[must_use]
    pub fn is_zooming(&self) -> bool {
        self.zooming
    }

    /// Returns `true` while the crop highlight is shown.
    #[must_use]
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// A pinch started.
    pub fn begin_zoom(&mut self) {
        self.zooming = true;
    }

    /// Applies a pinch step and shows the highlight. Returns the clamped zoom.
    pub fn zoom_to(&mut self, zoom: f64) -> f64 {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(self.min_zoom(), self.max_zoom());
            self.content_offset = self.clamp_offset(self.content_offset);
        }
        self.highlighted = true;
        self.zoom
    }

    /// The pinch ended; hides the highlight.
    pub fn end_zoom(&mut self) {
        self.zooming = false;
        self.highlighted = false;
    }

    /// Size of the content at the current zoom.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content * self.zoom
    }

    /// Frame of the zoomed content in scroll coordinates.
    #[must_use]
    pub fn content_frame(&self) -> Rect {
        let size = self.content_size();
        let centered = |content: f64, bounds: f64| {
            if content < bounds {
                (bounds - content) / 2.0
            } else {
                0.0
            }
        };
        let origin = Point::new(
            centered(size.width, self.bounds.width),
            centered(size.height, self.bounds.height),
        );
        Rect::from_origin_size(origin, size)
    }

    /// Scroll position of the area over the content.
    #[must_use]
    pub fn content_offset(&self) -> Point {
        self.content_offset
    }

    /// Scrolls the area, keeping it over the content.
    pub fn set_content_offset(&mut self, offset: Point) {
        if offset.is_finite() {
            self.content_offset = self.clamp_offset(offset);
        }
    }

    fn clamp_offset(&self, offset: Point) -> Point {
        let size = self.content_size();
        let max = Vec2::new(
            (size.width - self.bounds.width).max(0.0),
            (size.height - self.bounds.height).max(0.0),
        );
        Point::new(offset.x.clamp(0.0, max.x), offset.y.clamp(0.0, max.y))
    }

    /// The part of the area currently showing, in scroll coordinates.
    #[must_use]
    pub fn visible_rect(&self) -> Rect {
        Rect::from_origin_size(self.content_offset, self.bounds)
    }

    /// Region outlined while cropping: the visible part of the content.
    #[must_use]
    pub fn highlight_rect(&self) -> Rect {
        self.visible_rect().intersect(self.content_frame())
    }
}

fn abs_size(size: Size) -> Size {
    Size::new(size.width.abs(), size.height.abs())
}
