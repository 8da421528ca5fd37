// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::Cell;
use std::hash::Hash;
use std::rc::Rc;

use kurbo::{Rect, Size};
use understory_floating_panel::{
    FloatingPanel, PanOutcome, PanSample, PanelConfig, PanelEvents, PanelState,
};
use understory_preheat::{
    CollectionUpdate, GridAssets, GridLayout, ImageCache, LibraryChange, PreheatChange,
    PreheatConfig, PreheatWindow, reconcile,
};

use crate::crop::{CropConfig, CropFrame};

/// Tuning for a [`PhotoPicker`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickerConfig {
    /// Floating panel behavior.
    pub panel: PanelConfig,
    /// Cache window behavior.
    pub preheat: PreheatConfig,
    /// Crop area zoom limits.
    pub crop: CropConfig,
    /// Columns in the photo grid.
    pub columns: usize,
    /// Gap between grid cells.
    pub spacing: f64,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            panel: PanelConfig::default(),
            preheat: PreheatConfig::default(),
            crop: CropConfig::default(),
            columns: 4,
            spacing: 2.0,
        }
    }
}

impl PickerConfig {
    /// The square-cell grid filling `width`.
    #[must_use]
    pub fn grid(&self, width: f64) -> GridLayout {
        GridLayout::square(width, self.columns, self.spacing)
    }
}

/// Work the host performs for the picker, drained with
/// [`PhotoPicker::drain_events`].
#[derive(Clone, Debug, PartialEq)]
pub enum PickerEvent<A> {
    /// The user picked an asset; load it into the crop area.
    Selected {
        /// Item index in the grid.
        index: usize,
        /// The picked asset.
        asset: A,
    },
    /// Set the grid's vertical content offset.
    ScrollGrid {
        /// New content offset.
        offset_y: f64,
    },
    /// Scroll the grid so `index` sits at the top.
    ScrollToItem {
        /// Item index in the grid.
        index: usize,
        /// Content offset that puts the item at the top.
        offset_y: f64,
    },
}

/// The photo picker screen without its views.
///
/// A crop area sits inside a [`FloatingPanel`] that folds up over a grid of
/// photos. Caching of grid thumbnails follows the grid's scroll position
/// through a [`PreheatWindow`].
///
/// Panel effects are returned from each handler; everything else the host
/// must do is queued as [`PickerEvent`]s.
pub struct PhotoPicker<A> {
    config: PickerConfig,
    panel: FloatingPanel,
    window: PreheatWindow,
    grid: GridLayout,
    crop: CropFrame,
    assets: Vec<A>,
    grid_offset_y: f64,
    pinned_offset_y: f64,
    pending_scroll: Rc<Cell<Option<usize>>>,
    events: Vec<PickerEvent<A>>,
}

impl<A: std::fmt::Debug> std::fmt::Debug for PhotoPicker<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoPicker")
            .field("panel", &self.panel)
            .field("window", &self.window)
            .field("grid", &self.grid)
            .field("crop", &self.crop)
            .field("assets", &self.assets.len())
            .field("grid_offset_y", &self.grid_offset_y)
            .field("pinned_offset_y", &self.pinned_offset_y)
            .field("pending_scroll", &self.pending_scroll.get())
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl<A> PhotoPicker<A>
where
    A: Clone + Eq + Hash,
{
    /// Creates a picker with an unfolded panel.
    ///
    /// `panel_bounds` is the unfolded panel frame; the crop area fills it
    /// down to the panel's visible strip. The grid spans the panel's width.
    #[must_use]
    pub fn new(panel_bounds: Rect, config: PickerConfig) -> Self {
        let panel = FloatingPanel::new(panel_bounds, config.panel);
        let crop_bounds = Size::new(panel.bounds().width(), panel.fold_extent());
        Self {
            grid: config.grid(panel.bounds().width()),
            window: PreheatWindow::new(config.preheat),
            crop: CropFrame::new(crop_bounds, config.crop),
            panel,
            config,
            assets: Vec::new(),
            grid_offset_y: 0.0,
            pinned_offset_y: 0.0,
            pending_scroll: Rc::new(Cell::new(None)),
            events: Vec::new(),
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// The floating panel.
    #[must_use]
    pub fn panel(&self) -> &FloatingPanel {
        &self.panel
    }

    /// The floating panel.
    ///
    /// Report layout changes through [`PhotoPicker::set_panel_bounds`] so the
    /// crop area and grid follow.
    pub fn panel_mut(&mut self) -> &mut FloatingPanel {
        &mut self.panel
    }

    /// Reports the unfolded panel frame after layout.
    ///
    /// The crop area is refitted to the panel above its visible strip and the
    /// grid cells are resized to the new width.
    pub fn set_panel_bounds(&mut self, bounds: Rect) {
        self.panel.set_panel_bounds(bounds);
        let width = self.panel.bounds().width();
        self.crop.set_bounds(Size::new(width, self.panel.fold_extent()));
        self.grid = self.config.grid(width);
    }

    /// The crop area.
    #[must_use]
    pub fn crop(&self) -> &CropFrame {
        &self.crop
    }

    /// The crop area, for zoom and scroll input.
    pub fn crop_mut(&mut self) -> &mut CropFrame {
        &mut self.crop
    }

    /// The photo grid layout.
    #[must_use]
    pub fn grid(&self) -> &GridLayout {
        &self.grid
    }

    /// The thumbnail cache window.
    #[must_use]
    pub fn window(&self) -> &PreheatWindow {
        &self.window
    }

    /// Assets shown in the grid, in display order.
    #[must_use]
    pub fn assets(&self) -> &[A] {
        &self.assets
    }

    /// Replaces the displayed assets with a fresh fetch.
    pub fn set_assets(&mut self, assets: Vec<A>) {
        self.assets = assets;
    }

    /// Last vertical content offset of the grid.
    #[must_use]
    pub fn grid_offset_y(&self) -> f64 {
        self.grid_offset_y
    }

    /// Whether the crop area accepts touches.
    #[must_use]
    pub fn crop_interaction_enabled(&self) -> bool {
        self.panel.state() == PanelState::Unfolded
    }

    /// Takes the queued host work.
    pub fn drain_events(&mut self) -> Vec<PickerEvent<A>> {
        std::mem::take(&mut self.events)
    }

    /// The screen appeared: start caching from scratch.
    pub fn reset<C: ImageCache<A> + ?Sized>(&mut self, cache: &mut C) {
        self.window.reset(cache);
    }

    /// The grid scrolled; `visible` is its bounds in content coordinates.
    ///
    /// Thumbnails are cached at the grid's cell size. Pulling the grid past
    /// its top lets the same drag move the panel.
    pub fn grid_did_scroll<C>(&mut self, visible: Rect, cache: &mut C) -> Option<PreheatChange>
    where
        C: ImageCache<A> + ?Sized,
    {
        self.grid_offset_y = visible.y0;
        self.panel.set_allow_pan_outside(visible.y0 < 0.0);
        let locator = GridAssets::new(&self.grid, &self.assets);
        self.window.update(visible, self.grid.item_size, &locator, cache)
    }

    /// A pan that began on the panel itself.
    ///
    /// Returns `false` while zooming.
    pub fn check_pan(&mut self) -> bool {
        if self.crop.is_zooming() {
            return false;
        }
        self.panel.set_allow_pan_outside(true);
        true
    }

    /// A pan anywhere on the screen.
    ///
    /// Returns `None` while the crop area is zooming.
    pub fn main_pan(&mut self, sample: PanSample) -> Option<PanOutcome> {
        if self.crop.is_zooming() {
            tracing::debug!("pan ignored while zooming");
            return None;
        }
        if self.panel.state() == PanelState::Unfolded {
            self.panel.set_allow_pan_outside(false);
        }
        let outcome = self.panel.receive_pan(sample);
        self.sync_grid_scrolling();
        Some(outcome)
    }

    // While the panel moves the grid holds still under the finger.
    fn sync_grid_scrolling(&mut self) {
        if self.panel.state() != PanelState::Moved {
            self.pinned_offset_y = self.grid_offset_y;
            return;
        }
        if self.pinned_offset_y < 0.0 {
            self.pinned_offset_y = 0.0;
        }
        if self.grid_offset_y != self.pinned_offset_y {
            self.grid_offset_y = self.pinned_offset_y;
            self.events.push(PickerEvent::ScrollGrid {
                offset_y: self.pinned_offset_y,
            });
        }
    }

    /// A tap on the panel.
    pub fn tap(&mut self) -> PanelEvents {
        self.panel.tap()
    }

    /// The user picked the grid item at `index`.
    ///
    /// The panel unfolds to show the crop area; once it settles the grid
    /// scrolls the item to the top.
    pub fn select(&mut self, index: usize) -> PanelEvents {
        let Some(asset) = self.assets.get(index).cloned() else {
            tracing::debug!(index, len = self.assets.len(), "selection out of range");
            return PanelEvents::new();
        };
        let events = self.panel.restore(PanelState::Unfolded, true);
        let pending = Rc::clone(&self.pending_scroll);
        self.panel.set_animation_completion(move |_| pending.set(Some(index)));
        self.events.push(PickerEvent::Selected { index, asset });
        events
    }

    /// The host finished animating the panel.
    pub fn finish_snap(&mut self, finished: bool) -> PanelEvents {
        let events = self.panel.finish_snap(finished);
        if let Some(index) = self.pending_scroll.take() {
            let offset_y = (self.grid.item_frame(index).y0 - self.grid.origin.y).max(0.0);
            self.grid_offset_y = offset_y;
            self.events.push(PickerEvent::ScrollToItem { index, offset_y });
        }
        events
    }

    /// The photo library changed.
    pub fn library_did_change<C>(
        &mut self,
        change: LibraryChange<A>,
        cache: &mut C,
    ) -> CollectionUpdate
    where
        C: ImageCache<A> + ?Sized,
    {
        reconcile(change, &mut self.assets, &mut self.window, cache)
    }
}
