// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The preheat window: turns viewport changes into start/stop caching requests.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashSet;
use kurbo::{Rect, Size};

use crate::difference::{Differences, RectDifference, difference};

/// Maps a region of the scrolled content to the assets displayed there.
pub trait AssetLocator {
    /// Identifier of a single asset.
    type Asset;

    /// Calls `f` with every asset whose cell overlaps `area`.
    fn visit_assets<F: FnMut(Self::Asset)>(&self, area: Rect, f: F);
}

/// An image cache that prepares thumbnails ahead of display.
///
/// Requests are fire-and-forget.
pub trait ImageCache<A> {
    /// Starts preparing images for `assets` at `target_size`.
    fn start_caching(&mut self, assets: &[A], target_size: Size);

    /// Stops preparing images for `assets` at `target_size`.
    fn stop_caching(&mut self, assets: &[A], target_size: Size);

    /// Stops every in-flight request.
    fn stop_caching_all(&mut self);
}

/// Tuning for a [`PreheatWindow`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreheatConfig {
    /// Fraction of the viewport height added above and below it.
    pub lookaround: f64,
    /// Fraction of the viewport height the window's midpoint must move
    /// before caching is recomputed.
    pub hysteresis: f64,
}

impl Default for PreheatConfig {
    fn default() -> Self {
        Self {
            lookaround: 0.5,
            hysteresis: 1.0 / 3.0,
        }
    }
}

/// What a recomputing [`PreheatWindow::update`] did.
#[derive(Clone, Debug, PartialEq)]
pub struct PreheatChange {
    /// The new preheat rectangle.
    pub preheat_rect: Rect,
    /// Regions that entered and left the window.
    pub differences: Differences,
    /// Number of assets caching was started for.
    pub started: usize,
    /// Number of assets caching was stopped for.
    pub stopped: usize,
}

/// Tracks the region of a vertically scrolling grid whose images are cached.
///
/// The window covers the visible viewport plus a margin above and below it.
/// As the viewport scrolls, [`PreheatWindow::update`] asks an [`ImageCache`]
/// to start caching assets that entered the window and stop caching those
/// that left it. Small scrolls are absorbed by a hysteresis threshold.
///
/// All methods must be called from the thread that delivers UI events.
#[derive(Clone, Debug, PartialEq)]
pub struct PreheatWindow {
    config: PreheatConfig,
    previous: Rect,
}

impl Default for PreheatWindow {
    fn default() -> Self {
        Self::new(PreheatConfig::default())
    }
}

impl PreheatWindow {
    /// Creates an empty window.
    #[must_use]
    pub fn new(config: PreheatConfig) -> Self {
        Self {
            config: PreheatConfig {
                lookaround: non_negative(config.lookaround),
                hysteresis: non_negative(config.hysteresis),
            },
            previous: Rect::ZERO,
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &PreheatConfig {
        &self.config
    }

    /// The last rectangle caching requests were issued for.
    #[must_use]
    pub fn previous_preheat_rect(&self) -> Rect {
        self.previous
    }

    /// The preheat rectangle for a viewport: the viewport grown vertically by
    /// [`PreheatConfig::lookaround`] of its height on each side.
    #[must_use]
    pub fn preheat_rect(&self, viewport: Rect) -> Rect {
        viewport.inflate(0.0, self.config.lookaround * viewport.height())
    }

    /// Returns `true` if moving to `viewport` would recompute the window.
    #[must_use]
    pub fn needs_update(&self, viewport: Rect) -> bool {
        let delta = (self.preheat_rect(viewport).center().y - self.previous.center().y).abs();
        delta > viewport.height() * self.config.hysteresis
    }

    /// Moves the window to cover `viewport`.
    ///
    /// Returns `None` without touching the cache when the window's midpoint
    /// moved no more than the hysteresis threshold. Otherwise stop requests
    /// for assets that left the window are issued before start requests for
    /// assets that entered it, and the new window is remembered.
    pub fn update<L, C>(
        &mut self,
        viewport: Rect,
        target_size: Size,
        locator: &L,
        cache: &mut C,
    ) -> Option<PreheatChange>
    where
        L: AssetLocator,
        L::Asset: Clone + Eq + Hash,
        C: ImageCache<L::Asset> + ?Sized,
    {
        if !self.needs_update(viewport) {
            return None;
        }

        let preheat_rect = self.preheat_rect(viewport);
        let differences = difference(self.previous, preheat_rect);

        let mut to_start = AssetBatch::default();
        let mut to_stop = AssetBatch::default();
        for diff in &differences {
            match *diff {
                RectDifference::Added(area) => {
                    locator.visit_assets(area, |asset| to_start.push(asset));
                }
                RectDifference::Removed(area) => {
                    locator.visit_assets(area, |asset| to_stop.push(asset));
                }
            }
        }

        if !to_stop.assets.is_empty() {
            cache.stop_caching(&to_stop.assets, target_size);
        }
        if !to_start.assets.is_empty() {
            cache.start_caching(&to_start.assets, target_size);
        }
        tracing::debug!(
            regions = differences.len(),
            started = to_start.assets.len(),
            stopped = to_stop.assets.len(),
            "preheat window moved"
        );

        self.previous = preheat_rect;
        Some(PreheatChange {
            preheat_rect,
            differences,
            started: to_start.assets.len(),
            stopped: to_stop.assets.len(),
        })
    }

    /// Stops all caching and empties the window.
    pub fn reset<A, C: ImageCache<A> + ?Sized>(&mut self, cache: &mut C) {
        cache.stop_caching_all();
        self.previous = Rect::ZERO;
        tracing::debug!("preheat window reset");
    }
}

/// Assets in first-seen order without duplicates.
struct AssetBatch<A> {
    assets: Vec<A>,
    seen: HashSet<A>,
}

impl<A> Default for AssetBatch<A> {
    fn default() -> Self {
        Self {
            assets: Vec::new(),
            seen: HashSet::new(),
        }
    }
}

impl<A: Clone + Eq + Hash> AssetBatch<A> {
    fn push(&mut self, asset: A) {
        if self.seen.insert(asset.clone()) {
            self.assets.push(asset);
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
