// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_preheat --heading-base-level=0

//! Understory Preheat: scroll-driven image cache windows.
//!
//! Thumbnail grids feel instant when the images just outside the viewport
//! are already being prepared. This crate keeps a **preheat window**, the
//! viewport grown by half its height above and below, and as the viewport
//! scrolls it works out which regions entered and which left the window, maps
//! those regions to asset identifiers, and issues start/stop caching requests.
//!
//! The core pieces are:
//!
//! - [`difference()`]: the vertical difference between two rectangles as
//!   [`RectDifference::Added`] / [`RectDifference::Removed`] strips.
//! - [`PreheatWindow`]: remembers the last window, skips small scrolls, and
//!   drives an [`ImageCache`] through an [`AssetLocator`].
//! - [`GridLayout`] and [`GridAssets`]: a uniform column grid that turns a
//!   rectangle into the identifiers of the cells it overlaps.
//! - [`LibraryChange`] and [`reconcile`]: apply a change in the underlying
//!   asset list to the grid and restart caching.
//!
//! This crate does **not** load or decode images. Hosts implement
//! [`ImageCache`] over their platform's caching image manager.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_preheat::{GridAssets, GridLayout, ImageCache, PreheatWindow};
//!
//! #[derive(Default)]
//! struct Cache {
//!     cached: Vec<u32>,
//! }
//!
//! impl ImageCache<u32> for Cache {
//!     fn start_caching(&mut self, assets: &[u32], _: Size) {
//!         self.cached.extend_from_slice(assets);
//!     }
//!     fn stop_caching(&mut self, assets: &[u32], _: Size) {
//!         self.cached.retain(|a| !assets.contains(a));
//!     }
//!     fn stop_caching_all(&mut self) {
//!         self.cached.clear();
//!     }
//! }
//!
//! // Four 80pt columns separated by 2pt, 100 assets.
//! let grid = GridLayout::square(326.0, 4, 2.0);
//! let ids: Vec<u32> = (0..100).collect();
//! let locator = GridAssets::new(&grid, &ids);
//!
//! let mut cache = Cache::default();
//! let mut window = PreheatWindow::default();
//! window.reset(&mut cache);
//!
//! // The first update caches the viewport plus half a screen below it.
//! let viewport = Rect::new(0.0, 0.0, 326.0, 164.0);
//! let change = window.update(viewport, grid.item_size, &locator, &mut cache);
//! assert!(change.is_some());
//! assert_eq!(cache.cached, (0..12).collect::<Vec<u32>>());
//!
//! // A tiny scroll is absorbed.
//! let nudged = Rect::new(0.0, 10.0, 326.0, 174.0);
//! assert!(window.update(nudged, grid.item_size, &locator, &mut cache).is_none());
//! ```
//!
//! ## Geometry
//!
//! Differences only describe vertical extension, which is exact for windows
//! that scroll vertically and keep their horizontal extent. Grids that scroll
//! horizontally need a full rectangle subtraction instead.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod changes;
mod difference;
mod grid;
mod window;

pub use changes::{CollectionUpdate, IndexPath, LibraryChange, reconcile};
pub use difference::{Differences, RectDifference, Strips, difference, exclusive_or, overlaps};
pub use grid::{GridAssets, GridLayout};
pub use window::{AssetLocator, ImageCache, PreheatChange, PreheatConfig, PreheatWindow};
