// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reconciling photo library changes with a displayed grid.

use alloc::vec::Vec;

use crate::window::{ImageCache, PreheatWindow};

/// Position of an item in a sectioned collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexPath {
    /// Section index.
    pub section: usize,
    /// Item index within the section.
    pub item: usize,
}

impl IndexPath {
    /// Creates an index path.
    #[must_use]
    pub fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }

    /// Index paths for `indices` within `section`, in iteration order.
    #[must_use]
    pub fn items_in(section: usize, indices: impl IntoIterator<Item = usize>) -> Vec<Self> {
        indices
            .into_iter()
            .map(|item| Self::new(section, item))
            .collect()
    }
}

/// A change reported by the photo library for the fetched asset list.
///
/// Index sets refer to the single section of the grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LibraryChange<A> {
    /// The asset list after the change.
    pub assets_after: Vec<A>,
    /// Whether the removed/inserted/changed sets describe the change.
    pub has_incremental_changes: bool,
    /// Whether any asset moved.
    pub has_moves: bool,
    /// Indices removed, relative to the list before the change.
    pub removed: Vec<usize>,
    /// Indices inserted, relative to the list after the change.
    pub inserted: Vec<usize>,
    /// Indices whose content changed, relative to the list after the change.
    pub changed: Vec<usize>,
}

/// How a grid should apply a [`LibraryChange`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CollectionUpdate {
    /// Reload everything.
    Reload,
    /// Apply deletions, then insertions, then reloads in one batch.
    Batch {
        /// Items to delete.
        deleted: Vec<IndexPath>,
        /// Items to insert.
        inserted: Vec<IndexPath>,
        /// Items to reload in place.
        reloaded: Vec<IndexPath>,
    },
}

impl CollectionUpdate {
    /// Returns `true` for a batch that touches nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Reload => false,
            Self::Batch {
                deleted,
                inserted,
                reloaded,
            } => deleted.is_empty() && inserted.is_empty() && reloaded.is_empty(),
        }
    }
}

impl<A> LibraryChange<A> {
    /// The grid update describing this change.
    ///
    /// Changes without incremental details, or with moves, reload the grid.
    #[must_use]
    pub fn collection_update(&self) -> CollectionUpdate {
        if !self.has_incremental_changes || self.has_moves {
            return CollectionUpdate::Reload;
        }
        CollectionUpdate::Batch {
            deleted: IndexPath::items_in(0, self.removed.iter().copied()),
            inserted: IndexPath::items_in(0, self.inserted.iter().copied()),
            reloaded: IndexPath::items_in(0, self.changed.iter().copied()),
        }
    }
}

/// Applies a library change: replaces the asset snapshot, resets the preheat
/// window, and returns the grid update to perform.
pub fn reconcile<A, C>(
    change: LibraryChange<A>,
    assets: &mut Vec<A>,
    window: &mut PreheatWindow,
    cache: &mut C,
) -> CollectionUpdate
where
    C: ImageCache<A> + ?Sized,
{
    let update = change.collection_update();
    if update == CollectionUpdate::Reload {
        tracing::debug!(
            incremental = change.has_incremental_changes,
            moves = change.has_moves,
            "library change reloads the grid"
        );
    }
    *assets = change.assets_after;
    window.reset(cache);
    update
}
