//! The `ColumnPool`: every demand key and its columns.

use std::collections::BTreeMap;
use std::ops::RangeBounds;

use ta_core::LinkId;

use crate::{Column, ColumnVec, ColumnVecKey};

/// Ordered map from [`ColumnVecKey`] to [`ColumnVec`].
///
/// A `BTreeMap` keeps iteration order independent of insertion order, which
/// the assignment relies on for reproducible results and which output
/// writers use to split the store into contiguous key ranges.
#[derive(Clone, Debug, Default)]
pub struct ColumnPool {
    vecs: BTreeMap<ColumnVecKey, ColumnVec>,
}

impl ColumnPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `volume` of demand for `key`, adding to any earlier volume.
    ///
    /// Non-positive (or NaN) volumes are ignored and never create a key.
    /// Returns `true` if the volume was recorded.
    pub fn update(&mut self, key: ColumnVecKey, volume: f64) -> bool {
        if volume.is_nan() || volume <= 0.0 {
            return false;
        }
        self.vecs.entry(key).or_default().add_volume(volume);
        true
    }

    /// Existing column of `key` with this link sequence, or a newly inserted
    /// zero-flow one.  `None` if `key` has no recorded demand.
    pub fn get_or_insert(&mut self, key: &ColumnVecKey, links: Vec<LinkId>) -> Option<&mut Column> {
        self.vecs.get_mut(key).map(|cv| cv.get_or_insert(links).0)
    }

    /// Columns of `key`; empty if the key is unknown.
    pub fn columns_for(&self, key: &ColumnVecKey) -> impl Iterator<Item = &Column> + '_ {
        self.vecs
            .get(key)
            .map(|cv| cv.columns())
            .unwrap_or_default()
            .iter()
    }

    pub fn get(&self, key: &ColumnVecKey) -> Option<&ColumnVec> {
        self.vecs.get(key)
    }

    pub fn get_mut(&mut self, key: &ColumnVecKey) -> Option<&mut ColumnVec> {
        self.vecs.get_mut(key)
    }

    pub fn contains_key(&self, key: &ColumnVecKey) -> bool {
        self.vecs.contains_key(key)
    }

    /// Target demand volume of `key`.
    pub fn od_volume(&self, key: &ColumnVecKey) -> Option<f64> {
        self.vecs.get(key).map(ColumnVec::od_volume)
    }

    /// Number of demand keys.
    pub fn len(&self) -> usize {
        self.vecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vecs.is_empty()
    }

    /// Total number of columns across all keys.
    pub fn column_count(&self) -> usize {
        self.vecs.values().map(ColumnVec::len).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ColumnVecKey> + '_ {
        self.vecs.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ColumnVecKey, &ColumnVec)> + '_ {
        self.vecs.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&ColumnVecKey, &mut ColumnVec)> + '_ {
        self.vecs.iter_mut()
    }

    /// Keys (and their columns) within `range`, in key order.
    pub fn range<R>(&self, range: R) -> impl Iterator<Item = (&ColumnVecKey, &ColumnVec)> + '_
    where
        R: RangeBounds<ColumnVecKey>,
    {
        self.vecs.range(range)
    }
}
