//! A single path and the deduplicated set of paths serving one key.

use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHasher};

use ta_core::LinkId;

// ── Column ────────────────────────────────────────────────────────────────────

/// One loop-free path (physical links only) with its assigned flow.
#[derive(Clone, Debug)]
pub struct Column {
    id:    usize,
    links: Vec<LinkId>,

    /// Assigned flow volume.  Never negative.
    pub volume: f64,

    /// Cached generalized cost (sum of link travel times, minutes).
    pub travel_time: f64,

    /// Cached path length.
    pub distance: f64,
}

impl Column {
    /// Position of this column within its key, stable for the store's life.
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    #[inline]
    pub fn links(&self) -> &[LinkId] {
        &self.links
    }
}

fn path_hash(links: &[LinkId]) -> u64 {
    let mut h = FxHasher::default();
    links.hash(&mut h);
    h.finish()
}

// ── ColumnVec ─────────────────────────────────────────────────────────────────

/// All columns of one demand key plus its target demand volume.
///
/// Columns are deduplicated by link sequence: a path hash narrows the
/// candidates and full sequence equality decides.
#[derive(Clone, Debug, Default)]
pub struct ColumnVec {
    od_volume: f64,
    columns:   Vec<Column>,
    by_path:   FxHashMap<u64, Vec<usize>>,
}

impl ColumnVec {
    /// Target demand volume of the key.
    #[inline]
    pub fn od_volume(&self) -> f64 {
        self.od_volume
    }

    pub(crate) fn add_volume(&mut self, volume: f64) {
        self.od_volume += volume;
    }

    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[inline]
    pub fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Sum of column flows (equals `od_volume` once assigned).
    pub fn total_volume(&self) -> f64 {
        self.columns.iter().map(|c| c.volume).sum()
    }

    /// The column whose link sequence equals `links`, if any.
    pub fn find(&self, links: &[LinkId]) -> Option<&Column> {
        self.by_path
            .get(&path_hash(links))?
            .iter()
            .map(|&i| &self.columns[i])
            .find(|c| c.links == links)
    }

    /// Return the column with this link sequence, inserting it with zero
    /// flow if absent.  The flag is `true` when a new column was created.
    pub fn get_or_insert(&mut self, links: Vec<LinkId>) -> (&mut Column, bool) {
        let hash = path_hash(&links);
        let bucket = self.by_path.entry(hash).or_default();

        if let Some(&i) = bucket.iter().find(|&&i| self.columns[i].links == links) {
            return (&mut self.columns[i], false);
        }

        let id = self.columns.len();
        bucket.push(id);
        self.columns.push(Column {
            id,
            links,
            volume:      0.0,
            travel_time: 0.0,
            distance:    0.0,
        });
        (&mut self.columns[id], true)
    }

    /// Index of the cheapest column (lowest index on ties).
    pub fn min_cost_index(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, c) in self.columns.iter().enumerate() {
            match best {
                Some(b) if self.columns[b].travel_time <= c.travel_time => {}
                _ => best = Some(i),
            }
        }
        best
    }
}
