//! BPR volume-delay function.
//!
//! ```text
//! t = fftt * (1 + alpha * (v / effective_cap)^beta)
//! effective_cap = cap * phf   if phf > 0
//!               = cap         otherwise
//! ```
//!
//! A non-positive effective capacity yields an infinite travel time, which
//! the shortest-path search treats as an unusable link.

pub const DEFAULT_ALPHA: f64 = 0.15;
pub const DEFAULT_BETA:  f64 = 4.0;
pub const DEFAULT_MU:    f64 = 1000.0;
/// Peak-hour factor sentinel meaning "do not scale capacity".
pub const UNUSED_PHF:    f64 = -1.0;

/// Resolved volume-delay parameters of one link for one demand period.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VdfPeriod {
    pub alpha:    f64,
    pub beta:     f64,
    /// Queue discharge rate.  Carried for output; BPR ignores it.
    pub mu:       f64,
    /// Nominal capacity for the period.
    pub capacity: f64,
    /// Free-flow travel time in minutes.
    pub fftt:     f64,
    pub phf:      f64,
}

impl VdfPeriod {
    /// Capacity after peak-hour-factor scaling.
    #[inline]
    pub fn effective_capacity(&self) -> f64 {
        if self.phf > 0.0 {
            self.capacity * self.phf
        } else {
            self.capacity
        }
    }

    /// Travel time in minutes at `volume`.
    pub fn travel_time(&self, volume: f64) -> f64 {
        let cap = self.effective_capacity();
        if cap.is_nan() || cap <= 0.0 {
            return f64::INFINITY;
        }
        let voc = volume.max(0.0) / cap;
        self.fftt * (1.0 + self.alpha * voc.powf(self.beta))
    }

    /// Parameters of a zero-cost centroid connector.
    pub(crate) fn connector() -> Self {
        Self {
            alpha:    0.0,
            beta:     1.0,
            mu:       DEFAULT_MU,
            capacity: f64::INFINITY,
            fftt:     0.0,
            phf:      UNUSED_PHF,
        }
    }
}

/// Raw per-period VDF parameters as supplied by a loader.  `None` fields
/// resolve to the documented defaults in [`VdfSpec::resolve`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VdfSpec {
    pub alpha:    Option<f64>,
    pub beta:     Option<f64>,
    pub mu:       Option<f64>,
    pub capacity: Option<f64>,
    pub fftt:     Option<f64>,
    pub phf:      Option<f64>,
}

impl VdfSpec {
    /// Fill missing parameters.  `link_fftt` and `link_capacity` are the
    /// owning link's computed free-flow time and total capacity.
    pub fn resolve(&self, link_fftt: f64, link_capacity: f64) -> VdfPeriod {
        VdfPeriod {
            alpha:    self.alpha.unwrap_or(DEFAULT_ALPHA),
            beta:     self.beta.unwrap_or(DEFAULT_BETA),
            mu:       self.mu.unwrap_or(DEFAULT_MU),
            capacity: self.capacity.unwrap_or(link_capacity),
            fftt:     self.fftt.unwrap_or(link_fftt),
            phf:      self.phf.unwrap_or(UNUSED_PHF),
        }
    }
}
