//! Strongly typed, zero-cost identifier wrappers.
//!
//! Every entity in the network and settings aggregates lives in a contiguous
//! `Vec` and is referenced by one of these indices.  All IDs are
//! `Copy + Ord + Hash` so they compose into map keys (see `ColumnVecKey`)
//! without ceremony.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a network node (physical or zone centroid).
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a directed link (physical or connector).
    pub struct LinkId(u32);
}

typed_id! {
    /// Index of a zone.
    pub struct ZoneId(u32);
}

typed_id! {
    /// Index of a traveler class in the settings registry.
    pub struct AgentTypeId(u16);
}

typed_id! {
    /// Index of a demand (time) period.
    pub struct PeriodId(u16);
}
