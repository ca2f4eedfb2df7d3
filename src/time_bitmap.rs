//! Compact weekly time-occupation bitmap and the canonical slot grid.
//!
//! The slot grid, day ordering and bit layout below are a stable wire and
//! persistence contract: any bitmap persisted outside a single process is
//! only meaningful for this exact `(SLOTS, DAYS)` pair. If the grid ever
//! changes, every persisted bitmap must be recomputed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SchedulerError};

/// Canonical 20-minute slot boundaries, 08:10 to 22:00.
pub const SLOTS: [(&str, &str); 28] = [
    ("0810", "0830"),
    ("0840", "0900"),
    ("0910", "0930"),
    ("0940", "1000"),
    ("1010", "1030"),
    ("1040", "1100"),
    ("1110", "1130"),
    ("1140", "1200"),
    ("1210", "1230"),
    ("1240", "1300"),
    ("1310", "1330"),
    ("1340", "1400"),
    ("1410", "1430"),
    ("1440", "1500"),
    ("1510", "1530"),
    ("1540", "1600"),
    ("1610", "1630"),
    ("1640", "1700"),
    ("1710", "1730"),
    ("1740", "1800"),
    ("1810", "1830"),
    ("1840", "1900"),
    ("1910", "1930"),
    ("1940", "2000"),
    ("2010", "2030"),
    ("2040", "2100"),
    ("2110", "2130"),
    ("2140", "2200"),
];

/// Canonical day order, matching the upstream `monday..sunday` boolean fields.
pub const DAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Number of 20-minute slots per day.
pub const SLOT_COUNT: usize = SLOTS.len();
/// Number of days in the week grid.
pub const DAY_COUNT: usize = DAYS.len();
/// Total bits needed to represent the full week (196).
const TOTAL_BITS: usize = SLOT_COUNT * DAY_COUNT;

/// A compact weekly occupation set: one bit per (day, slot) cell.
///
/// Two bitmaps overlap iff their bitwise AND is non-zero. The empty bitmap
/// (all bits zero) represents an asynchronous meeting with no weekly
/// footprint. Equality and hashing are equality/hashing of the underlying
/// 196-bit integer, stored here as two `u128` limbs since the crate avoids
/// pulling in a bigint dependency for a fixed, known width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeBitmap {
    lo: u128,
    hi: u128,
}

impl TimeBitmap {
    /// The empty bitmap: no weekly footprint.
    pub const fn empty() -> Self {
        TimeBitmap { lo: 0, hi: 0 }
    }

    /// True iff no bits are set.
    pub fn is_empty(self) -> bool {
        self.lo == 0 && self.hi == 0
    }

    /// Bitwise union (OR).
    pub fn union(self, other: Self) -> Self {
        TimeBitmap {
            lo: self.lo | other.lo,
            hi: self.hi | other.hi,
        }
    }

    /// Bitwise intersection (AND).
    pub fn intersect(self, other: Self) -> Self {
        TimeBitmap {
            lo: self.lo & other.lo,
            hi: self.hi & other.hi,
        }
    }

    /// Streaming overlap check: folds a running union and reports true as
    /// soon as a new bitmap intersects it. O(k) in the number of inputs.
    pub fn overlaps<I>(bitmaps: I) -> bool
    where
        I: IntoIterator<Item = TimeBitmap>,
    {
        let mut running = TimeBitmap::empty();
        for bitmap in bitmaps {
            if !running.intersect(bitmap).is_empty() {
                return true;
            }
            running = running.union(bitmap);
        }
        false
    }

    /// Builds the bitmap for one meeting span on one day.
    ///
    /// `begin` must equal the start of some canonical slot and `end` must
    /// equal the end of some canonical slot; all cells whose
    /// `[slot_begin, slot_end]` falls within `[begin, end]` are set.
    pub fn from_span(begin: &str, end: &str, day: &str) -> Result<Self> {
        let start_index = SLOTS
            .iter()
            .position(|(slot_begin, _)| *slot_begin == begin)
            .ok_or_else(|| SchedulerError::UnknownTimeBoundary(begin.to_string()))?;
        let end_index = SLOTS
            .iter()
            .position(|(_, slot_end)| *slot_end == end)
            .ok_or_else(|| SchedulerError::UnknownTimeBoundary(end.to_string()))?;
        let day_index = day_index(day)?;

        let first_bit = start_index + day_index * SLOT_COUNT;
        let last_bit = end_index + day_index * SLOT_COUNT;

        Ok(Self::set_range(first_bit, last_bit))
    }

    /// Sets every bit in `[first, last]` inclusive. `first` and `last` are
    /// absolute bit indices into the 196-bit week; `last >= first` is
    /// assumed (true for any pair of slot indices on the same day).
    fn set_range(first: usize, last: usize) -> Self {
        let mut bitmap = TimeBitmap::empty();
        for bit in first..=last {
            bitmap = bitmap.union(Self::bit(bit));
        }
        bitmap
    }

    /// A bitmap with a single absolute bit set.
    fn bit(index: usize) -> Self {
        debug_assert!(index < TOTAL_BITS);
        if index < 128 {
            TimeBitmap {
                lo: 1u128 << index,
                hi: 0,
            }
        } else {
            TimeBitmap {
                lo: 0,
                hi: 1u128 << (index - 128),
            }
        }
    }

    /// Extracts the `SLOT_COUNT`-bit slice for one day (0 = monday).
    fn day_slice(self, day_index: usize) -> u64 {
        let first = day_index * SLOT_COUNT;
        let mut slice = 0u64;
        for offset in 0..SLOT_COUNT {
            if self.test_bit(first + offset) {
                slice |= 1u64 << offset;
            }
        }
        slice
    }

    fn test_bit(self, index: usize) -> bool {
        if index < 128 {
            (self.lo >> index) & 1 == 1
        } else {
            (self.hi >> (index - 128)) & 1 == 1
        }
    }

    /// For each day, the number of zero cells strictly between the first
    /// and last set bit of that day's slice (zero if the day has no set
    /// bits). Used by the break-counting preference.
    pub fn count_idle_gaps_per_day(self) -> [u32; DAY_COUNT] {
        let mut gaps = [0u32; DAY_COUNT];
        for (day_index, gap) in gaps.iter_mut().enumerate() {
            let slice = self.day_slice(day_index);
            if slice == 0 {
                continue;
            }
            let first = slice.trailing_zeros();
            let last = 63 - slice.leading_zeros();
            let mut count = 0;
            for bit in first..=last {
                if (slice >> bit) & 1 == 0 {
                    count += 1;
                }
            }
            *gap = count;
        }
        gaps
    }

    /// True iff this bitmap has any bit set on the given canonical day.
    pub fn occupies_day(self, day: &str) -> Result<bool> {
        let index = day_index(day)?;
        Ok(self.day_slice(index) != 0)
    }
}

impl Default for TimeBitmap {
    fn default() -> Self {
        Self::empty()
    }
}

fn day_index(day: &str) -> Result<usize> {
    DAYS.iter()
        .position(|candidate| *candidate == day)
        .ok_or_else(|| SchedulerError::UnknownDay(day.to_string()))
}

impl fmt::Display for TimeBitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeBitmap(hi={:#034x}, lo={:#034x})", self.hi, self.lo)
    }
}
