//! Slot intervals and busy calendars.
//!
//! A busy calendar records, per key (faculty name or room identifier),
//! the slot intervals already committed. Faculty and room calendars are
//! process-wide: every cohort's placements land in the same calendars,
//! so a faculty member teaching two cohorts is never double-booked.
//!
//! # Invariant
//! No two intervals committed under the same key overlap.
//! [`BusyCalendar::commit`] refuses an overlapping interval.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

/// A half-open slot interval `[start, end)` on one day.
///
/// `day` and the slot bounds are indices into a [`TimeGrid`](super::TimeGrid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotInterval {
    /// Day index.
    pub day: usize,
    /// First slot (inclusive).
    pub start: usize,
    /// Last slot (exclusive).
    pub end: usize,
}

impl SlotInterval {
    /// Creates a new interval.
    pub fn new(day: usize, start: usize, end: usize) -> Self {
        Self { day, start, end }
    }

    /// Creates an interval from a slot range.
    pub fn from_range(day: usize, range: &Range<usize>) -> Self {
        Self::new(day, range.start, range.end)
    }

    /// Number of slots covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the interval covers no slot.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a slot on the same day falls within this interval.
    #[inline]
    pub fn contains(&self, day: usize, slot: usize) -> bool {
        self.day == day && slot >= self.start && slot < self.end
    }

    /// Whether two intervals share at least one slot.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day && self.start < other.end && other.start < self.end
    }

    /// Slot indices covered.
    pub fn slots(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Rejected commit: the interval overlaps an existing commitment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarConflict {
    /// Calendar key (faculty or room).
    pub key: String,
    /// Interval that was being committed.
    pub requested: SlotInterval,
    /// Interval already on the calendar.
    pub existing: SlotInterval,
}

impl fmt::Display for CalendarConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' already busy on day {} slots {}..{} (requested {}..{})",
            self.key,
            self.existing.day,
            self.existing.start,
            self.existing.end,
            self.requested.start,
            self.requested.end
        )
    }
}

impl std::error::Error for CalendarConflict {}

/// Committed intervals per key.
///
/// Keys iterate in sorted order, so anything derived from a calendar
/// is deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusyCalendar {
    entries: BTreeMap<String, Vec<SlotInterval>>,
}

impl BusyCalendar {
    /// Creates an empty calendar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` has no commitment overlapping `interval`.
    pub fn is_free(&self, key: &str, interval: &SlotInterval) -> bool {
        self.first_overlap(key, interval).is_none()
    }

    /// Fails with the first commitment of `key` overlapping `interval`.
    pub fn check(&self, key: &str, interval: &SlotInterval) -> Result<(), CalendarConflict> {
        match self.first_overlap(key, interval) {
            Some(existing) => Err(CalendarConflict {
                key: key.to_string(),
                requested: *interval,
                existing,
            }),
            None => Ok(()),
        }
    }

    /// Records `interval` under `key`.
    pub fn commit(&mut self, key: &str, interval: SlotInterval) -> Result<(), CalendarConflict> {
        self.check(key, &interval)?;
        self.entries.entry(key.to_string()).or_default().push(interval);
        Ok(())
    }

    /// All intervals committed under `key`, in commit order.
    pub fn intervals(&self, key: &str) -> &[SlotInterval] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of committed intervals under `key` that overlap `interval`.
    pub fn count_overlapping(&self, key: &str, interval: &SlotInterval) -> usize {
        self.intervals(key)
            .iter()
            .filter(|w| w.overlaps(interval))
            .count()
    }

    /// Total busy slots of `key` on `day`.
    pub fn busy_slots_on(&self, key: &str, day: usize) -> usize {
        self.intervals(key)
            .iter()
            .filter(|w| w.day == day)
            .map(SlotInterval::len)
            .sum()
    }

    /// Keys with at least one commitment, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Total committed intervals across all keys.
    pub fn commitment_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    fn first_overlap(&self, key: &str, interval: &SlotInterval) -> Option<SlotInterval> {
        self.intervals(key)
            .iter()
            .find(|w| w.overlaps(interval))
            .copied()
    }
}
