//! Lunch break allocation.
//!
//! Each cohort gets one lunch window of `LunchRange::slots` consecutive
//! slots lying entirely inside `[earliest_start, latest_end]`. The window is
//! reserved in the cohort's grid before any of its blocks are placed, so it
//! acts as a hard exclusion for the rest of the run.
//!
//! # Algorithm
//! 1. Enumerate candidate start slots in chronological order.
//! 2. Score each candidate under the configured [`LunchPolicy`].
//! 3. Take the lowest score; ties go to the earliest candidate.
//!
//! Under `Earliest` every candidate scores 0, so the first one wins.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::config::{LunchPolicy, LunchRange, TimetableConfig};
use crate::models::{ClockTime, Cohort, SlotRangeError, TimeGrid};

/// A cohort's allocated lunch window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunchWindow {
    /// First slot index.
    pub start_slot: usize,
    /// Length in slots.
    pub slots: usize,
    pub start: ClockTime,
    pub end: ClockTime,
}

impl LunchWindow {
    /// Slot indices covered.
    pub fn range(&self) -> Range<usize> {
        self.start_slot..self.start_slot + self.slots
    }

    fn overlaps(&self, other: &Range<usize>) -> bool {
        self.start_slot < other.end && other.start < self.start_slot + self.slots
    }
}

/// Allocates lunch windows cohort by cohort.
///
/// Remembers every window it hands out so `Staggered` can spread lunches.
#[derive(Debug, Clone)]
pub struct BreakAllocator {
    range: Option<LunchRange>,
    allocated: Vec<(Cohort, LunchWindow)>,
}

impl BreakAllocator {
    /// Creates an allocator for the configured lunch range.
    pub fn new(config: &TimetableConfig) -> Self {
        Self {
            range: config.lunch,
            allocated: Vec::new(),
        }
    }

    /// Whether lunch allocation is enabled.
    pub fn is_enabled(&self) -> bool {
        self.range.is_some()
    }

    /// Windows allocated so far, in allocation order.
    pub fn allocated(&self) -> &[(Cohort, LunchWindow)] {
        &self.allocated
    }

    /// Candidate start slots in chronological order.
    ///
    /// A candidate lies inside the lunch range, crosses no break, and is
    /// free on every day of `grid`.
    pub fn candidates(&self, grid: &TimeGrid) -> Vec<usize> {
        let Some(range) = self.range else {
            return Vec::new();
        };
        let slots = grid.slots();
        (0..grid.slot_count())
            .filter(|&start| {
                let end = start + range.slots;
                if end > slots.len() || slots[start].start < range.earliest_start {
                    return false;
                }
                if slots[end - 1].end > range.latest_end {
                    return false;
                }
                (0..grid.day_count()).all(|day| {
                    grid.slot_range(day, start, range.slots)
                        .map(|r| grid.is_range_free(day, &r))
                        .unwrap_or(false)
                })
            })
            .collect()
    }

    /// Picks and reserves the cohort's lunch window.
    ///
    /// Returns `Ok(None)` when lunch is disabled or no candidate fits.
    pub fn allocate(
        &mut self,
        cohort: &Cohort,
        grid: &mut TimeGrid,
    ) -> Result<Option<LunchWindow>, SlotRangeError> {
        let Some(range) = self.range else {
            return Ok(None);
        };

        let best = self
            .candidates(grid)
            .into_iter()
            .map(|start| (self.score(range.policy, &(start..start + range.slots)), start))
            .min_by_key(|&(score, start)| (score, start));

        let Some((_, start)) = best else {
            return Ok(None);
        };

        let slot_range = start..start + range.slots;
        grid.mark_lunch(slot_range.clone())?;

        let slots = grid.slots();
        let window = LunchWindow {
            start_slot: start,
            slots: range.slots,
            start: slots[slot_range.start].start,
            end: slots[slot_range.end - 1].end,
        };
        self.allocated.push((cohort.clone(), window.clone()));
        Ok(Some(window))
    }

    /// Conflict score of a candidate; lower is better.
    fn score(&self, policy: LunchPolicy, candidate: &Range<usize>) -> usize {
        match policy {
            LunchPolicy::Earliest => 0,
            LunchPolicy::Staggered => self
                .allocated
                .iter()
                .filter(|(_, w)| w.overlaps(candidate))
                .count(),
        }
    }
}
