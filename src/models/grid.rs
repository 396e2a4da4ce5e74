//! Per-cohort weekly time grid.
//!
//! A grid is `days × slots` cells. Each cell is free, a break, or holds one
//! occupancy of a committed session block. The morning break is marked when
//! the grid is built; the cohort's lunch window is marked by the break
//! allocator before any block is placed.
//!
//! # Invariant
//! No two occupancies overlap: [`TimeGrid::occupy`] only writes cells that
//! are free.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

use super::{ClockTime, SessionKind, Weekday};
use crate::config::TimetableConfig;

/// Wall-clock bounds of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTime {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl SlotTime {
    /// `"HH:MM-HH:MM"`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }
}

/// Which break a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakKind {
    Morning,
    Lunch,
}

/// A committed block as seen from the cells it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    pub course_code: String,
    pub kind: SessionKind,
    pub faculty: String,
    pub room: String,
    /// First slot of the block.
    pub start_slot: usize,
    /// Block length in slots.
    pub slots: usize,
}

/// One grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Free,
    Break(BreakKind),
    Occupied(Occupancy),
}

impl Cell {
    /// Exporter text: `""`, `"BREAK"`, or `"<code> <kind> <room>"`.
    pub fn label(&self) -> String {
        match self {
            Cell::Free => String::new(),
            Cell::Break(_) => "BREAK".to_string(),
            Cell::Occupied(o) => format!("{} {} {}", o.course_code, o.kind, o.room),
        }
    }
}

/// Why a slot range cannot hold a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotRangeError {
    /// Day index beyond the grid.
    DayOutOfRange { day: usize },
    /// Zero-length block.
    EmptyBlock,
    /// Block would run past the end of the working day.
    PastEndOfDay { start: usize, length: usize },
    /// Block would cross a break.
    CrossesBreak { slot: usize, kind: BreakKind },
    /// A cell is already occupied.
    Occupied { slot: usize },
}

impl fmt::Display for SlotRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotRangeError::DayOutOfRange { day } => write!(f, "day {day} out of range"),
            SlotRangeError::EmptyBlock => f.write_str("block has no slots"),
            SlotRangeError::PastEndOfDay { start, length } => {
                write!(f, "{length} slots from slot {start} run past end of day")
            }
            SlotRangeError::CrossesBreak { slot, kind } => {
                write!(f, "slot {slot} is inside the {kind:?} break")
            }
            SlotRangeError::Occupied { slot } => write!(f, "slot {slot} already occupied"),
        }
    }
}

impl std::error::Error for SlotRangeError {}

/// A cohort's weekly grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeGrid {
    days: Vec<Weekday>,
    slots: Vec<SlotTime>,
    cells: Vec<Vec<Cell>>,
    /// Break per slot index, identical on every day.
    breaks: Vec<Option<BreakKind>>,
    lunch: Option<Range<usize>>,
}

impl TimeGrid {
    /// Builds an empty grid with the morning break pre-marked.
    pub fn new(config: &TimetableConfig) -> Self {
        let slots = Self::slot_times(config);
        let breaks: Vec<Option<BreakKind>> = slots
            .iter()
            .map(|s| {
                config
                    .morning_break
                    .filter(|b| b.overlaps(s.start, s.end))
                    .map(|_| BreakKind::Morning)
            })
            .collect();
        let row: Vec<Cell> = breaks
            .iter()
            .map(|b| b.map_or(Cell::Free, Cell::Break))
            .collect();

        Self {
            days: config.days.clone(),
            cells: vec![row; config.days.len()],
            slots,
            breaks,
            lunch: None,
        }
    }

    /// Slot boundaries from `start` to `end` in `slot_minutes` steps.
    pub fn slot_times(config: &TimetableConfig) -> Vec<SlotTime> {
        let mut slots = Vec::with_capacity(config.slot_count());
        if config.slot_minutes == 0 {
            return slots;
        }
        let mut current = config.start;
        while current < config.end {
            let Some(next) = current.plus_minutes(config.slot_minutes) else {
                break;
            };
            slots.push(SlotTime {
                start: current,
                end: next,
            });
            current = next;
        }
        slots
    }

    /// Working days, in grid order.
    pub fn days(&self) -> &[Weekday] {
        &self.days
    }

    /// Slot boundaries.
    pub fn slots(&self) -> &[SlotTime] {
        &self.slots
    }

    /// Number of days.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Number of slots per day.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Header labels, `"09:00-09:30"` style.
    pub fn slot_labels(&self) -> Vec<String> {
        self.slots.iter().map(SlotTime::label).collect()
    }

    /// All cells, one row per day.
    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    /// A single cell.
    pub fn cell(&self, day: usize, slot: usize) -> Option<&Cell> {
        self.cells.get(day).and_then(|row| row.get(slot))
    }

    /// The lunch slot range, once allocated.
    pub fn lunch(&self) -> Option<Range<usize>> {
        self.lunch.clone()
    }

    /// Break a slot belongs to (same on every day).
    pub fn break_at(&self, slot: usize) -> Option<BreakKind> {
        self.breaks.get(slot).copied().flatten()
    }

    /// First slot starting at or after `time`.
    pub fn slot_at_or_after(&self, time: ClockTime) -> Option<usize> {
        self.slots.iter().position(|s| s.start >= time)
    }

    /// Whether a cell is free: not a break and not occupied.
    pub fn is_available(&self, day: usize, slot: usize) -> bool {
        matches!(self.cell(day, slot), Some(Cell::Free))
    }

    /// Slot indices a block of `length` starting at `start` would cover.
    ///
    /// Fails if the block is empty, runs past the end of the day, or crosses
    /// a break. Occupancy is not checked here; see [`is_range_free`](Self::is_range_free).
    pub fn slot_range(
        &self,
        day: usize,
        start: usize,
        length: usize,
    ) -> Result<Range<usize>, SlotRangeError> {
        if day >= self.days.len() {
            return Err(SlotRangeError::DayOutOfRange { day });
        }
        if length == 0 {
            return Err(SlotRangeError::EmptyBlock);
        }
        let end = start + length;
        if end > self.slots.len() {
            return Err(SlotRangeError::PastEndOfDay { start, length });
        }
        if let Some(slot) = (start..end).find(|&s| self.break_at(s).is_some()) {
            let kind = self.break_at(slot).unwrap_or(BreakKind::Morning);
            return Err(SlotRangeError::CrossesBreak { slot, kind });
        }
        Ok(start..end)
    }

    /// Whether every cell of `range` on `day` is free.
    pub fn is_range_free(&self, day: usize, range: &Range<usize>) -> bool {
        range.clone().all(|s| self.is_available(day, s))
    }

    /// Marks `range` as the lunch window on every day.
    ///
    /// Must run before any block is placed; the range must hold no break.
    pub fn mark_lunch(&mut self, range: Range<usize>) -> Result<(), SlotRangeError> {
        for day in 0..self.days.len() {
            let checked = self.slot_range(day, range.start, range.len())?;
            if let Some(slot) = checked.clone().find(|&s| !self.is_available(day, s)) {
                return Err(SlotRangeError::Occupied { slot });
            }
        }
        for slot in range.clone() {
            self.breaks[slot] = Some(BreakKind::Lunch);
            for row in &mut self.cells {
                row[slot] = Cell::Break(BreakKind::Lunch);
            }
        }
        self.lunch = Some(range);
        Ok(())
    }

    /// Writes `occupancy` into `range` on `day`.
    pub fn occupy(
        &mut self,
        day: usize,
        range: Range<usize>,
        occupancy: Occupancy,
    ) -> Result<(), SlotRangeError> {
        let range = self.slot_range(day, range.start, range.len())?;
        if let Some(slot) = range.clone().find(|&s| !self.is_available(day, s)) {
            return Err(SlotRangeError::Occupied { slot });
        }
        for slot in range {
            self.cells[day][slot] = Cell::Occupied(occupancy.clone());
        }
        Ok(())
    }

    /// Committed blocks as `(day, occupancy)`, one per block, in day/slot order.
    pub fn occupancies(&self) -> Vec<(usize, &Occupancy)> {
        let mut out = Vec::new();
        for (day, row) in self.cells.iter().enumerate() {
            for (slot, cell) in row.iter().enumerate() {
                if let Cell::Occupied(o) = cell {
                    if o.start_slot == slot {
                        out.push((day, o));
                    }
                }
            }
        }
        out
    }

    /// Number of occupied cells across the week.
    pub fn occupied_slot_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| matches!(c, Cell::Occupied(_)))
            .count()
    }
}
