//! Placement and outcome models.
//!
//! Every session block ends in exactly one [`BlockOutcome`]: committed to a
//! (day, slot range, room) or unscheduled with a reason. Outcomes are
//! aggregated per course; a course with any unscheduled block produces an
//! [`UnscheduledEntry`] carrying required versus scheduled hours.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ClockTime, Cohort, Ltps, RoomClass, SessionKind, SlotInterval, Weekday};

/// A committed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub cohort: Cohort,
    /// Index of the course in the input slice.
    pub course_index: usize,
    pub course_code: String,
    pub kind: SessionKind,
    pub faculty: String,
    /// Room identifier (a placeholder id when no room of the class exists).
    pub room: String,
    /// Whether `room` is a placeholder rather than a physical room.
    pub placeholder_room: bool,
    /// Day index into the cohort grid.
    pub day: usize,
    pub weekday: Weekday,
    /// First slot index.
    pub start_slot: usize,
    /// Length in slots.
    pub slots: usize,
    /// Wall-clock start.
    pub start: ClockTime,
    /// Wall-clock end.
    pub end: ClockTime,
}

impl Placement {
    /// The slot interval this placement occupies.
    pub fn interval(&self) -> SlotInterval {
        SlotInterval::new(self.day, self.start_slot, self.start_slot + self.slots)
    }
}

/// Why no (day, slot, room) could take a block.
///
/// Reported for the furthest stage the search reached: a block that found
/// free cohort slots but never a free faculty is `FacultyBusy`, and so on.
/// Variants are ordered by stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnscheduledReason {
    /// No break-free run of the block's length exists on any day.
    NoContiguousWindow,
    /// Every break-free run overlaps the cohort's own sessions.
    CohortBusy,
    /// The faculty is busy at every time the cohort is free.
    FacultyBusy,
    /// Every acceptable room is busy whenever cohort and faculty are free.
    RoomBusy,
}

impl fmt::Display for UnscheduledReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UnscheduledReason::NoContiguousWindow => "no contiguous window of that length",
            UnscheduledReason::CohortBusy => "cohort timetable full",
            UnscheduledReason::FacultyBusy => "faculty unavailable",
            UnscheduledReason::RoomBusy => "no room available",
        };
        f.write_str(text)
    }
}

/// Result of attempting one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockOutcome {
    Committed(Placement),
    Unscheduled {
        kind: SessionKind,
        slots: usize,
        reason: UnscheduledReason,
    },
}

impl BlockOutcome {
    /// Session kind of the block.
    pub fn kind(&self) -> SessionKind {
        match self {
            BlockOutcome::Committed(p) => p.kind,
            BlockOutcome::Unscheduled { kind, .. } => *kind,
        }
    }

    /// Whether the block was placed.
    pub fn is_committed(&self) -> bool {
        matches!(self, BlockOutcome::Committed(_))
    }

    /// The placement, if committed.
    pub fn placement(&self) -> Option<&Placement> {
        match self {
            BlockOutcome::Committed(p) => Some(p),
            BlockOutcome::Unscheduled { .. } => None,
        }
    }
}

/// Required versus placed block count for one session kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTally {
    pub required: usize,
    pub placed: usize,
}

impl BlockTally {
    /// Blocks that could not be placed.
    pub fn missing(&self) -> usize {
        self.required.saturating_sub(self.placed)
    }

    /// Hours credited when `placed` of `required` blocks cover `hours`.
    ///
    /// Proportional, rounded down; exact when all or none are placed.
    pub fn credited(&self, hours: u32) -> u32 {
        if self.required == 0 || self.placed >= self.required {
            return hours;
        }
        (u64::from(hours) * self.placed as u64 / self.required as u64) as u32
    }
}

/// A course with at least one unplaced block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnscheduledEntry {
    /// Position of the course in the input slice.
    pub course_index: usize,
    pub code: String,
    pub name: String,
    pub department: String,
    pub semester: String,
    pub faculty: String,
    /// Hours the course requires.
    pub required: Ltps,
    /// Hours covered by placed blocks.
    pub scheduled: Ltps,
    pub lectures: BlockTally,
    pub tutorials: BlockTally,
    pub practicals: BlockTally,
    /// One entry per unplaced block, in attempt order.
    pub failures: Vec<(SessionKind, UnscheduledReason)>,
}

impl UnscheduledEntry {
    /// Total unplaced blocks.
    pub fn missing_blocks(&self) -> usize {
        self.failures.len()
    }
}

/// Non-fatal condition surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Warning {
    /// No room of the class exists; sessions use a placeholder room.
    MissingRoomType {
        class: RoomClass,
        room_type: String,
        placeholder: String,
    },
    /// No lunch window fits inside the cohort's working day.
    NoLunchWindow { cohort: Cohort },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MissingRoomType {
                room_type,
                placeholder,
                ..
            } => write!(
                f,
                "no room of type {room_type}; sessions use placeholder '{placeholder}'"
            ),
            Warning::NoLunchWindow { cohort } => {
                write!(f, "no valid lunch window for {cohort}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement() -> Placement {
        Placement {
            cohort: Cohort::new("CSE", "5"),
            course_index: 0,
            course_code: "CS301".into(),
            kind: SessionKind::Lecture,
            faculty: "Dr. Smith".into(),
            room: "A101".into(),
            placeholder_room: false,
            day: 1,
            weekday: Weekday::Tuesday,
            start_slot: 4,
            slots: 3,
            start: ClockTime::hm(11, 0),
            end: ClockTime::hm(12, 30),
        }
    }

    #[test]
    fn test_placement_interval() {
        assert_eq!(placement().interval(), SlotInterval::new(1, 4, 7));
    }

    #[test]
    fn test_outcome_accessors() {
        let ok = BlockOutcome::Committed(placement());
        assert!(ok.is_committed());
        assert_eq!(ok.kind(), SessionKind::Lecture);
        assert_eq!(ok.placement().map(|p| p.room.as_str()), Some("A101"));

        let failed = BlockOutcome::Unscheduled {
            kind: SessionKind::Practical,
            slots: 4,
            reason: UnscheduledReason::RoomBusy,
        };
        assert!(!failed.is_committed());
        assert_eq!(failed.kind(), SessionKind::Practical);
        assert!(failed.placement().is_none());
    }

    #[test]
    fn test_block_tally_credit() {
        let all = BlockTally { required: 2, placed: 2 };
        assert_eq!(all.missing(), 0);
        assert_eq!(all.credited(3), 3);

        let half = BlockTally { required: 2, placed: 1 };
        assert_eq!(half.missing(), 1);
        assert_eq!(half.credited(4), 2);

        let none = BlockTally { required: 1, placed: 0 };
        assert_eq!(none.credited(3), 0);

        assert_eq!(BlockTally::default().credited(0), 0);
    }

    #[test]
    fn test_warning_display() {
        let w = Warning::MissingRoomType {
            class: RoomClass::Lab,
            room_type: "COMPUTER_LAB".into(),
            placeholder: "No Lab Room".into(),
        };
        assert_eq!(
            w.to_string(),
            "no room of type COMPUTER_LAB; sessions use placeholder 'No Lab Room'"
        );
    }
}
