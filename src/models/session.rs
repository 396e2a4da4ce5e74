//! Session block model.
//!
//! A session block is the smallest placeable unit: one contiguous run of
//! slots for one lecture, tutorial, or practical of one course. Blocks are
//! derived from a course's LTPS hours by the decomposer and consumed exactly
//! once by the scheduler (placed or reported unscheduled).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Cohort, RoomClass};

/// Kind of instruction a block carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SessionKind {
    Lecture,
    Tutorial,
    Practical,
    /// Informational; never decomposed into a placed block.
    SelfStudy,
}

impl SessionKind {
    /// Short label used in timetable cells.
    pub fn label(self) -> &'static str {
        match self {
            SessionKind::Lecture => "LEC",
            SessionKind::Tutorial => "TUT",
            SessionKind::Practical => "LAB",
            SessionKind::SelfStudy => "SS",
        }
    }

    /// Room class a block of this kind needs, if it occupies a room.
    pub fn room_class(self) -> Option<RoomClass> {
        match self {
            SessionKind::Lecture | SessionKind::Tutorial => Some(RoomClass::Lecture),
            SessionKind::Practical => Some(RoomClass::Lab),
            SessionKind::SelfStudy => None,
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One contiguous session to be placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionBlock {
    /// Index of the owning course in the input slice.
    pub course_index: usize,
    /// Owning course code (denormalized for diagnostics).
    pub course_code: String,
    /// Instruction kind.
    pub kind: SessionKind,
    /// Required contiguous slot count.
    pub slots: usize,
    /// Teaching faculty.
    pub faculty: String,
    /// Cohort whose grid the block lands in.
    pub cohort: Cohort,
    /// Room class requirement.
    pub room_class: RoomClass,
    /// 0-based position among blocks of the same kind for this course.
    pub ordinal: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(SessionKind::Lecture.to_string(), "LEC");
        assert_eq!(SessionKind::Tutorial.to_string(), "TUT");
        assert_eq!(SessionKind::Practical.to_string(), "LAB");
    }

    #[test]
    fn test_kind_room_class() {
        assert_eq!(SessionKind::Lecture.room_class(), Some(RoomClass::Lecture));
        assert_eq!(SessionKind::Tutorial.room_class(), Some(RoomClass::Lecture));
        assert_eq!(SessionKind::Practical.room_class(), Some(RoomClass::Lab));
        assert_eq!(SessionKind::SelfStudy.room_class(), None);
    }
}
