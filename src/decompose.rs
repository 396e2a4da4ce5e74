//! Session decomposition.
//!
//! Turns a course's LTPS hours into the ordered list of session blocks the
//! scheduler must place.
//!
//! # Mapping
//!
//! | Hours | Blocks (`MeetingBlocks`) | Blocks (`ContactHours`) | Length | Room |
//! |-------|--------------------------|-------------------------|--------|------|
//! | L | `ceil(L / lecture_hours_per_block)` | `ceil(L·60 / lecture_min)` | 3 slots | lecture |
//! | T | `T` | `ceil(T·60 / tutorial_min)` | 2 slots | lecture |
//! | P | `P` | `ceil(P·60 / practical_min)` | 4 slots | lab |
//! | S | none | none | - | - |
//!
//! # Order
//! Practicals first, then lectures, then tutorials.

use crate::config::{HourMode, TimetableConfig};
use crate::models::{BlockTally, Course, Ltps, SessionBlock, SessionKind};

/// Number of blocks per session kind for one course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockCounts {
    pub lectures: usize,
    pub tutorials: usize,
    pub practicals: usize,
}

impl BlockCounts {
    /// Total blocks.
    pub fn total(&self) -> usize {
        self.lectures
            .saturating_add(self.tutorials)
            .saturating_add(self.practicals)
    }

    /// Count for a kind (0 for self-study).
    pub fn of(&self, kind: SessionKind) -> usize {
        match kind {
            SessionKind::Lecture => self.lectures,
            SessionKind::Tutorial => self.tutorials,
            SessionKind::Practical => self.practicals,
            SessionKind::SelfStudy => 0,
        }
    }
}

/// Block counts for an LTPS record under `config`.
pub fn block_counts(ltps: &Ltps, config: &TimetableConfig) -> BlockCounts {
    let d = &config.durations;
    match config.hour_mode {
        HourMode::MeetingBlocks => BlockCounts {
            lectures: div_ceil(ltps.l as usize, d.lecture_hours_per_block as usize),
            tutorials: ltps.t as usize,
            practicals: ltps.p as usize,
        },
        HourMode::ContactHours => {
            let minutes = |hours: u32| (hours as usize).saturating_mul(60);
            let block = |slots: usize| slots * config.slot_minutes as usize;
            BlockCounts {
                lectures: div_ceil(minutes(ltps.l), block(d.lecture_slots)),
                tutorials: div_ceil(minutes(ltps.t), block(d.tutorial_slots)),
                practicals: div_ceil(minutes(ltps.p), block(d.practical_slots)),
            }
        }
    }
}

/// Decomposes a course into its session blocks.
///
/// `course_index` is the course's position in the input slice; it travels
/// with each block so outcomes can be traced back. A course without
/// contact hours yields no blocks.
pub fn decompose(course_index: usize, course: &Course, config: &TimetableConfig) -> Vec<SessionBlock> {
    let counts = block_counts(&course.ltps, config);
    let d = &config.durations;
    let plan = [
        (SessionKind::Practical, counts.practicals, d.practical_slots),
        (SessionKind::Lecture, counts.lectures, d.lecture_slots),
        (SessionKind::Tutorial, counts.tutorials, d.tutorial_slots),
    ];

    let mut blocks = Vec::with_capacity(counts.total());
    for (kind, count, slots) in plan {
        let Some(room_class) = kind.room_class() else {
            continue;
        };
        for ordinal in 0..count {
            blocks.push(SessionBlock {
                course_index,
                course_code: course.code.clone(),
                kind,
                slots,
                faculty: course.faculty.clone(),
                cohort: course.cohort(),
                room_class,
                ordinal,
            });
        }
    }
    blocks
}

/// Hours covered by the placed blocks of each kind.
///
/// Self-study needs no block and is always credited in full.
pub fn credited_hours(required: &Ltps, lectures: BlockTally, tutorials: BlockTally, practicals: BlockTally) -> Ltps {
    Ltps {
        l: lectures.credited(required.l),
        t: tutorials.credited(required.t),
        p: practicals.credited(required.p),
        s: required.s,
    }
}

fn div_ceil(n: usize, d: usize) -> usize {
    if d == 0 {
        0
    } else {
        n.div_ceil(d)
    }
}
