//! Result aggregation.
//!
//! Collects each cohort's filled grid, lunch window and legend together with
//! the run-wide placement list, unscheduled-course report and warnings.
//! Nothing here makes a scheduling decision; it reads the engine's
//! committed state.
//!
//! # Verification
//! [`TimetableResult::verify`] re-checks the committed state independently
//! of the engine:
//! - no faculty, room or cohort holds two overlapping sessions
//! - no session covers a break slot of its cohort's grid
//! - every block is accounted for exactly once (in a grid or in an
//!   unscheduled entry)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::breaks::LunchWindow;
use crate::decompose::credited_hours;
use crate::models::{
    BlockOutcome, BlockTally, ClockTime, Cohort, Course, Ltps, Placement, SessionKind, TimeGrid,
    UnscheduledEntry, Warning, Weekday,
};

/// Every block outcome of one course, in attempt order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseOutcome {
    /// Index of the course in the input slice.
    pub course_index: usize,
    pub code: String,
    pub outcomes: Vec<BlockOutcome>,
}

impl CourseOutcome {
    /// Required versus placed blocks of one kind.
    pub fn tally(&self, kind: SessionKind) -> BlockTally {
        let of_kind = self.outcomes.iter().filter(|o| o.kind() == kind);
        BlockTally {
            required: of_kind.clone().count(),
            placed: of_kind.filter(|o| o.is_committed()).count(),
        }
    }

    /// Whether every block was placed.
    pub fn is_fully_scheduled(&self) -> bool {
        self.outcomes.iter().all(BlockOutcome::is_committed)
    }

    /// Committed placements, in attempt order.
    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.outcomes.iter().filter_map(BlockOutcome::placement)
    }

    /// Builds the unscheduled entry, or `None` if every block was placed.
    pub(crate) fn unscheduled_entry(&self, course: &Course) -> Option<UnscheduledEntry> {
        let failures: Vec<_> = self
            .outcomes
            .iter()
            .filter_map(|o| match o {
                BlockOutcome::Unscheduled { kind, reason, .. } => Some((*kind, *reason)),
                BlockOutcome::Committed(_) => None,
            })
            .collect();
        if failures.is_empty() {
            return None;
        }

        let lectures = self.tally(SessionKind::Lecture);
        let tutorials = self.tally(SessionKind::Tutorial);
        let practicals = self.tally(SessionKind::Practical);
        Some(UnscheduledEntry {
            course_index: self.course_index,
            code: course.code.clone(),
            name: course.name.clone(),
            department: course.department.clone(),
            semester: course.semester.clone(),
            faculty: course.faculty.clone(),
            required: course.ltps,
            scheduled: credited_hours(&course.ltps, lectures, tutorials, practicals),
            lectures,
            tutorials,
            practicals,
            failures,
        })
    }
}

/// One legend row of a cohort timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub code: String,
    pub name: String,
    pub faculty: String,
    /// Required hours.
    pub ltps: Ltps,
    /// Elective-group prefix, e.g. `B1`.
    pub elective_group: Option<String>,
    /// Individual codes of a compound code.
    pub variants: Vec<String>,
}

impl LegendEntry {
    /// Legend row for a course.
    pub fn from_course(course: &Course) -> Self {
        Self {
            code: course.code.clone(),
            name: course.name.clone(),
            faculty: course.faculty.clone(),
            ltps: course.ltps,
            elective_group: course.elective_group().map(str::to_string),
            variants: course.code_variants().into_iter().map(str::to_string).collect(),
        }
    }
}

/// One cohort's finished timetable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortTimetable {
    pub cohort: Cohort,
    /// Allocated lunch window, if one fit.
    pub lunch: Option<LunchWindow>,
    pub grid: TimeGrid,
    /// Courses with contact hours, one row per distinct code.
    pub legend: Vec<LegendEntry>,
    /// Outcomes per course, in processing order.
    pub courses: Vec<CourseOutcome>,
}

impl CohortTimetable {
    /// Number of blocks attempted for this cohort.
    pub fn block_count(&self) -> usize {
        self.courses.iter().map(|c| c.outcomes.len()).sum()
    }

    /// Number of blocks committed for this cohort.
    pub fn committed_count(&self) -> usize {
        self.courses.iter().map(|c| c.placements().count()).sum()
    }
}

/// A session seen from the faculty's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultySession {
    pub weekday: Weekday,
    pub day: usize,
    pub start_slot: usize,
    pub start: ClockTime,
    pub end: ClockTime,
    pub course_code: String,
    pub kind: SessionKind,
    pub room: String,
    pub cohort: Cohort,
}

/// A broken invariant found by [`TimetableResult::verify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A faculty member holds two overlapping sessions.
    FacultyDoubleBooked {
        faculty: String,
        first: String,
        second: String,
    },
    /// A physical room holds two overlapping sessions.
    RoomDoubleBooked {
        room: String,
        first: String,
        second: String,
    },
    /// Two sessions overlap in one cohort's grid.
    CohortOverlap {
        cohort: Cohort,
        first: String,
        second: String,
    },
    /// A session covers a break slot.
    BreakOverlap {
        cohort: Cohort,
        course_code: String,
        slot: usize,
    },
    /// Grid occupancies disagree with committed outcomes.
    GridMismatch {
        cohort: Cohort,
        in_grid: usize,
        committed: usize,
    },
    /// Failed blocks disagree with the unscheduled report.
    UnreportedBlocks {
        course_code: String,
        failed: usize,
        reported: usize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::FacultyDoubleBooked {
                faculty,
                first,
                second,
            } => write!(f, "faculty '{faculty}' double-booked: {first} and {second}"),
            InvariantViolation::RoomDoubleBooked {
                room,
                first,
                second,
            } => write!(f, "room '{room}' double-booked: {first} and {second}"),
            InvariantViolation::CohortOverlap {
                cohort,
                first,
                second,
            } => write!(f, "{cohort}: {first} overlaps {second}"),
            InvariantViolation::BreakOverlap {
                cohort,
                course_code,
                slot,
            } => write!(f, "{cohort}: {course_code} covers break slot {slot}"),
            InvariantViolation::GridMismatch {
                cohort,
                in_grid,
                committed,
            } => write!(
                f,
                "{cohort}: {in_grid} blocks in grid but {committed} committed"
            ),
            InvariantViolation::UnreportedBlocks {
                course_code,
                failed,
                reported,
            } => write!(
                f,
                "{course_code}: {failed} blocks failed but {reported} reported"
            ),
        }
    }
}

/// Output of a timetabling run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimetableResult {
    /// Cohort timetables, in processing order.
    pub cohorts: Vec<CohortTimetable>,
    /// All committed placements, in commit order.
    pub placements: Vec<Placement>,
    /// Courses with at least one unplaced block.
    pub unscheduled: Vec<UnscheduledEntry>,
    /// Non-fatal conditions met during the run.
    pub warnings: Vec<Warning>,
}

impl TimetableResult {
    /// Timetable of one cohort.
    pub fn cohort(&self, cohort: &Cohort) -> Option<&CohortTimetable> {
        self.cohorts.iter().find(|c| &c.cohort == cohort)
    }

    /// Whether every block of every course was placed.
    pub fn is_fully_scheduled(&self) -> bool {
        self.unscheduled.is_empty()
    }

    /// Total blocks attempted.
    pub fn block_count(&self) -> usize {
        self.cohorts.iter().map(CohortTimetable::block_count).sum()
    }

    /// Per-faculty sessions in chronological order, faculty sorted by name.
    pub fn faculty_timetables(&self) -> BTreeMap<String, Vec<FacultySession>> {
        let mut out: BTreeMap<String, Vec<FacultySession>> = BTreeMap::new();
        for p in &self.placements {
            out.entry(p.faculty.clone()).or_default().push(FacultySession {
                weekday: p.weekday,
                day: p.day,
                start_slot: p.start_slot,
                start: p.start,
                end: p.end,
                course_code: p.course_code.clone(),
                kind: p.kind,
                room: p.room.clone(),
                cohort: p.cohort.clone(),
            });
        }
        for sessions in out.values_mut() {
            sessions.sort_by_key(|s| (s.day, s.start_slot));
        }
        out
    }

    /// Re-checks the committed state; an empty list means no violation.
    pub fn verify(&self) -> Vec<InvariantViolation> {
        let mut violations = Vec::new();

        for (i, a) in self.placements.iter().enumerate() {
            for b in &self.placements[i + 1..] {
                if !a.interval().overlaps(&b.interval()) {
                    continue;
                }
                if a.faculty == b.faculty {
                    violations.push(InvariantViolation::FacultyDoubleBooked {
                        faculty: a.faculty.clone(),
                        first: a.course_code.clone(),
                        second: b.course_code.clone(),
                    });
                }
                if a.room == b.room && !a.placeholder_room && !b.placeholder_room {
                    violations.push(InvariantViolation::RoomDoubleBooked {
                        room: a.room.clone(),
                        first: a.course_code.clone(),
                        second: b.course_code.clone(),
                    });
                }
                if a.cohort == b.cohort {
                    violations.push(InvariantViolation::CohortOverlap {
                        cohort: a.cohort.clone(),
                        first: a.course_code.clone(),
                        second: b.course_code.clone(),
                    });
                }
            }
        }

        for timetable in &self.cohorts {
            for p in timetable.courses.iter().flat_map(CourseOutcome::placements) {
                if let Some(slot) = p
                    .interval()
                    .slots()
                    .find(|&s| timetable.grid.break_at(s).is_some())
                {
                    violations.push(InvariantViolation::BreakOverlap {
                        cohort: timetable.cohort.clone(),
                        course_code: p.course_code.clone(),
                        slot,
                    });
                }
            }

            let in_grid = timetable.grid.occupancies().len();
            let committed = timetable.committed_count();
            if in_grid != committed {
                violations.push(InvariantViolation::GridMismatch {
                    cohort: timetable.cohort.clone(),
                    in_grid,
                    committed,
                });
            }

            for course in &timetable.courses {
                let failed = course.outcomes.iter().filter(|o| !o.is_committed()).count();
                let reported: usize = self
                    .unscheduled
                    .iter()
                    .filter(|e| e.course_index == course.course_index)
                    .map(UnscheduledEntry::missing_blocks)
                    .sum();
                if failed != reported {
                    violations.push(InvariantViolation::UnreportedBlocks {
                        course_code: course.code.clone(),
                        failed,
                        reported,
                    });
                }
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimetableConfig;
    use crate::models::{Occupancy, UnscheduledReason};

    fn placement(code: &str, faculty: &str, room: &str, day: usize, start: usize, slots: usize) -> Placement {
        Placement {
            cohort: Cohort::new("CSE", "5"),
            course_index: 0,
            course_code: code.into(),
            kind: SessionKind::Lecture,
            faculty: faculty.into(),
            room: room.into(),
            placeholder_room: false,
            day,
            weekday: Weekday::WORKWEEK[day],
            start_slot: start,
            slots,
            start: ClockTime::from_minutes(540 + 30 * start as u16),
            end: ClockTime::from_minutes(540 + 30 * (start + slots) as u16),
        }
    }

    fn unscheduled(kind: SessionKind) -> BlockOutcome {
        BlockOutcome::Unscheduled {
            kind,
            slots: 2,
            reason: UnscheduledReason::FacultyBusy,
        }
    }

    #[test]
    fn test_course_outcome_tally() {
        let outcome = CourseOutcome {
            course_index: 0,
            code: "CS301".into(),
            outcomes: vec![
                BlockOutcome::Committed(placement("CS301", "F", "A101", 0, 0, 3)),
                unscheduled(SessionKind::Tutorial),
            ],
        };
        assert_eq!(outcome.tally(SessionKind::Lecture), BlockTally { required: 1, placed: 1 });
        assert_eq!(outcome.tally(SessionKind::Tutorial), BlockTally { required: 1, placed: 0 });
        assert_eq!(outcome.tally(SessionKind::Practical), BlockTally::default());
        assert!(!outcome.is_fully_scheduled());
        assert_eq!(outcome.placements().count(), 1);
    }

    #[test]
    fn test_unscheduled_entry_partial() {
        let course = Course::new("CS301", "CSE", "5")
            .with_name("Compilers")
            .with_faculty("F")
            .with_ltps(3, 1, 0, 2);
        let outcome = CourseOutcome {
            course_index: 3,
            code: "CS301".into(),
            outcomes: vec![
                BlockOutcome::Committed(placement("CS301", "F", "A101", 0, 0, 3)),
                unscheduled(SessionKind::Tutorial),
            ],
        };

        let entry = outcome.unscheduled_entry(&course).unwrap();
        assert_eq!(entry.required, Ltps::new(3, 1, 0, 2));
        assert_eq!(entry.scheduled, Ltps::new(3, 0, 0, 2));
        assert_eq!(entry.failures, vec![(SessionKind::Tutorial, UnscheduledReason::FacultyBusy)]);
        assert_eq!(entry.name, "Compilers");
        assert_eq!(entry.course_index, 3);
    }

    #[test]
    fn test_unscheduled_entry_none_when_complete() {
        let course = Course::new("CS301", "CSE", "5").with_faculty("F").with_ltps(3, 0, 0, 0);
        let outcome = CourseOutcome {
            course_index: 0,
            code: "CS301".into(),
            outcomes: vec![BlockOutcome::Committed(placement("CS301", "F", "A101", 0, 0, 3))],
        };
        assert!(outcome.unscheduled_entry(&course).is_none());
    }

    #[test]
    fn test_legend_entry() {
        let course = Course::new("B1(ASD151/HS151)", "CSE", "3")
            .with_name("Elective basket")
            .with_faculty("Dr. Rao")
            .with_ltps(2, 0, 0, 0);
        let legend = LegendEntry::from_course(&course);
        assert_eq!(legend.elective_group.as_deref(), Some("B1"));
        assert_eq!(legend.variants, vec!["ASD151", "HS151"]);
    }

    #[test]
    fn test_faculty_timetables_sorted() {
        let result = TimetableResult {
            placements: vec![
                placement("CS302", "Dr. Smith", "A101", 1, 0, 3),
                placement("CS301", "Dr. Smith", "A101", 0, 4, 3),
                placement("MA201", "Dr. Adams", "A102", 0, 0, 3),
            ],
            ..Default::default()
        };
        let by_faculty = result.faculty_timetables();
        let names: Vec<&String> = by_faculty.keys().collect();
        assert_eq!(names, vec!["Dr. Adams", "Dr. Smith"]);

        let smith: Vec<&str> = by_faculty["Dr. Smith"].iter().map(|s| s.course_code.as_str()).collect();
        assert_eq!(smith, vec!["CS301", "CS302"]);
    }

    #[test]
    fn test_verify_detects_double_booking() {
        let mut a = placement("CS301", "Dr. Smith", "A101", 0, 0, 3);
        let mut b = placement("EC201", "Dr. Smith", "A101", 0, 2, 2);
        b.cohort = Cohort::new("ECE", "3");
        a.course_index = 0;
        b.course_index = 1;
        let result = TimetableResult {
            placements: vec![a, b],
            ..Default::default()
        };

        let violations = result.verify();
        assert!(violations
            .iter()
            .any(|v| matches!(v, InvariantViolation::FacultyDoubleBooked { .. })));
        assert!(violations
            .iter()
            .any(|v| matches!(v, InvariantViolation::RoomDoubleBooked { .. })));
        assert!(!violations
            .iter()
            .any(|v| matches!(v, InvariantViolation::CohortOverlap { .. })));
    }

    #[test]
    fn test_verify_ignores_placeholder_rooms() {
        let mut a = placement("CS301", "F1", "No Lab Room", 0, 0, 4);
        let mut b = placement("CS302", "F2", "No Lab Room", 0, 0, 4);
        a.placeholder_room = true;
        b.placeholder_room = true;
        b.cohort = Cohort::new("ECE", "3");
        let result = TimetableResult {
            placements: vec![a, b],
            ..Default::default()
        };
        assert!(result.verify().is_empty());
    }

    #[test]
    fn test_verify_detects_break_and_grid_mismatch() {
        let config = TimetableConfig::default();
        let mut grid = TimeGrid::new(&config);
        grid.occupy(
            0,
            0..3,
            Occupancy {
                course_code: "CS301".into(),
                kind: SessionKind::Lecture,
                faculty: "F".into(),
                room: "A101".into(),
                start_slot: 0,
                slots: 3,
            },
        )
        .unwrap();

        // Claims slots 2..5, which crosses the morning break at slot 3.
        let bad = placement("CS301", "F", "A101", 0, 2, 3);
        let timetable = CohortTimetable {
            cohort: Cohort::new("CSE", "5"),
            lunch: None,
            grid,
            legend: Vec::new(),
            courses: vec![CourseOutcome {
                course_index: 0,
                code: "CS301".into(),
                outcomes: vec![
                    BlockOutcome::Committed(bad.clone()),
                    BlockOutcome::Committed(bad.clone()),
                ],
            }],
        };
        let result = TimetableResult {
            cohorts: vec![timetable],
            placements: vec![bad],
            ..Default::default()
        };

        let violations = result.verify();
        assert!(violations.iter().any(|v| matches!(
            v,
            InvariantViolation::BreakOverlap { slot: 3, .. }
        )));
        assert!(violations.iter().any(|v| matches!(
            v,
            InvariantViolation::GridMismatch { in_grid: 1, committed: 2, .. }
        )));
    }

    #[test]
    fn test_verify_detects_unreported_block() {
        let config = TimetableConfig::default();
        let timetable = CohortTimetable {
            cohort: Cohort::new("CSE", "5"),
            lunch: None,
            grid: TimeGrid::new(&config),
            legend: Vec::new(),
            courses: vec![CourseOutcome {
                course_index: 0,
                code: "CS301".into(),
                outcomes: vec![unscheduled(SessionKind::Lecture)],
            }],
        };
        let result = TimetableResult {
            cohorts: vec![timetable],
            ..Default::default()
        };

        let violations = result.verify();
        assert_eq!(
            violations,
            vec![InvariantViolation::UnreportedBlocks {
                course_code: "CS301".into(),
                failed: 1,
                reported: 0,
            }]
        );
        assert!(violations[0].to_string().contains("CS301"));
    }
}
