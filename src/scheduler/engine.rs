//! Greedy cohort-by-cohort timetabling engine.
//!
//! # Algorithm
//!
//! 1. Validate configuration and input; build the room catalog for the room
//!    classes the courses need.
//! 2. Group courses into cohorts: departments in first-appearance order,
//!    semesters in first-appearance order within each department.
//! 3. For each cohort, build a fresh [`TimeGrid`] and reserve its lunch
//!    window before any block is placed.
//! 4. For each course in input order, decompose it into blocks and, for each
//!    block, try days (in the configured [`DayOrder`]), then start slots in
//!    chronological order, then candidate rooms in input order. The first
//!    combination where the cohort grid, the faculty and the room are all
//!    free is committed to the grid and to the shared calendars.
//! 5. A block with no feasible combination is recorded as unscheduled and
//!    the run continues.
//!
//! No backtracking: a committed block is never moved. Identical input and
//! configuration always produce identical output.
//!
//! # Complexity
//! O(b * d * s * (k + r)) where b=blocks, d=days, s=slots per day,
//! k=commitments per faculty/room, r=candidate rooms.

use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;
use std::ops::Range;

use super::context::ResourceCalendars;
use super::report::{CohortTimetable, CourseOutcome, LegendEntry, TimetableResult};
use crate::breaks::BreakAllocator;
use crate::config::{DayOrder, TimetableConfig};
use crate::decompose::{block_counts, decompose};
use crate::error::Result;
use crate::models::{
    BlockOutcome, Cohort, Course, Occupancy, Placement, Room, RoomCatalog, RoomClass,
    SessionBlock, SlotInterval, TimeGrid, UnscheduledReason, Warning,
};
use crate::validation::validate_input;

/// Greedy weekly timetabling engine.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Course, Room};
/// use u_timetable::scheduler::TimetableScheduler;
///
/// let courses = vec![
///     Course::new("CS301", "CSE", "5")
///         .with_faculty("Dr. Smith")
///         .with_ltps(3, 1, 0, 0),
/// ];
/// let rooms = vec![Room::lecture("A101")];
///
/// let result = TimetableScheduler::new().schedule(&courses, &rooms).unwrap();
/// assert!(result.is_fully_scheduled());
/// assert_eq!(result.placements.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableScheduler {
    config: TimetableConfig,
}

impl TimetableScheduler {
    /// Creates a scheduler with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: TimetableConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &TimetableConfig {
        &self.config
    }

    /// Schedules all courses against empty calendars.
    pub fn schedule(&self, courses: &[Course], rooms: &[Room]) -> Result<TimetableResult> {
        let mut calendars = ResourceCalendars::new();
        self.schedule_with(courses, rooms, &mut calendars)
    }

    /// Schedules all courses around the commitments already in `calendars`.
    ///
    /// Every placement made by this run is added to `calendars`.
    ///
    /// # Errors
    /// Fails only on invalid configuration or malformed input. Missing room
    /// types and unplaceable blocks are reported in the result.
    pub fn schedule_with(
        &self,
        courses: &[Course],
        rooms: &[Room],
        calendars: &mut ResourceCalendars,
    ) -> Result<TimetableResult> {
        self.config.validate()?;
        validate_input(courses, rooms, &self.config)?;

        let required = required_room_classes(courses, &self.config);
        let (catalog, room_warnings) = RoomCatalog::build(rooms, &required);
        for w in &room_warnings {
            warn!("{w}");
        }

        let mut result = TimetableResult {
            warnings: room_warnings,
            ..Default::default()
        };
        let mut breaks = BreakAllocator::new(&self.config);
        let mut rng = match self.config.day_order {
            DayOrder::Seeded(seed) => Some(StdRng::seed_from_u64(seed)),
            DayOrder::Chronological | DayOrder::SpreadCourse => None,
        };

        for (cohort, members) in group_cohorts(courses) {
            debug!("Scheduling {cohort}: {} courses", members.len());

            let mut grid = TimeGrid::new(&self.config);
            let lunch = breaks.allocate(&cohort, &mut grid)?;
            match &lunch {
                Some(window) => debug!("{cohort}: lunch {}-{}", window.start, window.end),
                None if breaks.is_enabled() => {
                    let w = Warning::NoLunchWindow {
                        cohort: cohort.clone(),
                    };
                    warn!("{w}");
                    result.warnings.push(w);
                }
                None => {}
            }

            let mut outcomes = Vec::with_capacity(members.len());
            let mut legend: Vec<LegendEntry> = Vec::new();
            for &index in &members {
                let course = &courses[index];
                let listed = legend
                    .iter()
                    .any(|e| e.code == course.code && e.faculty == course.faculty);
                if course.has_contact_hours() && !listed {
                    legend.push(LegendEntry::from_course(course));
                }

                let mut course_outcome = CourseOutcome {
                    course_index: index,
                    code: course.code.clone(),
                    outcomes: Vec::new(),
                };
                for block in decompose(index, course, &self.config) {
                    let used_days: Vec<usize> =
                        course_outcome.placements().map(|p| p.day).collect();
                    let outcome = self.place_block(
                        &block,
                        &mut grid,
                        calendars,
                        &catalog,
                        &used_days,
                        rng.as_mut(),
                    )?;
                    match &outcome {
                        BlockOutcome::Committed(p) => {
                            trace!(
                                "{}: {} {} on {} {}-{} in {}",
                                cohort,
                                p.course_code,
                                p.kind,
                                p.weekday,
                                p.start,
                                p.end,
                                p.room
                            );
                            result.placements.push(p.clone());
                        }
                        BlockOutcome::Unscheduled { kind, reason, .. } => {
                            warn!("{cohort}: could not place {} {kind}: {reason}", block.course_code);
                        }
                    }
                    course_outcome.outcomes.push(outcome);
                }

                if let Some(entry) = course_outcome.unscheduled_entry(course) {
                    result.unscheduled.push(entry);
                }
                outcomes.push(course_outcome);
            }

            result.cohorts.push(CohortTimetable {
                cohort,
                lunch,
                grid,
                legend,
                courses: outcomes,
            });
        }

        info!(
            "Placed {} of {} blocks across {} cohorts; {} courses incomplete",
            result.placements.len(),
            result.block_count(),
            result.cohorts.len(),
            result.unscheduled.len()
        );
        Ok(result)
    }

    /// Searches for the first feasible (day, start, room) and commits it.
    fn place_block(
        &self,
        block: &SessionBlock,
        grid: &mut TimeGrid,
        calendars: &mut ResourceCalendars,
        catalog: &RoomCatalog,
        used_days: &[usize],
        rng: Option<&mut StdRng>,
    ) -> Result<BlockOutcome> {
        let rooms = catalog.candidates(block.room_class);
        let mut reason = UnscheduledReason::NoContiguousWindow;

        for day in self.day_order(grid.day_count(), used_days, rng) {
            for start in 0..grid.slot_count() {
                let Ok(range) = grid.slot_range(day, start, block.slots) else {
                    continue;
                };
                if !grid.is_range_free(day, &range) {
                    reason = reason.max(UnscheduledReason::CohortBusy);
                    continue;
                }
                let interval = SlotInterval::from_range(day, &range);
                if !calendars.faculty_free(&block.faculty, &interval) {
                    reason = reason.max(UnscheduledReason::FacultyBusy);
                    continue;
                }
                let Some(room) = rooms.iter().find(|r| calendars.room_free(r, &interval)) else {
                    reason = UnscheduledReason::RoomBusy;
                    continue;
                };

                let placement = commit(block, grid, calendars, room, day, range)?;
                return Ok(BlockOutcome::Committed(placement));
            }
        }

        trace!(
            "{} {} #{} ({} slots): {reason}",
            block.course_code,
            block.kind,
            block.ordinal,
            block.slots
        );
        Ok(BlockOutcome::Unscheduled {
            kind: block.kind,
            slots: block.slots,
            reason,
        })
    }

    /// Day indices in the order they are tried for one block.
    fn day_order(&self, day_count: usize, used_days: &[usize], rng: Option<&mut StdRng>) -> Vec<usize> {
        let mut days: Vec<usize> = (0..day_count).collect();
        match self.config.day_order {
            DayOrder::Chronological => {}
            // Stable: free days keep their order, busy days follow.
            DayOrder::SpreadCourse => days.sort_by_key(|d| used_days.contains(d)),
            DayOrder::Seeded(_) => {
                if let Some(rng) = rng {
                    days.shuffle(rng);
                }
            }
        }
        days
    }
}

/// Room classes that at least one course has blocks for.
fn required_room_classes(courses: &[Course], config: &TimetableConfig) -> Vec<RoomClass> {
    let mut required = Vec::new();
    for course in courses {
        let counts = block_counts(&course.ltps, config);
        if counts.lectures + counts.tutorials > 0 && !required.contains(&RoomClass::Lecture) {
            required.push(RoomClass::Lecture);
        }
        if counts.practicals > 0 && !required.contains(&RoomClass::Lab) {
            required.push(RoomClass::Lab);
        }
    }
    required
}

/// Writes a block into the cohort grid and the shared calendars.
fn commit(
    block: &SessionBlock,
    grid: &mut TimeGrid,
    calendars: &mut ResourceCalendars,
    room: &Room,
    day: usize,
    range: Range<usize>,
) -> Result<Placement> {
    let interval = SlotInterval::from_range(day, &range);
    let slots = grid.slots();
    let start = slots[range.start].start;
    let end = slots[range.end - 1].end;
    let weekday = grid.days()[day];

    calendars.commit(&block.faculty, room, interval)?;
    grid.occupy(
        day,
        range.clone(),
        Occupancy {
            course_code: block.course_code.clone(),
            kind: block.kind,
            faculty: block.faculty.clone(),
            room: room.id.clone(),
            start_slot: range.start,
            slots: range.len(),
        },
    )?;

    Ok(Placement {
        cohort: block.cohort.clone(),
        course_index: block.course_index,
        course_code: block.course_code.clone(),
        kind: block.kind,
        faculty: block.faculty.clone(),
        room: room.id.clone(),
        placeholder_room: room.placeholder,
        day,
        weekday,
        start_slot: range.start,
        slots: range.len(),
        start,
        end,
    })
}

/// Course indices per cohort, in processing order.
fn group_cohorts(courses: &[Course]) -> Vec<(Cohort, Vec<usize>)> {
    let mut departments: Vec<&str> = Vec::new();
    let mut seen = HashSet::new();
    for course in courses {
        if seen.insert(course.department.as_str()) {
            departments.push(&course.department);
        }
    }

    let mut cohorts: Vec<(Cohort, Vec<usize>)> = Vec::new();
    for department in departments {
        let start = cohorts.len();
        for (index, course) in courses.iter().enumerate() {
            if course.department != department {
                continue;
            }
            match cohorts[start..]
                .iter_mut()
                .find(|(c, _)| c.semester == course.semester)
            {
                Some((_, members)) => members.push(index),
                None => cohorts.push((course.cohort(), vec![index])),
            }
        }
    }
    cohorts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LunchPolicy, LunchRange};
    use crate::error::TimetableError;
    use crate::validation::ValidationErrorKind;
    use crate::models::{BreakKind, Cell, ClockTime, Ltps, RoomClass, SessionKind, Weekday};
    use proptest::prelude::*;

    fn course(code: &str, dept: &str, sem: &str, faculty: &str, ltps: (u32, u32, u32, u32)) -> Course {
        Course::new(code, dept, sem)
            .with_name(format!("{code} name"))
            .with_faculty(faculty)
            .with_ltps(ltps.0, ltps.1, ltps.2, ltps.3)
    }

    #[test]
    fn test_single_course_scenario() {
        let courses = vec![course("CS301", "CSE", "5", "Dr. Smith", (3, 1, 0, 0))];
        let rooms = vec![Room::lecture("A101")];

        let result = TimetableScheduler::new().schedule(&courses, &rooms).unwrap();

        assert!(result.unscheduled.is_empty());
        assert!(result.warnings.is_empty());
        assert_eq!(result.placements.len(), 2);
        assert!(result.placements.iter().all(|p| p.room == "A101"));

        let lec = &result.placements[0];
        let tut = &result.placements[1];
        assert_eq!(lec.kind, SessionKind::Lecture);
        assert_eq!(lec.slots, 3);
        assert_eq!(tut.kind, SessionKind::Tutorial);
        assert_eq!(tut.slots, 2);
        assert!(!lec.interval().overlaps(&tut.interval()));

        // Monday 09:00-10:30, then the tutorial after the morning break.
        assert_eq!((lec.weekday, lec.start, lec.end), (Weekday::Monday, ClockTime::hm(9, 0), ClockTime::hm(10, 30)));
        assert_eq!((tut.weekday, tut.start), (Weekday::Monday, ClockTime::hm(11, 0)));

        let cse = result.cohort(&Cohort::new("CSE", "5")).unwrap();
        assert_eq!(cse.grid.occupied_slot_count(), 5);
        assert_eq!(cse.legend.len(), 1);
        assert!(result.verify().is_empty());
    }

    #[test]
    fn test_faculty_contention_scenario() {
        let config = TimetableConfig::default()
            .with_days(vec![Weekday::Monday])
            .with_window(ClockTime::hm(9, 0), ClockTime::hm(10, 30))
            .with_morning_break(None)
            .with_lunch(None);
        let courses = vec![
            course("CS310", "CSE", "5", "Dr. Jones", (3, 0, 0, 0)),
            course("CS320", "CSE", "5", "Dr. Jones", (3, 0, 0, 0)),
        ];
        let rooms = vec![Room::lecture("A101"), Room::lecture("A102")];

        let result = TimetableScheduler::new()
            .with_config(config)
            .schedule(&courses, &rooms)
            .unwrap();

        assert_eq!(result.placements.len(), 1);
        assert_eq!(result.placements[0].course_code, "CS310");
        assert_eq!(result.unscheduled.len(), 1);

        let entry = &result.unscheduled[0];
        assert_eq!(entry.code, "CS320");
        assert_eq!(entry.required, Ltps::new(3, 0, 0, 0));
        assert_eq!(entry.scheduled, Ltps::new(0, 0, 0, 0));
        assert_eq!(entry.lectures.missing(), 1);
        assert_eq!(entry.failures, vec![(SessionKind::Lecture, UnscheduledReason::CohortBusy)]);
        assert!(result.verify().is_empty());
    }

    #[test]
    fn test_faculty_busy_across_cohorts() {
        let config = TimetableConfig::default()
            .with_days(vec![Weekday::Monday])
            .with_window(ClockTime::hm(9, 0), ClockTime::hm(10, 30))
            .with_morning_break(None)
            .with_lunch(None);
        let courses = vec![
            course("CS301", "CSE", "5", "Dr. Jones", (3, 0, 0, 0)),
            course("EC301", "ECE", "5", "Dr. Jones", (3, 0, 0, 0)),
        ];
        let rooms = vec![Room::lecture("A101"), Room::lecture("A102")];

        let result = TimetableScheduler::new()
            .with_config(config)
            .schedule(&courses, &rooms)
            .unwrap();

        assert_eq!(result.cohorts.len(), 2);
        assert_eq!(result.unscheduled.len(), 1);
        assert_eq!(
            result.unscheduled[0].failures,
            vec![(SessionKind::Lecture, UnscheduledReason::FacultyBusy)]
        );
    }

    #[test]
    fn test_room_busy_across_cohorts() {
        let config = TimetableConfig::default()
            .with_days(vec![Weekday::Monday])
            .with_window(ClockTime::hm(9, 0), ClockTime::hm(10, 30))
            .with_morning_break(None)
            .with_lunch(None);
        let courses = vec![
            course("CS301", "CSE", "5", "Dr. Smith", (3, 0, 0, 0)),
            course("EC301", "ECE", "5", "Dr. Jones", (3, 0, 0, 0)),
        ];

        let one_room = TimetableScheduler::new()
            .with_config(config.clone())
            .schedule(&courses, &[Room::lecture("A101")])
            .unwrap();
        assert_eq!(
            one_room.unscheduled[0].failures,
            vec![(SessionKind::Lecture, UnscheduledReason::RoomBusy)]
        );

        let two_rooms = TimetableScheduler::new()
            .with_config(config)
            .schedule(&courses, &[Room::lecture("A101"), Room::seater("H1", 120)])
            .unwrap();
        assert!(two_rooms.is_fully_scheduled());
        assert_eq!(two_rooms.placements[1].room, "H1");
    }

    #[test]
    fn test_grid_overflow_is_no_window() {
        let config = TimetableConfig::default()
            .with_days(vec![Weekday::Monday])
            .with_window(ClockTime::hm(9, 0), ClockTime::hm(10, 0))
            .with_morning_break(None)
            .with_lunch(None);
        let courses = vec![course("CS301", "CSE", "5", "F", (3, 0, 0, 0))];

        let result = TimetableScheduler::new()
            .with_config(config)
            .schedule(&courses, &[Room::lecture("A101")])
            .unwrap();
        assert_eq!(
            result.unscheduled[0].failures,
            vec![(SessionKind::Lecture, UnscheduledReason::NoContiguousWindow)]
        );
    }

    #[test]
    fn test_breaks_never_occupied() {
        let courses: Vec<Course> = (0..8)
            .map(|i| course(&format!("CS3{i:02}"), "CSE", "5", &format!("F{i}"), (3, 1, 1, 0)))
            .collect();
        let rooms = vec![Room::lecture("A101"), Room::lecture("A102"), Room::lab("L1")];

        let result = TimetableScheduler::new().schedule(&courses, &rooms).unwrap();
        let cse = &result.cohorts[0];

        let lunch = cse.lunch.clone().unwrap();
        assert_eq!(lunch.slots, 2);
        assert!(lunch.start >= ClockTime::hm(12, 30));
        assert!(lunch.end <= ClockTime::hm(14, 30));

        for day in 0..cse.grid.day_count() {
            assert_eq!(cse.grid.cell(day, 3), Some(&Cell::Break(BreakKind::Morning)));
            for slot in lunch.range() {
                assert_eq!(cse.grid.cell(day, slot), Some(&Cell::Break(BreakKind::Lunch)));
            }
        }
        for p in &result.placements {
            assert!(p.end <= ClockTime::hm(10, 30) || p.start >= ClockTime::hm(10, 45));
            assert!(p.end <= lunch.start || p.start >= lunch.end);
        }
        assert!(result.verify().is_empty());
    }

    #[test]
    fn test_missing_lab_uses_placeholder() {
        let courses = vec![course("CS305", "CSE", "5", "Dr. Smith", (0, 0, 2, 0))];
        let result = TimetableScheduler::new()
            .schedule(&courses, &[Room::lecture("A101")])
            .unwrap();

        assert!(result.is_fully_scheduled());
        assert_eq!(
            result.warnings,
            vec![Warning::MissingRoomType {
                class: RoomClass::Lab,
                room_type: "COMPUTER_LAB".into(),
                placeholder: "No Lab Room".into(),
            }]
        );
        assert_eq!(result.placements.len(), 2);
        assert!(result
            .placements
            .iter()
            .all(|p| p.room == "No Lab Room" && p.placeholder_room));
    }

    #[test]
    fn test_placeholder_room_shared_across_cohorts() {
        let courses = vec![
            course("CS305", "CSE", "5", "F1", (0, 0, 1, 0)),
            course("EC305", "ECE", "5", "F2", (0, 0, 1, 0)),
        ];
        let result = TimetableScheduler::new()
            .schedule(&courses, &[Room::lecture("A101")])
            .unwrap();

        // Both land at the same time: placeholders are not physical rooms.
        assert_eq!(result.placements.len(), 2);
        assert_eq!(result.placements[0].interval(), result.placements[1].interval());
    }

    #[test]
    fn test_malformed_input_is_fatal() {
        let courses = vec![course("CS301", "", "5", "F", (3, 0, 0, 0))];
        let err = TimetableScheduler::new()
            .schedule(&courses, &[Room::lecture("A101")])
            .unwrap_err();
        assert!(matches!(err, TimetableError::Validation(ref errors) if errors.len() == 1));
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let config = TimetableConfig::default().with_days(Vec::new());
        let err = TimetableScheduler::new()
            .with_config(config)
            .schedule(&[], &[])
            .unwrap_err();
        assert!(matches!(err, TimetableError::InvalidConfig(_)));
    }

    #[test]
    fn test_unbounded_hours_rejected_before_search() {
        let courses = vec![course("CS301", "CSE", "5", "F", (u32::MAX, 0, 0, 0))];
        let err = TimetableScheduler::new()
            .schedule(&courses, &[Room::lecture("A101")])
            .unwrap_err();
        match err {
            TimetableError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].kind, ValidationErrorKind::ExcessiveHours);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_room_warning_only_for_needed_class() {
        let courses = vec![course("CS301", "CSE", "5", "F", (3, 1, 0, 0))];
        let result = TimetableScheduler::new().schedule(&courses, &[]).unwrap();

        assert_eq!(result.warnings.len(), 1);
        assert!(matches!(
            result.warnings[0],
            Warning::MissingRoomType { class: RoomClass::Lecture, .. }
        ));

        let self_study = vec![course("CS399", "CSE", "5", "", (0, 0, 0, 4))];
        let result = TimetableScheduler::new().schedule(&self_study, &[]).unwrap();
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_sections_sharing_a_code() {
        let config = TimetableConfig::default()
            .with_days(vec![Weekday::Monday])
            .with_window(ClockTime::hm(9, 0), ClockTime::hm(10, 30))
            .with_morning_break(None)
            .with_lunch(None);
        let courses = vec![
            course("CS301", "CSE", "5", "Dr. A", (3, 0, 0, 0)),
            course("CS301", "CSE", "5", "Dr. B", (3, 0, 0, 0)),
        ];

        let result = TimetableScheduler::new()
            .with_config(config)
            .schedule(&courses, &[Room::lecture("A101")])
            .unwrap();

        assert_eq!(result.placements.len(), 1);
        assert_eq!(result.placements[0].faculty, "Dr. A");
        assert_eq!(result.unscheduled.len(), 1);
        assert_eq!(result.unscheduled[0].course_index, 1);
        assert_eq!(result.unscheduled[0].faculty, "Dr. B");

        let cse = &result.cohorts[0];
        let faculty: Vec<&str> = cse.legend.iter().map(|e| e.faculty.as_str()).collect();
        assert_eq!(faculty, vec!["Dr. A", "Dr. B"]);
        assert!(result.verify().is_empty());
    }

    #[test]
    fn test_zero_hour_course_is_trivially_scheduled() {
        let courses = vec![course("CS399", "CSE", "5", "", (0, 0, 0, 4))];
        let result = TimetableScheduler::new()
            .schedule(&courses, &[Room::lecture("A101")])
            .unwrap();
        assert!(result.is_fully_scheduled());
        assert!(result.placements.is_empty());
        assert!(result.cohorts[0].legend.is_empty());
        assert_eq!(result.cohorts[0].courses[0].outcomes.len(), 0);
    }

    #[test]
    fn test_cohort_order() {
        let courses = vec![
            course("A", "CSE", "5", "F1", (1, 0, 0, 0)),
            course("B", "ECE", "3", "F2", (1, 0, 0, 0)),
            course("C", "CSE", "3", "F3", (1, 0, 0, 0)),
            course("D", "CSE", "5", "F4", (1, 0, 0, 0)),
        ];
        let groups = group_cohorts(&courses);
        let keys: Vec<String> = groups.iter().map(|(c, _)| c.to_string()).collect();
        assert_eq!(keys, vec!["CSE_5", "CSE_3", "ECE_3"]);
        assert_eq!(groups[0].1, vec![0, 3]);
    }

    #[test]
    fn test_no_lunch_window_warning() {
        let config = TimetableConfig::default().with_window(ClockTime::hm(9, 0), ClockTime::hm(12, 0));
        let courses = vec![course("CS301", "CSE", "5", "F", (3, 0, 0, 0))];
        let result = TimetableScheduler::new()
            .with_config(config)
            .schedule(&courses, &[Room::lecture("A101")])
            .unwrap();
        assert!(result.warnings.contains(&Warning::NoLunchWindow {
            cohort: Cohort::new("CSE", "5"),
        }));
        assert!(result.is_fully_scheduled());
    }

    #[test]
    fn test_staggered_lunch_across_cohorts() {
        let config = TimetableConfig::default()
            .with_lunch(Some(LunchRange::default()))
            .with_lunch_policy(LunchPolicy::Staggered);
        let courses = vec![
            course("CS301", "CSE", "5", "F1", (3, 0, 0, 0)),
            course("EC301", "ECE", "5", "F2", (3, 0, 0, 0)),
        ];
        let result = TimetableScheduler::new()
            .with_config(config)
            .schedule(&courses, &[Room::lecture("A101")])
            .unwrap();
        let starts: Vec<usize> = result
            .cohorts
            .iter()
            .filter_map(|c| c.lunch.as_ref().map(|w| w.start_slot))
            .collect();
        assert_eq!(starts, vec![7, 9]);
    }

    #[test]
    fn test_spread_course_days() {
        let courses = vec![course("CS301", "CSE", "5", "F", (0, 3, 0, 0))];
        let rooms = [Room::lecture("A101")];

        let packed = TimetableScheduler::new().schedule(&courses, &rooms).unwrap();
        assert!(packed.placements.iter().all(|p| p.weekday == Weekday::Monday));

        let spread = TimetableScheduler::new()
            .with_config(TimetableConfig::default().with_day_order(DayOrder::SpreadCourse))
            .schedule(&courses, &rooms)
            .unwrap();
        let days: Vec<Weekday> = spread.placements.iter().map(|p| p.weekday).collect();
        assert_eq!(days, vec![Weekday::Monday, Weekday::Tuesday, Weekday::Wednesday]);
    }

    #[test]
    fn test_seeded_order_is_reproducible() {
        let courses: Vec<Course> = (0..5)
            .map(|i| course(&format!("CS3{i}"), "CSE", "5", &format!("F{}", i % 2), (3, 1, 1, 0)))
            .collect();
        let rooms = vec![Room::lecture("A101"), Room::lab("L1")];
        let scheduler = TimetableScheduler::new()
            .with_config(TimetableConfig::default().with_day_order(DayOrder::Seeded(42)));

        let a = scheduler.schedule(&courses, &rooms).unwrap();
        let b = scheduler.schedule(&courses, &rooms).unwrap();
        assert_eq!(a.placements, b.placements);
        assert!(a.verify().is_empty());
    }

    #[test]
    fn test_schedule_with_preseeded_calendars() {
        let mut calendars = ResourceCalendars::new();
        calendars
            .reserve_faculty("Dr. Smith", SlotInterval::new(0, 0, 19))
            .unwrap();
        let courses = vec![course("CS301", "CSE", "5", "Dr. Smith", (3, 0, 0, 0))];

        let result = TimetableScheduler::new()
            .schedule_with(&courses, &[Room::lecture("A101")], &mut calendars)
            .unwrap();
        assert_eq!(result.placements[0].weekday, Weekday::Tuesday);
        assert_eq!(calendars.faculty.intervals("Dr. Smith").len(), 2);
        assert_eq!(calendars.rooms.intervals("A101").len(), 1);
    }

    #[test]
    fn test_result_serializes() {
        let courses = vec![course("CS301", "CSE", "5", "Dr. Smith", (3, 1, 0, 0))];
        let result = TimetableScheduler::new()
            .schedule(&courses, &[Room::lecture("A101")])
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["placements"][0]["start"], "09:00");
        assert_eq!(json["placements"][0]["room"], "A101");
    }

    fn arb_courses() -> impl Strategy<Value = Vec<Course>> {
        prop::collection::vec(
            (0usize..3, 0usize..2, 0usize..4, 0u32..4, 0u32..3, 0u32..3),
            1..14,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (dept, sem, fac, l, t, p))| {
                    course(
                        &format!("C{i}"),
                        ["CSE", "ECE", "DSAI"][dept],
                        ["3", "5"][sem],
                        &format!("F{fac}"),
                        (l, t, p, 0),
                    )
                })
                .collect()
        })
    }

    fn arb_rooms() -> impl Strategy<Value = Vec<Room>> {
        (0usize..3, 0usize..3).prop_map(|(lectures, labs)| {
            let mut rooms: Vec<Room> = (0..lectures).map(|i| Room::lecture(format!("A10{i}"))).collect();
            rooms.extend((0..labs).map(|i| Room::lab(format!("L{i}"))));
            rooms
        })
    }

    proptest! {
        #[test]
        fn prop_invariants_hold(courses in arb_courses(), rooms in arb_rooms()) {
            let scheduler = TimetableScheduler::new();
            let result = scheduler.schedule(&courses, &rooms).unwrap();

            let violations = result.verify();
            prop_assert!(violations.is_empty(), "{:?}", violations);

            // Every block is committed or reported, exactly once.
            let required: usize = courses
                .iter()
                .enumerate()
                .map(|(i, c)| decompose(i, c, scheduler.config()).len())
                .sum();
            let missing: usize = result.unscheduled.iter().map(|e| e.missing_blocks()).sum();
            prop_assert_eq!(result.placements.len() + missing, required);

            for cohort in &result.cohorts {
                let lunch = cohort.lunch.clone().unwrap();
                prop_assert_eq!(lunch.slots, 2);
                prop_assert!(lunch.start >= ClockTime::hm(12, 30));
                prop_assert!(lunch.end <= ClockTime::hm(14, 30));
            }
        }

        #[test]
        fn prop_deterministic(courses in arb_courses(), rooms in arb_rooms()) {
            let scheduler = TimetableScheduler::new();
            let a = scheduler.schedule(&courses, &rooms).unwrap();
            let b = scheduler.schedule(&courses, &rooms).unwrap();
            prop_assert_eq!(
                serde_json::to_string(&a.placements).unwrap(),
                serde_json::to_string(&b.placements).unwrap()
            );
            prop_assert_eq!(a.unscheduled, b.unscheduled);
        }
    }
}
