//! Timetabling engine, shared resource context, and result aggregation.
//!
//! # Algorithm
//!
//! `TimetableScheduler` is a deterministic greedy heuristic: cohorts are
//! processed one after another, blocks are placed one after another, and
//! each block takes the first feasible (day, start slot, room) in a fixed
//! iteration order. It never backtracks and gives no optimality guarantee.
//!
//! Faculty and room calendars live in [`ResourceCalendars`], which is shared
//! by every cohort of a run and passed explicitly by `&mut`.
//!
//! # KPI
//!
//! `TimetableKpi` summarizes a result: placement rate, room utilization,
//! faculty load and cohort fill.

mod context;
mod engine;
mod kpi;
mod report;

pub use context::ResourceCalendars;
pub use engine::TimetableScheduler;
pub use kpi::TimetableKpi;
pub use report::{
    CohortTimetable, CourseOutcome, FacultySession, InvariantViolation, LegendEntry,
    TimetableResult,
};
