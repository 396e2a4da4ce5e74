//! Weekly class timetabling engine.
//!
//! Assigns the lecture, tutorial and practical sessions of every
//! department-semester cohort to 30-minute slots and rooms, honoring
//! faculty and room exclusivity across all cohorts, a fixed morning break,
//! a per-cohort lunch window, and contiguous block lengths. Sessions that
//! cannot be placed are reported with the hours that were and were not
//! scheduled.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Course`, `Room`, `SessionBlock`,
//!   `TimeGrid`, `BusyCalendar`, `Placement`, `UnscheduledEntry`
//! - **`config`**: Working window, slot width, breaks, block lengths, search order
//! - **`decompose`**: LTPS hours → session blocks
//! - **`breaks`**: Per-cohort lunch window allocation
//! - **`scheduler`**: Greedy engine, shared calendars, result aggregation, KPIs
//! - **`validation`**: Input integrity checks (cohort keys, faculty, room IDs)
//! - **`io`**: JSON record shapes for loaders and exporters
//! - **`error`**: Fatal error type
//!
//! # Example
//!
//! ```
//! use u_timetable::models::{Course, Room};
//! use u_timetable::scheduler::TimetableScheduler;
//!
//! let courses = vec![
//!     Course::new("CS301", "CSE", "5").with_faculty("Dr. Smith").with_ltps(3, 1, 0, 0),
//!     Course::new("CS302", "CSE", "5").with_faculty("Dr. Jones").with_ltps(0, 0, 1, 0),
//! ];
//! let rooms = vec![Room::lecture("A101"), Room::lab("L1")];
//!
//! let result = TimetableScheduler::new().schedule(&courses, &rooms).unwrap();
//! assert!(result.is_fully_scheduled());
//! assert!(result.verify().is_empty());
//! ```
//!
//! # Logging
//!
//! Progress is reported through the `log` facade; install any logger to see
//! it. Warnings are also returned in [`scheduler::TimetableResult::warnings`].
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

pub mod breaks;
pub mod config;
pub mod decompose;
pub mod error;
pub mod io;
pub mod models;
pub mod scheduler;
pub mod validation;
