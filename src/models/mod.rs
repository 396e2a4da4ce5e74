//! Timetabling domain models.
//!
//! Provides the data types shared by the decomposer, break allocator,
//! scheduler, and result aggregator.
//!
//! # Domain Terms
//!
//! | Type | Meaning |
//! |------|---------|
//! | Course | A course offering with LTPS hours |
//! | Cohort | A department-semester group sharing one timetable |
//! | SessionBlock | One contiguous lecture/tutorial/practical |
//! | Room | A lecture room, hall, or lab |
//! | BusyCalendar | Committed intervals per faculty/room |
//! | TimeGrid | A cohort's weekly timetable |

mod calendar;
mod course;
mod grid;
mod room;
mod schedule;
mod session;
mod time;

pub use calendar::{BusyCalendar, CalendarConflict, SlotInterval};
pub use course::{Cohort, Course, Ltps};
pub use grid::{BreakKind, Cell, Occupancy, SlotRangeError, SlotTime, TimeGrid};
pub use room::{Room, RoomCatalog, RoomClass, RoomType};
pub use schedule::{
    BlockOutcome, BlockTally, Placement, UnscheduledEntry, UnscheduledReason, Warning,
};
pub use session::{SessionBlock, SessionKind};
pub use time::{ClockTime, Weekday};
