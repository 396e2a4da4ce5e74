//! Shared resource calendars threaded through a run.

use serde::{Deserialize, Serialize};

use crate::models::{BusyCalendar, CalendarConflict, Room, SlotInterval};

/// Process-wide faculty and room commitments.
///
/// One instance is shared by every cohort of a run, so a placement in one
/// cohort makes the faculty and room busy for all others. Pass a pre-seeded
/// instance to [`TimetableScheduler::schedule_with`](super::TimetableScheduler::schedule_with)
/// to schedule around existing commitments.
///
/// Placeholder rooms are never recorded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceCalendars {
    /// Busy intervals per faculty name.
    pub faculty: BusyCalendar,
    /// Busy intervals per room identifier.
    pub rooms: BusyCalendar,
}

impl ResourceCalendars {
    /// Creates empty calendars.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the faculty is free for `interval`.
    pub fn faculty_free(&self, faculty: &str, interval: &SlotInterval) -> bool {
        self.faculty.is_free(faculty, interval)
    }

    /// Whether the room is free for `interval`. Placeholders always are.
    pub fn room_free(&self, room: &Room, interval: &SlotInterval) -> bool {
        room.placeholder || self.rooms.is_free(&room.id, interval)
    }

    /// Records a placement for both faculty and room.
    ///
    /// Both calendars are checked before either is written, so a conflict
    /// leaves them unchanged.
    pub fn commit(
        &mut self,
        faculty: &str,
        room: &Room,
        interval: SlotInterval,
    ) -> Result<(), CalendarConflict> {
        if !room.placeholder {
            self.rooms.check(&room.id, &interval)?;
        }
        self.faculty.commit(faculty, interval)?;
        if !room.placeholder {
            self.rooms.commit(&room.id, interval)?;
        }
        Ok(())
    }

    /// Marks a faculty member busy outside of any placement.
    pub fn reserve_faculty(
        &mut self,
        faculty: &str,
        interval: SlotInterval,
    ) -> Result<(), CalendarConflict> {
        self.faculty.commit(faculty, interval)
    }

    /// Marks a room busy outside of any placement.
    pub fn reserve_room(&mut self, room_id: &str, interval: SlotInterval) -> Result<(), CalendarConflict> {
        self.rooms.commit(room_id, interval)
    }
}
