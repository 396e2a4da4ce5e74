//! Timetable configuration.
//!
//! Every constant the engine depends on (working window, slot width,
//! break windows, block lengths, search order) lives here. The defaults
//! describe a Monday-Friday week of 30-minute slots from 09:00 to 18:30
//! with a 10:30-10:45 morning break and a one-hour lunch between 12:30
//! and 14:30.
//!
//! # Examples
//!
//! ```
//! use u_timetable::config::{DayOrder, TimetableConfig};
//! use u_timetable::models::ClockTime;
//!
//! let config = TimetableConfig::default()
//!     .with_window(ClockTime::hm(8, 0), ClockTime::hm(17, 0))
//!     .with_day_order(DayOrder::SpreadCourse);
//! assert!(config.validate().is_ok());
//! assert_eq!(config.slot_count(), 18);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};
use crate::models::{ClockTime, Weekday};

/// A fixed break `[start, end)`. Any slot overlapping it is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakWindow {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl BreakWindow {
    /// Creates a break window.
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    /// Whether `[slot_start, slot_end)` overlaps the break.
    pub fn overlaps(&self, slot_start: ClockTime, slot_end: ClockTime) -> bool {
        slot_start < self.end && self.start < slot_end
    }
}

/// How a cohort's lunch window is chosen among the valid candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LunchPolicy {
    /// The chronologically first candidate window.
    #[default]
    Earliest,
    /// The candidate overlapping the fewest lunch windows already given to
    /// other cohorts; ties go to the earliest.
    Staggered,
}

/// Range inside which each cohort's lunch window must fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunchRange {
    /// Earliest allowed lunch start.
    pub earliest_start: ClockTime,
    /// Latest allowed lunch end.
    pub latest_end: ClockTime,
    /// Lunch length in slots.
    pub slots: usize,
    /// Selection policy.
    pub policy: LunchPolicy,
}

impl Default for LunchRange {
    fn default() -> Self {
        Self {
            earliest_start: ClockTime::hm(12, 30),
            latest_end: ClockTime::hm(14, 30),
            slots: 2,
            policy: LunchPolicy::Earliest,
        }
    }
}

/// Contiguous slot count per session kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionDurations {
    /// Lecture block length (1.5 h = 3 slots).
    pub lecture_slots: usize,
    /// L units covered by one lecture meeting under `HourMode::MeetingBlocks`.
    ///
    /// Independent of `lecture_slots`: shortening the block does not add
    /// meetings.
    pub lecture_hours_per_block: u32,
    /// Tutorial block length (1 h = 2 slots).
    pub tutorial_slots: usize,
    /// Practical block length (2 h = 4 slots).
    pub practical_slots: usize,
}

impl Default for SessionDurations {
    fn default() -> Self {
        Self {
            lecture_slots: 3,
            lecture_hours_per_block: 3,
            tutorial_slots: 2,
            practical_slots: 4,
        }
    }
}

/// How LTPS hour counts turn into block counts.
///
/// Tutorials are one block per T unit in both modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HourMode {
    /// L is counted in meetings: `ceil(L / lecture_hours_per_block)` lecture
    /// blocks, so L=3 is one 1.5-hour meeting. Each P unit is one practical
    /// block.
    #[default]
    MeetingBlocks,
    /// L, T and P are contact hours covered by as many blocks as needed:
    /// `ceil(hours * 60 / block_minutes)` per kind (L=3 is two 1.5-hour
    /// lectures, P=3 is two 2-hour practicals).
    ContactHours,
}

/// Order in which days are tried for each block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayOrder {
    /// Configured day order, every block.
    #[default]
    Chronological,
    /// Days without another block of the same course first, then the rest,
    /// each group in configured order.
    SpreadCourse,
    /// A fresh permutation per block from an RNG seeded once per run.
    Seeded(u64),
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimetableConfig {
    /// Working days, in search order.
    pub days: Vec<Weekday>,
    /// Start of the first slot.
    pub start: ClockTime,
    /// End of the last slot.
    pub end: ClockTime,
    /// Slot width in minutes.
    pub slot_minutes: u32,
    /// Fixed morning break, applied to every cohort.
    pub morning_break: Option<BreakWindow>,
    /// Lunch allocation range. `None` disables lunch allocation.
    pub lunch: Option<LunchRange>,
    /// Block lengths.
    pub durations: SessionDurations,
    /// Hour-to-block conversion.
    pub hour_mode: HourMode,
    /// Day search order.
    pub day_order: DayOrder,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            days: Weekday::WORKWEEK.to_vec(),
            start: ClockTime::hm(9, 0),
            end: ClockTime::hm(18, 30),
            slot_minutes: 30,
            morning_break: Some(BreakWindow::new(ClockTime::hm(10, 30), ClockTime::hm(10, 45))),
            lunch: Some(LunchRange::default()),
            durations: SessionDurations::default(),
            hour_mode: HourMode::default(),
            day_order: DayOrder::default(),
        }
    }
}

impl TimetableConfig {
    /// Sets the working days.
    pub fn with_days(mut self, days: Vec<Weekday>) -> Self {
        self.days = days;
        self
    }

    /// Sets the working window.
    pub fn with_window(mut self, start: ClockTime, end: ClockTime) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Sets the slot width.
    pub fn with_slot_minutes(mut self, minutes: u32) -> Self {
        self.slot_minutes = minutes;
        self
    }

    /// Sets or clears the morning break.
    pub fn with_morning_break(mut self, window: Option<BreakWindow>) -> Self {
        self.morning_break = window;
        self
    }

    /// Sets or clears the lunch range.
    pub fn with_lunch(mut self, lunch: Option<LunchRange>) -> Self {
        self.lunch = lunch;
        self
    }

    /// Sets the lunch selection policy (no-op when lunch is disabled).
    pub fn with_lunch_policy(mut self, policy: LunchPolicy) -> Self {
        if let Some(lunch) = self.lunch.as_mut() {
            lunch.policy = policy;
        }
        self
    }

    /// Sets the block lengths.
    pub fn with_durations(mut self, durations: SessionDurations) -> Self {
        self.durations = durations;
        self
    }

    /// Sets the hour-to-block conversion.
    pub fn with_hour_mode(mut self, mode: HourMode) -> Self {
        self.hour_mode = mode;
        self
    }

    /// Sets the day search order.
    pub fn with_day_order(mut self, order: DayOrder) -> Self {
        self.day_order = order;
        self
    }

    /// Number of slots per day.
    ///
    /// Only meaningful for a configuration that passed [`validate`](Self::validate).
    pub fn slot_count(&self) -> usize {
        if self.slot_minutes == 0 {
            return 0;
        }
        (self.start.minutes_until(self.end) / self.slot_minutes) as usize
    }

    /// Checks internal consistency.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(TimetableError::InvalidConfig(msg));

        if self.days.is_empty() {
            return invalid("no working days configured".into());
        }
        if self.slot_minutes == 0 {
            return invalid("slot width must be positive".into());
        }
        if self.end <= self.start {
            return invalid(format!(
                "working window {}-{} is empty",
                self.start, self.end
            ));
        }
        let window = self.start.minutes_until(self.end);
        if window % self.slot_minutes != 0 {
            return invalid(format!(
                "working window of {window} min is not a multiple of {} min slots",
                self.slot_minutes
            ));
        }
        let d = &self.durations;
        if d.lecture_slots == 0 || d.tutorial_slots == 0 || d.practical_slots == 0 {
            return invalid("session durations must be at least one slot".into());
        }
        if d.lecture_hours_per_block == 0 {
            return invalid("lecture_hours_per_block must be positive".into());
        }
        if let Some(b) = &self.morning_break {
            if b.end <= b.start {
                return invalid(format!("morning break {}-{} is empty", b.start, b.end));
            }
        }
        if let Some(lunch) = &self.lunch {
            if lunch.slots == 0 {
                return invalid("lunch must span at least one slot".into());
            }
            let needed = lunch.slots as u32 * self.slot_minutes;
            if lunch.earliest_start.minutes_until(lunch.latest_end) < needed {
                return invalid(format!(
                    "lunch range {}-{} cannot hold {} slots",
                    lunch.earliest_start, lunch.latest_end, lunch.slots
                ));
            }
        }
        Ok(())
    }
}
