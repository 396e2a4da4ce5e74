//! Timetable quality metrics (KPIs).
//!
//! Computes summary indicators from a finished [`TimetableResult`].
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Placement Rate | Committed blocks / attempted blocks |
//! | Room Utilization | Busy slots / teachable slots, per physical room |
//! | Faculty Load | Busy slots per faculty member |
//! | Cohort Fill | Occupied cells / teachable cells, per cohort |
//!
//! Teachable slots exclude the morning break and the cohort's lunch window.
//! Placeholder rooms are not physical and are left out of room utilization.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::report::TimetableResult;
use crate::models::Cell;

/// Timetable performance indicators.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimetableKpi {
    /// Blocks attempted.
    pub total_blocks: usize,
    /// Blocks committed.
    pub placed_blocks: usize,
    /// Fraction of blocks committed (1.0 when nothing was attempted).
    pub placement_rate: f64,
    /// Courses with at least one unplaced block.
    pub incomplete_courses: usize,
    /// Per-room utilization (0.0..1.0).
    pub room_utilization: BTreeMap<String, f64>,
    /// Mean of `room_utilization`.
    pub avg_room_utilization: f64,
    /// Busy slots per faculty member.
    pub faculty_load: BTreeMap<String, usize>,
    /// Per-cohort fill (0.0..1.0), keyed by `DEPT_SEM`.
    pub cohort_fill: BTreeMap<String, f64>,
}

impl TimetableKpi {
    /// Computes KPIs from a finished run.
    pub fn calculate(result: &TimetableResult) -> Self {
        let total_blocks = result.block_count();
        let placed_blocks = result.placements.len();
        let placement_rate = if total_blocks == 0 {
            1.0
        } else {
            placed_blocks as f64 / total_blocks as f64
        };

        let mut room_busy: BTreeMap<String, usize> = BTreeMap::new();
        let mut faculty_load: BTreeMap<String, usize> = BTreeMap::new();
        for p in &result.placements {
            *faculty_load.entry(p.faculty.clone()).or_default() += p.slots;
            if !p.placeholder_room {
                *room_busy.entry(p.room.clone()).or_default() += p.slots;
            }
        }

        let mut cohort_fill = BTreeMap::new();
        let mut room_capacity = 0;
        for timetable in &result.cohorts {
            let teachable = teachable_cells(timetable.grid.cells());
            let occupied = timetable.grid.occupied_slot_count();
            if teachable > 0 {
                cohort_fill.insert(timetable.cohort.to_string(), occupied as f64 / teachable as f64);
            }
            // A room can be used whenever any cohort can be taught.
            room_capacity = room_capacity.max(teachable);
        }

        let room_utilization: BTreeMap<String, f64> = room_busy
            .into_iter()
            .map(|(room, busy)| {
                let util = if room_capacity > 0 {
                    busy as f64 / room_capacity as f64
                } else {
                    0.0
                };
                (room, util)
            })
            .collect();
        let avg_room_utilization = if room_utilization.is_empty() {
            0.0
        } else {
            room_utilization.values().sum::<f64>() / room_utilization.len() as f64
        };

        Self {
            total_blocks,
            placed_blocks,
            placement_rate,
            incomplete_courses: result.unscheduled.len(),
            room_utilization,
            avg_room_utilization,
            faculty_load,
            cohort_fill,
        }
    }
}

fn teachable_cells(cells: &[Vec<Cell>]) -> usize {
    cells
        .iter()
        .flatten()
        .filter(|c| !matches!(c, Cell::Break(_)))
        .count()
}
