//! Input validation for timetabling runs.
//!
//! Checks structural integrity of courses and rooms before scheduling.
//! Detects the malformed-input conditions that must fail a run:
//! - Courses without a department or semester (no cohort key)
//! - Courses without a code
//! - Courses with contact hours but no faculty
//! - Courses needing more blocks than the weekly grid has slots
//! - Rooms without an identifier, or sharing one
//!
//! Everything else (missing room types, infeasible placements) is
//! recoverable and handled by the scheduler.

use crate::config::TimetableConfig;
use crate::decompose::block_counts;
use crate::models::{Course, Room};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A course has no department or no semester.
    MissingCohortKey,
    /// A course has no code.
    MissingCourseCode,
    /// A course with contact hours has no faculty.
    MissingFaculty,
    /// A course needs more blocks than the week has slots.
    ExcessiveHours,
    /// A room has an empty identifier.
    MissingRoomId,
    /// Two rooms share the same identifier.
    DuplicateRoomId,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a timetabling run.
///
/// Checks:
/// 1. Every course has a non-blank code
/// 2. Every course has a non-blank department and semester
/// 3. Every course with L, T or P hours has a non-blank faculty
/// 4. No course needs more blocks than `days × slots` under `config`
/// 5. Every room has a non-blank identifier
/// 6. No two rooms share an identifier
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(courses: &[Course], rooms: &[Room], config: &TimetableConfig) -> ValidationResult {
    let mut errors = Vec::new();
    let capacity = config.days.len().saturating_mul(config.slot_count());

    for (i, course) in courses.iter().enumerate() {
        let label = if course.code.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingCourseCode,
                format!("Course #{i} has no code"),
            ));
            format!("#{i}")
        } else {
            format!("'{}'", course.code)
        };

        if course.department.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingCohortKey,
                format!("Course {label} has no department"),
            ));
        }
        if course.semester.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingCohortKey,
                format!("Course {label} has no semester"),
            ));
        }
        if course.has_contact_hours() && course.faculty.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingFaculty,
                format!("Course {label} has contact hours but no faculty"),
            ));
        }
        let blocks = block_counts(&course.ltps, config).total();
        if blocks > capacity {
            errors.push(ValidationError::new(
                ValidationErrorKind::ExcessiveHours,
                format!(
                    "Course {label} needs {blocks} blocks for {} hours but the week has {capacity} slots",
                    course.ltps
                ),
            ));
        }
    }

    let mut room_ids = HashSet::new();
    for (i, room) in rooms.iter().enumerate() {
        if room.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingRoomId,
                format!("Room #{i} has no identifier"),
            ));
        } else if !room_ids.insert(room.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateRoomId,
                format!("Duplicate room ID: {}", room.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
