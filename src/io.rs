//! Record shapes exchanged with loaders and exporters.
//!
//! Courses and rooms are read as JSON arrays of records keyed by their
//! spreadsheet column names:
//!
//! | Record | Columns |
//! |--------|---------|
//! | course | `Course Code`, `Course Name`, `Department`, `Semester`, `Faculty`, `L`, `T`, `P`, `S`, `Elective` |
//! | room | `roomNumber`, `type` |
//!
//! Missing `L`/`T`/`P`/`S` default to 0 and a missing `Elective` to "No".
//! An hour value that is present but not a non-negative integer, or a
//! missing required column, fails the load with the offending record index.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::io::{Read, Write};

use crate::error::{Result, TimetableError};
use crate::models::{Course, Ltps, Room, RoomType};
use crate::scheduler::{CohortTimetable, TimetableResult};

/// One course row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CourseRecord {
    #[serde(rename = "Course Code", deserialize_with = "text")]
    pub code: String,
    #[serde(rename = "Course Name", default, deserialize_with = "text")]
    pub name: String,
    #[serde(rename = "Department", deserialize_with = "text")]
    pub department: String,
    #[serde(rename = "Semester", deserialize_with = "text")]
    pub semester: String,
    #[serde(rename = "Faculty", default, deserialize_with = "text")]
    pub faculty: String,
    #[serde(rename = "L", default, deserialize_with = "hours")]
    pub l: u32,
    #[serde(rename = "T", default, deserialize_with = "hours")]
    pub t: u32,
    #[serde(rename = "P", default, deserialize_with = "hours")]
    pub p: u32,
    #[serde(rename = "S", default, deserialize_with = "hours")]
    pub s: u32,
    #[serde(rename = "Elective", default, deserialize_with = "yes_no")]
    pub elective: bool,
}

impl From<CourseRecord> for Course {
    fn from(r: CourseRecord) -> Self {
        Course {
            code: r.code,
            name: r.name,
            department: r.department,
            semester: r.semester,
            faculty: r.faculty,
            ltps: Ltps::new(r.l, r.t, r.p, r.s),
            elective: r.elective,
        }
    }
}

/// One room row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoomRecord {
    #[serde(rename = "roomNumber", deserialize_with = "text")]
    pub room_number: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
}

impl From<RoomRecord> for Room {
    fn from(r: RoomRecord) -> Self {
        Room::new(r.room_number, r.room_type)
    }
}

/// Reads a JSON array of course records.
pub fn load_courses<R: Read>(reader: R) -> Result<Vec<Course>> {
    load_records::<_, CourseRecord, Course>(reader)
}

/// Reads a JSON array of room records.
pub fn load_rooms<R: Read>(reader: R) -> Result<Vec<Room>> {
    load_records::<_, RoomRecord, Room>(reader)
}

fn load_records<R, Rec, T>(reader: R) -> Result<Vec<T>>
where
    R: Read,
    Rec: for<'de> Deserialize<'de> + Into<T>,
{
    let raw: Vec<Value> = serde_json::from_reader(reader)?;
    raw.into_iter()
        .enumerate()
        .map(|(record, value)| {
            serde_json::from_value::<Rec>(value)
                .map(Into::into)
                .map_err(|e| TimetableError::Parse {
                    record,
                    message: e.to_string(),
                })
        })
        .collect()
}

/// Writes the full result as pretty-printed JSON.
pub fn write_result<W: Write>(writer: W, result: &TimetableResult) -> Result<()> {
    serde_json::to_writer_pretty(writer, result)?;
    Ok(())
}

/// A cohort timetable flattened for a sheet exporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridSheet {
    /// Sheet name, `DEPT_SEM`.
    pub name: String,
    /// Slot labels, `"09:00-09:30"` style.
    pub header: Vec<String>,
    /// One row per day: day name, then one cell text per slot.
    pub rows: Vec<(String, Vec<String>)>,
    /// `code`, `name`, `faculty`, `L-T-P-S` per legend entry.
    pub legend: Vec<[String; 4]>,
}

impl GridSheet {
    /// Flattens one cohort timetable.
    pub fn from_timetable(timetable: &CohortTimetable) -> Self {
        let grid = &timetable.grid;
        let rows = grid
            .days()
            .iter()
            .zip(grid.cells())
            .map(|(day, cells)| (day.name().to_string(), cells.iter().map(|c| c.label()).collect()))
            .collect();
        let legend = timetable
            .legend
            .iter()
            .map(|e| [e.code.clone(), e.name.clone(), e.faculty.clone(), e.ltps.to_string()])
            .collect();
        Self {
            name: timetable.cohort.to_string(),
            header: grid.slot_labels(),
            rows,
            legend,
        }
    }
}

/// Writes one [`GridSheet`] per cohort as a JSON array.
pub fn write_grids<W: Write>(writer: W, result: &TimetableResult) -> Result<()> {
    let sheets: Vec<GridSheet> = result.cohorts.iter().map(GridSheet::from_timetable).collect();
    serde_json::to_writer_pretty(writer, &sheets)?;
    Ok(())
}

/// Text cell: strings are trimmed, integral numbers lose any `.0`, null is empty.
fn text<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) if f.fract() == 0.0 => format!("{f:.0}"),
            _ => n.to_string(),
        }),
        other => Err(D::Error::custom(format!("expected text, found {other}"))),
    }
}

/// Hour cell: null or blank is 0, anything else must be a non-negative integer.
fn hours<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Null => Some(0),
        Value::String(s) if s.trim().is_empty() => Some(0),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        Value::Number(n) => match (n.as_u64(), n.as_f64()) {
            (Some(u), _) => u32::try_from(u).ok(),
            (None, Some(f)) if f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u32::MAX) => {
                Some(f as u32)
            }
            _ => None,
        },
        _ => None,
    };
    parsed.ok_or_else(|| {
        D::Error::custom(format!(
            "hour count must be a non-negative integer, found {value}"
        ))
    })
}

/// Elective cell: `Yes`/`No` (any case), booleans, or blank for "No".
fn yes_no<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "true" => Ok(true),
            "no" | "n" | "false" | "" => Ok(false),
            _ => Err(D::Error::custom(format!("expected Yes or No, found '{s}'"))),
        },
        other => Err(D::Error::custom(format!("expected Yes or No, found {other}"))),
    }
}
