//! Course and cohort models.
//!
//! A course is one row of the course offering: who teaches it, which
//! department-semester cohort takes it, and how many weekly
//! Lecture/Tutorial/Practical/Self-study hours it requires.
//! Courses are immutable once loaded.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Weekly hour requirement: Lecture, Tutorial, Practical, Self-study.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ltps {
    /// Lecture hours.
    pub l: u32,
    /// Tutorial hours.
    pub t: u32,
    /// Practical hours.
    pub p: u32,
    /// Self-study hours.
    pub s: u32,
}

impl Ltps {
    /// Creates an LTPS record.
    pub const fn new(l: u32, t: u32, p: u32, s: u32) -> Self {
        Self { l, t, p, s }
    }

    /// Whether any lecture, tutorial, or practical hours are required.
    ///
    /// Self-study never occupies a slot, so it does not count.
    pub fn has_contact_hours(&self) -> bool {
        self.l > 0 || self.t > 0 || self.p > 0
    }
}

impl fmt::Display for Ltps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}-{}", self.l, self.t, self.p, self.s)
    }
}

/// A department-semester group sharing one weekly timetable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cohort {
    pub department: String,
    pub semester: String,
}

impl Cohort {
    /// Creates a cohort key.
    pub fn new(department: impl Into<String>, semester: impl Into<String>) -> Self {
        Self {
            department: department.into(),
            semester: semester.into(),
        }
    }
}

impl fmt::Display for Cohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.department, self.semester)
    }
}

/// A course offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Course code. May carry an elective-group prefix, e.g. `B1(ASD151/HS151)`.
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Owning department.
    pub department: String,
    /// Semester within the department.
    pub semester: String,
    /// Teaching faculty (calendar key).
    pub faculty: String,
    /// Weekly hour requirement.
    pub ltps: Ltps,
    /// Whether the course is an elective.
    pub elective: bool,
}

impl Course {
    /// Creates a course with no hours and no faculty.
    pub fn new(
        code: impl Into<String>,
        department: impl Into<String>,
        semester: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: String::new(),
            department: department.into(),
            semester: semester.into(),
            faculty: String::new(),
            ltps: Ltps::default(),
            elective: false,
        }
    }

    /// Sets the course name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the teaching faculty.
    pub fn with_faculty(mut self, faculty: impl Into<String>) -> Self {
        self.faculty = faculty.into();
        self
    }

    /// Sets the weekly L-T-P-S hours.
    pub fn with_ltps(mut self, l: u32, t: u32, p: u32, s: u32) -> Self {
        self.ltps = Ltps::new(l, t, p, s);
        self
    }

    /// Marks the course as elective.
    pub fn with_elective(mut self, elective: bool) -> Self {
        self.elective = elective;
        self
    }

    /// The cohort this course belongs to.
    pub fn cohort(&self) -> Cohort {
        Cohort::new(self.department.clone(), self.semester.clone())
    }

    /// Whether the course needs any placed session.
    pub fn has_contact_hours(&self) -> bool {
        self.ltps.has_contact_hours()
    }

    /// Elective-group prefix of a code like `B1(ASD151/HS151)`.
    pub fn elective_group(&self) -> Option<&str> {
        let (prefix, rest) = self.code.split_once('(')?;
        let prefix = prefix.trim();
        if prefix.is_empty() || !rest.contains(')') {
            None
        } else {
            Some(prefix)
        }
    }

    /// Individual codes carried by a compound code.
    ///
    /// - `"HS204 / HS153"` yields `["HS204", "HS153"]`
    /// - `"B1(ASD151/HS151/New)"` yields `["ASD151", "HS151"]` (placeholder
    ///   `New` entries are dropped)
    /// - any other code yields itself
    pub fn code_variants(&self) -> Vec<&str> {
        let code = self.code.trim();
        if let (Some(open), Some(close)) = (code.find('('), code.rfind(')')) {
            if open < close {
                let variants: Vec<&str> = code[open + 1..close]
                    .split('/')
                    .map(str::trim)
                    .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("new"))
                    .collect();
                if !variants.is_empty() {
                    return variants;
                }
            }
        }
        if code.contains('/') {
            return code
                .split('/')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .collect();
        }
        vec![code]
    }
}
