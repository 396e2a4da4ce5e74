//! Room model.
//!
//! Rooms are the physical resources sessions occupy. Each room has an
//! open-ended type (`LECTURE_ROOM`, `COMPUTER_LAB`, `SEATER_120`, ...).
//! Sessions do not ask for a type directly; they ask for a [`RoomClass`],
//! and each class accepts a family of types.
//!
//! # Scarcity
//! When no room of a class exists, [`RoomCatalog`] substitutes a single
//! placeholder room (`"No Lecture Room"`, `"No Lab Room"`) and reports a
//! [`Warning::MissingRoomType`]. Placeholders are not physical rooms and are
//! never tracked in the room calendar.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::Warning;

/// Room type classification (open set).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoomType {
    /// `LECTURE_ROOM`.
    LectureRoom,
    /// `COMPUTER_LAB`.
    ComputerLab,
    /// `SEATER_<capacity>`, a large lecture hall.
    Seater(u32),
    /// Any other type string, kept verbatim.
    Other(String),
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomType::LectureRoom => f.write_str("LECTURE_ROOM"),
            RoomType::ComputerLab => f.write_str("COMPUTER_LAB"),
            RoomType::Seater(capacity) => write!(f, "SEATER_{capacity}"),
            RoomType::Other(name) => f.write_str(name),
        }
    }
}

impl FromStr for RoomType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Ok(match normalized.as_str() {
            "LECTURE_ROOM" => RoomType::LectureRoom,
            "COMPUTER_LAB" => RoomType::ComputerLab,
            other => match other
                .strip_prefix("SEATER_")
                .and_then(|n| n.parse::<u32>().ok())
            {
                Some(capacity) => RoomType::Seater(capacity),
                None => RoomType::Other(s.trim().to_string()),
            },
        })
    }
}

impl Serialize for RoomType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RoomType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.parse() {
            Ok(room_type) => Ok(room_type),
            Err(never) => match never {},
        }
    }
}

/// The kind of room a session needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoomClass {
    /// Lecture and tutorial rooms: `LECTURE_ROOM` and `SEATER_*`.
    Lecture,
    /// Practical rooms: `COMPUTER_LAB`.
    Lab,
}

impl RoomClass {
    /// Whether a room type satisfies this class.
    pub fn accepts(self, room_type: &RoomType) -> bool {
        match self {
            RoomClass::Lecture => matches!(room_type, RoomType::LectureRoom | RoomType::Seater(_)),
            RoomClass::Lab => matches!(room_type, RoomType::ComputerLab),
        }
    }

    /// Identifier of the stand-in room used when the class is empty.
    pub fn placeholder_id(self) -> &'static str {
        match self {
            RoomClass::Lecture => "No Lecture Room",
            RoomClass::Lab => "No Lab Room",
        }
    }

    /// The room type a class is named after, for diagnostics.
    pub fn primary_type(self) -> RoomType {
        match self {
            RoomClass::Lecture => RoomType::LectureRoom,
            RoomClass::Lab => RoomType::ComputerLab,
        }
    }
}

impl fmt::Display for RoomClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomClass::Lecture => f.write_str("lecture"),
            RoomClass::Lab => f.write_str("lab"),
        }
    }
}

/// A room that sessions can be placed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Room number / identifier (calendar key).
    pub id: String,
    /// Room type.
    pub room_type: RoomType,
    /// Stand-in for a missing room class; never tracked in calendars.
    #[serde(default)]
    pub placeholder: bool,
}

impl Room {
    /// Creates a room.
    pub fn new(id: impl Into<String>, room_type: RoomType) -> Self {
        Self {
            id: id.into(),
            room_type,
            placeholder: false,
        }
    }

    /// Creates a `LECTURE_ROOM`.
    pub fn lecture(id: impl Into<String>) -> Self {
        Self::new(id, RoomType::LectureRoom)
    }

    /// Creates a `COMPUTER_LAB`.
    pub fn lab(id: impl Into<String>) -> Self {
        Self::new(id, RoomType::ComputerLab)
    }

    /// Creates a `SEATER_<capacity>` hall.
    pub fn seater(id: impl Into<String>, capacity: u32) -> Self {
        Self::new(id, RoomType::Seater(capacity))
    }

    fn placeholder_for(class: RoomClass) -> Self {
        Self {
            id: class.placeholder_id().to_string(),
            room_type: class.primary_type(),
            placeholder: true,
        }
    }
}

/// Rooms grouped by class, in input order.
#[derive(Debug, Clone)]
pub struct RoomCatalog {
    lecture: Vec<Room>,
    lab: Vec<Room>,
}

impl RoomCatalog {
    /// Groups rooms by class.
    ///
    /// Rooms whose type no class accepts are ignored. Each empty class gets
    /// a placeholder room; a warning is raised only for the empty classes
    /// listed in `required`.
    pub fn build(rooms: &[Room], required: &[RoomClass]) -> (Self, Vec<Warning>) {
        let mut warnings = Vec::new();
        let mut lecture = Self::collect(rooms, RoomClass::Lecture);
        let mut lab = Self::collect(rooms, RoomClass::Lab);

        for (class, list) in [(RoomClass::Lecture, &mut lecture), (RoomClass::Lab, &mut lab)] {
            if list.is_empty() {
                if required.contains(&class) {
                    warnings.push(Warning::MissingRoomType {
                        class,
                        room_type: class.primary_type().to_string(),
                        placeholder: class.placeholder_id().to_string(),
                    });
                }
                list.push(Room::placeholder_for(class));
            }
        }

        (Self { lecture, lab }, warnings)
    }

    /// Candidate rooms for a class, in input order.
    pub fn candidates(&self, class: RoomClass) -> &[Room] {
        match class {
            RoomClass::Lecture => &self.lecture,
            RoomClass::Lab => &self.lab,
        }
    }

    /// Whether a class is served only by its placeholder.
    pub fn is_placeholder(&self, class: RoomClass) -> bool {
        self.candidates(class).iter().all(|r| r.placeholder)
    }

    fn collect(rooms: &[Room], class: RoomClass) -> Vec<Room> {
        rooms
            .iter()
            .filter(|r| class.accepts(&r.room_type))
            .cloned()
            .collect()
    }
}
