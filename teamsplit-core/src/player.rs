//! Player records

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InvalidCode;

/// Placement obligation tier.
///
/// Serialized as the sheet's integer code (0, 1, 2).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub enum Priority {
    /// Seated first, never cap-checked
    Required,
    /// Seated before flexible players, subject to the power cap
    Preferred,
    /// Fills remaining room under the power cap
    Flexible,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Required, Priority::Preferred, Priority::Flexible];

    pub fn code(self) -> u8 {
        match self {
            Priority::Required => 0,
            Priority::Preferred => 1,
            Priority::Flexible => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Required => "Required",
            Priority::Preferred => "Preferred",
            Priority::Flexible => "Flexible",
        }
    }
}

impl TryFrom<i64> for Priority {
    type Error = InvalidCode;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Priority::Required),
            1 => Ok(Priority::Preferred),
            2 => Ok(Priority::Flexible),
            _ => Err(InvalidCode { kind: "priority", code }),
        }
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.code()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Role on the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub enum Position {
    Frontline,
    Backline,
}

impl Position {
    pub const ALL: [Position; 2] = [Position::Frontline, Position::Backline];

    pub fn code(self) -> u8 {
        match self {
            Position::Frontline => 0,
            Position::Backline => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Position::Frontline => "Frontline",
            Position::Backline => "Backline",
        }
    }
}

impl TryFrom<i64> for Position {
    type Error = InvalidCode;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Position::Frontline),
            1 => Ok(Position::Backline),
            _ => Err(InvalidCode { kind: "position", code }),
        }
    }
}

impl From<Position> for u8 {
    fn from(position: Position) -> Self {
        position.code()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A validated roster entry.
///
/// `name` is the player's identity: the engine tracks seated players by
/// name, so names are expected to be unique within a roster.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub power: u32,
    pub priority: Priority,
    pub position: Position,
}

impl Player {
    pub fn new(name: impl Into<String>, power: u32, priority: Priority, position: Position) -> Self {
        Self {
            name: name.into(),
            power,
            priority,
            position,
        }
    }

    pub fn is_backline(&self) -> bool {
        self.position == Position::Backline
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}pt ({}, {})",
            self.name, self.power, self.priority, self.position
        )
    }
}
