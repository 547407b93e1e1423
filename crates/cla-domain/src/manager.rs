//! Corporation manager domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role of a manager within a link's roster.
///
/// Wire format: `i16` (0 = Employee, 1 = Admin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManagerRole {
    Employee = 0,
    Admin = 1,
}

impl ManagerRole {
    /// Convert from the stored `i16` value. Returns `None` for unknown values.
    pub fn from_i16(v: i16) -> Option<Self> {
        match v {
            0 => Some(Self::Employee),
            1 => Some(Self::Admin),
            _ => None,
        }
    }

    pub fn as_i16(self) -> i16 {
        self as i16
    }
}

impl fmt::Display for ManagerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Employee => f.write_str("employee"),
            Self::Admin => f.write_str("admin"),
        }
    }
}

/// Error returned when a string cannot be parsed as a [`ManagerRole`].
#[derive(Debug, Error)]
#[error("unknown manager role: {0:?}")]
pub struct UnknownManagerRole(pub String);

impl FromStr for ManagerRole {
    type Err = UnknownManagerRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employee" => Ok(Self::Employee),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownManagerRole(other.to_owned())),
        }
    }
}
