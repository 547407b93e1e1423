//! Link domain types.

use serde::{Deserialize, Serialize};

/// Who signs the CLA bound by a link.
///
/// Wire format: `i16` (0 = Individual, 1 = Corporation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyTo {
    Individual = 0,
    Corporation = 1,
}

impl ApplyTo {
    /// Convert from the stored `i16` value. Returns `None` for unknown values.
    pub fn from_i16(v: i16) -> Option<Self> {
        match v {
            0 => Some(Self::Individual),
            1 => Some(Self::Corporation),
            _ => None,
        }
    }

    pub fn as_i16(self) -> i16 {
        self as i16
    }
}
