//! Measurement units for stocked materials.

use super::ParseUnitError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Measurement unit of an inventory item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Kilograms.
    Kg,
    /// Liters.
    Liter,
    /// Discrete pieces.
    Piece,
}

impl Unit {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kg => "kg",
            Self::Liter => "liter",
            Self::Piece => "piece",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Unit {
    type Error = ParseUnitError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "kg" => Ok(Self::Kg),
            "liter" => Ok(Self::Liter),
            "piece" => Ok(Self::Piece),
            _ => Err(ParseUnitError(value.to_owned())),
        }
    }
}
