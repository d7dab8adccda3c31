//! Wire enums used by list endpoints

use serde::{Deserialize, Serialize};

/// Sort orders accepted by the holiday list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidaySort {
    LowestPrice,
    HighestPrice,
    Az,
    Za,
}

/// Sort orders accepted by the sport list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SportSort {
    LowestPrice,
    HighestPrice,
    Az,
    Za,
}

/// Status filter for sport listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    Active,
    Inactive,
}
