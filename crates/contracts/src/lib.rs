//! Shared data contracts between the API surface and the service layer.

pub mod domain;
pub mod enums;
pub mod shared;
