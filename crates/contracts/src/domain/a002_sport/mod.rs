pub mod aggregate;

pub use aggregate::{Sport, SportDetail, SportDraft, SportId};
