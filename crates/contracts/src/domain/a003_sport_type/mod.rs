pub mod aggregate;

pub use aggregate::{SportType, SportTypeDraft, SportTypeId};
