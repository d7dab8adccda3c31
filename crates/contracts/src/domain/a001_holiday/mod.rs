pub mod aggregate;

pub use aggregate::{Holiday, HolidayDetail, HolidayDraft, HolidayId};
