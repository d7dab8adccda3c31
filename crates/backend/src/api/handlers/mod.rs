pub mod a001_holiday;
pub mod a002_sport;
pub mod a003_sport_type;
