//! Utility modules

pub mod time;

pub use time::{MS_PER_DAY, age_in_days, short_date};
