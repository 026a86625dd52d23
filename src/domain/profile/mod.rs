//! Profile module - the user's health and lifestyle inputs.
//!
//! Raw submissions arrive as [`RawProfile`] and are validated into a
//! [`UserProfile`]; validation failures are the only errors an analysis
//! request surfaces to its caller.

mod city;
mod occupation;
mod user_profile;

pub use city::City;
pub use occupation::Occupation;
pub use user_profile::{
    Disclosure, NumericInput, RawProfile, UserProfile, WorkShift, MAX_AGE, MAX_MONTHLY_INCOME,
    MIN_AGE,
};
