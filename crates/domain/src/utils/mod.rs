//! Pure helpers shared by the grid and its presentation.

pub mod duration;
pub mod time_of_day;
