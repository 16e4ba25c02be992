#![forbid(unsafe_code)]

pub mod calendar;
pub mod chart;
pub mod dashboard;
pub mod error;
pub mod guide;
pub mod model;
pub mod program;
pub mod program_map;
pub mod progression;
pub mod time;
pub mod tools;

pub use error::ProgressError;
pub use time::Clock;
