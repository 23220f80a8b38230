//! Row types read from the database and their conversions into core types.

pub mod dish;
pub mod note;
pub mod person;
