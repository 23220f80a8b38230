pub mod person;
pub mod record;
