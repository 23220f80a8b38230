//! Repositories: one unit struct per table, each method a single statement.

pub mod dish_repo;
pub mod note_repo;
pub mod person_repo;

pub use dish_repo::DishRepo;
pub use note_repo::NoteRepo;
pub use person_repo::PersonRepo;
