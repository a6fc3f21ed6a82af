//! Sample data seeding for demonstrations and first runs.

mod seeder;
mod startup;

pub use seeder::{SeedOutcome, SeedingError, seed_sample_data};
pub use startup::{StartupSeedingError, load_dataset, seed_sample_data_on_startup};
