//! Startup seeding orchestration.

use example_data::{DatasetError, SampleDataset};
use thiserror::Error;
use tracing::info;

use crate::config::RegistrySettings;
use crate::domain::AppointmentRegistry;
use crate::domain::ports::RegistryStore;

use super::seeder::{SeedOutcome, SeedingError, seed_sample_data};

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// The dataset could not be loaded or failed validation.
    #[error("sample dataset error: {0}")]
    Dataset(#[from] DatasetError),
    /// Writing the dataset failed.
    #[error("sample data seeding error: {0}")]
    Seeding(#[from] SeedingError),
}

/// Load the configured dataset file, or the bundled dataset when none is
/// configured.
///
/// # Errors
///
/// Returns [`DatasetError`] when the file cannot be read or is invalid.
pub fn load_dataset(settings: &RegistrySettings) -> Result<SampleDataset, DatasetError> {
    match settings.sample_data_path.as_deref() {
        Some(path) => {
            info!(path = %path.display(), "loading sample dataset");
            SampleDataset::from_file(path)
        }
        None => SampleDataset::bundled(),
    }
}

/// Apply sample data on startup when enabled.
///
/// Returns `None` when seeding is disabled.
///
/// # Errors
///
/// Returns [`StartupSeedingError`] when the dataset cannot be loaded or
/// written.
pub fn seed_sample_data_on_startup<S>(
    settings: &RegistrySettings,
    registry: &mut AppointmentRegistry<S>,
) -> Result<Option<SeedOutcome>, StartupSeedingError>
where
    S: RegistryStore,
{
    if !settings.seed_sample_data {
        info!(reason = "disabled", "sample data seeding skipped");
        return Ok(None);
    }

    let dataset = load_dataset(settings)?;
    Ok(Some(seed_sample_data(registry, &dataset)?))
}
