//! Registry configuration loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_DATABASE_PATH: &str = "turnos.db";

/// Settings for the registry binary.
///
/// Values come from `REGISTRY_*` environment variables or a configuration
/// file; command-line flags on individual commands take precedence.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REGISTRY")]
pub struct RegistrySettings {
    /// SQLite database file.
    pub database_path: Option<PathBuf>,
    /// Seed the sample dataset when the registry has no staff.
    #[ortho_config(default = false)]
    pub seed_sample_data: bool,
    /// Dataset file used for seeding instead of the bundled one.
    pub sample_data_path: Option<PathBuf>,
    /// Emit logs as JSON lines.
    #[ortho_config(default = false)]
    pub log_json: bool,
    /// Upper bound on pooled connections.
    pub pool_max_size: Option<u32>,
}

impl RegistrySettings {
    /// Return the configured database path, falling back to `turnos.db`.
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for registry configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> RegistrySettings {
        RegistrySettings::load_from_iter([OsString::from("registry")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("REGISTRY_DATABASE_PATH", None::<String>),
            ("REGISTRY_SEED_SAMPLE_DATA", None::<String>),
            ("REGISTRY_SAMPLE_DATA_PATH", None::<String>),
            ("REGISTRY_LOG_JSON", None::<String>),
            ("REGISTRY_POOL_MAX_SIZE", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.database_path(), PathBuf::from("turnos.db"));
        assert!(!settings.seed_sample_data);
        assert!(settings.sample_data_path.is_none());
        assert!(!settings.log_json);
        assert!(settings.pool_max_size.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("REGISTRY_DATABASE_PATH", Some("/var/lib/patronato/turnos.db".to_owned())),
            ("REGISTRY_SEED_SAMPLE_DATA", Some("true".to_owned())),
            ("REGISTRY_SAMPLE_DATA_PATH", Some("/tmp/sample.json".to_owned())),
            ("REGISTRY_LOG_JSON", Some("true".to_owned())),
            ("REGISTRY_POOL_MAX_SIZE", Some("2".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.database_path(),
            PathBuf::from("/var/lib/patronato/turnos.db")
        );
        assert!(settings.seed_sample_data);
        assert_eq!(
            settings.sample_data_path,
            Some(PathBuf::from("/tmp/sample.json"))
        );
        assert!(settings.log_json);
        assert_eq!(settings.pool_max_size, Some(2));
    }
}
