//! Registry entry-point: loads settings, opens the database and runs one
//! command.

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use registry::config::RegistrySettings;
use registry::domain::AppointmentRegistry;
use registry::example_data::seed_sample_data_on_startup;
use registry::inbound::cli::{self, CliArgs};
use registry::outbound::persistence::{
    DbPool, DieselRegistryStore, PoolConfig, run_pending_migrations,
};

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let settings = RegistrySettings::load_from_iter([OsString::from("registry")])
        .wrap_err("load registry settings")?;
    init_tracing(settings.log_json);

    let database_path = args
        .database
        .clone()
        .unwrap_or_else(|| settings.database_path());
    let mut pool_config = PoolConfig::new(database_path.to_string_lossy());
    if let Some(max_size) = settings.pool_max_size {
        pool_config = pool_config.with_max_size(max_size);
    }
    let pool = DbPool::new(pool_config)
        .wrap_err_with(|| format!("open database {}", database_path.display()))?;
    run_pending_migrations(&pool).wrap_err("apply migrations")?;

    let store = Arc::new(DieselRegistryStore::new(pool));
    let mut registry =
        AppointmentRegistry::open(store, Arc::new(DefaultClock)).wrap_err("load registry")?;
    seed_sample_data_on_startup(&settings, &mut registry).wrap_err("seed sample data")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    cli::run(args.command, &mut registry, &settings, &mut out)?;
    Ok(())
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}
