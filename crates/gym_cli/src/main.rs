//! CLI entry point.
//!
//! # Responsibility
//! - Parse flags (with `GYM_*` environment fallbacks) into a `CoreConfig`.
//! - Seed a fresh store from a JSON file and print per-collection counts.

use clap::Parser;
use gym_core::{init_logging, CliArgs, CoreConfig, EntityStore, SeedService};
use log::info;
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = CoreConfig::from_args(CliArgs::parse());
    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("gym_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: CoreConfig) -> Result<(), Box<dyn Error>> {
    if let Some(logging) = &config.logging {
        init_logging(logging)?;
    }

    let store = EntityStore::with_options(config.store.clone());
    if let Some(seed_file) = &config.seed_file {
        let report = SeedService::new(&store).seed_from_file(seed_file)?;
        info!(
            "event=cli_seed module=cli status=ok users={} unknown_roles={}",
            report.users, report.unknown_roles
        );
    }

    let counts = store.counts();
    println!("gym_core version={}", gym_core::core_version());
    println!("users={}", counts.users);
    println!("trainees={}", counts.trainees);
    println!("trainers={}", counts.trainers);
    println!("trainings={}", counts.trainings);
    println!("training_types={}", counts.training_types);
    Ok(())
}
