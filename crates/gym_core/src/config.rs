//! Runtime configuration.
//!
//! # Responsibility
//! - Hold store behavior knobs (`StoreOptions`) and logging settings.
//! - Declare the command line, with `GYM_*` environment fallbacks, and map
//!   it into a `CoreConfig`.
//!
//! # Invariants
//! - Defaults reproduce the historical behavior: 10-character generated
//!   passwords and unknown seed roles kept as bare users.
//! - Logging is configured only when a log directory is given.

use clap::builder::RangedU64ValueParser;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

pub const DEFAULT_PASSWORD_LENGTH: usize = 10;

/// What bulk insert does with a seed record whose role is not recognised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum UnknownRolePolicy {
    /// Create the user without a trainee/trainer record.
    #[default]
    Ignore,
    /// Create nothing for the record.
    Skip,
}

/// Behavior knobs read by repositories and the seed service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Length of passwords generated for new users.
    pub password_length: usize,
    pub unknown_role: UnknownRolePolicy,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            password_length: DEFAULT_PASSWORD_LENGTH,
            unknown_role: UnknownRolePolicy::default(),
        }
    }
}

/// File logging settings. See `crate::logging::init_logging`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub log_dir: PathBuf,
}

/// Top-level configuration for binaries embedding the core.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreConfig {
    pub store: StoreOptions,
    /// `None` keeps logging uninitialized.
    pub logging: Option<LoggingConfig>,
    pub seed_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "gym_cli", version, about = "Seed an in-memory gym store and report its contents")]
pub struct CliArgs {
    #[arg(
        env = "GYM_SEED_FILE",
        value_name = "FILE",
        help = "JSON array of seed records to load at startup"
    )]
    pub seed_file: Option<PathBuf>,

    #[arg(
        long,
        env = "GYM_PASSWORD_LENGTH",
        value_name = "N",
        help = "Length of generated user passwords",
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub password_length: Option<usize>,

    #[arg(
        long,
        env = "GYM_UNKNOWN_ROLE",
        value_enum,
        ignore_case = true,
        value_name = "POLICY",
        help = "What to do with seed records whose role is not recognised"
    )]
    pub unknown_role: Option<UnknownRolePolicy>,

    #[arg(
        long,
        env = "GYM_LOG_LEVEL",
        value_name = "LEVEL",
        help = "Log level (trace|debug|info|warn|error); used with --log-dir"
    )]
    pub log_level: Option<String>,

    #[arg(
        long,
        env = "GYM_LOG_DIR",
        value_name = "DIR",
        help = "Absolute directory for rotating log files; logging is off without it"
    )]
    pub log_dir: Option<PathBuf>,
}

impl CoreConfig {
    pub fn from_args(args: CliArgs) -> Self {
        let CliArgs {
            seed_file,
            password_length,
            unknown_role,
            log_level,
            log_dir,
        } = args;

        let logging = log_dir.map(|log_dir| LoggingConfig {
            level: log_level
                .unwrap_or_else(|| crate::logging::default_log_level().to_string()),
            log_dir,
        });

        Self {
            store: StoreOptions {
                password_length: password_length.unwrap_or(DEFAULT_PASSWORD_LENGTH),
                unknown_role: unknown_role.unwrap_or_default(),
            },
            logging,
            seed_file,
        }
    }
}
