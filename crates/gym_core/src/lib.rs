//! Core domain logic for the gym membership store.
//! This crate is the single source of truth for cross-entity invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{CliArgs, CoreConfig, LoggingConfig, StoreOptions, UnknownRolePolicy};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::trainee::{Trainee, TraineeCreate, TraineeId, TraineePatch};
pub use model::trainer::{Trainer, TrainerCreate, TrainerId, TrainerPatch};
pub use model::training::{
    Training, TrainingCreate, TrainingId, TrainingPatch, TrainingType, TrainingTypeId,
};
pub use model::user::{User, UserId, UserPatch};
pub use model::EntityKind;
pub use repo::trainee_repo::{InMemoryTraineeRepository, TraineeRepository};
pub use repo::trainer_repo::{InMemoryTrainerRepository, TrainerRepository};
pub use repo::training_repo::{InMemoryTrainingRepository, TrainingRepository};
pub use repo::{RepoError, RepoResult};
pub use service::seed_service::{
    load_seed_file, SeedError, SeedRecord, SeedReport, SeedRole, SeedService,
};
pub use store::{EntityStore, StoreCounts};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
