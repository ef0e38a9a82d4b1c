//! Domain model for gym membership records.
//!
//! # Responsibility
//! - Define the records held by the entity store.
//! - Define create/patch payloads consumed by repositories.
//! - Provide stateless field validators.
//!
//! # Invariants
//! - Every record is identified by a generated `Uuid`.
//! - Every trainee and trainer owns exactly one user record.

pub mod trainee;
pub mod trainer;
pub mod training;
pub mod user;
pub mod validation;

use std::fmt::{Display, Formatter};

/// Record kinds held by the entity store.
///
/// Used in error values and log lines to name the collection involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Trainee,
    Trainer,
    Training,
    TrainingType,
}

impl EntityKind {
    /// Stable lowercase name used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Trainee => "trainee",
            Self::Trainer => "trainer",
            Self::Training => "training",
            Self::TrainingType => "training_type",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::User => "User",
            Self::Trainee => "Trainee",
            Self::Trainer => "Trainer",
            Self::Training => "Training",
            Self::TrainingType => "TrainingType",
        };
        f.write_str(label)
    }
}
