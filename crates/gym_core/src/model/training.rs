//! Training session and training type records.
//!
//! # Invariants
//! - A training references one trainee, one trainer and one training type.
//! - Every training type is created by, and belongs to, exactly one training.

use super::trainee::TraineeId;
use super::trainer::TrainerId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TrainingId = Uuid;
pub type TrainingTypeId = Uuid;

/// Category label attached to a training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingType {
    pub id: TrainingTypeId,
    pub type_name: String,
}

/// One scheduled training session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Training {
    pub id: TrainingId,
    pub trainee_id: TraineeId,
    pub trainer_id: TrainerId,
    pub training_type_id: TrainingTypeId,
    pub name: String,
    pub date: NaiveDate,
    /// Length of the session in minutes.
    pub duration: u32,
}

/// Input for creating a training.
///
/// Every field is optional at the type level so that missing input surfaces
/// as `RepoError::InvalidInput` instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingCreate {
    pub trainee_id: Option<TraineeId>,
    pub trainer_id: Option<TrainerId>,
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub duration: Option<u32>,
    pub training_type_name: Option<String>,
}

/// Partial update for a training.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingPatch {
    pub trainee_id: Option<TraineeId>,
    pub trainer_id: Option<TrainerId>,
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub duration: Option<u32>,
    pub training_type_name: Option<String>,
}
