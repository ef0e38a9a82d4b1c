//! Trainer record and payloads.

use super::user::{UserId, UserPatch};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TrainerId = Uuid;

/// Gym staff member leading trainings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trainer {
    pub id: TrainerId,
    /// Owned user account; removed together with the trainer.
    pub user_id: UserId,
    pub specialization: Option<String>,
}

/// Input for creating a trainer and its user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerCreate {
    pub first_name: String,
    pub last_name: String,
    /// Stored as given; not validated on create.
    pub specialization: Option<String>,
}

/// Partial update for a trainer and its user account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerPatch {
    #[serde(flatten)]
    pub profile: UserPatch,
    pub specialization: Option<String>,
}
