//! Trainee record and payloads.

use super::user::{UserId, UserPatch};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TraineeId = Uuid;

/// Gym member taking part in trainings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trainee {
    pub id: TraineeId,
    /// Owned user account; removed together with the trainee.
    pub user_id: UserId,
    pub address: Option<String>,
}

/// Input for creating a trainee and its user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraineeCreate {
    pub first_name: String,
    pub last_name: String,
    /// Stored as given; not validated on create.
    pub address: Option<String>,
}

/// Partial update for a trainee and its user account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraineePatch {
    #[serde(flatten)]
    pub profile: UserPatch,
    pub address: Option<String>,
}
