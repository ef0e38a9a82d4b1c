//! User account record.
//!
//! # Invariants
//! - `username` is unique across all stored users.
//! - A user is never created on its own; it is owned by a trainee or trainer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type UserId = Uuid;

/// Login account shared by trainees and trainers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    /// Plain text, as generated or last accepted by an update.
    pub password: String,
    pub is_active: bool,
}

/// Optional user fields carried by trainee/trainer updates.
///
/// Absent fields are left untouched. Present fields that fail validation are
/// skipped without error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}
