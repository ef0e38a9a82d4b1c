//! Trainee repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Create trainees together with their user accounts.
//! - Merge partial updates into a trainee and its user.
//! - Delete trainees together with their user accounts.
//!
//! # Invariants
//! - Names are validated before any collection is touched.
//! - A stored trainee always references a stored user.

use super::merge::{apply_rules, replace_optional_if, FieldOutcome, FieldRule, MergeReport};
use super::user_catalog::{create_user, log_rejected_fields, merge_user};
use super::{RepoError, RepoResult};
use crate::model::trainee::{Trainee, TraineeCreate, TraineeId, TraineePatch};
use crate::model::validation::{is_valid_field, is_valid_name};
use crate::model::EntityKind;
use crate::store::keys::new_key;
use crate::store::EntityStore;
use log::{info, warn};

const TRAINEE_RULES: &[FieldRule<TraineePatch, Trainee, ()>] = &[FieldRule {
    field: "address",
    apply: merge_address,
}];

/// Repository interface for trainee CRUD operations.
pub trait TraineeRepository {
    fn create(&self, input: &TraineeCreate) -> RepoResult<Trainee>;
    fn find_by_id(&self, id: TraineeId) -> Option<Trainee>;
    fn find_all(&self) -> Vec<Trainee>;
    fn update(&self, id: TraineeId, patch: &TraineePatch) -> RepoResult<Trainee>;
    fn delete(&self, id: TraineeId) -> RepoResult<()>;
}

/// Trainee repository backed by an `EntityStore`.
pub struct InMemoryTraineeRepository<'s> {
    store: &'s EntityStore,
}

impl<'s> InMemoryTraineeRepository<'s> {
    pub fn new(store: &'s EntityStore) -> Self {
        Self { store }
    }
}

impl TraineeRepository for InMemoryTraineeRepository<'_> {
    fn create(&self, input: &TraineeCreate) -> RepoResult<Trainee> {
        if !is_valid_name(Some(input.first_name.as_str()))
            || !is_valid_name(Some(input.last_name.as_str()))
        {
            warn!("event=trainee_create module=repo status=error error_code=invalid_name");
            return Err(RepoError::InvalidInput(
                "invalid first name or last name".to_string(),
            ));
        }

        let options = self.store.options();
        let trainee = self.store.write(|c| {
            let user = create_user(&mut c.users, &input.first_name, &input.last_name, options);
            let trainee = Trainee {
                id: new_key(&c.trainees),
                user_id: user.id,
                address: input.address.clone(),
            };
            c.trainees.put(trainee.id, trainee.clone());
            trainee
        });

        info!(
            "event=trainee_create module=repo status=ok trainee_id={} user_id={}",
            trainee.id, trainee.user_id
        );
        Ok(trainee)
    }

    fn find_by_id(&self, id: TraineeId) -> Option<Trainee> {
        self.store.read(|c| c.trainees.get(&id).cloned())
    }

    fn find_all(&self) -> Vec<Trainee> {
        self.store.read(|c| c.trainees.values())
    }

    fn update(&self, id: TraineeId, patch: &TraineePatch) -> RepoResult<Trainee> {
        let result = self.store.write(|c| -> RepoResult<(_, MergeReport)> {
            let mut trainee = c
                .trainees
                .get(&id)
                .cloned()
                .ok_or_else(|| RepoError::not_found(EntityKind::Trainee, id))?;
            let mut user = c
                .users
                .get(&trainee.user_id)
                .cloned()
                .ok_or_else(|| RepoError::InconsistentState("trainee user record missing"))?;

            let mut report = merge_user(&patch.profile, &mut user, &c.users);
            report.extend(apply_rules(TRAINEE_RULES, patch, &mut trainee, &()));

            c.users.put(user.id, user);
            c.trainees.put(trainee.id, trainee.clone());
            Ok((trainee, report))
        });

        match result {
            Ok((trainee, report)) => {
                log_rejected_fields(EntityKind::Trainee, id, &report);
                info!(
                    "event=trainee_update module=repo status=ok trainee_id={} applied={}",
                    id,
                    report.applied.len()
                );
                Ok(trainee)
            }
            Err(err) => {
                warn!("event=trainee_update module=repo status=error trainee_id={id} error={err}");
                Err(err)
            }
        }
    }

    fn delete(&self, id: TraineeId) -> RepoResult<()> {
        let removed = self.store.write(|c| {
            let trainee = c.trainees.remove(&id)?;
            c.users.remove(&trainee.user_id);
            Some(trainee)
        });

        match removed {
            Some(trainee) => {
                info!(
                    "event=trainee_delete module=repo status=ok trainee_id={} user_id={}",
                    id, trainee.user_id
                );
                Ok(())
            }
            None => {
                warn!("event=trainee_delete module=repo status=error trainee_id={id} error_code=not_found");
                Err(RepoError::not_found(EntityKind::Trainee, id))
            }
        }
    }
}

fn merge_address(patch: &TraineePatch, trainee: &mut Trainee, _: &()) -> FieldOutcome {
    let value = patch.address.as_deref();
    replace_optional_if(value, is_valid_field(value), &mut trainee.address)
}
