//! Trainer repository contract and in-memory implementation.
//!
//! Mirrors the trainee repository: every trainer owns one user account that
//! is created, merged and deleted alongside it.

use super::merge::{apply_rules, replace_optional_if, FieldOutcome, FieldRule, MergeReport};
use super::user_catalog::{create_user, log_rejected_fields, merge_user};
use super::{RepoError, RepoResult};
use crate::model::trainer::{Trainer, TrainerCreate, TrainerId, TrainerPatch};
use crate::model::validation::{is_valid_field, is_valid_name};
use crate::model::EntityKind;
use crate::store::keys::new_key;
use crate::store::EntityStore;
use log::{info, warn};

const TRAINER_RULES: &[FieldRule<TrainerPatch, Trainer, ()>] = &[FieldRule {
    field: "specialization",
    apply: merge_specialization,
}];

/// Repository interface for trainer CRUD operations.
pub trait TrainerRepository {
    fn create(&self, input: &TrainerCreate) -> RepoResult<Trainer>;
    fn find_by_id(&self, id: TrainerId) -> Option<Trainer>;
    fn find_all(&self) -> Vec<Trainer>;
    fn update(&self, id: TrainerId, patch: &TrainerPatch) -> RepoResult<Trainer>;
    fn delete(&self, id: TrainerId) -> RepoResult<()>;
}

/// Trainer repository backed by an `EntityStore`.
pub struct InMemoryTrainerRepository<'s> {
    store: &'s EntityStore,
}

impl<'s> InMemoryTrainerRepository<'s> {
    pub fn new(store: &'s EntityStore) -> Self {
        Self { store }
    }
}

impl TrainerRepository for InMemoryTrainerRepository<'_> {
    fn create(&self, input: &TrainerCreate) -> RepoResult<Trainer> {
        if !is_valid_name(Some(input.first_name.as_str()))
            || !is_valid_name(Some(input.last_name.as_str()))
        {
            warn!("event=trainer_create module=repo status=error error_code=invalid_name");
            return Err(RepoError::InvalidInput(
                "invalid first name or last name".to_string(),
            ));
        }

        let options = self.store.options();
        let trainer = self.store.write(|c| {
            let user = create_user(&mut c.users, &input.first_name, &input.last_name, options);
            let trainer = Trainer {
                id: new_key(&c.trainers),
                user_id: user.id,
                specialization: input.specialization.clone(),
            };
            c.trainers.put(trainer.id, trainer.clone());
            trainer
        });

        info!(
            "event=trainer_create module=repo status=ok trainer_id={} user_id={}",
            trainer.id, trainer.user_id
        );
        Ok(trainer)
    }

    fn find_by_id(&self, id: TrainerId) -> Option<Trainer> {
        self.store.read(|c| c.trainers.get(&id).cloned())
    }

    fn find_all(&self) -> Vec<Trainer> {
        self.store.read(|c| c.trainers.values())
    }

    fn update(&self, id: TrainerId, patch: &TrainerPatch) -> RepoResult<Trainer> {
        let result = self.store.write(|c| -> RepoResult<(_, MergeReport)> {
            let mut trainer = c
                .trainers
                .get(&id)
                .cloned()
                .ok_or_else(|| RepoError::not_found(EntityKind::Trainer, id))?;
            let mut user = c
                .users
                .get(&trainer.user_id)
                .cloned()
                .ok_or_else(|| RepoError::InconsistentState("trainer user record missing"))?;

            let mut report = merge_user(&patch.profile, &mut user, &c.users);
            report.extend(apply_rules(TRAINER_RULES, patch, &mut trainer, &()));

            c.users.put(user.id, user);
            c.trainers.put(trainer.id, trainer.clone());
            Ok((trainer, report))
        });

        match result {
            Ok((trainer, report)) => {
                log_rejected_fields(EntityKind::Trainer, id, &report);
                info!(
                    "event=trainer_update module=repo status=ok trainer_id={} applied={}",
                    id,
                    report.applied.len()
                );
                Ok(trainer)
            }
            Err(err) => {
                warn!("event=trainer_update module=repo status=error trainer_id={id} error={err}");
                Err(err)
            }
        }
    }

    fn delete(&self, id: TrainerId) -> RepoResult<()> {
        let removed = self.store.write(|c| {
            let trainer = c.trainers.remove(&id)?;
            c.users.remove(&trainer.user_id);
            Some(trainer)
        });

        match removed {
            Some(trainer) => {
                info!(
                    "event=trainer_delete module=repo status=ok trainer_id={} user_id={}",
                    id, trainer.user_id
                );
                Ok(())
            }
            None => {
                warn!("event=trainer_delete module=repo status=error trainer_id={id} error_code=not_found");
                Err(RepoError::not_found(EntityKind::Trainer, id))
            }
        }
    }
}

fn merge_specialization(patch: &TrainerPatch, trainer: &mut Trainer, _: &()) -> FieldOutcome {
    let value = patch.specialization.as_deref();
    replace_optional_if(value, is_valid_field(value), &mut trainer.specialization)
}
