//! Training repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Create trainings together with their training type record.
//! - Merge partial updates, renaming the linked training type in place.
//! - Delete trainings with the cascade described on `delete`.
//!
//! # Invariants
//! - Trainee and trainer references are checked before any collection is
//!   touched, so a rejected create leaves no training type behind.
//! - Each training owns the training type created with it.

use super::merge::{apply_rules, FieldOutcome, FieldRule, MergeReport};
use super::user_catalog::log_rejected_fields;
use super::{RepoError, RepoResult};
use crate::model::trainee::TraineeId;
use crate::model::trainer::TrainerId;
use crate::model::training::{
    Training, TrainingCreate, TrainingId, TrainingPatch, TrainingType,
};
use crate::model::EntityKind;
use crate::store::keys::new_key;
use crate::store::{Collections, EntityStore};
use chrono::NaiveDate;
use log::{info, warn};

const TRAINING_RULES: &[FieldRule<TrainingPatch, Training, ()>] = &[
    FieldRule {
        field: "name",
        apply: merge_name,
    },
    FieldRule {
        field: "date",
        apply: merge_date,
    },
    FieldRule {
        field: "duration",
        apply: merge_duration,
    },
];

/// Repository interface for training CRUD operations.
pub trait TrainingRepository {
    fn create(&self, input: &TrainingCreate) -> RepoResult<Training>;
    fn find_by_id(&self, id: TrainingId) -> Option<Training>;
    fn find_all(&self) -> Vec<Training>;
    fn update(&self, id: TrainingId, patch: &TrainingPatch) -> RepoResult<Training>;
    fn delete(&self, id: TrainingId) -> RepoResult<()>;
}

/// Training repository backed by an `EntityStore`.
pub struct InMemoryTrainingRepository<'s> {
    store: &'s EntityStore,
}

impl<'s> InMemoryTrainingRepository<'s> {
    pub fn new(store: &'s EntityStore) -> Self {
        Self { store }
    }
}

/// Create input with every required field present.
struct RequiredFields<'a> {
    trainee_id: TraineeId,
    trainer_id: TrainerId,
    name: &'a str,
    date: NaiveDate,
    duration: u32,
    type_name: &'a str,
}

impl<'a> RequiredFields<'a> {
    fn from_input(input: &'a TrainingCreate) -> RepoResult<Self> {
        let name = input.name.as_deref().filter(|name| !name.is_empty());
        let type_name = input
            .training_type_name
            .as_deref()
            .filter(|type_name| !type_name.is_empty());

        match (
            input.trainee_id,
            input.trainer_id,
            name,
            input.date,
            input.duration,
            type_name,
        ) {
            (
                Some(trainee_id),
                Some(trainer_id),
                Some(name),
                Some(date),
                Some(duration),
                Some(type_name),
            ) => Ok(Self {
                trainee_id,
                trainer_id,
                name,
                date,
                duration,
                type_name,
            }),
            _ => {
                let missing = [
                    ("trainee_id", input.trainee_id.is_none()),
                    ("trainer_id", input.trainer_id.is_none()),
                    ("name", name.is_none()),
                    ("date", input.date.is_none()),
                    ("duration", input.duration.is_none()),
                    ("training_type_name", type_name.is_none()),
                ]
                .iter()
                .filter(|(_, missing)| *missing)
                .map(|(field, _)| *field)
                .collect::<Vec<_>>()
                .join(", ");
                Err(RepoError::InvalidInput(format!(
                    "missing required fields for creating a training: {missing}"
                )))
            }
        }
    }
}

impl TrainingRepository for InMemoryTrainingRepository<'_> {
    fn create(&self, input: &TrainingCreate) -> RepoResult<Training> {
        let fields = match RequiredFields::from_input(input) {
            Ok(fields) => fields,
            Err(err) => {
                warn!("event=training_create module=repo status=error error={err}");
                return Err(err);
            }
        };

        let result = self.store.write(|c| -> RepoResult<Training> {
            ensure_referenced(c, Some(fields.trainee_id), Some(fields.trainer_id))?;

            let training_type = TrainingType {
                id: new_key(&c.training_types),
                type_name: fields.type_name.to_string(),
            };
            let training = Training {
                id: new_key(&c.trainings),
                trainee_id: fields.trainee_id,
                trainer_id: fields.trainer_id,
                training_type_id: training_type.id,
                name: fields.name.to_string(),
                date: fields.date,
                duration: fields.duration,
            };
            c.training_types.put(training_type.id, training_type);
            c.trainings.put(training.id, training.clone());
            Ok(training)
        });

        match &result {
            Ok(training) => info!(
                "event=training_create module=repo status=ok training_id={} training_type_id={}",
                training.id, training.training_type_id
            ),
            Err(err) => warn!("event=training_create module=repo status=error error={err}"),
        }
        result
    }

    fn find_by_id(&self, id: TrainingId) -> Option<Training> {
        self.store.read(|c| c.trainings.get(&id).cloned())
    }

    fn find_all(&self) -> Vec<Training> {
        self.store.read(|c| c.trainings.values())
    }

    /// Applies present fields of `patch`.
    ///
    /// A new `training_type_name` renames the training type already linked
    /// to this training. Repointing to another trainee or trainer leaves the
    /// previous one untouched.
    fn update(&self, id: TrainingId, patch: &TrainingPatch) -> RepoResult<Training> {
        let result = self.store.write(|c| -> RepoResult<(Training, MergeReport)> {
            let mut training = c
                .trainings
                .get(&id)
                .cloned()
                .ok_or_else(|| RepoError::not_found(EntityKind::Training, id))?;
            ensure_referenced(c, patch.trainee_id, patch.trainer_id)?;

            let type_name = patch
                .training_type_name
                .as_deref()
                .filter(|type_name| !type_name.is_empty());
            if type_name.is_some() && !c.training_types.contains_key(&training.training_type_id) {
                return Err(RepoError::InconsistentState("training type record missing"));
            }

            let report = apply_rules(TRAINING_RULES, patch, &mut training, &());
            if let Some(trainee_id) = patch.trainee_id {
                training.trainee_id = trainee_id;
            }
            if let Some(trainer_id) = patch.trainer_id {
                training.trainer_id = trainer_id;
            }
            if let (Some(type_name), Some(training_type)) = (
                type_name,
                c.training_types.get_mut(&training.training_type_id),
            ) {
                type_name.clone_into(&mut training_type.type_name);
            }

            c.trainings.put(training.id, training.clone());
            Ok((training, report))
        });

        match result {
            Ok((training, report)) => {
                log_rejected_fields(EntityKind::Training, id, &report);
                info!("event=training_update module=repo status=ok training_id={id}");
                Ok(training)
            }
            Err(err) => {
                warn!("event=training_update module=repo status=error training_id={id} error={err}");
                Err(err)
            }
        }
    }

    /// Removes the training and, with it, the trainee, trainer and training
    /// type it references.
    ///
    /// The users owned by the removed trainee and trainer stay in the store,
    /// and other trainings pointing at them keep their references.
    fn delete(&self, id: TrainingId) -> RepoResult<()> {
        let removed = self.store.write(|c| {
            let training = c.trainings.remove(&id)?;
            c.trainees.remove(&training.trainee_id);
            c.trainers.remove(&training.trainer_id);
            c.training_types.remove(&training.training_type_id);
            Some(training)
        });

        match removed {
            Some(training) => {
                info!(
                    "event=training_delete module=repo status=ok training_id={} trainee_id={} trainer_id={} training_type_id={}",
                    id, training.trainee_id, training.trainer_id, training.training_type_id
                );
                Ok(())
            }
            None => {
                warn!("event=training_delete module=repo status=error training_id={id} error_code=not_found");
                Err(RepoError::not_found(EntityKind::Training, id))
            }
        }
    }
}

fn ensure_referenced(
    c: &Collections,
    trainee_id: Option<TraineeId>,
    trainer_id: Option<TrainerId>,
) -> RepoResult<()> {
    if let Some(trainee_id) = trainee_id {
        if !c.trainees.contains_key(&trainee_id) {
            return Err(RepoError::not_found(EntityKind::Trainee, trainee_id));
        }
    }
    if let Some(trainer_id) = trainer_id {
        if !c.trainers.contains_key(&trainer_id) {
            return Err(RepoError::not_found(EntityKind::Trainer, trainer_id));
        }
    }
    Ok(())
}

fn merge_name(patch: &TrainingPatch, training: &mut Training, _: &()) -> FieldOutcome {
    match patch.name.as_deref() {
        None => FieldOutcome::Absent,
        Some("") => FieldOutcome::Rejected,
        Some(name) => {
            name.clone_into(&mut training.name);
            FieldOutcome::Applied
        }
    }
}

fn merge_date(patch: &TrainingPatch, training: &mut Training, _: &()) -> FieldOutcome {
    patch.date.map_or(FieldOutcome::Absent, |date| {
        training.date = date;
        FieldOutcome::Applied
    })
}

fn merge_duration(patch: &TrainingPatch, training: &mut Training, _: &()) -> FieldOutcome {
    patch.duration.map_or(FieldOutcome::Absent, |duration| {
        training.duration = duration;
        FieldOutcome::Applied
    })
}
