//! Startup seeding of users, trainees and trainers.
//!
//! # Responsibility
//! - Parse seed records from a JSON array file.
//! - Bulk insert users with their trainee/trainer records.
//!
//! # Invariants
//! - Role strings are resolved into `SeedRole` while parsing, once per
//!   record, and never re-read afterwards.
//! - Seed records bypass name validation; they are trusted input.
//! - A whole batch is inserted under one store lock.

use crate::config::UnknownRolePolicy;
use crate::model::trainee::Trainee;
use crate::model::trainer::Trainer;
use crate::repo::user_catalog::create_user;
use crate::store::keys::new_key;
use crate::store::EntityStore;
use log::{error, info, warn};
use serde::{Deserialize, Deserializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Role carried by a seed record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeedRole {
    Trainee,
    Trainer,
    /// Missing or unrecognised role string.
    #[default]
    Unknown,
}

impl SeedRole {
    /// Resolves a role string, ignoring ASCII case.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("trainee") {
            Self::Trainee
        } else if raw.eq_ignore_ascii_case("trainer") {
            Self::Trainer
        } else {
            Self::Unknown
        }
    }
}

impl<'de> Deserialize<'de> for SeedRole {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map_or(Self::Unknown, Self::parse))
    }
}

/// One entry of the seed file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRecord {
    pub first_name: String,
    pub last_name: String,
    pub address: Option<String>,
    #[serde(default)]
    pub role: SeedRole,
    pub specialization: Option<String>,
}

/// Counts produced by one bulk insert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub trainees: usize,
    pub trainers: usize,
    /// Records whose role was not recognised.
    pub unknown_roles: usize,
}

/// Seed file loading error.
#[derive(Debug)]
pub enum SeedError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read seed file `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid seed file: {err}"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Reads a JSON array of seed records from `path`.
pub fn load_seed_file(path: impl AsRef<Path>) -> Result<Vec<SeedRecord>, SeedError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}

/// Seeding facade over an entity store.
pub struct SeedService<'s> {
    store: &'s EntityStore,
}

impl<'s> SeedService<'s> {
    pub fn new(store: &'s EntityStore) -> Self {
        Self { store }
    }

    /// Inserts every record as a user plus the trainee/trainer its role
    /// selects.
    ///
    /// Records with an unknown role follow the store's
    /// `UnknownRolePolicy`.
    pub fn bulk_insert(&self, records: &[SeedRecord]) -> SeedReport {
        let started_at = Instant::now();
        let options = self.store.options();

        let report = self.store.write(|c| {
            let mut report = SeedReport::default();
            for record in records {
                if record.role == SeedRole::Unknown {
                    report.unknown_roles += 1;
                    if options.unknown_role == UnknownRolePolicy::Skip {
                        warn!("event=seed_record module=seed status=skip reason=unknown_role");
                        continue;
                    }
                    warn!("event=seed_record module=seed status=ok role=none reason=unknown_role");
                }

                let user =
                    create_user(&mut c.users, &record.first_name, &record.last_name, options);
                report.users += 1;

                match record.role {
                    SeedRole::Trainee => {
                        let trainee = Trainee {
                            id: new_key(&c.trainees),
                            user_id: user.id,
                            address: record.address.clone(),
                        };
                        c.trainees.put(trainee.id, trainee);
                        report.trainees += 1;
                    }
                    SeedRole::Trainer => {
                        let trainer = Trainer {
                            id: new_key(&c.trainers),
                            user_id: user.id,
                            specialization: record.specialization.clone(),
                        };
                        c.trainers.put(trainer.id, trainer);
                        report.trainers += 1;
                    }
                    SeedRole::Unknown => {}
                }
            }
            report
        });

        info!(
            "event=seed_insert module=seed status=ok records={} users={} trainees={} trainers={} unknown_roles={} duration_ms={}",
            records.len(),
            report.users,
            report.trainees,
            report.trainers,
            report.unknown_roles,
            started_at.elapsed().as_millis()
        );
        report
    }

    /// Loads `path` and bulk inserts its records.
    pub fn seed_from_file(&self, path: impl AsRef<Path>) -> Result<SeedReport, SeedError> {
        match load_seed_file(path) {
            Ok(records) => Ok(self.bulk_insert(&records)),
            Err(err) => {
                error!("event=seed_load module=seed status=error error={err}");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SeedRecord, SeedRole};

    #[test]
    fn role_parse_ignores_case() {
        assert_eq!(SeedRole::parse("trainee"), SeedRole::Trainee);
        assert_eq!(SeedRole::parse("TRAINER"), SeedRole::Trainer);
        assert_eq!(SeedRole::parse("Coach"), SeedRole::Unknown);
        assert_eq!(SeedRole::parse(" trainee"), SeedRole::Unknown);
    }

    #[test]
    fn record_parses_camel_case_keys() {
        let record: SeedRecord = serde_json::from_str(
            r#"{"firstName":"Ann","lastName":"Lee","role":"Trainer","specialization":"Yoga"}"#,
        )
        .unwrap();
        assert_eq!(record.first_name, "Ann");
        assert_eq!(record.role, SeedRole::Trainer);
        assert_eq!(record.specialization.as_deref(), Some("Yoga"));
        assert!(record.address.is_none());
    }

    #[test]
    fn missing_or_null_role_is_unknown() {
        let missing: SeedRecord =
            serde_json::from_str(r#"{"firstName":"Ann","lastName":"Lee"}"#).unwrap();
        let null: SeedRecord =
            serde_json::from_str(r#"{"firstName":"Ann","lastName":"Lee","role":null}"#).unwrap();
        assert_eq!(missing.role, SeedRole::Unknown);
        assert_eq!(null.role, SeedRole::Unknown);
    }
}
