//! User records owned by trainees and trainers.
//!
//! # Responsibility
//! - Create the user account that accompanies every new trainee/trainer.
//! - Merge profile patches into an existing user.
//!
//! # Invariants
//! - Callers hold the store lock for the whole create/merge and insert the
//!   returned user before releasing it.
//! - Usernames stay unique across all stored users.

use super::merge::{apply_rules, replace_if, FieldOutcome, FieldRule, MergeReport};
use crate::config::StoreOptions;
use crate::model::user::{User, UserPatch};
use crate::model::validation::{is_valid_field, is_valid_name, is_valid_password};
use crate::model::EntityKind;
use crate::store::collection::Collection;
use crate::store::keys::{allocate_username, generate_password, new_key};
use log::debug;
use uuid::Uuid;

const USER_RULES: &[FieldRule<UserPatch, User, Collection<User>>] = &[
    FieldRule {
        field: "first_name",
        apply: merge_first_name,
    },
    FieldRule {
        field: "last_name",
        apply: merge_last_name,
    },
    FieldRule {
        field: "username",
        apply: merge_username,
    },
    FieldRule {
        field: "password",
        apply: merge_password,
    },
];

/// Builds and stores a new active user with a generated id, username and
/// password.
pub(crate) fn create_user(
    users: &mut Collection<User>,
    first_name: &str,
    last_name: &str,
    options: &StoreOptions,
) -> User {
    let user = User {
        id: new_key(users),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        username: allocate_username(first_name, last_name, users),
        password: generate_password(options.password_length),
        is_active: true,
    };
    users.put(user.id, user.clone());
    user
}

/// Applies `patch` to `user` using the user rule table.
///
/// `users` is the current user collection, consulted for username
/// uniqueness. The caller writes `user` back.
pub(crate) fn merge_user(patch: &UserPatch, user: &mut User, users: &Collection<User>) -> MergeReport {
    apply_rules(USER_RULES, patch, user, users)
}

/// Emits one debug line per rejected patch field.
pub(crate) fn log_rejected_fields(entity: EntityKind, id: Uuid, report: &MergeReport) {
    for field in &report.rejected {
        debug!(
            "event={}_update module=repo status=skip id={} field={} reason=validation",
            entity.as_str(),
            id,
            field
        );
    }
}

fn merge_first_name(patch: &UserPatch, user: &mut User, _: &Collection<User>) -> FieldOutcome {
    let value = patch.first_name.as_deref();
    replace_if(value, is_valid_name(value), &mut user.first_name)
}

fn merge_last_name(patch: &UserPatch, user: &mut User, _: &Collection<User>) -> FieldOutcome {
    let value = patch.last_name.as_deref();
    replace_if(value, is_valid_name(value), &mut user.last_name)
}

fn merge_username(patch: &UserPatch, user: &mut User, users: &Collection<User>) -> FieldOutcome {
    let value = patch.username.as_deref();
    let accepted = is_valid_field(value)
        && value.is_some_and(|username| !username_taken_by_other(users, username, user.id));
    replace_if(value, accepted, &mut user.username)
}

fn merge_password(patch: &UserPatch, user: &mut User, _: &Collection<User>) -> FieldOutcome {
    let value = patch.password.as_deref();
    replace_if(value, is_valid_password(value), &mut user.password)
}

fn username_taken_by_other(users: &Collection<User>, username: &str, owner: Uuid) -> bool {
    users
        .iter()
        .any(|user| user.id != owner && user.username == username)
}

#[cfg(test)]
mod tests {
    use super::{create_user, merge_user};
    use crate::config::StoreOptions;
    use crate::model::user::{User, UserPatch};
    use crate::store::collection::Collection;

    fn seeded() -> (Collection<User>, User, User) {
        let mut users = Collection::default();
        let options = StoreOptions::default();
        let john = create_user(&mut users, "John", "Doe", &options);
        let jane = create_user(&mut users, "Jane", "Roe", &options);
        (users, john, jane)
    }

    #[test]
    fn create_user_stores_active_user_with_generated_credentials() {
        let (users, john, _) = seeded();
        assert_eq!(users.get(&john.id), Some(&john));
        assert_eq!(john.username, "john.doe");
        assert_eq!(john.password.chars().count(), 10);
        assert!(john.is_active);
    }

    #[test]
    fn second_user_with_same_name_gets_suffix() {
        let (mut users, _, _) = seeded();
        let twin = create_user(&mut users, "John", "Doe", &StoreOptions::default());
        assert_eq!(twin.username, "john.doe.1");
    }

    #[test]
    fn merge_applies_valid_fields() {
        let (users, mut john, _) = seeded();
        let patch = UserPatch {
            first_name: Some("Johnny".to_string()),
            last_name: None,
            username: Some("johnny".to_string()),
            password: Some("longenough".to_string()),
        };

        let report = merge_user(&patch, &mut john, &users);

        assert_eq!(report.applied, vec!["first_name", "username", "password"]);
        assert!(report.rejected.is_empty());
        assert_eq!(john.first_name, "Johnny");
        assert_eq!(john.last_name, "Doe");
        assert_eq!(john.username, "johnny");
        assert_eq!(john.password, "longenough");
    }

    #[test]
    fn merge_rejects_invalid_fields_silently() {
        let (users, mut john, jane) = seeded();
        let before = john.clone();
        let patch = UserPatch {
            first_name: Some("lowercase".to_string()),
            last_name: Some(String::new()),
            username: Some(jane.username.clone()),
            password: Some("short".to_string()),
        };

        let report = merge_user(&patch, &mut john, &users);

        assert!(report.applied.is_empty());
        assert_eq!(
            report.rejected,
            vec!["first_name", "last_name", "username", "password"]
        );
        assert_eq!(john, before);
    }

    #[test]
    fn keeping_own_username_is_not_a_conflict() {
        let (users, mut john, _) = seeded();
        let patch = UserPatch {
            username: Some(john.username.clone()),
            ..UserPatch::default()
        };
        let report = merge_user(&patch, &mut john, &users);
        assert!(report.rejected.is_empty());
        assert_eq!(john.username, "john.doe");
    }
}
