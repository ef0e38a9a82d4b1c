//! Identifier, username and password generators.
//!
//! # Invariants
//! - Generators only inspect the collections they are given; callers must
//!   insert the generated value under the same store lock.

use super::collection::Collection;
use crate::model::user::User;
use rand::distributions::Alphanumeric;
use rand::Rng;
use uuid::Uuid;

/// Returns a random `Uuid` that is not currently a key of `collection`.
pub fn new_key<T: Clone>(collection: &Collection<T>) -> Uuid {
    loop {
        let candidate = Uuid::new_v4();
        if !collection.contains_key(&candidate) {
            return candidate;
        }
    }
}

/// Derives a unique username from a first/last name pair.
///
/// The base is `first.last` in lowercase. On collision the lowest free
/// numeric suffix is appended: `base.1`, `base.2`, ...
pub fn allocate_username(first_name: &str, last_name: &str, users: &Collection<User>) -> String {
    let base = format!("{first_name}.{last_name}").to_lowercase();
    if !username_exists(users, &base) {
        return base;
    }

    let mut suffix: u64 = 1;
    loop {
        let candidate = format!("{base}.{suffix}");
        if !username_exists(users, &candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Returns whether any stored user already holds `username` (exact match).
pub fn username_exists(users: &Collection<User>, username: &str) -> bool {
    users.iter().any(|user| user.username == username)
}

/// Generates an alphanumeric password of `length` characters.
pub fn generate_password(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{allocate_username, generate_password, new_key, username_exists};
    use crate::model::user::User;
    use crate::store::collection::Collection;
    use uuid::Uuid;

    fn user_named(username: &str) -> User {
        User {
            id: Uuid::new_v4(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            username: username.to_string(),
            password: "secret-pass".to_string(),
            is_active: true,
        }
    }

    fn users_with(usernames: &[&str]) -> Collection<User> {
        let mut users = Collection::default();
        for username in usernames {
            let user = user_named(username);
            users.put(user.id, user);
        }
        users
    }

    #[test]
    fn new_key_is_absent_from_collection() {
        let users = users_with(&["a", "b", "c"]);
        let key = new_key(&users);
        assert!(!users.contains_key(&key));
    }

    #[test]
    fn free_base_username_is_returned_as_is() {
        let users = users_with(&[]);
        assert_eq!(allocate_username("John", "Doe", &users), "john.doe");
    }

    #[test]
    fn collisions_take_lowest_free_suffix() {
        let users = users_with(&["john.doe"]);
        assert_eq!(allocate_username("John", "Doe", &users), "john.doe.1");

        let users = users_with(&["john.doe", "john.doe.1"]);
        assert_eq!(allocate_username("John", "Doe", &users), "john.doe.2");

        let users = users_with(&["john.doe", "john.doe.2"]);
        assert_eq!(allocate_username("John", "Doe", &users), "john.doe.1");
    }

    #[test]
    fn username_match_is_case_sensitive() {
        let users = users_with(&["John.Doe"]);
        assert!(!username_exists(&users, "john.doe"));
        assert_eq!(allocate_username("John", "Doe", &users), "john.doe");
    }

    #[test]
    fn password_has_requested_length_and_charset() {
        let password = generate_password(10);
        assert_eq!(password.len(), 10);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(generate_password(0).is_empty());
    }
}
