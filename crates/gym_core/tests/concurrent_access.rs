use gym_core::{
    EntityStore, InMemoryTraineeRepository, InMemoryTrainerRepository, TraineeCreate,
    TraineeRepository, TrainerCreate, TrainerRepository,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

const THREADS: usize = 8;
const CREATES_PER_THREAD: usize = 25;

#[test]
fn parallel_creates_allocate_distinct_usernames() {
    let store = Arc::new(EntityStore::new());

    let handles: Vec<_> = (0..THREADS)
        .map(|worker| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..CREATES_PER_THREAD {
                    if worker % 2 == 0 {
                        InMemoryTraineeRepository::new(&store)
                            .create(&TraineeCreate {
                                first_name: "Sam".to_string(),
                                last_name: "Lee".to_string(),
                                address: None,
                            })
                            .unwrap();
                    } else {
                        InMemoryTrainerRepository::new(&store)
                            .create(&TrainerCreate {
                                first_name: "Sam".to_string(),
                                last_name: "Lee".to_string(),
                                specialization: None,
                            })
                            .unwrap();
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let users = store.users();
    assert_eq!(users.len(), THREADS * CREATES_PER_THREAD);
    let usernames: HashSet<&str> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(usernames.len(), users.len());
    assert!(usernames.contains("sam.lee"));
    assert!(usernames.contains(format!("sam.lee.{}", users.len() - 1).as_str()));
}

#[test]
fn parallel_create_and_delete_keep_users_owned() {
    let store = Arc::new(EntityStore::new());

    thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| {
                let repo = InMemoryTraineeRepository::new(&store);
                for _ in 0..CREATES_PER_THREAD {
                    let trainee = repo
                        .create(&TraineeCreate {
                            first_name: "Kim".to_string(),
                            last_name: "Park".to_string(),
                            address: None,
                        })
                        .unwrap();
                    repo.delete(trainee.id).unwrap();
                }
            });
        }
    });

    let counts = store.counts();
    assert_eq!(counts.trainees, 0);
    assert_eq!(counts.users, 0);
}
