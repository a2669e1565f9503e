//! Multi-step workflows checking that every locker a user lists matches the
//! canonical locker record.

use locker_core::{Locker, LockerInput, MemoryStore, Repository, StoreError, User, UserInput};

fn assert_owner_views_match(store: &dyn Repository) {
    let lockers = store.list_lockers().unwrap();
    for user in store.list_users().unwrap() {
        for owned in &user.lockers {
            let canonical = lockers
                .iter()
                .find(|l| l.id == owned.id)
                .expect("listed locker missing from canonical collection");
            assert_eq!(owned, canonical);
            assert_eq!(owned.user_id, Some(user.id));
        }
    }
    for locker in &lockers {
        if let Some(owner_id) = locker.user_id {
            let owner: User = store.get_user(owner_id).unwrap();
            assert!(owner.lockers.iter().any(|l| l.id == locker.id));
        }
    }
}

fn create_locker(store: &dyn Repository, user_id: u64, number: &str) -> Locker {
    store
        .create_locker(
            user_id,
            LockerInput {
                number: number.to_string(),
                status: "available".to_string(),
            },
        )
        .unwrap()
}

/// Create → fetch → delete lifecycle of a single locker.
#[test]
fn test_locker_lifecycle_scenario() {
    let store = MemoryStore::new();

    let user = store
        .create_user(UserInput {
            email: "a@x.com".to_string(),
            first_name: "A".to_string(),
            last_name: "X".to_string(),
            password: Some("p".to_string()),
        })
        .unwrap();
    assert_eq!(user.id, 0);

    let locker = create_locker(&store, user.id, "12A");
    assert_eq!(locker.id, 0);
    assert_eq!(locker.user_id, Some(0));

    assert_eq!(store.get_user(0).unwrap().lockers, vec![locker]);

    store.delete_locker(0).unwrap();
    assert!(store.get_user(0).unwrap().lockers.is_empty());
    assert_eq!(
        store.get_locker(0).unwrap_err(),
        StoreError::LockerNotFound { id: 0 }
    );
}

#[test]
fn test_mixed_workflow_keeps_views_consistent() {
    let store = MemoryStore::new();
    let alice = store.create_user(UserInput::default()).unwrap();
    let bob = store.create_user(UserInput::default()).unwrap();

    let a1 = create_locker(&store, alice.id, "A1");
    let a2 = create_locker(&store, alice.id, "A2");
    let b1 = create_locker(&store, bob.id, "B1");
    assert_owner_views_match(&store);

    store
        .update_locker(
            a2.id,
            LockerInput {
                number: "A2".to_string(),
                status: "in-use".to_string(),
            },
        )
        .unwrap();
    assert_owner_views_match(&store);

    store.delete_locker(a1.id).unwrap();
    assert_owner_views_match(&store);

    store.delete_user(bob.id).unwrap();
    assert_owner_views_match(&store);
    assert_eq!(store.get_locker(b1.id).unwrap().user_id, None);

    store
        .update_user(
            alice.id,
            UserInput {
                email: "alice@x.com".to_string(),
                ..UserInput::default()
            },
        )
        .unwrap();
    assert_owner_views_match(&store);
    assert_eq!(store.get_user(alice.id).unwrap().lockers.len(), 1);
}
