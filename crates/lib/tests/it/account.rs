//! Tests for the account service against the in-memory store.

use permitdesk::account::{AccountService, AccountUpdate};
use permitdesk::store::MemoryStore;

use crate::helpers::{TestHasher, new_account};

#[test]
fn create_then_lookup_by_id_returns_equal_record() {
    let store = MemoryStore::new();
    let mut session = store.session();
    let mut service = AccountService::new(&mut session, &TestHasher);

    let created = service
        .create_account(new_account("a@b.com", "alice", "s3cret!"))
        .unwrap();
    let fetched = service.get_by_id(created.id).unwrap().unwrap();

    assert_eq!(created, fetched);
}

#[test]
fn create_applies_defaults_and_never_stores_plaintext() {
    let store = MemoryStore::new();
    let mut session = store.session();
    let mut service = AccountService::new(&mut session, &TestHasher);

    let account = service
        .create_account(new_account("a@b.com", "alice", "s3cret!"))
        .unwrap();

    assert!(account.id.0 > 0);
    assert!(account.is_active);
    assert!(!account.is_superuser);
    assert_ne!(account.password_hash, "s3cret!");
}

#[test]
fn create_honors_explicit_is_active() {
    let store = MemoryStore::new();
    let mut session = store.session();
    let mut service = AccountService::new(&mut session, &TestHasher);

    let mut input = new_account("a@b.com", "alice", "s3cret!");
    input.is_active = Some(false);
    let account = service.create_account(input).unwrap();
    assert!(!account.is_active);
}

#[test]
fn create_duplicate_surfaces_conflict() {
    let store = MemoryStore::new();
    let mut session = store.session();
    let mut service = AccountService::new(&mut session, &TestHasher);
    service
        .create_account(new_account("a@b.com", "alice", "s3cret!"))
        .unwrap();

    let err = service
        .create_account(new_account("a@b.com", "someone-else", "pw"))
        .unwrap_err();
    assert!(err.is_conflict());

    // The failed commit left nothing behind.
    assert_eq!(service.list_accounts(0, 100).unwrap().len(), 1);
}

#[test]
fn create_rejects_bad_password_before_store_interaction() {
    let store = MemoryStore::new();
    let mut session = store.session();
    let mut service = AccountService::new(&mut session, &TestHasher);

    let err = service
        .create_account(new_account("a@b.com", "alice", ""))
        .unwrap_err();
    assert!(err.is_invalid_credential());
    assert!(service.list_accounts(0, 100).unwrap().is_empty());
}

#[test]
fn lookups_by_email_and_username() {
    let store = MemoryStore::new();
    let mut session = store.session();
    let mut service = AccountService::new(&mut session, &TestHasher);
    let created = service
        .create_account(new_account("a@b.com", "alice", "s3cret!"))
        .unwrap();

    assert_eq!(
        service.get_by_email("a@b.com").unwrap().unwrap().id,
        created.id
    );
    assert_eq!(
        service.get_by_username("alice").unwrap().unwrap().id,
        created.id
    );
    assert!(service.get_by_email("missing@b.com").unwrap().is_none());
    assert!(service.get_by_username("missing").unwrap().is_none());
}

#[test]
fn authenticate_unknown_user_and_wrong_password_are_indistinguishable() {
    let store = MemoryStore::new();
    let mut session = store.session();
    let mut service = AccountService::new(&mut session, &TestHasher);
    service
        .create_account(new_account("a@b.com", "alice", "s3cret!"))
        .unwrap();

    let unknown = service.authenticate("nobody", "s3cret!").unwrap();
    let wrong = service.authenticate("alice", "wrong").unwrap();
    assert!(unknown.is_none());
    assert!(wrong.is_none());

    let right = service.authenticate("alice", "s3cret!").unwrap();
    assert_eq!(right.unwrap().username, "alice");
}

#[test]
fn empty_update_is_identity_except_store_metadata() {
    let store = MemoryStore::new();
    let mut session = store.session();
    let mut service = AccountService::new(&mut session, &TestHasher);
    let created = service
        .create_account(new_account("a@b.com", "alice", "s3cret!"))
        .unwrap();

    let updated = service
        .update_account(created.id, AccountUpdate::default())
        .unwrap()
        .unwrap();

    assert_eq!(updated.email, created.email);
    assert_eq!(updated.username, created.username);
    assert_eq!(updated.password_hash, created.password_hash);
    assert_eq!(updated.first_name, created.first_name);
    assert_eq!(updated.last_name, created.last_name);
    assert_eq!(updated.is_active, created.is_active);
    assert_eq!(updated.is_superuser, created.is_superuser);
    assert_eq!(updated.created_at, created.created_at);
}

#[test]
fn partial_update_touches_only_present_fields() {
    let store = MemoryStore::new();
    let mut session = store.session();
    let mut service = AccountService::new(&mut session, &TestHasher);
    let created = service
        .create_account(new_account("a@b.com", "alice", "s3cret!"))
        .unwrap();

    let updated = service
        .update_account(
            created.id,
            AccountUpdate {
                first_name: Some("Alice".to_string()),
                ..Default::default()
            },
        )
        .unwrap()
        .unwrap();

    assert_eq!(updated.first_name.as_deref(), Some("Alice"));
    assert_eq!(updated.username, "alice");
    assert_eq!(updated.email, "a@b.com");
    assert_eq!(updated.password_hash, created.password_hash);
}

#[test]
fn password_update_rotates_credentials_and_nothing_else() {
    let store = MemoryStore::new();
    let mut session = store.session();
    let mut service = AccountService::new(&mut session, &TestHasher);
    let created = service
        .create_account(new_account("a@b.com", "alice", "old-password"))
        .unwrap();

    let updated = service
        .update_account(
            created.id,
            AccountUpdate {
                password: Some("new-password".to_string()),
                ..Default::default()
            },
        )
        .unwrap()
        .unwrap();

    assert_ne!(updated.password_hash, created.password_hash);
    assert_ne!(updated.password_hash, "new-password");
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.username, created.username);

    assert!(service.authenticate("alice", "old-password").unwrap().is_none());
    assert!(service.authenticate("alice", "new-password").unwrap().is_some());
}

#[test]
fn update_unknown_id_returns_absent() {
    let store = MemoryStore::new();
    let mut session = store.session();
    let mut service = AccountService::new(&mut session, &TestHasher);

    let result = service
        .update_account(999.into(), AccountUpdate::default())
        .unwrap();
    assert!(result.is_none());
}

#[test]
fn update_into_taken_username_surfaces_conflict() {
    let store = MemoryStore::new();
    let mut session = store.session();
    let mut service = AccountService::new(&mut session, &TestHasher);
    service
        .create_account(new_account("a@b.com", "alice", "pw1"))
        .unwrap();
    let bob = service
        .create_account(new_account("b@b.com", "bob", "pw2"))
        .unwrap();

    let err = service
        .update_account(
            bob.id,
            AccountUpdate {
                username: Some("alice".to_string()),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(err.is_conflict());

    // Bob is untouched after the aborted commit.
    let bob_after = service.get_by_id(bob.id).unwrap().unwrap();
    assert_eq!(bob_after.username, "bob");
}

#[test]
fn delete_then_lookup_absent_and_second_delete_is_false() {
    let store = MemoryStore::new();
    let mut session = store.session();
    let mut service = AccountService::new(&mut session, &TestHasher);
    let created = service
        .create_account(new_account("a@b.com", "alice", "s3cret!"))
        .unwrap();

    assert!(service.delete_account(created.id).unwrap());
    assert!(service.get_by_id(created.id).unwrap().is_none());
    assert!(!service.delete_account(created.id).unwrap());
}

#[test]
fn list_pages_are_disjoint_and_order_consistent() {
    let store = MemoryStore::new();
    let mut session = store.session();
    let mut service = AccountService::new(&mut session, &TestHasher);
    for i in 0..6 {
        service
            .create_account(new_account(
                &format!("user{i}@b.com"),
                &format!("user{i}"),
                "s3cret!",
            ))
            .unwrap();
    }

    let first = service.list_accounts(0, 3).unwrap();
    let second = service.list_accounts(3, 3).unwrap();

    let mut ids: Vec<_> = first.iter().map(|a| a.id).collect();
    ids.extend(second.iter().map(|a| a.id));
    let mut sorted = ids.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(ids.len(), 6);
    assert_eq!(ids, sorted);
}

#[test]
fn operations_are_visible_across_sessions() {
    let store = MemoryStore::new();

    let created = {
        let mut session = store.session();
        let mut service = AccountService::new(&mut session, &TestHasher);
        service
            .create_account(new_account("a@b.com", "alice", "s3cret!"))
            .unwrap()
    };

    let mut session = store.session();
    let service = AccountService::new(&mut session, &TestHasher);
    let fetched = service.get_by_id(created.id).unwrap().unwrap();
    assert_eq!(fetched, created);
}
