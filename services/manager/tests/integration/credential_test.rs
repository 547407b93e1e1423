use cla_domain::id::LinkId;
use cla_domain::link::ApplyTo;
use cla_domain::manager::ManagerRole;
use cla_manager::domain::types::ManagerEntry;
use cla_manager::error::ManagerServiceError;
use cla_manager::usecase::credential::{
    CheckCredentialsInput, CheckCredentialsUseCase, ResetPasswordInput, ResetPasswordUseCase,
};

use crate::helpers::{MemoryRosterStore, admin, corp_link, employee};

fn check_input(user: &str, password_hash: &str) -> CheckCredentialsInput {
    CheckCredentialsInput {
        user: user.to_owned(),
        password_hash: password_hash.to_owned(),
    }
}

fn reset_input(email: &str, old: &str, new: &str) -> ResetPasswordInput {
    ResetPasswordInput {
        link_id: LinkId::from("link1"),
        email: email.to_owned(),
        old_password_hash: old.to_owned(),
        new_password_hash: new.to_owned(),
    }
}

// ── CheckCredentials ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_match_credential_on_every_link_it_manages() {
    let store = MemoryRosterStore::new();
    store.insert_link(corp_link("link1"), vec![admin("a@x.com")]);
    let mut link2 = corp_link("link2");
    link2.repo_id = Some("kernel".to_owned());
    store.insert_link(link2, vec![employee("a@x.com"), employee("b@x.com")]);

    let uc = CheckCredentialsUseCase { roster: store };
    let result = uc.execute(check_input("a@x.com", "initial-pw")).await.unwrap();

    assert_eq!(result.len(), 2);
    let on_link1 = &result[&LinkId::from("link1")];
    assert_eq!(on_link1.len(), 1);
    assert_eq!(on_link1[0].role, ManagerRole::Admin);
    assert_eq!(on_link1[0].platform, "gitee");
    assert_eq!(on_link1[0].org_id, "openeuler");
    assert_eq!(on_link1[0].repo_id, None);
    assert!(!on_link1[0].initial_password_changed);

    let on_link2 = &result[&LinkId::from("link2")];
    assert_eq!(on_link2[0].role, ManagerRole::Employee);
    assert_eq!(on_link2[0].repo_id.as_deref(), Some("kernel"));
}

#[tokio::test]
async fn should_ignore_disabled_and_individual_links() {
    let store = MemoryRosterStore::new();
    let mut disabled = corp_link("disabled");
    disabled.enabled = false;
    store.insert_link(disabled, vec![admin("a@x.com")]);
    let mut individual = corp_link("individual");
    individual.apply_to = ApplyTo::Individual;
    store.insert_link(individual, vec![admin("a@x.com")]);
    store.insert_link(corp_link("link1"), vec![admin("a@x.com")]);

    let uc = CheckCredentialsUseCase { roster: store };
    let result = uc.execute(check_input("a@x.com", "initial-pw")).await.unwrap();

    assert_eq!(result.len(), 1);
    assert!(result.contains_key(&LinkId::from("link1")));
}

#[tokio::test]
async fn should_return_no_record_found_for_wrong_password() {
    let store = MemoryRosterStore::new();
    store.insert_link(corp_link("link1"), vec![admin("a@x.com")]);

    let uc = CheckCredentialsUseCase { roster: store };
    let result = uc.execute(check_input("a@x.com", "guess")).await;

    assert!(
        matches!(result, Err(ManagerServiceError::NoRecordFound)),
        "expected NoRecordFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_return_no_record_found_for_unknown_user() {
    let store = MemoryRosterStore::new();
    store.insert_link(corp_link("link1"), vec![admin("a@x.com")]);

    let uc = CheckCredentialsUseCase { roster: store };
    let result = uc.execute(check_input("nobody@x.com", "initial-pw")).await;

    assert!(matches!(result, Err(ManagerServiceError::NoRecordFound)));
}

#[tokio::test]
async fn should_return_every_match_when_roster_holds_duplicates() {
    // emails are unique per roster, but the lookup must not hide bad data
    let store = MemoryRosterStore::new();
    store.insert_link(
        corp_link("link1"),
        vec![admin("a@x.com"), employee("a@x.com")],
    );

    let uc = CheckCredentialsUseCase { roster: store };
    let result = uc.execute(check_input("a@x.com", "initial-pw")).await.unwrap();

    assert_eq!(result[&LinkId::from("link1")].len(), 2);
}

// ── ResetPassword ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_rotate_password_and_mark_it_changed() {
    let store = MemoryRosterStore::new();
    store.insert_link(corp_link("link1"), vec![admin("a@x.com"), employee("b@x.com")]);

    ResetPasswordUseCase {
        roster: store.clone(),
    }
    .execute(reset_input("a@x.com", "initial-pw", "new-pw"))
    .await
    .unwrap();

    let doc = store.document(&LinkId::from("link1")).await;
    let a = doc.managers.iter().find(|m| m.email == "a@x.com").unwrap();
    assert_eq!(a.password_hash, "new-pw");
    assert!(a.initial_password_changed);
    let b = doc.managers.iter().find(|m| m.email == "b@x.com").unwrap();
    assert_eq!(b, &employee("b@x.com"), "other managers must be untouched");

    let matches = CheckCredentialsUseCase { roster: store }
        .execute(check_input("a@x.com", "new-pw"))
        .await
        .unwrap();
    assert!(matches[&LinkId::from("link1")][0].initial_password_changed);
}

#[tokio::test]
async fn should_reject_reset_with_wrong_old_password() {
    let store = MemoryRosterStore::new();
    store.insert_link(corp_link("link1"), vec![admin("a@x.com")]);

    let result = ResetPasswordUseCase {
        roster: store.clone(),
    }
    .execute(reset_input("a@x.com", "guess", "new-pw"))
    .await;

    assert!(
        matches!(result, Err(ManagerServiceError::InvalidCredential)),
        "expected InvalidCredential, got {result:?}"
    );
    let doc = store.document(&LinkId::from("link1")).await;
    assert_eq!(doc.managers, vec![admin("a@x.com")]);
}

#[tokio::test]
async fn should_reject_reset_for_unknown_email_like_wrong_password() {
    let store = MemoryRosterStore::new();
    store.insert_link(corp_link("link1"), vec![admin("a@x.com")]);

    let result = ResetPasswordUseCase { roster: store }
        .execute(reset_input("nobody@x.com", "initial-pw", "new-pw"))
        .await;

    assert!(matches!(result, Err(ManagerServiceError::InvalidCredential)));
}

#[tokio::test]
async fn should_not_reuse_old_password_after_reset() {
    let store = MemoryRosterStore::new();
    store.insert_link(
        corp_link("link1"),
        vec![ManagerEntry::new(ManagerRole::Admin, "a@x.com", "first")],
    );
    let uc = ResetPasswordUseCase {
        roster: store.clone(),
    };

    uc.execute(reset_input("a@x.com", "first", "second"))
        .await
        .unwrap();
    let replay = uc.execute(reset_input("a@x.com", "first", "third")).await;

    assert!(matches!(replay, Err(ManagerServiceError::InvalidCredential)));
}
