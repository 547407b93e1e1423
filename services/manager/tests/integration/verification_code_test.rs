use chrono::{Duration, Utc};

use cla_domain::id::LinkId;
use cla_domain::purpose::Purpose;
use cla_manager::error::ManagerServiceError;
use cla_manager::usecase::verification_code::{
    CreateVerificationCodeInput, CreateVerificationCodeUseCase, PurgeExpiredCodesUseCase,
    VerifyCodeInput, VerifyCodeUseCase,
};

use crate::helpers::{MockVerificationCodeRepo, ReissueAfterReadRepo, stored_code};

fn link1() -> Purpose {
    Purpose::signing(&LinkId::from("link1"))
}

fn verify_input(code: &str) -> VerifyCodeInput {
    VerifyCodeInput {
        recipient: "a@x.com".to_owned(),
        purpose: link1(),
        code: code.to_owned(),
    }
}

#[tokio::test]
async fn should_store_issued_code_with_expiry() {
    let repo = MockVerificationCodeRepo::empty();
    let codes_handle = repo.codes_handle();
    let uc = CreateVerificationCodeUseCase { codes: repo };

    let before = Utc::now();
    let code = uc
        .execute(CreateVerificationCodeInput {
            recipient: "a@x.com".to_owned(),
            purpose: link1(),
            ttl: Duration::minutes(10),
        })
        .await
        .unwrap();

    let codes = codes_handle.lock().unwrap();
    assert_eq!(codes.len(), 1, "expected exactly one stored code");
    let stored = &codes[&("a@x.com".to_owned(), link1())];
    assert_eq!(stored.code, code);
    assert_eq!(code.len(), 6, "verification code should be 6 digits");
    assert!(stored.expires_at >= before + Duration::minutes(10));
    assert!(stored.expires_at <= Utc::now() + Duration::minutes(10));
}

#[tokio::test]
async fn should_verify_code_exactly_once() {
    let repo = MockVerificationCodeRepo::empty();
    let codes_handle = repo.codes_handle();
    let code = CreateVerificationCodeUseCase {
        codes: MockVerificationCodeRepo {
            codes: codes_handle.clone(),
        },
    }
    .execute(CreateVerificationCodeInput {
        recipient: "a@x.com".to_owned(),
        purpose: link1(),
        ttl: Duration::minutes(10),
    })
    .await
    .unwrap();

    let verify = VerifyCodeUseCase { codes: repo };
    verify.execute(verify_input(&code)).await.unwrap();

    let replay = verify.execute(verify_input(&code)).await;
    assert!(
        matches!(replay, Err(ManagerServiceError::CodeNotFound)),
        "expected CodeNotFound, got {replay:?}"
    );
    assert!(codes_handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_supersede_previous_code_for_same_pair() {
    let repo = MockVerificationCodeRepo::empty();
    let codes_handle = repo.codes_handle();
    let create = CreateVerificationCodeUseCase { codes: repo };
    let input = || CreateVerificationCodeInput {
        recipient: "a@x.com".to_owned(),
        purpose: link1(),
        ttl: Duration::minutes(10),
    };

    let first = create.execute(input()).await.unwrap();
    let mut second = create.execute(input()).await.unwrap();
    // codes are random; force a distinct second code to keep the test deterministic
    if second == first {
        second = if first == "000000" { "111111" } else { "000000" }.to_owned();
        codes_handle
            .lock()
            .unwrap()
            .get_mut(&("a@x.com".to_owned(), link1()))
            .unwrap()
            .code = second.clone();
    }
    assert_eq!(codes_handle.lock().unwrap().len(), 1);

    let verify = VerifyCodeUseCase {
        codes: MockVerificationCodeRepo {
            codes: codes_handle,
        },
    };
    let stale = verify.execute(verify_input(&first)).await;
    assert!(
        matches!(
            stale,
            Err(ManagerServiceError::CodeMismatch | ManagerServiceError::CodeNotFound)
        ),
        "expected superseded code to fail, got {stale:?}"
    );
    verify.execute(verify_input(&second)).await.unwrap();
    let replay = verify.execute(verify_input(&second)).await;
    assert!(matches!(replay, Err(ManagerServiceError::CodeNotFound)));
}

#[tokio::test]
async fn should_keep_codes_for_other_purposes_independent() {
    let repo = MockVerificationCodeRepo::new(vec![
        stored_code("a@x.com", &link1(), "111111", Duration::minutes(10)),
        stored_code(
            "a@x.com",
            &Purpose::password_recovery(&LinkId::from("link1")),
            "222222",
            Duration::minutes(10),
        ),
    ]);
    let codes_handle = repo.codes_handle();
    let verify = VerifyCodeUseCase { codes: repo };

    verify.execute(verify_input("111111")).await.unwrap();

    let remaining = codes_handle.lock().unwrap();
    assert_eq!(remaining.len(), 1);
    assert!(remaining.contains_key(&(
        "a@x.com".to_owned(),
        Purpose::password_recovery(&LinkId::from("link1"))
    )));
}

#[tokio::test]
async fn should_return_not_found_without_issued_code() {
    let verify = VerifyCodeUseCase {
        codes: MockVerificationCodeRepo::empty(),
    };

    let result = verify.execute(verify_input("123456")).await;

    assert!(matches!(result, Err(ManagerServiceError::CodeNotFound)));
}

#[tokio::test]
async fn should_return_expired_even_for_correct_code() {
    let repo = MockVerificationCodeRepo::new(vec![stored_code(
        "a@x.com",
        &link1(),
        "123456",
        Duration::seconds(-1),
    )]);
    let codes_handle = repo.codes_handle();
    let verify = VerifyCodeUseCase { codes: repo };

    let result = verify.execute(verify_input("123456")).await;

    assert!(
        matches!(result, Err(ManagerServiceError::CodeExpired)),
        "expected CodeExpired, got {result:?}"
    );
    assert!(codes_handle.lock().unwrap().is_empty(), "expired code is purged");
}

#[tokio::test]
async fn should_keep_code_reissued_while_verifying_expired_one() {
    let repo = MockVerificationCodeRepo::new(vec![stored_code(
        "a@x.com",
        &link1(),
        "111111",
        Duration::seconds(-1),
    )]);
    let codes_handle = repo.codes_handle();
    let verify = VerifyCodeUseCase {
        codes: ReissueAfterReadRepo {
            inner: repo,
            reissued: stored_code("a@x.com", &link1(), "222222", Duration::minutes(10)),
        },
    };

    let result = verify.execute(verify_input("111111")).await;
    assert!(
        matches!(result, Err(ManagerServiceError::CodeExpired)),
        "expected CodeExpired, got {result:?}"
    );
    {
        let codes = codes_handle.lock().unwrap();
        let live = &codes[&("a@x.com".to_owned(), link1())];
        assert_eq!(live.code, "222222", "reissued code must survive");
    }

    let fresh = VerifyCodeUseCase {
        codes: MockVerificationCodeRepo {
            codes: codes_handle,
        },
    };
    fresh.execute(verify_input("222222")).await.unwrap();
}

#[tokio::test]
async fn should_report_expired_before_mismatch() {
    let verify = VerifyCodeUseCase {
        codes: MockVerificationCodeRepo::new(vec![stored_code(
            "a@x.com",
            &link1(),
            "123456",
            Duration::seconds(-1),
        )]),
    };

    let result = verify.execute(verify_input("654321")).await;

    assert!(matches!(result, Err(ManagerServiceError::CodeExpired)));
}

#[tokio::test]
async fn should_return_mismatch_for_wrong_code_and_keep_record() {
    let repo = MockVerificationCodeRepo::new(vec![stored_code(
        "a@x.com",
        &link1(),
        "123456",
        Duration::minutes(10),
    )]);
    let verify = VerifyCodeUseCase { codes: repo };

    let result = verify.execute(verify_input("654321")).await;
    assert!(
        matches!(result, Err(ManagerServiceError::CodeMismatch)),
        "expected CodeMismatch, got {result:?}"
    );

    verify.execute(verify_input("123456")).await.unwrap();
}

#[tokio::test]
async fn should_purge_only_expired_codes() {
    let repo = MockVerificationCodeRepo::new(vec![
        stored_code("a@x.com", &link1(), "111111", Duration::seconds(-5)),
        stored_code("b@x.com", &link1(), "222222", Duration::minutes(10)),
    ]);
    let codes_handle = repo.codes_handle();
    let uc = PurgeExpiredCodesUseCase { codes: repo };

    let purged = uc.execute(Utc::now()).await.unwrap();

    assert_eq!(purged, 1);
    let remaining = codes_handle.lock().unwrap();
    assert!(remaining.contains_key(&("b@x.com".to_owned(), link1())));
}
