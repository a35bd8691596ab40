//! Concurrency properties of the identity and progress core
//!
//! These run against the in-memory repositories, which reproduce the
//! store-level conflict semantics (unique email, atomic rotate-if-active)
//! the PostgreSQL implementations rely on.

use std::collections::HashSet;

use integration_tests::{live_session, register_request_for, test_context, unique_register_request};

use geoquiz_service::dto::RefreshTokenRequest;
use geoquiz_service::{AuthService, ProgressService};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn monotonic_clock_yields_distinct_ordered_timestamps() {
    let ctx = test_context();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let ctx = ctx.clone();
        handles.push(tokio::spawn(async move {
            (0..500).map(|_| ctx.clock().next()).collect::<Vec<_>>()
        }));
    }

    let mut all = Vec::new();
    for handle in handles {
        all.extend(handle.await.unwrap());
    }

    let distinct: HashSet<_> = all.iter().copied().collect();
    assert_eq!(distinct.len(), all.len(), "no two calls may return equal timestamps");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_registration_same_email_single_winner() {
    let ctx = test_context();
    const RACERS: usize = 8;

    let mut handles = Vec::new();
    for _ in 0..RACERS {
        let ctx = ctx.clone();
        handles.push(tokio::spawn(async move {
            AuthService::new(&ctx)
                .register(register_request_for("contended@example.com"))
                .await
        }));
    }

    let mut successes = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(e) if e.is_conflict() => conflicts += 1,
            Err(e) => panic!("unexpected registration error: {e}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(conflicts, RACERS - 1);

    // Exactly one account exists for the contended email.
    let user = ctx
        .user_repo()
        .find_by_email("contended@example.com")
        .await
        .unwrap();
    assert!(user.is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_refresh_same_token_single_winner() {
    let ctx = test_context();
    const RACERS: usize = 8;

    let session = AuthService::new(&ctx)
        .register(unique_register_request())
        .await
        .unwrap();
    let user_id = session.user.id;

    let mut handles = Vec::new();
    for _ in 0..RACERS {
        let ctx = ctx.clone();
        let token = session.refresh_token.clone();
        handles.push(tokio::spawn(async move {
            AuthService::new(&ctx)
                .refresh_tokens(RefreshTokenRequest {
                    refresh_token: token,
                })
                .await
        }));
    }

    let mut successes = 0;
    let mut auth_failures = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(e) if e.is_authentication() => auth_failures += 1,
            Err(e) => panic!("unexpected refresh error: {e}"),
        }
    }

    assert_eq!(successes, 1, "exactly one refresh may claim the token");
    assert_eq!(auth_failures, RACERS - 1);

    // The original token is spent and exactly one active successor exists.
    let original = ctx
        .refresh_token_repo()
        .find_by_token(&session.refresh_token)
        .await
        .unwrap()
        .unwrap();
    assert!(original.is_revoked);
    assert_eq!(
        ctx.refresh_token_repo()
            .count_active_for_user(user_id)
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn revoke_is_idempotent() {
    let ctx = test_context();
    let auth = AuthService::new(&ctx);
    let session = auth.register(unique_register_request()).await.unwrap();

    assert!(auth.revoke_refresh_token(&session.refresh_token).await.unwrap());
    assert!(!auth.revoke_refresh_token(&session.refresh_token).await.unwrap());
}

#[tokio::test]
async fn revoke_all_reports_whether_anything_was_revoked() {
    let ctx = test_context();
    let auth = AuthService::new(&ctx);
    let session = auth.register(unique_register_request()).await.unwrap();
    let user_id = session.user.id;

    assert!(auth.revoke_all_user_tokens(user_id).await.unwrap());
    assert!(!auth.revoke_all_user_tokens(user_id).await.unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_session_writes_stay_strictly_ordered() {
    let ctx = test_context();
    let session = AuthService::new(&ctx)
        .register(unique_register_request())
        .await
        .unwrap();
    let user_id = session.user.id;

    let mut handles = Vec::new();
    for i in 0..16 {
        let ctx = ctx.clone();
        handles.push(tokio::spawn(async move {
            ProgressService::new(&ctx)
                .save_session(user_id, live_session("countries", 5 + i, 1))
                .await
                .unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let sessions = ctx.game_session_repo().find_by_user(user_id).await.unwrap();
    assert_eq!(sessions.len(), 16);

    let created: Vec<_> = sessions.iter().map(|s| s.created_at).collect();
    let mut sorted = created.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), 16, "created_at values must be strictly increasing");
    assert_eq!(created, sorted, "repository must return sessions in creation order");
}
