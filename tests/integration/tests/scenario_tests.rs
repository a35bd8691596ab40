//! End-to-end scenario over the full service stack

use integration_tests::{live_session, test_context_without_caching};

use geoquiz_service::dto::{HistoryQuery, LeaderboardQuery, LoginRequest, RegisterRequest};
use geoquiz_service::{AuthService, LeaderboardService, ProgressService};

#[tokio::test]
async fn register_play_and_rank_against_second_user() {
    let ctx = test_context_without_caching();
    let auth = AuthService::new(&ctx);
    let progress = ProgressService::new(&ctx);
    let leaderboard = LeaderboardService::new(&ctx);

    // Register and log in as user A.
    auth.register(RegisterRequest {
        email: "amelia@example.com".to_string(),
        password: "TestPass123".to_string(),
        name: Some("Amelia".to_string()),
    })
    .await
    .unwrap();

    let session_a = auth
        .login(LoginRequest {
            email: "amelia@example.com".to_string(),
            password: "TestPass123".to_string(),
        })
        .await
        .unwrap();
    let user_a = session_a.user.id;

    // Three wins and two losses, interleaved: W W L W L.
    let rounds = [(8, 2), (7, 3), (2, 8), (9, 1), (0, 10)];
    for (correct, wrong) in rounds {
        progress
            .save_session(user_a, live_session("countries", correct, wrong))
            .await
            .unwrap();
    }

    // Two consecutive wins before the first loss.
    let stats = progress.get_user_stats(user_a).await.unwrap();
    assert_eq!(stats.games_played, 5);
    assert_eq!(stats.best_streak, 2);
    assert_eq!(stats.total_correct, 26);
    assert_eq!(stats.total_wrong, 24);

    // History is newest first and fully paged.
    let history = progress
        .get_user_history(user_a, HistoryQuery::default())
        .await
        .unwrap();
    assert_eq!(history.sessions.len(), 5);
    assert_eq!(history.sessions[0].correct_answers, 0);
    assert_eq!(history.sessions[4].correct_answers, 8);

    // Seed user B with a clearly higher score.
    let session_b = auth
        .register(RegisterRequest {
            email: "boris@example.com".to_string(),
            password: "TestPass123".to_string(),
            name: Some("Boris".to_string()),
        })
        .await
        .unwrap();
    let user_b = session_b.user.id;
    for _ in 0..3 {
        progress
            .save_session(user_b, live_session("countries", 20, 0))
            .await
            .unwrap();
    }

    let board = leaderboard
        .get_leaderboard(LeaderboardQuery {
            current_user_id: Some(user_a),
            ..LeaderboardQuery::default()
        })
        .await
        .unwrap();

    assert_eq!(board.total_players, 2);
    assert_eq!(board.entries[0].display_name, "Boris");
    assert_eq!(board.entries[0].rank, 1);
    assert_eq!(board.entries[1].display_name, "Amelia");
    assert_eq!(board.entries[1].rank, 2);
    assert!(board.entries[0].total_score > board.entries[1].total_score);

    let own = board.current_user_entry.unwrap();
    assert_eq!(own.user_id, user_a);
    assert_eq!(own.rank, 2);
    assert_eq!(own.best_streak, 2);
}
