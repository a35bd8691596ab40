//! Test fixtures and data generators

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Duration, Utc};
use geoquiz_service::dto::{RegisterRequest, SaveSessionRequest};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Registration request with a unique email
pub fn unique_register_request() -> RegisterRequest {
    let suffix = unique_suffix();
    RegisterRequest {
        email: format!("player{suffix}@example.com"),
        password: "TestPass123".to_string(),
        name: Some(format!("Player {suffix}")),
    }
}

/// Registration request for a fixed email
pub fn register_request_for(email: &str) -> RegisterRequest {
    RegisterRequest {
        email: email.to_string(),
        password: "TestPass123".to_string(),
        name: None,
    }
}

/// A session played moments ago
pub fn live_session(game_type: &str, correct: i32, wrong: i32) -> SaveSessionRequest {
    let start = Utc::now() - Duration::seconds(20);
    SaveSessionRequest {
        game_type: game_type.to_string(),
        correct_answers: correct,
        wrong_answers: wrong,
        session_start_time: start,
        session_end_time: Some(start + Duration::seconds(15)),
        is_live_session: None,
    }
}
