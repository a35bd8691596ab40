//! Entity -> response DTO mappers

use geoquiz_core::entities::{GameSession, User};

use super::responses::{GameSessionResponse, UserResponse};

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            display_name: user.display_name(),
            avatar: user.avatar.clone(),
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        }
    }
}

impl From<&GameSession> for GameSessionResponse {
    fn from(session: &GameSession) -> Self {
        Self {
            id: session.id,
            game_type: session.game_type,
            correct_answers: session.correct_answers,
            wrong_answers: session.wrong_answers,
            session_start_time: session.session_start_time,
            session_end_time: session.session_end_time,
            duration_ms: session.duration_ms,
            created_at: session.created_at,
        }
    }
}

impl From<GameSession> for GameSessionResponse {
    fn from(session: GameSession) -> Self {
        Self::from(&session)
    }
}
