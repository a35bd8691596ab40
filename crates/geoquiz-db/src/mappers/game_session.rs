//! Game session entity <-> model mapper

use geoquiz_core::entities::GameSession;
use geoquiz_core::error::DomainError;
use geoquiz_core::value_objects::{GameType, Snowflake};

use crate::models::GameSessionModel;

impl TryFrom<GameSessionModel> for GameSession {
    type Error = DomainError;

    fn try_from(model: GameSessionModel) -> Result<Self, Self::Error> {
        // A game_type the enum cannot represent means corrupted data, not
        // caller input, so this is not a validation error.
        let game_type: GameType = model.game_type.parse().map_err(|_| {
            DomainError::InternalError(format!(
                "unrepresentable game_type in row {}: {}",
                model.id, model.game_type
            ))
        })?;

        Ok(GameSession {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            game_type,
            correct_answers: model.correct_answers,
            wrong_answers: model.wrong_answers,
            session_start_time: model.session_start_time,
            session_end_time: model.session_end_time,
            duration_ms: model.duration_ms,
            created_at: model.created_at,
        })
    }
}

/// Game session entity reference prepared for database insertion
pub struct GameSessionInsert<'a> {
    pub id: i64,
    pub user_id: i64,
    pub game_type: &'static str,
    pub session: &'a GameSession,
}

impl<'a> GameSessionInsert<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            id: session.id.into_inner(),
            user_id: session.user_id.into_inner(),
            game_type: session.game_type.as_str(),
            session,
        }
    }
}
