//! Progress recording service
//!
//! Persists game sessions (single and bulk-migrated) with strictly ordered
//! `created_at` values and serves the read-side aggregations: per-user and
//! per-game-type stats, and paged history.

use chrono::{DateTime, Duration, Utc};
use tracing::{info, instrument, warn};

use geoquiz_core::entities::{accuracy, best_streak, GameSession};
use geoquiz_core::value_objects::{GameType, Snowflake};
use geoquiz_core::DomainError;

use crate::dto::{
    AnonymousSessionRequest, GameSessionResponse, HistoryQuery, HistoryResponse,
    SaveSessionRequest, UserStatsResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Caller-supplied start times within this window of "now" are treated as
/// live play and passed through the monotonic clock; anything further out
/// is a historical import and preserved verbatim.
const LIVE_SESSION_WINDOW: Duration = Duration::seconds(60);

const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_PAGE_SIZE: u32 = 100;

/// Progress recording service
pub struct ProgressService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProgressService<'a> {
    /// Create a new ProgressService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Persist one completed session
    ///
    /// Validation is eager, before any I/O. `created_at` always comes from
    /// the monotonic clock; the start time goes through the live-session
    /// rule described on [`LIVE_SESSION_WINDOW`].
    #[instrument(skip(self, request), fields(game_type = %request.game_type))]
    pub async fn save_session(
        &self,
        user_id: Snowflake,
        request: SaveSessionRequest,
    ) -> ServiceResult<GameSessionResponse> {
        let game_type = parse_game_type(&request.game_type)?;
        validate_counts(request.correct_answers, request.wrong_answers)?;
        self.require_user(user_id).await?;

        let session = self
            .ctx
            .retry()
            .execute(|| async {
                let start =
                    self.resolve_start_time(request.session_start_time, request.is_live_session);
                let session = GameSession {
                    id: self.ctx.generate_id(),
                    user_id,
                    game_type,
                    correct_answers: request.correct_answers,
                    wrong_answers: request.wrong_answers,
                    session_start_time: start,
                    session_end_time: request.session_end_time,
                    duration_ms: GameSession::derive_duration(start, request.session_end_time),
                    created_at: self.ctx.clock().next(),
                };
                self.ctx.game_session_repo().create(&session).await?;
                Ok(session)
            })
            .await?;

        info!(user_id = %user_id, session_id = %session.id, "game session saved");

        Ok(GameSessionResponse::from(session))
    }

    /// Migrate a batch of anonymously played sessions to a user
    ///
    /// Partial-failure tolerant: invalid entries are skipped with a warning.
    /// Returns `Ok(true)` only if at least one session was inserted;
    /// an all-invalid (or empty) batch is "nothing to do", not an error.
    #[instrument(skip(self, sessions), fields(batch = sessions.len()))]
    pub async fn migrate_anonymous_sessions(
        &self,
        user_id: Snowflake,
        sessions: Vec<AnonymousSessionRequest>,
    ) -> ServiceResult<bool> {
        self.require_user(user_id).await?;

        let mut rows = Vec::with_capacity(sessions.len());
        for (index, entry) in sessions.iter().enumerate() {
            let game_type = match parse_game_type(&entry.game_type) {
                Ok(game_type) => game_type,
                Err(_) => {
                    warn!(index, game_type = %entry.game_type, "skipping migrated session: bad game type");
                    continue;
                }
            };
            if validate_counts(entry.correct_answers, entry.wrong_answers).is_err() {
                warn!(index, "skipping migrated session: negative answer count");
                continue;
            }

            let start = self.resolve_start_time(entry.session_start_time, None);
            rows.push(GameSession {
                id: self.ctx.generate_id(),
                user_id,
                game_type,
                correct_answers: entry.correct_answers,
                wrong_answers: entry.wrong_answers,
                session_start_time: start,
                session_end_time: entry.session_end_time,
                duration_ms: GameSession::derive_duration(start, entry.session_end_time),
                created_at: self.ctx.clock().next(),
            });
        }

        if rows.is_empty() {
            info!(user_id = %user_id, "migration batch contained no valid sessions");
            return Ok(false);
        }

        let inserted = self
            .ctx
            .retry()
            .execute(|| async { self.ctx.game_session_repo().create_batch(&rows).await })
            .await?;

        info!(
            user_id = %user_id,
            inserted,
            skipped = sessions.len() - rows.len(),
            "anonymous sessions migrated"
        );

        Ok(inserted > 0)
    }

    /// Aggregate statistics over all of a user's sessions
    #[instrument(skip(self))]
    pub async fn get_user_stats(&self, user_id: Snowflake) -> ServiceResult<UserStatsResponse> {
        self.require_user(user_id).await?;
        let sessions = self.ctx.game_session_repo().find_by_user(user_id).await?;
        Ok(aggregate_stats(&sessions, None))
    }

    /// Aggregate statistics scoped to one game type
    #[instrument(skip(self))]
    pub async fn get_user_stats_by_game_type(
        &self,
        user_id: Snowflake,
        game_type: GameType,
    ) -> ServiceResult<UserStatsResponse> {
        self.require_user(user_id).await?;
        let sessions = self
            .ctx
            .game_session_repo()
            .find_by_user_and_type(user_id, game_type)
            .await?;
        Ok(aggregate_stats(&sessions, Some(game_type)))
    }

    /// One page of session history, newest first
    ///
    /// Out-of-range paging values are clamped rather than rejected.
    #[instrument(skip(self))]
    pub async fn get_user_history(
        &self,
        user_id: Snowflake,
        query: HistoryQuery,
    ) -> ServiceResult<HistoryResponse> {
        self.require_user(user_id).await?;

        let page = query.page.unwrap_or(1).max(1);
        let page_size = query
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let offset = u64::from(page - 1) * u64::from(page_size);

        let sessions = self
            .ctx
            .game_session_repo()
            .find_page(user_id, page_size, offset)
            .await?;

        Ok(HistoryResponse {
            sessions: sessions.iter().map(GameSessionResponse::from).collect(),
            page,
            page_size,
        })
    }

    async fn require_user(&self, user_id: Snowflake) -> ServiceResult<()> {
        if self.ctx.user_repo().find_by_id(user_id).await?.is_none() {
            return Err(ServiceError::not_found("User", user_id.to_string()));
        }
        Ok(())
    }

    /// Live sessions go through the monotonic clock so same-tick submissions
    /// stay ordered; historical imports keep their start time verbatim. The
    /// caller's explicit flag wins; otherwise near-now start times are
    /// treated as live.
    fn resolve_start_time(&self, start: DateTime<Utc>, live_hint: Option<bool>) -> DateTime<Utc> {
        let live = live_hint.unwrap_or_else(|| (Utc::now() - start).abs() <= LIVE_SESSION_WINDOW);
        if live {
            self.ctx.clock().next_from(start)
        } else {
            start
        }
    }
}

fn parse_game_type(raw: &str) -> ServiceResult<GameType> {
    raw.parse::<GameType>()
        .map_err(|_| ServiceError::Domain(DomainError::InvalidGameType(raw.to_string())))
}

fn validate_counts(correct: i32, wrong: i32) -> ServiceResult<()> {
    if correct < 0 || wrong < 0 {
        return Err(ServiceError::Domain(DomainError::NegativeAnswerCount));
    }
    Ok(())
}

fn aggregate_stats(sessions: &[GameSession], game_type: Option<GameType>) -> UserStatsResponse {
    let total_correct: i64 = sessions.iter().map(|s| i64::from(s.correct_answers)).sum();
    let total_wrong: i64 = sessions.iter().map(|s| i64::from(s.wrong_answers)).sum();

    UserStatsResponse {
        game_type,
        games_played: sessions.len() as u32,
        total_correct,
        total_wrong,
        accuracy: accuracy(total_correct, total_wrong),
        best_streak: best_streak(sessions),
        last_played_at: sessions.iter().map(|s| s.session_start_time).max(),
    }
}
