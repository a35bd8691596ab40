//! Leaderboard aggregation service
//!
//! Aggregates persisted sessions into ranked, cached leaderboard pages.
//! Aggregation is recomputed from the session set on demand; nothing is
//! incrementally maintained, so concurrent writes can never leave a
//! partially updated ranking behind.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, instrument, warn};

use geoquiz_cache::LeaderboardCacheKey;
use geoquiz_core::entities::{accuracy, composite_score, LeaderboardEntry, LeaderboardPage};
use geoquiz_core::traits::LeaderboardFilter;
use geoquiz_core::value_objects::Snowflake;

use crate::dto::{LeaderboardQuery, LeaderboardResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

const DEFAULT_PAGE_SIZE: u32 = 50;
const MAX_PAGE_SIZE: u32 = 100;

/// Per-user running aggregate, filled while walking sessions in creation
/// order so the streak computation sees them correctly sequenced
#[derive(Default)]
struct UserAggregate {
    total_correct: i64,
    total_wrong: i64,
    games_played: u32,
    current_streak: u32,
    best_streak: u32,
    last_played_at: Option<DateTime<Utc>>,
}

/// Leaderboard aggregation service
pub struct LeaderboardService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LeaderboardService<'a> {
    /// Create a new LeaderboardService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// One ranked leaderboard page
    ///
    /// Pages are cached per filter combination; `current_user_entry` is
    /// requester-specific and therefore always computed fresh from the full
    /// aggregate, never cached.
    #[instrument(skip(self))]
    pub async fn get_leaderboard(
        &self,
        query: LeaderboardQuery,
    ) -> ServiceResult<LeaderboardResponse> {
        let page = query.page.unwrap_or(1).max(1);
        let page_size = query
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        let filter = LeaderboardFilter {
            game_type: query.game_type,
            played_since: query.period.and_then(|p| p.cutoff(Utc::now())),
        };
        let key = LeaderboardCacheKey {
            game_type: query.game_type,
            period: query.period,
            page,
            page_size,
        };

        let cached = self.ctx.leaderboard_cache().get(&key);

        // The full ranking is needed on a cache miss, and also whenever the
        // caller asked for their own entry.
        let ranking = if cached.is_none() || query.current_user_id.is_some() {
            Some(self.compute_ranking(filter).await?)
        } else {
            None
        };

        let page_data = match cached {
            Some(page_data) => {
                debug!(?key, "leaderboard cache hit");
                page_data
            }
            None => {
                let page_data = paginate(ranking.as_deref().unwrap_or(&[]), page, page_size);
                self.ctx.leaderboard_cache().insert(key, page_data.clone());
                page_data
            }
        };

        let current_user_entry = match (query.current_user_id, &ranking) {
            (Some(user_id), Some(ranking)) => {
                ranking.iter().find(|e| e.user_id == user_id).cloned()
            }
            _ => None,
        };

        Ok(LeaderboardResponse {
            entries: page_data.entries,
            total_players: page_data.total_players,
            page: page_data.page,
            page_size: page_data.page_size,
            current_user_entry,
        })
    }

    /// Advisory cache invalidation; entries age out through their TTLs
    pub fn clear_cache(&self) {
        self.ctx.leaderboard_cache().clear();
    }

    /// Compute the full ranking for a filter, sequentially ranked from 1
    async fn compute_ranking(
        &self,
        filter: LeaderboardFilter,
    ) -> ServiceResult<Vec<LeaderboardEntry>> {
        let sessions = self
            .ctx
            .game_session_repo()
            .find_for_leaderboard(filter)
            .await?;

        let mut aggregates: HashMap<Snowflake, UserAggregate> = HashMap::new();
        for session in &sessions {
            let agg = aggregates.entry(session.user_id).or_default();
            agg.total_correct += i64::from(session.correct_answers);
            agg.total_wrong += i64::from(session.wrong_answers);
            agg.games_played += 1;
            if session.is_win() {
                agg.current_streak += 1;
                agg.best_streak = agg.best_streak.max(agg.current_streak);
            } else {
                agg.current_streak = 0;
            }
            agg.last_played_at = agg
                .last_played_at
                .max(Some(session.session_start_time));
        }

        let user_ids: Vec<Snowflake> = aggregates.keys().copied().collect();
        let users = self.ctx.user_repo().find_many(&user_ids).await?;
        let names: HashMap<Snowflake, String> =
            users.iter().map(|u| (u.id, u.display_name())).collect();

        let mut entries: Vec<LeaderboardEntry> = aggregates
            .into_iter()
            .filter_map(|(user_id, agg)| {
                let Some(display_name) = names.get(&user_id) else {
                    warn!(user_id = %user_id, "sessions reference a missing user, skipping");
                    return None;
                };
                let last_played_at = agg.last_played_at?;
                let acc = accuracy(agg.total_correct, agg.total_wrong);
                Some(LeaderboardEntry {
                    rank: 0,
                    user_id,
                    display_name: display_name.clone(),
                    total_score: composite_score(agg.total_correct, acc, agg.best_streak),
                    games_played: agg.games_played,
                    accuracy: acc,
                    best_streak: agg.best_streak,
                    last_played_at,
                })
            })
            .collect();

        // Deterministic four-key order: score, accuracy, streak, recency.
        // `created_at` monotonicity upstream rules out timestamp ties, so
        // sequential ranks are stable.
        entries.sort_by(|a, b| {
            b.total_score
                .cmp(&a.total_score)
                .then_with(|| b.accuracy.total_cmp(&a.accuracy))
                .then_with(|| b.best_streak.cmp(&a.best_streak))
                .then_with(|| b.last_played_at.cmp(&a.last_played_at))
        });
        for (index, entry) in entries.iter_mut().enumerate() {
            entry.rank = index as u32 + 1;
        }

        Ok(entries)
    }
}

fn paginate(ranking: &[LeaderboardEntry], page: u32, page_size: u32) -> LeaderboardPage {
    let offset = (page - 1) as usize * page_size as usize;
    LeaderboardPage {
        entries: ranking
            .iter()
            .skip(offset)
            .take(page_size as usize)
            .cloned()
            .collect(),
        total_players: ranking.len() as u32,
        page,
        page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{RegisterRequest, SaveSessionRequest};
    use crate::services::auth::AuthService;
    use crate::services::progress::ProgressService;
    use crate::services::test_support::memory_context;
    use chrono::Duration;
    use geoquiz_core::value_objects::{GameType, LeaderboardPeriod};

    async fn register(ctx: &ServiceContext, email: &str, name: Option<&str>) -> Snowflake {
        AuthService::new(ctx)
            .register(RegisterRequest {
                email: email.to_string(),
                password: "atlas-quiz-9".to_string(),
                name: name.map(String::from),
            })
            .await
            .unwrap()
            .user
            .id
    }

    async fn play(ctx: &ServiceContext, user_id: Snowflake, game_type: &str, correct: i32, wrong: i32) {
        let start = Utc::now() - Duration::seconds(10);
        ProgressService::new(ctx)
            .save_session(
                user_id,
                SaveSessionRequest {
                    game_type: game_type.to_string(),
                    correct_answers: correct,
                    wrong_answers: wrong,
                    session_start_time: start,
                    session_end_time: None,
                    is_live_session: None,
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_ranking_order_and_sequential_ranks() {
        let ctx = memory_context();
        let strong = register(&ctx, "strong@example.com", Some("Strong")).await;
        let weak = register(&ctx, "weak@example.com", Some("Weak")).await;

        play(&ctx, strong, "countries", 20, 0).await;
        play(&ctx, strong, "countries", 18, 2).await;
        play(&ctx, weak, "countries", 3, 7).await;

        let board = LeaderboardService::new(&ctx)
            .get_leaderboard(LeaderboardQuery::default())
            .await
            .unwrap();

        assert_eq!(board.total_players, 2);
        assert_eq!(board.entries[0].display_name, "Strong");
        assert_eq!(board.entries[0].rank, 1);
        assert_eq!(board.entries[1].rank, 2);
        assert!(board.entries[0].total_score > board.entries[1].total_score);
    }

    #[tokio::test]
    async fn test_score_formula() {
        let ctx = memory_context();
        let user = register(&ctx, "scorer@example.com", None).await;

        play(&ctx, user, "countries", 25, 5).await; // win, streak 1
        play(&ctx, user, "countries", 25, 0).await; // win, streak 2

        let board = LeaderboardService::new(&ctx)
            .get_leaderboard(LeaderboardQuery::default())
            .await
            .unwrap();
        let entry = &board.entries[0];

        // 50 correct of 55 answers: accuracy 90.91, floor(9.091) = 9,
        // streak 2 * 5 = 10.
        assert_eq!(entry.accuracy, 90.91);
        assert_eq!(entry.total_score, 50 + 9 + 10);
    }

    #[tokio::test]
    async fn test_period_filter_uses_start_time() {
        let ctx = memory_context();
        let user = register(&ctx, "player@example.com", None).await;

        // Historical import played two months ago.
        let old_start = Utc::now() - Duration::days(60);
        ProgressService::new(&ctx)
            .migrate_anonymous_sessions(
                user,
                vec![crate::dto::AnonymousSessionRequest {
                    game_type: "flags".to_string(),
                    correct_answers: 9,
                    wrong_answers: 1,
                    session_start_time: old_start,
                    session_end_time: None,
                }],
            )
            .await
            .unwrap();
        play(&ctx, user, "flags", 5, 5).await;

        let service = LeaderboardService::new(&ctx);
        let week = service
            .get_leaderboard(LeaderboardQuery {
                period: Some(LeaderboardPeriod::Week),
                ..LeaderboardQuery::default()
            })
            .await
            .unwrap();
        // Only the recent session qualifies; 10 answers, half right.
        assert_eq!(week.entries[0].games_played, 1);
        assert_eq!(week.entries[0].accuracy, 50.0);

        let all_time = service
            .get_leaderboard(LeaderboardQuery::default())
            .await
            .unwrap();
        assert_eq!(all_time.entries[0].games_played, 2);
    }

    #[tokio::test]
    async fn test_game_type_filter() {
        let ctx = memory_context();
        let user = register(&ctx, "player@example.com", None).await;
        play(&ctx, user, "countries", 10, 0).await;
        play(&ctx, user, "flags", 2, 8).await;

        let board = LeaderboardService::new(&ctx)
            .get_leaderboard(LeaderboardQuery {
                game_type: Some(GameType::Countries),
                ..LeaderboardQuery::default()
            })
            .await
            .unwrap();

        assert_eq!(board.entries[0].games_played, 1);
        assert_eq!(board.entries[0].accuracy, 100.0);
    }

    #[tokio::test]
    async fn test_cached_page_served_until_expiry() {
        let ctx = memory_context();
        let user = register(&ctx, "player@example.com", None).await;
        play(&ctx, user, "countries", 10, 0).await;

        let service = LeaderboardService::new(&ctx);
        let first = service.get_leaderboard(LeaderboardQuery::default()).await.unwrap();
        assert_eq!(first.entries[0].games_played, 1);

        // A write after caching is not visible within the TTL window.
        play(&ctx, user, "countries", 10, 0).await;
        let second = service.get_leaderboard(LeaderboardQuery::default()).await.unwrap();
        assert_eq!(second.entries[0].games_played, 1);

        // clear() is advisory; the cached page is still served.
        service.clear_cache();
        let third = service.get_leaderboard(LeaderboardQuery::default()).await.unwrap();
        assert_eq!(third.entries[0].games_played, 1);
    }

    #[tokio::test]
    async fn test_current_user_entry_fresh_on_cache_hit() {
        let ctx = memory_context();
        let user = register(&ctx, "player@example.com", None).await;
        play(&ctx, user, "countries", 10, 0).await;

        let service = LeaderboardService::new(&ctx);
        service.get_leaderboard(LeaderboardQuery::default()).await.unwrap();

        // Second session lands after the page was cached; the personal
        // entry still reflects it because it bypasses the cache.
        play(&ctx, user, "countries", 10, 0).await;
        let board = service
            .get_leaderboard(LeaderboardQuery {
                current_user_id: Some(user),
                ..LeaderboardQuery::default()
            })
            .await
            .unwrap();

        assert_eq!(board.entries[0].games_played, 1);
        assert_eq!(board.current_user_entry.as_ref().unwrap().games_played, 2);
    }

    #[tokio::test]
    async fn test_display_name_falls_back_to_email_local_part() {
        let ctx = memory_context();
        let user = register(&ctx, "globetrotter@example.com", None).await;
        play(&ctx, user, "states", 6, 4).await;

        let board = LeaderboardService::new(&ctx)
            .get_leaderboard(LeaderboardQuery::default())
            .await
            .unwrap();
        assert_eq!(board.entries[0].display_name, "globetrotter");
    }

    #[tokio::test]
    async fn test_pagination() {
        let ctx = memory_context();
        for i in 0..3 {
            let user = register(&ctx, &format!("p{i}@example.com"), None).await;
            play(&ctx, user, "countries", 10 + i, 0).await;
        }

        let board = LeaderboardService::new(&ctx)
            .get_leaderboard(LeaderboardQuery {
                page: Some(2),
                page_size: Some(2),
                ..LeaderboardQuery::default()
            })
            .await
            .unwrap();

        assert_eq!(board.total_players, 3);
        assert_eq!(board.entries.len(), 1);
        assert_eq!(board.entries[0].rank, 3);
    }
}
