//! Domain entities - core business objects

mod game_session;
mod leaderboard;
mod refresh_token;
mod user;

pub use game_session::{accuracy, best_streak, GameSession};
pub use leaderboard::{composite_score, LeaderboardEntry, LeaderboardPage};
pub use refresh_token::RefreshToken;
pub use user::User;
