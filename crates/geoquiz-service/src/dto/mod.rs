//! Data transfer objects for the service boundary

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AnonymousSessionRequest, ChangePasswordRequest, HistoryQuery, LeaderboardQuery, LoginRequest,
    RefreshTokenRequest, RegisterRequest, SaveSessionRequest,
};
pub use responses::{
    AuthResponse, GameSessionResponse, HistoryResponse, LeaderboardResponse, UserResponse,
    UserStatsResponse,
};
