pub mod database;
#[cfg(test)]
pub mod memory;

use crate::models::catalog::{Category, NewTournamentSeason, Season, Tournament, TournamentSeason};
use crate::models::club::{Club, NewClub};
use crate::models::fixture::{Fixture, UpsertOutcome};
use crate::models::player::{Player, PlayerStatistics};
use crate::models::request_log::NewRequestLog;
use async_trait::async_trait;
use thiserror::Error;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("could not get database connection from pool: {0}")]
    PoolError(#[from] diesel_async::pooled_connection::deadpool::PoolError),
    #[error("error executing query: {0}")]
    QueryError(#[from] diesel::result::Error),
}

/// Append-only audit of outbound calls.
#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn log_request(&self, entry: &NewRequestLog) -> StoreResult<()>;
    async fn log_failed_request(&self, entry: &NewRequestLog) -> StoreResult<()>;
}

/// Idempotent writes keyed by the provider's ids, plus the work-selection queries that make a
/// re-run an incremental catch-up.
#[async_trait]
pub trait Store: AuditLog {
    /// Inserts the club unless one with the same `club_identifier` exists. Returns whether a
    /// row was created.
    async fn register_club(&self, club: &NewClub) -> StoreResult<bool>;
    async fn pending_clubs(&self) -> StoreResult<Vec<Club>>;
    async fn mark_club_fetched(&self, club_identifier: i32) -> StoreResult<()>;

    async fn upsert_category(&self, category: &Category) -> StoreResult<()>;
    async fn upsert_tournament(&self, tournament: &Tournament) -> StoreResult<()>;
    async fn upsert_season(&self, season: &Season) -> StoreResult<()>;
    async fn upsert_tournament_season(&self, link: &NewTournamentSeason) -> StoreResult<()>;
    async fn pending_tournament_seasons(&self) -> StoreResult<Vec<TournamentSeason>>;
    async fn mark_tournament_season_fetched(
        &self,
        tournament_id: i32,
        season_id: i32,
    ) -> StoreResult<()>;

    async fn upsert_fixture(&self, fixture: &Fixture) -> StoreResult<UpsertOutcome>;

    async fn upsert_player(&self, player: &Player) -> StoreResult<()>;
    /// Looks up or creates each position by name, then links it to the player once.
    async fn save_player_positions(&self, player_id: i32, positions: &[String]) -> StoreResult<()>;
    async fn upsert_player_statistics(&self, statistics: &PlayerStatistics) -> StoreResult<()>;
}
