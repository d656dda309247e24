//! In-memory `Store` for tests. Tables are maps keyed by the same natural keys the SQL upserts
//! conflict on, so "apply twice == apply once" can be checked directly.

use super::{AuditLog, Store, StoreError, StoreResult};
use crate::models::catalog::{Category, NewTournamentSeason, Season, Tournament, TournamentSeason};
use crate::models::club::{Club, NewClub};
use crate::models::fixture::{Fixture, UpsertOutcome};
use crate::models::player::{Player, PlayerStatistics};
use crate::models::request_log::NewRequestLog;
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Mutex;

#[derive(Default)]
pub struct Tables {
    pub clubs: BTreeMap<i32, Club>,
    pub categories: BTreeMap<i32, Category>,
    pub tournaments: BTreeMap<i32, Tournament>,
    pub seasons: BTreeMap<i32, Season>,
    pub tournament_seasons: BTreeMap<(i32, i32), TournamentSeason>,
    pub fixtures: BTreeMap<i32, Fixture>,
    pub players: BTreeMap<i32, Player>,
    pub positions: BTreeMap<String, i32>,
    pub player_positions: BTreeSet<(i32, i32)>,
    pub statistics: BTreeMap<(i32, i32, i32, String), PlayerStatistics>,
    pub request_log: Vec<NewRequestLog>,
    pub failed_request_log: Vec<NewRequestLog>,
    next_club_id: i32,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    failing_fixtures: Mutex<HashSet<i32>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect the tables.
    pub fn with<R>(&self, f: impl FnOnce(&Tables) -> R) -> R {
        f(&self.tables.lock().unwrap())
    }

    /// Makes `upsert_fixture` fail for the given id, as a constraint violation would.
    pub fn fail_fixture(&self, fixture_id: i32) {
        self.failing_fixtures.lock().unwrap().insert(fixture_id);
    }

    pub fn mark_club_fetched_now(&self, club_identifier: i32) {
        if let Some(club) = self.tables.lock().unwrap().clubs.get_mut(&club_identifier) {
            club.is_fetched = true;
        }
    }
}

#[async_trait]
impl AuditLog for MemoryStore {
    async fn log_request(&self, entry: &NewRequestLog) -> StoreResult<()> {
        self.tables.lock().unwrap().request_log.push(entry.clone());
        Ok(())
    }

    async fn log_failed_request(&self, entry: &NewRequestLog) -> StoreResult<()> {
        self.tables.lock().unwrap().failed_request_log.push(entry.clone());
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn register_club(&self, club: &NewClub) -> StoreResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        if tables.clubs.contains_key(&club.club_identifier) {
            return Ok(false);
        }
        tables.next_club_id += 1;
        let row = Club {
            id: tables.next_club_id,
            league_id: club.league_id,
            club_name: club.club_name.clone(),
            club_link: club.club_link.clone(),
            club_slug: club.club_slug.clone(),
            club_identifier: club.club_identifier,
            is_fetched: false,
            created_at: None,
            updated_at: None,
        };
        tables.clubs.insert(club.club_identifier, row);
        Ok(true)
    }

    async fn pending_clubs(&self) -> StoreResult<Vec<Club>> {
        let tables = self.tables.lock().unwrap();
        let mut clubs: Vec<Club> = tables
            .clubs
            .values()
            .filter(|c| !c.is_fetched)
            .cloned()
            .collect();
        clubs.sort_by_key(|c| c.id);
        Ok(clubs)
    }

    async fn mark_club_fetched(&self, club_identifier: i32) -> StoreResult<()> {
        self.mark_club_fetched_now(club_identifier);
        Ok(())
    }

    async fn upsert_category(&self, category: &Category) -> StoreResult<()> {
        let mut tables = self.tables.lock().unwrap();
        tables.categories.insert(category.id, category.clone());
        Ok(())
    }

    async fn upsert_tournament(&self, tournament: &Tournament) -> StoreResult<()> {
        let mut tables = self.tables.lock().unwrap();
        tables.tournaments.insert(tournament.id, tournament.clone());
        Ok(())
    }

    async fn upsert_season(&self, season: &Season) -> StoreResult<()> {
        let mut tables = self.tables.lock().unwrap();
        tables.seasons.insert(season.id, season.clone());
        Ok(())
    }

    async fn upsert_tournament_season(&self, link: &NewTournamentSeason) -> StoreResult<()> {
        let mut tables = self.tables.lock().unwrap();
        tables
            .tournament_seasons
            .entry((link.sofascore_tournament_id, link.sofascore_season_id))
            .or_insert_with(|| TournamentSeason {
                sofascore_tournament_id: link.sofascore_tournament_id,
                sofascore_season_id: link.sofascore_season_id,
                is_fetched: false,
                created_at: None,
                updated_at: None,
            });
        Ok(())
    }

    async fn pending_tournament_seasons(&self) -> StoreResult<Vec<TournamentSeason>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .tournament_seasons
            .values()
            .filter(|ts| !ts.is_fetched)
            .cloned()
            .collect())
    }

    async fn mark_tournament_season_fetched(
        &self,
        tournament_id: i32,
        season_id: i32,
    ) -> StoreResult<()> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(link) = tables.tournament_seasons.get_mut(&(tournament_id, season_id)) {
            link.is_fetched = true;
        }
        Ok(())
    }

    async fn upsert_fixture(&self, fixture: &Fixture) -> StoreResult<UpsertOutcome> {
        if self.failing_fixtures.lock().unwrap().contains(&fixture.id) {
            return Err(StoreError::QueryError(diesel::result::Error::RollbackTransaction));
        }
        let mut tables = self.tables.lock().unwrap();
        match tables.fixtures.insert(fixture.id, fixture.clone()) {
            Some(_) => Ok(UpsertOutcome::Updated),
            None => Ok(UpsertOutcome::Inserted),
        }
    }

    async fn upsert_player(&self, player: &Player) -> StoreResult<()> {
        let mut tables = self.tables.lock().unwrap();
        tables.players.insert(player.id, player.clone());
        Ok(())
    }

    async fn save_player_positions(&self, player_id: i32, positions: &[String]) -> StoreResult<()> {
        let mut tables = self.tables.lock().unwrap();
        for name in positions.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
            let next_id = tables.positions.len() as i32 + 1;
            let position_id = *tables.positions.entry(name.to_string()).or_insert(next_id);
            tables.player_positions.insert((player_id, position_id));
        }
        Ok(())
    }

    async fn upsert_player_statistics(&self, statistics: &PlayerStatistics) -> StoreResult<()> {
        let mut tables = self.tables.lock().unwrap();
        tables.statistics.insert(statistics.key(), statistics.clone());
        Ok(())
    }
}
