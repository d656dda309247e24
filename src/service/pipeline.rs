//! The ingestion run.
//!
//! A run registers the configured seed clubs, then walks every pending club through two stages
//! (season catalog, then fixtures). Fixtures register their home and away teams as new clubs,
//! which later crawl rounds pick up. Once the club phase is done, every pending
//! tournament-season pair is paginated through the statistics endpoint, and each listed player
//! is fetched in detail.
//!
//! Everything is sequential. Pacing is enforced by the transport's shared limiter, and failures
//! of a single club, pair, page or player are logged and skipped so one bad unit never aborts
//! the run.

use crate::models::catalog::TournamentSeason;
use crate::models::club::NewClub;
use crate::models::fixture::UpsertOutcome;
use crate::models::payload::{
    CharacteristicsResponse, PerformanceResponse, PlayerResponse, PlayerStatisticsResponse,
    StandingsSeasonsResponse, StatisticsPage,
};
use crate::repository::{Store, StoreError};
use crate::service::normalize::{
    derive_catalog, discovered_clubs, fixture_row, player_row, statistics_row,
};
use crate::service::retry::{RetryConfig, RetryError, RetryPolicy};
use crate::transport::Fetcher;
use chrono::{NaiveDateTime, Utc};
use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Retry(#[from] RetryError),
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Without trailing slash.
    pub api_base_url: String,
    pub statistics_page_limit: i64,
    pub seed_club_ids: Vec<i32>,
    pub seed_league_id: i32,
    pub crawl_rounds: u32,
}

/// Counters reported at the end of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub clubs_processed: u32,
    pub clubs_skipped: u32,
    pub clubs_discovered: u32,
    pub fixtures_inserted: u32,
    pub fixtures_updated: u32,
    pub pairs_completed: u32,
    pub pairs_pending: u32,
    pub players_processed: u32,
    pub player_failures: u32,
}

pub struct Pipeline {
    fetcher: Arc<dyn Fetcher>,
    store: Arc<dyn Store>,
    retry: RetryPolicy,
    config: PipelineConfig,
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// True once the page at `offset` is the last one of `pages` pages of `limit` rows.
pub fn is_last_page(offset: i64, pages: i64, limit: i64) -> bool {
    offset >= pages * limit - limit
}

impl Pipeline {
    pub fn new<S>(
        fetcher: Arc<dyn Fetcher>,
        store: Arc<S>,
        retry_config: RetryConfig,
        config: PipelineConfig,
    ) -> Self
    where
        S: Store + 'static,
    {
        let retry = RetryPolicy::new(retry_config, store.clone());
        Pipeline {
            fetcher,
            store,
            retry,
            config,
        }
    }

    pub async fn run(&self) -> RunSummary {
        let mut summary = RunSummary::default();
        info!("Ingestion run started");

        self.register_seeds(&mut summary).await;

        let mut attempted = HashSet::new();
        for round in 1..=self.config.crawl_rounds {
            let clubs = match self.store.pending_clubs().await {
                Ok(clubs) => clubs,
                Err(e) => {
                    error!("Could not load pending clubs. The error: {:?}", e);
                    break;
                }
            };
            let clubs: Vec<i32> = clubs
                .into_iter()
                .map(|club| club.club_identifier)
                .filter(|id| attempted.insert(*id))
                .collect();
            if clubs.is_empty() {
                break;
            }

            info!("Crawl round {}: {} pending clubs", round, clubs.len());
            for club_id in clubs {
                self.process_club(club_id, &mut summary).await;
            }
        }

        self.process_statistics(&mut summary).await;

        info!("Ingestion run finished: {:?}", summary);
        summary
    }

    async fn register_seeds(&self, summary: &mut RunSummary) {
        for &club_id in &self.config.seed_club_ids {
            let seed = NewClub::seed(club_id, self.config.seed_league_id);
            match self.store.register_club(&seed).await {
                Ok(true) => {
                    info!("Registered seed club {}", club_id);
                    summary.clubs_discovered += 1;
                }
                Ok(false) => {}
                Err(e) => error!("Could not register seed club {}. The error: {:?}", club_id, e),
            }
        }
    }

    /// Seasons then fixtures. A club whose season listing cannot be fetched is skipped whole
    /// and stays pending for the next run.
    async fn process_club(&self, club_id: i32, summary: &mut RunSummary) {
        info!("Processing club {}", club_id);

        match self.ingest_seasons(club_id).await {
            Ok(true) => {}
            Ok(false) => {
                warn!("No season data for club {}, skipping", club_id);
                summary.clubs_skipped += 1;
                return;
            }
            Err(e) => {
                error!("Season stage failed for club {}. The error: {}", club_id, e);
                summary.clubs_skipped += 1;
                return;
            }
        }

        if let Err(e) = self.ingest_fixtures(club_id, summary).await {
            error!("Fixture stage failed for club {}. The error: {}", club_id, e);
        }
        summary.clubs_processed += 1;
    }

    /// Fetches through the retry policy and decodes the payload. `Ok(None)` means the call was
    /// exhausted without a usable body.
    async fn fetch_payload<T: DeserializeOwned>(
        &self,
        url: &str,
        context: &str,
    ) -> Result<Option<T>, PipelineError> {
        let outcome = self.retry.fetch(self.fetcher.as_ref(), url, context).await?;
        let Some(body) = outcome.into_success().and_then(|response| response.body) else {
            return Ok(None);
        };

        match serde_json::from_value(body) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) => {
                warn!("Unexpected {} payload from {}: {}", context, url, e);
                Ok(None)
            }
        }
    }

    async fn ingest_seasons(&self, club_id: i32) -> Result<bool, PipelineError> {
        let url = format!(
            "{}/team/{}/standings/seasons",
            self.config.api_base_url, club_id
        );
        let Some(payload) = self
            .fetch_payload::<StandingsSeasonsResponse>(&url, "seasons")
            .await?
        else {
            return Ok(false);
        };

        if payload.tournament_seasons.is_empty() {
            info!("Club {} lists no tournament seasons", club_id);
            return Ok(true);
        }

        let catalog = derive_catalog(&payload.tournament_seasons, now());
        for category in &catalog.categories {
            self.store.upsert_category(category).await?;
        }
        for tournament in &catalog.tournaments {
            self.store.upsert_tournament(tournament).await?;
        }
        for season in &catalog.seasons {
            self.store.upsert_season(season).await?;
        }
        for link in &catalog.links {
            self.store.upsert_tournament_season(link).await?;
        }
        debug!(
            "Club {}: {} categories, {} tournaments, {} seasons, {} links",
            club_id,
            catalog.categories.len(),
            catalog.tournaments.len(),
            catalog.seasons.len(),
            catalog.links.len()
        );

        self.store.mark_club_fetched(club_id).await?;
        Ok(true)
    }

    async fn ingest_fixtures(
        &self,
        club_id: i32,
        summary: &mut RunSummary,
    ) -> Result<(), PipelineError> {
        let url = format!("{}/team/{}/performance", self.config.api_base_url, club_id);
        let Some(payload) = self
            .fetch_payload::<PerformanceResponse>(&url, "fixtures")
            .await?
        else {
            warn!("No fixtures for club {}", club_id);
            return Ok(());
        };

        let now = now();
        for event in &payload.events {
            for club in discovered_clubs(event, self.config.seed_league_id) {
                match self.store.register_club(&club).await {
                    Ok(true) => {
                        debug!("Discovered club {}", club.club_identifier);
                        summary.clubs_discovered += 1;
                    }
                    Ok(false) => {}
                    Err(e) => error!(
                        "Could not register club {}. The error: {:?}",
                        club.club_identifier, e
                    ),
                }
            }

            match self.store.upsert_fixture(&fixture_row(event, now)).await {
                Ok(UpsertOutcome::Inserted) => summary.fixtures_inserted += 1,
                Ok(UpsertOutcome::Updated) => summary.fixtures_updated += 1,
                Err(e) => error!("Could not store fixture {}. The error: {:?}", event.id, e),
            }
        }
        Ok(())
    }

    async fn process_statistics(&self, summary: &mut RunSummary) {
        let pairs = match self.store.pending_tournament_seasons().await {
            Ok(pairs) => pairs,
            Err(e) => {
                error!("Could not load pending tournament seasons. The error: {:?}", e);
                return;
            }
        };

        let mut seen_players = HashSet::new();
        for pair in pairs {
            let (tournament_id, season_id) = (pair.sofascore_tournament_id, pair.sofascore_season_id);
            if !self.paginate_pair(&pair, &mut seen_players, summary).await {
                warn!(
                    "Statistics for tournament {} season {} left pending",
                    tournament_id, season_id
                );
                summary.pairs_pending += 1;
                continue;
            }

            match self
                .store
                .mark_tournament_season_fetched(tournament_id, season_id)
                .await
            {
                Ok(()) => summary.pairs_completed += 1,
                Err(e) => {
                    error!(
                        "Could not mark tournament {} season {} as fetched. The error: {:?}",
                        tournament_id, season_id, e
                    );
                    summary.pairs_pending += 1;
                }
            }
        }
    }

    /// Walks the statistics pages of one pair. Returns whether pagination reached the last page.
    /// Without a first page the page count is unknown, so the pair stays pending; a later page
    /// that fails is skipped.
    async fn paginate_pair(
        &self,
        pair: &TournamentSeason,
        seen_players: &mut HashSet<i32>,
        summary: &mut RunSummary,
    ) -> bool {
        let limit = self.config.statistics_page_limit;
        let mut offset = 0;
        let mut pages: Option<i64> = None;

        loop {
            let url = format!(
                "{}/unique-tournament/{}/season/{}/statistics?limit={}&offset={}",
                self.config.api_base_url,
                pair.sofascore_tournament_id,
                pair.sofascore_season_id,
                limit,
                offset
            );
            info!(
                "Fetching statistics for tournament {} season {} at offset {}",
                pair.sofascore_tournament_id, pair.sofascore_season_id, offset
            );

            let page = match self.fetch_payload::<StatisticsPage>(&url, "statistics").await {
                Ok(page) => page,
                Err(e) => {
                    error!("{}", e);
                    None
                }
            };

            match page {
                Some(page) => {
                    debug!(
                        "Statistics page {:?} of {:?} lists {} players",
                        page.page,
                        page.pages,
                        page.results.len()
                    );
                    pages = page.pages.or(pages);
                    for entry in &page.results {
                        if seen_players.insert(entry.player.id) {
                            self.ingest_player(entry.player.id, summary).await;
                        }
                    }
                }
                None if pages.is_none() => return false,
                None => warn!("Skipping statistics page at offset {}", offset),
            }

            if is_last_page(offset, pages.unwrap_or(0), limit) {
                return true;
            }
            offset += limit;
        }
    }

    /// Detail, then positions, then season statistics. Both of the latter reference the player
    /// row, so they are skipped when the detail cannot be stored.
    async fn ingest_player(&self, player_id: i32, summary: &mut RunSummary) {
        match self.ingest_player_detail(player_id).await {
            Ok(true) => {}
            Ok(false) => {
                warn!("No detail for player {}, skipping", player_id);
                summary.player_failures += 1;
                return;
            }
            Err(e) => {
                error!("Could not ingest player {}. The error: {}", player_id, e);
                summary.player_failures += 1;
                return;
            }
        }

        if let Err(e) = self.ingest_player_positions(player_id).await {
            error!("Could not ingest positions of player {}. The error: {}", player_id, e);
        }
        if let Err(e) = self.ingest_player_statistics(player_id).await {
            error!("Could not ingest statistics of player {}. The error: {}", player_id, e);
        }
        summary.players_processed += 1;
    }

    async fn ingest_player_detail(&self, player_id: i32) -> Result<bool, PipelineError> {
        let url = format!("{}/player/{}", self.config.api_base_url, player_id);
        let Some(payload) = self.fetch_payload::<PlayerResponse>(&url, "player").await? else {
            return Ok(false);
        };
        self.store.upsert_player(&player_row(&payload.player, now())).await?;
        Ok(true)
    }

    async fn ingest_player_positions(&self, player_id: i32) -> Result<(), PipelineError> {
        let url = format!(
            "{}/player/{}/characteristics",
            self.config.api_base_url, player_id
        );
        if let Some(payload) = self
            .fetch_payload::<CharacteristicsResponse>(&url, "player characteristics")
            .await?
        {
            self.store
                .save_player_positions(player_id, &payload.positions)
                .await?;
        }
        Ok(())
    }

    async fn ingest_player_statistics(&self, player_id: i32) -> Result<(), PipelineError> {
        let url = format!("{}/player/{}/statistics", self.config.api_base_url, player_id);
        let Some(payload) = self
            .fetch_payload::<PlayerStatisticsResponse>(&url, "player statistics")
            .await?
        else {
            return Ok(());
        };

        let now = now();
        for entry in &payload.seasons {
            let Some(row) = statistics_row(player_id, entry, now) else {
                debug!("Incomplete statistics entry for player {}", player_id);
                continue;
            };
            if let Err(e) = self.store.upsert_player_statistics(&row).await {
                error!(
                    "Could not store statistics {:?}. The error: {:?}",
                    row.key(),
                    e
                );
            }
        }
        Ok(())
    }
}
