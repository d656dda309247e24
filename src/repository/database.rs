use crate::config::config::Config;
use crate::models::catalog::{Category, NewTournamentSeason, Season, Tournament, TournamentSeason};
use crate::models::club::{Club, NewClub};
use crate::models::fixture::{Fixture, UpsertOutcome};
use crate::models::player::{Player, PlayerStatistics};
use crate::models::request_log::NewRequestLog;
use crate::models::schema::{
    sofascore_categories, sofascore_club_scrap, sofascore_failed_request_log, sofascore_fixture,
    sofascore_player, sofascore_player_position, sofascore_player_statistics,
    sofascore_position, sofascore_request_log, sofascore_seasons, sofascore_tournament_season,
    sofascore_tournaments,
};
use crate::repository::{AuditLog, Store, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use deadpool::managed::Object;
use diesel::{ConnectionError, ConnectionResult, ExpressionMethods, OptionalExtension, QueryDsl};
use diesel_async::{
    pooled_connection::{deadpool::Pool, AsyncDieselConnectionManager},
    AsyncPgConnection, RunQueryDsl,
};
use log::{debug, error};
use openssl::ssl::{SslConnector, SslMethod};
use postgres_openssl::MakeTlsConnector;

pub type DBPool = deadpool::managed::Pool<AsyncDieselConnectionManager<AsyncPgConnection>>;

pub struct Database {
    pool: DBPool,
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

impl Database {
    pub fn new(config: Config) -> Self {
        let manager = match config.database_ca_file {
            Some(ca_file) => AsyncDieselConnectionManager::<AsyncPgConnection>::new_with_setup(
                config.database_url,
                move |url| Box::pin(Self::establish(url, ca_file.clone())),
            ),
            None => AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url),
        };
        let pool = Pool::builder(manager)
            .build()
            .expect("Failed to create pool.");
        Database { pool }
    }

    async fn establish(database_url: &str, ca_file: String) -> ConnectionResult<AsyncPgConnection> {
        let mut builder = SslConnector::builder(SslMethod::tls())
            .map_err(|e| ConnectionError::BadConnection(e.to_string()))?;
        builder
            .set_ca_file(&ca_file)
            .map_err(|e| ConnectionError::BadConnection(e.to_string()))?;
        let connector = MakeTlsConnector::new(builder.build());
        let (client, connection) = tokio_postgres::connect(database_url, connector)
            .await
            .map_err(|e| ConnectionError::BadConnection(e.to_string()))?;
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!("connection error: {e}");
            }
        });
        AsyncPgConnection::try_from(client).await
    }

    async fn get_db_conn(
        &self,
    ) -> Result<Object<AsyncDieselConnectionManager<AsyncPgConnection>>, StoreError> {
        self.pool.get().await.map_err(|e| {
            error!("Could not acquire a database connection. The error: {:?}", e);
            StoreError::PoolError(e)
        })
    }
}

#[async_trait]
impl AuditLog for Database {
    async fn log_request(&self, entry: &NewRequestLog) -> StoreResult<()> {
        let mut conn = self.get_db_conn().await?;
        diesel::insert_into(sofascore_request_log::table)
            .values((
                sofascore_request_log::context.eq(&entry.context),
                sofascore_request_log::url.eq(&entry.url),
                sofascore_request_log::status.eq(&entry.status),
                sofascore_request_log::attempt_count.eq(entry.attempt_count),
                sofascore_request_log::error_message.eq(entry.error_message.as_deref()),
                sofascore_request_log::response_code.eq(entry.response_code),
                sofascore_request_log::response_body.eq(entry.response_body.as_deref()),
                sofascore_request_log::created_at.eq(now()),
            ))
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    async fn log_failed_request(&self, entry: &NewRequestLog) -> StoreResult<()> {
        let mut conn = self.get_db_conn().await?;
        diesel::insert_into(sofascore_failed_request_log::table)
            .values((
                sofascore_failed_request_log::context.eq(&entry.context),
                sofascore_failed_request_log::url.eq(&entry.url),
                sofascore_failed_request_log::status.eq(&entry.status),
                sofascore_failed_request_log::attempt_count.eq(entry.attempt_count),
                sofascore_failed_request_log::error_message.eq(entry.error_message.as_deref()),
                sofascore_failed_request_log::response_code.eq(entry.response_code),
                sofascore_failed_request_log::response_body.eq(entry.response_body.as_deref()),
                sofascore_failed_request_log::created_at.eq(now()),
            ))
            .execute(&mut conn)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Store for Database {
    async fn register_club(&self, club: &NewClub) -> StoreResult<bool> {
        let mut conn = self.get_db_conn().await?;
        let inserted = diesel::insert_into(sofascore_club_scrap::table)
            .values(club)
            .on_conflict(sofascore_club_scrap::club_identifier)
            .do_nothing()
            .execute(&mut conn)
            .await?;
        Ok(inserted > 0)
    }

    async fn pending_clubs(&self) -> StoreResult<Vec<Club>> {
        let mut conn = self.get_db_conn().await?;
        let clubs = sofascore_club_scrap::table
            .filter(sofascore_club_scrap::is_fetched.eq(false))
            .order(sofascore_club_scrap::id.asc())
            .load::<Club>(&mut conn)
            .await?;
        Ok(clubs)
    }

    async fn mark_club_fetched(&self, club_identifier: i32) -> StoreResult<()> {
        let mut conn = self.get_db_conn().await?;
        diesel::update(
            sofascore_club_scrap::table
                .filter(sofascore_club_scrap::club_identifier.eq(club_identifier)),
        )
        .set((
            sofascore_club_scrap::is_fetched.eq(true),
            sofascore_club_scrap::updated_at.eq(now()),
        ))
        .execute(&mut conn)
        .await?;
        Ok(())
    }

    async fn upsert_category(&self, category: &Category) -> StoreResult<()> {
        let mut conn = self.get_db_conn().await?;
        diesel::insert_into(sofascore_categories::table)
            .values(category)
            .on_conflict(sofascore_categories::id)
            .do_update()
            .set(category)
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    async fn upsert_tournament(&self, tournament: &Tournament) -> StoreResult<()> {
        let mut conn = self.get_db_conn().await?;
        diesel::insert_into(sofascore_tournaments::table)
            .values(tournament)
            .on_conflict(sofascore_tournaments::id)
            .do_update()
            .set(tournament)
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    async fn upsert_season(&self, season: &Season) -> StoreResult<()> {
        let mut conn = self.get_db_conn().await?;
        diesel::insert_into(sofascore_seasons::table)
            .values(season)
            .on_conflict(sofascore_seasons::id)
            .do_update()
            .set(season)
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    async fn upsert_tournament_season(&self, link: &NewTournamentSeason) -> StoreResult<()> {
        let mut conn = self.get_db_conn().await?;
        diesel::insert_into(sofascore_tournament_season::table)
            .values(link)
            .on_conflict((
                sofascore_tournament_season::sofascore_tournament_id,
                sofascore_tournament_season::sofascore_season_id,
            ))
            .do_update()
            .set(sofascore_tournament_season::updated_at.eq(now()))
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    async fn pending_tournament_seasons(&self) -> StoreResult<Vec<TournamentSeason>> {
        let mut conn = self.get_db_conn().await?;
        let pairs = sofascore_tournament_season::table
            .filter(sofascore_tournament_season::is_fetched.eq(false))
            .order((
                sofascore_tournament_season::sofascore_tournament_id.asc(),
                sofascore_tournament_season::sofascore_season_id.asc(),
            ))
            .load::<TournamentSeason>(&mut conn)
            .await?;
        Ok(pairs)
    }

    async fn mark_tournament_season_fetched(
        &self,
        tournament_id: i32,
        season_id: i32,
    ) -> StoreResult<()> {
        let mut conn = self.get_db_conn().await?;
        diesel::update(sofascore_tournament_season::table.find((tournament_id, season_id)))
            .set((
                sofascore_tournament_season::is_fetched.eq(true),
                sofascore_tournament_season::updated_at.eq(now()),
            ))
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    async fn upsert_fixture(&self, fixture: &Fixture) -> StoreResult<UpsertOutcome> {
        let mut conn = self.get_db_conn().await?;
        let existing = sofascore_fixture::table
            .find(fixture.id)
            .select(sofascore_fixture::id)
            .first::<i32>(&mut conn)
            .await
            .optional()?;

        if existing.is_some() {
            diesel::update(sofascore_fixture::table.find(fixture.id))
                .set(fixture)
                .execute(&mut conn)
                .await?;
            debug!("Fixture with id {} updated", fixture.id);
            Ok(UpsertOutcome::Updated)
        } else {
            diesel::insert_into(sofascore_fixture::table)
                .values(fixture)
                .execute(&mut conn)
                .await?;
            debug!("Fixture with id {} inserted", fixture.id);
            Ok(UpsertOutcome::Inserted)
        }
    }

    async fn upsert_player(&self, player: &Player) -> StoreResult<()> {
        let mut conn = self.get_db_conn().await?;
        diesel::insert_into(sofascore_player::table)
            .values(player)
            .on_conflict(sofascore_player::id)
            .do_update()
            .set(player)
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    async fn save_player_positions(&self, player_id: i32, positions: &[String]) -> StoreResult<()> {
        let mut conn = self.get_db_conn().await?;
        for name in positions.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
            let found = sofascore_position::table
                .filter(sofascore_position::name.eq(name))
                .select(sofascore_position::id)
                .first::<i32>(&mut conn)
                .await
                .optional()?;

            let position_id = match found {
                Some(id) => id,
                None => {
                    diesel::insert_into(sofascore_position::table)
                        .values((
                            sofascore_position::name.eq(name),
                            sofascore_position::created_at.eq(now()),
                            sofascore_position::updated_at.eq(now()),
                        ))
                        .returning(sofascore_position::id)
                        .get_result::<i32>(&mut conn)
                        .await?
                }
            };

            let linked = sofascore_player_position::table
                .find((player_id, position_id))
                .select(sofascore_player_position::player_id)
                .first::<i32>(&mut conn)
                .await
                .optional()?;

            if linked.is_none() {
                diesel::insert_into(sofascore_player_position::table)
                    .values((
                        sofascore_player_position::player_id.eq(player_id),
                        sofascore_player_position::position_id.eq(position_id),
                        sofascore_player_position::created_at.eq(now()),
                        sofascore_player_position::updated_at.eq(now()),
                    ))
                    .execute(&mut conn)
                    .await?;
            }
        }
        Ok(())
    }

    async fn upsert_player_statistics(&self, statistics: &PlayerStatistics) -> StoreResult<()> {
        let mut conn = self.get_db_conn().await?;
        diesel::insert_into(sofascore_player_statistics::table)
            .values(statistics)
            .on_conflict((
                sofascore_player_statistics::player_id,
                sofascore_player_statistics::team_id,
                sofascore_player_statistics::unique_tournament_id,
                sofascore_player_statistics::year,
            ))
            .do_update()
            .set(statistics)
            .execute(&mut conn)
            .await?;
        Ok(())
    }
}
