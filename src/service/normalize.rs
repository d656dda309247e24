//! Payload to row conversion. Everything here is pure so the dedup rules can be tested without
//! a store.

use crate::models::catalog::{Category, NewTournamentSeason, Season, Tournament};
use crate::models::club::NewClub;
use crate::models::fixture::Fixture;
use crate::models::payload::{
    EventPayload, PlayerPayload, PlayerSeasonStatistics, ScorePayload, TeamPayload,
    TournamentSeasons,
};
use crate::models::player::{Player, PlayerStatistics};
use chrono::{DateTime, NaiveDateTime};
use std::collections::{BTreeMap, BTreeSet};

const CLUB_LINK_BASE: &str = "https://www.sofascore.com/team/football";

/// Distinct categories, tournaments, seasons and tournament-season links found in one
/// club's season listing. The first occurrence of an id wins.
#[derive(Debug, Default, PartialEq)]
pub struct SeasonCatalog {
    pub categories: Vec<Category>,
    pub tournaments: Vec<Tournament>,
    pub seasons: Vec<Season>,
    pub links: Vec<NewTournamentSeason>,
}

pub fn derive_catalog(entries: &[TournamentSeasons], now: NaiveDateTime) -> SeasonCatalog {
    let mut categories = BTreeMap::new();
    let mut tournaments = BTreeMap::new();
    let mut seasons = BTreeMap::new();
    let mut links = BTreeSet::new();

    for entry in entries {
        let tournament = &entry.tournament;
        let unique_tournament_id = tournament.unique_tournament.as_ref().map(|u| u.id);

        if let Some(category) = &tournament.category {
            categories.entry(category.id).or_insert_with(|| Category {
                id: category.id,
                name: category.name.clone(),
                slug: category.slug.clone(),
                updated_at: Some(now),
            });
        }

        tournaments.entry(tournament.id).or_insert_with(|| Tournament {
            id: tournament.id,
            name: tournament.name.clone(),
            slug: tournament.slug.clone(),
            category_id: tournament.category.as_ref().map(|c| c.id),
            unique_tournament_id,
            updated_at: Some(now),
        });

        for season in &entry.seasons {
            seasons.entry(season.id).or_insert_with(|| Season {
                id: season.id,
                name: season.name.clone(),
                year: season.year.clone(),
                updated_at: Some(now),
            });

            // statistics are addressed by unique tournament, so that is the link key
            if let Some(unique_tournament_id) = unique_tournament_id {
                links.insert(NewTournamentSeason {
                    sofascore_tournament_id: unique_tournament_id,
                    sofascore_season_id: season.id,
                });
            }
        }
    }

    SeasonCatalog {
        categories: categories.into_values().collect(),
        tournaments: tournaments.into_values().collect(),
        seasons: seasons.into_values().collect(),
        links: links.into_iter().collect(),
    }
}

pub fn epoch_to_datetime(seconds: Option<i64>) -> Option<NaiveDateTime> {
    seconds
        .and_then(|s| DateTime::from_timestamp(s, 0))
        .map(|dt| dt.naive_utc())
}

pub fn fixture_row(event: &EventPayload, now: NaiveDateTime) -> Fixture {
    let home = event.home_score.as_ref();
    let away = event.away_score.as_ref();
    let score = |s: Option<&ScorePayload>, f: fn(&ScorePayload) -> Option<i32>| s.and_then(f);
    let start = epoch_to_datetime(event.start_timestamp);

    Fixture {
        id: event.id,
        slug: event.slug.clone(),
        tournament_id: event.tournament.as_ref().map(|t| t.id),
        unique_tournament_id: event
            .tournament
            .as_ref()
            .and_then(|t| t.unique_tournament.as_ref())
            .map(|u| u.id),
        season_id: event.season.as_ref().map(|s| s.id),
        round_info: event.round_info.as_ref().and_then(|r| r.round),
        status_type: event.status.as_ref().and_then(|s| s.status_type.clone()),
        winner_code: event.winner_code,
        home_team: event.home_team.as_ref().map(|t| t.id),
        away_team: event.away_team.as_ref().map(|t| t.id),
        home_team_score_current: score(home, |s| s.current),
        home_team_score_display: score(home, |s| s.display),
        home_team_score_period1: score(home, |s| s.period1),
        home_team_score_period2: score(home, |s| s.period2),
        home_team_score_normal_time: score(home, |s| s.normal_time),
        away_team_score_current: score(away, |s| s.current),
        away_team_score_display: score(away, |s| s.display),
        away_team_score_period1: score(away, |s| s.period1),
        away_team_score_period2: score(away, |s| s.period2),
        away_team_score_normal_time: score(away, |s| s.normal_time),
        current_period_start_timestamp: event
            .time
            .as_ref()
            .and_then(|t| epoch_to_datetime(t.current_period_start_timestamp))
            .or(start),
        start_timestamp: start,
        updated_at: Some(now),
    }
}

pub fn club_from_team(team: &TeamPayload, league_id: i32) -> NewClub {
    NewClub {
        league_id,
        club_name: team.name.clone(),
        club_link: team
            .slug
            .as_ref()
            .map(|slug| format!("{}/{}/{}", CLUB_LINK_BASE, slug, team.id)),
        club_slug: team.slug.clone(),
        club_identifier: team.id,
    }
}

/// Home and away teams of a fixture, as crawl sources.
pub fn discovered_clubs(event: &EventPayload, league_id: i32) -> Vec<NewClub> {
    [event.home_team.as_ref(), event.away_team.as_ref()]
        .into_iter()
        .flatten()
        .map(|team| club_from_team(team, league_id))
        .collect()
}

pub fn player_row(player: &PlayerPayload, now: NaiveDateTime) -> Player {
    let team = player.team.as_ref();
    let country = player.country.as_ref();
    let market_value = player.proposed_market_value_raw.as_ref();

    Player {
        id: player.id,
        name: player.name.clone(),
        first_name: player.first_name.clone(),
        slug: player.slug.clone(),
        short_name: player.short_name.clone(),
        team_id: team.map(|t| t.id),
        tournament_id: team.and_then(|t| t.tournament.as_ref()).map(|t| t.id),
        unique_tournament_id: team
            .and_then(|t| t.primary_unique_tournament.as_ref())
            .map(|u| u.id),
        position: player.position.clone(),
        jersey_number: player
            .jersey_number
            .clone()
            .or_else(|| player.shirt_number.map(|n| n.to_string())),
        height: player.height,
        preferred_foot: player.preferred_foot.clone(),
        user_count: player.user_count,
        deceased: player.deceased.unwrap_or(false),
        gender: player.gender.clone(),
        country_alpha2: country.and_then(|c| c.alpha2.clone()),
        country_alpha3: country.and_then(|c| c.alpha3.clone()),
        country_name: country.and_then(|c| c.name.clone()),
        country_slug: country.and_then(|c| c.slug.clone()),
        shirt_number: player.shirt_number,
        date_of_birth_timestamp: epoch_to_datetime(player.date_of_birth_timestamp),
        contract_until_timestamp: epoch_to_datetime(player.contract_until_timestamp),
        proposed_market_value_raw: market_value.and_then(|m| m.value),
        proposed_market_value_currency: market_value.and_then(|m| m.currency.clone()),
        updated_at: Some(now),
    }
}

fn count(value: Option<f64>) -> Option<i32> {
    value.filter(|v| v.is_finite()).map(|v| v.round() as i32)
}

/// One statistics row per (team, unique tournament, year). Entries missing any part of that
/// key cannot be stored and yield `None`.
pub fn statistics_row(
    player_id: i32,
    entry: &PlayerSeasonStatistics,
    now: NaiveDateTime,
) -> Option<PlayerStatistics> {
    let team_id = entry.team.as_ref()?.id;
    let unique_tournament_id = entry.unique_tournament.as_ref()?.id;
    let year = entry.year.clone()?;
    let s = entry.statistics.clone().unwrap_or_default();

    Some(PlayerStatistics {
        player_id,
        team_id,
        unique_tournament_id,
        year,
        accurate_crosses: count(s.accurate_crosses),
        accurate_crosses_percentage: s.accurate_crosses_percentage,
        accurate_long_balls: count(s.accurate_long_balls),
        accurate_long_balls_percentage: s.accurate_long_balls_percentage,
        accurate_passes: count(s.accurate_passes),
        accurate_passes_percentage: s.accurate_passes_percentage,
        aerial_duels_won: count(s.aerial_duels_won),
        assists: count(s.assists),
        big_chances_created: count(s.big_chances_created),
        big_chances_missed: count(s.big_chances_missed),
        blocked_shots: count(s.blocked_shots),
        clean_sheet: count(s.clean_sheet),
        dribbled_past: count(s.dribbled_past),
        error_lead_to_goal: count(s.error_lead_to_goal),
        expected_assists: s.expected_assists,
        expected_goals: s.expected_goals,
        goals: count(s.goals),
        goals_assists_sum: count(s.goals_assists_sum),
        goals_conceded: count(s.goals_conceded),
        interceptions: count(s.interceptions),
        key_passes: count(s.key_passes),
        minutes_played: count(s.minutes_played),
        pass_to_assist: count(s.pass_to_assist),
        rating: s.rating,
        red_cards: count(s.red_cards),
        saves: count(s.saves),
        shots_on_target: count(s.shots_on_target),
        successful_dribbles: count(s.successful_dribbles),
        tackles: count(s.tackles),
        total_shots: count(s.total_shots),
        yellow_cards: count(s.yellow_cards),
        total_rating: s.total_rating,
        count_rating: count(s.count_rating),
        total_long_balls: count(s.total_long_balls),
        total_cross: count(s.total_cross),
        total_passes: count(s.total_passes),
        shots_from_inside_the_box: count(s.shots_from_inside_the_box),
        appearances: count(s.appearances),
        updated_at: Some(now),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::payload::{
        PerformanceResponse, PlayerResponse, PlayerStatisticsResponse, StandingsSeasonsResponse,
    };
    use serde_json::json;

    fn now() -> NaiveDateTime {
        epoch_to_datetime(Some(1_700_000_000)).unwrap()
    }

    fn standings() -> StandingsSeasonsResponse {
        serde_json::from_value(json!({
            "tournamentSeasons": [
                {
                    "tournament": {
                        "id": 1, "name": "Premier League", "slug": "premier-league",
                        "category": {"id": 1, "name": "England", "slug": "england"},
                        "uniqueTournament": {"id": 17}
                    },
                    "seasons": [
                        {"id": 61627, "name": "Premier League 24/25", "year": "24/25"},
                        {"id": 52186, "name": "Premier League 23/24", "year": "23/24"}
                    ]
                },
                {
                    "tournament": {
                        "id": 21, "name": "FA Cup", "slug": "fa-cup",
                        "category": {"id": 1, "name": "England", "slug": "england"},
                        "uniqueTournament": {"id": 19}
                    },
                    "seasons": [{"id": 61627, "name": "FA Cup 24/25", "year": "24/25"}]
                },
                {
                    "tournament": {
                        "id": 7, "name": "Champions League", "slug": "uefa-champions-league",
                        "category": {"id": 1465, "name": "Europe", "slug": "europe"},
                        "uniqueTournament": {"id": 7}
                    },
                    "seasons": [{"id": 61644, "name": "UCL 24/25", "year": "24/25"}]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn catalog_dedups_by_id_before_writing() {
        let catalog = derive_catalog(&standings().tournament_seasons, now());

        let category_ids: Vec<i32> = catalog.categories.iter().map(|c| c.id).collect();
        assert_eq!(category_ids, vec![1, 1465]);
        assert_eq!(catalog.tournaments.len(), 3);
        let season_ids: Vec<i32> = catalog.seasons.iter().map(|s| s.id).collect();
        assert_eq!(season_ids, vec![52186, 61627, 61644]);
        // first occurrence of a season id wins
        let shared = catalog.seasons.iter().find(|s| s.id == 61627).unwrap();
        assert_eq!(shared.name.as_deref(), Some("Premier League 24/25"));
        assert_eq!(catalog.links.len(), 4);
        assert!(catalog.links.contains(&NewTournamentSeason {
            sofascore_tournament_id: 19,
            sofascore_season_id: 61627,
        }));
    }

    #[test]
    fn empty_listing_derives_nothing() {
        assert_eq!(derive_catalog(&[], now()), SeasonCatalog::default());
    }

    #[test]
    fn fixture_row_flattens_nested_payload() {
        let performance: PerformanceResponse = serde_json::from_value(json!({
            "events": [{
                "id": 12437786,
                "slug": "arsenal-chelsea",
                "tournament": {"id": 1, "uniqueTournament": {"id": 17}},
                "season": {"id": 61627},
                "roundInfo": {"round": 11},
                "status": {"type": "finished"},
                "winnerCode": 3,
                "homeTeam": {"id": 42, "name": "Arsenal", "slug": "arsenal"},
                "awayTeam": {"id": 38, "name": "Chelsea", "slug": "chelsea"},
                "homeScore": {"current": 1, "display": 1, "period1": 0, "period2": 1, "normalTime": 1},
                "awayScore": {"current": 1, "display": 1, "period1": 0},
                "startTimestamp": 1731258000
            }]
        }))
        .unwrap();

        let fixture = fixture_row(&performance.events[0], now());

        assert_eq!(fixture.unique_tournament_id, Some(17));
        assert_eq!(fixture.status_type.as_deref(), Some("finished"));
        assert_eq!(fixture.home_team_score_normal_time, Some(1));
        assert_eq!(fixture.away_team_score_period2, None);
        assert_eq!(fixture.start_timestamp, epoch_to_datetime(Some(1731258000)));
        assert_eq!(fixture.current_period_start_timestamp, fixture.start_timestamp);

        let clubs = discovered_clubs(&performance.events[0], 1);
        assert_eq!(clubs.len(), 2);
        assert_eq!(
            clubs[0].club_link.as_deref(),
            Some("https://www.sofascore.com/team/football/arsenal/42")
        );
    }

    #[test]
    fn player_row_coalesces_missing_fields() {
        let response: PlayerResponse = serde_json::from_value(json!({
            "player": {
                "id": 934235,
                "name": "Bukayo Saka",
                "shirtNumber": 7,
                "team": {"id": 42, "primaryUniqueTournament": {"id": 17}},
                "country": {"alpha2": "EN", "name": "England"},
                "dateOfBirthTimestamp": 1001462400,
                "proposedMarketValueRaw": {"value": 140000000, "currency": "EUR"}
            }
        }))
        .unwrap();

        let player = player_row(&response.player, now());

        assert_eq!(player.jersey_number.as_deref(), Some("7"));
        assert_eq!(player.unique_tournament_id, Some(17));
        assert_eq!(player.tournament_id, None);
        assert!(!player.deceased);
        assert_eq!(player.country_alpha3, None);
        assert_eq!(
            player.date_of_birth_timestamp.map(|d| d.to_string()),
            Some("2001-09-26 00:00:00".to_string())
        );
        assert_eq!(player.proposed_market_value_raw, Some(140_000_000));
    }

    #[test]
    fn statistics_rows_need_a_complete_key() {
        let response: PlayerStatisticsResponse = serde_json::from_value(json!({
            "seasons": [
                {
                    "team": {"id": 42}, "uniqueTournament": {"id": 17}, "year": "24/25",
                    "statistics": {"goals": 6, "rating": 7.31, "accuratePasses": 402.0, "expectedGoals": 5.2}
                },
                {"uniqueTournament": {"id": 17}, "year": "23/24", "statistics": {"goals": 16}}
            ]
        }))
        .unwrap();

        let row = statistics_row(934235, &response.seasons[0], now()).unwrap();
        assert_eq!(row.key(), (934235, 42, 17, "24/25".to_string()));
        assert_eq!(row.goals, Some(6));
        assert_eq!(row.accurate_passes, Some(402));
        assert_eq!(row.rating, Some(7.31));
        assert_eq!(row.saves, None);

        assert!(statistics_row(934235, &response.seasons[1], now()).is_none());
    }
}
