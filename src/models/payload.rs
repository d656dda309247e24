//! Shapes of the upstream football API responses. Every field the pipeline does not key on is
//! optional so a sparse payload still deserializes; absent values end up as NULL columns.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct IdRef {
    pub id: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsSeasonsResponse {
    #[serde(default)]
    pub tournament_seasons: Vec<TournamentSeasons>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TournamentSeasons {
    pub tournament: TournamentPayload,
    #[serde(default)]
    pub seasons: Vec<SeasonPayload>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentPayload {
    pub id: i32,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub category: Option<CategoryPayload>,
    pub unique_tournament: Option<IdRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryPayload {
    pub id: i32,
    pub name: Option<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeasonPayload {
    pub id: i32,
    pub name: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PerformanceResponse {
    #[serde(default)]
    pub events: Vec<EventPayload>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub id: i32,
    pub slug: Option<String>,
    pub tournament: Option<EventTournament>,
    pub season: Option<IdRef>,
    pub round_info: Option<RoundInfo>,
    pub status: Option<EventStatus>,
    pub winner_code: Option<i32>,
    pub home_team: Option<TeamPayload>,
    pub away_team: Option<TeamPayload>,
    pub home_score: Option<ScorePayload>,
    pub away_score: Option<ScorePayload>,
    pub time: Option<EventTime>,
    pub start_timestamp: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTournament {
    pub id: i32,
    pub unique_tournament: Option<IdRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoundInfo {
    pub round: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventStatus {
    #[serde(rename = "type")]
    pub status_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    pub current_period_start_timestamp: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamPayload {
    pub id: i32,
    pub name: Option<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorePayload {
    pub current: Option<i32>,
    pub display: Option<i32>,
    pub period1: Option<i32>,
    pub period2: Option<i32>,
    pub normal_time: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatisticsPage {
    #[serde(default)]
    pub results: Vec<StatisticsEntry>,
    pub page: Option<i64>,
    pub pages: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatisticsEntry {
    pub player: IdRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerResponse {
    pub player: PlayerPayload,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPayload {
    pub id: i32,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub slug: Option<String>,
    pub short_name: Option<String>,
    pub team: Option<PlayerTeam>,
    pub position: Option<String>,
    pub jersey_number: Option<String>,
    pub height: Option<i32>,
    pub preferred_foot: Option<String>,
    pub user_count: Option<i32>,
    pub deceased: Option<bool>,
    pub gender: Option<String>,
    pub country: Option<CountryPayload>,
    pub shirt_number: Option<i32>,
    pub date_of_birth_timestamp: Option<i64>,
    pub contract_until_timestamp: Option<i64>,
    pub proposed_market_value_raw: Option<MarketValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerTeam {
    pub id: i32,
    pub tournament: Option<IdRef>,
    pub primary_unique_tournament: Option<IdRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountryPayload {
    pub alpha2: Option<String>,
    pub alpha3: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketValue {
    pub value: Option<i64>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CharacteristicsResponse {
    #[serde(default)]
    pub positions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerStatisticsResponse {
    #[serde(default)]
    pub seasons: Vec<PlayerSeasonStatistics>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSeasonStatistics {
    pub team: Option<IdRef>,
    pub unique_tournament: Option<IdRef>,
    pub year: Option<String>,
    pub statistics: Option<StatisticsValues>,
}

// Counts are read as f64 as well; the API is not consistent about integer encoding.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsValues {
    pub accurate_crosses: Option<f64>,
    pub accurate_crosses_percentage: Option<f64>,
    pub accurate_long_balls: Option<f64>,
    pub accurate_long_balls_percentage: Option<f64>,
    pub accurate_passes: Option<f64>,
    pub accurate_passes_percentage: Option<f64>,
    pub aerial_duels_won: Option<f64>,
    pub assists: Option<f64>,
    pub big_chances_created: Option<f64>,
    pub big_chances_missed: Option<f64>,
    pub blocked_shots: Option<f64>,
    pub clean_sheet: Option<f64>,
    pub dribbled_past: Option<f64>,
    pub error_lead_to_goal: Option<f64>,
    pub expected_assists: Option<f64>,
    pub expected_goals: Option<f64>,
    pub goals: Option<f64>,
    pub goals_assists_sum: Option<f64>,
    pub goals_conceded: Option<f64>,
    pub interceptions: Option<f64>,
    pub key_passes: Option<f64>,
    pub minutes_played: Option<f64>,
    pub pass_to_assist: Option<f64>,
    pub rating: Option<f64>,
    pub red_cards: Option<f64>,
    pub saves: Option<f64>,
    pub shots_on_target: Option<f64>,
    pub successful_dribbles: Option<f64>,
    pub tackles: Option<f64>,
    pub total_shots: Option<f64>,
    pub yellow_cards: Option<f64>,
    pub total_rating: Option<f64>,
    pub count_rating: Option<f64>,
    pub total_long_balls: Option<f64>,
    pub total_cross: Option<f64>,
    pub total_passes: Option<f64>,
    pub shots_from_inside_the_box: Option<f64>,
    pub appearances: Option<f64>,
}
