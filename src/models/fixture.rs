use diesel::{AsChangeset, Insertable};

#[derive(Debug, Clone, Insertable, AsChangeset, PartialEq)]
#[diesel(table_name = crate::models::schema::sofascore_fixture, treat_none_as_null = true)]
pub struct Fixture {
    pub id: i32,
    pub slug: Option<String>,
    pub tournament_id: Option<i32>,
    pub unique_tournament_id: Option<i32>,
    pub season_id: Option<i32>,
    pub round_info: Option<i32>,
    pub status_type: Option<String>,
    pub winner_code: Option<i32>,
    pub home_team: Option<i32>,
    pub away_team: Option<i32>,
    pub home_team_score_current: Option<i32>,
    pub home_team_score_display: Option<i32>,
    pub home_team_score_period1: Option<i32>,
    pub home_team_score_period2: Option<i32>,
    pub home_team_score_normal_time: Option<i32>,
    pub away_team_score_current: Option<i32>,
    pub away_team_score_display: Option<i32>,
    pub away_team_score_period1: Option<i32>,
    pub away_team_score_period2: Option<i32>,
    pub away_team_score_normal_time: Option<i32>,
    pub current_period_start_timestamp: Option<chrono::NaiveDateTime>,
    pub start_timestamp: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}
