use diesel::{AsChangeset, Insertable};

#[derive(Debug, Clone, Insertable, AsChangeset, PartialEq)]
#[diesel(table_name = crate::models::schema::sofascore_player, treat_none_as_null = true)]
pub struct Player {
    pub id: i32,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub slug: Option<String>,
    pub short_name: Option<String>,
    pub team_id: Option<i32>,
    pub tournament_id: Option<i32>,
    pub unique_tournament_id: Option<i32>,
    pub position: Option<String>,
    pub jersey_number: Option<String>,
    pub height: Option<i32>,
    pub preferred_foot: Option<String>,
    pub user_count: Option<i32>,
    pub deceased: bool,
    pub gender: Option<String>,
    pub country_alpha2: Option<String>,
    pub country_alpha3: Option<String>,
    pub country_name: Option<String>,
    pub country_slug: Option<String>,
    pub shirt_number: Option<i32>,
    pub date_of_birth_timestamp: Option<chrono::NaiveDateTime>,
    pub contract_until_timestamp: Option<chrono::NaiveDateTime>,
    pub proposed_market_value_raw: Option<i64>,
    pub proposed_market_value_currency: Option<String>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

#[derive(Debug, Clone, Insertable, AsChangeset, PartialEq)]
#[diesel(
    table_name = crate::models::schema::sofascore_player_statistics,
    primary_key(player_id, team_id, unique_tournament_id, year),
    treat_none_as_null = true
)]
pub struct PlayerStatistics {
    pub player_id: i32,
    pub team_id: i32,
    pub unique_tournament_id: i32,
    pub year: String,
    pub accurate_crosses: Option<i32>,
    pub accurate_crosses_percentage: Option<f64>,
    pub accurate_long_balls: Option<i32>,
    pub accurate_long_balls_percentage: Option<f64>,
    pub accurate_passes: Option<i32>,
    pub accurate_passes_percentage: Option<f64>,
    pub aerial_duels_won: Option<i32>,
    pub assists: Option<i32>,
    pub big_chances_created: Option<i32>,
    pub big_chances_missed: Option<i32>,
    pub blocked_shots: Option<i32>,
    pub clean_sheet: Option<i32>,
    pub dribbled_past: Option<i32>,
    pub error_lead_to_goal: Option<i32>,
    pub expected_assists: Option<f64>,
    pub expected_goals: Option<f64>,
    pub goals: Option<i32>,
    pub goals_assists_sum: Option<i32>,
    pub goals_conceded: Option<i32>,
    pub interceptions: Option<i32>,
    pub key_passes: Option<i32>,
    pub minutes_played: Option<i32>,
    pub pass_to_assist: Option<i32>,
    pub rating: Option<f64>,
    pub red_cards: Option<i32>,
    pub saves: Option<i32>,
    pub shots_on_target: Option<i32>,
    pub successful_dribbles: Option<i32>,
    pub tackles: Option<i32>,
    pub total_shots: Option<i32>,
    pub yellow_cards: Option<i32>,
    pub total_rating: Option<f64>,
    pub count_rating: Option<i32>,
    pub total_long_balls: Option<i32>,
    pub total_cross: Option<i32>,
    pub total_passes: Option<i32>,
    pub shots_from_inside_the_box: Option<i32>,
    pub appearances: Option<i32>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

impl PlayerStatistics {
    pub fn key(&self) -> (i32, i32, i32, String) {
        (
            self.player_id,
            self.team_id,
            self.unique_tournament_id,
            self.year.clone(),
        )
    }
}
