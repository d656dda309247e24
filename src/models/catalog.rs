use diesel::{AsChangeset, Insertable, Queryable};

#[derive(Debug, Clone, Insertable, AsChangeset, PartialEq)]
#[diesel(table_name = crate::models::schema::sofascore_categories, treat_none_as_null = true)]
pub struct Category {
    pub id: i32,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

#[derive(Debug, Clone, Insertable, AsChangeset, PartialEq)]
#[diesel(table_name = crate::models::schema::sofascore_tournaments, treat_none_as_null = true)]
pub struct Tournament {
    pub id: i32,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub category_id: Option<i32>,
    pub unique_tournament_id: Option<i32>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

#[derive(Debug, Clone, Insertable, AsChangeset, PartialEq)]
#[diesel(table_name = crate::models::schema::sofascore_seasons, treat_none_as_null = true)]
pub struct Season {
    pub id: i32,
    pub name: Option<String>,
    pub year: Option<String>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

#[derive(Debug, Clone, Queryable, PartialEq)]
#[diesel(table_name = crate::models::schema::sofascore_tournament_season)]
pub struct TournamentSeason {
    pub sofascore_tournament_id: i32,
    pub sofascore_season_id: i32,
    pub is_fetched: bool,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

/// Link row as written by the season stage. `is_fetched` is owned by the statistics stage
/// and is absent here, so re-linking never resets it.
#[derive(Debug, Clone, Insertable, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[diesel(table_name = crate::models::schema::sofascore_tournament_season)]
pub struct NewTournamentSeason {
    pub sofascore_tournament_id: i32,
    pub sofascore_season_id: i32,
}
