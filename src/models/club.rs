use diesel::{Insertable, Queryable};
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Queryable, PartialEq)]
#[diesel(table_name = crate::models::schema::sofascore_club_scrap)]
pub struct Club {
    pub id: i32,
    pub league_id: i32,
    pub club_name: Option<String>,
    pub club_link: Option<String>,
    pub club_slug: Option<String>,
    pub club_identifier: i32,
    pub is_fetched: bool,
    #[serde(rename = "createdAt")]
    pub created_at: Option<chrono::NaiveDateTime>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<chrono::NaiveDateTime>,
}

/// A crawl source, either a configured seed or a team discovered through a fixture.
#[derive(Debug, Clone, Insertable, PartialEq)]
#[diesel(table_name = crate::models::schema::sofascore_club_scrap)]
pub struct NewClub {
    pub league_id: i32,
    pub club_name: Option<String>,
    pub club_link: Option<String>,
    pub club_slug: Option<String>,
    pub club_identifier: i32,
}

impl NewClub {
    pub fn seed(club_identifier: i32, league_id: i32) -> Self {
        NewClub {
            league_id,
            club_name: None,
            club_link: None,
            club_slug: None,
            club_identifier,
        }
    }
}
