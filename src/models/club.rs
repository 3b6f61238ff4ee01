use crate::entities::club_entity as clubs;
use crate::models::college::CollegeSummary;
use crate::models::event::EventSummary;
use crate::models::user::UserSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize)]
pub struct ClubQuery {
    pub college: Option<i64>,
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateClubRequest {
    #[schema(example = "Computer Science Club")]
    pub name: String,
    pub description: Option<String>,
    pub college_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateClubRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClubSummary {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<clubs::Model> for ClubSummary {
    fn from(club: clubs::Model) -> Self {
        Self {
            id: club.id,
            name: club.name,
            description: club.description,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClubResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub college: Option<CollegeSummary>,
    pub members: Vec<UserSummary>,
    pub events: Vec<EventSummary>,
    pub created_at: Option<DateTime<Utc>>,
}
