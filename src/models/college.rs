use crate::entities::college_entity as colleges;
use crate::models::club::ClubSummary;
use crate::models::partner::PartnerResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize)]
pub struct CollegeQuery {
    pub name: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCollegeRequest {
    #[schema(example = "State University")]
    pub name: String,
    #[schema(example = "Springfield, IL")]
    pub location: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CollegeSummary {
    pub id: i64,
    pub name: String,
    pub location: String,
}

impl From<colleges::Model> for CollegeSummary {
    fn from(college: colleges::Model) -> Self {
        Self {
            id: college.id,
            name: college.name,
            location: college.location,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CollegeResponse {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub clubs: Vec<ClubSummary>,
    pub partners: Vec<PartnerResponse>,
    pub created_at: Option<DateTime<Utc>>,
}
