use crate::entities::{event_comment_entity as event_comments, event_entity as events};
use crate::models::club::ClubSummary;
use crate::models::user::UserSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize)]
pub struct EventQuery {
    pub club: Option<i64>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateEventRequest {
    #[schema(example = "Hackathon Kickoff")]
    pub title: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    #[schema(example = "Main Auditorium")]
    pub venue: String,
    pub club_id: i64,
    #[schema(example = 100)]
    pub capacity: i64,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub venue: Option<String>,
    pub capacity: Option<i64>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddCommentRequest {
    #[schema(example = "Looking forward to this!")]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentResponse {
    pub id: i64,
    pub author: String,
    pub text: String,
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<event_comments::Model> for CommentResponse {
    fn from(c: event_comments::Model) -> Self {
        Self {
            id: c.id,
            author: c.author,
            text: c.text,
            timestamp: c.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RateEventRequest {
    #[schema(example = 5)]
    pub rating: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RateEventResponse {
    pub rating: i32,
    pub average_rating: f64,
}

/// Short form used when embedding events in club/profile responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EventSummary {
    pub id: i64,
    pub title: String,
    pub date: DateTime<Utc>,
    pub venue: String,
}

impl From<events::Model> for EventSummary {
    fn from(event: events::Model) -> Self {
        Self {
            id: event.id,
            title: event.title,
            date: event.date,
            venue: event.venue,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EventResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub venue: String,
    pub capacity: i64,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub club: Option<ClubSummary>,
    pub attendees: Vec<UserSummary>,
    pub attendee_count: usize,
    pub average_rating: Option<f64>,
    pub comments: Vec<CommentResponse>,
    pub created_at: Option<DateTime<Utc>>,
}
