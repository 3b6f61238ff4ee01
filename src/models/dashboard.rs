use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Point-in-time engagement snapshot. Recomputed from the source tables on
/// every request; nothing here is cached or persisted.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    pub total_users: u64,
    pub active_users: u64,
    pub total_events: u64,
    pub total_clubs: u64,
    pub total_colleges: u64,
    pub total_partners: u64,
    pub events_this_week: u64,
    pub upcoming_events: u64,
    pub partner_universities: u64,
    pub engagement_rate: f64,
    pub average_attendance: f64,
    pub monthly_attendance_trend: Vec<u64>,
    pub generated_at: DateTime<Utc>,
}
