use crate::entities::achievement_entity as achievements;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AchievementResponse {
    pub id: i64,
    pub key: String,
    pub title: String,
    pub description: Option<String>,
    pub points: i64,
}

impl From<achievements::Model> for AchievementResponse {
    fn from(a: achievements::Model) -> Self {
        Self {
            id: a.id,
            key: a.key,
            title: a.title,
            description: a.description,
            points: a.points,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AwardAchievementRequest {
    pub achievement_id: i64,
    pub user_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AwardAchievementResponse {
    pub user: crate::models::user::UserResponse,
    pub awarded_achievement: AchievementResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GamificationStats {
    pub points: i64,
    pub level: i64,
    pub next_level_points: i64,
    pub progress_to_next: f64,
    pub achievements: Vec<AchievementResponse>,
    pub total_achievements: usize,
}
