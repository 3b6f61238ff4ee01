use crate::entities::{
    achievement_entity as achievements, club_entity as clubs, club_member_entity as club_members,
    event_attendee_entity as event_attendees, event_entity as events,
    user_achievement_entity as user_achievements, user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{validate_email, validate_name};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QuerySelect, Set,
};

#[derive(Clone)]
pub struct UserService {
    pool: DatabaseConnection,
}

impl UserService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Profile with achievements, joined clubs and attending events populated.
    pub async fn get_profile(&self, user_id: i64) -> AppResult<UserProfileResponse> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let achievement_ids: Vec<i64> = user_achievements::Entity::find()
            .filter(user_achievements::Column::UserId.eq(user_id))
            .select_only()
            .column(user_achievements::Column::AchievementId)
            .into_tuple()
            .all(&self.pool)
            .await?;

        let achievements = if achievement_ids.is_empty() {
            vec![]
        } else {
            achievements::Entity::find()
                .filter(achievements::Column::Id.is_in(achievement_ids))
                .all(&self.pool)
                .await?
                .into_iter()
                .map(AchievementResponse::from)
                .collect()
        };

        let club_ids: Vec<i64> = club_members::Entity::find()
            .filter(club_members::Column::UserId.eq(user_id))
            .select_only()
            .column(club_members::Column::ClubId)
            .into_tuple()
            .all(&self.pool)
            .await?;

        let joined_clubs = if club_ids.is_empty() {
            vec![]
        } else {
            clubs::Entity::find()
                .filter(clubs::Column::Id.is_in(club_ids))
                .all(&self.pool)
                .await?
                .into_iter()
                .map(ClubSummary::from)
                .collect()
        };

        let event_ids: Vec<i64> = event_attendees::Entity::find()
            .filter(event_attendees::Column::UserId.eq(user_id))
            .select_only()
            .column(event_attendees::Column::EventId)
            .into_tuple()
            .all(&self.pool)
            .await?;

        let attending_events = if event_ids.is_empty() {
            vec![]
        } else {
            events::Entity::find()
                .filter(events::Column::Id.is_in(event_ids))
                .all(&self.pool)
                .await?
                .into_iter()
                .map(EventSummary::from)
                .collect()
        };

        Ok(UserProfileResponse {
            user: UserResponse::from(user),
            achievements,
            joined_clubs,
            attending_events,
        })
    }

    pub async fn update_profile(
        &self,
        user_id: i64,
        request: UpdateProfileRequest,
    ) -> AppResult<UserProfileResponse> {
        if request.name.is_none() && request.email.is_none() {
            return Err(AppError::ValidationError("No fields to update".to_string()));
        }

        if let Some(name) = &request.name {
            validate_name(name)?;
        }

        let email = match &request.email {
            Some(email) => {
                validate_email(email)?;
                let email = email.trim().to_lowercase();

                let taken = users::Entity::find()
                    .filter(users::Column::Email.eq(email.clone()))
                    .filter(users::Column::Id.ne(user_id))
                    .one(&self.pool)
                    .await?;

                if taken.is_some() {
                    return Err(AppError::Conflict("Email already in use".to_string()));
                }
                Some(email)
            }
            None => None,
        };

        let mut model = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?
            .into_active_model();

        if let Some(name) = &request.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(email) = email {
            model.email = Set(email);
        }
        model.update(&self.pool).await?;

        self.get_profile(user_id).await
    }
}
