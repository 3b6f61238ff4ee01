use crate::entities::{
    club_entity as clubs, club_member_entity as club_members, college_entity as colleges,
    event_entity as events, user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::{AchievementAction, AchievementService};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DeleteResult, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QuerySelect, Set,
};

#[derive(Clone)]
pub struct ClubService {
    pool: DatabaseConnection,
    achievement_service: AchievementService,
}

impl ClubService {
    pub fn new(pool: DatabaseConnection, achievement_service: AchievementService) -> Self {
        Self {
            pool,
            achievement_service,
        }
    }

    pub async fn list(&self, query: &ClubQuery) -> AppResult<Vec<ClubResponse>> {
        let mut find = clubs::Entity::find();

        if let Some(college_id) = query.college {
            find = find.filter(clubs::Column::CollegeId.eq(college_id));
        }
        if let Some(name) = &query.name {
            find = find.filter(clubs::Column::Name.contains(name));
        }

        let models = find.all(&self.pool).await?;

        let mut responses = Vec::with_capacity(models.len());
        for club in models {
            responses.push(self.build_response(club).await?);
        }
        Ok(responses)
    }

    pub async fn get(&self, club_id: i64) -> AppResult<ClubResponse> {
        let club = clubs::Entity::find_by_id(club_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Club not found".to_string()))?;

        self.build_response(club).await
    }

    pub async fn create(
        &self,
        request: CreateClubRequest,
        creator_id: i64,
    ) -> AppResult<ClubResponse> {
        let college = colleges::Entity::find_by_id(request.college_id)
            .one(&self.pool)
            .await?;
        if college.is_none() {
            return Err(AppError::NotFound("College not found".to_string()));
        }

        let duplicate = clubs::Entity::find()
            .filter(clubs::Column::Name.eq(request.name.clone()))
            .filter(clubs::Column::CollegeId.eq(request.college_id))
            .count(&self.pool)
            .await?
            > 0;

        if duplicate {
            return Err(AppError::Conflict(
                "Club name already exists for this college".to_string(),
            ));
        }

        let club = clubs::ActiveModel {
            name: Set(request.name),
            description: Set(request.description),
            college_id: Set(request.college_id),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        self.achievement_service
            .check_on_action(creator_id, AchievementAction::CreateClub)
            .await?;

        self.build_response(club).await
    }

    pub async fn update(
        &self,
        club_id: i64,
        request: UpdateClubRequest,
    ) -> AppResult<ClubResponse> {
        let mut model = clubs::Entity::find_by_id(club_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Club not found".to_string()))?
            .into_active_model();

        if let Some(name) = request.name {
            model.name = Set(name);
        }
        if let Some(description) = request.description {
            model.description = Set(Some(description));
        }
        let updated = model.update(&self.pool).await?;

        self.build_response(updated).await
    }

    pub async fn join(&self, club_id: i64, user_id: i64) -> AppResult<ClubResponse> {
        let club = clubs::Entity::find_by_id(club_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Club not found".to_string()))?;

        let already_member = self.is_member(club_id, user_id).await?;
        if already_member {
            return Err(AppError::Conflict(
                "Already a member of this club".to_string(),
            ));
        }

        club_members::ActiveModel {
            club_id: Set(club_id),
            user_id: Set(user_id),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        self.achievement_service
            .check_on_action(user_id, AchievementAction::JoinClub)
            .await?;

        self.build_response(club).await
    }

    pub async fn leave(&self, club_id: i64, user_id: i64) -> AppResult<ClubResponse> {
        let club = clubs::Entity::find_by_id(club_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Club not found".to_string()))?;

        let result: DeleteResult = club_members::Entity::delete_many()
            .filter(club_members::Column::ClubId.eq(club_id))
            .filter(club_members::Column::UserId.eq(user_id))
            .exec(&self.pool)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::ValidationError(
                "Not a member of this club".to_string(),
            ));
        }

        self.build_response(club).await
    }

    pub async fn is_member(&self, club_id: i64, user_id: i64) -> AppResult<bool> {
        let count = club_members::Entity::find()
            .filter(club_members::Column::ClubId.eq(club_id))
            .filter(club_members::Column::UserId.eq(user_id))
            .count(&self.pool)
            .await?;
        Ok(count > 0)
    }

    async fn build_response(&self, club: clubs::Model) -> AppResult<ClubResponse> {
        let college = colleges::Entity::find_by_id(club.college_id)
            .one(&self.pool)
            .await?
            .map(CollegeSummary::from);

        let member_ids: Vec<i64> = club_members::Entity::find()
            .filter(club_members::Column::ClubId.eq(club.id))
            .select_only()
            .column(club_members::Column::UserId)
            .into_tuple()
            .all(&self.pool)
            .await?;

        let members = if member_ids.is_empty() {
            vec![]
        } else {
            users::Entity::find()
                .filter(users::Column::Id.is_in(member_ids))
                .all(&self.pool)
                .await?
                .into_iter()
                .map(UserSummary::from)
                .collect()
        };

        let events = events::Entity::find()
            .filter(events::Column::ClubId.eq(club.id))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(EventSummary::from)
            .collect();

        Ok(ClubResponse {
            id: club.id,
            name: club.name,
            description: club.description,
            college,
            members,
            events,
            created_at: club.created_at,
        })
    }
}
