use crate::entities::{
    club_entity as clubs, college_entity as colleges, college_partner_entity as college_partners,
    partner_entity as partners,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect, Set,
};

#[derive(Clone)]
pub struct CollegeService {
    pool: DatabaseConnection,
}

impl CollegeService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list(&self, query: &CollegeQuery) -> AppResult<Vec<CollegeResponse>> {
        let mut find = colleges::Entity::find();

        if let Some(name) = &query.name {
            find = find.filter(colleges::Column::Name.contains(name));
        }
        if let Some(location) = &query.location {
            find = find.filter(colleges::Column::Location.contains(location));
        }

        let models = find.all(&self.pool).await?;

        let mut responses = Vec::with_capacity(models.len());
        for college in models {
            responses.push(self.build_response(college).await?);
        }
        Ok(responses)
    }

    pub async fn create(&self, request: CreateCollegeRequest) -> AppResult<CollegeResponse> {
        let duplicate = colleges::Entity::find()
            .filter(colleges::Column::Name.eq(request.name.clone()))
            .count(&self.pool)
            .await?
            > 0;

        if duplicate {
            return Err(AppError::Conflict(
                "College name already exists".to_string(),
            ));
        }

        let college = colleges::ActiveModel {
            name: Set(request.name),
            location: Set(request.location),
            description: Set(request.description),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        self.build_response(college).await
    }

    async fn build_response(&self, college: colleges::Model) -> AppResult<CollegeResponse> {
        let clubs = clubs::Entity::find()
            .filter(clubs::Column::CollegeId.eq(college.id))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(ClubSummary::from)
            .collect();

        let partner_ids: Vec<i64> = college_partners::Entity::find()
            .filter(college_partners::Column::CollegeId.eq(college.id))
            .select_only()
            .column(college_partners::Column::PartnerId)
            .into_tuple()
            .all(&self.pool)
            .await?;

        let partners = if partner_ids.is_empty() {
            vec![]
        } else {
            partners::Entity::find()
                .filter(partners::Column::Id.is_in(partner_ids))
                .all(&self.pool)
                .await?
                .into_iter()
                .map(PartnerResponse::from)
                .collect()
        };

        Ok(CollegeResponse {
            id: college.id,
            name: college.name,
            location: college.location,
            description: college.description,
            clubs,
            partners,
            created_at: college.created_at,
        })
    }
}
