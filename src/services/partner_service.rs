use crate::entities::partner_entity as partners;
use crate::error::{AppError, AppResult};
use crate::models::*;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

#[derive(Clone)]
pub struct PartnerService {
    pool: DatabaseConnection,
}

impl PartnerService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list(&self, query: &PartnerQuery) -> AppResult<Vec<PartnerResponse>> {
        let mut find = partners::Entity::find();

        if let Some(name) = &query.name {
            find = find.filter(partners::Column::Name.contains(name));
        }
        if let Some(partner_type) = query.partner_type {
            find = find.filter(partners::Column::PartnerType.eq(partner_type));
        }

        let models = find.all(&self.pool).await?;
        Ok(models.into_iter().map(PartnerResponse::from).collect())
    }

    pub async fn create(&self, request: CreatePartnerRequest) -> AppResult<PartnerResponse> {
        let duplicate = partners::Entity::find()
            .filter(partners::Column::Name.eq(request.name.clone()))
            .count(&self.pool)
            .await?
            > 0;

        if duplicate {
            return Err(AppError::Conflict(
                "Partner name already exists".to_string(),
            ));
        }

        let partner = partners::ActiveModel {
            name: Set(request.name),
            partner_type: Set(request.partner_type.unwrap_or(PartnerType::Sponsor)),
            contact_email: Set(request.contact_email),
            contact_phone: Set(request.contact_phone),
            description: Set(request.description),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(PartnerResponse::from(partner))
    }
}
