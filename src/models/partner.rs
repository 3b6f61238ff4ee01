use crate::entities::partner_entity as partners;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum PartnerType {
    #[sea_orm(string_value = "sponsor")]
    Sponsor,
    #[sea_orm(string_value = "vendor")]
    Vendor,
    #[sea_orm(string_value = "school")]
    School,
    #[sea_orm(string_value = "community")]
    Community,
}

#[derive(Debug, Deserialize)]
pub struct PartnerQuery {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub partner_type: Option<PartnerType>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePartnerRequest {
    #[schema(example = "Tech Corp")]
    pub name: String,
    #[serde(rename = "type")]
    pub partner_type: Option<PartnerType>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PartnerResponse {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub partner_type: PartnerType,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub description: Option<String>,
}

impl From<partners::Model> for PartnerResponse {
    fn from(p: partners::Model) -> Self {
        Self {
            id: p.id,
            name: p.name,
            partner_type: p.partner_type,
            contact_email: p.contact_email,
            contact_phone: p.contact_phone,
            description: p.description,
        }
    }
}
