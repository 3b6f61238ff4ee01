use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

use crate::handlers::require_admin;
use crate::models::*;
use crate::services::PartnerService;

#[utoipa::path(
    get,
    path = "/partners",
    tag = "partners",
    params(
        ("name" = Option<String>, Query, description = "Substring match on name"),
        ("type" = Option<String>, Query, description = "Partner type: sponsor, vendor, school or community")
    ),
    responses(
        (status = 200, description = "List of partners", body = Vec<PartnerResponse>)
    )
)]
pub async fn list_partners(
    partner_service: web::Data<PartnerService>,
    query: web::Query<PartnerQuery>,
) -> Result<HttpResponse> {
    match partner_service.list(&query).await {
        Ok(partners) => {
            let count = partners.len();
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "data": {
                    "partners": partners,
                    "count": count
                }
            })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/partners",
    tag = "partners",
    request_body = CreatePartnerRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Partner created", body = PartnerResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 409, description = "Partner name already exists")
    )
)]
pub async fn create_partner(
    partner_service: web::Data<PartnerService>,
    req: HttpRequest,
    request: web::Json<CreatePartnerRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match partner_service.create(request.into_inner()).await {
        Ok(partner) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": partner
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn partner_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/partners")
            .route("", web::get().to(list_partners))
            .route("", web::post().to(create_partner)),
    );
}
