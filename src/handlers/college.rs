use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

use crate::handlers::require_admin;
use crate::models::*;
use crate::services::CollegeService;

#[utoipa::path(
    get,
    path = "/colleges",
    tag = "colleges",
    params(
        ("name" = Option<String>, Query, description = "Substring match on name"),
        ("location" = Option<String>, Query, description = "Substring match on location")
    ),
    responses(
        (status = 200, description = "List of colleges", body = Vec<CollegeResponse>)
    )
)]
pub async fn list_colleges(
    college_service: web::Data<CollegeService>,
    query: web::Query<CollegeQuery>,
) -> Result<HttpResponse> {
    match college_service.list(&query).await {
        Ok(colleges) => {
            let count = colleges.len();
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "data": {
                    "colleges": colleges,
                    "count": count
                }
            })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/colleges",
    tag = "colleges",
    request_body = CreateCollegeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "College created", body = CollegeResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 409, description = "College name already exists")
    )
)]
pub async fn create_college(
    college_service: web::Data<CollegeService>,
    req: HttpRequest,
    request: web::Json<CreateCollegeRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match college_service.create(request.into_inner()).await {
        Ok(college) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": college
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn college_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/colleges")
            .route("", web::get().to(list_colleges))
            .route("", web::post().to(create_college)),
    );
}
