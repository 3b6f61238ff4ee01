use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

use crate::handlers::{require_admin, require_auth};
use crate::models::*;
use crate::services::AchievementService;

#[utoipa::path(
    get,
    path = "/achievements",
    tag = "achievements",
    responses(
        (status = 200, description = "Achievement catalog sorted by points", body = Vec<AchievementResponse>)
    )
)]
pub async fn list_achievements(
    achievement_service: web::Data<AchievementService>,
) -> Result<HttpResponse> {
    match achievement_service.list_catalog().await {
        Ok(achievements) => {
            let count = achievements.len();
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "data": {
                    "achievements": achievements,
                    "count": count
                }
            })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/achievements/stats",
    tag = "achievements",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Points, level and earned achievements for the caller", body = GamificationStats),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn gamification_stats(
    achievement_service: web::Data<AchievementService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let auth = match require_auth(&req) {
        Ok(auth) => auth,
        Err(e) => return Ok(e.error_response()),
    };

    match achievement_service.gamification_stats(auth.id).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": stats
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/achievements/award",
    tag = "achievements",
    request_body = AwardAchievementRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Achievement awarded", body = AwardAchievementResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Achievement or user not found"),
        (status = 409, description = "User already has this achievement")
    )
)]
pub async fn award_achievement(
    achievement_service: web::Data<AchievementService>,
    req: HttpRequest,
    request: web::Json<AwardAchievementRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match achievement_service.award_manual(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn achievement_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/achievements")
            .route("", web::get().to(list_achievements))
            .route("/stats", web::get().to(gamification_stats))
            .route("/award", web::post().to(award_achievement)),
    );
}
