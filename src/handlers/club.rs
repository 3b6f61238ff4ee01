use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

use crate::handlers::{require_admin, require_auth};
use crate::models::*;
use crate::services::ClubService;

#[utoipa::path(
    get,
    path = "/clubs",
    tag = "clubs",
    params(
        ("college" = Option<i64>, Query, description = "Filter by college id"),
        ("name" = Option<String>, Query, description = "Substring match on name")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "List of clubs", body = Vec<ClubResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_clubs(
    club_service: web::Data<ClubService>,
    query: web::Query<ClubQuery>,
) -> Result<HttpResponse> {
    match club_service.list(&query).await {
        Ok(clubs) => {
            let count = clubs.len();
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "data": {
                    "clubs": clubs,
                    "count": count
                }
            })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/clubs/{id}",
    tag = "clubs",
    params(
        ("id" = i64, Path, description = "Club id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Club with members and events", body = ClubResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Club not found")
    )
)]
pub async fn get_club(
    club_service: web::Data<ClubService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match club_service.get(path.into_inner()).await {
        Ok(club) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": club
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/clubs",
    tag = "clubs",
    request_body = CreateClubRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Club created", body = ClubResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "College not found"),
        (status = 409, description = "Club name already exists for this college")
    )
)]
pub async fn create_club(
    club_service: web::Data<ClubService>,
    req: HttpRequest,
    request: web::Json<CreateClubRequest>,
) -> Result<HttpResponse> {
    let auth = match require_admin(&req) {
        Ok(auth) => auth,
        Err(e) => return Ok(e.error_response()),
    };

    match club_service.create(request.into_inner(), auth.id).await {
        Ok(club) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": club
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/clubs/{id}",
    tag = "clubs",
    params(
        ("id" = i64, Path, description = "Club id")
    ),
    request_body = UpdateClubRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Club updated", body = ClubResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Club not found")
    )
)]
pub async fn update_club(
    club_service: web::Data<ClubService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateClubRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match club_service
        .update(path.into_inner(), request.into_inner())
        .await
    {
        Ok(club) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": club
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/clubs/{id}/join",
    tag = "clubs",
    params(
        ("id" = i64, Path, description = "Club id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Joined the club", body = ClubResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Club not found"),
        (status = 409, description = "Already a member")
    )
)]
pub async fn join_club(
    club_service: web::Data<ClubService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let auth = match require_auth(&req) {
        Ok(auth) => auth,
        Err(e) => return Ok(e.error_response()),
    };

    match club_service.join(path.into_inner(), auth.id).await {
        Ok(club) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": club
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/clubs/{id}/leave",
    tag = "clubs",
    params(
        ("id" = i64, Path, description = "Club id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Left the club", body = ClubResponse),
        (status = 400, description = "Not a member of this club"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Club not found")
    )
)]
pub async fn leave_club(
    club_service: web::Data<ClubService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let auth = match require_auth(&req) {
        Ok(auth) => auth,
        Err(e) => return Ok(e.error_response()),
    };

    match club_service.leave(path.into_inner(), auth.id).await {
        Ok(club) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": club
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn club_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/clubs")
            .route("", web::get().to(list_clubs))
            .route("", web::post().to(create_club))
            .route("/{id}", web::get().to(get_club))
            .route("/{id}", web::put().to(update_club))
            .route("/{id}/join", web::post().to(join_club))
            .route("/{id}/leave", web::post().to(leave_club)),
    );
}
