use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

use crate::handlers::{require_admin, require_auth};
use crate::models::*;
use crate::services::EventService;

#[utoipa::path(
    get,
    path = "/events",
    tag = "events",
    params(
        ("club" = Option<i64>, Query, description = "Filter by club id"),
        ("date_from" = Option<String>, Query, description = "Events on or after (RFC 3339)"),
        ("date_to" = Option<String>, Query, description = "Events on or before (RFC 3339)"),
        ("search" = Option<String>, Query, description = "Substring match on title or description"),
        ("is_active" = Option<bool>, Query, description = "Active filter, defaults to true")
    ),
    responses(
        (status = 200, description = "List of events", body = Vec<EventResponse>)
    )
)]
pub async fn list_events(
    event_service: web::Data<EventService>,
    query: web::Query<EventQuery>,
) -> Result<HttpResponse> {
    match event_service.list(&query).await {
        Ok(events) => {
            let count = events.len();
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "data": {
                    "events": events,
                    "count": count
                }
            })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = "events",
    params(
        ("id" = i64, Path, description = "Event id")
    ),
    responses(
        (status = 200, description = "Event with attendees, ratings and comments", body = EventResponse),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_event(
    event_service: web::Data<EventService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match event_service.get(path.into_inner()).await {
        Ok(event) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": event
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/events",
    tag = "events",
    request_body = CreateEventRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Event created", body = EventResponse),
        (status = 400, description = "Invalid title, description or capacity"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a member of the club"),
        (status = 404, description = "Club not found")
    )
)]
pub async fn create_event(
    event_service: web::Data<EventService>,
    req: HttpRequest,
    request: web::Json<CreateEventRequest>,
) -> Result<HttpResponse> {
    let auth = match require_auth(&req) {
        Ok(auth) => auth,
        Err(e) => return Ok(e.error_response()),
    };

    match event_service.create(request.into_inner(), auth).await {
        Ok(event) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": event
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/events/{id}",
    tag = "events",
    params(
        ("id" = i64, Path, description = "Event id")
    ),
    request_body = UpdateEventRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Event updated", body = EventResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a club member or admin"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn update_event(
    event_service: web::Data<EventService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateEventRequest>,
) -> Result<HttpResponse> {
    let auth = match require_auth(&req) {
        Ok(auth) => auth,
        Err(e) => return Ok(e.error_response()),
    };

    match event_service
        .update(path.into_inner(), request.into_inner(), auth)
        .await
    {
        Ok(event) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": event
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/events/{id}",
    tag = "events",
    params(
        ("id" = i64, Path, description = "Event id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Event and its attendance, ratings and comments deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn delete_event(
    event_service: web::Data<EventService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match event_service.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": {
                "message": "Event deleted successfully"
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/events/{id}/join",
    tag = "events",
    params(
        ("id" = i64, Path, description = "Event id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Joined the event", body = EventResponse),
        (status = 400, description = "Event inactive or at full capacity"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found"),
        (status = 409, description = "Already attending")
    )
)]
pub async fn join_event(
    event_service: web::Data<EventService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let auth = match require_auth(&req) {
        Ok(auth) => auth,
        Err(e) => return Ok(e.error_response()),
    };

    match event_service.join(path.into_inner(), auth.id).await {
        Ok(event) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": event
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/events/{id}/leave",
    tag = "events",
    params(
        ("id" = i64, Path, description = "Event id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Left the event", body = EventResponse),
        (status = 400, description = "Not attending this event"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn leave_event(
    event_service: web::Data<EventService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let auth = match require_auth(&req) {
        Ok(auth) => auth,
        Err(e) => return Ok(e.error_response()),
    };

    match event_service.leave(path.into_inner(), auth.id).await {
        Ok(event) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": event
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/events/{id}/comments",
    tag = "events",
    params(
        ("id" = i64, Path, description = "Event id")
    ),
    request_body = AddCommentRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Comment added", body = CommentResponse),
        (status = 400, description = "Empty or oversized comment"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn add_comment(
    event_service: web::Data<EventService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<AddCommentRequest>,
) -> Result<HttpResponse> {
    let auth = match require_auth(&req) {
        Ok(auth) => auth,
        Err(e) => return Ok(e.error_response()),
    };

    match event_service
        .add_comment(path.into_inner(), auth.id, request.into_inner())
        .await
    {
        Ok(comment) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": comment
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/events/{id}/rate",
    tag = "events",
    params(
        ("id" = i64, Path, description = "Event id")
    ),
    request_body = RateEventRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Rating recorded, latest submission wins", body = RateEventResponse),
        (status = 400, description = "Rating outside 1-5"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn rate_event(
    event_service: web::Data<EventService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<RateEventRequest>,
) -> Result<HttpResponse> {
    let auth = match require_auth(&req) {
        Ok(auth) => auth,
        Err(e) => return Ok(e.error_response()),
    };

    match event_service
        .rate(path.into_inner(), auth.id, request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn event_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/events")
            .route("", web::get().to(list_events))
            .route("", web::post().to(create_event))
            .route("/{id}", web::get().to(get_event))
            .route("/{id}", web::put().to(update_event))
            .route("/{id}", web::delete().to(delete_event))
            .route("/{id}/join", web::post().to(join_event))
            .route("/{id}/leave", web::post().to(leave_event))
            .route("/{id}/comments", web::post().to(add_comment))
            .route("/{id}/rate", web::put().to(rate_event)),
    );
}
