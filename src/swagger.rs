use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::auth::logout,
        handlers::user::get_profile,
        handlers::user::update_profile,
        handlers::user::get_user,
        handlers::event::list_events,
        handlers::event::get_event,
        handlers::event::create_event,
        handlers::event::update_event,
        handlers::event::delete_event,
        handlers::event::join_event,
        handlers::event::leave_event,
        handlers::event::add_comment,
        handlers::event::rate_event,
        handlers::club::list_clubs,
        handlers::club::get_club,
        handlers::club::create_club,
        handlers::club::update_club,
        handlers::club::join_club,
        handlers::club::leave_club,
        handlers::college::list_colleges,
        handlers::college::create_college,
        handlers::partner::list_partners,
        handlers::partner::create_partner,
        handlers::achievement::list_achievements,
        handlers::achievement::gamification_stats,
        handlers::achievement::award_achievement,
        handlers::dashboard::dashboard_stats,
    ),
    components(
        schemas(
            UserRole,
            RegisterRequest,
            LoginRequest,
            RefreshTokenRequest,
            UpdateProfileRequest,
            UserResponse,
            UserSummary,
            UserProfileResponse,
            AuthResponse,
            AchievementResponse,
            AwardAchievementRequest,
            AwardAchievementResponse,
            GamificationStats,
            CreateClubRequest,
            UpdateClubRequest,
            ClubSummary,
            ClubResponse,
            CreateCollegeRequest,
            CollegeSummary,
            CollegeResponse,
            PartnerType,
            CreatePartnerRequest,
            PartnerResponse,
            CreateEventRequest,
            UpdateEventRequest,
            AddCommentRequest,
            CommentResponse,
            RateEventRequest,
            RateEventResponse,
            EventSummary,
            EventResponse,
            DashboardStats,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication API"),
        (name = "users", description = "User profile API"),
        (name = "events", description = "Event management API"),
        (name = "clubs", description = "Club management API"),
        (name = "colleges", description = "College management API"),
        (name = "partners", description = "Partner management API"),
        (name = "achievements", description = "Gamification API"),
        (name = "dashboard", description = "Statistics dashboard API"),
    ),
    info(
        title = "CampusHub Backend API",
        version = "1.0.0",
        description = "College event management REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
