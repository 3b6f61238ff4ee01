pub mod achievement;
pub mod auth;
pub mod club;
pub mod college;
pub mod dashboard;
pub mod event;
pub mod partner;
pub mod user;

pub use achievement::achievement_config;
pub use auth::auth_config;
pub use club::club_config;
pub use college::college_config;
pub use dashboard::dashboard_config;
pub use event::event_config;
pub use partner::partner_config;
pub use user::user_config;

use crate::error::AppError;
use crate::middlewares::AuthUser;
use actix_web::{HttpMessage, HttpRequest};

/// Identity placed into request extensions by the auth middleware.
/// Missing on public routes hit without a token.
pub(crate) fn require_auth(req: &HttpRequest) -> Result<AuthUser, AppError> {
    req.extensions()
        .get::<AuthUser>()
        .copied()
        .ok_or_else(|| AppError::AuthError("Authentication required".to_string()))
}

pub(crate) fn require_admin(req: &HttpRequest) -> Result<AuthUser, AppError> {
    let auth = require_auth(req)?;
    if !auth.is_admin() {
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }
    Ok(auth)
}
