pub mod achievement_service;
pub mod auth_service;
pub mod club_service;
pub mod college_service;
pub mod dashboard_service;
pub mod event_service;
pub mod partner_service;
pub mod user_service;

pub use achievement_service::{AchievementAction, AchievementService};
pub use auth_service::AuthService;
pub use club_service::ClubService;
pub use college_service::CollegeService;
pub use dashboard_service::DashboardService;
pub use event_service::EventService;
pub use partner_service::PartnerService;
pub use user_service::UserService;
