pub mod achievements;
pub mod club_members;
pub mod clubs;
pub mod college_partners;
pub mod colleges;
pub mod event_attendees;
pub mod event_comments;
pub mod event_ratings;
pub mod events;
pub mod partners;
pub mod user_achievements;
pub mod users;

pub use achievements as achievement_entity;
pub use club_members as club_member_entity;
pub use clubs as club_entity;
pub use college_partners as college_partner_entity;
pub use colleges as college_entity;
pub use event_attendees as event_attendee_entity;
pub use event_comments as event_comment_entity;
pub use event_ratings as event_rating_entity;
pub use events as event_entity;
pub use partners as partner_entity;
pub use user_achievements as user_achievement_entity;
pub use users as user_entity;
