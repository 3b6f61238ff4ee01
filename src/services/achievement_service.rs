use crate::entities::{
    achievement_entity as achievements, club_member_entity as club_members,
    event_attendee_entity as event_attendees, user_achievement_entity as user_achievements,
    user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

/// Action tag fed into the rule engine after the persistence mutation that
/// triggered it has already been committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementAction {
    JoinEvent,
    CreateEvent,
    CreateClub,
    JoinClub,
    AddComment,
    RateEvent,
}

/// Fixed achievement catalog: (key, title, description, points).
/// Seeded by upsert-on-key, so re-seeding never grows the table.
const DEFAULT_CATALOG: &[(&str, &str, &str, i64)] = &[
    ("first_club_join", "Club Member", "Joined your first club", 10),
    (
        "first_event_join",
        "Event Attendee",
        "Attended your first event",
        15,
    ),
    ("event_attendee", "Regular Attendee", "Attended 5 events", 25),
    (
        "event_creator",
        "Event Organizer",
        "Created your first event",
        20,
    ),
    ("club_leader", "Club Leader", "Created your first club", 30),
    ("loyal_member", "Loyal Member", "Earned 100+ points", 50),
];

/// Maps an action tag plus the user's current activity count to the catalog
/// keys that should be attempted. `event_creator` and `club_leader` are
/// attempted on every create; the membership test in `check_and_award`
/// deduplicates, which is observably identical to "first only".
fn keys_for_action(action: AchievementAction, count: u64) -> Vec<&'static str> {
    match action {
        AchievementAction::JoinEvent => match count {
            1 => vec!["first_event_join"],
            5 => vec!["event_attendee"],
            _ => vec![],
        },
        AchievementAction::CreateEvent => vec!["event_creator"],
        AchievementAction::CreateClub => vec!["club_leader"],
        AchievementAction::JoinClub => {
            if count == 1 {
                vec!["first_club_join"]
            } else {
                vec![]
            }
        }
        // no rules attached to these tags
        AchievementAction::AddComment | AchievementAction::RateEvent => vec![],
    }
}

fn level_progress(points: i64) -> (i64, i64, f64) {
    let level = points / 100 + 1;
    let next_level_points = level * 100;
    let progress_to_next = (points % 100) as f64;
    (level, next_level_points, progress_to_next)
}

#[derive(Clone)]
pub struct AchievementService {
    pool: DatabaseConnection,
}

impl AchievementService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Upsert the default catalog by key. Safe to run on every startup.
    pub async fn seed_catalog(&self) -> AppResult<()> {
        for (key, title, description, points) in DEFAULT_CATALOG {
            let existing = achievements::Entity::find()
                .filter(achievements::Column::Key.eq(*key))
                .one(&self.pool)
                .await?;

            match existing {
                Some(model) => {
                    let mut am = model.into_active_model();
                    am.title = Set(title.to_string());
                    am.description = Set(Some(description.to_string()));
                    am.points = Set(*points);
                    am.update(&self.pool).await?;
                }
                None => {
                    achievements::ActiveModel {
                        key: Set(key.to_string()),
                        title: Set(title.to_string()),
                        description: Set(Some(description.to_string())),
                        points: Set(*points),
                        ..Default::default()
                    }
                    .insert(&self.pool)
                    .await?;
                }
            }
        }

        log::info!("Achievement catalog seeded");
        Ok(())
    }

    pub async fn list_catalog(&self) -> AppResult<Vec<AchievementResponse>> {
        let models = achievements::Entity::find()
            .order_by_asc(achievements::Column::Points)
            .order_by_asc(achievements::Column::Key)
            .all(&self.pool)
            .await?;

        Ok(models.into_iter().map(AchievementResponse::from).collect())
    }

    /// Award `key` to the user unless they already hold it. Unknown keys log
    /// a warning and no-op; the caller's action is never rolled back.
    pub async fn check_and_award(
        &self,
        user_id: i64,
        key: &str,
    ) -> AppResult<Option<achievements::Model>> {
        let achievement = achievements::Entity::find()
            .filter(achievements::Column::Key.eq(key))
            .one(&self.pool)
            .await?;

        let Some(achievement) = achievement else {
            log::warn!("Achievement with key '{key}' not found");
            return Ok(None);
        };

        let already_earned = user_achievements::Entity::find()
            .filter(user_achievements::Column::UserId.eq(user_id))
            .filter(user_achievements::Column::AchievementId.eq(achievement.id))
            .count(&self.pool)
            .await?
            > 0;

        if already_earned {
            return Ok(None);
        }

        user_achievements::ActiveModel {
            user_id: Set(user_id),
            achievement_id: Set(achievement.id),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let new_points = user.points + achievement.points;
        let email = user.email.clone();
        let mut am = user.into_active_model();
        am.points = Set(new_points);
        am.update(&self.pool).await?;

        log::info!("User {} earned achievement: {}", email, achievement.title);
        Ok(Some(achievement))
    }

    /// Evaluate the rule table for an action the user just performed.
    /// Returns the achievements that were newly awarded.
    pub async fn check_on_action(
        &self,
        user_id: i64,
        action: AchievementAction,
    ) -> AppResult<Vec<achievements::Model>> {
        let count = match action {
            AchievementAction::JoinEvent => {
                event_attendees::Entity::find()
                    .filter(event_attendees::Column::UserId.eq(user_id))
                    .count(&self.pool)
                    .await?
            }
            AchievementAction::JoinClub => {
                club_members::Entity::find()
                    .filter(club_members::Column::UserId.eq(user_id))
                    .count(&self.pool)
                    .await?
            }
            _ => 0,
        };

        let mut awarded = Vec::new();
        for key in keys_for_action(action, count) {
            if let Some(achievement) = self.check_and_award(user_id, key).await? {
                awarded.push(achievement);
            }
        }

        Ok(awarded)
    }

    /// Admin-only manual award by catalog id. Unlike the rule engine path,
    /// a duplicate here is reported back instead of silently skipped.
    pub async fn award_manual(
        &self,
        request: AwardAchievementRequest,
    ) -> AppResult<AwardAchievementResponse> {
        let achievement = achievements::Entity::find_by_id(request.achievement_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Achievement not found".to_string()))?;

        let user = users::Entity::find_by_id(request.user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let already_earned = user_achievements::Entity::find()
            .filter(user_achievements::Column::UserId.eq(user.id))
            .filter(user_achievements::Column::AchievementId.eq(achievement.id))
            .count(&self.pool)
            .await?
            > 0;

        if already_earned {
            return Err(AppError::Conflict(
                "User already has this achievement".to_string(),
            ));
        }

        user_achievements::ActiveModel {
            user_id: Set(user.id),
            achievement_id: Set(achievement.id),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        let new_points = user.points + achievement.points;
        let mut am = user.into_active_model();
        am.points = Set(new_points);
        let updated = am.update(&self.pool).await?;

        Ok(AwardAchievementResponse {
            user: UserResponse::from(updated),
            awarded_achievement: AchievementResponse::from(achievement),
        })
    }

    pub async fn gamification_stats(&self, user_id: i64) -> AppResult<GamificationStats> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let earned_ids: Vec<i64> = user_achievements::Entity::find()
            .filter(user_achievements::Column::UserId.eq(user_id))
            .select_only()
            .column(user_achievements::Column::AchievementId)
            .into_tuple()
            .all(&self.pool)
            .await?;

        let earned = if earned_ids.is_empty() {
            vec![]
        } else {
            achievements::Entity::find()
                .filter(achievements::Column::Id.is_in(earned_ids))
                .order_by_asc(achievements::Column::Points)
                .all(&self.pool)
                .await?
        };

        let (level, next_level_points, progress_to_next) = level_progress(user.points);
        let achievements: Vec<AchievementResponse> =
            earned.into_iter().map(AchievementResponse::from).collect();
        let total_achievements = achievements.len();

        Ok(GamificationStats {
            points: user.points,
            level,
            next_level_points,
            progress_to_next,
            achievements,
            total_achievements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_table_first_joins() {
        assert_eq!(
            keys_for_action(AchievementAction::JoinEvent, 1),
            vec!["first_event_join"]
        );
        assert_eq!(
            keys_for_action(AchievementAction::JoinEvent, 5),
            vec!["event_attendee"]
        );
        assert!(keys_for_action(AchievementAction::JoinEvent, 2).is_empty());
        assert!(keys_for_action(AchievementAction::JoinEvent, 6).is_empty());

        assert_eq!(
            keys_for_action(AchievementAction::JoinClub, 1),
            vec!["first_club_join"]
        );
        assert!(keys_for_action(AchievementAction::JoinClub, 3).is_empty());
    }

    #[test]
    fn test_rule_table_create_actions_always_attempt() {
        // dedupe happens at award time, not in the rule table
        assert_eq!(
            keys_for_action(AchievementAction::CreateEvent, 0),
            vec!["event_creator"]
        );
        assert_eq!(
            keys_for_action(AchievementAction::CreateEvent, 42),
            vec!["event_creator"]
        );
        assert_eq!(
            keys_for_action(AchievementAction::CreateClub, 0),
            vec!["club_leader"]
        );
    }

    #[test]
    fn test_rule_table_actions_without_rules() {
        assert!(keys_for_action(AchievementAction::AddComment, 1).is_empty());
        assert!(keys_for_action(AchievementAction::RateEvent, 1).is_empty());
    }

    #[test]
    fn test_catalog_keys_are_unique() {
        let mut keys: Vec<&str> = DEFAULT_CATALOG.iter().map(|(k, ..)| *k).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), DEFAULT_CATALOG.len());
    }

    #[test]
    fn test_level_progress() {
        assert_eq!(level_progress(0), (1, 100, 0.0));
        assert_eq!(level_progress(15), (1, 100, 15.0));
        assert_eq!(level_progress(100), (2, 200, 0.0));
        assert_eq!(level_progress(150), (2, 200, 50.0));
    }

    #[tokio::test]
    async fn test_award_same_key_twice_adds_points_once() {
        use sea_orm::{DatabaseBackend, MockDatabase, Value};
        use std::collections::BTreeMap;

        fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
            let mut row = BTreeMap::new();
            row.insert("num_items", Value::BigInt(Some(n)));
            row
        }

        let achievement = achievements::Model {
            id: 1,
            key: "first_club_join".to_string(),
            title: "Club Member".to_string(),
            description: Some("Joined your first club".to_string()),
            points: 10,
            created_at: None,
            updated_at: None,
        };
        let user = users::Model {
            id: 42,
            name: "Ada".to_string(),
            email: "ada@university.edu".to_string(),
            password_hash: "hash".to_string(),
            role: UserRole::Student,
            points: 0,
            created_at: None,
            updated_at: None,
        };
        let link = user_achievements::Model {
            id: 1,
            user_id: 42,
            achievement_id: 1,
            created_at: None,
        };
        let updated_user = users::Model {
            points: 10,
            ..user.clone()
        };

        let pool = MockDatabase::new(DatabaseBackend::Postgres)
            // first award: lookup, membership check, link insert, points update
            .append_query_results([vec![achievement.clone()]])
            .append_query_results([vec![count_row(0)]])
            .append_query_results([vec![link]])
            .append_query_results([vec![user]])
            .append_query_results([vec![updated_user]])
            // second award stops at the membership check
            .append_query_results([vec![achievement.clone()]])
            .append_query_results([vec![count_row(1)]])
            .into_connection();

        let service = AchievementService::new(pool.clone());

        let first = service
            .check_and_award(42, "first_club_join")
            .await
            .unwrap();
        assert_eq!(first.map(|a| a.points), Some(10));

        let second = service
            .check_and_award(42, "first_club_join")
            .await
            .unwrap();
        assert!(second.is_none());

        // 5 statements for the first award, 2 for the dedup'd repeat:
        // no second insert and no second points update were issued
        let log = pool.into_transaction_log();
        assert_eq!(log.len(), 7);
    }
}
