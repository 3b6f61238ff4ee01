use crate::entities::{
    club_entity as clubs, club_member_entity as club_members,
    event_attendee_entity as event_attendees, event_comment_entity as event_comments,
    event_entity as events, event_rating_entity as event_ratings, user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::middlewares::AuthUser;
use crate::models::*;
use crate::services::{AchievementAction, AchievementService};
use crate::utils::*;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DeleteResult, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

/// Average of the submitted ratings, rounded to 1 decimal place.
fn average_rating(ratings: &[i32]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let sum: i64 = ratings.iter().map(|r| *r as i64).sum();
    let avg = sum as f64 / ratings.len() as f64;
    Some((avg * 10.0).round() / 10.0)
}

fn has_capacity(attendee_count: u64, capacity: i64) -> bool {
    (attendee_count as i64) < capacity
}

#[derive(Clone)]
pub struct EventService {
    pool: DatabaseConnection,
    achievement_service: AchievementService,
}

impl EventService {
    pub fn new(pool: DatabaseConnection, achievement_service: AchievementService) -> Self {
        Self {
            pool,
            achievement_service,
        }
    }

    pub async fn list(&self, query: &EventQuery) -> AppResult<Vec<EventResponse>> {
        let mut find = events::Entity::find()
            .filter(events::Column::IsActive.eq(query.is_active.unwrap_or(true)));

        if let Some(club_id) = query.club {
            find = find.filter(events::Column::ClubId.eq(club_id));
        }
        if let Some(date_from) = query.date_from {
            find = find.filter(events::Column::Date.gte(date_from));
        }
        if let Some(date_to) = query.date_to {
            find = find.filter(events::Column::Date.lte(date_to));
        }
        if let Some(search) = &query.search {
            find = find.filter(
                Condition::any()
                    .add(events::Column::Title.contains(search))
                    .add(events::Column::Description.contains(search)),
            );
        }

        let models = find
            .order_by_asc(events::Column::Date)
            .all(&self.pool)
            .await?;

        let mut responses = Vec::with_capacity(models.len());
        for event in models {
            responses.push(self.build_response(event).await?);
        }
        Ok(responses)
    }

    pub async fn get(&self, event_id: i64) -> AppResult<EventResponse> {
        let event = self.find_event(event_id).await?;
        self.build_response(event).await
    }

    /// Club members only; the membership check is the ownership rule.
    pub async fn create(
        &self,
        request: CreateEventRequest,
        auth: AuthUser,
    ) -> AppResult<EventResponse> {
        validate_event_title(&request.title)?;
        validate_event_description(request.description.as_deref())?;
        validate_event_capacity(request.capacity)?;

        let club = clubs::Entity::find_by_id(request.club_id)
            .one(&self.pool)
            .await?;
        if club.is_none() {
            return Err(AppError::NotFound("Club not found".to_string()));
        }

        let is_member = self.is_club_member(request.club_id, auth.id).await?;
        if !is_member {
            return Err(AppError::Forbidden(
                "You must be a member of the club to create events".to_string(),
            ));
        }

        let event = events::ActiveModel {
            title: Set(request.title.trim().to_string()),
            description: Set(request.description),
            date: Set(request.date),
            venue: Set(request.venue),
            club_id: Set(request.club_id),
            capacity: Set(request.capacity),
            image_url: Set(request.image_url),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        // the event exists regardless of whether the award sticks
        self.achievement_service
            .check_on_action(auth.id, AchievementAction::CreateEvent)
            .await?;

        self.build_response(event).await
    }

    pub async fn update(
        &self,
        event_id: i64,
        request: UpdateEventRequest,
        auth: AuthUser,
    ) -> AppResult<EventResponse> {
        let event = self.find_event(event_id).await?;

        let is_member = self.is_club_member(event.club_id, auth.id).await?;
        if !is_member && !auth.is_admin() {
            return Err(AppError::Forbidden(
                "Not authorized to update this event".to_string(),
            ));
        }

        if let Some(title) = &request.title {
            validate_event_title(title)?;
        }
        validate_event_description(request.description.as_deref())?;
        if let Some(capacity) = request.capacity {
            validate_event_capacity(capacity)?;
        }

        let mut model = event.into_active_model();
        if let Some(title) = request.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(description) = request.description {
            model.description = Set(Some(description));
        }
        if let Some(date) = request.date {
            model.date = Set(date);
        }
        if let Some(venue) = request.venue {
            model.venue = Set(venue);
        }
        if let Some(capacity) = request.capacity {
            model.capacity = Set(capacity);
        }
        if let Some(image_url) = request.image_url {
            model.image_url = Set(Some(image_url));
        }
        if let Some(is_active) = request.is_active {
            model.is_active = Set(is_active);
        }
        let updated = model.update(&self.pool).await?;

        self.build_response(updated).await
    }

    /// Removes the event and its attendee, rating and comment rows.
    pub async fn delete(&self, event_id: i64) -> AppResult<()> {
        let event = self.find_event(event_id).await?;

        event_attendees::Entity::delete_many()
            .filter(event_attendees::Column::EventId.eq(event.id))
            .exec(&self.pool)
            .await?;
        event_ratings::Entity::delete_many()
            .filter(event_ratings::Column::EventId.eq(event.id))
            .exec(&self.pool)
            .await?;
        event_comments::Entity::delete_many()
            .filter(event_comments::Column::EventId.eq(event.id))
            .exec(&self.pool)
            .await?;
        events::Entity::delete_by_id(event.id)
            .exec(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn join(&self, event_id: i64, user_id: i64) -> AppResult<EventResponse> {
        let event = self.find_event(event_id).await?;

        if !event.is_active {
            return Err(AppError::ValidationError(
                "Event is not active".to_string(),
            ));
        }

        let already_attending = event_attendees::Entity::find()
            .filter(event_attendees::Column::EventId.eq(event_id))
            .filter(event_attendees::Column::UserId.eq(user_id))
            .count(&self.pool)
            .await?
            > 0;

        if already_attending {
            return Err(AppError::Conflict(
                "Already attending this event".to_string(),
            ));
        }

        // check-then-insert: two concurrent joins can both pass this check;
        // see the concurrency notes in DESIGN.md
        let attendee_count = event_attendees::Entity::find()
            .filter(event_attendees::Column::EventId.eq(event_id))
            .count(&self.pool)
            .await?;

        if !has_capacity(attendee_count, event.capacity) {
            return Err(AppError::ValidationError(
                "Event is at full capacity".to_string(),
            ));
        }

        event_attendees::ActiveModel {
            event_id: Set(event_id),
            user_id: Set(user_id),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        self.achievement_service
            .check_on_action(user_id, AchievementAction::JoinEvent)
            .await?;

        self.build_response(event).await
    }

    pub async fn leave(&self, event_id: i64, user_id: i64) -> AppResult<EventResponse> {
        let event = self.find_event(event_id).await?;

        let result: DeleteResult = event_attendees::Entity::delete_many()
            .filter(event_attendees::Column::EventId.eq(event_id))
            .filter(event_attendees::Column::UserId.eq(user_id))
            .exec(&self.pool)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::ValidationError(
                "Not attending this event".to_string(),
            ));
        }

        self.build_response(event).await
    }

    pub async fn add_comment(
        &self,
        event_id: i64,
        user_id: i64,
        request: AddCommentRequest,
    ) -> AppResult<CommentResponse> {
        validate_comment_text(&request.text)?;

        self.find_event(event_id).await?;

        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let comment = event_comments::ActiveModel {
            event_id: Set(event_id),
            author: Set(user.name),
            text: Set(request.text.trim().to_string()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        self.achievement_service
            .check_on_action(user_id, AchievementAction::AddComment)
            .await?;

        Ok(CommentResponse::from(comment))
    }

    /// One rating per user per event; a repeat submission overwrites.
    pub async fn rate(
        &self,
        event_id: i64,
        user_id: i64,
        request: RateEventRequest,
    ) -> AppResult<RateEventResponse> {
        validate_rating(request.rating)?;

        self.find_event(event_id).await?;

        let existing = event_ratings::Entity::find()
            .filter(event_ratings::Column::EventId.eq(event_id))
            .filter(event_ratings::Column::UserId.eq(user_id))
            .one(&self.pool)
            .await?;

        match existing {
            Some(model) => {
                let mut am = model.into_active_model();
                am.rating = Set(request.rating);
                am.update(&self.pool).await?;
            }
            None => {
                event_ratings::ActiveModel {
                    event_id: Set(event_id),
                    user_id: Set(user_id),
                    rating: Set(request.rating),
                    ..Default::default()
                }
                .insert(&self.pool)
                .await?;
            }
        }

        let ratings: Vec<i32> = event_ratings::Entity::find()
            .filter(event_ratings::Column::EventId.eq(event_id))
            .select_only()
            .column(event_ratings::Column::Rating)
            .into_tuple()
            .all(&self.pool)
            .await?;

        self.achievement_service
            .check_on_action(user_id, AchievementAction::RateEvent)
            .await?;

        Ok(RateEventResponse {
            rating: request.rating,
            average_rating: average_rating(&ratings).unwrap_or(0.0),
        })
    }

    async fn find_event(&self, event_id: i64) -> AppResult<events::Model> {
        events::Entity::find_by_id(event_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
    }

    async fn is_club_member(&self, club_id: i64, user_id: i64) -> AppResult<bool> {
        let count = club_members::Entity::find()
            .filter(club_members::Column::ClubId.eq(club_id))
            .filter(club_members::Column::UserId.eq(user_id))
            .count(&self.pool)
            .await?;
        Ok(count > 0)
    }

    async fn build_response(&self, event: events::Model) -> AppResult<EventResponse> {
        let club = clubs::Entity::find_by_id(event.club_id)
            .one(&self.pool)
            .await?
            .map(ClubSummary::from);

        let attendee_ids: Vec<i64> = event_attendees::Entity::find()
            .filter(event_attendees::Column::EventId.eq(event.id))
            .select_only()
            .column(event_attendees::Column::UserId)
            .into_tuple()
            .all(&self.pool)
            .await?;

        let attendees: Vec<UserSummary> = if attendee_ids.is_empty() {
            vec![]
        } else {
            users::Entity::find()
                .filter(users::Column::Id.is_in(attendee_ids))
                .all(&self.pool)
                .await?
                .into_iter()
                .map(UserSummary::from)
                .collect()
        };

        let ratings: Vec<i32> = event_ratings::Entity::find()
            .filter(event_ratings::Column::EventId.eq(event.id))
            .select_only()
            .column(event_ratings::Column::Rating)
            .into_tuple()
            .all(&self.pool)
            .await?;

        let comments = event_comments::Entity::find()
            .filter(event_comments::Column::EventId.eq(event.id))
            .order_by_asc(event_comments::Column::CreatedAt)
            .all(&self.pool)
            .await?
            .into_iter()
            .map(CommentResponse::from)
            .collect();

        let attendee_count = attendees.len();

        Ok(EventResponse {
            id: event.id,
            title: event.title,
            description: event.description,
            date: event.date,
            venue: event.venue,
            capacity: event.capacity,
            image_url: event.image_url,
            is_active: event.is_active,
            club,
            attendees,
            attendee_count,
            average_rating: average_rating(&ratings),
            comments,
            created_at: event.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_rating_rounds_to_one_decimal() {
        assert_eq!(average_rating(&[4, 5]), Some(4.5));
        assert_eq!(average_rating(&[4, 5, 3]), Some(4.0));
        assert_eq!(average_rating(&[1, 2]), Some(1.5));
        assert_eq!(average_rating(&[3, 3, 4]), Some(3.3));
        assert_eq!(average_rating(&[]), None);
    }

    #[test]
    fn test_overwrite_changes_average_not_count() {
        // a re-rating replaces the user's entry: [4, 5] -> [4, 3]
        let before = average_rating(&[4, 5]).unwrap();
        let after = average_rating(&[4, 3]).unwrap();
        assert_eq!(before, 4.5);
        assert_eq!(after, 3.5);
    }

    #[test]
    fn test_has_capacity() {
        assert!(has_capacity(0, 1));
        assert!(!has_capacity(1, 1));
        assert!(has_capacity(99, 100));
        assert!(!has_capacity(100, 100));
        // the check-then-insert race can push past capacity; the predicate
        // itself still reports the overflow
        assert!(!has_capacity(101, 100));
    }
}
