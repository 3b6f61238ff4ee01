use crate::entities::{
    club_entity as clubs, club_member_entity as club_members, college_entity as colleges,
    college_partner_entity as college_partners, event_attendee_entity as event_attendees,
    event_entity as events, partner_entity as partners, user_entity as users,
};
use crate::error::AppResult;
use crate::models::*;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
    Select,
};
use std::collections::HashSet;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage of users with at least one club membership or event
/// attendance, rounded to 2 decimal places. Zero when there are no users.
fn engagement_rate(engaged: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(engaged as f64 / total as f64 * 100.0)
}

/// Users who signed up in the trailing 30 days. Independent of the
/// engagement numerator, which looks at memberships and attendance.
fn active_users_query(now: DateTime<Utc>) -> Select<users::Entity> {
    users::Entity::find().filter(users::Column::CreatedAt.gte(now - Duration::days(30)))
}

/// Active events dated after the trailing 7-day mark, with no upper bound.
fn events_this_week_query(now: DateTime<Utc>) -> Select<events::Entity> {
    events::Entity::find()
        .filter(events::Column::IsActive.eq(true))
        .filter(events::Column::Date.gte(now - Duration::days(7)))
}

fn month_start(year: i32, month: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .unwrap_or_default()
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .and_utc()
}

/// The last 12 calendar months as half-open [start, end) windows, oldest
/// first. The final window is the month containing `now`.
fn month_windows(now: DateTime<Utc>) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    let current = now.year() as i64 * 12 + now.month0() as i64;

    (0..12)
        .map(|i| {
            let start_month = current - (11 - i);
            let end_month = start_month + 1;
            let start = month_start(
                start_month.div_euclid(12) as i32,
                start_month.rem_euclid(12) as u32 + 1,
            );
            let end = month_start(
                end_month.div_euclid(12) as i32,
                end_month.rem_euclid(12) as u32 + 1,
            );
            (start, end)
        })
        .collect()
}

#[derive(Clone)]
pub struct DashboardService {
    pool: DatabaseConnection,
}

impl DashboardService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Recomputes the full snapshot from the source tables.
    pub async fn stats(&self) -> AppResult<DashboardStats> {
        self.stats_at(Utc::now()).await
    }

    async fn stats_at(&self, now: DateTime<Utc>) -> AppResult<DashboardStats> {
        let total_users = users::Entity::find().count(&self.pool).await?;

        // active events only, matching the average-attendance divisor
        let total_events = events::Entity::find()
            .filter(events::Column::IsActive.eq(true))
            .count(&self.pool)
            .await?;

        let total_clubs = clubs::Entity::find().count(&self.pool).await?;
        let total_colleges = colleges::Entity::find().count(&self.pool).await?;
        let total_partners = partners::Entity::find().count(&self.pool).await?;

        let active_users = active_users_query(now).count(&self.pool).await?;

        let events_this_week = events_this_week_query(now).count(&self.pool).await?;

        let upcoming_events = events::Entity::find()
            .filter(events::Column::IsActive.eq(true))
            .filter(events::Column::Date.gte(now))
            .count(&self.pool)
            .await?;

        // colleges holding at least one partner link
        let partnered_college_ids: Vec<i64> = college_partners::Entity::find()
            .select_only()
            .column(college_partners::Column::CollegeId)
            .distinct()
            .into_tuple()
            .all(&self.pool)
            .await?;
        let partner_universities = partnered_college_ids.len() as u64;

        let engaged_users = self.count_engaged_users().await?;
        let engagement_rate = engagement_rate(engaged_users, total_users);

        let total_attendances = event_attendees::Entity::find().count(&self.pool).await?;
        let average_attendance = if total_events == 0 {
            0.0
        } else {
            round2(total_attendances as f64 / total_events as f64)
        };

        let monthly_attendance_trend = self.attendance_trend(now).await?;

        Ok(DashboardStats {
            total_users,
            active_users,
            total_events,
            total_clubs,
            total_colleges,
            total_partners,
            events_this_week,
            upcoming_events,
            partner_universities,
            engagement_rate,
            average_attendance,
            monthly_attendance_trend,
            generated_at: now,
        })
    }

    /// Distinct users holding a club membership or an event attendance.
    async fn count_engaged_users(&self) -> AppResult<u64> {
        let member_ids: Vec<i64> = club_members::Entity::find()
            .select_only()
            .column(club_members::Column::UserId)
            .into_tuple()
            .all(&self.pool)
            .await?;

        let attendee_ids: Vec<i64> = event_attendees::Entity::find()
            .select_only()
            .column(event_attendees::Column::UserId)
            .into_tuple()
            .all(&self.pool)
            .await?;

        let engaged: HashSet<i64> = member_ids
            .into_iter()
            .chain(attendee_ids.into_iter())
            .collect();

        Ok(engaged.len() as u64)
    }

    /// Attendance totals for active events over the last 12 calendar months,
    /// oldest month first.
    async fn attendance_trend(&self, now: DateTime<Utc>) -> AppResult<Vec<u64>> {
        let mut trend = Vec::with_capacity(12);

        for (start, end) in month_windows(now) {
            let event_ids: Vec<i64> = events::Entity::find()
                .filter(events::Column::IsActive.eq(true))
                .filter(events::Column::Date.gte(start))
                .filter(events::Column::Date.lt(end))
                .select_only()
                .column(events::Column::Id)
                .into_tuple()
                .all(&self.pool)
                .await?;

            let count = if event_ids.is_empty() {
                0
            } else {
                event_attendees::Entity::find()
                    .filter(event_attendees::Column::EventId.is_in(event_ids))
                    .count(&self.pool)
                    .await?
            };

            trend.push(count);
        }

        Ok(trend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use sea_orm::{DatabaseBackend, MockDatabase, QueryTrait, Value};
    use std::collections::BTreeMap;

    fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
        let mut row = BTreeMap::new();
        row.insert("num_items", Value::BigInt(Some(n)));
        row
    }

    fn id_row(key: &'static str, id: i64) -> BTreeMap<&'static str, Value> {
        let mut row = BTreeMap::new();
        row.insert(key, Value::BigInt(Some(id)));
        row
    }

    #[test]
    fn test_engagement_rate() {
        assert_eq!(engagement_rate(0, 0), 0.0);
        assert_eq!(engagement_rate(0, 10), 0.0);
        assert_eq!(engagement_rate(5, 10), 50.0);
        assert_eq!(engagement_rate(10, 10), 100.0);
        assert_eq!(engagement_rate(1, 3), 33.33);
        assert_eq!(engagement_rate(2, 3), 66.67);
    }

    #[test]
    fn test_active_users_window_is_signup_based() {
        let now = Utc.with_ymd_and_hms(2026, 8, 31, 12, 0, 0).unwrap();
        let sql = active_users_query(now)
            .build(DatabaseBackend::Postgres)
            .to_string();

        assert!(sql.contains(r#""users"."created_at" >="#));
        assert!(sql.contains("2026-08-01"));
    }

    #[test]
    fn test_events_this_week_is_trailing_window() {
        let now = Utc.with_ymd_and_hms(2026, 8, 31, 12, 0, 0).unwrap();
        let sql = events_this_week_query(now)
            .build(DatabaseBackend::Postgres)
            .to_string();

        assert!(sql.contains(r#""events"."date" >="#));
        assert!(sql.contains("2026-08-24"));
        // trailing window has no upper bound
        assert!(!sql.contains(r#""events"."date" <"#));
    }

    #[tokio::test]
    async fn test_stats_field_wiring() {
        let now = Utc.with_ymd_and_hms(2026, 8, 31, 12, 0, 0).unwrap();

        let mut mock = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(10)]]) // total users
            .append_query_results([vec![count_row(4)]]) // active events
            .append_query_results([vec![count_row(3)]]) // clubs
            .append_query_results([vec![count_row(2)]]) // colleges
            .append_query_results([vec![count_row(5)]]) // partners
            .append_query_results([vec![count_row(3)]]) // recent signups
            .append_query_results([vec![count_row(2)]]) // events this week
            .append_query_results([vec![count_row(1)]]) // upcoming
            .append_query_results([vec![
                id_row("college_id", 1),
                id_row("college_id", 2),
            ]])
            .append_query_results([vec![id_row("user_id", 1)]]) // club members
            .append_query_results([vec![id_row("user_id", 1), id_row("user_id", 7)]])
            .append_query_results([vec![count_row(8)]]); // attendances
        for _ in 0..12 {
            mock = mock.append_query_results([Vec::<BTreeMap<&'static str, Value>>::new()]);
        }

        let service = DashboardService::new(mock.into_connection());
        let stats = service.stats_at(now).await.unwrap();

        // signup window, not the engagement numerator
        assert_eq!(stats.active_users, 3);
        assert_eq!(stats.total_users, 10);
        assert_eq!(stats.total_events, 4);

        // two distinct colleges hold partner links
        assert_eq!(stats.partner_universities, 2);

        // users 1 and 7 engaged out of 10
        assert_eq!(stats.engagement_rate, 20.0);

        // 8 attendances over the 4 active events
        assert_eq!(stats.average_attendance, 2.0);

        assert_eq!(stats.monthly_attendance_trend, vec![0; 12]);
        assert_eq!(stats.generated_at, now);
    }

    #[test]
    fn test_month_windows_contiguous() {
        let now = Utc.with_ymd_and_hms(2026, 8, 15, 12, 0, 0).unwrap();
        let windows = month_windows(now);

        assert_eq!(windows.len(), 12);
        for pair in windows.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }

        let last = windows[11];
        assert_eq!(last.0, Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap());
        assert_eq!(last.1, Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_month_windows_cross_year_boundary() {
        let now = Utc.with_ymd_and_hms(2026, 1, 3, 0, 0, 0).unwrap();
        let windows = month_windows(now);

        let first = windows[0];
        assert_eq!(first.0, Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap());
        assert_eq!(first.1, Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap());

        let last = windows[11];
        assert_eq!(last.0, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(last.1, Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.333333), 33.33);
        assert_eq!(round2(66.666666), 66.67);
        assert_eq!(round2(2.5), 2.5);
    }
}
