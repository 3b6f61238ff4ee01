use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Role,
    Points,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Achievements {
    Table,
    Id,
    Key,
    Title,
    Description,
    Points,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Colleges {
    Table,
    Id,
    Name,
    Location,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Clubs {
    Table,
    Id,
    Name,
    Description,
    CollegeId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    Title,
    Description,
    Date,
    Venue,
    ClubId,
    Capacity,
    ImageUrl,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Partners {
    Table,
    Id,
    Name,
    PartnerType,
    ContactEmail,
    ContactPhone,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UserAchievements {
    Table,
    Id,
    UserId,
    AchievementId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ClubMembers {
    Table,
    Id,
    ClubId,
    UserId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum EventAttendees {
    Table,
    Id,
    EventId,
    UserId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum EventRatings {
    Table,
    Id,
    EventId,
    UserId,
    Rating,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EventComments {
    Table,
    Id,
    EventId,
    Author,
    Text,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CollegePartners {
    Table,
    Id,
    CollegeId,
    PartnerId,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Users::Role)
                            .string()
                            .not_null()
                            .default("student"),
                    )
                    .col(
                        ColumnDef::new(Users::Points)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null())
                    .col(ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_users_email")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Achievements::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Achievements::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key())
                    .col(ColumnDef::new(Achievements::Key).string().not_null())
                    .col(ColumnDef::new(Achievements::Title).string().not_null())
                    .col(ColumnDef::new(Achievements::Description).string().null())
                    .col(
                        ColumnDef::new(Achievements::Points)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Achievements::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null())
                    .col(ColumnDef::new(Achievements::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_achievements_key")
                    .table(Achievements::Table)
                    .col(Achievements::Key)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Colleges::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Colleges::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key())
                    .col(ColumnDef::new(Colleges::Name).string().not_null())
                    .col(ColumnDef::new(Colleges::Location).string().not_null())
                    .col(ColumnDef::new(Colleges::Description).string().null())
                    .col(ColumnDef::new(Colleges::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null())
                    .col(ColumnDef::new(Colleges::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_colleges_name")
                    .table(Colleges::Table)
                    .col(Colleges::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Clubs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Clubs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key())
                    .col(ColumnDef::new(Clubs::Name).string().not_null())
                    .col(ColumnDef::new(Clubs::Description).string().null())
                    .col(ColumnDef::new(Clubs::CollegeId).big_integer().not_null())
                    .col(ColumnDef::new(Clubs::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null())
                    .col(ColumnDef::new(Clubs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null())
                    .to_owned(),
            )
            .await?;

        // club names are unique per college, not globally
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_clubs_name_college")
                    .table(Clubs::Table)
                    .col(Clubs::Name)
                    .col(Clubs::CollegeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Events::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key())
                    .col(ColumnDef::new(Events::Title).string().not_null())
                    .col(ColumnDef::new(Events::Description).string().null())
                    .col(
                        ColumnDef::new(Events::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Events::Venue).string().not_null())
                    .col(ColumnDef::new(Events::ClubId).big_integer().not_null())
                    .col(ColumnDef::new(Events::Capacity).big_integer().not_null())
                    .col(ColumnDef::new(Events::ImageUrl).string().null())
                    .col(
                        ColumnDef::new(Events::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Events::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null())
                    .col(ColumnDef::new(Events::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_events_club_date")
                    .table(Events::Table)
                    .col(Events::ClubId)
                    .col(Events::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Partners::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Partners::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key())
                    .col(ColumnDef::new(Partners::Name).string().not_null())
                    .col(
                        ColumnDef::new(Partners::PartnerType)
                            .string()
                            .not_null()
                            .default("sponsor"),
                    )
                    .col(ColumnDef::new(Partners::ContactEmail).string().null())
                    .col(ColumnDef::new(Partners::ContactPhone).string().null())
                    .col(ColumnDef::new(Partners::Description).string().null())
                    .col(ColumnDef::new(Partners::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null())
                    .col(ColumnDef::new(Partners::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_partners_name")
                    .table(Partners::Table)
                    .col(Partners::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserAchievements::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserAchievements::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key())
                    .col(
                        ColumnDef::new(UserAchievements::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserAchievements::AchievementId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserAchievements::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null())
                    .to_owned(),
            )
            .await?;

        // an achievement is awarded at most once per user
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_user_achievements_pair")
                    .table(UserAchievements::Table)
                    .col(UserAchievements::UserId)
                    .col(UserAchievements::AchievementId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ClubMembers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ClubMembers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key())
                    .col(ColumnDef::new(ClubMembers::ClubId).big_integer().not_null())
                    .col(ColumnDef::new(ClubMembers::UserId).big_integer().not_null())
                    .col(ColumnDef::new(ClubMembers::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_club_members_pair")
                    .table(ClubMembers::Table)
                    .col(ClubMembers::ClubId)
                    .col(ClubMembers::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EventAttendees::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(EventAttendees::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key())
                    .col(
                        ColumnDef::new(EventAttendees::EventId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventAttendees::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EventAttendees::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_event_attendees_pair")
                    .table(EventAttendees::Table)
                    .col(EventAttendees::EventId)
                    .col(EventAttendees::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EventRatings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(EventRatings::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key())
                    .col(
                        ColumnDef::new(EventRatings::EventId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventRatings::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EventRatings::Rating).integer().not_null())
                    .col(ColumnDef::new(EventRatings::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null())
                    .col(ColumnDef::new(EventRatings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null())
                    .to_owned(),
            )
            .await?;

        // one rating per user per event, latest wins
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_event_ratings_pair")
                    .table(EventRatings::Table)
                    .col(EventRatings::EventId)
                    .col(EventRatings::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EventComments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(EventComments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key())
                    .col(
                        ColumnDef::new(EventComments::EventId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EventComments::Author).string().not_null())
                    .col(ColumnDef::new(EventComments::Text).string().not_null())
                    .col(ColumnDef::new(EventComments::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_event_comments_event")
                    .table(EventComments::Table)
                    .col(EventComments::EventId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CollegePartners::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CollegePartners::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key())
                    .col(
                        ColumnDef::new(CollegePartners::CollegeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CollegePartners::PartnerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CollegePartners::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_college_partners_pair")
                    .table(CollegePartners::Table)
                    .col(CollegePartners::CollegeId)
                    .col(CollegePartners::PartnerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            Table::drop().table(CollegePartners::Table).to_owned(),
            Table::drop().table(EventComments::Table).to_owned(),
            Table::drop().table(EventRatings::Table).to_owned(),
            Table::drop().table(EventAttendees::Table).to_owned(),
            Table::drop().table(ClubMembers::Table).to_owned(),
            Table::drop().table(UserAchievements::Table).to_owned(),
            Table::drop().table(Partners::Table).to_owned(),
            Table::drop().table(Events::Table).to_owned(),
            Table::drop().table(Clubs::Table).to_owned(),
            Table::drop().table(Colleges::Table).to_owned(),
            Table::drop().table(Achievements::Table).to_owned(),
            Table::drop().table(Users::Table).to_owned(),
        ] {
            manager.drop_table(table).await?;
        }
        Ok(())
    }
}
