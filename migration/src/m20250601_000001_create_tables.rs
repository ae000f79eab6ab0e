use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::ProfileName).string().null())
                    .col(ColumnDef::new(Users::AvatarUrl).string().null())
                    .col(ColumnDef::new(Users::GradeLevel).string().null())
                    .col(ColumnDef::new(Users::TeachingLocation).string().null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建时段报价表
        manager
            .create_table(
                Table::create()
                    .table(TimeSlots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TimeSlots::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TimeSlots::TutorId).big_integer().not_null())
                    .col(ColumnDef::new(TimeSlots::SubjectName).string().not_null())
                    .col(ColumnDef::new(TimeSlots::GradeLevel).string().not_null())
                    .col(ColumnDef::new(TimeSlots::DaysOfWeek).string().not_null())
                    .col(ColumnDef::new(TimeSlots::Fee).double().not_null())
                    .col(ColumnDef::new(TimeSlots::Timezone).string().not_null())
                    .col(ColumnDef::new(TimeSlots::Notes).text().null())
                    .col(ColumnDef::new(TimeSlots::SessionType).string().not_null())
                    .col(
                        ColumnDef::new(TimeSlots::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(TimeSlots::Version)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(TimeSlots::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(TimeSlots::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(TimeSlots::Table, TimeSlots::TutorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建报价内具体时段表
        manager
            .create_table(
                Table::create()
                    .table(TimeSlotRanges::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TimeSlotRanges::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TimeSlotRanges::TimeSlotId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TimeSlotRanges::StartTime).string().not_null())
                    .col(ColumnDef::new(TimeSlotRanges::EndTime).string().not_null())
                    .col(
                        ColumnDef::new(TimeSlotRanges::IsBooked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TimeSlotRanges::Table, TimeSlotRanges::TimeSlotId)
                            .to(TimeSlots::Table, TimeSlots::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建预约表
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Bookings::TutorId).big_integer().not_null())
                    .col(ColumnDef::new(Bookings::TimeSlotId).big_integer().not_null())
                    .col(ColumnDef::new(Bookings::RangeId).big_integer().not_null())
                    .col(ColumnDef::new(Bookings::StartDate).big_integer().not_null())
                    .col(ColumnDef::new(Bookings::EndDate).big_integer().not_null())
                    .col(ColumnDef::new(Bookings::DurationMonths).integer().not_null())
                    .col(ColumnDef::new(Bookings::Fee).double().not_null())
                    .col(ColumnDef::new(Bookings::TotalAmount).double().not_null())
                    .col(ColumnDef::new(Bookings::TeachingMode).string().not_null())
                    .col(ColumnDef::new(Bookings::Status).string().not_null())
                    .col(ColumnDef::new(Bookings::PaymentState).string().not_null())
                    .col(ColumnDef::new(Bookings::CancellationReason).text().null())
                    .col(ColumnDef::new(Bookings::Notes).text().null())
                    .col(
                        ColumnDef::new(Bookings::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Bookings::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Bookings::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Bookings::Table, Bookings::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Bookings::Table, Bookings::TimeSlotId)
                            .to(TimeSlots::Table, TimeSlots::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建支付单表
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Payments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Payments::BookingId).big_integer().not_null())
                    .col(ColumnDef::new(Payments::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Payments::Amount).double().not_null())
                    .col(
                        ColumnDef::new(Payments::OrderRef)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Payments::TransactionId).string().null())
                    .col(ColumnDef::new(Payments::Status).string().not_null())
                    .col(ColumnDef::new(Payments::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Payments::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Payments::Table, Payments::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作业表
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assignments::BookingId).big_integer().not_null())
                    .col(ColumnDef::new(Assignments::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Assignments::TutorId).big_integer().not_null())
                    .col(ColumnDef::new(Assignments::Title).string().not_null())
                    .col(ColumnDef::new(Assignments::Subject).string().not_null())
                    .col(ColumnDef::new(Assignments::Description).text().not_null())
                    .col(ColumnDef::new(Assignments::DueDate).big_integer().not_null())
                    .col(ColumnDef::new(Assignments::Attachments).text().null())
                    .col(ColumnDef::new(Assignments::SubmissionRemarks).text().null())
                    .col(
                        ColumnDef::new(Assignments::SubmissionAttachments)
                            .text()
                            .null(),
                    )
                    .col(ColumnDef::new(Assignments::SubmittedAt).big_integer().null())
                    .col(ColumnDef::new(Assignments::FeedbackContent).text().null())
                    .col(ColumnDef::new(Assignments::FeedbackGrade).double().null())
                    .col(
                        ColumnDef::new(Assignments::FeedbackProvidedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Assignments::Status).string().not_null())
                    .col(
                        ColumnDef::new(Assignments::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Assignments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评价表（booking_id 唯一约束保证一次为限）
        manager
            .create_table(
                Table::create()
                    .table(Ratings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Ratings::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Ratings::BookingId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Ratings::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Ratings::TutorId).big_integer().not_null())
                    .col(ColumnDef::new(Ratings::Rating).integer().not_null())
                    .col(ColumnDef::new(Ratings::Review).text().null())
                    .col(ColumnDef::new(Ratings::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Ratings::Table, Ratings::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建通知表
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Notifications::RecipientId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notifications::Kind).string().not_null())
                    .col(ColumnDef::new(Notifications::Message).text().not_null())
                    .col(ColumnDef::new(Notifications::RefId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Notifications::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notifications::Table, Notifications::RecipientId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 常用查询索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_time_slots_tutor_active")
                    .table(TimeSlots::Table)
                    .col(TimeSlots::TutorId)
                    .col(TimeSlots::IsActive)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bookings_student")
                    .table(Bookings::Table)
                    .col(Bookings::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bookings_tutor")
                    .table(Bookings::Table)
                    .col(Bookings::TutorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_notifications_recipient_read")
                    .table(Notifications::Table)
                    .col(Notifications::RecipientId)
                    .col(Notifications::IsRead)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Ratings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TimeSlotRanges::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TimeSlots::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    Status,
    ProfileName,
    AvatarUrl,
    GradeLevel,
    TeachingLocation,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TimeSlots {
    Table,
    Id,
    TutorId,
    SubjectName,
    GradeLevel,
    DaysOfWeek,
    Fee,
    Timezone,
    Notes,
    SessionType,
    IsActive,
    Version,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TimeSlotRanges {
    Table,
    Id,
    TimeSlotId,
    StartTime,
    EndTime,
    IsBooked,
}

#[derive(DeriveIden)]
enum Bookings {
    Table,
    Id,
    StudentId,
    TutorId,
    TimeSlotId,
    RangeId,
    StartDate,
    EndDate,
    DurationMonths,
    Fee,
    TotalAmount,
    TeachingMode,
    Status,
    PaymentState,
    CancellationReason,
    Notes,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Payments {
    Table,
    Id,
    BookingId,
    StudentId,
    Amount,
    OrderRef,
    TransactionId,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Assignments {
    Table,
    Id,
    BookingId,
    StudentId,
    TutorId,
    Title,
    Subject,
    Description,
    DueDate,
    Attachments,
    SubmissionRemarks,
    SubmissionAttachments,
    SubmittedAt,
    FeedbackContent,
    FeedbackGrade,
    FeedbackProvidedAt,
    Status,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Ratings {
    Table,
    Id,
    BookingId,
    StudentId,
    TutorId,
    Rating,
    Review,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    Id,
    RecipientId,
    Kind,
    Message,
    RefId,
    IsRead,
    CreatedAt,
}
