use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 限时模块表 ====================
        manager
            .create_table(
                Table::create()
                    .table(TimedModules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TimedModules::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TimedModules::ModuleId)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimedModules::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimedModules::CourseId)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimedModules::AccommodationCode)
                            .string_len(12)
                            .not_null()
                            .default("NONE"),
                    )
                    .col(
                        ColumnDef::new(TimedModules::BeginningAt)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(TimedModules::EndingAt).big_integer().null())
                    .col(
                        ColumnDef::new(TimedModules::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimedModules::ModifiedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_timedmodule_module_id", TimedModules::ModuleId),
            ("idx_timedmodule_student_id", TimedModules::StudentId),
            ("idx_timedmodule_course_id", TimedModules::CourseId),
            (
                "idx_timedmodule_accommodation_code",
                TimedModules::AccommodationCode,
            ),
            ("idx_timedmodule_beginning_at", TimedModules::BeginningAt),
            ("idx_timedmodule_ending_at", TimedModules::EndingAt),
            ("idx_timedmodule_created_at", TimedModules::CreatedAt),
            ("idx_timedmodule_modified_at", TimedModules::ModifiedAt),
        ] {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(TimedModules::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        // (student, module_id, course_id) 唯一
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("uq_timedmodule_student_module_course")
                    .table(TimedModules::Table)
                    .col(TimedModules::StudentId)
                    .col(TimedModules::ModuleId)
                    .col(TimedModules::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TimedModules::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum TimedModules {
    #[sea_orm(iden = "courseware_timedmodule")]
    Table,
    Id,
    ModuleId,
    StudentId,
    CourseId,
    AccommodationCode,
    BeginningAt,
    EndingAt,
    CreatedAt,
    ModifiedAt,
}
