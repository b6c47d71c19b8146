use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建学生模块状态表
        manager
            .create_table(
                Table::create()
                    .table(StudentModules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentModules::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentModules::ModuleType)
                            .string_len(32)
                            .not_null()
                            .default("problem"),
                    )
                    .col(
                        ColumnDef::new(StudentModules::ModuleId)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentModules::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentModules::CourseId)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentModules::State).text().null())
                    .col(ColumnDef::new(StudentModules::Grade).double().null())
                    .col(ColumnDef::new(StudentModules::MaxGrade).double().null())
                    .col(
                        ColumnDef::new(StudentModules::Done)
                            .string_len(8)
                            .not_null()
                            .default("na"),
                    )
                    .col(
                        ColumnDef::new(StudentModules::Created)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentModules::Modified)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建离线成绩表
        manager
            .create_table(
                Table::create()
                    .table(OfflineComputedGrades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OfflineComputedGrades::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OfflineComputedGrades::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OfflineComputedGrades::CourseId)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OfflineComputedGrades::Created)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(OfflineComputedGrades::Updated)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OfflineComputedGrades::Gradeset).text().null())
                    .to_owned(),
            )
            .await?;

        // 创建离线成绩计算日志表
        manager
            .create_table(
                Table::create()
                    .table(OfflineComputedGradeLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OfflineComputedGradeLogs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OfflineComputedGradeLogs::CourseId)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OfflineComputedGradeLogs::Created)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(OfflineComputedGradeLogs::Seconds)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(OfflineComputedGradeLogs::Nstudents)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // 学生模块表索引
        for (name, column) in [
            ("idx_studentmodule_module_type", StudentModules::ModuleType),
            ("idx_studentmodule_module_id", StudentModules::ModuleId),
            ("idx_studentmodule_student_id", StudentModules::StudentId),
            ("idx_studentmodule_course_id", StudentModules::CourseId),
            ("idx_studentmodule_grade", StudentModules::Grade),
            ("idx_studentmodule_done", StudentModules::Done),
            ("idx_studentmodule_created", StudentModules::Created),
            ("idx_studentmodule_modified", StudentModules::Modified),
        ] {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(StudentModules::Table)
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
                    .name("uq_studentmodule_student_module_course")
                    .table(StudentModules::Table)
                    .col(StudentModules::StudentId)
                    .col(StudentModules::ModuleId)
                    .col(StudentModules::CourseId)
                    .to_owned(),
            )
            .await?;

        // 离线成绩表索引
        for (name, column) in [
            ("idx_offlinegrade_user_id", OfflineComputedGrades::UserId),
            ("idx_offlinegrade_course_id", OfflineComputedGrades::CourseId),
            ("idx_offlinegrade_created", OfflineComputedGrades::Created),
            ("idx_offlinegrade_updated", OfflineComputedGrades::Updated),
        ] {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(OfflineComputedGrades::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("uq_offlinegrade_user_course")
                    .table(OfflineComputedGrades::Table)
                    .col(OfflineComputedGrades::UserId)
                    .col(OfflineComputedGrades::CourseId)
                    .to_owned(),
            )
            .await?;

        // 日志表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_offlinegradelog_course_id")
                    .table(OfflineComputedGradeLogs::Table)
                    .col(OfflineComputedGradeLogs::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_offlinegradelog_created")
                    .table(OfflineComputedGradeLogs::Table)
                    .col(OfflineComputedGradeLogs::Created)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(OfflineComputedGradeLogs::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(OfflineComputedGrades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentModules::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum StudentModules {
    #[sea_orm(iden = "courseware_studentmodule")]
    Table,
    Id,
    ModuleType,
    ModuleId,
    StudentId,
    CourseId,
    State,
    Grade,
    MaxGrade,
    Done,
    Created,
    Modified,
}

#[derive(DeriveIden)]
enum OfflineComputedGrades {
    #[sea_orm(iden = "courseware_offlinecomputedgrade")]
    Table,
    Id,
    UserId,
    CourseId,
    Created,
    Updated,
    Gradeset,
}

#[derive(DeriveIden)]
enum OfflineComputedGradeLogs {
    #[sea_orm(iden = "courseware_offlinecomputedgradelog")]
    Table,
    Id,
    CourseId,
    Created,
    Seconds,
    Nstudents,
}
